//! Image reference and resolved-file domain types.
//!
//! An [`ImageReference`] is classified once, at ingestion, from the raw
//! string a caller supplied. Resolving it yields a [`ResolvedFile`]; files
//! the pipeline created carry an [`EphemeralFile`] guard that removes them.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::TempPath;
use tracing::{debug, warn};

use crate::error::ResolutionCause;

/// Extension used when nothing better can be inferred.
pub const DEFAULT_IMAGE_EXTENSION: &str = "jpg";

/// A raw image reference as it appears on the wire.
///
/// Accepts either a bare string or an object with a `url` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawImageRef {
    Url(String),
    Object {
        #[serde(default)]
        url: String,
    },
}

impl RawImageRef {
    /// Unwrap `{url: ...}` containers to the raw string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Url(url) | Self::Object { url } => url,
        }
    }
}

impl From<String> for RawImageRef {
    fn from(value: String) -> Self {
        Self::Url(value)
    }
}

impl From<&str> for RawImageRef {
    fn from(value: &str) -> Self {
        Self::Url(value.to_string())
    }
}

/// A classified image reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageReference {
    /// Inline `data:image/...;base64,<payload>` content.
    DataUri {
        mime_hint: Option<String>,
        payload: String,
    },
    /// An `http://` or `https://` URL to download.
    RemoteUrl { url: String },
    /// A pre-existing file on the local filesystem.
    LocalPath { path: PathBuf },
}

impl ImageReference {
    /// Classify a raw reference by its literal prefix.
    ///
    /// A data URI without a `,` separator is rejected here, since its
    /// payload cannot be located.
    pub fn classify(raw: &str) -> Result<Self, ResolutionCause> {
        if raw.starts_with("data:image") {
            let (header, payload) = raw.split_once(',').ok_or_else(|| {
                ResolutionCause::Decode("data URI is missing the ',' separator".to_string())
            })?;
            let mime_hint = header
                .trim_start_matches("data:")
                .split(';')
                .next()
                .filter(|m| !m.is_empty())
                .map(str::to_string);
            Ok(Self::DataUri {
                mime_hint,
                payload: payload.to_string(),
            })
        } else if raw.starts_with("http://") || raw.starts_with("https://") {
            Ok(Self::RemoteUrl {
                url: raw.to_string(),
            })
        } else {
            Ok(Self::LocalPath {
                path: PathBuf::from(raw),
            })
        }
    }

    /// Short name of the variant, for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::DataUri { .. } => "data_uri",
            Self::RemoteUrl { .. } => "remote_url",
            Self::LocalPath { .. } => "local_path",
        }
    }

    /// File extension to use for a temp file materializing this reference.
    #[must_use]
    pub fn temp_extension(&self) -> &'static str {
        match self {
            Self::DataUri { mime_hint, .. } => mime_hint
                .as_deref()
                .and_then(extension_for_mime)
                .unwrap_or(DEFAULT_IMAGE_EXTENSION),
            Self::RemoteUrl { url } => {
                extension_from_url(url).unwrap_or(DEFAULT_IMAGE_EXTENSION)
            }
            Self::LocalPath { .. } => DEFAULT_IMAGE_EXTENSION,
        }
    }
}

fn extension_for_mime(mime: &str) -> Option<&'static str> {
    match mime.to_ascii_lowercase().as_str() {
        "image/png" => Some("png"),
        "image/jpeg" | "image/jpg" | "image/pjpeg" => Some("jpg"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        "image/bmp" => Some("bmp"),
        "image/heic" => Some("heic"),
        "image/heif" => Some("heif"),
        _ => None,
    }
}

fn extension_from_url(url: &str) -> Option<&'static str> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let last_segment = path.rsplit('/').next()?;
    let (_, ext) = last_segment.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "png" => Some("png"),
        "jpg" | "jpeg" => Some("jpg"),
        "gif" => Some("gif"),
        "webp" => Some("webp"),
        "bmp" => Some("bmp"),
        "heic" => Some("heic"),
        "heif" => Some("heif"),
        _ => None,
    }
}

/// Ownership guard for a temp file created by the pipeline.
///
/// The file is removed by [`EphemeralFile::remove`] or on drop, whichever
/// comes first. Removal failures are logged, never returned.
#[derive(Debug)]
pub struct EphemeralFile {
    temp: Option<TempPath>,
}

impl EphemeralFile {
    #[must_use]
    pub const fn new(temp: TempPath) -> Self {
        Self { temp: Some(temp) }
    }

    /// Remove the file. Returns `true` only for the call that removed it.
    pub fn remove(&mut self) -> bool {
        let Some(temp) = self.temp.take() else {
            return false;
        };
        let path = temp.to_path_buf();
        match temp.close() {
            Ok(()) => {
                debug!(path = %path.display(), "Removed temp image file");
                true
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Temp image file already gone");
                false
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to delete temp image file");
                false
            }
        }
    }

    /// Whether the file is still owned (not yet removed).
    #[must_use]
    pub const fn is_live(&self) -> bool {
        self.temp.is_some()
    }
}

impl Drop for EphemeralFile {
    fn drop(&mut self) {
        self.remove();
    }
}

/// A locally readable image file.
#[derive(Debug)]
pub struct ResolvedFile {
    path: PathBuf,
    guard: Option<EphemeralFile>,
}

impl ResolvedFile {
    /// A caller-supplied file. Never deleted by the pipeline.
    #[must_use]
    pub const fn borrowed(path: PathBuf) -> Self {
        Self { path, guard: None }
    }

    /// A file the pipeline created and must delete.
    #[must_use]
    pub fn ephemeral(temp: TempPath) -> Self {
        Self {
            path: temp.to_path_buf(),
            guard: Some(EphemeralFile::new(temp)),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn is_ephemeral(&self) -> bool {
        self.guard.is_some()
    }

    fn release(&mut self) -> bool {
        self.guard.as_mut().is_some_and(EphemeralFile::remove)
    }
}

/// All files resolved for one request, kept together for cleanup.
///
/// Dropping the batch removes every ephemeral member, so an early return
/// or a cancelled request cannot leak temp files.
#[derive(Debug, Default)]
pub struct ResolutionBatch {
    files: Vec<ResolvedFile>,
}

impl ResolutionBatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, file: ResolvedFile) {
        self.files.push(file);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedFile> {
        self.files.iter()
    }

    /// Paths of every file, in input order.
    #[must_use]
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.iter().map(|f| f.path.clone()).collect()
    }

    #[must_use]
    pub fn ephemeral_count(&self) -> usize {
        self.files.iter().filter(|f| f.is_ephemeral()).count()
    }

    /// Remove every ephemeral file now. Returns how many were removed.
    pub fn cleanup(mut self) -> usize {
        self.release_all()
    }

    fn release_all(&mut self) -> usize {
        self.files
            .iter_mut()
            .map(ResolvedFile::release)
            .filter(|removed| *removed)
            .count()
    }
}

impl Drop for ResolutionBatch {
    fn drop(&mut self) {
        let removed = self.release_all();
        if removed > 0 {
            debug!(removed, "Released temp image files on drop");
        }
    }
}
