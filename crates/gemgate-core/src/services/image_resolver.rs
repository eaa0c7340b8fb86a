//! Image resolution.
//!
//! Materializes every image reference of a request as a locally readable
//! file. Data URIs are decoded and remote URLs downloaded into temp files
//! owned by the returned [`ResolutionBatch`]; local paths are borrowed.
//!
//! References are resolved sequentially, in input order. If any reference
//! fails, the temp files already created for the batch are removed before
//! the error is returned.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tracing::{debug, warn};

use crate::domain::{ImageReference, RawImageRef, ResolutionBatch, ResolvedFile};
use crate::error::{ImageResolutionError, ResolutionCause};
use crate::ports::RemoteFetchPort;

/// Timeout applied to each remote image download.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

const TEMP_PREFIX: &str = "gemgate-";

/// Configuration for [`ImageResolver`].
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Directory that receives temp image files.
    pub temp_dir: PathBuf,
    /// Per-download timeout.
    pub fetch_timeout: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            temp_dir: std::env::temp_dir(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

impl ResolverConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the directory for temp image files.
    #[must_use]
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = dir.into();
        self
    }

    /// Set the remote download timeout.
    #[must_use]
    pub const fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }
}

/// Resolves image references into a [`ResolutionBatch`].
#[derive(Debug, Clone)]
pub struct ImageResolver {
    fetcher: Arc<dyn RemoteFetchPort>,
    config: ResolverConfig,
}

impl ImageResolver {
    pub fn new(fetcher: Arc<dyn RemoteFetchPort>, config: ResolverConfig) -> Self {
        Self { fetcher, config }
    }

    #[must_use]
    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve every reference, in order.
    ///
    /// On failure no temp file created by this call remains on disk.
    pub async fn resolve_all(
        &self,
        references: &[RawImageRef],
    ) -> Result<ResolutionBatch, ImageResolutionError> {
        let mut batch = ResolutionBatch::new();

        for (index, raw) in references.iter().enumerate() {
            match self.resolve_one(raw.as_str()).await {
                Ok(file) => {
                    debug!(
                        index,
                        path = %file.path().display(),
                        ephemeral = file.is_ephemeral(),
                        "Resolved image"
                    );
                    batch.push(file);
                }
                Err(err) => {
                    let rolled_back = batch.cleanup();
                    warn!(
                        index,
                        reference = %err.reference,
                        cause = %err.cause,
                        rolled_back,
                        "Image resolution failed"
                    );
                    return Err(err);
                }
            }
        }

        Ok(batch)
    }

    /// Classify and materialize a single raw reference.
    pub async fn resolve_one(&self, raw: &str) -> Result<ResolvedFile, ImageResolutionError> {
        let reference =
            ImageReference::classify(raw).map_err(|cause| ImageResolutionError::new(raw, cause))?;
        self.materialize(&reference)
            .await
            .map_err(|cause| ImageResolutionError::new(raw, cause))
    }

    async fn materialize(&self, reference: &ImageReference) -> Result<ResolvedFile, ResolutionCause> {
        match reference {
            ImageReference::DataUri { payload, .. } => {
                let bytes = decode_base64(payload)?;
                self.write_temp(&bytes, reference.temp_extension()).await
            }
            ImageReference::RemoteUrl { url } => {
                let bytes = self.fetcher.fetch(url, self.config.fetch_timeout).await?;
                self.write_temp(&bytes, reference.temp_extension()).await
            }
            ImageReference::LocalPath { path } => {
                if tokio::fs::try_exists(path).await.unwrap_or(false) {
                    Ok(ResolvedFile::borrowed(path.clone()))
                } else {
                    Err(ResolutionCause::NotFound)
                }
            }
        }
    }

    async fn write_temp(&self, bytes: &[u8], extension: &str) -> Result<ResolvedFile, ResolutionCause> {
        let temp = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .suffix(&format!(".{extension}"))
            .tempfile_in(&self.config.temp_dir)?
            .into_temp_path();

        // The guard owns the path from here on, so a failed write still removes it.
        let file = ResolvedFile::ephemeral(temp);
        tokio::fs::write(file.path(), bytes).await?;
        Ok(file)
    }
}

/// Decode a standard base64 payload, ignoring embedded whitespace.
pub fn decode_base64(payload: &str) -> Result<Vec<u8>, ResolutionCause> {
    let compact: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| ResolutionCause::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::FetchError;
    use crate::services::testing::FakeFetcher;
    use std::path::Path;

    fn resolver_in(dir: &Path, fetcher: FakeFetcher) -> ImageResolver {
        ImageResolver::new(
            Arc::new(fetcher),
            ResolverConfig::new().with_temp_dir(dir),
        )
    }

    fn files_in(dir: &Path) -> Vec<PathBuf> {
        std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect()
    }

    fn refs(values: &[&str]) -> Vec<RawImageRef> {
        values.iter().map(|v| RawImageRef::from(*v)).collect()
    }

    #[test]
    fn default_config_uses_process_temp_dir_and_thirty_seconds() {
        let config = ResolverConfig::default();
        assert_eq!(config.temp_dir, std::env::temp_dir());
        assert_eq!(config.fetch_timeout, Duration::from_secs(30));
    }

    #[test]
    fn decode_round_trips_bytes() {
        let original: Vec<u8> = (0..=255).collect();
        let encoded = STANDARD.encode(&original);
        assert_eq!(decode_base64(&encoded).unwrap(), original);
    }

    #[test]
    fn decode_ignores_line_breaks() {
        assert_eq!(decode_base64("AA\nAA").unwrap(), vec![0, 0, 0]);
    }

    #[test]
    fn decode_rejects_malformed_payload() {
        assert!(matches!(
            decode_base64("not base64!"),
            Err(ResolutionCause::Decode(_))
        ));
    }

    #[tokio::test]
    async fn data_uri_becomes_an_ephemeral_file_with_decoded_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = resolver_in(dir.path(), FakeFetcher::new());

        let batch = resolver
            .resolve_all(&refs(&["data:image/png;base64,iVBORw0KGgo="]))
            .await
            .unwrap();

        assert_eq!(batch.len(), 1);
        assert_eq!(batch.ephemeral_count(), 1);
        let path = batch.paths().remove(0);
        assert!(path.starts_with(dir.path()));
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));
        assert_eq!(
            std::fs::read(&path).unwrap(),
            b"\x89PNG\r\n\x1a\n".to_vec()
        );

        batch.cleanup();
        assert!(files_in(dir.path()).is_empty());
    }

    #[tokio::test]
    async fn remote_url_is_downloaded_with_configured_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = FakeFetcher::new().with_body("https://img.test/cat.gif", b"GIF89a");
        let resolver = ImageResolver::new(
            Arc::new(fetcher.clone()),
            ResolverConfig::new()
                .with_temp_dir(dir.path())
                .with_fetch_timeout(Duration::from_secs(7)),
        );

        let batch = resolver
            .resolve_all(&refs(&["https://img.test/cat.gif"]))
            .await
            .unwrap();

        let path = batch.paths().remove(0);
        assert_eq!(std::fs::read(&path).unwrap(), b"GIF89a".to_vec());
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("gif"));
        assert_eq!(
            fetcher.requests(),
            vec![("https://img.test/cat.gif".to_string(), Duration::from_secs(7))]
        );
    }

    #[tokio::test]
    async fn existing_local_path_is_borrowed_without_new_files() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("photo.jpg");
        std::fs::write(&image, b"jpeg").unwrap();
        let resolver = resolver_in(dir.path(), FakeFetcher::new());

        let batch = resolver
            .resolve_all(&refs(&[image.to_str().unwrap()]))
            .await
            .unwrap();

        assert_eq!(batch.ephemeral_count(), 0);
        assert_eq!(batch.paths(), vec![image.clone()]);
        assert_eq!(files_in(dir.path()), vec![image.clone()]);

        batch.cleanup();
        assert!(image.exists());
    }

    #[tokio::test]
    async fn missing_local_path_fails_and_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.png");
        let resolver = resolver_in(dir.path(), FakeFetcher::new());

        let err = resolver
            .resolve_all(&refs(&[missing.to_str().unwrap()]))
            .await
            .unwrap_err();

        assert!(matches!(err.cause, ResolutionCause::NotFound));
        assert!(files_in(dir.path()).is_empty());
    }

    #[tokio::test]
    async fn data_uri_without_separator_fails() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = resolver_in(dir.path(), FakeFetcher::new());

        let err = resolver
            .resolve_all(&refs(&["data:image/png;base64"]))
            .await
            .unwrap_err();

        assert!(matches!(err.cause, ResolutionCause::Decode(_)));
        assert!(files_in(dir.path()).is_empty());
    }

    #[tokio::test]
    async fn failure_at_k_rolls_back_earlier_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = FakeFetcher::new()
            .with_body("https://img.test/ok.png", b"png")
            .with_error(
                "https://img.test/down.png",
                FetchError::Transport("connection refused".to_string()),
            );
        let resolver = resolver_in(dir.path(), fetcher);

        let invalid_tails = ["data:image/png;base64,@@@", "https://img.test/down.png", "/no/such/file.png"];
        for invalid in invalid_tails {
            let err = resolver
                .resolve_all(&refs(&[
                    "data:image/jpeg;base64,AAAA",
                    "https://img.test/ok.png",
                    invalid,
                ]))
                .await
                .unwrap_err();

            assert!(!err.reference.is_empty());
            assert!(
                files_in(dir.path()).is_empty(),
                "temp files leaked after failing on {invalid}"
            );
        }
    }

    #[tokio::test]
    async fn fetch_failure_carries_reference_and_cause() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = FakeFetcher::new()
            .with_error("https://img.test/404.png", FetchError::Status { status: 404 });
        let resolver = resolver_in(dir.path(), fetcher);

        let err = resolver
            .resolve_all(&refs(&["https://img.test/404.png"]))
            .await
            .unwrap_err();

        assert_eq!(err.reference, "https://img.test/404.png");
        assert!(matches!(
            err.cause,
            ResolutionCause::Fetch(FetchError::Status { status: 404 })
        ));
    }

    #[tokio::test]
    async fn output_order_matches_input_order() {
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("local.png");
        std::fs::write(&local, b"x").unwrap();
        let fetcher = FakeFetcher::new().with_body("https://img.test/r.jpg", b"r");
        let resolver = resolver_in(dir.path(), fetcher);

        let batch = resolver
            .resolve_all(&refs(&[
                "https://img.test/r.jpg",
                local.to_str().unwrap(),
                "data:image/webp;base64,AAAA",
            ]))
            .await
            .unwrap();

        let flags: Vec<bool> = batch.iter().map(ResolvedFile::is_ephemeral).collect();
        assert_eq!(flags, vec![true, false, true]);
        assert_eq!(batch.paths()[1], local);
        assert_eq!(
            batch.paths()[2].extension().and_then(|e| e.to_str()),
            Some("webp")
        );
    }

    #[tokio::test]
    async fn unwritable_temp_dir_is_an_io_failure() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = resolver_in(&dir.path().join("does-not-exist"), FakeFetcher::new());

        let err = resolver
            .resolve_all(&refs(&["data:image/png;base64,AAAA"]))
            .await
            .unwrap_err();

        assert!(matches!(err.cause, ResolutionCause::Io(_)));
    }
}
