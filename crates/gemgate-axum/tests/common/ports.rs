//! Fake port implementations for gemgate-axum tests.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use gemgate_core::{
    FetchError, GeneratedContent, GenerationError, GenerationPort, RemoteFetchPort,
};

/// One recorded `generate` call.
#[derive(Debug, Clone)]
pub struct Call {
    pub prompt: String,
    pub model: String,
    pub files: Option<Vec<PathBuf>>,
    /// Whether each file was readable during the call.
    pub readable: Vec<bool>,
}

#[derive(Debug, Clone, Copy)]
pub enum Behavior {
    Reply(&'static str),
    Unavailable,
    Upstream,
}

/// Generation port that records calls and answers per [`Behavior`].
#[derive(Debug)]
pub struct RecordingGeneration {
    behavior: Behavior,
    calls: Mutex<Vec<Call>>,
}

impl RecordingGeneration {
    pub fn new(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationPort for RecordingGeneration {
    async fn generate(
        &self,
        prompt: &str,
        model: &str,
        files: Option<&[PathBuf]>,
    ) -> Result<GeneratedContent, GenerationError> {
        let readable = files
            .unwrap_or_default()
            .iter()
            .map(|p| std::fs::read(p).is_ok())
            .collect();
        self.calls.lock().unwrap().push(Call {
            prompt: prompt.to_string(),
            model: model.to_string(),
            files: files.map(<[PathBuf]>::to_vec),
            readable,
        });

        match self.behavior {
            Behavior::Reply(text) => Ok(GeneratedContent::new(text)),
            Behavior::Unavailable => Err(GenerationError::Unavailable(
                "GEMINI_API_KEY is not configured".to_string(),
            )),
            Behavior::Upstream => Err(GenerationError::Upstream(
                "Gemini API request failed with status 500: internal".to_string(),
            )),
        }
    }
}

/// Fetch port serving canned bodies; unknown URLs fail as unreachable.
#[derive(Debug, Default)]
pub struct CannedFetcher {
    bodies: HashMap<String, Vec<u8>>,
}

impl CannedFetcher {
    pub fn with_body(mut self, url: &str, body: &[u8]) -> Self {
        self.bodies.insert(url.to_string(), body.to_vec());
        self
    }
}

#[async_trait]
impl RemoteFetchPort for CannedFetcher {
    async fn fetch(&self, url: &str, _timeout: Duration) -> Result<Vec<u8>, FetchError> {
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Transport(format!("error sending request for url ({url})")))
    }
}
