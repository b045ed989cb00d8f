use std::time::Duration;

use tracing::debug;

use crate::core::Chunk;
use crate::error::SourceError;

use super::{ChunkSource, parse_chunks_json};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(12);

/// Blocking HTTP GET of a chunk JSON document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpJsonSource {
    url: String,
    timeout: Duration,
}

impl HttpJsonSource {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ChunkSource for HttpJsonSource {
    fn fetch_chunks(&self) -> Result<Vec<Chunk>, SourceError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| SourceError::Http(format!("client error: {e}")))?;
        let body = client
            .get(&self.url)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(|e| SourceError::Http(format!("request to `{}` failed: {e}", self.url)))?;
        let chunks = parse_chunks_json(&body)?;
        debug!(url = %self.url, chunk_count = chunks.len(), "fetched chunks");
        Ok(chunks)
    }
}
