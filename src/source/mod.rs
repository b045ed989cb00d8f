use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::Chunk;
use crate::error::{DataError, SourceError};

/// External collaborator that yields raw chunks.
///
/// Implementations only fetch and parse; validation happens when the chunks
/// are ingested into a `PriceSeries`.
pub trait ChunkSource {
    fn fetch_chunks(&self) -> Result<Vec<Chunk>, SourceError>;
}

/// Parses a JSON array of chunks using the wire names `ChunkStart`, `Bars`,
/// `Time`, `Open`, `High`, `Low`, `Close` and `TickVolume`.
pub fn parse_chunks_json(input: &str) -> Result<Vec<Chunk>, DataError> {
    serde_json::from_str(input).map_err(|e| DataError::Json(e.to_string()))
}

/// In-memory source; hands out clones of its chunks.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StaticChunks {
    chunks: Vec<Chunk>,
}

impl StaticChunks {
    #[must_use]
    pub fn new(chunks: Vec<Chunk>) -> Self {
        Self { chunks }
    }
}

impl ChunkSource for StaticChunks {
    fn fetch_chunks(&self) -> Result<Vec<Chunk>, SourceError> {
        Ok(self.chunks.clone())
    }
}

/// Reads a chunk JSON document from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ChunkSource for JsonFileSource {
    fn fetch_chunks(&self) -> Result<Vec<Chunk>, SourceError> {
        let raw = fs::read_to_string(&self.path).map_err(|e| SourceError::Io {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;
        let chunks = parse_chunks_json(&raw)?;
        debug!(
            path = %self.path.display(),
            chunk_count = chunks.len(),
            "loaded chunk file"
        );
        Ok(chunks)
    }
}

#[cfg(feature = "http-source")]
mod http;
#[cfg(feature = "http-source")]
pub use http::HttpJsonSource;
