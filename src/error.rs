use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid surface size: width={width}, height={height}")]
    InvalidSurface { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid input event: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("drawing backend failure: {0}")]
    Backend(String),
}

/// Ingestion failures. Indices are zero-based positions in the chunk list and
/// in the chunk's bar list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    #[error("chunk {chunk} bar {bar}: `{field}` must be finite")]
    NonFinite {
        chunk: usize,
        bar: usize,
        field: &'static str,
    },

    #[error("chunk {chunk} bar {bar}: volume must be >= 0")]
    NegativeVolume { chunk: usize, bar: usize },

    #[error("chunk {chunk} bar {bar}: relative time must be >= 0")]
    NegativeRelativeTime { chunk: usize, bar: usize },

    #[error("chunk {chunk} bar {bar}: absolute time overflows i64")]
    TimeOverflow { chunk: usize, bar: usize },

    #[error("price span between the lowest low and the highest high overflows f64")]
    PriceSpanOverflow,

    #[error("malformed chunk json: {0}")]
    Json(String),
}

/// Failures of the external fetch-and-parse collaborator.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read `{path}`: {message}")]
    Io { path: String, message: String },

    #[error("http request failed: {0}")]
    Http(String),

    #[error("failed to parse chunk payload: {0}")]
    Parse(#[from] DataError),
}
