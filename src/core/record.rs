use serde::{Deserialize, Serialize};

/// One absolute-time OHLC + tick-volume observation.
///
/// OHLC ordering (`low <= open/close <= high`) is expected of the feed but not
/// enforced; malformed ordering produces inverted geometry, never a panic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// Seconds since the Unix epoch.
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PriceRecord {
    #[must_use]
    pub const fn new(time: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Returns `true` only when close is strictly above open.
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }
}

/// Bar as delivered inside a chunk, timed relative to the chunk start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    #[serde(rename = "Time", alias = "relativeTime")]
    pub relative_time: i64,
    #[serde(rename = "Open", alias = "open")]
    pub open: f64,
    #[serde(rename = "High", alias = "high")]
    pub high: f64,
    #[serde(rename = "Low", alias = "low")]
    pub low: f64,
    #[serde(rename = "Close", alias = "close")]
    pub close: f64,
    #[serde(rename = "TickVolume", alias = "volume")]
    pub volume: f64,
}

impl Bar {
    #[must_use]
    pub const fn new(
        relative_time: i64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            relative_time,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// Batch of bars sharing a base timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    #[serde(rename = "ChunkStart", alias = "startTime")]
    pub start_time: i64,
    #[serde(rename = "Bars", alias = "bars")]
    pub bars: Vec<Bar>,
}

impl Chunk {
    #[must_use]
    pub fn new(start_time: i64, bars: Vec<Bar>) -> Self {
        Self { start_time, bars }
    }
}
