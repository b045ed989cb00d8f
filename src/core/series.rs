use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Bar, Chunk, PriceRecord};
use crate::error::{ChartResult, DataError};

/// Global price/volume bounds of a whole series.
///
/// The chart scales against the entire sequence, not the visible window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesExtent {
    pub min_price: f64,
    pub max_price: f64,
    pub max_volume: f64,
}

/// Immutable, ordered record sequence produced once at chart construction.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PriceSeries {
    records: Vec<PriceRecord>,
    extent: Option<SeriesExtent>,
}

impl PriceSeries {
    /// Flattens chunks into one sequence, keeping input order.
    ///
    /// No sorting, deduplication or cross-chunk monotonicity checks are made.
    /// Non-finite values, negative volumes, negative relative times, time
    /// overflow and a price span too wide for `f64` fail the whole ingestion.
    pub fn from_chunks(chunks: &[Chunk]) -> ChartResult<Self> {
        let capacity = chunks.iter().map(|chunk| chunk.bars.len()).sum();
        let mut records = Vec::with_capacity(capacity);

        for (chunk_index, chunk) in chunks.iter().enumerate() {
            for (bar_index, bar) in chunk.bars.iter().enumerate() {
                records.push(ingest_bar(chunk.start_time, bar, chunk_index, bar_index)?);
            }
        }

        debug!(
            chunk_count = chunks.len(),
            record_count = records.len(),
            "ingested chunks"
        );
        Self::from_validated_records(records)
    }

    /// Builds a series from already-absolute records.
    ///
    /// Values are validated the same way as chunk bars; the reported chunk
    /// index is always `0`.
    pub fn from_records(records: Vec<PriceRecord>) -> ChartResult<Self> {
        for (index, record) in records.iter().enumerate() {
            validate_values(
                [
                    ("open", record.open),
                    ("high", record.high),
                    ("low", record.low),
                    ("close", record.close),
                    ("volume", record.volume),
                ],
                0,
                index,
            )?;
            if record.volume < 0.0 {
                return Err(DataError::NegativeVolume {
                    chunk: 0,
                    bar: index,
                }
                .into());
            }
        }
        Self::from_validated_records(records)
    }

    fn from_validated_records(records: Vec<PriceRecord>) -> ChartResult<Self> {
        let extent = compute_extent(&records);
        if let Some(extent) = extent {
            if !(extent.max_price - extent.min_price).is_finite() {
                return Err(DataError::PriceSpanOverflow.into());
            }
        }
        Ok(Self { records, extent })
    }

    #[must_use]
    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&PriceRecord> {
        self.records.get(index)
    }

    /// Looks up a record by a signed index as produced by the inverse
    /// x-transform.
    #[must_use]
    pub fn get_signed(&self, index: i64) -> Option<&PriceRecord> {
        usize::try_from(index).ok().and_then(|i| self.records.get(i))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns `None` for an empty series.
    #[must_use]
    pub fn extent(&self) -> Option<SeriesExtent> {
        self.extent
    }
}

fn ingest_bar(
    start_time: i64,
    bar: &Bar,
    chunk: usize,
    bar_index: usize,
) -> Result<PriceRecord, DataError> {
    if bar.relative_time < 0 {
        return Err(DataError::NegativeRelativeTime {
            chunk,
            bar: bar_index,
        });
    }
    validate_values(
        [
            ("open", bar.open),
            ("high", bar.high),
            ("low", bar.low),
            ("close", bar.close),
            ("volume", bar.volume),
        ],
        chunk,
        bar_index,
    )?;
    if bar.volume < 0.0 {
        return Err(DataError::NegativeVolume {
            chunk,
            bar: bar_index,
        });
    }
    let time = start_time
        .checked_add(bar.relative_time)
        .ok_or(DataError::TimeOverflow {
            chunk,
            bar: bar_index,
        })?;

    Ok(PriceRecord::new(
        time, bar.open, bar.high, bar.low, bar.close, bar.volume,
    ))
}

fn validate_values(
    values: [(&'static str, f64); 5],
    chunk: usize,
    bar: usize,
) -> Result<(), DataError> {
    for (field, value) in values {
        if !value.is_finite() {
            return Err(DataError::NonFinite { chunk, bar, field });
        }
    }
    Ok(())
}

fn compute_extent(records: &[PriceRecord]) -> Option<SeriesExtent> {
    if records.is_empty() {
        return None;
    }
    let mut extent = SeriesExtent {
        min_price: f64::INFINITY,
        max_price: f64::NEG_INFINITY,
        max_volume: 0.0,
    };
    for record in records {
        extent.min_price = extent.min_price.min(record.low);
        extent.max_price = extent.max_price.max(record.high);
        extent.max_volume = extent.max_volume.max(record.volume);
    }
    Some(extent)
}

#[cfg(test)]
mod tests {
    use super::PriceSeries;
    use crate::core::{Bar, Chunk};
    use crate::error::{ChartError, DataError};

    #[test]
    fn extent_spans_every_chunk() {
        let series = PriceSeries::from_chunks(&[
            Chunk::new(0, vec![Bar::new(0, 10.0, 12.0, 9.0, 11.0, 5.0)]),
            Chunk::new(60, vec![Bar::new(0, 11.0, 15.0, 7.5, 14.0, 40.0)]),
        ])
        .expect("ingest");

        let extent = series.extent().expect("non-empty extent");
        assert_eq!(extent.min_price, 7.5);
        assert_eq!(extent.max_price, 15.0);
        assert_eq!(extent.max_volume, 40.0);
    }

    #[test]
    fn nan_close_reports_chunk_and_bar() {
        let err = PriceSeries::from_chunks(&[
            Chunk::new(0, vec![Bar::new(0, 1.0, 2.0, 0.5, 1.5, 1.0)]),
            Chunk::new(
                10,
                vec![
                    Bar::new(0, 1.0, 2.0, 0.5, 1.5, 1.0),
                    Bar::new(1, 1.0, 2.0, 0.5, f64::NAN, 1.0),
                ],
            ),
        ])
        .expect_err("nan close must fail");

        assert!(matches!(
            err,
            ChartError::Data(DataError::NonFinite {
                chunk: 1,
                bar: 1,
                field: "close"
            })
        ));
    }

    #[test]
    fn overflowing_price_span_is_rejected() {
        let err = PriceSeries::from_chunks(&[Chunk::new(
            0,
            vec![Bar::new(0, 0.0, 1e308, -1e308, 0.0, 1.0)],
        )])
        .expect_err("span overflow must fail");
        assert!(matches!(err, ChartError::Data(DataError::PriceSpanOverflow)));

        // Large but representable spans are kept.
        let series = PriceSeries::from_chunks(&[Chunk::new(
            0,
            vec![Bar::new(0, 0.0, 8e307, -8e307, 0.0, 1.0)],
        )])
        .expect("wide span");
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn start_time_overflow_is_rejected() {
        let err = PriceSeries::from_chunks(&[Chunk::new(
            i64::MAX,
            vec![Bar::new(1, 1.0, 1.0, 1.0, 1.0, 0.0)],
        )])
        .expect_err("overflow must fail");
        assert!(matches!(
            err,
            ChartError::Data(DataError::TimeOverflow { chunk: 0, bar: 0 })
        ));
    }
}
