use serde::{Deserialize, Serialize};

use crate::core::{PriceRecord, PriceSeries, ScreenPoint, Viewport};

use super::Clock;

/// Values shown next to the crosshair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrosshairReadout {
    pub point: ScreenPoint,
    /// Record index under the pointer; may be outside the series.
    pub index: i64,
    pub record: Option<PriceRecord>,
    /// Price at the pointer's y. `None` when no record is under the pointer.
    pub price: Option<f64>,
    /// Record time, or the clock's current time when no record is hovered.
    pub time: i64,
    pub time_is_fallback: bool,
}

impl CrosshairReadout {
    #[must_use]
    pub fn is_over_record(&self) -> bool {
        self.record.is_some()
    }
}

/// Resolves the readout for the viewport's current crosshair, if any.
#[must_use]
pub fn resolve_crosshair_readout(
    series: &PriceSeries,
    viewport: &Viewport,
    clock: &dyn Clock,
) -> Option<CrosshairReadout> {
    let point = viewport.crosshair()?;
    let index = viewport.index_at(point.x);
    let hovered = series
        .get_signed(index)
        .copied()
        .zip(series.extent())
        .map(|(record, extent)| {
            let price = viewport.price_projection(extent).y_to_price(point.y);
            (record, price)
        });

    Some(match hovered {
        Some((record, price)) => CrosshairReadout {
            point,
            index,
            record: Some(record),
            price: Some(price),
            time: record.time,
            time_is_fallback: false,
        },
        None => CrosshairReadout {
            point,
            index,
            record: None,
            price: None,
            time: clock.now_unix_seconds(),
            time_is_fallback: true,
        },
    })
}
