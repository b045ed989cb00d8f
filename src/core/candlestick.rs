use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::{PriceProjection, PriceRecord, PriceSeries, Viewport};

/// Screen-space geometry of one record: candle body, wick and volume bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandleGeometry {
    pub index: usize,
    pub x: f64,
    pub width: f64,
    pub body_top: f64,
    pub body_bottom: f64,
    pub wick_x: f64,
    pub wick_top: f64,
    pub wick_bottom: f64,
    pub volume_top: f64,
    pub volume_bottom: f64,
    pub is_bullish: bool,
}

impl CandleGeometry {
    #[must_use]
    pub fn body_height(&self) -> f64 {
        self.body_bottom - self.body_top
    }

    #[must_use]
    pub fn volume_height(&self) -> f64 {
        self.volume_bottom - self.volume_top
    }
}

/// Projects every visible record of `series` under `viewport`.
///
/// Returns an empty list for an empty series. The function is pure so it can
/// back both rendering and regression tests.
#[must_use]
pub fn project_visible_candles(series: &PriceSeries, viewport: &Viewport) -> Vec<CandleGeometry> {
    let Some(extent) = series.extent() else {
        return Vec::new();
    };
    let projection = viewport.price_projection(extent);
    let volume_scale = VolumeScale {
        max_volume: extent.max_volume,
        surface_height: viewport.size().height_px(),
        band_height: viewport.volume_height_px(),
    };
    let visible = viewport.visible_indices();
    let records = &series.records()[visible.clone()];

    #[cfg(feature = "parallel-projection")]
    {
        records
            .par_iter()
            .zip(visible.into_par_iter())
            .map(|(record, index)| {
                project_record(record, index, viewport, projection, volume_scale)
            })
            .collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        records
            .iter()
            .zip(visible)
            .map(|(record, index)| project_record(record, index, viewport, projection, volume_scale))
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
struct VolumeScale {
    max_volume: f64,
    surface_height: f64,
    band_height: f64,
}

impl VolumeScale {
    fn volume_to_y(self, volume: f64) -> f64 {
        if self.max_volume <= 0.0 {
            return self.surface_height;
        }
        self.surface_height - (volume / self.max_volume) * self.band_height
    }
}

fn project_record(
    record: &PriceRecord,
    index: usize,
    viewport: &Viewport,
    projection: PriceProjection,
    volume_scale: VolumeScale,
) -> CandleGeometry {
    let width = viewport.record_width_px();
    let x = viewport.screen_x(index);
    let open_y = projection.price_to_y(record.open);
    let close_y = projection.price_to_y(record.close);

    CandleGeometry {
        index,
        x,
        width,
        body_top: open_y.min(close_y),
        body_bottom: open_y.max(close_y),
        wick_x: x + width / 2.0,
        wick_top: projection.price_to_y(record.high),
        wick_bottom: projection.price_to_y(record.low),
        volume_top: volume_scale.volume_to_y(record.volume),
        volume_bottom: volume_scale.surface_height,
        is_bullish: record.is_bullish(),
    }
}
