use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{PriceProjection, ScreenPoint, SeriesExtent, SurfaceSize};
use crate::error::{ChartError, ChartResult};

/// Relative tolerance for treating an x as lying on a record's left edge.
const EDGE_SNAP_EPSILON: f64 = 1e-9;

/// Constant geometry and zoom bounds of a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportLimits {
    /// Unzoomed per-record width in pixels.
    pub base_width_px: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Multiplicative factor applied per zoom step.
    pub zoom_step: f64,
    /// Share of the surface height reserved for the volume histogram.
    pub volume_height_ratio: f64,
}

impl Default for ViewportLimits {
    fn default() -> Self {
        Self {
            base_width_px: 10.0,
            min_zoom: 0.9,
            max_zoom: 5.0,
            zoom_step: 1.2,
            volume_height_ratio: 0.2,
        }
    }
}

impl ViewportLimits {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.base_width_px.is_finite() || self.base_width_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "base width must be finite and > 0".to_owned(),
            ));
        }
        if !self.min_zoom.is_finite()
            || !self.max_zoom.is_finite()
            || self.min_zoom <= 0.0
            || self.min_zoom > self.max_zoom
        {
            return Err(ChartError::InvalidData(
                "zoom limits must be finite with 0 < min <= max".to_owned(),
            ));
        }
        if !self.zoom_step.is_finite() || self.zoom_step <= 1.0 {
            return Err(ChartError::InvalidData(
                "zoom step must be finite and > 1".to_owned(),
            ));
        }
        if !self.volume_height_ratio.is_finite() || !(0.0..1.0).contains(&self.volume_height_ratio)
        {
            return Err(ChartError::InvalidData(
                "volume height ratio must be in [0, 1)".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Mutable transform state of one chart.
///
/// Invariants kept by every mutator:
/// - `min_zoom <= zoom <= max_zoom`
/// - `0 <= offset_px <= max_offset_px()`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    limits: ViewportLimits,
    size: SurfaceSize,
    record_count: usize,
    zoom: f64,
    price_zoom: f64,
    couple_price_zoom: bool,
    offset_px: f64,
    crosshair: Option<ScreenPoint>,
}

impl Viewport {
    /// Creates a viewport at zoom `1` (clamped into limits) and offset `0`.
    pub fn new(limits: ViewportLimits, size: SurfaceSize, record_count: usize) -> ChartResult<Self> {
        let limits = limits.validate()?;
        let size = size.validate()?;
        let zoom = 1.0_f64.clamp(limits.min_zoom, limits.max_zoom);
        Ok(Self {
            limits,
            size,
            record_count,
            zoom,
            price_zoom: zoom,
            couple_price_zoom: true,
            offset_px: 0.0,
            crosshair: None,
        })
    }

    #[must_use]
    pub fn with_price_zoom_coupling(mut self, coupled: bool) -> Self {
        self.couple_price_zoom = coupled;
        self
    }

    #[must_use]
    pub fn limits(&self) -> ViewportLimits {
        self.limits
    }

    #[must_use]
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    #[must_use]
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    #[must_use]
    pub fn price_zoom(&self) -> f64 {
        self.price_zoom
    }

    #[must_use]
    pub fn is_price_zoom_coupled(&self) -> bool {
        self.couple_price_zoom
    }

    pub fn set_price_zoom_coupling(&mut self, coupled: bool) {
        self.couple_price_zoom = coupled;
        if coupled {
            self.price_zoom = self.zoom;
        }
    }

    #[must_use]
    pub fn offset_px(&self) -> f64 {
        self.offset_px
    }

    #[must_use]
    pub fn crosshair(&self) -> Option<ScreenPoint> {
        self.crosshair
    }

    pub fn set_crosshair(&mut self, point: Option<ScreenPoint>) {
        self.crosshair = point;
    }

    /// Width of one record at the current zoom.
    #[must_use]
    pub fn record_width_px(&self) -> f64 {
        self.limits.base_width_px * self.zoom
    }

    #[must_use]
    pub fn content_width_px(&self) -> f64 {
        self.record_count as f64 * self.record_width_px()
    }

    /// Largest admissible offset; `0` when content is narrower than the surface.
    #[must_use]
    pub fn max_offset_px(&self) -> f64 {
        (self.content_width_px() - self.size.width_px()).max(0.0)
    }

    #[must_use]
    pub fn plot_height_px(&self) -> f64 {
        self.size.height_px() * (1.0 - self.limits.volume_height_ratio)
    }

    #[must_use]
    pub fn volume_height_px(&self) -> f64 {
        self.size.height_px() * self.limits.volume_height_ratio
    }

    #[must_use]
    pub fn screen_x(&self, index: usize) -> f64 {
        index as f64 * self.record_width_px() - self.offset_px
    }

    /// Inverse of [`Self::screen_x`]. May be negative or past the last record.
    ///
    /// A quotient within rounding error of a record's left edge snaps to that
    /// record, so `index_at(screen_x(i)) == i` holds at any zoom.
    #[must_use]
    pub fn index_at(&self, x: f64) -> i64 {
        let raw = (self.offset_px + x) / self.record_width_px();
        let nearest = raw.round();
        if (raw - nearest).abs() <= EDGE_SNAP_EPSILON * nearest.abs().max(1.0) {
            nearest as i64
        } else {
            raw.floor() as i64
        }
    }

    /// Indices whose `[x, x + width]` span intersects `[0, surface width]`.
    #[must_use]
    pub fn visible_indices(&self) -> Range<usize> {
        let width = self.record_width_px();
        let surface_width = self.size.width_px();
        let first = (self.offset_px / width).floor().max(0.0) as usize;
        let mut start = first.saturating_sub(1).min(self.record_count);
        while start < self.record_count && self.screen_x(start) + width < 0.0 {
            start += 1;
        }
        let mut end = start;
        while end < self.record_count && self.screen_x(end) <= surface_width {
            end += 1;
        }
        start..end
    }

    /// Fractional index span `[start, end)` covered by the surface.
    #[must_use]
    pub fn visible_index_span(&self) -> (f64, f64) {
        let width = self.record_width_px();
        let start = self.offset_px / width;
        (start, start + self.size.width_px() / width)
    }

    /// Price projection for this viewport and a series extent.
    #[must_use]
    pub fn price_projection(&self, extent: SeriesExtent) -> PriceProjection {
        PriceProjection::new(extent, self.price_zoom, self.plot_height_px())
    }

    /// Sets the offset, clamped into `[0, max_offset_px()]`.
    pub fn set_offset_px(&mut self, offset_px: f64) {
        self.offset_px = if offset_px.is_finite() {
            offset_px.clamp(0.0, self.max_offset_px())
        } else {
            0.0
        };
    }

    /// Applies the drag formula `start_offset - (current_x - start_x)`.
    pub fn pan_from(&mut self, start_offset_px: f64, start_x: f64, current_x: f64) {
        self.set_offset_px(start_offset_px - (current_x - start_x));
        trace!(offset_px = self.offset_px, "pan viewport");
    }

    /// Zooms to `target_zoom` (clamped) keeping the content under `anchor_x` fixed.
    ///
    /// Returns `true` when the zoom level changed.
    pub fn zoom_about(&mut self, anchor_x: f64, target_zoom: f64) -> bool {
        let old_zoom = self.zoom;
        let new_zoom = target_zoom.clamp(self.limits.min_zoom, self.limits.max_zoom);
        self.zoom = new_zoom;
        if self.couple_price_zoom {
            self.price_zoom = new_zoom;
        }
        let scale = new_zoom / old_zoom;
        // Content position under the anchor is `offset + anchor_x`; scale it
        // with the records and solve for the offset that keeps it at `anchor_x`.
        self.set_offset_px((self.offset_px + anchor_x) * scale - anchor_x);
        trace!(
            zoom = self.zoom,
            offset_px = self.offset_px,
            anchor_x,
            "zoom viewport"
        );
        new_zoom != old_zoom
    }

    pub fn zoom_in(&mut self, anchor_x: f64) -> bool {
        self.zoom_about(anchor_x, self.zoom * self.limits.zoom_step)
    }

    pub fn zoom_out(&mut self, anchor_x: f64) -> bool {
        self.zoom_about(anchor_x, self.zoom / self.limits.zoom_step)
    }

    /// Sets the vertical zoom independently of the horizontal one.
    ///
    /// The next horizontal zoom overwrites it while coupling is enabled.
    pub fn set_price_zoom(&mut self, price_zoom: f64) -> ChartResult<()> {
        if !price_zoom.is_finite() || price_zoom <= 0.0 {
            return Err(ChartError::InvalidData(
                "price zoom must be finite and > 0".to_owned(),
            ));
        }
        self.price_zoom = price_zoom.clamp(self.limits.min_zoom, self.limits.max_zoom);
        Ok(())
    }

    /// Adopts a new surface size and re-clamps the offset.
    pub fn resize(&mut self, size: SurfaceSize) -> ChartResult<()> {
        self.size = size.validate()?;
        self.set_offset_px(self.offset_px);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Viewport, ViewportLimits};
    use crate::core::SurfaceSize;

    #[test]
    fn visible_indices_skip_records_left_of_surface() {
        let mut viewport =
            Viewport::new(ViewportLimits::default(), SurfaceSize::new(100, 100), 50).expect("vp");
        viewport.set_offset_px(105.0);

        let visible = viewport.visible_indices();
        assert_eq!(visible.start, 10);
        // x(20) = 95 is the last left edge <= 100.
        assert_eq!(visible.end, 21);
    }

    #[test]
    fn record_touching_left_edge_stays_visible() {
        let mut viewport =
            Viewport::new(ViewportLimits::default(), SurfaceSize::new(100, 100), 50).expect("vp");
        viewport.set_offset_px(100.0);

        // x(9) + width == 0, which is not strictly left of the surface.
        assert_eq!(viewport.visible_indices().start, 9);
    }

    #[test]
    fn resize_reclamps_offset() {
        let mut viewport =
            Viewport::new(ViewportLimits::default(), SurfaceSize::new(100, 100), 20).expect("vp");
        viewport.set_offset_px(1_000.0);
        assert_eq!(viewport.offset_px(), 100.0);

        viewport.resize(SurfaceSize::new(150, 100)).expect("resize");
        assert_eq!(viewport.offset_px(), 50.0);
    }

    #[test]
    fn uncoupled_price_zoom_survives_horizontal_zoom() {
        let mut viewport =
            Viewport::new(ViewportLimits::default(), SurfaceSize::new(100, 100), 20)
                .expect("vp")
                .with_price_zoom_coupling(false);
        viewport.set_price_zoom(2.0).expect("price zoom");
        viewport.zoom_in(0.0);

        assert_eq!(viewport.price_zoom(), 2.0);
        assert!((viewport.zoom() - 1.2).abs() <= 1e-12);
    }
}
