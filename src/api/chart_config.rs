use serde::{Deserialize, Serialize};

use crate::core::ViewportLimits;
use crate::error::{ChartError, ChartResult};

/// When an input-triggered redraw happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RedrawMode {
    /// Every event that changes state renders a full frame before returning.
    #[default]
    Immediate,
    /// Events only mark the chart dirty; the host calls
    /// `CandlestickChart::render_if_dirty` once per presentation tick.
    Coalesced,
}

/// Public chart bootstrap configuration.
///
/// This type is serializable so host applications can load chart setup from
/// JSON without inventing their own format. Every field has a default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_base_width_px")]
    pub base_width_px: f64,
    #[serde(default = "default_min_zoom")]
    pub min_zoom: f64,
    #[serde(default = "default_max_zoom")]
    pub max_zoom: f64,
    #[serde(default = "default_zoom_step")]
    pub zoom_step: f64,
    #[serde(default = "default_volume_height_ratio")]
    pub volume_height_ratio: f64,
    #[serde(default = "default_mark_intervals")]
    pub time_mark_intervals: usize,
    #[serde(default = "default_mark_intervals")]
    pub price_mark_intervals: usize,
    #[serde(default = "default_true")]
    pub couple_price_zoom: bool,
    #[serde(default = "default_true")]
    pub clear_crosshair_on_leave: bool,
    #[serde(default)]
    pub redraw_mode: RedrawMode,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            base_width_px: default_base_width_px(),
            min_zoom: default_min_zoom(),
            max_zoom: default_max_zoom(),
            zoom_step: default_zoom_step(),
            volume_height_ratio: default_volume_height_ratio(),
            time_mark_intervals: default_mark_intervals(),
            price_mark_intervals: default_mark_intervals(),
            couple_price_zoom: true,
            clear_crosshair_on_leave: true,
            redraw_mode: RedrawMode::Immediate,
        }
    }
}

impl ChartConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the unzoomed per-record width.
    #[must_use]
    pub fn with_base_width_px(mut self, base_width_px: f64) -> Self {
        self.base_width_px = base_width_px;
        self
    }

    /// Sets the zoom bounds.
    #[must_use]
    pub fn with_zoom_limits(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self
    }

    /// Sets the multiplicative zoom factor per wheel notch.
    #[must_use]
    pub fn with_zoom_step(mut self, zoom_step: f64) -> Self {
        self.zoom_step = zoom_step;
        self
    }

    /// Sets the share of surface height reserved for the volume histogram.
    #[must_use]
    pub fn with_volume_height_ratio(mut self, ratio: f64) -> Self {
        self.volume_height_ratio = ratio;
        self
    }

    /// Sets how many even intervals the time and price axes are split into.
    #[must_use]
    pub fn with_mark_intervals(mut self, time_intervals: usize, price_intervals: usize) -> Self {
        self.time_mark_intervals = time_intervals;
        self.price_mark_intervals = price_intervals;
        self
    }

    /// Controls whether price zoom follows every horizontal zoom.
    #[must_use]
    pub fn with_price_zoom_coupling(mut self, coupled: bool) -> Self {
        self.couple_price_zoom = coupled;
        self
    }

    /// Controls whether a pointer-leave event clears the crosshair.
    #[must_use]
    pub fn with_clear_crosshair_on_leave(mut self, enabled: bool) -> Self {
        self.clear_crosshair_on_leave = enabled;
        self
    }

    #[must_use]
    pub fn with_redraw_mode(mut self, mode: RedrawMode) -> Self {
        self.redraw_mode = mode;
        self
    }

    #[must_use]
    pub fn viewport_limits(&self) -> ViewportLimits {
        ViewportLimits {
            base_width_px: self.base_width_px,
            min_zoom: self.min_zoom,
            max_zoom: self.max_zoom,
            zoom_step: self.zoom_step,
            volume_height_ratio: self.volume_height_ratio,
        }
    }

    pub fn validate(self) -> ChartResult<Self> {
        self.viewport_limits().validate()?;
        if self.time_mark_intervals == 0 || self.price_mark_intervals == 0 {
            return Err(ChartError::InvalidData(
                "axis mark intervals must be > 0".to_owned(),
            ));
        }
        Ok(self)
    }

    /// Parses and validates a JSON config; missing fields take defaults.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart config: {e}")))?;
        config.validate()
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize chart config: {e}"))
        })
    }
}

fn default_base_width_px() -> f64 {
    10.0
}

fn default_min_zoom() -> f64 {
    0.9
}

fn default_max_zoom() -> f64 {
    5.0
}

fn default_zoom_step() -> f64 {
    1.2
}

fn default_volume_height_ratio() -> f64 {
    0.2
}

fn default_mark_intervals() -> usize {
    10
}

fn default_true() -> bool {
    true
}
