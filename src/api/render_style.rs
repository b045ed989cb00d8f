use crate::error::{ChartError, ChartResult};
use crate::render::{Color, DashPattern, FontSpec};

/// Style contract for the current render frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    pub bullish_color: Color,
    pub bearish_color: Color,
    pub wick_color: Color,
    pub wick_width_px: f64,
    pub volume_color: Color,
    pub axis_text_color: Color,
    pub axis_font: FontSpec,
    /// Distance of price labels from the right surface edge.
    pub price_label_inset_px: f64,
    pub crosshair_line_color: Color,
    pub crosshair_line_width_px: f64,
    pub crosshair_dash: DashPattern,
    pub readout_text_color: Color,
    pub readout_font: FontSpec,
    pub readout_offset_x_px: f64,
    pub readout_offset_y_px: f64,
    pub placeholder_text: String,
    pub placeholder_color: Color,
    pub placeholder_font: FontSpec,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            bullish_color: Color::GREEN,
            bearish_color: Color::RED,
            wick_color: Color::BLACK,
            wick_width_px: 1.0,
            volume_color: Color::BLUE,
            axis_text_color: Color::BLACK,
            axis_font: FontSpec::new("Arial", 10.0),
            price_label_inset_px: 40.0,
            crosshair_line_color: Color::GRAY,
            crosshair_line_width_px: 1.0,
            crosshair_dash: DashPattern::from_slice(&[5.0, 5.0]),
            readout_text_color: Color::BLACK,
            readout_font: FontSpec::new("Arial", 12.0),
            readout_offset_x_px: 10.0,
            readout_offset_y_px: 10.0,
            placeholder_text: "No data".to_owned(),
            placeholder_color: Color::GRAY,
            placeholder_font: FontSpec::new("Arial", 14.0),
        }
    }
}

impl RenderStyle {
    /// Body color for a record's direction.
    #[must_use]
    pub fn body_color(&self, is_bullish: bool) -> Color {
        if is_bullish {
            self.bullish_color
        } else {
            self.bearish_color
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        for color in [
            self.bullish_color,
            self.bearish_color,
            self.wick_color,
            self.volume_color,
            self.axis_text_color,
            self.crosshair_line_color,
            self.readout_text_color,
            self.placeholder_color,
        ] {
            color.validate()?;
        }
        for (name, value) in [
            ("wick width", self.wick_width_px),
            ("crosshair line width", self.crosshair_line_width_px),
            ("axis font size", self.axis_font.size_px),
            ("readout font size", self.readout_font.size_px),
            ("placeholder font size", self.placeholder_font.size_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        for (name, value) in [
            ("price label inset", self.price_label_inset_px),
            ("readout offset x", self.readout_offset_x_px),
            ("readout offset y", self.readout_offset_y_px),
        ] {
            if !value.is_finite() {
                return Err(ChartError::InvalidData(format!("{name} must be finite")));
            }
        }
        if self
            .crosshair_dash
            .iter()
            .any(|segment| !segment.is_finite() || *segment < 0.0)
        {
            return Err(ChartError::InvalidData(
                "crosshair dash segments must be finite and >= 0".to_owned(),
            ));
        }
        if self.placeholder_text.is_empty() {
            return Err(ChartError::InvalidData(
                "placeholder text must not be empty".to_owned(),
            ));
        }
        Ok(())
    }
}
