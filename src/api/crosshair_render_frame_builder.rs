use crate::error::ChartResult;
use crate::render::{DrawingSurface, LinePrimitive, TextBaseline, TextHAlign, TextPrimitive};

use super::axis_label_format::{format_crosshair_time, format_price};
use super::{FrameContext, RenderPipeline};

impl RenderPipeline {
    /// Dashed full-surface guide lines plus the price/time readout.
    ///
    /// The readout text is only drawn while a record is under the pointer.
    pub(super) fn append_crosshair_primitives(&mut self, ctx: &FrameContext<'_>) -> ChartResult<()> {
        let Some(readout) = ctx.readout else {
            return Ok(());
        };
        let style = ctx.style;
        let size = ctx.viewport.size();
        let point = readout.point;

        let vertical = LinePrimitive::new(
            point.x,
            0.0,
            point.x,
            size.height_px(),
            style.crosshair_line_width_px,
            style.crosshair_line_color,
        )
        .with_dash(&style.crosshair_dash);
        let horizontal = LinePrimitive::new(
            0.0,
            point.y,
            size.width_px(),
            point.y,
            style.crosshair_line_width_px,
            style.crosshair_line_color,
        )
        .with_dash(&style.crosshair_dash);
        self.offscreen.stroke_line(&vertical)?;
        self.offscreen.stroke_line(&horizontal)?;

        let Some(price) = readout.price else {
            return Ok(());
        };
        let text_x = point.x + style.readout_offset_x_px;
        self.offscreen.fill_text(&TextPrimitive::new(
            format!("Price: {}", format_price(price)),
            text_x,
            point.y - style.readout_offset_y_px,
            style.readout_font.clone(),
            style.readout_text_color,
            TextHAlign::Left,
            TextBaseline::Top,
        ))?;
        self.offscreen.fill_text(&TextPrimitive::new(
            format!("Time: {}", format_crosshair_time(readout.time)),
            text_x,
            point.y + style.readout_offset_y_px,
            style.readout_font.clone(),
            style.readout_text_color,
            TextHAlign::Left,
            TextBaseline::Top,
        ))?;
        Ok(())
    }
}
