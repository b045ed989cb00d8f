use crate::error::ChartResult;
use crate::render::{DrawingSurface, TextBaseline, TextHAlign, TextPrimitive};

use super::axis_label_format::{format_axis_time, format_price};
use super::{FrameContext, RenderPipeline};

impl RenderPipeline {
    /// Time labels above the volume band and price labels along the right edge.
    pub(super) fn append_axis_primitives(&mut self, ctx: &FrameContext<'_>) -> ChartResult<()> {
        let Some(extent) = ctx.series.extent() else {
            return Ok(());
        };
        let style = ctx.style;
        let viewport = ctx.viewport;
        let size = viewport.size();
        let record_width = viewport.record_width_px();
        let (view_start, view_end) = viewport.visible_index_span();
        let label_y = size.height_px() - viewport.volume_height_px();

        let time_marks = ctx.time_mark_intervals;
        for mark in 0..=time_marks {
            let fraction = mark as f64 / time_marks as f64;
            let index = (view_start + fraction * (view_end - view_start)).floor() as i64;
            let Some(record) = ctx.series.get_signed(index) else {
                continue;
            };
            let x = (index as f64 - view_start) * record_width;
            self.offscreen.fill_text(&TextPrimitive::new(
                format_axis_time(record.time),
                x + record_width / 2.0,
                label_y,
                style.axis_font.clone(),
                style.axis_text_color,
                TextHAlign::Left,
                TextBaseline::Alphabetic,
            ))?;
        }

        let projection = viewport.price_projection(extent);
        let price_marks = ctx.price_mark_intervals;
        let label_x = size.width_px() - style.price_label_inset_px;
        for mark in 0..=price_marks {
            let fraction = mark as f64 / price_marks as f64;
            let price = projection.min_price() + fraction * projection.price_range();
            self.offscreen.fill_text(&TextPrimitive::new(
                format_price(price),
                label_x,
                projection.price_to_y(price),
                style.axis_font.clone(),
                style.axis_text_color,
                TextHAlign::Left,
                TextBaseline::Alphabetic,
            ))?;
        }
        Ok(())
    }
}
