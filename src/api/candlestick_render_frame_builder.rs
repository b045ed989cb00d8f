use crate::core::project_visible_candles;
use crate::error::ChartResult;
use crate::render::{DrawingSurface, LinePrimitive, RectPrimitive};

use super::{FrameContext, RenderPipeline};

impl RenderPipeline {
    /// Bodies, wicks and volume bars for every visible record.
    pub(super) fn append_candlestick_primitives(&mut self, ctx: &FrameContext<'_>) -> ChartResult<usize> {
        let style = ctx.style;
        let candles = project_visible_candles(ctx.series, ctx.viewport);
        for candle in &candles {
            self.offscreen.fill_rect(&RectPrimitive::new(
                candle.x,
                candle.body_top,
                candle.width,
                candle.body_height(),
                style.body_color(candle.is_bullish),
            ))?;
            self.offscreen.stroke_line(&LinePrimitive::new(
                candle.wick_x,
                candle.wick_top,
                candle.wick_x,
                candle.wick_bottom,
                style.wick_width_px,
                style.wick_color,
            ))?;
            self.offscreen.fill_rect(&RectPrimitive::new(
                candle.x,
                candle.volume_top,
                candle.width,
                candle.volume_height(),
                style.volume_color,
            ))?;
        }
        Ok(candles.len())
    }
}
