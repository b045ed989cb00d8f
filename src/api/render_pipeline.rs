use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{PriceSeries, SurfaceSize, Viewport};
use crate::error::ChartResult;
use crate::render::{DrawingSurface, FrameBuffer, RenderFrame, TextBaseline, TextHAlign, TextPrimitive};

use super::{CrosshairReadout, RenderStyle};

/// What the last rendered frame contained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderState {
    /// Series empty; only the placeholder was drawn.
    Empty,
    Ready,
}

/// Inputs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    pub series: &'a PriceSeries,
    pub viewport: &'a Viewport,
    pub style: &'a RenderStyle,
    pub readout: Option<CrosshairReadout>,
    pub time_mark_intervals: usize,
    pub price_mark_intervals: usize,
}

/// Double-buffered frame producer.
///
/// Every frame is composed on an offscreen buffer sized like the visible
/// surface and copied over in one pass, so the visible surface never shows a
/// partially drawn frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPipeline {
    pub(super) offscreen: FrameBuffer,
    frames_rendered: u64,
}

impl RenderPipeline {
    pub fn new(size: SurfaceSize) -> ChartResult<Self> {
        Ok(Self {
            offscreen: FrameBuffer::new(size)?,
            frames_rendered: 0,
        })
    }

    #[must_use]
    pub fn size(&self) -> SurfaceSize {
        self.offscreen.size()
    }

    /// Last composed frame.
    #[must_use]
    pub fn offscreen_frame(&self) -> &RenderFrame {
        self.offscreen.frame()
    }

    #[must_use]
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn resize(&mut self, size: SurfaceSize) -> ChartResult<()> {
        self.offscreen.resize(size)
    }

    /// Composes a full frame offscreen then blits it onto `target`.
    ///
    /// Draw order: candles and volume, axis markings, crosshair.
    pub fn render(
        &mut self,
        ctx: &FrameContext<'_>,
        target: &mut dyn DrawingSurface,
    ) -> ChartResult<RenderState> {
        self.offscreen.clear()?;
        let state = if ctx.series.is_empty() {
            self.append_placeholder_primitives(ctx)?;
            RenderState::Empty
        } else {
            let candle_count = self.append_candlestick_primitives(ctx)?;
            self.append_axis_primitives(ctx)?;
            self.append_crosshair_primitives(ctx)?;
            trace!(candle_count, "composed offscreen frame");
            RenderState::Ready
        };
        self.offscreen.blit_onto(target)?;
        self.frames_rendered += 1;
        debug!(
            frame = self.frames_rendered,
            state = ?state,
            command_count = self.offscreen.frame().commands.len(),
            "rendered frame"
        );
        Ok(state)
    }

    fn append_placeholder_primitives(&mut self, ctx: &FrameContext<'_>) -> ChartResult<()> {
        let size = self.offscreen.size();
        let style = ctx.style;
        self.offscreen.fill_text(&TextPrimitive::new(
            style.placeholder_text.clone(),
            size.width_px() / 2.0,
            size.height_px() / 2.0,
            style.placeholder_font.clone(),
            style.placeholder_color,
            TextHAlign::Center,
            TextBaseline::Middle,
        ))
    }
}
