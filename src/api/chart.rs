use tracing::{debug, info};

use crate::core::{Chunk, PriceSeries, SurfaceSize, Viewport};
use crate::error::ChartResult;
use crate::interaction::{InputController, InputOutcome, InteractionMode, PointerEvent};
use crate::render::{DrawingSurface, RenderFrame};
use crate::source::ChunkSource;

use super::{
    ChartConfig, Clock, CrosshairReadout, FrameContext, RedrawMode, RenderPipeline, RenderState,
    RenderStyle, SystemClock, resolve_crosshair_readout,
};

/// Interactive candlestick chart bound to one visible drawing surface.
///
/// The chart starts dirty and draws nothing until the first `render` or
/// `render_if_dirty` call. After that, every state change redraws according to
/// [`RedrawMode`].
pub struct CandlestickChart<S: DrawingSurface> {
    surface: S,
    series: PriceSeries,
    viewport: Viewport,
    controller: InputController,
    pipeline: RenderPipeline,
    style: RenderStyle,
    config: ChartConfig,
    clock: Box<dyn Clock>,
    dirty: bool,
    last_state: Option<RenderState>,
}

impl<S: DrawingSurface> std::fmt::Debug for CandlestickChart<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandlestickChart")
            .field("series", &self.series)
            .field("viewport", &self.viewport)
            .field("config", &self.config)
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}

impl<S: DrawingSurface> CandlestickChart<S> {
    /// Ingests `chunks` and binds the chart to `surface`, whose size becomes
    /// the chart size.
    pub fn new(surface: S, chunks: &[Chunk], config: ChartConfig) -> ChartResult<Self> {
        let series = PriceSeries::from_chunks(chunks)?;
        Self::from_series(surface, series, config)
    }

    /// Fetches chunks from `source` then ingests them like [`Self::new`].
    pub fn from_source(
        surface: S,
        source: &dyn ChunkSource,
        config: ChartConfig,
    ) -> ChartResult<Self> {
        let chunks = source.fetch_chunks()?;
        Self::new(surface, &chunks, config)
    }

    pub fn from_series(surface: S, series: PriceSeries, config: ChartConfig) -> ChartResult<Self> {
        let config = config.validate()?;
        let size = surface.size().validate()?;
        let viewport = Viewport::new(config.viewport_limits(), size, series.len())?
            .with_price_zoom_coupling(config.couple_price_zoom);
        let pipeline = RenderPipeline::new(size)?;
        info!(
            record_count = series.len(),
            width = size.width,
            height = size.height,
            "chart created"
        );
        Ok(Self {
            surface,
            series,
            viewport,
            controller: InputController::new(config.clear_crosshair_on_leave),
            pipeline,
            style: RenderStyle::default(),
            config,
            clock: Box::new(SystemClock),
            dirty: true,
            last_state: None,
        })
    }

    /// Replaces the clock used for the crosshair time fallback.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_style(mut self, style: RenderStyle) -> ChartResult<Self> {
        style.validate()?;
        self.style = style;
        Ok(self)
    }

    #[must_use]
    pub fn series(&self) -> &PriceSeries {
        &self.series
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[must_use]
    pub fn config(&self) -> ChartConfig {
        self.config
    }

    #[must_use]
    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn into_surface(self) -> S {
        self.surface
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.controller.mode()
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// State of the last rendered frame, `None` before the first render.
    #[must_use]
    pub fn last_render_state(&self) -> Option<RenderState> {
        self.last_state
    }

    /// Frame composed by the last render, as it was copied to the surface.
    #[must_use]
    pub fn offscreen_frame(&self) -> &RenderFrame {
        self.pipeline.offscreen_frame()
    }

    #[must_use]
    pub fn frames_rendered(&self) -> u64 {
        self.pipeline.frames_rendered()
    }

    #[must_use]
    pub fn crosshair_readout(&self) -> Option<CrosshairReadout> {
        resolve_crosshair_readout(&self.series, &self.viewport, self.clock.as_ref())
    }

    /// Routes one host event through the input controller.
    ///
    /// Rejected events leave all state untouched.
    pub fn handle_event(&mut self, event: PointerEvent) -> ChartResult<InputOutcome> {
        let outcome = self.controller.handle(event, &mut self.viewport)?;
        if outcome.redraw {
            self.request_redraw()?;
        }
        Ok(outcome)
    }

    /// Releases an active drag, e.g. when the host lost pointer capture.
    pub fn cancel_gesture(&mut self) -> bool {
        self.controller.cancel_gesture()
    }

    pub fn set_style(&mut self, style: RenderStyle) -> ChartResult<()> {
        style.validate()?;
        self.style = style;
        self.request_redraw()
    }

    pub fn set_price_zoom(&mut self, price_zoom: f64) -> ChartResult<()> {
        self.viewport.set_price_zoom(price_zoom)?;
        self.request_redraw()
    }

    pub fn set_price_zoom_coupling(&mut self, coupled: bool) {
        self.viewport.set_price_zoom_coupling(coupled);
        self.config.couple_price_zoom = coupled;
    }

    pub fn set_clear_crosshair_on_leave(&mut self, enabled: bool) {
        self.controller.set_clear_crosshair_on_leave(enabled);
        self.config.clear_crosshair_on_leave = enabled;
    }

    pub fn set_redraw_mode(&mut self, mode: RedrawMode) {
        self.config.redraw_mode = mode;
    }

    /// Resizes the visible surface, the offscreen buffer and the viewport.
    pub fn resize(&mut self, size: SurfaceSize) -> ChartResult<()> {
        let size = size.validate()?;
        self.surface.resize(size)?;
        self.pipeline.resize(size)?;
        self.viewport.resize(size)?;
        debug!(width = size.width, height = size.height, "chart resized");
        self.request_redraw()
    }

    /// Draws a full frame regardless of the dirty flag.
    pub fn render(&mut self) -> ChartResult<RenderState> {
        let readout = self.crosshair_readout();
        let ctx = FrameContext {
            series: &self.series,
            viewport: &self.viewport,
            style: &self.style,
            readout,
            time_mark_intervals: self.config.time_mark_intervals,
            price_mark_intervals: self.config.price_mark_intervals,
        };
        let state = self.pipeline.render(&ctx, &mut self.surface)?;
        self.dirty = false;
        self.last_state = Some(state);
        Ok(state)
    }

    /// Draws only when something changed since the last frame.
    pub fn render_if_dirty(&mut self) -> ChartResult<Option<RenderState>> {
        if !self.dirty {
            return Ok(None);
        }
        self.render().map(Some)
    }

    fn request_redraw(&mut self) -> ChartResult<()> {
        self.dirty = true;
        match self.config.redraw_mode {
            RedrawMode::Immediate => self.render().map(|_| ()),
            RedrawMode::Coalesced => Ok(()),
        }
    }
}
