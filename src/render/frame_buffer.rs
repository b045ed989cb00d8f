use tracing::trace;

use crate::core::SurfaceSize;
use crate::error::ChartResult;
use crate::render::{
    DrawCommand, DrawingSurface, LinePrimitive, RectPrimitive, RenderFrame, TextPrimitive,
};

/// Offscreen surface that records a frame and later copies it onto a visible
/// surface in one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    frame: RenderFrame,
}

impl FrameBuffer {
    pub fn new(size: SurfaceSize) -> ChartResult<Self> {
        Ok(Self {
            frame: RenderFrame::new(size.validate()?),
        })
    }

    #[must_use]
    pub fn frame(&self) -> &RenderFrame {
        &self.frame
    }

    /// Clears `target` and replays every recorded command in order.
    pub fn blit_onto(&self, target: &mut dyn DrawingSurface) -> ChartResult<()> {
        target.clear()?;
        for command in &self.frame.commands {
            match command {
                DrawCommand::Rect(rect) => target.fill_rect(rect)?,
                DrawCommand::Line(line) => target.stroke_line(line)?,
                DrawCommand::Text(text) => target.fill_text(text)?,
            }
        }
        trace!(
            command_count = self.frame.commands.len(),
            "blitted offscreen frame"
        );
        Ok(())
    }
}

impl DrawingSurface for FrameBuffer {
    fn size(&self) -> SurfaceSize {
        self.frame.size
    }

    fn resize(&mut self, size: SurfaceSize) -> ChartResult<()> {
        self.frame.size = size.validate()?;
        self.frame.clear();
        Ok(())
    }

    fn clear(&mut self) -> ChartResult<()> {
        self.frame.clear();
        Ok(())
    }

    fn fill_rect(&mut self, rect: &RectPrimitive) -> ChartResult<()> {
        rect.validate()?;
        self.frame.push(DrawCommand::Rect(*rect));
        Ok(())
    }

    fn stroke_line(&mut self, line: &LinePrimitive) -> ChartResult<()> {
        line.validate()?;
        self.frame.push(DrawCommand::Line(line.clone()));
        Ok(())
    }

    fn fill_text(&mut self, text: &TextPrimitive) -> ChartResult<()> {
        text.validate()?;
        self.frame.push(DrawCommand::Text(text.clone()));
        Ok(())
    }
}
