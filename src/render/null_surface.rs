use crate::core::SurfaceSize;
use crate::error::ChartResult;
use crate::render::{DrawingSurface, LinePrimitive, RectPrimitive, TextPrimitive};

/// Headless surface used by tests and batch hosts.
///
/// It still validates primitives so tests catch invalid geometry before a real
/// backend sees it. Counters reset on every `clear()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NullSurface {
    size: SurfaceSize,
    pub clear_count: usize,
    pub rect_count: usize,
    pub line_count: usize,
    pub text_count: usize,
}

impl NullSurface {
    #[must_use]
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            clear_count: 0,
            rect_count: 0,
            line_count: 0,
            text_count: 0,
        }
    }
}

impl DrawingSurface for NullSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) -> ChartResult<()> {
        self.size = size.validate()?;
        Ok(())
    }

    fn clear(&mut self) -> ChartResult<()> {
        self.clear_count += 1;
        self.rect_count = 0;
        self.line_count = 0;
        self.text_count = 0;
        Ok(())
    }

    fn fill_rect(&mut self, rect: &RectPrimitive) -> ChartResult<()> {
        rect.validate()?;
        self.rect_count += 1;
        Ok(())
    }

    fn stroke_line(&mut self, line: &LinePrimitive) -> ChartResult<()> {
        line.validate()?;
        self.line_count += 1;
        Ok(())
    }

    fn fill_text(&mut self, text: &TextPrimitive) -> ChartResult<()> {
        text.validate()?;
        self.text_count += 1;
        Ok(())
    }
}
