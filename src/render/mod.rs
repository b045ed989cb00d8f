mod frame;
mod frame_buffer;
mod null_surface;
mod primitives;

pub use frame::{DrawCommand, RenderFrame};
pub use frame_buffer::FrameBuffer;
pub use null_surface::NullSurface;
pub use primitives::{
    Color, DashPattern, FontSpec, LinePrimitive, RectPrimitive, TextBaseline, TextHAlign,
    TextPrimitive,
};

use crate::core::SurfaceSize;
use crate::error::ChartResult;

/// Contract implemented by any 2D raster backend.
///
/// Coordinates are surface pixels with a top-left origin and y growing
/// downward. Nothing except the pixel size survives `clear()`.
pub trait DrawingSurface {
    fn size(&self) -> SurfaceSize;
    fn resize(&mut self, size: SurfaceSize) -> ChartResult<()>;
    fn clear(&mut self) -> ChartResult<()>;
    fn fill_rect(&mut self, rect: &RectPrimitive) -> ChartResult<()>;
    fn stroke_line(&mut self, line: &LinePrimitive) -> ChartResult<()>;
    fn fill_text(&mut self, text: &TextPrimitive) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoRenderStats, CairoSurface};
