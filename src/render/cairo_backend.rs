use std::fs::File;
use std::path::Path;

use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;

use crate::core::SurfaceSize;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, DrawingSurface, LinePrimitive, RectPrimitive, TextBaseline, TextHAlign, TextPrimitive,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub texts_drawn: usize,
}

/// Cairo + Pango + PangoCairo drawing surface.
///
/// Two modes:
/// - owned ARGB image surface (`CairoSurface::new`), exportable as PNG
/// - borrowed external context (`CairoSurface::for_context`), e.g. a GTK
///   `DrawingArea` draw callback
#[derive(Debug)]
pub struct CairoSurface {
    context: Context,
    image: Option<ImageSurface>,
    size: SurfaceSize,
    clear_color: Color,
    stats: CairoRenderStats,
}

impl CairoSurface {
    pub fn new(size: SurfaceSize) -> ChartResult<Self> {
        let (image, context) = create_image_context(size.validate()?)?;
        Ok(Self {
            context,
            image: Some(image),
            size,
            clear_color: Color::WHITE,
            stats: CairoRenderStats::default(),
        })
    }

    /// Wraps an external context whose target has `size` pixels.
    pub fn for_context(context: &Context, size: SurfaceSize) -> ChartResult<Self> {
        Ok(Self {
            context: context.clone(),
            image: None,
            size: size.validate()?,
            clear_color: Color::WHITE,
            stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn image_surface(&self) -> Option<&ImageSurface> {
        self.image.as_ref()
    }

    #[must_use]
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    /// Counters since the last `clear()`.
    #[must_use]
    pub fn stats(&self) -> CairoRenderStats {
        self.stats
    }

    /// Writes the owned image surface as PNG.
    pub fn write_png(&self, path: &Path) -> ChartResult<()> {
        let Some(image) = self.image.as_ref() else {
            return Err(ChartError::Backend(
                "png export requires an owned image surface".to_owned(),
            ));
        };
        image.flush();
        let mut file = File::create(path).map_err(|err| {
            ChartError::Backend(format!("failed to create `{}`: {err}", path.display()))
        })?;
        image
            .write_to_png(&mut file)
            .map_err(|err| ChartError::Backend(format!("failed to write png: {err}")))
    }
}

impl DrawingSurface for CairoSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) -> ChartResult<()> {
        let size = size.validate()?;
        if self.image.is_some() {
            let (image, context) = create_image_context(size)?;
            self.image = Some(image);
            self.context = context;
        }
        self.size = size;
        Ok(())
    }

    fn clear(&mut self) -> ChartResult<()> {
        apply_color(&self.context, self.clear_color);
        self.context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;
        self.stats = CairoRenderStats::default();
        Ok(())
    }

    fn fill_rect(&mut self, rect: &RectPrimitive) -> ChartResult<()> {
        rect.validate()?;
        apply_color(&self.context, rect.color);
        self.context.rectangle(rect.x, rect.y, rect.width, rect.height);
        self.context
            .fill()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
        self.stats.rects_drawn += 1;
        Ok(())
    }

    fn stroke_line(&mut self, line: &LinePrimitive) -> ChartResult<()> {
        line.validate()?;
        apply_color(&self.context, line.color);
        self.context.set_line_width(line.stroke_width);
        self.context.set_dash(&line.dash, 0.0);
        self.context.move_to(line.x1, line.y1);
        self.context.line_to(line.x2, line.y2);
        let stroked = self.context.stroke();
        self.context.set_dash(&[], 0.0);
        stroked.map_err(|err| map_backend_error("failed to stroke line", err))?;
        self.stats.lines_drawn += 1;
        Ok(())
    }

    fn fill_text(&mut self, text: &TextPrimitive) -> ChartResult<()> {
        text.validate()?;
        let layout = pangocairo::functions::create_layout(&self.context);
        let mut font_description = FontDescription::new();
        font_description.set_family(&text.font.family);
        font_description.set_absolute_size(text.font.size_px * f64::from(pango::SCALE));
        layout.set_font_description(Some(&font_description));
        layout.set_text(&text.text);

        let (text_width, text_height) = layout.pixel_size();
        let x = match text.h_align {
            TextHAlign::Left => text.x,
            TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
            TextHAlign::Right => text.x - f64::from(text_width),
        };
        let y = match text.baseline {
            TextBaseline::Top => text.y,
            TextBaseline::Middle => text.y - f64::from(text_height) / 2.0,
            TextBaseline::Bottom => text.y - f64::from(text_height),
            TextBaseline::Alphabetic => {
                text.y - f64::from(layout.baseline()) / f64::from(pango::SCALE)
            }
        };

        apply_color(&self.context, text.color);
        self.context.move_to(x, y);
        pangocairo::functions::show_layout(&self.context, &layout);
        self.stats.texts_drawn += 1;
        Ok(())
    }
}

fn create_image_context(size: SurfaceSize) -> ChartResult<(ImageSurface, Context)> {
    let width = i32::try_from(size.width).map_err(|_| ChartError::InvalidSurface {
        width: size.width,
        height: size.height,
    })?;
    let height = i32::try_from(size.height).map_err(|_| ChartError::InvalidSurface {
        width: size.width,
        height: size.height,
    })?;
    let image = ImageSurface::create(Format::ARgb32, width, height)
        .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
    let context = Context::new(&image)
        .map_err(|err| map_backend_error("failed to create cairo context", err))?;
    Ok((image, context))
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::Backend(format!("{prefix}: {err}"))
}
