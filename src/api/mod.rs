mod axis_label_format;
mod axis_render_frame_builder;
mod candlestick_render_frame_builder;
mod chart;
mod chart_config;
mod clock;
mod crosshair_readout;
mod crosshair_render_frame_builder;
mod render_pipeline;
mod render_style;

pub use axis_label_format::{format_axis_time, format_crosshair_time, format_price};
pub use chart::CandlestickChart;
pub use chart_config::{ChartConfig, RedrawMode};
pub use clock::{Clock, FixedClock, SystemClock};
pub use crosshair_readout::{CrosshairReadout, resolve_crosshair_readout};
pub use render_pipeline::{FrameContext, RenderPipeline, RenderState};
pub use render_style::RenderStyle;
