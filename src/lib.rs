//! candleview: scrollable, zoomable candlestick chart with a tick-volume
//! histogram and a crosshair readout.
//!
//! The crate is split into a pure `core` (records, series, viewport math),
//! an `interaction` state machine, backend-agnostic `render` primitives and
//! surfaces, and the `api` facade that ties them into a double-buffered
//! render pipeline.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod source;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{CandlestickChart, ChartConfig, RedrawMode, RenderState, RenderStyle};
pub use error::{ChartError, ChartResult, DataError, SourceError};
