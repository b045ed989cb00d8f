pub mod candlestick;
pub mod price_scale;
pub mod record;
pub mod series;
pub mod types;
pub mod viewport;

pub use candlestick::{CandleGeometry, project_visible_candles};
pub use price_scale::PriceProjection;
pub use record::{Bar, Chunk, PriceRecord};
pub use series::{PriceSeries, SeriesExtent};
pub use types::{ScreenPoint, SurfaceSize};
pub use viewport::{Viewport, ViewportLimits};
