use serde::{Deserialize, Serialize};

use crate::core::SeriesExtent;

/// Half-width added around a flat series so the projected range stays non-zero.
const FLAT_EXTENT_HALF_SPAN: f64 = 0.5;
const FLAT_EXTENT_RELATIVE_HALF_SPAN: f64 = 1e-9;

/// Price ↔ y mapping for one frame.
///
/// `min_price` anchors the bottom of the plot; `price_range` is the global
/// extent span divided by the price zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceProjection {
    min_price: f64,
    price_range: f64,
    plot_height: f64,
}

impl PriceProjection {
    /// Builds a projection from the global extent.
    ///
    /// `price_zoom` must be finite and `> 0`; callers keep it inside the
    /// viewport's zoom limits.
    #[must_use]
    pub fn new(extent: SeriesExtent, price_zoom: f64, plot_height: f64) -> Self {
        let (min_price, max_price) = normalized_domain(extent.min_price, extent.max_price);
        Self {
            min_price,
            price_range: ((max_price - min_price) / price_zoom).min(f64::MAX),
            plot_height,
        }
    }

    #[must_use]
    pub fn min_price(self) -> f64 {
        self.min_price
    }

    /// Visible price span.
    #[must_use]
    pub fn price_range(self) -> f64 {
        self.price_range
    }

    #[must_use]
    pub fn plot_height(self) -> f64 {
        self.plot_height
    }

    #[must_use]
    pub fn price_to_y(self, price: f64) -> f64 {
        self.plot_height - (price - self.min_price) / self.price_range * self.plot_height
    }

    #[must_use]
    pub fn y_to_price(self, y: f64) -> f64 {
        if self.plot_height <= 0.0 {
            return self.min_price;
        }
        self.min_price + (self.plot_height - y) / self.plot_height * self.price_range
    }
}

fn normalized_domain(min_price: f64, max_price: f64) -> (f64, f64) {
    if max_price > min_price {
        return (min_price, max_price);
    }
    let widened = (
        min_price - FLAT_EXTENT_HALF_SPAN,
        max_price + FLAT_EXTENT_HALF_SPAN,
    );
    if widened.1 > widened.0 {
        widened
    } else {
        // Half a unit is lost to rounding at this magnitude.
        let half_span = min_price.abs() * FLAT_EXTENT_RELATIVE_HALF_SPAN;
        (min_price - half_span, max_price + half_span)
    }
}
