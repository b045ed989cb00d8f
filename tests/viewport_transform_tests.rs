use approx::assert_relative_eq;
use candleview::core::{
    PriceProjection, PriceRecord, PriceSeries, SeriesExtent, SurfaceSize, Viewport,
    ViewportLimits, project_visible_candles,
};

fn viewport(width: u32, height: u32, count: usize) -> Viewport {
    Viewport::new(ViewportLimits::default(), SurfaceSize::new(width, height), count)
        .expect("viewport")
}

fn flat_records(count: usize) -> Vec<PriceRecord> {
    (0..count)
        .map(|i| {
            let base = 100.0 + i as f64;
            PriceRecord::new(i as i64 * 60, base, base + 2.0, base - 1.0, base + 1.0, 10.0)
        })
        .collect()
}

#[test]
fn screen_x_and_index_at_are_inverse() {
    let mut viewport = viewport(800, 600, 500);
    viewport.set_offset_px(1_234.0);

    assert_relative_eq!(viewport.screen_x(200), 2_000.0 - 1_234.0);
    assert_eq!(viewport.index_at(viewport.screen_x(200)), 200);
    assert_eq!(viewport.index_at(viewport.screen_x(200) + 9.99), 200);
    assert_eq!(viewport.index_at(-1_234.5), -1);
}

#[test]
fn left_edges_map_back_to_their_index_after_zoom() {
    let mut viewport = viewport(800, 600, 100);
    viewport.zoom_in(0.0);
    viewport.zoom_in(0.0);
    assert_relative_eq!(viewport.record_width_px(), 14.4, epsilon = 1e-9);

    // 7 * 14.4 divides back to just under 7.0 in f64.
    assert_eq!(viewport.index_at(viewport.screen_x(7)), 7);
    for index in 0..100 {
        assert_eq!(viewport.index_at(viewport.screen_x(index)), index as i64);
    }
    assert_eq!(viewport.index_at(viewport.screen_x(7) - 0.01), 6);
}

#[test]
fn visible_indices_include_partially_visible_records() {
    let mut viewport = viewport(800, 600, 500);
    viewport.set_offset_px(95.0);

    let visible = viewport.visible_indices();
    // Record 9 spans [-5, 5] and record 89 starts at 795.
    assert_eq!(visible.start, 9);
    assert_eq!(visible.end, 90);
    for index in visible {
        let x = viewport.screen_x(index);
        assert!(x + viewport.record_width_px() >= 0.0 && x <= 800.0);
    }
}

#[test]
fn visible_indices_handle_short_and_empty_series() {
    assert_eq!(viewport(800, 600, 3).visible_indices(), 0..3);
    assert!(viewport(800, 600, 0).visible_indices().is_empty());
}

#[test]
fn max_offset_is_zero_for_narrow_content() {
    let viewport = viewport(800, 600, 20);
    assert_eq!(viewport.content_width_px(), 200.0);
    assert_eq!(viewport.max_offset_px(), 0.0);
}

#[test]
fn price_projection_maps_extent_to_plot_band() {
    let extent = SeriesExtent {
        min_price: 9.0,
        max_price: 12.0,
        max_volume: 100.0,
    };
    let projection = viewport(800, 600, 1).price_projection(extent);

    assert_relative_eq!(projection.plot_height(), 480.0);
    assert_relative_eq!(projection.price_to_y(9.0), 480.0);
    assert_relative_eq!(projection.price_to_y(12.0), 0.0);
    assert_relative_eq!(projection.y_to_price(240.0), 10.5);
}

#[test]
fn price_zoom_shrinks_visible_range() {
    let extent = SeriesExtent {
        min_price: 0.0,
        max_price: 10.0,
        max_volume: 1.0,
    };
    let mut viewport = viewport(800, 600, 1).with_price_zoom_coupling(false);
    viewport.set_price_zoom(2.0).expect("price zoom");
    let projection = viewport.price_projection(extent);

    assert_relative_eq!(projection.price_range(), 5.0);
    assert_relative_eq!(projection.price_to_y(5.0), 0.0);
}

#[test]
fn flat_extent_is_widened_around_the_price() {
    let projection = PriceProjection::new(
        SeriesExtent {
            min_price: 42.0,
            max_price: 42.0,
            max_volume: 1.0,
        },
        1.0,
        480.0,
    );

    assert_relative_eq!(projection.price_range(), 1.0);
    assert_relative_eq!(projection.price_to_y(42.0), 240.0);
}

#[test]
fn candle_geometry_follows_price_and_volume_transforms() {
    let series = PriceSeries::from_records(vec![
        PriceRecord::new(0, 10.0, 12.0, 9.0, 11.0, 100.0),
        PriceRecord::new(60, 11.0, 11.5, 9.5, 10.0, 50.0),
    ])
    .expect("series");
    let viewport = viewport(800, 600, series.len());
    let candles = project_visible_candles(&series, &viewport);

    assert_eq!(candles.len(), 2);
    let bear = candles[1];
    assert_eq!(bear.index, 1);
    assert!(!bear.is_bullish);
    assert_relative_eq!(bear.x, 10.0);
    assert_relative_eq!(bear.wick_x, 15.0);
    assert_relative_eq!(bear.body_top, 160.0);
    assert_relative_eq!(bear.body_bottom, 320.0);
    assert_relative_eq!(bear.wick_top, 80.0);
    assert_relative_eq!(bear.wick_bottom, 400.0);
    // Half of max volume fills half of the 120 px band.
    assert_relative_eq!(bear.volume_top, 540.0);
    assert_relative_eq!(bear.volume_bottom, 600.0);
}

#[test]
fn zero_max_volume_yields_zero_height_bars() {
    let series = PriceSeries::from_records(vec![
        PriceRecord::new(0, 10.0, 12.0, 9.0, 11.0, 0.0),
        PriceRecord::new(60, 11.0, 12.0, 9.0, 10.0, 0.0),
    ])
    .expect("series");
    let viewport = viewport(800, 600, series.len());

    for candle in project_visible_candles(&series, &viewport) {
        assert_eq!(candle.volume_height(), 0.0);
        assert!(candle.volume_top.is_finite());
    }
}

#[test]
fn projection_only_returns_visible_records() {
    let series = PriceSeries::from_records(flat_records(300)).expect("series");
    let mut viewport = viewport(400, 300, series.len());
    viewport.set_offset_px(1_000.0);

    let candles = project_visible_candles(&series, &viewport);
    let expected: Vec<usize> = viewport.visible_indices().collect();
    let actual: Vec<usize> = candles.iter().map(|candle| candle.index).collect();
    assert_eq!(actual, expected);
    assert_eq!(actual.first().copied(), Some(99));
}

#[test]
fn resize_reclamps_offset() {
    let mut viewport = viewport(800, 600, 100);
    viewport.set_offset_px(200.0);
    assert_eq!(viewport.offset_px(), 200.0);

    viewport.resize(SurfaceSize::new(900, 600)).expect("resize");
    assert_eq!(viewport.offset_px(), 100.0);
    assert!(viewport.resize(SurfaceSize::new(0, 600)).is_err());
}
