use candleview::core::{SeriesExtent, SurfaceSize, Viewport, ViewportLimits};
use proptest::prelude::*;

fn viewport(width: u32, count: usize) -> Viewport {
    Viewport::new(ViewportLimits::default(), SurfaceSize::new(width, 600), count)
        .expect("viewport")
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Pan { start_x: f64, current_x: f64 },
    ZoomIn { anchor_x: f64 },
    ZoomOut { anchor_x: f64 },
    Offset(f64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (-5_000.0f64..5_000.0, -5_000.0f64..5_000.0)
            .prop_map(|(start_x, current_x)| Op::Pan { start_x, current_x }),
        (0.0f64..1_000.0).prop_map(|anchor_x| Op::ZoomIn { anchor_x }),
        (0.0f64..1_000.0).prop_map(|anchor_x| Op::ZoomOut { anchor_x }),
        (-1.0e6f64..1.0e6).prop_map(Op::Offset),
    ]
}

proptest! {
    #[test]
    fn offset_and_zoom_stay_within_bounds(
        width in 1u32..2_000,
        count in 0usize..2_000,
        ops in proptest::collection::vec(op_strategy(), 1..40)
    ) {
        let mut viewport = viewport(width, count);
        for op in ops {
            match op {
                Op::Pan { start_x, current_x } => {
                    let start_offset = viewport.offset_px();
                    viewport.pan_from(start_offset, start_x, current_x);
                }
                Op::ZoomIn { anchor_x } => {
                    viewport.zoom_in(anchor_x);
                }
                Op::ZoomOut { anchor_x } => {
                    viewport.zoom_out(anchor_x);
                }
                Op::Offset(offset) => viewport.set_offset_px(offset),
            }
            prop_assert!(viewport.zoom() >= 0.9 && viewport.zoom() <= 5.0);
            prop_assert!(viewport.offset_px() >= 0.0);
            prop_assert!(viewport.offset_px() <= viewport.max_offset_px());
        }
    }

    #[test]
    fn record_centers_map_back_to_their_index(
        count in 1usize..5_000,
        zoom_steps in 0usize..12,
        offset_factor in 0.0f64..=1.0,
        index_factor in 0.0f64..1.0
    ) {
        let mut viewport = viewport(800, count);
        for _ in 0..zoom_steps {
            viewport.zoom_in(400.0);
        }
        viewport.set_offset_px(offset_factor * viewport.max_offset_px());
        let index = ((count as f64 * index_factor) as usize).min(count - 1);

        let center = viewport.screen_x(index) + viewport.record_width_px() / 2.0;
        prop_assert_eq!(viewport.index_at(center), index as i64);
    }

    #[test]
    fn index_at_lands_within_one_record_of_x(
        count in 1usize..5_000,
        zoom_steps in 0usize..12,
        offset_factor in 0.0f64..=1.0,
        x in -2_000.0f64..2_000.0
    ) {
        let mut viewport = viewport(800, count);
        for _ in 0..zoom_steps {
            viewport.zoom_in(0.0);
        }
        viewport.set_offset_px(offset_factor * viewport.max_offset_px());

        let index = viewport.index_at(x);
        let start = index as f64 * viewport.record_width_px() - viewport.offset_px();
        let slack = 1e-6 + 1e-8 * (viewport.offset_px() + x).abs();
        prop_assert!(start <= x + slack);
        prop_assert!(x - start < viewport.record_width_px() + slack);
    }

    #[test]
    fn left_edges_map_back_to_their_index(
        count in 1usize..5_000,
        zoom_in_steps in 0usize..12,
        zoom_out_steps in 0usize..3,
        offset_factor in 0.0f64..=1.0,
        index_factor in 0.0f64..1.0
    ) {
        let mut viewport = viewport(800, count);
        for _ in 0..zoom_in_steps {
            viewport.zoom_in(400.0);
        }
        for _ in 0..zoom_out_steps {
            viewport.zoom_out(0.0);
        }
        viewport.set_offset_px(offset_factor * viewport.max_offset_px());
        let index = ((count as f64 * index_factor) as usize).min(count - 1);

        prop_assert_eq!(viewport.index_at(viewport.screen_x(index)), index as i64);
    }

    #[test]
    fn zoom_keeps_content_under_anchor_fixed(
        count in 200usize..5_000,
        offset_factor in 0.0f64..=1.0,
        anchor_x in 0.0f64..800.0,
        zoom_in in any::<bool>()
    ) {
        let mut viewport = viewport(800, count);
        viewport.set_offset_px(offset_factor * viewport.max_offset_px());
        let old_width = viewport.record_width_px();
        let old_offset = viewport.offset_px();
        let content_before = (old_offset + anchor_x) / old_width;

        let changed = if zoom_in {
            viewport.zoom_in(anchor_x)
        } else {
            viewport.zoom_out(anchor_x)
        };
        let new_width = viewport.record_width_px();
        let unclamped = (old_offset + anchor_x) * (new_width / old_width) - anchor_x;
        prop_assume!(changed);
        prop_assume!(unclamped >= 0.0 && unclamped <= viewport.max_offset_px());

        let content_after = (viewport.offset_px() + anchor_x) / new_width;
        prop_assert!((content_after - content_before).abs() <= 1e-9 * content_before.max(1.0));
    }

    #[test]
    fn price_round_trips_through_y(
        min_price in -1.0e6f64..1.0e6,
        span in 0.001f64..1.0e6,
        fraction in 0.0f64..=1.0,
        price_zoom in 0.9f64..5.0
    ) {
        let extent = SeriesExtent {
            min_price,
            max_price: min_price + span,
            max_volume: 1.0,
        };
        let mut viewport = viewport(800, 10).with_price_zoom_coupling(false);
        viewport.set_price_zoom(price_zoom).expect("price zoom");
        let projection = viewport.price_projection(extent);
        let price = min_price + fraction * span;

        let recovered = projection.y_to_price(projection.price_to_y(price));
        prop_assert!((recovered - price).abs() <= 1e-6 * price.abs().max(1.0));
    }
}
