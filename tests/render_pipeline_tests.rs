use approx::assert_relative_eq;
use candleview::api::{CandlestickChart, ChartConfig, FixedClock, RedrawMode, RenderState, RenderStyle};
use candleview::core::{Bar, Chunk, SurfaceSize};
use candleview::interaction::PointerEvent;
use candleview::render::{Color, DrawCommand, FrameBuffer, NullSurface, TextBaseline, TextHAlign};

fn single_candle_chunks() -> Vec<Chunk> {
    vec![Chunk::new(
        1_000,
        vec![Bar::new(0, 10.0, 12.0, 9.0, 11.0, 100.0)],
    )]
}

fn mixed_chunks() -> Vec<Chunk> {
    vec![Chunk::new(
        0,
        vec![
            Bar::new(0, 10.0, 12.0, 9.0, 11.0, 100.0),
            Bar::new(60, 11.0, 11.5, 9.5, 10.0, 50.0),
            Bar::new(120, 10.0, 10.5, 9.5, 10.0, 20.0),
        ],
    )]
}

fn buffer_chart(chunks: &[Chunk], config: ChartConfig) -> CandlestickChart<FrameBuffer> {
    let surface = FrameBuffer::new(SurfaceSize::new(800, 600)).expect("surface");
    CandlestickChart::new(surface, chunks, config)
        .expect("chart")
        .with_clock(FixedClock(0))
}

#[test]
fn single_candle_scenario_produces_one_body_at_open_and_close() {
    let mut chart = buffer_chart(&single_candle_chunks(), ChartConfig::default());
    assert_eq!(chart.render().expect("render"), RenderState::Ready);

    let frame = chart.offscreen_frame();
    let rects: Vec<_> = frame.rects().collect();
    // Body plus volume bar.
    assert_eq!(rects.len(), 2);
    let body = rects[0];
    assert_relative_eq!(body.x, 0.0);
    assert_relative_eq!(body.width, 10.0);
    // y(11) = 480 - 2 * 160, y(10) = 480 - 1 * 160
    assert_relative_eq!(body.y, 160.0);
    assert_relative_eq!(body.y + body.height, 320.0);
    assert_eq!(body.color, Color::GREEN);

    let volume = rects[1];
    assert_relative_eq!(volume.y, 480.0);
    assert_relative_eq!(volume.height, 120.0);
    assert_eq!(volume.color, Color::BLUE);

    let wicks: Vec<_> = frame.lines().collect();
    assert_eq!(wicks.len(), 1);
    assert_relative_eq!(wicks[0].x1, 5.0);
    assert_relative_eq!(wicks[0].y1, 0.0);
    assert_relative_eq!(wicks[0].y2, 480.0);
    assert_eq!(wicks[0].color, Color::BLACK);
    assert!(!wicks[0].is_dashed());
}

#[test]
fn body_colors_follow_direction() {
    let mut chart = buffer_chart(&mixed_chunks(), ChartConfig::default());
    chart.render().expect("render");

    let body_colors: Vec<Color> = chart
        .offscreen_frame()
        .rects()
        .map(|rect| rect.color)
        .filter(|color| *color != Color::BLUE)
        .collect();
    assert_eq!(body_colors, vec![Color::GREEN, Color::RED, Color::RED]);
}

#[test]
fn draw_order_is_candles_then_axes_then_crosshair() {
    let mut chart = buffer_chart(&mixed_chunks(), ChartConfig::default());
    chart
        .handle_event(PointerEvent::Move {
            x: 15.0,
            y: 200.0,
            over_surface: true,
        })
        .expect("move");

    let commands = &chart.offscreen_frame().commands;
    let first_text = commands
        .iter()
        .position(|command| matches!(command, DrawCommand::Text(_)))
        .expect("axis labels");
    let last_rect = commands
        .iter()
        .rposition(|command| matches!(command, DrawCommand::Rect(_)))
        .expect("candles");
    let first_dashed = commands
        .iter()
        .position(|command| matches!(command, DrawCommand::Line(line) if line.is_dashed()))
        .expect("crosshair");
    assert!(last_rect < first_text);
    assert!(first_text < first_dashed);
}

#[test]
fn axis_markings_cover_visible_records_and_price_range() {
    let mut chart = buffer_chart(&single_candle_chunks(), ChartConfig::default());
    chart.render().expect("render");

    let texts: Vec<_> = chart.offscreen_frame().texts().collect();
    // One in-range time mark plus 11 price marks.
    assert_eq!(texts.len(), 12);

    let time_label = texts[0];
    assert_eq!(time_label.text, "1970-01-01 00:16");
    assert_relative_eq!(time_label.x, 5.0);
    assert_relative_eq!(time_label.y, 480.0);
    assert_eq!(time_label.h_align, TextHAlign::Left);
    assert_eq!(time_label.baseline, TextBaseline::Alphabetic);

    let prices: Vec<&str> = texts[1..].iter().map(|text| text.text.as_str()).collect();
    assert_eq!(prices.first().copied(), Some("9.00000"));
    assert_eq!(prices.last().copied(), Some("12.00000"));
    for label in &texts[1..] {
        assert_relative_eq!(label.x, 760.0);
    }
    assert_relative_eq!(texts[1].y, 480.0);
    assert_relative_eq!(texts[11].y, 0.0, epsilon = 1e-9);
}

#[test]
fn time_marks_are_one_per_interval_when_records_fill_the_view() {
    let bars: Vec<Bar> = (0..200)
        .map(|i| Bar::new(i * 60, 10.0, 12.0, 9.0, 11.0, 5.0))
        .collect();
    let mut chart = buffer_chart(
        &[Chunk::new(0, bars)],
        ChartConfig::default().with_mark_intervals(4, 2),
    );
    chart.render().expect("render");

    let texts: Vec<_> = chart.offscreen_frame().texts().collect();
    // 5 time marks at indices 0, 20, 40, 60, 80 then 3 price marks.
    assert_eq!(texts.len(), 8);
    let xs: Vec<f64> = texts[..5].iter().map(|text| text.x).collect();
    assert_eq!(xs, vec![5.0, 205.0, 405.0, 605.0, 805.0]);
}

#[test]
fn visible_surface_receives_exact_copy_of_offscreen_frame() {
    let mut chart = buffer_chart(&mixed_chunks(), ChartConfig::default());
    chart.render().expect("render");
    assert_eq!(chart.surface().frame(), chart.offscreen_frame());

    chart
        .handle_event(PointerEvent::Move {
            x: 400.0,
            y: 100.0,
            over_surface: true,
        })
        .expect("move");
    assert_eq!(chart.surface().frame(), chart.offscreen_frame());
}

#[test]
fn every_frame_clears_the_visible_surface_once() {
    let surface = NullSurface::new(SurfaceSize::new(800, 600));
    let mut chart = CandlestickChart::new(surface, &mixed_chunks(), ChartConfig::default())
        .expect("chart");

    chart.render().expect("render");
    chart.render().expect("render");
    let surface = chart.into_surface();

    assert_eq!(surface.clear_count, 2);
    // Three candles with body, wick and volume each.
    assert_eq!(surface.rect_count, 6);
    assert_eq!(surface.line_count, 3);
}

#[test]
fn empty_series_renders_placeholder_only() {
    let mut chart = buffer_chart(&[], ChartConfig::default());
    assert_eq!(chart.render().expect("render"), RenderState::Empty);

    chart
        .handle_event(PointerEvent::Move {
            x: 50.0,
            y: 50.0,
            over_surface: true,
        })
        .expect("move");
    chart
        .handle_event(PointerEvent::Wheel {
            x: 50.0,
            y: 50.0,
            delta_y: -1.0,
        })
        .expect("wheel");

    let frame = chart.offscreen_frame();
    assert_eq!(frame.commands.len(), 1);
    let placeholder = frame.texts().next().expect("placeholder");
    assert_eq!(placeholder.text, RenderStyle::default().placeholder_text);
    assert_relative_eq!(placeholder.x, 400.0);
    assert_relative_eq!(placeholder.y, 300.0);
    assert_eq!(chart.last_render_state(), Some(RenderState::Empty));
}

#[test]
fn immediate_mode_renders_on_every_state_change() {
    let mut chart = buffer_chart(&mixed_chunks(), ChartConfig::default());
    assert!(chart.is_dirty());
    assert_eq!(chart.frames_rendered(), 0);

    chart
        .handle_event(PointerEvent::Wheel {
            x: 10.0,
            y: 10.0,
            delta_y: -1.0,
        })
        .expect("wheel");
    assert_eq!(chart.frames_rendered(), 1);
    assert!(!chart.is_dirty());

    // Pointer-down alone changes nothing visible.
    chart
        .handle_event(PointerEvent::Down { x: 10.0, y: 10.0 })
        .expect("down");
    assert_eq!(chart.frames_rendered(), 1);
}

#[test]
fn coalesced_mode_defers_until_render_if_dirty() {
    let config = ChartConfig::default().with_redraw_mode(RedrawMode::Coalesced);
    let mut chart = buffer_chart(&mixed_chunks(), config);

    for x in [10.0, 20.0, 30.0] {
        let outcome = chart
            .handle_event(PointerEvent::Move {
                x,
                y: 10.0,
                over_surface: true,
            })
            .expect("move");
        assert!(outcome.redraw);
    }
    assert_eq!(chart.frames_rendered(), 0);

    assert_eq!(
        chart.render_if_dirty().expect("render"),
        Some(RenderState::Ready)
    );
    assert_eq!(chart.render_if_dirty().expect("render"), None);
    assert_eq!(chart.frames_rendered(), 1);
}

#[test]
fn resize_updates_surface_offscreen_buffer_and_viewport() {
    let mut chart = buffer_chart(&mixed_chunks(), ChartConfig::default());
    chart.resize(SurfaceSize::new(400, 300)).expect("resize");

    assert_eq!(chart.surface().frame().size, SurfaceSize::new(400, 300));
    assert_eq!(chart.offscreen_frame().size, SurfaceSize::new(400, 300));
    assert_eq!(chart.viewport().size(), SurfaceSize::new(400, 300));
    assert!(chart.resize(SurfaceSize::new(400, 0)).is_err());
}

#[test]
fn custom_style_is_applied_to_frame() {
    let style = RenderStyle {
        bullish_color: Color::rgb(0.0, 0.5, 0.0),
        volume_color: Color::GRAY,
        ..RenderStyle::default()
    };
    let mut chart = buffer_chart(&single_candle_chunks(), ChartConfig::default())
        .with_style(style)
        .expect("style");
    chart.render().expect("render");

    let colors: Vec<Color> = chart.offscreen_frame().rects().map(|rect| rect.color).collect();
    assert_eq!(colors, vec![Color::rgb(0.0, 0.5, 0.0), Color::GRAY]);

    let invalid = RenderStyle {
        wick_width_px: 0.0,
        ..RenderStyle::default()
    };
    assert!(chart.set_style(invalid).is_err());
}
