use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;
use tracing::warn;

use crate::api::CandlestickChart;
use crate::core::SurfaceSize;
use crate::interaction::{InputOutcome, PointerEvent};
use crate::render::CairoSurface;

pub type SharedChart = Rc<RefCell<CandlestickChart<CairoSurface>>>;

/// Hosts a chart inside a `gtk::DrawingArea`.
///
/// The chart renders into its own Cairo image surface; the widget draw
/// callback only paints that image, so GTK never sees a half-drawn frame.
pub struct GtkChartAdapter {
    chart: SharedChart,
    drawing_area: gtk::DrawingArea,
}

impl GtkChartAdapter {
    #[must_use]
    pub fn new(chart: CandlestickChart<CairoSurface>) -> Self {
        let size = chart.surface().size();
        let chart = Rc::new(RefCell::new(chart));

        let drawing_area = gtk::DrawingArea::new();
        drawing_area.set_content_width(i32::try_from(size.width).unwrap_or(i32::MAX));
        drawing_area.set_content_height(i32::try_from(size.height).unwrap_or(i32::MAX));
        drawing_area.set_hexpand(true);
        drawing_area.set_vexpand(true);
        drawing_area.set_focusable(true);

        install_draw_func(&drawing_area, Rc::clone(&chart));
        attach_pointer_controllers(&drawing_area, Rc::clone(&chart));

        Self {
            chart,
            drawing_area,
        }
    }

    #[must_use]
    pub fn chart(&self) -> SharedChart {
        Rc::clone(&self.chart)
    }

    #[must_use]
    pub fn drawing_area(&self) -> &gtk::DrawingArea {
        &self.drawing_area
    }
}

fn install_draw_func(drawing_area: &gtk::DrawingArea, chart: SharedChart) {
    drawing_area.set_draw_func(move |_widget, context, width, height| {
        let (Ok(width), Ok(height)) = (u32::try_from(width), u32::try_from(height)) else {
            return;
        };
        let size = SurfaceSize::new(width, height);
        if !size.is_valid() {
            return;
        }
        let Ok(mut chart) = chart.try_borrow_mut() else {
            return;
        };

        if chart.surface().size() != size {
            if let Err(err) = chart.resize(size) {
                warn!(error = %err, width, height, "chart resize failed");
                return;
            }
        }
        if let Err(err) = chart.render_if_dirty() {
            warn!(error = %err, "chart render failed");
            return;
        }

        let Some(image) = chart.surface().image_surface() else {
            return;
        };
        if let Err(err) = context
            .set_source_surface(image, 0.0, 0.0)
            .and_then(|()| context.paint())
        {
            warn!(error = %err, "failed to present chart frame");
        }
    });
}

fn dispatch(
    chart: &SharedChart,
    drawing_area: &gtk::DrawingArea,
    event: PointerEvent,
) -> InputOutcome {
    let Ok(mut chart) = chart.try_borrow_mut() else {
        return InputOutcome::default();
    };
    let outcome = match chart.handle_event(event) {
        Ok(outcome) => outcome,
        Err(err) => {
            warn!(error = %err, "pointer event failed");
            return InputOutcome::default();
        }
    };
    if outcome.redraw {
        drawing_area.queue_draw();
    }
    outcome
}

fn attach_pointer_controllers(drawing_area: &gtk::DrawingArea, chart: SharedChart) {
    let pointer_x = Rc::new(Cell::new(0.0));
    let pointer_y = Rc::new(Cell::new(0.0));

    let motion = gtk::EventControllerMotion::new();
    {
        let chart = Rc::clone(&chart);
        let drawing_area = drawing_area.clone();
        let pointer_x = Rc::clone(&pointer_x);
        let pointer_y = Rc::clone(&pointer_y);
        motion.connect_motion(move |_, x, y| {
            pointer_x.set(x);
            pointer_y.set(y);
            dispatch(
                &chart,
                &drawing_area,
                PointerEvent::Move {
                    x,
                    y,
                    over_surface: true,
                },
            );
        });
    }
    {
        let chart = Rc::clone(&chart);
        let drawing_area = drawing_area.clone();
        motion.connect_leave(move |_| {
            dispatch(&chart, &drawing_area, PointerEvent::Leave);
        });
    }
    drawing_area.add_controller(motion);

    let scroll = gtk::EventControllerScroll::new(gtk::EventControllerScrollFlags::VERTICAL);
    {
        let chart = Rc::clone(&chart);
        let drawing_area = drawing_area.clone();
        let pointer_x = Rc::clone(&pointer_x);
        let pointer_y = Rc::clone(&pointer_y);
        scroll.connect_scroll(move |_, _dx, dy| {
            if dy.abs() <= f64::EPSILON {
                return gtk::glib::Propagation::Proceed;
            }
            let outcome = dispatch(
                &chart,
                &drawing_area,
                PointerEvent::Wheel {
                    x: pointer_x.get(),
                    y: pointer_y.get(),
                    delta_y: dy,
                },
            );
            if outcome.suppress_default {
                gtk::glib::Propagation::Stop
            } else {
                gtk::glib::Propagation::Proceed
            }
        });
    }
    drawing_area.add_controller(scroll);

    let drag = gtk::GestureDrag::new();
    {
        let chart = Rc::clone(&chart);
        let drawing_area = drawing_area.clone();
        drag.connect_drag_begin(move |_, start_x, start_y| {
            dispatch(
                &chart,
                &drawing_area,
                PointerEvent::Down {
                    x: start_x,
                    y: start_y,
                },
            );
        });
    }
    {
        let chart = Rc::clone(&chart);
        let drawing_area = drawing_area.clone();
        // Updates keep arriving outside the widget while the drag is grabbed.
        drag.connect_drag_update(move |gesture, offset_x, offset_y| {
            if let Some((start_x, start_y)) = gesture.start_point() {
                dispatch(
                    &chart,
                    &drawing_area,
                    PointerEvent::Move {
                        x: start_x + offset_x,
                        y: start_y + offset_y,
                        over_surface: false,
                    },
                );
            }
        });
    }
    {
        let chart = Rc::clone(&chart);
        let drawing_area = drawing_area.clone();
        drag.connect_drag_end(move |gesture, offset_x, offset_y| {
            let (start_x, start_y) = gesture.start_point().unwrap_or((0.0, 0.0));
            dispatch(
                &chart,
                &drawing_area,
                PointerEvent::Up {
                    x: start_x + offset_x,
                    y: start_y + offset_y,
                },
            );
        });
    }
    drawing_area.add_controller(drag);
}
