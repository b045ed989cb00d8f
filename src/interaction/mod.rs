use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::core::{ScreenPoint, Viewport};
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Dragging,
}

/// Low-level host event in surface-local pixel coordinates.
///
/// Coordinates may lie outside the surface: hosts forward moves and releases
/// that happen anywhere while a drag is active.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    /// `delta_y < 0` zooms in, anything else zooms out.
    Wheel { x: f64, y: f64, delta_y: f64 },
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64, over_surface: bool },
    Up { x: f64, y: f64 },
    /// Pointer left the surface.
    Leave,
}

impl PointerEvent {
    fn validate(self) -> ChartResult<Self> {
        let finite = match self {
            Self::Wheel { x, y, delta_y } => x.is_finite() && y.is_finite() && delta_y.is_finite(),
            Self::Down { x, y } | Self::Move { x, y, .. } | Self::Up { x, y } => {
                x.is_finite() && y.is_finite()
            }
            Self::Leave => true,
        };
        if !finite {
            return Err(ChartError::InvalidInput(format!(
                "event coordinates must be finite: {self:?}"
            )));
        }
        Ok(self)
    }
}

/// What the host should do after an event was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InputOutcome {
    pub redraw: bool,
    /// Host must suppress the platform default (page scroll for wheel events).
    pub suppress_default: bool,
}

/// Pan gesture state that exists only between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragGesture {
    pub start_x: f64,
    pub start_offset_px: f64,
    pub last_x: f64,
}

/// Maps pointer/wheel events onto viewport mutations.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InputController {
    gesture: Option<DragGesture>,
    clear_crosshair_on_leave: bool,
}

impl InputController {
    #[must_use]
    pub fn new(clear_crosshair_on_leave: bool) -> Self {
        Self {
            gesture: None,
            clear_crosshair_on_leave,
        }
    }

    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        if self.gesture.is_some() {
            InteractionMode::Dragging
        } else {
            InteractionMode::Idle
        }
    }

    #[must_use]
    pub fn gesture(&self) -> Option<DragGesture> {
        self.gesture
    }

    #[must_use]
    pub fn clears_crosshair_on_leave(&self) -> bool {
        self.clear_crosshair_on_leave
    }

    pub fn set_clear_crosshair_on_leave(&mut self, enabled: bool) {
        self.clear_crosshair_on_leave = enabled;
    }

    /// Ends an active drag without a pointer-up, e.g. after lost pointer capture.
    ///
    /// Returns `true` when a gesture was released.
    pub fn cancel_gesture(&mut self) -> bool {
        self.gesture.take().is_some()
    }

    pub fn handle(
        &mut self,
        event: PointerEvent,
        viewport: &mut Viewport,
    ) -> ChartResult<InputOutcome> {
        let event = event.validate().inspect_err(|err| {
            warn!(error = %err, "rejected pointer event");
        })?;

        let outcome = match event {
            PointerEvent::Wheel { x, delta_y, .. } => {
                if delta_y < 0.0 {
                    viewport.zoom_in(x);
                } else {
                    viewport.zoom_out(x);
                }
                if let Some(gesture) = self.gesture.as_mut() {
                    gesture.start_x = gesture.last_x;
                    gesture.start_offset_px = viewport.offset_px();
                }
                InputOutcome {
                    redraw: true,
                    suppress_default: true,
                }
            }
            PointerEvent::Down { x, .. } => {
                self.gesture = Some(DragGesture {
                    start_x: x,
                    start_offset_px: viewport.offset_px(),
                    last_x: x,
                });
                trace!(x, "drag started");
                InputOutcome::default()
            }
            PointerEvent::Move { x, y, over_surface } => {
                let mut redraw = false;
                if let Some(gesture) = self.gesture.as_mut() {
                    gesture.last_x = x;
                    viewport.pan_from(gesture.start_offset_px, gesture.start_x, x);
                    redraw = true;
                }
                if over_surface {
                    viewport.set_crosshair(Some(ScreenPoint::new(x, y)));
                    redraw = true;
                }
                InputOutcome {
                    redraw,
                    suppress_default: false,
                }
            }
            PointerEvent::Up { .. } => {
                if self.gesture.take().is_some() {
                    trace!("drag ended");
                }
                InputOutcome::default()
            }
            PointerEvent::Leave => {
                let cleared = self.clear_crosshair_on_leave && viewport.crosshair().is_some();
                if cleared {
                    viewport.set_crosshair(None);
                }
                InputOutcome {
                    redraw: cleared,
                    suppress_default: false,
                }
            }
        };
        Ok(outcome)
    }
}
