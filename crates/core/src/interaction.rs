use nowline_protocol::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::time::Timestamp;
use crate::view_state::ViewState;

/// Input delivered by the host, in surface-local pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    /// Button released, wherever the pointer is.
    PointerUp,
    Wheel { delta_y: f64 },
    DoubleClick { x: f64, y: f64 },
    /// The host container's content box changed.
    Resize(Size),
}

/// Pointer position and the time under it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoverUpdate {
    pub x: f64,
    pub y: f64,
    pub time: Timestamp,
}

/// Bookkeeping for one held pointer button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub origin_offset: f64,
    pub origin_pointer_y: f64,
    pub current_pointer_y: f64,
}

impl DragSession {
    pub fn start(origin_offset: f64, pointer_y: f64) -> Self {
        Self {
            origin_offset,
            origin_pointer_y: pointer_y,
            current_pointer_y: pointer_y,
        }
    }

    /// Offset implied by the pointer travel so far: the view moves with the
    /// pointer, pixel for pixel at a gain of 1.
    pub fn offset(&self, gain: f64) -> f64 {
        self.origin_offset - (self.origin_pointer_y - self.current_pointer_y) * gain
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Idle,
    /// Button held at `at`, pointer not moved yet. Releasing here is a click.
    Pressed { session: DragSession, at: Point },
    Dragging(DragSession),
}

/// Turns pointer and wheel input into pan and freeze changes on a
/// [`ViewState`].
#[derive(Debug, Clone)]
pub struct InteractionController {
    gesture: Gesture,
    wheel_gain: f64,
    drag_gain: f64,
}

impl InteractionController {
    pub fn new(wheel_gain: f64, drag_gain: f64) -> Self {
        Self {
            gesture: Gesture::Idle,
            wheel_gain,
            drag_gain,
        }
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        match &self.gesture {
            Gesture::Idle => None,
            Gesture::Pressed { session, .. } | Gesture::Dragging(session) => Some(session),
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Gesture::Dragging(_))
    }

    /// Apply one event. Pointer moves return the hover position and the time
    /// under it, computed after any pan the move caused.
    pub fn handle(
        &mut self,
        event: InputEvent,
        state: &mut ViewState,
        bounds: Rect,
    ) -> Option<HoverUpdate> {
        match event {
            InputEvent::PointerDown { x, y } => {
                if bounds.contains(Point::new(x, y)) {
                    self.gesture = Gesture::Pressed {
                        session: DragSession::start(state.pixel_offset(), y),
                        at: Point::new(x, y),
                    };
                }
                None
            }
            InputEvent::PointerMove { x, y } => {
                self.drag_to(Point::new(x, y), state);
                let time = state.mapper().pixel_to_time(y);
                Some(HoverUpdate { x, y, time })
            }
            InputEvent::PointerUp => {
                if let Gesture::Dragging(session) = self.gesture {
                    trace!(offset = session.offset(self.drag_gain), "drag ended");
                }
                self.gesture = Gesture::Idle;
                None
            }
            InputEvent::Wheel { delta_y } => {
                state.pan(-delta_y * self.wheel_gain);
                None
            }
            InputEvent::DoubleClick { x, y } => {
                if !self.is_dragging() && bounds.contains(Point::new(x, y)) {
                    state.set_frozen(false);
                }
                None
            }
            InputEvent::Resize(_) => None,
        }
    }

    /// Any move away from the press point starts the drag, sideways included.
    fn drag_to(&mut self, pointer: Point, state: &mut ViewState) {
        let mut session = match self.gesture {
            Gesture::Idle => return,
            Gesture::Pressed { at, .. } if at == pointer => return,
            Gesture::Pressed { session, .. } => {
                state.set_frozen(true);
                session
            }
            Gesture::Dragging(session) => session,
        };
        session.current_pointer_y = pointer.y;
        state.set_pixel_offset(session.offset(self.drag_gain));
        self.gesture = Gesture::Dragging(session);
    }
}
