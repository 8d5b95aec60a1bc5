use std::io::stdout;
use std::time::Duration;

use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use nowline_core::host::{EventKind, InputSource, ListenerId, ListenerRegistry};
use nowline_core::InputEvent;
use ratatui::layout::Rect;
use tracing::warn;
use web_time::Instant;

const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(400);

fn is_mouse(kind: EventKind) -> bool {
    !matches!(kind, EventKind::Resize)
}

/// Listener registry that turns terminal mouse reporting on while any
/// pointer listener is registered.
#[derive(Debug, Default)]
pub struct TerminalInput {
    registry: ListenerRegistry,
    capturing: bool,
}

impl TerminalInput {
    pub fn is_listening(&self, kind: EventKind) -> bool {
        self.registry.is_listening(kind)
    }

    fn sync_capture(&mut self) {
        let wanted = EventKind::ALL
            .into_iter()
            .filter(|k| is_mouse(*k))
            .any(|k| self.registry.is_listening(k));
        if wanted == self.capturing {
            return;
        }
        let result = if wanted {
            execute!(stdout(), EnableMouseCapture)
        } else {
            execute!(stdout(), DisableMouseCapture)
        };
        match result {
            Ok(()) => self.capturing = wanted,
            Err(e) => warn!(error = %e, wanted, "failed to toggle mouse capture"),
        }
    }
}

impl InputSource for TerminalInput {
    fn listen(&mut self, kind: EventKind) -> ListenerId {
        let id = self.registry.listen(kind);
        self.sync_capture();
        id
    }

    fn unlisten(&mut self, id: ListenerId) {
        self.registry.unlisten(id);
        self.sync_capture();
    }
}

/// Synthesizes double-clicks, which terminals do not report.
#[derive(Debug, Default)]
pub struct ClickTracker {
    last_release: Option<(Instant, u16, u16)>,
    dragged: bool,
}

impl ClickTracker {
    pub fn press(&mut self) {
        self.dragged = false;
    }

    /// The held button moved, so the coming release ends a drag, not a click.
    pub fn drag(&mut self) {
        self.dragged = true;
        self.last_release = None;
    }

    /// Record a release; true when it completes a double-click.
    pub fn release(&mut self, now: Instant, column: u16, row: u16) -> bool {
        if std::mem::take(&mut self.dragged) {
            self.last_release = None;
            return false;
        }
        let double = self.last_release.is_some_and(|(at, c, r)| {
            c == column && r == row && now.duration_since(at) <= DOUBLE_CLICK_WINDOW
        });
        self.last_release = if double { None } else { Some((now, column, row)) };
        double
    }
}

/// Translate a terminal mouse event into timeline events, in coordinates
/// relative to `area`.
pub fn translate_mouse(
    mouse: MouseEvent,
    area: Rect,
    clicks: &mut ClickTracker,
    now: Instant,
) -> Vec<(EventKind, InputEvent)> {
    let x = f64::from(mouse.column) - f64::from(area.x);
    let y = f64::from(mouse.row) - f64::from(area.y);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            clicks.press();
            vec![(EventKind::PointerDown, InputEvent::PointerDown { x, y })]
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            clicks.drag();
            vec![(EventKind::PointerMove, InputEvent::PointerMove { x, y })]
        }
        MouseEventKind::Moved => {
            vec![(EventKind::PointerMove, InputEvent::PointerMove { x, y })]
        }
        MouseEventKind::Up(MouseButton::Left) => {
            let mut events = vec![(EventKind::PointerUp, InputEvent::PointerUp)];
            if clicks.release(now, mouse.column, mouse.row) {
                events.push((EventKind::DoubleClick, InputEvent::DoubleClick { x, y }));
            }
            events
        }
        // Terminals report direction only; one notch is one unit of delta.
        MouseEventKind::ScrollDown => vec![(EventKind::Wheel, InputEvent::Wheel { delta_y: 1.0 })],
        MouseEventKind::ScrollUp => vec![(EventKind::Wheel, InputEvent::Wheel { delta_y: -1.0 })],
        _ => Vec::new(),
    }
}
