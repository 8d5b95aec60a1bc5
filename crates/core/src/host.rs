//! Capabilities the widget consumes from its host.
//!
//! A host supplies a [`Surface`] to draw on and an [`InputSource`] that
//! tracks which kinds of events the widget wants. The host delivers those
//! events through [`Timeline::dispatch`](crate::Timeline::dispatch).

use std::collections::BTreeMap;

use nowline_protocol::{RenderCommand, Size};

/// A resizable 2-D drawing surface.
pub trait Surface {
    /// Current pixel dimensions.
    fn size(&self) -> Size;

    /// Match the surface to a new pixel size.
    fn resize(&mut self, size: Size);

    /// Execute one full frame of commands, in order.
    fn draw(&mut self, commands: &[RenderCommand]);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    PointerDown,
    PointerMove,
    PointerUp,
    Wheel,
    DoubleClick,
    /// Host container resized or zoomed.
    Resize,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::PointerDown,
        EventKind::PointerMove,
        EventKind::PointerUp,
        EventKind::Wheel,
        EventKind::DoubleClick,
        EventKind::Resize,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Event listener registration.
///
/// Every id handed out by [`listen`](Self::listen) is returned through
/// [`unlisten`](Self::unlisten) when the widget is dropped.
pub trait InputSource {
    fn listen(&mut self, kind: EventKind) -> ListenerId;
    fn unlisten(&mut self, id: ListenerId);
}

/// In-memory listener bookkeeping. Hosts either use it directly or wrap it
/// to attach side effects (enabling mouse capture and the like).
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    next_id: u64,
    listeners: BTreeMap<ListenerId, EventKind>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_listening(&self, kind: EventKind) -> bool {
        self.listeners.values().any(|k| *k == kind)
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl InputSource for ListenerRegistry {
    fn listen(&mut self, kind: EventKind) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.insert(id, kind);
        id
    }

    fn unlisten(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
    }
}

/// A surface that keeps the most recent frame. Used by hosts that paint the
/// command list later in their own frame callback, and by tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    size: Size,
    frame: Vec<RenderCommand>,
    frames_drawn: usize,
}

impl RecordingSurface {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    pub fn frame(&self) -> &[RenderCommand] {
        &self.frame
    }

    pub fn take_frame(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.frame)
    }

    pub fn frames_drawn(&self) -> usize {
        self.frames_drawn
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn resize(&mut self, size: Size) {
        self.size = size;
    }

    fn draw(&mut self, commands: &[RenderCommand]) {
        self.frame.clear();
        self.frame.extend_from_slice(commands);
        self.frames_drawn += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_hands_out_unique_ids() {
        let mut registry = ListenerRegistry::new();
        let a = registry.listen(EventKind::Wheel);
        let b = registry.listen(EventKind::Wheel);
        assert_ne!(a, b);
        registry.unlisten(a);
        assert!(registry.is_listening(EventKind::Wheel));
        registry.unlisten(b);
        assert!(registry.is_empty());
    }
}
