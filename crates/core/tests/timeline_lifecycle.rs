//! End-to-end: drive a timeline with a manual clock through drag, wheel,
//! freeze and teardown, checking what reaches the surface.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use nowline_core::host::{EventKind, InputSource, ListenerId, ListenerRegistry, RecordingSurface};
use nowline_core::{
    Clock, HoverUpdate, InputEvent, ManualClock, SvgSurface, Timeline, TimelineConfig, Timestamp,
};
use nowline_protocol::{RenderCommand, Size, ThemeToken};
use web_time::Instant;

const T0: Timestamp = Timestamp::from_millis(1_700_000_000_000.0);

/// Listener registry that can be inspected after the timeline is gone.
#[derive(Clone, Default)]
struct SharedRegistry(Rc<RefCell<ListenerRegistry>>);

impl InputSource for SharedRegistry {
    fn listen(&mut self, kind: EventKind) -> ListenerId {
        self.0.borrow_mut().listen(kind)
    }

    fn unlisten(&mut self, id: ListenerId) {
        self.0.borrow_mut().unlisten(id);
    }
}

fn build() -> (
    Timeline<RecordingSurface, ListenerRegistry, ManualClock>,
    ManualClock,
) {
    let clock = ManualClock::new(T0);
    let timeline = Timeline::new(
        TimelineConfig::default(),
        RecordingSurface::new(Size::new(400.0, 600.0)),
        ListenerRegistry::new(),
        clock.clone(),
    )
    .expect("default config is valid");
    (timeline, clock)
}

fn marker_y(frame: &[RenderCommand], token: ThemeToken) -> Option<f64> {
    frame.iter().find_map(|cmd| match cmd {
        RenderCommand::DrawLine { from, color, .. } if *color == token => Some(from.y),
        _ => None,
    })
}

#[test]
fn end_to_end_scale_scenario() {
    let (timeline, _) = build();
    let mapper = timeline.view_state().mapper();
    assert_eq!(mapper.time_to_pixel(T0), 0.0);
    assert!((mapper.time_to_pixel(T0 - 1000.0) - 50.0).abs() < 1e-9);
}

#[test]
fn drag_freezes_and_ticks_stop_following_time() {
    let (mut timeline, clock) = build();
    clock.advance(100.0);
    timeline.tick();
    assert_eq!(timeline.view_state().display_time(), T0 + 100.0);

    timeline.dispatch(InputEvent::PointerDown { x: 200.0, y: 100.0 });
    timeline.dispatch(InputEvent::PointerMove { x: 200.0, y: 160.0 });
    assert!(timeline.is_dragging());
    assert!(timeline.view_state().is_frozen());
    assert_eq!(timeline.view_state().pixel_offset(), 60.0);

    for _ in 0..5 {
        clock.advance(25.0);
        timeline.tick();
        assert_eq!(timeline.view_state().display_time(), T0 + 100.0);
    }

    timeline.dispatch(InputEvent::PointerUp);
    clock.advance(25.0);
    timeline.tick();
    assert!(timeline.view_state().is_frozen());
    assert_eq!(timeline.view_state().display_time(), T0 + 100.0);

    timeline.dispatch(InputEvent::DoubleClick { x: 200.0, y: 160.0 });
    timeline.tick();
    assert_eq!(timeline.view_state().display_time(), clock.now());
    assert_eq!(timeline.view_state().pixel_offset(), 60.0);
}

#[test]
fn frozen_frame_keeps_the_now_marker_on_real_time() {
    let (mut timeline, clock) = build();
    timeline.dispatch(InputEvent::PointerDown { x: 200.0, y: 100.0 });
    timeline.dispatch(InputEvent::PointerMove { x: 200.0, y: 101.0 });
    timeline.dispatch(InputEvent::PointerMove { x: 200.0, y: 100.0 });
    timeline.dispatch(InputEvent::PointerUp);
    assert!(timeline.view_state().is_frozen());

    clock.advance(2000.0);
    timeline.tick();
    let frame = timeline.surface().frame();
    // Display time is still T0, so real "now" sits 100px above row 0 while
    // the anchor stays on row 0.
    assert_eq!(marker_y(frame, ThemeToken::NowMarker), Some(-100.0));
    assert_eq!(marker_y(frame, ThemeToken::AnchorMarker), Some(0.0));
}

#[test]
fn wheel_moves_the_anchor_marker_by_the_gain() {
    let (mut timeline, _) = build();
    timeline.dispatch(InputEvent::Wheel { delta_y: -10.0 });
    timeline.tick();
    assert_eq!(
        marker_y(timeline.surface().frame(), ThemeToken::AnchorMarker),
        Some(100.0)
    );
    assert!(!timeline.view_state().is_frozen());
}

#[test]
fn hover_observer_sees_every_move() {
    let (timeline, _) = build();
    let seen: Rc<RefCell<Vec<HoverUpdate>>> = Rc::default();
    let sink = Rc::clone(&seen);
    let mut timeline = timeline.with_hover_observer(move |update| sink.borrow_mut().push(update));

    timeline.dispatch(InputEvent::PointerMove { x: 1.0, y: 50.0 });
    timeline.dispatch(InputEvent::PointerDown { x: 1.0, y: 50.0 });
    timeline.dispatch(InputEvent::PointerMove { x: 1.0, y: 100.0 });

    let seen = seen.borrow();
    assert_eq!(seen.len(), 2);
    assert!((seen[0].time - (T0 - 1000.0)).abs() < 1e-6);
    // After panning 50px the time under row 100 is again one second back.
    assert!((seen[1].time - (T0 - 1000.0)).abs() < 1e-6);
}

#[test]
fn halt_and_proceed_control_polling() {
    let (mut timeline, clock) = build();
    let start = Instant::now();
    let interval = Duration::from_millis(25);

    timeline.halt();
    timeline.halt();
    assert!(!timeline.is_running());
    clock.advance(500.0);
    assert!(!timeline.poll(start + interval * 40));
    assert_eq!(timeline.view_state().display_time(), T0);

    timeline.proceed_at(start);
    timeline.proceed_at(start + interval);
    assert!(timeline.poll(start + interval));
    assert_eq!(timeline.view_state().display_time(), T0 + 500.0);
    assert!(!timeline.poll(start + interval));
}

#[test]
fn teardown_deregisters_every_listener() {
    let registry = SharedRegistry::default();
    {
        let _timeline = Timeline::new(
            TimelineConfig::default(),
            RecordingSurface::new(Size::new(100.0, 100.0)),
            registry.clone(),
            ManualClock::new(T0),
        )
        .expect("default config is valid");
        assert_eq!(registry.0.borrow().len(), EventKind::ALL.len());
        assert!(registry.0.borrow().is_listening(EventKind::Resize));
    }
    assert!(registry.0.borrow().is_empty());
}

#[test]
fn svg_surface_captures_the_latest_frame() {
    let timeline = Timeline::new(
        TimelineConfig::default(),
        SvgSurface::new(Size::new(300.0, 120.0), false),
        ListenerRegistry::new(),
        ManualClock::new(T0),
    )
    .expect("default config is valid");
    let svg = timeline.surface().document();
    assert!(svg.starts_with("<svg"));
    assert_eq!(svg.matches("<text").count(), 3);
    assert!(svg.contains(r#"stroke="blue""#));
}
