use nowline_protocol::Size;
use tracing::{debug, trace};
use web_time::Instant;

use crate::config::{ConfigError, TimelineConfig};
use crate::host::{EventKind, InputSource, ListenerId, Surface};
use crate::interaction::{HoverUpdate, InputEvent, InteractionController};
use crate::paint::{FrameInputs, paint_frame};
use crate::schedule::RepaintSchedule;
use crate::time::{Clock, SystemClock};
use crate::view_state::ViewState;

type HoverObserver = Box<dyn FnMut(HoverUpdate)>;

/// The scrolling timeline widget.
///
/// Owns its view parameters and the repaint schedule, and borrows nothing
/// from the host beyond the injected surface, input source and clock.
/// Dropping it stops the schedule and deregisters every listener it
/// registered.
pub struct Timeline<S: Surface, I: InputSource, C: Clock = SystemClock> {
    config: TimelineConfig,
    state: ViewState,
    controller: InteractionController,
    schedule: RepaintSchedule,
    surface: S,
    input: I,
    clock: C,
    listeners: Vec<ListenerId>,
    hover_observer: Option<HoverObserver>,
}

impl<S: Surface, I: InputSource, C: Clock> Timeline<S, I, C> {
    /// Validate `config`, register listeners, paint the first frame and start
    /// the repaint schedule.
    pub fn new(config: TimelineConfig, surface: S, mut input: I, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;

        let listeners = EventKind::ALL.iter().map(|kind| input.listen(*kind)).collect();
        let state = ViewState::new(clock.now(), config.scale);
        let controller = InteractionController::new(config.wheel_gain, config.drag_gain);
        let schedule = RepaintSchedule::new(config.repaint_interval());

        let mut timeline = Self {
            config,
            state,
            controller,
            schedule,
            surface,
            input,
            clock,
            listeners,
            hover_observer: None,
        };
        debug!(base_time = %timeline.state.base_time(), "timeline created");
        timeline.repaint();
        timeline.proceed();
        Ok(timeline)
    }

    /// Observer called with the pointer position and the time under it on
    /// every pointer move.
    pub fn on_hover(&mut self, observer: impl FnMut(HoverUpdate) + 'static) {
        self.hover_observer = Some(Box::new(observer));
    }

    pub fn with_hover_observer(mut self, observer: impl FnMut(HoverUpdate) + 'static) -> Self {
        self.on_hover(observer);
        self
    }

    /// Deliver one host event.
    pub fn dispatch(&mut self, event: InputEvent) {
        if let InputEvent::Resize(size) = event {
            self.fit(size);
            return;
        }
        let bounds = self.surface.size().to_rect();
        if let Some(hover) = self.controller.handle(event, &mut self.state, bounds)
            && let Some(observer) = self.hover_observer.as_mut()
        {
            observer(hover);
        }
    }

    /// Run a tick if the schedule says one is due. Returns whether it did.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.schedule.poll(now) {
            self.tick();
            true
        } else {
            false
        }
    }

    /// Follow real time (unless frozen) and repaint.
    pub fn tick(&mut self) {
        self.state.advance(self.clock.now());
        self.repaint();
    }

    /// Paint one full frame onto the surface.
    pub fn repaint(&mut self) {
        let size = self.surface.size();
        if !size.is_drawable() {
            trace!(?size, "skipping repaint of empty surface");
            return;
        }
        let commands = paint_frame(&FrameInputs {
            config: &self.config,
            mapper: self.state.mapper(),
            size,
            now: self.clock.now(),
            base_time: self.state.base_time(),
        });
        self.surface.draw(&commands);
    }

    /// Resize the surface to the container's content box and repaint
    /// immediately. Zero-sized (detached) containers are ignored.
    pub fn fit(&mut self, container: Size) -> bool {
        if !container.is_drawable() {
            debug!(?container, "ignoring resize to an undrawable size");
            return false;
        }
        self.surface.resize(container);
        self.repaint();
        true
    }

    /// Stop the periodic repaint.
    pub fn halt(&mut self) {
        self.schedule.halt();
    }

    /// Restart the periodic repaint. No-op while already running.
    pub fn proceed(&mut self) {
        self.proceed_at(Instant::now());
    }

    pub fn proceed_at(&mut self, now: Instant) {
        self.schedule.proceed(now);
    }

    pub fn is_running(&self) -> bool {
        self.schedule.is_running()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.schedule.next_due()
    }

    pub fn view_state(&self) -> &ViewState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.controller.is_dragging()
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn input_source(&self) -> &I {
        &self.input
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

impl<S: Surface, I: InputSource, C: Clock> Drop for Timeline<S, I, C> {
    fn drop(&mut self) {
        self.schedule.halt();
        for id in self.listeners.drain(..) {
            self.input.unlisten(id);
        }
        debug!("timeline torn down");
    }
}

#[cfg(test)]
mod tests {
    use nowline_protocol::RenderCommand;

    use super::*;
    use crate::host::{ListenerRegistry, RecordingSurface};
    use crate::time::{ManualClock, Timestamp};

    const T0: Timestamp = Timestamp::from_millis(1_700_000_000_000.0);

    fn timeline() -> (Timeline<RecordingSurface, ListenerRegistry, ManualClock>, ManualClock) {
        let clock = ManualClock::new(T0);
        let timeline = Timeline::new(
            TimelineConfig::default(),
            RecordingSurface::new(Size::new(300.0, 200.0)),
            ListenerRegistry::new(),
            clock.clone(),
        )
        .unwrap();
        (timeline, clock)
    }

    #[test]
    fn construction_registers_listeners_paints_and_runs() {
        let (timeline, _) = timeline();
        assert_eq!(timeline.input_source().len(), EventKind::ALL.len());
        assert_eq!(timeline.surface().frames_drawn(), 1);
        assert!(timeline.is_running());
    }

    #[test]
    fn invalid_config_is_rejected_before_anything_registers() {
        let config = TimelineConfig {
            scale: f64::INFINITY,
            ..Default::default()
        };
        let result = Timeline::new(
            config,
            RecordingSurface::default(),
            ListenerRegistry::new(),
            ManualClock::new(T0),
        );
        assert!(matches!(result, Err(ConfigError::InvalidScale(_))));
    }

    #[test]
    fn resize_event_refits_and_repaints() {
        let (mut timeline, _) = timeline();
        timeline.dispatch(InputEvent::Resize(Size::new(640.0, 480.0)));
        assert_eq!(timeline.surface().size(), Size::new(640.0, 480.0));
        assert_eq!(timeline.surface().frames_drawn(), 2);
        let RenderCommand::ClearRect { rect, .. } = timeline.surface().frame()[0] else {
            panic!("frame must start with a clear");
        };
        assert_eq!(rect.h, 480.0);
    }

    #[test]
    fn zero_size_resize_is_a_no_op() {
        let (mut timeline, _) = timeline();
        assert!(!timeline.fit(Size::new(0.0, 0.0)));
        assert_eq!(timeline.surface().size(), Size::new(300.0, 200.0));
        assert_eq!(timeline.surface().frames_drawn(), 1);
    }

    #[test]
    fn tick_follows_the_clock() {
        let (mut timeline, clock) = timeline();
        clock.advance(40.0);
        timeline.tick();
        assert_eq!(timeline.view_state().display_time(), T0 + 40.0);
        assert_eq!(timeline.view_state().base_time(), T0);
    }
}
