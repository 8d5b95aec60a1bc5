use nowline_core::host::{EventKind, ListenerRegistry, RecordingSurface};
use nowline_core::{InputEvent, SystemClock, Timeline, TimelineConfig};
use nowline_protocol::Size;
use wasm_bindgen::prelude::*;
use web_time::Instant;

/// A timeline owned by JavaScript.
///
/// The page forwards DOM events to the methods below and calls `poll` from
/// `requestAnimationFrame` (or a `setInterval`); after each paint it reads the
/// frame with `frame_json` and replays it onto a 2-D canvas context.
/// Calling `free()` tears the widget down.
#[wasm_bindgen]
pub struct WasmTimeline {
    inner: Timeline<RecordingSurface, ListenerRegistry, SystemClock>,
}

#[wasm_bindgen]
impl WasmTimeline {
    /// Create a timeline from JSON options (`"{}"` for defaults) sized to the
    /// container's content box.
    #[wasm_bindgen(constructor)]
    pub fn new(options_json: &str, width: f64, height: f64) -> Result<WasmTimeline, JsError> {
        let config = TimelineConfig::from_json(options_json)
            .map_err(|e| JsError::new(&e.to_string()))?;
        let inner = Timeline::new(
            config,
            RecordingSurface::new(Size::new(width, height)),
            ListenerRegistry::new(),
            SystemClock,
        )
        .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(Self { inner })
    }

    /// Whether the widget listens for a DOM event name such as `"wheel"`.
    pub fn listens(&self, dom_event: &str) -> bool {
        event_kind(dom_event).is_some_and(|kind| self.inner.input_source().is_listening(kind))
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.inner.dispatch(InputEvent::PointerDown { x, y });
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.inner.dispatch(InputEvent::PointerMove { x, y });
    }

    pub fn pointer_up(&mut self) {
        self.inner.dispatch(InputEvent::PointerUp);
    }

    pub fn wheel(&mut self, delta_y: f64) {
        self.inner.dispatch(InputEvent::Wheel { delta_y });
    }

    pub fn double_click(&mut self, x: f64, y: f64) {
        self.inner.dispatch(InputEvent::DoubleClick { x, y });
    }

    /// Fit to the container's new content box. Returns false (and keeps the
    /// old size) for a detached or collapsed container.
    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        self.inner.fit(Size::new(width, height))
    }

    /// Tick if the repaint interval has elapsed. Returns whether a new frame
    /// is available.
    pub fn poll(&mut self) -> bool {
        self.inner.poll(Instant::now())
    }

    pub fn halt(&mut self) {
        self.inner.halt();
    }

    pub fn proceed(&mut self) {
        self.inner.proceed();
    }

    pub fn is_running(&self) -> bool {
        self.inner.is_running()
    }

    pub fn is_frozen(&self) -> bool {
        self.inner.view_state().is_frozen()
    }

    pub fn pixel_offset(&self) -> f64 {
        self.inner.view_state().pixel_offset()
    }

    /// Display time in milliseconds since the Unix epoch.
    pub fn display_time(&self) -> f64 {
        self.inner.view_state().display_time().as_millis()
    }

    /// Latest frame's render commands as JSON.
    pub fn frame_json(&self) -> Result<String, JsError> {
        serde_json::to_string(self.inner.surface().frame()).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Register `callback(x, y, timeMs)` for every pointer move.
    pub fn on_hover(&mut self, callback: js_sys::Function) {
        self.inner.on_hover(move |update| {
            let result = callback.call3(
                &JsValue::NULL,
                &JsValue::from_f64(update.x),
                &JsValue::from_f64(update.y),
                &JsValue::from_f64(update.time.as_millis()),
            );
            report_callback_error("hover", result);
        });
    }
}

/// Log an exception thrown by a JS callback. Returns whether one was thrown.
fn report_callback_error<T, E: std::fmt::Debug>(callback: &str, result: Result<T, E>) -> bool {
    match result {
        Ok(_) => false,
        Err(err) => {
            tracing::warn!(callback, error = ?err, "JS callback threw");
            true
        }
    }
}

fn event_kind(dom_event: &str) -> Option<EventKind> {
    match dom_event {
        "mousedown" | "pointerdown" => Some(EventKind::PointerDown),
        "mousemove" | "pointermove" => Some(EventKind::PointerMove),
        "mouseup" | "pointerup" => Some(EventKind::PointerUp),
        "wheel" => Some(EventKind::Wheel),
        "dblclick" => Some(EventKind::DoubleClick),
        "resize" | "zoom" => Some(EventKind::Resize),
        _ => None,
    }
}
