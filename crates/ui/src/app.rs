use std::cell::Cell;
use std::rc::Rc;

use eframe::egui;
use nowline_core::host::{EventKind, ListenerRegistry, RecordingSurface, Surface};
use nowline_core::ticks::format_label;
use nowline_core::{ConfigError, HoverUpdate, InputEvent, SystemClock, Timeline, TimelineConfig};
use nowline_protocol::{Size, ThemeToken};
use web_time::Instant;

use crate::renderer;
use crate::theme::{self, ThemeMode};

/// Pixels per wheel "line" when the platform reports line deltas.
const WHEEL_LINE_PX: f32 = 40.0;

/// Main application state.
pub struct NowlineApp {
    timeline: Timeline<RecordingSurface, ListenerRegistry, SystemClock>,
    theme_mode: ThemeMode,
    /// Last hover position reported by the timeline.
    hover: Rc<Cell<Option<HoverUpdate>>>,
}

impl NowlineApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Result<Self, ConfigError> {
        let theme_mode = ThemeMode::Light;
        cc.egui_ctx.set_visuals(theme_mode.visuals());

        let mut timeline = Timeline::new(
            TimelineConfig::default(),
            RecordingSurface::default(),
            ListenerRegistry::new(),
            SystemClock,
        )?;

        let hover = Rc::new(Cell::new(None));
        let sink = Rc::clone(&hover);
        timeline.on_hover(move |update| sink.set(Some(update)));

        tracing::info!("nowline ui started");
        Ok(Self {
            timeline,
            theme_mode,
            hover,
        })
    }

    /// Forward an event if the timeline listens for its kind.
    fn forward(&mut self, kind: EventKind, event: InputEvent) {
        if self.timeline.input_source().is_listening(kind) {
            self.timeline.dispatch(event);
        }
    }

    fn handle_input(&mut self, ui: &egui::Ui, response: &egui::Response, area: egui::Rect) {
        let local = |pos: egui::Pos2| ((pos.x - area.left()) as f64, (pos.y - area.top()) as f64);
        let events = ui.input(|i| i.events.clone());

        for event in events {
            match event {
                egui::Event::PointerButton {
                    pos,
                    button: egui::PointerButton::Primary,
                    pressed,
                    ..
                } => {
                    if pressed {
                        let (x, y) = local(pos);
                        self.forward(EventKind::PointerDown, InputEvent::PointerDown { x, y });
                    } else {
                        self.forward(EventKind::PointerUp, InputEvent::PointerUp);
                    }
                }
                egui::Event::PointerMoved(pos) => {
                    let (x, y) = local(pos);
                    self.forward(EventKind::PointerMove, InputEvent::PointerMove { x, y });
                }
                egui::Event::MouseWheel { unit, delta, .. } if response.hovered() => {
                    // egui reports scroll-up as positive; the timeline expects
                    // DOM-style deltas where scrolling down is positive.
                    let delta_y = match unit {
                        egui::MouseWheelUnit::Point => -delta.y,
                        egui::MouseWheelUnit::Line => -delta.y * WHEEL_LINE_PX,
                        egui::MouseWheelUnit::Page => -delta.y * area.height(),
                    };
                    self.forward(
                        EventKind::Wheel,
                        InputEvent::Wheel {
                            delta_y: delta_y as f64,
                        },
                    );
                }
                _ => {}
            }
        }

        if response.double_clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let (x, y) = local(pos);
                self.forward(EventKind::DoubleClick, InputEvent::DoubleClick { x, y });
            }
        }
    }
}

impl eframe::App for NowlineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("nowline");
                ui.separator();

                let running = self.timeline.is_running();
                if ui.button(if running { "⏸ Halt" } else { "▶ Proceed" }).clicked() {
                    if running {
                        self.timeline.halt();
                    } else {
                        self.timeline.proceed();
                    }
                }

                let theme_label = match self.theme_mode {
                    ThemeMode::Dark => "🌙 Dark",
                    ThemeMode::Light => "☀ Light",
                };
                if ui.button(theme_label).clicked() {
                    self.theme_mode = self.theme_mode.toggled();
                    ctx.set_visuals(self.theme_mode.visuals());
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if self.timeline.view_state().is_frozen() {
                        ui.label("❄ frozen, double-click to follow");
                    }
                });
            });
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let state = self.timeline.view_state();
                let status_color = theme::resolve(ThemeToken::StatusText, self.theme_mode);
                ui.colored_label(
                    status_color,
                    format!(
                        "Display {} | Offset {:.0}px",
                        format_label(state.display_time()),
                        state.pixel_offset()
                    ),
                );
                if let Some(hover) = self.hover.get() {
                    ui.separator();
                    ui.colored_label(
                        theme::resolve(ThemeToken::HoverText, self.theme_mode),
                        format!("Pointer {} @ {:.0}px", format_label(hover.time), hover.y),
                    );
                }
            });
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let available = ui.available_size();
                let (response, painter) = ui.allocate_painter(available, egui::Sense::click_and_drag());
                let area = response.rect;

                let size = Size::new(area.width() as f64, area.height() as f64);
                if self.timeline.surface().size() != size {
                    self.forward(EventKind::Resize, InputEvent::Resize(size));
                }

                self.handle_input(ui, &response, area);
                self.timeline.poll(Instant::now());

                renderer::render_commands(
                    &painter,
                    self.timeline.surface().frame(),
                    area.min,
                    self.theme_mode,
                );
            });

        if self.timeline.is_running() {
            ctx.request_repaint_after(self.timeline.config().repaint_interval());
        }
    }
}
