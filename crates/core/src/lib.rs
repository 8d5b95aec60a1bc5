//! Core of the nowline scrolling timeline.
//!
//! The widget maps wall-clock time onto a vertical pixel axis, lets the user
//! pan and freeze that axis with pointer input, and repaints on a fixed
//! cadence. Drawing, input delivery and the clock are injected through the
//! traits in [`host`] and [`time`], so everything here runs without a window.

pub mod config;
pub mod host;
pub mod interaction;
pub mod mapper;
pub mod paint;
pub mod schedule;
pub mod svg;
pub mod ticks;
pub mod time;
pub mod timeline;
pub mod view_state;

pub use config::{ConfigError, TimelineConfig};
pub use host::{EventKind, InputSource, ListenerId, ListenerRegistry, RecordingSurface, Surface};
pub use interaction::{DragSession, HoverUpdate, InputEvent, InteractionController};
pub use mapper::CoordinateMapper;
pub use schedule::RepaintSchedule;
pub use svg::{SvgSurface, render_svg};
pub use time::{Clock, ManualClock, SystemClock, Timestamp};
pub use timeline::Timeline;
pub use view_state::ViewState;
