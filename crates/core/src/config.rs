use std::time::Duration;

use nowline_protocol::{TextAlign, TextFont, ThemeToken};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("scale must be a positive, finite number of pixels per millisecond (got {0})")]
    InvalidScale(f64),
    #[error("tick label interval must be a positive, finite number of milliseconds (got {0})")]
    InvalidLabelInterval(f64),
    #[error("repaint interval must be at least 1ms")]
    ZeroRepaintInterval,
    #[error("{name} gain must be finite (got {value})")]
    InvalidGain { name: &'static str, value: f64 },
    #[error("invalid timeline options: {0}")]
    Json(String),
}

/// Vertical guide line, fixed in screen space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceLineConfig {
    pub color: ThemeToken,
    /// Distance from the left edge in pixels.
    pub position: f64,
    pub width: f64,
}

impl Default for ReferenceLineConfig {
    fn default() -> Self {
        Self {
            color: ThemeToken::ReferenceLine,
            position: 80.0,
            width: 4.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickLabelConfig {
    pub color: ThemeToken,
    /// Distance from the left edge in pixels.
    pub position: f64,
    /// Milliseconds between labels. Labels sit on multiples of this value.
    pub interval: f64,
    pub font: TextFont,
    pub align: TextAlign,
}

impl Default for TickLabelConfig {
    fn default() -> Self {
        Self {
            color: ThemeToken::TickLabel,
            position: 5.0,
            interval: 1000.0,
            font: TextFont::default(),
            align: TextAlign::Left,
        }
    }
}

/// The horizontal "now" and anchor lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    /// Markers run from this x to the right edge.
    pub start_x: f64,
    pub width: f64,
    pub now_color: ThemeToken,
    pub anchor_color: ThemeToken,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            start_x: 100.0,
            width: 1.0,
            now_color: ThemeToken::NowMarker,
            anchor_color: ThemeToken::AnchorMarker,
        }
    }
}

/// Widget options. Every field is optional when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub line: ReferenceLineConfig,
    pub labels: TickLabelConfig,
    pub markers: MarkerConfig,
    /// Pixels per elapsed millisecond. `0.05` draws one second as 50px.
    pub scale: f64,
    /// Milliseconds between repaints.
    pub repaint_interval_ms: u64,
    /// Pixels panned per unit of wheel delta (applied with inverted sign).
    pub wheel_gain: f64,
    /// Pixels panned per pixel of pointer travel while dragging.
    pub drag_gain: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            line: ReferenceLineConfig::default(),
            labels: TickLabelConfig::default(),
            markers: MarkerConfig::default(),
            scale: 0.05,
            repaint_interval_ms: 25,
            wheel_gain: 10.0,
            drag_gain: 1.0,
        }
    }
}

impl TimelineConfig {
    /// Parse options from JSON, filling omitted fields with defaults, and
    /// validate them.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would divide by zero or never terminate the label
    /// loop.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(ConfigError::InvalidScale(self.scale));
        }
        let interval = self.labels.interval;
        if !(interval.is_finite() && interval > 0.0) {
            return Err(ConfigError::InvalidLabelInterval(interval));
        }
        if self.repaint_interval_ms == 0 {
            return Err(ConfigError::ZeroRepaintInterval);
        }
        for (name, value) in [("wheel", self.wheel_gain), ("drag", self.drag_gain)] {
            if !value.is_finite() {
                return Err(ConfigError::InvalidGain { name, value });
            }
        }
        Ok(())
    }

    pub fn repaint_interval(&self) -> Duration {
        Duration::from_millis(self.repaint_interval_ms)
    }
}
