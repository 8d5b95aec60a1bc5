use serde::{Deserialize, Serialize};

use crate::theme::ThemeToken;
use crate::types::{Point, Rect};

/// A single, stateless render instruction.
///
/// The timeline emits one `Vec<RenderCommand>` per repaint. Surfaces consume
/// the list sequentially; each command carries all the data it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Clear a region back to the background colour.
    ClearRect { rect: Rect, color: ThemeToken },

    /// Stroke a line segment.
    DrawLine {
        from: Point,
        to: Point,
        color: ThemeToken,
        width: f64,
    },

    /// Fill a text string. `position.y` is the text baseline.
    DrawText {
        position: Point,
        text: String,
        color: ThemeToken,
        font: TextFont,
        align: TextAlign,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontFamily {
    Monospace,
    Proportional,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextFont {
    pub size: f64,
    pub family: FontFamily,
}

impl TextFont {
    pub fn monospace(size: f64) -> Self {
        Self {
            size,
            family: FontFamily::Monospace,
        }
    }

    /// CSS shorthand, e.g. `12px monospace`.
    pub fn css(&self) -> String {
        let family = match self.family {
            FontFamily::Monospace => "'Courier New', monospace",
            FontFamily::Proportional => "sans-serif",
        };
        format!("{}px {family}", self.size)
    }
}

impl Default for TextFont {
    fn default() -> Self {
        Self::monospace(12.0)
    }
}
