use egui::{Align2, FontId, Pos2, Rect, Stroke};
use nowline_protocol::{FontFamily, RenderCommand, TextAlign};

use crate::theme::{self, ThemeMode};

/// Replay a frame of `RenderCommand`s onto an egui `Painter`.
///
/// `origin` is the top-left pixel of the timeline area; commands are in
/// surface-local coordinates.
pub fn render_commands(
    painter: &egui::Painter,
    commands: &[RenderCommand],
    origin: Pos2,
    mode: ThemeMode,
) {
    let at = |x: f64, y: f64| Pos2::new(origin.x + x as f32, origin.y + y as f32);

    for cmd in commands {
        match cmd {
            RenderCommand::ClearRect { rect, color } => {
                let area = Rect::from_min_size(at(rect.x, rect.y), egui::vec2(rect.w as f32, rect.h as f32));
                painter.rect_filled(area, egui::CornerRadius::ZERO, theme::resolve(*color, mode));
            }

            RenderCommand::DrawLine {
                from,
                to,
                color,
                width,
            } => {
                let stroke = Stroke::new(*width as f32, theme::resolve(*color, mode));
                painter.line_segment([at(from.x, from.y), at(to.x, to.y)], stroke);
            }

            RenderCommand::DrawText {
                position,
                text,
                color,
                font,
                align,
            } => {
                let size = font.size as f32;
                if size < 1.0 {
                    continue;
                }
                // Canvas-style: `position.y` is the baseline.
                let anchor = match align {
                    TextAlign::Left => Align2::LEFT_BOTTOM,
                    TextAlign::Center => Align2::CENTER_BOTTOM,
                    TextAlign::Right => Align2::RIGHT_BOTTOM,
                };
                let font_id = match font.family {
                    FontFamily::Monospace => FontId::monospace(size),
                    FontFamily::Proportional => FontId::proportional(size),
                };
                painter.text(
                    at(position.x, position.y),
                    anchor,
                    text,
                    font_id,
                    theme::resolve(*color, mode),
                );
            }
        }
    }
}
