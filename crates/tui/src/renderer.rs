use nowline_core::Surface;
use nowline_protocol::{RenderCommand, Size, TextAlign, ThemeToken};
use ratatui::{buffer::Buffer, layout::Rect, style::Color};

pub fn theme_to_color(token: ThemeToken) -> Color {
    match token {
        ThemeToken::Background => Color::Black,
        ThemeToken::ReferenceLine => Color::DarkGray,
        ThemeToken::TickLabel => Color::White,
        ThemeToken::NowMarker => Color::Yellow,
        ThemeToken::AnchorMarker => Color::LightBlue,
        ThemeToken::StatusText => Color::Gray,
        ThemeToken::HoverText => Color::Green,
    }
}

/// A surface whose pixels are terminal cells.
#[derive(Debug, Default)]
pub struct TerminalSurface {
    size: Size,
    frame: Vec<RenderCommand>,
}

impl TerminalSurface {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            frame: Vec::new(),
        }
    }

    /// Paint the latest frame into `area` of the buffer.
    pub fn render(&self, buf: &mut Buffer, area: Rect) {
        for cmd in &self.frame {
            match cmd {
                RenderCommand::ClearRect { color, .. } => {
                    let bg = theme_to_color(*color);
                    for y in area.top()..area.bottom() {
                        for x in area.left()..area.right() {
                            buf[(x, y)].set_char(' ').set_bg(bg);
                        }
                    }
                }
                RenderCommand::DrawLine {
                    from, to, color, ..
                } => {
                    let fg = theme_to_color(*color);
                    if from.x == to.x {
                        let Some(col) = cell(from.x, area.width) else {
                            continue;
                        };
                        let (top, bottom) = (from.y.min(to.y), from.y.max(to.y));
                        for row in 0..area.height {
                            let y = f64::from(row);
                            if y >= top && y < bottom {
                                buf[(area.x + col, area.y + row)].set_char('│').set_fg(fg);
                            }
                        }
                    } else {
                        let Some(row) = cell(from.y, area.height) else {
                            continue;
                        };
                        let (left, right) = (from.x.min(to.x), from.x.max(to.x));
                        for col in 0..area.width {
                            let x = f64::from(col);
                            if x >= left && x < right {
                                buf[(area.x + col, area.y + row)].set_char('─').set_fg(fg);
                            }
                        }
                    }
                }
                RenderCommand::DrawText {
                    position,
                    text,
                    color,
                    align,
                    ..
                } => {
                    // The baseline sits on the tick row; text occupies that row.
                    let Some(row) = cell(position.y, area.height) else {
                        continue;
                    };
                    let len = text.chars().count() as f64;
                    let start = match align {
                        TextAlign::Left => position.x,
                        TextAlign::Center => position.x - len / 2.0,
                        TextAlign::Right => position.x - len,
                    };
                    let fg = theme_to_color(*color);
                    for (i, ch) in text.chars().enumerate() {
                        if let Some(col) = cell(start + i as f64, area.width) {
                            buf[(area.x + col, area.y + row)].set_char(ch).set_fg(fg);
                        }
                    }
                }
            }
        }
    }
}

/// Cell index for a pixel coordinate, if it lands inside `0..limit`.
fn cell(px: f64, limit: u16) -> Option<u16> {
    let px = px.round();
    if px.is_finite() && px >= 0.0 && px < f64::from(limit) {
        Some(px as u16)
    } else {
        None
    }
}

impl Surface for TerminalSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn resize(&mut self, size: Size) {
        self.size = size;
    }

    fn draw(&mut self, commands: &[RenderCommand]) {
        self.frame.clear();
        self.frame.extend_from_slice(commands);
    }
}
