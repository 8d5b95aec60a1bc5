//! SVG export: turns a frame of `RenderCommand`s into a standalone document.

use nowline_protocol::{RenderCommand, Size, TextAlign, ThemeToken};

use crate::host::Surface;

/// Render one frame as an SVG document string.
///
/// `size` sets the viewBox; `dark` selects the palette.
pub fn render_svg(commands: &[RenderCommand], size: Size, dark: bool) -> String {
    let Size { width, height } = size;
    let mut svg = String::with_capacity(commands.len() * 120 + 256);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}">"#,
    ));

    for cmd in commands {
        match cmd {
            RenderCommand::ClearRect { rect, color } => {
                let fill = resolve_color(*color, dark);
                svg.push_str(&format!(
                    r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{fill}"/>"#,
                    rect.x, rect.y, rect.w, rect.h,
                ));
            }
            RenderCommand::DrawLine {
                from,
                to,
                color,
                width: line_width,
            } => {
                let stroke = resolve_color(*color, dark);
                svg.push_str(&format!(
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{stroke}" stroke-width="{line_width}"/>"#,
                    from.x, from.y, to.x, to.y,
                ));
            }
            RenderCommand::DrawText {
                position,
                text,
                color,
                font,
                align,
            } => {
                let fill = resolve_color(*color, dark);
                let anchor = match align {
                    TextAlign::Left => "start",
                    TextAlign::Center => "middle",
                    TextAlign::Right => "end",
                };
                svg.push_str(&format!(
                    r#"<text x="{}" y="{}" fill="{fill}" text-anchor="{anchor}" style="font:{}">{}</text>"#,
                    position.x,
                    position.y,
                    escape_xml(&font.css()),
                    escape_xml(text),
                ));
            }
        }
    }

    svg.push_str("</svg>");
    svg
}

fn resolve_color(token: ThemeToken, dark: bool) -> &'static str {
    if dark {
        match token {
            ThemeToken::Background => "#181818",
            ThemeToken::ReferenceLine => "#616161",
            ThemeToken::TickLabel | ThemeToken::StatusText | ThemeToken::HoverText => "#ececec",
            ThemeToken::NowMarker => "#ffd600",
            ThemeToken::AnchorMarker => "#448aff",
        }
    } else {
        match token {
            ThemeToken::Background => "#ffffff",
            ThemeToken::ReferenceLine => "gray",
            ThemeToken::TickLabel | ThemeToken::StatusText | ThemeToken::HoverText => "black",
            ThemeToken::NowMarker => "black",
            ThemeToken::AnchorMarker => "blue",
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// A surface that keeps the latest frame as SVG.
#[derive(Debug, Clone, Default)]
pub struct SvgSurface {
    size: Size,
    dark: bool,
    document: String,
}

impl SvgSurface {
    pub fn new(size: Size, dark: bool) -> Self {
        Self {
            size,
            dark,
            document: String::new(),
        }
    }

    /// The most recent frame, or an empty string before the first paint.
    pub fn document(&self) -> &str {
        &self.document
    }
}

impl Surface for SvgSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn resize(&mut self, size: Size) {
        self.size = size;
    }

    fn draw(&mut self, commands: &[RenderCommand]) {
        self.document = render_svg(commands, self.size, self.dark);
    }
}
