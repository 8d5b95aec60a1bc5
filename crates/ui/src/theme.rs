use nowline_protocol::ThemeToken;

/// Resolved RGBA color for egui rendering.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ResolvedColor {
    const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn to_color32(self) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(self.r, self.g, self.b, self.a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    pub fn visuals(self) -> egui::Visuals {
        match self {
            ThemeMode::Dark => egui::Visuals::dark(),
            ThemeMode::Light => egui::Visuals::light(),
        }
    }
}

pub fn resolve(token: ThemeToken, mode: ThemeMode) -> egui::Color32 {
    match mode {
        ThemeMode::Dark => resolve_dark(token),
        ThemeMode::Light => resolve_light(token),
    }
    .to_color32()
}

fn resolve_dark(token: ThemeToken) -> ResolvedColor {
    // Catppuccin Mocha palette
    use ThemeToken::*;
    match token {
        Background => ResolvedColor::rgb(0x11, 0x11, 0x1b), // Crust
        ReferenceLine => ResolvedColor::rgb(0x6c, 0x70, 0x86), // Overlay0
        TickLabel => ResolvedColor::rgb(0xcd, 0xd6, 0xf4),  // Text
        NowMarker => ResolvedColor::rgb(0xf9, 0xe2, 0xaf),  // Yellow
        AnchorMarker => ResolvedColor::rgb(0x89, 0xb4, 0xfa), // Blue
        StatusText => ResolvedColor::rgb(0xba, 0xc2, 0xde), // Subtext1
        HoverText => ResolvedColor::rgb(0xa6, 0xe3, 0xa1),  // Green
    }
}

fn resolve_light(token: ThemeToken) -> ResolvedColor {
    use ThemeToken::*;
    match token {
        Background => ResolvedColor::rgb(255, 255, 255),
        ReferenceLine => ResolvedColor::rgb(128, 128, 128),
        TickLabel => ResolvedColor::rgb(0, 0, 0),
        NowMarker => ResolvedColor::rgb(0, 0, 0),
        AnchorMarker => ResolvedColor::rgb(0, 0, 255),
        StatusText => ResolvedColor::rgb(80, 80, 100),
        HoverText => ResolvedColor::rgb(56, 142, 60),
    }
}
