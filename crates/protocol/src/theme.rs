use serde::{Deserialize, Serialize};

/// Semantic color tokens resolved by the surface's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    Background,

    ReferenceLine,
    TickLabel,

    NowMarker,
    AnchorMarker,

    // Host chrome
    StatusText,
    HoverText,
}
