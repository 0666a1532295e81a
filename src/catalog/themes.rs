use crate::foundation::{
    color::Rgba8,
    error::{TifoError, TifoResult},
};

/// Immutable named color palette. Themes never change after construction;
/// paint elements copy the colors they need.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorTheme {
    pub name: &'static str,
    /// Primary brand blue; also the gradient-fallback start color.
    pub blue: Rgba8,
    /// Lighter companion blue; gradient-fallback end color.
    pub blue_light: Rgba8,
    pub beige: Rgba8,
    /// Near-black text color.
    pub ink: Rgba8,
    /// Near-white surface/text color.
    pub paper: Rgba8,
    pub accent: Rgba8,
}

pub const THEMES: &[ColorTheme] = &[
    ColorTheme {
        name: "royal",
        blue: Rgba8::rgb(0x1d, 0x4e, 0xd8),
        blue_light: Rgba8::rgb(0x60, 0xa5, 0xfa),
        beige: Rgba8::rgb(0xef, 0xe6, 0xd8),
        ink: Rgba8::rgb(0x11, 0x18, 0x27),
        paper: Rgba8::rgb(0xfa, 0xf7, 0xf2),
        accent: Rgba8::rgb(0xf5, 0x9e, 0x0b),
    },
    ColorTheme {
        name: "midnight",
        blue: Rgba8::rgb(0x1e, 0x29, 0x5b),
        blue_light: Rgba8::rgb(0x3b, 0x52, 0xa3),
        beige: Rgba8::rgb(0xe7, 0xdf, 0xd3),
        ink: Rgba8::rgb(0x0b, 0x10, 0x21),
        paper: Rgba8::rgb(0xf4, 0xf4, 0xf6),
        accent: Rgba8::rgb(0xd9, 0x48, 0x3b),
    },
    ColorTheme {
        name: "coast",
        blue: Rgba8::rgb(0x0e, 0x74, 0x90),
        blue_light: Rgba8::rgb(0x67, 0xb7, 0xd1),
        beige: Rgba8::rgb(0xf2, 0xea, 0xdc),
        ink: Rgba8::rgb(0x17, 0x25, 0x2b),
        paper: Rgba8::rgb(0xfb, 0xf9, 0xf4),
        accent: Rgba8::rgb(0x2a, 0x9d, 0x8f),
    },
];

/// Look up a theme by name. A miss is a hard configuration error: callers
/// asked for something the catalog does not ship.
pub fn theme_by_name(name: &str) -> TifoResult<&'static ColorTheme> {
    THEMES
        .iter()
        .find(|t| t.name == name)
        .ok_or_else(|| TifoError::catalog(format!("no theme named '{name}'")))
}
