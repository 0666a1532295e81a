use crate::foundation::{
    core::CanvasOptions,
    error::{TifoError, TifoResult},
};

/// A named export target. `width`/`height` are logical (72-DPI) pixels; the
/// DPI field scales the backing buffer for print targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CanvasPreset {
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
    pub dpi: u32,
}

impl CanvasPreset {
    pub fn canvas_options(self) -> CanvasOptions {
        CanvasOptions {
            width: self.width,
            height: self.height,
            dpi: self.dpi,
        }
    }
}

pub const INSTAGRAM_POST: CanvasPreset = CanvasPreset {
    name: "instagram-post",
    width: 1080,
    height: 1080,
    dpi: 72,
};

pub const INSTAGRAM_STORY: CanvasPreset = CanvasPreset {
    name: "instagram-story",
    width: 1080,
    height: 1920,
    dpi: 72,
};

pub const FACEBOOK_POST: CanvasPreset = CanvasPreset {
    name: "facebook-post",
    width: 1200,
    height: 630,
    dpi: 72,
};

pub const A4_PRINT_72: CanvasPreset = CanvasPreset {
    name: "a4-print-72",
    width: 595,
    height: 842,
    dpi: 72,
};

pub const A4_PRINT_150: CanvasPreset = CanvasPreset {
    name: "a4-print-150",
    width: 595,
    height: 842,
    dpi: 150,
};

pub const A4_PRINT_300: CanvasPreset = CanvasPreset {
    name: "a4-print-300",
    width: 595,
    height: 842,
    dpi: 300,
};

pub const A5_PRINT_300: CanvasPreset = CanvasPreset {
    name: "a5-print-300",
    width: 420,
    height: 595,
    dpi: 300,
};

pub const BUSINESS_CARD_300: CanvasPreset = CanvasPreset {
    name: "business-card-300",
    width: 241,
    height: 156,
    dpi: 300,
};

pub const PRESETS: &[CanvasPreset] = &[
    INSTAGRAM_POST,
    INSTAGRAM_STORY,
    FACEBOOK_POST,
    A4_PRINT_72,
    A4_PRINT_150,
    A4_PRINT_300,
    A5_PRINT_300,
    BUSINESS_CARD_300,
];

pub fn preset_by_name(name: &str) -> TifoResult<CanvasPreset> {
    PRESETS
        .iter()
        .copied()
        .find(|p| p.name == name)
        .ok_or_else(|| TifoError::catalog(format!("no canvas preset named '{name}'")))
}

/// Physical size to pixels: millimeters to inches to pixels at `dpi`.
pub fn mm_to_px(mm: f64, dpi: u32) -> f64 {
    mm / 25.4 * f64::from(dpi)
}
