use crate::foundation::{color::Rgba8, core::Vec2};

/// One paint operation, tagged with the compositing layer it belongs to.
///
/// Layers are plain integers; everything sharing a layer number paints in
/// one pass, ascending across layers.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PaintElement {
    pub layer: u32,
    pub kind: PaintKind,
}

impl PaintElement {
    pub fn new(layer: u32, kind: PaintKind) -> Self {
        Self { layer, kind }
    }
}

/// Closed set of paint operations. Backends dispatch on the variant; adding
/// a backend means one new dispatch function, not a trait object per element.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum PaintKind {
    /// Solid or gradient background fill covering the bounds.
    Fill(FillStyle),
    /// Cover-fit photograph with an optional tint wash on top.
    Photo(PhotoSpec),
    /// Single- or multi-line styled text.
    Text(TextSpec),
    /// Contained/cover-fit image (logos, crests) with size and offset control.
    Image(ImageSpec),
    /// Repeating text tiled across the bounds (watermarks).
    Pattern(PatternSpec),
    /// Composed text block anchored within the bounds.
    Overlay(OverlaySpec),
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum FillStyle {
    Solid(Rgba8),
    /// Vertical two-stop linear gradient, top to bottom.
    LinearGradient { from: Rgba8, to: Rgba8 },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PhotoSpec {
    /// Asset source, relative to the assets root.
    pub source: String,
    /// Tint color painted over the photo; alpha carries the wash strength.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tint: Option<Rgba8>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextCase {
    #[default]
    None,
    Upper,
    Lower,
    Capitalize,
}

impl TextCase {
    pub fn apply(self, text: &str) -> String {
        match self {
            TextCase::None => text.to_string(),
            TextCase::Upper => text.to_uppercase(),
            TextCase::Lower => text.to_lowercase(),
            TextCase::Capitalize => text
                .split_inclusive(char::is_whitespace)
                .map(|word| {
                    let mut chars = word.chars();
                    match chars.next() {
                        Some(first) => {
                            first.to_uppercase().collect::<String>() + chars.as_str()
                        }
                        None => String::new(),
                    }
                })
                .collect(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Start,
    Center,
    End,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextSpec {
    pub text: String,
    /// Font source, relative to the assets root.
    pub font: String,
    pub size_px: f32,
    pub color: Rgba8,
    #[serde(default)]
    pub align: TextAlign,
    /// Rotate the whole run 90 degrees clockwise and lay it out along the
    /// bounds' vertical axis.
    #[serde(default)]
    pub vertical: bool,
    #[serde(default)]
    pub case: TextCase,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFit {
    #[default]
    Contain,
    Cover,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImageSpec {
    pub source: String,
    #[serde(default)]
    pub fit: ImageFit,
    /// Fraction of the bounds the image occupies (1.0 = fill).
    #[serde(default = "default_size_frac")]
    pub size_frac: f64,
    /// Offset from the centered position, in logical pixels.
    #[serde(default)]
    pub offset: Vec2,
}

fn default_size_frac() -> f64 {
    1.0
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PatternSpec {
    pub text: String,
    pub font: String,
    pub size_px: f32,
    pub color: Rgba8,
    /// Horizontal and vertical spacing between tile origins.
    pub gap_px: f64,
    /// Shift every other row by half a tile.
    #[serde(default)]
    pub stagger: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlayAnchor {
    #[default]
    Center,
    TopLeft,
    BottomLeft,
    BottomRight,
}

/// One line inside an overlay block.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OverlayLine {
    pub text: String,
    pub font: String,
    pub size_px: f32,
    pub color: Rgba8,
    #[serde(default)]
    pub case: TextCase,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OverlaySpec {
    pub lines: Vec<OverlayLine>,
    #[serde(default)]
    pub anchor: OverlayAnchor,
    /// Vertical spacing between consecutive lines.
    #[serde(default)]
    pub gap_px: f64,
}
