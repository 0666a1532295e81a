use crate::{
    catalog::themes::ColorTheme,
    composition::{
        element::{
            FillStyle, ImageFit, ImageSpec, OverlayAnchor, OverlayLine, OverlaySpec,
            PaintElement, PaintKind, PatternSpec, PhotoSpec, TextAlign, TextCase, TextSpec,
        },
        model::{Block, Floater},
    },
    foundation::{color::Rgba8, core::Vec2},
};

/// Brand font sources, relative to the assets root.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FontSet {
    pub headline: String,
    pub body: String,
}

impl Default for FontSet {
    fn default() -> Self {
        Self {
            headline: "fonts/headline.ttf".to_string(),
            body: "fonts/body.ttf".to_string(),
        }
    }
}

/// Full-canvas photo background with a brand tint wash.
pub fn background_photo(source: impl Into<String>, layer: u32, theme: &ColorTheme) -> Floater {
    Floater::full_canvas().element(PaintElement::new(
        layer,
        PaintKind::Photo(PhotoSpec {
            source: source.into(),
            tint: Some(theme.blue.with_alpha(0.35)),
        }),
    ))
}

/// Full-canvas gradient background, the photo-less variant.
pub fn background_gradient(layer: u32, theme: &ColorTheme) -> Floater {
    Floater::full_canvas().element(PaintElement::new(
        layer,
        PaintKind::Fill(FillStyle::LinearGradient {
            from: theme.blue,
            to: theme.blue_light,
        }),
    ))
}

/// Solid color panel bound to a grid area.
pub fn fill_block(area: impl Into<String>, color: Rgba8, layer: u32) -> Block {
    Block::new(area).element(PaintElement::new(
        layer,
        PaintKind::Fill(FillStyle::Solid(color)),
    ))
}

/// Brand gradient panel bound to a grid area.
pub fn gradient_block(area: impl Into<String>, layer: u32, theme: &ColorTheme) -> Block {
    Block::new(area).element(PaintElement::new(
        layer,
        PaintKind::Fill(FillStyle::LinearGradient {
            from: theme.blue,
            to: theme.blue_light,
        }),
    ))
}

/// Hero photo panel clipped to its grid area.
pub fn hero_photo_block(area: impl Into<String>, source: impl Into<String>, layer: u32) -> Block {
    Block::new(area).element(PaintElement::new(
        layer,
        PaintKind::Photo(PhotoSpec {
            source: source.into(),
            tint: None,
        }),
    ))
}

/// Crest/logo slot; `with_plate` puts a quiet backing panel under the mark.
pub fn logo_block(
    area: impl Into<String>,
    source: impl Into<String>,
    layer: u32,
    theme: &ColorTheme,
    with_plate: bool,
) -> Block {
    let mut block = Block::new(area).padding(10.0);
    if with_plate {
        block = block.element(PaintElement::new(
            layer,
            PaintKind::Fill(FillStyle::Solid(theme.paper)),
        ));
    }
    block.element(PaintElement::new(
        layer,
        PaintKind::Image(ImageSpec {
            source: source.into(),
            fit: ImageFit::Contain,
            size_frac: 0.8,
            offset: Vec2::ZERO,
        }),
    ))
}

/// Repeating uppercase watermark tiled across the whole canvas.
pub fn watermark_pattern(
    text: impl Into<String>,
    layer: u32,
    theme: &ColorTheme,
    fonts: &FontSet,
) -> Floater {
    Floater::full_canvas().element(PaintElement::new(
        layer,
        PaintKind::Pattern(PatternSpec {
            text: TextCase::Upper.apply(&text.into()),
            font: fonts.headline.clone(),
            size_px: 28.0,
            color: theme.paper.with_alpha(0.12),
            gap_px: 48.0,
            stagger: true,
        }),
    ))
}

/// Uppercase section headline centered in its area.
pub fn headline_block(
    area: impl Into<String>,
    text: impl Into<String>,
    layer: u32,
    theme: &ColorTheme,
    fonts: &FontSet,
) -> Block {
    Block::new(area).padding(16.0).element(PaintElement::new(
        layer,
        PaintKind::Text(TextSpec {
            text: text.into(),
            font: fonts.headline.clone(),
            size_px: 64.0,
            color: theme.ink,
            align: TextAlign::Center,
            vertical: false,
            case: TextCase::Upper,
        }),
    ))
}

/// Rotated label for narrow side panels.
pub fn vertical_label_block(
    area: impl Into<String>,
    text: impl Into<String>,
    layer: u32,
    theme: &ColorTheme,
    fonts: &FontSet,
) -> Block {
    Block::new(area).padding(8.0).element(PaintElement::new(
        layer,
        PaintKind::Text(TextSpec {
            text: text.into(),
            font: fonts.headline.clone(),
            size_px: 40.0,
            color: theme.paper,
            align: TextAlign::Center,
            vertical: true,
            case: TextCase::Upper,
        }),
    ))
}

/// Multi-line overlay anchored in its area.
pub fn overlay_block(
    area: impl Into<String>,
    lines: Vec<OverlayLine>,
    anchor: OverlayAnchor,
    layer: u32,
) -> Block {
    Block::new(area).padding(20.0).element(PaintElement::new(
        layer,
        PaintKind::Overlay(OverlaySpec {
            lines,
            anchor,
            gap_px: 10.0,
        }),
    ))
}

/// One overlay line in the headline font.
pub fn headline_line(
    text: impl Into<String>,
    size_px: f32,
    color: Rgba8,
    fonts: &FontSet,
) -> OverlayLine {
    OverlayLine {
        text: text.into(),
        font: fonts.headline.clone(),
        size_px,
        color,
        case: TextCase::Upper,
    }
}

/// One overlay line in the body font.
pub fn body_line(
    text: impl Into<String>,
    size_px: f32,
    color: Rgba8,
    fonts: &FontSet,
) -> OverlayLine {
    OverlayLine {
        text: text.into(),
        font: fonts.body.clone(),
        size_px,
        color,
        case: TextCase::None,
    }
}
