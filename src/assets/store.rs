use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use crate::{
    assets::decode as assets_decode,
    foundation::error::{TifoError, TifoResult},
};

#[derive(Clone, Debug)]
/// Prepared raster image in premultiplied RGBA8 form.
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

#[derive(Clone, Debug)]
/// Prepared SVG asset represented as a parsed `usvg` tree.
pub struct PreparedSvg {
    /// Parsed SVG tree.
    pub tree: Arc<usvg::Tree>,
}

/// A visual asset ready for drawing: either raster pixels or a vector tree.
#[derive(Clone, Debug)]
pub enum PreparedVisual {
    Raster(PreparedImage),
    Vector(PreparedSvg),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub struct TextBrushRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Normalize a relative asset path: forward slashes, no `..`, no absolute
/// components. Keeps asset references portable between the site and the CLI.
pub fn normalize_rel_path(rel: &str) -> TifoResult<String> {
    let rel = rel.trim();
    if rel.is_empty() {
        return Err(TifoError::validation("asset path must be non-empty"));
    }
    if rel.starts_with('/') || rel.starts_with('\\') || rel.contains(':') {
        return Err(TifoError::validation(format!(
            "asset path must be relative: '{rel}'"
        )));
    }

    let mut parts = Vec::new();
    for part in rel.split(['/', '\\']) {
        match part {
            "" | "." => {}
            ".." => {
                return Err(TifoError::validation(format!(
                    "asset path must not escape the assets root: '{rel}'"
                )));
            }
            p => parts.push(p),
        }
    }
    if parts.is_empty() {
        return Err(TifoError::validation(format!("asset path is empty: '{rel}'")));
    }
    Ok(parts.join("/"))
}

/// Front-loaded asset IO plus per-source caches.
///
/// Renderers never touch the filesystem: every image, SVG, and font byte blob
/// flows through this store, which resolves sources against a root directory
/// (or in-memory registrations) and caches the prepared result. Load or
/// decode failures surface as `Err`; converting that into the gradient
/// fallback is the renderer's call, not the store's.
pub struct AssetStore {
    root: PathBuf,
    inline: HashMap<String, Arc<Vec<u8>>>,
    images: HashMap<String, PreparedImage>,
    svgs: HashMap<String, PreparedSvg>,
    fonts: HashMap<String, Arc<Vec<u8>>>,
    text_engine: TextLayoutEngine,
}

impl AssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            inline: HashMap::new(),
            images: HashMap::new(),
            svgs: HashMap::new(),
            fonts: HashMap::new(),
            text_engine: TextLayoutEngine::new(),
        }
    }

    /// Register raw bytes under a source name, shadowing the filesystem.
    /// Server flows hand decoded uploads straight to the store this way.
    pub fn insert_bytes(&mut self, source: impl Into<String>, bytes: Vec<u8>) {
        self.inline.insert(source.into(), Arc::new(bytes));
    }

    fn read_bytes(&self, source: &str) -> TifoResult<Arc<Vec<u8>>> {
        if let Some(bytes) = self.inline.get(source) {
            return Ok(bytes.clone());
        }
        let norm = normalize_rel_path(source)?;
        let p = self.root.join(Path::new(&norm));
        let bytes = std::fs::read(&p)
            .with_context(|| format!("read asset '{}'", p.display()))?;
        Ok(Arc::new(bytes))
    }

    /// Prepared raster image for `source`, decoding and caching on first use.
    pub fn image(&mut self, source: &str) -> TifoResult<PreparedImage> {
        if let Some(img) = self.images.get(source) {
            return Ok(img.clone());
        }
        let bytes = self.read_bytes(source)?;
        let prepared = assets_decode::decode_image(&bytes)?;
        self.images.insert(source.to_string(), prepared.clone());
        Ok(prepared)
    }

    /// Prepared SVG tree for `source`, parsing and caching on first use.
    pub fn svg(&mut self, source: &str) -> TifoResult<PreparedSvg> {
        if let Some(svg) = self.svgs.get(source) {
            return Ok(svg.clone());
        }
        let bytes = self.read_bytes(source)?;
        let prepared = assets_decode::parse_svg(&bytes)?;
        self.svgs.insert(source.to_string(), prepared.clone());
        Ok(prepared)
    }

    /// Raster or vector visual, dispatched on the source extension.
    pub fn visual(&mut self, source: &str) -> TifoResult<PreparedVisual> {
        let is_svg = source
            .rsplit('.')
            .next()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
        if is_svg {
            Ok(PreparedVisual::Vector(self.svg(source)?))
        } else {
            Ok(PreparedVisual::Raster(self.image(source)?))
        }
    }

    /// Raw font bytes for `source`, cached.
    pub fn font(&mut self, source: &str) -> TifoResult<Arc<Vec<u8>>> {
        if let Some(bytes) = self.fonts.get(source) {
            return Ok(bytes.clone());
        }
        let bytes = self.read_bytes(source)?;
        self.fonts.insert(source.to_string(), bytes.clone());
        Ok(bytes)
    }

    /// Shape and lay out text in the font at `font_source`.
    pub fn layout_text(
        &mut self,
        text: &str,
        font_source: &str,
        size_px: f32,
        brush: TextBrushRgba8,
        max_width_px: Option<f32>,
    ) -> TifoResult<(parley::Layout<TextBrushRgba8>, Arc<Vec<u8>>)> {
        let font_bytes = self.font(font_source)?;
        let layout =
            self.text_engine
                .layout_plain(text, &font_bytes, size_px, brush, max_width_px)?;
        Ok((layout, font_bytes))
    }
}

/// Parley shaping contexts bundled behind one call.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Shape and lay out plain text using provided font bytes and styling.
    pub fn layout_plain(
        &mut self,
        text: &str,
        font_bytes: &[u8],
        size_px: f32,
        brush: TextBrushRgba8,
        max_width_px: Option<f32>,
    ) -> TifoResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(TifoError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            TifoError::validation("no font families registered from font bytes")
        })?;

        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| TifoError::validation("registered font family has no name"))?
            .to_string();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        if let Some(w) = max_width_px {
            layout.break_all_lines(Some(w));
            layout.align(
                Some(w),
                parley::Alignment::Start,
                parley::AlignmentOptions::default(),
            );
        } else {
            layout.break_all_lines(None);
        }

        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes() -> Vec<u8> {
        let img = image::RgbaImage::from_raw(1, 1, vec![1u8, 2u8, 3u8, 255u8]).unwrap();
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn normalize_rejects_escapes_and_absolutes() {
        assert!(normalize_rel_path("/etc/passwd").is_err());
        assert!(normalize_rel_path("../up").is_err());
        assert!(normalize_rel_path("").is_err());
        assert_eq!(normalize_rel_path("./a//b.png").unwrap(), "a/b.png");
    }

    #[test]
    fn inline_bytes_shadow_disk() {
        let mut store = AssetStore::new(".");
        store.insert_bytes("hero.png", png_bytes());
        let img = store.image("hero.png").unwrap();
        assert_eq!((img.width, img.height), (1, 1));
    }

    #[test]
    fn image_cache_returns_same_pixels() {
        let mut store = AssetStore::new(".");
        store.insert_bytes("hero.png", png_bytes());
        let a = store.image("hero.png").unwrap();
        let b = store.image("hero.png").unwrap();
        assert!(Arc::ptr_eq(&a.rgba8_premul, &b.rgba8_premul));
    }

    #[test]
    fn missing_source_is_an_error() {
        let mut store = AssetStore::new("definitely/not/here");
        assert!(store.image("nope.png").is_err());
    }

    #[test]
    fn visual_dispatches_on_extension() {
        let mut store = AssetStore::new(".");
        store.insert_bytes(
            "crest.svg",
            br##"<svg xmlns="http://www.w3.org/2000/svg" width="8" height="8"/>"##.to_vec(),
        );
        match store.visual("crest.svg").unwrap() {
            PreparedVisual::Vector(_) => {}
            PreparedVisual::Raster(_) => panic!("expected vector"),
        }
    }
}
