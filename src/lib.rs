//! Tifo is a layer-based composition engine for brand and social graphics.
//!
//! A graphic is described declaratively and rendered to pixels:
//!
//! 1. **Layout**: a grid-template mini-language names rectangular areas over
//!    a fixed canvas ([`GridResolver`])
//! 2. **Content**: [`Block`]s (bound to named areas) and [`Floater`]s (bound
//!    to explicit rectangles or the whole canvas) carry layer-tagged paint
//!    elements
//! 3. **Render**: the [`Compositor`] paints layers in ascending order onto a
//!    CPU pixel buffer
//! 4. **Export**: one PNG per layer, a composite, a grid visualization, and
//!    a pseudo-3D exploded view of the layer stack
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: identical inputs (template, theme,
//!   content, seed) paint identical pixels; all visual variety flows through
//!   an injected [`VarietyRng`].
//! - **No IO in renderers**: image and font bytes are front-loaded in the
//!   [`AssetStore`].
//! - **Premultiplied RGBA8** end-to-end; PNG export unpremultiplies.
#![forbid(unsafe_code)]

mod assets;
mod catalog;
mod composition;
mod content;
mod foundation;
mod layout;
mod render;

pub use assets::decode::{decode_image, parse_svg};
pub use assets::store::{
    AssetStore, PreparedImage, PreparedSvg, PreparedVisual, TextBrushRgba8, TextLayoutEngine,
    normalize_rel_path,
};
pub use assets::svg_raster::{rasterize_svg_to_premul_rgba8, svg_raster_size};
pub use catalog::layouts::{AreaRole, LAYOUTS, Layout, layout_by_name};
pub use catalog::presets::{
    A4_PRINT_72, A4_PRINT_150, A4_PRINT_300, A5_PRINT_300, BUSINESS_CARD_300, CanvasPreset,
    FACEBOOK_POST, INSTAGRAM_POST, INSTAGRAM_STORY, PRESETS, mm_to_px, preset_by_name,
};
pub use catalog::themes::{ColorTheme, THEMES, theme_by_name};
pub use composition::element::{
    FillStyle, ImageFit, ImageSpec, OverlayAnchor, OverlayLine, OverlaySpec, PaintElement,
    PaintKind, PatternSpec, PhotoSpec, TextAlign, TextCase, TextSpec,
};
pub use composition::model::{Block, Floater, LayerContent, split_by_layer};
pub use content::builders::{
    FontSet, background_gradient, background_photo, body_line, fill_block, gradient_block,
    headline_block, headline_line, hero_photo_block, logo_block, overlay_block,
    vertical_label_block, watermark_pattern,
};
pub use content::post::{
    MatchInfo, PlayerInfo, PostContent, PostSpec, TrainingInfo, compose_post,
};
pub use foundation::color::Rgba8;
pub use foundation::core::{
    Affine, BezPath, BoundingBox, CanvasOptions, FrameRGBA, Point, Rect, Rgba8Premul, Vec2,
};
pub use foundation::error::{TifoError, TifoResult};
pub use foundation::math::{VarietyRng, mix64};
pub use layout::grid::{GridArea, GridResolver, GridSpec};
pub use render::composite::{blit_over, over, over_in_place, unpremultiply_in_place};
pub use render::compositor::{Compositor, encode_png, png_data_url};
pub use render::debug_grid::{DebugGridStyle, render_grid_visualization};
pub use render::exploded::{
    ExplodedOptions, render_exploded_view, render_exploded_view_with_grid,
};
pub use render::export::{
    ExportRequest, export_bundle, export_bundle_frames, export_composite, export_layer_by_layer,
    export_single_layer, render_composite, render_single_layer,
};
