use std::collections::BTreeMap;

use crate::{
    assets::store::AssetStore,
    catalog::themes::ColorTheme,
    composition::model::LayerContent,
    foundation::{
        core::{CanvasOptions, FrameRGBA},
        error::TifoResult,
    },
    layout::grid::{GridResolver, GridSpec},
    render::{
        compositor::{Compositor, encode_png, png_data_url},
        debug_grid::render_grid_visualization,
        exploded::{ExplodedOptions, render_exploded_view, render_exploded_view_with_grid},
    },
};

/// Everything an export run needs besides the content itself.
#[derive(Clone, Copy, Debug)]
pub struct ExportRequest<'a> {
    pub template: &'a str,
    pub grid_spec: GridSpec,
    pub theme: &'a ColorTheme,
    pub canvas: CanvasOptions,
}

fn compositor_with_content(
    req: &ExportRequest<'_>,
    content: &LayerContent,
) -> TifoResult<Compositor> {
    let mut comp = Compositor::new(req.template, req.grid_spec, req.theme, req.canvas)?;
    for floater in &content.floaters {
        comp.add_floater(floater.clone());
    }
    for block in &content.blocks {
        comp.add_block(block.clone());
    }
    Ok(comp)
}

/// Render exactly one layer on a fresh transparent canvas.
///
/// A fresh compositor per capture is what guarantees layer isolation: the
/// single-layer no-clear rule means reusing one canvas would accumulate
/// pixels from earlier captures.
pub fn render_single_layer(
    content: &LayerContent,
    layer_index: u32,
    req: &ExportRequest<'_>,
    assets: &mut AssetStore,
) -> TifoResult<FrameRGBA> {
    let mut comp = compositor_with_content(req, content)?;
    comp.render_layer(assets, layer_index)?;
    Ok(comp.frame())
}

/// Data-URL form of [`render_single_layer`].
pub fn export_single_layer(
    content: &LayerContent,
    layer_index: u32,
    req: &ExportRequest<'_>,
    assets: &mut AssetStore,
) -> TifoResult<String> {
    let frame = render_single_layer(content, layer_index, req, assets)?;
    Ok(png_data_url(&encode_png(&frame)?))
}

/// One transparent PNG per layer, keyed `layer0`..`layerN`.
#[tracing::instrument(skip_all, fields(layers = layers.len()))]
pub fn export_layer_by_layer(
    layers: &[LayerContent],
    req: &ExportRequest<'_>,
    assets: &mut AssetStore,
) -> TifoResult<BTreeMap<String, String>> {
    let mut out = BTreeMap::new();
    for (idx, content) in layers.iter().enumerate() {
        let url = export_single_layer(content, idx as u32, req, assets)?;
        out.insert(format!("layer{idx}"), url);
    }
    Ok(out)
}

/// Every layer composited in order onto one canvas: the reference "final
/// design" image.
pub fn render_composite(
    layers: &[LayerContent],
    req: &ExportRequest<'_>,
    assets: &mut AssetStore,
) -> TifoResult<FrameRGBA> {
    let mut comp = Compositor::new(req.template, req.grid_spec, req.theme, req.canvas)?;
    for content in layers {
        for floater in &content.floaters {
            comp.add_floater(floater.clone());
        }
        for block in &content.blocks {
            comp.add_block(block.clone());
        }
    }
    comp.render_all(assets)?;
    Ok(comp.frame())
}

/// Data-URL form of [`render_composite`].
pub fn export_composite(
    layers: &[LayerContent],
    req: &ExportRequest<'_>,
    assets: &mut AssetStore,
) -> TifoResult<String> {
    let frame = render_composite(layers, req, assets)?;
    Ok(png_data_url(&encode_png(&frame)?))
}

/// The full debug/export bundle as raw frames.
///
/// Keys: `layer0`..`layerN`, `composite-all-layers`, `grid-visualization`,
/// `exploded-view-3d`, `exploded-view-3d-with-grid`.
#[tracing::instrument(skip_all, fields(layers = layers.len()))]
pub fn export_bundle_frames(
    layers: &[LayerContent],
    req: &ExportRequest<'_>,
    exploded: &ExplodedOptions,
    assets: &mut AssetStore,
) -> TifoResult<BTreeMap<String, FrameRGBA>> {
    let mut out = BTreeMap::new();

    for (idx, content) in layers.iter().enumerate() {
        let frame = render_single_layer(content, idx as u32, req, assets)?;
        out.insert(format!("layer{idx}"), frame);
    }

    out.insert(
        "composite-all-layers".to_string(),
        render_composite(layers, req, assets)?,
    );

    let grid = GridResolver::parse(
        req.template,
        req.grid_spec,
        f64::from(req.canvas.width),
        f64::from(req.canvas.height),
    )?;
    out.insert(
        "grid-visualization".to_string(),
        render_grid_visualization(&grid, req.canvas, assets, exploded.label_font.as_deref())?,
    );

    out.insert(
        "exploded-view-3d".to_string(),
        render_exploded_view(
            layers,
            req.template,
            req.grid_spec,
            req.theme,
            req.canvas,
            exploded,
            assets,
        )?,
    );
    out.insert(
        "exploded-view-3d-with-grid".to_string(),
        render_exploded_view_with_grid(
            layers,
            req.template,
            req.grid_spec,
            req.theme,
            req.canvas,
            exploded,
            assets,
        )?,
    );

    Ok(out)
}

/// The full bundle as base64 PNG data URLs.
pub fn export_bundle(
    layers: &[LayerContent],
    req: &ExportRequest<'_>,
    exploded: &ExplodedOptions,
    assets: &mut AssetStore,
) -> TifoResult<BTreeMap<String, String>> {
    let frames = export_bundle_frames(layers, req, exploded, assets)?;
    let mut out = BTreeMap::new();
    for (key, frame) in frames {
        out.insert(key, png_data_url(&encode_png(&frame)?));
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/render/export.rs"]
mod tests;
