use crate::{
    assets::store::{AssetStore, TextBrushRgba8},
    catalog::themes::ColorTheme,
    composition::model::LayerContent,
    foundation::{
        color::Rgba8,
        core::{Affine, CanvasOptions, FrameRGBA, Vec2},
        error::{TifoError, TifoResult},
    },
    layout::grid::GridSpec,
    render::{
        compositor::Compositor,
        debug_grid::{DebugGridStyle, draw_debug_grid},
        draw::{affine_to_cpu, clear_pixmap_to_transparent, dim_u16, image_paint_from_premul},
    },
};

/// Perspective parameters for the exploded view. Defaults are tuned for
/// visual clarity, not physical accuracy.
#[derive(Clone, Debug)]
pub struct ExplodedOptions {
    /// Stack tilt; drives how far apart layers separate vertically.
    pub rotate_x_deg: f64,
    /// Stack yaw; non-zero values also separate layers horizontally.
    pub rotate_y_deg: f64,
    /// In-plane rotation applied to each card.
    pub layer_rotate_z_deg: f64,
    /// Per-card tabletop tilt, realized as vertical foreshortening.
    pub layer_rotate_x_deg: f64,
    /// Per-card perspective fake, realized as horizontal skew.
    pub layer_rotate_y_deg: f64,
    /// Depth distance between adjacent layers, logical pixels.
    pub z_spacing: f64,
    /// Uniform card scale.
    pub scale: f64,
    /// Overlay the dashed cell grid on every card.
    pub show_grid: bool,
    /// Font for the "Layer N" captions; captions are skipped without it.
    pub label_font: Option<String>,
    pub background: Rgba8,
}

impl Default for ExplodedOptions {
    fn default() -> Self {
        Self {
            rotate_x_deg: 60.0,
            rotate_y_deg: 0.0,
            layer_rotate_z_deg: -8.0,
            layer_rotate_x_deg: 65.0,
            layer_rotate_y_deg: 45.0,
            z_spacing: 160.0,
            scale: 0.9,
            show_grid: false,
            label_font: None,
            background: Rgba8::rgb(0x1f, 0x29, 0x37),
        }
    }
}

impl ExplodedOptions {
    pub fn with_grid(mut self) -> Self {
        self.show_grid = true;
        self
    }
}

/// Render every non-empty layer as a tilted card in a pseudo-3D stack.
///
/// Layer 0 lands furthest back, the highest layer nearest the viewer; cards
/// paint back to front. A layer whose render fails is skipped with a
/// warning so one bad layer cannot blank the whole debug view.
#[tracing::instrument(skip_all, fields(layers = layers.len()))]
pub fn render_exploded_view(
    layers: &[LayerContent],
    template: &str,
    grid_spec: GridSpec,
    theme: &ColorTheme,
    opts: CanvasOptions,
    exploded: &ExplodedOptions,
    assets: &mut AssetStore,
) -> TifoResult<FrameRGBA> {
    let scale = opts.pixel_scale();
    let base_w = opts.pixel_width();
    let base_h = opts.pixel_height();
    // 1.5x the base canvas leaves room for the projected stack.
    let out_w = base_w + base_w / 2;
    let out_h = base_h + base_h / 2;

    let mut pixmap = vello_cpu::Pixmap::new(dim_u16(out_w)?, dim_u16(out_h)?);
    clear_pixmap_to_transparent(&mut pixmap);
    let mut ctx = vello_cpu::RenderContext::new(dim_u16(out_w)?, dim_u16(out_h)?);
    ctx.reset();

    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(exploded.background.to_peniko());
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        0.0,
        0.0,
        f64::from(out_w),
        f64::from(out_h),
    ));

    let non_empty: Vec<(usize, &LayerContent)> = layers
        .iter()
        .enumerate()
        .filter(|(_, content)| !content.is_empty())
        .collect();
    let total = non_empty.len();

    let rot_x = exploded.rotate_x_deg.to_radians();
    let rot_y = exploded.rotate_y_deg.to_radians();
    let rot_z = exploded.layer_rotate_z_deg.to_radians();
    let foreshorten = exploded.layer_rotate_x_deg.to_radians().cos();
    let skew_x = exploded.layer_rotate_y_deg.to_radians().tan() * 0.5;

    for (stack_idx, &(layer_idx, content)) in non_empty.iter().enumerate() {
        let card = match render_layer_card(
            content, layer_idx, template, grid_spec, theme, opts, exploded, assets,
        ) {
            Ok(card) => card,
            Err(err) => {
                tracing::warn!(layer = layer_idx, %err, "layer failed to render, skipping card");
                continue;
            }
        };

        // Invert z so layer 0 sits deepest; center the stack around zero
        // depth, then project depth into screen translation.
        let inverted = (total - 1 - stack_idx) as f64;
        let centered = inverted - ((total - 1) as f64) * 0.5;
        let z_offset = centered * exploded.z_spacing * scale;
        let projected_x = z_offset * rot_y.sin();
        let projected_y = -z_offset * rot_y.cos() * rot_x.sin();

        let center_x = f64::from(out_w) * 0.5 + projected_x;
        let center_y = f64::from(out_h) * 0.5 + projected_y;

        // rotateZ, then foreshorten, then skew: each subsequent transform
        // must apply in the already-tilted local frame so the result reads
        // as a tilted card, not a sheared rectangle.
        let transform = Affine::translate(Vec2::new(center_x, center_y))
            * Affine::skew(skew_x, 0.0)
            * Affine::scale_non_uniform(1.0, foreshorten)
            * Affine::rotate(rot_z)
            * Affine::scale(exploded.scale)
            * Affine::translate(Vec2::new(
                -f64::from(card.width) * 0.5,
                -f64::from(card.height) * 0.5,
            ));

        let paint = image_paint_from_premul(&card.data, card.width, card.height)?;
        ctx.set_transform(affine_to_cpu(transform));
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(card.width),
            f64::from(card.height),
        ));
    }

    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);

    Ok(FrameRGBA {
        width: out_w,
        height: out_h,
        data: pixmap.data_as_u8_slice().to_vec(),
    })
}

/// Convenience wrapper: exploded view with the dashed cell grid on every
/// card.
pub fn render_exploded_view_with_grid(
    layers: &[LayerContent],
    template: &str,
    grid_spec: GridSpec,
    theme: &ColorTheme,
    opts: CanvasOptions,
    exploded: &ExplodedOptions,
    assets: &mut AssetStore,
) -> TifoResult<FrameRGBA> {
    let with_grid = ExplodedOptions {
        show_grid: true,
        ..exploded.clone()
    };
    render_exploded_view(layers, template, grid_spec, theme, opts, &with_grid, assets)
}

/// Render one layer in isolation and wrap it in a bordered, rounded,
/// translucent card (optionally with the debug grid and a caption).
#[allow(clippy::too_many_arguments)]
fn render_layer_card(
    content: &LayerContent,
    layer_idx: usize,
    template: &str,
    grid_spec: GridSpec,
    theme: &ColorTheme,
    opts: CanvasOptions,
    exploded: &ExplodedOptions,
    assets: &mut AssetStore,
) -> TifoResult<FrameRGBA> {
    // The layer alone, on a fresh transparent canvas at native size.
    let mut comp = Compositor::new(template, grid_spec, theme, opts)?;
    for floater in &content.floaters {
        comp.add_floater(floater.clone());
    }
    for block in &content.blocks {
        comp.add_block(block.clone());
    }
    let layer = u32::try_from(layer_idx)
        .map_err(|_| TifoError::render("layer index out of range"))?;
    // Non-zero layers never clear, which is fine: the fresh pixmap starts
    // transparent.
    comp.render_layer(assets, layer)?;
    let layer_frame = comp.frame();

    let scale = opts.pixel_scale();
    let pad = (24.0 * scale).round();
    let card_w = layer_frame.width + (pad as u32) * 2;
    let card_h = layer_frame.height + (pad as u32) * 2;

    let mut pixmap = vello_cpu::Pixmap::new(dim_u16(card_w)?, dim_u16(card_h)?);
    clear_pixmap_to_transparent(&mut pixmap);
    let mut ctx = vello_cpu::RenderContext::new(dim_u16(card_w)?, dim_u16(card_h)?);
    ctx.reset();
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

    let radius = 18.0 * scale;
    let border = (3.0 * scale).max(1.0);

    // Border ring: an outer rounded rect under a slightly inset panel fill.
    fill_rounded_rect(
        &mut ctx,
        0.0,
        0.0,
        f64::from(card_w),
        f64::from(card_h),
        radius,
        Rgba8::rgba(250, 250, 252, 210),
    );
    fill_rounded_rect(
        &mut ctx,
        border,
        border,
        f64::from(card_w) - 2.0 * border,
        f64::from(card_h) - 2.0 * border,
        (radius - border).max(0.0),
        Rgba8::rgba(255, 255, 255, 46),
    );

    let paint = image_paint_from_premul(&layer_frame.data, layer_frame.width, layer_frame.height)?;
    ctx.set_transform(affine_to_cpu(Affine::translate(Vec2::new(pad, pad))));
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(paint);
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        0.0,
        0.0,
        f64::from(layer_frame.width),
        f64::from(layer_frame.height),
    ));
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

    if exploded.show_grid {
        ctx.set_transform(affine_to_cpu(Affine::translate(Vec2::new(pad, pad))));
        draw_debug_grid(
            &mut ctx,
            grid_spec.columns,
            grid_spec.rows,
            f64::from(layer_frame.width),
            f64::from(layer_frame.height),
            DebugGridStyle::default(),
        );
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    }

    if let Some(font) = &exploded.label_font {
        match draw_card_label(&mut ctx, assets, font, layer_idx, pad, scale) {
            Ok(()) => {}
            Err(err) => {
                tracing::warn!(%err, "label font unavailable, skipping card caption");
            }
        }
    }

    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);

    Ok(FrameRGBA {
        width: card_w,
        height: card_h,
        data: pixmap.data_as_u8_slice().to_vec(),
    })
}

fn fill_rounded_rect(
    ctx: &mut vello_cpu::RenderContext,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    radius: f64,
    color: Rgba8,
) {
    let rr = kurbo::RoundedRect::new(x, y, x + w, y + h, radius);
    let mut path = vello_cpu::kurbo::BezPath::new();
    for el in kurbo::Shape::path_elements(&rr, 0.1) {
        path.push(el);
    }
    ctx.set_paint(color.to_peniko());
    ctx.fill_path(&path);
}

fn draw_card_label(
    ctx: &mut vello_cpu::RenderContext,
    assets: &mut AssetStore,
    font: &str,
    layer_idx: usize,
    pad: f64,
    scale: f64,
) -> TifoResult<()> {
    let brush = TextBrushRgba8 {
        r: 250,
        g: 250,
        b: 252,
        a: 255,
    };
    let caption = format!("Layer {layer_idx}");
    let (layout, font_bytes) =
        assets.layout_text(&caption, font, (20.0 * scale) as f32, brush, None)?;
    let font_data = vello_cpu::peniko::FontData::new(
        vello_cpu::peniko::Blob::from(font_bytes.as_ref().clone()),
        0,
    );
    super::draw::draw_layout_at(ctx, &layout, &font_data, pad + 60.0 * scale, pad * 0.5);
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/exploded.rs"]
mod tests;
