use std::sync::Arc;

use crate::{
    assets::store::{AssetStore, PreparedVisual, TextBrushRgba8},
    catalog::themes::ColorTheme,
    composition::element::{
        FillStyle, ImageFit, ImageSpec, OverlayAnchor, OverlaySpec, PaintKind, PatternSpec,
        PhotoSpec, TextAlign, TextSpec,
    },
    foundation::{
        color::Rgba8,
        core::{Affine, BoundingBox, Vec2},
        error::{TifoError, TifoResult},
    },
};

/// Shared per-pass draw state: asset access, fallback palette, pixel scale.
pub(crate) struct DrawCtx<'a> {
    pub assets: &'a mut AssetStore,
    pub theme: &'a ColorTheme,
    /// Logical-to-pixel scale (DPI / 72).
    pub scale: f64,
}

pub(crate) fn dim_u16(v: u32) -> TifoResult<u16> {
    u16::try_from(v).map_err(|_| TifoError::render(format!("surface dimension too large: {v}")))
}

pub(crate) fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

pub(crate) fn clear_pixmap_to_transparent(pixmap: &mut vello_cpu::Pixmap) {
    pixmap.data_as_u8_slice_mut().fill(0);
}

pub(crate) fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> TifoResult<vello_cpu::Pixmap> {
    let w = dim_u16(width)?;
    let h = dim_u16(height)?;
    let expected = (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(4);
    if bytes.len() != expected {
        return Err(TifoError::render("pixmap byte len mismatch"));
    }
    // Pixmap stores PremulRgba8; our bytes are already premultiplied.
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in bytes.chunks_exact(4) {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true))
}

pub(crate) fn image_paint_from_premul(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> TifoResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(bytes, width, height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

/// Paint one element kind into `ctx`.
///
/// `bounds` is the container-local rectangle in logical units, always at the
/// origin; the backing surface is exactly `bounds * scale` pixels, so
/// anything painted past it is clipped by construction. All transforms below
/// are therefore in pixel space.
pub(crate) fn draw_kind(
    ctx: &mut vello_cpu::RenderContext,
    d: &mut DrawCtx<'_>,
    kind: &PaintKind,
    bounds: BoundingBox,
) -> TifoResult<()> {
    match kind {
        PaintKind::Fill(style) => draw_fill(ctx, d, *style, bounds),
        PaintKind::Photo(spec) => draw_photo(ctx, d, spec, bounds),
        PaintKind::Text(spec) => draw_text(ctx, d, spec, bounds),
        PaintKind::Image(spec) => draw_image(ctx, d, spec, bounds),
        PaintKind::Pattern(spec) => draw_pattern(ctx, d, spec, bounds),
        PaintKind::Overlay(spec) => draw_overlay(ctx, d, spec, bounds),
    }
}

fn px_rect(bounds: BoundingBox, scale: f64) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(
        0.0,
        0.0,
        (bounds.width * scale).max(0.0),
        (bounds.height * scale).max(0.0),
    )
}

fn draw_fill(
    ctx: &mut vello_cpu::RenderContext,
    d: &mut DrawCtx<'_>,
    style: FillStyle,
    bounds: BoundingBox,
) -> TifoResult<()> {
    match style {
        FillStyle::Solid(color) => {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(color.to_peniko());
            ctx.fill_rect(&px_rect(bounds, d.scale));
            Ok(())
        }
        FillStyle::LinearGradient { from, to } => {
            draw_gradient(ctx, d.scale, from, to, bounds)
        }
    }
}

fn draw_gradient(
    ctx: &mut vello_cpu::RenderContext,
    scale: f64,
    from: Rgba8,
    to: Rgba8,
    bounds: BoundingBox,
) -> TifoResult<()> {
    let w = ((bounds.width * scale).ceil() as u32).max(1);
    let h = ((bounds.height * scale).ceil() as u32).max(1);

    let start = from.to_premul();
    let end = to.to_premul();
    let mut bytes = vec![0u8; (w as usize) * (h as usize) * 4];
    let h1 = (h.max(1) - 1) as f32;
    for y in 0..h {
        let t = if h1 <= 0.0 { 0.0 } else { (y as f32) / h1 };
        let lerp = |a: u8, b: u8| -> u8 {
            let af = a as f32;
            let bf = b as f32;
            (af + (bf - af) * t).round().clamp(0.0, 255.0) as u8
        };
        let c = [
            lerp(start.r, end.r),
            lerp(start.g, end.g),
            lerp(start.b, end.b),
            lerp(start.a, end.a),
        ];
        for x in 0..w {
            let idx = ((y as usize) * (w as usize) + (x as usize)) * 4;
            bytes[idx..idx + 4].copy_from_slice(&c);
        }
    }

    let img = image_paint_from_premul(&bytes, w, h)?;
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(img);
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w as f64, h as f64));
    Ok(())
}

/// The deterministic stand-in when an image source cannot be loaded: the
/// theme's primary-to-light blue vertical gradient, so the composite always
/// completes with brand-colored pixels.
fn draw_fallback_gradient(
    ctx: &mut vello_cpu::RenderContext,
    d: &mut DrawCtx<'_>,
    bounds: BoundingBox,
) -> TifoResult<()> {
    draw_gradient(ctx, d.scale, d.theme.blue, d.theme.blue_light, bounds)
}

fn fitted_image(
    visual: &PreparedVisual,
    box_w: f64,
    box_h: f64,
    fit: ImageFit,
    scale: f64,
) -> TifoResult<(vello_cpu::Image, f64, f64)> {
    match visual {
        PreparedVisual::Raster(img) => {
            let iw = f64::from(img.width);
            let ih = f64::from(img.height);
            if iw <= 0.0 || ih <= 0.0 {
                return Err(TifoError::render("image has zero dimensions"));
            }
            let s = match fit {
                ImageFit::Cover => (box_w / iw).max(box_h / ih),
                ImageFit::Contain => (box_w / iw).min(box_h / ih),
            };
            let paint = image_paint_from_premul(&img.rgba8_premul, img.width, img.height)?;
            Ok((paint, iw * s, ih * s))
        }
        PreparedVisual::Vector(svg) => {
            let size = svg.tree.size();
            let iw = f64::from(size.width());
            let ih = f64::from(size.height());
            if iw <= 0.0 || ih <= 0.0 {
                return Err(TifoError::render("svg has zero dimensions"));
            }
            let s = match fit {
                ImageFit::Cover => (box_w / iw).max(box_h / ih),
                ImageFit::Contain => (box_w / iw).min(box_h / ih),
            };
            // Rasterize vectors at their final pixel size so scaled-up
            // crests stay sharp.
            let (rw, rh) =
                crate::assets::svg_raster::svg_raster_size(&svg.tree, iw * s, ih * s, scale)?;
            let bytes = crate::assets::svg_raster::rasterize_svg_to_premul_rgba8(
                &svg.tree, rw, rh,
            )?;
            let paint = image_paint_from_premul(&bytes, rw, rh)?;
            Ok((paint, iw * s, ih * s))
        }
    }
}

fn draw_scaled_image(
    ctx: &mut vello_cpu::RenderContext,
    paint: vello_cpu::Image,
    src_px_w: f64,
    src_px_h: f64,
    dst_x: f64,
    dst_y: f64,
    dst_w: f64,
    dst_h: f64,
) {
    // Position via the draw transform; the paint samples in the transformed
    // space, so scaling the unit rect scales the image with it.
    let sx = dst_w / src_px_w.max(1e-9);
    let sy = dst_h / src_px_h.max(1e-9);
    let tr = Affine::translate(Vec2::new(dst_x, dst_y)) * Affine::scale_non_uniform(sx, sy);
    ctx.set_transform(affine_to_cpu(tr));
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(paint);
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, src_px_w, src_px_h));
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
}

fn draw_photo(
    ctx: &mut vello_cpu::RenderContext,
    d: &mut DrawCtx<'_>,
    spec: &PhotoSpec,
    bounds: BoundingBox,
) -> TifoResult<()> {
    let pw = bounds.width * d.scale;
    let ph = bounds.height * d.scale;

    match d.assets.visual(&spec.source) {
        Ok(visual) => {
            let (paint, fit_w, fit_h) =
                fitted_image(&visual, pw, ph, ImageFit::Cover, d.scale)?;
            let (src_w, src_h) = paint_source_size(&paint);
            draw_scaled_image(
                ctx,
                paint,
                src_w,
                src_h,
                (pw - fit_w) * 0.5,
                (ph - fit_h) * 0.5,
                fit_w,
                fit_h,
            );
        }
        Err(err) => {
            tracing::warn!(source = %spec.source, %err, "photo load failed, painting gradient fallback");
            draw_fallback_gradient(ctx, d, bounds)?;
        }
    }

    if let Some(tint) = spec.tint {
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(tint.to_peniko());
        ctx.fill_rect(&px_rect(bounds, d.scale));
    }
    Ok(())
}

fn paint_source_size(paint: &vello_cpu::Image) -> (f64, f64) {
    match &paint.image {
        vello_cpu::ImageSource::Pixmap(pm) => {
            (f64::from(pm.width()), f64::from(pm.height()))
        }
        _ => (1.0, 1.0),
    }
}

fn draw_image(
    ctx: &mut vello_cpu::RenderContext,
    d: &mut DrawCtx<'_>,
    spec: &ImageSpec,
    bounds: BoundingBox,
) -> TifoResult<()> {
    let pw = bounds.width * d.scale;
    let ph = bounds.height * d.scale;
    let frac = spec.size_frac.clamp(0.0, 1.0);
    let box_w = pw * frac;
    let box_h = ph * frac;

    match d.assets.visual(&spec.source) {
        Ok(visual) => {
            let (paint, fit_w, fit_h) = fitted_image(&visual, box_w, box_h, spec.fit, d.scale)?;
            let (src_w, src_h) = paint_source_size(&paint);
            let x = (pw - fit_w) * 0.5 + spec.offset.x * d.scale;
            let y = (ph - fit_h) * 0.5 + spec.offset.y * d.scale;
            draw_scaled_image(ctx, paint, src_w, src_h, x, y, fit_w, fit_h);
            Ok(())
        }
        Err(err) => {
            tracing::warn!(source = %spec.source, %err, "image load failed, painting gradient fallback");
            draw_fallback_gradient(ctx, d, bounds)
        }
    }
}

fn brush_for(color: Rgba8) -> TextBrushRgba8 {
    TextBrushRgba8 {
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    }
}

/// Width and height of a shaped layout, from line metrics.
fn layout_size(layout: &parley::Layout<TextBrushRgba8>) -> (f64, f64) {
    let mut w = 0.0f64;
    let mut h = 0.0f64;
    for line in layout.lines() {
        let m = line.metrics();
        w = w.max(f64::from(m.advance));
        h += f64::from(m.ascent + m.descent + m.leading);
    }
    (w, h)
}

fn draw_glyph_runs(
    ctx: &mut vello_cpu::RenderContext,
    layout: &parley::Layout<TextBrushRgba8>,
    font: &vello_cpu::peniko::FontData,
    transform: Affine,
) {
    ctx.set_transform(affine_to_cpu(transform));
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));
            let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
}

/// Draw a shaped layout centered on `(cx, cy)` in pixel space.
pub(crate) fn draw_layout_at(
    ctx: &mut vello_cpu::RenderContext,
    layout: &parley::Layout<TextBrushRgba8>,
    font: &vello_cpu::peniko::FontData,
    cx: f64,
    cy: f64,
) {
    let (w, h) = layout_size(layout);
    draw_glyph_runs(
        ctx,
        layout,
        font,
        Affine::translate(Vec2::new(cx - w * 0.5, cy - h * 0.5)),
    );
}

fn font_data(bytes: &Arc<Vec<u8>>) -> vello_cpu::peniko::FontData {
    vello_cpu::peniko::FontData::new(
        vello_cpu::peniko::Blob::from(bytes.as_ref().clone()),
        0,
    )
}

fn draw_text(
    ctx: &mut vello_cpu::RenderContext,
    d: &mut DrawCtx<'_>,
    spec: &TextSpec,
    bounds: BoundingBox,
) -> TifoResult<()> {
    let pw = bounds.width * d.scale;
    let ph = bounds.height * d.scale;
    let text = spec.case.apply(&spec.text);
    let size = spec.size_px * d.scale as f32;

    // A vertical run is laid out along the bounds' vertical axis, then
    // rotated a quarter turn clockwise into place.
    let run_width = if spec.vertical { ph } else { pw };
    let (mut layout, font_bytes) = d.assets.layout_text(
        &text,
        &spec.font,
        size,
        brush_for(spec.color),
        Some(run_width as f32),
    )?;
    if spec.align != TextAlign::Start {
        let parley_align = match spec.align {
            TextAlign::Start => parley::Alignment::Start,
            TextAlign::Center => parley::Alignment::Center,
            TextAlign::End => parley::Alignment::End,
        };
        layout.align(
            Some(run_width as f32),
            parley_align,
            parley::AlignmentOptions::default(),
        );
    }
    let font = font_data(&font_bytes);
    let (_, lh) = layout_size(&layout);

    let transform = if spec.vertical {
        // (x, y) -> (-y, x): baseline runs top to bottom; center across the
        // bounds' horizontal axis.
        Affine::translate(Vec2::new((pw + lh) * 0.5, 0.0)) * Affine::rotate(std::f64::consts::FRAC_PI_2)
    } else {
        Affine::translate(Vec2::new(0.0, ((ph - lh) * 0.5).max(0.0)))
    };

    draw_glyph_runs(ctx, &layout, &font, transform);
    Ok(())
}

fn draw_pattern(
    ctx: &mut vello_cpu::RenderContext,
    d: &mut DrawCtx<'_>,
    spec: &PatternSpec,
    bounds: BoundingBox,
) -> TifoResult<()> {
    let pw = bounds.width * d.scale;
    let ph = bounds.height * d.scale;
    let size = spec.size_px * d.scale as f32;

    let (layout, font_bytes) =
        d.assets
            .layout_text(&spec.text, &spec.font, size, brush_for(spec.color), None)?;
    let font = font_data(&font_bytes);
    let (tile_w, tile_h) = layout_size(&layout);
    if tile_w <= 0.0 || tile_h <= 0.0 {
        return Ok(());
    }

    let gap = (spec.gap_px * d.scale).max(0.0);
    let step_x = tile_w + gap;
    let step_y = tile_h + gap;

    let mut row = 0u32;
    let mut y = 0.0f64;
    while y < ph {
        let offset = if spec.stagger && row % 2 == 1 {
            -step_x * 0.5
        } else {
            0.0
        };
        let mut x = offset;
        while x < pw {
            draw_glyph_runs(ctx, &layout, &font, Affine::translate(Vec2::new(x, y)));
            x += step_x;
        }
        y += step_y;
        row += 1;
    }
    Ok(())
}

fn draw_overlay(
    ctx: &mut vello_cpu::RenderContext,
    d: &mut DrawCtx<'_>,
    spec: &OverlaySpec,
    bounds: BoundingBox,
) -> TifoResult<()> {
    let pw = bounds.width * d.scale;
    let ph = bounds.height * d.scale;
    let gap = (spec.gap_px * d.scale).max(0.0);

    // Shape every line first so the whole block can be anchored as one unit.
    let mut shaped = Vec::with_capacity(spec.lines.len());
    let mut block_w = 0.0f64;
    let mut block_h = 0.0f64;
    for line in &spec.lines {
        let text = line.case.apply(&line.text);
        let size = line.size_px * d.scale as f32;
        let (layout, font_bytes) =
            d.assets
                .layout_text(&text, &line.font, size, brush_for(line.color), None)?;
        let font = font_data(&font_bytes);
        let (lw, lh) = layout_size(&layout);
        block_w = block_w.max(lw);
        if !shaped.is_empty() {
            block_h += gap;
        }
        block_h += lh;
        shaped.push((layout, font, lw, lh));
    }

    let (origin_x, origin_y) = match spec.anchor {
        OverlayAnchor::Center => ((pw - block_w) * 0.5, (ph - block_h) * 0.5),
        OverlayAnchor::TopLeft => (0.0, 0.0),
        OverlayAnchor::BottomLeft => (0.0, ph - block_h),
        OverlayAnchor::BottomRight => (pw - block_w, ph - block_h),
    };

    let mut y = origin_y;
    for (layout, font, lw, lh) in &shaped {
        let x = match spec.anchor {
            OverlayAnchor::Center => origin_x + (block_w - lw) * 0.5,
            OverlayAnchor::BottomRight => origin_x + (block_w - lw),
            _ => origin_x,
        };
        draw_glyph_runs(ctx, layout, font, Affine::translate(Vec2::new(x, y)));
        y += lh + gap;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dim_u16_bounds() {
        assert!(dim_u16(65_535).is_ok());
        assert!(dim_u16(65_536).is_err());
    }

    #[test]
    fn pixmap_from_premul_checks_len() {
        assert!(pixmap_from_premul_bytes(&[0u8; 16], 2, 2).is_ok());
        assert!(pixmap_from_premul_bytes(&[0u8; 15], 2, 2).is_err());
    }

    #[test]
    fn affine_roundtrips_coeffs() {
        let a = Affine::translate(Vec2::new(3.0, 4.0)) * Affine::scale(2.0);
        assert_eq!(affine_to_cpu(a).as_coeffs(), a.as_coeffs());
    }
}
