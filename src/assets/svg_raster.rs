use crate::foundation::error::{TifoError, TifoResult};

/// Compute a raster size for an SVG drawn into a `target_w` x `target_h`
/// logical box at the given pixel scale.
///
/// Logos are rasterized at their final on-canvas size so upscaled crests
/// stay sharp instead of stretching a small bitmap.
pub fn svg_raster_size(
    tree: &usvg::Tree,
    target_w: f64,
    target_h: f64,
    pixel_scale: f64,
) -> TifoResult<(u32, u32)> {
    fn to_px(v: f64) -> TifoResult<u32> {
        if !v.is_finite() || v <= 0.0 {
            return Err(TifoError::render("svg raster size must be positive"));
        }
        Ok((v.ceil() as u32).max(1))
    }

    if tree.size().width() <= 0.0 || tree.size().height() <= 0.0 {
        return Err(TifoError::render("svg has invalid width/height"));
    }

    let w = to_px(target_w * pixel_scale)?;
    let h = to_px(target_h * pixel_scale)?;

    // Bound allocations; callers wanting billboard-sized vectors should tile.
    const MAX_DIM: u32 = 16_384;
    if w > MAX_DIM || h > MAX_DIM {
        return Err(TifoError::render(format!(
            "svg raster size too large: {w}x{h} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }

    Ok((w, h))
}

/// Rasterize an SVG tree into premultiplied RGBA8 at the requested size.
pub fn rasterize_svg_to_premul_rgba8(
    tree: &usvg::Tree,
    width: u32,
    height: u32,
) -> TifoResult<Vec<u8>> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| TifoError::render("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.data().to_vec())
}
