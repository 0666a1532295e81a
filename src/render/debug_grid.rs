use crate::{
    assets::store::{AssetStore, TextBrushRgba8},
    foundation::{
        color::Rgba8,
        core::{CanvasOptions, FrameRGBA},
        error::TifoResult,
    },
    layout::grid::GridResolver,
    render::draw::{clear_pixmap_to_transparent, dim_u16},
};

/// Styling for the dashed debug grid overlay.
#[derive(Clone, Copy, Debug)]
pub struct DebugGridStyle {
    pub line_color: Rgba8,
    pub dash_px: f64,
    pub gap_px: f64,
    pub line_width_px: f64,
}

impl Default for DebugGridStyle {
    fn default() -> Self {
        Self {
            line_color: Rgba8::rgba(220, 38, 38, 200),
            dash_px: 10.0,
            gap_px: 6.0,
            line_width_px: 2.0,
        }
    }
}

fn fill_px_rect(ctx: &mut vello_cpu::RenderContext, x: f64, y: f64, w: f64, h: f64) {
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(x, y, x + w, y + h));
}

fn dashed_h_line(ctx: &mut vello_cpu::RenderContext, y: f64, x0: f64, x1: f64, style: DebugGridStyle) {
    let step = style.dash_px + style.gap_px;
    let mut x = x0;
    while x < x1 {
        fill_px_rect(
            ctx,
            x,
            y - style.line_width_px * 0.5,
            style.dash_px.min(x1 - x),
            style.line_width_px,
        );
        x += step;
    }
}

fn dashed_v_line(ctx: &mut vello_cpu::RenderContext, x: f64, y0: f64, y1: f64, style: DebugGridStyle) {
    let step = style.dash_px + style.gap_px;
    let mut y = y0;
    while y < y1 {
        fill_px_rect(
            ctx,
            x - style.line_width_px * 0.5,
            y,
            style.line_width_px,
            style.dash_px.min(y1 - y),
        );
        y += step;
    }
}

/// Draw dashed row/column lines for `rows` x `columns` cells over a
/// `width_px` x `height_px` region at the context's current origin.
pub(crate) fn draw_debug_grid(
    ctx: &mut vello_cpu::RenderContext,
    columns: u32,
    rows: u32,
    width_px: f64,
    height_px: f64,
    style: DebugGridStyle,
) {
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(style.line_color.to_peniko());

    for row in 0..=rows {
        let y = height_px * f64::from(row) / f64::from(rows.max(1));
        let y = y.min(height_px - style.line_width_px).max(0.0);
        dashed_h_line(ctx, y, 0.0, width_px, style);
    }
    for col in 0..=columns {
        let x = width_px * f64::from(col) / f64::from(columns.max(1));
        let x = x.min(width_px - style.line_width_px).max(0.0);
        dashed_v_line(ctx, x, 0.0, height_px, style);
    }
}

/// Outline a rectangle with four thin filled rects.
fn outline_rect(ctx: &mut vello_cpu::RenderContext, x: f64, y: f64, w: f64, h: f64, lw: f64) {
    fill_px_rect(ctx, x, y, w, lw);
    fill_px_rect(ctx, x, y + h - lw, w, lw);
    fill_px_rect(ctx, x, y, lw, h);
    fill_px_rect(ctx, x + w - lw, y, lw, h);
}

const AREA_TINTS: &[Rgba8] = &[
    Rgba8::rgba(59, 130, 246, 60),
    Rgba8::rgba(16, 185, 129, 60),
    Rgba8::rgba(245, 158, 11, 60),
    Rgba8::rgba(168, 85, 247, 60),
    Rgba8::rgba(236, 72, 153, 60),
    Rgba8::rgba(20, 184, 166, 60),
];

/// Render the standalone grid-visualization export: tinted named areas,
/// their outlines, the dashed cell grid, and (when a label font is
/// available) the area names.
pub fn render_grid_visualization(
    grid: &GridResolver,
    opts: CanvasOptions,
    assets: &mut AssetStore,
    label_font: Option<&str>,
) -> TifoResult<FrameRGBA> {
    let scale = opts.pixel_scale();
    let pw = opts.pixel_width();
    let ph = opts.pixel_height();

    let mut pixmap = vello_cpu::Pixmap::new(dim_u16(pw)?, dim_u16(ph)?);
    clear_pixmap_to_transparent(&mut pixmap);
    let mut ctx = vello_cpu::RenderContext::new(dim_u16(pw)?, dim_u16(ph)?);
    ctx.reset();

    // White backdrop so the overlay reads on its own.
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(Rgba8::rgb(255, 255, 255).to_peniko());
    fill_px_rect(&mut ctx, 0.0, 0.0, f64::from(pw), f64::from(ph));

    for (idx, area) in grid.areas().enumerate() {
        let Some(b) = grid.area_bounds(&area.name) else {
            continue;
        };
        let (x, y, w, h) = (b.x * scale, b.y * scale, b.width * scale, b.height * scale);
        let tint = AREA_TINTS[idx % AREA_TINTS.len()];
        ctx.set_paint(tint.to_peniko());
        fill_px_rect(&mut ctx, x, y, w, h);
        ctx.set_paint(Rgba8::rgb(tint.r, tint.g, tint.b).to_peniko());
        outline_rect(&mut ctx, x, y, w, h, 2.0);
    }

    let spec = grid.spec();
    draw_debug_grid(
        &mut ctx,
        spec.columns,
        spec.rows,
        f64::from(pw),
        f64::from(ph),
        DebugGridStyle::default(),
    );

    if let Some(font) = label_font {
        draw_area_labels(&mut ctx, grid, assets, font, scale)?;
    }

    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);

    Ok(FrameRGBA {
        width: pw,
        height: ph,
        data: pixmap.data_as_u8_slice().to_vec(),
    })
}

fn draw_area_labels(
    ctx: &mut vello_cpu::RenderContext,
    grid: &GridResolver,
    assets: &mut AssetStore,
    font: &str,
    scale: f64,
) -> TifoResult<()> {
    let brush = TextBrushRgba8 {
        r: 17,
        g: 24,
        b: 39,
        a: 255,
    };
    for area in grid.areas() {
        let Some(b) = grid.area_bounds(&area.name) else {
            continue;
        };
        let (layout, font_bytes) =
            assets.layout_text(&area.name, font, (16.0 * scale) as f32, brush, None)?;
        let font_data = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font_bytes.as_ref().clone()),
            0,
        );
        let center = b.center();
        super::draw::draw_layout_at(
            ctx,
            &layout,
            &font_data,
            center.x * scale,
            center.y * scale,
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::grid::GridSpec;

    #[test]
    fn grid_visualization_is_non_blank_and_sized() {
        let grid = GridResolver::parse(
            "a b\nc d",
            GridSpec {
                columns: 2,
                rows: 2,
                gap_px: 0.0,
            },
            64.0,
            64.0,
        )
        .unwrap();
        let opts = CanvasOptions::new(64, 64).unwrap();
        let mut assets = AssetStore::new(".");
        let frame = render_grid_visualization(&grid, opts, &mut assets, None).unwrap();
        assert_eq!((frame.width, frame.height), (64, 64));
        assert!(frame.data.iter().any(|&b| b != 0));
    }

    #[test]
    fn visualization_is_deterministic() {
        let grid = GridResolver::parse(
            "a a\nb b",
            GridSpec {
                columns: 2,
                rows: 2,
                gap_px: 0.0,
            },
            32.0,
            32.0,
        )
        .unwrap();
        let opts = CanvasOptions::new(32, 32).unwrap();
        let mut assets = AssetStore::new(".");
        let a = render_grid_visualization(&grid, opts, &mut assets, None).unwrap();
        let b = render_grid_visualization(&grid, opts, &mut assets, None).unwrap();
        assert_eq!(a.data, b.data);
    }
}
