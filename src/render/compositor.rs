use std::collections::BTreeSet;
use std::io::Cursor;

use base64::Engine as _;

use crate::{
    assets::store::AssetStore,
    catalog::themes::ColorTheme,
    composition::model::{Block, Floater},
    foundation::{
        core::{BoundingBox, CanvasOptions, FrameRGBA},
        error::{TifoError, TifoResult},
    },
    layout::grid::{GridResolver, GridSpec},
    render::{
        composite::{blit_over, unpremultiply_in_place},
        draw::{DrawCtx, clear_pixmap_to_transparent, dim_u16, draw_kind},
    },
};

/// Owns a grid resolver, the full set of blocks/floaters, and the backing
/// pixel buffer; renders one layer at a time or everything in order.
///
/// Rendering layer 0 clears the canvas first; rendering any other single
/// layer accumulates over whatever is already there. That lets callers paint
/// 0..N in sequence without losing work, but it also means rendering layers
/// out of order, or skipping 0, accumulates stale pixels. Exporters
/// therefore build a fresh `Compositor` per single-layer capture.
pub struct Compositor {
    opts: CanvasOptions,
    grid: GridResolver,
    theme: ColorTheme,
    blocks: Vec<Block>,
    floaters: Vec<Floater>,
    pixmap: vello_cpu::Pixmap,
    ctx: Option<vello_cpu::RenderContext>,
}

impl Compositor {
    pub fn new(
        template: &str,
        grid_spec: GridSpec,
        theme: &ColorTheme,
        opts: CanvasOptions,
    ) -> TifoResult<Self> {
        let grid = GridResolver::parse(
            template,
            grid_spec,
            f64::from(opts.width),
            f64::from(opts.height),
        )?;
        let pixmap =
            vello_cpu::Pixmap::new(dim_u16(opts.pixel_width())?, dim_u16(opts.pixel_height())?);
        Ok(Self {
            opts,
            grid,
            theme: *theme,
            blocks: Vec::new(),
            floaters: Vec::new(),
            pixmap,
            ctx: None,
        })
    }

    pub fn options(&self) -> CanvasOptions {
        self.opts
    }

    pub fn grid(&self) -> &GridResolver {
        &self.grid
    }

    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn add_floater(&mut self, floater: Floater) {
        self.floaters.push(floater);
    }

    /// Distinct layer numbers present across every element, ascending.
    pub fn layers(&self) -> BTreeSet<u32> {
        self.blocks
            .iter()
            .flat_map(|b| b.elements.iter())
            .chain(self.floaters.iter().flat_map(|f| f.elements.iter()))
            .map(|el| el.layer)
            .collect()
    }

    /// Reset the canvas to transparent.
    pub fn clear(&mut self) {
        clear_pixmap_to_transparent(&mut self.pixmap);
    }

    /// Render a single layer. Within the layer, floaters paint before
    /// blocks, each group in insertion order. A block whose grid area does
    /// not resolve is skipped with a warning; a missing optional area must
    /// never abort the composite.
    pub fn render_layer(&mut self, assets: &mut AssetStore, layer: u32) -> TifoResult<()> {
        if layer == 0 {
            self.clear();
        }

        let floaters = std::mem::take(&mut self.floaters);
        let blocks = std::mem::take(&mut self.blocks);
        let result = self.render_layer_containers(assets, &floaters, &blocks, layer);
        self.floaters = floaters;
        self.blocks = blocks;
        result
    }

    fn render_layer_containers(
        &mut self,
        assets: &mut AssetStore,
        floaters: &[Floater],
        blocks: &[Block],
        layer: u32,
    ) -> TifoResult<()> {
        for floater in floaters {
            let bounds = floater.bounds.unwrap_or_else(|| self.opts.bounds());
            self.render_container(assets, &floater.elements, layer, bounds)?;
        }
        for block in blocks {
            let Some(area_bounds) = self.grid.area_bounds(&block.grid_area) else {
                tracing::warn!(area = %block.grid_area, "grid area not found, skipping block");
                continue;
            };
            let bounds = area_bounds.inset(block.padding);
            if bounds.is_empty() {
                continue;
            }
            self.render_container(assets, &block.elements, layer, bounds)?;
        }
        Ok(())
    }

    /// Render every layer present, ascending. Layer paint order is the sole
    /// compositing discipline; it must stay deterministic for visual
    /// regression testing.
    pub fn render_all(&mut self, assets: &mut AssetStore) -> TifoResult<()> {
        for layer in self.layers() {
            self.render_layer(assets, layer)?;
        }
        Ok(())
    }

    /// Paint one container's elements for `layer` into a bounds-sized
    /// offscreen pixmap, then source-over blit it at its position. The
    /// offscreen surface is what clips content to the container's bounds.
    fn render_container(
        &mut self,
        assets: &mut AssetStore,
        elements: &[crate::composition::element::PaintElement],
        layer: u32,
        bounds: BoundingBox,
    ) -> TifoResult<()> {
        let wanted: Vec<_> = elements.iter().filter(|el| el.layer == layer).collect();
        if wanted.is_empty() || bounds.is_empty() {
            return Ok(());
        }

        let scale = self.opts.pixel_scale();
        let pw = ((bounds.width * scale).round() as u32).max(1);
        let ph = ((bounds.height * scale).round() as u32).max(1);
        let (pw16, ph16) = (dim_u16(pw)?, dim_u16(ph)?);

        let mut temp = vello_cpu::Pixmap::new(pw16, ph16);
        let local = BoundingBox::new(0.0, 0.0, bounds.width, bounds.height);

        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == pw16 && ctx.height() == ph16 => ctx,
            _ => vello_cpu::RenderContext::new(pw16, ph16),
        };
        ctx.reset();

        let mut draw_ctx = DrawCtx {
            assets,
            theme: &self.theme,
            scale,
        };
        let mut outcome = Ok(());
        for el in wanted {
            if let Err(e) = draw_kind(&mut ctx, &mut draw_ctx, &el.kind, local) {
                outcome = Err(e);
                break;
            }
        }
        if outcome.is_ok() {
            ctx.flush();
            ctx.render_to_pixmap(&mut temp);
        }
        self.ctx = Some(ctx);
        outcome?;

        blit_over(
            self.pixmap.data_as_u8_slice_mut(),
            self.opts.pixel_width(),
            self.opts.pixel_height(),
            temp.data_as_u8_slice(),
            pw,
            ph,
            (bounds.x * scale).round() as i64,
            (bounds.y * scale).round() as i64,
        )
    }

    /// Current canvas pixels as a premultiplied RGBA8 frame.
    pub fn frame(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.opts.pixel_width(),
            height: self.opts.pixel_height(),
            data: self.pixmap.data_as_u8_slice().to_vec(),
        }
    }

    /// Encode the canvas as PNG bytes (straight alpha).
    pub fn to_png(&self) -> TifoResult<Vec<u8>> {
        encode_png(&self.frame())
    }

    /// Encode the canvas as a base64 PNG data URL.
    pub fn to_data_url(&self) -> TifoResult<String> {
        Ok(png_data_url(&self.to_png()?))
    }
}

/// Encode a premultiplied frame as PNG bytes.
pub fn encode_png(frame: &FrameRGBA) -> TifoResult<Vec<u8>> {
    if frame.data.len() != frame.expected_len() {
        return Err(TifoError::encode("frame buffer size mismatch"));
    }
    let mut straight = frame.data.clone();
    unpremultiply_in_place(&mut straight);
    let img = image::RgbaImage::from_raw(frame.width, frame.height, straight)
        .ok_or_else(|| TifoError::encode("invalid rgba buffer size"))?;
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| TifoError::encode(format!("png encode failed: {e}")))?;
    Ok(buf)
}

/// Wrap PNG bytes in a `data:image/png;base64,` URL.
pub fn png_data_url(png: &[u8]) -> String {
    let b64 = base64::engine::general_purpose::STANDARD.encode(png);
    format!("data:image/png;base64,{b64}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::element::{FillStyle, PaintElement, PaintKind};
    use crate::foundation::color::Rgba8;

    fn theme() -> ColorTheme {
        *crate::catalog::themes::theme_by_name("royal").unwrap()
    }

    fn small_compositor() -> Compositor {
        let spec = GridSpec {
            columns: 2,
            rows: 2,
            gap_px: 0.0,
        };
        Compositor::new(
            "a b\nc d",
            spec,
            &theme(),
            CanvasOptions::new(8, 8).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn layers_collects_distinct_sorted() {
        let mut comp = small_compositor();
        comp.add_block(
            Block::new("a")
                .element(PaintElement::new(
                    5,
                    PaintKind::Fill(FillStyle::Solid(Rgba8::rgb(1, 1, 1))),
                ))
                .element(PaintElement::new(
                    0,
                    PaintKind::Fill(FillStyle::Solid(Rgba8::rgb(2, 2, 2))),
                )),
        );
        comp.add_floater(Floater::full_canvas().element(PaintElement::new(
            2,
            PaintKind::Fill(FillStyle::Solid(Rgba8::rgb(3, 3, 3))),
        )));
        let layers: Vec<u32> = comp.layers().into_iter().collect();
        assert_eq!(layers, [0, 2, 5]);
    }

    #[test]
    fn missing_area_is_skipped_not_fatal() {
        let mut comp = small_compositor();
        comp.add_block(Block::new("nope").element(PaintElement::new(
            0,
            PaintKind::Fill(FillStyle::Solid(Rgba8::rgb(9, 9, 9))),
        )));
        let mut assets = AssetStore::new(".");
        comp.render_layer(&mut assets, 0).unwrap();
        assert!(comp.frame().data.iter().all(|&b| b == 0));
    }

    #[test]
    fn render_layer_zero_clears_previous_content() {
        let mut comp = small_compositor();
        comp.add_block(Block::new("a").element(PaintElement::new(
            1,
            PaintKind::Fill(FillStyle::Solid(Rgba8::rgb(255, 0, 0))),
        )));
        let mut assets = AssetStore::new(".");
        comp.render_layer(&mut assets, 1).unwrap();
        assert!(comp.frame().data.iter().any(|&b| b != 0));

        // Layer 0 has no content but still wipes the canvas.
        comp.render_layer(&mut assets, 0).unwrap();
        assert!(comp.frame().data.iter().all(|&b| b == 0));
    }

    #[test]
    fn fill_lands_inside_area_bounds_only() {
        let mut comp = small_compositor();
        comp.add_block(Block::new("d").element(PaintElement::new(
            0,
            PaintKind::Fill(FillStyle::Solid(Rgba8::rgb(0, 255, 0))),
        )));
        let mut assets = AssetStore::new(".");
        comp.render_layer(&mut assets, 0).unwrap();

        let frame = comp.frame();
        let px = |x: usize, y: usize| {
            let i = (y * 8 + x) * 4;
            [frame.data[i], frame.data[i + 1], frame.data[i + 2], frame.data[i + 3]]
        };
        // Area "d" is the bottom-right quadrant of the 8x8 canvas.
        assert_eq!(px(6, 6), [0, 255, 0, 255]);
        assert_eq!(px(1, 1), [0, 0, 0, 0]);
        assert_eq!(px(6, 1), [0, 0, 0, 0]);
    }

    #[test]
    fn data_url_has_png_prefix() {
        let comp = small_compositor();
        let url = comp.to_data_url().unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
    }
}
