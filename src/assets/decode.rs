use std::sync::Arc;

use anyhow::Context;

use crate::{
    TifoResult,
    assets::store::{PreparedImage, PreparedSvg},
};

/// Decode encoded image bytes (PNG/JPEG/...) to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> TifoResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Parse SVG bytes (vector logos, crests) into a prepared `usvg` tree.
pub fn parse_svg(bytes: &[u8]) -> TifoResult<PreparedSvg> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;
    Ok(PreparedSvg {
        tree: Arc::new(tree),
    })
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes(rgba: [u8; 4]) -> Vec<u8> {
        let img = image::RgbaImage::from_raw(1, 1, rgba.to_vec()).unwrap();
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn decode_premultiplies_alpha() {
        let prepared = decode_image(&png_bytes([200, 100, 0, 128])).unwrap();
        assert_eq!(prepared.width, 1);
        assert_eq!(prepared.height, 1);
        let px = &prepared.rgba8_premul[..4];
        assert_eq!(px[3], 128);
        assert_eq!(px[0], ((200u16 * 128 + 127) / 255) as u8);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode_image(b"not an image").is_err());
    }

    #[test]
    fn parse_svg_reads_dimensions() {
        let svg = br##"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="16"><rect width="24" height="16" fill="#1d4ed8"/></svg>"##;
        let prepared = parse_svg(svg).unwrap();
        assert_eq!(prepared.tree.size().width(), 24.0);
        assert_eq!(prepared.tree.size().height(), 16.0);
    }
}
