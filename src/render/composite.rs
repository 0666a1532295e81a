use crate::foundation::error::{TifoError, TifoResult};
use crate::foundation::math::mul_div255_u8;

pub type PremulRgba8 = [u8; 4];

/// Source-over for one premultiplied pixel with an extra opacity factor.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Source-over an entire equal-size premultiplied buffer onto `dst`.
pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> TifoResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(TifoError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Source-over a `src_w` x `src_h` premultiplied buffer onto `dst` at
/// `(x, y)`. Rows falling outside the destination are clipped; this is how
/// container pixmaps land at their resolved bounds.
#[allow(clippy::too_many_arguments)]
pub fn blit_over(
    dst: &mut [u8],
    dst_w: u32,
    dst_h: u32,
    src: &[u8],
    src_w: u32,
    src_h: u32,
    x: i64,
    y: i64,
) -> TifoResult<()> {
    let dst_expected = (dst_w as usize) * (dst_h as usize) * 4;
    let src_expected = (src_w as usize) * (src_h as usize) * 4;
    if dst.len() != dst_expected || src.len() != src_expected {
        return Err(TifoError::render("blit_over buffer size mismatch"));
    }

    for sy in 0..src_h as i64 {
        let dy = y + sy;
        if dy < 0 || dy >= dst_h as i64 {
            continue;
        }
        for sx in 0..src_w as i64 {
            let dx = x + sx;
            if dx < 0 || dx >= dst_w as i64 {
                continue;
            }
            let si = ((sy as usize) * (src_w as usize) + (sx as usize)) * 4;
            let di = ((dy as usize) * (dst_w as usize) + (dx as usize)) * 4;
            let s = [src[si], src[si + 1], src[si + 2], src[si + 3]];
            if s[3] == 0 {
                continue;
            }
            let d = [dst[di], dst[di + 1], dst[di + 2], dst[di + 3]];
            dst[di..di + 4].copy_from_slice(&over(d, s, 1.0));
        }
    }
    Ok(())
}

/// Convert premultiplied RGBA8 back to straight alpha for PNG encoding.
pub fn unpremultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            let v = (u16::from(*c) * 255 + a / 2) / a;
            *c = v.min(255) as u8;
        }
    }
}
