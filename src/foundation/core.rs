use crate::foundation::error::{TifoError, TifoResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Logical canvas size plus target pixel density.
///
/// DPI scales the backing pixel buffer: a 1080x1080 canvas at 300 DPI
/// allocates a 4500x4500 pixmap and a uniform context scale maps logical
/// coordinates onto it, so print-density exports really contain more pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CanvasOptions {
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_dpi")]
    pub dpi: u32,
}

fn default_dpi() -> u32 {
    CanvasOptions::BASE_DPI
}

impl CanvasOptions {
    /// Screen density; at this DPI logical and pixel sizes coincide.
    pub const BASE_DPI: u32 = 72;

    pub fn new(width: u32, height: u32) -> TifoResult<Self> {
        Self::with_dpi(width, height, Self::BASE_DPI)
    }

    pub fn with_dpi(width: u32, height: u32, dpi: u32) -> TifoResult<Self> {
        if width == 0 || height == 0 {
            return Err(TifoError::validation("canvas width/height must be > 0"));
        }
        if dpi < Self::BASE_DPI {
            return Err(TifoError::validation(format!(
                "dpi must be >= {}",
                Self::BASE_DPI
            )));
        }
        Ok(Self { width, height, dpi })
    }

    /// Uniform scale from logical coordinates to backing pixels.
    pub fn pixel_scale(self) -> f64 {
        f64::from(self.dpi) / f64::from(Self::BASE_DPI)
    }

    pub fn pixel_width(self) -> u32 {
        ((f64::from(self.width) * self.pixel_scale()).round() as u32).max(1)
    }

    pub fn pixel_height(self) -> u32 {
        ((f64::from(self.height) * self.pixel_scale()).round() as u32).max(1)
    }

    /// Full logical canvas rectangle at origin.
    pub fn bounds(self) -> BoundingBox {
        BoundingBox::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

/// Axis-aligned rectangle in logical pixel space.
#[derive(Clone, Copy, Debug, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Shrink uniformly by `amount` on every side, clamping at zero size.
    pub fn inset(self, amount: f64) -> Self {
        Self::new(
            self.x + amount,
            self.y + amount,
            self.width - 2.0 * amount,
            self.height - 2.0 * amount,
        )
    }

    pub fn center(self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8Premul {
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }
}

/// A rendered frame in row-major premultiplied RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl FrameRGBA {
    pub fn expected_len(&self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }
}
