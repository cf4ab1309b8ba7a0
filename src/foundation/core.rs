use crate::foundation::error::{TilecapError, TilecapResult};

pub use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Integer width/height in pixels.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct PixelSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelSize {
    /// Create a size from its two components.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of pixels covered (`width * height`).
    pub fn area(self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }

    /// Pixel count, or `None` when it does not fit in `usize`.
    pub fn checked_area(self) -> Option<usize> {
        (self.width as usize).checked_mul(self.height as usize)
    }

    /// Return `true` when either axis is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Floor a fractional size into whole pixels.
    ///
    /// Negative, NaN or out-of-range components are rejected rather than saturated.
    pub fn floor_from(size: Size) -> TilecapResult<Self> {
        fn axis(v: f64, name: &str) -> TilecapResult<u32> {
            let f = v.floor();
            if !f.is_finite() || f < 0.0 || f > f64::from(u32::MAX) {
                return Err(TilecapError::precondition(format!(
                    "{name} {v} cannot be expressed in whole pixels"
                )));
            }
            Ok(f as u32)
        }
        Ok(Self {
            width: axis(size.width, "width")?,
            height: axis(size.height, "height")?,
        })
    }
}

impl std::fmt::Display for PixelSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Signed pixel offset. Destination offsets may legitimately point outside an image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelOffset {
    /// Horizontal offset in pixels.
    pub x: i64,
    /// Vertical offset in pixels.
    pub y: i64,
}

impl PixelOffset {
    /// Create an offset from its two components.
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Screen-space rectangle to read pixels from, top-left origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaptureRect {
    /// Top-left corner in screen pixels.
    pub origin: PixelOffset,
    /// Extent in pixels.
    pub size: PixelSize,
}

/// Straight-alpha RGBA8 sample.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Create a sample from its four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build from `[r, g, b, a]`.
    pub const fn from_array(v: [u8; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }

    /// Return `[r, g, b, a]`.
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Pan/zoom of a capturable view.
///
/// A content point `c` is shown at viewport-local screen point `c * scale + position`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewTransform {
    /// Translation in screen pixels.
    pub position: Vec2,
    /// Per-axis zoom factor.
    pub scale: Vec2,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            scale: Vec2::new(1.0, 1.0),
        }
    }
}

impl ViewTransform {
    /// Create a transform from a position and per-axis scale.
    pub fn new(position: Vec2, scale: Vec2) -> Self {
        Self { position, scale }
    }

    /// Content-to-screen matrix.
    pub fn to_affine(self) -> Affine {
        Affine::translate(self.position) * Affine::scale_non_uniform(self.scale.x, self.scale.y)
    }

    /// Return `true` when the transform can be inverted safely.
    pub fn is_invertible(self) -> bool {
        self.position.is_finite()
            && self.scale.is_finite()
            && self.scale.x != 0.0
            && self.scale.y != 0.0
    }

    /// Map a viewport-local screen point back into content space.
    pub fn screen_to_content(self, p: Point) -> TilecapResult<Point> {
        if !self.is_invertible() {
            return Err(TilecapError::precondition(format!(
                "view transform {self:?} is not invertible"
            )));
        }
        Ok(self.to_affine().inverse() * p)
    }

    /// Same position, neutral 1x scale.
    pub fn with_unit_scale(self) -> Self {
        Self {
            position: self.position,
            scale: Vec2::new(1.0, 1.0),
        }
    }

    /// Bitwise equality, distinguishing `-0.0` from `0.0`.
    pub fn bit_eq(self, other: Self) -> bool {
        self.position.x.to_bits() == other.position.x.to_bits()
            && self.position.y.to_bits() == other.position.y.to_bits()
            && self.scale.x.to_bits() == other.scale.x.to_bits()
            && self.scale.y.to_bits() == other.scale.y.to_bits()
    }
}
