use crate::foundation::core::{PixelSize, Rgba8};
use crate::foundation::error::{TilecapError, TilecapResult};

/// Flat row-major RGBA8 pixel buffer.
///
/// Fields are public so that adapters can hand over raw read-backs untouched; consumers must not
/// assume `data.len() == width * height` and should check [`PixelBuffer::is_consistent`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Samples, row-major.
    pub data: Vec<Rgba8>,
}

impl PixelBuffer {
    /// Allocate a `size` buffer filled with `fill`.
    pub fn filled(size: PixelSize, fill: Rgba8) -> Self {
        Self {
            width: size.width,
            height: size.height,
            data: vec![fill; size.area()],
        }
    }

    /// Like [`PixelBuffer::filled`], but reports sizes that cannot be allocated instead of
    /// aborting.
    pub fn try_filled(size: PixelSize, fill: Rgba8) -> TilecapResult<Self> {
        let area = size.checked_area().ok_or_else(|| {
            TilecapError::precondition(format!("{size} pixel buffer does not fit in memory"))
        })?;
        let mut data = Vec::new();
        data.try_reserve_exact(area).map_err(|e| {
            TilecapError::precondition(format!("cannot allocate {size} pixel buffer: {e}"))
        })?;
        data.resize(area, fill);
        Ok(Self {
            width: size.width,
            height: size.height,
            data,
        })
    }

    /// Wrap existing samples, checking that the length matches `size`.
    pub fn from_pixels(size: PixelSize, data: Vec<Rgba8>) -> TilecapResult<Self> {
        if data.len() != size.area() {
            return Err(TilecapError::capture(format!(
                "pixel buffer holds {} samples, expected {} for {size}",
                data.len(),
                size.area()
            )));
        }
        Ok(Self {
            width: size.width,
            height: size.height,
            data,
        })
    }

    /// Decode tightly packed RGBA8 bytes.
    pub fn from_rgba8_bytes(size: PixelSize, bytes: &[u8]) -> TilecapResult<Self> {
        if bytes.len() != size.area().saturating_mul(4) {
            return Err(TilecapError::capture(format!(
                "rgba8 payload is {} bytes, expected {} for {size}",
                bytes.len(),
                size.area().saturating_mul(4)
            )));
        }
        let data = bytes
            .chunks_exact(4)
            .map(|px| Rgba8::new(px[0], px[1], px[2], px[3]))
            .collect();
        Ok(Self {
            width: size.width,
            height: size.height,
            data,
        })
    }

    /// Dimensions as a [`PixelSize`].
    pub fn size(&self) -> PixelSize {
        PixelSize::new(self.width, self.height)
    }

    /// Return `true` when `data.len() == width * height`.
    pub fn is_consistent(&self) -> bool {
        self.data.len() == self.size().area()
    }

    /// Sample at `(x, y)`, or `None` when out of range.
    pub fn get(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        self.data.get(idx).copied()
    }

    /// Reverse row order in place (bottom-up <-> top-down).
    pub fn flip_rows(&mut self) {
        let w = self.width as usize;
        let h = self.height as usize;
        if w == 0 || !self.is_consistent() {
            return;
        }
        for y in 0..h / 2 {
            let (top, bottom) = self.data.split_at_mut((h - 1 - y) * w);
            top[y * w..(y + 1) * w].swap_with_slice(&mut bottom[..w]);
        }
    }

    /// Tightly packed RGBA8 bytes in the buffer's row order.
    pub fn to_rgba8_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len() * 4);
        for px in &self.data {
            out.extend_from_slice(&px.to_array());
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/buffer.rs"]
mod tests;
