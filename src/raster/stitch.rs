use crate::foundation::core::{PixelOffset, PixelSize};
use crate::raster::buffer::PixelBuffer;

/// Copy `tile` into `dest` with its top-left (row 0, column 0) at `dest_offset`.
///
/// `tile_size` is the size the caller asked for, which is what drives the copy loop; a tile whose
/// own dimensions or sample count disagree with it is reported and copied best-effort. Pixels that
/// land outside `dest` are dropped, never wrapped into a neighbouring row.
pub fn stitch(
    tile: &PixelBuffer,
    tile_size: PixelSize,
    dest_offset: PixelOffset,
    dest: &mut PixelBuffer,
) {
    let dest_size = dest.size();
    if !dest.is_consistent() {
        tracing::warn!(
            len = dest.data.len(),
            expected = dest_size.area(),
            size = %dest_size,
            "destination buffer length does not match its dimensions"
        );
    }
    if tile.data.len() != tile_size.area() {
        tracing::warn!(
            len = tile.data.len(),
            expected = tile_size.area(),
            size = %tile_size,
            "tile buffer length does not match the requested tile size"
        );
    }

    let (tile_w, tile_h) = (i64::from(tile_size.width), i64::from(tile_size.height));
    let (dest_w, dest_h) = (i64::from(dest_size.width), i64::from(dest_size.height));

    // Clamp the copy window once instead of testing every pixel.
    let x0 = dest_offset.x.saturating_neg().clamp(0, tile_w);
    let x1 = dest_w.saturating_sub(dest_offset.x).clamp(x0, tile_w);
    let y0 = dest_offset.y.saturating_neg().clamp(0, tile_h);
    let y1 = dest_h.saturating_sub(dest_offset.y).clamp(y0, tile_h);

    for y in y0..y1 {
        let dy = y + dest_offset.y;
        for x in x0..x1 {
            let dx = x + dest_offset.x;
            let tile_idx = (y * tile_w + x) as usize;
            let dest_idx = (dy * dest_w + dx) as usize;
            let (Some(&src), Some(dst)) = (tile.data.get(tile_idx), dest.data.get_mut(dest_idx))
            else {
                continue;
            };
            *dst = src;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/stitch.rs"]
mod tests;
