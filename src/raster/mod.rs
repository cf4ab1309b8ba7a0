//! Pixel buffers and tile stitching.

/// Row-major RGBA8 buffer.
pub mod buffer;
/// Copying tiles into the destination image.
pub mod stitch;
