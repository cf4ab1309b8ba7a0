//! tilecap captures canvases that are larger than the screen.
//!
//! A zoomable host view (a node graph, a map, a diagram) usually shows its whole content only at a
//! zoom level where details are unreadable. tilecap switches the view to 1x, pans it across the
//! content one viewport at a time, reads each viewport back from the screen and stitches the
//! tiles into one full-resolution image.
//!
//! # Pieces
//!
//! 1. **Plan**: [`ViewMeasure`] maps the current viewport through the inverse view transform to
//!    get the content size in pixels; [`plan`] splits it into a [`TilePlan`].
//! 2. **Stitch**: [`stitch`] copies one read-back into the destination, clipping at its edges.
//! 3. **Schedule**: [`CaptureJob`] is a resumable state machine that pans, redraws, waits, reads
//!    and stitches; [`CaptureDriver`] resumes it from any periodic callback.
//! 4. **Output**: an [`ImageSink`] receives the finished image ([`PngDirSink`] writes PNG files).
//!
//! Hosts plug in through the [`CaptureView`] trait. [`RasterView`] implements it in software for
//! headless use and tests.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Capture scheduling and the host view seam.
pub mod capture;
/// Output sinks.
pub mod output;
/// Tile planning.
pub mod plan;
/// Pixel buffers and tile stitching.
pub mod raster;

pub use crate::foundation::core::{
    Affine, CaptureRect, PixelOffset, PixelSize, Point, Rect, Rgba8, Size, Vec2, ViewTransform,
};
pub use crate::foundation::error::{TilecapError, TilecapResult};

pub use crate::capture::driver::{CaptureDriver, DriverTick};
pub use crate::capture::job::{CaptureJob, CapturePhase, CaptureProgress, CaptureStatus};
pub use crate::capture::opts::{
    CaptureConfig, CaptureOpts, DEFAULT_MAX_PIXELS, DEFAULT_OUTPUT_DIR,
};
pub use crate::capture::raster_view::RasterView;
pub use crate::capture::view::CaptureView;
pub use crate::output::png::{PngDirSink, sanitize_name, unique_png_path};
pub use crate::output::sink::{ImageSink, InMemorySink, SavedImage};
pub use crate::plan::geometry::{TileGrid, TilePlan, ViewMeasure, plan};
pub use crate::raster::buffer::PixelBuffer;
pub use crate::raster::stitch::stitch;
