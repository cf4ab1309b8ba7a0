//! Capture scheduling and the host view seam.

/// Periodic driver for capture jobs.
pub mod driver;
/// The resumable capture state machine.
pub mod job;
/// Capture options and config files.
pub mod opts;
/// Software view over an in-memory canvas.
pub mod raster_view;
/// Host view capability trait.
pub mod view;
