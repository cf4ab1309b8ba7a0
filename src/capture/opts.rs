use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{TilecapError, TilecapResult};

/// Runtime knobs for one capture.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptureOpts {
    /// Wait between a tile's redraw request and its read-back.
    pub tile_delay: Duration,
    /// Wait after forcing the view to 1x, before the first tile.
    pub scale_settle_delay: Duration,
    /// Shortest interval a driver lets pass between two resumes.
    pub min_tick: Duration,
    /// Put the original pan/zoom back when a capture is cancelled or fails.
    pub restore_on_cancel: bool,
    /// Fill for destination pixels no tile covers.
    pub background: Rgba8,
    /// Largest destination image, in pixels, a capture may allocate.
    pub max_pixels: u64,
}

impl Default for CaptureOpts {
    fn default() -> Self {
        Self {
            tile_delay: Duration::from_millis(100),
            scale_settle_delay: Duration::from_millis(250),
            min_tick: Duration::from_millis(10),
            restore_on_cancel: true,
            background: Rgba8::TRANSPARENT,
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }
}

/// On-disk capture configuration (JSON).
///
/// Every field is optional; missing fields keep [`CaptureOpts::default`] values.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaptureConfig {
    /// Inter-tile settle delay, seconds.
    pub tile_delay_secs: Option<f64>,
    /// Post-zoom settle delay, seconds.
    pub scale_settle_delay_secs: Option<f64>,
    /// Minimum driver tick, seconds.
    pub min_tick_secs: Option<f64>,
    /// Restore the view on cancel/failure.
    pub restore_on_cancel: Option<bool>,
    /// Background as `[r, g, b, a]`.
    pub background: Option<[u8; 4]>,
    /// Destination size limit, pixels.
    pub max_pixels: Option<u64>,
    /// Where finished captures go.
    pub output_dir: Option<PathBuf>,
}

/// Default destination size limit: 16384 x 16384 pixels (1 GiB of RGBA8).
pub const DEFAULT_MAX_PIXELS: u64 = 16_384 * 16_384;

/// Output directory used when neither config nor CLI names one.
pub const DEFAULT_OUTPUT_DIR: &str = "captures";

impl CaptureConfig {
    /// Read and parse a JSON config file.
    pub fn load(path: &Path) -> TilecapResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        serde_json::from_slice(&bytes).map_err(|e| {
            TilecapError::config(format!("parse config '{}': {e}", path.display()))
        })
    }

    /// Validate and resolve into runtime options.
    pub fn to_opts(&self) -> TilecapResult<CaptureOpts> {
        let defaults = CaptureOpts::default();
        if self.max_pixels == Some(0) {
            return Err(TilecapError::config("max_pixels must be positive"));
        }
        Ok(CaptureOpts {
            tile_delay: secs_or("tile_delay_secs", self.tile_delay_secs, defaults.tile_delay)?,
            scale_settle_delay: secs_or(
                "scale_settle_delay_secs",
                self.scale_settle_delay_secs,
                defaults.scale_settle_delay,
            )?,
            min_tick: secs_or("min_tick_secs", self.min_tick_secs, defaults.min_tick)?,
            restore_on_cancel: self.restore_on_cancel.unwrap_or(defaults.restore_on_cancel),
            background: self
                .background
                .map(Rgba8::from_array)
                .unwrap_or(defaults.background),
            max_pixels: self.max_pixels.unwrap_or(defaults.max_pixels),
        })
    }

    /// Configured output directory, or [`DEFAULT_OUTPUT_DIR`].
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }
}

fn secs_or(field: &str, v: Option<f64>, default: Duration) -> TilecapResult<Duration> {
    match v {
        None => Ok(default),
        Some(s) => Duration::try_from_secs_f64(s).map_err(|_| {
            TilecapError::config(format!(
                "{field} must be a finite, non-negative number of seconds (got {s})"
            ))
        }),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/opts.rs"]
mod tests;
