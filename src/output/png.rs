use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{TilecapError, TilecapResult};
use crate::output::sink::ImageSink;
use crate::raster::buffer::PixelBuffer;

/// Writes each capture as a PNG into one directory, never overwriting an earlier file.
#[derive(Clone, Debug)]
pub struct PngDirSink {
    dir: PathBuf,
}

impl PngDirSink {
    /// Sink writing into `dir` (created on first save).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ImageSink for PngDirSink {
    fn save(&mut self, image: &PixelBuffer, name: &str) -> TilecapResult<PathBuf> {
        if !image.is_consistent() {
            return Err(TilecapError::output(format!(
                "refusing to encode {}x{} image with {} samples",
                image.width,
                image.height,
                image.data.len()
            )));
        }

        std::fs::create_dir_all(&self.dir).with_context(|| {
            format!("failed to create output directory '{}'", self.dir.display())
        })?;
        let path = unique_png_path(&self.dir, &sanitize_name(name));

        let mut top_down = image.clone();
        top_down.flip_rows();
        image::save_buffer_with_format(
            &path,
            &top_down.to_rgba8_bytes(),
            image.width,
            image.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;

        tracing::info!(path = %path.display(), "saved capture");
        Ok(path)
    }
}

/// Strip the unsaved-document marker and path separators from a capture name.
pub fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|&c| c != '*')
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        "capture".to_string()
    } else {
        cleaned.to_string()
    }
}

/// `<dir>/<name>.png`, or the first free `<dir>/<name>NNN.png` counting up from `000`.
pub fn unique_png_path(dir: &Path, name: &str) -> PathBuf {
    let mut path = dir.join(format!("{name}.png"));
    let mut i = 0u32;
    while path.exists() {
        path = dir.join(format!("{name}{i:03}.png"));
        i += 1;
    }
    path
}

#[cfg(test)]
#[path = "../../tests/unit/output/png.rs"]
mod tests;
