use crate::foundation::core::PixelSize;
use crate::foundation::error::TilecapResult;
use crate::raster::buffer::PixelBuffer;
use std::path::PathBuf;

/// Result of a finished capture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SavedImage {
    /// Where the sink put the image.
    pub path: PathBuf,
    /// Image dimensions.
    pub size: PixelSize,
}

/// Consumer of the assembled capture.
///
/// `image` arrives bottom-up (row 0 is the bottom of the picture), the same row order the view
/// reads back in. Sinks writing top-down formats flip it themselves.
pub trait ImageSink {
    /// Persist `image` under a name derived from `name`; return where it went.
    fn save(&mut self, image: &PixelBuffer, name: &str) -> TilecapResult<PathBuf>;
}

impl<S: ImageSink + ?Sized> ImageSink for &mut S {
    fn save(&mut self, image: &PixelBuffer, name: &str) -> TilecapResult<PathBuf> {
        (**self).save(image, name)
    }
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    images: Vec<(String, PixelBuffer)>,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Saved images in save order, as `(name, image)`.
    pub fn images(&self) -> &[(String, PixelBuffer)] {
        &self.images
    }
}

impl ImageSink for InMemorySink {
    fn save(&mut self, image: &PixelBuffer, name: &str) -> TilecapResult<PathBuf> {
        let path = PathBuf::from(format!("memory/{}/{name}", self.images.len()));
        self.images.push((name.to_string(), image.clone()));
        Ok(path)
    }
}
