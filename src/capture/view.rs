use crate::foundation::core::{CaptureRect, Rect, ViewTransform};
use crate::foundation::error::TilecapResult;
use crate::raster::buffer::PixelBuffer;

/// Host-side capabilities a capture needs from the view being captured.
///
/// Adapters translate these calls into whatever the host UI offers. Any call may fail with
/// [`TilecapError::ViewUnavailable`](crate::TilecapError::ViewUnavailable) once the view is gone;
/// the capture treats that as fatal.
pub trait CaptureView {
    /// Current pan/zoom.
    fn view_transform(&self) -> TilecapResult<ViewTransform>;

    /// Replace pan/zoom. Takes effect on the next redraw.
    fn set_view_transform(&mut self, transform: ViewTransform) -> TilecapResult<()>;

    /// Ask the host to repaint the view. There is no completion signal.
    fn request_redraw(&mut self);

    /// On-screen bounds of the view, top-left origin, in screen pixels.
    fn viewport_rect(&self) -> TilecapResult<Rect>;

    /// Synchronously sample what is currently on screen inside `rect`.
    ///
    /// Rows come back bottom-up: row 0 of the buffer is the bottom screen row of `rect`.
    fn read_pixels(&mut self, rect: CaptureRect) -> TilecapResult<PixelBuffer>;
}

impl<V: CaptureView + ?Sized> CaptureView for &mut V {
    fn view_transform(&self) -> TilecapResult<ViewTransform> {
        (**self).view_transform()
    }

    fn set_view_transform(&mut self, transform: ViewTransform) -> TilecapResult<()> {
        (**self).set_view_transform(transform)
    }

    fn request_redraw(&mut self) {
        (**self).request_redraw()
    }

    fn viewport_rect(&self) -> TilecapResult<Rect> {
        (**self).viewport_rect()
    }

    fn read_pixels(&mut self, rect: CaptureRect) -> TilecapResult<PixelBuffer> {
        (**self).read_pixels(rect)
    }
}
