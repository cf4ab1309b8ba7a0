use crate::capture::view::CaptureView;
use crate::foundation::core::{CaptureRect, PixelSize, Point, Rect, Rgba8, ViewTransform};
use crate::foundation::error::{TilecapError, TilecapResult};
use crate::raster::buffer::PixelBuffer;

/// Software stand-in for a host view: an in-memory canvas shown through a pan/zoom viewport.
///
/// Transform changes only become visible after [`CaptureView::request_redraw`], the way a real
/// host repaints lazily. Sampling is nearest-neighbour at pixel centres.
#[derive(Clone, Debug)]
pub struct RasterView {
    content: PixelBuffer,
    viewport: Rect,
    transform: ViewTransform,
    shown: ViewTransform,
    background: Rgba8,
    attached: bool,
    redraws: u64,
}

impl RasterView {
    /// Show `content` (top-down rows) through `viewport` (screen pixels) with `transform`.
    pub fn new(content: PixelBuffer, viewport: Rect, transform: ViewTransform) -> Self {
        Self {
            content,
            viewport,
            transform,
            shown: transform,
            background: Rgba8::TRANSPARENT,
            attached: true,
            redraws: 0,
        }
    }

    /// Wrap a decoded RGBA image as the canvas content.
    pub fn from_image(
        img: &image::RgbaImage,
        viewport: Rect,
        transform: ViewTransform,
    ) -> TilecapResult<Self> {
        let size = PixelSize::new(img.width(), img.height());
        let content = PixelBuffer::from_rgba8_bytes(size, img.as_raw())?;
        Ok(Self::new(content, viewport, transform))
    }

    /// What shows outside the canvas.
    pub fn with_background(mut self, background: Rgba8) -> Self {
        self.background = background;
        self
    }

    /// Canvas content, top-down.
    pub fn content(&self) -> &PixelBuffer {
        &self.content
    }

    /// Number of redraws requested so far.
    pub fn redraws(&self) -> u64 {
        self.redraws
    }

    /// Simulate the host closing the view; every later call fails.
    pub fn detach(&mut self) {
        self.attached = false;
    }

    fn ensure_attached(&self) -> TilecapResult<()> {
        if self.attached {
            Ok(())
        } else {
            Err(TilecapError::view_unavailable("raster view was detached"))
        }
    }

    fn sample(&self, local: Point) -> Rgba8 {
        let Ok(c) = self.shown.screen_to_content(local) else {
            return self.background;
        };
        let (cx, cy) = (c.x.floor(), c.y.floor());
        if cx < 0.0 || cy < 0.0 {
            return self.background;
        }
        self.content
            .get(cx as u32, cy as u32)
            .unwrap_or(self.background)
    }
}

impl CaptureView for RasterView {
    fn view_transform(&self) -> TilecapResult<ViewTransform> {
        self.ensure_attached()?;
        Ok(self.transform)
    }

    fn set_view_transform(&mut self, transform: ViewTransform) -> TilecapResult<()> {
        self.ensure_attached()?;
        self.transform = transform;
        Ok(())
    }

    fn request_redraw(&mut self) {
        if self.attached {
            self.shown = self.transform;
            self.redraws += 1;
        }
    }

    fn viewport_rect(&self) -> TilecapResult<Rect> {
        self.ensure_attached()?;
        Ok(self.viewport)
    }

    fn read_pixels(&mut self, rect: CaptureRect) -> TilecapResult<PixelBuffer> {
        self.ensure_attached()?;
        let PixelSize { width, height } = rect.size;
        let vx0 = self.viewport.x0.floor() as i64;
        let vy0 = self.viewport.y0.floor() as i64;
        let (vw, vh) = (
            self.viewport.width().floor() as i64,
            self.viewport.height().floor() as i64,
        );

        let mut out = PixelBuffer::filled(rect.size, self.background);
        for row in 0..height {
            // Bottom-up: buffer row 0 is the bottom screen row of `rect`.
            let sy = rect.origin.y + i64::from(height - 1 - row) - vy0;
            for col in 0..width {
                let sx = rect.origin.x + i64::from(col) - vx0;
                if sx < 0 || sy < 0 || sx >= vw || sy >= vh {
                    continue;
                }
                let px = self.sample(Point::new(sx as f64 + 0.5, sy as f64 + 0.5));
                out.data[(row as usize) * (width as usize) + col as usize] = px;
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/raster_view.rs"]
mod tests;
