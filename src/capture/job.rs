//! The resumable capture process.
//!
//! A [`CaptureJob`] is a state machine that performs one bounded step per [`CaptureJob::resume`]
//! call and then tells its driver how long to wait before the next one. Redraws are only hints, so
//! every pixel read-back is preceded by a suspension that gives the host time to repaint.
//!
//! Step sequence:
//!
//! 1. snapshot the view, measure content and plan tiles, force 1x zoom, redraw, wait
//!    `scale_settle_delay`;
//! 2. pan to the first tile, redraw, wait `tile_delay`;
//! 3. read the tile back, stitch it, pan to the next tile, redraw, wait `tile_delay`; repeat;
//! 4. after the last tile hand the image to the sink and restore the original pan/zoom.

use std::time::Duration;

use crate::capture::opts::CaptureOpts;
use crate::capture::view::CaptureView;
use crate::foundation::core::{CaptureRect, PixelOffset, ViewTransform};
use crate::foundation::error::{TilecapError, TilecapResult};
use crate::output::sink::{ImageSink, SavedImage};
use crate::plan::geometry::{TileCursor, TilePlan, ViewMeasure, plan};
use crate::raster::buffer::PixelBuffer;
use crate::raster::stitch::stitch;

/// What a driver should do after a [`CaptureJob::resume`].
#[derive(Debug)]
pub enum CaptureStatus {
    /// Resume again once at least this much time has passed.
    Continue(Duration),
    /// The image was assembled and handed to the sink.
    Done(SavedImage),
    /// The capture stopped; the job is finished.
    Failed(TilecapError),
}

/// Externally visible stage of a job.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CapturePhase {
    /// Nothing measured yet; the next resume snapshots the view.
    Preparing,
    /// Zoom forced to 1x; waiting for the host to re-layout.
    Settling,
    /// A tile is on screen and will be read back on the next resume.
    CapturingTile {
        /// Tile column.
        column: u32,
        /// Tile row.
        row: u32,
    },
    /// Finished, failed or cancelled.
    Idle,
}

/// Tiles captured so far.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CaptureProgress {
    /// Tiles read back and stitched.
    pub tiles_done: u64,
    /// Tiles in the plan; zero until the view has been measured.
    pub tiles_total: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Preparing,
    Settling,
    AwaitingTile(TileCursor),
    Done,
    Failed,
    Cancelled,
}

struct Session {
    original: ViewTransform,
    measure: ViewMeasure,
    plan: TilePlan,
    capture_origin: PixelOffset,
    dest: PixelBuffer,
}

/// One capture request, from first resume to saved image.
pub struct CaptureJob {
    name: String,
    opts: CaptureOpts,
    stage: Stage,
    session: Option<Session>,
    last_plan: Option<TilePlan>,
    tiles_done: u64,
}

impl CaptureJob {
    /// New job; nothing touches the view until the first [`CaptureJob::resume`].
    pub fn new(name: impl Into<String>, opts: CaptureOpts) -> Self {
        Self {
            name: name.into(),
            opts,
            stage: Stage::Preparing,
            session: None,
            last_plan: None,
            tiles_done: 0,
        }
    }

    /// Name handed to the sink.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Options this job runs with.
    pub fn opts(&self) -> &CaptureOpts {
        &self.opts
    }

    /// Tile plan, once the view has been measured.
    pub fn plan(&self) -> Option<&TilePlan> {
        self.last_plan.as_ref()
    }

    /// Current stage.
    pub fn phase(&self) -> CapturePhase {
        match self.stage {
            Stage::Preparing => CapturePhase::Preparing,
            Stage::Settling => CapturePhase::Settling,
            Stage::AwaitingTile(c) => CapturePhase::CapturingTile {
                column: c.column,
                row: c.row,
            },
            Stage::Done | Stage::Failed | Stage::Cancelled => CapturePhase::Idle,
        }
    }

    /// Tiles done versus planned.
    pub fn progress(&self) -> CaptureProgress {
        CaptureProgress {
            tiles_done: self.tiles_done,
            tiles_total: self.last_plan.map_or(0, |p| p.tiles_total()),
        }
    }

    /// Return `true` once the job can no longer make progress.
    pub fn is_finished(&self) -> bool {
        matches!(self.stage, Stage::Done | Stage::Failed | Stage::Cancelled)
    }

    /// Run the next step.
    ///
    /// Errors are terminal: the job moves to idle, restores the view when
    /// [`CaptureOpts::restore_on_cancel`] is set, and reports [`CaptureStatus::Failed`].
    pub fn resume(
        &mut self,
        view: &mut dyn CaptureView,
        sink: &mut dyn ImageSink,
    ) -> CaptureStatus {
        match self.stage {
            Stage::Cancelled => return CaptureStatus::Failed(TilecapError::Cancelled),
            Stage::Done | Stage::Failed => {
                return CaptureStatus::Failed(TilecapError::capture(format!(
                    "capture '{}' already finished",
                    self.name
                )));
            }
            _ => {}
        }

        match self.step(view, sink) {
            Ok(status) => status,
            Err(err) => {
                tracing::error!(name = %self.name, error = %err, "capture failed");
                self.stage = Stage::Failed;
                self.release(view);
                CaptureStatus::Failed(err)
            }
        }
    }

    /// Stop the capture and drop its progress.
    ///
    /// The view gets its original pan/zoom back only when [`CaptureOpts::restore_on_cancel`] is
    /// set; otherwise it stays wherever the last tile left it.
    pub fn cancel(&mut self, view: &mut dyn CaptureView) {
        if self.is_finished() {
            return;
        }
        tracing::info!(name = %self.name, tiles_done = self.tiles_done, "capture cancelled");
        self.stage = Stage::Cancelled;
        self.release(view);
    }

    fn step(
        &mut self,
        view: &mut dyn CaptureView,
        sink: &mut dyn ImageSink,
    ) -> TilecapResult<CaptureStatus> {
        match self.stage {
            Stage::Preparing => self.prepare(view),
            Stage::Settling => {
                let first = TileCursor::first(&self.session()?.plan);
                self.show_tile(view, first)
            }
            Stage::AwaitingTile(cursor) => self.take_tile(view, sink, cursor),
            Stage::Done | Stage::Failed | Stage::Cancelled => {
                Err(TilecapError::capture("capture is not running"))
            }
        }
    }

    fn prepare(&mut self, view: &mut dyn CaptureView) -> TilecapResult<CaptureStatus> {
        let original = view.view_transform()?;
        let viewport = view.viewport_rect()?;

        // Measure before touching the zoom: the inverse transform must be the user's one.
        let measure = ViewMeasure::of_view(original, viewport)?;
        let plan = plan(measure.content_size, measure.tile_size)?;
        self.last_plan = Some(plan);

        let pixels = u64::from(plan.content_size.width) * u64::from(plan.content_size.height);
        if pixels > self.opts.max_pixels {
            tracing::error!(
                content = %plan.content_size,
                max_pixels = self.opts.max_pixels,
                "capture area exceeds the pixel limit"
            );
            return Err(TilecapError::precondition(format!(
                "capture area {} ({pixels} pixels) exceeds the {} pixel limit",
                plan.content_size, self.opts.max_pixels
            )));
        }

        let capture_origin =
            PixelOffset::new(viewport.x0.floor() as i64, viewport.y0.floor() as i64);
        let dest = PixelBuffer::try_filled(plan.content_size, self.opts.background)?;

        tracing::info!(
            name = %self.name,
            content = %plan.content_size,
            tile = %plan.tile_size,
            columns = plan.grid.columns,
            rows = plan.grid.rows,
            "capture started"
        );

        self.session = Some(Session {
            original,
            measure,
            plan,
            capture_origin,
            dest,
        });

        view.set_view_transform(original.with_unit_scale())?;
        view.request_redraw();
        self.stage = Stage::Settling;
        Ok(CaptureStatus::Continue(self.opts.scale_settle_delay))
    }

    fn show_tile(
        &mut self,
        view: &mut dyn CaptureView,
        cursor: TileCursor,
    ) -> TilecapResult<CaptureStatus> {
        let session = self.session()?;
        let position = session.measure.tile_position(cursor.column, cursor.row);
        let scale = session.original.with_unit_scale().scale;

        view.set_view_transform(ViewTransform::new(position, scale))?;
        view.request_redraw();
        self.stage = Stage::AwaitingTile(cursor);
        Ok(CaptureStatus::Continue(self.opts.tile_delay))
    }

    fn take_tile(
        &mut self,
        view: &mut dyn CaptureView,
        sink: &mut dyn ImageSink,
        cursor: TileCursor,
    ) -> TilecapResult<CaptureStatus> {
        let session = self.session_mut()?;
        let extent = session.plan.tile_extent(cursor.column, cursor.row);
        let rect = CaptureRect {
            origin: session.capture_origin,
            size: extent,
        };

        let tile = view.read_pixels(rect)?;
        if tile.size() != extent {
            tracing::warn!(
                column = cursor.column,
                row = cursor.row,
                expected = %extent,
                got = %tile.size(),
                "read-back size differs from requested tile size"
            );
        }
        stitch(&tile, extent, cursor.dest, &mut session.dest);
        let next = cursor.advance(&session.plan, extent);
        self.tiles_done += 1;

        tracing::debug!(
            column = cursor.column,
            row = cursor.row,
            dest_x = cursor.dest.x,
            dest_y = cursor.dest.y,
            tiles_done = self.tiles_done,
            "tile stitched"
        );

        match next {
            Some(next) => self.show_tile(view, next),
            None => self.finalize(view, sink),
        }
    }

    fn finalize(
        &mut self,
        view: &mut dyn CaptureView,
        sink: &mut dyn ImageSink,
    ) -> TilecapResult<CaptureStatus> {
        let session = self
            .session
            .take()
            .ok_or_else(|| TilecapError::capture("capture state missing at finalize"))?;

        let saved = sink.save(&session.dest, &self.name);
        restore_view(view, session.original);
        let path = saved?;

        self.stage = Stage::Done;
        tracing::info!(name = %self.name, path = %path.display(), "capture finished");
        Ok(CaptureStatus::Done(SavedImage {
            path,
            size: session.dest.size(),
        }))
    }

    fn release(&mut self, view: &mut dyn CaptureView) {
        if let Some(session) = self.session.take()
            && self.opts.restore_on_cancel
        {
            restore_view(view, session.original);
        }
    }

    fn session(&self) -> TilecapResult<&Session> {
        self.session
            .as_ref()
            .ok_or_else(|| TilecapError::capture("capture state missing"))
    }

    fn session_mut(&mut self) -> TilecapResult<&mut Session> {
        self.session
            .as_mut()
            .ok_or_else(|| TilecapError::capture("capture state missing"))
    }
}

fn restore_view(view: &mut dyn CaptureView, original: ViewTransform) {
    match view.set_view_transform(original) {
        Ok(()) => view.request_redraw(),
        Err(err) => tracing::warn!(error = %err, "could not restore the original view transform"),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/job.rs"]
mod tests;
