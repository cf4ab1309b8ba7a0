use std::time::{Duration, Instant};

use crate::capture::job::{CaptureJob, CaptureStatus};
use crate::capture::view::CaptureView;
use crate::foundation::error::TilecapResult;
use crate::output::sink::{ImageSink, SavedImage};

/// Outcome of one [`CaptureDriver::tick`].
#[derive(Debug)]
pub enum DriverTick {
    /// Too early; the job was not resumed.
    Waiting,
    /// The job ran one step and wants at least this long before the next.
    Resumed(Duration),
    /// The job ended.
    Finished(TilecapResult<SavedImage>),
}

/// Periodic driver for a [`CaptureJob`].
///
/// Hosts call [`CaptureDriver::tick`] from whatever periodic callback they have (an editor update
/// hook, a timer, a frame loop). The job is resumed only once the wait it asked for, and at least
/// [`CaptureOpts::min_tick`](crate::CaptureOpts::min_tick), has elapsed since the previous resume.
pub struct CaptureDriver<V, S> {
    job: CaptureJob,
    view: V,
    sink: S,
    last_resume: Option<Instant>,
    wait: Duration,
}

impl<V: CaptureView, S: ImageSink> CaptureDriver<V, S> {
    /// Attach `job` to its view and sink. Nothing runs until the first tick.
    pub fn new(job: CaptureJob, view: V, sink: S) -> Self {
        Self {
            job,
            view,
            sink,
            last_resume: None,
            wait: Duration::ZERO,
        }
    }

    /// The driven job.
    pub fn job(&self) -> &CaptureJob {
        &self.job
    }

    /// The captured view.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// The output sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Give back the view and sink.
    pub fn into_parts(self) -> (V, S) {
        (self.view, self.sink)
    }

    /// Earliest instant the next tick will resume the job; `None` before the first resume.
    pub fn next_due(&self) -> Option<Instant> {
        self.last_resume
            .map(|last| last + self.wait.max(self.job.opts().min_tick))
    }

    /// Resume the job if it is due at `now`.
    pub fn tick(&mut self, now: Instant) -> DriverTick {
        if let Some(due) = self.next_due()
            && now < due
        {
            return DriverTick::Waiting;
        }

        self.last_resume = Some(now);
        match self.job.resume(&mut self.view, &mut self.sink) {
            CaptureStatus::Continue(wait) => {
                self.wait = wait;
                DriverTick::Resumed(wait)
            }
            CaptureStatus::Done(saved) => DriverTick::Finished(Ok(saved)),
            CaptureStatus::Failed(err) => DriverTick::Finished(Err(err)),
        }
    }

    /// Drive the job to the end on the calling thread, sleeping between steps.
    pub fn run_blocking(&mut self) -> TilecapResult<SavedImage> {
        loop {
            if let DriverTick::Finished(outcome) = self.tick(Instant::now()) {
                return outcome;
            }
            if let Some(due) = self.next_due() {
                let now = Instant::now();
                if due > now {
                    std::thread::sleep(due - now);
                }
            }
        }
    }

    /// Cancel the job; see [`CaptureJob::cancel`].
    pub fn cancel(&mut self) {
        self.job.cancel(&mut self.view);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/driver.rs"]
mod tests;
