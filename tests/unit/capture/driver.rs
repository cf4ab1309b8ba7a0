use super::*;
use crate::capture::opts::CaptureOpts;
use crate::capture::raster_view::RasterView;
use crate::foundation::core::{PixelSize, Rect, Rgba8, Vec2, ViewTransform};
use crate::foundation::error::TilecapError;
use crate::output::sink::InMemorySink;
use crate::raster::buffer::PixelBuffer;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

/// Half zoom over a 4x4 viewport: 8x8 content, 2x2 tiles of 4x4.
fn driver() -> CaptureDriver<RasterView, InMemorySink> {
    let content = PixelBuffer::filled(PixelSize::new(8, 8), Rgba8::new(200, 100, 50, 255));
    let view = RasterView::new(
        content,
        Rect::new(0.0, 0.0, 4.0, 4.0),
        ViewTransform::new(Vec2::ZERO, Vec2::new(0.5, 0.5)),
    );
    CaptureDriver::new(
        CaptureJob::new("grid", CaptureOpts::default()),
        view,
        InMemorySink::new(),
    )
}

#[test]
fn first_tick_resumes_immediately() {
    let mut d = driver();
    assert!(d.next_due().is_none());
    let t0 = Instant::now();
    assert!(matches!(d.tick(t0), DriverTick::Resumed(w) if w == ms(250)));
    assert_eq!(d.next_due(), Some(t0 + ms(250)));
}

#[test]
fn ticks_before_the_requested_wait_do_nothing() {
    let mut d = driver();
    let t0 = Instant::now();
    d.tick(t0);

    assert!(matches!(d.tick(t0 + ms(100)), DriverTick::Waiting));
    assert!(matches!(d.tick(t0 + ms(249)), DriverTick::Waiting));
    assert!(matches!(d.tick(t0 + ms(250)), DriverTick::Resumed(w) if w == ms(100)));
    assert!(matches!(d.tick(t0 + ms(300)), DriverTick::Waiting));
    assert!(matches!(d.tick(t0 + ms(350)), DriverTick::Resumed(_)));
}

#[test]
fn min_tick_floors_short_waits() {
    let opts = CaptureOpts {
        tile_delay: Duration::ZERO,
        scale_settle_delay: Duration::ZERO,
        min_tick: ms(10),
        ..CaptureOpts::default()
    };
    let content = PixelBuffer::filled(PixelSize::new(8, 8), Rgba8::TRANSPARENT);
    let view = RasterView::new(
        content,
        Rect::new(0.0, 0.0, 4.0, 4.0),
        ViewTransform::new(Vec2::ZERO, Vec2::new(0.5, 0.5)),
    );
    let mut d = CaptureDriver::new(CaptureJob::new("g", opts), view, InMemorySink::new());
    let t0 = Instant::now();
    d.tick(t0);
    assert!(matches!(d.tick(t0 + ms(5)), DriverTick::Waiting));
    assert!(matches!(d.tick(t0 + ms(10)), DriverTick::Resumed(_)));
}

#[test]
fn simulated_clock_runs_capture_to_completion() {
    let mut d = driver();
    let mut now = Instant::now();
    let mut resumes = 0;
    let saved = loop {
        match d.tick(now) {
            DriverTick::Finished(outcome) => break outcome.unwrap(),
            DriverTick::Resumed(_) => resumes += 1,
            DriverTick::Waiting => {}
        }
        now += ms(10);
    };

    // Prepare, show first tile, then the remaining 3 tiles plus the last read.
    assert_eq!(resumes, 5);
    assert_eq!(saved.size, PixelSize::new(8, 8));
    let (view, sink) = d.into_parts();
    assert_eq!(sink.images().len(), 1);
    assert!(
        sink.images()[0]
            .1
            .data
            .iter()
            .all(|&p| p == Rgba8::new(200, 100, 50, 255))
    );
    assert!(
        view.view_transform()
            .unwrap()
            .bit_eq(ViewTransform::new(Vec2::ZERO, Vec2::new(0.5, 0.5)))
    );
}

#[test]
fn run_blocking_finishes_with_short_delays() {
    let opts = CaptureOpts {
        tile_delay: ms(1),
        scale_settle_delay: ms(1),
        min_tick: ms(1),
        ..CaptureOpts::default()
    };
    let content = PixelBuffer::filled(PixelSize::new(8, 8), Rgba8::TRANSPARENT);
    let view = RasterView::new(
        content,
        Rect::new(0.0, 0.0, 4.0, 4.0),
        ViewTransform::new(Vec2::ZERO, Vec2::new(0.5, 0.5)),
    );
    let mut d = CaptureDriver::new(CaptureJob::new("g", opts), view, InMemorySink::new());
    let saved = d.run_blocking().unwrap();
    assert_eq!(saved.size, PixelSize::new(8, 8));
    assert_eq!(d.job().progress().tiles_done, 4);
}

#[test]
fn cancelled_driver_reports_cancellation() {
    let mut d = driver();
    let t0 = Instant::now();
    d.tick(t0);
    d.cancel();
    match d.tick(t0 + ms(1000)) {
        DriverTick::Finished(Err(TilecapError::Cancelled)) => {}
        other => panic!("expected cancellation, got {other:?}"),
    }
    assert!(d.sink().images().is_empty());
    assert!(
        d.view()
            .view_transform()
            .unwrap()
            .bit_eq(ViewTransform::new(Vec2::ZERO, Vec2::new(0.5, 0.5)))
    );
}
