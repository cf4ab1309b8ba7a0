use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tilecap::{
    CaptureConfig, CaptureDriver, CaptureJob, PixelSize, PngDirSink, RasterView, Rect, Vec2,
    ViewTransform,
};

#[derive(Parser, Debug)]
#[command(name = "tilecap", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the tile plan for a content size and tile size as JSON.
    Plan(PlanArgs),
    /// Capture a canvas image through a simulated viewport and save it as a PNG.
    Capture(CaptureArgs),
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Content size in pixels, `WxH`.
    #[arg(long, value_parser = parse_size)]
    content: PixelSize,

    /// Tile size in pixels, `WxH`.
    #[arg(long, value_parser = parse_size)]
    tile: PixelSize,
}

#[derive(Parser, Debug)]
struct CaptureArgs {
    /// Canvas image to show in the viewport.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Viewport size in screen pixels, `WxH`.
    #[arg(long, value_parser = parse_size)]
    viewport: PixelSize,

    /// Zoom of the view before capture. Defaults to fitting the whole canvas.
    #[arg(long)]
    zoom: Option<f64>,

    /// Canvas point shown at the viewport's top-left corner, `X,Y`.
    #[arg(long, value_parser = parse_pan, default_value = "0,0")]
    pan: Vec2,

    /// Output directory (overrides the config file).
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Output name. Defaults to the input file stem.
    #[arg(long)]
    name: Option<String>,

    /// Inter-tile settle delay in milliseconds (overrides the config file).
    #[arg(long)]
    tile_delay_ms: Option<u64>,

    /// JSON capture config.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Plan(args) => cmd_plan(args),
        Command::Capture(args) => cmd_capture(args),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let plan = tilecap::plan(args.content, args.tile)?;
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}

fn cmd_capture(args: CaptureArgs) -> anyhow::Result<()> {
    let cfg = match &args.config {
        Some(path) => CaptureConfig::load(path)?,
        None => CaptureConfig::default(),
    };
    let mut opts = cfg.to_opts()?;
    if let Some(ms) = args.tile_delay_ms {
        opts.tile_delay = std::time::Duration::from_millis(ms);
    }
    let out_dir = args.out_dir.clone().unwrap_or_else(|| cfg.output_dir());

    let img = image::open(&args.in_path)
        .with_context(|| format!("open canvas image '{}'", args.in_path.display()))?
        .to_rgba8();
    if img.width() == 0 || img.height() == 0 {
        anyhow::bail!("canvas image '{}' is empty", args.in_path.display());
    }

    let zoom = args.zoom.unwrap_or_else(|| {
        (f64::from(args.viewport.width) / f64::from(img.width()))
            .min(f64::from(args.viewport.height) / f64::from(img.height()))
    });
    if !zoom.is_finite() || zoom <= 0.0 {
        anyhow::bail!("zoom must be a positive number (got {zoom})");
    }

    let viewport = Rect::new(
        0.0,
        0.0,
        f64::from(args.viewport.width),
        f64::from(args.viewport.height),
    );
    let transform = ViewTransform::new(-args.pan * zoom, Vec2::new(zoom, zoom));
    let view = RasterView::from_image(&img, viewport, transform)?;

    let name = match args.name {
        Some(n) => n,
        None => args
            .in_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "capture".to_string()),
    };

    let job = CaptureJob::new(name, opts);
    let sink = PngDirSink::new(out_dir);
    tracing::info!(
        name = job.name(),
        out_dir = %sink.dir().display(),
        zoom,
        "capturing"
    );
    let mut driver = CaptureDriver::new(job, view, sink);
    let saved = driver.run_blocking()?;

    eprintln!("wrote {} ({})", saved.path.display(), saved.size);
    println!("{}", saved.path.display());
    Ok(())
}

fn parse_size(s: &str) -> Result<PixelSize, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got '{s}'"))?;
    let w: u32 = w.trim().parse().map_err(|e| format!("bad width '{w}': {e}"))?;
    let h: u32 = h.trim().parse().map_err(|e| format!("bad height '{h}': {e}"))?;
    Ok(PixelSize::new(w, h))
}

fn parse_pan(s: &str) -> Result<Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{s}'"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x '{x}': {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y '{y}': {e}"))?;
    Ok(Vec2::new(x, y))
}
