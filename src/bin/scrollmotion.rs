use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use scrollmotion::{PageManifest, PageRuntime, ScrollSectionTracker};

#[derive(Parser, Debug)]
#[command(name = "scrollmotion", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the active navigation section after each scroll offset.
    Sections(SectionsArgs),
    /// Drive a full page runtime through a scroll sequence and print element state.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct SectionsArgs {
    /// Page manifest JSON.
    #[arg(long)]
    page: PathBuf,

    /// Scroll offsets, in order (comma separated or repeated).
    #[arg(long, value_delimiter = ',', required = true, allow_negative_numbers = true)]
    scroll: Vec<i64>,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Page manifest JSON.
    #[arg(long)]
    page: PathBuf,

    /// Scroll offsets, in order (comma separated or repeated).
    #[arg(long, value_delimiter = ',', required = true, allow_negative_numbers = true)]
    scroll: Vec<i64>,

    /// Override the manifest's viewport height.
    #[arg(long)]
    viewport_height: Option<f64>,

    /// Frame interval used to advance animations.
    #[arg(long, default_value_t = 16.0)]
    frame_ms: f64,

    /// Time spent at each scroll offset before printing.
    #[arg(long, default_value_t = 1200.0)]
    dwell_ms: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Sections(args) => cmd_sections(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn load(path: &Path) -> anyhow::Result<PageManifest> {
    PageManifest::from_path(path).with_context(|| format!("load page '{}'", path.display()))
}

fn cmd_sections(args: SectionsArgs) -> anyhow::Result<()> {
    let manifest = load(&args.page)?;
    let mut tracker = ScrollSectionTracker::with_lookahead(manifest.config.lookahead_px);
    tracker.register_sections(manifest.sections)?;

    for y in args.scroll {
        let active = tracker.update(y.max(0)).unwrap_or("-");
        println!("{y}\t{active}");
    }
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        args.frame_ms.is_finite() && args.frame_ms > 0.0,
        "--frame-ms must be > 0"
    );
    anyhow::ensure!(
        args.dwell_ms.is_finite() && args.dwell_ms >= 0.0,
        "--dwell-ms must be >= 0"
    );

    let mut manifest = load(&args.page)?;
    if let Some(height) = args.viewport_height {
        anyhow::ensure!(
            height.is_finite() && height > 0.0,
            "--viewport-height must be > 0"
        );
        manifest.viewport.height = height;
    }
    let mut rt = PageRuntime::from_manifest(&manifest)?;
    let ids: Vec<_> = rt.element_ids().collect();
    let mut now = 0.0;

    if let Some(video) = rt.video() {
        println!("video {}", serde_json::to_string(&video.presentation())?);
    }

    for y in args.scroll {
        let snap = rt.on_scroll(y as f64);
        rt.on_viewport_geometry(manifest.viewport.at_scroll(snap.scroll_y));

        let until = now + args.dwell_ms;
        loop {
            rt.on_frame(now);
            if now >= until {
                break;
            }
            now = (now + args.frame_ms).min(until);
        }

        println!(
            "scroll={} section={}",
            snap.scroll_y,
            rt.active_section().unwrap_or("-")
        );
        for &id in &ids {
            let view = rt.element_view(id)?;
            println!("  {id} {}", serde_json::to_string(&view)?);
        }
    }
    Ok(())
}
