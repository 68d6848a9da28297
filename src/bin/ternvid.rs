use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use serde::de::DeserializeOwned;
use ternvid::{
    BandwidthRule, ColorMap, ContourJob, Dataset, DiagramKind, FrameIndex, IndexRange, JobConfig,
    VideoFormat, WindowDisplay,
};

#[derive(Parser, Debug)]
#[command(name = "ternvid", version)]
struct Cli {
    /// Log at debug level (repeat for trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the reference scatter, the contour video, a still and the frame manifest.
    Render(RenderArgs),
    /// Render a single contour frame as a PNG.
    Frame(FrameArgs),
    /// Dump the per-frame density fields as JSON.
    Densities(DensitiesArgs),
}

#[derive(Args, Debug)]
struct JobArgs {
    /// Input dataset (`.json`, or delimited text).
    #[arg(long)]
    data: PathBuf,

    /// Job configuration JSON.
    #[arg(long)]
    config: PathBuf,

    /// Position per data point (JSON array or one number per line), for distance labels.
    #[arg(long)]
    positions: Option<PathBuf>,

    #[arg(long)]
    window_width: Option<usize>,
    #[arg(long)]
    steps: Option<usize>,
    #[arg(long)]
    start_index: Option<usize>,
    #[arg(long)]
    levels: Option<usize>,
    #[arg(long)]
    fps: Option<f64>,
    /// `index`, `distance` or `none`.
    #[arg(long, value_parser = parse_enum::<WindowDisplay>)]
    display: Option<WindowDisplay>,
    /// `silicate`, `silicate_hydration` or `sulfide`.
    #[arg(long, value_parser = parse_enum::<DiagramKind>)]
    diagram: Option<DiagramKind>,
    /// `blues`, `viridis`, `greys` or `reds`.
    #[arg(long, value_parser = parse_enum::<ColorMap>)]
    colormap: Option<ColorMap>,
    /// `scott` or `silverman`.
    #[arg(long, value_parser = parse_enum::<BandwidthRule>)]
    bandwidth: Option<BandwidthRule>,

    /// Estimate frames on a rayon pool.
    #[arg(long, default_value_t = false)]
    parallel: bool,
    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    job: JobArgs,

    #[arg(long)]
    output_dir: Option<PathBuf>,
    #[arg(long)]
    base_name: Option<String>,
    /// `gif` or `mp4` (requires `ffmpeg` on PATH).
    #[arg(long, value_parser = parse_enum::<VideoFormat>)]
    video: Option<VideoFormat>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    job: JobArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct DensitiesArgs {
    #[command(flatten)]
    job: JobArgs,

    /// Output JSON path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(serde::Serialize)]
struct DensityDump<'a> {
    grid: &'a ternvid::Grid,
    frames: Vec<FieldDump>,
}

#[derive(serde::Serialize)]
struct FieldDump {
    index: u64,
    window: IndexRange,
    /// `values[ix][iy]`.
    values: Vec<Vec<f64>>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Densities(args) => cmd_densities(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_enum<T: DeserializeOwned>(s: &str) -> Result<T, String> {
    serde_json::from_value(serde_json::Value::String(s.to_string())).map_err(|e| e.to_string())
}

fn load_job(args: &JobArgs) -> anyhow::Result<(JobConfig, Dataset)> {
    let mut cfg = JobConfig::from_path(&args.config)
        .with_context(|| format!("load job config '{}'", args.config.display()))?;
    if let Some(v) = args.window_width {
        cfg.window_width = v;
    }
    if let Some(v) = args.steps {
        cfg.steps = v;
    }
    if let Some(v) = args.start_index {
        cfg.start_index = v;
    }
    if let Some(v) = args.levels {
        cfg.levels = v;
    }
    if let Some(v) = args.fps {
        cfg.fps = v;
    }
    if let Some(v) = args.display {
        cfg.display = v;
    }
    if let Some(v) = args.diagram {
        cfg.diagram = v;
    }
    if let Some(v) = args.colormap {
        cfg.colormap = v;
    }
    if let Some(v) = args.bandwidth {
        cfg.bandwidth = v;
    }
    if args.parallel {
        cfg.parallel = true;
    }
    if args.threads.is_some() {
        cfg.threads = args.threads;
    }

    let mut dataset = Dataset::from_path(&args.data)
        .with_context(|| format!("load dataset '{}'", args.data.display()))?;
    if let Some(p) = &args.positions {
        let positions = ternvid::load_positions(p)
            .with_context(|| format!("load positions '{}'", p.display()))?;
        dataset = dataset.with_positions(positions)?;
    }
    Ok((cfg, dataset))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let (mut cfg, dataset) = load_job(&args.job)?;
    if let Some(dir) = args.output_dir {
        cfg.output_dir = dir;
    }
    if let Some(name) = args.base_name {
        cfg.base_name = name;
    }
    if let Some(video) = args.video {
        cfg.video = video;
    }

    let mut job = ContourJob::new(cfg, dataset)?;
    let out = job.run()?;
    for p in [&out.scatter, &out.video, &out.still, &out.manifest] {
        eprintln!("wrote {}", p.display());
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (cfg, dataset) = load_job(&args.job)?;
    let mut job = ContourJob::new(cfg, dataset)?;
    let frame = job.render_frame(FrameIndex(args.frame))?;
    ternvid::write_png(&args.out, &frame)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_densities(args: DensitiesArgs) -> anyhow::Result<()> {
    let (cfg, dataset) = load_job(&args.job)?;
    let mut job = ContourJob::new(cfg, dataset)?;
    let seq = job.densities()?;
    let dump = DensityDump {
        grid: seq.grid.as_ref(),
        frames: seq
            .fields
            .iter()
            .map(|f| FieldDump {
                index: f.frame.0,
                window: f.window,
                values: f.values.outer_iter().map(|row| row.to_vec()).collect(),
            })
            .collect(),
    };

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let json = serde_json::to_vec(&dump).context("encode densities")?;
    std::fs::write(&args.out, json)
        .with_context(|| format!("write densities '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}
