use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "ringmotion", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the chart at one point in time (SVG, PNG or JSON by output extension).
    Frame(FrameArgs),
    /// Render a numbered frame sequence into a directory.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input chart JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Seconds since mount.
    #[arg(long, default_value_t = 0.0)]
    at: f64,

    /// Output path (.svg, .png or .json).
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    playback: PlaybackArgs,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input chart JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory for `frame_NNNNN.<ext>` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Seconds of animation to render.
    #[arg(long, default_value_t = 2.5)]
    duration: f64,

    /// Frame file format.
    #[arg(long, value_enum, default_value_t = FormatChoice::Png)]
    format: FormatChoice,

    #[command(flatten)]
    playback: PlaybackArgs,
}

#[derive(clap::Args, Debug)]
struct PlaybackArgs {
    /// Frames per second; defaults to the chart's own rate.
    #[arg(long)]
    fps: Option<u32>,

    /// Ring index hovered from the first frame.
    #[arg(long)]
    hover: Option<usize>,

    /// Background color behind the chart.
    #[arg(long, default_value = "#09090b")]
    background: String,

    /// Leave the background transparent.
    #[arg(long, conflicts_with = "background")]
    transparent: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Svg,
    Png,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn read_chart_json(path: &Path) -> anyhow::Result<ringmotion::ChartSpec> {
    let f = File::open(path).with_context(|| format!("open chart '{}'", path.display()))?;
    let r = BufReader::new(f);
    let spec: ringmotion::ChartSpec =
        serde_json::from_reader(r).with_context(|| "parse chart JSON")?;
    spec.validate()?;
    Ok(spec)
}

fn playback_opts(
    args: &PlaybackArgs,
    spec: &ringmotion::ChartSpec,
) -> anyhow::Result<ringmotion::PlaybackOpts> {
    if let Some(index) = args.hover {
        if index >= spec.data.len() {
            anyhow::bail!(
                "--hover {index} is out of range (chart has {} rings)",
                spec.data.len()
            );
        }
    }
    let fps = args
        .fps
        .map(|n| ringmotion::Fps::new(n, 1))
        .transpose()?;
    Ok(ringmotion::PlaybackOpts {
        fps,
        hover: args.hover,
        background: (!args.transparent).then(|| args.background.clone()),
    })
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let spec = read_chart_json(&args.in_path)?;
    let opts = playback_opts(&args.playback, &spec)?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let ext = args
        .out
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("svg") => {
            let svg = ringmotion::render_svg_at(&spec, args.at, &opts)?;
            std::fs::write(&args.out, svg)
                .with_context(|| format!("write svg '{}'", args.out.display()))?;
        }
        Some("png") => {
            let svg = ringmotion::render_svg_at(&spec, args.at, &opts)?;
            let frame = ringmotion::rasterize_svg(&svg, spec.canvas)?;
            ringmotion::write_png(&args.out, &frame)?;
        }
        Some("json") => {
            let frame = ringmotion::render_frame_at(&spec, args.at, &opts)?;
            let f = File::create(&args.out)
                .with_context(|| format!("create '{}'", args.out.display()))?;
            serde_json::to_writer_pretty(f, &frame).with_context(|| "write frame JSON")?;
        }
        _ => anyhow::bail!(
            "unsupported output extension for '{}' (expected .svg, .png or .json)",
            args.out.display()
        ),
    }

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let spec = read_chart_json(&args.in_path)?;
    let opts = playback_opts(&args.playback, &spec)?;

    let format = match args.format {
        FormatChoice::Svg => ringmotion::ImageFormat::Svg,
        FormatChoice::Png => ringmotion::ImageFormat::Png,
    };
    let mut sink = ringmotion::DirSink::new(&args.out_dir, format);
    let frames = ringmotion::render_sequence(&spec, args.duration, &opts, &mut sink)?;

    eprintln!("wrote {frames} frames to {}", args.out_dir.display());
    Ok(())
}
