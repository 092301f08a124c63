use std::{
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use framecue::{
    Composition, EvalThreading, Evaluator, FfprobeDurationResolver, FrameIndex, FrameRange,
    FrameState, PreparedComposition,
};

#[derive(Parser, Debug)]
#[command(name = "framecue", version)]
struct Cli {
    /// Log at debug level (overridden by `RUST_LOG`).
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the segment plan and preparation diagnostics as JSON.
    Plan(PlanArgs),
    /// Evaluate a single frame.
    Frame(FrameArgs),
    /// Evaluate a frame range as JSON lines.
    Range(RangeArgs),
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Input composition JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input composition JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output JSON path. Prints to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Also write a PNG preview of the bars.
    #[arg(long)]
    png: Option<PathBuf>,

    /// Narration audio whose level is reported (requires the `media-ffmpeg` feature).
    #[arg(long)]
    audio: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RangeArgs {
    /// Input composition JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// First frame (inclusive).
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// Last frame (exclusive). Defaults to the end of the timeline.
    #[arg(long)]
    end: Option<u64>,

    /// Output JSON-lines path. Prints to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Evaluation chunk size (parallel mode only).
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Plan(args) => cmd_plan(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Range(args) => cmd_range(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn prepare(in_path: &Path) -> anyhow::Result<PreparedComposition> {
    let comp = Composition::from_path(in_path)?;
    let assets_root = in_path.parent().unwrap_or_else(|| Path::new("."));
    let resolver = FfprobeDurationResolver::new(assets_root);
    let prepared = PreparedComposition::prepare(comp, &resolver)
        .with_context(|| format!("prepare '{}'", in_path.display()))?;
    tracing::info!(
        total_frames = prepared.total_frames(),
        diagnostics = prepared.diagnostics().len(),
        "prepared"
    );
    Ok(prepared)
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let prepared = prepare(&args.in_path)?;
    let comp = prepared.composition();
    let segments: Vec<_> = prepared
        .plan()
        .segments()
        .iter()
        .map(|s| {
            serde_json::json!({
                "key": comp.events.get(s.index).map(|e| e.key.as_str()),
                "start_frame": s.start_frame,
                "end_frame": s.end_frame,
                "duration_frames": s.duration_frames,
                "duration_secs": s.source_duration_secs,
            })
        })
        .collect();
    let doc = serde_json::json!({
        "fps": comp.fps,
        "total_frames": prepared.total_frames(),
        "segments": segments,
        "diagnostics": prepared.diagnostics(),
    });
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut prepared = prepare(&args.in_path)?;
    if let Some(audio) = &args.audio {
        let pcm = framecue::audio::media::decode_audio_f32_stereo(
            audio,
            framecue::audio::media::ANALYSIS_SAMPLE_RATE,
        )
        .with_context(|| format!("decode audio '{}'", audio.display()))?;
        prepared = prepared.with_audio(pcm);
    }

    let state = Evaluator::eval_frame(&prepared, FrameIndex(args.frame));
    let json = serde_json::to_string_pretty(&state)?;
    match &args.out {
        Some(out) => {
            create_parent_dir(out)?;
            std::fs::write(out, json).with_context(|| format!("write '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{json}"),
    }

    if let Some(png) = &args.png {
        create_parent_dir(png)?;
        let canvas = prepared.composition().canvas;
        draw_preview(&state, canvas.width, canvas.height)
            .save_with_format(png, image::ImageFormat::Png)
            .with_context(|| format!("write png '{}'", png.display()))?;
        eprintln!("wrote {}", png.display());
    }
    Ok(())
}

fn cmd_range(args: RangeArgs) -> anyhow::Result<()> {
    let prepared = prepare(&args.in_path)?;
    let end = args.end.unwrap_or_else(|| prepared.total_frames());
    let range = FrameRange::new(FrameIndex(args.start), FrameIndex(end))?;
    let threading = EvalThreading {
        parallel: args.parallel,
        chunk_size: args.chunk_size,
        threads: args.threads,
    };

    let writer: Box<dyn std::io::Write> = match &args.out {
        Some(out) => {
            create_parent_dir(out)?;
            let file = std::fs::File::create(out)
                .with_context(|| format!("create '{}'", out.display()))?;
            Box::new(file)
        }
        None => Box::new(std::io::stdout().lock()),
    };
    let mut writer = BufWriter::new(writer);

    let mut written = 0u64;
    framecue::eval_range_with(&prepared, range, &threading, |state: FrameState| {
        serde_json::to_writer(&mut writer, &state)
            .and_then(|()| writer.write_all(b"\n").map_err(serde_json::Error::io))
            .map_err(|e| framecue::FramecueError::serde(e.to_string()))?;
        written += 1;
        Ok(())
    })?;
    writer.flush().context("flush output")?;

    if let Some(out) = &args.out {
        eprintln!("wrote {written} frames to {}", out.display());
    }
    Ok(())
}

fn create_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn draw_preview(state: &FrameState, width: u32, height: u32) -> image::RgbaImage {
    let mut img = image::RgbaImage::from_pixel(width, height, image::Rgba([18, 18, 24, 255]));

    for tick in &state.axis {
        let x = tick.x.round();
        if x >= 0.0 && x < f64::from(width) {
            for y in 0..height {
                img.put_pixel(x as u32, y, image::Rgba([60, 60, 72, 255]));
            }
        }
    }

    for bar in &state.bars {
        let a = (bar.opacity.clamp(0.0, 1.0) * f64::from(bar.color.a)).round() as u8;
        fill_rect(
            &mut img,
            (bar.x, bar.y, bar.x + bar.width, bar.y + bar.height),
            [bar.color.r, bar.color.g, bar.color.b, a],
        );
    }
    img
}

fn fill_rect(img: &mut image::RgbaImage, (x0, y0, x1, y1): (f64, f64, f64, f64), rgba: [u8; 4]) {
    let w = f64::from(img.width());
    let h = f64::from(img.height());
    let (x0, x1) = (x0.clamp(0.0, w) as u32, x1.clamp(0.0, w) as u32);
    let (y0, y1) = (y0.clamp(0.0, h) as u32, y1.clamp(0.0, h) as u32);
    let alpha = f32::from(rgba[3]) / 255.0;
    for y in y0..y1 {
        for x in x0..x1 {
            let dst = img.get_pixel_mut(x, y);
            for c in 0..3 {
                let blended = f32::from(rgba[c]) * alpha + f32::from(dst[c]) * (1.0 - alpha);
                dst[c] = blended.round() as u8;
            }
        }
    }
}
