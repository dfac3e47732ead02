use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use prescale_ascii::{
    AsciiFrame, CellSize, Config, FrameOutcome, Interval, LogoAnimator, LogoLine, LogoSize,
    RampPreset, RenderControls, RenderDriver, SceneRenderer, SurfaceSize, TextSurface, Wordmark,
    BUILTIN_MODELS, WORDMARK,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

mod logging;
mod scene;
mod surface;

use scene::ImageScene;
use surface::{CaptureSurface, TerminalSurface};

const LOGO_FRAME: Duration = Duration::from_millis(16);

#[derive(Parser, Debug)]
#[command(author, version, about = "Render scenes and the Prescale wordmark as ASCII")]
struct Cli {
    /// TOML file with default viewer and logo settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Raise log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render one frame of an image to stdout or a file
    Render(RenderArgs),
    /// Play an image, GIF or frame directory in the terminal
    Play(PlayArgs),
    /// Write every rendered frame to its own text file
    Export(ExportArgs),
    /// Draw the Prescale wordmark
    Logo(LogoArgs),
    /// List ramp presets and built-in models
    Presets,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input image path
    input: PathBuf,
    /// Output file path
    #[arg(short, long)]
    output: Option<PathBuf>,
    #[command(flatten)]
    viewer: ViewerSettings,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Input path (image, GIF file or directory of images)
    input: PathBuf,
    /// Number of frames to play; defaults to one pass over the input
    #[arg(long)]
    frames: Option<usize>,
    /// Playback rate
    #[arg(long, default_value_t = 12.0)]
    fps: f32,
    #[command(flatten)]
    viewer: ViewerSettings,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Input path (image, GIF file or directory of images)
    input: PathBuf,
    /// Output directory for frame files
    #[arg(short, long)]
    out_dir: PathBuf,
    /// Number of frames to export; defaults to one pass over the input
    #[arg(long)]
    frames: Option<usize>,
    #[command(flatten)]
    viewer: ViewerSettings,
}

#[derive(Parser, Debug, Clone)]
struct ViewerSettings {
    /// Ramp preset; overrides the config file
    #[arg(long, value_enum)]
    preset: Option<PresetChoice>,
    /// Sampling cell size in pixels; overrides the config file
    #[arg(long, value_parser = clap::value_parser!(u32).range(2..=16))]
    cell_size: Option<u32>,
    /// Offscreen surface width in pixels (defaults to the source width)
    #[arg(long)]
    width: Option<u32>,
    /// Offscreen surface height in pixels (defaults to the source height)
    #[arg(long)]
    height: Option<u32>,
}

#[derive(Parser, Debug)]
struct LogoArgs {
    /// Ramp preset; overrides the config file
    #[arg(long, value_enum)]
    preset: Option<PresetChoice>,
    /// Wordmark size; overrides the config file
    #[arg(long, value_enum)]
    size: Option<SizeChoice>,
    /// Print the finished wordmark without reveal or glitch
    #[arg(long, default_value_t = false)]
    no_animate: bool,
    /// Word to compose from the authored letters
    #[arg(long, default_value = WORDMARK)]
    word: String,
    /// Keep glitching for this many seconds after the reveal
    #[arg(long, default_value_t = 0.0)]
    glitch_seconds: f32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum PresetChoice {
    Dense,
    Balanced,
    Minimal,
    Blocks,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum SizeChoice {
    Sm,
    Md,
    Lg,
    Hero,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::initialize(cli.verbose)?;

    let config = Config::load(cli.config.as_deref())?;
    match cli.command {
        Commands::Render(args) => render(args, &config),
        Commands::Play(args) => play(args, &config),
        Commands::Export(args) => export(args, &config),
        Commands::Logo(args) => logo(args, &config),
        Commands::Presets => presets(),
    }
}

fn render(args: RenderArgs, config: &Config) -> Result<()> {
    let scene = ImageScene::open(&args.input)?;
    let size = args.viewer.surface_size(scene.source_dimensions());
    let controls = args.viewer.controls(config)?;

    let mut driver = RenderDriver::new(scene, CaptureSurface::default(), controls);
    mount(&mut driver, size)?;
    if let FrameOutcome::Skipped(reason) = driver.tick() {
        anyhow::bail!("failed to render {:?}: frame skipped ({reason:?})", args.input);
    }
    let frame = driver.surface().last().cloned().context("no frame was presented")?;
    info!("rendered {:?} as {}x{} glyphs", args.input, frame.columns, frame.rows);

    match args.output {
        Some(path) => write_frame(&path, &frame),
        None => {
            println!("{}", frame.text);
            Ok(())
        },
    }
}

fn play(args: PlayArgs, config: &Config) -> Result<()> {
    let period = frame_period(args.fps)?;
    let scene = ImageScene::open(&args.input)?;
    let frames = args.frames.unwrap_or(scene.frame_count());
    let size = args.viewer.surface_size(scene.source_dimensions());
    let controls = args.viewer.controls(config)?;

    let surface = TerminalSurface::new(io::stdout().lock());
    let mut driver = RenderDriver::new(scene, surface, controls);
    mount(&mut driver, size)?;
    debug!("canvas visible during playback: {}", driver.renderer().canvas_visible());

    let mut pacing = Interval::new(period);
    pacing.start(Instant::now());
    let mut skipped = 0;
    for index in 0..frames {
        if index > 0 {
            wait_for_next_frame(&mut pacing);
        }
        if let FrameOutcome::Skipped(reason) = driver.tick() {
            debug!("frame {index} skipped: {reason:?}");
            skipped += 1;
        }
    }
    driver.unmount();

    info!("played {} frames ({skipped} skipped)", frames);
    Ok(())
}

fn export(args: ExportArgs, config: &Config) -> Result<()> {
    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create output directory {:?}", args.out_dir))?;

    let scene = ImageScene::open(&args.input)?;
    let frames = args.frames.unwrap_or(scene.frame_count());
    let size = args.viewer.surface_size(scene.source_dimensions());
    let controls = args.viewer.controls(config)?;

    let mut driver = RenderDriver::new(scene, CaptureSurface::default(), controls);
    mount(&mut driver, size)?;

    let progress = ProgressBar::new(frames as u64);
    progress.set_style(
        ProgressStyle::with_template(
            "{spinner} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} frames",
        )?
        .progress_chars("=> "),
    );

    let mut written = 0;
    for index in 0..frames {
        match driver.tick() {
            FrameOutcome::Presented(frame) => {
                let frame_path = args.out_dir.join(format!("frame_{:04}.txt", index));
                write_frame(&frame_path, &frame)?;
                written += 1;
            },
            FrameOutcome::Skipped(reason) => warn!("frame {index} skipped: {reason:?}"),
        }
        progress.inc(1);
    }

    progress.finish_with_message(format!("{written} frames written to {:?}", args.out_dir));
    Ok(())
}

fn logo(args: LogoArgs, config: &Config) -> Result<()> {
    let linger = glitch_linger(args.glitch_seconds)?;
    let preset = args.preset.map_or(config.logo.preset, RampPreset::from);
    let size = args.size.map_or(config.logo.size, LogoSize::from);
    let wordmark = Wordmark::new(&args.word, preset, size)
        .with_context(|| format!("failed to compose {:?}", args.word))?;

    let animate = config.logo.animate && !args.no_animate && io::stdout().is_terminal();
    let mut out = io::stdout().lock();
    if !animate {
        for line in wordmark.lines() {
            writeln!(out, "{line}")?;
        }
        return Ok(());
    }

    let rows = wordmark.lines().len();
    let mut animator = LogoAnimator::new(wordmark, true, StdRng::from_entropy(), Instant::now());
    let mut revealed_at = None;

    write!(out, "\x1b[?25l\x1b[2J")?;
    loop {
        let now = Instant::now();
        let lines = animator.frame(now);
        write!(out, "\x1b[H")?;
        for line in &lines {
            writeln!(out, "{}\x1b[K", logo_line(line))?;
        }
        out.flush()?;

        if animator.is_revealed() {
            let revealed = *revealed_at.get_or_insert(now);
            if now.duration_since(revealed) >= linger {
                break;
            }
        }
        thread::sleep(LOGO_FRAME);
    }
    animator.stop();
    write!(out, "\x1b[?25h")?;

    debug!(
        "drew {rows} {preset} logo rows at {:?} ({}px font, {} line height)",
        size,
        size.font_size(),
        size.line_height()
    );
    Ok(())
}

fn presets() -> Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "presets:")?;
    for preset in RampPreset::ALL {
        writeln!(
            out,
            "  {:<9} {:<9} viewer {:<14} logo {}",
            preset.name(),
            preset.label(),
            format!("{:?}", preset.viewer_ramp().to_string()),
            format!("{:?}", preset.logo_ramp().to_string()),
        )?;
    }

    writeln!(out, "models:")?;
    for (id, name) in BUILTIN_MODELS {
        writeln!(out, "  {id:<13} {name}")?;
    }
    Ok(())
}

fn mount<R: SceneRenderer, S: TextSurface>(
    driver: &mut RenderDriver<R, S>,
    size: SurfaceSize,
) -> Result<()> {
    driver
        .mount(size)
        .with_context(|| format!("failed to mount a {}x{} surface", size.width, size.height))
}

fn frame_period(fps: f32) -> Result<Duration> {
    if !fps.is_finite() || fps <= 0.0 {
        anyhow::bail!("fps must be a positive number, got {fps}");
    }
    Duration::try_from_secs_f32(1.0 / fps)
        .with_context(|| format!("fps {fps} gives a frame period out of range"))
}

/// Negative and NaN durations mean no lingering.
fn glitch_linger(seconds: f32) -> Result<Duration> {
    Duration::try_from_secs_f32(seconds.max(0.0))
        .with_context(|| format!("glitch duration {seconds}s is out of range"))
}

fn wait_for_next_frame(pacing: &mut Interval) {
    loop {
        let due = pacing.poll(Instant::now());
        if due > 0 {
            if due > 1 {
                debug!("playback fell behind by {} frames", due - 1);
            }
            return;
        }
        thread::sleep(Duration::from_millis(1));
    }
}

fn write_frame(path: &Path, frame: &AsciiFrame) -> Result<()> {
    fs::write(path, format!("{}\n", frame.text))
        .with_context(|| format!("failed to write {:?}", path))
}

/// Terminals cannot shift by pixels, so a glitched row moves one column and
/// is drawn dim.
fn logo_line(line: &LogoLine) -> String {
    let text = if line.offset_px < 0.0 {
        line.text.chars().skip(1).collect()
    } else if line.offset_px > 0.0 {
        format!(" {}", line.text)
    } else {
        line.text.clone()
    };

    if line.opacity < 1.0 {
        format!("\x1b[2m{text}\x1b[0m")
    } else {
        text
    }
}

impl ViewerSettings {
    fn controls(&self, config: &Config) -> Result<RenderControls> {
        let mut controls = config.render_controls()?;
        if let Some(preset) = self.preset {
            controls.preset = preset.into();
        }
        if let Some(cell_size) = self.cell_size {
            controls.cell_size = CellSize::new(cell_size)?;
        }
        Ok(controls)
    }

    /// Missing dimensions follow the source, keeping its aspect ratio when
    /// only one side is given.
    fn surface_size(&self, (source_width, source_height): (u32, u32)) -> SurfaceSize {
        match (self.width, self.height) {
            (Some(width), Some(height)) => SurfaceSize::new(width, height),
            (Some(width), None) => {
                SurfaceSize::new(width, scale(source_height, width, source_width))
            },
            (None, Some(height)) => {
                SurfaceSize::new(scale(source_width, height, source_height), height)
            },
            (None, None) => SurfaceSize::new(source_width, source_height),
        }
    }
}

fn scale(value: u32, numerator: u32, denominator: u32) -> u32 {
    if denominator == 0 {
        return 0;
    }
    let scaled = u64::from(value) * u64::from(numerator) / u64::from(denominator);
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

impl From<PresetChoice> for RampPreset {
    fn from(choice: PresetChoice) -> Self {
        match choice {
            PresetChoice::Dense => RampPreset::Dense,
            PresetChoice::Balanced => RampPreset::Balanced,
            PresetChoice::Minimal => RampPreset::Minimal,
            PresetChoice::Blocks => RampPreset::Blocks,
        }
    }
}

impl From<SizeChoice> for LogoSize {
    fn from(choice: SizeChoice) -> Self {
        match choice {
            SizeChoice::Sm => LogoSize::Sm,
            SizeChoice::Md => LogoSize::Md,
            SizeChoice::Lg => LogoSize::Lg,
            SizeChoice::Hero => LogoSize::Hero,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn render_defaults_defer_to_config() {
        let cli = Cli::parse_from(["prescale-ascii", "render", "scene.png"]);
        let Commands::Render(args) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(args.viewer.preset, None);
        assert_eq!(args.viewer.cell_size, None);
        assert_eq!(cli.verbose, 0);

        let controls = args.viewer.controls(&Config::default()).unwrap();
        assert_eq!(controls, RenderControls::default());
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from([
            "prescale-ascii",
            "-vv",
            "play",
            "clip.gif",
            "--preset",
            "blocks",
            "--cell-size",
            "4",
            "--fps",
            "24",
        ]);
        assert_eq!(cli.verbose, 2);
        let Commands::Play(args) = cli.command else {
            panic!("expected play");
        };
        let controls = args.viewer.controls(&Config::default()).unwrap();
        assert_eq!(controls.preset, RampPreset::Blocks);
        assert_eq!(controls.cell_size.get(), 4);
        assert_eq!(args.fps, 24.0);
    }

    #[test]
    fn cell_size_outside_range_is_rejected() {
        for cell_size in ["1", "17"] {
            let args = ["prescale-ascii", "render", "a.png", "--cell-size", cell_size];
            assert!(Cli::try_parse_from(args).is_err());
        }
    }

    #[test]
    fn logo_defaults() {
        let cli = Cli::parse_from(["prescale-ascii", "logo", "--size", "hero"]);
        let Commands::Logo(args) = cli.command else {
            panic!("expected logo");
        };
        assert_eq!(args.word, WORDMARK);
        assert_eq!(args.size.map(LogoSize::from), Some(LogoSize::Hero));
        assert!(!args.no_animate);
    }

    #[test]
    fn surface_size_keeps_source_aspect() {
        let settings = ViewerSettings { preset: None, cell_size: None, width: None, height: None };
        assert_eq!(settings.surface_size((640, 480)), SurfaceSize::new(640, 480));

        let wide = ViewerSettings { width: Some(320), ..settings.clone() };
        assert_eq!(wide.surface_size((640, 480)), SurfaceSize::new(320, 240));

        let tall = ViewerSettings { height: Some(120), ..settings.clone() };
        assert_eq!(tall.surface_size((640, 480)), SurfaceSize::new(160, 120));
        assert_eq!(tall.surface_size((0, 0)), SurfaceSize::new(0, 120));
    }

    #[test]
    fn glitched_logo_line_shifts_and_dims() {
        let steady = LogoLine { text: "@@ ".into(), opacity: 1.0, offset_px: 0.0 };
        assert_eq!(logo_line(&steady), "@@ ");

        let right = LogoLine { text: "@@ ".into(), opacity: 0.3, offset_px: 2.0 };
        assert_eq!(logo_line(&right), "\x1b[2m @@ \x1b[0m");

        let left = LogoLine { text: "@@ ".into(), opacity: 0.3, offset_px: -2.0 };
        assert_eq!(logo_line(&left), "\x1b[2m@ \x1b[0m");
    }

    #[test]
    fn playback_rate_must_give_a_valid_period() {
        let cli = Cli::parse_from(["prescale-ascii", "play", "x.gif", "--fps", "1e-30"]);
        let Commands::Play(args) = cli.command else {
            panic!("expected play");
        };
        assert!(frame_period(args.fps).is_err());
        assert!(frame_period(0.0).is_err());
        assert!(frame_period(f32::INFINITY).is_err());
        assert_eq!(frame_period(4.0).unwrap(), Duration::from_millis(250));
    }

    #[test]
    fn glitch_duration_must_fit() {
        let cli = Cli::parse_from(["prescale-ascii", "logo", "--glitch-seconds", "1e20"]);
        let Commands::Logo(args) = cli.command else {
            panic!("expected logo");
        };
        assert!(glitch_linger(args.glitch_seconds).is_err());
        assert!(glitch_linger(f32::INFINITY).is_err());
        assert_eq!(glitch_linger(-3.0).unwrap(), Duration::ZERO);
        assert_eq!(glitch_linger(f32::NAN).unwrap(), Duration::ZERO);
        assert_eq!(glitch_linger(2.5).unwrap(), Duration::from_millis(2500));
    }
}
