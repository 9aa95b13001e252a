use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use scrollscene::{
    ChapterTimeline, CounterAnimator, EffectiveDuration, FieldBuild, GeoJsonShape,
    ParticleDef, ParticleIntro, PointShape, Raster, RasterShape, Rgba8, SceneConfig, ShapeSource,
    build_field,
};
use tokio_util::sync::CancellationToken;

#[derive(Parser, Debug)]
#[command(name = "scrollscene", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sample the chapter story and video scrub target at one progress value.
    Story(StoryArgs),
    /// Build the particle field, simulate the intro and write the last frame as a PNG.
    Particles(ParticlesArgs),
    /// Print every counter's display at an elapsed time.
    Counter(CounterArgs),
}

#[derive(Parser, Debug)]
struct StoryArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Scroll progress in [0, 1].
    #[arg(long)]
    progress: f64,

    /// Natural media duration in seconds, as reported by metadata.
    #[arg(long)]
    natural_secs: Option<f64>,
}

#[derive(Parser, Debug)]
struct ParticlesArgs {
    /// Input scene JSON (its `particles` section; defaults when absent).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Target logo (PNG, JPEG or SVG).
    #[arg(long)]
    target: PathBuf,

    /// Start shape: a silhouette image, or GeoJSON when the extension is `.json`/`.geojson`.
    #[arg(long)]
    shape: Option<PathBuf>,

    /// Fetch GeoJSON start shape data from a URL instead.
    #[cfg(feature = "fetch")]
    #[arg(long, conflicts_with = "shape")]
    shape_url: Option<String>,

    /// Frames to simulate at 60 fps.
    #[arg(long, default_value_t = 240)]
    frames: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct CounterArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Elapsed visible time in milliseconds.
    #[arg(long)]
    at_ms: u64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Story(args) => cmd_story(args),
        Command::Particles(args) => cmd_particles(args),
        Command::Counter(args) => cmd_counter(args),
    }
}

fn cmd_story(args: StoryArgs) -> anyhow::Result<()> {
    let cfg = SceneConfig::load(&args.in_path)?;
    let story = cfg
        .story
        .context("scene has no `story` section")?;
    let timeline = ChapterTimeline::new(story)?;
    let frame = timeline.sample(args.progress);

    let video = cfg.video.map(|v| {
        let effective = EffectiveDuration::resolve(args.natural_secs, v.crop_end_secs);
        serde_json::json!({
            "effective_duration": effective,
            "target_time": frame.progress * effective,
        })
    });

    let out = serde_json::json!({ "timeline": frame, "video": video });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_particles(args: ParticlesArgs) -> anyhow::Result<()> {
    let cfg = SceneConfig::load(&args.in_path)?;
    let def = cfg.particles.unwrap_or_default();
    let target = Arc::new(Raster::from_path(&args.target)?);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("build tokio runtime")?;
    let cancel = CancellationToken::new();

    #[cfg(feature = "fetch")]
    if let Some(url) = &args.shape_url {
        let shape = scrollscene::HttpGeoJsonShape::new(url.clone());
        let build = rt.block_on(build_field(target, Some(&shape), &def, &cancel));
        return simulate(build, def, args.frames, &args.out);
    }

    let build = match &args.shape {
        None => rt.block_on(build_field(target, None::<&PointShape>, &def, &cancel)),
        Some(path) if is_geojson(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read shape '{}'", path.display()))?;
            let shape = GeoJsonShape::from_json_str(&text)?;
            rt.block_on(run_build(target, &shape, &def, &cancel))
        }
        Some(path) => {
            let shape = RasterShape::new(Raster::from_path(path)?);
            rt.block_on(run_build(target, &shape, &def, &cancel))
        }
    };
    simulate(build, def, args.frames, &args.out)
}

async fn run_build<S: ShapeSource>(
    target: Arc<Raster>,
    shape: &S,
    def: &ParticleDef,
    cancel: &CancellationToken,
) -> FieldBuild {
    build_field(target, Some(shape), def, cancel).await
}

fn is_geojson(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("json" | "geojson")
    )
}

fn simulate(build: FieldBuild, def: ParticleDef, frames: u32, out: &Path) -> anyhow::Result<()> {
    let strategy = build.strategy.clone();
    let (w, h) = (def.canvas_width.round() as u32, def.canvas_height.round() as u32);

    let mut intro = ParticleIntro::new(def);
    intro.begin_load();
    intro.finish_load(build, Duration::ZERO);
    let mut now = Duration::ZERO;
    for i in 1..=frames {
        now = Duration::from_secs_f64(f64::from(i) / 60.0);
        intro.on_frame(now);
    }

    let field = intro.field().context("particle field was not installed")?;
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    field
        .splat(w, h, Rgba8::rgb(0, 0, 0))
        .save_with_format(out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", out.display()))?;

    tracing::info!(
        strategy = ?strategy,
        particles = field.len(),
        progress = intro.progress(now),
        formed = intro.is_formed(),
        "simulated particle intro"
    );
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_counter(args: CounterArgs) -> anyhow::Result<()> {
    let cfg = SceneConfig::load(&args.in_path)?;
    let at = Duration::from_millis(args.at_ms);
    let displays: Vec<serde_json::Value> = cfg
        .counters
        .into_iter()
        .map(|def| {
            let label = def.label.clone();
            let mut counter = CounterAnimator::new(def);
            counter.set_visible(true, Duration::ZERO);
            counter.on_frame(at);
            serde_json::json!({ "label": label, "display": counter.display(at) })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&displays)?);
    Ok(())
}
