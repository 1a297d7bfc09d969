//! Replay an xyz trajectory as a keyframed scene.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use xyzanim::selection::FrameSelection;
use xyzanim::{Reconciler, SceneConfig, SceneRecorder, TrailingBlock, Trajectory};

/// Turn an xyz trajectory into a scene of atom spheres with one keyframe per frame.
#[derive(Parser)]
struct Args {
    /// Input path (xyz).
    input: PathBuf,

    /// Scene configuration (json) with species radii and colors, bond style and bonding table.
    ///
    /// Without it, hydrogen and oxygen are known and no bonds are drawn.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the recorded scene with all keyframes to this path (json).
    ///
    /// If no output path is given, a summary of the scene is printed instead.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Frame selection in the format `start:stop:step`. Each of these values optional.
    ///
    /// The first frame always builds the scene. The selection decides which of the later frames
    /// are keyframed.
    ///
    /// - `:100` will key the frames before frame 100.
    ///
    /// - `:100:2` will key every second frame before frame 100.
    #[arg(short, long)]
    frames: Option<FrameSelection>,

    /// Fail on a partial frame block at the end of the trajectory instead of dropping it.
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("could not load scene config {}", path.display()))?,
        None => SceneConfig::default(),
    };
    let trailing = if args.strict {
        TrailingBlock::Error
    } else {
        TrailingBlock::Warn
    };
    let trajectory = Trajectory::open(&args.input, trailing)
        .with_context(|| format!("could not read trajectory {}", args.input.display()))?;

    let frame_selection = args.frames.unwrap_or_default();
    let mut reconciler = Reconciler::new(SceneRecorder::new(), config);
    reconciler
        .animate(&trajectory, &frame_selection)
        .context("could not animate trajectory")?;
    let scene = reconciler.into_renderer();

    match args.output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("could not create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            scene.write_json(&mut writer)?;
            writer.flush()?;
            log::info!("wrote {} objects to {}", scene.len(), path.display());
        }
        None => summarize(&scene)?,
    }

    Ok(())
}

fn summarize(scene: &SceneRecorder) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    for obj in scene.objects() {
        let p = obj.position;
        writeln!(
            stdout,
            "{:<12}{:>10.4}{:>10.4}{:>10.4}\t{} keyframes",
            obj.name,
            p.x,
            p.y,
            p.z,
            obj.keyframes.len()
        )?;
    }
    writeln!(
        stdout,
        "{} objects, {} keyframes",
        scene.len(),
        scene.nkeyframes()
    )
}
