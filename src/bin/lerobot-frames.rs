use std::path::PathBuf;
use std::sync::Arc;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use env_logger::Env;
use indicatif::{ProgressBar, ProgressStyle};
use lerobot_frames::{
    extract_all, locate, resolve_dataset_root, Episode, ExtractOptions, FfmpegDecoder,
    FramesError, ProgressCallback, ProgressInfo, Quality,
};
use serde_json::json;

const CLI_AFTER_HELP: &str = "Examples:\n  lerobot-frames extract koenvanwijk/orange50-variation-2 --camera phone --workers 8\n  lerobot-frames extract my-user/my-dataset --quality 0 --root /data/lerobot --progress\n  lerobot-frames list koenvanwijk/orange50-variation-2 --json\n  lerobot-frames completions zsh > _lerobot-frames";

#[derive(Debug, Parser)]
#[command(
    name = "lerobot-frames",
    version,
    about = "Extract JPEG frame sets from LeRobot episode recordings via FFmpeg",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Parser, Clone, Default)]
struct GlobalOptions {
    /// Show additional logging output.
    #[arg(long, global = true)]
    verbose: bool,

    /// Show a progress bar where supported.
    #[arg(long, global = true)]
    progress: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract JPEG frames for every matching episode.
    #[command(
        about = "Extract episode frames",
        after_help = "Examples:\n  lerobot-frames extract koenvanwijk/orange50-variation-2 --camera phone\n  lerobot-frames extract my-user/my-dataset --quality 4 --workers 2 --progress"
    )]
    Extract {
        /// Hugging Face dataset repository id (e.g. user/dataset).
        repo_id: String,

        /// Only process this camera's recordings (e.g. phone, laptop).
        #[arg(long)]
        camera: Option<String>,

        /// FFmpeg -q:v value, 0 (best) to 9 (worst).
        #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(0..=9))]
        quality: u8,

        /// Parallel decoder subprocesses. Defaults to the host's CPU count.
        #[arg(long, default_value_t = num_cpus::get())]
        workers: usize,

        /// Dataset cache root override (else the LeRobot default cache).
        #[arg(long)]
        root: Option<PathBuf>,

        /// Print the run summary as machine-readable JSON.
        #[arg(long)]
        json: bool,
    },

    /// List the episode videos discovery would process, without extracting.
    #[command(
        about = "List matching episode videos",
        after_help = "Examples:\n  lerobot-frames list koenvanwijk/orange50-variation-2\n  lerobot-frames list my-user/my-dataset --camera laptop --json"
    )]
    List {
        /// Hugging Face dataset repository id (e.g. user/dataset).
        repo_id: String,

        /// Only list this camera's recordings.
        #[arg(long)]
        camera: Option<String>,

        /// Dataset cache root override (else the LeRobot default cache).
        #[arg(long)]
        root: Option<PathBuf>,

        /// Print the episode list as machine-readable JSON.
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts.
    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Drives an indicatif bar from worker-thread progress callbacks.
struct TerminalProgress {
    bar: ProgressBar,
}

impl TerminalProgress {
    fn new(total: u64) -> Self {
        let bar = ProgressBar::new(total);
        if let Ok(style) =
            ProgressStyle::with_template("{spinner:.green} {bar:40.cyan/blue} {pos}/{len} {msg}")
        {
            bar.set_style(style.progress_chars("##-"));
        }
        Self { bar }
    }

    fn finish(&self) {
        self.bar.finish_with_message("done");
    }
}

impl ProgressCallback for TerminalProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        self.bar.set_position(info.completed);
    }
}

/// Discover episodes and make an empty result fatal, per the tool's
/// exit-behavior contract.
fn discover(
    root: &std::path::Path,
    camera: Option<&str>,
) -> Result<Vec<Episode>, FramesError> {
    let episodes: Vec<Episode> = locate(root, camera).collect();
    if episodes.is_empty() {
        return Err(FramesError::DiscoveryEmpty {
            root: root.to_path_buf(),
            camera: camera.map(str::to_string),
        });
    }
    Ok(episodes)
}

/// First `limit` paths as display strings, with an ellipsis marker when
/// the list was truncated.
fn preview(paths: &[PathBuf], limit: usize) -> Vec<String> {
    let mut lines: Vec<String> = paths
        .iter()
        .take(limit)
        .map(|path| path.display().to_string())
        .collect();
    if paths.len() > limit {
        lines.push(format!("… and {} more", paths.len() - limit));
    }
    lines
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_filter = if cli.global.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    match cli.command {
        Commands::Extract {
            repo_id,
            camera,
            quality,
            workers,
            root,
            json,
        } => {
            let decoder = FfmpegDecoder::new();
            decoder.ensure_available()?;

            let dataset_root = resolve_dataset_root(&repo_id, root.as_deref())?;
            let episodes = discover(&dataset_root, camera.as_deref())?;

            if !json {
                println!("Dataset root: {}", dataset_root.display());
                println!(
                    "Found {} episode video(s), extracting JPEG frames…",
                    episodes.len(),
                );
            }

            let mut options = ExtractOptions::new()
                .with_quality(Quality::new(quality)?)
                .with_workers(workers);

            let progress_bar = cli
                .global
                .progress
                .then(|| Arc::new(TerminalProgress::new(episodes.len() as u64)));
            if let Some(bar) = &progress_bar {
                options = options.with_progress(bar.clone());
            }

            let frame_dirs = extract_all(&episodes, &decoder, &options)?;

            if let Some(bar) = progress_bar {
                bar.finish();
            }

            if json {
                let payload = json!({
                    "dataset_root": dataset_root.display().to_string(),
                    "episodes": episodes.len(),
                    "workers": workers,
                    "quality": quality,
                    "frame_dirs": frame_dirs
                        .iter()
                        .map(|dir| dir.display().to_string())
                        .collect::<Vec<_>>(),
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!(
                    "{} {}",
                    "success:".green().bold(),
                    format!("Extracted {} episode(s)", frame_dirs.len()).green(),
                );
                for line in preview(&frame_dirs, 3) {
                    println!("  • {line}");
                }
            }
        }
        Commands::List {
            repo_id,
            camera,
            root,
            json,
        } => {
            let dataset_root = resolve_dataset_root(&repo_id, root.as_deref())?;
            let episodes = discover(&dataset_root, camera.as_deref())?;

            if json {
                let payload = json!(episodes
                    .iter()
                    .map(|episode| json!({
                        "path": episode.path.display().to_string(),
                        "camera": episode.camera,
                        "index": episode.index,
                    }))
                    .collect::<Vec<_>>());
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!("Dataset root: {}", dataset_root.display());
                for episode in &episodes {
                    println!(
                        "  [{}] episode {:>4}  {}",
                        episode.camera,
                        episode.index,
                        episode.path.display(),
                    );
                }
                println!("{} episode video(s)", episodes.len());
            }
        }
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "lerobot-frames", &mut std::io::stdout());
        }
    }

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}
