//! # lerobot-frames
//!
//! Extract JPEG frame sets from LeRobot episode recordings.
//!
//! `lerobot-frames` walks a locally cached
//! [LeRobot](https://github.com/huggingface/lerobot) dataset, finds every
//! `episode_<M>.mp4` under the `videos/chunk-*/observation.images.<camera>/`
//! layout, and turns each one into a sibling directory of sequentially
//! numbered JPEG frames (`00000.jpg`, `00001.jpg`, …) by driving the
//! external `ffmpeg` binary. Extraction is idempotent per episode and runs
//! across a bounded worker pool.
//!
//! ## Quick Start
//!
//! ### Extract every episode of one camera
//!
//! ```no_run
//! use lerobot_frames::{
//!     extract_all, locate, resolve_dataset_root, ExtractOptions, FfmpegDecoder,
//! };
//!
//! let root = resolve_dataset_root("koenvanwijk/orange50-variation-2", None)?;
//! let episodes: Vec<_> = locate(&root, Some("phone")).collect();
//!
//! let decoder = FfmpegDecoder::new();
//! let options = ExtractOptions::new().with_workers(8);
//! let frame_dirs = extract_all(&episodes, &decoder, &options)?;
//!
//! println!("extracted {} episode(s)", frame_dirs.len());
//! # Ok::<(), lerobot_frames::FramesError>(())
//! ```
//!
//! ### Extract a single episode
//!
//! ```no_run
//! use lerobot_frames::{extract_episode, locate, FfmpegDecoder, Quality};
//!
//! let decoder = FfmpegDecoder::new();
//! for episode in locate("/data/lerobot/my-dataset".as_ref(), None) {
//!     let frames_dir = extract_episode(&decoder, &episode, Quality::BEST)?;
//!     println!("{} -> {}", episode.path.display(), frames_dir.display());
//! }
//! # Ok::<(), lerobot_frames::FramesError>(())
//! ```
//!
//! ## Guarantees
//!
//! - **Idempotent**: a non-empty frame directory is complete; re-runs
//!   never re-decode it.
//! - **Order-preserving**: [`extract_all`] returns frame directories in
//!   input order, whatever the completion order.
//! - **Fail-fast**: the first decoder failure aborts the batch; re-running
//!   skips whatever already finished.
//!
//! ## Requirements
//!
//! The `ffmpeg` executable must be installed and on `PATH` (or configured
//! via [`FfmpegDecoder::with_binary`]). The dataset must already be cached
//! locally; this crate never downloads.

pub mod config;
pub mod dataset;
pub mod discovery;
pub mod error;
pub mod extraction;
pub mod ffmpeg;
pub mod parallel;
pub mod progress;

pub use config::{ExtractOptions, Quality};
pub use dataset::{cache_root, resolve_dataset_root};
pub use discovery::{locate, Episode, CAMERA_STREAM_PREFIX};
pub use error::FramesError;
pub use extraction::{extract_episode, frames_dir_for, FRAMES_DIR_SUFFIX};
pub use ffmpeg::{FfmpegDecoder, FrameDecoder, FRAME_FILE_PATTERN};
pub use parallel::extract_all;
pub use progress::{ProgressCallback, ProgressInfo};
