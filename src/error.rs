//! Error types for the `lerobot-frames` crate.
//!
//! This module defines [`FramesError`], the unified error type returned by all
//! fallible operations in the crate. Errors carry enough context to diagnose
//! the problem without additional logging at the call site: the dataset path
//! that was probed, the episode that failed, the decoder's exit status.

use std::{io::Error as IoError, path::PathBuf, process::ExitStatus};

use thiserror::Error;

/// The unified error type for all `lerobot-frames` operations.
///
/// Every public method that can fail returns `Result<T, FramesError>`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FramesError {
    /// The dataset's local cache directory does not exist.
    ///
    /// This tool never downloads datasets; fetch the repository with the
    /// LeRobot tooling first, or point `--root` at an existing cache.
    #[error(
        "Dataset '{repo_id}' not found at {path}: download it with the LeRobot tooling \
         or pass an explicit cache root"
    )]
    DatasetRootMissing {
        /// Hugging Face repository id, e.g. `koenvanwijk/orange50-variation-2`.
        repo_id: String,
        /// The local path that was probed.
        path: PathBuf,
    },

    /// Discovery walked the dataset and found no matching episode videos.
    #[error(
        "No episode videos found under {root} (camera: {})",
        .camera.as_deref().unwrap_or("any")
    )]
    DiscoveryEmpty {
        /// The dataset root that was searched.
        root: PathBuf,
        /// The camera filter in effect, if any.
        camera: Option<String>,
    },

    /// A batch run was invoked with an empty episode list.
    ///
    /// Distinct from [`DiscoveryEmpty`](Self::DiscoveryEmpty): this signals a
    /// caller configuration error rather than a fruitless filesystem walk.
    #[error("No episodes to extract (empty work list)")]
    EmptyInput,

    /// A quality value outside the supported `-q:v` scale was provided.
    #[error("Quality {0} is out of range (expected 0-9, lower = better fidelity)")]
    InvalidQuality(u8),

    /// The external decoder binary could not be launched at all.
    #[error("FFmpeg is not available: {reason}")]
    DecoderUnavailable {
        /// What went wrong while probing the binary.
        reason: String,
    },

    /// The external decoder ran but exited with a non-zero status.
    ///
    /// The partially written frame directory is left in place; a re-run
    /// retries the episode unless at least one frame was produced.
    #[error("FFmpeg {status} while extracting frames from {episode}")]
    DecodeFailure {
        /// The episode video that failed to decode.
        episode: PathBuf,
        /// The decoder process's exit status.
        status: ExitStatus,
    },

    /// The worker thread pool could not be constructed.
    #[error("Failed to build worker pool: {0}")]
    WorkerPool(String),

    /// An I/O error occurred while walking the dataset or creating output
    /// directories.
    #[error("I/O error: {0}")]
    Io(#[from] IoError),
}
