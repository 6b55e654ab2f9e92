//! Dataset cache resolution.
//!
//! Maps a Hugging Face repository id (e.g. `koenvanwijk/orange50-variation-2`)
//! to the directory where the LeRobot tooling caches that dataset locally.
//! This crate never downloads anything: resolution only decides *where* the
//! dataset should be and verifies that it is actually there.
//!
//! The cache root is, in order of precedence:
//!
//! 1. an explicit override passed by the caller (`--root` on the CLI),
//! 2. the `HF_LEROBOT_HOME` environment variable,
//! 3. the `LEROBOT_HOME` environment variable (older LeRobot releases),
//! 4. `~/.cache/huggingface/lerobot`.
//!
//! # Example
//!
//! ```no_run
//! use lerobot_frames::resolve_dataset_root;
//!
//! let root = resolve_dataset_root("koenvanwijk/orange50-variation-2", None)?;
//! println!("dataset cached at {}", root.display());
//! # Ok::<(), lerobot_frames::FramesError>(())
//! ```

use std::env;
use std::path::{Path, PathBuf};

use crate::error::FramesError;

/// Environment variable naming the LeRobot cache root (current tooling).
pub const HF_LEROBOT_HOME_ENV: &str = "HF_LEROBOT_HOME";

/// Environment variable naming the LeRobot cache root (older tooling).
pub const LEROBOT_HOME_ENV: &str = "LEROBOT_HOME";

/// Default cache location relative to the user's home directory.
const DEFAULT_CACHE_SUFFIX: &str = ".cache/huggingface/lerobot";

/// Resolve the cache root directory under which datasets live.
///
/// Does not touch the filesystem; see [`resolve_dataset_root`] for the
/// existence-checked, per-dataset variant.
pub fn cache_root(root_override: Option<&Path>) -> PathBuf {
    if let Some(root) = root_override {
        return root.to_path_buf();
    }

    for variable in [HF_LEROBOT_HOME_ENV, LEROBOT_HOME_ENV] {
        if let Some(value) = env::var_os(variable) {
            if !value.is_empty() {
                return PathBuf::from(value);
            }
        }
    }

    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_CACHE_SUFFIX)
}

/// Resolve the local directory for one dataset and verify it exists.
///
/// The repository id is joined onto the cache root as-is, so namespaced ids
/// (`user/dataset`) become nested directories, matching the layout the
/// LeRobot tooling writes.
///
/// # Errors
///
/// Returns [`FramesError::DatasetRootMissing`] if the resolved directory does
/// not exist. Obtaining the dataset is the caller's responsibility.
pub fn resolve_dataset_root(
    repo_id: &str,
    root_override: Option<&Path>,
) -> Result<PathBuf, FramesError> {
    let dataset_root = cache_root(root_override).join(repo_id);
    log::debug!("Resolved dataset '{repo_id}' to {}", dataset_root.display());

    if !dataset_root.is_dir() {
        return Err(FramesError::DatasetRootMissing {
            repo_id: repo_id.to_string(),
            path: dataset_root,
        });
    }

    Ok(dataset_root)
}
