//! Per-episode frame extraction.
//!
//! One episode video becomes one sibling directory of JPEG frames:
//!
//! ```text
//! episode_12.mp4  ->  episode_12_frames/00000.jpg, 00001.jpg, …
//! ```
//!
//! Extraction is idempotent at the episode level: a non-empty frame
//! directory is treated as complete and returned without touching the
//! decoder, so re-running a partially failed batch only redoes the missing
//! work. The existence check is deliberately not atomic across separate
//! tool invocations: two concurrent runs may decode the same episode
//! twice, but the deterministic frame names make the duplicate writes
//! byte-equivalent, never corrupt.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Quality;
use crate::discovery::Episode;
use crate::error::FramesError;
use crate::ffmpeg::FrameDecoder;

/// Suffix appended to the episode file stem to name its frame directory.
pub const FRAMES_DIR_SUFFIX: &str = "_frames";

/// The frame directory belonging to an episode video path.
///
/// `…/episode_12.mp4` -> `…/episode_12_frames`. Purely lexical; does not
/// touch the filesystem.
pub fn frames_dir_for(episode_path: &Path) -> PathBuf {
    let stem = episode_path
        .file_stem()
        .map(|stem| stem.to_string_lossy())
        .unwrap_or_default();
    episode_path.with_file_name(format!("{stem}{FRAMES_DIR_SUFFIX}"))
}

/// Extract one episode's frames, skipping episodes already done.
///
/// Returns the frame directory path. The decoder is invoked at most once:
/// if the directory already exists and contains at least one entry, the
/// episode is considered complete and the decoder is not called.
///
/// # Errors
///
/// [`FramesError::DecodeFailure`] if the decoder exits non-zero. The
/// partially written directory is left in place: if it gained at least one
/// frame it will (incorrectly but harmlessly) be treated as complete on the
/// next run, otherwise the episode is retried.
pub fn extract_episode(
    decoder: &dyn FrameDecoder,
    episode: &Episode,
    quality: Quality,
) -> Result<PathBuf, FramesError> {
    let frames_dir = frames_dir_for(&episode.path);

    if frames_dir.is_dir() && !is_empty_dir(&frames_dir)? {
        log::debug!("Skipping {} (frames already extracted)", episode.path.display());
        return Ok(frames_dir);
    }

    fs::create_dir_all(&frames_dir)?;
    decoder.decode(&episode.path, &frames_dir, quality)?;

    Ok(frames_dir)
}

fn is_empty_dir(directory: &Path) -> Result<bool, FramesError> {
    Ok(fs::read_dir(directory)?.next().is_none())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::frames_dir_for;

    #[test]
    fn frames_dir_is_a_sibling() {
        let episode = Path::new("/data/videos/chunk-000/observation.images.phone/episode_3.mp4");
        assert_eq!(
            frames_dir_for(episode),
            Path::new("/data/videos/chunk-000/observation.images.phone/episode_3_frames"),
        );
    }
}
