//! Episode discovery.
//!
//! Walks a dataset cache following the fixed LeRobot video layout and yields
//! one [`Episode`] per recording:
//!
//! ```text
//! <root>/videos/chunk-<NNN>/observation.images.<camera>/episode_<M>.mp4
//! ```
//!
//! The walk is lazy and restartable: each call to [`locate`] re-reads the
//! filesystem, and nothing is cached between calls. No ordering is
//! guaranteed beyond what `read_dir` returns; callers that need a stable
//! order must sort the collected episodes themselves.
//!
//! # Example
//!
//! ```no_run
//! use lerobot_frames::locate;
//!
//! for episode in locate("/data/lerobot/my-dataset".as_ref(), Some("phone")) {
//!     println!("episode {} -> {}", episode.index, episode.path.display());
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

/// Directory prefix shared by all camera stream directories.
pub const CAMERA_STREAM_PREFIX: &str = "observation.images.";

/// Directory prefix shared by all chunk directories.
const CHUNK_PREFIX: &str = "chunk-";

/// Filename shape of an episode recording: `episode_<M>.mp4`.
const EPISODE_PREFIX: &str = "episode_";
const EPISODE_SUFFIX: &str = ".mp4";

/// One recorded episode video, as found on disk.
///
/// Episodes are read-only inputs: this crate never modifies or moves the
/// video file itself, only creates a sibling frame directory next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    /// Resolved path to the `.mp4` file.
    pub path: PathBuf,
    /// Numeric id parsed from the filename (`episode_12.mp4` -> 12).
    pub index: u64,
    /// Camera key parsed from the parent directory
    /// (`observation.images.phone` -> `phone`).
    pub camera: String,
}

/// Lazily enumerate every episode video under `dataset_root/videos`.
///
/// `camera_filter` restricts the walk to one camera stream. The filter
/// matches the camera key exactly: `phone` selects
/// `observation.images.phone` and nothing else. (A suffix match would let
/// `one` select `observation.images.phone` too, which silently widens the
/// processed set.)
///
/// A missing `videos/` directory yields an empty sequence rather than an
/// error; deciding whether zero episodes is fatal is the caller's job,
/// see [`FramesError::DiscoveryEmpty`](crate::FramesError::DiscoveryEmpty).
/// Entries that do not follow the naming conventions are skipped.
pub fn locate<'a>(
    dataset_root: &Path,
    camera_filter: Option<&'a str>,
) -> impl Iterator<Item = Episode> + use<'a> {
    let videos_root = dataset_root.join("videos");
    log::debug!(
        "Scanning {} (camera: {})",
        videos_root.display(),
        camera_filter.unwrap_or("any"),
    );

    subdirectories(&videos_root)
        .filter(|chunk_dir| directory_name_matches(chunk_dir, is_chunk_name))
        .flat_map(move |chunk_dir| {
            subdirectories(&chunk_dir).filter(move |camera_dir| {
                directory_name_matches(camera_dir, |name| {
                    camera_key(name).is_some_and(|key| match camera_filter {
                        Some(filter) => key == filter,
                        None => true,
                    })
                })
            })
        })
        .flat_map(|camera_dir| episodes_in(&camera_dir))
}

/// Iterate over the subdirectories of `parent`, yielding nothing if the
/// directory is missing or unreadable.
fn subdirectories(parent: &Path) -> impl Iterator<Item = PathBuf> + use<> {
    fs::read_dir(parent)
        .into_iter()
        .flatten()
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
}

/// Iterate over the episode videos directly inside one camera directory.
fn episodes_in(camera_dir: &Path) -> impl Iterator<Item = Episode> + use<> {
    let camera = camera_dir
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(camera_key)
        .unwrap_or_default()
        .to_string();

    fs::read_dir(camera_dir)
        .into_iter()
        .flatten()
        .flatten()
        .map(|entry| entry.path())
        .filter_map(move |path| {
            let index = path
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(episode_index)?;
            path.is_file().then(|| Episode {
                path: path.clone(),
                index,
                camera: camera.clone(),
            })
        })
}

fn directory_name_matches(path: &Path, predicate: impl Fn(&str) -> bool) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(predicate)
}

/// `chunk-000` -> true; anything without a numeric suffix -> false.
fn is_chunk_name(name: &str) -> bool {
    name.strip_prefix(CHUNK_PREFIX)
        .is_some_and(|suffix| !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()))
}

/// `observation.images.phone` -> `Some("phone")`.
fn camera_key(directory_name: &str) -> Option<&str> {
    directory_name
        .strip_prefix(CAMERA_STREAM_PREFIX)
        .filter(|key| !key.is_empty())
}

/// `episode_12.mp4` -> `Some(12)`.
fn episode_index(file_name: &str) -> Option<u64> {
    let stem = file_name.strip_suffix(EPISODE_SUFFIX)?;
    stem.strip_prefix(EPISODE_PREFIX)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::{camera_key, episode_index, is_chunk_name};

    #[test]
    fn chunk_names() {
        assert!(is_chunk_name("chunk-000"));
        assert!(is_chunk_name("chunk-17"));
        assert!(!is_chunk_name("chunk-"));
        assert!(!is_chunk_name("chunk-abc"));
        assert!(!is_chunk_name("data"));
    }

    #[test]
    fn camera_keys() {
        assert_eq!(camera_key("observation.images.phone"), Some("phone"));
        assert_eq!(camera_key("observation.images.top_cam"), Some("top_cam"));
        assert_eq!(camera_key("observation.images."), None);
        assert_eq!(camera_key("observation.state"), None);
    }

    #[test]
    fn episode_indices() {
        assert_eq!(episode_index("episode_0.mp4"), Some(0));
        assert_eq!(episode_index("episode_000012.mp4"), Some(12));
        assert_eq!(episode_index("episode_.mp4"), None);
        assert_eq!(episode_index("episode_3.avi"), None);
        assert_eq!(episode_index("notes.txt"), None);
    }
}
