//! Common test utilities: a mock frame decoder and dataset-tree builders.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use lerobot_frames::{Episode, FrameDecoder, FramesError, Quality};

/// A decoder double that writes sequentially named JPEG files instead of
/// spawning FFmpeg, counts every invocation, and can be told to fail for
/// selected episodes or to stagger completion so input order and completion
/// order diverge.
pub struct MockDecoder {
    frames_per_episode: usize,
    invocations: AtomicUsize,
    fail_on: Option<String>,
    stagger: bool,
}

impl MockDecoder {
    pub fn new(frames_per_episode: usize) -> Self {
        Self {
            frames_per_episode,
            invocations: AtomicUsize::new(0),
            fail_on: None,
            stagger: false,
        }
    }

    /// Fail any decode whose episode file name matches exactly.
    pub fn failing_on(mut self, episode_file_name: &str) -> Self {
        self.fail_on = Some(episode_file_name.to_string());
        self
    }

    /// Sleep inversely to the episode index so later inputs finish first.
    pub fn with_stagger(mut self) -> Self {
        self.stagger = true;
        self
    }

    /// How many times `decode` ran (cache hits do not reach the decoder).
    pub fn invocations(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }
}

impl FrameDecoder for MockDecoder {
    fn decode(
        &self,
        video: &Path,
        frames_dir: &Path,
        _quality: Quality,
    ) -> Result<(), FramesError> {
        self.invocations.fetch_add(1, Ordering::SeqCst);

        if self.stagger {
            let index = episode_index_of(video);
            thread::sleep(Duration::from_millis((16 - (index % 16)) * 2));
        }

        let file_name = video.file_name().and_then(|name| name.to_str()).unwrap_or("");
        if self.fail_on.as_deref() == Some(file_name) {
            return Err(FramesError::DecodeFailure {
                episode: video.to_path_buf(),
                status: failed_status(),
            });
        }

        for frame in 0..self.frames_per_episode {
            fs::write(frames_dir.join(format!("{frame:05}.jpg")), b"jpeg")?;
        }
        Ok(())
    }
}

fn episode_index_of(video: &Path) -> u64 {
    video
        .file_stem()
        .and_then(|stem| stem.to_str())
        .and_then(|stem| stem.strip_prefix("episode_"))
        .and_then(|index| index.parse().ok())
        .unwrap_or(0)
}

/// A real non-zero exit status for failure injection.
fn failed_status() -> ExitStatus {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        ExitStatus::from_raw(1 << 8)
    }
    #[cfg(windows)]
    {
        use std::os::windows::process::ExitStatusExt;
        ExitStatus::from_raw(1)
    }
}

/// Create one camera stream directory with `count` empty episode videos
/// and return the episodes in filename-index order.
pub fn seed_camera_stream(
    dataset_root: &Path,
    chunk: &str,
    camera: &str,
    count: usize,
) -> Vec<Episode> {
    let camera_dir = dataset_root
        .join("videos")
        .join(chunk)
        .join(format!("observation.images.{camera}"));
    fs::create_dir_all(&camera_dir).expect("failed to create camera stream directory");

    (0..count)
        .map(|index| {
            let path = camera_dir.join(format!("episode_{index}.mp4"));
            fs::write(&path, b"mp4").expect("failed to write episode video");
            Episode {
                path,
                index: index as u64,
                camera: camera.to_string(),
            }
        })
        .collect()
}
