//! The FFmpeg boundary.
//!
//! Frame decoding is delegated to the external `ffmpeg` executable, invoked
//! once per episode as a blocking subprocess. This module defines the
//! [`FrameDecoder`] trait, the seam between the pipeline and the decoder,
//! and [`FfmpegDecoder`], the production implementation.
//!
//! Keeping the decoder behind a trait keeps everything above it testable
//! without FFmpeg installed: the test suite substitutes a mock that writes
//! JPEG-named files and counts invocations.
//!
//! # Example
//!
//! ```no_run
//! use lerobot_frames::FfmpegDecoder;
//!
//! let decoder = FfmpegDecoder::new();
//! decoder.ensure_available()?;
//! # Ok::<(), lerobot_frames::FramesError>(())
//! ```

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::Quality;
use crate::error::FramesError;

/// Frame filename pattern handed to the decoder: 5-digit zero-padded index
/// starting at 0, so `00000.jpg`, `00001.jpg`, … sort lexically.
///
/// Downstream tooling depends on this exact shape; changing it breaks the
/// on-disk contract.
pub const FRAME_FILE_PATTERN: &str = "%05d.jpg";

/// Decodes one video into a directory of sequentially numbered JPEG frames.
///
/// Implementations must be [`Send`] and [`Sync`]: the batch runner invokes
/// one decode per worker thread concurrently, always on distinct episodes.
pub trait FrameDecoder: Send + Sync {
    /// Write every frame of `video` into `frames_dir` following
    /// [`FRAME_FILE_PATTERN`], at the given quality.
    ///
    /// `frames_dir` exists (and is empty or partially populated) when this
    /// is called. Implementations block until decoding finishes.
    fn decode(
        &self,
        video: &Path,
        frames_dir: &Path,
        quality: Quality,
    ) -> Result<(), FramesError>;
}

/// Production decoder: spawns the `ffmpeg` binary.
///
/// One subprocess per [`decode`](FrameDecoder::decode) call. FFmpeg's own
/// console output is reduced to errors (`-hide_banner -loglevel error`),
/// which pass through to this process's stderr.
#[derive(Debug, Clone)]
pub struct FfmpegDecoder {
    binary: PathBuf,
}

impl FfmpegDecoder {
    /// Decoder using `ffmpeg` from `PATH`.
    pub fn new() -> Self {
        Self::with_binary("ffmpeg")
    }

    /// Decoder using an explicit FFmpeg executable path.
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Verify the configured binary is runnable by probing `ffmpeg -version`.
    ///
    /// Called once at CLI startup so a missing FFmpeg install fails before
    /// any discovery or extraction work happens.
    ///
    /// # Errors
    ///
    /// Returns [`FramesError::DecoderUnavailable`] if the binary cannot be
    /// spawned or the probe exits non-zero.
    pub fn ensure_available(&self) -> Result<(), FramesError> {
        let output = Command::new(&self.binary)
            .arg("-version")
            .output()
            .map_err(|error| FramesError::DecoderUnavailable {
                reason: format!("failed to run {} -version: {error}", self.binary.display()),
            })?;

        if !output.status.success() {
            return Err(FramesError::DecoderUnavailable {
                reason: format!(
                    "{} -version exited with {}",
                    self.binary.display(),
                    output.status,
                ),
            });
        }

        Ok(())
    }
}

impl Default for FfmpegDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDecoder for FfmpegDecoder {
    fn decode(
        &self,
        video: &Path,
        frames_dir: &Path,
        quality: Quality,
    ) -> Result<(), FramesError> {
        let output_pattern = frames_dir.join(FRAME_FILE_PATTERN);
        log::debug!(
            "ffmpeg -i {} -q:v {} -> {}",
            video.display(),
            quality.value(),
            output_pattern.display(),
        );

        let status = Command::new(&self.binary)
            .arg("-hide_banner")
            .arg("-loglevel")
            .arg("error")
            .arg("-i")
            .arg(video)
            .arg("-q:v")
            .arg(quality.value().to_string())
            .arg("-start_number")
            .arg("0")
            .arg(&output_pattern)
            .status()?;

        if !status.success() {
            return Err(FramesError::DecodeFailure {
                episode: video.to_path_buf(),
                status,
            });
        }

        Ok(())
    }
}
