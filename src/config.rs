//! Extraction configuration.
//!
//! [`ExtractOptions`] is a builder that threads the quality setting, worker
//! count, and an optional progress callback through a batch run without
//! polluting every function signature. [`Quality`] is the validated FFmpeg
//! `-q:v` value.
//!
//! # Example
//!
//! ```
//! use lerobot_frames::{ExtractOptions, Quality};
//!
//! let options = ExtractOptions::new()
//!     .with_quality(Quality::new(4)?)
//!     .with_workers(8);
//! assert_eq!(options.quality.value(), 4);
//! # Ok::<(), lerobot_frames::FramesError>(())
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::error::FramesError;
use crate::progress::{NoOpProgress, ProgressCallback};

/// JPEG quality on FFmpeg's `-q:v` scale: 0 is best fidelity, 9 is worst.
///
/// Construction is validating, so a `Quality` in hand is always in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u8);

impl Quality {
    /// Lowest value on the scale (best fidelity).
    pub const BEST: Quality = Quality(0);
    /// Highest value on the scale (worst fidelity).
    pub const WORST: Quality = Quality(9);

    /// Validate a raw `-q:v` value.
    ///
    /// # Errors
    ///
    /// Returns [`FramesError::InvalidQuality`] for values above 9.
    pub fn new(value: u8) -> Result<Self, FramesError> {
        if value > Self::WORST.0 {
            return Err(FramesError::InvalidQuality(value));
        }
        Ok(Self(value))
    }

    /// The raw value passed to FFmpeg.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    /// A near-best default that keeps file sizes reasonable.
    fn default() -> Self {
        Quality(2)
    }
}

/// Configuration for a batch extraction run.
///
/// Worker count is an explicit setting rather than ambient global state, so
/// runs are deterministic under test harnesses. The library default is a
/// single worker; the CLI passes the host's parallelism explicitly.
#[derive(Clone)]
pub struct ExtractOptions {
    /// JPEG quality forwarded to the decoder.
    pub quality: Quality,
    /// Number of concurrent decoder subprocesses.
    pub workers: usize,
    /// Observer notified as episodes complete.
    pub(crate) progress: Arc<dyn ProgressCallback>,
}

impl ExtractOptions {
    /// Options with default quality, one worker, and no progress reporting.
    pub fn new() -> Self {
        Self {
            quality: Quality::default(),
            workers: 1,
            progress: Arc::new(NoOpProgress),
        }
    }

    /// Set the decoder quality.
    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    /// Set the worker count. Values below 1 are clamped to 1.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Attach a progress callback.
    pub fn with_progress(mut self, progress: Arc<dyn ProgressCallback>) -> Self {
        self.progress = progress;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for ExtractOptions {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FmtResult {
        formatter
            .debug_struct("ExtractOptions")
            .field("quality", &self.quality)
            .field("workers", &self.workers)
            .finish_non_exhaustive()
    }
}
