//! Progress reporting for batch extraction.
//!
//! [`ProgressCallback`] lets callers observe a batch run as episodes
//! complete; the CLI drives an `indicatif` bar with it. Callbacks observe
//! but cannot halt the batch.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use lerobot_frames::{ExtractOptions, ProgressCallback, ProgressInfo};
//!
//! struct PrintProgress;
//!
//! impl ProgressCallback for PrintProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         println!("{}/{} episodes done", info.completed, info.total);
//!     }
//! }
//!
//! let options = ExtractOptions::new().with_progress(Arc::new(PrintProgress));
//! ```

/// A snapshot of batch progress, delivered once per completed episode.
#[derive(Debug, Clone, Copy)]
pub struct ProgressInfo {
    /// Episodes finished so far (cached and freshly decoded alike).
    pub completed: u64,
    /// Total episodes in this batch.
    pub total: u64,
}

/// Trait for receiving progress updates during a batch run.
///
/// Implementations must be [`Send`] and [`Sync`]: callbacks fire from
/// worker threads, in completion order rather than input order.
pub trait ProgressCallback: Send + Sync {
    /// Called after each episode's frame set is ready.
    fn on_progress(&self, info: &ProgressInfo);
}

/// A no-op implementation that discards all progress notifications.
///
/// This is the default when no callback is configured.
pub(crate) struct NoOpProgress;

impl ProgressCallback for NoOpProgress {
    fn on_progress(&self, _info: &ProgressInfo) {}
}
