//! Parallel batch extraction.
//!
//! [`extract_all`] distributes episode extraction across a dedicated
//! [`rayon`] thread pool. Each worker blocks on its own decoder subprocess;
//! there is no shared mutable state between workers beyond the final result
//! aggregation and an atomic progress counter.
//!
//! The result vector is in **input order** regardless of which worker
//! finished first. The batch is fail-fast: the first failure any worker
//! observes aborts the run and no partial result list is returned. Callers
//! simply re-run, and episode-level idempotency skips the completed work.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use rayon::ThreadPoolBuilder;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::config::ExtractOptions;
use crate::discovery::Episode;
use crate::error::FramesError;
use crate::extraction::extract_episode;
use crate::ffmpeg::FrameDecoder;
use crate::progress::ProgressInfo;

/// Extract every episode in the batch, returning frame directories in
/// input order.
///
/// The pool is built with exactly `options.workers` threads and dropped
/// when the batch completes; worker count never leaks into process-global
/// state.
///
/// # Errors
///
/// - [`FramesError::EmptyInput`] if `episodes` is empty: an empty batch
///   signals a discovery or configuration problem, never a silent no-op.
/// - [`FramesError::WorkerPool`] if the thread pool cannot be built.
/// - The first [`FramesError::DecodeFailure`] (or I/O error) a worker
///   observes; episodes completed before the abort keep their frame
///   directories on disk.
pub fn extract_all(
    episodes: &[Episode],
    decoder: &dyn FrameDecoder,
    options: &ExtractOptions,
) -> Result<Vec<PathBuf>, FramesError> {
    if episodes.is_empty() {
        return Err(FramesError::EmptyInput);
    }

    let pool = ThreadPoolBuilder::new()
        .num_threads(options.workers)
        .build()
        .map_err(|error| FramesError::WorkerPool(error.to_string()))?;

    log::debug!(
        "Extracting {} episode(s) across {} worker(s)",
        episodes.len(),
        options.workers,
    );

    let total = episodes.len() as u64;
    let completed = AtomicU64::new(0);

    pool.install(|| {
        episodes
            .par_iter()
            .map(|episode| {
                let frames_dir = extract_episode(decoder, episode, options.quality)?;
                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                options.progress.on_progress(&ProgressInfo {
                    completed: done,
                    total,
                });
                Ok(frames_dir)
            })
            .collect::<Result<Vec<_>, FramesError>>()
    })
}
