//! Batch coordination integration tests.
//!
//! Verify order preservation across worker counts, the empty-input guard,
//! fail-fast batch abort, and progress reporting.

mod common;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use common::{seed_camera_stream, MockDecoder};
use lerobot_frames::{
    extract_all, frames_dir_for, ExtractOptions, FramesError, ProgressCallback, ProgressInfo,
};

#[test]
fn results_are_in_input_order_for_any_worker_count() {
    for workers in [1, 2, 8] {
        let dataset = tempfile::tempdir().expect("Failed to create temp dir");
        let episodes = seed_camera_stream(dataset.path(), "chunk-000", "phone", 12);
        // Staggered decode times make completion order diverge from input
        // order whenever more than one worker runs.
        let decoder = MockDecoder::new(1).with_stagger();
        let options = ExtractOptions::new().with_workers(workers);

        let frame_dirs = extract_all(&episodes, &decoder, &options)
            .unwrap_or_else(|error| panic!("batch with {workers} worker(s) failed: {error}"));

        let expected: Vec<_> = episodes
            .iter()
            .map(|episode| frames_dir_for(&episode.path))
            .collect();
        assert_eq!(frame_dirs, expected, "order broke with {workers} worker(s)");
        assert_eq!(decoder.invocations(), episodes.len());
    }
}

#[test]
fn empty_input_is_rejected() {
    let decoder = MockDecoder::new(1);
    let options = ExtractOptions::new();

    let error = extract_all(&[], &decoder, &options).expect_err("empty batch must fail");
    assert!(
        matches!(error, FramesError::EmptyInput),
        "expected EmptyInput, got {error}",
    );
    assert_eq!(decoder.invocations(), 0);
}

#[test]
fn one_failure_aborts_the_whole_batch() {
    let dataset = tempfile::tempdir().expect("Failed to create temp dir");
    let episodes = seed_camera_stream(dataset.path(), "chunk-000", "phone", 5);
    let decoder = MockDecoder::new(1).failing_on("episode_2.mp4");
    let options = ExtractOptions::new().with_workers(2);

    let error = extract_all(&episodes, &decoder, &options).expect_err("batch must abort");
    match error {
        FramesError::DecodeFailure { episode, .. } => {
            assert!(episode.ends_with("episode_2.mp4"), "wrong episode: {}", episode.display());
        }
        other => panic!("expected DecodeFailure, got {other}"),
    }
}

#[test]
fn a_rerun_after_failure_skips_completed_episodes() {
    let dataset = tempfile::tempdir().expect("Failed to create temp dir");
    let episodes = seed_camera_stream(dataset.path(), "chunk-000", "phone", 4);

    let failing = MockDecoder::new(1).failing_on("episode_3.mp4");
    let options = ExtractOptions::new();
    extract_all(&episodes, &failing, &options).expect_err("first run must abort");

    // Sequential run: episodes 0-2 completed before the failure.
    let retry = MockDecoder::new(1);
    let frame_dirs = extract_all(&episodes, &retry, &options).expect("retry failed");
    assert_eq!(frame_dirs.len(), 4);
    assert_eq!(retry.invocations(), 1, "only the failed episode is redone");
}

struct CountingProgress {
    calls: AtomicU64,
    last_completed: AtomicU64,
    total_seen: AtomicU64,
}

impl ProgressCallback for CountingProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.last_completed.fetch_max(info.completed, Ordering::SeqCst);
        self.total_seen.store(info.total, Ordering::SeqCst);
    }
}

#[test]
fn progress_fires_once_per_episode() {
    let dataset = tempfile::tempdir().expect("Failed to create temp dir");
    let episodes = seed_camera_stream(dataset.path(), "chunk-000", "phone", 6);
    let decoder = MockDecoder::new(1);
    let progress = Arc::new(CountingProgress {
        calls: AtomicU64::new(0),
        last_completed: AtomicU64::new(0),
        total_seen: AtomicU64::new(0),
    });
    let options = ExtractOptions::new()
        .with_workers(3)
        .with_progress(progress.clone());

    extract_all(&episodes, &decoder, &options).expect("batch failed");

    assert_eq!(progress.calls.load(Ordering::SeqCst), 6);
    assert_eq!(progress.last_completed.load(Ordering::SeqCst), 6);
    assert_eq!(progress.total_seen.load(Ordering::SeqCst), 6);
}
