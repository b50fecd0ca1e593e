//! Synthesized scan events for range replays.
//!
//! A range replay stitches a representative path onto an arbitrary window,
//! so recorded scans no longer line up with it. Placeholder scans are drawn
//! from the replayed positions instead.

use std::hash::Hasher;

use rand::Rng;
use twox_hash::XxHash64;

use crate::identifiers::SubjectIdentifier;
use crate::models::config::MAX_SCAN_JITTER_DEG;
use crate::models::{ScanEvent, TimeWindow, TrajectoryPoint};

/// Stable RNG seed for a vehicle handle and window
pub fn seed_for(handle: &str, window: &TimeWindow) -> u64 {
    let mut hasher = XxHash64::with_seed(0);
    hasher.write(handle.as_bytes());
    hasher.write_i64(window.start().timestamp_millis());
    hasher.write_i64(window.end().timestamp_millis());
    hasher.finish()
}

/// Sample up to `max_scans` trajectory points, jitter each by at most
/// `jitter_deg` per axis, and return them in time order.
///
/// Jitter is capped at [`MAX_SCAN_JITTER_DEG`]; a non-finite value means none.
pub fn synthesize_scans<R: Rng>(
    handle: &str,
    trajectory: &[TrajectoryPoint],
    max_scans: usize,
    jitter_deg: f64,
    rng: &mut R,
) -> Vec<ScanEvent> {
    if trajectory.is_empty() {
        return Vec::new();
    }

    let jitter = if jitter_deg.is_finite() {
        jitter_deg.abs().min(MAX_SCAN_JITTER_DEG)
    } else {
        0.0
    };
    let count = max_scans.min(trajectory.len());
    let mut scans: Vec<ScanEvent> = (0..count)
        .map(|k| {
            let anchor = &trajectory[rng.random_range(0..trajectory.len())];
            ScanEvent {
                subject_id: SubjectIdentifier::new(format!("{}-scan-{:02}", handle, k)),
                lat: anchor.lat + rng.random_range(-jitter..=jitter),
                lng: anchor.lng + rng.random_range(-jitter..=jitter),
                timestamp: anchor.timestamp,
            }
        })
        .collect();

    scans.sort_by_key(|s| s.timestamp);
    scans
}
