//! Positional grouping of scan events.
//!
//! Events are bucketed by their position in the input, not by distance.
//! Along a route, consecutive scans happen near each other, so contiguous
//! runs stand in for spatial neighbourhoods.

use crate::models::{ScanCluster, ScanEvent};

/// Split `scans` into contiguous buckets of `ceil(N / K)` and average each.
///
/// Yields at most `cluster_count` clusters; counts always sum to `scans.len()`.
/// A zero cluster count is treated as one.
pub fn cluster_scans(scans: &[ScanEvent], cluster_count: usize) -> Vec<ScanCluster> {
    if scans.is_empty() {
        return Vec::new();
    }

    let bucket = scans.len().div_ceil(cluster_count.max(1));
    scans
        .chunks(bucket)
        .map(|chunk| {
            let n = chunk.len() as f64;
            let (lat_sum, lng_sum) = chunk
                .iter()
                .fold((0.0, 0.0), |(lat, lng), s| (lat + s.lat, lng + s.lng));
            ScanCluster {
                lat: lat_sum / n,
                lng: lng_sum / n,
                count: chunk.len(),
            }
        })
        .collect()
}
