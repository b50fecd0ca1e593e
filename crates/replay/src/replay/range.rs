//! Replay of a vehicle over an arbitrary window.
//!
//! A vehicle may have many trips in the window, or none that line up with
//! it. The replay takes the vehicle's most complete recorded path and
//! stretches it evenly across the window.

use chrono::TimeDelta;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::models::*;
use crate::replay::cluster::cluster_scans;
use crate::replay::decimate::decimate;
use crate::replay::synth::{seed_for, synthesize_scans};
use crate::replay::visits::visit_stops;
use crate::spatial::queries::{course_degrees, haversine_distance};

/// Build the by-range payload for the vehicle named by `handle` (vehicle id
/// or plate) over `window`.
///
/// Scan synthesis is seeded from the handle and window, so identical calls
/// return identical payloads.
pub fn build_range_replay(
    catalogue: &dyn TripCatalogue,
    handle: &str,
    window: &TimeWindow,
    config: &EngineConfig,
) -> Result<ReplayPayload> {
    let mut rng = StdRng::seed_from_u64(seed_for(handle, window));
    build_range_replay_with_rng(catalogue, handle, window, config, &mut rng)
}

/// [`build_range_replay`] with a caller-supplied RNG for scan synthesis
pub fn build_range_replay_with_rng<R: Rng>(
    catalogue: &dyn TripCatalogue,
    handle: &str,
    window: &TimeWindow,
    config: &EngineConfig,
    rng: &mut R,
) -> Result<ReplayPayload> {
    config.validate()?;
    window.ensure_within(config.max_range_window())?;

    let trips = catalogue.trips_for_vehicle(handle);

    // Most trajectory points wins; earliest in catalogue order on ties
    let representative = trips.iter().fold(None, |best: Option<&TripRecord>, trip| match best {
        Some(b) if b.trajectory.len() >= trip.trajectory.len() => Some(b),
        _ => Some(trip.as_ref()),
    });

    let Some(trip) = representative.filter(|t| !t.trajectory.is_empty()) else {
        debug!(vehicle = handle, trips = trips.len(), "range replay: no recorded path");
        return Ok(ReplayPayload::empty(QueryMode::ByRange));
    };
    trace!(vehicle = handle, trip = %trip.id, points = trip.trajectory.len(), "representative trip");

    let positions = decimate(&trip.trajectory, config.point_budget);
    let trajectory = stretch_over(&positions, window);

    let reference_stops = catalogue.reference_stops(handle);
    let stops = visit_stops(&reference_stops, &trajectory, config.stop_tolerance_deg);

    let scans = synthesize_scans(
        handle,
        &trajectory,
        config.max_synthetic_scans,
        config.scan_jitter_deg,
        rng,
    );
    let scan_clusters = cluster_scans(&scans, config.cluster_count);

    debug!(
        vehicle = handle,
        trip = %trip.id,
        points = trajectory.len(),
        stops = stops.len(),
        visited = stops.iter().filter(|s| s.visited).count(),
        scans = scans.len(),
        "range replay built"
    );

    Ok(ReplayPayload {
        mode: QueryMode::ByRange,
        trajectory,
        stops,
        scan_clusters,
        scans,
    })
}

/// Spread `positions` evenly over `window`, first at its start and last at
/// its end, then re-derive course and speed from the new spacing.
fn stretch_over(positions: &[TrajectoryPoint], window: &TimeWindow) -> Vec<TrajectoryPoint> {
    let n = positions.len();
    let span_ms = window.duration().num_milliseconds();

    let mut points: Vec<TrajectoryPoint> = positions
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let offset_ms = if n > 1 {
                // i128 keeps the product exact for any window length
                (span_ms as i128 * i as i128 / (n as i128 - 1)) as i64
            } else {
                0
            };
            TrajectoryPoint {
                timestamp: window.start() + TimeDelta::milliseconds(offset_ms),
                ..p.clone()
            }
        })
        .collect();

    for i in 0..n.saturating_sub(1) {
        let (from, to) = (&points[i], &points[i + 1]);
        let course = course_degrees(from.location(), to.location());
        let secs = (to.timestamp - from.timestamp).num_milliseconds() as f64 / 1000.0;
        let speed_kmh = if secs > 0.0 {
            haversine_distance(from.location(), to.location()) / secs * 3.6
        } else {
            0.0
        };
        points[i].course = course;
        points[i].speed_kmh = speed_kmh;
    }

    // The last point keeps heading the way it arrived
    if n > 1 {
        points[n - 1].course = points[n - 2].course;
        points[n - 1].speed_kmh = points[n - 2].speed_kmh;
    }

    points
}
