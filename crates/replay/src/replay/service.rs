//! Replay of one recorded trip, re-timed into a playback window.

use tracing::debug;

use crate::identifiers::TripIdentifier;
use crate::models::*;
use crate::query::retime::Retiming;
use crate::replay::cluster::cluster_scans;
use crate::replay::decimate::decimate;
use crate::replay::visits::visit_stops;

/// Build the by-service payload for trip `id` played back inside `window`.
///
/// Trajectory, scans and stop arrivals all move by the same offset.
/// Stop visits are matched against the full shifted trajectory before it
/// is decimated. An unknown trip, or one without trajectory points, yields
/// an empty payload. A trip longer than the window still starts at the
/// window start; its tail runs past the window end unclipped.
pub fn build_service_replay(
    catalogue: &dyn TripCatalogue,
    id: &TripIdentifier,
    window: &TimeWindow,
    config: &EngineConfig,
) -> Result<ReplayPayload> {
    config.validate()?;

    let Some(trip) = catalogue.get_trip(id) else {
        debug!(trip = %id, "service replay: unknown trip");
        return Ok(ReplayPayload::empty(QueryMode::ByService));
    };

    if trip.trajectory.is_empty() {
        debug!(trip = %id, "service replay: trip has no trajectory");
        return Ok(ReplayPayload::empty(QueryMode::ByService));
    }

    let retiming = Retiming::for_trip(&trip, window);

    let shifted: Vec<TrajectoryPoint> = trip
        .trajectory
        .iter()
        .map(|p| p.shifted(retiming.offset))
        .collect();
    let scans: Vec<ScanEvent> = trip
        .scans
        .iter()
        .map(|s| s.shifted(retiming.offset))
        .collect();

    let stops = visit_stops(&trip.stops, &shifted, config.stop_tolerance_deg);
    let trajectory = decimate(&shifted, config.point_budget);
    let scan_clusters = cluster_scans(&scans, config.cluster_count);

    debug!(
        trip = %id,
        points = trajectory.len(),
        recorded_points = shifted.len(),
        stops = stops.len(),
        clusters = scan_clusters.len(),
        "service replay built"
    );

    Ok(ReplayPayload {
        mode: QueryMode::ByService,
        trajectory,
        stops,
        scan_clusters,
        scans,
    })
}
