//! By-service queries: pick trips, then re-time them into the window.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::models::*;
use crate::query::filter::matches;
use crate::query::retime::Retiming;

/// Resolve a by-service filter into at most `config.page_cap` re-timed trips.
///
/// Playback time is synthetic, so trips are selected regardless of when
/// they originally ran. Rows are ordered by vehicle id, then nominal start.
pub fn query_services(
    catalogue: &dyn TripCatalogue,
    filter: &QueryFilter,
    config: &EngineConfig,
) -> Result<Vec<ServiceMatch>> {
    filter.expect_mode(QueryMode::ByService)?;
    let window = filter.window()?;

    let mut selected: Vec<&Arc<TripRecord>> = catalogue
        .trips()
        .iter()
        .filter(|trip| matches(trip, filter))
        .collect();

    // Stable sort keeps catalogue order for identical keys
    selected.sort_by(|a, b| {
        a.vehicle_id
            .cmp(&b.vehicle_id)
            .then(a.nominal_start.cmp(&b.nominal_start))
    });
    selected.truncate(config.page_cap);

    let rows: Vec<ServiceMatch> = selected
        .into_iter()
        .map(|trip| {
            let retiming = Retiming::for_trip(trip, &window);
            trace!(trip = %trip.id, offset = %retiming.offset, "re-timed trip");
            ServiceMatch::from_trip(trip, retiming.start, retiming.end)
        })
        .collect();

    debug!(
        rows = rows.len(),
        window_start = %window.start(),
        window_end = %window.end(),
        "by-service query"
    );

    Ok(rows)
}
