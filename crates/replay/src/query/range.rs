//! By-range queries: which vehicles were active during a window.

use std::collections::HashSet;

use tracing::debug;

use crate::models::*;
use crate::query::filter::matches;

/// One row per distinct vehicle with a trip overlapping the window.
///
/// Each row carries the caller's window verbatim. The first trip seen per
/// vehicle (catalogue order) supplies its plate and company. Rows are
/// sorted by plate, then vehicle id.
pub fn query_vehicles(
    catalogue: &dyn TripCatalogue,
    filter: &QueryFilter,
    config: &EngineConfig,
) -> Result<Vec<VehicleActivity>> {
    filter.expect_mode(QueryMode::ByRange)?;
    config.validate()?;
    let window = filter.window()?;
    window.ensure_within(config.max_range_window())?;

    let mut seen = HashSet::new();
    let mut rows: Vec<VehicleActivity> = catalogue
        .trips()
        .iter()
        .filter(|trip| window.overlaps(trip.nominal_start, trip.nominal_end))
        .filter(|trip| matches(trip, filter))
        .filter(|trip| seen.insert(trip.vehicle_id.clone()))
        .map(|trip| VehicleActivity {
            vehicle_id: trip.vehicle_id.clone(),
            plate: trip.plate.clone(),
            transport_company: trip.transport_company.clone(),
            window_start: window.start(),
            window_end: window.end(),
        })
        .collect();

    rows.sort_by(|a, b| a.plate.cmp(&b.plate).then(a.vehicle_id.cmp(&b.vehicle_id)));

    debug!(
        vehicles = rows.len(),
        window_start = %window.start(),
        window_end = %window.end(),
        "by-range query"
    );

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::StaticTripCatalogue;
    use crate::test_support::*;
    use chrono::TimeDelta;

    fn run(catalogue: &StaticTripCatalogue, filter: &QueryFilter) -> Vec<VehicleActivity> {
        query_vehicles(catalogue, filter, &EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_overlap_selection() {
        // One trip 10:00-11:00
        let catalogue = StaticTripCatalogue::from_trips(vec![TripBuilder::new("svc-1", "BUS-001")
            .window(at(10, 0, 0), at(11, 0, 0))
            .build()])
        .unwrap();

        assert_eq!(run(&catalogue, &QueryFilter::by_range(at(9, 30, 0), at(10, 15, 0))).len(), 1);
        assert_eq!(run(&catalogue, &QueryFilter::by_range(at(10, 45, 0), at(12, 0, 0))).len(), 1);
        assert!(run(&catalogue, &QueryFilter::by_range(at(8, 0, 0), at(9, 0, 0))).is_empty());
    }

    #[test]
    fn test_one_row_per_vehicle_with_caller_window() {
        let catalogue = StaticTripCatalogue::from_trips(vec![
            TripBuilder::new("svc-1", "BUS-002").plate("BBB-222").starting(at(10, 0, 0), 30).build(),
            TripBuilder::new("svc-2", "BUS-001").plate("AAA-111").starting(at(10, 15, 0), 30).build(),
            TripBuilder::new("svc-3", "BUS-002")
                .plate("BBB-222")
                .transport("Segunda Empresa")
                .starting(at(11, 0, 0), 30)
                .build(),
        ])
        .unwrap();
        let filter = QueryFilter::by_range(at(9, 0, 0), at(12, 0, 0));

        let rows = run(&catalogue, &filter);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].plate, "AAA-111");
        assert_eq!(rows[1].plate, "BBB-222");
        // First-seen trip wins for BUS-002
        assert_eq!(rows[1].transport_company, "Transportes Norte");
        for row in &rows {
            assert_eq!(row.window_start, at(9, 0, 0));
            assert_eq!(row.window_end, at(12, 0, 0));
        }
    }

    #[test]
    fn test_filters_apply_after_overlap() {
        let catalogue = StaticTripCatalogue::from_trips(vec![
            TripBuilder::new("svc-1", "BUS-001").transport("Norte").build(),
            TripBuilder::new("svc-2", "BUS-002").transport("Sur").build(),
        ])
        .unwrap();
        let filter = QueryFilter::by_range(at(9, 0, 0), at(12, 0, 0)).with_transport_companies(["Sur"]);

        let rows = run(&catalogue, &filter);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].vehicle_id.as_str(), "BUS-002");
    }

    #[test]
    fn test_window_limits() {
        let catalogue = StaticTripCatalogue::new();
        let config = EngineConfig::default();

        let too_wide = QueryFilter::by_range(at(0, 0, 0), at(0, 0, 0) + TimeDelta::hours(25));
        assert!(matches!(
            query_vehicles(&catalogue, &too_wide, &config),
            Err(ReplayError::WindowTooWide { .. })
        ));

        let inverted = QueryFilter::by_range(at(9, 0, 0), at(9, 0, 0));
        assert!(matches!(
            query_vehicles(&catalogue, &inverted, &config),
            Err(ReplayError::InvalidWindow { .. })
        ));

        let service = QueryFilter::by_service(at(8, 0, 0), at(9, 0, 0));
        assert!(matches!(
            query_vehicles(&catalogue, &service, &config),
            Err(ReplayError::ModeMismatch { .. })
        ));
    }

    #[test]
    fn test_unknown_vehicle_is_empty() {
        let catalogue = StaticTripCatalogue::from_trips(vec![TripBuilder::new("svc-1", "BUS-001").build()])
            .unwrap();
        let filter = QueryFilter::by_range(at(9, 0, 0), at(12, 0, 0)).with_vehicles(["BUS-404"]);
        assert!(run(&catalogue, &filter).is_empty());
    }
}
