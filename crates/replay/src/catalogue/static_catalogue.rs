//! In-memory trip catalogue snapshot.
//!
//! Stores every trip behind an `Arc` with lookup maps and a stop R-tree,
//! so snapshots are cheap to clone and share between request handlers.

use std::collections::HashMap;
use std::sync::Arc;

use geo::Point;
use tracing::debug;

use crate::identifiers::*;
use crate::models::{traits::*, types::*};
use crate::spatial::index::StopIndex;

/// Immutable, validated set of trips with lookup indices
///
/// This type is cheap to clone since all data is stored in `Arc`s.
#[derive(Clone, Debug)]
pub struct StaticTripCatalogue {
    // Core data
    trips: Vec<Arc<TripRecord>>,
    reference_stops: Option<Arc<Vec<StopDefinition>>>,

    // Lookup maps
    trip_map: HashMap<TripIdentifier, Arc<TripRecord>>,
    vehicle_map: HashMap<String, Vec<usize>>,

    // Spatial index over every distinct stop
    stop_index: Arc<StopIndex>,
}

impl StaticTripCatalogue {
    /// Create a new empty catalogue
    pub fn new() -> Self {
        Self {
            trips: Vec::new(),
            reference_stops: None,
            trip_map: HashMap::new(),
            vehicle_map: HashMap::new(),
            stop_index: Arc::new(StopIndex::new(Vec::new())),
        }
    }

    /// Build a catalogue from ingested trips, keeping their order.
    ///
    /// Fails with `InvalidData` on the first trip that breaks a record
    /// invariant or reuses an earlier trip id.
    pub fn from_trips(trips: Vec<TripRecord>) -> Result<Self> {
        for trip in &trips {
            trip.validate()?;
        }

        let trips: Vec<Arc<TripRecord>> = trips.into_iter().map(Arc::new).collect();

        let mut trip_map = HashMap::with_capacity(trips.len());
        for trip in &trips {
            if trip_map.insert(trip.id.clone(), trip.clone()).is_some() {
                return Err(ReplayError::InvalidData(format!(
                    "duplicate trip id {}",
                    trip.id
                )));
            }
        }

        // Vehicles are addressable by id and by plate
        let mut vehicle_map: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, trip) in trips.iter().enumerate() {
            vehicle_map
                .entry(trip.vehicle_id.as_str().to_string())
                .or_default()
                .push(i);
            if trip.plate != trip.vehicle_id.as_str() {
                vehicle_map.entry(trip.plate.clone()).or_default().push(i);
            }
        }
        for indices in vehicle_map.values_mut() {
            // A plate equal to another vehicle's id shares a key with it
            indices.sort_unstable();
            indices.dedup();
        }

        let stop_index = StopIndex::new(union_of_trip_stops(&trips));

        debug!(
            trips = trips.len(),
            vehicles = vehicle_map.len(),
            stops = stop_index.len(),
            "built trip catalogue"
        );

        Ok(Self {
            trips,
            reference_stops: None,
            trip_map,
            vehicle_map,
            stop_index: Arc::new(stop_index),
        })
    }

    /// Use a fixed stop set for every vehicle's operating area instead of
    /// the per-vehicle union of trip stops
    pub fn with_reference_stops(mut self, stops: Vec<StopDefinition>) -> Self {
        self.reference_stops = Some(Arc::new(stops));
        self
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// Distinct stops (by id) within `tolerance_deg` of a position on both axes
    pub fn stops_near(&self, lat: f64, lng: f64, tolerance_deg: f64) -> Vec<StopDefinition> {
        let mut nodes: Vec<_> = self
            .stop_index
            .within_tolerance(Point::new(lng, lat), tolerance_deg)
            .collect();
        nodes.sort_by_key(|node| node.order);
        nodes.into_iter().map(|node| node.stop.clone()).collect()
    }
}

impl Default for StaticTripCatalogue {
    fn default() -> Self {
        Self::new()
    }
}

impl TripCatalogue for StaticTripCatalogue {
    fn trips(&self) -> &[Arc<TripRecord>] {
        &self.trips
    }

    fn get_trip(&self, id: &TripIdentifier) -> Option<Arc<TripRecord>> {
        self.trip_map.get(id).cloned()
    }

    fn trips_for_vehicle(&self, handle: &str) -> Vec<Arc<TripRecord>> {
        self.vehicle_map
            .get(handle)
            .map(|indices| indices.iter().map(|&i| self.trips[i].clone()).collect())
            .unwrap_or_default()
    }

    fn reference_stops(&self, handle: &str) -> Vec<StopDefinition> {
        match &self.reference_stops {
            Some(stops) => stops.as_ref().clone(),
            None => union_of_trip_stops(&self.trips_for_vehicle(handle)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    #[test]
    fn test_empty_catalogue() {
        let catalogue = StaticTripCatalogue::new();
        assert!(catalogue.is_empty());
        assert!(catalogue.trips_for_vehicle("BUS-001").is_empty());
        assert!(catalogue.reference_stops("BUS-001").is_empty());
    }

    #[test]
    fn test_catalogue_lookups() {
        let catalogue = StaticTripCatalogue::from_trips(vec![
            TripBuilder::new("svc-1", "BUS-001").plate("AAA-111").build(),
            TripBuilder::new("svc-2", "BUS-002").build(),
            TripBuilder::new("svc-3", "BUS-001").plate("AAA-111").build(),
        ])
        .unwrap();

        assert_eq!(catalogue.len(), 3);
        assert!(catalogue.get_trip(&TripIdentifier::new("svc-2")).is_some());
        assert!(catalogue.get_trip(&TripIdentifier::new("svc-9")).is_none());

        let by_id = catalogue.trips_for_vehicle("BUS-001");
        let ids: Vec<&str> = by_id.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["svc-1", "svc-3"]);

        let by_plate = catalogue.trips_for_vehicle("AAA-111");
        let ids: Vec<&str> = by_plate.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["svc-1", "svc-3"]);
    }

    #[test]
    fn test_rejects_invalid_trips() {
        let mut broken = TripBuilder::new("svc-1", "BUS-001").build();
        broken.nominal_end = broken.nominal_start - chrono::TimeDelta::minutes(5);
        assert!(matches!(
            StaticTripCatalogue::from_trips(vec![broken]),
            Err(ReplayError::InvalidData(_))
        ));

        let dup = vec![
            TripBuilder::new("svc-1", "BUS-001").build(),
            TripBuilder::new("svc-1", "BUS-002").build(),
        ];
        assert!(matches!(
            StaticTripCatalogue::from_trips(dup),
            Err(ReplayError::InvalidData(_))
        ));
    }

    #[test]
    fn test_reference_stops_union() {
        let catalogue = StaticTripCatalogue::from_trips(vec![
            TripBuilder::new("svc-1", "BUS-001")
                .stops(vec![stop("s1", 19.40, -99.13), stop("s2", 19.41, -99.13)])
                .build(),
            TripBuilder::new("svc-2", "BUS-001")
                .stops(vec![stop("s2", 19.41, -99.13), stop("s3", 19.42, -99.13)])
                .build(),
            TripBuilder::new("svc-3", "BUS-002")
                .stops(vec![stop("s9", 19.50, -99.13)])
                .build(),
        ])
        .unwrap();

        let ids: Vec<String> = catalogue
            .reference_stops("BUS-001")
            .into_iter()
            .map(|s| s.id.to_string())
            .collect();
        assert_eq!(ids, ["s1", "s2", "s3"]);

        let fixed = catalogue.with_reference_stops(vec![stop("depot", 19.0, -99.0)]);
        assert_eq!(fixed.reference_stops("BUS-002").len(), 1);
    }

    #[test]
    fn test_stops_near() {
        let catalogue = StaticTripCatalogue::from_trips(vec![TripBuilder::new("svc-1", "BUS-001")
            .stops(vec![stop("s1", 19.4000, -99.1300), stop("s2", 19.4100, -99.1300)])
            .build()])
        .unwrap();

        let near = catalogue.stops_near(19.4004, -99.1302, 0.001);
        assert_eq!(near.len(), 1);
        assert_eq!(near[0].id.as_str(), "s1");
    }
}
