//! Read-only access to recorded trips.
//!
//! Queries and replay builds only see the catalogue through this trait, so
//! the records can come from an in-memory snapshot, a database, or a
//! procedurally generated fixture.

use std::collections::HashSet;
use std::sync::Arc;

use crate::identifiers::*;
use crate::models::types::*;

/// Immutable snapshot of recorded trips
pub trait TripCatalogue: Send + Sync {
    /// All trips, in catalogue order
    fn trips(&self) -> &[Arc<TripRecord>];

    fn get_trip(&self, id: &TripIdentifier) -> Option<Arc<TripRecord>> {
        self.trips().iter().find(|t| &t.id == id).cloned()
    }

    /// Trips of the vehicle named by `handle` (vehicle id or plate), in catalogue order
    fn trips_for_vehicle(&self, handle: &str) -> Vec<Arc<TripRecord>> {
        self.trips()
            .iter()
            .filter(|t| t.is_vehicle(handle))
            .cloned()
            .collect()
    }

    /// Stop set of the vehicle's operating area.
    ///
    /// Defaults to the union of the vehicle's trip stops, first occurrence
    /// of each stop id wins.
    fn reference_stops(&self, handle: &str) -> Vec<StopDefinition> {
        union_of_trip_stops(&self.trips_for_vehicle(handle))
    }
}

/// Stops of `trips` in order, keeping the first definition of each stop id
pub fn union_of_trip_stops(trips: &[Arc<TripRecord>]) -> Vec<StopDefinition> {
    let mut seen: HashSet<&StopIdentifier> = HashSet::new();
    trips
        .iter()
        .flat_map(|t| t.stops.iter())
        .filter(|s| seen.insert(&s.id))
        .cloned()
        .collect()
}
