//! Equality and membership predicates over trip records.

use std::collections::HashSet;
use std::hash::Hash;

use crate::models::{QueryFilter, QueryMode, TripRecord};

/// Does `trip` pass every predicate set on `filter`?
///
/// Window overlap is not checked here; each query mode decides whether the
/// window constrains selection.
pub fn matches(trip: &TripRecord, filter: &QueryFilter) -> bool {
    if filter.mode == QueryMode::ByService {
        if let Some(id) = &filter.exact_service_id {
            if &trip.id != id {
                return false;
            }
        }
    }

    if let Some(handles) = active(&filter.vehicle_ids) {
        if !handles.contains(trip.vehicle_id.as_str()) && !handles.contains(&trip.plate) {
            return false;
        }
    }

    if let Some(companies) = active(&filter.transport_companies) {
        if !companies.contains(&trip.transport_company) {
            return false;
        }
    }

    if let Some(companies) = active(&filter.client_companies) {
        match &trip.client_company {
            Some(client) if companies.contains(client) => {}
            _ => return false,
        }
    }

    if let Some(kinds) = active(&filter.route_kinds) {
        if !kinds.contains(&trip.route_kind) {
            return false;
        }
    }

    true
}

/// An empty set constrains nothing, same as an absent one
fn active<T: Eq + Hash>(set: &Option<HashSet<T>>) -> Option<&HashSet<T>> {
    set.as_ref().filter(|s| !s.is_empty())
}
