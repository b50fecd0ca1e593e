//! Query results and replay payloads handed to the rendering layer.

use chrono::{DateTime, Utc};

use crate::identifiers::*;
use crate::models::types::*;

/// One row of a by-service result: a trip's identity and its re-timed window
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ServiceMatch {
    pub id: TripIdentifier,
    pub vehicle_id: VehicleIdentifier,
    pub plate: String,
    pub driver_code: String,
    pub driver_name: String,
    pub route_name: String,
    pub route_kind: RouteKind,
    pub client_company: Option<String>,
    pub transport_company: String,
    #[cfg_attr(feature = "serde", serde(rename = "windowStartUtc"))]
    pub window_start: DateTime<Utc>,
    #[cfg_attr(feature = "serde", serde(rename = "windowEndUtc"))]
    pub window_end: DateTime<Utc>,
}

impl ServiceMatch {
    pub(crate) fn from_trip(
        trip: &TripRecord,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Self {
        Self {
            id: trip.id.clone(),
            vehicle_id: trip.vehicle_id.clone(),
            plate: trip.plate.clone(),
            driver_code: trip.driver_code.clone(),
            driver_name: trip.driver_name.clone(),
            route_name: trip.route_name.clone(),
            route_kind: trip.route_kind,
            client_company: trip.client_company.clone(),
            transport_company: trip.transport_company.clone(),
            window_start,
            window_end,
        }
    }
}

/// One row of a by-range result: a vehicle seen during the caller's window
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct VehicleActivity {
    pub vehicle_id: VehicleIdentifier,
    pub plate: String,
    pub transport_company: String,
    #[cfg_attr(feature = "serde", serde(rename = "windowStartUtc"))]
    pub window_start: DateTime<Utc>,
    #[cfg_attr(feature = "serde", serde(rename = "windowEndUtc"))]
    pub window_end: DateTime<Utc>,
}

/// Render-ready replay data. Carries no reference back to the catalogue.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ReplayPayload {
    pub mode: QueryMode,
    pub trajectory: Vec<TrajectoryPoint>,
    pub stops: Vec<StopVisit>,
    pub scan_clusters: Vec<ScanCluster>,
    pub scans: Vec<ScanEvent>,
}

impl ReplayPayload {
    /// The neutral "no data" payload
    pub fn empty(mode: QueryMode) -> Self {
        Self {
            mode,
            trajectory: Vec::new(),
            stops: Vec::new(),
            scan_clusters: Vec::new(),
            scans: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.trajectory.is_empty()
    }
}
