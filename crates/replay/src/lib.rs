//! # fleet-replay
//!
//! Historical trajectory query and replay engine for fleet vehicles.
//!
//! ## Features
//!
//! - **By-service queries**: pick recorded trips and re-time them into a playback window
//! - **By-range queries**: list the vehicles active during a window
//! - **Replay payloads**: decimated trajectories, stop visits, and clustered scan events
//! - **Stateless**: every call takes its window explicitly; catalogues are immutable snapshots
//!
//! ## Example
//!
//! ```
//! use fleet_replay::prelude::*;
//! use chrono::{TimeDelta, TimeZone, Utc};
//!
//! let start = Utc.with_ymd_and_hms(2024, 1, 1, 14, 0, 0).unwrap();
//! let trip = TripRecord {
//!     id: TripIdentifier::new("svc-1"),
//!     vehicle_id: VehicleIdentifier::new("BUS-007"),
//!     plate: "ABC-123".into(),
//!     driver_code: "D-17".into(),
//!     driver_name: "Ana Ruiz".into(),
//!     route_name: "Centro - Norte".into(),
//!     route_kind: RouteKind::OpenAccess,
//!     client_company: None,
//!     transport_company: "Transportes Norte".into(),
//!     nominal_start: start,
//!     nominal_end: start + TimeDelta::minutes(40),
//!     trajectory: Vec::new(),
//!     stops: Vec::new(),
//!     scans: Vec::new(),
//! };
//! let catalogue = StaticTripCatalogue::from_trips(vec![trip]).unwrap();
//!
//! // Play the trip back between 08:00 and 09:00
//! let from = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
//! let to = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
//! let filter = QueryFilter::by_service(from, to).with_vehicles(["BUS-007"]);
//!
//! let rows = query_services(&catalogue, &filter, &EngineConfig::default()).unwrap();
//! assert_eq!(rows.len(), 1);
//! assert_eq!(rows[0].window_start, from);
//! assert_eq!(rows[0].window_end, from + TimeDelta::minutes(40));
//! ```

pub mod catalogue;
pub mod identifiers;
pub mod models;
pub mod query;
pub mod replay;
pub mod spatial;

#[cfg(test)]
mod test_support;

// Re-exports for convenience
pub mod prelude {
    pub use crate::catalogue::StaticTripCatalogue;
    pub use crate::identifiers::*;
    pub use crate::models::{config::*, output::*, query::*, traits::*, types::*};
    pub use crate::query::{matches, query_services, query_vehicles, Retiming};
    pub use crate::replay::{
        build_range_replay, build_range_replay_with_rng, build_service_replay, cluster_scans,
        decimate, visit_stops,
    };
}

pub use prelude::*;
