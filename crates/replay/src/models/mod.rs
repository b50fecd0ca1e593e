//! Trip records, query inputs, replay outputs, and the catalogue trait.

pub mod config;
pub mod output;
pub mod query;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use config::EngineConfig;
pub use output::{ReplayPayload, ServiceMatch, VehicleActivity};
pub use query::{QueryFilter, TimeWindow};
pub use traits::TripCatalogue;
pub use types::{
    QueryMode, ReplayError, Result, RouteKind, ScanCluster, ScanEvent, StopDefinition, StopVisit,
    TrajectoryPoint, TripRecord,
};
