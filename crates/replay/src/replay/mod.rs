//! Replay payload builders and the transforms they share.

pub mod cluster;
pub mod decimate;
pub mod range;
pub mod service;
pub mod synth;
pub mod visits;

pub use cluster::cluster_scans;
pub use decimate::decimate;
pub use range::{build_range_replay, build_range_replay_with_rng};
pub use service::build_service_replay;
pub use visits::visit_stops;
