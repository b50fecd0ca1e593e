//! Catalogue queries: filter evaluation, by-service and by-range lookups.

pub mod filter;
pub mod range;
pub mod retime;
pub mod service;

pub use filter::matches;
pub use range::query_vehicles;
pub use retime::Retiming;
pub use service::query_services;
