//! Trip catalogue implementations.

pub mod static_catalogue;

pub use static_catalogue::StaticTripCatalogue;
