//! Spatial indexing and query utilities.

pub mod index;
pub mod queries;

pub use index::{StopIndex, StopNode};
pub use queries::{course_degrees, haversine_distance, within_degree_box};
