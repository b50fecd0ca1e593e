//! R-tree index over stop definitions.
//!
//! ## Two-Stage Filtering
//!
//! Stop matching uses a two-stage filter:
//! 1. **R-tree filter**: a distance query whose circle encloses the tolerance box
//! 2. **Exact filter**: the per-axis degree comparison in [`within_degree_box`]
//!
//! The padding keeps floating-point rounding of the circle radius from
//! dropping stops that sit exactly on a corner of the tolerance box.

use geo::Point;
use rstar::{PointDistance, RTree, RTreeObject, AABB};

use crate::models::types::StopDefinition;
use crate::spatial::queries::within_degree_box;

const QUERY_PADDING_DEG: f64 = 1e-9;

// ============================================================================
// Stop Spatial Node
// ============================================================================

#[derive(Clone, Debug)]
pub struct StopNode {
    /// Position of the stop in the slice the index was built from
    pub order: usize,
    pub stop: StopDefinition,
    point: [f64; 2],
}

impl StopNode {
    pub fn new(order: usize, stop: StopDefinition) -> Self {
        let point = [stop.lng, stop.lat];
        Self { order, stop, point }
    }

    pub fn location(&self) -> Point {
        Point::new(self.point[0], self.point[1])
    }
}

impl RTreeObject for StopNode {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for StopNode {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ============================================================================
// Stop Index
// ============================================================================

/// Bulk-loaded R-tree of stops, queried with a per-axis degree tolerance
#[derive(Clone, Debug)]
pub struct StopIndex {
    tree: RTree<StopNode>,
}

impl StopIndex {
    pub fn new(stops: impl IntoIterator<Item = StopDefinition>) -> Self {
        let nodes = stops
            .into_iter()
            .enumerate()
            .map(|(order, stop)| StopNode::new(order, stop))
            .collect();
        Self {
            tree: RTree::bulk_load(nodes),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Stops whose coordinates are within `tolerance_deg` of `point` on both axes
    pub fn within_tolerance(
        &self,
        point: Point,
        tolerance_deg: f64,
    ) -> impl Iterator<Item = &StopNode> + '_ {
        let pad = tolerance_deg.max(0.0) + QUERY_PADDING_DEG;
        // Circle through the corners of the padded box
        let max_squared_radius = 2.0 * pad * pad;

        self.tree
            .locate_within_distance([point.x(), point.y()], max_squared_radius)
            .filter(move |node| within_degree_box(point, node.location(), tolerance_deg))
    }
}
