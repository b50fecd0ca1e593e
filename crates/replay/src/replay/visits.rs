//! Stop visitation against a replayed trajectory.

use crate::models::{StopDefinition, StopVisit, TrajectoryPoint};
use crate::spatial::index::StopIndex;

/// Annotate each stop with the first trajectory point that came within
/// `tolerance_deg` of it on both axes.
///
/// Output follows the order of `stops`. Points are scanned in trajectory
/// order, so `arrival` is the earliest matching timestamp.
pub fn visit_stops(
    stops: &[StopDefinition],
    trajectory: &[TrajectoryPoint],
    tolerance_deg: f64,
) -> Vec<StopVisit> {
    let mut visits: Vec<StopVisit> = stops.iter().cloned().map(StopVisit::unvisited).collect();
    if stops.is_empty() || trajectory.is_empty() {
        return visits;
    }

    let index = StopIndex::new(stops.iter().cloned());
    let mut remaining = visits.len();

    for point in trajectory {
        for node in index.within_tolerance(point.location(), tolerance_deg) {
            let visit = &mut visits[node.order];
            if !visit.visited {
                visit.visited = true;
                visit.arrival = Some(point.timestamp);
                remaining -= 1;
            }
        }
        if remaining == 0 {
            break;
        }
    }

    visits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    #[test]
    fn test_first_matching_point_sets_arrival() {
        let trajectory = vec![
            point_at(19.4000, -99.1300, at(8, 0, 0)),
            point_at(19.4050, -99.1300, at(8, 5, 0)),
            point_at(19.4052, -99.1301, at(8, 6, 0)),
            point_at(19.4100, -99.1300, at(8, 10, 0)),
        ];
        let stops = vec![
            stop("mid", 19.4055, -99.1300),
            stop("start", 19.4000, -99.1300),
            stop("far", 19.5000, -99.1300),
        ];

        let visits = visit_stops(&stops, &trajectory, 0.001);
        assert_eq!(visits.len(), 3);

        assert_eq!(visits[0].stop.id.as_str(), "mid");
        assert!(visits[0].visited);
        assert_eq!(visits[0].arrival, Some(at(8, 5, 0)));

        assert!(visits[1].visited);
        assert_eq!(visits[1].arrival, Some(at(8, 0, 0)));

        assert!(!visits[2].visited);
        assert_eq!(visits[2].arrival, None);
    }

    #[test]
    fn test_empty_trajectory_leaves_stops_unvisited() {
        let stops = vec![stop("a", 19.0, -99.0)];
        let visits = visit_stops(&stops, &[], 0.001);
        assert_eq!(visits.len(), 1);
        assert!(!visits[0].visited);
    }

    #[test]
    fn test_tolerance_applies_per_axis() {
        let trajectory = vec![point_at(19.0, -99.0, at(8, 0, 0))];
        // 0.0008 on both axes is a ~0.0011 diagonal but still inside the box
        let stops = vec![stop("diag", 19.0008, -99.0008), stop("lng", 19.0, -99.0012)];

        let visits = visit_stops(&stops, &trajectory, 0.001);
        assert!(visits[0].visited);
        assert!(!visits[1].visited);
    }
}
