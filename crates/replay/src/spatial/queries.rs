//! Spatial helpers for distance, bearing and tolerance matching.
//!
//! Uses the Haversine formula for distances on Earth's surface.

use geo::{HaversineBearing, HaversineDistance, Point};

/// Calculate Haversine distance between two points in meters
pub fn haversine_distance(p1: Point, p2: Point) -> f64 {
    p1.haversine_distance(&p2)
}

/// Initial bearing from `from` to `to`, normalized to [0, 360)
pub fn course_degrees(from: Point, to: Point) -> f64 {
    let bearing = from.haversine_bearing(to);
    let normalized = bearing.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// True when `a` and `b` are within `tolerance_deg` of each other on both axes.
///
/// This is a degree box, not a distance: its physical size shrinks in
/// longitude away from the equator.
pub fn within_degree_box(a: Point, b: Point, tolerance_deg: f64) -> bool {
    (a.x() - b.x()).abs() <= tolerance_deg && (a.y() - b.y()).abs() <= tolerance_deg
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_haversine_distance() {
        // Mexico City to Guadalajara is roughly 460 km
        let cdmx = Point::new(-99.1332, 19.4326);
        let gdl = Point::new(-103.3496, 20.6597);

        let dist = haversine_distance(cdmx, gdl);
        assert!((dist - 460_000.0).abs() < 20_000.0); // Within 20km
    }

    #[test]
    fn test_course_cardinal_directions() {
        let origin = Point::new(-99.0, 19.0);

        assert_abs_diff_eq!(course_degrees(origin, Point::new(-99.0, 19.1)), 0.0, epsilon = 0.01);
        assert_abs_diff_eq!(course_degrees(origin, Point::new(-98.9, 19.0)), 90.0, epsilon = 0.1);
        assert_abs_diff_eq!(course_degrees(origin, Point::new(-99.0, 18.9)), 180.0, epsilon = 0.01);
        assert_abs_diff_eq!(course_degrees(origin, Point::new(-99.1, 19.0)), 270.0, epsilon = 0.1);
    }

    #[test]
    fn test_degree_box_is_inclusive() {
        let a = Point::new(-99.0, 19.0);
        assert!(within_degree_box(a, Point::new(-99.0005, 19.0005), 0.001));
        assert!(!within_degree_box(a, Point::new(-99.0, 19.0015), 0.001));
        assert!(!within_degree_box(a, Point::new(-99.0015, 19.0), 0.001));
    }
}
