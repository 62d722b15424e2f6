use crate::curve::polygon::CSPolygon;
use crate::kernel::Point2;

use super::polygon_offset::offset_polyline_as_polygon;

/// Dilates an open polyline (a sequence of points, at least 2) by `radius`,
/// producing the Minkowski sum with a disk: two parallel offset rails
/// joined by semicircular caps at each endpoint.
#[must_use]
pub fn offset_segment(points: &[Point2], radius: f64) -> CSPolygon {
    offset_polyline_as_polygon(points, radius)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn single_point_disk_contains_center() {
        let poly = offset_segment(&[Point2::new(0.0, 0.0), Point2::new(0.0, 0.0000001)], 1.0);
        assert!(poly.contains_point(Point2::new(0.0, 0.0)));
    }

    #[test]
    fn offset_segment_width_matches_radius() {
        let poly = offset_segment(&[Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)], 2.0);
        assert!(poly.contains_point(Point2::new(5.0, 1.9)));
        assert!(!poly.contains_point(Point2::new(5.0, 2.5)));
    }
}
