use crate::curve::polygon::CSPolygon;
use crate::error::Result;
use crate::kernel::predicates::orientation_approx;
use crate::kernel::{Orientation, Point2};

use super::polygon_offset::offset_polygon;

/// Computes the convex hull of a point set (Andrew's monotone chain),
/// returning points in counter-clockwise order.
#[must_use]
pub fn convex_hull(points: &[Point2]) -> Vec<Point2> {
    let mut pts = points.to_vec();
    pts.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal).then(
        a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal),
    ));
    pts.dedup_by(|a, b| nalgebra::distance(a, b) < 1e-12);
    if pts.len() < 3 {
        return pts;
    }

    let build_half = |pts: &[Point2]| {
        let mut hull: Vec<Point2> = Vec::new();
        for &p in pts {
            while hull.len() >= 2
                && orientation_approx(hull[hull.len() - 2], hull[hull.len() - 1], p)
                    != Orientation::CounterClockwise
            {
                hull.pop();
            }
            hull.push(p);
        }
        hull
    };

    let mut lower = build_half(&pts);
    let mut upper = build_half(&pts.iter().rev().copied().collect::<Vec<_>>());
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// Whether the points are (approximately) collinear, i.e. their convex hull
/// degenerates to a segment.
#[must_use]
pub fn is_collinear(points: &[Point2]) -> bool {
    if points.len() < 3 {
        return true;
    }
    points
        .windows(3)
        .all(|w| orientation_approx(w[0], w[1], w[2]) == Orientation::Collinear)
}

/// Dilates the convex hull of `points` by `radius`, matching
/// `approximateConvexHull` in `helpers/approximate_convex_hull.cpp`: build
/// the polygon hull, then offset it outward, so each hull vertex gets a
/// rounding arc and each hull edge gets a parallel rail.
///
/// # Errors
///
/// Returns an error if fewer than 3 points remain after deduplication (use
/// [`super::segment_offset::offset_segment`] for collinear point sets).
pub fn approximate_convex_hull(points: &[Point2], radius: f64) -> Result<CSPolygon> {
    let hull = convex_hull(points);
    offset_polygon(&hull, radius)
}
