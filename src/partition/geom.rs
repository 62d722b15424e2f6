use crate::curve::CSPolygon;
use crate::kernel::Point2;
use crate::pattern::Contour;

/// Minimum squared distance from `p` to a segment `a`-`b`.
fn squared_distance_point_segment(p: Point2, a: Point2, b: Point2) -> f64 {
    let ab = b - a;
    let denom = ab.dot(&ab);
    let t = if denom > 1e-18 {
        ((p - a).dot(&ab) / denom).clamp(0.0, 1.0)
    } else {
        0.0
    };
    nalgebra::distance_squared(&(a + ab * t), &p)
}

/// Edges of a contour as consecutive point pairs: an open chain for a
/// polyline, a closed ring for a polygon.
fn edges(points: &[Point2], closed: bool) -> Vec<(Point2, Point2)> {
    if points.len() < 2 {
        return Vec::new();
    }
    let mut out: Vec<(Point2, Point2)> = points.windows(2).map(|w| (w[0], w[1])).collect();
    if closed && points.len() > 2 {
        out.push((points[points.len() - 1], points[0]));
    }
    out
}

fn contour_edges(contour: &Contour) -> Vec<(Point2, Point2)> {
    match contour {
        Contour::Polyline(pts) => edges(pts, false),
        Contour::Polygon(pts) => edges(pts, true),
    }
}

/// Distance from `p` to the nearest point of segment `a`-`b`.
#[must_use]
pub fn distance_point_to_segment(p: Point2, a: Point2, b: Point2) -> f64 {
    squared_distance_point_segment(p, a, b).sqrt()
}

/// Minimum distance from `p` to the nearest edge of `contour`, matching
/// `squared_distance(contour, point)` in `partition_algorithm.cpp` (here
/// returning the unsquared distance).
#[must_use]
pub fn distance_to_contour(contour: &Contour, p: Point2) -> f64 {
    let edges = contour_edges(contour);
    if edges.is_empty() {
        return match contour {
            Contour::Polyline(pts) | Contour::Polygon(pts) => {
                pts.first().map_or(f64::INFINITY, |only| nalgebra::distance(only, &p))
            }
        };
    }
    edges
        .iter()
        .map(|&(a, b)| squared_distance_point_segment(p, a, b))
        .fold(f64::INFINITY, f64::min)
        .sqrt()
}

/// Even-odd ray-cast point-in-polygon test against a plain point ring.
fn point_in_ring(pts: &[Point2], p: Point2) -> bool {
    if pts.len() < 3 {
        return false;
    }
    let n = pts.len();
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (pts[i], pts[j]);
        if (pi.y > p.y) != (pj.y > p.y) {
            let x_cross = pi.x + (p.y - pi.y) / (pj.y - pi.y) * (pj.x - pi.x);
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

fn segment_segment_intersect(p0: Point2, p1: Point2, p2: Point2, p3: Point2) -> bool {
    let d1 = p1 - p0;
    let d2 = p3 - p2;
    let denom = d1.x * d2.y - d1.y * d2.x;
    if denom.abs() < 1e-12 {
        return false;
    }
    let diff = p2 - p0;
    let t = (diff.x * d2.y - diff.y * d2.x) / denom;
    let u = (diff.x * d1.y - diff.y * d1.x) / denom;
    (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)
}

/// Whether two contours intersect, either by crossing edges or by one
/// containing the other's first vertex. Matches `do_intersect` in
/// `partition_algorithm.cpp`: an edge-by-edge crossing test, falling back to
/// a containment check (a polyline can never "contain" a point, matching
/// the original's `is_inside(Point, Polyline)` always returning `false`).
#[must_use]
pub fn contours_intersect(a: &Contour, b: &Contour) -> bool {
    let edges_a = contour_edges(a);
    let edges_b = contour_edges(b);
    for &(a0, a1) in &edges_a {
        for &(b0, b1) in &edges_b {
            if segment_segment_intersect(a0, a1, b0, b1) {
                return true;
            }
        }
    }
    let first_of = |c: &Contour| -> Option<Point2> {
        match c {
            Contour::Polyline(pts) | Contour::Polygon(pts) => pts.first().copied(),
        }
    };
    if let (Contour::Polygon(pts_b), Some(p)) = (b, first_of(a)) {
        if point_in_ring(pts_b, p) {
            return true;
        }
    }
    if let (Contour::Polygon(pts_a), Some(p)) = (a, first_of(b)) {
        if point_in_ring(pts_a, p) {
            return true;
        }
    }
    false
}

/// Whether two dilated pattern shapes overlap: sampled-boundary crossing,
/// or one boundary sample found inside the other. Used for the final
/// commit-time overlap check in place of `do_intersect` on exact
/// `PolyPattern::poly()` shapes, which here would require boolean ops the
/// `boolean` module does not (yet) expose for circular-arc boundaries.
#[must_use]
pub fn dilated_polygons_intersect(a: &CSPolygon, b: &CSPolygon) -> bool {
    let sample_a = a.outer.sample(32);
    let sample_b = b.outer.sample(32);
    if sample_a.iter().any(|&p| b.contains_point(p)) {
        return true;
    }
    if sample_b.iter().any(|&p| a.contains_point(p)) {
        return true;
    }
    for w_a in sample_a.windows(2) {
        for w_b in sample_b.windows(2) {
            if segment_segment_intersect(w_a[0], w_a[1], w_b[0], w_b[1]) {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_to_polyline_is_nearest_edge() {
        let contour = Contour::Polyline(vec![Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)]);
        let d = distance_to_contour(&contour, Point2::new(5.0, 3.0));
        assert!((d - 3.0).abs() < 1e-9);
    }

    #[test]
    fn disjoint_segments_do_not_intersect() {
        let a = Contour::Polyline(vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)]);
        let b = Contour::Polyline(vec![Point2::new(0.0, 5.0), Point2::new(1.0, 5.0)]);
        assert!(!contours_intersect(&a, &b));
    }

    #[test]
    fn crossing_segments_intersect() {
        let a = Contour::Polyline(vec![Point2::new(-1.0, 0.0), Point2::new(1.0, 0.0)]);
        let b = Contour::Polyline(vec![Point2::new(0.0, -1.0), Point2::new(0.0, 1.0)]);
        assert!(contours_intersect(&a, &b));
    }

    #[test]
    fn disjoint_disks_do_not_overlap() {
        use crate::curve::circle_to_polygon;
        use crate::kernel::exact::{rational, ExactCircle, ExactPoint};
        let a = circle_to_polygon(&ExactCircle::new(ExactPoint::new(rational(0, 1), rational(0, 1)), rational(1, 1)).unwrap());
        let b = circle_to_polygon(&ExactCircle::new(ExactPoint::new(rational(10, 1), rational(0, 1)), rational(1, 1)).unwrap());
        assert!(!dilated_polygons_intersect(&a, &b));
    }

    #[test]
    fn overlapping_disks_do_overlap() {
        use crate::curve::circle_to_polygon;
        use crate::kernel::exact::{rational, ExactCircle, ExactPoint};
        let a = circle_to_polygon(&ExactCircle::new(ExactPoint::new(rational(0, 1), rational(0, 1)), rational(2, 1)).unwrap());
        let b = circle_to_polygon(&ExactCircle::new(ExactPoint::new(rational(1, 1), rational(0, 1)), rational(2, 1)).unwrap());
        assert!(dilated_polygons_intersect(&a, &b));
    }

    #[test]
    fn point_inside_polygon_counts_as_intersecting() {
        let square = Contour::Polygon(vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(4.0, 4.0),
            Point2::new(0.0, 4.0),
        ]);
        let dot = Contour::Polyline(vec![Point2::new(2.0, 2.0), Point2::new(2.0, 2.0001)]);
        assert!(contours_intersect(&square, &dot));
    }
}
