//! Splits a flattened polyline at its crossings with a polygon's boundary
//! and classifies each resulting edge against the polygon.

use crate::curve::polygon::CSPolygon;
use crate::kernel::Point2;

/// How one polyline edge (after splitting at boundary crossings) relates
/// to the polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    OnBoundary,
    Inside,
    Outside,
}

/// Splits the polyline described by consecutive `samples` at every point
/// where it crosses `gon`'s boundary (outer ring and holes), replacing
/// `samples` in place with the refined vertex list, and returns one
/// classification per edge of the refined list.
///
/// Mirrors the original's per-edge `onGonEdge` / `liesInGon` checks, using
/// point-against-polygon tests on each edge's midpoint instead of
/// originating-curve provenance, since this crate's arrangement is built
/// from flattened samples rather than retained symbolic curves (see the
/// module docs of [`crate::boolean`]).
pub fn classify_edges(gon: &CSPolygon, samples: &mut Vec<Point2>, tolerance: f64) -> Vec<Classification> {
    refine(gon, samples, tolerance);

    let mut out = Vec::with_capacity(samples.len().saturating_sub(1));
    for w in samples.windows(2) {
        let mid = nalgebra::center(&w[0], &w[1]);
        out.push(classify_point(gon, mid, tolerance));
    }
    out
}

fn classify_point(gon: &CSPolygon, p: Point2, tolerance: f64) -> Classification {
    if gon.lies_on(p, tolerance) {
        Classification::OnBoundary
    } else if gon.contains_point(p) {
        Classification::Inside
    } else {
        Classification::Outside
    }
}

/// Inserts a vertex at every crossing of the polyline (given as consecutive
/// `samples`) with any boundary ring of `gon`, so that no refined edge
/// straddles the boundary.
fn refine(gon: &CSPolygon, samples: &mut Vec<Point2>, tolerance: f64) {
    let mut boundary_segments: Vec<(Point2, Point2)> = Vec::new();
    for ring in std::iter::once(&gon.outer).chain(gon.holes.iter()) {
        let pts = ring.sample(16);
        let n = pts.len();
        for i in 0..n {
            boundary_segments.push((pts[i], pts[(i + 1) % n]));
        }
    }

    let mut refined = Vec::with_capacity(samples.len());
    refined.push(samples[0]);
    for w in samples.windows(2) {
        let (a, b) = (w[0], w[1]);
        let mut cuts: Vec<f64> = Vec::new();
        for &(c, d) in &boundary_segments {
            if let Some(t) = segment_intersection_param(a, b, c, d) {
                if t > tolerance && t < 1.0 - tolerance {
                    cuts.push(t);
                }
            }
        }
        cuts.sort_by(|x, y| x.partial_cmp(y).unwrap_or(std::cmp::Ordering::Equal));
        for t in cuts {
            refined.push(Point2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t));
        }
        refined.push(b);
    }
    *samples = refined;
}

/// Returns `t` such that `a + t*(b-a)` equals the intersection of segment
/// `ab` with segment `cd`, if one exists strictly within both segments.
fn segment_intersection_param(a: Point2, b: Point2, c: Point2, d: Point2) -> Option<f64> {
    let r = b - a;
    let s = d - c;
    let denom = r.x * s.y - r.y * s.x;
    if denom.abs() < 1e-12 {
        return None;
    }
    let diff = c - a;
    let t = (diff.x * s.y - diff.y * s.x) / denom;
    let u = (diff.x * r.y - diff.y * r.x) / denom;
    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(t)
    } else {
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::curve::polyline::CSPolyline;
    use crate::curve::xmonotone::XMonotoneCurve;
    use crate::kernel::exact::ExactPoint;
    use crate::kernel::oneroot::OneRootPoint;

    fn square() -> CSPolygon {
        let p = |x: f64, y: f64| OneRootPoint::from_exact(&ExactPoint::from_f64(x, y));
        let curves = vec![
            XMonotoneCurve::segment(p(0.0, 0.0), p(2.0, 0.0)),
            XMonotoneCurve::segment(p(2.0, 0.0), p(2.0, 2.0)),
            XMonotoneCurve::segment(p(2.0, 2.0), p(0.0, 2.0)),
            XMonotoneCurve::segment(p(0.0, 2.0), p(0.0, 0.0)),
        ];
        CSPolygon::new(CSPolyline::new(curves))
    }

    #[test]
    fn crossing_edge_splits_into_outside_then_inside() {
        let mut samples = vec![Point2::new(-1.0, 1.0), Point2::new(3.0, 1.0)];
        let classified = classify_edges(&square(), &mut samples, 1e-6);
        assert!(samples.len() >= 3);
        assert_eq!(classified.first(), Some(&Classification::Outside));
        assert_eq!(classified.last(), Some(&Classification::Outside));
        assert!(classified.iter().any(|c| *c == Classification::Inside));
    }

    #[test]
    fn fully_interior_edge_classifies_inside() {
        let mut samples = vec![Point2::new(0.5, 0.5), Point2::new(1.5, 1.5)];
        let classified = classify_edges(&square(), &mut samples, 1e-6);
        assert_eq!(classified, vec![Classification::Inside]);
    }
}
