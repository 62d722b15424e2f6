use spade::{DelaunayTriangulation, Point2 as SpadePoint, Triangulation};

use crate::offset::convex_hull::{convex_hull, is_collinear};
use crate::pattern::bank::Bank;
use crate::pattern::cat_point::CatPoint;
use crate::pattern::Contour;

/// An unordered set of points grouped by proximity, drawn as the dilated
/// convex hull of its members.
///
/// Mirrors `Island` in `patterns/island.h`. When the member points are
/// (near-)collinear, the convex hull degenerates to a segment and the
/// pattern is equivalent to a [`Bank`]; callers should check
/// [`Island::degenerates_to_bank`] before using this pattern.
#[derive(Debug, Clone)]
pub struct Island {
    pub points: Vec<CatPoint>,
}

impl Island {
    #[must_use]
    pub fn new(points: Vec<CatPoint>) -> Self {
        Self { points }
    }

    #[must_use]
    pub fn category(&self) -> Option<u32> {
        self.points.first().map(|p| p.category)
    }

    #[must_use]
    pub fn degenerates_to_bank(&self) -> bool {
        let approx: Vec<_> = self.points.iter().map(CatPoint::approx).collect();
        is_collinear(&approx)
    }

    /// Converts this island into the degenerate bank it represents when
    /// its points are collinear. Callers should check
    /// [`Island::degenerates_to_bank`] first.
    #[must_use]
    pub fn as_bank(&self) -> Bank {
        Bank::new(self.points.clone())
    }

    #[must_use]
    pub fn contour(&self) -> Contour {
        let approx: Vec<_> = self.points.iter().map(CatPoint::approx).collect();
        Contour::Polygon(convex_hull(&approx))
    }

    /// The cover radius of this island's point set: the smallest radius `r`
    /// such that every point of the plane within the convex hull is within
    /// distance `r` of some member point.
    ///
    /// Grounded on `coverRadiusOfPoints` in `patterns/island.cpp`: build the
    /// Delaunay triangulation (here, via `spade`), dualize each Delaunay
    /// edge into its Voronoi edge (a segment between two circumcenters, or
    /// a ray from one circumcenter for a convex-hull boundary edge), clip
    /// every Voronoi vertex and edge to the convex hull, and return the
    /// largest distance from any point of the clipped diagram to its site.
    #[must_use]
    pub fn cover_radius(&self) -> f64 {
        let approx: Vec<_> = self.points.iter().map(CatPoint::approx).collect();
        cover_radius_of_points(&approx)
    }
}

#[must_use]
pub fn cover_radius_of_points(points: &[crate::kernel::Point2]) -> f64 {
    if points.len() < 3 {
        return points
            .windows(2)
            .map(|w| nalgebra::distance(&w[0], &w[1]) / 2.0)
            .fold(0.0_f64, f64::max);
    }
    let hull = convex_hull(points);
    let Ok(triangulation) = DelaunayTriangulation::<SpadePoint<f64>>::bulk_load(
        points.iter().map(|p| SpadePoint::new(p.x, p.y)).collect(),
    ) else {
        return 0.0;
    };

    // Voronoi edges are dual to Delaunay edges: an edge shared by two
    // triangles duals to the segment between their circumcenters; an edge
    // on the Delaunay boundary (the point set's convex hull) duals to a
    // ray from its one triangle's circumcenter, heading away from the
    // triangle. Every point along such an edge is equidistant from the
    // edge's two Delaunay sites, and that distance only grows moving away
    // from the segment/ray's own nearest-point-to-the-sites, so the
    // farthest point of the *clipped-to-hull* edge (not just its raw
    // circumcenter endpoint) is where the true cover radius is attained
    // when it falls on a hull-boundary crossing rather than an interior
    // Voronoi vertex.
    let mut edges: std::collections::HashMap<EdgeKey, Vec<VoronoiContribution>> = std::collections::HashMap::new();
    let mut max_radius = 0.0_f64;
    for face in triangulation.inner_faces() {
        let verts = face.vertices();
        let a = verts[0].position();
        let b = verts[1].position();
        let c = verts[2].position();
        let a = crate::kernel::Point2::new(a.x, a.y);
        let b = crate::kernel::Point2::new(b.x, b.y);
        let c = crate::kernel::Point2::new(c.x, c.y);
        let Some(center) = circumcenter(a, b, c) else {
            continue;
        };
        let clipped = clip_to_hull(center, &hull);
        for site in [a, b, c] {
            max_radius = max_radius.max(nalgebra::distance(&clipped, &site));
        }
        for (p, q, far) in [(a, b, c), (b, c, a), (c, a, b)] {
            edges.entry(edge_key(p, q)).or_default().push(VoronoiContribution {
                p,
                q,
                far,
                circumcenter: center,
            });
        }
    }

    let extent = points
        .iter()
        .flat_map(|p| points.iter().map(move |q| nalgebra::distance(p, q)))
        .fold(0.0_f64, f64::max)
        .max(1.0);

    for contributions in edges.values() {
        match contributions.as_slice() {
            [only] => {
                // Boundary Delaunay edge: the Voronoi edge is a ray from
                // `circumcenter`, perpendicular to (p, q), pointing away
                // from the triangle's third vertex.
                let edge_vec = only.q - only.p;
                let mut normal = nalgebra::Vector2::new(-edge_vec.y, edge_vec.x);
                let midpoint = nalgebra::center(&only.p, &only.q);
                if normal.dot(&(midpoint - only.far)) < 0.0 {
                    normal = -normal;
                }
                let normal = normal.normalize();
                let far_point = only.circumcenter + normal * (extent * 10.0);
                if let Some((start, end)) = clip_segment_to_hull(only.circumcenter, far_point, &hull) {
                    max_radius = max_radius
                        .max(nalgebra::distance(&start, &only.p))
                        .max(nalgebra::distance(&end, &only.p));
                }
            }
            [first, second] => {
                if let Some((start, end)) = clip_segment_to_hull(first.circumcenter, second.circumcenter, &hull) {
                    max_radius = max_radius
                        .max(nalgebra::distance(&start, &first.p))
                        .max(nalgebra::distance(&end, &first.p));
                }
            }
            _ => {}
        }
    }
    max_radius
}

type EdgeKey = ((i64, i64), (i64, i64));

/// A quantized, order-independent key identifying a Delaunay edge by its
/// two endpoint coordinates, so the same edge reached from either adjacent
/// triangle maps to one entry.
fn edge_key(a: crate::kernel::Point2, b: crate::kernel::Point2) -> EdgeKey {
    const SCALE: f64 = 1e6;
    let ka = ((a.x * SCALE).round() as i64, (a.y * SCALE).round() as i64);
    let kb = ((b.x * SCALE).round() as i64, (b.y * SCALE).round() as i64);
    if ka <= kb {
        (ka, kb)
    } else {
        (kb, ka)
    }
}

/// One triangle's contribution to a shared Delaunay edge's dual Voronoi
/// edge: the edge's two sites, the triangle's third vertex (to orient an
/// outward boundary ray), and the triangle's circumcenter.
struct VoronoiContribution {
    p: crate::kernel::Point2,
    q: crate::kernel::Point2,
    far: crate::kernel::Point2,
    circumcenter: crate::kernel::Point2,
}

/// Clips the segment `a`-`b` to the convex polygon `hull`, returning the
/// portion (if any) that lies inside it. Parametric half-plane clipping
/// (one inequality per hull edge) against `a + t*(b-a)`, matching the
/// `cross >= 0` inside test of [`point_in_convex_polygon`].
fn clip_segment_to_hull(
    a: crate::kernel::Point2,
    b: crate::kernel::Point2,
    hull: &[crate::kernel::Point2],
) -> Option<(crate::kernel::Point2, crate::kernel::Point2)> {
    let d = b - a;
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    let n = hull.len();
    for i in 0..n {
        let (p, q) = (hull[i], hull[(i + 1) % n]);
        let edge = q - p;
        let c0 = edge.x * (a.y - p.y) - edge.y * (a.x - p.x);
        let cd = edge.x * d.y - edge.y * d.x;
        if cd.abs() < 1e-14 {
            if c0 < 0.0 {
                return None;
            }
        } else {
            let t_cross = -c0 / cd;
            if cd > 0.0 {
                t0 = t0.max(t_cross);
            } else {
                t1 = t1.min(t_cross);
            }
        }
        if t0 > t1 {
            return None;
        }
    }
    Some((a + d * t0, a + d * t1))
}

fn circumcenter(
    a: crate::kernel::Point2,
    b: crate::kernel::Point2,
    c: crate::kernel::Point2,
) -> Option<crate::kernel::Point2> {
    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    if d.abs() < 1e-12 {
        return None;
    }
    let a2 = a.x * a.x + a.y * a.y;
    let b2 = b.x * b.x + b.y * b.y;
    let c2 = c.x * c.x + c.y * c.y;
    let ux = (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d;
    let uy = (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d;
    Some(crate::kernel::Point2::new(ux, uy))
}

fn clip_to_hull(p: crate::kernel::Point2, hull: &[crate::kernel::Point2]) -> crate::kernel::Point2 {
    if point_in_convex_polygon(p, hull) {
        return p;
    }
    let n = hull.len();
    let mut best = hull[0];
    let mut best_dist = f64::INFINITY;
    for i in 0..n {
        let (a, b) = (hull[i], hull[(i + 1) % n]);
        let ab = b - a;
        let denom = ab.dot(&ab);
        let t = if denom > 1e-18 {
            ((p - a).dot(&ab) / denom).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let candidate = a + ab * t;
        let d = nalgebra::distance(&candidate, &p);
        if d < best_dist {
            best_dist = d;
            best = candidate;
        }
    }
    best
}

fn point_in_convex_polygon(p: crate::kernel::Point2, hull: &[crate::kernel::Point2]) -> bool {
    let n = hull.len();
    if n < 3 {
        return false;
    }
    for i in 0..n {
        let (a, b) = (hull[i], hull[(i + 1) % n]);
        let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
        if cross < 0.0 {
            return false;
        }
    }
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::kernel::Point2;

    #[test]
    fn square_cover_radius_is_half_diagonal() {
        let pts = vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
        ];
        let r = cover_radius_of_points(&pts);
        let expected = 2f64.sqrt();
        assert!((r - expected).abs() < 1e-6, "r={r}");
    }

    #[test]
    fn collinear_points_use_segment_midpoint_fallback() {
        let pts = vec![Point2::new(0.0, 0.0), Point2::new(4.0, 0.0)];
        let r = cover_radius_of_points(&pts);
        assert!((r - 2.0).abs() < 1e-9);
    }

    #[test]
    fn island_detects_collinear_degeneration() {
        let island = Island::new(vec![
            CatPoint::from_f64(0, 0.0, 0.0),
            CatPoint::from_f64(0, 1.0, 1.0),
            CatPoint::from_f64(0, 2.0, 2.0),
        ]);
        assert!(island.degenerates_to_bank());
    }

    #[test]
    fn island_of_square_does_not_degenerate() {
        let island = Island::new(vec![
            CatPoint::from_f64(0, 0.0, 0.0),
            CatPoint::from_f64(0, 1.0, 0.0),
            CatPoint::from_f64(0, 1.0, 1.0),
            CatPoint::from_f64(0, 0.0, 1.0),
        ]);
        assert!(!island.degenerates_to_bank());
        assert!(island.cover_radius() > 0.0);
    }
}
