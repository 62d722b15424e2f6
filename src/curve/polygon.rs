use crate::curve::polyline::CSPolyline;
use crate::curve::xmonotone::XMonotoneCurve;
use crate::kernel::exact::{rational_to_f64, ExactCircle, ExactPoint};
use crate::kernel::oneroot::OneRootPoint;
use crate::kernel::predicates::Orientation;
use crate::kernel::Point2;

/// A closed circle-segment polygon: an outer boundary plus zero or more
/// holes, each a closed chain of x-monotone curves. Mirrors `CSPolygon`
/// (a CGAL `General_polygon_with_holes_2`).
#[derive(Debug, Clone, Default)]
pub struct CSPolygon {
    pub outer: CSPolyline,
    pub holes: Vec<CSPolyline>,
}

impl CSPolygon {
    #[must_use]
    pub fn new(outer: CSPolyline) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_holes(outer: CSPolyline, holes: Vec<CSPolyline>) -> Self {
        Self { outer, holes }
    }

    /// Signed area via Green's theorem, as the sum of each curve's chord
    /// contribution plus, for arcs, its circular-segment contribution.
    /// Hole areas are subtracted. Mirrors `area(const CSPolygon&)` in
    /// `cs_polygon_helpers.h`, which splits into `lens_area` terms per curve.
    #[must_use]
    pub fn area(&self) -> f64 {
        let outer: f64 = self.outer.curves.iter().map(XMonotoneCurve::area_contribution).sum();
        let holes: f64 = self
            .holes
            .iter()
            .map(|h| h.curves.iter().map(XMonotoneCurve::area_contribution).sum::<f64>().abs())
            .sum();
        outer.abs() - holes
    }

    /// Whether `p` lies inside this polygon (ray-casting against the
    /// sampled approximation of the boundary, excluding holes).
    #[must_use]
    pub fn contains_point(&self, p: Point2) -> bool {
        if !ring_contains(&self.outer, p) {
            return false;
        }
        for hole in &self.holes {
            if ring_contains(hole, p) {
                return false;
            }
        }
        true
    }

    /// Whether `p` lies on the boundary (outer or any hole) within `tolerance`.
    #[must_use]
    pub fn lies_on(&self, p: Point2, tolerance: f64) -> bool {
        self.outer.lies_on(p, tolerance) || self.holes.iter().any(|h| h.lies_on(p, tolerance))
    }

    /// Nearest point on the boundary to `p`.
    #[must_use]
    pub fn nearest(&self, p: Point2) -> Option<Point2> {
        let mut candidates: Vec<Point2> = self.outer.nearest(p).into_iter().collect();
        for hole in &self.holes {
            candidates.extend(hole.nearest(p));
        }
        candidates.into_iter().min_by(|a, b| {
            nalgebra::distance_squared(a, &p)
                .partial_cmp(&nalgebra::distance_squared(b, &p))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }
}

fn ring_contains(ring: &CSPolyline, p: Point2) -> bool {
    let pts = ring.sample(16);
    if pts.len() < 3 {
        return false;
    }
    let mut inside = false;
    let n = pts.len();
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

/// Converts a full circle into a `CSPolygon` made of two opposite
/// semicircular arcs, matching `circleToPolygon` in `cs_curve_helpers.cpp`.
#[must_use]
pub fn circle_to_polygon(circle: &ExactCircle) -> CSPolygon {
    let radius = rational_to_f64(&circle.squared_radius).sqrt();
    let cx = rational_to_f64(&circle.center.x);
    let cy = rational_to_f64(&circle.center.y);
    let east = OneRootPoint::from_exact(&ExactPoint::from_f64(cx + radius, cy));
    let west = OneRootPoint::from_exact(&ExactPoint::from_f64(cx - radius, cy));
    let top = XMonotoneCurve::Arc {
        circle: circle.clone(),
        source: east.clone(),
        target: west.clone(),
        orientation: Orientation::CounterClockwise,
    };
    let bottom = XMonotoneCurve::Arc {
        circle: circle.clone(),
        source: west,
        target: east,
        orientation: Orientation::CounterClockwise,
    };
    CSPolygon::new(CSPolyline::new(vec![top, bottom]))
}
