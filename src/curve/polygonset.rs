use crate::curve::polygon::CSPolygon;
use crate::kernel::Point2;

/// A set of (possibly disjoint, possibly nested) circle-segment polygons.
/// Mirrors `CSPolygonSet` (a CGAL `General_polygon_set_2`).
#[derive(Debug, Clone, Default)]
pub struct CSPolygonSet {
    pub polygons: Vec<CSPolygon>,
}

impl CSPolygonSet {
    #[must_use]
    pub fn new(polygons: Vec<CSPolygon>) -> Self {
        Self { polygons }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    #[must_use]
    pub fn contains_point(&self, p: Point2) -> bool {
        self.polygons.iter().any(|poly| poly.contains_point(p))
    }

    #[must_use]
    pub fn total_area(&self) -> f64 {
        self.polygons.iter().map(CSPolygon::area).sum()
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

    fn unit_square_at(ox: f64, oy: f64) -> CSPolygon {
        let p = |x: f64, y: f64| OneRootPoint::from_exact(&ExactPoint::from_f64(ox + x, oy + y));
        CSPolygon::new(CSPolyline::new(vec![
            XMonotoneCurve::segment(p(0.0, 0.0), p(1.0, 0.0)),
            XMonotoneCurve::segment(p(1.0, 0.0), p(1.0, 1.0)),
            XMonotoneCurve::segment(p(1.0, 1.0), p(0.0, 1.0)),
            XMonotoneCurve::segment(p(0.0, 1.0), p(0.0, 0.0)),
        ]))
    }

    #[test]
    fn total_area_sums_disjoint_polygons() {
        let set = CSPolygonSet::new(vec![unit_square_at(0.0, 0.0), unit_square_at(5.0, 0.0)]);
        assert!((set.total_area() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn contains_point_checks_any_polygon() {
        let set = CSPolygonSet::new(vec![unit_square_at(0.0, 0.0), unit_square_at(5.0, 0.0)]);
        assert!(set.contains_point(Point2::new(5.5, 0.5)));
        assert!(!set.contains_point(Point2::new(2.5, 0.5)));
    }
}
