use crate::pattern::cat_point::CatPoint;
use crate::pattern::Contour;

/// A pattern covering exactly one point, drawn as a disk of the dilation
/// radius. Mirrors `SinglePoint` in `patterns/single_point.h`.
#[derive(Debug, Clone)]
pub struct SinglePoint {
    pub point: CatPoint,
}

impl SinglePoint {
    #[must_use]
    pub fn new(point: CatPoint) -> Self {
        Self { point }
    }

    #[must_use]
    pub fn category(&self) -> u32 {
        self.point.category
    }

    #[must_use]
    pub fn contour(&self) -> Contour {
        Contour::Polyline(vec![self.point.approx()])
    }

    #[must_use]
    pub fn cover_radius(&self) -> f64 {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contour_is_the_single_point() {
        let sp = SinglePoint::new(CatPoint::from_f64(3, 1.0, 2.0));
        match sp.contour() {
            Contour::Polyline(pts) => assert_eq!(pts.len(), 1),
            Contour::Polygon(_) => panic!("expected polyline contour"),
        }
    }
}
