use crate::pattern::cat_point::CatPoint;
use crate::pattern::Contour;

/// A pattern covering exactly two points, drawn as the dilated segment
/// between them. Mirrors `Matching` in `patterns/matching.h`.
#[derive(Debug, Clone)]
pub struct Matching {
    pub points: [CatPoint; 2],
}

impl Matching {
    #[must_use]
    pub fn new(a: CatPoint, b: CatPoint) -> Self {
        Self { points: [a, b] }
    }

    #[must_use]
    pub fn category(&self) -> u32 {
        self.points[0].category
    }

    #[must_use]
    pub fn contour(&self) -> Contour {
        Contour::Polyline(self.points.iter().map(CatPoint::approx).collect())
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        nalgebra::distance(&self.points[0].approx(), &self.points[1].approx())
    }

    /// Half the Euclidean distance between the two points, matching
    /// `Matching::coverRadius` in `patterns/matching.h`.
    #[must_use]
    pub fn cover_radius(&self) -> f64 {
        self.length() / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_matches_euclidean_distance() {
        let m = Matching::new(CatPoint::from_f64(1, 0.0, 0.0), CatPoint::from_f64(1, 3.0, 4.0));
        assert!((m.length() - 5.0).abs() < 1e-9);
    }
}
