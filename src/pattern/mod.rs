//! Pattern catalog: the four shapes a partition groups category points into.

pub mod bank;
pub mod cat_point;
pub mod island;
pub mod matching;
pub mod single_point;

pub use bank::Bank;
pub use cat_point::CatPoint;
pub use island::Island;
pub use matching::Matching;
pub use single_point::SinglePoint;

use crate::curve::CSPolygon;
use crate::error::Result;
use crate::kernel::Point2;
use crate::offset;
use crate::settings::GeneralSettings;

/// The cached geometric shape of a pattern's points, before dilation.
///
/// Mirrors the original's `std::variant<Polyline<Inexact>, Polygon<Inexact>>`
/// cache inside `PolyPattern`.
#[derive(Debug, Clone)]
pub enum Contour {
    Polyline(Vec<Point2>),
    Polygon(Vec<Point2>),
}

/// One grouping of same-category points into a drawable shape.
#[derive(Debug, Clone)]
pub enum Pattern {
    SinglePoint(SinglePoint),
    Matching(Matching),
    Bank(Bank),
    Island(Island),
}

impl Pattern {
    #[must_use]
    pub fn category(&self) -> u32 {
        match self {
            Self::SinglePoint(p) => p.category(),
            Self::Matching(p) => p.category(),
            Self::Bank(p) => p.category().unwrap_or_default(),
            Self::Island(p) => p.category().unwrap_or_default(),
        }
    }

    /// The pattern's compactness measure, per `spec.md` §3: zero for a
    /// single point, half the matching length for a matching, half the
    /// longest bank edge for a bank, and the Euclidean Voronoi cover
    /// radius for an island (clipped to its convex hull).
    #[must_use]
    pub fn cover_radius(&self) -> f64 {
        match self {
            Self::SinglePoint(p) => p.cover_radius(),
            Self::Matching(p) => p.cover_radius(),
            Self::Bank(p) => p.cover_radius(),
            Self::Island(p) => {
                if p.degenerates_to_bank() {
                    p.as_bank().cover_radius()
                } else {
                    p.cover_radius()
                }
            }
        }
    }

    /// Whether this pattern satisfies its variant's geometric quality
    /// criteria: always `true` except for [`Bank`], which must respect
    /// `settings`' inflection/turn/bend-angle limits.
    #[must_use]
    pub fn is_valid(&self, settings: &GeneralSettings) -> bool {
        match self {
            Self::Bank(b) => b.is_valid(settings.inflection_limit, settings.max_bend_angle, settings.max_turn_angle),
            Self::SinglePoint(_) | Self::Matching(_) | Self::Island(_) => true,
        }
    }

    #[must_use]
    pub fn points(&self) -> Vec<&CatPoint> {
        match self {
            Self::SinglePoint(p) => vec![&p.point],
            Self::Matching(p) => p.points.iter().collect(),
            Self::Bank(p) => p.points.iter().collect(),
            Self::Island(p) => p.points.iter().collect(),
        }
    }

    #[must_use]
    pub fn contour(&self) -> Contour {
        match self {
            Self::SinglePoint(p) => p.contour(),
            Self::Matching(p) => p.contour(),
            Self::Bank(p) => p.contour(),
            Self::Island(p) => {
                if p.degenerates_to_bank() {
                    p.as_bank().contour()
                } else {
                    p.contour()
                }
            }
        }
    }

    /// Dilates this pattern's contour by `radius`, producing the pattern's
    /// drawable shape. Mirrors `PolyPattern::poly(dilation_radius)` via
    /// `variant_cast` in the original: a single point dilates to a disk, a
    /// polyline dilates to a "stadium", and a polygon dilates to its
    /// Minkowski sum with a disk.
    ///
    /// # Errors
    ///
    /// Propagates errors from the offset engine (e.g. a degenerate contour).
    pub fn dilate(&self, radius: f64) -> Result<CSPolygon> {
        match self.contour() {
            Contour::Polyline(pts) if pts.len() == 1 => {
                let circle = crate::kernel::exact::ExactCircle::from_radius(
                    crate::kernel::exact::ExactPoint::from_f64(pts[0].x, pts[0].y),
                    radius,
                );
                Ok(crate::curve::circle_to_polygon(&circle))
            }
            Contour::Polyline(pts) => Ok(offset::offset_segment(&pts, radius)),
            Contour::Polygon(pts) => offset::offset_polygon(&pts, radius),
        }
    }
}

/// A full partition of the input points: every point belongs to exactly one
/// pattern. Mirrors `Partition` (`std::vector<std::variant<...>>` per
/// category) in `partition.h`.
#[derive(Debug, Clone, Default)]
pub struct Partition {
    pub patterns: Vec<Pattern>,
}

impl Partition {
    #[must_use]
    pub fn new(patterns: Vec<Pattern>) -> Self {
        Self { patterns }
    }

    #[must_use]
    pub fn point_count(&self) -> usize {
        self.patterns.iter().map(|p| p.points().len()).sum()
    }

    #[must_use]
    pub fn patterns_of_category(&self, category: u32) -> Vec<&Pattern> {
        self.patterns.iter().filter(|p| p.category() == category).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn partition_counts_all_points_once() {
        let p = Partition::new(vec![
            Pattern::SinglePoint(SinglePoint::new(CatPoint::from_f64(0, 0.0, 0.0))),
            Pattern::Matching(Matching::new(
                CatPoint::from_f64(1, 0.0, 0.0),
                CatPoint::from_f64(1, 1.0, 0.0),
            )),
        ]);
        assert_eq!(p.point_count(), 3);
    }

    #[test]
    fn single_point_dilates_to_disk_area() {
        let pat = Pattern::SinglePoint(SinglePoint::new(CatPoint::from_f64(0, 0.0, 0.0)));
        let poly = pat.dilate(2.0).unwrap();
        let expected = std::f64::consts::PI * 4.0;
        assert!((poly.area() - expected).abs() < 1e-1, "area={}", poly.area());
    }

    #[test]
    fn matching_dilates_to_stadium_containing_both_points() {
        let pat = Pattern::Matching(Matching::new(
            CatPoint::from_f64(0, 0.0, 0.0),
            CatPoint::from_f64(0, 5.0, 0.0),
        ));
        let poly = pat.dilate(1.0).unwrap();
        assert!(poly.contains_point(Point2::new(0.0, 0.0)));
        assert!(poly.contains_point(Point2::new(5.0, 0.0)));
    }
}
