use crate::pattern::cat_point::CatPoint;
use crate::pattern::Contour;

/// One maximal same-direction run of turns along a [`Bank`]'s polyline.
///
/// Mirrors the `Bend` tuple `computeBends` accumulates in `bank.cpp`:
/// `max_angle` is the single sharpest turn in the run, `total_angle` is the
/// sum of all turns in the run.
#[derive(Debug, Clone, Copy)]
pub struct Bend {
    pub max_angle: f64,
    pub total_angle: f64,
}

/// A maximal-length path of points laid out end-to-end.
///
/// Mirrors `Bank` in `patterns/bank.h`: an ordered sequence of points
/// connected into a polyline, valid only while it stays roughly straight.
#[derive(Debug, Clone)]
pub struct Bank {
    pub points: Vec<CatPoint>,
}

impl Bank {
    #[must_use]
    pub fn new(points: Vec<CatPoint>) -> Self {
        Self { points }
    }

    #[must_use]
    pub fn category(&self) -> Option<u32> {
        self.points.first().map(|p| p.category)
    }

    #[must_use]
    pub fn contour(&self) -> Contour {
        Contour::Polyline(self.points.iter().map(CatPoint::approx).collect())
    }

    /// Walks consecutive orientation triples and accumulates each maximal
    /// same-direction run ("bend"), matching `Bank::computeBends` in
    /// `patterns/bank.cpp`: a run continues while consecutive turns keep
    /// the same orientation sign, and ends (starting a fresh run) whenever
    /// the orientation flips.
    ///
    /// An empty bank or one with fewer than 3 points has no bends.
    #[must_use]
    pub fn compute_bends(&self) -> Vec<Bend> {
        let pts: Vec<_> = self.points.iter().map(CatPoint::approx).collect();
        if pts.len() < 3 {
            return Vec::new();
        }
        let mut bends = Vec::new();
        let mut total = 0.0_f64;
        let mut max_angle = 0.0_f64;
        let mut sign = 0i8;
        for w in pts.windows(3) {
            let (a, b, c) = (w[0], w[1], w[2]);
            let v1 = b - a;
            let v2 = c - b;
            let turn = v1.x.mul_add(v2.y, -(v1.y * v2.x)).atan2(v1.dot(&v2));
            let angle = turn.abs();
            let this_sign = if turn > 1e-12 {
                1
            } else if turn < -1e-12 {
                -1
            } else {
                0
            };
            if sign != 0 && this_sign == -sign {
                bends.push(Bend {
                    max_angle,
                    total_angle: total,
                });
                total = angle;
                max_angle = angle;
            } else {
                total += angle;
                max_angle = max_angle.max(angle);
            }
            sign = this_sign;
        }
        if sign != 0 {
            bends.push(Bend {
                max_angle,
                total_angle: total,
            });
        }
        bends
    }

    /// Whether this bank stays within the allowed bend count, per-bend
    /// maximum turn, and per-bend total turn budgets.
    ///
    /// Mirrors `Bank::isValid` in `bank.cpp`: the bend count must not
    /// exceed `inflection_limit`, each bend's single largest turn must not
    /// exceed `max_turn_angle`, and each bend's accumulated turn must not
    /// exceed `max_bend_angle`.
    #[must_use]
    pub fn is_valid(&self, inflection_limit: usize, max_bend_angle: f64, max_turn_angle: f64) -> bool {
        let bends = self.compute_bends();
        bends.len() <= inflection_limit
            && bends.iter().all(|b| b.max_angle <= max_turn_angle)
            && bends.iter().all(|b| b.total_angle <= max_bend_angle)
    }

    /// Half the length of the longest edge of the polyline, matching
    /// `Bank::coverRadius` (`bank.cpp`'s constructor computes the max
    /// squared edge length once and halves its square root).
    #[must_use]
    pub fn cover_radius(&self) -> f64 {
        let pts: Vec<_> = self.points.iter().map(CatPoint::approx).collect();
        pts.windows(2)
            .map(|w| nalgebra::distance(&w[0], &w[1]))
            .fold(0.0_f64, f64::max)
            / 2.0
    }
}
