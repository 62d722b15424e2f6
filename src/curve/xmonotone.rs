use crate::kernel::exact::ExactCircle;
use crate::kernel::oneroot::OneRootPoint;
use crate::kernel::predicates::Orientation;
use crate::kernel::Point2;

/// A single x-monotone piece of a circle-segment curve: either a straight
/// segment or a circular arc, each x-monotone by construction.
///
/// Mirrors `CSTraits::X_monotone_curve_2`, which in the original is a CGAL
/// variant of `Segment_2`/`Arc_2`; endpoints of arcs carry one-root
/// coordinates because they are generally circle/segment or circle/circle
/// intersection points.
#[derive(Debug, Clone)]
pub enum XMonotoneCurve {
    Segment {
        source: OneRootPoint,
        target: OneRootPoint,
    },
    Arc {
        circle: ExactCircle,
        source: OneRootPoint,
        target: OneRootPoint,
        /// Orientation the arc is swept in, from `source` to `target`.
        orientation: Orientation,
    },
}

impl XMonotoneCurve {
    #[must_use]
    pub fn segment(source: OneRootPoint, target: OneRootPoint) -> Self {
        Self::Segment { source, target }
    }

    #[must_use]
    pub fn source(&self) -> &OneRootPoint {
        match self {
            Self::Segment { source, .. } | Self::Arc { source, .. } => source,
        }
    }

    #[must_use]
    pub fn target(&self) -> &OneRootPoint {
        match self {
            Self::Segment { target, .. } | Self::Arc { target, .. } => target,
        }
    }

    #[must_use]
    pub fn source_approx(&self) -> Point2 {
        let (x, y) = self.source().to_f64();
        Point2::new(x, y)
    }

    #[must_use]
    pub fn target_approx(&self) -> Point2 {
        let (x, y) = self.target().to_f64();
        Point2::new(x, y)
    }

    /// Approximates this curve as a polyline of `samples` inexact points
    /// (including both endpoints). For a segment this is just the two
    /// endpoints regardless of `samples`.
    #[must_use]
    pub fn sample(&self, samples: usize) -> Vec<Point2> {
        match self {
            Self::Segment { .. } => vec![self.source_approx(), self.target_approx()],
            Self::Arc {
                circle,
                orientation,
                ..
            } => {
                let center = circle.center.approx();
                let radius = crate::kernel::exact::rational_to_f64(&circle.squared_radius).sqrt();
                let (sx, sy) = self.source().to_f64();
                let (tx, ty) = self.target().to_f64();
                let start_angle = (sy - center.y).atan2(sx - center.x);
                let mut end_angle = (ty - center.y).atan2(tx - center.x);
                let ccw = matches!(orientation, Orientation::CounterClockwise);
                if ccw && end_angle < start_angle {
                    end_angle += std::f64::consts::TAU;
                } else if !ccw && end_angle > start_angle {
                    end_angle -= std::f64::consts::TAU;
                }
                let n = samples.max(2);
                (0..n)
                    .map(|i| {
                        let t = i as f64 / (n - 1) as f64;
                        let angle = start_angle + (end_angle - start_angle) * t;
                        Point2::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
                    })
                    .collect()
            }
        }
    }

    /// Nearest point on this curve to `p`, approximated by dense sampling.
    #[must_use]
    pub fn nearest(&self, p: Point2) -> Point2 {
        let samples = self.sample(64);
        let mut best = samples[0];
        let mut best_dist = nalgebra::distance_squared(&best, &p);
        for i in 0..samples.len() - 1 {
            let (a, b) = (samples[i], samples[i + 1]);
            let ab = b - a;
            let denom = ab.dot(&ab);
            let t = if denom > 1e-18 {
                ((p - a).dot(&ab) / denom).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let candidate = a + ab * t;
            let d = nalgebra::distance_squared(&candidate, &p);
            if d < best_dist {
                best_dist = d;
                best = candidate;
            }
        }
        best
    }

    /// Whether `p` lies on this curve within `tolerance`.
    #[must_use]
    pub fn lies_on(&self, p: Point2, tolerance: f64) -> bool {
        nalgebra::distance(&self.nearest(p), &p) <= tolerance
    }

    /// Signed area contribution of this curve's segment-from-origin wedge,
    /// used by [`crate::curve::polygon::area`] (Green's theorem, split into
    /// the chord contribution plus, for arcs, the circular-segment
    /// contribution between the chord and the arc).
    #[must_use]
    pub fn area_contribution(&self) -> f64 {
        let (sx, sy) = self.source().to_f64();
        let (tx, ty) = self.target().to_f64();
        let chord = 0.5 * (sx * ty - tx * sy);
        match self {
            Self::Segment { .. } => chord,
            Self::Arc {
                circle,
                orientation,
                ..
            } => {
                let center = circle.center.approx();
                let radius = crate::kernel::exact::rational_to_f64(&circle.squared_radius).sqrt();
                let start_angle = (sy - center.y).atan2(sx - center.x);
                let mut end_angle = (ty - center.y).atan2(tx - center.x);
                let ccw = matches!(orientation, Orientation::CounterClockwise);
                if ccw && end_angle < start_angle {
                    end_angle += std::f64::consts::TAU;
                } else if !ccw && end_angle > start_angle {
                    end_angle -= std::f64::consts::TAU;
                }
                let sweep = end_angle - start_angle;
                // Circular-segment area between chord and arc, signed by sweep.
                let segment_area = 0.5 * radius * radius * (sweep - sweep.sin());
                chord + segment_area
            }
        }
    }
}
