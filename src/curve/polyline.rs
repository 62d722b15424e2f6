use crate::curve::xmonotone::XMonotoneCurve;
use crate::kernel::Point2;

/// An open chain of x-monotone curves, each curve's target equal to the next
/// curve's source. Mirrors `CSPolyline` (a CGAL `General_polyline_2`).
#[derive(Debug, Clone, Default)]
pub struct CSPolyline {
    pub curves: Vec<XMonotoneCurve>,
}

impl CSPolyline {
    #[must_use]
    pub fn new(curves: Vec<XMonotoneCurve>) -> Self {
        Self { curves }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Approximates this polyline as a sequence of inexact points.
    #[must_use]
    pub fn sample(&self, samples_per_curve: usize) -> Vec<Point2> {
        let mut out = Vec::new();
        for (i, c) in self.curves.iter().enumerate() {
            let pts = c.sample(samples_per_curve);
            if i == 0 {
                out.extend(pts);
            } else {
                out.extend(pts.into_iter().skip(1));
            }
        }
        out
    }

    /// Nearest point on the whole polyline to `p`.
    #[must_use]
    pub fn nearest(&self, p: Point2) -> Option<Point2> {
        self.curves
            .iter()
            .map(|c| c.nearest(p))
            .min_by(|a, b| {
                nalgebra::distance_squared(a, &p)
                    .partial_cmp(&nalgebra::distance_squared(b, &p))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }

    /// Whether `p` lies on this polyline within `tolerance`.
    #[must_use]
    pub fn lies_on(&self, p: Point2, tolerance: f64) -> bool {
        self.curves.iter().any(|c| c.lies_on(p, tolerance))
    }

    /// Reverses the polyline, flipping each curve's orientation and source/target.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let curves = self
            .curves
            .iter()
            .rev()
            .map(|c| match c {
                XMonotoneCurve::Segment { source, target } => XMonotoneCurve::Segment {
                    source: target.clone(),
                    target: source.clone(),
                },
                XMonotoneCurve::Arc {
                    circle,
                    source,
                    target,
                    orientation,
                } => XMonotoneCurve::Arc {
                    circle: circle.clone(),
                    source: target.clone(),
                    target: source.clone(),
                    orientation: match orientation {
                        crate::kernel::Orientation::CounterClockwise => {
                            crate::kernel::Orientation::Clockwise
                        }
                        crate::kernel::Orientation::Clockwise => {
                            crate::kernel::Orientation::CounterClockwise
                        }
                        other => *other,
                    },
                },
            })
            .collect();
        Self { curves }
    }
}
