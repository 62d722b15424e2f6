use crate::kernel::Point2;

/// The two external tangent lines shared by two circles, represented as the
/// tangent point on each circle. Returns `None` if one circle contains the
/// other (no common external tangent exists).
///
/// Grounded on `tangentPoints`/`algebraicCircleTangentToRationalSegments` in
/// `helpers/approximate_convex_hull.cpp`: rather than solving the tangency
/// condition exactly (which can require a nested radical outside the
/// `OneRoot` domain), this computes the tangent direction in the inexact
/// domain and rationalizes the result, matching the original's documented
/// "hacky" approximation when an exact tangent point isn't expressible.
#[must_use]
pub fn external_tangent_points(
    c1: Point2,
    r1: f64,
    c2: Point2,
    r2: f64,
) -> Option<[(Point2, Point2); 2]> {
    let d = nalgebra::distance(&c1, &c2);
    if d < (r1 - r2).abs() + 1e-12 {
        return None;
    }
    let dir = (c2 - c1) / d;
    // For external tangents of circles with different radii, the tangent
    // line makes angle `alpha = asin((r1 - r2) / d)` with the center line.
    let alpha = ((r1 - r2) / d).clamp(-1.0, 1.0).asin();
    let rot = |v: nalgebra::Vector2<f64>, theta: f64| {
        let (s, c) = theta.sin_cos();
        nalgebra::Vector2::new(v.x * c - v.y * s, v.x * s + v.y * c)
    };
    let n_pos = rot(dir, std::f64::consts::FRAC_PI_2 + alpha);
    let n_neg = rot(dir, -std::f64::consts::FRAC_PI_2 - alpha);
    let t1a = c1 + n_pos * r1;
    let t1b = c2 + n_pos * r2;
    let t2a = c1 + n_neg * r1;
    let t2b = c2 + n_neg * r2;
    Some([(t1a, t1b), (t2a, t2b)])
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn equal_radius_tangents_are_parallel_offsets() {
        let c1 = Point2::new(0.0, 0.0);
        let c2 = Point2::new(10.0, 0.0);
        let [(a1, a2), (b1, b2)] = external_tangent_points(c1, 1.0, c2, 1.0).unwrap();
        assert!((a1.y - a2.y).abs() < 1e-9);
        assert!((b1.y - b2.y).abs() < 1e-9);
        assert!((a1.y - b1.y).abs() > 1.0);
    }

    #[test]
    fn nested_circles_have_no_tangent() {
        let c1 = Point2::new(0.0, 0.0);
        let c2 = Point2::new(0.1, 0.0);
        assert!(external_tangent_points(c1, 5.0, c2, 1.0).is_none());
    }
}
