use num_traits::Zero;

use crate::kernel::exact::{one_if_positive, ExactNum, ExactPoint, ExactSegment, ExactVector};
use crate::kernel::inexact::{Point2, TOLERANCE};

/// Orientation of an ordered triple of points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    CounterClockwise,
    Clockwise,
    Collinear,
}

/// Exact orientation test for three exact points (sign of the cross product
/// of `p1->p2` and `p1->p3`).
#[must_use]
pub fn orientation(p1: &ExactPoint, p2: &ExactPoint, p3: &ExactPoint) -> Orientation {
    let v1 = ExactVector::between(p1, p2);
    let v2 = ExactVector::between(p1, p3);
    match one_if_positive(&v1.cross(&v2)) {
        1 => Orientation::CounterClockwise,
        -1 => Orientation::Clockwise,
        _ => Orientation::Collinear,
    }
}

/// Inexact orientation test, for the fast approximate predicates used by the
/// partition and drawing engines.
#[must_use]
pub fn orientation_approx(p1: Point2, p2: Point2, p3: Point2) -> Orientation {
    let cross = (p2.x - p1.x) * (p3.y - p1.y) - (p2.y - p1.y) * (p3.x - p1.x);
    if cross > TOLERANCE {
        Orientation::CounterClockwise
    } else if cross < -TOLERANCE {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Returns `1` if `point` is strictly inside the circle `(center, r^2)`,
/// `0` on the boundary, `-1` if outside.
#[must_use]
pub fn side_of_circle(center: &ExactPoint, squared_radius: &ExactNum, point: &ExactPoint) -> i8 {
    let d = ExactVector::between(center, point);
    let dist2 = d.squared_length();
    if &dist2 < squared_radius {
        1
    } else if &dist2 > squared_radius {
        -1
    } else {
        0
    }
}

/// Axis-aligned bounding box, as (min, max) corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point2,
    pub max: Point2,
}

impl BoundingBox {
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Returns a copy expanded uniformly by `margin` on every side.
    #[must_use]
    pub fn expanded(&self, margin: f64) -> Self {
        Self {
            min: Point2::new(self.min.x - margin, self.min.y - margin),
            max: Point2::new(self.max.x + margin, self.max.y + margin),
        }
    }

    #[must_use]
    pub fn contains(&self, p: Point2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Computes the bounding box of a nonempty point set.
///
/// Returns `None` if `points` is empty.
#[must_use]
pub fn bbox_of(points: &[Point2]) -> Option<BoundingBox> {
    let first = *points.first()?;
    let mut min = first;
    let mut max = first;
    for p in &points[1..] {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    Some(BoundingBox { min, max })
}

#[must_use]
pub fn midpoint(a: Point2, b: Point2) -> Point2 {
    nalgebra::center(&a, &b)
}

/// Intersection point of two infinite lines, each given by a point and
/// direction. Returns `None` if the lines are parallel.
#[must_use]
pub fn line_line_intersection(
    p0: Point2,
    d0: nalgebra::Vector2<f64>,
    p1: Point2,
    d1: nalgebra::Vector2<f64>,
) -> Option<Point2> {
    let denom = d0.x * d1.y - d0.y * d1.x;
    if denom.abs() < TOLERANCE {
        return None;
    }
    let diff = p1 - p0;
    let t = (diff.x * d1.y - diff.y * d1.x) / denom;
    Some(p0 + d0 * t)
}

/// Exact intersection parameter of segment `seg` against the exact line
/// through `a` and `b`, if it exists and lies in `[0, 1]`.
#[must_use]
pub fn segment_intersection(seg: &ExactSegment, a: &ExactPoint, b: &ExactPoint) -> Option<ExactPoint> {
    let d1 = seg.direction();
    let d2 = ExactVector::between(a, b);
    let denom = d1.cross(&d2);
    if denom.is_zero() {
        return None;
    }
    let diff = ExactVector::between(&seg.source, a);
    let t = diff.cross(&d2) / &denom;
    if t < ExactNum::zero() || t > num_traits::One::one() {
        return None;
    }
    Some(ExactPoint::new(
        &seg.source.x + &t * &d1.x,
        &seg.source.y + &t * &d1.y,
    ))
}

/// Closed-form intersection of a ray (origin + t*direction, t >= 0) with a
/// circle, returning the nearest intersection point if any.
#[must_use]
pub fn ray_circle_point(
    origin: Point2,
    direction: nalgebra::Vector2<f64>,
    center: Point2,
    radius: f64,
) -> Option<Point2> {
    let d = direction.normalize();
    let f = origin - center;
    let a = d.dot(&d);
    let b = 2.0 * f.dot(&d);
    let c = f.dot(&f) - radius * radius;
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return None;
    }
    let sqrt_disc = disc.sqrt();
    let t1 = (-b - sqrt_disc) / (2.0 * a);
    let t2 = (-b + sqrt_disc) / (2.0 * a);
    let t = if t1 >= 0.0 {
        t1
    } else if t2 >= 0.0 {
        t2
    } else {
        return None;
    };
    Some(origin + d * t)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::kernel::exact::rational;

    #[test]
    fn orientation_ccw_triangle() {
        let a = ExactPoint::new(rational(0, 1), rational(0, 1));
        let b = ExactPoint::new(rational(1, 1), rational(0, 1));
        let c = ExactPoint::new(rational(0, 1), rational(1, 1));
        assert_eq!(orientation(&a, &b, &c), Orientation::CounterClockwise);
    }

    #[test]
    fn orientation_collinear() {
        let a = ExactPoint::new(rational(0, 1), rational(0, 1));
        let b = ExactPoint::new(rational(1, 1), rational(1, 1));
        let c = ExactPoint::new(rational(2, 1), rational(2, 1));
        assert_eq!(orientation(&a, &b, &c), Orientation::Collinear);
    }

    #[test]
    fn bbox_of_points() {
        let pts = vec![Point2::new(0.0, 0.0), Point2::new(2.0, -1.0), Point2::new(-1.0, 3.0)];
        let bbox = bbox_of(&pts).unwrap();
        assert!((bbox.min.x + 1.0).abs() < 1e-12);
        assert!((bbox.min.y + 1.0).abs() < 1e-12);
        assert!((bbox.max.x - 2.0).abs() < 1e-12);
        assert!((bbox.max.y - 3.0).abs() < 1e-12);
    }

    #[test]
    fn bbox_of_empty_is_none() {
        assert!(bbox_of(&[]).is_none());
    }

    #[test]
    fn ray_circle_nearest_hit() {
        let p = ray_circle_point(
            Point2::new(-5.0, 0.0),
            nalgebra::Vector2::new(1.0, 0.0),
            Point2::new(0.0, 0.0),
            1.0,
        )
        .unwrap();
        assert!((p.x + 1.0).abs() < 1e-9);
        assert!(p.y.abs() < 1e-9);
    }

    #[test]
    fn line_line_parallel_is_none() {
        let r = line_line_intersection(
            Point2::new(0.0, 0.0),
            nalgebra::Vector2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
            nalgebra::Vector2::new(2.0, 0.0),
        );
        assert!(r.is_none());
    }
}
