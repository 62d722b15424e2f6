use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use crate::error::{GeometryError, Result};

/// Exact rational scalar used throughout the exact geometry domain.
pub type ExactNum = BigRational;

/// An exact point in the plane, with rational coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExactPoint {
    pub x: ExactNum,
    pub y: ExactNum,
}

impl ExactPoint {
    #[must_use]
    pub fn new(x: ExactNum, y: ExactNum) -> Self {
        Self { x, y }
    }

    /// Builds an exact point from an f64 pair by rationalizing to bounded precision.
    ///
    /// Mirrors the original's `makeExact`: coordinates are not approximated further
    /// once converted, so patterns built from this point compare exactly.
    #[must_use]
    pub fn from_f64(x: f64, y: f64) -> Self {
        Self {
            x: BigRational::from_float(x).unwrap_or_else(BigRational::zero),
            y: BigRational::from_float(y).unwrap_or_else(BigRational::zero),
        }
    }

    /// Approximates this point as an inexact `f64` pair, matching
    /// `approximateAlgebraic` for rational coordinates.
    #[must_use]
    pub fn approx(&self) -> crate::kernel::inexact::Point2 {
        crate::kernel::inexact::Point2::new(rational_to_f64(&self.x), rational_to_f64(&self.y))
    }
}

/// An exact vector in the plane, with rational coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExactVector {
    pub x: ExactNum,
    pub y: ExactNum,
}

impl ExactVector {
    #[must_use]
    pub fn new(x: ExactNum, y: ExactNum) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn between(from: &ExactPoint, to: &ExactPoint) -> Self {
        Self {
            x: &to.x - &from.x,
            y: &to.y - &from.y,
        }
    }

    #[must_use]
    pub fn squared_length(&self) -> ExactNum {
        &self.x * &self.x + &self.y * &self.y
    }

    #[must_use]
    pub fn dot(&self, other: &Self) -> ExactNum {
        &self.x * &other.x + &self.y * &other.y
    }

    #[must_use]
    pub fn cross(&self, other: &Self) -> ExactNum {
        &self.x * &other.y - &self.y * &other.x
    }
}

/// An exact circle: a center and a squared radius, both rational.
///
/// The radius itself need not be rational (it may be an arbitrary algebraic
/// number), so the circle is represented by its squared radius, matching the
/// `CSTraits` convention of working with `Circle_2` rather than radius scalars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExactCircle {
    pub center: ExactPoint,
    pub squared_radius: ExactNum,
}

impl ExactCircle {
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroRadiusCircle`] if `squared_radius` is not positive.
    pub fn new(center: ExactPoint, squared_radius: ExactNum) -> Result<Self> {
        if !squared_radius.is_positive() {
            return Err(GeometryError::ZeroRadiusCircle.into());
        }
        Ok(Self {
            center,
            squared_radius,
        })
    }

    /// Builds a circle from a positive `radius` (inexact) without going
    /// through the fallible rational-squared-radius constructor.
    ///
    /// For use by callers that already know `radius` is positive (dilation
    /// disks of a known-positive pattern radius).
    #[must_use]
    pub fn from_radius(center: ExactPoint, radius: f64) -> Self {
        let squared = (radius * radius).max(f64::EPSILON);
        Self {
            center,
            squared_radius: BigRational::from_float(squared).unwrap_or_else(ExactNum::one),
        }
    }
}

/// An exact line segment between two exact points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExactSegment {
    pub source: ExactPoint,
    pub target: ExactPoint,
}

impl ExactSegment {
    /// # Errors
    ///
    /// Returns [`GeometryError::DegeneratePolyline`] if source equals target.
    pub fn new(source: ExactPoint, target: ExactPoint) -> Result<Self> {
        if source == target {
            return Err(GeometryError::DegeneratePolyline.into());
        }
        Ok(Self { source, target })
    }

    #[must_use]
    pub fn direction(&self) -> ExactVector {
        ExactVector::between(&self.source, &self.target)
    }
}

/// Converts a `BigRational` to its nearest `f64`, saturating to infinity on overflow.
#[must_use]
pub fn rational_to_f64(r: &ExactNum) -> f64 {
    num_traits::ToPrimitive::to_f64(r).unwrap_or_else(|| {
        if r.is_negative() {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        }
    })
}

/// Exact orientation of three points: CCW, CW, or collinear.
#[must_use]
pub fn one_if_positive(n: &ExactNum) -> i8 {
    if n.is_positive() {
        1
    } else if n.is_negative() {
        -1
    } else {
        0
    }
}

#[must_use]
pub fn rational(n: i64, d: i64) -> ExactNum {
    BigRational::new(n.into(), d.into())
}

#[must_use]
pub fn one() -> ExactNum {
    ExactNum::one()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn exact_vector_cross_orientation() {
        let a = ExactPoint::new(rational(0, 1), rational(0, 1));
        let b = ExactPoint::new(rational(1, 1), rational(0, 1));
        let c = ExactPoint::new(rational(0, 1), rational(1, 1));
        let v1 = ExactVector::between(&a, &b);
        let v2 = ExactVector::between(&a, &c);
        assert_eq!(one_if_positive(&v1.cross(&v2)), 1);
    }

    #[test]
    fn zero_radius_circle_rejected() {
        let c = ExactCircle::new(ExactPoint::new(rational(0, 1), rational(0, 1)), rational(0, 1));
        assert!(c.is_err());
    }

    #[test]
    fn degenerate_segment_rejected() {
        let p = ExactPoint::new(rational(1, 1), rational(1, 1));
        assert!(ExactSegment::new(p.clone(), p).is_err());
    }

    #[test]
    fn approx_roundtrips_simple_values() {
        let p = ExactPoint::from_f64(1.5, -2.25);
        let a = p.approx();
        assert!((a.x - 1.5).abs() < 1e-9);
        assert!((a.y + 2.25).abs() < 1e-9);
    }
}
