/// Inexact 2D point, used for cheap approximate predicates and rendering.
pub type Point2 = nalgebra::Point2<f64>;

/// Inexact 2D vector.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global floating-point tolerance for inexact comparisons.
pub const TOLERANCE: f64 = 1e-9;
