//! Geometry kernel: exact rational arithmetic, inexact floating-point
//! arithmetic, one-root algebraic numbers, and the predicates built on top
//! of them.

pub mod exact;
pub mod inexact;
pub mod oneroot;
pub mod predicates;

pub use exact::{ExactCircle, ExactNum, ExactPoint, ExactSegment, ExactVector};
pub use inexact::{Point2, Vector2, TOLERANCE};
pub use oneroot::{OneRootNumber, OneRootPoint};
pub use predicates::{BoundingBox, Orientation};
