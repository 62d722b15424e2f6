//! Approximate Minkowski offset engine: dilates polygons and polylines by a
//! disk radius, and computes the dilated convex hull of a point set.

pub mod convex_hull;
pub mod polygon_offset;
pub mod segment_offset;
pub mod tangent;

pub use convex_hull::{approximate_convex_hull, convex_hull, is_collinear};
pub use polygon_offset::offset_polygon;
pub use segment_offset::offset_segment;
