//! Circle-segment curve library: x-monotone curves, polylines/polygons built
//! from them, and conversion to a renderer-facing path.

pub mod polygon;
pub mod polygonset;
pub mod polyline;
pub mod render;
pub mod xmonotone;

pub use polygon::{circle_to_polygon, CSPolygon};
pub use polygonset::CSPolygonSet;
pub use polyline::CSPolyline;
pub use render::{render_path, RenderCommand, RenderPath};
pub use xmonotone::XMonotoneCurve;
