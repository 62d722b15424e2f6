use crate::curve::polygon::CSPolygon;
use crate::curve::xmonotone::XMonotoneCurve;
use crate::kernel::exact::rational_to_f64;
use crate::kernel::Point2;

/// One drawing command of a render path, in the convention of a
/// painter/canvas API (`moveTo`/`lineTo`/`arcTo`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderCommand {
    MoveTo(Point2),
    LineTo(Point2),
    ArcTo {
        center: Point2,
        radius: f64,
        /// `true` for counter-clockwise sweep from the current point to `target`.
        counter_clockwise: bool,
        target: Point2,
    },
}

/// A flattened sequence of render commands describing one boundary ring.
#[derive(Debug, Clone, Default)]
pub struct RenderPath {
    pub commands: Vec<RenderCommand>,
}

/// Converts a closed ring of x-monotone curves into a render path,
/// emitting one `MoveTo` followed by a `LineTo`/`ArcTo` per curve.
#[must_use]
pub fn render_path(polygon: &CSPolygon) -> RenderPath {
    let mut out = Vec::new();
    render_ring(&polygon.outer, &mut out);
    for hole in &polygon.holes {
        render_ring(hole, &mut out);
    }
    RenderPath { commands: out }
}

fn render_ring(ring: &crate::curve::polyline::CSPolyline, out: &mut Vec<RenderCommand>) {
    if ring.curves.is_empty() {
        return;
    }
    out.push(RenderCommand::MoveTo(ring.curves[0].source_approx()));
    for curve in &ring.curves {
        match curve {
            XMonotoneCurve::Segment { .. } => {
                out.push(RenderCommand::LineTo(curve.target_approx()));
            }
            XMonotoneCurve::Arc {
                circle,
                orientation,
                ..
            } => {
                let center = circle.center.approx();
                let radius = rational_to_f64(&circle.squared_radius).sqrt();
                out.push(RenderCommand::ArcTo {
                    center,
                    radius,
                    counter_clockwise: matches!(orientation, crate::kernel::Orientation::CounterClockwise),
                    target: curve.target_approx(),
                });
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::curve::polygon::circle_to_polygon;
    use crate::kernel::exact::{rational, ExactCircle, ExactPoint};

    #[test]
    fn circle_path_alternates_move_and_arcs() {
        let circle =
            ExactCircle::new(ExactPoint::new(rational(0, 1), rational(0, 1)), rational(1, 1)).unwrap();
        let poly = circle_to_polygon(&circle);
        let path = render_path(&poly);
        assert!(matches!(path.commands[0], RenderCommand::MoveTo(_)));
        assert!(path
            .commands
            .iter()
            .skip(1)
            .all(|c| matches!(c, RenderCommand::ArcTo { .. })));
    }
}
