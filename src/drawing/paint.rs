//! Converts an annotated arrangement into a render-ready painting:
//! `spec.md` §6's "one filled path per bounded face ... one stroked path
//! per half-edge" output contract. Color *policy* stays the caller's
//! concern ([`crate::settings::DrawSettings`] only hands out per-category
//! slots); this module only decides *which* path gets *which* slot.

use crate::curve::{RenderCommand, RenderPath};
use crate::drawing::arrangement::{ArrHalfEdgeId, Arrangement};
use crate::drawing::dilate::DilatedPattern;
use crate::kernel::Point2;
use crate::pattern::CatPoint;

/// A single filled region: a bounded face's boundary, the category it
/// should be filled with (`None` when its origins disagree and no
/// stacking winner was decided), and the fill alpha.
#[derive(Debug, Clone)]
pub struct FilledFace {
    pub path: RenderPath,
    pub category: Option<u32>,
    /// `0..=255`; `150` for any face with more than one origin, matching
    /// `spec.md` §6's "overlap fills use alpha 150/255".
    pub alpha: u8,
}

/// A single stroked half-edge boundary, colored by its originating
/// pattern's category.
#[derive(Debug, Clone)]
pub struct StrokedEdge {
    pub path: RenderPath,
    pub category: u32,
}

/// The full set of paths a renderer needs to draw one computed drawing.
#[derive(Debug, Clone, Default)]
pub struct Painting {
    pub fills: Vec<FilledFace>,
    pub strokes: Vec<StrokedEdge>,
}

/// Builds the painting for an already-annotated `arrangement`, per
/// `spec.md` §6. `cutout_radius` is
/// `computeDrawingSettings.cutoutRadiusFactor * dilation_radius`
/// (`spec.md` §6): every overlap fill gets a small circular hole punched
/// around each categorical point that falls inside it, so the point stays
/// visible through the alpha-blended fill rather than being washed out.
#[must_use]
pub fn painting(arrangement: &Arrangement, dilated: &[DilatedPattern], points: &[CatPoint], cutout_radius: f64) -> Painting {
    let mut fills = Vec::new();
    for (face_id, face) in arrangement.bounded_faces() {
        let cycle = arrangement.face_vertices(face_id);
        if cycle.len() < 3 {
            continue;
        }
        let mut path = polyline_render_path(&cycle);
        let category = resolve_face_category(face, dilated);
        let alpha = if face.origins.len() > 1 { 150 } else { 255 };
        if alpha < 255 && cutout_radius > 0.0 {
            append_cutouts(&mut path, &cycle, points, cutout_radius);
        }
        fills.push(FilledFace { path, category, alpha });
    }

    let mut strokes = Vec::new();
    let mut seen: std::collections::HashSet<ArrHalfEdgeId> = std::collections::HashSet::new();
    for (id, he) in &arrangement.half_edges {
        if seen.contains(&id) || he.origins.is_empty() {
            continue;
        }
        seen.insert(id);
        seen.insert(he.twin);
        let a = arrangement.vertices[he.origin].position;
        let b = arrangement.vertices[he.target].position;
        let category = dilated
            .iter()
            .find(|dp| he.origins.contains(&dp.pattern_index))
            .map_or(0, |dp| dp.category);
        strokes.push(StrokedEdge {
            path: polyline_render_path(&[a, b]),
            category,
        });
    }

    Painting { fills, strokes }
}

/// The category to fill a face with: the single origin's category if
/// there is exactly one, `None` (painted gray by the caller) if multiple
/// origins exist without a decided stacking winner (every `Relation`'s
/// `ordering` is `0` in this implementation, so overlaps always fall back
/// to `None`), and `None` for an (unreachable in practice) empty origin
/// set.
#[must_use]
fn resolve_face_category(face: &crate::drawing::arrangement::ArrFace, dilated: &[DilatedPattern]) -> Option<u32> {
    match face.origins.as_slice() {
        [] => None,
        [single] => dilated.iter().find(|dp| dp.pattern_index == *single).map(|dp| dp.category),
        _ => face
            .relations
            .iter()
            .find(|r| r.ordering != 0)
            .map(|r| if r.ordering > 0 { r.left } else { r.right })
            .and_then(|winner| dilated.iter().find(|dp| dp.pattern_index == winner))
            .map(|dp| dp.category),
    }
}

/// Appends one circular-hole subpath (as a `MoveTo` + `ArcTo` pair tracing
/// the full circle) per point of `points` that lies inside `cycle`, so a
/// renderer filling `path` with an even-odd rule leaves each such point
/// uncovered.
fn append_cutouts(path: &mut RenderPath, cycle: &[Point2], points: &[CatPoint], cutout_radius: f64) {
    for point in points {
        let p = point.approx();
        if point_in_polygon(p, cycle) {
            path.commands.push(RenderCommand::MoveTo(Point2::new(p.x + cutout_radius, p.y)));
            path.commands.push(RenderCommand::ArcTo {
                center: p,
                radius: cutout_radius,
                counter_clockwise: true,
                target: Point2::new(p.x - cutout_radius, p.y),
            });
            path.commands.push(RenderCommand::ArcTo {
                center: p,
                radius: cutout_radius,
                counter_clockwise: true,
                target: Point2::new(p.x + cutout_radius, p.y),
            });
        }
    }
}

fn point_in_polygon(p: Point2, pts: &[Point2]) -> bool {
    let n = pts.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (pts[i], pts[j]);
        if (pi.y > p.y) != (pj.y > p.y) {
            let x_cross = pi.x + (p.y - pi.y) / (pj.y - pi.y) * (pj.x - pi.x);
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

fn polyline_render_path(pts: &[Point2]) -> RenderPath {
    let mut commands = Vec::with_capacity(pts.len());
    if let Some(&first) = pts.first() {
        commands.push(RenderCommand::MoveTo(first));
        for &p in &pts[1..] {
            commands.push(RenderCommand::LineTo(p));
        }
    }
    RenderPath { commands }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::curve::circle_to_polygon;
    use crate::drawing::arrangement::build;
    use crate::drawing::relation::annotate_relations;
    use crate::kernel::exact::{rational, ExactCircle, ExactPoint};

    fn disk(cx: f64, cy: f64, r: f64, index: usize, category: u32) -> DilatedPattern {
        let circle = ExactCircle::new(
            ExactPoint::from_f64(cx, cy),
            rational((r * r * 1_000_000.0) as i64, 1_000_000),
        )
        .unwrap();
        DilatedPattern {
            pattern_index: index,
            category,
            polygon: circle_to_polygon(&circle),
        }
    }

    #[test]
    fn single_disk_paints_one_opaque_fill() {
        let dilated = vec![disk(0.0, 0.0, 1.0, 0, 3)];
        let mut arr = build(&dilated);
        annotate_relations(&mut arr, &dilated);
        let painting = painting(&arr, &dilated, &[], 0.0);
        assert_eq!(painting.fills.len(), 1);
        assert_eq!(painting.fills[0].category, Some(3));
        assert_eq!(painting.fills[0].alpha, 255);
    }

    #[test]
    fn overlap_fill_falls_back_to_no_category_with_translucent_alpha() {
        let dilated = vec![disk(0.0, 0.0, 1.0, 0, 1), disk(1.0, 0.0, 1.0, 1, 2)];
        let mut arr = build(&dilated);
        annotate_relations(&mut arr, &dilated);
        let painting = painting(&arr, &dilated, &[], 0.0);
        let overlap = painting.fills.iter().find(|f| f.alpha == 150);
        assert!(overlap.is_some());
        assert_eq!(overlap.unwrap().category, None);
    }

    #[test]
    fn cutout_radius_punches_a_hole_around_a_point_in_an_overlap_fill() {
        use crate::kernel::exact::ExactPoint;
        use crate::pattern::CatPoint;

        let dilated = vec![disk(0.0, 0.0, 1.0, 0, 1), disk(1.0, 0.0, 1.0, 1, 2)];
        let mut arr = build(&dilated);
        annotate_relations(&mut arr, &dilated);
        let point_in_overlap = CatPoint::new(1, ExactPoint::from_f64(0.5, 0.0));
        let painting = painting(&arr, &dilated, &[point_in_overlap], 0.1);
        let overlap = painting.fills.iter().find(|f| f.alpha == 150).unwrap();
        let arc_count = overlap
            .path
            .commands
            .iter()
            .filter(|c| matches!(c, RenderCommand::ArcTo { .. }))
            .count();
        assert!(arc_count >= 2, "expected at least one cutout arc pair, found {arc_count}");
    }

    #[test]
    fn every_half_edge_produces_exactly_one_stroke() {
        let dilated = vec![disk(0.0, 0.0, 1.0, 0, 0)];
        let mut arr = build(&dilated);
        annotate_relations(&mut arr, &dilated);
        let painting = painting(&arr, &dilated, &[], 0.0);
        assert!(!painting.strokes.is_empty());
    }
}
