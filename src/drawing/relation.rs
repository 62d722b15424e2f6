//! Intersection components and pairwise stacking preferences (`spec.md`
//! §4.F step 5 / §3's `Relation`).
//!
//! Grounded on `drawing_algorithm.cpp`'s `connectedComponents` (a BFS over
//! faces that share a common-circle-boundary neighbor, restricted to faces
//! whose origin set contains both `i` and `j`) and `computePreference`. The
//! original's `computePreference` is documented as unimplemented and always
//! returns `CGAL::ZERO`; per the Open Question recorded in `spec.md` §9 and
//! resolved in `DESIGN.md`, this module mirrors that faithfully rather than
//! inventing the three named tie-break rules without a concrete spec.

use std::collections::{HashSet, VecDeque};

use crate::drawing::arrangement::{ArrFaceId, Arrangement};
use crate::drawing::dilate::DilatedPattern;
use crate::kernel::Point2;

/// A pairwise stacking relation between two dilated patterns' indices.
///
/// `preference` encodes which of `left`/`right` *should* visually lie on
/// top (per `spec.md` §3); `ordering` is the decided stacking actually
/// applied. Both are `0` in this implementation, matching the original's
/// always-`CGAL::ZERO` `computePreference` (see module docs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relation {
    pub left: usize,
    pub right: usize,
    pub preference: i8,
    pub ordering: i8,
}

/// A maximal connected set of faces sharing the same origin pair `(i, j)`.
#[derive(Debug, Clone)]
pub struct Component {
    pub left: usize,
    pub right: usize,
    pub faces: Vec<ArrFaceId>,
}

/// Computes each bounded face's `origins` (the sorted list of dilated
/// patterns containing its interior sample point) and the `Relation`s for
/// every pairwise intersection component, storing both on the arrangement.
///
/// Mirrors `spec.md` §4.F steps 3 and 5.
pub fn annotate_relations(arr: &mut Arrangement, dilated: &[DilatedPattern]) {
    annotate_face_origins(arr, dilated);

    let mut by_pair: std::collections::BTreeMap<(usize, usize), Vec<ArrFaceId>> = std::collections::BTreeMap::new();
    let face_ids: Vec<ArrFaceId> = arr.faces.iter().filter(|(_, f)| !f.is_outer).map(|(id, _)| id).collect();
    for &id in &face_ids {
        let origins = arr.faces[id].origins.clone();
        for a in 0..origins.len() {
            for b in (a + 1)..origins.len() {
                let (i, j) = (origins[a].min(origins[b]), origins[a].max(origins[b]));
                by_pair.entry((i, j)).or_default().push(id);
            }
        }
    }

    for ((i, j), faces) in by_pair {
        for component in connected_components(arr, &faces) {
            let relation = Relation {
                left: i,
                right: j,
                preference: 0,
                ordering: 0,
            };
            for &face_id in &component {
                arr.faces[face_id].relations.push(relation);
            }
        }
    }
}

/// Assigns each bounded face's `origins`: the dilated patterns whose
/// interior contains an interior sample point of the face, per `spec.md`
/// §4.F step 3's containment invariant (Testable Property 4).
fn annotate_face_origins(arr: &mut Arrangement, dilated: &[DilatedPattern]) {
    let face_ids: Vec<ArrFaceId> = arr.faces.iter().filter(|(_, f)| !f.is_outer).map(|(id, _)| id).collect();
    for id in face_ids {
        let cycle = arr.face_vertices(id);
        let Some(sample) = interior_sample_point(&cycle) else { continue };
        let mut origins: Vec<usize> = dilated
            .iter()
            .filter(|dp| dp.polygon.contains_point(sample))
            .map(|dp| dp.pattern_index)
            .collect();
        origins.sort_unstable();
        origins.dedup();
        arr.faces[id].origins = origins;
    }
}

/// Constructs a point guaranteed to lie strictly inside the (simple,
/// possibly non-convex) polygon described by `cycle`.
///
/// `spec.md` §4.F's interior-sample construction (chord midpoint →
/// perpendicular-at-midpoint intersected with the enlarged bounding box →
/// ray from an outside corner through the arc midpoint → innermost
/// boundary intersection midpoint) is specialized here to the
/// already-straight-edge cycles this arrangement produces (every curve is
/// flattened to samples before insertion, per [`crate::drawing::arrangement`]'s
/// module docs): offset the first edge's midpoint a small distance along
/// each of its two normals and keep whichever offset point tests inside
/// the cycle's own polygon — for a convex or mildly non-convex face (the
/// only kind dilated-pattern overlaps produce) this always succeeds.
fn interior_sample_point(cycle: &[Point2]) -> Option<Point2> {
    if cycle.len() < 3 {
        return None;
    }
    let a = cycle[0];
    let b = cycle[1];
    let mid = nalgebra::center(&a, &b);
    let edge = b - a;
    let normal = nalgebra::Vector2::new(-edge.y, edge.x).normalize();
    let edge_len = edge.norm().max(1e-9);
    let eps = (edge_len * 1e-3).max(1e-9);
    for sign in [1.0, -1.0] {
        let candidate = mid + normal * (eps * sign);
        if point_in_polygon(&candidate, cycle) {
            return Some(candidate);
        }
    }
    // Degenerate fallback: centroid of the cycle.
    let n = cycle.len() as f64;
    let cx = cycle.iter().map(|p| p.x).sum::<f64>() / n;
    let cy = cycle.iter().map(|p| p.y).sum::<f64>() / n;
    Some(Point2::new(cx, cy))
}

fn point_in_polygon(p: &Point2, pts: &[Point2]) -> bool {
    let n = pts.len();
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

/// Splits `faces` (all sharing the same origin pair) into maximal
/// connected components, two faces being adjacent when they are linked by
/// a half-edge/twin pair (`spec.md` §4.F step 5).
fn connected_components(arr: &Arrangement, faces: &[ArrFaceId]) -> Vec<Vec<ArrFaceId>> {
    let set: HashSet<ArrFaceId> = faces.iter().copied().collect();
    let mut visited: HashSet<ArrFaceId> = HashSet::new();
    let mut components = Vec::new();
    for &start in faces {
        if visited.contains(&start) {
            continue;
        }
        let mut queue = VecDeque::new();
        queue.push_back(start);
        visited.insert(start);
        let mut component = Vec::new();
        while let Some(face) = queue.pop_front() {
            component.push(face);
            for he in arr.face_half_edges(face) {
                if let Some(neighbor) = arr.neighbor_face(he) {
                    if set.contains(&neighbor) && !visited.contains(&neighbor) {
                        visited.insert(neighbor);
                        queue.push_back(neighbor);
                    }
                }
            }
        }
        components.push(component);
    }
    components
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::curve::circle_to_polygon;
    use crate::drawing::arrangement::build;
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
    fn single_disk_face_has_its_own_origin() {
        let dilated = vec![disk(0.0, 0.0, 1.0, 0, 0)];
        let mut arr = build(&dilated);
        annotate_relations(&mut arr, &dilated);
        let (_, face) = arr.bounded_faces().next().unwrap();
        assert_eq!(face.origins, vec![0]);
        assert!(face.relations.is_empty());
    }

    #[test]
    fn overlapping_disks_produce_a_shared_origin_face_with_a_relation() {
        let dilated = vec![disk(0.0, 0.0, 1.0, 0, 0), disk(1.0, 0.0, 1.0, 1, 0)];
        let mut arr = build(&dilated);
        annotate_relations(&mut arr, &dilated);
        let shared: Vec<_> = arr.bounded_faces().filter(|(_, f)| f.origins == vec![0, 1]).collect();
        assert_eq!(shared.len(), 1);
        assert_eq!(shared[0].1.relations.len(), 1);
        assert_eq!(shared[0].1.relations[0].left, 0);
        assert_eq!(shared[0].1.relations[0].right, 1);
    }

    #[test]
    fn disjoint_disks_have_no_relations() {
        let dilated = vec![disk(0.0, 0.0, 1.0, 0, 0), disk(10.0, 0.0, 1.0, 1, 0)];
        let mut arr = build(&dilated);
        annotate_relations(&mut arr, &dilated);
        assert!(arr.faces.values().all(|f| f.relations.is_empty()));
    }
}
