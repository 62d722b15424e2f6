//! A planar subdivision built from the boundaries of a set of dilated
//! patterns, with per-face origin data and per-half-edge origin tags.
//!
//! The original (`CGAL::Arrangement_with_history_2`) attaches a
//! `MyObserver` to the arrangement that records, for every half-edge, which
//! input curve induced it (propagating the tag through every split). This
//! module realizes that declaratively (per Design Note in `spec.md` §9):
//! every dilated polygon's boundary is flattened into straight sub-segments
//! (arcs are already approximated this way throughout the crate, e.g.
//! [`crate::curve::XMonotoneCurve::sample`]), each segment is tagged with
//! its originating pattern index before insertion, segments are split
//! pairwise at their crossings, and the resulting edges carry the union of
//! the tags of every segment that induced them. Face cycles are then
//! recovered with the standard half-edge "next = clockwise neighbor of the
//! twin" construction (de Berg et al., *Computational Geometry*, §2.2).

use std::collections::HashMap;

use slotmap::SlotMap;

use crate::drawing::dilate::DilatedPattern;
use crate::kernel::Point2;

slotmap::new_key_type! {
    /// Identifies a vertex of the arrangement.
    pub struct ArrVertexId;
    /// Identifies one directed half-edge of the arrangement.
    pub struct ArrHalfEdgeId;
    /// Identifies one face of the arrangement (bounded or unbounded).
    pub struct ArrFaceId;
}

/// A vertex of the arrangement: a point shared by one or more curve
/// endpoints or crossings.
#[derive(Debug, Clone)]
pub struct ArrVertex {
    pub position: Point2,
    /// Half-edges starting here, sorted by outgoing angle (ascending,
    /// `atan2` convention).
    pub outgoing: Vec<ArrHalfEdgeId>,
}

/// One directed half-edge. Half-edges always come in twin pairs pointing in
/// opposite directions along the same underlying segment.
#[derive(Debug, Clone)]
pub struct ArrHalfEdge {
    pub origin: ArrVertexId,
    pub target: ArrVertexId,
    pub twin: ArrHalfEdgeId,
    pub next: ArrHalfEdgeId,
    pub prev: ArrHalfEdgeId,
    pub face: Option<ArrFaceId>,
    /// Indices (into the [`DilatedPattern`] slice) of every dilated pattern
    /// whose boundary, traversed in *this* direction, induced this
    /// half-edge. Usually a single element; more than one only when two
    /// patterns' boundaries coincide exactly (the original's noted
    /// "todo: edge case where edges of dilated patterns overlap").
    pub origins: Vec<usize>,
}

/// One face of the arrangement: either a bounded region (`is_outer ==
/// false`) or an unbounded component of the plane's complement.
#[derive(Debug, Clone)]
pub struct ArrFace {
    pub half_edge: ArrHalfEdgeId,
    pub is_outer: bool,
    /// Sorted, deduplicated indices of every dilated pattern whose
    /// interior contains this face's interior sample point. Empty for
    /// faces outside every dilated pattern.
    pub origins: Vec<usize>,
    pub relations: Vec<crate::drawing::relation::Relation>,
}

/// The arrangement: vertices, half-edges and faces built from a set of
/// dilated pattern boundaries.
#[derive(Debug, Default)]
pub struct Arrangement {
    pub vertices: SlotMap<ArrVertexId, ArrVertex>,
    pub half_edges: SlotMap<ArrHalfEdgeId, ArrHalfEdge>,
    pub faces: SlotMap<ArrFaceId, ArrFace>,
}

impl Arrangement {
    /// Every bounded face, i.e. every face with `is_outer == false`.
    pub fn bounded_faces(&self) -> impl Iterator<Item = (ArrFaceId, &ArrFace)> {
        self.faces.iter().filter(|(_, f)| !f.is_outer)
    }

    /// The vertices of a face's boundary cycle, in traversal order.
    #[must_use]
    pub fn face_vertices(&self, face: ArrFaceId) -> Vec<Point2> {
        let Some(f) = self.faces.get(face) else { return Vec::new() };
        let start = f.half_edge;
        let mut out = Vec::new();
        let mut cur = start;
        loop {
            let he = &self.half_edges[cur];
            out.push(self.vertices[he.origin].position);
            cur = he.next;
            if cur == start {
                break;
            }
        }
        out
    }

    /// Twin of a half-edge's neighboring face across the twin edge, used
    /// for face-adjacency walks (e.g. intersection-component enumeration).
    #[must_use]
    pub fn neighbor_face(&self, he: ArrHalfEdgeId) -> Option<ArrFaceId> {
        self.half_edges[self.half_edges[he].twin].face
    }

    /// All half-edges bounding a face, in cycle order.
    #[must_use]
    pub fn face_half_edges(&self, face: ArrFaceId) -> Vec<ArrHalfEdgeId> {
        let Some(f) = self.faces.get(face) else { return Vec::new() };
        let start = f.half_edge;
        let mut out = Vec::new();
        let mut cur = start;
        loop {
            out.push(cur);
            cur = self.half_edges[cur].next;
            if cur == start {
                break;
            }
        }
        out
    }
}

const MERGE_TOLERANCE: f64 = 1e-6;
const SAMPLES_PER_CURVE: usize = 10;

/// A directed straight sub-segment tagged with the pattern it came from,
/// before vertex merging and twin-edge construction.
struct TaggedSegment {
    a: Point2,
    b: Point2,
    pattern_index: usize,
}

/// Builds the arrangement induced by the union of every dilated pattern's
/// boundary curves, per `spec.md` §4.F steps 1-4.
#[must_use]
pub fn build(dilated: &[DilatedPattern]) -> Arrangement {
    let raw = flatten_boundaries(dilated);
    let raw = split_all_crossings(raw);

    let mut arr = Arrangement::default();
    let mut vertex_lookup: HashMap<(i64, i64), ArrVertexId> = HashMap::new();
    let vkey = |p: Point2| {
        (
            (p.x / MERGE_TOLERANCE).round() as i64,
            (p.y / MERGE_TOLERANCE).round() as i64,
        )
    };
    let mut vertex_of = |arr: &mut Arrangement, p: Point2| -> ArrVertexId {
        *vertex_lookup.entry(vkey(p)).or_insert_with(|| {
            arr.vertices.insert(ArrVertex {
                position: p,
                outgoing: Vec::new(),
            })
        })
    };

    // Accumulate origin tags per directed vertex pair, merging segments
    // that traverse the exact same directed edge (the overlap edge case).
    let mut directed: HashMap<(ArrVertexId, ArrVertexId), Vec<usize>> = HashMap::new();
    for seg in &raw {
        let u = vertex_of(&mut arr, seg.a);
        let v = vertex_of(&mut arr, seg.b);
        if u == v {
            continue;
        }
        directed.entry((u, v)).or_default().push(seg.pattern_index);
    }

    // Build one twin pair per undirected edge that appears in either
    // direction.
    let mut seen_undirected: std::collections::HashSet<(ArrVertexId, ArrVertexId)> = std::collections::HashSet::new();
    let pairs: Vec<(ArrVertexId, ArrVertexId)> = directed.keys().copied().collect();
    for (u, v) in pairs {
        let key = if u.cmp_key() <= v.cmp_key() { (u, v) } else { (v, u) };
        if !seen_undirected.insert(key) {
            continue;
        }
        let fwd = directed.get(&(u, v)).cloned().unwrap_or_default();
        let bwd = directed.get(&(v, u)).cloned().unwrap_or_default();

        let he_uv = arr.half_edges.insert(ArrHalfEdge {
            origin: u,
            target: v,
            twin: ArrHalfEdgeId::default(),
            next: ArrHalfEdgeId::default(),
            prev: ArrHalfEdgeId::default(),
            face: None,
            origins: fwd,
        });
        let he_vu = arr.half_edges.insert(ArrHalfEdge {
            origin: v,
            target: u,
            twin: he_uv,
            next: ArrHalfEdgeId::default(),
            prev: ArrHalfEdgeId::default(),
            face: None,
            origins: bwd,
        });
        arr.half_edges[he_uv].twin = he_vu;
        arr.vertices[u].outgoing.push(he_uv);
        arr.vertices[v].outgoing.push(he_vu);
    }

    sort_outgoing_by_angle(&mut arr);
    link_next_prev(&mut arr);
    build_faces(&mut arr);
    arr
}

/// Flattens every dilated pattern's outer boundary (dilated patterns never
/// have holes) into directed straight sub-segments tagged with the
/// pattern's index, matching the boundary's own CCW orientation.
fn flatten_boundaries(dilated: &[DilatedPattern]) -> Vec<TaggedSegment> {
    let mut out = Vec::new();
    for dp in dilated {
        let pts = dp.polygon.outer.sample(SAMPLES_PER_CURVE);
        if pts.len() < 2 {
            continue;
        }
        let n = pts.len();
        for i in 0..n {
            let a = pts[i];
            let b = pts[(i + 1) % n];
            if nalgebra::distance(&a, &b) > MERGE_TOLERANCE {
                out.push(TaggedSegment {
                    a,
                    b,
                    pattern_index: dp.pattern_index,
                });
            }
        }
    }
    out
}

/// Splits every pair of non-adjacent segments at their crossing point,
/// matching the arrangement-insertion step that would otherwise happen
/// inside CGAL's `insert`.
fn split_all_crossings(segments: Vec<TaggedSegment>) -> Vec<TaggedSegment> {
    let n = segments.len();
    let mut cut_params: Vec<Vec<f64>> = vec![Vec::new(); n];
    for i in 0..n {
        for j in (i + 1)..n {
            if let Some((t, u)) = segment_intersection_params(segments[i].a, segments[i].b, segments[j].a, segments[j].b) {
                if (1e-9..=1.0 - 1e-9).contains(&t) {
                    cut_params[i].push(t);
                }
                if (1e-9..=1.0 - 1e-9).contains(&u) {
                    cut_params[j].push(u);
                }
            }
        }
    }

    let mut out = Vec::with_capacity(n * 2);
    for (seg, params) in segments.into_iter().zip(cut_params.into_iter()) {
        if params.is_empty() {
            out.push(seg);
            continue;
        }
        let mut ts = params;
        ts.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        ts.insert(0, 0.0);
        ts.push(1.0);
        let lerp = |t: f64| Point2::new(seg.a.x + (seg.b.x - seg.a.x) * t, seg.a.y + (seg.b.y - seg.a.y) * t);
        for w in ts.windows(2) {
            let a = lerp(w[0]);
            let b = lerp(w[1]);
            if nalgebra::distance(&a, &b) > MERGE_TOLERANCE {
                out.push(TaggedSegment {
                    a,
                    b,
                    pattern_index: seg.pattern_index,
                });
            }
        }
    }
    out
}

/// Returns `(t, u)` such that `a0 + t*(a1-a0) == b0 + u*(b1-b0)`, if the
/// segments are not parallel.
fn segment_intersection_params(a0: Point2, a1: Point2, b0: Point2, b1: Point2) -> Option<(f64, f64)> {
    let d1 = a1 - a0;
    let d2 = b1 - b0;
    let denom = d1.x * d2.y - d1.y * d2.x;
    if denom.abs() < 1e-12 {
        return None;
    }
    let diff = b0 - a0;
    let t = (diff.x * d2.y - diff.y * d2.x) / denom;
    let u = (diff.x * d1.y - diff.y * d1.x) / denom;
    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some((t, u))
    } else {
        None
    }
}

fn sort_outgoing_by_angle(arr: &mut Arrangement) {
    let ids: Vec<ArrVertexId> = arr.vertices.keys().collect();
    for id in ids {
        let origin = arr.vertices[id].position;
        let targets: Vec<Point2> = arr.vertices[id]
            .outgoing
            .iter()
            .map(|&he| arr.vertices[arr.half_edges[he].target].position)
            .collect();
        let mut indexed: Vec<usize> = (0..targets.len()).collect();
        indexed.sort_by(|&i, &j| {
            let angle = |p: Point2| (p.y - origin.y).atan2(p.x - origin.x);
            angle(targets[i])
                .partial_cmp(&angle(targets[j]))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let reordered: Vec<ArrHalfEdgeId> = indexed.iter().map(|&i| arr.vertices[id].outgoing[i]).collect();
        arr.vertices[id].outgoing = reordered;
    }
}

/// Sets `next`/`prev` for every half-edge via the standard construction:
/// `next(h)` is the outgoing edge at `h`'s target immediately clockwise
/// from `twin(h)` in the angularly-sorted order around that vertex.
fn link_next_prev(arr: &mut Arrangement) {
    let ids: Vec<ArrHalfEdgeId> = arr.half_edges.keys().collect();
    for he_id in ids {
        let twin = arr.half_edges[he_id].twin;
        let v = arr.half_edges[he_id].target;
        let outgoing = &arr.vertices[v].outgoing;
        let pos = outgoing.iter().position(|&h| h == twin).unwrap_or(0);
        let prev_index = (pos + outgoing.len() - 1) % outgoing.len();
        let next_he = outgoing[prev_index];
        arr.half_edges[he_id].next = next_he;
        arr.half_edges[next_he].prev = he_id;
    }
}

/// Walks every half-edge cycle to recover faces, classifying each as
/// bounded (positive shoelace area, CCW) or unbounded/outer (non-positive
/// area), per `spec.md` §3's Arrangement invariants.
fn build_faces(arr: &mut Arrangement) {
    let ids: Vec<ArrHalfEdgeId> = arr.half_edges.keys().collect();
    let mut visited: std::collections::HashSet<ArrHalfEdgeId> = std::collections::HashSet::new();
    for start in ids {
        if visited.contains(&start) {
            continue;
        }
        let mut cycle = Vec::new();
        let mut cur = start;
        loop {
            visited.insert(cur);
            cycle.push(cur);
            cur = arr.half_edges[cur].next;
            if cur == start {
                break;
            }
        }
        let pts: Vec<Point2> = cycle.iter().map(|&h| arr.vertices[arr.half_edges[h].origin].position).collect();
        let area = shoelace(&pts);
        let is_outer = area <= 1e-12;
        let face_id = arr.faces.insert(ArrFace {
            half_edge: start,
            is_outer,
            origins: Vec::new(),
            relations: Vec::new(),
        });
        for &h in &cycle {
            arr.half_edges[h].face = Some(face_id);
        }
    }
}

fn shoelace(pts: &[Point2]) -> f64 {
    let n = pts.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let a = pts[i];
        let b = pts[(i + 1) % n];
        sum += a.x * b.y - b.x * a.y;
    }
    sum * 0.5
}

trait CmpKey {
    fn cmp_key(&self) -> u64;
}
impl CmpKey for ArrVertexId {
    fn cmp_key(&self) -> u64 {
        use slotmap::Key;
        self.data().as_ffi()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::curve::circle_to_polygon;
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
    fn single_disk_has_one_bounded_face() {
        let dilated = vec![disk(0.0, 0.0, 1.0, 0, 0)];
        let arr = build(&dilated);
        let bounded: Vec<_> = arr.bounded_faces().collect();
        assert_eq!(bounded.len(), 1);
    }

    #[test]
    fn two_disjoint_disks_have_two_bounded_faces() {
        let dilated = vec![disk(0.0, 0.0, 1.0, 0, 0), disk(10.0, 0.0, 1.0, 1, 0)];
        let arr = build(&dilated);
        assert_eq!(arr.bounded_faces().count(), 2);
    }

    #[test]
    fn overlapping_disks_produce_more_than_two_bounded_faces() {
        let dilated = vec![disk(0.0, 0.0, 1.0, 0, 0), disk(1.0, 0.0, 1.0, 1, 0)];
        let arr = build(&dilated);
        // Two lens tips plus the shared lens region.
        assert!(arr.bounded_faces().count() >= 3, "got {}", arr.bounded_faces().count());
    }
}
