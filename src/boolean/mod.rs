//! Polyline/polygon Boolean operations: `spec.md` §4.G.
//!
//! Grounded on `poly_line_gon_intersection.h`'s arrangement-based algorithm:
//! overlay the polyline and the polygon's boundary, classify each resulting
//! polyline edge as lying on the polygon's boundary, inside it, or outside
//! it, keep the edges the requested operation wants, then walk the kept
//! edges in polyline order and stitch each maximal run into one output
//! polyline.
//!
//! The original builds a full `CGAL::Arrangement_with_history_2` over both
//! inputs and tags half-edges with their originating curve. This module
//! specializes that to the one-sided case it is always used for here (split
//! only the *polyline* at its crossings with the polygon, never the polygon
//! against itself): every curve is flattened to straight samples first, as
//! [`crate::drawing::arrangement`] already does for the same reason, so
//! splitting is an ordinary pairwise segment-intersection pass rather than a
//! full arrangement build.

mod overlay;

use crate::curve::polygon::CSPolygon;
use crate::curve::polyline::CSPolyline;
use crate::curve::xmonotone::XMonotoneCurve;
use crate::kernel::exact::ExactPoint;
use crate::kernel::oneroot::OneRootPoint;
use crate::kernel::Point2;

use overlay::{classify_edges, Classification};

const BOUNDARY_TOLERANCE: f64 = 1e-6;
const SAMPLES_PER_CURVE: usize = 16;

/// The sub-polylines of `line` that lie inside `gon` (or, with
/// `keep_overlap`, also the parts that run exactly along its boundary).
///
/// Mirrors `poly_line_gon_intersection(const CSPolygon&, const CSPolyline&, bool)`.
#[must_use]
pub fn poly_line_gon_intersection(gon: &CSPolygon, line: &CSPolyline, keep_overlap: bool) -> Vec<CSPolyline> {
    run(gon, line, keep_overlap, false)
}

/// The sub-polylines of `line` that lie outside `gon` (or, with
/// `keep_overlap`, also the parts that run exactly along its boundary).
///
/// Mirrors `poly_line_gon_difference(const CSPolygon&, const CSPolyline&, bool)`.
#[must_use]
pub fn poly_line_gon_difference(gon: &CSPolygon, line: &CSPolyline, keep_overlap: bool) -> Vec<CSPolyline> {
    run(gon, line, keep_overlap, true)
}

fn run(gon: &CSPolygon, line: &CSPolyline, keep_overlap: bool, difference: bool) -> Vec<CSPolyline> {
    if line.is_empty() {
        return Vec::new();
    }
    let mut samples = flatten(line);
    if samples.len() < 2 {
        return Vec::new();
    }
    let classified = classify_edges(gon, &mut samples, BOUNDARY_TOLERANCE);
    stitch(&samples, &classified, keep_overlap, difference)
}

fn flatten(line: &CSPolyline) -> Vec<Point2> {
    line.sample(SAMPLES_PER_CURVE)
}

/// Groups consecutive polyline edges that the requested operation keeps
/// into maximal runs, each emitted as one straight-segment `CSPolyline`,
/// matching the original's `line_edges_keep` walk.
fn stitch(samples: &[Point2], classified: &[Classification], keep_overlap: bool, difference: bool) -> Vec<CSPolyline> {
    let keep = |c: Classification| match c {
        Classification::OnBoundary => keep_overlap,
        Classification::Inside => !difference,
        Classification::Outside => difference,
    };

    let mut out = Vec::new();
    let mut run_start: Option<usize> = None;
    for (i, &c) in classified.iter().enumerate() {
        if keep(c) {
            if run_start.is_none() {
                run_start = Some(i);
            }
        } else if let Some(start) = run_start.take() {
            out.push(polyline_from_run(samples, start, i));
        }
    }
    if let Some(start) = run_start {
        out.push(polyline_from_run(samples, start, classified.len()));
    }
    out
}

fn polyline_from_run(samples: &[Point2], start: usize, end: usize) -> CSPolyline {
    let mut curves = Vec::with_capacity(end - start);
    for i in start..end {
        let a = OneRootPoint::from_exact(&ExactPoint::from_f64(samples[i].x, samples[i].y));
        let b = OneRootPoint::from_exact(&ExactPoint::from_f64(samples[i + 1].x, samples[i + 1].y));
        curves.push(XMonotoneCurve::segment(a, b));
    }
    CSPolyline::new(curves)
}
