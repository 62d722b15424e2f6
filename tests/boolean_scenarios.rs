#![allow(clippy::unwrap_used, clippy::expect_used)]

//! `spec.md` §8 scenarios S3-S5: polyline/polygon boolean operations over
//! the circle-segment domain.

use simplesets::boolean::{poly_line_gon_difference, poly_line_gon_intersection};
use simplesets::curve::{circle_to_polygon, CSPolygon, CSPolyline, XMonotoneCurve};
use simplesets::kernel::exact::{rational, ExactCircle, ExactPoint};
use simplesets::kernel::oneroot::OneRootPoint;

fn p(x: f64, y: f64) -> OneRootPoint {
    OneRootPoint::from_exact(&ExactPoint::from_f64(x, y))
}

fn unit_disk() -> CSPolygon {
    let circle = ExactCircle::new(ExactPoint::from_f64(0.0, 0.0), rational(1, 1)).expect("unit radius is non-zero");
    circle_to_polygon(&circle)
}

fn rectangle(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> CSPolygon {
    let curves = vec![
        XMonotoneCurve::segment(p(x_min, y_min), p(x_max, y_min)),
        XMonotoneCurve::segment(p(x_max, y_min), p(x_max, y_max)),
        XMonotoneCurve::segment(p(x_max, y_max), p(x_min, y_max)),
        XMonotoneCurve::segment(p(x_min, y_max), p(x_min, y_min)),
    ];
    CSPolygon::new(CSPolyline::new(curves))
}

/// S3: a horizontal segment from `(-2,0)` to `(2,0)` intersected with the
/// unit disk at the origin returns one polyline from `(-1,0)` to `(1,0)`.
#[test]
fn s3_segment_through_unit_disk_clips_to_the_chord() {
    let line = CSPolyline::new(vec![XMonotoneCurve::segment(p(-2.0, 0.0), p(2.0, 0.0))]);
    let result = poly_line_gon_intersection(&unit_disk(), &line, false);

    assert_eq!(result.len(), 1, "expected exactly one clipped polyline, got {result:?}");
    let samples = result[0].sample(2);
    let first = samples.first().expect("non-empty polyline");
    let last = samples.last().expect("non-empty polyline");
    assert!((first.x.abs() - 1.0).abs() < 0.05, "start x={}", first.x);
    assert!((last.x.abs() - 1.0).abs() < 0.05, "end x={}", last.x);
    assert!(first.x < 0.0 && last.x > 0.0 || first.x > 0.0 && last.x < 0.0);
}

/// S4: segment `(-2,0)-(2,0)` exactly coincides with the bottom edge of
/// rectangle `[-4,4]x[0,2]`. The intersection is empty unless `keep_overlap`,
/// in which case it returns the full segment.
#[test]
fn s4_segment_on_rectangle_boundary_needs_keep_overlap() {
    let line = CSPolyline::new(vec![XMonotoneCurve::segment(p(-2.0, 0.0), p(2.0, 0.0))]);
    let rect = rectangle(-4.0, 4.0, 0.0, 2.0);

    let without_overlap = poly_line_gon_intersection(&rect, &line, false);
    assert!(without_overlap.is_empty(), "boundary-only overlap must be empty without keep_overlap");

    let with_overlap = poly_line_gon_intersection(&rect, &line, true);
    assert_eq!(with_overlap.len(), 1);
    let samples = with_overlap[0].sample(2);
    let first = samples.first().expect("non-empty polyline");
    let last = samples.last().expect("non-empty polyline");
    assert!((first.x + 2.0).abs() < 0.05);
    assert!((last.x - 2.0).abs() < 0.05);
}

/// S5: a zig-zag polyline dips into the unit disk, comes back out, and dips
/// in again, producing two separate intersection components rather than one
/// (the disk is crossed four times, not twice).
#[test]
fn s5_zigzag_through_unit_disk_yields_two_components() {
    let vertices = [
        (-2.0, 0.0),
        (-0.3, 0.3),
        (0.0, 1.5),
        (0.3, 0.3),
        (2.0, 0.0),
    ];
    let curves = vertices
        .windows(2)
        .map(|w| XMonotoneCurve::segment(p(w[0].0, w[0].1), p(w[1].0, w[1].1)))
        .collect();
    let line = CSPolyline::new(curves);

    let result = poly_line_gon_intersection(&unit_disk(), &line, false);
    assert_eq!(result.len(), 2, "expected two separate interior excursions, got {result:?}");
}

/// The difference counterpart of S5: outside the disk, the same zig-zag
/// yields three exterior components (before, between, after the two dips).
#[test]
fn s5_zigzag_difference_yields_three_components() {
    let vertices = [
        (-2.0, 0.0),
        (-0.3, 0.3),
        (0.0, 1.5),
        (0.3, 0.3),
        (2.0, 0.0),
    ];
    let curves = vertices
        .windows(2)
        .map(|w| XMonotoneCurve::segment(p(w[0].0, w[0].1), p(w[1].0, w[1].1)))
        .collect();
    let line = CSPolyline::new(curves);

    let result = poly_line_gon_difference(&unit_disk(), &line, false);
    assert_eq!(result.len(), 3, "expected three exterior runs, got {result:?}");
}
