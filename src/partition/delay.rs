use crate::curve::CSPolygon;
use crate::kernel::Point2;

/// Approximate area of intersection between a dilated pattern and a disk of
/// radius `radius` centered at `center`, by grid quadrature over the disk's
/// bounding box. Used in place of exact polygon-polygon intersection (the
/// `boolean` module's job) since the partition engine only needs this one
/// aggregate quantity, not the intersection shape itself.
fn area_intersect_disk(poly: &CSPolygon, center: Point2, radius: f64, grid: usize) -> f64 {
    let cell = (2.0 * radius) / grid as f64;
    let mut hits = 0usize;
    for i in 0..grid {
        for j in 0..grid {
            let x = center.x - radius + cell * (i as f64 + 0.5);
            let y = center.y - radius + cell * (j as f64 + 0.5);
            let p = Point2::new(x, y);
            if nalgebra::distance(&p, &center) <= radius && poly.contains_point(p) {
                hits += 1;
            }
        }
    }
    hits as f64 * cell * cell
}

/// The "intersection delay" of merging two source patterns into `result`:
/// how much extraneous area the merged, dilated shape newly covers around
/// nearby points that belong to neither source pattern.
///
/// Grounded on `intersectionDelay` in `partition_algorithm.cpp`: dilate
/// `result` and both sources by `dilation_radius`, dilate a
/// `dilation_radius` disk around each nearby extraneous point, and take
/// `sqrt(excess_area / pi)` where
/// `excess_area = area(result ∩ point_disk) − area(source1 ∩ point_disk) − area(source2 ∩ point_disk)`.
#[must_use]
pub fn intersection_delay(
    result: &CSPolygon,
    source1: &CSPolygon,
    source2: &CSPolygon,
    nearby_points: &[Point2],
    dilation_radius: f64,
) -> f64 {
    let mut excess = 0.0_f64;
    for &point in nearby_points {
        let result_area = area_intersect_disk(result, point, dilation_radius, 12);
        let s1_area = area_intersect_disk(source1, point, dilation_radius, 12);
        let s2_area = area_intersect_disk(source2, point, dilation_radius, 12);
        excess += (result_area - s1_area - s2_area).max(0.0);
    }
    (excess / std::f64::consts::PI).max(0.0).sqrt()
}

/// The "regularity delay" of a candidate merge: how much worse the
/// candidate's cover radius is than the better of its two sources'.
///
/// Grounded on the `regDelay` computation inlined at both the island and
/// bank candidate-generation sites in `partition_algorithm.cpp`:
/// `candidate.coverRadius() - max(source1.coverRadius(), source2.coverRadius())`,
/// floored at zero (a candidate no worse than its sources is not delayed).
#[must_use]
pub fn regularity_delay(candidate_cover_radius: f64, source1_cover_radius: f64, source2_cover_radius: f64) -> f64 {
    (candidate_cover_radius - source1_cover_radius.max(source2_cover_radius)).max(0.0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::curve::circle_to_polygon;
    use crate::kernel::exact::{rational, ExactCircle, ExactPoint};

    #[test]
    fn intersection_delay_is_zero_with_no_nearby_points() {
        let circle = ExactCircle::new(ExactPoint::new(rational(0, 1), rational(0, 1)), rational(1, 1)).unwrap();
        let poly = circle_to_polygon(&circle);
        let d = intersection_delay(&poly, &poly, &poly, &[], 0.5);
        assert!((d).abs() < 1e-9);
    }

    #[test]
    fn regularity_delay_floors_at_zero() {
        assert!((regularity_delay(1.0, 1.0, 1.2)).abs() < 1e-12);
        assert!(regularity_delay(2.0, 1.0, 1.2) > 0.0);
    }
}
