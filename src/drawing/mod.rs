//! Drawing engine: dilates a partition's patterns, overlays their boundaries
//! into a circle-segment arrangement, and annotates faces/half-edges with
//! origin and stacking data ready for a caller to paint.
//!
//! Grounded on `drawing_algorithm.cpp`: `DilatedPatternDrawing`'s
//! constructor dilates every pattern, inserts the resulting curves into an
//! arrangement-with-history, labels faces by origin, and computes pairwise
//! `Relation`s over intersection components.

pub mod arrangement;
pub mod dilate;
pub mod paint;
pub mod relation;

pub use arrangement::{Arrangement, ArrFaceId, ArrHalfEdgeId};
pub use dilate::{dilate_partition, DilatedPattern};
pub use paint::{painting, Painting};
pub use relation::{Component, Relation};

use crate::error::{NoDrawingError, Result};
use crate::pattern::{CatPoint, Partition};
use crate::settings::{ComputeDrawingSettings, GeneralSettings};

/// The full output of the drawing engine for one chosen partition: the
/// dilated patterns, the arrangement built over their boundaries (with face
/// origins and pairwise relations already computed), and a render-ready
/// painting.
#[derive(Debug)]
pub struct Drawing {
    pub dilated: Vec<DilatedPattern>,
    pub arrangement: Arrangement,
    pub painting: Painting,
}

/// Runs the drawing engine on `partition`, refusing if any two points of
/// different categories are within `2 * pointSize` of each other.
///
/// # Errors
///
/// Returns [`crate::error::SimpleSetsError::NoDrawing`] if the proximity
/// check fails, or propagates a dilation/offset error from a malformed
/// pattern contour.
pub fn compute_drawing(
    all_points: &[CatPoint],
    partition: &Partition,
    general: &GeneralSettings,
    compute: &ComputeDrawingSettings,
) -> Result<Drawing> {
    check_no_drawing(all_points, general.point_size)?;

    let dilated = dilate_partition(partition, general)?;
    let mut arrangement = arrangement::build(&dilated);
    relation::annotate_relations(&mut arrangement, &dilated);
    let cutout_radius = compute.cutout_radius_factor * general.dilation_radius();
    let painting = paint::painting(&arrangement, &dilated, all_points, cutout_radius);

    Ok(Drawing {
        dilated,
        arrangement,
        painting,
    })
}

/// Refuses to draw if any two points of different categories lie within
/// `2 * point_size` of each other, matching `spec.md` §7's `NoDrawing`
/// error: at that proximity the dilated disks of the two points would
/// already overlap before any pattern merging happens, which the original
/// treats as an input the drawing engine cannot render sensibly.
///
/// # Errors
///
/// Returns [`NoDrawingError`] (wrapped) on the first offending pair found.
pub fn check_no_drawing(points: &[CatPoint], point_size: f64) -> Result<()> {
    let threshold = 2.0 * point_size;
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            if points[i].category == points[j].category {
                continue;
            }
            let d = nalgebra::distance(&points[i].approx(), &points[j].approx());
            if d < threshold {
                let detail = format!(
                    "categories {} and {} at distance {d:.6} < {threshold:.6}",
                    points[i].category, points[j].category
                );
                tracing::warn!(detail, "refusing to draw: points of different categories too close");
                return Err(NoDrawingError { detail }.into());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn no_drawing_passes_for_well_separated_categories() {
        let points = vec![CatPoint::from_f64(0, 0.0, 0.0), CatPoint::from_f64(1, 10.0, 10.0)];
        assert!(check_no_drawing(&points, 1.0).is_ok());
    }

    #[test]
    fn no_drawing_rejects_close_different_categories() {
        let points = vec![CatPoint::from_f64(0, 0.0, 0.0), CatPoint::from_f64(1, 0.5, 0.0)];
        assert!(check_no_drawing(&points, 1.0).is_err());
    }

    #[test]
    fn no_drawing_ignores_close_same_category_points() {
        let points = vec![CatPoint::from_f64(0, 0.0, 0.0), CatPoint::from_f64(0, 0.1, 0.0)];
        assert!(check_no_drawing(&points, 1.0).is_ok());
    }
}
