use crate::curve::CSPolygon;
use crate::error::Result;
use crate::pattern::{Partition, Pattern};
use crate::settings::GeneralSettings;

/// A pattern's contour after Minkowski dilation by the dilation radius,
/// tagged with the index of the pattern it came from (within the
/// partition's pattern list, not the category) and its category.
///
/// Mirrors `PolyPattern` paired with its index in `DilatedPatternDrawing`.
#[derive(Debug, Clone)]
pub struct DilatedPattern {
    pub pattern_index: usize,
    pub category: u32,
    pub polygon: CSPolygon,
}

/// Dilates every pattern in `partition` by `general.dilation_radius()`.
///
/// # Errors
///
/// Propagates the first offset error encountered (e.g. a degenerate
/// contour); per `spec.md` §7 this is a fatal `GeometryDegenerate`/
/// `OffsetHoled` condition, not a routine discard.
pub fn dilate_partition(partition: &Partition, general: &GeneralSettings) -> Result<Vec<DilatedPattern>> {
    let radius = general.dilation_radius();
    partition
        .patterns
        .iter()
        .enumerate()
        .map(|(pattern_index, pattern)| {
            dilate_one(pattern, radius).map(|polygon| DilatedPattern {
                pattern_index,
                category: pattern.category(),
                polygon,
            })
        })
        .collect()
}

fn dilate_one(pattern: &Pattern, radius: f64) -> Result<CSPolygon> {
    pattern.dilate(radius)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::pattern::{CatPoint, SinglePoint};

    #[test]
    fn dilating_a_partition_preserves_pattern_indices() {
        let partition = Partition::new(vec![
            Pattern::SinglePoint(SinglePoint::new(CatPoint::from_f64(0, 0.0, 0.0))),
            Pattern::SinglePoint(SinglePoint::new(CatPoint::from_f64(1, 5.0, 0.0))),
        ]);
        let general = GeneralSettings {
            point_size: 1.0,
            ..Default::default()
        };
        let dilated = dilate_partition(&partition, &general).unwrap();
        assert_eq!(dilated.len(), 2);
        assert_eq!(dilated[0].pattern_index, 0);
        assert_eq!(dilated[0].category, 0);
        assert_eq!(dilated[1].category, 1);
    }
}
