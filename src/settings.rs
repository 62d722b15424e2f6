//! Plain-value settings structs threaded through the partition and drawing
//! engines. Mirrors `settings.h`: one struct per concern, no global state
//! (per Design Note in `spec.md` §9 — the engine takes settings as values).

use serde::{Deserialize, Serialize};

/// Geometry parameters shared by the partition and drawing engines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralSettings {
    /// Radius of the disk that represents a single point.
    pub point_size: f64,
    /// Maximum number of bends a [`crate::pattern::Bank`] may have.
    pub inflection_limit: usize,
    /// Maximum total turning angle (radians) of a single bend.
    pub max_bend_angle: f64,
    /// Maximum single-vertex turning angle (radians) in a bank.
    pub max_turn_angle: f64,
}

impl GeneralSettings {
    /// The distance every pattern is dilated by: three times the point
    /// radius, matching `GeneralSettings::dilationRadius` in `settings.h`.
    #[must_use]
    pub fn dilation_radius(&self) -> f64 {
        self.point_size * 3.0
    }
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            point_size: 1.0,
            inflection_limit: 1,
            max_bend_angle: std::f64::consts::FRAC_PI_2,
            max_turn_angle: std::f64::consts::FRAC_PI_4,
        }
    }
}

/// Parameters governing which merges the partition engine considers and
/// how it schedules them in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionSettings {
    /// Whether to consider Bank merges.
    pub banks: bool,
    /// Whether to consider Island merges.
    pub islands: bool,
    /// Whether to delay merges that create irregularly-distributed patterns.
    pub regularity_delay: bool,
    /// Whether to delay merges that newly cover unrelated points.
    pub intersection_delay: bool,
    /// Scales the dilation radius into the admissibility distance threshold
    /// used to reject candidates that pass too close to unrelated points.
    pub admissible_radius_factor: f64,
}

impl Default for PartitionSettings {
    fn default() -> Self {
        Self {
            banks: true,
            islands: true,
            regularity_delay: true,
            intersection_delay: true,
            admissible_radius_factor: 1.0,
        }
    }
}

/// Parameters governing how the drawing engine lays out a chosen partition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeDrawingSettings {
    /// Aim to keep a disk of this factor times the dilation radius visible
    /// around each point (a cutout through the overlapping fills).
    pub cutout_radius_factor: f64,
}

impl Default for ComputeDrawingSettings {
    fn default() -> Self {
        Self {
            cutout_radius_factor: 0.5,
        }
    }
}

/// Color/stroke parameters for the painting the drawing engine produces.
/// Color *policy* (which RGB value goes with which category) is the
/// caller's concern; this struct only holds the slots the drawing engine
/// needs to emit a per-category stroke/fill painting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawSettings {
    /// 24-bit RGB color per category, indexed by category.
    pub colors: Vec<u32>,
    /// Fill desaturation applied in overlap regions, in `[0, 1]`.
    pub whiten: f64,
}

impl DrawSettings {
    /// Stroke weight for a drawn point marker, matching
    /// `DrawSettings::pointStrokeWeight` in `settings.h`.
    #[must_use]
    pub fn point_stroke_weight(&self, gs: &GeneralSettings) -> f64 {
        gs.point_size / 2.5
    }

    /// Stroke weight for a pattern's contour, matching
    /// `DrawSettings::contourStrokeWeight` in `settings.h`.
    #[must_use]
    pub fn contour_stroke_weight(&self, gs: &GeneralSettings) -> f64 {
        gs.point_size / 3.5
    }

    /// The color for `category`, or a neutral gray fallback (with a
    /// `tracing::warn!`) if no color slot was configured for it.
    #[must_use]
    pub fn color_for(&self, category: u32) -> u32 {
        match self.colors.get(category as usize) {
            Some(&c) => c,
            None => {
                tracing::warn!(category, "no color configured for category");
                0x00F0_F0F0
            }
        }
    }
}

impl Default for DrawSettings {
    fn default() -> Self {
        Self {
            colors: Vec::new(),
            whiten: 0.0,
        }
    }
}

/// The full settings bundle threaded through a partition + drawing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub general: GeneralSettings,
    pub partition: PartitionSettings,
    pub drawing: ComputeDrawingSettings,
    pub draw: DrawSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            general: GeneralSettings::default(),
            partition: PartitionSettings::default(),
            drawing: ComputeDrawingSettings::default(),
            draw: DrawSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dilation_radius_is_triple_point_size() {
        let gs = GeneralSettings {
            point_size: 2.0,
            ..Default::default()
        };
        assert!((gs.dilation_radius() - 6.0).abs() < 1e-12);
    }

    #[test]
    fn color_for_missing_category_falls_back_to_gray() {
        let ds = DrawSettings {
            colors: vec![0x00FF_0000],
            whiten: 0.0,
        };
        assert_eq!(ds.color_for(0), 0x00FF_0000);
        assert_eq!(ds.color_for(5), 0x00F0_F0F0);
    }
}
