//! Project-configuration JSON parsing: `spec.md` §6's external-interfaces
//! table (`points`, `cover`, `generalSettings.*`, `drawSettings.*`,
//! `partitionSettings.*`, `computeDrawingSettings.*`).
//!
//! `serde`/`serde_json` are adopted from the broader corpus for this: the
//! teacher crate has no JSON surface of its own, but every config-driven
//! crate that reads JSON in this corpus uses `serde`.

use serde::{Deserialize, Serialize};

use crate::error::{InputError, Result};
use crate::settings::{ComputeDrawingSettings, DrawSettings, GeneralSettings, PartitionSettings, Settings};

/// A deserialized project configuration file, matching `spec.md` §6's JSON
/// schema verbatim (field names in `camelCase` on the wire).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    /// Points file path, resolved relative to the project (resolution is
    /// the caller's concern; this crate only parses the path string).
    pub points: String,
    /// Selects the partition at the largest recorded time `<= cover *
    /// dilation_radius`.
    pub cover: f64,
    pub general_settings: GeneralSettings,
    pub draw_settings: DrawSettings,
    pub partition_settings: PartitionSettings,
    pub compute_drawing_settings: ComputeDrawingSettings,
}

impl ProjectConfig {
    /// Parses a project configuration from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::Config`] if `text` is not valid JSON or does
    /// not match the expected schema.
    pub fn parse(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| InputError::Config(e.to_string()).into())
    }

    /// The engine-facing settings bundle carried by this configuration.
    #[must_use]
    pub fn settings(&self) -> Settings {
        Settings {
            general: self.general_settings,
            partition: self.partition_settings,
            drawing: self.compute_drawing_settings,
            draw: self.draw_settings.clone(),
        }
    }
}
