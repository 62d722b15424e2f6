//! Ambient I/O layer: point-file parsing and JSON project-configuration
//! parsing, per `spec.md` §6's external-interfaces table.

pub mod config;
pub mod points;

pub use config::ProjectConfig;
pub use points::parse_categorical_points;
