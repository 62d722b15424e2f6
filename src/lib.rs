//! SimpleSets-style categorical point set visualization kernel.
//!
//! A categorical point set is partitioned (greedy agglomeration into
//! single points, matchings, banks and islands under admissibility and
//! quality constraints), then the partition chosen by a caller is drawn:
//! each pattern's contour is dilated, the dilated boundaries are overlaid
//! into a planar arrangement, and the arrangement's faces and edges are
//! annotated and painted.

pub mod boolean;
pub mod curve;
pub mod drawing;
pub mod error;
pub mod io;
pub mod kernel;
pub mod offset;
pub mod partition;
pub mod pattern;
pub mod settings;

pub use error::{Result, SimpleSetsError};
