//! Gridded latitude/longitude fields.
//!
//! This module provides:
//! - **Coordinate axes**: named coordinate arrays (`lat`, `longitude`, `time`, ...)
//! - **Gridded fields**: N-D arrays with one named axis per dimension
//! - **Latitude bands**: symmetric `lo < |lat| < hi` masks
//!
//! Both common naming conventions (`lat`/`lon` and `latitude`/`longitude`)
//! are handled by passing axis names around, never by hard-coding them.

mod axis;
mod band;
mod field;

pub use axis::CoordinateAxis;
pub use band::LatitudeBand;
pub use field::{GriddedField, LATITUDE_NAMES, LONGITUDE_NAMES};
