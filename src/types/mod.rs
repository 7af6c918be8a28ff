//! Strongly-typed physical quantities for spherical grids.
//!
//! Newtypes keep latitudes (degrees) and lengths (meters) distinct from
//! raw `f64` values.
//!
//! # Example
//!
//! ```
//! use zonal_spectrum::types::{EARTH_RADIUS, Latitude};
//!
//! let lat = Latitude::new(-45.0);
//! assert!((lat.radians() + std::f64::consts::FRAC_PI_4).abs() < 1e-15);
//!
//! let c = lat.circumference(EARTH_RADIUS);
//! assert!(c.kilometers() > 28_000.0 && c.kilometers() < 28_400.0);
//! ```

mod physical;

pub use physical::{EARTH_RADIUS, Latitude, Meters};
