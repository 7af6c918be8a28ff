//! Physical quantity newtypes for spherical grids.
//!
//! These types keep latitude in degrees and lengths in meters
//! from being mixed up with plain `f64` grid indices.

use std::f64::consts::PI;
use std::fmt;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS: f64 = 6_371_000.0;

// =============================================================================
// Latitude (geographic latitude in degrees)
// =============================================================================

/// Geographic latitude in degrees, positive north.
///
/// # Example
///
/// ```
/// use zonal_spectrum::types::{Latitude, EARTH_RADIUS};
///
/// let equator = Latitude::new(0.0);
/// let c = equator.circumference(EARTH_RADIUS);
/// assert!((c.meters() - 2.0 * std::f64::consts::PI * EARTH_RADIUS).abs() < 1e-6);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Latitude(f64);

impl Latitude {
    /// Create a new latitude.
    ///
    /// # Panics
    ///
    /// Debug-panics if the value lies outside [-90, 90].
    #[inline]
    pub fn new(degrees: f64) -> Self {
        debug_assert!(
            (-90.0..=90.0).contains(&degrees) || degrees.is_nan(),
            "Latitude must be in [-90, 90], got {}",
            degrees
        );
        Self(degrees)
    }

    /// Latitude in radians.
    #[inline]
    pub fn radians(self) -> f64 {
        self.0.to_radians()
    }

    /// Length of the parallel (circle of constant latitude) on a sphere.
    ///
    /// ```text
    /// C(φ) = 2π R cos(φ)
    /// ```
    #[inline]
    pub fn circumference(self, radius: f64) -> Meters {
        Meters::new(2.0 * PI * radius * self.radians().cos())
    }
}

impl fmt::Display for Latitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hemisphere = if self.0 < 0.0 { 'S' } else { 'N' };
        write!(f, "{:.2}°{}", self.0.abs(), hemisphere)
    }
}

impl From<Latitude> for f64 {
    #[inline]
    fn from(lat: Latitude) -> f64 {
        lat.0
    }
}

// =============================================================================
// Meters (physical length)
// =============================================================================

/// Physical length in meters.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Meters(f64);

impl Meters {
    /// Create a new length.
    #[inline]
    pub const fn new(meters: f64) -> Self {
        Self(meters)
    }

    /// Get the length in meters.
    #[inline]
    pub fn meters(self) -> f64 {
        self.0
    }

    /// Get the length in kilometers.
    #[inline]
    pub fn kilometers(self) -> f64 {
        self.0 / 1000.0
    }
}

impl fmt::Display for Meters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}km", self.kilometers())
    }
}

impl From<Meters> for f64 {
    #[inline]
    fn from(m: Meters) -> f64 {
        m.0
    }
}
