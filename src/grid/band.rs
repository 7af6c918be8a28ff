//! Latitude band selection.
//!
//! A band is the pair of open intervals `lo < |lat| < hi`, one in each
//! hemisphere. The mask is symmetric about the equator, so a grid ordered
//! north-to-south selects the same latitudes as one ordered south-to-north.

use crate::error::SpectrumError;

/// Symmetric latitude band `lo < |lat| < hi` in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatitudeBand {
    lo: f64,
    hi: f64,
}

impl Default for LatitudeBand {
    fn default() -> Self {
        Self::midlatitudes()
    }
}

impl LatitudeBand {
    /// Create a band, validating `0 <= lo < hi <= 90`.
    pub fn new(lo: f64, hi: f64) -> Result<Self, SpectrumError> {
        let valid = lo.is_finite() && hi.is_finite() && 0.0 <= lo && lo < hi && hi <= 90.0;
        if !valid {
            return Err(SpectrumError::InvalidBand { lo, hi });
        }
        Ok(Self { lo, hi })
    }

    /// The 30°–60° midlatitude band.
    pub fn midlatitudes() -> Self {
        Self { lo: 30.0, hi: 60.0 }
    }

    /// Lower bound on |lat| (exclusive).
    pub fn lo(&self) -> f64 {
        self.lo
    }

    /// Upper bound on |lat| (exclusive).
    pub fn hi(&self) -> f64 {
        self.hi
    }

    /// Check whether a latitude (degrees) falls inside the band.
    #[inline]
    pub fn contains(&self, latitude: f64) -> bool {
        let a = latitude.abs();
        self.lo < a && a < self.hi
    }

    /// Indices of latitudes inside the band, in their original order.
    pub fn select_indices(&self, latitudes: &[f64]) -> Vec<usize> {
        latitudes
            .iter()
            .enumerate()
            .filter(|&(_, &lat)| self.contains(lat))
            .map(|(i, _)| i)
            .collect()
    }

    /// Indices inside the band, failing with `EmptySelection` if there are none.
    pub fn select_nonempty(&self, latitudes: &[f64]) -> Result<Vec<usize>, SpectrumError> {
        let indices = self.select_indices(latitudes);
        if indices.is_empty() {
            return Err(SpectrumError::EmptySelection {
                lo: self.lo,
                hi: self.hi,
            });
        }
        Ok(indices)
    }
}
