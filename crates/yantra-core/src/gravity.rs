//! Gravity gate — hierarchical admission
//!
//! The single admission rule in the system: APEX octaves (6, 7) cannot be
//! entered until the two foundation octaves carry enough accumulated mass.
//! Rejected packets are redirected to octave 1 rather than dropped.

use crate::lattice::FaceLattice;
use crate::types::{GravityDecision, Layer};

pub struct GravityGate {
    base_threshold: u8,
}

impl GravityGate {
    /// `base_threshold` is a mass score: fill(1)+fill(2) must reach it
    /// before APEX admission.
    pub fn new(base_threshold: u8) -> Self {
        Self { base_threshold }
    }

    pub fn base_threshold(&self) -> u8 {
        self.base_threshold
    }

    pub fn decide(&self, octave: u8, lattice: &FaceLattice) -> GravityDecision {
        let base_mass = lattice.fill_level(1) + lattice.fill_level(2);

        if Layer::of(octave) == Layer::Apex && base_mass < self.base_threshold {
            return GravityDecision {
                allowed: false,
                corrected_octave: 1,
                reason: format!(
                    "GRAVITY_REJECT: base_mass={} < {}, redirect->Matter",
                    base_mass, self.base_threshold
                ),
            };
        }

        GravityDecision {
            allowed: true,
            corrected_octave: octave,
            reason: "OK".to_string(),
        }
    }
}
