//! Face lattice — per-octave fill tracking
//!
//! One saturating counter (0..=6) per octave. Counters never decrease; an
//! octave whose counter reaches 6 is "crystallized" and stays so for the
//! lifetime of the lattice. The axis criterion (octaves 1, 4, 7 all
//! crystallized) is therefore monotone as well.

use std::collections::BTreeMap;
use tracing::info;

use crate::types::{OCTAVES, PHASES};

/// Compact fill state: one slot count per octave, no content storage.
#[derive(Clone, Debug, Default)]
pub struct FaceLattice {
    faces: [u8; OCTAVES as usize],
}

impl FaceLattice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Saturating increment for an octave's fill counter.
    ///
    /// Returns true iff the counter reaches exactly 6 as a result of this
    /// call — the crystallization edge, which fires once per octave. Calls
    /// past the cap leave the counter untouched and return false.
    pub fn add(&mut self, octave: u8) -> bool {
        let slot = &mut self.faces[(octave - 1) as usize];
        if *slot < PHASES {
            *slot += 1;
            if *slot == PHASES {
                info!(octave, "face crystallized");
                return true;
            }
        }
        false
    }

    pub fn fill_level(&self, octave: u8) -> u8 {
        self.faces[(octave - 1) as usize]
    }

    pub fn is_crystallized(&self, octave: u8) -> bool {
        self.fill_level(octave) == PHASES
    }

    /// Axis criterion: octaves 1, 4, 7 (root, heart, spirit) all full.
    pub fn axis_ready(&self) -> bool {
        self.is_crystallized(1) && self.is_crystallized(4) && self.is_crystallized(7)
    }

    /// Copy of the fill map, keyed by octave.
    pub fn snapshot(&self) -> BTreeMap<u8, u8> {
        (1..=OCTAVES).map(|oc| (oc, self.fill_level(oc))).collect()
    }

    /// Replace the entire fill map.
    ///
    /// Missing octaves default to 0 so partial or legacy payloads load
    /// without failing; values are clamped into 0..=6 to keep the
    /// crystallization invariant intact.
    pub fn restore(&mut self, snap: &BTreeMap<u8, u8>) {
        for oc in 1..=OCTAVES {
            self.faces[(oc - 1) as usize] = snap.get(&oc).copied().unwrap_or(0).min(PHASES);
        }
    }

    /// Six-cell console bar for one octave: filled ⬢, empty ⬡.
    pub fn render_bar(&self, octave: u8) -> String {
        let fill = self.fill_level(octave) as usize;
        let mut bar = String::new();
        for _ in 0..fill {
            bar.push('⬢');
        }
        for _ in fill..PHASES as usize {
            bar.push('⬡');
        }
        bar
    }
}
