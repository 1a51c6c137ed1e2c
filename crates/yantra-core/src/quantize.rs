//! Phase quantization and state identifiers
//!
//! 7 octaves × 6 phases = 42 discrete states. `state_id` is a bijection from
//! (octave, phase) onto 1..=42: state 1 is (1,1), state 42 is (7,6).

use crate::error::{Error, Result};
use crate::types::{OCTAVES, PHASES};

/// Clamp a value into [lo, hi].
pub fn clamp(x: f64, lo: f64, hi: f64) -> f64 {
    if x < lo {
        lo
    } else if x > hi {
        hi
    } else {
        x
    }
}

/// Quantize a strength in [0,1] into a phase in 1..=6.
///
/// Ceiling quantization: strength 0 maps to phase 1, each further sixth
/// opens the next phase, strength 1 maps to phase 6. Out-of-range input is
/// clamped, never rejected.
pub fn phase_of(strength: f64) -> u8 {
    let s = clamp(strength, 0.0, 1.0);
    let phase = (s * PHASES as f64).ceil() as i64;
    phase.clamp(1, PHASES as i64) as u8
}

/// Unique state id in 1..=42 for an (octave, phase) pair.
///
/// Fails with `InvalidRange` when either coordinate is out of bounds. The
/// engine pre-clamps both, so this arm is reachable only through direct use
/// of this function.
pub fn state_id(octave: u8, phase: u8) -> Result<u16> {
    if octave < 1 || octave > OCTAVES {
        return Err(Error::invalid_range("octave", octave as i64, 1, OCTAVES as i64));
    }
    if phase < 1 || phase > PHASES {
        return Err(Error::invalid_range("phase", phase as i64, 1, PHASES as i64));
    }
    Ok((octave as u16 - 1) * PHASES as u16 + phase as u16)
}
