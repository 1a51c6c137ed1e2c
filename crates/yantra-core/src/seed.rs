//! State seed — the minimal persisted snapshot
//!
//! Stores only geometry: the 7 fill counters, the last state id and the
//! short trail. No ingested content survives in a seed, so restoring one
//! rebuilds the engine's shape without replaying input history.
//!
//! Decoding is lenient by contract: every field has an explicit default and
//! malformed entries are coerced or skipped. Only a payload that fails to
//! parse as a JSON object at all is rejected.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

use crate::error::{Error, Result};
use crate::types::OCTAVES;

/// Maximum valid state id (7 octaves × 6 phases).
const MAX_STATE_ID: i64 = (OCTAVES as i64) * 6;

/// Persisted engine state. A value type with no aliasing relationship to a
/// live engine: created on export, fully consumed on import.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateSeed {
    /// Seconds since epoch at export time.
    pub timestamp: f64,
    /// Octave → fill level (0..=6). Serialized with text keys.
    pub lattice: BTreeMap<u8, u8>,
    pub last_state_id: u16,
    pub trail: Vec<String>,
}

impl StateSeed {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::seed_encode(e.to_string()))
    }

    /// Parse a seed payload, defaulting every missing or malformed field.
    ///
    /// Defaulting policy, per field:
    /// - `timestamp`: any JSON number; else the current time.
    /// - `lattice`: object entries with an integer key in 1..=7 and a
    ///   numeric (or numeric-string) value, clamped into 0..=6; malformed
    ///   entries are skipped; a missing or non-object field yields an empty
    ///   map (all faces restore to 0).
    /// - `last_state_id`: any JSON integer, clamped into 0..=42; else 0.
    /// - `trail`: array entries that are strings are kept, scalar entries
    ///   are stringified, composite entries are skipped; else empty.
    pub fn from_json(payload: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(payload).map_err(|e| Error::seed_decode(e.to_string()))?;
        let obj = value
            .as_object()
            .ok_or_else(|| Error::seed_decode("payload is not a JSON object"))?;

        let timestamp = obj
            .get("timestamp")
            .and_then(Value::as_f64)
            .unwrap_or_else(now_epoch_secs);

        let mut lattice = BTreeMap::new();
        if let Some(map) = obj.get("lattice").and_then(Value::as_object) {
            for (key, val) in map {
                let octave = key.parse::<u8>().ok().filter(|oc| (1..=OCTAVES).contains(oc));
                let fill = coerce_int(val);
                match (octave, fill) {
                    (Some(oc), Some(fill)) => {
                        lattice.insert(oc, fill.clamp(0, 6) as u8);
                    }
                    _ => warn!(key = %key, "skipping malformed lattice entry in seed"),
                }
            }
        }

        let last_state_id = obj
            .get("last_state_id")
            .and_then(coerce_int)
            .map(|id| id.clamp(0, MAX_STATE_ID) as u16)
            .unwrap_or(0);

        let mut trail = Vec::new();
        if let Some(entries) = obj.get("trail").and_then(Value::as_array) {
            for entry in entries {
                match entry {
                    Value::String(s) => trail.push(s.clone()),
                    Value::Number(_) | Value::Bool(_) => trail.push(entry.to_string()),
                    _ => warn!("skipping non-scalar trail entry in seed"),
                }
            }
        }

        Ok(Self {
            timestamp,
            lattice,
            last_state_id,
            trail,
        })
    }
}

/// Current time as fractional seconds since epoch.
pub fn now_epoch_secs() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1000.0
}

/// Integer coercion for lenient fields: accepts numbers (truncating floats)
/// and numeric strings.
fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}
