//! Engine configuration
//!
//! All tunable parameters and lookup tables in one place. Each engine owns
//! its own copy — there is no module-level table state. Loaded from TOML
//! when a config file exists, falls back to defaults otherwise.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::types::OCTAVES;

/// Top-level engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Minimum BASE mass (fill(1)+fill(2)) required before APEX admission.
    pub base_threshold: u8,
    /// Maximum trail length; the oldest entry is evicted past this.
    pub max_trail: usize,
    /// Octave used when a packet carries no octave and no known topic.
    pub default_octave: u8,
    /// Topic name → octave (1..=7).
    pub topics: BTreeMap<String, u8>,
    /// Console label per octave, index 0 = octave 1.
    pub face_labels: [String; OCTAVES as usize],
}

// ============================================================
// Defaults
// ============================================================

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_threshold: 6,
            max_trail: 8,
            default_octave: 2,
            topics: default_topics(),
            face_labels: default_face_labels(),
        }
    }
}

fn default_topics() -> BTreeMap<String, u8> {
    BTreeMap::from([
        ("matter".to_string(), 1),
        ("system".to_string(), 2),
        ("flow".to_string(), 3),
        ("life".to_string(), 4),
        ("logic".to_string(), 5),
        ("drive".to_string(), 6),
        ("spiritual".to_string(), 7),
    ])
}

fn default_face_labels() -> [String; OCTAVES as usize] {
    [
        "RED (Matter/Base)".to_string(),
        "ORANGE (System)".to_string(),
        "YELLOW (Flow)".to_string(),
        "GREEN (Heart/Life)".to_string(),
        "BLUE (Logic)".to_string(),
        "INDIGO (Drive)".to_string(),
        "VIOLET (Spirit)".to_string(),
    ]
}

// ============================================================
// Loading
// ============================================================

impl EngineConfig {
    /// Load config from a TOML file, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {} — using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                tracing::info!("No config at {} — using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Write the current config as TOML (for generating a default config file).
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }

    /// Octave for a topic name, or `default_octave` for an unknown one.
    pub fn octave_for_topic(&self, topic: &str) -> u8 {
        self.topics.get(topic).copied().unwrap_or(self.default_octave)
    }

    /// Reverse lookup: canonical topic name for an octave, if the table has one.
    pub fn topic_for_octave(&self, octave: u8) -> Option<&str> {
        self.topics
            .iter()
            .find(|(_, oc)| **oc == octave)
            .map(|(name, _)| name.as_str())
    }

    /// Console label for an in-range octave (1..=7).
    pub fn face_label(&self, octave: u8) -> &str {
        &self.face_labels[(octave - 1) as usize]
    }
}
