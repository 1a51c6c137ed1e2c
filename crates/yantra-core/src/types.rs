//! Core value types — packets in, results and reports out
//!
//! All of these are plain immutable value structs: they carry data between
//! the producer side and the engine, and none of them participates in any
//! polymorphism or holds a reference back into the engine.

use serde::{Deserialize, Serialize};

/// Number of octaves (layers) in the lattice.
pub const OCTAVES: u8 = 7;

/// Number of phases (quantization buckets) per octave.
pub const PHASES: u8 = 6;

/// An abstract ingestion packet.
///
/// Producers (chemistry/linguistics/protein encoders) emit these; the engine
/// consumes them. `octave` wins over `topic` when both are present. Values
/// outside their nominal ranges are clamped by the engine, never rejected.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Packet {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub octave: Option<i32>,
    #[serde(default = "default_strength")]
    pub strength: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coherence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<f64>,
}

fn default_strength() -> f64 {
    0.5
}

impl Packet {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            topic: None,
            octave: None,
            strength: default_strength(),
            coherence: None,
            shadow: None,
        }
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn with_octave(mut self, octave: i32) -> Self {
        self.octave = Some(octave);
        self
    }

    pub fn with_strength(mut self, strength: f64) -> Self {
        self.strength = strength;
        self
    }

    pub fn with_coherence(mut self, coherence: f64) -> Self {
        self.coherence = Some(coherence);
        self
    }

    pub fn with_shadow(mut self, shadow: f64) -> Self {
        self.shadow = Some(shadow);
        self
    }

    /// Fill in whichever of coherence/shadow is absent as the complement of
    /// the other (clamped into [0,1]). When both are present they are left
    /// exactly as given, even if they are not complements; when neither is
    /// present both stay absent.
    pub fn with_complements(mut self) -> Self {
        match (self.coherence, self.shadow) {
            (Some(c), None) => self.shadow = Some(1.0 - c.clamp(0.0, 1.0)),
            (None, Some(s)) => self.coherence = Some(1.0 - s.clamp(0.0, 1.0)),
            _ => {}
        }
        self
    }
}

/// Vertical grouping of octaves: BASE {1,2}, RING {3,4,5}, APEX {6,7}.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Layer {
    Base,
    Ring,
    Apex,
}

impl Layer {
    /// Classify an in-range octave (1..=7) into its layer.
    pub fn of(octave: u8) -> Self {
        match octave {
            0..=2 => Layer::Base,
            3..=5 => Layer::Ring,
            _ => Layer::Apex,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Layer::Base => "BASE",
            Layer::Ring => "RING",
            Layer::Apex => "APEX",
        }
    }
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of the gravity gate for one ingestion. Transient — produced and
/// consumed inside a single `ingest` call, never persisted.
#[derive(Clone, Debug)]
pub struct GravityDecision {
    pub allowed: bool,
    pub corrected_octave: u8,
    pub reason: String,
}

/// Per-layer ingestion counters.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct LayerCounts {
    #[serde(rename = "BASE")]
    pub base: u32,
    #[serde(rename = "RING")]
    pub ring: u32,
    #[serde(rename = "APEX")]
    pub apex: u32,
}

impl LayerCounts {
    pub fn bump(&mut self, layer: Layer) {
        match layer {
            Layer::Base => self.base += 1,
            Layer::Ring => self.ring += 1,
            Layer::Apex => self.apex += 1,
        }
    }

    pub fn get(&self, layer: Layer) -> u32 {
        match layer {
            Layer::Base => self.base,
            Layer::Ring => self.ring,
            Layer::Apex => self.apex,
        }
    }
}

/// Result of one ingestion.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IngestResult {
    pub accepted: bool,
    pub layer: Layer,
    pub octave: u8,
    pub phase: u8,
    pub state_id: u16,
    pub crystallized_face: bool,
    pub bindu_active: bool,
    pub note: String,
}

/// Read-only engine summary.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Report {
    /// Octave → fill level (0..=6).
    pub faces: std::collections::BTreeMap<u8, u8>,
    pub axis_ready: bool,
    /// "OPEN" when the axis criterion holds, "CLOSED" otherwise.
    pub bindu: String,
    pub last_state_id: u16,
    pub trail: Vec<String>,
    pub layers: LayerCounts,
}
