//! Engine — the ingestion orchestrator
//!
//! One `ingest` call runs the full routing path: octave resolution,
//! coherence/shadow complement, shadow drop, gravity gate, quantization,
//! lattice update, trail append, convergence recompute. Every step is
//! synchronous and total; a packet is never rejected, only redirected.
//!
//! The engine exclusively owns its lattice, gate, trail and counters.
//! Callers needing concurrent access must serialize externally — one engine
//! per worker, or an outer mutex.

use std::collections::VecDeque;
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::Result;
use crate::gravity::GravityGate;
use crate::lattice::FaceLattice;
use crate::quantize::{clamp, phase_of, state_id};
use crate::seed::{now_epoch_secs, StateSeed};
use crate::types::{IngestResult, Layer, LayerCounts, Packet, Report, OCTAVES};

pub struct Engine {
    config: EngineConfig,
    lattice: FaceLattice,
    gravity: GravityGate,
    last_state_id: u16,
    bindu_active: bool,
    trail: VecDeque<String>,
    layer_counts: LayerCounts,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let gravity = GravityGate::new(config.base_threshold);
        Self {
            config,
            lattice: FaceLattice::new(),
            gravity,
            last_state_id: 0,
            bindu_active: false,
            trail: VecDeque::new(),
            layer_counts: LayerCounts::default(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn lattice(&self) -> &FaceLattice {
        &self.lattice
    }

    pub fn bindu_active(&self) -> bool {
        self.bindu_active
    }

    pub fn last_state_id(&self) -> u16 {
        self.last_state_id
    }

    fn resolve_octave(&self, packet: &Packet) -> u8 {
        let octave = if let Some(oc) = packet.octave {
            oc.clamp(1, OCTAVES as i32) as u8
        } else if let Some(ref topic) = packet.topic {
            self.config.octave_for_topic(topic)
        } else {
            self.config.default_octave
        };
        // Config tables are caller-supplied, so the result is clamped too.
        octave.clamp(1, OCTAVES)
    }

    /// Route one packet into the lattice.
    pub fn ingest(&mut self, packet: &Packet) -> IngestResult {
        let mut octave = self.resolve_octave(packet);
        let mut note = "OK".to_string();

        // When only one of coherence/shadow is supplied the other defaults
        // to its complement. When both are supplied they are used as given,
        // even if they are not complements.
        let normalized = packet.clone().with_complements();

        // Gravitational sorting: heavy shadow falls to the foundation.
        if let Some(s) = normalized.shadow {
            let s = clamp(s, 0.0, 1.0);
            if s >= 0.75 && octave > 2 {
                octave = 1;
                note = format!("SHADOW_DROP({:.2})->BASE", s);
            }
        }

        // The gate runs after the shadow drop and wins the note on reject.
        let decision = self.gravity.decide(octave, &self.lattice);
        if !decision.allowed {
            octave = decision.corrected_octave;
            note = decision.reason;
        }

        let layer = Layer::of(octave);
        self.layer_counts.bump(layer);

        let phase = phase_of(packet.strength);
        // Octave and phase are both in range here, so the id is total.
        let sid = state_id(octave, phase).unwrap_or_default();

        let crystallized = self.lattice.add(octave);

        self.last_state_id = sid;
        self.trail.push_back(format!("{}.{}", octave, phase));
        if self.trail.len() > self.config.max_trail {
            self.trail.pop_front();
        }

        self.bindu_active = self.lattice.axis_ready();

        debug!(
            content = %packet.content,
            octave,
            phase,
            state_id = sid,
            %layer,
            note = %note,
            "ingested packet"
        );

        IngestResult {
            accepted: true,
            layer,
            octave,
            phase,
            state_id: sid,
            crystallized_face: crystallized,
            bindu_active: self.bindu_active,
            note,
        }
    }

    /// Read-only summary of the engine's current state.
    pub fn report(&self) -> Report {
        Report {
            faces: self.lattice.snapshot(),
            axis_ready: self.lattice.axis_ready(),
            bindu: if self.bindu_active { "OPEN" } else { "CLOSED" }.to_string(),
            last_state_id: self.last_state_id,
            trail: self.trail.iter().cloned().collect(),
            layers: self.layer_counts,
        }
    }

    // ---------------------------------------------------------------------
    // Seed persistence
    // ---------------------------------------------------------------------

    /// Capture the persisted state as a JSON payload.
    pub fn export_seed(&self) -> Result<String> {
        let seed = StateSeed {
            timestamp: now_epoch_secs(),
            lattice: self.lattice.snapshot(),
            last_state_id: self.last_state_id,
            trail: self.trail.iter().cloned().collect(),
        };
        seed.to_json()
    }

    /// Replace the engine's persisted state from a seed payload.
    ///
    /// Full-state replacement, not a merge: the lattice is restored, the
    /// last state id overwritten, the trail truncated to the configured
    /// maximum (keeping the most recent entries) and the convergence flag
    /// recomputed. Must not be interleaved with `ingest` on another handle.
    pub fn import_seed(&mut self, payload: &str) -> Result<()> {
        let seed = StateSeed::from_json(payload)?;
        self.lattice.restore(&seed.lattice);
        self.last_state_id = seed.last_state_id;
        let start = seed.trail.len().saturating_sub(self.config.max_trail);
        self.trail = seed.trail[start..].iter().cloned().collect();
        self.bindu_active = self.lattice.axis_ready();
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Console helpers
    // ---------------------------------------------------------------------

    /// Seven-line face view: octave, label, fill bar.
    pub fn render_faces(&self) -> String {
        let mut lines = Vec::with_capacity(OCTAVES as usize);
        for oc in 1..=OCTAVES {
            lines.push(format!(
                "{} {:<18} {}",
                oc,
                self.config.face_label(oc),
                self.lattice.render_bar(oc)
            ));
        }
        lines.join("\n")
    }

    /// Canonical topic name for an octave, per the configured table.
    pub fn topic_of(&self, octave: u8) -> Option<&str> {
        self.config.topic_for_octave(octave)
    }
}
