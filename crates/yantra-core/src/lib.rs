//! Yantra Core — 42-state quantization, gating and convergence engine
//!
//! Architecture:
//! - Quantizer: strength → phase (1..=6), (octave, phase) → state id (1..=42)
//! - FaceLattice: per-octave fill counters with crystallization tracking
//! - GravityGate: hierarchical admission (APEX requires BASE mass)
//! - Engine: one-packet-at-a-time ingestion orchestrator
//! - StateSeed: compact persisted snapshot with a lenient codec
//!
//! Everything is synchronous and single-owner; nothing here suspends,
//! blocks or locks.

pub mod config;
pub mod engine;
pub mod error;
pub mod gravity;
pub mod lattice;
pub mod quantize;
pub mod seed;
pub mod types;

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{Error, Result};
pub use gravity::GravityGate;
pub use lattice::FaceLattice;
pub use quantize::{phase_of, state_id};
pub use seed::StateSeed;
pub use types::*;
