//! Orchestrator - per-frame simulation loop
//!
//! Composes generator, belt and economy behind a single `tick` and the three
//! purchase operations.
//!
//! See `engine.rs` for full implementation.

pub mod engine;

#[cfg(test)]
mod tests;

// Re-export main types for convenience
pub use engine::{
    BeltConfig, EconomyConfig, GeneratorConfig, SessionStats, Simulation, SimulationConfig,
    SimulationError, SimulationView, TickResult,
};
