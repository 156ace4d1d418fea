//! Python bindings for presentation layers
//!
//! The console and GUI front-ends are written in Python; they construct a
//! `Simulation`, call `tick` from their frame loop, and render from the read
//! accessors.

pub mod simulation;
pub mod types;
