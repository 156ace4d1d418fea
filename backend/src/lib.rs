//! Conveyor Tycoon Core - Rust Engine
//!
//! Incremental "tycoon" simulation: a timed generator drops items onto a
//! moving belt, items reaching the end are sold, and the proceeds buy
//! upgrades to drop rate, belt speed and sale price.
//!
//! # Architecture
//!
//! - **core**: Time sources (`Clock`) and tick bookkeeping
//! - **models**: Domain types (Item, Generator, Belt, Economy, Event)
//! - **orchestrator**: Per-frame simulation loop and configuration
//!
//! # Critical Invariants
//!
//! 1. Drop interval never falls below its floor (0.1s by default)
//! 2. After every tick, all items on the belt satisfy `0 <= position < length`
//! 3. A rejected purchase changes nothing; a successful one debits exactly
//!    the pre-call cost
//! 4. Time is injected, never read implicitly, so runs are reproducible

// Module declarations
pub mod core;
pub mod models;
pub mod orchestrator;

// Re-exports for convenience
pub use crate::core::time::{Clock, ManualClock, SystemClock, TimeManager};
pub use models::{
    belt::Belt,
    economy::{Economy, EconomyError, PurchaseReceipt, UpgradeCosts, UpgradeEffects, UpgradeKind},
    event::{Event, EventLog},
    generator::Generator,
    item::Item,
};
pub use orchestrator::{Simulation, SimulationConfig, SimulationError, SimulationView, TickResult};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn tycoon_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::simulation::PySimulation>()?;
    Ok(())
}
