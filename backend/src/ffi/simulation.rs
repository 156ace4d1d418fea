//! PyO3 wrapper for Simulation
//!
//! This module provides the Python interface to the Rust simulation.

use pyo3::prelude::*;
use pyo3::types::PyDict;

use super::types::{parse_simulation_config, tick_result_to_py, view_to_py};
use crate::core::time::SystemClock;
use crate::models::economy::UpgradeKind;
use crate::orchestrator::{Simulation as RustSimulation, SimulationConfig};

/// Python wrapper for Rust Simulation
///
/// # Example (from Python)
///
/// ```python
/// from tycoon_core_rs import Simulation
///
/// sim = Simulation.new({"belt": {"length": 20}})
/// while sim.running:
///     if sim.tick(time.time()):
///         spawn_drop_animation()
///     if key_pressed("1") and not sim.purchase_dropper_upgrade():
///         show_warning("Not enough money!")
///     for event in sim.drain_events():
///         show_feedback(json.loads(event))
/// ```
///
/// Timestamps passed to `tick`/`step` must share the clock's time base:
/// Unix-epoch seconds by default, or whatever base `start` was taken from
/// (e.g. `Simulation.new(start=time.monotonic())`).
/// Clock for a binding-owned simulation, anchored at `start` or the epoch
fn binding_clock(start: Option<f64>) -> SystemClock {
    match start {
        Some(start) => SystemClock::starting_at(start),
        None => SystemClock::since_epoch(),
    }
}

#[pyclass(name = "Simulation")]
pub struct PySimulation {
    inner: RustSimulation,
}

#[pymethods]
impl PySimulation {
    /// Create a new simulation, optionally overriding defaults
    ///
    /// `start` is the current time in the caller's time base; when omitted
    /// the clock reads Unix-epoch seconds, matching `time.time()`.
    ///
    /// # Errors
    ///
    /// Raises ValueError if a field has the wrong type or an invalid value.
    #[staticmethod]
    #[pyo3(signature = (config=None, start=None))]
    fn new(config: Option<&Bound<'_, PyDict>>, start: Option<f64>) -> PyResult<Self> {
        let rust_config = match config {
            Some(dict) => parse_simulation_config(dict)?,
            None => SimulationConfig::default(),
        };

        let inner = RustSimulation::new(rust_config, binding_clock(start)).map_err(|e| {
            PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
                "Failed to create simulation: {}",
                e
            ))
        })?;

        Ok(PySimulation { inner })
    }

    /// Process one frame; returns True if an item was dropped
    ///
    /// Samples the clock unless `now` (same time base as the clock) is given.
    #[pyo3(signature = (now=None))]
    fn tick(&mut self, now: Option<f64>) -> bool {
        match now {
            Some(now) => self.inner.tick(now),
            None => self.inner.tick_clock(),
        }
    }

    /// Process one frame and return the full tick result as a dict
    #[pyo3(signature = (now=None))]
    fn step(&mut self, py: Python, now: Option<f64>) -> PyResult<Py<PyDict>> {
        let now = now.unwrap_or_else(|| self.inner.now());
        let result = self.inner.step(now);
        tick_result_to_py(py, &result)
    }

    fn purchase_dropper_upgrade(&mut self) -> bool {
        self.inner.purchase_dropper_upgrade()
    }

    fn purchase_conveyor_upgrade(&mut self) -> bool {
        self.inner.purchase_conveyor_upgrade()
    }

    fn purchase_price_upgrade(&mut self) -> bool {
        self.inner.purchase_price_upgrade()
    }

    /// Purchase by menu key ("1"-"3") or name
    ///
    /// # Errors
    ///
    /// Raises ValueError for an unknown upgrade name. Insufficient funds is
    /// not an error; it returns False.
    fn purchase(&mut self, kind: &str) -> PyResult<bool> {
        let kind: UpgradeKind = kind
            .parse()
            .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("{}", e)))?;
        Ok(self.inner.purchase(kind).is_ok())
    }

    fn stop(&mut self) {
        self.inner.stop();
    }

    #[getter]
    fn running(&self) -> bool {
        self.inner.is_running()
    }

    #[getter]
    fn money(&self) -> f64 {
        self.inner.money()
    }

    #[getter]
    fn object_price(&self) -> f64 {
        self.inner.object_price()
    }

    #[getter]
    fn drop_interval(&self) -> f64 {
        self.inner.drop_interval()
    }

    #[getter]
    fn belt_speed(&self) -> f64 {
        self.inner.belt_speed()
    }

    #[getter]
    fn belt_length(&self) -> f64 {
        self.inner.belt_length()
    }

    #[getter]
    fn dropper_upgrade_cost(&self) -> f64 {
        self.inner.dropper_upgrade_cost()
    }

    #[getter]
    fn conveyor_upgrade_cost(&self) -> f64 {
        self.inner.conveyor_upgrade_cost()
    }

    #[getter]
    fn price_upgrade_cost(&self) -> f64 {
        self.inner.price_upgrade_cost()
    }

    /// Item positions in belt order
    fn item_positions(&self) -> Vec<f64> {
        self.inner.item_positions()
    }

    /// Snapshot of all renderable state as a dict
    fn view(&self, py: Python) -> PyResult<Py<PyDict>> {
        view_to_py(py, &self.inner.view())
    }

    /// Pending events as JSON strings, oldest first
    fn drain_events(&mut self) -> PyResult<Vec<String>> {
        self.inner
            .drain_events()
            .iter()
            .map(|event| {
                serde_json::to_string(event).map_err(|e| {
                    PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(format!(
                        "Failed to serialize event: {}",
                        e
                    ))
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::Clock;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn epoch_now() -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs_f64()
    }

    #[test]
    fn test_default_clock_shares_epoch_base() {
        let mut sim = RustSimulation::new(SimulationConfig::default(), binding_clock(None)).unwrap();

        let result = sim.step(epoch_now());
        assert!(result.dt < 5.0);
        assert!(!result.dropped);
        assert_eq!(result.sold, 0);
        assert_eq!(sim.money(), 100.0);
    }

    #[test]
    fn test_explicit_start_sets_time_base() {
        let clock = binding_clock(Some(500.0));
        assert!(clock.now() >= 500.0 && clock.now() < 505.0);

        let mut sim = RustSimulation::new(SimulationConfig::default(), clock).unwrap();
        assert!(!sim.tick(500.05));
        assert!(sim.tick(502.5));
        // Dropped at 502.5 and carried by that frame's 2.45s only
        assert_eq!(sim.item_positions().len(), 1);
        assert!(sim.item_positions()[0] < 3.0);
    }
}
