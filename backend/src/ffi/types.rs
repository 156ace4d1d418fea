//! Type conversion utilities for FFI boundary
//!
//! Converts between Rust types and PyO3-compatible types (PyDict, PyList).

use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::models::economy::{UpgradeCosts, UpgradeEffects};
use crate::orchestrator::{
    BeltConfig, EconomyConfig, GeneratorConfig, SimulationConfig, SimulationView, TickResult,
};

// ========================================================================
// PyDict Extraction Helpers
// ========================================================================

/// Extract a field with a default value if missing.
///
/// # Errors
/// Returns an error only if the field exists and type conversion fails.
fn extract_with_default<'py, T>(dict: &Bound<'py, PyDict>, key: &str, default: T) -> PyResult<T>
where
    T: FromPyObject<'py>,
{
    match dict.get_item(key)? {
        Some(value) => value.extract(),
        None => Ok(default),
    }
}

/// Extract an optional nested dict.
fn extract_section<'py>(dict: &Bound<'py, PyDict>, key: &str) -> PyResult<Option<Bound<'py, PyDict>>> {
    match dict.get_item(key)? {
        Some(value) => Ok(Some(value.downcast_into::<PyDict>()?)),
        None => Ok(None),
    }
}

// ========================================================================
// Configuration Parsers
// ========================================================================

/// Parse a simulation config from a Python dict
///
/// Sections (`generator`, `belt`, `economy`) and every field inside them are
/// optional; missing values take the session defaults. Range checks happen
/// in `SimulationConfig::validate`.
pub fn parse_simulation_config(py_config: &Bound<'_, PyDict>) -> PyResult<SimulationConfig> {
    let mut config = SimulationConfig::default();

    if let Some(section) = extract_section(py_config, "generator")? {
        config.generator = parse_generator_config(&section)?;
    }
    if let Some(section) = extract_section(py_config, "belt")? {
        config.belt = parse_belt_config(&section)?;
    }
    if let Some(section) = extract_section(py_config, "economy")? {
        config.economy = parse_economy_config(&section)?;
    }

    Ok(config)
}

fn parse_generator_config(dict: &Bound<'_, PyDict>) -> PyResult<GeneratorConfig> {
    let defaults = GeneratorConfig::default();
    Ok(GeneratorConfig {
        drop_interval: extract_with_default(dict, "drop_interval", defaults.drop_interval)?,
        min_drop_interval: extract_with_default(dict, "min_drop_interval", defaults.min_drop_interval)?,
    })
}

fn parse_belt_config(dict: &Bound<'_, PyDict>) -> PyResult<BeltConfig> {
    let defaults = BeltConfig::default();
    Ok(BeltConfig {
        speed: extract_with_default(dict, "speed", defaults.speed)?,
        length: extract_with_default(dict, "length", defaults.length)?,
    })
}

fn parse_economy_config(dict: &Bound<'_, PyDict>) -> PyResult<EconomyConfig> {
    let defaults = EconomyConfig::default();

    let base_costs = match extract_section(dict, "base_costs")? {
        Some(costs) => UpgradeCosts {
            dropper: extract_with_default(&costs, "dropper", defaults.base_costs.dropper)?,
            conveyor: extract_with_default(&costs, "conveyor", defaults.base_costs.conveyor)?,
            price: extract_with_default(&costs, "price", defaults.base_costs.price)?,
        },
        None => defaults.base_costs,
    };

    let effects = match extract_section(dict, "effects")? {
        Some(fx) => {
            let d = defaults.effects;
            UpgradeEffects {
                dropper_interval_reduction: extract_with_default(
                    &fx,
                    "dropper_interval_reduction",
                    d.dropper_interval_reduction,
                )?,
                conveyor_speed_increase: extract_with_default(
                    &fx,
                    "conveyor_speed_increase",
                    d.conveyor_speed_increase,
                )?,
                price_increase: extract_with_default(&fx, "price_increase", d.price_increase)?,
                cost_growth_factor: extract_with_default(&fx, "cost_growth_factor", d.cost_growth_factor)?,
            }
        }
        None => defaults.effects,
    };

    Ok(EconomyConfig {
        starting_money: extract_with_default(dict, "starting_money", defaults.starting_money)?,
        object_price: extract_with_default(dict, "object_price", defaults.object_price)?,
        base_costs,
        effects,
    })
}

// ========================================================================
// Result Converters
// ========================================================================

/// Convert TickResult to Python dict
pub fn tick_result_to_py(py: Python, result: &TickResult) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);

    dict.set_item("tick", result.tick)?;
    dict.set_item("dt", result.dt)?;
    dict.set_item("dropped", result.dropped)?;
    dict.set_item("sold", result.sold)?;
    dict.set_item("revenue", result.revenue)?;

    Ok(dict.into())
}

/// Convert SimulationView to Python dict
pub fn view_to_py(py: Python, view: &SimulationView) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);

    dict.set_item("tick", view.tick)?;
    dict.set_item("running", view.running)?;
    dict.set_item("money", view.money)?;
    dict.set_item("object_price", view.object_price)?;
    dict.set_item("drop_interval", view.drop_interval)?;
    dict.set_item("drop_rate", view.drop_rate)?;
    dict.set_item("next_drop_in", view.next_drop_in)?;
    dict.set_item("belt_speed", view.belt_speed)?;
    dict.set_item("belt_length", view.belt_length)?;
    dict.set_item("item_positions", view.item_positions.clone())?;
    dict.set_item("dropper_upgrade_cost", view.dropper_upgrade_cost)?;
    dict.set_item("conveyor_upgrade_cost", view.conveyor_upgrade_cost)?;
    dict.set_item("price_upgrade_cost", view.price_upgrade_cost)?;

    let stats = PyDict::new(py);
    stats.set_item("items_dropped", view.stats.items_dropped)?;
    stats.set_item("items_sold", view.stats.items_sold)?;
    stats.set_item("total_revenue", view.stats.total_revenue)?;
    stats.set_item("upgrades_purchased", view.stats.upgrades_purchased)?;
    dict.set_item("stats", stats)?;

    Ok(dict.into())
}
