//! Simulation Engine
//!
//! Composes the generator, belt and economy and drives them one frame at a
//! time. An external driver (console loop, GUI timer, Python binding) calls
//! [`Simulation::tick`] roughly every 50ms and the purchase operations on
//! user input.
//!
//! # Architecture
//!
//! ```text
//! For each tick at time `now`:
//! 1. dt = max(now - last_tick, 0); last_tick = now
//! 2. Generator drop check (new item goes on the belt at position 0)
//! 3. Belt advances every item by speed * dt
//! 4. Items at or past the belt end are removed
//! 5. Economy credits sold_count * object_price
//! 6. Log events
//! ```
//!
//! All mutation happens synchronously inside `tick` or a purchase call. A
//! multi-threaded driver must guard the whole `Simulation` with one lock,
//! since purchases read and write generator and belt state that `tick` also
//! touches.
//!
//! # Example
//!
//! ```rust
//! use tycoon_core_rs::core::time::ManualClock;
//! use tycoon_core_rs::orchestrator::{Simulation, SimulationConfig};
//!
//! let clock = ManualClock::new(0.0);
//! let mut sim = Simulation::new(SimulationConfig::default(), clock.clone()).unwrap();
//!
//! // Defaults: one drop every 2s, belt of length 10 at speed 1
//! assert!(!sim.tick(1.0));
//! assert!(sim.tick(2.0));
//! assert_eq!(sim.items().len(), 1);
//!
//! // Starting money covers exactly one price upgrade
//! assert!(sim.purchase_price_upgrade());
//! assert!(!sim.purchase_price_upgrade());
//! ```

use crate::core::time::{Clock, TimeManager};
use crate::models::belt::Belt;
use crate::models::economy::{Economy, EconomyError, PurchaseReceipt, UpgradeCosts, UpgradeEffects, UpgradeKind};
use crate::models::event::{Event, EventLog};
use crate::models::generator::Generator;
use crate::models::item::Item;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Configuration Types
// ============================================================================

/// Complete simulation configuration
///
/// Every field has a default matching a fresh session (money 100, price 10,
/// interval 2s, speed 1, length 10, costs 50/50/100), so a partial JSON
/// document only needs the values it changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub generator: GeneratorConfig,
    pub belt: BeltConfig,
    pub economy: EconomyConfig,
}

/// Generator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Starting seconds between drops
    pub drop_interval: f64,

    /// Floor the interval can never be upgraded below
    pub min_drop_interval: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            drop_interval: 2.0,
            min_drop_interval: crate::models::generator::MIN_DROP_INTERVAL,
        }
    }
}

/// Belt settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeltConfig {
    /// Starting speed in units/second
    pub speed: f64,

    /// Distance from drop point to sale point (fixed for the session)
    pub length: f64,
}

impl Default for BeltConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            length: 10.0,
        }
    }
}

/// Economy settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    pub starting_money: f64,
    pub object_price: f64,
    pub base_costs: UpgradeCosts,
    pub effects: UpgradeEffects,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting_money: 100.0,
            object_price: 10.0,
            base_costs: UpgradeCosts::default(),
            effects: UpgradeEffects::default(),
        }
    }
}

impl SimulationConfig {
    /// Parse a configuration from JSON, filling omitted fields with defaults
    ///
    /// # Example
    /// ```
    /// use tycoon_core_rs::orchestrator::SimulationConfig;
    ///
    /// let config = SimulationConfig::from_json(r#"{"belt": {"length": 5}}"#).unwrap();
    /// assert_eq!(config.belt.length, 5.0);
    /// assert_eq!(config.belt.speed, 1.0);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, SimulationError> {
        let config: SimulationConfig =
            serde_json::from_str(json).map_err(|e| SimulationError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every value is usable
    pub fn validate(&self) -> Result<(), SimulationError> {
        let g = &self.generator;
        let b = &self.belt;
        let e = &self.economy;

        let finite = [
            ("generator.drop_interval", g.drop_interval),
            ("generator.min_drop_interval", g.min_drop_interval),
            ("belt.speed", b.speed),
            ("belt.length", b.length),
            ("economy.starting_money", e.starting_money),
            ("economy.object_price", e.object_price),
            ("economy.base_costs.dropper", e.base_costs.dropper),
            ("economy.base_costs.conveyor", e.base_costs.conveyor),
            ("economy.base_costs.price", e.base_costs.price),
            ("economy.effects.dropper_interval_reduction", e.effects.dropper_interval_reduction),
            ("economy.effects.conveyor_speed_increase", e.effects.conveyor_speed_increase),
            ("economy.effects.price_increase", e.effects.price_increase),
            ("economy.effects.cost_growth_factor", e.effects.cost_growth_factor),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(SimulationError::InvalidConfig(format!("{} must be finite", name)));
            }
        }

        if g.min_drop_interval <= 0.0 {
            return Err(SimulationError::InvalidConfig(
                "generator.min_drop_interval must be positive".to_string(),
            ));
        }
        if g.drop_interval < g.min_drop_interval {
            return Err(SimulationError::InvalidConfig(format!(
                "generator.drop_interval {} is below the floor {}",
                g.drop_interval, g.min_drop_interval
            )));
        }
        if b.speed < 0.0 {
            return Err(SimulationError::InvalidConfig(
                "belt.speed must be non-negative".to_string(),
            ));
        }
        if b.length <= 0.0 {
            return Err(SimulationError::InvalidConfig(
                "belt.length must be positive".to_string(),
            ));
        }

        let non_negative = [
            ("economy.starting_money", e.starting_money),
            ("economy.object_price", e.object_price),
            ("economy.base_costs.dropper", e.base_costs.dropper),
            ("economy.base_costs.conveyor", e.base_costs.conveyor),
            ("economy.base_costs.price", e.base_costs.price),
            ("economy.effects.dropper_interval_reduction", e.effects.dropper_interval_reduction),
            ("economy.effects.conveyor_speed_increase", e.effects.conveyor_speed_increase),
            ("economy.effects.price_increase", e.effects.price_increase),
        ];
        for (name, value) in non_negative {
            if value < 0.0 {
                return Err(SimulationError::InvalidConfig(format!(
                    "{} must be non-negative",
                    name
                )));
            }
        }

        if e.effects.cost_growth_factor < 1.0 {
            return Err(SimulationError::InvalidConfig(
                "economy.effects.cost_growth_factor must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Results and Errors
// ============================================================================

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickResult {
    /// Tick number (0 for the first processed tick)
    pub tick: usize,

    /// Elapsed seconds applied to the belt
    pub dt: f64,

    /// Whether the generator dropped an item
    pub dropped: bool,

    /// Number of items sold
    pub sold: usize,

    /// Currency credited for those items
    pub revenue: f64,
}

/// Simulation error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// Configuration validation error
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Configuration document could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(String),

    /// Snapshot could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Running totals for the session
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub items_dropped: usize,
    pub items_sold: usize,
    pub total_revenue: f64,
    pub upgrades_purchased: usize,
}

/// Read-only snapshot of everything a renderer needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationView {
    pub tick: usize,
    pub running: bool,
    pub money: f64,
    pub object_price: f64,
    pub drop_interval: f64,
    pub drop_rate: f64,
    /// Seconds until the generator's next drop, measured from the last tick
    pub next_drop_in: f64,
    pub belt_speed: f64,
    pub belt_length: f64,
    /// Item positions in belt order
    pub item_positions: Vec<f64>,
    pub dropper_upgrade_cost: f64,
    pub conveyor_upgrade_cost: f64,
    pub price_upgrade_cost: f64,
    pub stats: SessionStats,
}

impl SimulationView {
    pub fn to_json(&self) -> Result<String, SimulationError> {
        serde_json::to_string(self).map_err(|e| SimulationError::Serialization(e.to_string()))
    }
}

// ============================================================================
// Simulation
// ============================================================================

/// Top-level simulation state for one session
///
/// Owns the generator, belt and economy outright. The economy borrows the
/// other two only for the duration of a purchase.
pub struct Simulation {
    generator: Generator,
    belt: Belt,
    economy: Economy,
    time: TimeManager,
    clock: Box<dyn Clock>,
    running: bool,
    stats: SessionStats,
    event_log: EventLog,
}

impl Simulation {
    /// Create a simulation from configuration
    ///
    /// The clock is sampled once to anchor both the first drop and the
    /// first frame delta.
    ///
    /// # Errors
    /// `SimulationError::InvalidConfig` if validation fails.
    pub fn new(config: SimulationConfig, clock: impl Clock + 'static) -> Result<Self, SimulationError> {
        config.validate()?;
        Ok(Self::build(&config, Box::new(clock)))
    }

    /// Create a simulation with the standard starting values
    pub fn with_defaults(clock: impl Clock + 'static) -> Self {
        Self::build(&SimulationConfig::default(), Box::new(clock))
    }

    fn build(config: &SimulationConfig, clock: Box<dyn Clock>) -> Self {
        let start = clock.now();
        let generator = Generator::with_floor(
            config.generator.drop_interval,
            config.generator.min_drop_interval,
            start,
        );
        let belt = Belt::new(config.belt.speed, config.belt.length);
        let economy = Economy::with_settings(
            config.economy.starting_money,
            config.economy.object_price,
            config.economy.base_costs,
            config.economy.effects,
        );

        Self {
            generator,
            belt,
            economy,
            time: TimeManager::new(start),
            clock,
            running: true,
            stats: SessionStats::default(),
            event_log: EventLog::new(),
        }
    }

    // ========================================================================
    // Tick Loop
    // ========================================================================

    /// Process one frame at time `now`; returns whether an item was dropped
    pub fn tick(&mut self, now: f64) -> bool {
        self.step(now).dropped
    }

    /// Process one frame at the injected clock's current time
    pub fn tick_clock(&mut self) -> bool {
        let now = self.clock.now();
        self.tick(now)
    }

    /// Process one frame at time `now` and report everything that happened
    ///
    /// The caller is expected to stop calling this once [`is_running`]
    /// returns false; the simulation does not refuse ticks itself.
    ///
    /// [`is_running`]: Simulation::is_running
    pub fn step(&mut self, now: f64) -> TickResult {
        let tick = self.time.current_tick();
        let dt = self.time.advance(now);

        // STEP 1: DROP
        let dropped = match self.generator.tick(now) {
            Some(item) => {
                self.belt.add_item(item);
                self.stats.items_dropped += 1;
                self.event_log.log(Event::Drop { tick, at: now });
                true
            }
            None => false,
        };

        // STEP 2: MOVE
        self.belt.advance(dt);

        // STEP 3: SELL
        let sold = self.belt.drain_sold().len();
        let mut revenue = 0.0;
        if sold > 0 {
            revenue = self.economy.credit_sale(sold);
            self.stats.items_sold += sold;
            self.stats.total_revenue += revenue;
            self.event_log.log(Event::Sale {
                tick,
                count: sold,
                revenue,
                balance: self.economy.money(),
            });
        }

        TickResult {
            tick,
            dt,
            dropped,
            sold,
            revenue,
        }
    }

    /// Mark the session as finished
    ///
    /// The driver loop checks [`is_running`](Simulation::is_running) and
    /// stops ticking. Calling this twice logs only one `Stopped` event.
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            self.event_log.log(Event::Stopped {
                tick: self.time.current_tick(),
            });
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    // ========================================================================
    // Shop
    // ========================================================================

    /// Buy one upgrade of `kind`, logging the outcome
    ///
    /// # Errors
    /// `EconomyError::InsufficientFunds` if the balance does not cover the
    /// current cost; no state changes in that case.
    pub fn purchase(&mut self, kind: UpgradeKind) -> Result<PurchaseReceipt, EconomyError> {
        let tick = self.time.current_tick();
        match self
            .economy
            .purchase(kind, &mut self.generator, &mut self.belt)
        {
            Ok(receipt) => {
                self.stats.upgrades_purchased += 1;
                self.event_log.log(Event::UpgradePurchased {
                    tick,
                    kind,
                    cost: receipt.cost,
                    next_cost: receipt.next_cost,
                    balance: receipt.balance,
                });
                Ok(receipt)
            }
            Err(err) => {
                let EconomyError::InsufficientFunds {
                    required,
                    available,
                    ..
                } = &err;
                self.event_log.log(Event::UpgradeRejected {
                    tick,
                    kind,
                    cost: *required,
                    balance: *available,
                });
                Err(err)
            }
        }
    }

    /// Shorten the drop interval; `false` if the player cannot afford it
    pub fn purchase_dropper_upgrade(&mut self) -> bool {
        self.purchase(UpgradeKind::Dropper).is_ok()
    }

    /// Speed up the belt; `false` if the player cannot afford it
    pub fn purchase_conveyor_upgrade(&mut self) -> bool {
        self.purchase(UpgradeKind::Conveyor).is_ok()
    }

    /// Raise the sale price; `false` if the player cannot afford it
    pub fn purchase_price_upgrade(&mut self) -> bool {
        self.purchase(UpgradeKind::Price).is_ok()
    }

    // ========================================================================
    // Read Accessors
    // ========================================================================

    /// Current time according to the injected clock
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    pub fn current_tick(&self) -> usize {
        self.time.current_tick()
    }

    pub fn last_tick_at(&self) -> f64 {
        self.time.last_tick_at()
    }

    pub fn money(&self) -> f64 {
        self.economy.money()
    }

    pub fn object_price(&self) -> f64 {
        self.economy.object_price()
    }

    pub fn drop_interval(&self) -> f64 {
        self.generator.drop_interval()
    }

    pub fn drop_rate(&self) -> f64 {
        self.generator.drop_rate()
    }

    pub fn belt_speed(&self) -> f64 {
        self.belt.speed()
    }

    pub fn belt_length(&self) -> f64 {
        self.belt.length()
    }

    /// Items on the belt, oldest (furthest along) first
    pub fn items(&self) -> &[Item] {
        self.belt.items()
    }

    pub fn item_positions(&self) -> Vec<f64> {
        self.belt.items().iter().map(Item::position).collect()
    }

    pub fn upgrade_cost(&self, kind: UpgradeKind) -> f64 {
        self.economy.cost(kind)
    }

    pub fn dropper_upgrade_cost(&self) -> f64 {
        self.economy.dropper_upgrade_cost()
    }

    pub fn conveyor_upgrade_cost(&self) -> f64 {
        self.economy.conveyor_upgrade_cost()
    }

    pub fn price_upgrade_cost(&self) -> f64 {
        self.economy.price_upgrade_cost()
    }

    pub fn generator(&self) -> &Generator {
        &self.generator
    }

    pub fn belt(&self) -> &Belt {
        &self.belt
    }

    pub fn economy(&self) -> &Economy {
        &self.economy
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Get the event log
    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// Hand all logged events to the caller, leaving the log empty
    pub fn drain_events(&mut self) -> Vec<Event> {
        self.event_log.drain()
    }

    /// Snapshot of all renderable state
    pub fn view(&self) -> SimulationView {
        SimulationView {
            tick: self.time.current_tick(),
            running: self.running,
            money: self.money(),
            object_price: self.object_price(),
            drop_interval: self.drop_interval(),
            drop_rate: self.drop_rate(),
            next_drop_in: self.generator.time_until_drop(self.time.last_tick_at()),
            belt_speed: self.belt_speed(),
            belt_length: self.belt_length(),
            item_positions: self.item_positions(),
            dropper_upgrade_cost: self.dropper_upgrade_cost(),
            conveyor_upgrade_cost: self.conveyor_upgrade_cost(),
            price_upgrade_cost: self.price_upgrade_cost(),
            stats: self.stats,
        }
    }
}
