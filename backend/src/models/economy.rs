//! Economy model
//!
//! Currency ledger, per-item sale price and the three upgrade cost counters.
//!
//! Each purchase follows the same protocol:
//! 1. Check `money >= cost` for that upgrade
//! 2. If short, nothing changes and the purchase is rejected
//! 3. Otherwise debit the cost, apply the effect, and grow that cost by the
//!    configured factor (1.5 by default)
//!
//! Money is never clamped; purchases are gated instead, so the balance can
//! only go down through a purchase the player could afford.

use crate::models::belt::Belt;
use crate::models::generator::Generator;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The three purchasable upgrades
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpgradeKind {
    /// Shortens the generator's drop interval
    Dropper,
    /// Speeds up the belt
    Conveyor,
    /// Raises the sale price per item
    Price,
}

impl UpgradeKind {
    /// All kinds, in menu order
    pub const ALL: [UpgradeKind; 3] = [UpgradeKind::Dropper, UpgradeKind::Conveyor, UpgradeKind::Price];

    pub fn as_str(&self) -> &'static str {
        match self {
            UpgradeKind::Dropper => "dropper",
            UpgradeKind::Conveyor => "conveyor",
            UpgradeKind::Price => "price",
        }
    }
}

impl fmt::Display for UpgradeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when text does not name an upgrade
#[derive(Debug, Error, PartialEq)]
#[error("Unknown upgrade '{0}' (expected 1-3, dropper, conveyor or price)")]
pub struct ParseUpgradeKindError(pub String);

impl FromStr for UpgradeKind {
    type Err = ParseUpgradeKindError;

    /// Accepts console menu digits as well as names
    ///
    /// # Example
    /// ```
    /// use tycoon_core_rs::UpgradeKind;
    ///
    /// assert_eq!("2".parse::<UpgradeKind>().unwrap(), UpgradeKind::Conveyor);
    /// assert_eq!(" Price ".parse::<UpgradeKind>().unwrap(), UpgradeKind::Price);
    /// assert!("q".parse::<UpgradeKind>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "dropper" => Ok(UpgradeKind::Dropper),
            "2" | "conveyor" | "belt" => Ok(UpgradeKind::Conveyor),
            "3" | "price" => Ok(UpgradeKind::Price),
            _ => Err(ParseUpgradeKindError(s.to_string())),
        }
    }
}

/// Errors that can occur during economy operations
#[derive(Debug, Error, PartialEq)]
pub enum EconomyError {
    #[error("Insufficient funds for {kind} upgrade: required {required}, available {available}")]
    InsufficientFunds {
        kind: UpgradeKind,
        required: f64,
        available: f64,
    },
}

/// Current price of each upgrade
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeCosts {
    pub dropper: f64,
    pub conveyor: f64,
    pub price: f64,
}

impl UpgradeCosts {
    pub fn get(&self, kind: UpgradeKind) -> f64 {
        match kind {
            UpgradeKind::Dropper => self.dropper,
            UpgradeKind::Conveyor => self.conveyor,
            UpgradeKind::Price => self.price,
        }
    }

    fn get_mut(&mut self, kind: UpgradeKind) -> &mut f64 {
        match kind {
            UpgradeKind::Dropper => &mut self.dropper,
            UpgradeKind::Conveyor => &mut self.conveyor,
            UpgradeKind::Price => &mut self.price,
        }
    }
}

impl Default for UpgradeCosts {
    fn default() -> Self {
        Self {
            dropper: 50.0,
            conveyor: 50.0,
            price: 100.0,
        }
    }
}

/// Fixed magnitudes applied by each purchase
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeEffects {
    /// Seconds removed from the drop interval per dropper upgrade
    pub dropper_interval_reduction: f64,

    /// Units/second added to belt speed per conveyor upgrade
    pub conveyor_speed_increase: f64,

    /// Currency added to the sale price per price upgrade
    pub price_increase: f64,

    /// Multiplier applied to an upgrade's cost after each purchase of it
    pub cost_growth_factor: f64,
}

impl Default for UpgradeEffects {
    fn default() -> Self {
        Self {
            dropper_interval_reduction: 0.1,
            conveyor_speed_increase: 0.5,
            price_increase: 5.0,
            cost_growth_factor: 1.5,
        }
    }
}

/// Outcome of a successful purchase
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    pub kind: UpgradeKind,
    /// Amount debited
    pub cost: f64,
    /// Price of the next upgrade of the same kind
    pub next_cost: f64,
    /// Balance after the debit
    pub balance: f64,
}

/// Currency ledger and upgrade shop
///
/// The economy does not own the generator or belt; purchases borrow them
/// for the duration of the call.
///
/// # Example
/// ```
/// use tycoon_core_rs::{Economy, Generator};
///
/// let mut economy = Economy::new(1000.0, 10.0);
/// let mut generator = Generator::new(2.0, 0.0);
///
/// assert!(economy.purchase_dropper_upgrade(&mut generator));
/// assert_eq!(economy.money(), 950.0);
/// assert_eq!(economy.dropper_upgrade_cost(), 75.0);
/// assert!((generator.drop_interval() - 1.9).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Economy {
    /// Spendable balance
    money: f64,

    /// Credited per sold item
    object_price: f64,

    /// Next price of each upgrade
    costs: UpgradeCosts,

    /// Per-purchase effect magnitudes
    effects: UpgradeEffects,
}

impl Economy {
    /// Create a ledger with default base costs and effects
    pub fn new(money: f64, object_price: f64) -> Self {
        Self::with_settings(
            money,
            object_price,
            UpgradeCosts::default(),
            UpgradeEffects::default(),
        )
    }

    pub fn with_settings(
        money: f64,
        object_price: f64,
        costs: UpgradeCosts,
        effects: UpgradeEffects,
    ) -> Self {
        Self {
            money,
            object_price,
            costs,
            effects,
        }
    }

    /// Whether the balance covers the next upgrade of `kind`
    pub fn can_afford(&self, kind: UpgradeKind) -> bool {
        self.money >= self.costs.get(kind)
    }

    /// Buy one upgrade of `kind`
    ///
    /// On failure nothing is mutated. On success the balance is debited by
    /// the pre-call cost, the effect is applied to its target, and the cost
    /// of that kind grows by `cost_growth_factor`.
    ///
    /// # Errors
    /// `EconomyError::InsufficientFunds` when `money < cost`.
    pub fn purchase(
        &mut self,
        kind: UpgradeKind,
        generator: &mut Generator,
        belt: &mut Belt,
    ) -> Result<PurchaseReceipt, EconomyError> {
        self.transact(kind, |effects, price| match kind {
            UpgradeKind::Dropper => generator.upgrade(effects.dropper_interval_reduction),
            UpgradeKind::Conveyor => belt.upgrade(effects.conveyor_speed_increase),
            UpgradeKind::Price => *price += effects.price_increase,
        })
    }

    /// Buy a dropper upgrade; `false` if the balance is short
    pub fn purchase_dropper_upgrade(&mut self, generator: &mut Generator) -> bool {
        self.transact(UpgradeKind::Dropper, |effects, _| {
            generator.upgrade(effects.dropper_interval_reduction)
        })
        .is_ok()
    }

    /// Buy a conveyor upgrade; `false` if the balance is short
    pub fn purchase_conveyor_upgrade(&mut self, belt: &mut Belt) -> bool {
        self.transact(UpgradeKind::Conveyor, |effects, _| {
            belt.upgrade(effects.conveyor_speed_increase)
        })
        .is_ok()
    }

    /// Buy a price upgrade; `false` if the balance is short
    pub fn purchase_price_upgrade(&mut self) -> bool {
        self.transact(UpgradeKind::Price, |effects, price| {
            *price += effects.price_increase
        })
        .is_ok()
    }

    /// The single purchase protocol: gate, debit, apply, grow the cost
    ///
    /// `apply` receives the effect magnitudes and the sale price, and must
    /// only touch the target of `kind`.
    fn transact(
        &mut self,
        kind: UpgradeKind,
        apply: impl FnOnce(&UpgradeEffects, &mut f64),
    ) -> Result<PurchaseReceipt, EconomyError> {
        let cost = self.costs.get(kind);
        if !self.can_afford(kind) {
            return Err(EconomyError::InsufficientFunds {
                kind,
                required: cost,
                available: self.money,
            });
        }

        self.money -= cost;
        apply(&self.effects, &mut self.object_price);

        let next_cost = cost * self.effects.cost_growth_factor;
        *self.costs.get_mut(kind) = next_cost;
        Ok(PurchaseReceipt {
            kind,
            cost,
            next_cost,
            balance: self.money,
        })
    }

    /// Credit `count` sold items at the current price and return the revenue
    ///
    /// # Example
    /// ```
    /// use tycoon_core_rs::Economy;
    ///
    /// let mut economy = Economy::new(0.0, 25.0);
    /// assert_eq!(economy.credit_sale(1), 25.0);
    /// assert_eq!(economy.money(), 25.0);
    /// ```
    pub fn credit_sale(&mut self, count: usize) -> f64 {
        let revenue = count as f64 * self.object_price;
        self.money += revenue;
        revenue
    }

    pub fn money(&self) -> f64 {
        self.money
    }

    pub fn object_price(&self) -> f64 {
        self.object_price
    }

    /// Next price of an upgrade
    pub fn cost(&self, kind: UpgradeKind) -> f64 {
        self.costs.get(kind)
    }

    pub fn costs(&self) -> UpgradeCosts {
        self.costs
    }

    pub fn dropper_upgrade_cost(&self) -> f64 {
        self.costs.dropper
    }

    pub fn conveyor_upgrade_cost(&self) -> f64 {
        self.costs.conveyor
    }

    pub fn price_upgrade_cost(&self) -> f64 {
        self.costs.price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaves() -> (Generator, Belt) {
        (Generator::new(2.0, 0.0), Belt::new(1.0, 10.0))
    }

    #[test]
    fn test_purchase_exact_balance_succeeds() {
        let (mut generator, mut belt) = leaves();
        let mut economy = Economy::new(50.0, 10.0);

        let receipt = economy
            .purchase(UpgradeKind::Conveyor, &mut generator, &mut belt)
            .unwrap();

        assert_eq!(receipt.cost, 50.0);
        assert_eq!(receipt.next_cost, 75.0);
        assert_eq!(receipt.balance, 0.0);
        assert_eq!(belt.speed(), 1.5);
    }

    #[test]
    fn test_purchase_error_reports_shortfall() {
        let (mut generator, mut belt) = leaves();
        let mut economy = Economy::new(99.0, 10.0);

        let err = economy
            .purchase(UpgradeKind::Price, &mut generator, &mut belt)
            .unwrap_err();

        assert_eq!(
            err,
            EconomyError::InsufficientFunds {
                kind: UpgradeKind::Price,
                required: 100.0,
                available: 99.0,
            }
        );
        assert_eq!(economy.object_price(), 10.0);
        assert_eq!(economy.price_upgrade_cost(), 100.0);
    }

    #[test]
    fn test_can_afford_tracks_balance() {
        let (mut generator, _) = leaves();
        let mut economy = Economy::new(60.0, 10.0);
        assert!(economy.can_afford(UpgradeKind::Dropper));
        assert!(!economy.can_afford(UpgradeKind::Price));

        assert!(economy.purchase_dropper_upgrade(&mut generator));
        assert!(!economy.can_afford(UpgradeKind::Dropper));
        assert!(!economy.can_afford(UpgradeKind::Conveyor));
    }

    #[test]
    fn test_costs_are_independent() {
        let mut economy = Economy::new(1000.0, 10.0);
        assert!(economy.purchase_price_upgrade());

        assert_eq!(economy.price_upgrade_cost(), 150.0);
        assert_eq!(economy.dropper_upgrade_cost(), 50.0);
        assert_eq!(economy.conveyor_upgrade_cost(), 50.0);
        assert_eq!(economy.object_price(), 15.0);
    }

    #[test]
    fn test_parse_kind_roundtrips_display() {
        for kind in UpgradeKind::ALL {
            assert_eq!(kind.to_string().parse::<UpgradeKind>().unwrap(), kind);
        }
    }
}
