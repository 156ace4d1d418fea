//! Domain models for the tycoon simulation

pub mod belt;
pub mod economy;
pub mod event;
pub mod generator;
pub mod item;

// Re-exports
pub use belt::Belt;
pub use economy::{
    Economy, EconomyError, ParseUpgradeKindError, PurchaseReceipt, UpgradeCosts, UpgradeEffects,
    UpgradeKind,
};
pub use event::{Event, EventLog};
pub use generator::Generator;
pub use item::Item;
