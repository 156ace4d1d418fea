//! Event logging for the simulation.
//!
//! Every externally meaningful state change is recorded as an [`Event`] in
//! the simulation's [`EventLog`]. Presentation layers read the log to show
//! feedback ("not enough money", sale popups) and tests use it to check what
//! happened during a tick.
//!
//! # Event Types
//!
//! - **Drop**: the generator produced an item
//! - **Sale**: items reached the end of the belt and were credited
//! - **UpgradePurchased** / **UpgradeRejected**: shop activity
//! - **Stopped**: the session was ended
//!
//! # Example
//!
//! ```rust
//! use tycoon_core_rs::models::Event;
//!
//! let event = Event::Sale {
//!     tick: 10,
//!     count: 2,
//!     revenue: 20.0,
//!     balance: 120.0,
//! };
//!
//! assert_eq!(event.tick(), 10);
//! assert_eq!(event.event_type(), "Sale");
//! ```

use crate::models::economy::UpgradeKind;
use serde::{Deserialize, Serialize};

/// Simulation event capturing a state change.
///
/// `tick` is the number of ticks processed before the event; shop events
/// between two frames carry the tick count at the time of the call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// Generator produced a new item at position 0
    Drop { tick: usize, at: f64 },

    /// Items crossed the end of the belt and were sold
    Sale {
        tick: usize,
        count: usize,
        revenue: f64,
        balance: f64,
    },

    /// An upgrade was bought
    UpgradePurchased {
        tick: usize,
        kind: UpgradeKind,
        cost: f64,
        next_cost: f64,
        balance: f64,
    },

    /// An upgrade was refused for lack of funds
    UpgradeRejected {
        tick: usize,
        kind: UpgradeKind,
        cost: f64,
        balance: f64,
    },

    /// The session was stopped
    Stopped { tick: usize },
}

impl Event {
    /// Get the tick number when this event occurred
    pub fn tick(&self) -> usize {
        match self {
            Event::Drop { tick, .. } => *tick,
            Event::Sale { tick, .. } => *tick,
            Event::UpgradePurchased { tick, .. } => *tick,
            Event::UpgradeRejected { tick, .. } => *tick,
            Event::Stopped { tick } => *tick,
        }
    }

    /// Get a short description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::Drop { .. } => "Drop",
            Event::Sale { .. } => "Sale",
            Event::UpgradePurchased { .. } => "UpgradePurchased",
            Event::UpgradeRejected { .. } => "UpgradeRejected",
            Event::Stopped { .. } => "Stopped",
        }
    }

    /// Upgrade kind, for shop events
    pub fn upgrade_kind(&self) -> Option<UpgradeKind> {
        match self {
            Event::UpgradePurchased { kind, .. } | Event::UpgradeRejected { kind, .. } => {
                Some(*kind)
            }
            _ => None,
        }
    }
}

/// Append-only record of simulation events
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Add an event to the log
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Get the number of events logged
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get all events
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Get events for a specific tick
    pub fn events_at_tick(&self, tick: usize) -> Vec<&Event> {
        self.events.iter().filter(|e| e.tick() == tick).collect()
    }

    /// Get events of a specific type
    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Get shop events for one upgrade kind
    pub fn events_for_upgrade(&self, kind: UpgradeKind) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.upgrade_kind() == Some(kind))
            .collect()
    }

    /// Remove and return all events
    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}
