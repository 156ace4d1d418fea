//! Conveyor belt model
//!
//! Ordered container of in-flight items. Items advance by `speed * dt` each
//! tick and are removed by [`Belt::drain_sold`] once they reach the end.
//!
//! Invariant: after `drain_sold`, every remaining item satisfies
//! `0 <= position < length`.

use crate::models::item::Item;
use serde::{Deserialize, Serialize};

/// Moving belt carrying items toward the sale point
///
/// # Example
/// ```
/// use tycoon_core_rs::{Belt, Item};
///
/// let mut belt = Belt::new(1.0, 5.0);
/// belt.add_item(Item::at(4.0, 0.0));
/// belt.advance(1.0);
///
/// let sold = belt.drain_sold();
/// assert_eq!(sold.len(), 1);
/// assert!(belt.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Belt {
    /// Units per second; only ever increases
    speed: f64,

    /// Distance from drop point to sale point
    length: f64,

    /// Items in drop order (oldest first)
    items: Vec<Item>,
}

impl Belt {
    /// Create an empty belt
    pub fn new(speed: f64, length: f64) -> Self {
        assert!(length > 0.0, "belt length must be positive");
        assert!(speed >= 0.0, "belt speed must be non-negative");
        Self {
            speed,
            length,
            items: Vec::new(),
        }
    }

    /// Append an item at the back of the belt
    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Move every item forward by `speed * dt`
    ///
    /// `dt` must be non-negative; the orchestrator derives it from
    /// monotonic timestamps.
    pub fn advance(&mut self, dt: f64) {
        debug_assert!(dt >= 0.0, "dt must be non-negative");
        let distance = self.speed * dt;
        for item in &mut self.items {
            item.advance_by(distance);
        }
    }

    /// Remove and return every item at or past the end of the belt
    ///
    /// Retained items keep their relative order. This is the only way
    /// items leave the belt.
    pub fn drain_sold(&mut self) -> Vec<Item> {
        let length = self.length;
        let (sold, kept): (Vec<Item>, Vec<Item>) = self
            .items
            .drain(..)
            .partition(|item| item.position() >= length);
        self.items = kept;
        sold
    }

    /// Increase belt speed by `amount`
    pub fn upgrade(&mut self, amount: f64) {
        debug_assert!(amount >= 0.0, "upgrade amount must be non-negative");
        self.speed += amount;
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    /// Items currently on the belt, oldest first
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Fraction of the belt each item has covered, in belt order
    ///
    /// Renderers multiply by their canvas width to place items.
    ///
    /// # Example
    /// ```
    /// use tycoon_core_rs::{Belt, Item};
    ///
    /// let mut belt = Belt::new(1.0, 10.0);
    /// belt.add_item(Item::at(2.5, 0.0));
    /// assert_eq!(belt.progress(), vec![0.25]);
    /// ```
    pub fn progress(&self) -> Vec<f64> {
        self.items
            .iter()
            .map(|item| item.position() / self.length)
            .collect()
    }
}
