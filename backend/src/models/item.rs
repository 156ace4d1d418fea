//! Item model
//!
//! One unit of product in transit on the belt. Items are fungible: there is
//! no identity beyond their fields, and presentation-only attributes such as
//! colour or shape belong to the rendering layer.

use serde::{Deserialize, Serialize};

/// A single item riding the belt
///
/// # Example
/// ```
/// use tycoon_core_rs::Item;
///
/// let item = Item::new(12.5);
/// assert_eq!(item.position(), 0.0);
/// assert_eq!(item.created_at(), 12.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Distance travelled along the belt
    position: f64,

    /// Timestamp of the drop that produced this item (informational)
    created_at: f64,
}

impl Item {
    /// Create a freshly dropped item at the start of the belt
    pub fn new(created_at: f64) -> Self {
        Self {
            position: 0.0,
            created_at,
        }
    }

    /// Create an item already partway along a belt
    ///
    /// # Example
    /// ```
    /// use tycoon_core_rs::Item;
    ///
    /// let item = Item::at(4.0, 0.0);
    /// assert_eq!(item.position(), 4.0);
    /// ```
    pub fn at(position: f64, created_at: f64) -> Self {
        Self {
            position,
            created_at,
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn created_at(&self) -> f64 {
        self.created_at
    }

    /// Move the item forward by `distance`
    pub(crate) fn advance_by(&mut self, distance: f64) {
        self.position += distance;
    }
}
