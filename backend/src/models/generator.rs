//! Generator (dropper) model
//!
//! Produces a new [`Item`] each time the drop interval elapses. The interval
//! can only shrink through upgrades and never goes below its floor.

use crate::models::item::Item;
use serde::{Deserialize, Serialize};

/// Default lower bound on the drop interval, in seconds
pub const MIN_DROP_INTERVAL: f64 = 0.1;

/// Timed item factory
///
/// # Example
/// ```
/// use tycoon_core_rs::Generator;
///
/// let mut generator = Generator::new(2.0, 0.0);
/// assert!(generator.tick(1.0).is_none());
///
/// let item = generator.tick(2.0).unwrap();
/// assert_eq!(item.position(), 0.0);
/// assert_eq!(generator.last_drop_at(), 2.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Generator {
    /// Seconds between drops, never below `min_drop_interval`
    drop_interval: f64,

    /// Floor applied whenever the interval is decreased
    min_drop_interval: f64,

    /// Timestamp of the last successful drop
    last_drop_at: f64,
}

impl Generator {
    /// Create a generator whose first drop is due `drop_interval` after `now`
    pub fn new(drop_interval: f64, now: f64) -> Self {
        Self::with_floor(drop_interval, MIN_DROP_INTERVAL, now)
    }

    /// Create a generator with a custom interval floor
    pub fn with_floor(drop_interval: f64, min_drop_interval: f64, now: f64) -> Self {
        assert!(
            min_drop_interval > 0.0,
            "min_drop_interval must be positive"
        );
        Self {
            drop_interval: drop_interval.max(min_drop_interval),
            min_drop_interval,
            last_drop_at: now,
        }
    }

    /// Drop an item if the interval has elapsed since the last drop
    ///
    /// `last_drop_at` only moves on a successful drop, so repeated early
    /// checks do not postpone the next item.
    pub fn tick(&mut self, now: f64) -> Option<Item> {
        if now - self.last_drop_at >= self.drop_interval {
            self.last_drop_at = now;
            Some(Item::new(now))
        } else {
            None
        }
    }

    /// Shorten the drop interval by `amount`, clamped to the floor
    ///
    /// # Example
    /// ```
    /// use tycoon_core_rs::Generator;
    ///
    /// let mut generator = Generator::new(0.5, 0.0);
    /// generator.upgrade(10.0);
    /// assert_eq!(generator.drop_interval(), 0.1);
    /// ```
    pub fn upgrade(&mut self, amount: f64) {
        debug_assert!(amount >= 0.0, "upgrade amount must be non-negative");
        self.drop_interval = (self.drop_interval - amount).max(self.min_drop_interval);
    }

    pub fn drop_interval(&self) -> f64 {
        self.drop_interval
    }

    pub fn min_drop_interval(&self) -> f64 {
        self.min_drop_interval
    }

    pub fn last_drop_at(&self) -> f64 {
        self.last_drop_at
    }

    /// Items produced per second at the current interval
    pub fn drop_rate(&self) -> f64 {
        1.0 / self.drop_interval
    }

    /// Seconds until the next drop is due at `now` (zero if overdue)
    pub fn time_until_drop(&self, now: f64) -> f64 {
        (self.last_drop_at + self.drop_interval - now).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_early_check_does_not_reset_timer() {
        let mut generator = Generator::new(2.0, 0.0);
        assert!(generator.tick(1.9).is_none());
        assert_eq!(generator.last_drop_at(), 0.0);
        assert!(generator.tick(2.0).is_some());
    }

    #[test]
    fn test_constructor_respects_floor() {
        let generator = Generator::new(0.01, 0.0);
        assert_eq!(generator.drop_interval(), MIN_DROP_INTERVAL);
    }

    #[test]
    #[should_panic(expected = "min_drop_interval must be positive")]
    fn test_zero_floor_panics() {
        Generator::with_floor(1.0, 0.0, 0.0);
    }

    #[test]
    fn test_time_until_drop() {
        let generator = Generator::new(2.0, 10.0);
        assert_eq!(generator.time_until_drop(10.5), 1.5);
        assert_eq!(generator.time_until_drop(13.0), 0.0);
    }
}
