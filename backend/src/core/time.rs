//! Time management for the simulation
//!
//! The simulation is driven by an external loop that calls `tick` roughly
//! every frame. Timestamps are plain `f64` seconds taken from a [`Clock`],
//! so tests and headless drivers can supply synthetic time instead of
//! real elapsed time.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// A source of timestamps, in seconds.
///
/// Implementations must be monotonically non-decreasing for the simulation
/// to see non-negative frame deltas. A clock that goes backwards is tolerated
/// (the delta is clamped to zero) but stalls the belt for that frame.
pub trait Clock: Send + Sync {
    /// Current time in seconds
    fn now(&self) -> f64;
}

/// Real monotonic time, in seconds since the clock was created plus an offset
///
/// The offset lets a driver keep its own time base: a clock created with
/// `starting_at(time.time())` reports timestamps comparable to the driver's
/// own wall-clock readings, so explicit and sampled ticks can be mixed.
///
/// # Example
/// ```
/// use tycoon_core_rs::core::time::{Clock, SystemClock};
///
/// let clock = SystemClock::new();
/// let a = clock.now();
/// let b = clock.now();
/// assert!(b >= a);
///
/// let anchored = SystemClock::starting_at(1_000.0);
/// assert!(anchored.now() >= 1_000.0);
/// ```
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
    start: f64,
}

impl SystemClock {
    /// Clock reading zero at creation
    pub fn new() -> Self {
        Self::starting_at(0.0)
    }

    /// Clock reading `start` at creation
    pub fn starting_at(start: f64) -> Self {
        Self {
            origin: Instant::now(),
            start,
        }
    }

    /// Clock in Unix-epoch seconds, the base of Python's `time.time()`
    ///
    /// Falls back to zero if the system time is before the epoch.
    pub fn since_epoch() -> Self {
        let start = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);
        Self::starting_at(start)
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.start + self.origin.elapsed().as_secs_f64()
    }
}

/// Synthetic clock whose time only moves when told to
///
/// Clones share the same underlying time, so a test can hand one clone to a
/// `Simulation` and keep another to drive it.
///
/// # Example
/// ```
/// use tycoon_core_rs::core::time::{Clock, ManualClock};
///
/// let clock = ManualClock::new(0.0);
/// let handle = clock.clone();
///
/// handle.advance(1.5);
/// assert_eq!(clock.now(), 1.5);
///
/// handle.set(10.0);
/// assert_eq!(clock.now(), 10.0);
/// ```
#[derive(Debug, Clone)]
pub struct ManualClock {
    bits: Arc<AtomicU64>,
}

impl ManualClock {
    /// Create a clock starting at `start` seconds
    pub fn new(start: f64) -> Self {
        Self {
            bits: Arc::new(AtomicU64::new(start.to_bits())),
        }
    }

    /// Jump to an absolute time
    pub fn set(&self, now: f64) {
        self.bits.store(now.to_bits(), Ordering::SeqCst);
    }

    /// Move time forward by `seconds`
    pub fn advance(&self, seconds: f64) {
        assert!(seconds >= 0.0, "seconds must be non-negative");
        let next = self.now() + seconds;
        self.set(next);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::SeqCst))
    }
}

/// Tracks processed ticks and the timestamp of the last one
///
/// # Example
/// ```
/// use tycoon_core_rs::TimeManager;
///
/// let mut time = TimeManager::new(0.0);
/// assert_eq!(time.current_tick(), 0);
///
/// let dt = time.advance(0.25);
/// assert_eq!(dt, 0.25);
/// assert_eq!(time.current_tick(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeManager {
    /// Ticks processed since the session started
    current_tick: usize,
    /// Timestamp of the last processed tick (seconds)
    last_tick_at: f64,
}

impl TimeManager {
    /// Create a new TimeManager anchored at `start`
    pub fn new(start: f64) -> Self {
        Self {
            current_tick: 0,
            last_tick_at: start,
        }
    }

    /// Record a tick at `now` and return the elapsed time since the last one
    ///
    /// The returned delta is clamped to be non-negative, so a clock that
    /// steps backwards never moves items in reverse.
    ///
    /// # Example
    /// ```
    /// use tycoon_core_rs::TimeManager;
    ///
    /// let mut time = TimeManager::new(5.0);
    /// assert_eq!(time.advance(4.0), 0.0);
    /// assert_eq!(time.last_tick_at(), 4.0);
    /// ```
    pub fn advance(&mut self, now: f64) -> f64 {
        let dt = (now - self.last_tick_at).max(0.0);
        self.last_tick_at = now;
        self.current_tick += 1;
        dt
    }

    /// Number of ticks processed so far
    pub fn current_tick(&self) -> usize {
        self.current_tick
    }

    /// Timestamp of the most recent tick
    pub fn last_tick_at(&self) -> f64 {
        self.last_tick_at
    }
}
