//! Running mean and count that can be read while it is being written
//!
//! Parallel tree searches keep one accumulator per node and update it from
//! whichever thread finishes a playout, while other threads read it to pick
//! the next move. Taking a lock for every read is too expensive there, so this
//! variant stores both fields in atomics and relies on write ordering instead.

use core::sync::atomic::{AtomicU64, Ordering};

use super::Accumulator;

/// Lock-free running mean and count over `f64` samples
///
/// # Memory ordering
///
/// The count doubles as the "ready" flag for the mean:
///
/// - writers store the new mean first and then publish the new count with
///   [`Ordering::Release`];
/// - readers load the count with [`Ordering::Acquire`] and only then the mean.
///
/// A reader that sees a positive count is therefore guaranteed to see the
/// mean belonging to that count or to a later update, never an
/// uninitialized one. [`clear`](Self::clear) only publishes a zero count and
/// leaves the old mean in place, so it cannot hand a reader that still sees
/// the previous count a zeroed mean.
///
/// Reads are not a consistent snapshot: the mean can be one or more updates
/// newer than the count it was read with. Both always describe some recent
/// state.
///
/// Only one thread may write at a time. Concurrent writers do not cause
/// undefined behavior but may overwrite each other's updates.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
///
/// use incstats::statistics::AtomicAccumulator;
///
/// let acc = Arc::new(AtomicAccumulator::new());
///
/// let writer = {
///     let acc = Arc::clone(&acc);
///     thread::spawn(move || {
///         for i in 0..1000 {
///             acc.add((i % 10) as f64);
///         }
///     })
/// };
///
/// if let Some(mean) = acc.mean() {
///     assert!((0.0..=9.0).contains(&mean));
/// }
///
/// writer.join().unwrap();
/// assert_eq!(acc.count(), 1000);
/// assert!((acc.mean().unwrap() - 4.5).abs() < 1e-9);
/// ```
#[derive(Debug, Default)]
pub struct AtomicAccumulator {
    /// Number (or total weight) of samples; written last
    count: AtomicU64,
    /// `f64` bits of the mean; written first
    mean: AtomicU64,
}

impl AtomicAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self {
            count: AtomicU64::new(0),
            mean: AtomicU64::new(0f64.to_bits()),
        }
    }

    /// Create an accumulator holding the given state
    pub fn from_accumulator(acc: &Accumulator<f64, u64>) -> Self {
        let this = Self::new();
        if acc.is_defined() {
            this.publish(acc.mean(), acc.count());
        }
        this
    }

    fn load_mean(&self) -> f64 {
        f64::from_bits(self.mean.load(Ordering::Relaxed))
    }

    /// Store the mean, then release the count that makes it visible
    fn publish(&self, mean: f64, count: u64) {
        self.mean.store(mean.to_bits(), Ordering::Relaxed);
        self.count.store(count, Ordering::Release);
    }

    /// Add a single sample
    ///
    /// # Panics
    ///
    /// Panics if the count overflows.
    pub fn add(&self, value: f64) {
        self.add_weighted(value, 1);
    }

    /// Add `weight` samples with the given value
    ///
    /// # Panics
    ///
    /// Panics if the count overflows.
    pub fn add_weighted(&self, value: f64, weight: u64) {
        let count = self.count.load(Ordering::Relaxed);
        let mut acc = if count > 0 {
            Accumulator::with_mean(self.load_mean(), count)
        } else {
            Accumulator::new()
        };
        acc.add_weighted(value, weight);
        self.publish(acc.mean(), acc.count());
    }

    /// Remove a single sample, clearing if it was the last one
    pub fn remove(&self, value: f64) {
        let count = self.count.load(Ordering::Relaxed);
        if count > 1 {
            let mut acc = Accumulator::with_mean(self.load_mean(), count);
            acc.remove(value);
            self.publish(acc.mean(), acc.count());
        } else {
            self.clear();
        }
    }

    /// Remove `weight` samples with the given value, clearing if nothing
    /// would be left
    ///
    /// # Panics
    ///
    /// Panics if `weight` exceeds the current count.
    pub fn remove_weighted(&self, value: f64, weight: u64) {
        let count = self.count.load(Ordering::Relaxed);
        assert!(
            count >= weight,
            "cannot remove weight {} from count {}",
            weight,
            count
        );
        if count > weight {
            let mut acc = Accumulator::with_mean(self.load_mean(), count);
            acc.remove_weighted(value, weight);
            self.publish(acc.mean(), acc.count());
        } else {
            self.clear();
        }
    }

    /// Reset to the empty state
    pub fn clear(&self) {
        self.count.store(0, Ordering::Release);
    }

    /// Overwrite the state with a known mean and count
    ///
    /// # Panics
    ///
    /// Panics if `count` is zero.
    pub fn initialize(&self, mean: f64, count: u64) {
        assert!(count > 0, "initial count must be positive");
        self.publish(mean, count);
    }

    /// Number (or total weight) of samples
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Acquire)
    }

    /// Whether at least one sample has been added
    pub fn is_defined(&self) -> bool {
        self.count() > 0
    }

    /// The mean, or `None` while empty
    pub fn mean(&self) -> Option<f64> {
        if self.count() > 0 {
            Some(self.load_mean())
        } else {
            None
        }
    }

    /// Copy the current state into a plain [`Accumulator`]
    pub fn snapshot(&self) -> Accumulator<f64, u64> {
        let count = self.count();
        if count > 0 {
            Accumulator::with_mean(self.load_mean(), count)
        } else {
            Accumulator::new()
        }
    }
}
