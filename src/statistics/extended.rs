//! Running mean, variance and extremes

use core::fmt;

use num_traits::Float;

use super::MomentStatistics;
use crate::count::Count;
use crate::traits::{MergeError, Statistic};

/// [`MomentStatistics`] that also track the minimum and maximum sample
///
/// While empty the extremes hold sentinels (`V::max_value()` for the minimum
/// and its negation for the maximum) so that the first sample replaces both.
///
/// # Example
///
/// ```
/// use incstats::statistics::ExtendedStatistics;
///
/// let mut stats = ExtendedStatistics::<f64, u64>::new();
/// for v in [3.0, 1.0, 4.0, 1.0, 5.0] {
///     stats.add(v);
/// }
///
/// assert_eq!(stats.min(), 1.0);
/// assert_eq!(stats.max(), 5.0);
/// assert_eq!(stats.count(), 5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtendedStatistics<V = f64, C = u64> {
    moments: MomentStatistics<V, C>,
    min: V,
    max: V,
}

impl<V: Float, C: Count> Default for ExtendedStatistics<V, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Float, C: Count> ExtendedStatistics<V, C> {
    /// Create empty statistics
    pub fn new() -> Self {
        Self {
            moments: MomentStatistics::new(),
            min: V::max_value(),
            max: -V::max_value(),
        }
    }

    /// Add a sample
    pub fn add(&mut self, value: V) {
        self.moments.add(value);
        if value > self.max {
            self.max = value;
        }
        if value < self.min {
            self.min = value;
        }
    }

    /// Reset to the empty state
    pub fn clear(&mut self) {
        self.moments.clear();
        self.min = V::max_value();
        self.max = -V::max_value();
    }

    /// Whether at least one sample has been added
    pub fn is_defined(&self) -> bool {
        self.moments.is_defined()
    }

    /// Mean of the samples
    pub fn mean(&self) -> V {
        self.moments.mean()
    }

    /// Number (or total weight) of samples
    pub fn count(&self) -> C {
        self.moments.count()
    }

    /// Population variance of the samples
    pub fn variance(&self) -> V {
        self.moments.variance()
    }

    /// Population standard deviation of the samples
    pub fn deviation(&self) -> V {
        self.moments.deviation()
    }

    /// Smallest sample since the last clear
    ///
    /// Only meaningful after at least one [`add`](Self::add).
    pub fn min(&self) -> V {
        debug_assert!(self.is_defined(), "min of empty statistics");
        self.min
    }

    /// Largest sample since the last clear
    ///
    /// Only meaningful after at least one [`add`](Self::add).
    pub fn max(&self) -> V {
        debug_assert!(self.is_defined(), "max of empty statistics");
        self.max
    }

    /// Mean and variance without the extremes
    pub fn moments(&self) -> &MomentStatistics<V, C> {
        &self.moments
    }

    /// Combine with statistics gathered from another stream
    pub fn merge_extended(&mut self, other: &Self) {
        self.moments.merge_moments(&other.moments);
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }
}

impl<V: Float + fmt::Display, C: Count> fmt::Display for ExtendedStatistics<V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_defined() {
            write!(f, "{} min={} max={}", self.moments, self.min, self.max)
        } else {
            write!(f, "-")
        }
    }
}

impl<V: Float + fmt::Debug, C: Count> Statistic for ExtendedStatistics<V, C> {
    type Value = V;
    type Count = C;

    fn update(&mut self, value: V) {
        self.add(value);
    }

    fn merge(&mut self, other: &Self) -> Result<(), MergeError> {
        self.merge_extended(other);
        Ok(())
    }

    fn clear(&mut self) {
        ExtendedStatistics::clear(self);
    }

    fn count(&self) -> C {
        ExtendedStatistics::count(self)
    }

    fn is_defined(&self) -> bool {
        ExtendedStatistics::is_defined(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic() {
        let mut stats = ExtendedStatistics::<f64, u64>::new();
        for v in [3.0, 1.0, 4.0, 1.0, 5.0] {
            stats.add(v);
        }

        assert_eq!(stats.min(), 1.0);
        assert_eq!(stats.max(), 5.0);
        assert_eq!(stats.count(), 5);
        assert!((stats.mean() - 2.8).abs() < 1e-12);
        assert!((stats.variance() - 2.56).abs() < 1e-9);
    }

    #[test]
    fn test_single_negative_value() {
        let mut stats = ExtendedStatistics::<f64, u64>::new();
        stats.add(-7.5);
        assert_eq!(stats.min(), -7.5);
        assert_eq!(stats.max(), -7.5);
    }

    #[test]
    fn test_clear_resets_sentinels() {
        let mut stats = ExtendedStatistics::<f64, u64>::new();
        stats.add(10.0);
        stats.add(-10.0);
        stats.clear();

        assert!(!stats.is_defined());
        assert_eq!(stats, ExtendedStatistics::new());

        stats.add(0.5);
        assert_eq!(stats.min(), 0.5);
        assert_eq!(stats.max(), 0.5);
    }

    #[test]
    fn test_merge() {
        let mut a = ExtendedStatistics::<f64, u64>::new();
        let mut b = ExtendedStatistics::<f64, u64>::new();
        for v in [2.0, 8.0] {
            a.add(v);
        }
        for v in [-1.0, 4.0] {
            b.add(v);
        }

        a.merge(&b).unwrap();
        assert_eq!(a.count(), 4);
        assert_eq!(a.min(), -1.0);
        assert_eq!(a.max(), 8.0);
        assert!((a.mean() - 3.25).abs() < 1e-12);

        // merging an empty one keeps the extremes
        a.merge(&ExtendedStatistics::new()).unwrap();
        assert_eq!(a.min(), -1.0);
        assert_eq!(a.max(), 8.0);
    }

    #[test]
    fn test_display() {
        let mut stats = ExtendedStatistics::<f64, u64>::new();
        assert_eq!(stats.to_string(), "-");

        stats.add(1.0);
        stats.add(3.0);
        assert_eq!(stats.to_string(), "2 dev=1 min=1 max=3");
    }
}
