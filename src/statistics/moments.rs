//! Running mean and variance
//!
//! Extends the [`Accumulator`] with a running population variance.
//! Supports merging for combining statistics gathered separately.

use core::fmt;
use core::str::FromStr;

use num_traits::Float;

use super::{read_token, Accumulator};
use crate::count::Count;
use crate::traits::{MergeError, ParseError, Statistic};

/// Running mean, variance and standard deviation
///
/// The variance is updated from the previous count, mean and variance with
///
/// ```text
/// variance' = (n * (variance + mean²) + value²) / n' - mean'²
/// ```
///
/// which needs no stored samples. The formula subtracts two quantities of
/// similar size, so with very large counts and a variance that is tiny
/// relative to the squared mean it loses precision and can even go slightly
/// negative. [`deviation`](Self::deviation) treats such a negative variance
/// as zero.
///
/// Samples cannot be removed: without the raw samples there is no sound way
/// to take one back out of the variance.
///
/// # Example
///
/// ```
/// use incstats::statistics::MomentStatistics;
///
/// let mut stats = MomentStatistics::<f64, u64>::new();
///
/// for value in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
///     stats.add(value);
/// }
///
/// assert!((stats.mean() - 5.0).abs() < 0.001);
/// assert!((stats.variance() - 4.0).abs() < 0.001);
/// assert!((stats.deviation() - 2.0).abs() < 0.001);
/// ```
///
/// # Combining
///
/// ```
/// use incstats::statistics::MomentStatistics;
///
/// let mut stats1 = MomentStatistics::<f64, u64>::new();
/// let mut stats2 = MomentStatistics::<f64, u64>::new();
///
/// for v in [1.0, 2.0, 3.0] {
///     stats1.add(v);
/// }
/// for v in [4.0, 5.0, 6.0] {
///     stats2.add(v);
/// }
///
/// stats1.merge_moments(&stats2);
/// assert_eq!(stats1.count(), 6);
/// assert!((stats1.mean() - 3.5).abs() < 0.001);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MomentStatistics<V = f64, C = u64> {
    accumulator: Accumulator<V, C>,
    /// Population variance, zero while empty
    variance: V,
}

impl<V: Float, C: Count> Default for MomentStatistics<V, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Float, C: Count> MomentStatistics<V, C> {
    /// Create empty statistics
    pub fn new() -> Self {
        Self {
            accumulator: Accumulator::new(),
            variance: V::zero(),
        }
    }

    /// Create statistics that already represent `count` samples with the
    /// given mean and zero variance
    pub fn with_mean(mean: V, count: C) -> Self {
        Self {
            accumulator: Accumulator::with_mean(mean, count),
            variance: V::zero(),
        }
    }

    /// Add a sample
    ///
    /// # Panics
    ///
    /// Panics if an exact count overflows.
    pub fn add(&mut self, value: V) {
        if self.is_defined() {
            let count_old: V = self.accumulator.count().to_value();
            let mean_old = self.accumulator.mean();
            self.accumulator.add(value);
            let mean = self.accumulator.mean();
            let count: V = self.accumulator.count().to_value();
            self.variance = (count_old * (self.variance + mean_old * mean_old) + value * value)
                / count
                - mean * mean;
        } else {
            self.accumulator.add(value);
            self.variance = V::zero();
        }
    }

    /// Reset to the empty state
    pub fn clear(&mut self) {
        self.accumulator.clear();
        self.variance = V::zero();
    }

    /// Whether any samples are represented
    pub fn is_defined(&self) -> bool {
        self.accumulator.is_defined()
    }

    /// Mean of all samples
    ///
    /// Must only be called while [`is_defined`](Self::is_defined) holds.
    pub fn mean(&self) -> V {
        self.accumulator.mean()
    }

    /// Number (or total weight) of samples
    pub fn count(&self) -> C {
        self.accumulator.count()
    }

    /// Population variance
    pub fn variance(&self) -> V {
        self.variance
    }

    /// Population standard deviation
    ///
    /// A variance pushed below zero by rounding is treated as zero.
    pub fn deviation(&self) -> V {
        self.variance.max(V::zero()).sqrt()
    }

    /// The underlying count and mean
    pub fn accumulator(&self) -> &Accumulator<V, C> {
        &self.accumulator
    }

    /// Combine with statistics gathered from another stream
    ///
    /// Uses Chan et al.'s pairwise formula, so the result matches adding
    /// both streams to one instance (up to rounding).
    ///
    /// # Panics
    ///
    /// Panics if an exact count overflows.
    pub fn merge_moments(&mut self, other: &Self) {
        if !other.is_defined() {
            return;
        }
        if !self.is_defined() {
            *self = *other;
            return;
        }

        let n1: V = self.count().to_value();
        let n2: V = other.count().to_value();
        let delta = other.mean() - self.mean();

        self.accumulator.merge_accumulator(&other.accumulator);
        let n: V = self.count().to_value();

        self.variance =
            (n1 * self.variance + n2 * other.variance) / n + delta * delta * (n1 * n2 / (n * n));
    }
}

impl<V: Float + fmt::Display, C: Count> MomentStatistics<V, C> {
    /// Write `"<count> <mean> <variance>"`
    pub fn save_as_text<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        self.accumulator.save_as_text(out)?;
        write!(out, " {}", self.variance)
    }
}

impl<V: Float + FromStr, C: Count> MomentStatistics<V, C> {
    /// Load the text written by [`save_as_text`](Self::save_as_text)
    ///
    /// Anything after the three fields is ignored. On error the statistics
    /// are left unchanged.
    pub fn load_from_text(&mut self, text: &str) -> Result<(), ParseError> {
        self.read_text(&mut text.split_whitespace())
    }

    /// Read count, mean and variance from a stream of whitespace-separated
    /// tokens, leaving later tokens for the caller
    pub fn read_text<'a, I>(&mut self, tokens: &mut I) -> Result<(), ParseError>
    where
        I: Iterator<Item = &'a str>,
    {
        let mut accumulator = self.accumulator;
        accumulator.read_text(tokens)?;
        let variance: V = read_token(tokens, "variance")?;
        self.accumulator = accumulator;
        self.variance = variance;
        Ok(())
    }
}

impl<V: Float + fmt::Display, C: Count> fmt::Display for MomentStatistics<V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_defined() {
            write!(f, "{} dev={}", self.mean(), self.deviation())
        } else {
            write!(f, "-")
        }
    }
}

impl<V: Float + fmt::Debug, C: Count> Statistic for MomentStatistics<V, C> {
    type Value = V;
    type Count = C;

    fn update(&mut self, value: V) {
        self.add(value);
    }

    fn merge(&mut self, other: &Self) -> Result<(), MergeError> {
        self.merge_moments(other);
        Ok(())
    }

    fn clear(&mut self) {
        MomentStatistics::clear(self);
    }

    fn count(&self) -> C {
        MomentStatistics::count(self)
    }

    fn is_defined(&self) -> bool {
        MomentStatistics::is_defined(self)
    }
}
