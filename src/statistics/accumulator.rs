//! Running mean and count with removal
//!
//! The accumulator keeps only a count and a mean, updated with the
//! incremental formula `mean += (value - mean) / count`, so it never stores
//! samples and does not lose precision to a growing running sum.

use core::fmt;
use core::str::FromStr;

use num_traits::Float;

use super::{read_count, read_token};
use crate::count::Count;
use crate::traits::{MergeError, ParseError, Statistic};

/// Running mean and count
///
/// Samples can be added and removed one at a time or as weighted batches.
/// Removing everything that was added returns the accumulator to the empty
/// state rather than leaving a zero or negative count behind.
///
/// # Example
///
/// ```
/// use incstats::statistics::Accumulator;
///
/// let mut acc = Accumulator::<f64, u64>::new();
/// acc.add(1.0);
/// acc.add(2.0);
/// acc.add_weighted(6.0, 2);
/// assert_eq!(acc.count(), 4);
/// assert!((acc.mean() - 3.75).abs() < 1e-12);
///
/// acc.remove_weighted(6.0, 2);
/// assert!((acc.mean() - 1.5).abs() < 1e-12);
///
/// acc.remove(1.0);
/// acc.remove(2.0);
/// assert!(!acc.is_defined());
/// ```
///
/// For a version that can be read while another thread writes it, see
/// [`AtomicAccumulator`](super::AtomicAccumulator).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Accumulator<V = f64, C = u64> {
    /// Number (or total weight) of samples
    count: C,
    /// Mean of the samples, zero while empty
    mean: V,
}

impl<V: Float, C: Count> Default for Accumulator<V, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Float, C: Count> Accumulator<V, C> {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self {
            count: C::zero(),
            mean: V::zero(),
        }
    }

    /// Create an accumulator that already represents `count` samples with
    /// the given mean
    pub fn with_mean(mean: V, count: C) -> Self {
        Self { count, mean }
    }

    /// Add a single sample
    ///
    /// # Panics
    ///
    /// Panics if an exact count overflows.
    pub fn add(&mut self, value: V) {
        let count = self.count.increase(C::one());
        self.mean = self.mean + (value - self.mean) / count.to_value::<V>();
        self.count = count;
    }

    /// Add `weight` samples that all have the given value
    ///
    /// Equivalent to calling [`add`](Self::add) `weight` times. A weight
    /// that leaves the total undefined (zero, or below epsilon for float
    /// counts) leaves the accumulator empty.
    ///
    /// # Panics
    ///
    /// Panics if an exact count overflows.
    pub fn add_weighted(&mut self, value: V, weight: C) {
        let count = self.count.increase(weight);
        if !count.is_defined() {
            self.clear();
            return;
        }
        self.mean = self.mean + weight.to_value::<V>() * (value - self.mean) / count.to_value::<V>();
        self.count = count;
    }

    /// Remove a single sample that was previously added
    ///
    /// If this removes the last sample the accumulator is cleared.
    pub fn remove(&mut self, value: V) {
        let count = if self.count > C::one() {
            self.count - C::one()
        } else {
            C::zero()
        };
        if count.is_defined() {
            self.mean = self.mean + (self.mean - value) / count.to_value::<V>();
            self.count = count;
        } else {
            // float counts can be left with rounding noise below epsilon
            self.clear();
        }
    }

    /// Remove `weight` samples with the given value
    ///
    /// If nothing would be left the accumulator is cleared.
    ///
    /// # Panics
    ///
    /// Panics if `weight` exceeds the current count.
    pub fn remove_weighted(&mut self, value: V, weight: C) {
        assert!(
            self.count >= weight,
            "cannot remove weight {} from count {}",
            weight,
            self.count
        );
        let count = self.count - weight;
        if count.is_defined() {
            self.mean = self.mean + weight.to_value::<V>() * (self.mean - value) / count.to_value::<V>();
            self.count = count;
        } else {
            self.clear();
        }
    }

    /// Reset to the empty state
    pub fn clear(&mut self) {
        self.count = C::zero();
        self.mean = V::zero();
    }

    /// Overwrite the state with a known mean and count
    ///
    /// # Panics
    ///
    /// Panics if `count` is not positive.
    pub fn initialize(&mut self, mean: V, count: C) {
        assert!(count > C::zero(), "initial count must be positive");
        self.count = count;
        self.mean = mean;
    }

    /// Whether any samples are represented
    ///
    /// Float counts are compared against epsilon instead of zero.
    pub fn is_defined(&self) -> bool {
        self.count.is_defined()
    }

    /// The mean of all represented samples
    ///
    /// Must only be called while [`is_defined`](Self::is_defined) holds.
    pub fn mean(&self) -> V {
        debug_assert!(self.is_defined(), "mean of an empty accumulator");
        self.mean
    }

    /// Number (or total weight) of samples
    pub fn count(&self) -> C {
        self.count
    }

    /// Fold another accumulator in as a single weighted sample
    pub fn merge_accumulator(&mut self, other: &Self) {
        if other.is_defined() {
            self.add_weighted(other.mean, other.count);
        }
    }
}

impl<V: Float + fmt::Display, C: Count> Accumulator<V, C> {
    /// Write `"<count> <mean>"`
    pub fn save_as_text<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        write!(out, "{} {}", self.count, self.mean)
    }
}

impl<V: Float + FromStr, C: Count> Accumulator<V, C> {
    /// Load the text written by [`save_as_text`](Self::save_as_text)
    ///
    /// Anything after the two fields is ignored. On error the accumulator
    /// is left unchanged.
    pub fn load_from_text(&mut self, text: &str) -> Result<(), ParseError> {
        self.read_text(&mut text.split_whitespace())
    }

    /// Read count and mean from a stream of whitespace-separated tokens,
    /// leaving later tokens for the caller
    pub fn read_text<'a, I>(&mut self, tokens: &mut I) -> Result<(), ParseError>
    where
        I: Iterator<Item = &'a str>,
    {
        let count: C = read_count(tokens)?;
        let mean: V = read_token(tokens, "mean")?;
        self.count = count;
        self.mean = mean;
        Ok(())
    }
}

impl<V: Float + fmt::Display, C: Count> fmt::Display for Accumulator<V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_defined() {
            write!(f, "{}", self.mean)
        } else {
            write!(f, "-")
        }
    }
}

impl<V: Float + fmt::Debug, C: Count> Statistic for Accumulator<V, C> {
    type Value = V;
    type Count = C;

    fn update(&mut self, value: V) {
        self.add(value);
    }

    fn merge(&mut self, other: &Self) -> Result<(), MergeError> {
        self.merge_accumulator(other);
        Ok(())
    }

    fn clear(&mut self) {
        Accumulator::clear(self);
    }

    fn count(&self) -> C {
        self.count
    }

    fn is_defined(&self) -> bool {
        Accumulator::is_defined(self)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn values(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
        proptest::collection::vec(-1e6_f64..1e6, min_len..=max_len)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn mean_matches_arithmetic_mean(data in values(1, 200)) {
            let mut acc = Accumulator::<f64, u64>::new();
            for &v in &data {
                acc.add(v);
            }
            let expected = data.iter().sum::<f64>() / data.len() as f64;
            prop_assert_eq!(acc.count(), data.len() as u64);
            prop_assert!(
                (acc.mean() - expected).abs() < 1e-6,
                "mean {} expected {}", acc.mean(), expected
            );
        }

        #[test]
        fn add_then_remove_is_identity(data in values(2, 50), extra in -1e6_f64..1e6) {
            let mut acc = Accumulator::<f64, u64>::new();
            for &v in &data {
                acc.add(v);
            }
            let before = acc;
            acc.add(extra);
            acc.remove(extra);
            prop_assert_eq!(acc.count(), before.count());
            prop_assert!((acc.mean() - before.mean()).abs() < 1e-6);
        }

        #[test]
        fn weighted_add_matches_repeated(value in -1e6_f64..1e6, n in 1_u64..100, seed in values(0, 10)) {
            let mut weighted = Accumulator::<f64, u64>::new();
            let mut repeated = Accumulator::<f64, u64>::new();
            for &v in &seed {
                weighted.add(v);
                repeated.add(v);
            }
            weighted.add_weighted(value, n);
            for _ in 0..n {
                repeated.add(value);
            }
            prop_assert_eq!(weighted.count(), repeated.count());
            prop_assert!((weighted.mean() - repeated.mean()).abs() < 1e-6);
        }
    }
}
