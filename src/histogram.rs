//! Fixed-width histograms
//!
//! [`Histogram`] splits a value range into equally wide bins and counts how
//! many samples fall into each. Values outside the range are clamped into the
//! first or last bin, so every sample is counted exactly once.
//!
//! # Example
//!
//! ```
//! use incstats::histogram::Histogram;
//!
//! let mut histogram = Histogram::<f64, u64>::new(0.0, 10.0, 5);
//!
//! for value in [-5.0, 4.0, 15.0] {
//!     histogram.add(value);
//! }
//!
//! assert_eq!(histogram.bin_count(0), 1);
//! assert_eq!(histogram.bin_count(2), 1);
//! assert_eq!(histogram.bin_count(4), 1);
//! assert_eq!(histogram.count(), 3);
//! ```

use core::fmt;

#[cfg(feature = "std")]
use std::{format, string::String, vec::Vec};

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::{format, string::String, vec::Vec};

use num_traits::{Float, NumCast};

use crate::count::Count;
use crate::traits::{MergeError, Statistic};

/// Width of the label column in [`Histogram::write_with_labels`]
const LABEL_WIDTH: usize = 20;

/// Histogram with a fixed number of equally wide bins
///
/// Bin `i` covers `[min + i * width, min + (i + 1) * width)`. Values below
/// `min` (and NaN) are counted in the first bin, values at or above `max` in
/// the last.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Histogram<V = f64, C = u64> {
    /// Per-bin counts
    bins: Vec<C>,
    /// Total number of samples
    count: C,
    bin_width: V,
    min: V,
    max: V,
}

impl<V: Float, C: Count> Default for Histogram<V, C> {
    /// A single bin covering `[0, 1)`
    fn default() -> Self {
        Self::new(V::zero(), V::one(), 1)
    }
}

impl<V: Float, C: Count> Histogram<V, C> {
    /// Create a histogram over `[min, max)` with `bins` bins
    ///
    /// # Panics
    ///
    /// Panics if `bins` is zero or the range is empty.
    pub fn new(min: V, max: V, bins: usize) -> Self {
        let mut histogram = Self {
            bins: Vec::new(),
            count: C::zero(),
            bin_width: V::one(),
            min,
            max,
        };
        histogram.init(min, max, bins);
        histogram
    }

    /// Reconfigure range and bin count, discarding all counts
    ///
    /// # Panics
    ///
    /// Panics if `bins` is zero or the range is empty.
    pub fn init(&mut self, min: V, max: V, bins: usize) {
        assert!(bins > 0, "histogram needs at least one bin");
        assert!(max > min, "histogram range must not be empty");

        let bins_v = <V as NumCast>::from(bins).unwrap_or_else(V::infinity);
        self.min = min;
        self.max = max;
        self.bin_width = (max - min) / bins_v;
        self.bins.clear();
        self.bins.resize(bins, C::zero());
        self.count = C::zero();
    }

    /// Index of the bin that `value` is counted in
    pub fn bin_index(&self, value: V) -> usize {
        let last = self.bins.len() - 1;
        let position = ((value - self.min) / self.bin_width).floor();
        if !(position >= V::zero()) {
            // below the range, or NaN
            return 0;
        }
        position.to_usize().map_or(last, |i| i.min(last))
    }

    /// Count a sample
    ///
    /// # Panics
    ///
    /// Panics if an exact count overflows.
    pub fn add(&mut self, value: V) {
        self.count = self.count.increase(C::one());
        let i = self.bin_index(value);
        self.bins[i] = self.bins[i].increase(C::one());
    }

    /// Zero all counts, keeping range and bins
    pub fn clear(&mut self) {
        self.count = C::zero();
        for bin in self.bins.iter_mut() {
            *bin = C::zero();
        }
    }

    /// Number of bins
    pub fn bins(&self) -> usize {
        self.bins.len()
    }

    /// Total number of samples
    pub fn count(&self) -> C {
        self.count
    }

    /// Number of samples in bin `i`
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.bins()`.
    pub fn bin_count(&self, i: usize) -> C {
        assert!(
            i < self.bins.len(),
            "bin {} out of range for {} bins",
            i,
            self.bins.len()
        );
        self.bins[i]
    }

    pub fn bin_width(&self) -> V {
        self.bin_width
    }

    /// Lower end of the configured range
    pub fn min(&self) -> V {
        self.min
    }

    /// Upper end of the configured range
    pub fn max(&self) -> V {
        self.max
    }

    /// Lower bound of bin `i`
    pub fn bin_lower_bound(&self, i: usize) -> V {
        self.min + <V as NumCast>::from(i).unwrap_or_else(V::infinity) * self.bin_width
    }

    /// `(lower bound, count)` for every bin in order
    pub fn iter(&self) -> impl Iterator<Item = (V, C)> + '_ {
        self.bins
            .iter()
            .enumerate()
            .map(move |(i, &count)| (self.bin_lower_bound(i), count))
    }

    /// Add the counts of a histogram with the same range and bins
    pub fn merge_histogram(&mut self, other: &Self) -> Result<(), MergeError>
    where
        V: fmt::Display,
    {
        if self.bins.len() != other.bins.len() || self.min != other.min || self.max != other.max {
            return Err(MergeError::IncompatibleShape {
                expected: self.shape(),
                found: other.shape(),
            });
        }

        self.count = self.count.increase(other.count);
        for (bin, &theirs) in self.bins.iter_mut().zip(other.bins.iter()) {
            *bin = bin.increase(theirs);
        }
        Ok(())
    }

    fn shape(&self) -> String
    where
        V: fmt::Display,
    {
        format!("{} bins over [{}, {})", self.bins.len(), self.min, self.max)
    }
}

impl<V: Float + fmt::Display, C: Count> Histogram<V, C> {
    /// Write one `<label>[<lower bound>]  <count>` line per bin, with the
    /// label column padded for alignment
    pub fn write_with_labels<W: fmt::Write>(&self, out: &mut W, label: &str) -> fmt::Result {
        for (lower, count) in self.iter() {
            let bin_label = format!("{}[{}] ", label, lower);
            writeln!(out, "{:<width$}{}", bin_label, count, width = LABEL_WIDTH)?;
        }
        Ok(())
    }
}

impl<V: Float + fmt::Display, C: Count> fmt::Display for Histogram<V, C> {
    /// One `<lower bound>\t<count>` line per bin
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (lower, count) in self.iter() {
            writeln!(f, "{}\t{}", lower, count)?;
        }
        Ok(())
    }
}

impl<V: Float + fmt::Debug + fmt::Display, C: Count> Statistic for Histogram<V, C> {
    type Value = V;
    type Count = C;

    fn update(&mut self, value: V) {
        self.add(value);
    }

    fn merge(&mut self, other: &Self) -> Result<(), MergeError> {
        self.merge_histogram(other)
    }

    fn clear(&mut self) {
        Histogram::clear(self);
    }

    fn count(&self) -> C {
        self.count
    }

    fn is_defined(&self) -> bool {
        self.count.is_defined()
    }
}
