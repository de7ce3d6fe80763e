//! Named collections of statistics
//!
//! A search or simulation usually tracks several series at once (game
//! length, nodes per move, time per move, ...). [`StatisticsCollection`]
//! keeps one [`MomentStatistics`] per name and lets collections gathered by
//! different workers be merged.
//!
//! # Example
//!
//! ```
//! use incstats::collection::StatisticsCollection;
//!
//! let mut worker1 = StatisticsCollection::<f64, u64>::new();
//! let mut worker2 = StatisticsCollection::<f64, u64>::new();
//! for c in [&mut worker1, &mut worker2] {
//!     c.create("length");
//!     c.create("nodes");
//! }
//!
//! worker1.get_mut("length").unwrap().add(120.0);
//! worker2.get_mut("length").unwrap().add(80.0);
//!
//! worker1.merge(&worker2).unwrap();
//! assert_eq!(worker1.get("length").unwrap().count(), 2);
//! assert_eq!(worker1.get("length").unwrap().mean(), 100.0);
//! ```

use core::fmt;

#[cfg(feature = "std")]
use std::{collections::BTreeMap, string::String};

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::{collections::BTreeMap, string::String};

use num_traits::Float;

use crate::count::Count;
use crate::statistics::MomentStatistics;
use crate::traits::{LookupError, MergeError};

/// Mapping from unique names to [`MomentStatistics`]
///
/// Entries must be [`create`](Self::create)d before they can be looked up.
/// Iteration and [`Display`](fmt::Display) output are in name order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatisticsCollection<V = f64, C = u64> {
    map: BTreeMap<String, MomentStatistics<V, C>>,
}

impl<V: Float, C: Count> Default for StatisticsCollection<V, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Float, C: Count> StatisticsCollection<V, C> {
    /// Create an empty collection
    pub fn new() -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }

    /// Insert empty statistics under `name`
    ///
    /// Existing statistics with the same name are replaced.
    pub fn create(&mut self, name: impl Into<String>) {
        self.map.insert(name.into(), MomentStatistics::new());
    }

    /// Whether statistics exist under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Statistics stored under `name`
    pub fn get(&self, name: &str) -> Result<&MomentStatistics<V, C>, LookupError> {
        self.map.get(name).ok_or_else(|| LookupError::NotFound {
            name: name.into(),
        })
    }

    /// Mutable statistics stored under `name`
    pub fn get_mut(&mut self, name: &str) -> Result<&mut MomentStatistics<V, C>, LookupError> {
        self.map.get_mut(name).ok_or_else(|| LookupError::NotFound {
            name: name.into(),
        })
    }

    /// Merge every entry of `other` into the entry of the same name
    ///
    /// Fails if the collections differ in size or if a name of this
    /// collection is missing from `other`. Nothing is modified on failure.
    ///
    /// # Panics
    ///
    /// Panics if an exact count overflows.
    pub fn merge(&mut self, other: &Self) -> Result<(), MergeError> {
        if self.map.len() != other.map.len() {
            return Err(MergeError::IncompatibleCollections);
        }
        if !self.map.keys().all(|name| other.map.contains_key(name)) {
            return Err(MergeError::IncompatibleCollections);
        }

        for (name, stats) in self.map.iter_mut() {
            if let Some(theirs) = other.map.get(name) {
                stats.merge_moments(theirs);
            }
        }
        Ok(())
    }

    /// Clear every entry, keeping the names
    pub fn clear(&mut self) {
        for stats in self.map.values_mut() {
            stats.clear();
        }
    }

    /// Number of names
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether no names have been created
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }

    /// `(name, statistics)` pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MomentStatistics<V, C>)> {
        self.map.iter().map(|(name, stats)| (name.as_str(), stats))
    }
}

impl<V: Float + fmt::Display, C: Count> fmt::Display for StatisticsCollection<V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, stats) in &self.map {
            writeln!(f, "{}: {}", name, stats)?;
        }
        Ok(())
    }
}
