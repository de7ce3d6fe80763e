//! Core traits and error types for incremental statistics
//!
//! All single-stream statistics implement the base [`Statistic`] trait.
//! Errors that callers are expected to handle (lookups, merges, text parsing)
//! are returned as values; violated preconditions panic instead.

use core::fmt::Debug;

#[cfg(feature = "std")]
use std::string::String;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::string::String;

/// Error during a merge of two statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// Named collections do not hold the same set of names
    IncompatibleCollections,
    /// Statistics were configured with different shapes (e.g. histogram ranges)
    IncompatibleShape {
        expected: String,
        found: String,
    },
}

impl core::fmt::Display for MergeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MergeError::IncompatibleCollections => {
                write!(f, "incompatible statistics collections")
            }
            MergeError::IncompatibleShape { expected, found } => {
                write!(f, "incompatible shape: expected {}, found {}", expected, found)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MergeError {}

/// Error when looking up a statistic by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// No statistic was created under this name
    NotFound { name: String },
}

impl core::fmt::Display for LookupError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LookupError::NotFound { name } => write!(f, "unknown statistics name {}", name),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LookupError {}

/// Error while loading a statistic from its text form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Input ended before this field
    MissingToken { field: &'static str },
    /// Token could not be parsed as a number
    InvalidNumber { field: &'static str, token: String },
    /// Counts cannot be negative
    NegativeCount { token: String },
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseError::MissingToken { field } => write!(f, "missing {}", field),
            ParseError::InvalidNumber { field, token } => {
                write!(f, "invalid {}: {:?}", field, token)
            }
            ParseError::NegativeCount { token } => write!(f, "negative count: {}", token),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}

/// Core trait for all incremental statistics
pub trait Statistic: Clone + Debug {
    /// The type of sample this statistic folds in
    type Value;

    /// The type used to count samples
    type Count;

    /// Fold one sample into the statistic
    fn update(&mut self, value: Self::Value);

    /// Merge another statistic of the same kind into this one
    ///
    /// Returns an error if the two are incompatible
    fn merge(&mut self, other: &Self) -> Result<(), MergeError>;

    /// Reset to the empty state, keeping any configured shape
    fn clear(&mut self);

    /// Number (or total weight) of samples represented
    fn count(&self) -> Self::Count;

    /// Whether at least one sample is represented
    fn is_defined(&self) -> bool;
}
