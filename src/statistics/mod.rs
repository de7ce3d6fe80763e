//! Incremental statistics over a single stream of samples
//!
//! This module provides statistics that are updated one sample at a time
//! with constant memory, from the bare running mean up to mean, variance
//! and extremes.
//!
//! - [`Accumulator`]: count and mean, with removal and weighted updates
//! - [`AtomicAccumulator`]: count and mean readable while being written
//! - [`MomentStatistics`]: adds the running variance
//! - [`ExtendedStatistics`]: adds the minimum and maximum
//!
//! # Example
//!
//! ```
//! use incstats::statistics::ExtendedStatistics;
//!
//! let mut stats = ExtendedStatistics::<f64, u64>::new();
//!
//! for value in [1.0, 2.0, 3.0, 4.0, 5.0] {
//!     stats.add(value);
//! }
//!
//! println!("Mean: {}", stats.mean());
//! println!("Deviation: {}", stats.deviation());
//! println!("Min: {}", stats.min());
//! println!("Max: {}", stats.max());
//! ```

mod accumulator;
#[cfg(target_has_atomic = "64")]
mod atomic;
mod extended;
mod moments;

pub use accumulator::Accumulator;
#[cfg(target_has_atomic = "64")]
pub use atomic::AtomicAccumulator;
pub use extended::ExtendedStatistics;
pub use moments::MomentStatistics;

use core::str::FromStr;

use crate::count::Count;
use crate::traits::ParseError;

/// Parse the next whitespace-separated token as `field`
pub(crate) fn read_token<'a, T, I>(tokens: &mut I, field: &'static str) -> Result<T, ParseError>
where
    T: FromStr,
    I: Iterator<Item = &'a str>,
{
    let token = tokens.next().ok_or(ParseError::MissingToken { field })?;
    token.parse().map_err(|_| ParseError::InvalidNumber {
        field,
        token: token.into(),
    })
}

/// Parse the next token as a non-negative count
pub(crate) fn read_count<'a, C, I>(tokens: &mut I) -> Result<C, ParseError>
where
    C: Count,
    I: Iterator<Item = &'a str>,
{
    let token = tokens.next().ok_or(ParseError::MissingToken { field: "count" })?;
    let count: C = token.parse().map_err(|_| ParseError::InvalidNumber {
        field: "count",
        token: token.into(),
    })?;
    if count < C::zero() {
        return Err(ParseError::NegativeCount {
            token: token.into(),
        });
    }
    Ok(count)
}
