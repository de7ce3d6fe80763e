//! # incstats
//!
//! Incremental statistics for Rust.
//!
//! incstats keeps running statistics that are updated one sample at a time
//! (or in weighted batches) without storing the samples, and that stay
//! numerically well-behaved over millions of updates, e.g. in the inner loop
//! of a tree search.
//!
//! ## Features
//!
//! - **Running mean**: [`Accumulator`] with removal and weighted updates
//! - **Lock-free reads**: [`AtomicAccumulator`] for one writer and many readers
//! - **Variance**: [`MomentStatistics`] with running population variance
//! - **Extremes**: [`ExtendedStatistics`] adds minimum and maximum
//! - **Named series**: [`StatisticsCollection`] maps names to statistics
//! - **Histograms**: fixed-width [`Histogram`] with clamping
//! - **Generic counts**: exact (integer) or approximate (float) counts via [`Count`]
//!
//! ## Quick Start
//!
//! ```rust
//! use incstats::prelude::*;
//!
//! let mut stats = ExtendedStatistics::<f64, u64>::new();
//! for value in [0.5, 0.25, 1.0] {
//!     stats.add(value);
//! }
//! println!("{}", stats);
//!
//! let mut histogram = Histogram::<f64, u64>::new(0.0, 1.0, 4);
//! histogram.add(0.3);
//! print!("{}", histogram);
//! ```
//!
//! ## Combining Results
//!
//! Every statistic implements the [`Statistic`](traits::Statistic) trait which
//! includes a `merge` operation, so results gathered by separate workers can
//! be combined:
//!
//! ```rust
//! use incstats::statistics::MomentStatistics;
//! use incstats::traits::Statistic;
//!
//! let mut worker1 = MomentStatistics::<f64, u64>::new();
//! let mut worker2 = MomentStatistics::<f64, u64>::new();
//!
//! worker1.add(1.0);
//! worker2.add(3.0);
//!
//! worker1.merge(&worker2).unwrap();
//! assert_eq!(worker1.mean(), 2.0);
//! ```
//!
//! ## Feature Flags
//!
//! Families:
//! - `statistics` (default): accumulators, moments, extended statistics
//! - `collection` (default): named statistics collections
//! - `histogram` (default): fixed-width histograms
//! - `full`: enable all families
//!
//! Platform features:
//! - `std` (default): standard library support; without it the crate is
//!   `no_std` + `alloc`
//! - `serde`: enable serialization

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Core traits always available
pub mod count;
pub mod traits;

#[cfg(feature = "statistics")]
#[cfg_attr(docsrs, doc(cfg(feature = "statistics")))]
pub mod statistics;

#[cfg(feature = "collection")]
#[cfg_attr(docsrs, doc(cfg(feature = "collection")))]
pub mod collection;

#[cfg(feature = "histogram")]
#[cfg_attr(docsrs, doc(cfg(feature = "histogram")))]
pub mod histogram;

pub mod prelude {
    pub use crate::count::Count;
    pub use crate::traits::*;

    #[cfg(feature = "statistics")]
    pub use crate::statistics::{Accumulator, ExtendedStatistics, MomentStatistics};

    #[cfg(all(feature = "statistics", target_has_atomic = "64"))]
    pub use crate::statistics::AtomicAccumulator;

    #[cfg(feature = "collection")]
    pub use crate::collection::StatisticsCollection;

    #[cfg(feature = "histogram")]
    pub use crate::histogram::Histogram;
}

pub use count::Count;

#[cfg(feature = "statistics")]
pub use statistics::{Accumulator, ExtendedStatistics, MomentStatistics};

#[cfg(all(feature = "statistics", target_has_atomic = "64"))]
pub use statistics::AtomicAccumulator;

#[cfg(feature = "collection")]
pub use collection::StatisticsCollection;

#[cfg(feature = "histogram")]
pub use histogram::Histogram;
