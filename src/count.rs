//! Count types for incremental statistics
//!
//! Every statistic in this crate is generic over the numeric type used to
//! count samples. Integer counts are *exact*: they are defined as soon as they
//! are positive and overflowing them is a programming error. Float counts are
//! *approximate*: fractional weights are allowed, and a count is only treated
//! as defined once it exceeds machine epsilon, so that accumulated rounding
//! error after weighted removals does not resurrect a meaningless mean.
//!
//! The behavior is selected by the type parameter, never at runtime:
//!
//! ```
//! use incstats::count::Count;
//!
//! assert!(<u64 as Count>::EXACT);
//! assert!(!<f64 as Count>::EXACT);
//!
//! assert!(1u32.is_defined());
//! assert!(!(f64::EPSILON / 2.0).is_defined());
//! ```

use core::fmt::{Debug, Display};
use core::str::FromStr;

use num_traits::{Float, Num, NumCast};

/// Numeric type used to count (possibly weighted) samples
pub trait Count:
    Num + NumCast + Copy + PartialOrd + Debug + Display + FromStr + Send + Sync + 'static
{
    /// Whether the type counts exactly (integers) or approximately (floats)
    const EXACT: bool;

    /// Whether this count represents at least one sample
    fn is_defined(self) -> bool;

    /// `self + n`
    ///
    /// # Panics
    ///
    /// Panics if an exact count overflows.
    fn increase(self, n: Self) -> Self;

    /// Convert to the value type used for mean arithmetic
    #[inline]
    fn to_value<V: Float>(self) -> V {
        // integer and float primitives always convert, saturating at infinity
        <V as NumCast>::from(self).unwrap_or_else(V::infinity)
    }
}

macro_rules! impl_exact_count {
    ($($t:ty),*) => {$(
        impl Count for $t {
            const EXACT: bool = true;

            #[inline]
            fn is_defined(self) -> bool {
                self > 0
            }

            #[inline]
            fn increase(self, n: Self) -> Self {
                match self.checked_add(n) {
                    Some(count) => count,
                    None => panic!("count overflow: {} + {}", self, n),
                }
            }
        }
    )*};
}

macro_rules! impl_approx_count {
    ($($t:ty),*) => {$(
        impl Count for $t {
            const EXACT: bool = false;

            #[inline]
            fn is_defined(self) -> bool {
                self > <$t>::EPSILON
            }

            #[inline]
            fn increase(self, n: Self) -> Self {
                self + n
            }
        }
    )*};
}

impl_exact_count!(u8, u16, u32, u64, u128, usize);
impl_approx_count!(f32, f64);
