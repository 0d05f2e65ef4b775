//! Stock comparators.
//!
//! [`OrdComparator`] makes a collection behave as if it were ordered by the [`Ord`] trait and
//! is the default comparator of [`SvSet`](crate::SvSet). [`ReverseComparator`] orders by
//! descending [`Ord`], and [`FnComparator`] adapts any comparison closure or function.

use crate::Comparator;
use core::cmp::Ordering;
use core::fmt;

/// A zero-sized comparator that delegates to the [`Ord`] implementation of the compared type.
#[derive(Clone, Copy, Default, Debug)]
pub struct OrdComparator;

impl<T: ?Sized + Ord> Comparator<T> for OrdComparator {
    // Delegate to `T`'s implementation of [`Ord`].
    #[inline]
    fn cmp(&self, this: &T, that: &T) -> Ordering {
        this.cmp(that)
    }

    // Overridden so that they delegate to `T`'s implementation of [`PartialOrd`] rather than
    // going through `cmp`. If `T`'s implementations are consistent with one another, as those
    // traits require, this has no effect.

    #[inline]
    fn lt(&self, this: &T, that: &T) -> bool {
        this < that
    }
    #[inline]
    fn le(&self, this: &T, that: &T) -> bool {
        this <= that
    }
    #[inline]
    fn gt(&self, this: &T, that: &T) -> bool {
        this > that
    }
    #[inline]
    fn ge(&self, this: &T, that: &T) -> bool {
        this >= that
    }
}

/// A zero-sized comparator that orders by descending [`Ord`].
///
/// ```
/// use ravel::{ReverseComparator, SvSet};
///
/// let set = SvSet::from_ordered_unique_with(&[10, 9, 8], ReverseComparator);
/// assert_eq!(set.first(), Some(&10));
/// ```
#[derive(Clone, Copy, Default, Debug)]
pub struct ReverseComparator;

impl<T: ?Sized + Ord> Comparator<T> for ReverseComparator {
    #[inline]
    fn cmp(&self, this: &T, that: &T) -> Ordering {
        that.cmp(this)
    }
}

/// A comparator backed by a comparison function or closure.
///
/// This is the natural way to order types that are not [`Ord`], such as floating point
/// numbers:
///
/// ```
/// use ravel::{FnComparator, SvSet};
///
/// let mut set = SvSet::with_comparator(FnComparator(f64::total_cmp));
/// set.insert(2.5);
/// set.insert(-1.0);
/// assert_eq!(set.as_slice(), [-1.0, 2.5]);
/// ```
#[derive(Clone, Copy, Default)]
pub struct FnComparator<F>(pub F);

impl<F> fmt::Debug for FnComparator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FnComparator").finish_non_exhaustive()
    }
}

impl<T, F> Comparator<T> for FnComparator<F>
where
    T: ?Sized,
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn cmp(&self, this: &T, that: &T) -> Ordering {
        (self.0)(this, that)
    }
}
