//! Storage-explicit collections.
//!
//! This crate provides two leaf-level containers that take control of their storage rather
//! than delegating it to `Vec` or `Box`:
//!
//! * [`SvSet`]: an ordered, duplicate-free set kept in a single contiguous buffer that the set
//!   allocates, grows and shrinks itself. Lookup is a binary search; insertion and removal
//!   shift the tail of the buffer. Elements are ordered by a [`Comparator`] stored in the set
//!   rather than by the [`Ord`] trait.
//! * [`intrusive::List`]: a doubly-linked list that threads caller-owned values together
//!   through a [`ListHook`](intrusive::ListHook) field embedded in each value. The list never
//!   allocates and never owns its elements.
//!
//! ```
//! use ravel::{ReverseComparator, SvSet};
//!
//! let mut set = SvSet::with_comparator(ReverseComparator);
//! assert_eq!(set.insert(3), (0, true));
//! assert_eq!(set.insert(7), (0, true));
//! assert_eq!(set.insert(3), (1, false));
//! assert_eq!(set.as_slice(), [7, 3]);
//! ```
//!
//! # Feature flags
//!
//! * `std` (default): implements `std::error::Error` for the error types.
//! * `allocator_api`: uses `core::alloc::Allocator` for the set's buffer and makes
//!   `SvSet::new_in` public (nightly).
//! * `dropck_eyepatch`: lets an [`SvSet`] hold references that dangle by the time the set is
//!   dropped, as `Vec` does (nightly).
//! * `nightly`: all of the nightly features above.

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![cfg_attr(feature = "allocator_api", feature(allocator_api))]
#![cfg_attr(feature = "dropck_eyepatch", feature(dropck_eyepatch))]
// documentation controls
#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg))]
// linting controls
#![warn(missing_docs)]

extern crate alloc;

#[macro_use]
mod polyfill;

mod default;
pub mod error;
pub mod intrusive;
pub mod sv_set;

pub use default::{FnComparator, OrdComparator, ReverseComparator};
pub use error::{TryInsertError, TryReserveError};
pub use sv_set::SvSet;

use core::cmp::Ordering;

/// A strict weak ordering over values of type `T`, stored by value inside a collection.
///
/// Implementations must be consistent: `cmp(a, b)` must be the reverse of `cmp(b, a)`, and the
/// relation must be transitive. Two values for which `cmp` returns [`Ordering::Equal`] are
/// *equivalent* and an [`SvSet`] keeps at most one of them.
///
/// Collections assume a comparator is cheap to construct, clone and drop.
///
/// It is a logic error for a comparator's answers to change while values it has ordered are
/// held in a collection. The behavior resulting from such a logic error is not specified, but
/// it is encapsulated to the collection that observed it and never results in undefined
/// behavior.
pub trait Comparator<T: ?Sized> {
    /// Compares `this` with `that`.
    fn cmp(&self, this: &T, that: &T) -> Ordering;

    /// Returns `true` if `this` is ordered strictly before `that`.
    ///
    /// This is the "key compare" predicate of the ordering.
    #[inline]
    fn lt(&self, this: &T, that: &T) -> bool {
        self.cmp(this, that).is_lt()
    }

    /// Returns `true` if `this` is ordered before or is equivalent to `that`.
    #[inline]
    fn le(&self, this: &T, that: &T) -> bool {
        self.cmp(this, that).is_le()
    }

    /// Returns `true` if `this` is ordered strictly after `that`.
    #[inline]
    fn gt(&self, this: &T, that: &T) -> bool {
        self.cmp(this, that).is_gt()
    }

    /// Returns `true` if `this` is ordered after or is equivalent to `that`.
    #[inline]
    fn ge(&self, this: &T, that: &T) -> bool {
        self.cmp(this, that).is_ge()
    }

    /// Returns `true` if neither value is ordered before the other.
    #[inline]
    fn equivalent(&self, this: &T, that: &T) -> bool {
        self.cmp(this, that).is_eq()
    }
}

impl<T: ?Sized, C: ?Sized + Comparator<T>> Comparator<T> for &C {
    #[inline]
    fn cmp(&self, this: &T, that: &T) -> Ordering {
        (**self).cmp(this, that)
    }
}

#[cfg(test)]
mod testing;
