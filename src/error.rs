//! Errors reported by the fallible (`try_*`) operations of [`SvSet`].
//!
//! Only resource failures are reported here: the capacity computation overflowing, or the
//! allocator refusing a request. Caller preconditions (an unsorted slice handed to
//! [`SvSet::from_ordered_unique`], an out-of-bounds index) are not errors; see the
//! documentation of the individual methods.
//!
//! [`SvSet`]: crate::SvSet
//! [`SvSet::from_ordered_unique`]: crate::SvSet::from_ordered_unique

use alloc::alloc::Layout;
use core::fmt;

/// The error type for `try_reserve`-style methods.
#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error)]
pub enum TryReserveError {
    /// The requested capacity exceeds `isize::MAX` bytes, or doubling the current capacity
    /// overflowed.
    #[error("capacity overflow")]
    CapacityOverflow,

    /// The allocator returned an error.
    #[error("memory allocation of {} bytes failed", .layout.size())]
    AllocError {
        /// The layout of the allocation request that failed.
        layout: Layout,
    },
}

/// The error returned by [`SvSet::try_insert`] when the set had to grow and could not.
///
/// The rejected value is handed back so that nothing is lost; the set itself is left
/// exactly as it was before the call.
///
/// [`SvSet::try_insert`]: crate::SvSet::try_insert
#[derive(thiserror::Error)]
#[error("failed to insert value: {error}")]
pub struct TryInsertError<T> {
    /// Why the buffer could not grow.
    pub error: TryReserveError,
    /// The value that was not inserted.
    pub value: T,
}

impl<T> TryInsertError<T> {
    /// Consumes the error, returning the value that was not inserted.
    pub fn into_value(self) -> T {
        self.value
    }
}

impl<T> fmt::Debug for TryInsertError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryInsertError").field("error", &self.error).finish_non_exhaustive()
    }
}
