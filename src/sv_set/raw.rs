use crate::error::TryReserveError::{self, AllocError, CapacityOverflow};
use crate::polyfill::{Allocator, Global};
use alloc::alloc::Layout;
use cfg_if::cfg_if;
use core::mem;
use core::ptr::NonNull;

/// Uninitialized storage for `cap` values of type `T`, obtained from `A`.
///
/// A `RawBuf` only allocates and releases memory. It never reads, writes or drops the values
/// that may live in it; tracking which slots are initialized is up to the owner.
pub(crate) struct RawBuf<T, A: Allocator = Global> {
    ptr: NonNull<T>,
    cap: usize,
    alloc: A,
}

unsafe impl<T: Send, A: Allocator + Send> Send for RawBuf<T, A> {}
unsafe impl<T: Sync, A: Allocator + Sync> Sync for RawBuf<T, A> {}

impl<T, A: Allocator> RawBuf<T, A> {
    /// A buffer with no capacity. Does not allocate.
    pub(crate) const fn new_in(alloc: A) -> Self {
        RawBuf { ptr: NonNull::dangling(), cap: 0, alloc }
    }

    /// A buffer with room for exactly `cap` values.
    ///
    /// Zero-sized requests (`cap == 0` or a zero-sized `T`) do not touch the allocator.
    pub(crate) fn try_with_capacity_in(cap: usize, alloc: A) -> Result<Self, TryReserveError> {
        let layout = Layout::array::<T>(cap).map_err(|_| CapacityOverflow)?;
        if layout.size() == 0 {
            return Ok(RawBuf { ptr: NonNull::dangling(), cap, alloc });
        }
        let ptr = alloc.allocate(layout).map_err(|_| AllocError { layout })?;
        Ok(RawBuf { ptr: ptr.cast(), cap, alloc })
    }

    #[inline]
    pub(crate) fn ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.cap
    }

    #[inline]
    pub(crate) fn allocator(&self) -> &A {
        &self.alloc
    }

    fn current_memory(&self) -> Option<(NonNull<u8>, Layout)> {
        if self.cap == 0 || mem::size_of::<T>() == 0 {
            None
        } else {
            // The same layout was successfully computed when the buffer was allocated.
            unsafe {
                let size = mem::size_of::<T>() * self.cap;
                let layout = Layout::from_size_align_unchecked(size, mem::align_of::<T>());
                Some((self.ptr.cast(), layout))
            }
        }
    }
}

cfg_if! {
    if #[cfg(feature = "dropck_eyepatch")] {
        unsafe impl<#[may_dangle] T, A: Allocator> Drop for RawBuf<T, A> {
            fn drop(&mut self) {
                if let Some((ptr, layout)) = self.current_memory() {
                    unsafe { self.alloc.deallocate(ptr, layout) }
                }
            }
        }
    } else {
        impl<T, A: Allocator> Drop for RawBuf<T, A> {
            fn drop(&mut self) {
                if let Some((ptr, layout)) = self.current_memory() {
                    unsafe { self.alloc.deallocate(ptr, layout) }
                }
            }
        }
    }
}

/// Turns a reservation failure into the same outcome `Vec` has: a panic on capacity
/// overflow, the global allocation error handler otherwise.
#[cold]
#[track_caller]
pub(crate) fn handle_error(e: TryReserveError) -> ! {
    match e {
        CapacityOverflow => panic!("capacity overflow"),
        AllocError { layout } => alloc::alloc::handle_alloc_error(layout),
    }
}
