//! A doubly-linked list that threads values it does not own.
//!
//! Instead of allocating a node per element, [`List`] links values together through a
//! [`ListHook`] field embedded in each value. The list only ever holds shared borrows of its
//! elements: linking never moves a value, unlinking never drops one, and a value can sit in
//! several lists at once by embedding one hook per list.
//!
//! An [`Adapter`] tells a list which type it holds and where in that type its hook lives. The
//! [`list_adapter!`](crate::list_adapter) macro writes one from a field name.
//!
//! # Examples
//!
//! ```
//! use ravel::intrusive::{List, ListHook};
//! use ravel::list_adapter;
//!
//! struct Job {
//!     id: u32,
//!     queue: ListHook,
//! }
//!
//! list_adapter!(JobQueue = Job { queue });
//!
//! let a = Job { id: 1, queue: ListHook::new() };
//! let b = Job { id: 2, queue: ListHook::new() };
//!
//! let mut queue = List::<JobQueue>::new();
//! queue.push_back(&a);
//! queue.push_back(&b);
//! assert!(a.queue.is_linked());
//!
//! assert_eq!(queue.pop_front().map(|job| job.id), Some(1));
//! assert!(!a.queue.is_linked());
//! assert_eq!(queue.len(), 1);
//! ```
//!
//! # Positions
//!
//! A list is a ring: after the last element and before the first sits the list itself, which
//! acts as the "ghost" end position. [`Cursor`] and [`CursorMut`] rest either on an element or
//! on the ghost, and stepping past either end of the list lands on the ghost.

mod cursor;
mod hook;
mod list;

pub use cursor::{Cursor, CursorMut};
pub use hook::ListHook;
pub use list::{Iter, List};

use core::ptr::NonNull;

/// Names the element type of a [`List`] and the [`ListHook`] field that threads it.
///
/// Prefer [`list_adapter!`](crate::list_adapter), which derives the offset from a field name.
///
/// # Safety
///
/// `HOOK_OFFSET` must be the byte offset of a field of type [`ListHook`] within `Value`.
pub unsafe trait Adapter {
    /// The type of the list's elements.
    type Value;

    /// The byte offset of the hook within a `Value`.
    const HOOK_OFFSET: usize;
}

/// Defines a zero-sized [`Adapter`](crate::intrusive::Adapter) type that threads a value type
/// through one of its [`ListHook`](crate::intrusive::ListHook) fields.
///
/// ```
/// use ravel::intrusive::ListHook;
/// use ravel::list_adapter;
///
/// pub struct Task {
///     pub ready: ListHook,
///     pub all: ListHook,
/// }
///
/// list_adapter!(pub ReadyQueue = Task { ready });
/// list_adapter!(pub AllTasks = Task { all });
/// ```
///
/// Naming a field that is not a `ListHook` fails to compile.
#[macro_export]
macro_rules! list_adapter {
    ($(#[$attr:meta])* $vis:vis $name:ident = $value:ty { $field:ident }) => {
        $(#[$attr])*
        #[derive(Clone, Copy, Debug, Default)]
        $vis struct $name;

        unsafe impl $crate::intrusive::Adapter for $name {
            type Value = $value;
            const HOOK_OFFSET: usize = ::core::mem::offset_of!($value, $field);
        }

        const _: () = {
            #[allow(dead_code)]
            fn hook_field(value: &$value) -> &$crate::intrusive::ListHook {
                &value.$field
            }
        };
    };
}

/// Locates the hook embedded in `value`.
fn hook_of<A: Adapter>(value: &A::Value) -> NonNull<ListHook> {
    let base = (value as *const A::Value).cast::<u8>();
    // in bounds of `value` and non-null, as the adapter promises
    unsafe { NonNull::new_unchecked(base.add(A::HOOK_OFFSET) as *mut ListHook) }
}

/// Recovers the value that embeds `hook`.
///
/// # Safety
///
/// `hook` must have been obtained from [`hook_of::<A>`] for a value that is still borrowed
/// for `'a`.
unsafe fn value_of<'a, A: Adapter>(hook: NonNull<ListHook>) -> &'a A::Value {
    unsafe { &*hook.as_ptr().cast::<u8>().sub(A::HOOK_OFFSET).cast::<A::Value>() }
}
