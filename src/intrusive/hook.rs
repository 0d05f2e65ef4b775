use core::cell::Cell;
use core::fmt;
use core::ptr::NonNull;

/// A link to a neighbouring hook. `None` stands for the list itself, which closes the ring.
pub(super) type Link = Option<NonNull<ListHook>>;

/// Stored in `next` while the hook is free. No real hook lives at the dangling address.
const UNLINKED: Link = Some(NonNull::dangling());

/// The link state a value needs to be threaded into a [`List`](super::List).
///
/// Embed one `ListHook` field per list the value may belong to at the same time, and name
/// the field in a [`list_adapter!`](crate::list_adapter). The hook is inert while it is free;
/// while linked, the list it belongs to borrows the value, so the value can neither move nor
/// be dropped.
///
/// A hook can only be linked into one list at a time.
pub struct ListHook {
    next: Cell<Link>,
    prev: Cell<Link>,
}

impl ListHook {
    /// Makes a free hook.
    #[must_use]
    pub const fn new() -> ListHook {
        ListHook { next: Cell::new(UNLINKED), prev: Cell::new(None) }
    }

    /// Returns `true` if the hook is currently linked into a list.
    #[must_use]
    pub fn is_linked(&self) -> bool {
        self.next.get() != UNLINKED
    }

    pub(super) fn next(&self) -> Link {
        self.next.get()
    }

    pub(super) fn prev(&self) -> Link {
        self.prev.get()
    }

    pub(super) fn set_next(&self, next: Link) {
        self.next.set(next)
    }

    pub(super) fn set_prev(&self, prev: Link) {
        self.prev.set(prev)
    }

    pub(super) fn unlink(&self) {
        self.next.set(UNLINKED);
        self.prev.set(None);
    }
}

impl Default for ListHook {
    fn default() -> ListHook {
        ListHook::new()
    }
}

/// A clone is always free: link state belongs to one value only.
impl Clone for ListHook {
    fn clone(&self) -> ListHook {
        ListHook::new()
    }
}

impl fmt::Debug for ListHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListHook").field("linked", &self.is_linked()).finish()
    }
}

impl Drop for ListHook {
    fn drop(&mut self) {
        debug_assert!(!self.is_linked(), "dropped a hook that is still linked into a list");
    }
}
