use super::cursor::{Cursor, CursorMut};
use super::hook::{Link, ListHook};
use super::{hook_of, value_of, Adapter};
use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::mem;
use core::ptr::NonNull;

/// A doubly-linked list of values borrowed for `'a`, threaded through the hook that the
/// adapter `A` names.
///
/// The list never allocates and never owns its elements. Pushing a value borrows it for as
/// long as the list may refer to it; popping or removing a value hands the borrow back and
/// frees its hook. Dropping the list unlinks whatever it still holds.
///
/// Linking a value whose hook is already linked, into this list or any other, panics.
///
/// `head` and `tail` play the part of the ring's sentinel: the first element's `prev` and the
/// last element's `next` are `None`. No element points into the list itself, so moving a
/// list is a plain bitwise copy.
pub struct List<'a, A: Adapter> {
    head: Link,
    tail: Link,
    len: usize,
    marker: PhantomData<&'a A::Value>,
}

impl<'a, A: Adapter> List<'a, A> {
    /// Creates an empty `List`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravel::intrusive::{List, ListHook};
    /// use ravel::list_adapter;
    ///
    /// struct Node { hook: ListHook }
    /// list_adapter!(Nodes = Node { hook });
    ///
    /// let list: List<Nodes> = List::new();
    /// assert!(list.is_empty());
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        List { head: None, tail: None, len: 0, marker: PhantomData }
    }

    /// Returns the number of linked elements. O(1).
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns the first element, or `None` if the list is empty.
    #[must_use]
    pub fn front(&self) -> Option<&'a A::Value> {
        self.head.map(|node| unsafe { value_of::<A>(node) })
    }

    /// Returns the last element, or `None` if the list is empty.
    #[must_use]
    pub fn back(&self) -> Option<&'a A::Value> {
        self.tail.map(|node| unsafe { value_of::<A>(node) })
    }

    /// Links `value` at the back of the list. O(1).
    ///
    /// # Panics
    ///
    /// Panics if `value`'s hook is already linked.
    pub fn push_back(&mut self, value: &'a A::Value) {
        unsafe { self.link_between(value, self.tail, None) };
    }

    /// Links `value` at the front of the list. O(1).
    ///
    /// # Panics
    ///
    /// Panics if `value`'s hook is already linked.
    pub fn push_front(&mut self, value: &'a A::Value) {
        unsafe { self.link_between(value, None, self.head) };
    }

    /// Unlinks the last element and returns it, or `None` if the list is empty. O(1).
    pub fn pop_back(&mut self) -> Option<&'a A::Value> {
        self.tail.map(|node| unsafe { self.unlink(node) })
    }

    /// Unlinks the first element and returns it, or `None` if the list is empty. O(1).
    pub fn pop_front(&mut self) -> Option<&'a A::Value> {
        self.head.map(|node| unsafe { self.unlink(node) })
    }

    /// Unlinks every element, front to back. O(n).
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    /// Exchanges the elements of two lists. O(1).
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other)
    }

    /// Moves every element of `other` to the end of `self`, leaving `other` empty. O(1).
    ///
    /// # Examples
    ///
    /// ```
    /// use ravel::intrusive::{List, ListHook};
    /// use ravel::list_adapter;
    ///
    /// struct Node { id: u8, hook: ListHook }
    /// list_adapter!(Nodes = Node { hook });
    ///
    /// let nodes = [1, 2, 3].map(|id| Node { id, hook: ListHook::new() });
    /// let mut left = List::<Nodes>::new();
    /// let mut right = List::<Nodes>::new();
    /// left.push_back(&nodes[0]);
    /// right.push_back(&nodes[1]);
    /// right.push_back(&nodes[2]);
    ///
    /// left.append(&mut right);
    /// assert!(right.is_empty());
    /// assert!(left.iter().map(|node| node.id).eq([1, 2, 3]));
    /// ```
    pub fn append(&mut self, other: &mut Self) {
        let (Some(tail), Some(head)) = (self.tail, other.head) else {
            if self.is_empty() {
                mem::swap(self, other);
            }
            return;
        };
        unsafe {
            tail.as_ref().set_next(Some(head));
            head.as_ref().set_prev(Some(tail));
        }
        self.tail = other.tail.take();
        other.head = None;
        self.len += mem::take(&mut other.len);
    }

    /// Provides a forward iterator.
    pub fn iter(&self) -> Iter<'_, 'a, A> {
        Iter { head: self.head, tail: self.tail, len: self.len, marker: PhantomData }
    }

    /// Provides a cursor at the front element, or at the ghost end position if the list is
    /// empty.
    pub fn cursor_front(&self) -> Cursor<'_, 'a, A> {
        Cursor::new(self.head, self)
    }

    /// Provides a cursor at the back element, or at the ghost end position if the list is
    /// empty.
    pub fn cursor_back(&self) -> Cursor<'_, 'a, A> {
        Cursor::new(self.tail, self)
    }

    /// Provides a cursor at the ghost end position.
    pub fn cursor_end(&self) -> Cursor<'_, 'a, A> {
        Cursor::new(None, self)
    }

    /// Provides a cursor with editing operations at the front element, or at the ghost end
    /// position if the list is empty.
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, 'a, A> {
        CursorMut::new(self.head, self)
    }

    /// Provides a cursor with editing operations at the back element, or at the ghost end
    /// position if the list is empty.
    pub fn cursor_back_mut(&mut self) -> CursorMut<'_, 'a, A> {
        CursorMut::new(self.tail, self)
    }

    /// Provides a cursor with editing operations at the ghost end position.
    pub fn cursor_end_mut(&mut self) -> CursorMut<'_, 'a, A> {
        CursorMut::new(None, self)
    }

    pub(super) fn head(&self) -> Link {
        self.head
    }

    pub(super) fn tail(&self) -> Link {
        self.tail
    }

    /// Links `value` between `prev` and `next` and returns its hook.
    ///
    /// # Safety
    ///
    /// `prev` and `next` must be adjacent positions of this list, `None` standing for the
    /// ghost.
    pub(super) unsafe fn link_between(
        &mut self,
        value: &'a A::Value,
        prev: Link,
        next: Link,
    ) -> NonNull<ListHook> {
        let node = hook_of::<A>(value);
        let hook = unsafe { node.as_ref() };
        assert!(!hook.is_linked(), "value is already linked into a list");

        hook.set_prev(prev);
        hook.set_next(next);
        match prev {
            Some(prev) => unsafe { prev.as_ref() }.set_next(Some(node)),
            None => self.head = Some(node),
        }
        match next {
            Some(next) => unsafe { next.as_ref() }.set_prev(Some(node)),
            None => self.tail = Some(node),
        }
        self.len += 1;
        node
    }

    /// Unlinks `node`, frees its hook and returns the value that embeds it.
    ///
    /// # Safety
    ///
    /// `node` must be linked into this list.
    pub(super) unsafe fn unlink(&mut self, node: NonNull<ListHook>) -> &'a A::Value {
        let hook = unsafe { node.as_ref() };
        let (prev, next) = (hook.prev(), hook.next());
        match prev {
            Some(prev) => unsafe { prev.as_ref() }.set_next(next),
            None => self.head = next,
        }
        match next {
            Some(next) => unsafe { next.as_ref() }.set_prev(prev),
            None => self.tail = prev,
        }
        hook.unlink();
        self.len -= 1;
        unsafe { value_of::<A>(node) }
    }
}

impl<A: Adapter> Default for List<'_, A> {
    /// Creates an empty `List`.
    fn default() -> Self {
        List::new()
    }
}

impl<A: Adapter> Drop for List<'_, A> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<A: Adapter> fmt::Debug for List<'_, A>
where
    A::Value: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, A: Adapter> Extend<&'a A::Value> for List<'a, A> {
    fn extend<I: IntoIterator<Item = &'a A::Value>>(&mut self, iter: I) {
        iter.into_iter().for_each(|value| self.push_back(value));
    }
}

impl<'l, 'a, A: Adapter> IntoIterator for &'l List<'a, A> {
    type Item = &'a A::Value;
    type IntoIter = Iter<'l, 'a, A>;

    fn into_iter(self) -> Iter<'l, 'a, A> {
        self.iter()
    }
}

/// An iterator over the elements of a [`List`].
///
/// This `struct` is created by [`List::iter()`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'l, 'a, A: Adapter> {
    head: Link,
    tail: Link,
    len: usize,
    marker: PhantomData<&'l List<'a, A>>,
}

impl<A: Adapter> Clone for Iter<'_, '_, A> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

impl<A: Adapter> fmt::Debug for Iter<'_, '_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.len).finish()
    }
}

impl<'a, A: Adapter> Iterator for Iter<'_, 'a, A> {
    type Item = &'a A::Value;

    fn next(&mut self) -> Option<&'a A::Value> {
        if self.len == 0 {
            return None;
        }
        self.head.map(|node| {
            self.len -= 1;
            self.head = unsafe { node.as_ref() }.next();
            unsafe { value_of::<A>(node) }
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<&'a A::Value> {
        self.next_back()
    }
}

impl<'a, A: Adapter> DoubleEndedIterator for Iter<'_, 'a, A> {
    fn next_back(&mut self) -> Option<&'a A::Value> {
        if self.len == 0 {
            return None;
        }
        self.tail.map(|node| {
            self.len -= 1;
            self.tail = unsafe { node.as_ref() }.prev();
            unsafe { value_of::<A>(node) }
        })
    }
}

impl<A: Adapter> ExactSizeIterator for Iter<'_, '_, A> {}

impl<A: Adapter> FusedIterator for Iter<'_, '_, A> {}
