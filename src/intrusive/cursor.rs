use super::hook::Link;
use super::list::List;
use super::{value_of, Adapter};
use core::fmt;
use core::ptr;

/// A read-only position in a [`List`].
///
/// A cursor rests either on an element or on the ghost end position, which sits between the
/// last element and the first. Stepping past either end of the list lands on the ghost, and
/// stepping again wraps around to the other end.
///
/// Cursors are cheap to copy, and compare equal when they rest on the same position of the
/// same list.
pub struct Cursor<'l, 'a, A: Adapter> {
    current: Link,
    list: &'l List<'a, A>,
}

impl<A: Adapter> Clone for Cursor<'_, '_, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A: Adapter> Copy for Cursor<'_, '_, A> {}

impl<A: Adapter> PartialEq for Cursor<'_, '_, A> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.list, other.list) && self.current == other.current
    }
}

impl<A: Adapter> Eq for Cursor<'_, '_, A> {}

impl<A: Adapter> fmt::Debug for Cursor<'_, '_, A>
where
    A::Value: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.list).field(&self.current()).finish()
    }
}

impl<'l, 'a, A: Adapter> Cursor<'l, 'a, A> {
    pub(super) fn new(current: Link, list: &'l List<'a, A>) -> Self {
        Cursor { current, list }
    }

    /// Returns the element the cursor rests on, or `None` at the ghost end position.
    #[must_use]
    pub fn current(&self) -> Option<&'a A::Value> {
        self.current.map(|node| unsafe { value_of::<A>(node) })
    }

    /// Returns `true` if the cursor rests on the ghost end position.
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// Moves the cursor to the next element. From the last element this is the ghost, and
    /// from the ghost it is the first element.
    pub fn move_next(&mut self) {
        self.current = next_of(self.current, self.list);
    }

    /// Moves the cursor to the previous element. From the first element this is the ghost,
    /// and from the ghost it is the last element.
    pub fn move_prev(&mut self) {
        self.current = prev_of(self.current, self.list);
    }

    /// Returns the element [`move_next`](Cursor::move_next) would move to, if any.
    #[must_use]
    pub fn peek_next(&self) -> Option<&'a A::Value> {
        next_of(self.current, self.list).map(|node| unsafe { value_of::<A>(node) })
    }

    /// Returns the element [`move_prev`](Cursor::move_prev) would move to, if any.
    #[must_use]
    pub fn peek_prev(&self) -> Option<&'a A::Value> {
        prev_of(self.current, self.list).map(|node| unsafe { value_of::<A>(node) })
    }
}

/// A position in a [`List`] from which elements can be linked and unlinked.
///
/// See [`Cursor`] for how positions and the ghost end position work.
pub struct CursorMut<'l, 'a, A: Adapter> {
    current: Link,
    list: &'l mut List<'a, A>,
}

impl<A: Adapter> fmt::Debug for CursorMut<'_, '_, A>
where
    A::Value: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CursorMut").field(&self.list).field(&self.current()).finish()
    }
}

impl<'l, 'a, A: Adapter> CursorMut<'l, 'a, A> {
    pub(super) fn new(current: Link, list: &'l mut List<'a, A>) -> Self {
        CursorMut { current, list }
    }

    /// Returns the element the cursor rests on, or `None` at the ghost end position.
    #[must_use]
    pub fn current(&self) -> Option<&'a A::Value> {
        self.current.map(|node| unsafe { value_of::<A>(node) })
    }

    /// Returns `true` if the cursor rests on the ghost end position.
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// Moves the cursor to the next element, or from the last element to the ghost.
    pub fn move_next(&mut self) {
        self.current = next_of(self.current, self.list);
    }

    /// Moves the cursor to the previous element, or from the first element to the ghost.
    pub fn move_prev(&mut self) {
        self.current = prev_of(self.current, self.list);
    }

    /// Returns the element [`move_next`](CursorMut::move_next) would move to, if any.
    #[must_use]
    pub fn peek_next(&self) -> Option<&'a A::Value> {
        next_of(self.current, self.list).map(|node| unsafe { value_of::<A>(node) })
    }

    /// Returns the element [`move_prev`](CursorMut::move_prev) would move to, if any.
    #[must_use]
    pub fn peek_prev(&self) -> Option<&'a A::Value> {
        prev_of(self.current, self.list).map(|node| unsafe { value_of::<A>(node) })
    }

    /// Returns a read-only cursor at the same position, borrowing this one.
    #[must_use]
    pub fn as_cursor(&self) -> Cursor<'_, 'a, A> {
        Cursor::new(self.current, self.list)
    }

    /// Links `value` immediately before the cursor's position and moves the cursor onto it.
    /// O(1).
    ///
    /// At the ghost end position this appends `value` to the list.
    ///
    /// # Panics
    ///
    /// Panics if `value`'s hook is already linked.
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
    /// let mut list = List::<Nodes>::new();
    /// list.push_back(&nodes[0]);
    /// list.push_back(&nodes[2]);
    ///
    /// let mut cursor = list.cursor_back_mut();
    /// cursor.insert(&nodes[1]);
    /// assert_eq!(cursor.current().map(|node| node.id), Some(2));
    /// assert!(list.iter().map(|node| node.id).eq([1, 2, 3]));
    /// ```
    pub fn insert(&mut self, value: &'a A::Value) {
        let prev = prev_of(self.current, self.list);
        let node = unsafe { self.list.link_between(value, prev, self.current) };
        self.current = Some(node);
    }

    /// Links `value` immediately after the cursor's position and moves the cursor onto it.
    /// O(1).
    ///
    /// At the ghost end position this prepends `value` to the list.
    ///
    /// # Panics
    ///
    /// Panics if `value`'s hook is already linked.
    pub fn insert_after(&mut self, value: &'a A::Value) {
        let next = next_of(self.current, self.list);
        let node = unsafe { self.list.link_between(value, self.current, next) };
        self.current = Some(node);
    }

    /// Unlinks the element the cursor rests on and returns it, moving the cursor to the
    /// following element (or the ghost, if it was the last). O(1).
    ///
    /// Returns `None`, and does nothing, at the ghost end position.
    pub fn remove_current(&mut self) -> Option<&'a A::Value> {
        let node = self.current?;
        self.current = unsafe { node.as_ref() }.next();
        Some(unsafe { self.list.unlink(node) })
    }
}

fn next_of<A: Adapter>(current: Link, list: &List<'_, A>) -> Link {
    match current {
        Some(node) => unsafe { node.as_ref() }.next(),
        None => list.head(),
    }
}

fn prev_of<A: Adapter>(current: Link, list: &List<'_, A>) -> Link {
    match current {
        Some(node) => unsafe { node.as_ref() }.prev(),
        None => list.tail(),
    }
}
