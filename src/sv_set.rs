//! An ordered set stored in one contiguous buffer.

use crate::error::{TryInsertError, TryReserveError};
use crate::polyfill::*;
use crate::{Comparator, OrdComparator};
use alloc::vec::Vec;
use cfg_if::cfg_if;
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt::{self, Debug};
use core::hash::{Hash, Hasher};
use core::iter::{FromIterator, FusedIterator};
use core::marker::PhantomData;
use core::mem::{self, ManuallyDrop};
use core::ops::Index;
use core::{ptr, slice};
use log::trace;

mod raw;

use raw::{handle_error, RawBuf};

/// An ordered set of unique values kept in a single, contiguous buffer.
///
/// Values are stored in ascending order under the set's [`Comparator`], which is a value held
/// inside the set rather than the [`Ord`] implementation of `T`. Two values that the comparator
/// considers equivalent are never both present.
///
/// Lookup is a binary search over the buffer. Insertion and removal shift the tail of the
/// buffer by one slot, so they are linear in the number of greater elements; in exchange,
/// iteration is a walk over a slice and the set carries no per-element overhead.
///
/// Positions in the set are plain indices, from `0` to [`len`](SvSet::len). The end position
/// (one past the last element) is `len()`; lookups that find nothing return `None` instead.
///
/// # Storage
///
/// The set allocates, grows and releases its buffer itself:
///
/// * inserting into a full set reallocates to exactly twice the capacity, or to a capacity of
///   one if the set had none;
/// * inserting into a set that is not full never changes its capacity;
/// * [`reserve`](SvSet::reserve) and [`shrink_to_fit`](SvSet::shrink_to_fit) resize the buffer
///   to an exact capacity.
///
/// Any operation that reallocates moves every element to a new address. Otherwise an
/// insertion at index `i` only moves the elements at `i` and above, and removal of the element
/// at index `i` only moves the elements above it. References cannot outlive either kind of
/// mutation, but indices can: an index below the point of insertion or removal still names
/// the same element afterwards.
///
/// It is a logic error for a value to be modified in such a way that its ordering relative to
/// any other value, as determined by the comparator, changes while it is in the set. This is
/// normally only possible through [`Cell`], [`RefCell`], global state, I/O, or unsafe code.
/// The behavior resulting from such a logic error is not specified, but will be encapsulated
/// to the `SvSet` that observed the logic error and not result in undefined behavior.
///
/// [`Cell`]: core::cell::Cell
/// [`RefCell`]: core::cell::RefCell
///
/// # Examples
///
/// ```
/// use ravel::SvSet;
///
/// let mut books = SvSet::new();
///
/// books.insert("A Dance With Dragons");
/// books.insert("To Kill a Mockingbird");
/// books.insert("The Odyssey");
/// books.insert("The Great Gatsby");
///
/// if !books.contains("The Winds of Winter") {
///     println!("We have {} books, but The Winds of Winter ain't one.", books.len());
/// }
///
/// // Remove a book.
/// books.remove("The Odyssey");
///
/// // Iterate over everything, in order.
/// for book in &books {
///     println!("{book}");
/// }
/// assert_eq!(books.find("The Great Gatsby"), Some(1));
/// ```
pub struct SvSet<T, C = OrdComparator, A: Allocator + Clone = Global> {
    buf: RawBuf<T, A>,
    len: usize,
    comparator: C,
    _marker: PhantomData<T>,
}

impl<T> SvSet<T> {
    /// Makes a new, empty `SvSet` ordered by `T`'s [`Ord`] implementation.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravel::SvSet;
    ///
    /// let set: SvSet<i32> = SvSet::new();
    /// assert_eq!(set.capacity(), 0);
    /// ```
    #[must_use]
    pub const fn new() -> SvSet<T> {
        SvSet::with_comparator(OrdComparator)
    }
}

impl<T, C> SvSet<T, C> {
    /// Makes a new, empty `SvSet` ordered by the given `comparator`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravel::{FnComparator, SvSet};
    ///
    /// // order by magnitude, so that `3` and `-3` are equivalent
    /// let mut set = SvSet::with_comparator(FnComparator(|a: &i32, b: &i32| {
    ///     a.unsigned_abs().cmp(&b.unsigned_abs())
    /// }));
    /// set.insert(-3);
    /// set.insert(1);
    /// set.insert(2);
    /// assert_eq!(set.insert(3), (2, false));
    /// assert_eq!(set.as_slice(), [1, 2, -3]);
    /// ```
    #[must_use]
    pub const fn with_comparator(comparator: C) -> SvSet<T, C> {
        SvSet { buf: RawBuf::new_in(Global), len: 0, comparator, _marker: PhantomData }
    }

    /// Makes a set holding clones of `values`, which must already be in strictly ascending
    /// order under `comparator`.
    ///
    /// The buffer is allocated with room for exactly `values.len()` elements.
    ///
    /// The ordering of `values` is only checked in debug builds. Handing over values that are
    /// out of order, or that contain equivalent pairs, is a logic error: lookups on the
    /// resulting set may give wrong answers, but the set remains memory safe.
    ///
    /// If cloning any value panics, the clones made so far are dropped and the buffer is
    /// released before the panic propagates.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravel::{ReverseComparator, SvSet};
    ///
    /// let set = SvSet::from_ordered_unique_with(&[9, 4, 1], ReverseComparator);
    /// assert_eq!(set.capacity(), 3);
    /// assert_eq!(set.find(&4), Some(1));
    /// ```
    pub fn from_ordered_unique_with(values: &[T], comparator: C) -> SvSet<T, C>
    where
        T: Clone,
        C: Comparator<T>,
    {
        SvSet::try_from_ordered_unique_with(values, comparator).unwrap_or_else(|e| handle_error(e))
    }

    /// Like [`from_ordered_unique_with`](SvSet::from_ordered_unique_with), but reports
    /// failure to allocate the buffer instead of aborting.
    pub fn try_from_ordered_unique_with(
        values: &[T],
        comparator: C,
    ) -> Result<SvSet<T, C>, TryReserveError>
    where
        T: Clone,
        C: Comparator<T>,
    {
        debug_assert!(
            values.windows(2).all(|pair| comparator.lt(&pair[0], &pair[1])),
            "values are not in strictly ascending order"
        );
        SvSet::try_from_slice_in(values, comparator, Global)
    }
}

impl<T: Clone> SvSet<T> {
    /// Makes a set holding clones of `values`, which must already be in strictly ascending
    /// [`Ord`] order.
    ///
    /// See [`from_ordered_unique_with`](SvSet::from_ordered_unique_with) for the details.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravel::SvSet;
    ///
    /// let mut set = SvSet::from_ordered_unique(&[1, 2, 3, 4, 5, 7, 8, 9, 10]);
    /// assert_eq!((set.len(), set.capacity()), (9, 9));
    ///
    /// // the set is full, so this insertion doubles its capacity
    /// assert_eq!(set.insert(6), (5, true));
    /// assert_eq!(set.capacity(), 18);
    /// assert!(set.iter().copied().eq(1..=10));
    ///
    /// assert_eq!(set.insert(5), (4, false));
    /// ```
    pub fn from_ordered_unique(values: &[T]) -> SvSet<T>
    where
        T: Ord,
    {
        SvSet::from_ordered_unique_with(values, OrdComparator)
    }
}

impl<T, C, A: Allocator + Clone> SvSet<T, C, A> {
    decorate_if! {
        if #[cfg(feature = "allocator_api")] {
            /// Makes a new, empty `SvSet` ordered by `comparator` whose buffer will be
            /// obtained from `alloc`.
            ///
            /// Does not allocate anything on its own.
            ///
            /// # Examples
            ///
            /// ```
            /// # #![feature(allocator_api)]
            /// use ravel::{OrdComparator, SvSet};
            /// use std::alloc::Global;
            ///
            /// let mut set = SvSet::new_in(OrdComparator, Global);
            /// set.insert("a".to_string());
            /// ```
            pub
        }
        fn new_in(comparator: C, alloc: A) -> SvSet<T, C, A> {
            SvSet { buf: RawBuf::new_in(alloc), len: 0, comparator, _marker: PhantomData }
        }
    }

    decorate_if! {
        if #[cfg(feature = "allocator_api")] {
            /// Returns a reference to the allocator backing the set's buffer.
            pub
        }
        fn allocator(&self) -> &A {
            self.buf.allocator()
        }
    }

    fn try_from_slice_in(values: &[T], comparator: C, alloc: A) -> Result<Self, TryReserveError>
    where
        T: Clone,
    {
        let mut set: Self = SvSet {
            buf: RawBuf::try_with_capacity_in(values.len(), alloc)?,
            len: 0,
            comparator,
            _marker: PhantomData,
        };
        // `set` owns the clones made so far, so a panicking clone drops exactly those and
        // releases the buffer.
        for value in values {
            unsafe { ptr::write(set.buf.ptr().add(set.len), value.clone()) };
            set.len += 1;
        }
        Ok(set)
    }

    // Moves into a buffer of exactly `len` slots from `alloc`; the `Vec` may hold spare
    // capacity from collection and its allocation comes from `Global`.
    fn from_sorted_vec(mut values: Vec<T>, comparator: C, alloc: A) -> Self {
        let len = values.len();
        let buf =
            RawBuf::<T, A>::try_with_capacity_in(len, alloc).unwrap_or_else(|e| handle_error(e));
        unsafe {
            ptr::copy_nonoverlapping(values.as_ptr(), buf.ptr(), len);
            values.set_len(0);
        }
        SvSet { buf, len, comparator, _marker: PhantomData }
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravel::SvSet;
    ///
    /// let mut v = SvSet::new();
    /// assert_eq!(v.len(), 0);
    /// v.insert(1);
    /// assert_eq!(v.len(), 1);
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the set contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements the set can hold without reallocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravel::SvSet;
    ///
    /// let mut set = SvSet::new();
    /// set.insert(1);
    /// set.insert(2);
    /// set.insert(3);
    /// assert_eq!((set.len(), set.capacity()), (3, 4));
    /// ```
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Returns a reference to the comparator that orders the set.
    #[must_use]
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Extracts a slice of the entire set, in ascending order.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.buf.ptr(), self.len) }
    }

    /// Gets an iterator that visits the elements of the set in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravel::SvSet;
    ///
    /// let set = SvSet::from([3, 1, 2]);
    /// let mut set_iter = set.iter();
    /// assert_eq!(set_iter.next(), Some(&1));
    /// assert_eq!(set_iter.next_back(), Some(&3));
    /// assert_eq!(set_iter.next(), Some(&2));
    /// assert_eq!(set_iter.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { iter: self.as_slice().iter() }
    }

    /// Returns the element at position `index`, or `None` if `index >= len()`.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Returns a reference to the first (least) element in the set, if any.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// Returns a reference to the last (greatest) element in the set, if any.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Binary searches the set for `key`.
    ///
    /// Returns `Ok` with the index of the equivalent element if there is one, otherwise `Err`
    /// with the index at which `key` would be inserted.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravel::SvSet;
    ///
    /// let set = SvSet::from([10, 20, 30]);
    /// assert_eq!(set.rank(&20), Ok(1));
    /// assert_eq!(set.rank(&25), Err(2));
    /// ```
    pub fn rank<Q: ?Sized>(&self, key: &Q) -> Result<usize, usize>
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
    {
        self.as_slice().binary_search_by(|probe| self.comparator.cmp(probe.borrow(), key))
    }

    /// Returns the index of the element equivalent to `key`, or `None` if there is none.
    ///
    /// The value may be any borrowed form of the set's value type, as long as the comparator
    /// can order it.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravel::SvSet;
    ///
    /// let set = SvSet::from([1, 2, 3]);
    /// assert_eq!(set.find(&2), Some(1));
    /// assert_eq!(set.find(&4), None);
    /// ```
    pub fn find<Q: ?Sized>(&self, key: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
    {
        self.rank(key).ok()
    }

    /// Returns `true` if the set contains an element equivalent to `key`.
    pub fn contains<Q: ?Sized>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
    {
        self.rank(key).is_ok()
    }

    /// Returns a reference to the element in the set, if any, that is equivalent to `key`.
    pub fn get<Q: ?Sized>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
    {
        self.find(key).map(|index| &self[index])
    }

    /// Adds a value to the set.
    ///
    /// Returns the index of `value` in the set, and whether it was newly inserted. If the set
    /// already held an equivalent element, the set is not modified, `value` is dropped, and
    /// the index of the existing element is returned along with `false`.
    ///
    /// When the set is full, the buffer first grows to twice its capacity (to a capacity of
    /// one if it had none); every element moves. Otherwise only the elements greater than
    /// `value` move up by one slot.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity overflows. Allocation failure goes to
    /// [`handle_alloc_error`](alloc::alloc::handle_alloc_error), as it does for `Vec`. Use
    /// [`try_insert`](SvSet::try_insert) to recover from either.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravel::SvSet;
    ///
    /// let mut set = SvSet::new();
    ///
    /// assert_eq!(set.insert(2), (0, true));
    /// assert_eq!(set.insert(1), (0, true));
    /// assert_eq!(set.insert(2), (1, false));
    /// assert_eq!(set.len(), 2);
    /// ```
    pub fn insert(&mut self, value: T) -> (usize, bool)
    where
        C: Comparator<T>,
    {
        match self.try_insert(value) {
            Ok(placed) => placed,
            Err(e) => handle_error(e.error),
        }
    }

    /// Adds a value to the set, reporting failure to grow the buffer instead of aborting.
    ///
    /// On error the set is left untouched and the value is returned inside the
    /// [`TryInsertError`].
    pub fn try_insert(&mut self, value: T) -> Result<(usize, bool), TryInsertError<T>>
    where
        C: Comparator<T>,
    {
        let index = match self.rank(&value) {
            Ok(index) => return Ok((index, false)),
            Err(index) => index,
        };
        match self.try_grow_for_insert() {
            Ok(grown) => {
                unsafe { self.place(index, value, grown) };
                Ok((index, true))
            }
            Err(error) => Err(TryInsertError { error, value }),
        }
    }

    /// Inserts the value built by `f` from `key` unless the set already holds an element
    /// equivalent to `key`.
    ///
    /// Returns the index of the element and whether it was newly inserted. `f` is only called
    /// when the value is missing.
    ///
    /// If the set must grow, the larger buffer is obtained before `f` is called. Should `f`
    /// panic, that buffer is released and the set is left exactly as it was.
    ///
    /// # Panics
    ///
    /// Panics if the value built by `f` is not equivalent to `key`, and in the same cases
    /// as [`insert`](SvSet::insert).
    ///
    /// # Examples
    ///
    /// ```
    /// use ravel::SvSet;
    ///
    /// let mut set: SvSet<String> = SvSet::new();
    /// assert_eq!(set.get_or_insert_with("b", str::to_owned), (0, true));
    /// assert_eq!(set.get_or_insert_with("a", str::to_owned), (0, true));
    /// assert_eq!(set.get_or_insert_with("b", |_| unreachable!()), (1, false));
    /// ```
    pub fn get_or_insert_with<Q: ?Sized, F>(&mut self, key: &Q, f: F) -> (usize, bool)
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
        F: FnOnce(&Q) -> T,
    {
        let index = match self.rank(key) {
            Ok(index) => return (index, false),
            Err(index) => index,
        };
        let grown = self.try_grow_for_insert().unwrap_or_else(|e| handle_error(e));
        let value = f(key);
        assert!(
            self.comparator.equivalent(value.borrow(), key),
            "new value is not equivalent to the key it was built from"
        );
        unsafe { self.place(index, value, grown) };
        (index, true)
    }

    /// Allocates the buffer an insertion needs, if the current one is full.
    fn try_grow_for_insert(&self) -> Result<Option<RawBuf<T, A>>, TryReserveError> {
        let cap = self.capacity();
        if self.len < cap {
            return Ok(None);
        }
        let new_cap = if cap == 0 {
            1
        } else {
            cap.checked_mul(2).ok_or(TryReserveError::CapacityOverflow)?
        };
        RawBuf::try_with_capacity_in(new_cap, self.allocator().clone()).map(Some)
    }

    /// Writes `value` at `index`, either shifting the tail of the current buffer or
    /// relocating everything into `grown`.
    ///
    /// # Safety
    ///
    /// `index <= len`, and either `grown` is `None` and `len < capacity`, or `grown` has room
    /// for `len + 1` elements.
    unsafe fn place(&mut self, index: usize, value: T, grown: Option<RawBuf<T, A>>) {
        let len = self.len;
        let old = self.buf.ptr();
        unsafe {
            match grown {
                None => {
                    let slot = old.add(index);
                    ptr::copy(slot, slot.add(1), len - index);
                    ptr::write(slot, value);
                }
                Some(new) => {
                    let dst = new.ptr();
                    ptr::write(dst.add(index), value);
                    ptr::copy_nonoverlapping(old, dst, index);
                    ptr::copy_nonoverlapping(old.add(index), dst.add(index + 1), len - index);
                    trace!(
                        "sorted-vector set grew from capacity {} to {}",
                        self.buf.capacity(),
                        new.capacity()
                    );
                    // the old buffer only holds moved-out bits now; dropping it just frees it
                    self.buf = new;
                }
            }
        }
        self.len = len + 1;
    }

    /// Removes the element at position `index` and drops it, shifting every greater element
    /// down by one slot.
    ///
    /// Returns the index of the element that followed the removed one, which is `index`
    /// itself; it equals `len()` if the removed element was the last. The capacity is
    /// unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravel::SvSet;
    ///
    /// let mut set = SvSet::from([1, 2, 3]);
    /// assert_eq!(set.erase(1), 1);
    /// assert_eq!(set[1], 3);
    /// assert_eq!(set.erase(1), set.len());
    /// assert_eq!(set.as_slice(), [1]);
    /// ```
    pub fn erase(&mut self, index: usize) -> usize {
        drop(self.remove_index(index));
        index
    }

    /// Removes and returns the element at position `index`, shifting every greater element
    /// down by one slot.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove_index(&mut self, index: usize) -> T {
        let len = self.len;
        assert!(index < len, "removal index (is {index}) should be < len (is {len})");
        unsafe {
            let slot = self.buf.ptr().add(index);
            let value = ptr::read(slot);
            ptr::copy(slot.add(1), slot, len - index - 1);
            self.len = len - 1;
            value
        }
    }

    /// If the set contains an element equivalent to `key`, removes and drops it. Returns
    /// whether such an element was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravel::SvSet;
    ///
    /// let mut set = SvSet::new();
    /// set.insert(2);
    /// assert_eq!(set.remove(&2), true);
    /// assert_eq!(set.remove(&2), false);
    /// ```
    pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
    {
        self.take(key).is_some()
    }

    /// Removes and returns the element in the set, if any, that is equivalent to `key`.
    pub fn take<Q: ?Sized>(&mut self, key: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
    {
        let index = self.find(key)?;
        Some(self.remove_index(index))
    }

    /// Removes the first element from the set and returns it, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravel::SvSet;
    ///
    /// let mut set = SvSet::from([1, 2]);
    /// assert_eq!(set.pop_first(), Some(1));
    /// assert_eq!(set.pop_first(), Some(2));
    /// assert_eq!(set.pop_first(), None);
    /// ```
    pub fn pop_first(&mut self) -> Option<T> {
        if self.is_empty() {
            None
        } else {
            Some(self.remove_index(0))
        }
    }

    /// Removes the last element from the set and returns it, if any.
    pub fn pop_last(&mut self) -> Option<T> {
        if self.is_empty() {
            None
        } else {
            self.len -= 1;
            Some(unsafe { ptr::read(self.buf.ptr().add(self.len)) })
        }
    }

    /// Retains only the elements specified by the predicate.
    ///
    /// In other words, remove all elements `e` for which `f(&e)` returns `false`. The elements
    /// are visited in ascending order, and the survivors keep their relative order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravel::SvSet;
    ///
    /// let mut set = SvSet::from([1, 2, 3, 4, 5, 6]);
    /// // Keep only the even numbers.
    /// set.retain(|&k| k % 2 == 0);
    /// assert!(set.iter().eq([2, 4, 6].iter()));
    /// ```
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> bool,
    {
        let original_len = self.len;
        let ptr = self.buf.ptr();

        // Visited elements are either dropped or moved down over the holes. If `f` or a drop
        // panics, the guard closes the gap so that the set ends up with the survivors so far
        // plus everything not yet visited.
        struct BackshiftOnDrop<'a, T> {
            ptr: *mut T,
            len: &'a mut usize,
            processed: usize,
            deleted: usize,
            original_len: usize,
        }

        impl<T> Drop for BackshiftOnDrop<'_, T> {
            fn drop(&mut self) {
                if self.deleted > 0 {
                    unsafe {
                        ptr::copy(
                            self.ptr.add(self.processed),
                            self.ptr.add(self.processed - self.deleted),
                            self.original_len - self.processed,
                        );
                    }
                }
                *self.len = self.original_len - self.deleted;
            }
        }

        // Nothing is visible through the set while elements are being moved.
        self.len = 0;
        let mut g =
            BackshiftOnDrop { ptr, len: &mut self.len, processed: 0, deleted: 0, original_len };

        while g.processed < original_len {
            let cur = unsafe { &mut *g.ptr.add(g.processed) };
            if !f(cur) {
                g.processed += 1;
                g.deleted += 1;
                unsafe { ptr::drop_in_place(cur) };
            } else {
                if g.deleted > 0 {
                    unsafe {
                        let hole = g.ptr.add(g.processed - g.deleted);
                        ptr::copy_nonoverlapping(cur, hole, 1);
                    }
                }
                g.processed += 1;
            }
        }
    }

    /// Grows the buffer to exactly `capacity` slots, if it is currently smaller. Never
    /// shrinks.
    ///
    /// Growing moves every element.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity exceeds `isize::MAX` bytes. Allocation failure goes to
    /// [`handle_alloc_error`](alloc::alloc::handle_alloc_error).
    ///
    /// # Examples
    ///
    /// ```
    /// use ravel::SvSet;
    ///
    /// let mut set = SvSet::from([1]);
    /// set.reserve(10);
    /// assert_eq!(set.capacity(), 10);
    /// set.reserve(5);
    /// assert_eq!(set.capacity(), 10);
    /// ```
    pub fn reserve(&mut self, capacity: usize) {
        self.try_reserve(capacity).unwrap_or_else(|e| handle_error(e))
    }

    /// Tries to grow the buffer to exactly `capacity` slots, if it is currently smaller.
    ///
    /// On error the set is left untouched.
    pub fn try_reserve(&mut self, capacity: usize) -> Result<(), TryReserveError> {
        if capacity > self.capacity() {
            self.try_relocate(capacity)
        } else {
            Ok(())
        }
    }

    /// Shrinks the buffer to exactly `len()` slots, if it is currently larger. Never grows.
    ///
    /// An empty set releases its buffer altogether.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravel::SvSet;
    ///
    /// let mut set = SvSet::from([1, 2, 3]);
    /// set.reserve(10);
    /// set.shrink_to_fit();
    /// assert_eq!(set.capacity(), 3);
    /// ```
    pub fn shrink_to_fit(&mut self) {
        self.try_shrink_to_fit().unwrap_or_else(|e| handle_error(e))
    }

    /// Tries to shrink the buffer to exactly `len()` slots, if it is currently larger.
    ///
    /// On error the set is left untouched.
    pub fn try_shrink_to_fit(&mut self) -> Result<(), TryReserveError> {
        if self.capacity() > self.len {
            self.try_relocate(self.len)
        } else {
            Ok(())
        }
    }

    fn try_relocate(&mut self, capacity: usize) -> Result<(), TryReserveError> {
        debug_assert!(capacity >= self.len);
        let new = RawBuf::<T, A>::try_with_capacity_in(capacity, self.allocator().clone())?;
        unsafe { ptr::copy_nonoverlapping(self.buf.ptr(), new.ptr(), self.len) };
        trace!(
            "sorted-vector set relocated from capacity {} to {}",
            self.buf.capacity(),
            capacity
        );
        self.buf = new;
        Ok(())
    }

    /// Exchanges the contents of two sets: elements, buffers, comparators and allocators.
    ///
    /// Indices taken in one set name the same elements in the other afterwards.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other)
    }

    /// Clears the set, dropping all elements. The capacity is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravel::SvSet;
    ///
    /// let mut v = SvSet::from([1, 2]);
    /// v.clear();
    /// assert!(v.is_empty());
    /// assert_eq!(v.capacity(), 2);
    /// ```
    pub fn clear(&mut self) {
        let elems: *mut [T] = ptr::slice_from_raw_parts_mut(self.buf.ptr(), self.len);
        // forget the elements first, so that a panicking drop cannot lead to a double drop
        self.len = 0;
        unsafe { ptr::drop_in_place(elems) }
    }
}

cfg_if! {
    if #[cfg(feature = "dropck_eyepatch")] {
        unsafe impl<#[may_dangle] T, C, A: Allocator + Clone> Drop for SvSet<T, C, A> {
            fn drop(&mut self) {
                unsafe {
                    ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.buf.ptr(), self.len))
                }
            }
        }
    } else {
        impl<T, C, A: Allocator + Clone> Drop for SvSet<T, C, A> {
            fn drop(&mut self) {
                unsafe {
                    ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.buf.ptr(), self.len))
                }
            }
        }
    }
}

impl<T: Clone, C: Clone, A: Allocator + Clone> Clone for SvSet<T, C, A> {
    /// Deep-copies the elements into a buffer of exactly `len()` slots.
    fn clone(&self) -> Self {
        SvSet::try_from_slice_in(
            self.as_slice(),
            self.comparator.clone(),
            self.allocator().clone(),
        )
        .unwrap_or_else(|e| handle_error(e))
    }

    /// The receiver is only overwritten once the copy is complete, so a panicking clone leaves
    /// it as it was.
    fn clone_from(&mut self, source: &Self) {
        *self = source.clone();
    }
}

impl<T, C: Default> Default for SvSet<T, C> {
    /// Creates an empty `SvSet`.
    fn default() -> SvSet<T, C> {
        SvSet::with_comparator(C::default())
    }
}

impl<T: Hash, C, A: Allocator + Clone> Hash for SvSet<T, C, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state)
    }
}

impl<T: PartialEq, C, A: Allocator + Clone> PartialEq for SvSet<T, C, A> {
    fn eq(&self, other: &SvSet<T, C, A>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, C, A: Allocator + Clone> Eq for SvSet<T, C, A> {}

impl<T: PartialOrd, C, A: Allocator + Clone> PartialOrd for SvSet<T, C, A> {
    fn partial_cmp(&self, other: &SvSet<T, C, A>) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord, C, A: Allocator + Clone> Ord for SvSet<T, C, A> {
    fn cmp(&self, other: &SvSet<T, C, A>) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Debug, C, A: Allocator + Clone> Debug for SvSet<T, C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, C, A: Allocator + Clone> Index<usize> for SvSet<T, C, A> {
    type Output = T;

    /// Returns the element at position `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T, C: Comparator<T> + Default> FromIterator<T> for SvSet<T, C> {
    /// Collects the values into a set. Of several equivalent values, the first one wins.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> SvSet<T, C> {
        let mut inputs: Vec<_> = iter.into_iter().collect();
        let comparator = C::default();

        // use stable sort to preserve the insertion order.
        inputs.sort_by(|a, b| comparator.cmp(a, b));
        inputs.dedup_by(|later, earlier| comparator.equivalent(later, earlier));
        SvSet::from_sorted_vec(inputs, comparator, Global)
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for SvSet<T> {
    /// Converts a `[T; N]` into an `SvSet<T>`.
    ///
    /// ```
    /// use ravel::SvSet;
    ///
    /// let set1 = SvSet::from([1, 2, 3, 4]);
    /// let set2: SvSet<_> = [4, 3, 2, 1].into();
    /// assert_eq!(set1, set2);
    /// ```
    fn from(arr: [T; N]) -> Self {
        SvSet::from_iter(arr)
    }
}

impl<T, C: Comparator<T>, A: Allocator + Clone> Extend<T> for SvSet<T, C, A> {
    #[inline]
    fn extend<Iter: IntoIterator<Item = T>>(&mut self, iter: Iter) {
        iter.into_iter().for_each(move |elem| {
            self.insert(elem);
        });
    }
}

impl<'a, T: 'a + Copy, C: Comparator<T>, A: Allocator + Clone> Extend<&'a T> for SvSet<T, C, A> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

/// An iterator over the elements of an [`SvSet`], in ascending order.
///
/// This `struct` is created by the [`iter`] method on [`SvSet`].
///
/// "Ascending" is the set's comparator order. [`Iterator::min`] and [`Iterator::max`] still
/// compare by [`Ord`]; [`SvSet::first`] and [`SvSet::last`] give the comparator's extremes.
///
/// [`iter`]: SvSet::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    iter: slice::Iter<'a, T>,
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.iter.as_slice()).finish()
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter { iter: self.iter.clone() }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }

    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }

}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        self.iter.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.iter.len()
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

/// An owning iterator over the elements of an [`SvSet`], in ascending order.
///
/// This `struct` is created by the [`into_iter`] method on [`SvSet`] (provided by the
/// [`IntoIterator`] trait). Elements that are not consumed are dropped along with the
/// iterator, which then releases the buffer.
///
/// [`into_iter`]: SvSet#method.into_iter
pub struct IntoIter<T, A: Allocator + Clone = Global> {
    buf: RawBuf<T, A>,
    start: usize,
    end: usize,
}

impl<T, A: Allocator + Clone> IntoIter<T, A> {
    fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.buf.ptr().add(self.start), self.end - self.start) }
    }
}

impl<T: Debug, A: Allocator + Clone> Debug for IntoIter<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T, A: Allocator + Clone> Drop for IntoIter<T, A> {
    fn drop(&mut self) {
        let remaining = ptr::slice_from_raw_parts_mut(
            unsafe { self.buf.ptr().add(self.start) },
            self.end - self.start,
        );
        self.start = self.end;
        unsafe { ptr::drop_in_place(remaining) }
    }
}

impl<T, A: Allocator + Clone> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            None
        } else {
            let value = unsafe { ptr::read(self.buf.ptr().add(self.start)) };
            self.start += 1;
            Some(value)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.start;
        (len, Some(len))
    }
}

impl<T, A: Allocator + Clone> DoubleEndedIterator for IntoIter<T, A> {
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            None
        } else {
            self.end -= 1;
            Some(unsafe { ptr::read(self.buf.ptr().add(self.end)) })
        }
    }
}

impl<T, A: Allocator + Clone> ExactSizeIterator for IntoIter<T, A> {
    fn len(&self) -> usize {
        self.end - self.start
    }
}

impl<T, A: Allocator + Clone> FusedIterator for IntoIter<T, A> {}

impl<T, C, A: Allocator + Clone> IntoIterator for SvSet<T, C, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    /// Gets an iterator for moving out the `SvSet`'s contents.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravel::SvSet;
    ///
    /// let set = SvSet::from([1, 2, 3, 4]);
    ///
    /// let v: Vec<_> = set.into_iter().collect();
    /// assert_eq!(v, [1, 2, 3, 4]);
    /// ```
    fn into_iter(self) -> IntoIter<T, A> {
        let mut me = ManuallyDrop::new(self);
        let iter = IntoIter { buf: unsafe { ptr::read(&me.buf) }, start: 0, end: me.len };
        unsafe { ptr::drop_in_place(&mut me.comparator) };
        iter
    }
}

impl<'a, T, C, A: Allocator + Clone> IntoIterator for &'a SvSet<T, C, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

#[cfg(test)]
mod tests;
