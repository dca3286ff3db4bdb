use std::cmp::{self, Ordering};
use std::fmt;
use std::mem;
use std::ops::{Deref, DerefMut};
use std::ptr;
use std::slice;

use crate::buf::RawBuf;
use crate::error::Error;

/// Growable contiguous array with a manually managed capacity.
///
/// Storage is a single [`RawBuf`] block; the occupied prefix `[0, len)` holds
/// live values and the remaining slots are uninitialized scratch. The vector
/// never allocates directly: it stages a replacement buffer and swaps it in,
/// so a failed allocation leaves the previous state untouched.
///
/// Fallible operations report [`Error`] instead of aborting, in particular
/// [`Error::AllocationFailed`] when the allocator refuses a block.
// not safe for concurrent mutation; share behind external synchronization
pub struct Vector<T> {
    buf: RawBuf<T>,
    len: usize,
}

impl<T> Vector<T> {
    /// Returns an empty vector without allocating.
    pub fn new() -> Vector<T> {
        Vector {
            buf: RawBuf::new(),
            len: 0,
        }
    }

    /// Returns an empty vector with room for `cap` elements pre-allocated.
    pub fn with_capacity(cap: usize) -> Result<Vector<T>, Error> {
        Ok(Vector {
            buf: RawBuf::with_capacity(cap)?,
            len: 0,
        })
    }

    /// Returns a vector of `len` clones of `value`, with `capacity == len`.
    pub fn filled(len: usize, value: T) -> Result<Vector<T>, Error>
    where
        T: Clone,
    {
        let mut vector = Vector::with_capacity(len)?;
        for _ in 0..len {
            unsafe { ptr::write(vector.buf.slot_mut(vector.len), value.clone()) };
            vector.len += 1;
        }
        Ok(vector)
    }

    /// Returns a vector holding clones of `items` in order, with
    /// `capacity == items.len()`.
    pub fn from_slice(items: &[T]) -> Result<Vector<T>, Error>
    where
        T: Clone,
    {
        let mut vector = Vector::with_capacity(items.len())?;
        vector.extend_from_slice(items)?;
        Ok(vector)
    }

    /// Number of occupied elements.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of allocated slots.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.buf.cap()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// View of the occupied prefix.
    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.buf.as_ptr(), self.len) }
    }

    /// Mutable view of the occupied prefix.
    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.buf.as_mut_ptr(), self.len) }
    }

    /// Checked access: reference to the element at `index`, or
    /// [`Error::OutOfRange`] when `index >= len`.
    pub fn at(&self, index: usize) -> Result<&T, Error> {
        if index >= self.len {
            return Err(Error::OutOfRange { index, len: self.len });
        }
        Ok(unsafe { &*self.buf.slot(index) })
    }

    /// Checked access: mutable reference to the element at `index`, or
    /// [`Error::OutOfRange`] when `index >= len`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, Error> {
        if index >= self.len {
            return Err(Error::OutOfRange { index, len: self.len });
        }
        Ok(unsafe { &mut *self.buf.slot_mut(index) })
    }

    /// Drops every element. Capacity is kept.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Drops the elements past `new_len`. Does nothing when `new_len >= len`.
    pub fn truncate(&mut self, new_len: usize) {
        while self.len > new_len {
            self.len -= 1;
            unsafe { ptr::drop_in_place(self.buf.slot_mut(self.len)) };
        }
    }

    /// Grows capacity to exactly `min_capacity` if it is below it, keeping the
    /// occupied elements in order. Never shrinks.
    pub fn reserve(&mut self, min_capacity: usize) -> Result<(), Error> {
        if min_capacity > self.buf.cap() {
            self.regrow(min_capacity)?;
        }
        Ok(())
    }

    /// Adjusts the occupied length to `new_len`.
    ///
    /// Shrinking drops the tail. Growing fills the new slots with
    /// `T::default()`, reallocating to `max(new_len, 2 * capacity)` when the
    /// current block is too small.
    pub fn resize(&mut self, new_len: usize) -> Result<(), Error>
    where
        T: Default,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return Ok(());
        }
        if new_len > self.buf.cap() {
            self.grow_for(new_len)?;
        }
        while self.len < new_len {
            unsafe { ptr::write(self.buf.slot_mut(self.len), T::default()) };
            self.len += 1;
        }
        Ok(())
    }

    /// Appends `value`, doubling the capacity (with a floor of one slot) when
    /// the block is full.
    pub fn push(&mut self, value: T) -> Result<(), Error> {
        if self.len == self.buf.cap() {
            let needed = self.len.checked_add(1).ok_or(Error::CapacityOverflow)?;
            self.grow_for(needed)?;
        }
        unsafe { ptr::write(self.buf.slot_mut(self.len), value) };
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the last element, or `None` when empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        Some(unsafe { ptr::read(self.buf.slot(self.len)) })
    }

    /// Inserts `value` at position `at`, shifting the elements at and after it
    /// one slot right. `at == len` appends. Grows like [`Vector::push`].
    ///
    /// Panics when `at > len`.
    pub fn insert(&mut self, at: usize, value: T) -> Result<(), Error> {
        assert!(at <= self.len, "insert position {} out of bounds for length {}", at, self.len);
        if self.len == self.buf.cap() {
            let needed = self.len.checked_add(1).ok_or(Error::CapacityOverflow)?;
            self.grow_for(needed)?;
        }
        unsafe {
            let slot = self.buf.slot_mut(at);
            ptr::copy(slot, slot.add(1), self.len - at);
            ptr::write(slot, value);
        }
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the element at position `at`, shifting the elements
    /// after it one slot left.
    ///
    /// Panics when `at >= len`.
    pub fn remove(&mut self, at: usize) -> T {
        assert!(at < self.len, "remove position {} out of bounds for length {}", at, self.len);
        unsafe {
            let slot = self.buf.slot_mut(at);
            let value = ptr::read(slot);
            ptr::copy(slot.add(1), slot, self.len - at - 1);
            self.len -= 1;
            value
        }
    }

    /// Appends clones of `items` in order, growing at most once.
    pub fn extend_from_slice(&mut self, items: &[T]) -> Result<(), Error>
    where
        T: Clone,
    {
        let needed = self.len.checked_add(items.len()).ok_or(Error::CapacityOverflow)?;
        if needed > self.buf.cap() {
            self.grow_for(needed)?;
        }
        for item in items {
            unsafe { ptr::write(self.buf.slot_mut(self.len), item.clone()) };
            self.len += 1;
        }
        Ok(())
    }

    /// Exchanges the contents of two vectors in constant time.
    ///
    /// This swaps whole vectors; to swap two elements of one vector, go
    /// through [`Vector::as_mut_slice`].
    pub fn swap(&mut self, other: &mut Vector<T>) {
        self.buf.swap(&mut other.buf);
        mem::swap(&mut self.len, &mut other.len);
    }

    fn grow_for(&mut self, needed: usize) -> Result<(), Error> {
        let doubled = self.buf.cap().checked_mul(2).ok_or(Error::CapacityOverflow)?;
        self.regrow(cmp::max(needed, doubled))
    }

    fn regrow(&mut self, new_cap: usize) -> Result<(), Error> {
        debug_assert!(new_cap >= self.len, "regrow keeps the occupied prefix");
        trace!("capacity {} -> {}", self.buf.cap(), new_cap);
        let mut staged = RawBuf::with_capacity(new_cap)?;
        unsafe { ptr::copy_nonoverlapping(self.buf.as_ptr(), staged.as_mut_ptr(), self.len) };
        self.buf.swap(&mut staged);
        // `staged` now holds the previous block and releases it on scope exit;
        // the values in it were moved out bitwise, so no destructor runs there
        Ok(())
    }
}

impl<T> Drop for Vector<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for Vector<T> {
    fn default() -> Vector<T> {
        Vector::new()
    }
}

impl<T: Clone> Clone for Vector<T> {
    /// Deep copy of the occupied elements into independent storage with
    /// `capacity == len`. Assigning via `clone_from` replaces the destination
    /// wholesale; a clone of an empty vector owns no block.
    fn clone(&self) -> Vector<T> {
        match Vector::from_slice(self.as_slice()) {
            Ok(copy) => copy,
            Err(e) => panic!("vector storage clone: {}", e),
        }
    }
}

impl<T> Deref for Vector<T> {
    type Target = [T];

    #[inline(always)]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for Vector<T> {
    #[inline(always)]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> AsRef<[T]> for Vector<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for Vector<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> slice::Iter<'a, T> {
        self.as_slice().iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Vector<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> slice::IterMut<'a, T> {
        self.as_mut_slice().iter_mut()
    }
}

impl<T> fmt::Debug for Vector<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for item in self.as_slice() {
            list.entry(item);
        }
        list.finish()
    }
}

impl<T: PartialEq> PartialEq for Vector<T> {
    fn eq(&self, other: &Vector<T>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for Vector<T> {}

impl<T: PartialOrd> PartialOrd for Vector<T> {
    /// Lexicographic element-wise comparison; a strict prefix orders first.
    fn partial_cmp(&self, other: &Vector<T>) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord> Ord for Vector<T> {
    fn cmp(&self, other: &Vector<T>) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}
