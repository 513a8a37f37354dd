//! A cursor is a buffer reference plus a signed logical offset from the front.
//!
//! Stepping is never bounds-checked, so a cursor may move before the front or
//! past [`CircularBuffer::end`]. Such a cursor can still be compared, but
//! dereferencing it panics. Cursors borrow their buffer, so the buffer cannot
//! be pushed to or popped from while a cursor into it is alive.

use crate::buffer::CircularBuffer;
use core::fmt::Debug;
use core::ops::{AddAssign, Deref, DerefMut, Index, IndexMut, SubAssign};
use core::ptr;

/// Convert the logical offset `n` positions away from `offset` into a buffer index.
/// Panics on negative or overflowing offsets.
#[track_caller]
fn to_index(offset: isize, n: isize) -> usize {
    match offset.checked_add(n) {
        Some(target) => match usize::try_from(target) {
            Ok(index) => index,
            Err(_) => panic!("cursor offset {} is before the front", target),
        },
        None => panic!("cursor offset {} moved by {} is out of range", offset, n),
    }
}

/// Shared cursor into a [`CircularBuffer`]
pub struct Cursor<'a, T> {
    source: Option<&'a CircularBuffer<T>>,
    offset: isize,
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(source: &'a CircularBuffer<T>, offset: isize) -> Self {
        Self {
            source: Some(source),
            offset,
        }
    }

    /// Logical offset from the front of the buffer
    pub fn offset(&self) -> isize {
        self.offset
    }

    /// The buffer this cursor points into, `None` for a default cursor
    pub fn source(&self) -> Option<&'a CircularBuffer<T>> {
        self.source
    }

    /// Element under the cursor, if the offset is valid
    pub fn get(&self) -> Option<&'a T> {
        self.peek(0)
    }

    /// Element `n` positions away from the cursor, if that position is valid
    pub fn peek(&self, n: isize) -> Option<&'a T> {
        let index = usize::try_from(self.offset.checked_add(n)?).ok()?;
        self.source?.get(index)
    }

    /// Step forward, returning the moved cursor
    pub fn move_next(&mut self) -> &mut Self {
        self.offset += 1;
        self
    }

    /// Step back, returning the moved cursor
    pub fn move_prev(&mut self) -> &mut Self {
        self.offset -= 1;
        self
    }

    /// Step forward, returning the cursor as it was before the step
    pub fn post_next(&mut self) -> Self {
        let before = *self;
        self.offset += 1;
        before
    }

    /// Step back, returning the cursor as it was before the step
    pub fn post_prev(&mut self) -> Self {
        let before = *self;
        self.offset -= 1;
        before
    }

    #[track_caller]
    fn resolve(&self, n: isize) -> &'a T {
        match self.source {
            Some(source) => &source[to_index(self.offset, n)],
            None => panic!("dereferenced a cursor without a buffer"),
        }
    }
}

impl<'a, T> Default for Cursor<'a, T> {
    fn default() -> Self {
        Self {
            source: None,
            offset: 0,
        }
    }
}

impl<'a, T> Clone for Cursor<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for Cursor<'a, T> {}

impl<'a, T> Debug for Cursor<'a, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Cursor")
            .field("source", &self.source.map(|s| s as *const CircularBuffer<T>))
            .field("offset", &self.offset)
            .finish()
    }
}

impl<'a, T> PartialEq for Cursor<'a, T> {
    /// Cursors are equal if they point into the same buffer instance at the same offset
    fn eq(&self, other: &Self) -> bool {
        let same_source = match (self.source, other.source) {
            (Some(a), Some(b)) => ptr::eq(a, b),
            (None, None) => true,
            _ => false,
        };
        same_source && self.offset == other.offset
    }
}

impl<'a, T> Eq for Cursor<'a, T> {}

impl<'a, T> Deref for Cursor<'a, T> {
    type Target = T;

    #[track_caller]
    fn deref(&self) -> &T {
        self.resolve(0)
    }
}

impl<'a, T> Index<isize> for Cursor<'a, T> {
    type Output = T;

    #[track_caller]
    fn index(&self, n: isize) -> &T {
        self.resolve(n)
    }
}

impl<'a, T> AddAssign<isize> for Cursor<'a, T> {
    fn add_assign(&mut self, n: isize) {
        self.offset += n;
    }
}

impl<'a, T> SubAssign<isize> for Cursor<'a, T> {
    fn sub_assign(&mut self, n: isize) {
        self.offset -= n;
    }
}

/// Exclusive cursor into a [`CircularBuffer`] that can modify elements in place
pub struct CursorMut<'a, T> {
    source: &'a mut CircularBuffer<T>,
    offset: isize,
}

impl<'a, T> CursorMut<'a, T> {
    pub(crate) fn new(source: &'a mut CircularBuffer<T>, offset: isize) -> Self {
        Self { source, offset }
    }

    pub fn offset(&self) -> isize {
        self.offset
    }

    pub fn get(&self) -> Option<&T> {
        let index = usize::try_from(self.offset).ok()?;
        self.source.get(index)
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        let index = usize::try_from(self.offset).ok()?;
        self.source.get_mut(index)
    }

    pub fn move_next(&mut self) -> &mut Self {
        self.offset += 1;
        self
    }

    pub fn move_prev(&mut self) -> &mut Self {
        self.offset -= 1;
        self
    }

    /// Shared cursor at the same position, borrowing from this one
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(&*self.source, self.offset)
    }
}

impl<'a, T> Debug for CursorMut<'a, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CursorMut")
            .field("offset", &self.offset)
            .finish()
    }
}

impl<'a, T> Deref for CursorMut<'a, T> {
    type Target = T;

    #[track_caller]
    fn deref(&self) -> &T {
        &self.source[to_index(self.offset, 0)]
    }
}

impl<'a, T> DerefMut for CursorMut<'a, T> {
    #[track_caller]
    fn deref_mut(&mut self) -> &mut T {
        &mut self.source[to_index(self.offset, 0)]
    }
}

impl<'a, T> Index<isize> for CursorMut<'a, T> {
    type Output = T;

    #[track_caller]
    fn index(&self, n: isize) -> &T {
        &self.source[to_index(self.offset, n)]
    }
}

impl<'a, T> IndexMut<isize> for CursorMut<'a, T> {
    #[track_caller]
    fn index_mut(&mut self, n: isize) -> &mut T {
        &mut self.source[to_index(self.offset, n)]
    }
}

impl<'a, T> AddAssign<isize> for CursorMut<'a, T> {
    fn add_assign(&mut self, n: isize) {
        self.offset += n;
    }
}

impl<'a, T> SubAssign<isize> for CursorMut<'a, T> {
    fn sub_assign(&mut self, n: isize) {
        self.offset -= n;
    }
}
