use crate::cursor::{Cursor, CursorMut};
use crate::error::{self, Error};
use alloc::vec::Vec;
use core::fmt::{Debug, Display};
use core::ops::{Index, IndexMut};

mod iter;
mod view;

pub use iter::{IntoIter, Iter, IterMut};
pub use view::{LogicalView, PhysicalView};

/// Physical positions of the first and the last live element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    front: usize,
    back: usize,
}

/// A double-ended queue stored in a single circular buffer.
///
/// Elements live on the circular path from the front slot to the back slot,
/// wrapping past the end of the storage back to slot 0. The storage starts
/// out unallocated, holds a single slot after the first insertion and
/// doubles every time an insertion finds it full. It never shrinks.
///
/// Accessors without a `try_` prefix treat a missing element as a broken
/// contract and panic. The `try_` variants report the same conditions as an
/// [`Error`].
#[derive(Clone)]
pub struct CircularBuffer<T> {
    /// holds all elements, vacant slots are `None`
    slots: Vec<Option<T>>,

    /// live range, `None` if the buffer holds no elements
    span: Option<Span>,
}

/// Allocate `len` vacant slots
fn vacant<T>(len: usize) -> Vec<Option<T>> {
    let mut slots = Vec::with_capacity(len);
    slots.resize_with(len, || None);
    slots
}

/// Unwrap the result of a checked operation, treating an error as a broken contract
#[track_caller]
fn contract<R>(result: Result<R, Error>) -> R {
    match result {
        Ok(r) => r,
        Err(e) => panic!("{}", e),
    }
}

impl<T> Default for CircularBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CircularBuffer<T> {
    /// Create an empty buffer without allocating
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            span: None,
        }
    }

    /// Create an empty buffer with room for at least `capacity` elements.
    /// The capacity is rounded up to the next power of two.
    pub fn with_capacity(capacity: usize) -> Self {
        match capacity {
            0 => Self::new(),
            n => Self {
                slots: vacant(n.next_power_of_two()),
                span: None,
            },
        }
    }
}

impl<T> CircularBuffer<T> {
    /// Position after `pos`, wrapping at `len`
    fn advance(pos: usize, len: usize) -> usize {
        let next = pos + 1;
        if next == len {
            0
        } else {
            next
        }
    }

    /// Position before `pos`, wrapping at `len`
    fn retreat(pos: usize, len: usize) -> usize {
        if pos == 0 {
            len - 1
        } else {
            pos - 1
        }
    }

    /// Map a logical index to its physical slot. `index` must be below the capacity,
    /// so a single subtraction replaces the modulo.
    fn physical_index(&self, front: usize, index: usize) -> usize {
        let pos = front + index;
        if pos >= self.capacity() {
            pos - self.capacity()
        } else {
            pos
        }
    }

    /// Check if a physical slot lies on the live range
    fn in_range(&self, pos: usize) -> bool {
        match self.span {
            None => false,
            Some(Span { front, back }) if front <= back => pos >= front && pos <= back,
            Some(Span { front, back }) => pos >= front || pos <= back,
        }
    }

    /// Physical slot of the element at a logical index
    fn slot_of(&self, index: usize) -> Result<usize, Error> {
        match self.span {
            Some(Span { front, .. }) if index < self.len() => Ok(self.physical_index(front, index)),
            _ => Err(error::out_of_bounds(index, self.len())),
        }
    }

    fn live(&self, pos: usize) -> &T {
        match &self.slots[pos] {
            Some(value) => value,
            None => unreachable!("live slot {} is vacant", pos),
        }
    }

    fn live_mut(&mut self, pos: usize) -> &mut T {
        match &mut self.slots[pos] {
            Some(value) => value,
            None => unreachable!("live slot {} is vacant", pos),
        }
    }

    fn take_live(&mut self, pos: usize) -> T {
        match self.slots[pos].take() {
            Some(value) => value,
            None => unreachable!("live slot {} is vacant", pos),
        }
    }

    /// Element at a physical slot, if that slot is on the live range
    pub(crate) fn live_at(&self, pos: usize) -> Option<&T> {
        if self.in_range(pos) {
            self.slots[pos].as_ref()
        } else {
            None
        }
    }

    /// The live slots as at most two contiguous runs, in logical order
    pub(crate) fn live_slots(&self) -> (&[Option<T>], &[Option<T>]) {
        match self.span {
            None => (&[], &[]),
            Some(Span { front, back }) if front <= back => (&self.slots[front..=back], &[]),
            Some(Span { front, back }) => (&self.slots[front..], &self.slots[..=back]),
        }
    }

    pub(crate) fn live_slots_mut(&mut self) -> (&mut [Option<T>], &mut [Option<T>]) {
        match self.span {
            None => (&mut [], &mut []),
            Some(Span { front, back }) if front <= back => (&mut self.slots[front..=back], &mut []),
            Some(Span { front, back }) => {
                let (head, tail) = self.slots.split_at_mut(front);
                (tail, &mut head[..=back])
            }
        }
    }

    /// Make room for one more element, allocating the first slot or doubling the storage
    fn reserve_one(&mut self) {
        if self.capacity() == 0 {
            self.slots = vacant(1);
            tracing::debug!("allocated first slot");
        } else if self.is_full() {
            self.grow();
        }
    }

    /// Double the capacity and move every element into the new storage.
    ///
    /// The front element keeps its physical slot. If the live range wraps, the
    /// part stored at the start of the old storage moves behind its old end.
    fn grow(&mut self) {
        let cap = self.capacity();
        debug_assert!(cap > 0, "growth needs allocated storage");
        let mut slots = vacant(cap * 2);
        if let Some(Span { front, back }) = self.span {
            let back = if front <= back {
                for pos in front..=back {
                    slots[pos] = self.slots[pos].take();
                }
                back
            } else {
                for pos in front..cap {
                    slots[pos] = self.slots[pos].take();
                }
                for pos in 0..=back {
                    slots[pos + cap] = self.slots[pos].take();
                }
                back + cap
            };
            self.span = Some(Span { front, back });
        }
        self.slots = slots;
        tracing::debug!(capacity = cap * 2, "capacity doubled");
    }
}

impl<T> CircularBuffer<T> {
    /// Number of elements in the buffer
    pub fn len(&self) -> usize {
        match self.span {
            None => 0,
            Some(Span { front, back }) if back >= front => back - front + 1,
            Some(Span { front, back }) => self.capacity() + back - front + 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.span.is_none()
    }

    /// Number of allocated slots
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// True if the next insertion has to allocate. Always true for an unallocated buffer.
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    /// Physical slot of the front element
    pub fn physical_front(&self) -> Option<usize> {
        self.span.map(|span| span.front)
    }

    /// Physical slot of the back element
    pub fn physical_back(&self) -> Option<usize> {
        self.span.map(|span| span.back)
    }

    /// Insert an element before the current front
    pub fn push_front(&mut self, value: T) {
        self.reserve_one();
        let cap = self.capacity();
        let span = match self.span {
            None => Span { front: 0, back: 0 },
            Some(Span { front, back }) => Span {
                front: Self::retreat(front, cap),
                back,
            },
        };
        self.slots[span.front] = Some(value);
        self.span = Some(span);
    }

    /// Insert an element after the current back
    pub fn push_back(&mut self, value: T) {
        self.reserve_one();
        let cap = self.capacity();
        let span = match self.span {
            None => Span { front: 0, back: 0 },
            Some(Span { front, back }) => Span {
                front,
                back: Self::advance(back, cap),
            },
        };
        self.slots[span.back] = Some(value);
        self.span = Some(span);
    }

    /// Remove the front element
    pub fn try_pop_front(&mut self) -> Result<T, Error> {
        let Span { front, back } = self.span.ok_or_else(|| error::empty("pop_front"))?;
        self.span = if front == back {
            None
        } else {
            Some(Span {
                front: Self::advance(front, self.capacity()),
                back,
            })
        };
        Ok(self.take_live(front))
    }

    /// Remove the back element
    pub fn try_pop_back(&mut self) -> Result<T, Error> {
        let Span { front, back } = self.span.ok_or_else(|| error::empty("pop_back"))?;
        self.span = if front == back {
            None
        } else {
            Some(Span {
                front,
                back: Self::retreat(back, self.capacity()),
            })
        };
        Ok(self.take_live(back))
    }

    /// Remove the front element. Panics if the buffer is empty.
    #[track_caller]
    pub fn pop_front(&mut self) -> T {
        contract(self.try_pop_front())
    }

    /// Remove the back element. Panics if the buffer is empty.
    #[track_caller]
    pub fn pop_back(&mut self) -> T {
        contract(self.try_pop_back())
    }

    /// Element at a logical index, counted from the front
    pub fn try_get(&self, index: usize) -> Result<&T, Error> {
        let pos = self.slot_of(index)?;
        Ok(self.live(pos))
    }

    pub fn try_get_mut(&mut self, index: usize) -> Result<&mut T, Error> {
        let pos = self.slot_of(index)?;
        Ok(self.live_mut(pos))
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.try_get(index).ok()
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.try_get_mut(index).ok()
    }

    pub fn try_front(&self) -> Result<&T, Error> {
        match self.span {
            Some(Span { front, .. }) => Ok(self.live(front)),
            None => Err(error::empty("front")),
        }
    }

    pub fn try_back(&self) -> Result<&T, Error> {
        match self.span {
            Some(Span { back, .. }) => Ok(self.live(back)),
            None => Err(error::empty("back")),
        }
    }

    /// The front element. Panics if the buffer is empty.
    #[track_caller]
    pub fn front(&self) -> &T {
        contract(self.try_front())
    }

    /// The back element. Panics if the buffer is empty.
    #[track_caller]
    pub fn back(&self) -> &T {
        contract(self.try_back())
    }

    #[track_caller]
    pub fn front_mut(&mut self) -> &mut T {
        match self.span {
            Some(Span { front, .. }) => self.live_mut(front),
            None => contract(Err(error::empty("front_mut"))),
        }
    }

    #[track_caller]
    pub fn back_mut(&mut self) -> &mut T {
        match self.span {
            Some(Span { back, .. }) => self.live_mut(back),
            None => contract(Err(error::empty("back_mut"))),
        }
    }

    /// Drop all elements. The capacity is kept.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            drop(slot.take())
        }
        self.span = None;
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|v| v == value)
    }

    /// Iterate from front to back
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Iterate mutably from front to back
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }

    /// Cursor at the front element
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::new(self, 0)
    }

    /// Cursor one past the back element. The position is fixed when the cursor is created.
    pub fn end(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.len() as isize)
    }

    pub fn begin_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut::new(self, 0)
    }

    pub fn end_mut(&mut self) -> CursorMut<'_, T> {
        let len = self.len() as isize;
        CursorMut::new(self, len)
    }

    /// Displays the elements from front to back
    pub fn logical(&self) -> LogicalView<'_, T> {
        LogicalView::new(self)
    }

    /// Displays every physical slot, with `*` for slots outside the live range
    pub fn physical(&self) -> PhysicalView<'_, T> {
        PhysicalView::new(self)
    }

    /// Emit the cursor positions and both views of the buffer as a trace event
    pub fn trace_state(&self)
    where
        T: Display,
    {
        tracing::trace!(
            logical = %self.logical(),
            physical = %self.physical(),
            front = ?self.physical_front(),
            back = ?self.physical_back(),
            capacity = self.capacity(),
            len = self.len(),
            "buffer state"
        );
    }
}

impl<T> Index<usize> for CircularBuffer<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: usize) -> &T {
        contract(self.try_get(index))
    }
}

impl<T> IndexMut<usize> for CircularBuffer<T> {
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut T {
        contract(self.try_get_mut(index))
    }
}

impl<T: Debug> Debug for CircularBuffer<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for CircularBuffer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for CircularBuffer<T> {}

impl<T> Extend<T> for CircularBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|value| self.push_back(value))
    }
}

impl<T> FromIterator<T> for CircularBuffer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut buffer = Self::new();
        buffer.extend(iter);
        buffer
    }
}

impl<T> IntoIterator for CircularBuffer<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter::new(self)
    }
}

impl<'a, T> IntoIterator for &'a CircularBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut CircularBuffer<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}
