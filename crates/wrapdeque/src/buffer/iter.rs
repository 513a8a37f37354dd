use super::CircularBuffer;
use core::iter::FusedIterator;
use core::slice;

/// Front-to-back iterator over the elements of a [`CircularBuffer`]
pub struct Iter<'a, T> {
    head: slice::Iter<'a, Option<T>>,
    tail: slice::Iter<'a, Option<T>>,
}

impl<'a, T> Iter<'a, T> {
    pub(super) fn new(buffer: &'a CircularBuffer<T>) -> Self {
        let (head, tail) = buffer.live_slots();
        Self {
            head: head.iter(),
            tail: tail.iter(),
        }
    }
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            head: self.head.clone(),
            tail: self.tail.clone(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.head
            .next()
            .or_else(|| self.tail.next())
            .and_then(Option::as_ref)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.head.len() + self.tail.len();
        (len, Some(len))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        self.tail
            .next_back()
            .or_else(|| self.head.next_back())
            .and_then(Option::as_ref)
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

/// Front-to-back iterator over mutable references to the elements of a [`CircularBuffer`]
pub struct IterMut<'a, T> {
    head: slice::IterMut<'a, Option<T>>,
    tail: slice::IterMut<'a, Option<T>>,
}

impl<'a, T> IterMut<'a, T> {
    pub(super) fn new(buffer: &'a mut CircularBuffer<T>) -> Self {
        let (head, tail) = buffer.live_slots_mut();
        Self {
            head: head.iter_mut(),
            tail: tail.iter_mut(),
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        self.head
            .next()
            .or_else(|| self.tail.next())
            .and_then(Option::as_mut)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.head.len() + self.tail.len();
        (len, Some(len))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        self.tail
            .next_back()
            .or_else(|| self.head.next_back())
            .and_then(Option::as_mut)
    }
}

impl<'a, T> ExactSizeIterator for IterMut<'a, T> {}

impl<'a, T> FusedIterator for IterMut<'a, T> {}

/// Owning iterator that pops elements off a [`CircularBuffer`]
pub struct IntoIter<T> {
    buffer: CircularBuffer<T>,
}

impl<T> IntoIter<T> {
    pub(super) fn new(buffer: CircularBuffer<T>) -> Self {
        Self { buffer }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.buffer.try_pop_front().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.buffer.len();
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.buffer.try_pop_back().ok()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}
