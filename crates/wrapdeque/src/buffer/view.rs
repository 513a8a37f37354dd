use super::CircularBuffer;
use core::fmt::{Display, Formatter, Result};

/// Space separated elements of a buffer, front to back
pub struct LogicalView<'a, T> {
    buffer: &'a CircularBuffer<T>,
}

impl<'a, T> LogicalView<'a, T> {
    pub(super) fn new(buffer: &'a CircularBuffer<T>) -> Self {
        Self { buffer }
    }
}

impl<T: Display> Display for LogicalView<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        for (n, value) in self.buffer.iter().enumerate() {
            if n > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}

/// Space separated physical slots of a buffer.
/// Slots that do not hold a live element are shown as `*`.
pub struct PhysicalView<'a, T> {
    buffer: &'a CircularBuffer<T>,
}

impl<'a, T> PhysicalView<'a, T> {
    pub(super) fn new(buffer: &'a CircularBuffer<T>) -> Self {
        Self { buffer }
    }
}

impl<T: Display> Display for PhysicalView<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        for pos in 0..self.buffer.capacity() {
            if pos > 0 {
                f.write_str(" ")?;
            }
            match self.buffer.live_at(pos) {
                Some(value) => write!(f, "{}", value)?,
                None => f.write_str("*")?,
            }
        }
        Ok(())
    }
}
