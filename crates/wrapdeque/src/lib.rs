#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

#[cfg(test)]
#[macro_use]
extern crate std;

/// Growable double-ended queue on a single circular buffer
pub mod buffer;

/// Random-access cursors into a [`CircularBuffer`]
pub mod cursor;

/// Errors reported by the checked buffer operations
pub mod error;

pub use buffer::CircularBuffer;
pub use cursor::{Cursor, CursorMut};
pub use error::{Error, ErrorKind};
