use core::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The operation needs at least one element, but the buffer was empty
    Empty { op: &'static str },

    /// A logical index was not below the number of elements in the buffer
    OutOfBounds { index: usize, len: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self.kind {
            ErrorKind::Empty { op } => write!(f, "{} called on an empty buffer", op),
            ErrorKind::OutOfBounds { index, len } => {
                write!(f, "index out of bounds: the len is {} but the index is {}", len, index)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl Error {
    /// Create a new error from a given ErrorKind
    fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }

    /// Extract the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// Make an error that indicates that `op` needs a non-empty buffer
pub(crate) fn empty(op: &'static str) -> Error {
    Error::new(ErrorKind::Empty { op })
}

/// Make an error that indicates an access past the last element
pub(crate) fn out_of_bounds(index: usize, len: usize) -> Error {
    Error::new(ErrorKind::OutOfBounds { index, len })
}
