use std::fmt::{self, Display};

/// Errors reported by storage operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The global allocator could not provide the requested block.
    AllocationFailed { bytes: usize },
    /// The requested capacity does not fit in a single allocation.
    CapacityOverflow,
    /// A checked access landed outside the occupied range.
    OutOfRange { index: usize, len: usize },
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::AllocationFailed { bytes } => write!(f, "Failed to allocate a block of {} bytes", bytes),
            Error::CapacityOverflow => Display::fmt("Requested capacity overflows a single allocation", f),
            Error::OutOfRange { index, len } => write!(f, "Index {} is out of range for length {}", index, len),
        }
    }
}

impl std::error::Error for Error {}
