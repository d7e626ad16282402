/*!
Specialized `Error` and `Result` types for vmsim.
*/

use std::{error, fmt, result};

use log::error;

/// The error type of every fallible vmsim operation.
///
/// An error is a pair of the component it originated from and the kind of
/// failure. Context (the failing address, page or path) is not stored inside
/// the error; it is emitted through [`log_error`](Error::log_error) at the point
/// where the error is raised.
///
/// # Examples
///
/// ```
/// use vmsim::error::{Error, ErrorKind, ErrorOrigin};
///
/// let err = Error(ErrorOrigin::Mmu, ErrorKind::OutOfRange);
/// assert_eq!(err.to_string(), "mmu: address out of range");
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Error(pub ErrorOrigin, pub ErrorKind);

impl Error {
    /// Returns a static string representing the type of error.
    pub fn as_str(&self) -> &'static str {
        self.1.to_str()
    }

    /// Returns the component this error originated from.
    pub fn origin(&self) -> ErrorOrigin {
        self.0
    }

    /// Returns the kind of failure.
    pub fn kind(&self) -> ErrorKind {
        self.1
    }

    pub fn log_error(self, err: impl fmt::Display) -> Self {
        error!("{}: {} ({})", self.0.to_str(), self.1.to_str(), err);
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.0.to_str(), self.1.to_str())
    }
}

impl error::Error for Error {
    fn description(&self) -> &str {
        self.as_str()
    }
}

#[repr(u16)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ErrorOrigin {
    Config,

    Mmu,
    PageTable,
    FrameStore,
    BackingStore,

    Trace,

    Other,
}

impl ErrorOrigin {
    /// Returns a static string representing the type of error.
    pub fn to_str(self) -> &'static str {
        match self {
            ErrorOrigin::Config => "config",

            ErrorOrigin::Mmu => "mmu",
            ErrorOrigin::PageTable => "page table",
            ErrorOrigin::FrameStore => "frame store",
            ErrorOrigin::BackingStore => "backing store",

            ErrorOrigin::Trace => "trace",

            ErrorOrigin::Other => "other",
        }
    }
}

#[repr(u16)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    Configuration,
    InvalidPageSize,
    InvalidMemorySize,

    OutOfRange,
    OutOfBounds,
    NotResident,
    FrameNotLoaded,
    AlreadyExists,
    Encoding,

    UnableToOpenFile,
    UnableToReadFile,
    UnableToSeekFile,
    UnableToMapFile,
    UnableToWriteFile,
}

impl ErrorKind {
    /// Returns a static string representing the type of error.
    pub fn to_str(self) -> &'static str {
        match self {
            ErrorKind::Configuration => "configuration error",
            ErrorKind::InvalidPageSize => "invalid page size",
            ErrorKind::InvalidMemorySize => "invalid memory size",

            ErrorKind::OutOfRange => "address out of range",
            ErrorKind::OutOfBounds => "out of bounds",
            ErrorKind::NotResident => "page is not resident",
            ErrorKind::FrameNotLoaded => "frame is not loaded",
            ErrorKind::AlreadyExists => "already exists",
            ErrorKind::Encoding => "encoding error",

            ErrorKind::UnableToOpenFile => "unable to open file",
            ErrorKind::UnableToReadFile => "unable to read file",
            ErrorKind::UnableToSeekFile => "unable to seek file",
            ErrorKind::UnableToMapFile => "unable to map file",
            ErrorKind::UnableToWriteFile => "unable to write file",
        }
    }
}

/// Specialized `Result` type for vmsim results.
pub type Result<T> = result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let err = Error(ErrorOrigin::PageTable, ErrorKind::NotResident);
        assert_eq!(err.to_string(), "page table: page is not resident");
        assert_eq!(err.as_str(), "page is not resident");
    }

    #[test]
    fn log_passthrough() {
        let err = Error(ErrorOrigin::FrameStore, ErrorKind::FrameNotLoaded).log_error("frame 3");
        assert_eq!(err.origin(), ErrorOrigin::FrameStore);
        assert_eq!(err.kind(), ErrorKind::FrameNotLoaded);
    }
}
