use std::fmt;

/// The error type returned by fallible operations in this crate.
#[derive(Clone, Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A row has too few fields, a non-numeric value where a numeric one is
    /// required, a negative self-edge weight, or an unknown queries format.
    MalformedInput,
    /// An edge references a segment that was never defined, or a referenced
    /// input file is empty or unreadable.
    MissingReference,
    /// A single genome graph ended up with zero nodes, or a worker pool
    /// could not be created.
    ConstructionFailure,
    /// An internal container was used before it was sized.
    CapacityUnset,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Error {
        Error {
            kind,
            message: message.into(),
        }
    }

    /// A `MalformedInput` error pointing at a specific line of an input file.
    pub fn malformed_line(file: &str, line_number: usize, message: impl Into<String>) -> Error {
        Error {
            kind: ErrorKind::MalformedInput,
            message: format!("{}, line {}: {}", file, line_number, message.into()),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for Error {}
