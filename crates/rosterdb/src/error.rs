//! Error types for rosterdb

use std::fmt;
use std::io;

/// Result type alias for rosterdb operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for roster operations
///
/// A missing user is not an error: lookups return `Option`.
#[derive(Debug)]
pub enum Error {
    /// Malformed caller input (bad email, empty role, empty number list)
    InvalidInput(String),

    /// Update named a field that users do not have
    UnknownField(String),

    /// Record or update text could not be parsed
    Parse(String),

    /// I/O error
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Error::UnknownField(name) => write!(f, "Unknown field: '{}'", name),
            Error::Parse(msg) => write!(f, "Parse error: {}", msg),
            Error::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<nom::Err<nom::error::Error<&str>>> for Error {
    fn from(err: nom::Err<nom::error::Error<&str>>) -> Self {
        Error::Parse(format!("{:?}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_display() {
        let err = Error::InvalidInput("bad email: bob".to_string());
        assert_eq!(err.to_string(), "Invalid input: bad email: bob");

        let err = Error::UnknownField("age".to_string());
        assert_eq!(err.to_string(), "Unknown field: 'age'");
    }

    #[test]
    fn test_io_source() {
        let err = Error::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(matches!(err, Error::Io(_)));
        assert!(err.source().is_some());
        assert!(Error::Parse("x".to_string()).source().is_none());
    }
}
