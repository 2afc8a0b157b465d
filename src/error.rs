//! Error types for imgscale.

use std::io;
use thiserror::Error;

/// Result type alias for imgscale operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while scaling images in a fragment.
#[derive(Error, Debug)]
pub enum Error {
    /// A caller supplied an argument outside its contract, e.g. a negative size.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The fragment could not be read as HTML.
    #[error("HTML parsing error: {0}")]
    Parse(String),

    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The configuration file is unreadable or holds invalid values.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Error::Parse(format!("fragment is not valid UTF-8: {err}"))
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidArgument("size must be non-negative, got -1".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid argument: size must be non-negative, got -1"
        );
    }

    #[test]
    fn test_utf8_error_conversion() {
        let bytes = [b'<', 0xff, b'>'];
        let err: Error = std::str::from_utf8(&bytes).unwrap_err().into();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
