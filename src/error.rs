//! Error types for charset resolution and conversion.

use std::io;

use thiserror::Error;

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by resolution and conversion calls
#[derive(Error, Debug)]
pub enum Error {
    /// Charset name or alias has no codec. Raised before any I/O happens.
    #[error("unknown charset: {0}")]
    UnknownCharset(String),

    /// The byte stream could not be decoded or encoded mid-way
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// Underlying read, write or staging file failure
    #[error("I/O error: {0}")]
    Io(#[source] io::Error),
}

impl Error {
    /// Returns true when the error came from an unresolvable charset name.
    pub fn is_unknown_charset(&self) -> bool {
        matches!(self, Error::UnknownCharset(_))
    }

    /// Returns true when the error came from the byte stream itself.
    pub fn is_transform(&self) -> bool {
        matches!(self, Error::Transform(_))
    }
}

impl From<io::Error> for Error {
    /// Transform failures travel through `io::Read` as `InvalidData` errors;
    /// they are unwrapped back into [`Error::Transform`] here.
    fn from(err: io::Error) -> Self {
        match err
            .get_ref()
            .and_then(|inner| inner.downcast_ref::<TransformError>())
        {
            Some(transform) => Error::Transform(transform.clone()),
            None => Error::Io(err),
        }
    }
}

/// Mid-stream decode or encode failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// Byte sequence that is invalid in the declared source charset
    #[error("malformed {charset} sequence of {length} byte(s) at offset {offset}")]
    Malformed {
        /// Charset the bytes were declared as
        charset: &'static str,
        /// Offset of the sequence from the start of the stage input
        offset: u64,
        /// Length of the malformed sequence
        length: usize,
    },

    /// Character with no representation in the destination charset
    #[error("character {character:?} cannot be encoded in {charset}")]
    Unmappable {
        /// Destination charset
        charset: &'static str,
        /// The character that failed to encode
        character: char,
    },

    /// The encode stage received bytes that are not UTF-8
    #[error("invalid UTF-8 input at offset {offset}")]
    InvalidUtf8 {
        /// Offset of the first invalid byte from the start of the stage input
        offset: u64,
    },
}

impl From<TransformError> for io::Error {
    fn from(err: TransformError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_error_survives_io_roundtrip() {
        let original = TransformError::Unmappable {
            charset: "windows-1252",
            character: '你',
        };
        let io_err: io::Error = original.clone().into();
        assert_eq!(io_err.kind(), io::ErrorKind::InvalidData);

        match Error::from(io_err) {
            Error::Transform(err) => assert_eq!(err, original),
            other => panic!("expected transform error, got {other:?}"),
        }
    }

    #[test]
    fn test_plain_io_error_stays_io() {
        let err = Error::from(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        assert!(matches!(err, Error::Io(ref inner) if inner.kind() == io::ErrorKind::BrokenPipe));
        assert!(!err.is_transform());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Error::UnknownCharset("GB2312".into()).to_string(),
            "unknown charset: GB2312"
        );
        let err = TransformError::Malformed {
            charset: "EUC-JP",
            offset: 11,
            length: 1,
        };
        assert_eq!(
            err.to_string(),
            "malformed EUC-JP sequence of 1 byte(s) at offset 11"
        );
    }
}
