use crate::ParseError;
use thiserror::Error;

#[doc = r#"
A parse failure, stamped with the byte offset at which it was detected.
"#]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("At byte {position}: {kind}")]
pub struct ReaderError {
    position: usize,
    pub(crate) kind: ReaderErrorKind,
}

/// A kind of error a reader can produce.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReaderErrorKind {
    /// The bytes were readable but not meaningful
    #[error("{0}")]
    ParseError(#[from] ParseError),
    /// A read ran past the end of the source
    #[error("Read out of bounds")]
    OutOfBounds,
}

impl ReaderError {
    /// Create a reader error from a position and kind.
    pub const fn new(position: usize, kind: ReaderErrorKind) -> Self {
        Self { position, kind }
    }

    /// Create a parse error at a position.
    pub fn parse(position: usize, error: impl Into<ParseError>) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::ParseError(error.into()),
        }
    }

    /// Create an out-of-bounds error at a position.
    pub const fn oob(position: usize) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::OutOfBounds,
        }
    }

    /// The error kind.
    pub fn kind(&self) -> &ReaderErrorKind {
        &self.kind
    }

    /// True if the source ran out of bytes.
    pub const fn is_out_of_bounds(&self) -> bool {
        matches!(self.kind, ReaderErrorKind::OutOfBounds)
    }

    /// The byte offset at which the error was detected.
    pub const fn position(&self) -> usize {
        self.position
    }
}

/// The result type of every read operation.
pub type ReadResult<T> = Result<T, ReaderError>;
