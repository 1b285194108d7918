//! Error types for ABIF reading.
//!
//! Failures fall into three groups, reported by [`AbifError::kind`]:
//!
//! - [`ErrorKind::Format`] — the file cannot be opened as an ABIF file at all
//! - [`ErrorKind::EntryDecode`] — one entry's value is unreadable, the rest of
//!   the file stays usable
//! - [`ErrorKind::Lookup`] — the caller asked for a tag that is not there

use thiserror::Error;

use crate::types::ElementType;

/// Classification of an [`AbifError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Whole-file failure raised while opening.
    Format,
    /// Failure scoped to a single directory entry.
    EntryDecode,
    /// Lookup-time failure; always recoverable by the caller.
    Lookup,
}

/// Main error type for the crate.
#[derive(Debug, Error)]
pub enum AbifError {
    /// Underlying I/O failure while opening the file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The first four bytes are not `ABIF`.
    #[error("invalid ABIF signature: expected \"ABIF\", found {found:?}")]
    InvalidSignature { found: [u8; 4] },

    /// The header, root entry or directory table ends early.
    #[error("truncated {context}")]
    Truncated { context: &'static str },

    /// The root directory entry does not describe a directory.
    #[error("invalid root directory: {0}")]
    InvalidRootDirectory(String),

    /// A single entry could not be decoded.
    #[error(transparent)]
    Entry(#[from] EntryDecodeError),

    /// No entry with this name and number.
    #[error("tag {name}{number} not found")]
    NotFound { name: String, number: i32 },

    /// Default access needs exactly one entry with the name.
    #[error("tag {name} has {count} entries, expected exactly one")]
    AmbiguousOrMissing { name: String, count: usize },

    /// The description table has no row for the tag.
    #[error("no description for tag {0}")]
    UnknownTag(String),

    /// A combined key such as `DATA1` could not be split into name and number.
    #[error("invalid tag key: {0:?}")]
    InvalidTagKey(String),

    /// The entry exists but its value is not of the requested kind.
    #[error("tag {key} is {found}, expected {expected}")]
    UnexpectedType {
        key: String,
        expected: &'static str,
        found: ElementType,
    },
}

impl AbifError {
    /// Which part of the taxonomy this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AbifError::Io(_)
            | AbifError::InvalidSignature { .. }
            | AbifError::Truncated { .. }
            | AbifError::InvalidRootDirectory(_) => ErrorKind::Format,
            AbifError::Entry(_) => ErrorKind::EntryDecode,
            AbifError::NotFound { .. }
            | AbifError::AmbiguousOrMissing { .. }
            | AbifError::UnknownTag(_)
            | AbifError::InvalidTagKey(_)
            | AbifError::UnexpectedType { .. } => ErrorKind::Lookup,
        }
    }

    /// Map a short read during directory traversal to [`AbifError::Truncated`].
    pub(crate) fn from_io(err: std::io::Error, context: &'static str) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            AbifError::Truncated { context }
        } else {
            AbifError::Io(err)
        }
    }
}

/// Decode failure for one directory entry.
///
/// Kept `Clone` so an eagerly decoded reader can hand out the same failure on
/// every request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryDecodeError {
    /// The claimed value region lies outside the byte source.
    #[error("{name}{number}: {size} bytes at offset {offset} exceed the {source_len}-byte file")]
    OutOfBounds {
        name: String,
        number: i32,
        offset: i64,
        size: i64,
        source_len: u64,
    },

    /// Fewer bytes than the element count requires.
    #[error("{name}{number}: expected {expected} bytes of value data, found {available}")]
    Truncated {
        name: String,
        number: i32,
        expected: usize,
        available: usize,
    },

    /// Element count or data size is negative.
    #[error("{name}{number}: negative size (elements={num_elements}, data_size={data_size})")]
    NegativeSize {
        name: String,
        number: i32,
        num_elements: i32,
        data_size: i32,
    },

    /// The source failed while reading the value bytes.
    #[error("{name}{number}: cannot read value data: {message}")]
    Unreadable {
        name: String,
        number: i32,
        message: String,
    },
}

/// Result type alias for ABIF operations.
pub type Result<T> = std::result::Result<T, AbifError>;
