//! # abif-tools-rs
//!
//! A pure Rust reader for ABIF (Applied Biosystems Genetic Analysis Data File)
//! files, the `.ab1` and `.fsa` files written by capillary electrophoresis
//! sequencers.
//!
//! An ABIF file is a directory of tagged, typed items. Each item is named by
//! a 4-character tag and a number (`DATA1`, `User1`, ...) and holds a scalar
//! or an array of one of the documented element types.
//!
//! ```rust,no_run
//! use abif_tools_rs::AbifValue;
//!
//! let reader = abif_tools_rs::open("sample.ab1")?;
//! println!("{} by {}", reader.sample_name()?, reader.user()?);
//!
//! if let AbifValue::Short(trace) = reader.get("DATA", 1)? {
//!     println!("{} scans", trace.len());
//! }
//! # Ok::<(), abif_tools_rs::AbifError>(())
//! ```

pub mod error;
pub mod io;
pub mod tags;
pub mod types;

pub use error::{AbifError, EntryDecodeError, ErrorKind, Result};
pub use io::abif::{
    AbifEntryDecoder, AbifFileHeader, AbifReader, AbifReaderConfiguration, DecodeStrategy,
    DecodedEntry, DirectoryEntry,
};
pub use tags::{TagDescriptions, TagKey};
pub use types::{AbifDate, AbifTime, AbifValue, ElementType, Elements, Thumb};

use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;

/// Open an ABIF file from disk with the default configuration.
pub fn open(path: impl AsRef<Path>) -> Result<AbifReader<BufReader<File>>> {
    AbifReader::open(path)
}

/// Read an ABIF file held in memory.
pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<AbifReader<Cursor<Vec<u8>>>> {
    AbifReader::from_bytes(bytes)
}
