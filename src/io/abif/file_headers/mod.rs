//! ABIF fixed-layout records.
//!
//! - [`AbifFileHeader`] — the 6-byte signature and version prefix
//! - [`DirectoryEntry`] — one 28-byte directory record

mod abif_directory_entry;
mod abif_file_header;

pub use abif_directory_entry::{DirectoryEntry, DataLocation, DIRECTORY_ENTRY_SIZE};
pub use abif_file_header::{AbifFileHeader, ABIF_SIGNATURE, FILE_HEADER_SIZE};
