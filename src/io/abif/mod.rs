//! ABIF read support.

mod abif_directory_locator;
mod abif_entry_decoder;
mod abif_reader;
mod abif_reader_configuration;
mod abif_tag_accessors;
pub mod file_headers;

pub use abif_directory_locator::{AbifDirectory, AbifDirectoryLocator, ROOT_DIRECTORY_TAG};
pub use abif_entry_decoder::{AbifEntryDecoder, DecodedEntry};
pub use abif_reader::AbifReader;
pub use abif_reader_configuration::{AbifReaderConfiguration, DecodeStrategy};
pub use file_headers::{
    AbifFileHeader, DataLocation, DirectoryEntry, ABIF_SIGNATURE, DIRECTORY_ENTRY_SIZE,
    FILE_HEADER_SIZE,
};
