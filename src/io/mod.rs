//! I/O module for reading ABIF files

pub mod abif;

pub use abif::{AbifReader, AbifReaderConfiguration};
