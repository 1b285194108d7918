//! Locates and reads the item directory of an ABIF file.
//!
//! The file starts with a 6-byte header followed by the root directory
//! entry. The root entry's element count is the number of directory entries
//! and its data field is the absolute offset of the first one. Entries are
//! packed contiguously, 28 bytes each.

use std::io::{Read, Seek, SeekFrom};

use log::debug;

use crate::error::{AbifError, Result};

use super::abif_reader_configuration::AbifReaderConfiguration;
use super::file_headers::{AbifFileHeader, DirectoryEntry, DIRECTORY_ENTRY_SIZE, FILE_HEADER_SIZE};

/// Tag name of the root directory entry.
pub const ROOT_DIRECTORY_TAG: &str = "tdir";

/// Result of locating the directory.
#[derive(Debug, Clone)]
pub struct AbifDirectory {
    /// File header.
    pub header: AbifFileHeader,
    /// Root directory entry.
    pub root: DirectoryEntry,
    /// Directory entries in file order.
    pub entries: Vec<DirectoryEntry>,
    /// Total length of the byte source.
    pub source_len: u64,
}

/// Reads the header and the directory table of an ABIF stream.
pub struct AbifDirectoryLocator;

impl AbifDirectoryLocator {
    /// Read the header, the root entry and every directory entry.
    ///
    /// # Errors
    ///
    /// Any failure here is a format error: bad signature, a short header or
    /// root entry, an invalid root entry, or a directory table that runs past
    /// the end of the source.
    pub fn locate<R: Read + Seek>(
        stream: &mut R,
        configuration: &AbifReaderConfiguration,
    ) -> Result<AbifDirectory> {
        let source_len = stream.seek(SeekFrom::End(0))?;
        stream.seek(SeekFrom::Start(0))?;

        let mut header_bytes = [0u8; FILE_HEADER_SIZE];
        stream
            .read_exact(&mut header_bytes)
            .map_err(|e| AbifError::from_io(e, "header"))?;
        let header = AbifFileHeader::parse(&header_bytes)?;

        let mut root_bytes = [0u8; DIRECTORY_ENTRY_SIZE];
        stream
            .read_exact(&mut root_bytes)
            .map_err(|e| AbifError::from_io(e, "root directory"))?;
        let root = DirectoryEntry::from_bytes(&root_bytes).ok_or(AbifError::Truncated {
            context: "root directory",
        })?;

        Self::validate_root(&root, configuration)?;

        let count = root.num_elements as usize;
        let offset = u64::from(root.data_offset() as u32);
        debug!(
            "{}: {} directory entries at offset {}",
            header, count, offset
        );

        if count == 0 {
            return Ok(AbifDirectory {
                header,
                root,
                entries: Vec::new(),
                source_len,
            });
        }

        let table_len = (count as u64) * DIRECTORY_ENTRY_SIZE as u64;
        if offset.saturating_add(table_len) > source_len {
            return Err(AbifError::Truncated {
                context: "directory",
            });
        }

        stream.seek(SeekFrom::Start(offset))?;
        let mut table = vec![0u8; table_len as usize];
        stream
            .read_exact(&mut table)
            .map_err(|e| AbifError::from_io(e, "directory"))?;

        let entries = table
            .chunks_exact(DIRECTORY_ENTRY_SIZE)
            .map(|chunk| {
                DirectoryEntry::from_bytes(chunk).ok_or(AbifError::Truncated {
                    context: "directory",
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(AbifDirectory {
            header,
            root,
            entries,
            source_len,
        })
    }

    fn validate_root(root: &DirectoryEntry, configuration: &AbifReaderConfiguration) -> Result<()> {
        if configuration.strict_root_directory
            && (root.name != ROOT_DIRECTORY_TAG || root.number != 1)
        {
            return Err(AbifError::InvalidRootDirectory(format!(
                "expected {}1, found {}{}",
                ROOT_DIRECTORY_TAG, root.name, root.number
            )));
        }

        if root.num_elements < 0 {
            return Err(AbifError::InvalidRootDirectory(format!(
                "negative entry count {}",
                root.num_elements
            )));
        }

        if root.num_elements > 0 && root.data_offset() < 0 {
            return Err(AbifError::InvalidRootDirectory(format!(
                "negative directory offset {}",
                root.data_offset()
            )));
        }

        Ok(())
    }
}
