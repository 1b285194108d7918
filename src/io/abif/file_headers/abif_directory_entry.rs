//! ABIF directory entry: the 28-byte record describing one tagged item.

use std::fmt;

use nom::bytes::complete::take;
use nom::number::complete::{be_i16, be_i32};
use nom::sequence::tuple;
use nom::IResult;

use crate::types::ElementType;

/// Size in bytes of one directory entry.
pub const DIRECTORY_ENTRY_SIZE: usize = 28;

/// Where the value bytes of an entry live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataLocation {
    /// Stored in the first `len` bytes of the entry's 4-byte data field.
    Inline { len: usize },
    /// Stored at an absolute file offset.
    Offset { offset: i64, len: i64 },
}

/// One directory record, all integers big-endian.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// 4-character tag name, e.g. `DATA`.
    pub name: String,
    /// Tag number distinguishing repeated names.
    pub number: i32,
    /// Raw element type code.
    pub element_type_code: i16,
    /// Size in bytes of one element.
    pub element_size: i16,
    /// Element count.
    pub num_elements: i32,
    /// Total value size in bytes; decides inline vs offset storage.
    pub data_size: i32,
    /// Inline value bytes, or the big-endian data offset.
    pub data_field: [u8; 4],
    /// Reserved.
    pub data_handle: i32,
}

impl DirectoryEntry {
    /// Parse a record from its 28 raw bytes.
    ///
    /// Returns `None` when fewer than 28 bytes are given.
    pub fn from_bytes(input: &[u8]) -> Option<Self> {
        directory_entry(input).ok().map(|(_, entry)| entry)
    }

    /// Decoded element type.
    pub fn element_type(&self) -> ElementType {
        ElementType::from_code(self.element_type_code)
    }

    /// The data field read as a big-endian offset.
    pub fn data_offset(&self) -> i32 {
        i32::from_be_bytes(self.data_field)
    }

    /// True when the value is stored inside the record itself.
    pub fn is_inline(&self) -> bool {
        self.data_size <= 4
    }

    /// Storage location of the value bytes.
    pub fn data_location(&self) -> DataLocation {
        if self.is_inline() {
            DataLocation::Inline {
                len: self.data_size.max(0) as usize,
            }
        } else {
            DataLocation::Offset {
                offset: i64::from(self.data_offset()),
                len: i64::from(self.data_size),
            }
        }
    }

    /// Inline value bytes; empty for offset-stored entries.
    pub fn inline_data(&self) -> &[u8] {
        match self.data_location() {
            DataLocation::Inline { len } => &self.data_field[..len],
            DataLocation::Offset { .. } => &[],
        }
    }

    /// `(name, number)` pair used for lookups.
    pub fn key(&self) -> (&str, i32) {
        (&self.name, self.number)
    }
}

impl fmt::Display for DirectoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{} : {} x {} | size {} | ",
            self.name,
            self.number,
            self.element_type(),
            self.num_elements,
            self.data_size
        )?;
        match self.data_location() {
            DataLocation::Inline { .. } => write!(f, "inline"),
            DataLocation::Offset { offset, .. } => write!(f, "offset {}", offset),
        }
    }
}

/// Tag names are 4 bytes of ASCII; map each byte to one char so nothing is lost.
fn tag_name(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

fn directory_entry(input: &[u8]) -> IResult<&[u8], DirectoryEntry> {
    let parsed: IResult<&[u8], (&[u8], i32, i16, i16, i32, i32, &[u8], i32)> = tuple((
        take(4usize),
        be_i32,
        be_i16,
        be_i16,
        be_i32,
        be_i32,
        take(4usize),
        be_i32,
    ))(input);
    let (rest, (name, number, type_code, element_size, num_elements, data_size, field, handle)) =
        parsed?;

    let mut data_field = [0u8; 4];
    data_field.copy_from_slice(field);

    Ok((
        rest,
        DirectoryEntry {
            name: tag_name(name),
            number,
            element_type_code: type_code,
            element_size,
            num_elements,
            data_size,
            data_field,
            data_handle: handle,
        },
    ))
}
