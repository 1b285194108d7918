//! Decodes the value of a single directory entry.
//!
//! Values of at most 4 bytes live inside the entry's data field; anything
//! larger is read from the absolute offset stored there. The resolved bytes
//! are then converted according to the element type code.

use std::io::{Cursor, Read, Seek, SeekFrom};

use byteorder::{BigEndian, ReadBytesExt};
use encoding_rs::{Encoding, WINDOWS_1252};
use log::trace;

use crate::error::EntryDecodeError;
use crate::types::value::decode_text;
use crate::types::{AbifDate, AbifTime, AbifValue, ElementType, Elements, Thumb};

use super::file_headers::{DataLocation, DirectoryEntry};

/// A fully decoded directory entry.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedEntry {
    pub name: String,
    pub number: i32,
    pub type_code: i16,
    pub value: AbifValue,
}

/// Converts directory entries into typed values.
#[derive(Debug, Clone, Copy)]
pub struct AbifEntryDecoder {
    encoding: &'static Encoding,
}

impl Default for AbifEntryDecoder {
    fn default() -> Self {
        Self::new(WINDOWS_1252)
    }
}

impl AbifEntryDecoder {
    /// Create a decoder using `encoding` for pString and cString text.
    pub fn new(encoding: &'static Encoding) -> Self {
        Self { encoding }
    }

    /// Resolve and decode one entry.
    pub fn decode<R: Read + Seek>(
        &self,
        entry: &DirectoryEntry,
        stream: &mut R,
        source_len: u64,
    ) -> Result<DecodedEntry, EntryDecodeError> {
        let bytes = Self::read_value_bytes(entry, stream, source_len)?;
        let value = self.decode_bytes(entry, &bytes)?;
        trace!("decoded {}", entry);

        Ok(DecodedEntry {
            name: entry.name.clone(),
            number: entry.number,
            type_code: entry.element_type_code,
            value,
        })
    }

    /// Resolve the value bytes of an entry, inline or at its offset.
    ///
    /// Only offset-stored values touch the stream.
    pub fn read_value_bytes<R: Read + Seek>(
        entry: &DirectoryEntry,
        stream: &mut R,
        source_len: u64,
    ) -> Result<Vec<u8>, EntryDecodeError> {
        if entry.data_size < 0 || entry.num_elements < 0 {
            return Err(EntryDecodeError::NegativeSize {
                name: entry.name.clone(),
                number: entry.number,
                num_elements: entry.num_elements,
                data_size: entry.data_size,
            });
        }

        match entry.data_location() {
            DataLocation::Inline { .. } => Ok(entry.inline_data().to_vec()),
            DataLocation::Offset { offset, len } => {
                let out_of_bounds = || EntryDecodeError::OutOfBounds {
                    name: entry.name.clone(),
                    number: entry.number,
                    offset,
                    size: len,
                    source_len,
                };
                if offset < 0 || (offset as u64).saturating_add(len as u64) > source_len {
                    return Err(out_of_bounds());
                }

                let unreadable = |e: std::io::Error| EntryDecodeError::Unreadable {
                    name: entry.name.clone(),
                    number: entry.number,
                    message: e.to_string(),
                };
                stream
                    .seek(SeekFrom::Start(offset as u64))
                    .map_err(unreadable)?;

                let mut bytes = Vec::with_capacity(len as usize);
                stream
                    .by_ref()
                    .take(len as u64)
                    .read_to_end(&mut bytes)
                    .map_err(unreadable)?;

                if bytes.len() < len as usize {
                    return Err(EntryDecodeError::Truncated {
                        name: entry.name.clone(),
                        number: entry.number,
                        expected: len as usize,
                        available: bytes.len(),
                    });
                }
                Ok(bytes)
            }
        }
    }

    /// Convert resolved value bytes according to the entry's element type.
    pub fn decode_bytes(
        &self,
        entry: &DirectoryEntry,
        bytes: &[u8],
    ) -> Result<AbifValue, EntryDecodeError> {
        let count = entry.num_elements.max(0) as usize;
        let element_type = entry.element_type();

        if let Some(width) = element_type.fixed_width() {
            let expected = count.saturating_mul(width);
            if bytes.len() < expected {
                return Err(EntryDecodeError::Truncated {
                    name: entry.name.clone(),
                    number: entry.number,
                    expected,
                    available: bytes.len(),
                });
            }
        }

        let mut cursor = Cursor::new(bytes);
        let c = &mut cursor;
        let decoded = match element_type {
            ElementType::Byte => read_elements(c, count, |r| r.read_u8()).map(AbifValue::Byte),
            ElementType::Char => read_elements(c, count, |r| r.read_u8()).map(AbifValue::Char),
            ElementType::Word => {
                read_elements(c, count, |r| r.read_u16::<BigEndian>()).map(AbifValue::Word)
            }
            ElementType::Short => {
                read_elements(c, count, |r| r.read_i16::<BigEndian>()).map(AbifValue::Short)
            }
            ElementType::Long => {
                read_elements(c, count, |r| r.read_i32::<BigEndian>()).map(AbifValue::Long)
            }
            ElementType::Float => {
                read_elements(c, count, |r| r.read_f32::<BigEndian>()).map(AbifValue::Float)
            }
            ElementType::Double => {
                read_elements(c, count, |r| r.read_f64::<BigEndian>()).map(AbifValue::Double)
            }
            ElementType::Date => read_elements(c, count, AbifDate::read).map(AbifValue::Date),
            ElementType::Time => read_elements(c, count, AbifTime::read).map(AbifValue::Time),
            ElementType::Thumb => read_elements(c, count, Thumb::read).map(AbifValue::Thumb),
            ElementType::Bool => {
                read_elements(c, count, |r| r.read_u8().map(|b| b != 0)).map(AbifValue::Bool)
            }
            ElementType::PString => Ok(AbifValue::PString(decode_text(
                pascal_string(bytes),
                self.encoding,
            ))),
            ElementType::CString => Ok(AbifValue::CString(decode_text(
                c_string(bytes),
                self.encoding,
            ))),
            ElementType::User(code) | ElementType::Unknown(code) => Ok(AbifValue::Raw {
                type_code: code,
                bytes: bytes.to_vec(),
            }),
        };

        decoded.map_err(|e| EntryDecodeError::Unreadable {
            name: entry.name.clone(),
            number: entry.number,
            message: e.to_string(),
        })
    }
}

fn read_elements<'a, T>(
    cursor: &mut Cursor<&'a [u8]>,
    count: usize,
    mut read_one: impl FnMut(&mut Cursor<&'a [u8]>) -> std::io::Result<T>,
) -> std::io::Result<Elements<T>> {
    let mut values = Vec::with_capacity(count);
    for _ in 0..count {
        values.push(read_one(cursor)?);
    }
    Ok(Elements::from_vec(values))
}

/// Characters after the length byte, clamped to the bytes present.
fn pascal_string(bytes: &[u8]) -> &[u8] {
    match bytes.split_first() {
        Some((&len, rest)) => &rest[..usize::from(len).min(rest.len())],
        None => &[],
    }
}

/// Characters before the first zero byte, or all bytes if there is none.
fn c_string(bytes: &[u8]) -> &[u8] {
    match bytes.iter().position(|&b| b == 0) {
        Some(end) => &bytes[..end],
        None => bytes,
    }
}
