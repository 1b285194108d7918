//! ABIF file reader and tag lookup.
//!
//! The directory is read once when the reader is created. Entry values are
//! decoded on first request and kept, or all at once when the configuration
//! asks for [`DecodeStrategy::Eager`]. Either way a tag always yields the same
//! value, and a failing entry only affects lookups of that entry.

use std::cell::RefCell;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

use ahash::RandomState;
use indexmap::IndexMap;
use log::{debug, warn};
use once_cell::unsync::OnceCell;

use crate::error::{AbifError, EntryDecodeError, Result};
use crate::tags::{TagDescriptions, TagKey};
use crate::types::AbifValue;

use super::abif_directory_locator::AbifDirectoryLocator;
use super::abif_entry_decoder::{AbifEntryDecoder, DecodedEntry};
use super::abif_reader_configuration::{AbifReaderConfiguration, DecodeStrategy};
use super::file_headers::{AbifFileHeader, DirectoryEntry};

/// Reads an ABIF file and exposes its tagged values.
///
/// # Usage
///
/// ```rust,no_run
/// use abif_tools_rs::AbifReader;
///
/// let reader = AbifReader::open("sample.ab1").unwrap();
/// for key in reader.list_tags() {
///     println!("{}: {}", key, reader.get(&key.name, key.number).unwrap());
/// }
/// ```
pub struct AbifReader<R: Read + Seek> {
    /// Underlying byte source, owned for the reader's lifetime.
    stream: RefCell<R>,
    header: AbifFileHeader,
    root: DirectoryEntry,
    /// Directory entries in file order.
    entries: Vec<DirectoryEntry>,
    /// `(name, number)` to entry position; the first occurrence wins.
    index: IndexMap<(String, i32), usize, RandomState>,
    source_len: u64,
    configuration: AbifReaderConfiguration,
    decoder: AbifEntryDecoder,
    descriptions: &'static TagDescriptions,
    /// Successfully decoded values.
    values: Vec<OnceCell<AbifValue>>,
    /// Failures recorded by eager decoding.
    failures: Vec<Option<EntryDecodeError>>,
}

impl AbifReader<BufReader<File>> {
    /// Open an ABIF file from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_configuration(path, AbifReaderConfiguration::default())
    }

    /// Open an ABIF file from disk with the given configuration.
    pub fn open_with_configuration(
        path: impl AsRef<Path>,
        configuration: AbifReaderConfiguration,
    ) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::with_configuration(BufReader::new(file), configuration)
    }
}

impl AbifReader<Cursor<Vec<u8>>> {
    /// Read an ABIF file held in memory.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        Self::from_reader(Cursor::new(bytes.into()))
    }
}

impl<R: Read + Seek> AbifReader<R> {
    /// Create a reader over any seekable source with the default configuration.
    pub fn from_reader(stream: R) -> Result<Self> {
        Self::with_configuration(stream, AbifReaderConfiguration::default())
    }

    /// Create a reader. Immediately reads and validates the header and
    /// directory; with [`DecodeStrategy::Eager`] every value is decoded too.
    pub fn with_configuration(
        mut stream: R,
        configuration: AbifReaderConfiguration,
    ) -> Result<Self> {
        let directory = AbifDirectoryLocator::locate(&mut stream, &configuration)?;

        let mut index =
            IndexMap::with_capacity_and_hasher(directory.entries.len(), RandomState::new());
        for (position, entry) in directory.entries.iter().enumerate() {
            index.entry((entry.name.clone(), entry.number)).or_insert(position);
        }

        let count = directory.entries.len();
        let mut reader = Self {
            stream: RefCell::new(stream),
            header: directory.header,
            root: directory.root,
            entries: directory.entries,
            index,
            source_len: directory.source_len,
            decoder: AbifEntryDecoder::new(configuration.text_encoding),
            configuration,
            descriptions: TagDescriptions::builtin(),
            values: (0..count).map(|_| OnceCell::new()).collect(),
            failures: vec![None; count],
        };

        if reader.configuration.decode_strategy == DecodeStrategy::Eager {
            reader.decode_all();
        }

        debug!(
            "opened {} with {} entries ({:?} decoding)",
            reader.header,
            reader.entries.len(),
            reader.configuration.decode_strategy
        );

        Ok(reader)
    }

    /// Use a different description table for [`AbifReader::describe`].
    pub fn with_descriptions(mut self, descriptions: &'static TagDescriptions) -> Self {
        self.descriptions = descriptions;
        self
    }

    fn decode_all(&mut self) {
        for position in 0..self.entries.len() {
            let outcome = self.load(position).map(|_| ());
            if let Err(err) = outcome {
                warn!("{}", err);
                self.failures[position] = Some(err);
            }
        }
    }

    fn load(&self, position: usize) -> std::result::Result<&AbifValue, EntryDecodeError> {
        if let Some(err) = &self.failures[position] {
            return Err(err.clone());
        }

        self.values[position].get_or_try_init(|| {
            let mut stream = self.stream.borrow_mut();
            self.decoder
                .decode(&self.entries[position], &mut *stream, self.source_len)
                .map(|decoded| decoded.value)
        })
    }

    fn position(&self, name: &str, number: i32) -> Result<usize> {
        self.index
            .get(&(name.to_string(), number))
            .copied()
            .ok_or_else(|| AbifError::NotFound {
                name: name.to_string(),
                number,
            })
    }

    // ── Metadata ───────────────────────────────────────────────────────────

    /// File header.
    pub fn header(&self) -> &AbifFileHeader {
        &self.header
    }

    /// Format version from the header.
    pub fn version(&self) -> i16 {
        self.header.version
    }

    /// Root directory entry.
    pub fn root(&self) -> &DirectoryEntry {
        &self.root
    }

    /// Reader configuration.
    pub fn configuration(&self) -> &AbifReaderConfiguration {
        &self.configuration
    }

    /// Number of directory entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Directory entries in file order.
    pub fn entries(&self) -> impl Iterator<Item = &DirectoryEntry> {
        self.entries.iter()
    }

    /// Directory entry for a tag.
    pub fn entry(&self, name: &str, number: i32) -> Option<&DirectoryEntry> {
        self.index
            .get(&(name.to_string(), number))
            .map(|&position| &self.entries[position])
    }

    /// `(name, number)` of every entry in directory order.
    pub fn list_tags(&self) -> Vec<TagKey> {
        self.entries
            .iter()
            .map(|entry| TagKey::new(entry.name.clone(), entry.number))
            .collect()
    }

    pub fn contains(&self, name: &str, number: i32) -> bool {
        self.index.contains_key(&(name.to_string(), number))
    }

    /// Number of entries with this tag name.
    pub fn count(&self, name: &str) -> usize {
        self.entries.iter().filter(|entry| entry.name == name).count()
    }

    // ── Lookup ─────────────────────────────────────────────────────────────

    /// Decoded value of a tag.
    ///
    /// # Errors
    ///
    /// `AbifError::NotFound` if the directory has no such entry and
    /// `AbifError::Entry` if the entry's value cannot be decoded.
    pub fn get(&self, name: &str, number: i32) -> Result<&AbifValue> {
        let position = self.position(name, number)?;
        Ok(self.load(position)?)
    }

    /// Value of the only entry with this name, whatever its number.
    ///
    /// # Errors
    ///
    /// `AbifError::AmbiguousOrMissing` unless exactly one entry has the name.
    pub fn get_default(&self, name: &str) -> Result<&AbifValue> {
        let mut matches = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.name == name);

        match (matches.next(), matches.next()) {
            (Some((position, _)), None) => Ok(self.load(position)?),
            _ => Err(AbifError::AmbiguousOrMissing {
                name: name.to_string(),
                count: self.count(name),
            }),
        }
    }

    /// Value for a combined key such as `User1` or `DATA105`.
    pub fn get_by_key(&self, key: &str) -> Result<&AbifValue> {
        let key: TagKey = key.parse()?;
        self.get(&key.name, key.number)
    }

    /// Decoded entry with its name, number and type code.
    pub fn decode_entry(&self, name: &str, number: i32) -> Result<DecodedEntry> {
        let position = self.position(name, number)?;
        let value = self.load(position)?.clone();
        let entry = &self.entries[position];
        Ok(DecodedEntry {
            name: entry.name.clone(),
            number: entry.number,
            type_code: entry.element_type_code,
            value,
        })
    }

    /// Every entry with its decode outcome, in directory order.
    pub fn values(&self) -> impl Iterator<Item = (&DirectoryEntry, Result<&AbifValue>)> {
        self.entries
            .iter()
            .enumerate()
            .map(move |(position, entry)| (entry, self.load(position).map_err(AbifError::from)))
    }

    /// String view of a tag using the configured text encoding.
    ///
    /// # Errors
    ///
    /// `AbifError::UnexpectedType` for numeric and packed values.
    pub fn get_text(&self, name: &str, number: i32) -> Result<String> {
        let value = self.get(name, number)?;
        value
            .to_text_with(self.configuration.text_encoding)
            .ok_or_else(|| AbifError::UnexpectedType {
                key: TagKey::new(name, number).to_string(),
                expected: "text",
                found: value.element_type(),
            })
    }

    // ── Descriptions ───────────────────────────────────────────────────────

    /// Description of a tag, given as a name (`MODL`) or combined key (`DATA105`).
    pub fn describe(&self, name: &str) -> Result<&'static str> {
        self.descriptions.describe_key(name)
    }

    /// Description of a tag by name and number.
    pub fn describe_tag(&self, name: &str, number: i32) -> Result<&'static str> {
        self.descriptions.describe(name, number)
    }

    /// Release the byte source.
    pub fn into_inner(self) -> R {
        self.stream.into_inner()
    }
}
