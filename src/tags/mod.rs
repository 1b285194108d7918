//! Human-readable tag descriptions.
//!
//! The built-in table covers the tags documented for ABIF data collection and
//! basecalling software. It is parsed once on first use and never mutated;
//! readers hold a `&'static` reference to it, or to any other table the
//! caller provides.

mod tag_key;

pub use tag_key::{TagKey, TAG_NAME_LEN};

use ahash::RandomState;
use indexmap::IndexMap;
use log::warn;
use once_cell::sync::Lazy;

use crate::error::{AbifError, Result};

static BUILTIN: Lazy<TagDescriptions> =
    Lazy::new(|| TagDescriptions::parse(include_str!("tag_descriptions.tsv")));

/// Number column of the description table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagNumber {
    /// Describes exactly this number.
    Exact(i32),
    /// `N`: describes every number of the tag.
    Any,
}

/// One row of the description table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDescription {
    pub name: String,
    pub number: TagNumber,
    /// Documented element type name, e.g. `pString`.
    pub type_name: String,
    pub description: String,
}

/// Immutable mapping from `(name, number)` to description.
#[derive(Debug, Clone, Default)]
pub struct TagDescriptions {
    rows: IndexMap<(String, TagNumber), TagDescription, RandomState>,
}

impl TagDescriptions {
    /// The built-in table.
    pub fn builtin() -> &'static TagDescriptions {
        &BUILTIN
    }

    /// Parse a tab-separated table with a header line and the columns
    /// tag, number, type and description. Empty fields are skipped, so
    /// columns may be padded with extra tabs.
    pub fn parse(text: &str) -> Self {
        let mut rows = IndexMap::with_hasher(RandomState::new());

        for (line_no, line) in text.lines().enumerate().skip(1) {
            let fields: Vec<&str> = line.split('\t').filter(|f| !f.is_empty()).collect();
            let [name, number, type_name, description] = fields.as_slice() else {
                if !line.trim().is_empty() {
                    warn!(
                        "tag table line {}: expected 4 fields, found {}",
                        line_no + 1,
                        fields.len()
                    );
                }
                continue;
            };

            let number = match number.parse::<i32>() {
                Ok(n) => TagNumber::Exact(n),
                Err(_) => TagNumber::Any,
            };

            rows.insert(
                (name.to_string(), number),
                TagDescription {
                    name: name.to_string(),
                    number,
                    type_name: type_name.to_string(),
                    description: description.to_string(),
                },
            );
        }

        Self { rows }
    }

    /// Row for a tag, preferring an exact number over an `N` row.
    pub fn get(&self, name: &str, number: i32) -> Option<&TagDescription> {
        self.rows
            .get(&(name.to_string(), TagNumber::Exact(number)))
            .or_else(|| self.rows.get(&(name.to_string(), TagNumber::Any)))
    }

    /// Description text for a tag.
    pub fn describe(&self, name: &str, number: i32) -> Result<&str> {
        self.get(name, number)
            .map(|row| row.description.as_str())
            .ok_or_else(|| AbifError::UnknownTag(TagKey::new(name, number).to_string()))
    }

    /// Description text for a combined key such as `DATA1`.
    pub fn describe_key(&self, key: &str) -> Result<&str> {
        let key: TagKey = key.parse()?;
        self.describe(&key.name, key.number)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in table order.
    pub fn iter(&self) -> impl Iterator<Item = &TagDescription> {
        self.rows.values()
    }
}
