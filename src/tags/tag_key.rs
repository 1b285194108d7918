//! Combined tag keys such as `DATA105`.

use std::fmt;
use std::str::FromStr;

use crate::error::AbifError;

/// Length of a tag name in characters.
pub const TAG_NAME_LEN: usize = 4;

/// A tag name and number, written together as e.g. `User1` or `DATA105`.
///
/// The first four characters are the name and the rest is the number. An
/// empty number means 1.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagKey {
    pub name: String,
    pub number: i32,
}

impl TagKey {
    pub fn new(name: impl Into<String>, number: i32) -> Self {
        Self {
            name: name.into(),
            number,
        }
    }
}

impl FromStr for TagKey {
    type Err = AbifError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let split = key
            .char_indices()
            .nth(TAG_NAME_LEN)
            .map(|(i, _)| i)
            .unwrap_or(key.len());

        let (name, number) = key.split_at(split);
        if name.chars().count() != TAG_NAME_LEN {
            return Err(AbifError::InvalidTagKey(key.to_string()));
        }

        let number = if number.is_empty() {
            1
        } else {
            number
                .parse::<i32>()
                .map_err(|_| AbifError::InvalidTagKey(key.to_string()))?
        };

        Ok(Self::new(name, number))
    }
}

impl fmt::Display for TagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.number)
    }
}
