//! Core types used throughout abif-tools-rs

pub mod date_time;
pub mod value;

pub use date_time::{AbifDate, AbifTime, Thumb};
pub use value::{AbifValue, Elements};

/// First element type code reserved for user-defined data.
pub const USER_TYPE_BASE: i16 = 1024;

/// ABIF element type, selected by the 2-byte type code of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// 1: unsigned 8-bit integer
    Byte,
    /// 2: 8-bit character
    Char,
    /// 3: unsigned 16-bit integer
    Word,
    /// 4: signed 16-bit integer
    Short,
    /// 5: signed 32-bit integer
    Long,
    /// 7: IEEE-754 32-bit float
    Float,
    /// 8: IEEE-754 64-bit float
    Double,
    /// 10: packed year/month/day
    Date,
    /// 11: packed hour/minute/second/hundredths
    Time,
    /// 12: packed thumbprint record
    Thumb,
    /// 13: one-byte boolean
    Bool,
    /// 18: length-prefixed string
    PString,
    /// 19: zero-terminated string
    CString,
    /// 1024 and above
    User(i16),
    /// Any other code, including the legacy 128-135 range.
    Unknown(i16),
}

impl ElementType {
    /// Create an element type from its on-disk code.
    pub fn from_code(code: i16) -> Self {
        match code {
            1 => ElementType::Byte,
            2 => ElementType::Char,
            3 => ElementType::Word,
            4 => ElementType::Short,
            5 => ElementType::Long,
            7 => ElementType::Float,
            8 => ElementType::Double,
            10 => ElementType::Date,
            11 => ElementType::Time,
            12 => ElementType::Thumb,
            13 => ElementType::Bool,
            18 => ElementType::PString,
            19 => ElementType::CString,
            c if c >= USER_TYPE_BASE => ElementType::User(c),
            c => ElementType::Unknown(c),
        }
    }

    /// Get the on-disk code
    pub fn code(&self) -> i16 {
        match self {
            ElementType::Byte => 1,
            ElementType::Char => 2,
            ElementType::Word => 3,
            ElementType::Short => 4,
            ElementType::Long => 5,
            ElementType::Float => 7,
            ElementType::Double => 8,
            ElementType::Date => 10,
            ElementType::Time => 11,
            ElementType::Thumb => 12,
            ElementType::Bool => 13,
            ElementType::PString => 18,
            ElementType::CString => 19,
            ElementType::User(c) | ElementType::Unknown(c) => *c,
        }
    }

    /// Name used by the 2006 format documentation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Byte => "byte",
            ElementType::Char => "char",
            ElementType::Word => "word",
            ElementType::Short => "short",
            ElementType::Long => "long",
            ElementType::Float => "float",
            ElementType::Double => "double",
            ElementType::Date => "date",
            ElementType::Time => "time",
            ElementType::Thumb => "thumb",
            ElementType::Bool => "bool",
            ElementType::PString => "pString",
            ElementType::CString => "cString",
            ElementType::User(_) => "user",
            ElementType::Unknown(_) => "unknown",
        }
    }

    /// Width in bytes of one element for fixed-width types.
    ///
    /// `None` for strings and raw types, whose value is the whole data region.
    pub fn fixed_width(&self) -> Option<usize> {
        match self {
            ElementType::Byte | ElementType::Char | ElementType::Bool => Some(1),
            ElementType::Word | ElementType::Short => Some(2),
            ElementType::Long | ElementType::Float => Some(4),
            ElementType::Date | ElementType::Time => Some(4),
            ElementType::Double => Some(8),
            ElementType::Thumb => Some(10),
            ElementType::PString
            | ElementType::CString
            | ElementType::User(_)
            | ElementType::Unknown(_) => None,
        }
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ElementType::User(c) | ElementType::Unknown(c) => write!(f, "{}({})", self.as_str(), c),
            _ => write!(f, "{}", self.as_str()),
        }
    }
}
