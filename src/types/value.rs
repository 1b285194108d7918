//! Typed values decoded from directory entries.

use std::fmt;

use encoding_rs::{Encoding, WINDOWS_1252};

use super::{AbifDate, AbifTime, ElementType, Thumb};

/// One element or an ordered sequence of elements of the same kind.
///
/// An entry with exactly one element decodes to [`Elements::Scalar`]; any
/// other count (including zero) decodes to [`Elements::Sequence`].
#[derive(Debug, Clone, PartialEq)]
pub enum Elements<T> {
    Scalar(T),
    Sequence(Vec<T>),
}

impl<T> Elements<T> {
    /// Wrap decoded elements, collapsing a single element to a scalar.
    pub fn from_vec(mut values: Vec<T>) -> Self {
        if values.len() == 1 {
            if let Some(value) = values.pop() {
                return Elements::Scalar(value);
            }
        }
        Elements::Sequence(values)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        match self {
            Elements::Scalar(_) => 1,
            Elements::Sequence(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Elements::Sequence(_))
    }

    /// The scalar value, if this holds exactly one element.
    pub fn scalar(&self) -> Option<&T> {
        match self {
            Elements::Scalar(value) => Some(value),
            Elements::Sequence(_) => None,
        }
    }

    /// View the elements as a slice regardless of cardinality.
    pub fn as_slice(&self) -> &[T] {
        match self {
            Elements::Scalar(value) => std::slice::from_ref(value),
            Elements::Sequence(values) => values,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            Elements::Scalar(value) => vec![value],
            Elements::Sequence(values) => values,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Elements<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}

/// Decoded value of a directory entry, keyed by element type.
#[derive(Debug, Clone, PartialEq)]
pub enum AbifValue {
    Byte(Elements<u8>),
    /// Raw 8-bit characters; see [`AbifValue::to_text`] for the string view.
    Char(Elements<u8>),
    Word(Elements<u16>),
    Short(Elements<i16>),
    Long(Elements<i32>),
    Float(Elements<f32>),
    Double(Elements<f64>),
    Date(Elements<AbifDate>),
    Time(Elements<AbifTime>),
    Thumb(Elements<Thumb>),
    Bool(Elements<bool>),
    /// Length-prefixed string, length byte excluded.
    PString(String),
    /// Zero-terminated string, terminator excluded.
    CString(String),
    /// User-defined or unrecognized type, kept byte for byte.
    Raw { type_code: i16, bytes: Vec<u8> },
}

impl AbifValue {
    /// Element type this value was decoded as.
    pub fn element_type(&self) -> ElementType {
        match self {
            AbifValue::Byte(_) => ElementType::Byte,
            AbifValue::Char(_) => ElementType::Char,
            AbifValue::Word(_) => ElementType::Word,
            AbifValue::Short(_) => ElementType::Short,
            AbifValue::Long(_) => ElementType::Long,
            AbifValue::Float(_) => ElementType::Float,
            AbifValue::Double(_) => ElementType::Double,
            AbifValue::Date(_) => ElementType::Date,
            AbifValue::Time(_) => ElementType::Time,
            AbifValue::Thumb(_) => ElementType::Thumb,
            AbifValue::Bool(_) => ElementType::Bool,
            AbifValue::PString(_) => ElementType::PString,
            AbifValue::CString(_) => ElementType::CString,
            AbifValue::Raw { type_code, .. } => ElementType::from_code(*type_code),
        }
    }

    /// Number of decoded elements. Strings count as one, raw values as their
    /// byte length.
    pub fn len(&self) -> usize {
        match self {
            AbifValue::Byte(v) | AbifValue::Char(v) => v.len(),
            AbifValue::Word(v) => v.len(),
            AbifValue::Short(v) => v.len(),
            AbifValue::Long(v) => v.len(),
            AbifValue::Float(v) => v.len(),
            AbifValue::Double(v) => v.len(),
            AbifValue::Date(v) => v.len(),
            AbifValue::Time(v) => v.len(),
            AbifValue::Thumb(v) => v.len(),
            AbifValue::Bool(v) => v.len(),
            AbifValue::PString(_) | AbifValue::CString(_) => 1,
            AbifValue::Raw { bytes, .. } => bytes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True for fixed-width types decoded from a count other than one.
    pub fn is_sequence(&self) -> bool {
        match self {
            AbifValue::Byte(v) | AbifValue::Char(v) => v.is_sequence(),
            AbifValue::Word(v) => v.is_sequence(),
            AbifValue::Short(v) => v.is_sequence(),
            AbifValue::Long(v) => v.is_sequence(),
            AbifValue::Float(v) => v.is_sequence(),
            AbifValue::Double(v) => v.is_sequence(),
            AbifValue::Date(v) => v.is_sequence(),
            AbifValue::Time(v) => v.is_sequence(),
            AbifValue::Thumb(v) => v.is_sequence(),
            AbifValue::Bool(v) => v.is_sequence(),
            AbifValue::PString(_) | AbifValue::CString(_) | AbifValue::Raw { .. } => false,
        }
    }

    /// Byte view of byte, char and raw values.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            AbifValue::Byte(v) | AbifValue::Char(v) => Some(v.as_slice()),
            AbifValue::Raw { bytes, .. } => Some(bytes),
            _ => None,
        }
    }

    /// String view decoded as Windows-1252.
    pub fn to_text(&self) -> Option<String> {
        self.to_text_with(WINDOWS_1252)
    }

    /// String view using the given encoding.
    ///
    /// Strings are returned as decoded; byte, char and raw values are decoded
    /// from their bytes. Numeric and packed types have no string view.
    pub fn to_text_with(&self, encoding: &'static Encoding) -> Option<String> {
        match self {
            AbifValue::PString(s) | AbifValue::CString(s) => Some(s.clone()),
            _ => self
                .as_bytes()
                .map(|bytes| decode_text(bytes, encoding)),
        }
    }

    /// Numeric values widened to `f64`.
    pub fn to_f64_vec(&self) -> Option<Vec<f64>> {
        match self {
            AbifValue::Byte(v) => Some(v.iter().map(|&x| f64::from(x)).collect()),
            AbifValue::Word(v) => Some(v.iter().map(|&x| f64::from(x)).collect()),
            AbifValue::Short(v) => Some(v.iter().map(|&x| f64::from(x)).collect()),
            AbifValue::Long(v) => Some(v.iter().map(|&x| f64::from(x)).collect()),
            AbifValue::Float(v) => Some(v.iter().map(|&x| f64::from(x)).collect()),
            AbifValue::Double(v) => Some(v.as_slice().to_vec()),
            _ => None,
        }
    }

    /// Integer values widened to `i64`.
    pub fn to_i64_vec(&self) -> Option<Vec<i64>> {
        match self {
            AbifValue::Byte(v) => Some(v.iter().map(|&x| i64::from(x)).collect()),
            AbifValue::Word(v) => Some(v.iter().map(|&x| i64::from(x)).collect()),
            AbifValue::Short(v) => Some(v.iter().map(|&x| i64::from(x)).collect()),
            AbifValue::Long(v) => Some(v.iter().map(|&x| i64::from(x)).collect()),
            _ => None,
        }
    }
}

/// Decode 8-bit text, dropping nothing: every byte maps to a character.
pub(crate) fn decode_text(bytes: &[u8], encoding: &'static Encoding) -> String {
    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}

/// Text output: sequences space-separated, strings as decoded.
///
/// Char values are always rendered as Windows-1252, like [`AbifValue::to_text`];
/// use [`AbifValue::to_text_with`] or `AbifReader::get_text` for another
/// encoding.
impl fmt::Display for AbifValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbifValue::Byte(v) => write!(f, "{}", v),
            AbifValue::Char(v) => f.write_str(&decode_text(v.as_slice(), WINDOWS_1252)),
            AbifValue::Word(v) => write!(f, "{}", v),
            AbifValue::Short(v) => write!(f, "{}", v),
            AbifValue::Long(v) => write!(f, "{}", v),
            AbifValue::Float(v) => write!(f, "{}", v),
            AbifValue::Double(v) => write!(f, "{}", v),
            AbifValue::Date(v) => write!(f, "{}", v),
            AbifValue::Time(v) => write!(f, "{}", v),
            AbifValue::Thumb(v) => write!(f, "{}", v),
            AbifValue::Bool(v) => write!(f, "{}", v),
            AbifValue::PString(s) | AbifValue::CString(s) => f.write_str(s),
            AbifValue::Raw { bytes, .. } => {
                for (i, b) in bytes.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", b)?;
                }
                Ok(())
            }
        }
    }
}
