//! Packed record types: date, time and thumbprint.

use std::fmt;
use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};

/// Calendar date packed as year (16-bit), month and day (8-bit each).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AbifDate {
    pub year: i16,
    pub month: u8,
    pub day: u8,
}

impl AbifDate {
    /// Create a new date.
    pub fn new(year: i16, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Read one packed date (4 bytes).
    pub fn read<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        let year = reader.read_i16::<BigEndian>()?;
        let month = reader.read_u8()?;
        let day = reader.read_u8()?;
        Ok(Self { year, month, day })
    }
}

impl fmt::Display for AbifDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Time of day packed as hour, minute, second and hundredths (8-bit each).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AbifTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub hundredths: u8,
}

impl AbifTime {
    /// Create a new time.
    pub fn new(hour: u8, minute: u8, second: u8, hundredths: u8) -> Self {
        Self {
            hour,
            minute,
            second,
            hundredths,
        }
    }

    /// Read one packed time (4 bytes).
    pub fn read<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        let mut packed = [0u8; 4];
        reader.read_exact(&mut packed)?;
        Ok(Self::new(packed[0], packed[1], packed[2], packed[3]))
    }
}

impl fmt::Display for AbifTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}.{:02}",
            self.hour, self.minute, self.second, self.hundredths
        )
    }
}

/// Thumbprint record (type 12): two longs followed by two bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Thumb {
    pub d: i32,
    pub u: i32,
    pub c: u8,
    pub n: u8,
}

impl Thumb {
    /// Read one packed thumbprint (10 bytes).
    pub fn read<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        let d = reader.read_i32::<BigEndian>()?;
        let u = reader.read_i32::<BigEndian>()?;
        let c = reader.read_u8()?;
        let n = reader.read_u8()?;
        Ok(Self { d, u, c, n })
    }
}

impl fmt::Display for Thumb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {} {})", self.d, self.u, self.c, self.n)
    }
}
