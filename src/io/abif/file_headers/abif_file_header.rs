//! ABIF file header: signature and version.

use std::fmt;

use nom::bytes::complete::take;
use nom::number::complete::be_i16;
use nom::sequence::pair;
use nom::IResult;

use crate::error::{AbifError, Result};

/// The literal signature every ABIF file starts with.
pub const ABIF_SIGNATURE: &[u8; 4] = b"ABIF";

/// Size in bytes of the signature plus version.
pub const FILE_HEADER_SIZE: usize = 6;

/// The 6-byte prefix of an ABIF file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbifFileHeader {
    /// Format version, e.g. `101` for 1.01. Recorded but not validated.
    pub version: i16,
}

impl AbifFileHeader {
    /// Parse the header from the first bytes of a file.
    ///
    /// # Errors
    ///
    /// `AbifError::Truncated` when fewer than 6 bytes are given and
    /// `AbifError::InvalidSignature` when the signature is not `ABIF`.
    pub fn parse(input: &[u8]) -> Result<Self> {
        let (_, (signature, version)) =
            file_header(input).map_err(|_| AbifError::Truncated { context: "header" })?;

        if signature != ABIF_SIGNATURE {
            let mut found = [0u8; 4];
            found.copy_from_slice(signature);
            return Err(AbifError::InvalidSignature { found });
        }

        Ok(Self { version })
    }

    /// Major version number (`1` for 1.01).
    pub fn major(&self) -> i16 {
        self.version / 100
    }

    /// Minor version number (`1` for 1.01).
    pub fn minor(&self) -> i16 {
        self.version % 100
    }
}

impl fmt::Display for AbifFileHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ABIF {}.{:02}", self.major(), self.minor())
    }
}

fn file_header(input: &[u8]) -> IResult<&[u8], (&[u8], i16)> {
    pair(take(4usize), be_i16)(input)
}
