//! Configuration for reading ABIF files.

use encoding_rs::{Encoding, WINDOWS_1252};

/// When entry values are decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeStrategy {
    /// Decode on first request and keep successful results.
    #[default]
    Lazy,
    /// Decode every entry while opening. Failures are stored per entry and
    /// do not abort the scan.
    Eager,
}

/// Configuration options for the ABIF reader.
#[derive(Debug, Clone)]
pub struct AbifReaderConfiguration {
    /// Decoding strategy. Default: [`DecodeStrategy::Lazy`].
    pub decode_strategy: DecodeStrategy,

    /// Require the root entry to be `tdir` number 1, as written by
    /// instruments. Default: `true`.
    pub strict_root_directory: bool,

    /// Encoding of char, pString and cString text. Default: Windows-1252.
    pub text_encoding: &'static Encoding,
}

impl Default for AbifReaderConfiguration {
    fn default() -> Self {
        Self {
            decode_strategy: DecodeStrategy::Lazy,
            strict_root_directory: true,
            text_encoding: WINDOWS_1252,
        }
    }
}

impl AbifReaderConfiguration {
    /// Configuration that decodes all entries while opening.
    pub fn eager() -> Self {
        Self {
            decode_strategy: DecodeStrategy::Eager,
            ..Default::default()
        }
    }
}
