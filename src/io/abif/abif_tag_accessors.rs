//! Typed accessors for well-known tags.
//!
//! Each accessor is a thin wrapper over [`AbifReader::get`] that checks the
//! value kind and converts it to a plain Rust type.

use std::io::{Read, Seek};

use crate::error::{AbifError, Result};
use crate::tags::TagKey;
use crate::types::{AbifDate, AbifTime, AbifValue, Elements};

use super::abif_reader::AbifReader;

fn unexpected(name: &str, number: i32, expected: &'static str, value: &AbifValue) -> AbifError {
    AbifError::UnexpectedType {
        key: TagKey::new(name, number).to_string(),
        expected,
        found: value.element_type(),
    }
}

impl<R: Read + Seek> AbifReader<R> {
    /// `User1`: name of the user who created the plate.
    pub fn user(&self) -> Result<String> {
        self.get_text("User", 1)
    }

    /// `SMPL1`: sample name.
    pub fn sample_name(&self) -> Result<String> {
        self.get_text("SMPL", 1)
    }

    /// `MODL1`: instrument model number.
    pub fn model(&self) -> Result<String> {
        self.get_text("MODL", 1)
    }

    /// `MCHN1`: instrument name and serial number.
    pub fn machine(&self) -> Result<String> {
        self.get_text("MCHN", 1)
    }

    /// `FWO_1`: base order of the filter wheel, e.g. `GATC`.
    pub fn base_order(&self) -> Result<String> {
        self.get_text("FWO_", 1)
    }

    /// `APrX1`: analysis protocol XML.
    pub fn analysis_protocol(&self) -> Result<String> {
        self.get_text("APrX", 1)
    }

    /// `RMdX1`: run module XML.
    pub fn run_module_xml(&self) -> Result<String> {
        self.get_text("RMdX", 1)
    }

    /// `DyeB<n>`: dye significance as a character.
    pub fn dye_base(&self, number: i32) -> Result<char> {
        match self.get("DyeB", number)? {
            AbifValue::Char(Elements::Scalar(b)) | AbifValue::Byte(Elements::Scalar(b)) => {
                Ok(char::from(*b))
            }
            other => Err(unexpected("DyeB", number, "single char", other)),
        }
    }

    /// `CpEP1`: whether the capillary type is electrophoresis.
    pub fn capillary_ep(&self) -> Result<bool> {
        match self.get("CpEP", 1)? {
            AbifValue::Byte(Elements::Scalar(b)) => Ok(*b != 0),
            AbifValue::Bool(Elements::Scalar(b)) => Ok(*b),
            other => Err(unexpected("CpEP", 1, "byte or bool", other)),
        }
    }

    /// `LANE1`: lane or capillary number.
    pub fn lane(&self) -> Result<i16> {
        match self.get("LANE", 1)? {
            AbifValue::Short(Elements::Scalar(lane)) => Ok(*lane),
            other => Err(unexpected("LANE", 1, "short", other)),
        }
    }

    /// `RUND<n>`: run or collection date.
    pub fn run_date(&self, number: i32) -> Result<AbifDate> {
        match self.get("RUND", number)? {
            AbifValue::Date(Elements::Scalar(date)) => Ok(*date),
            other => Err(unexpected("RUND", number, "date", other)),
        }
    }

    /// `RUNT<n>`: run or collection time.
    pub fn run_time(&self, number: i32) -> Result<AbifTime> {
        match self.get("RUNT", number)? {
            AbifValue::Time(Elements::Scalar(time)) => Ok(*time),
            other => Err(unexpected("RUNT", number, "time", other)),
        }
    }

    /// `DATA<channel>`: trace samples for a channel.
    pub fn raw_data(&self, channel: i32) -> Result<&[i16]> {
        match self.get("DATA", channel)? {
            AbifValue::Short(samples) => Ok(samples.as_slice()),
            other => Err(unexpected("DATA", channel, "short array", other)),
        }
    }
}
