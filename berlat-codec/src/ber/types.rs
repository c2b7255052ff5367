//! BER identifier and length octets
//!
//! # Identifier Octets
//!
//! ```text
//! Bits: 8 7 6 5 4 3 2 1
//!       C C P T T T T T
//! ```
//!
//! CC is the class, P is set for constructed values and TTTTT is the tag
//! number. Tag numbers above 30 set TTTTT to 11111 and follow with base-128
//! octets, bit 8 set on all but the last.
//!
//! # Length Octets
//!
//! - Short form: one octet holding 0-127
//! - Long form: `0x80 | n` followed by `n` big-endian octets
//! - Indefinite form: the single octet `0x80`; the contents end with the
//!   two octets `00 00` (end-of-contents). Only constructed values may use it.

use super::reader::BerReader;
use berlat_core::error::{BerError, BerResult};
use bytes::BufMut;
use std::fmt;

/// Largest tag number that fits in the low five bits of the first octet
const MAX_SHORT_TAG_NUMBER: u32 = 30;

/// Maximum number of continuation octets of a high tag number (u32)
const MAX_TAG_CONTINUATION_OCTETS: usize = 5;

/// BER Tag Class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BerTagClass {
    /// Universal class (00)
    Universal = 0,
    /// Application class (01)
    Application = 1,
    /// Context-specific class (10)
    ContextSpecific = 2,
    /// Private class (11)
    Private = 3,
}

impl BerTagClass {
    /// Get tag class from bits 8-7 of an identifier octet
    pub fn from_bits(bits: u8) -> Self {
        match (bits >> 6) & 0x03 {
            0 => BerTagClass::Universal,
            1 => BerTagClass::Application,
            2 => BerTagClass::ContextSpecific,
            _ => BerTagClass::Private,
        }
    }

    /// Convert tag class to bits (for encoding)
    pub fn to_bits(self) -> u8 {
        (self as u8) << 6
    }
}

impl fmt::Display for BerTagClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BerTagClass::Universal => "UNIVERSAL",
            BerTagClass::Application => "APPLICATION",
            BerTagClass::ContextSpecific => "CONTEXT_SPECIFIC",
            BerTagClass::Private => "PRIVATE",
        })
    }
}

/// Primitive or constructed encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BerTagType {
    Primitive,
    Constructed,
}

impl BerTagType {
    pub fn to_bits(self) -> u8 {
        match self {
            BerTagType::Primitive => 0x00,
            BerTagType::Constructed => 0x20,
        }
    }
}

/// BER Tag
///
/// A BER tag identifies an element: its class, whether it is constructed
/// and its tag number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BerTag {
    class: BerTagClass,
    tag_type: BerTagType,
    number: u32,
}

impl BerTag {
    pub fn new(class: BerTagClass, tag_type: BerTagType, number: u32) -> Self {
        Self {
            class,
            tag_type,
            number,
        }
    }

    pub fn universal(tag_type: BerTagType, number: u32) -> Self {
        Self::new(BerTagClass::Universal, tag_type, number)
    }

    pub fn context_specific(tag_type: BerTagType, number: u32) -> Self {
        Self::new(BerTagClass::ContextSpecific, tag_type, number)
    }

    /// The identifier of the end-of-contents marker
    pub fn end_of_contents() -> Self {
        Self::universal(BerTagType::Primitive, 0)
    }

    pub fn class(&self) -> BerTagClass {
        self.class
    }

    pub fn tag_type(&self) -> BerTagType {
        self.tag_type
    }

    pub fn is_constructed(&self) -> bool {
        self.tag_type == BerTagType::Constructed
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    /// Encode identifier octets
    ///
    /// # Encoding Strategy
    /// - If tag number <= 30: Use short form (1 byte)
    /// - If tag number > 30: Use the high tag number form
    pub fn encode(&self) -> Vec<u8> {
        let leading = self.class.to_bits() | self.tag_type.to_bits();

        if self.number <= MAX_SHORT_TAG_NUMBER {
            return vec![leading | self.number as u8];
        }

        let mut result = vec![leading | 0x1F];
        let mut groups = Vec::with_capacity(MAX_TAG_CONTINUATION_OCTETS);
        let mut remaining = self.number;
        while remaining > 0 {
            groups.push((remaining & 0x7F) as u8);
            remaining >>= 7;
        }
        let last = groups.len() - 1;
        for (i, &group) in groups.iter().rev().enumerate() {
            result.push(if i < last { group | 0x80 } else { group });
        }
        result
    }

    /// Read identifier octets
    ///
    /// # Error Handling
    /// Returns error if:
    /// - The stream ends inside the identifier
    /// - A high tag number does not terminate within 5 octets or overflows u32
    pub fn read_from(reader: &mut BerReader<'_>) -> BerResult<Self> {
        let first = reader.read_byte()?;
        let class = BerTagClass::from_bits(first);
        let tag_type = if first & 0x20 != 0 {
            BerTagType::Constructed
        } else {
            BerTagType::Primitive
        };

        let low = u32::from(first & 0x1F);
        if low <= MAX_SHORT_TAG_NUMBER {
            return Ok(Self::new(class, tag_type, low));
        }

        let mut number = 0u32;
        for _ in 0..MAX_TAG_CONTINUATION_OCTETS {
            let byte = reader.read_byte().map_err(|_| {
                BerError::InvalidData("Incomplete high tag number encoding".to_string())
            })?;
            if number > (u32::MAX >> 7) {
                return Err(BerError::InvalidData("Tag number too large".to_string()));
            }
            number = (number << 7) | u32::from(byte & 0x7F);
            if byte & 0x80 == 0 {
                return Ok(Self::new(class, tag_type, number));
            }
        }

        Err(BerError::InvalidData(
            "High tag number not terminated".to_string(),
        ))
    }
}

impl fmt::Display for BerTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} {}]", self.class, self.number)
    }
}

/// BER Length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BerLength {
    /// Short form: length 0-127
    Short(u8),
    /// Long form: length-of-length octet followed by the length
    Long(usize),
    /// Indefinite form, contents closed by end-of-contents
    Indefinite,
}

impl BerLength {
    /// Create a definite length, choosing the short form when possible
    pub fn new(length: usize) -> Self {
        if length < 128 {
            BerLength::Short(length as u8)
        } else {
            BerLength::Long(length)
        }
    }

    /// Get the definite length value, `None` for the indefinite form
    pub fn value(&self) -> Option<usize> {
        match self {
            BerLength::Short(l) => Some(usize::from(*l)),
            BerLength::Long(l) => Some(*l),
            BerLength::Indefinite => None,
        }
    }

    pub fn is_indefinite(&self) -> bool {
        matches!(self, BerLength::Indefinite)
    }

    /// Encode length octets
    pub fn encode(&self) -> Vec<u8> {
        match *self {
            BerLength::Short(length) => vec![length & 0x7F],
            BerLength::Indefinite => vec![0x80],
            BerLength::Long(length) => {
                let significant = length.to_be_bytes();
                let skip = significant.iter().take_while(|&&b| b == 0).count();
                let skip = skip.min(significant.len() - 1);
                let mut result = Vec::with_capacity(1 + significant.len() - skip);
                result.push(0x80 | (significant.len() - skip) as u8);
                result.extend_from_slice(&significant[skip..]);
                result
            }
        }
    }

    /// Read length octets
    ///
    /// # Error Handling
    /// Returns error if:
    /// - The stream ends inside the length
    /// - The reserved octet 0xFF is used
    /// - The length does not fit in `usize`
    pub fn read_from(reader: &mut BerReader<'_>) -> BerResult<Self> {
        let first = reader.read_byte()?;

        if first & 0x80 == 0 {
            return Ok(BerLength::Short(first));
        }
        if first == 0x80 {
            return Ok(BerLength::Indefinite);
        }
        if first == 0xFF {
            return Err(BerError::InvalidData(
                "Reserved length octet 0xFF".to_string(),
            ));
        }

        let num_bytes = usize::from(first & 0x7F);
        if num_bytes > size_of::<usize>() {
            return Err(BerError::InvalidData(format!(
                "Length encoding too large: {} bytes (max {})",
                num_bytes,
                size_of::<usize>()
            )));
        }

        let mut length = 0usize;
        for _ in 0..num_bytes {
            length = (length << 8) | usize::from(reader.read_byte()?);
        }
        Ok(BerLength::Long(length))
    }
}

/// Identifier and length of one element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BerHeader {
    pub tag: BerTag,
    pub length: BerLength,
}

impl BerHeader {
    /// Check if this header is the end-of-contents marker
    pub fn is_end_of_contents(&self) -> bool {
        self.tag == BerTag::end_of_contents() && self.length.value() == Some(0)
    }

    /// Read identifier and length octets
    ///
    /// An indefinite length on a primitive element is malformed.
    pub fn read_from(reader: &mut BerReader<'_>) -> BerResult<Self> {
        let tag = BerTag::read_from(reader)?;
        let length = BerLength::read_from(reader)?;
        if length.is_indefinite() && !tag.is_constructed() {
            return Err(BerError::InvalidData(format!(
                "Indefinite length on primitive element {}",
                tag
            )));
        }
        Ok(Self { tag, length })
    }
}

fn put(sink: &mut dyn BufMut, bytes: &[u8]) -> BerResult<()> {
    if sink.remaining_mut() < bytes.len() {
        return Err(BerError::Encoding(format!(
            "Output buffer exhausted: need {} bytes, have {}",
            bytes.len(),
            sink.remaining_mut()
        )));
    }
    sink.put_slice(bytes);
    Ok(())
}

/// Write identifier octets
pub fn put_identifier_octets(
    sink: &mut dyn BufMut,
    class: BerTagClass,
    tag_type: BerTagType,
    number: u32,
) -> BerResult<()> {
    put(sink, &BerTag::new(class, tag_type, number).encode())
}

/// Write length octets
pub fn put_length(sink: &mut dyn BufMut, length: BerLength) -> BerResult<()> {
    put(sink, &length.encode())
}

/// Write the end-of-contents marker closing an indefinite-length value
pub fn put_end_of_contents(sink: &mut dyn BufMut) -> BerResult<()> {
    put(sink, &[0x00, 0x00])
}

/// Write raw content octets
pub fn put_content(sink: &mut dyn BufMut, content: &[u8]) -> BerResult<()> {
    put(sink, content)
}

pub fn get_identifier_octets(reader: &mut BerReader<'_>) -> BerResult<BerTag> {
    BerTag::read_from(reader)
}

pub fn get_length(reader: &mut BerReader<'_>) -> BerResult<BerLength> {
    BerLength::read_from(reader)
}

/// Read the end-of-contents marker
pub fn get_end_of_contents(reader: &mut BerReader<'_>) -> BerResult<()> {
    let first = reader.read_byte()?;
    let second = reader.read_byte()?;
    if first != 0 || second != 0 {
        return Err(BerError::InvalidData(format!(
            "Expected end-of-contents, found {:02X} {:02X}",
            first, second
        )));
    }
    Ok(())
}
