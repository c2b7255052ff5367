//! BER (Basic Encoding Rules, ITU-T X.690) encoder and decoder
//!
//! Values are not described by an ASN.1 module. Instead the codec walks any
//! [`Reflect`](berlat_core::Reflect) value and derives the encoding from its
//! type category and the formatting mode of each attribute.
//!
//! # Encoding Overview
//!
//! Every value is a TLV (Tag-Length-Value) triplet:
//!
//! ```text
//! [Identifier] [Length] [Contents]
//! ```
//!
//! ## Identifiers
//!
//! - The root element carries a UNIVERSAL tag chosen by [`try_select`] from
//!   the value's category and formatting mode.
//! - Sequence attributes and choice selections carry a CONTEXT_SPECIFIC tag
//!   equal to their id.
//! - Array elements carry a CONTEXT_SPECIFIC tag equal to their index.
//!
//! Tag numbers above 30 use the high-tag-number form.
//!
//! ## Lengths
//!
//! Sequences and choices are always written with the indefinite length form
//! and closed by an end-of-contents marker (`00 00`). Arrays use the
//! indefinite form unless
//! [`encode_array_length_hint`](EncoderOptions::encode_array_length_hint) is
//! set. Primitive elements always use the definite form, short (one octet)
//! below 128 and long otherwise.
//!
//! ## Absent Values
//!
//! Null values are not written. A null array element keeps its position with
//! an empty constructed placeholder, for example `A1 00` at index 1.
//!
//! # Diagnostics
//!
//! Both directions keep going after a content problem and report through
//! [`ErrorSeverity`] and a message log. A call fails only when the final
//! severity is [`ErrorSeverity::Error`].

pub mod decoder;
pub mod diagnostics;
pub mod encoder;
pub mod options;
pub mod reader;
pub mod types;
pub mod universal;
pub mod util;

#[cfg(test)]
pub(crate) mod testing;

pub use decoder::BerDecoder;
pub use diagnostics::{ElementContext, ErrorSeverity};
pub use encoder::BerEncoder;
pub use options::{DecoderOptions, EncoderOptions};
pub use reader::BerReader;
pub use types::{BerHeader, BerLength, BerTag, BerTagClass, BerTagType};
pub use universal::{TagSelection, UniversalTagNumber, select, try_select};
