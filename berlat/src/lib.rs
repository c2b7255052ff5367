//! berlat - BER encoding and decoding of reflected Rust values
//!
//! # Architecture
//!
//! This library is organized as a workspace with multiple crates:
//!
//! - `berlat-core`: error type, reflection protocol, date/time types and
//!   the closure-backed `ObjectProxy`
//! - `berlat-codec`: the BER encoder and decoder
//!
//! # Usage
//!
//! ```rust
//! use berlat::impl_sequence;
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Reading {
//!     meter: String,
//!     value: i64,
//! }
//!
//! impl_sequence!(Reading {
//!     meter: 0, "meter";
//!     value: 1, "value";
//! });
//!
//! let reading = Reading { meter: "M-17".to_string(), value: 4200 };
//! let bytes = berlat::to_vec(&reading).unwrap();
//! let decoded: Reading = berlat::from_slice(&bytes).unwrap();
//! assert_eq!(decoded, reading);
//! ```
//!
//! For access to the severity, message log and counters of a call, use
//! [`BerEncoder`] and [`BerDecoder`] directly.

// Re-export core types
pub use berlat_core::datatypes::*;
pub use berlat_core::reflect;
pub use berlat_core::{BerError, BerResult, FormattingMode, ObjectProxy, Reflect, TypeCategory};
pub use berlat_core::{impl_enumeration, impl_sequence};

// Re-export the codec
pub use berlat_codec::ber;
pub use berlat_codec::ber::{
    BerDecoder, BerEncoder, DecoderOptions, EncoderOptions, ErrorSeverity,
};

/// Encode `value` with default options
pub fn to_vec<T: Reflect>(value: &T) -> BerResult<Vec<u8>> {
    BerEncoder::new().encode_to_vec(value)
}

pub fn to_vec_with_options<T: Reflect>(value: &T, options: &EncoderOptions) -> BerResult<Vec<u8>> {
    BerEncoder::with_options(options).encode_to_vec(value)
}

/// Decode a `T` from the first element of `bytes` with default options
///
/// Bytes after the first element are ignored.
pub fn from_slice<T: Reflect + Default>(bytes: &[u8]) -> BerResult<T> {
    from_slice_with_options(bytes, &DecoderOptions::new())
}

pub fn from_slice_with_options<T: Reflect + Default>(
    bytes: &[u8],
    options: &DecoderOptions,
) -> BerResult<T> {
    let mut value = T::default();
    BerDecoder::with_options(options).decode(bytes, &mut value)?;
    Ok(value)
}
