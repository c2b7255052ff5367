//! BER codec for the berlat reflection protocol
//!
//! This crate provides [`BerEncoder`](ber::BerEncoder) and
//! [`BerDecoder`](ber::BerDecoder), which translate between
//! [`Reflect`](berlat_core::Reflect) values and BER-encoded bytes.

pub mod ber;

pub use ber::{BerDecoder, BerEncoder, DecoderOptions, EncoderOptions, ErrorSeverity};
