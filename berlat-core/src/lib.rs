//! Core types for the berlat BER codec
//!
//! This crate provides the error type, the date/time value types and the
//! reflection protocol through which the codec reads and populates values.

pub mod datatypes;
pub mod error;
pub mod proxy;
pub mod reflect;

pub use datatypes::{DateTz, DatetimeTz, TimeTz};
pub use error::{BerError, BerResult};
pub use proxy::ObjectProxy;
pub use reflect::{FormattingMode, Reflect, TypeCategory};
