//! Encoder and decoder configuration
//!
//! Options are read-only inputs: a codec borrows them for its whole lifetime
//! and never mutates them, so one options value can be shared by any number
//! of codec instances.
//!
//! # Usage Example
//!
//! ```rust
//! use berlat_codec::ber::EncoderOptions;
//!
//! let options = EncoderOptions::new()
//!     .with_encode_array_length_hint(true)
//!     .with_max_depth(8);
//! ```

use serde::{Deserialize, Serialize};

/// Default maximum nesting of constructed values
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Default upper bound for definite lengths and array growth (1 GiB)
pub const DEFAULT_MAX_SEQUENCE_SIZE: usize = 1024 * 1024 * 1024;

/// Default minimum number of fractional-second digits in datetime text
pub const DEFAULT_DATETIME_FRACTIONAL_SECOND_PRECISION: u8 = 6;

/// Options controlling [`BerEncoder`](super::BerEncoder)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderOptions {
    /// Element tracing through `log::trace!` when greater than 0
    pub trace_level: u32,
    /// Maximum nesting of constructed values
    pub max_depth: usize,
    /// Write arrays with a definite length instead of INDEFINITE
    pub encode_array_length_hint: bool,
    /// Write empty array attributes (when false they are omitted)
    pub encode_empty_arrays: bool,
    /// Treat a choice with no selection as an error
    pub disable_unselected_choice_encoding: bool,
    /// Minimum digits of fractional seconds in datetime text (0-6)
    ///
    /// A value with finer parts gets as many digits as it needs, up to 9.
    pub datetime_fractional_second_precision: u8,
    /// Write date and time values as binary OCTET_STRING content instead of
    /// ISO 8601 text
    ///
    /// The binary form keeps milliseconds and offsets in whole minutes.
    pub encode_date_and_time_types_as_binary: bool,
    /// Encode `-0.0` as the MINUS-ZERO real instead of a plain zero
    pub preserve_sign_of_negative_zero: bool,
}

impl EncoderOptions {
    /// Create options with default settings
    ///
    /// # Default Settings
    /// - Max depth: 32
    /// - Arrays: indefinite length, empty arrays encoded
    /// - Datetime fractional precision: 6
    /// - Date and time values: text
    pub const fn new() -> Self {
        Self {
            trace_level: 0,
            max_depth: DEFAULT_MAX_DEPTH,
            encode_array_length_hint: false,
            encode_empty_arrays: true,
            disable_unselected_choice_encoding: false,
            datetime_fractional_second_precision: DEFAULT_DATETIME_FRACTIONAL_SECOND_PRECISION,
            preserve_sign_of_negative_zero: false,
            encode_date_and_time_types_as_binary: false,
        }
    }

    pub fn with_trace_level(mut self, level: u32) -> Self {
        self.trace_level = level;
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_encode_array_length_hint(mut self, enabled: bool) -> Self {
        self.encode_array_length_hint = enabled;
        self
    }

    pub fn with_encode_empty_arrays(mut self, enabled: bool) -> Self {
        self.encode_empty_arrays = enabled;
        self
    }

    pub fn with_disable_unselected_choice_encoding(mut self, disabled: bool) -> Self {
        self.disable_unselected_choice_encoding = disabled;
        self
    }

    /// Set the datetime fractional-second precision, clamped to 0-6
    pub fn with_datetime_fractional_second_precision(mut self, precision: u8) -> Self {
        self.datetime_fractional_second_precision = precision.min(6);
        self
    }

    pub fn with_preserve_sign_of_negative_zero(mut self, enabled: bool) -> Self {
        self.preserve_sign_of_negative_zero = enabled;
        self
    }

    pub fn with_encode_date_and_time_types_as_binary(mut self, enabled: bool) -> Self {
        self.encode_date_and_time_types_as_binary = enabled;
        self
    }
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Options controlling [`BerDecoder`](super::BerDecoder)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderOptions {
    /// Element tracing through `log::trace!` when greater than 0
    pub trace_level: u32,
    /// Maximum nesting of constructed values
    pub max_depth: usize,
    /// Skip unknown sequence attributes and choice selections
    pub skip_unknown_elements: bool,
    /// Upper bound for definite lengths and array growth
    pub max_sequence_size: usize,
    /// Reject nested elements whose class is not CONTEXT_SPECIFIC
    pub strict_tag_class: bool,
}

impl DecoderOptions {
    /// Create options with default settings
    ///
    /// # Default Settings
    /// - Max depth: 32
    /// - Unknown elements: skipped
    /// - Max sequence size: 1 GiB
    pub const fn new() -> Self {
        Self {
            trace_level: 0,
            max_depth: DEFAULT_MAX_DEPTH,
            skip_unknown_elements: true,
            max_sequence_size: DEFAULT_MAX_SEQUENCE_SIZE,
            strict_tag_class: false,
        }
    }

    pub fn with_trace_level(mut self, level: u32) -> Self {
        self.trace_level = level;
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_skip_unknown_elements(mut self, enabled: bool) -> Self {
        self.skip_unknown_elements = enabled;
        self
    }

    pub fn with_max_sequence_size(mut self, size: usize) -> Self {
        self.max_sequence_size = size;
        self
    }

    pub fn with_strict_tag_class(mut self, enabled: bool) -> Self {
        self.strict_tag_class = enabled;
        self
    }
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self::new()
    }
}
