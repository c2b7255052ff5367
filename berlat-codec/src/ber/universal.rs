//! Universal tag selection
//!
//! Maps a value's type category and formatting mode to the universal tag
//! number used for a root element, and to the content rendering used at any
//! depth.
//!
//! | category                  | DEFAULT      | DEC  | HEX/BASE64   | TEXT        |
//! |---------------------------|--------------|------|--------------|-------------|
//! | bool                      | BOOL         | BOOL | -            | BOOL        |
//! | i8                        | INT          | INT  | -            | UTF8_STRING |
//! | other integers            | INT          | INT  | -            | -           |
//! | f32, f64                  | REAL         | REAL | -            | -           |
//! | String                    | UTF8_STRING  | -    | OCTET_STRING | UTF8_STRING |
//! | bytes                     | OCTET_STRING | -    | OCTET_STRING | UTF8_STRING |
//! | date/time kinds           | VISIBLE_STRING (any mode, alternate OCTET_STRING)  |||
//! | date/time kinds, binary   | OCTET_STRING | -    | -            | -           |
//! | Sequence, Choice, Array   | SEQUENCE     | -    | -            | -           |
//! | Enumeration               | ENUMERATION  | ENUMERATION | -     | ENUMERATION |
//!
//! UNSET behaves as DEFAULT and the LIST flag is ignored. Entries marked `-`
//! are outside the contract. The binary date/time row applies when
//! [`EncoderOptions::encode_date_and_time_types_as_binary`] is set; its
//! alternate is VISIBLE_STRING.

use super::options::EncoderOptions;
use berlat_core::reflect::{BaseMode, FormattingMode, SimpleKind, TypeCategory};
use std::fmt;

/// Universal tag numbers produced by this codec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniversalTagNumber {
    Bool = 1,
    Int = 2,
    OctetString = 4,
    Real = 9,
    Enumeration = 10,
    Utf8String = 12,
    Sequence = 16,
    VisibleString = 26,
    Invalid = -1,
}

impl UniversalTagNumber {
    /// Get the tag number as written on the wire
    pub fn number(self) -> Option<u32> {
        match self {
            UniversalTagNumber::Invalid => None,
            other => Some(other as i32 as u32),
        }
    }

    pub fn from_number(number: u32) -> Self {
        match number {
            1 => UniversalTagNumber::Bool,
            2 => UniversalTagNumber::Int,
            4 => UniversalTagNumber::OctetString,
            9 => UniversalTagNumber::Real,
            10 => UniversalTagNumber::Enumeration,
            12 => UniversalTagNumber::Utf8String,
            16 => UniversalTagNumber::Sequence,
            26 => UniversalTagNumber::VisibleString,
            _ => UniversalTagNumber::Invalid,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            UniversalTagNumber::Bool => "BOOL",
            UniversalTagNumber::Int => "INT",
            UniversalTagNumber::OctetString => "OCTET_STRING",
            UniversalTagNumber::Real => "REAL",
            UniversalTagNumber::Enumeration => "ENUMERATION",
            UniversalTagNumber::Utf8String => "UTF8_STRING",
            UniversalTagNumber::Sequence => "SEQUENCE",
            UniversalTagNumber::VisibleString => "VISIBLE_STRING",
            UniversalTagNumber::Invalid => "INVALID",
        }
    }
}

impl fmt::Display for UniversalTagNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of a tag selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagSelection {
    pub tag: UniversalTagNumber,
    /// Another tag a decoder may accept for the same value
    pub alternate: Option<UniversalTagNumber>,
}

impl TagSelection {
    fn of(tag: UniversalTagNumber) -> Self {
        Self {
            tag,
            alternate: None,
        }
    }
}

/// Select the universal tag, or `None` outside the table
///
/// # Arguments
/// * `category` - The resolved category of the value
/// * `mode` - The formatting mode of the attribute or selection
/// * `options` - Encoder options; `None` selects as the default options do,
///   which is what a decoder wants since it accepts either date/time form
///
/// [`TypeCategory::NullableValue`], [`TypeCategory::CustomizedType`] and
/// [`TypeCategory::DynamicType`] must be resolved by the caller and are
/// always outside the table.
pub fn try_select(
    category: TypeCategory,
    mode: FormattingMode,
    options: Option<&EncoderOptions>,
) -> Option<TagSelection> {
    use UniversalTagNumber as U;

    let base = match mode.base() {
        BaseMode::Unset => BaseMode::Default,
        base => base,
    };
    let binary_temporal = options.is_some_and(|o| o.encode_date_and_time_types_as_binary);

    let tag = match category {
        TypeCategory::Simple(kind) if kind.is_temporal() && binary_temporal => {
            return match base {
                BaseMode::Default => Some(TagSelection {
                    tag: U::OctetString,
                    alternate: Some(U::VisibleString),
                }),
                _ => None,
            };
        }
        TypeCategory::Simple(kind) if kind.is_temporal() => {
            return Some(TagSelection {
                tag: U::VisibleString,
                alternate: Some(U::OctetString),
            });
        }
        TypeCategory::Simple(SimpleKind::Bool) => match base {
            BaseMode::Default | BaseMode::Dec | BaseMode::Text => U::Bool,
            _ => return None,
        },
        TypeCategory::Simple(SimpleKind::I8) => match base {
            BaseMode::Default | BaseMode::Dec => U::Int,
            BaseMode::Text => U::Utf8String,
            _ => return None,
        },
        TypeCategory::Simple(kind) if kind.is_integer() => match base {
            BaseMode::Default | BaseMode::Dec => U::Int,
            _ => return None,
        },
        TypeCategory::Simple(SimpleKind::F32 | SimpleKind::F64) => match base {
            BaseMode::Default | BaseMode::Dec => U::Real,
            _ => return None,
        },
        TypeCategory::Simple(SimpleKind::String) => match base {
            BaseMode::Default | BaseMode::Text => U::Utf8String,
            BaseMode::Hex | BaseMode::Base64 => U::OctetString,
            _ => return None,
        },
        TypeCategory::Simple(SimpleKind::Bytes) => match base {
            BaseMode::Default | BaseMode::Hex | BaseMode::Base64 => U::OctetString,
            BaseMode::Text => U::Utf8String,
            _ => return None,
        },
        TypeCategory::Sequence | TypeCategory::Choice | TypeCategory::Array => match base {
            BaseMode::Default => U::Sequence,
            _ => return None,
        },
        TypeCategory::Enumeration => match base {
            BaseMode::Default | BaseMode::Dec | BaseMode::Text => U::Enumeration,
            _ => return None,
        },
        _ => return None,
    };

    Some(TagSelection::of(tag))
}

/// Select the universal tag for a value
///
/// Combinations outside the table are a contract violation: they assert in
/// debug builds and yield [`UniversalTagNumber::Invalid`] otherwise.
pub fn select(
    category: TypeCategory,
    mode: FormattingMode,
    options: Option<&EncoderOptions>,
) -> TagSelection {
    match try_select(category, mode, options) {
        Some(selection) => selection,
        None => {
            debug_assert!(
                false,
                "no universal tag for {} under {:?}",
                category, mode
            );
            TagSelection::of(UniversalTagNumber::Invalid)
        }
    }
}
