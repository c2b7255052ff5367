//! Structural classification of reflected values

use std::fmt;

/// Kind of a simple (scalar) value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimpleKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    /// UTF-8 text
    String,
    /// Opaque byte sequence
    Bytes,
    Date,
    DateTz,
    Datetime,
    DatetimeTz,
    Time,
    TimeTz,
}

impl SimpleKind {
    /// Check if the kind is a fixed-width integer
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            SimpleKind::I8
                | SimpleKind::I16
                | SimpleKind::I32
                | SimpleKind::I64
                | SimpleKind::U8
                | SimpleKind::U16
                | SimpleKind::U32
                | SimpleKind::U64
        )
    }

    /// Check if the kind is one of the date/time kinds
    pub fn is_temporal(self) -> bool {
        matches!(
            self,
            SimpleKind::Date
                | SimpleKind::DateTz
                | SimpleKind::Datetime
                | SimpleKind::DatetimeTz
                | SimpleKind::Time
                | SimpleKind::TimeTz
        )
    }
}

/// Type category of a value
///
/// Exactly one category applies to a value at encode/decode time. A
/// [`TypeCategory::DynamicType`] value reports its concrete category through
/// its value views, and [`TypeCategory::CustomizedType`] and
/// [`TypeCategory::NullableValue`] are unwrapped by the codec before a tag is
/// chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    Simple(SimpleKind),
    Sequence,
    Choice,
    Array,
    Enumeration,
    NullableValue,
    CustomizedType,
    DynamicType,
}

impl TypeCategory {
    /// Check if values of this category are encoded as constructed elements
    pub fn is_constructed(self) -> bool {
        matches!(
            self,
            TypeCategory::Sequence | TypeCategory::Choice | TypeCategory::Array
        )
    }
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeCategory::Simple(kind) => write!(f, "Simple({:?})", kind),
            TypeCategory::Sequence => f.write_str("Sequence"),
            TypeCategory::Choice => f.write_str("Choice"),
            TypeCategory::Array => f.write_str("Array"),
            TypeCategory::Enumeration => f.write_str("Enumeration"),
            TypeCategory::NullableValue => f.write_str("NullableValue"),
            TypeCategory::CustomizedType => f.write_str("CustomizedType"),
            TypeCategory::DynamicType => f.write_str("DynamicType"),
        }
    }
}
