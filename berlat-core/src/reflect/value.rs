//! Borrowed views of reflected values
//!
//! [`ValueRef`] and [`ValueMut`] are what a codec sees after asking a value
//! for its structure: either a scalar, or a trait object for the category
//! specific capability.

use super::category::{SimpleKind, TypeCategory};
use super::traits::{
    ArrayType, ChoiceType, CustomizedType, EnumerationType, NullableType, SequenceType,
};
use crate::datatypes::{DateTz, DatetimeTz, TimeTz};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Read-only view of a simple value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarRef<'a> {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    String(&'a str),
    Bytes(&'a [u8]),
    Date(NaiveDate),
    DateTz(DateTz),
    Datetime(NaiveDateTime),
    DatetimeTz(DatetimeTz),
    Time(NaiveTime),
    TimeTz(TimeTz),
}

impl ScalarRef<'_> {
    pub fn kind(&self) -> SimpleKind {
        match self {
            ScalarRef::Bool(_) => SimpleKind::Bool,
            ScalarRef::I8(_) => SimpleKind::I8,
            ScalarRef::I16(_) => SimpleKind::I16,
            ScalarRef::I32(_) => SimpleKind::I32,
            ScalarRef::I64(_) => SimpleKind::I64,
            ScalarRef::U8(_) => SimpleKind::U8,
            ScalarRef::U16(_) => SimpleKind::U16,
            ScalarRef::U32(_) => SimpleKind::U32,
            ScalarRef::U64(_) => SimpleKind::U64,
            ScalarRef::F32(_) => SimpleKind::F32,
            ScalarRef::F64(_) => SimpleKind::F64,
            ScalarRef::String(_) => SimpleKind::String,
            ScalarRef::Bytes(_) => SimpleKind::Bytes,
            ScalarRef::Date(_) => SimpleKind::Date,
            ScalarRef::DateTz(_) => SimpleKind::DateTz,
            ScalarRef::Datetime(_) => SimpleKind::Datetime,
            ScalarRef::DatetimeTz(_) => SimpleKind::DatetimeTz,
            ScalarRef::Time(_) => SimpleKind::Time,
            ScalarRef::TimeTz(_) => SimpleKind::TimeTz,
        }
    }
}

/// Mutable view of a simple value
#[derive(Debug)]
pub enum ScalarMut<'a> {
    Bool(&'a mut bool),
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    F32(&'a mut f32),
    F64(&'a mut f64),
    String(&'a mut String),
    Bytes(&'a mut Vec<u8>),
    Date(&'a mut NaiveDate),
    DateTz(&'a mut DateTz),
    Datetime(&'a mut NaiveDateTime),
    DatetimeTz(&'a mut DatetimeTz),
    Time(&'a mut NaiveTime),
    TimeTz(&'a mut TimeTz),
}

impl<'a> ScalarMut<'a> {
    pub fn kind(&self) -> SimpleKind {
        self.to_ref().kind()
    }

    /// Get a read-only view of the same value
    pub fn to_ref(&self) -> ScalarRef<'_> {
        match self {
            ScalarMut::Bool(v) => ScalarRef::Bool(**v),
            ScalarMut::I8(v) => ScalarRef::I8(**v),
            ScalarMut::I16(v) => ScalarRef::I16(**v),
            ScalarMut::I32(v) => ScalarRef::I32(**v),
            ScalarMut::I64(v) => ScalarRef::I64(**v),
            ScalarMut::U8(v) => ScalarRef::U8(**v),
            ScalarMut::U16(v) => ScalarRef::U16(**v),
            ScalarMut::U32(v) => ScalarRef::U32(**v),
            ScalarMut::U64(v) => ScalarRef::U64(**v),
            ScalarMut::F32(v) => ScalarRef::F32(**v),
            ScalarMut::F64(v) => ScalarRef::F64(**v),
            ScalarMut::String(v) => ScalarRef::String(v.as_str()),
            ScalarMut::Bytes(v) => ScalarRef::Bytes(v.as_slice()),
            ScalarMut::Date(v) => ScalarRef::Date(**v),
            ScalarMut::DateTz(v) => ScalarRef::DateTz(**v),
            ScalarMut::Datetime(v) => ScalarRef::Datetime(**v),
            ScalarMut::DatetimeTz(v) => ScalarRef::DatetimeTz(**v),
            ScalarMut::Time(v) => ScalarRef::Time(**v),
            ScalarMut::TimeTz(v) => ScalarRef::TimeTz(**v),
        }
    }

    /// Reborrow for a shorter lifetime
    pub fn reborrow(&mut self) -> ScalarMut<'_> {
        match self {
            ScalarMut::Bool(v) => ScalarMut::Bool(v),
            ScalarMut::I8(v) => ScalarMut::I8(v),
            ScalarMut::I16(v) => ScalarMut::I16(v),
            ScalarMut::I32(v) => ScalarMut::I32(v),
            ScalarMut::I64(v) => ScalarMut::I64(v),
            ScalarMut::U8(v) => ScalarMut::U8(v),
            ScalarMut::U16(v) => ScalarMut::U16(v),
            ScalarMut::U32(v) => ScalarMut::U32(v),
            ScalarMut::U64(v) => ScalarMut::U64(v),
            ScalarMut::F32(v) => ScalarMut::F32(v),
            ScalarMut::F64(v) => ScalarMut::F64(v),
            ScalarMut::String(v) => ScalarMut::String(v),
            ScalarMut::Bytes(v) => ScalarMut::Bytes(v),
            ScalarMut::Date(v) => ScalarMut::Date(v),
            ScalarMut::DateTz(v) => ScalarMut::DateTz(v),
            ScalarMut::Datetime(v) => ScalarMut::Datetime(v),
            ScalarMut::DatetimeTz(v) => ScalarMut::DatetimeTz(v),
            ScalarMut::Time(v) => ScalarMut::Time(v),
            ScalarMut::TimeTz(v) => ScalarMut::TimeTz(v),
        }
    }
}

/// Read-only structural view of a value
pub enum ValueRef<'a> {
    Simple(ScalarRef<'a>),
    Sequence(&'a dyn SequenceType),
    Choice(&'a dyn ChoiceType),
    Array(&'a dyn ArrayType),
    Enumeration(&'a dyn EnumerationType),
    Nullable(&'a dyn NullableType),
    Customized(&'a dyn CustomizedType),
}

impl ValueRef<'_> {
    /// Get the category this view resolves to
    pub fn category(&self) -> TypeCategory {
        match self {
            ValueRef::Simple(scalar) => TypeCategory::Simple(scalar.kind()),
            ValueRef::Sequence(_) => TypeCategory::Sequence,
            ValueRef::Choice(_) => TypeCategory::Choice,
            ValueRef::Array(_) => TypeCategory::Array,
            ValueRef::Enumeration(_) => TypeCategory::Enumeration,
            ValueRef::Nullable(_) => TypeCategory::NullableValue,
            ValueRef::Customized(_) => TypeCategory::CustomizedType,
        }
    }
}

/// Mutable structural view of a value
pub enum ValueMut<'a> {
    Simple(ScalarMut<'a>),
    Sequence(&'a mut dyn SequenceType),
    Choice(&'a mut dyn ChoiceType),
    Array(&'a mut dyn ArrayType),
    Enumeration(&'a mut dyn EnumerationType),
    Nullable(&'a mut dyn NullableType),
    Customized(&'a mut dyn CustomizedType),
    /// The value cannot be populated (for example an encode-only proxy)
    Immutable,
}

impl ValueMut<'_> {
    /// Get the category this view resolves to, `None` for [`ValueMut::Immutable`]
    pub fn category(&self) -> Option<TypeCategory> {
        match self {
            ValueMut::Simple(scalar) => Some(TypeCategory::Simple(scalar.kind())),
            ValueMut::Sequence(_) => Some(TypeCategory::Sequence),
            ValueMut::Choice(_) => Some(TypeCategory::Choice),
            ValueMut::Array(_) => Some(TypeCategory::Array),
            ValueMut::Enumeration(_) => Some(TypeCategory::Enumeration),
            ValueMut::Nullable(_) => Some(TypeCategory::NullableValue),
            ValueMut::Customized(_) => Some(TypeCategory::CustomizedType),
            ValueMut::Immutable => None,
        }
    }
}
