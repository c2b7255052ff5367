//! Reflection for standard library and chrono types

use super::category::{SimpleKind, TypeCategory};
use super::traits::{ArrayType, Manipulator, NullableType, Reflect, Visitor};
use super::value::{ScalarMut, ScalarRef, ValueMut, ValueRef};
use crate::datatypes::{DateTz, DatetimeTz, TimeTz};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

macro_rules! impl_simple {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn category(&self) -> TypeCategory {
                    TypeCategory::Simple(SimpleKind::$kind)
                }

                fn value_ref(&self) -> ValueRef<'_> {
                    ValueRef::Simple(ScalarRef::$kind(*self))
                }

                fn value_mut(&mut self) -> ValueMut<'_> {
                    ValueMut::Simple(ScalarMut::$kind(self))
                }
            }
        )*
    };
}

impl_simple!(
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    NaiveDate => Date,
    DateTz => DateTz,
    NaiveDateTime => Datetime,
    DatetimeTz => DatetimeTz,
    NaiveTime => Time,
    TimeTz => TimeTz,
);

// `u8` also marks `Vec<u8>` as an opaque byte sequence rather than an array.
impl Reflect for u8 {
    fn category(&self) -> TypeCategory {
        TypeCategory::Simple(SimpleKind::U8)
    }

    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Simple(ScalarRef::U8(*self))
    }

    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Simple(ScalarMut::U8(self))
    }

    fn is_byte() -> bool {
        true
    }

    fn slice_as_bytes(slice: &[u8]) -> Option<&[u8]> {
        Some(slice)
    }

    fn vec_as_bytes_mut(vec: &mut Vec<u8>) -> Option<&mut Vec<u8>> {
        Some(vec)
    }
}

impl Reflect for String {
    fn category(&self) -> TypeCategory {
        TypeCategory::Simple(SimpleKind::String)
    }

    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Simple(ScalarRef::String(self.as_str()))
    }

    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Simple(ScalarMut::String(self))
    }
}

impl<T: Reflect + Default> Reflect for Vec<T> {
    fn category(&self) -> TypeCategory {
        if T::is_byte() {
            TypeCategory::Simple(SimpleKind::Bytes)
        } else {
            TypeCategory::Array
        }
    }

    fn value_ref(&self) -> ValueRef<'_> {
        match T::slice_as_bytes(self) {
            Some(bytes) => ValueRef::Simple(ScalarRef::Bytes(bytes)),
            None => ValueRef::Array(self),
        }
    }

    fn value_mut(&mut self) -> ValueMut<'_> {
        if T::is_byte() {
            return T::vec_as_bytes_mut(self)
                .map_or(ValueMut::Immutable, |bytes| ValueMut::Simple(ScalarMut::Bytes(bytes)));
        }
        ValueMut::Array(self)
    }
}

impl<T: Reflect + Default> ArrayType for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn access_element(&self, index: usize, visitor: &mut Visitor<'_>) -> bool {
        match self.get(index) {
            Some(element) => {
                visitor(element);
                true
            }
            None => false,
        }
    }

    fn resize(&mut self, len: usize) {
        self.resize_with(len, T::default);
    }

    fn manipulate_element(&mut self, index: usize, manipulator: &mut Manipulator<'_>) -> bool {
        match self.get_mut(index) {
            Some(element) => {
                manipulator(element);
                true
            }
            None => false,
        }
    }
}

impl<T: Reflect + Default> Reflect for Option<T> {
    fn category(&self) -> TypeCategory {
        TypeCategory::NullableValue
    }

    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Nullable(self)
    }

    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Nullable(self)
    }
}

impl<T: Reflect + Default> NullableType for Option<T> {
    fn is_null(&self) -> bool {
        self.is_none()
    }

    fn access_value(&self, visitor: &mut Visitor<'_>) -> bool {
        match self {
            Some(value) => {
                visitor(value);
                true
            }
            None => false,
        }
    }

    fn make_value(&mut self) {
        self.get_or_insert_with(T::default);
    }

    fn reset(&mut self) {
        *self = None;
    }

    fn manipulate_value(&mut self, manipulator: &mut Manipulator<'_>) -> bool {
        match self {
            Some(value) => {
                manipulator(value);
                true
            }
            None => false,
        }
    }
}

impl<T: Reflect + ?Sized> Reflect for Box<T> {
    fn category(&self) -> TypeCategory {
        (**self).category()
    }

    fn value_ref(&self) -> ValueRef<'_> {
        (**self).value_ref()
    }

    fn value_mut(&mut self) -> ValueMut<'_> {
        (**self).value_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_vector_is_simple() {
        let bytes: Vec<u8> = vec![1, 2, 3];
        assert_eq!(bytes.category(), TypeCategory::Simple(SimpleKind::Bytes));
        match bytes.value_ref() {
            ValueRef::Simple(ScalarRef::Bytes(b)) => assert_eq!(b, &[1, 2, 3]),
            _ => panic!("expected bytes"),
        }
    }

    #[test]
    fn test_vector_is_array() {
        let mut values: Vec<i32> = vec![7, 8];
        assert_eq!(values.category(), TypeCategory::Array);
        match values.value_mut() {
            ValueMut::Array(array) => {
                array.resize(3);
                assert_eq!(array.len(), 3);
            }
            _ => panic!("expected array"),
        }
        assert_eq!(values, vec![7, 8, 0]);
    }

    #[test]
    fn test_option_make_value_and_reset() {
        let mut value: Option<String> = None;
        match value.value_mut() {
            ValueMut::Nullable(nullable) => {
                assert!(nullable.is_null());
                nullable.make_value();
                let visited = nullable.manipulate_value(&mut |inner| {
                    if let ValueMut::Simple(ScalarMut::String(s)) = inner.value_mut() {
                        s.push_str("set");
                    }
                });
                assert!(visited);
            }
            _ => panic!("expected nullable"),
        }
        assert_eq!(value.as_deref(), Some("set"));

        if let ValueMut::Nullable(nullable) = value.value_mut() {
            nullable.reset();
        }
        assert!(value.is_none());
    }

    #[test]
    fn test_views_report_their_category() {
        let mut values: Vec<Option<u16>> = vec![Some(1)];
        assert_eq!(values.value_ref().category(), TypeCategory::Array);
        assert!(values.value_ref().category().is_constructed());
        assert_eq!(values.value_mut().category(), Some(TypeCategory::Array));

        let mut slot: Option<u16> = None;
        assert_eq!(slot.value_ref().category(), TypeCategory::NullableValue);
        assert!(!slot.value_mut().category().unwrap().is_constructed());
        assert!(!TypeCategory::Simple(SimpleKind::Date).is_constructed());
    }

    #[test]
    fn test_box_is_transparent() {
        let boxed: Box<i64> = Box::new(-4);
        assert_eq!(boxed.category(), TypeCategory::Simple(SimpleKind::I64));
        assert!(matches!(boxed.value_ref(), ValueRef::Simple(ScalarRef::I64(-4))));
    }
}
