//! Runtime-erased reflection
//!
//! [`ObjectProxy`] describes a value through boxed closures instead of trait
//! impls on the value's type. It is useful when the shape of the data is only
//! known at runtime, or when a type cannot implement [`Reflect`] itself.
//!
//! # Usage Example
//!
//! ```rust
//! use berlat_core::proxy::ObjectProxy;
//! use berlat_core::reflect::{AttributeInfo, ScalarRef};
//!
//! let name = String::from("Bob");
//! let age = 56i32;
//! let proxy = ObjectProxy::sequence(
//!     vec![AttributeInfo::new(1, "name"), AttributeInfo::new(2, "age")],
//!     |id, visit| match id {
//!         1 => {
//!             visit(&ObjectProxy::simple(ScalarRef::String(&name)));
//!             true
//!         }
//!         2 => {
//!             visit(&age);
//!             true
//!         }
//!         _ => false,
//!     },
//! );
//! ```
//!
//! A proxy built with an encode constructor reports
//! [`ValueMut::Immutable`] when asked for a mutable view; the `*_mut`
//! constructors build proxies a decoder can populate.

use crate::error::{BerError, BerResult};
use crate::reflect::{
    ArrayType, AttributeInfo, ChoiceType, EnumerationType, EnumeratorInfo, Manipulator,
    NullableType, Reflect, ScalarMut, ScalarRef, SelectionInfo, SequenceType, TypeCategory,
    UNDEFINED_SELECTION_ID, ValueMut, ValueRef, Visitor,
};

type AccessFn<'a, K> = Box<dyn Fn(K, &mut Visitor<'_>) -> bool + 'a>;
type ManipulateFn<'a, K> = Box<dyn FnMut(K, &mut Manipulator<'_>) -> bool + 'a>;

/// Edit requested on a decode-side array proxy
pub enum ArrayEdit<'e, 'm> {
    Resize(usize),
    Element(usize, &'e mut Manipulator<'m>),
}

/// Edit requested on a decode-side nullable proxy
pub enum NullableEdit<'e, 'm> {
    MakeValue,
    Reset,
    Value(&'e mut Manipulator<'m>),
}

/// Sequence metadata and attribute accessors
pub struct SequenceInfo<'a> {
    attributes: Vec<AttributeInfo>,
    access: Option<AccessFn<'a, i32>>,
    manipulate: Option<ManipulateFn<'a, i32>>,
}

impl SequenceType for SequenceInfo<'_> {
    fn attribute_infos(&self) -> &[AttributeInfo] {
        &self.attributes
    }

    fn access_attribute(&self, id: i32, visitor: &mut Visitor<'_>) -> bool {
        self.access.as_ref().is_some_and(|access| access(id, visitor))
    }

    fn manipulate_attribute(&mut self, id: i32, manipulator: &mut Manipulator<'_>) -> bool {
        self.manipulate
            .as_mut()
            .is_some_and(|manipulate| manipulate(id, manipulator))
    }
}

pub struct ChoiceEncodeInfo<'a> {
    selections: Vec<SelectionInfo>,
    selection_id: i32,
    access: Box<dyn Fn(&mut Visitor<'_>) -> bool + 'a>,
}

impl ChoiceType for ChoiceEncodeInfo<'_> {
    fn selection_infos(&self) -> &[SelectionInfo] {
        &self.selections
    }

    fn selection_id(&self) -> i32 {
        self.selection_id
    }

    fn access_selection(&self, visitor: &mut Visitor<'_>) -> bool {
        self.selection_id != UNDEFINED_SELECTION_ID && (self.access)(visitor)
    }

    fn make_selection(&mut self, _id: i32) -> BerResult<()> {
        Err(BerError::InvalidValue("choice proxy is read-only".to_string()))
    }

    fn manipulate_selection(&mut self, _manipulator: &mut Manipulator<'_>) -> bool {
        false
    }
}

/// Decode-side choice
///
/// The `select` closure makes the given id the current selection (keeping
/// the current value if it already is) and runs the manipulator on it.
pub struct ChoiceDecodeInfo<'a> {
    selections: Vec<SelectionInfo>,
    selection_id: i32,
    select: Box<dyn FnMut(i32, &mut Manipulator<'_>) -> BerResult<()> + 'a>,
}

impl ChoiceType for ChoiceDecodeInfo<'_> {
    fn selection_infos(&self) -> &[SelectionInfo] {
        &self.selections
    }

    fn selection_id(&self) -> i32 {
        self.selection_id
    }

    fn access_selection(&self, _visitor: &mut Visitor<'_>) -> bool {
        false
    }

    fn make_selection(&mut self, id: i32) -> BerResult<()> {
        if id != UNDEFINED_SELECTION_ID && self.lookup_selection(id).is_none() {
            return Err(BerError::UnknownSelection(id));
        }
        (self.select)(id, &mut |_| {})?;
        self.selection_id = id;
        Ok(())
    }

    fn manipulate_selection(&mut self, manipulator: &mut Manipulator<'_>) -> bool {
        self.selection_id != UNDEFINED_SELECTION_ID
            && (self.select)(self.selection_id, manipulator).is_ok()
    }
}

pub struct ArrayEncodeInfo<'a> {
    len: usize,
    access: AccessFn<'a, usize>,
}

impl ArrayType for ArrayEncodeInfo<'_> {
    fn len(&self) -> usize {
        self.len
    }

    fn access_element(&self, index: usize, visitor: &mut Visitor<'_>) -> bool {
        index < self.len && (self.access)(index, visitor)
    }

    fn resize(&mut self, _len: usize) {}

    fn manipulate_element(&mut self, _index: usize, _manipulator: &mut Manipulator<'_>) -> bool {
        false
    }
}

pub struct ArrayDecodeInfo<'a> {
    len: usize,
    edit: Box<dyn FnMut(ArrayEdit<'_, '_>) -> bool + 'a>,
}

impl ArrayType for ArrayDecodeInfo<'_> {
    fn len(&self) -> usize {
        self.len
    }

    fn access_element(&self, _index: usize, _visitor: &mut Visitor<'_>) -> bool {
        false
    }

    fn resize(&mut self, len: usize) {
        if (self.edit)(ArrayEdit::Resize(len)) {
            self.len = len;
        }
    }

    fn manipulate_element(&mut self, index: usize, manipulator: &mut Manipulator<'_>) -> bool {
        index < self.len && (self.edit)(ArrayEdit::Element(index, manipulator))
    }
}

pub struct EnumEncodeInfo {
    enumerators: Vec<EnumeratorInfo>,
    value: i32,
}

impl EnumerationType for EnumEncodeInfo {
    fn enumerators(&self) -> &[EnumeratorInfo] {
        &self.enumerators
    }

    fn to_int(&self) -> i32 {
        self.value
    }

    fn from_int(&mut self, _value: i32) -> BerResult<()> {
        Err(BerError::InvalidValue("enumeration proxy is read-only".to_string()))
    }
}

pub struct EnumDecodeInfo<'a> {
    enumerators: Vec<EnumeratorInfo>,
    value: i32,
    load: Box<dyn FnMut(i32) -> BerResult<()> + 'a>,
}

impl EnumerationType for EnumDecodeInfo<'_> {
    fn enumerators(&self) -> &[EnumeratorInfo] {
        &self.enumerators
    }

    fn to_int(&self) -> i32 {
        self.value
    }

    fn from_int(&mut self, value: i32) -> BerResult<()> {
        if !self.enumerators.iter().any(|e| e.value == value) {
            return Err(BerError::UnknownEnumerator(value.to_string()));
        }
        (self.load)(value)?;
        self.value = value;
        Ok(())
    }
}

pub struct NullableEncodeInfo<'a> {
    value: Option<Box<ObjectProxy<'a>>>,
}

impl NullableType for NullableEncodeInfo<'_> {
    fn is_null(&self) -> bool {
        self.value.is_none()
    }

    fn access_value(&self, visitor: &mut Visitor<'_>) -> bool {
        match &self.value {
            Some(value) => {
                visitor(&**value);
                true
            }
            None => false,
        }
    }

    fn make_value(&mut self) {}

    fn reset(&mut self) {}

    fn manipulate_value(&mut self, _manipulator: &mut Manipulator<'_>) -> bool {
        false
    }
}

pub struct NullableDecodeInfo<'a> {
    is_null: bool,
    edit: Box<dyn FnMut(NullableEdit<'_, '_>) -> bool + 'a>,
}

impl NullableType for NullableDecodeInfo<'_> {
    fn is_null(&self) -> bool {
        self.is_null
    }

    fn access_value(&self, _visitor: &mut Visitor<'_>) -> bool {
        false
    }

    fn make_value(&mut self) {
        if (self.edit)(NullableEdit::MakeValue) {
            self.is_null = false;
        }
    }

    fn reset(&mut self) {
        if (self.edit)(NullableEdit::Reset) {
            self.is_null = true;
        }
    }

    fn manipulate_value(&mut self, manipulator: &mut Manipulator<'_>) -> bool {
        !self.is_null && (self.edit)(NullableEdit::Value(manipulator))
    }
}

/// Shape-specific metadata held by an [`ObjectProxy`]
pub enum ObjectInfo<'a> {
    Simple(ScalarRef<'a>),
    SimpleMut(ScalarMut<'a>),
    Sequence(SequenceInfo<'a>),
    ChoiceEncode(ChoiceEncodeInfo<'a>),
    ChoiceDecode(ChoiceDecodeInfo<'a>),
    ArrayEncode(ArrayEncodeInfo<'a>),
    ArrayDecode(ArrayDecodeInfo<'a>),
    EnumEncode(EnumEncodeInfo),
    EnumDecode(EnumDecodeInfo<'a>),
    NullableEncode(NullableEncodeInfo<'a>),
    NullableDecode(NullableDecodeInfo<'a>),
}

/// A value described by closures
pub struct ObjectProxy<'a> {
    info: ObjectInfo<'a>,
}

impl<'a> ObjectProxy<'a> {
    pub fn simple(value: ScalarRef<'a>) -> Self {
        Self::from_info(ObjectInfo::Simple(value))
    }

    pub fn simple_mut(value: ScalarMut<'a>) -> Self {
        Self::from_info(ObjectInfo::SimpleMut(value))
    }

    /// Encode-side sequence
    ///
    /// `access(id, visitor)` invokes the visitor on attribute `id` and
    /// returns `false` for an unknown id.
    pub fn sequence<F>(attributes: Vec<AttributeInfo>, access: F) -> Self
    where
        F: Fn(i32, &mut Visitor<'_>) -> bool + 'a,
    {
        Self::from_info(ObjectInfo::Sequence(SequenceInfo {
            attributes,
            access: Some(Box::new(access)),
            manipulate: None,
        }))
    }

    /// Decode-side sequence
    pub fn sequence_mut<F>(attributes: Vec<AttributeInfo>, manipulate: F) -> Self
    where
        F: FnMut(i32, &mut Manipulator<'_>) -> bool + 'a,
    {
        Self::from_info(ObjectInfo::Sequence(SequenceInfo {
            attributes,
            access: None,
            manipulate: Some(Box::new(manipulate)),
        }))
    }

    /// Encode-side choice currently holding `selection_id`
    pub fn choice<F>(selections: Vec<SelectionInfo>, selection_id: i32, access: F) -> Self
    where
        F: Fn(&mut Visitor<'_>) -> bool + 'a,
    {
        Self::from_info(ObjectInfo::ChoiceEncode(ChoiceEncodeInfo {
            selections,
            selection_id,
            access: Box::new(access),
        }))
    }

    /// Decode-side choice
    pub fn choice_mut<F>(selections: Vec<SelectionInfo>, select: F) -> Self
    where
        F: FnMut(i32, &mut Manipulator<'_>) -> BerResult<()> + 'a,
    {
        Self::from_info(ObjectInfo::ChoiceDecode(ChoiceDecodeInfo {
            selections,
            selection_id: UNDEFINED_SELECTION_ID,
            select: Box::new(select),
        }))
    }

    pub fn array<F>(len: usize, access: F) -> Self
    where
        F: Fn(usize, &mut Visitor<'_>) -> bool + 'a,
    {
        Self::from_info(ObjectInfo::ArrayEncode(ArrayEncodeInfo {
            len,
            access: Box::new(access),
        }))
    }

    /// Decode-side array currently holding `len` elements
    pub fn array_mut<F>(len: usize, edit: F) -> Self
    where
        F: FnMut(ArrayEdit<'_, '_>) -> bool + 'a,
    {
        Self::from_info(ObjectInfo::ArrayDecode(ArrayDecodeInfo {
            len,
            edit: Box::new(edit),
        }))
    }

    pub fn enumeration(enumerators: Vec<EnumeratorInfo>, value: i32) -> Self {
        Self::from_info(ObjectInfo::EnumEncode(EnumEncodeInfo { enumerators, value }))
    }

    pub fn enumeration_mut<F>(enumerators: Vec<EnumeratorInfo>, value: i32, load: F) -> Self
    where
        F: FnMut(i32) -> BerResult<()> + 'a,
    {
        Self::from_info(ObjectInfo::EnumDecode(EnumDecodeInfo {
            enumerators,
            value,
            load: Box::new(load),
        }))
    }

    pub fn nullable(value: Option<ObjectProxy<'a>>) -> Self {
        Self::from_info(ObjectInfo::NullableEncode(NullableEncodeInfo {
            value: value.map(Box::new),
        }))
    }

    pub fn nullable_mut<F>(is_null: bool, edit: F) -> Self
    where
        F: FnMut(NullableEdit<'_, '_>) -> bool + 'a,
    {
        Self::from_info(ObjectInfo::NullableDecode(NullableDecodeInfo {
            is_null,
            edit: Box::new(edit),
        }))
    }

    pub fn from_info(info: ObjectInfo<'a>) -> Self {
        Self { info }
    }

    pub fn info(&self) -> &ObjectInfo<'a> {
        &self.info
    }
}

impl Reflect for ObjectProxy<'_> {
    fn category(&self) -> TypeCategory {
        match &self.info {
            ObjectInfo::Simple(value) => TypeCategory::Simple(value.kind()),
            ObjectInfo::SimpleMut(value) => TypeCategory::Simple(value.kind()),
            ObjectInfo::Sequence(_) => TypeCategory::Sequence,
            ObjectInfo::ChoiceEncode(_) | ObjectInfo::ChoiceDecode(_) => TypeCategory::Choice,
            ObjectInfo::ArrayEncode(_) | ObjectInfo::ArrayDecode(_) => TypeCategory::Array,
            ObjectInfo::EnumEncode(_) | ObjectInfo::EnumDecode(_) => TypeCategory::Enumeration,
            ObjectInfo::NullableEncode(_) | ObjectInfo::NullableDecode(_) => {
                TypeCategory::NullableValue
            }
        }
    }

    fn value_ref(&self) -> ValueRef<'_> {
        match &self.info {
            ObjectInfo::Simple(value) => ValueRef::Simple(*value),
            ObjectInfo::SimpleMut(value) => ValueRef::Simple(value.to_ref()),
            ObjectInfo::Sequence(info) => ValueRef::Sequence(info),
            ObjectInfo::ChoiceEncode(info) => ValueRef::Choice(info),
            ObjectInfo::ChoiceDecode(info) => ValueRef::Choice(info),
            ObjectInfo::ArrayEncode(info) => ValueRef::Array(info),
            ObjectInfo::ArrayDecode(info) => ValueRef::Array(info),
            ObjectInfo::EnumEncode(info) => ValueRef::Enumeration(info),
            ObjectInfo::EnumDecode(info) => ValueRef::Enumeration(info),
            ObjectInfo::NullableEncode(info) => ValueRef::Nullable(info),
            ObjectInfo::NullableDecode(info) => ValueRef::Nullable(info),
        }
    }

    fn value_mut(&mut self) -> ValueMut<'_> {
        match &mut self.info {
            ObjectInfo::SimpleMut(value) => ValueMut::Simple(value.reborrow()),
            ObjectInfo::Sequence(info) if info.manipulate.is_some() => ValueMut::Sequence(info),
            ObjectInfo::ChoiceDecode(info) => ValueMut::Choice(info),
            ObjectInfo::ArrayDecode(info) => ValueMut::Array(info),
            ObjectInfo::EnumDecode(info) => ValueMut::Enumeration(info),
            ObjectInfo::NullableDecode(info) => ValueMut::Nullable(info),
            _ => ValueMut::Immutable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::SimpleKind;

    #[test]
    fn test_sequence_proxy_visits_attributes() {
        let name = String::from("Bob");
        let age = 56i32;
        let proxy = ObjectProxy::sequence(
            vec![AttributeInfo::new(1, "name"), AttributeInfo::new(2, "age")],
            |id, visit| match id {
                1 => {
                    visit(&ObjectProxy::simple(ScalarRef::String(&name)));
                    true
                }
                2 => {
                    visit(&age);
                    true
                }
                _ => false,
            },
        );

        assert_eq!(proxy.category(), TypeCategory::Sequence);
        let ValueRef::Sequence(sequence) = proxy.value_ref() else {
            panic!("expected sequence");
        };
        let mut kinds = Vec::new();
        for info in sequence.attribute_infos() {
            assert!(sequence.access_attribute(info.id, &mut |value| kinds.push(value.category())));
        }
        assert_eq!(
            kinds,
            vec![
                TypeCategory::Simple(SimpleKind::String),
                TypeCategory::Simple(SimpleKind::I32)
            ]
        );
        assert!(!sequence.access_attribute(3, &mut |_| {}));
    }

    #[test]
    fn test_encode_proxy_is_immutable() {
        let mut proxy = ObjectProxy::enumeration(vec![EnumeratorInfo::new(0, "ZERO")], 0);
        assert!(matches!(proxy.value_mut(), ValueMut::Immutable));
    }

    #[test]
    fn test_choice_decode_proxy_rejects_unknown_selection() {
        let mut selected = None;
        let mut proxy = ObjectProxy::choice_mut(
            vec![SelectionInfo::new(0, "count")],
            |id, _manipulator| {
                selected = Some(id);
                Ok(())
            },
        );

        let ValueMut::Choice(choice) = proxy.value_mut() else {
            panic!("expected choice");
        };
        assert_eq!(choice.make_selection(5), Err(BerError::UnknownSelection(5)));
        choice.make_selection(0).unwrap();
        assert_eq!(choice.selection_id(), 0);
        drop(proxy);
        assert_eq!(selected, Some(0));
    }

    #[test]
    fn test_array_decode_proxy_tracks_length() {
        let mut values: Vec<i16> = vec![1, 2, 3];
        {
            let mut proxy = ObjectProxy::array_mut(values.len(), |edit| match edit {
                ArrayEdit::Resize(len) => {
                    values.resize(len, 0);
                    true
                }
                ArrayEdit::Element(index, manipulator) => match values.get_mut(index) {
                    Some(value) => {
                        manipulator(value);
                        true
                    }
                    None => false,
                },
            });
            let ValueMut::Array(array) = proxy.value_mut() else {
                panic!("expected array");
            };
            array.resize(1);
            assert_eq!(array.len(), 1);
            assert!(array.manipulate_element(0, &mut |value| {
                if let ValueMut::Simple(ScalarMut::I16(v)) = value.value_mut() {
                    *v = 40;
                }
            }));
            assert!(!array.manipulate_element(1, &mut |_| {}));
        }
        assert_eq!(values, vec![40]);
    }
}
