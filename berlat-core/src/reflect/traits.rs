//! The reflection protocol
//!
//! A codec walks a value through [`Reflect`], which names the value's
//! [`TypeCategory`] and hands out a category specific view. Nested values are
//! reached through visitor closures so that implementations never need to
//! expose their storage.

use super::category::TypeCategory;
use super::info::{AttributeInfo, EnumeratorInfo, SelectionInfo, UNDEFINED_SELECTION_ID};
use super::value::{ValueMut, ValueRef};
use crate::error::{BerError, BerResult};

/// Visitor receiving a read-only nested value
pub type Visitor<'v> = dyn FnMut(&dyn Reflect) + 'v;

/// Visitor receiving a mutable nested value
pub type Manipulator<'v> = dyn FnMut(&mut dyn Reflect) + 'v;

/// A value the codec can encode and decode
///
/// # Implementing
/// Sequences and enumerations are usually implemented with
/// [`impl_sequence!`](crate::impl_sequence) and
/// [`impl_enumeration!`](crate::impl_enumeration). Choices, customized types
/// and dynamic types implement the trait by hand.
pub trait Reflect {
    /// Category of this value
    fn category(&self) -> TypeCategory;

    /// Read-only structural view
    fn value_ref(&self) -> ValueRef<'_>;

    /// Mutable structural view
    fn value_mut(&mut self) -> ValueMut<'_>;

    #[doc(hidden)]
    fn is_byte() -> bool
    where
        Self: Sized,
    {
        false
    }

    #[doc(hidden)]
    fn slice_as_bytes(slice: &[Self]) -> Option<&[u8]>
    where
        Self: Sized,
    {
        let _ = slice;
        None
    }

    #[doc(hidden)]
    fn vec_as_bytes_mut(vec: &mut Vec<Self>) -> Option<&mut Vec<u8>>
    where
        Self: Sized,
    {
        let _ = vec;
        None
    }
}

/// A record of attributes identified by id
pub trait SequenceType {
    /// Attribute metadata, in wire order
    fn attribute_infos(&self) -> &[AttributeInfo];

    /// Invoke `visitor` on the attribute with `id`
    ///
    /// Returns `false` if no such attribute exists.
    fn access_attribute(&self, id: i32, visitor: &mut Visitor<'_>) -> bool;

    /// Invoke `manipulator` on the attribute with `id`
    ///
    /// Returns `false` if no such attribute exists.
    fn manipulate_attribute(&mut self, id: i32, manipulator: &mut Manipulator<'_>) -> bool;

    /// Look up attribute metadata by id
    fn lookup_attribute(&self, id: i32) -> Option<AttributeInfo> {
        self.attribute_infos().iter().find(|info| info.id == id).copied()
    }

    /// Look up attribute metadata by name
    fn lookup_attribute_by_name(&self, name: &str) -> Option<AttributeInfo> {
        self.attribute_infos()
            .iter()
            .find(|info| info.name == name)
            .copied()
    }
}

/// A tagged union holding at most one selection
pub trait ChoiceType {
    fn selection_infos(&self) -> &[SelectionInfo];

    /// Id of the current selection, [`UNDEFINED_SELECTION_ID`] if none
    fn selection_id(&self) -> i32;

    /// Invoke `visitor` on the current selection
    ///
    /// Returns `false` if nothing is selected.
    fn access_selection(&self, visitor: &mut Visitor<'_>) -> bool;

    /// Make `id` the current selection with a default value
    ///
    /// [`UNDEFINED_SELECTION_ID`] clears the selection.
    fn make_selection(&mut self, id: i32) -> BerResult<()>;

    /// Invoke `manipulator` on the current selection
    fn manipulate_selection(&mut self, manipulator: &mut Manipulator<'_>) -> bool;

    fn lookup_selection(&self, id: i32) -> Option<SelectionInfo> {
        self.selection_infos().iter().find(|info| info.id == id).copied()
    }

    fn is_selected(&self) -> bool {
        self.selection_id() != UNDEFINED_SELECTION_ID
    }
}

/// A homogeneous, resizable sequence of elements
pub trait ArrayType {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn access_element(&self, index: usize, visitor: &mut Visitor<'_>) -> bool;

    /// Resize to `len` elements, filling with default values
    fn resize(&mut self, len: usize);

    fn manipulate_element(&mut self, index: usize, manipulator: &mut Manipulator<'_>) -> bool;
}

/// A closed set of named integer values
pub trait EnumerationType {
    fn enumerators(&self) -> &[EnumeratorInfo];

    fn to_int(&self) -> i32;

    fn from_int(&mut self, value: i32) -> BerResult<()>;

    fn to_str(&self) -> Option<&str> {
        let value = self.to_int();
        self.enumerators()
            .iter()
            .find(|e| e.value == value)
            .map(|e| e.name)
    }

    fn from_str(&mut self, name: &str) -> BerResult<()> {
        let value = self
            .enumerators()
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.value)
            .ok_or_else(|| BerError::UnknownEnumerator(name.to_string()))?;
        self.from_int(value)
    }
}

/// A value that may be absent
pub trait NullableType {
    fn is_null(&self) -> bool;

    /// Invoke `visitor` on the contained value; `false` if null
    fn access_value(&self, visitor: &mut Visitor<'_>) -> bool;

    /// Materialise a default value if currently null
    fn make_value(&mut self);

    fn reset(&mut self);

    fn manipulate_value(&mut self, manipulator: &mut Manipulator<'_>) -> bool;
}

/// A value that is represented on the wire by an underlying base value
pub trait CustomizedType {
    /// Invoke `visitor` on the base value
    fn access_base(&self, visitor: &mut Visitor<'_>);

    /// Populate a base value through `loader` and convert it into `self`
    ///
    /// Returns an error if the populated base value is rejected.
    fn load_base(&mut self, loader: &mut Manipulator<'_>) -> BerResult<()>;
}
