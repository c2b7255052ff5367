//! Type-category reflection protocol
//!
//! The codec never sees concrete Rust types. It asks each value for its
//! [`TypeCategory`] and walks it through the category traits:
//!
//! | category        | trait               | typical Rust type          |
//! |-----------------|---------------------|----------------------------|
//! | Simple          | (scalar views)      | `i32`, `String`, `Vec<u8>` |
//! | Sequence        | [`SequenceType`]    | struct                     |
//! | Choice          | [`ChoiceType`]      | enum with payloads         |
//! | Array           | [`ArrayType`]       | `Vec<T>`                   |
//! | Enumeration     | [`EnumerationType`] | fieldless enum             |
//! | NullableValue   | [`NullableType`]    | `Option<T>`                |
//! | CustomizedType  | [`CustomizedType`]  | newtype with constraints   |
//!
//! Static types implement [`Reflect`] directly; the runtime-erased path is
//! [`ObjectProxy`](crate::proxy::ObjectProxy).

pub mod category;
pub mod formatting_mode;
pub mod impls;
pub mod info;
pub mod macros;
pub mod traits;
pub mod value;

pub use category::{SimpleKind, TypeCategory};
pub use formatting_mode::{BaseMode, FormattingMode};
pub use info::{AttributeInfo, EnumeratorInfo, SelectionInfo, UNDEFINED_SELECTION_ID};
pub use traits::{
    ArrayType, ChoiceType, CustomizedType, EnumerationType, Manipulator, NullableType,
    Reflect, SequenceType, Visitor,
};
pub use value::{ScalarMut, ScalarRef, ValueMut, ValueRef};
