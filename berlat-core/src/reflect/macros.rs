//! Declarative helpers implementing the reflection protocol for user types

/// Implement [`Reflect`](crate::reflect::Reflect) and
/// [`SequenceType`](crate::reflect::SequenceType) for a struct
///
/// Each line names a field, its attribute id, its attribute name and an
/// optional formatting mode. Attributes are encoded in the order listed.
///
/// ```
/// use berlat_core::impl_sequence;
/// use berlat_core::reflect::FormattingMode;
///
/// #[derive(Default)]
/// struct Employee {
///     name: String,
///     age: i32,
///     badge: Vec<u8>,
/// }
///
/// impl_sequence!(Employee {
///     name: 1, "name";
///     age: 2, "age";
///     badge: 3, "badge", FormattingMode::HEX;
/// });
/// ```
#[macro_export]
macro_rules! impl_sequence {
    ($ty:ty { $($field:ident : $id:literal, $name:literal $(, $mode:expr)?);* $(;)? }) => {
        impl $crate::reflect::Reflect for $ty {
            fn category(&self) -> $crate::reflect::TypeCategory {
                $crate::reflect::TypeCategory::Sequence
            }

            fn value_ref(&self) -> $crate::reflect::ValueRef<'_> {
                $crate::reflect::ValueRef::Sequence(self)
            }

            fn value_mut(&mut self) -> $crate::reflect::ValueMut<'_> {
                $crate::reflect::ValueMut::Sequence(self)
            }
        }

        impl $crate::reflect::SequenceType for $ty {
            fn attribute_infos(&self) -> &[$crate::reflect::AttributeInfo] {
                const ATTRIBUTES: &[$crate::reflect::AttributeInfo] = &[
                    $(
                        $crate::reflect::AttributeInfo::new($id, $name)
                            $(.with_formatting_mode($mode))?
                    ),*
                ];
                ATTRIBUTES
            }

            fn access_attribute(
                &self,
                id: i32,
                visitor: &mut $crate::reflect::Visitor<'_>,
            ) -> bool {
                match id {
                    $($id => visitor(&self.$field),)*
                    _ => return false,
                }
                true
            }

            fn manipulate_attribute(
                &mut self,
                id: i32,
                manipulator: &mut $crate::reflect::Manipulator<'_>,
            ) -> bool {
                match id {
                    $($id => manipulator(&mut self.$field),)*
                    _ => return false,
                }
                true
            }
        }
    };
}

/// Implement [`Reflect`](crate::reflect::Reflect) and
/// [`EnumerationType`](crate::reflect::EnumerationType) for a fieldless enum
///
/// ```
/// use berlat_core::impl_enumeration;
///
/// #[derive(Default)]
/// enum Color {
///     #[default]
///     Red,
///     Blue,
/// }
///
/// impl_enumeration!(Color {
///     Red = 0 => "RED",
///     Blue = 2 => "BLUE",
/// });
/// ```
#[macro_export]
macro_rules! impl_enumeration {
    ($ty:ident { $($variant:ident = $value:literal => $name:literal),* $(,)? }) => {
        impl $crate::reflect::Reflect for $ty {
            fn category(&self) -> $crate::reflect::TypeCategory {
                $crate::reflect::TypeCategory::Enumeration
            }

            fn value_ref(&self) -> $crate::reflect::ValueRef<'_> {
                $crate::reflect::ValueRef::Enumeration(self)
            }

            fn value_mut(&mut self) -> $crate::reflect::ValueMut<'_> {
                $crate::reflect::ValueMut::Enumeration(self)
            }
        }

        impl $crate::reflect::EnumerationType for $ty {
            fn enumerators(&self) -> &[$crate::reflect::EnumeratorInfo] {
                const ENUMERATORS: &[$crate::reflect::EnumeratorInfo] = &[
                    $($crate::reflect::EnumeratorInfo::new($value, $name)),*
                ];
                ENUMERATORS
            }

            fn to_int(&self) -> i32 {
                match self {
                    $($ty::$variant => $value,)*
                }
            }

            fn from_int(&mut self, value: i32) -> $crate::error::BerResult<()> {
                *self = match value {
                    $($value => $ty::$variant,)*
                    _ => {
                        return Err($crate::error::BerError::UnknownEnumerator(
                            value.to_string(),
                        ))
                    }
                };
                Ok(())
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::reflect::{
        EnumerationType, FormattingMode, Reflect, ScalarRef, SequenceType, TypeCategory,
        ValueRef,
    };

    #[derive(Debug, Default, PartialEq)]
    struct Account {
        owner: String,
        balance: i64,
        tags: Vec<String>,
    }

    crate::impl_sequence!(Account {
        owner: 1, "owner";
        balance: 4, "balance", FormattingMode::DEC;
        tags: 7, "tags";
    });

    #[derive(Debug, Default, Clone, Copy, PartialEq)]
    enum Status {
        #[default]
        Open,
        Closed,
    }

    crate::impl_enumeration!(Status {
        Open = 1 => "OPEN",
        Closed = -3 => "CLOSED",
    });

    #[test]
    fn test_sequence_metadata_in_declaration_order() {
        let account = Account::default();
        let ids: Vec<i32> = account.attribute_infos().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 4, 7]);
        assert_eq!(
            account.lookup_attribute(4).unwrap().formatting_mode,
            FormattingMode::DEC
        );
        assert_eq!(account.lookup_attribute_by_name("tags").unwrap().id, 7);
        assert!(account.lookup_attribute(2).is_none());
    }

    #[test]
    fn test_sequence_access_and_manipulate() {
        let mut account = Account {
            owner: "Ann".to_string(),
            ..Default::default()
        };

        let mut seen = None;
        assert!(account.access_attribute(1, &mut |value| {
            if let ValueRef::Simple(ScalarRef::String(s)) = value.value_ref() {
                seen = Some(s.to_string());
            }
        }));
        assert_eq!(seen.as_deref(), Some("Ann"));

        assert!(account.manipulate_attribute(4, &mut |value| {
            if let crate::reflect::ValueMut::Simple(crate::reflect::ScalarMut::I64(v)) =
                value.value_mut()
            {
                *v = 99;
            }
        }));
        assert_eq!(account.balance, 99);
        assert!(!account.access_attribute(5, &mut |_| {}));
        assert_eq!(account.category(), TypeCategory::Sequence);
    }

    #[test]
    fn test_enumeration_conversions() {
        let mut status = Status::Open;
        assert_eq!(status.to_int(), 1);
        assert_eq!(status.to_str(), Some("OPEN"));

        status.from_str("CLOSED").unwrap();
        assert_eq!(status, Status::Closed);
        assert_eq!(status.to_int(), -3);

        assert!(status.from_int(42).is_err());
        assert!(status.from_str("UNKNOWN").is_err());
        assert_eq!(status, Status::Closed);
    }
}
