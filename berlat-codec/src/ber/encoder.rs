//! BER encoder for reflected values
//!
//! This module walks any [`Reflect`] value and writes it as X.690 Basic
//! Encoding Rules into a [`BufMut`] sink.
//!
//! # Usage Example
//!
//! ```rust
//! use berlat_codec::ber::BerEncoder;
//! use berlat_core::impl_sequence;
//!
//! #[derive(Default)]
//! struct Employee {
//!     name: String,
//!     age: i32,
//!     salary: f32,
//! }
//!
//! impl_sequence!(Employee {
//!     name: 1, "name";
//!     age: 2, "age";
//!     salary: 3, "salary";
//! });
//!
//! let bob = Employee { name: "Bob".into(), age: 56, salary: 1234.0 };
//! let mut encoder = BerEncoder::new();
//! let bytes = encoder.encode_to_vec(&bob).unwrap();
//! assert_eq!(bytes.len(), 18);
//! ```
//!
//! # Element Layout
//!
//! The root element carries a UNIVERSAL tag chosen by
//! [`try_select`](super::universal::try_select). Every nested element carries
//! a CONTEXT_SPECIFIC tag whose number is the attribute id, selection id or
//! array index. Sequences and choices always use the indefinite length form.

use super::diagnostics::{Diagnostics, ElementContext, ErrorSeverity};
use super::options::EncoderOptions;
use super::types::{
    BerLength, BerTagType, put_content, put_end_of_contents, put_identifier_octets, put_length,
};
use super::universal::{self, TagSelection, UniversalTagNumber};
use super::util;
use berlat_core::error::{BerError, BerResult};
use berlat_core::reflect::{
    ArrayType, BaseMode, ChoiceType, EnumerationType, NullableType, Reflect, ScalarRef,
    SequenceType, TypeCategory, ValueRef,
};
use bytes::BufMut;
use chrono::Timelike;

static DEFAULT_OPTIONS: EncoderOptions = EncoderOptions::new();

/// BER encoder
///
/// One instance may encode any number of values, one call at a time. The
/// severity and the message log describe the most recent call and are reset
/// when the next one starts.
///
/// # Error Handling
///
/// Problems with one element are logged and encoding continues with its
/// siblings, so the output reflects everything that could be encoded.
/// `encode` returns `Err` when the call ended with ERROR severity, and
/// `Ok` for SUCCESS and WARNING (for example text truncated at a control
/// character). A sink that runs out of space stops the call.
pub struct BerEncoder<'o> {
    options: &'o EncoderOptions,
    depth: usize,
    diagnostics: Diagnostics,
}

impl BerEncoder<'static> {
    /// Create an encoder with default options
    pub fn new() -> Self {
        Self::with_options(&DEFAULT_OPTIONS)
    }
}

impl Default for BerEncoder<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'o> BerEncoder<'o> {
    /// Create an encoder borrowing `options` for its lifetime
    ///
    /// # Arguments
    /// * `options` - Settings read by every call; the encoder never changes
    ///   them, so one value can back any number of encoders
    ///
    /// # Example
    /// ```rust
    /// use berlat_codec::ber::{BerEncoder, EncoderOptions};
    ///
    /// let options = EncoderOptions::new().with_encode_array_length_hint(true);
    /// let mut encoder = BerEncoder::with_options(&options);
    /// let bytes = encoder.encode_to_vec(&vec![7i32]).unwrap();
    /// assert_eq!(bytes, [0x30, 0x03, 0x80, 0x01, 0x07]);
    /// ```
    pub fn with_options(options: &'o EncoderOptions) -> Self {
        Self {
            options,
            depth: 0,
            diagnostics: Diagnostics::new("BER encoder"),
        }
    }

    /// Options this encoder was created with
    pub fn options(&self) -> &EncoderOptions {
        self.options
    }

    /// Severity reached by the last call
    pub fn error_severity(&self) -> ErrorSeverity {
        self.diagnostics.severity()
    }

    /// Messages logged by the last call, one per line
    pub fn logged_messages(&self) -> &str {
        self.diagnostics.messages()
    }

    /// Encode `value` into `sink`
    ///
    /// # Arguments
    /// * `sink` - Output buffer; bytes are appended as elements complete
    /// * `value` - Any reflected value. Its category and the formatting mode
    ///   of each attribute decide the tags and content
    ///
    /// # Returns
    /// `Ok(())` for SUCCESS and WARNING severity. On ERROR the sink may hold
    /// a partial encoding and the error carries the first logged message;
    /// [`logged_messages`](Self::logged_messages) has the rest.
    pub fn encode<B: BufMut, T: Reflect>(&mut self, sink: &mut B, value: &T) -> BerResult<()> {
        self.encode_any(sink, value)
    }

    /// Encode a value known only as a trait object, such as an
    /// [`ObjectProxy`](berlat_core::proxy::ObjectProxy)
    pub fn encode_any(&mut self, sink: &mut dyn BufMut, value: &dyn Reflect) -> BerResult<()> {
        self.diagnostics.reset();
        self.depth = 0;

        let context = ElementContext::root();
        if let Err(e) = self.encode_value(sink, value, context) {
            self.diagnostics.log_error(&context, &e.to_string());
        }

        match self.diagnostics.severity() {
            ErrorSeverity::Error => Err(BerError::Encoding(
                self.diagnostics
                    .first_error()
                    .unwrap_or("encoding failed")
                    .to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// Encode `value` into a new vector
    pub fn encode_to_vec<T: Reflect>(&mut self, value: &T) -> BerResult<Vec<u8>> {
        let mut output = Vec::new();
        self.encode(&mut output, value)?;
        Ok(output)
    }

    // `Err` from the functions below means the sink failed and the call
    // cannot continue. Everything else is logged.
    fn encode_value(
        &mut self,
        sink: &mut dyn BufMut,
        value: &dyn Reflect,
        context: ElementContext,
    ) -> BerResult<()> {
        let view = value.value_ref();
        if self.options.trace_level > 0 {
            log::trace!("BER encoder: {} as {} ({})", value.category(), view.category(), context);
        }

        match view {
            ValueRef::Simple(scalar) => self.encode_simple(sink, scalar, &context),
            ValueRef::Sequence(sequence) => self.encode_sequence(sink, sequence, &context),
            ValueRef::Choice(choice) => self.encode_choice(sink, choice, &context),
            ValueRef::Array(array) => self.encode_array(sink, array, &context),
            ValueRef::Enumeration(enumeration) => {
                self.encode_enumeration(sink, enumeration, &context)
            }
            ValueRef::Nullable(nullable) => self.encode_nullable(sink, nullable, context),
            ValueRef::Customized(customized) => {
                let mut result = Ok(());
                customized.access_base(&mut |base: &dyn Reflect| {
                    result = self.encode_value(sink, base, context);
                });
                result
            }
        }
    }

    fn enter(&mut self, context: &ElementContext) -> bool {
        if self.depth >= self.options.max_depth {
            self.diagnostics.log_error(
                context,
                &format!("Maximum depth {} exceeded", self.options.max_depth),
            );
            return false;
        }
        self.depth += 1;
        true
    }

    fn select_tag(&mut self, category: TypeCategory, context: &ElementContext) -> Option<TagSelection> {
        let selection = universal::try_select(category, context.mode, Some(self.options));
        if selection.is_none() {
            self.diagnostics.log_error(
                context,
                &format!("Formatting mode {:?} is not supported for {}", context.mode, category),
            );
        }
        selection
    }

    fn put_header(
        &self,
        sink: &mut dyn BufMut,
        context: &ElementContext,
        tag_type: BerTagType,
        universal: UniversalTagNumber,
        length: BerLength,
    ) -> BerResult<()> {
        let number = if context.is_root() {
            universal.number().unwrap_or_default()
        } else {
            context.number
        };
        put_identifier_octets(sink, context.class, tag_type, number)?;
        put_length(sink, length)
    }

    fn put_primitive(
        &self,
        sink: &mut dyn BufMut,
        context: &ElementContext,
        universal: UniversalTagNumber,
        content: &[u8],
    ) -> BerResult<()> {
        self.put_header(
            sink,
            context,
            BerTagType::Primitive,
            universal,
            BerLength::new(content.len()),
        )?;
        put_content(sink, content)
    }

    fn encode_sequence(
        &mut self,
        sink: &mut dyn BufMut,
        sequence: &dyn SequenceType,
        context: &ElementContext,
    ) -> BerResult<()> {
        if !self.enter(context) {
            return Ok(());
        }
        let result = self.encode_sequence_contents(sink, sequence, context);
        self.depth -= 1;
        result
    }

    fn encode_sequence_contents(
        &mut self,
        sink: &mut dyn BufMut,
        sequence: &dyn SequenceType,
        context: &ElementContext,
    ) -> BerResult<()> {
        self.put_header(
            sink,
            context,
            BerTagType::Constructed,
            UniversalTagNumber::Sequence,
            BerLength::Indefinite,
        )?;

        for info in sequence.attribute_infos() {
            let Some(attribute_context) = ElementContext::attribute(info) else {
                self.diagnostics.log_error(
                    context,
                    &format!("Attribute '{}' has negative id {}", info.name, info.id),
                );
                continue;
            };

            let mut result = Ok(());
            let found = sequence.access_attribute(info.id, &mut |attribute: &dyn Reflect| {
                if !self.options.encode_empty_arrays && is_empty_array(attribute) {
                    return;
                }
                result = self.encode_value(sink, attribute, attribute_context);
            });
            result?;

            if !found {
                self.diagnostics
                    .log_error(&attribute_context, "Attribute could not be accessed");
            }
        }

        put_end_of_contents(sink)
    }

    fn encode_choice(
        &mut self,
        sink: &mut dyn BufMut,
        choice: &dyn ChoiceType,
        context: &ElementContext,
    ) -> BerResult<()> {
        if !self.enter(context) {
            return Ok(());
        }
        let result = self.encode_choice_contents(sink, choice, context);
        self.depth -= 1;
        result
    }

    fn encode_choice_contents(
        &mut self,
        sink: &mut dyn BufMut,
        choice: &dyn ChoiceType,
        context: &ElementContext,
    ) -> BerResult<()> {
        self.put_header(
            sink,
            context,
            BerTagType::Constructed,
            UniversalTagNumber::Sequence,
            BerLength::Indefinite,
        )?;

        if choice.is_selected() {
            let id = choice.selection_id();
            match choice
                .lookup_selection(id)
                .and_then(|info| ElementContext::selection(&info))
            {
                Some(selection_context) => {
                    let mut result = Ok(());
                    let found = choice.access_selection(&mut |selection: &dyn Reflect| {
                        result = self.encode_value(sink, selection, selection_context);
                    });
                    result?;
                    if !found {
                        self.diagnostics
                            .log_error(&selection_context, "Selection could not be accessed");
                    }
                }
                None => {
                    self.diagnostics
                        .log_error(context, &format!("Unknown selection id {}", id));
                }
            }
        } else if self.options.disable_unselected_choice_encoding {
            self.diagnostics.log_error(context, "Choice has no selection");
        }

        put_end_of_contents(sink)
    }

    fn encode_array(
        &mut self,
        sink: &mut dyn BufMut,
        array: &dyn ArrayType,
        context: &ElementContext,
    ) -> BerResult<()> {
        if !self.enter(context) {
            return Ok(());
        }
        let result = if self.options.encode_array_length_hint {
            self.encode_array_with_length(sink, array, context)
        } else {
            self.encode_array_indefinite(sink, array, context)
        };
        self.depth -= 1;
        result
    }

    fn encode_array_with_length(
        &mut self,
        sink: &mut dyn BufMut,
        array: &dyn ArrayType,
        context: &ElementContext,
    ) -> BerResult<()> {
        let mut elements = Vec::new();
        self.encode_elements(&mut elements, array, context)?;
        self.put_header(
            sink,
            context,
            BerTagType::Constructed,
            UniversalTagNumber::Sequence,
            BerLength::new(elements.len()),
        )?;
        put_content(sink, &elements)
    }

    fn encode_array_indefinite(
        &mut self,
        sink: &mut dyn BufMut,
        array: &dyn ArrayType,
        context: &ElementContext,
    ) -> BerResult<()> {
        self.put_header(
            sink,
            context,
            BerTagType::Constructed,
            UniversalTagNumber::Sequence,
            BerLength::Indefinite,
        )?;
        self.encode_elements(sink, array, context)?;
        put_end_of_contents(sink)
    }

    fn encode_elements(
        &mut self,
        sink: &mut dyn BufMut,
        array: &dyn ArrayType,
        context: &ElementContext,
    ) -> BerResult<()> {
        for index in 0..array.len() {
            let Some(element_context) = context.element(index) else {
                self.diagnostics
                    .log_error(context, &format!("Array index {} exceeds tag range", index));
                break;
            };

            let mut result = Ok(());
            array.access_element(index, &mut |element: &dyn Reflect| {
                result = self.encode_value(sink, element, element_context);
            });
            result?;
        }
        Ok(())
    }

    fn encode_nullable(
        &mut self,
        sink: &mut dyn BufMut,
        nullable: &dyn NullableType,
        context: ElementContext,
    ) -> BerResult<()> {
        if nullable.is_null() {
            // Keep the position of a null array element with an empty
            // constructed placeholder; elsewhere the element is absent.
            if context.index.is_some() {
                put_identifier_octets(sink, context.class, BerTagType::Constructed, context.number)?;
                put_length(sink, BerLength::new(0))?;
            }
            return Ok(());
        }

        let mut result = Ok(());
        nullable.access_value(&mut |value: &dyn Reflect| {
            result = self.encode_value(sink, value, context);
        });
        result
    }

    fn encode_enumeration(
        &mut self,
        sink: &mut dyn BufMut,
        enumeration: &dyn EnumerationType,
        context: &ElementContext,
    ) -> BerResult<()> {
        let Some(selection) = self.select_tag(TypeCategory::Enumeration, context) else {
            return Ok(());
        };

        let content = if context.mode.base() == BaseMode::Text {
            match enumeration.to_str() {
                Some(name) => self.sanitize_text(name.as_bytes(), context),
                None => {
                    self.diagnostics.log_error(
                        context,
                        &format!("Enumerator value {} has no name", enumeration.to_int()),
                    );
                    return Ok(());
                }
            }
        } else {
            util::encode_signed(i64::from(enumeration.to_int()))
        };

        self.put_primitive(sink, context, selection.tag, &content)
    }

    fn encode_simple(
        &mut self,
        sink: &mut dyn BufMut,
        scalar: ScalarRef<'_>,
        context: &ElementContext,
    ) -> BerResult<()> {
        let Some(selection) = self.select_tag(TypeCategory::Simple(scalar.kind()), context) else {
            return Ok(());
        };
        let content = self.render_scalar(scalar, selection.tag, context);
        self.put_primitive(sink, context, selection.tag, &content)
    }

    fn render_scalar(
        &mut self,
        scalar: ScalarRef<'_>,
        tag: UniversalTagNumber,
        context: &ElementContext,
    ) -> Vec<u8> {
        let as_text = tag == UniversalTagNumber::Utf8String;
        let binary = tag == UniversalTagNumber::OctetString;
        let precision = self.options.datetime_fractional_second_precision;
        let preserve_negative_zero = self.options.preserve_sign_of_negative_zero;

        match scalar {
            ScalarRef::Bool(v) => util::encode_bool(v),
            ScalarRef::I8(v) if as_text => self.sanitize_text(&v.to_be_bytes(), context),
            ScalarRef::I8(v) => util::encode_signed(i64::from(v)),
            ScalarRef::I16(v) => util::encode_signed(i64::from(v)),
            ScalarRef::I32(v) => util::encode_signed(i64::from(v)),
            ScalarRef::I64(v) => util::encode_signed(v),
            ScalarRef::U8(v) => util::encode_unsigned(u64::from(v)),
            ScalarRef::U16(v) => util::encode_unsigned(u64::from(v)),
            ScalarRef::U32(v) => util::encode_unsigned(u64::from(v)),
            ScalarRef::U64(v) => util::encode_unsigned(v),
            ScalarRef::F32(v) => util::encode_real(f64::from(v), preserve_negative_zero),
            ScalarRef::F64(v) => util::encode_real(v, preserve_negative_zero),
            ScalarRef::String(s) if as_text => self.sanitize_text(s.as_bytes(), context),
            ScalarRef::String(s) => s.as_bytes().to_vec(),
            ScalarRef::Bytes(b) if as_text => self.sanitize_text(b, context),
            ScalarRef::Bytes(b) => b.to_vec(),
            ScalarRef::Date(v) if binary => util::encode_date_binary(v),
            ScalarRef::DateTz(v) if binary => self.binary_temporal(
                util::encode_date_tz_binary(v),
                0,
                v.offset().local_minus_utc(),
                context,
            ),
            ScalarRef::Datetime(v) if binary => {
                self.binary_temporal(util::encode_datetime_binary(v), v.nanosecond(), 0, context)
            }
            ScalarRef::DatetimeTz(v) if binary => self.binary_temporal(
                util::encode_datetime_tz_binary(v),
                v.nanosecond(),
                v.offset().local_minus_utc(),
                context,
            ),
            ScalarRef::Time(v) if binary => {
                self.binary_temporal(util::encode_time_binary(v), v.nanosecond(), 0, context)
            }
            ScalarRef::TimeTz(v) if binary => self.binary_temporal(
                util::encode_time_tz_binary(v),
                v.time().nanosecond(),
                v.offset().local_minus_utc(),
                context,
            ),
            ScalarRef::Date(v) => util::format_date(v).into_bytes(),
            ScalarRef::DateTz(v) => util::format_date_tz(v).into_bytes(),
            ScalarRef::Datetime(v) => util::format_datetime(v, precision).into_bytes(),
            ScalarRef::DatetimeTz(v) => util::format_datetime_tz(v, precision).into_bytes(),
            ScalarRef::Time(v) => util::format_time(v).into_bytes(),
            ScalarRef::TimeTz(v) => util::format_time_tz(v).into_bytes(),
        }
    }

    /// Warn when binary content drops sub-millisecond digits or offset seconds
    fn binary_temporal(
        &mut self,
        content: Vec<u8>,
        nanos: u32,
        offset_seconds: i32,
        context: &ElementContext,
    ) -> Vec<u8> {
        if nanos % 1_000_000 != 0 || offset_seconds % 60 != 0 {
            self.diagnostics.log_warning(
                context,
                "Binary date/time keeps only milliseconds and whole-minute offsets",
            );
        }
        content
    }

    fn sanitize_text(&mut self, bytes: &[u8], context: &ElementContext) -> Vec<u8> {
        let (len, defect) = util::valid_text_prefix(bytes);
        if let Some(defect) = defect {
            self.diagnostics.log_warning(
                context,
                &format!("Text truncated from {} to {} bytes: {}", bytes.len(), len, defect),
            );
        }
        bytes[..len].to_vec()
    }
}

fn is_empty_array(value: &dyn Reflect) -> bool {
    matches!(value.value_ref(), ValueRef::Array(array) if array.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ber::testing::{
        BadMode, EmployeeRecord, Inventory, Level, MySequence, Node, Payload, ShortName, Tagged,
        Variant, bob, hex,
    };
    use berlat_core::proxy::ObjectProxy;
    use berlat_core::datatypes::{DateTz, TimeTz};
    use berlat_core::reflect::{AttributeInfo, ScalarRef};
    use chrono::{FixedOffset, NaiveDate, NaiveTime};

    #[test]
    fn test_encode_employee_record() {
        let mut encoder = BerEncoder::new();
        let bytes = encoder.encode_to_vec(&bob()).unwrap();

        assert_eq!(
            bytes,
            hex("30 80 81 03 42 6F 62 82 01 38 83 04 80 01 02 69 00 00")
        );
        assert_eq!(bytes.len(), 18);
        assert_eq!(encoder.error_severity(), ErrorSeverity::Success);
        assert_eq!(encoder.logged_messages(), "");
    }

    #[test]
    fn test_encode_is_deterministic() {
        let record = Inventory {
            items: vec![3, -1, 700],
            slots: vec![None, Some(4)],
            note: Some("spare".to_string()),
            records: vec![bob(), EmployeeRecord::default()],
        };
        let mut encoder = BerEncoder::new();
        let first = encoder.encode_to_vec(&record).unwrap();
        let second = encoder.encode_to_vec(&record).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_encode_unselected_choice() {
        let mut encoder = BerEncoder::new();
        assert_eq!(
            encoder.encode_to_vec(&Payload::Unselected).unwrap(),
            hex("30 80 00 00")
        );

        let options = EncoderOptions::new().with_disable_unselected_choice_encoding(true);
        let mut strict = BerEncoder::with_options(&options);
        assert!(strict.encode_to_vec(&Payload::Unselected).is_err());
        assert_eq!(strict.error_severity(), ErrorSeverity::Error);
        assert!(strict.logged_messages().contains("Choice has no selection"));
    }

    #[test]
    fn test_encode_selected_choice() {
        let mut encoder = BerEncoder::new();
        assert_eq!(
            encoder.encode_to_vec(&Payload::Count(5)).unwrap(),
            hex("30 80 80 01 05 00 00")
        );
        assert_eq!(
            encoder.encode_to_vec(&Payload::Label("hi".to_string())).unwrap(),
            hex("30 80 81 02 68 69 00 00")
        );
        assert_eq!(
            encoder.encode_to_vec(&Payload::Record(bob())).unwrap(),
            hex("30 80 A2 80 81 03 42 6F 62 82 01 38 83 04 80 01 02 69 00 00 00 00")
        );
    }

    #[test]
    fn test_encode_truncates_text_with_warning() {
        let value = MySequence {
            attribute1: 0,
            attribute2: "ab\u{7F}cd".to_string(),
        };
        let mut encoder = BerEncoder::new();
        let bytes = encoder.encode_to_vec(&value).unwrap();

        assert_eq!(bytes, hex("30 80 80 01 00 81 02 61 62 00 00"));
        assert_eq!(encoder.error_severity(), ErrorSeverity::Warning);
        assert!(encoder.logged_messages().contains("truncated"));

        let value = MySequence {
            attribute1: 0,
            attribute2: "a\tb".to_string(),
        };
        encoder.encode_to_vec(&value).unwrap();
        assert_eq!(encoder.error_severity(), ErrorSeverity::Success);
    }

    #[test]
    fn test_encode_depth_guard() {
        let options = EncoderOptions::new().with_max_depth(4);
        let mut encoder = BerEncoder::with_options(&options);

        assert!(encoder.encode_to_vec(&Node::chain(4)).is_ok());
        let err = encoder.encode_to_vec(&Node::chain(5)).unwrap_err();
        assert!(matches!(err, BerError::Encoding(_)));
        assert_eq!(encoder.error_severity(), ErrorSeverity::Error);
        assert!(encoder.logged_messages().contains("Maximum depth 4 exceeded"));

        let mut encoder = BerEncoder::new();
        assert!(encoder.encode_to_vec(&Node::chain(1000)).is_err());
    }

    #[test]
    fn test_encode_array_length_forms() {
        let inventory = Inventory {
            items: vec![1, 2],
            ..Default::default()
        };

        let mut encoder = BerEncoder::new();
        assert_eq!(
            encoder.encode_to_vec(&inventory).unwrap(),
            hex("30 80 A0 80 80 01 01 81 01 02 00 00 A1 80 00 00 A3 80 00 00 00 00")
        );

        let options = EncoderOptions::new().with_encode_array_length_hint(true);
        let mut encoder = BerEncoder::with_options(&options);
        assert_eq!(
            encoder.encode_to_vec(&inventory).unwrap(),
            hex("30 80 A0 06 80 01 01 81 01 02 A1 00 A3 00 00 00")
        );

        let options = EncoderOptions::new().with_encode_empty_arrays(false);
        let mut encoder = BerEncoder::with_options(&options);
        assert_eq!(
            encoder.encode_to_vec(&inventory).unwrap(),
            hex("30 80 A0 80 80 01 01 81 01 02 00 00 00 00")
        );
    }

    #[test]
    fn test_encode_nullable_elements() {
        let inventory = Inventory {
            slots: vec![Some(7), None, Some(9)],
            note: Some("x".to_string()),
            ..Default::default()
        };
        let options = EncoderOptions::new().with_encode_empty_arrays(false);
        let mut encoder = BerEncoder::with_options(&options);
        assert_eq!(
            encoder.encode_to_vec(&inventory).unwrap(),
            hex("30 80 A1 80 80 01 07 A1 00 82 01 09 00 00 82 01 78 00 00")
        );
    }

    #[test]
    fn test_encode_any_through_proxy() {
        let record = bob();
        let proxy = ObjectProxy::sequence(
            vec![
                AttributeInfo::new(1, "name"),
                AttributeInfo::new(2, "age"),
                AttributeInfo::new(3, "salary"),
            ],
            |id, visit| {
                match id {
                    1 => visit(&ObjectProxy::simple(ScalarRef::String(&record.name))),
                    2 => visit(&record.age),
                    3 => visit(&ObjectProxy::simple(ScalarRef::F32(record.salary))),
                    _ => return false,
                }
                true
            },
        );

        let mut encoder = BerEncoder::new();
        let mut dynamic = Vec::new();
        encoder.encode_any(&mut dynamic, &proxy).unwrap();
        assert_eq!(dynamic, encoder.encode_to_vec(&record).unwrap());
    }

    #[test]
    fn test_encode_formatting_modes() {
        let value = Tagged {
            code: "A1".to_string(),
            raw: b"hi\x01".to_vec(),
            small: b'A' as i8,
            level: Level::High,
        };
        let mut encoder = BerEncoder::new();
        assert_eq!(
            encoder.encode_to_vec(&value).unwrap(),
            hex("30 80 80 02 41 31 81 02 68 69 82 01 41 83 04 48 49 47 48 00 00")
        );
        assert_eq!(encoder.error_severity(), ErrorSeverity::Warning);
    }

    #[test]
    fn test_encode_root_scalars() {
        let mut encoder = BerEncoder::new();
        assert_eq!(encoder.encode_to_vec(&56i32).unwrap(), hex("02 01 38"));
        assert_eq!(encoder.encode_to_vec(&true).unwrap(), hex("01 01 01"));
        assert_eq!(
            encoder.encode_to_vec(&"Bob".to_string()).unwrap(),
            hex("0C 03 42 6F 62")
        );
        assert_eq!(encoder.encode_to_vec(&vec![1u8, 2]).unwrap(), hex("04 02 01 02"));
        assert_eq!(encoder.encode_to_vec(&1.25f64).unwrap(), hex("09 03 80 FE 05"));
        assert_eq!(encoder.encode_to_vec(&Level::High).unwrap(), hex("0A 01 05"));
        assert_eq!(
            encoder.encode_to_vec(&u64::MAX).unwrap(),
            hex("02 09 00 FF FF FF FF FF FF FF FF")
        );

        let date = NaiveDate::from_ymd_opt(2021, 3, 4).unwrap();
        let mut expected = hex("1A 0A");
        expected.extend_from_slice(b"2021-03-04");
        assert_eq!(encoder.encode_to_vec(&date).unwrap(), expected);

        // A root array is written as a SEQUENCE.
        assert_eq!(
            encoder.encode_to_vec(&vec![5i32]).unwrap(),
            hex("30 80 80 01 05 00 00")
        );
    }

    #[test]
    fn test_encode_customized_and_dynamic() {
        let mut encoder = BerEncoder::new();
        let name = ShortName::new("abc").unwrap();
        assert_eq!(encoder.encode_to_vec(&name).unwrap(), hex("0C 03 61 62 63"));
        assert_eq!(
            encoder.encode_to_vec(&Variant::Text("x".to_string())).unwrap(),
            hex("0C 01 78")
        );
        assert_eq!(encoder.encode_to_vec(&Variant::Int(-2)).unwrap(), hex("02 01 FE"));
    }

    #[test]
    fn test_encode_unsupported_mode_is_error() {
        let mut encoder = BerEncoder::new();
        let err = encoder.encode_to_vec(&BadMode { value: 1, flag: true }).unwrap_err();
        assert!(err.to_string().contains("not supported"));
        // The remaining attribute is still written.
        assert!(encoder.logged_messages().lines().count() == 1);
    }

    #[test]
    fn test_encode_binary_date_and_time() {
        let options = EncoderOptions::new().with_encode_date_and_time_types_as_binary(true);
        let mut encoder = BerEncoder::with_options(&options);

        let date = NaiveDate::from_ymd_opt(2020, 5, 8).unwrap();
        assert_eq!(encoder.encode_to_vec(&date).unwrap(), hex("04 02 00 80"));
        let date = NaiveDate::from_ymd_opt(1, 1, 1).unwrap();
        assert_eq!(encoder.encode_to_vec(&date).unwrap(), hex("04 03 F4 BF 70"));

        let time = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap();
        assert_eq!(encoder.encode_to_vec(&time).unwrap(), hex("04 04 05 26 5B FF"));
        let zoned = TimeTz::new(time, FixedOffset::east_opt(1439 * 60).unwrap());
        assert_eq!(
            encoder.encode_to_vec(&zoned).unwrap(),
            hex("04 06 05 9F 05 26 5B FF")
        );
        assert_eq!(encoder.error_severity(), ErrorSeverity::Success);

        // Without the option the text form is kept.
        let mut text = hex("1A 0A");
        text.extend_from_slice(b"2020-05-08");
        let date = NaiveDate::from_ymd_opt(2020, 5, 8).unwrap();
        assert_eq!(BerEncoder::new().encode_to_vec(&date).unwrap(), text);
    }

    #[test]
    fn test_encode_binary_drops_sub_millisecond_with_warning() {
        let options = EncoderOptions::new().with_encode_date_and_time_types_as_binary(true);
        let mut encoder = BerEncoder::with_options(&options);

        let time = NaiveTime::from_hms_micro_opt(0, 0, 0, 127_500).unwrap();
        assert_eq!(encoder.encode_to_vec(&time).unwrap(), hex("04 01 7F"));
        assert_eq!(encoder.error_severity(), ErrorSeverity::Warning);
        assert!(encoder.logged_messages().contains("only milliseconds"));

        let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let odd = DateTz::new(date, FixedOffset::east_opt(90).unwrap());
        assert_eq!(encoder.encode_to_vec(&odd).unwrap(), hex("04 04 00 01 00 00"));
        assert_eq!(encoder.error_severity(), ErrorSeverity::Warning);
    }

    #[test]
    fn test_encode_negative_zero() {
        let mut encoder = BerEncoder::new();
        assert_eq!(encoder.encode_to_vec(&-0.0f64).unwrap(), hex("09 00"));

        let options = EncoderOptions::new().with_preserve_sign_of_negative_zero(true);
        let mut encoder = BerEncoder::with_options(&options);
        assert_eq!(encoder.encode_to_vec(&-0.0f64).unwrap(), hex("09 01 43"));
    }

    #[test]
    fn test_encode_sink_exhausted() {
        let mut buffer = [0u8; 4];
        let mut sink = &mut buffer[..];
        let mut encoder = BerEncoder::new();
        let err = encoder.encode(&mut sink, &bob()).unwrap_err();
        assert!(err.to_string().contains("Output buffer exhausted"));
        assert_eq!(encoder.error_severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_encode_state_resets_between_calls() {
        let mut encoder = BerEncoder::new();
        let _ = encoder.encode_to_vec(&BadMode { value: 1, flag: false });
        assert_eq!(encoder.error_severity(), ErrorSeverity::Error);

        encoder.encode_to_vec(&bob()).unwrap();
        assert_eq!(encoder.error_severity(), ErrorSeverity::Success);
        assert_eq!(encoder.logged_messages(), "");
    }

    #[test]
    fn test_trace_level_does_not_change_output() {
        let options = EncoderOptions::new().with_trace_level(1);
        let mut traced = BerEncoder::with_options(&options);
        let mut plain = BerEncoder::new();
        assert_eq!(
            traced.encode_to_vec(&bob()).unwrap(),
            plain.encode_to_vec(&bob()).unwrap()
        );
    }
}
