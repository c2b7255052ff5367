//! BER decoder for reflected values
//!
//! The decoder reads one element from a [`Buf`] and populates a [`Reflect`]
//! value through its mutable views. It is the mirror of
//! [`BerEncoder`](super::BerEncoder): anything the encoder writes with the
//! same formatting modes decodes back to an equal value.
//!
//! # Usage Example
//!
//! ```rust
//! use berlat_codec::ber::BerDecoder;
//!
//! let mut value = 0i32;
//! let mut decoder = BerDecoder::new();
//! decoder.decode(&[0x02u8, 0x01, 0x38][..], &mut value).unwrap();
//! assert_eq!(value, 56);
//! ```
//!
//! # Recovery
//!
//! Content problems (an out-of-range integer, an unknown enumerator, text
//! that does not parse) are logged and the element is left unchanged. A
//! malformed header loses the stream position: inside a definite-length
//! parent the decoder resumes after the parent, inside an indefinite-length
//! parent the whole subtree is abandoned.

use super::diagnostics::{Diagnostics, ElementContext, ErrorSeverity};
use super::options::DecoderOptions;
use super::reader::BerReader;
use super::types::{BerHeader, BerTagClass};
use super::universal::{self, TagSelection, UniversalTagNumber};
use super::util;
use berlat_core::error::{BerError, BerResult};
use berlat_core::reflect::{
    ArrayType, BaseMode, ChoiceType, EnumerationType, FormattingMode, NullableType, Reflect,
    ScalarMut, SequenceType, SimpleKind, TypeCategory, UNDEFINED_SELECTION_ID, ValueMut,
};
use bytes::Buf;

static DEFAULT_OPTIONS: DecoderOptions = DecoderOptions::new();

const SEQUENCE_TAG: TagSelection = TagSelection {
    tag: UniversalTagNumber::Sequence,
    alternate: None,
};

/// BER decoder
///
/// Like the encoder, an instance handles one call at a time and keeps the
/// severity, message log and counters of the most recent call.
pub struct BerDecoder<'o> {
    options: &'o DecoderOptions,
    depth: usize,
    diagnostics: Diagnostics,
    num_unknown_elements_skipped: usize,
    num_bytes_consumed: usize,
}

impl BerDecoder<'static> {
    /// Create a decoder with default options
    pub fn new() -> Self {
        Self::with_options(&DEFAULT_OPTIONS)
    }
}

impl Default for BerDecoder<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'o> BerDecoder<'o> {
    /// Create a decoder borrowing `options` for its lifetime
    ///
    /// # Arguments
    /// * `options` - Limits and tolerance settings. They are never changed by
    ///   a call and may be shared between decoders
    pub fn with_options(options: &'o DecoderOptions) -> Self {
        Self {
            options,
            depth: 0,
            diagnostics: Diagnostics::new("BER decoder"),
            num_unknown_elements_skipped: 0,
            num_bytes_consumed: 0,
        }
    }

    /// Options this decoder was created with
    pub fn options(&self) -> &DecoderOptions {
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

    /// Unknown elements skipped by the last call
    pub fn num_unknown_elements_skipped(&self) -> usize {
        self.num_unknown_elements_skipped
    }

    /// Bytes read from the source by the last call
    pub fn num_bytes_consumed(&self) -> usize {
        self.num_bytes_consumed
    }

    /// Decode one element from `source` into `value`
    ///
    /// # Returns
    /// `Ok(())` when the call ended with SUCCESS or WARNING severity,
    /// otherwise `BerError::Decoding` carrying the first logged error.
    /// Bytes after the element are left in the source.
    pub fn decode<B: Buf, T: Reflect>(&mut self, mut source: B, value: &mut T) -> BerResult<()> {
        self.decode_any(&mut source, value)
    }

    /// Decode into a value known only as a trait object
    ///
    /// This is the entry point for [`ObjectProxy`](berlat_core::proxy::ObjectProxy)
    /// targets. It behaves like [`decode`](Self::decode).
    ///
    /// # Arguments
    /// * `source` - Input positioned at an identifier octet; it is advanced
    ///   past the element, or as far as decoding got before the position was
    ///   lost
    /// * `value` - Target populated in place. Elements that fail to decode
    ///   keep their previous content
    ///
    /// # Error Handling
    /// Content problems are logged and decoding continues with the next
    /// sibling. Header problems stop the enclosing indefinite-length value.
    /// Either way the result is `Err` once anything reached ERROR severity.
    pub fn decode_any(&mut self, source: &mut dyn Buf, value: &mut dyn Reflect) -> BerResult<()> {
        self.diagnostics.reset();
        self.depth = 0;
        self.num_unknown_elements_skipped = 0;
        self.num_bytes_consumed = 0;

        let context = ElementContext::root();
        let mut reader = BerReader::new(source);
        let result = match BerHeader::read_from(&mut reader) {
            Ok(header) => self.decode_element(&mut reader, header, value, context),
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            self.diagnostics.log_error(&context, &e.to_string());
        }
        self.num_bytes_consumed = reader.num_bytes_consumed();

        match self.diagnostics.severity() {
            ErrorSeverity::Error => Err(BerError::Decoding(
                self.diagnostics
                    .first_error()
                    .unwrap_or("decoding failed")
                    .to_string(),
            )),
            _ => Ok(()),
        }
    }

    // As in the encoder, `Err` means the stream position is lost. The caller
    // that stops the propagation logs it.
    fn decode_element(
        &mut self,
        reader: &mut BerReader<'_>,
        header: BerHeader,
        value: &mut dyn Reflect,
        context: ElementContext,
    ) -> BerResult<()> {
        let declared = value.category();
        let view = value.value_mut();
        if self.options.trace_level > 0 {
            match view.category() {
                Some(resolved) => log::trace!(
                    "BER decoder: {} {} as {} ({})",
                    header.tag,
                    declared,
                    resolved,
                    context
                ),
                None => {
                    log::trace!("BER decoder: {} {} read-only ({})", header.tag, declared, context)
                }
            }
        }

        match view {
            ValueMut::Simple(scalar) => self.decode_simple(reader, header, scalar, &context),
            ValueMut::Sequence(sequence) => {
                self.decode_sequence(reader, header, sequence, &context)
            }
            ValueMut::Choice(choice) => self.decode_choice(reader, header, choice, &context),
            ValueMut::Array(array) => self.decode_array(reader, header, array, &context),
            ValueMut::Enumeration(enumeration) => {
                self.decode_enumeration(reader, header, enumeration, &context)
            }
            ValueMut::Nullable(nullable) => self.decode_nullable(reader, header, nullable, context),
            ValueMut::Customized(customized) => {
                let mut result = Ok(());
                let mut called = false;
                let loaded = customized.load_base(&mut |base: &mut dyn Reflect| {
                    called = true;
                    result = self.decode_element(reader, header, base, context);
                });
                result?;
                if !called {
                    self.skip_contents(reader, header)?;
                }
                if let Err(e) = loaded {
                    self.diagnostics.log_error(&context, &e.to_string());
                }
                Ok(())
            }
            ValueMut::Immutable => {
                self.diagnostics
                    .log_error(&context, "Value cannot be populated");
                self.skip_contents(reader, header)
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
        let selection = universal::try_select(category, context.mode, None);
        if selection.is_none() {
            self.diagnostics.log_error(
                context,
                &format!("Formatting mode {:?} is not supported for {}", context.mode, category),
            );
        }
        selection
    }

    /// Check an element's identifier; `false` means the element is skipped
    fn accept_header(
        &mut self,
        header: &BerHeader,
        context: &ElementContext,
        expected: TagSelection,
        category: TypeCategory,
    ) -> bool {
        let tag = header.tag;
        let constructed = category.is_constructed();
        if tag.is_constructed() != constructed {
            let form = if constructed { "constructed" } else { "primitive" };
            self.diagnostics
                .log_error(context, &format!("Expected {} element, found {}", form, tag));
            return false;
        }

        if context.is_root() {
            let number = UniversalTagNumber::from_number(tag.number());
            let matches = tag.class() == BerTagClass::Universal
                && number != UniversalTagNumber::Invalid
                && (number == expected.tag || Some(number) == expected.alternate);
            if !matches {
                self.diagnostics.log_error(
                    context,
                    &format!("Unexpected tag {}, expected {}", tag, expected.tag),
                );
                return false;
            }
        } else if tag.class() != BerTagClass::ContextSpecific {
            let message = format!("Unexpected tag class {}", tag.class());
            if self.options.strict_tag_class {
                self.diagnostics.log_error(context, &message);
                return false;
            }
            self.diagnostics.log_msg(context, &message);
        }
        true
    }

    fn check_length(&self, length: usize) -> BerResult<()> {
        if length > self.options.max_sequence_size {
            return Err(BerError::InvalidData(format!(
                "Length {} exceeds maximum {}",
                length, self.options.max_sequence_size
            )));
        }
        Ok(())
    }

    fn read_content(&self, reader: &mut BerReader<'_>, header: &BerHeader) -> BerResult<Vec<u8>> {
        let length = header.length.value().ok_or_else(|| {
            BerError::InvalidData(format!("Indefinite length on primitive element {}", header.tag))
        })?;
        self.check_length(length)?;
        reader.read_bytes(length)
    }

    /// Discard the contents of an element whose header was already read
    fn skip_contents(&self, reader: &mut BerReader<'_>, header: BerHeader) -> BerResult<()> {
        if let Some(length) = header.length.value() {
            self.check_length(length)?;
            return reader.skip(length);
        }

        // Count open indefinite-length values instead of recursing, so
        // skipping never grows the stack.
        let mut open = 1usize;
        while open > 0 {
            let inner = BerHeader::read_from(reader)?;
            if inner.is_end_of_contents() {
                open -= 1;
                continue;
            }
            match inner.length.value() {
                Some(length) => {
                    self.check_length(length)?;
                    reader.skip(length)?;
                }
                None => open += 1,
            }
        }
        Ok(())
    }

    fn skip_unknown(&mut self, reader: &mut BerReader<'_>, header: BerHeader) -> BerResult<()> {
        let context = ElementContext {
            class: header.tag.class(),
            number: header.tag.number(),
            name: None,
            index: None,
            mode: FormattingMode::DEFAULT,
        };
        self.num_unknown_elements_skipped += 1;
        if self.options.skip_unknown_elements {
            self.diagnostics.log_msg(&context, "Skipping unknown element");
        } else {
            self.diagnostics.log_error(&context, "Unknown element");
        }
        self.skip_contents(reader, header)
    }

    /// Run `handle` on every element inside a constructed value
    fn decode_children(
        &mut self,
        reader: &mut BerReader<'_>,
        header: &BerHeader,
        context: &ElementContext,
        handle: &mut dyn FnMut(&mut Self, &mut BerReader<'_>, BerHeader) -> BerResult<()>,
    ) -> BerResult<()> {
        let end = match header.length.value() {
            Some(length) => {
                self.check_length(length)?;
                Some(reader.num_bytes_consumed() + length)
            }
            None => None,
        };
        let overrun = || BerError::InvalidData("Element overruns its enclosing length".to_string());

        loop {
            if let Some(end) = end {
                if reader.num_bytes_consumed() >= end {
                    break;
                }
            }

            let child = BerHeader::read_from(reader)?;
            if child.is_end_of_contents() {
                if end.is_none() {
                    break;
                }
                return Err(BerError::InvalidData(
                    "End-of-contents inside a definite-length element".to_string(),
                ));
            }
            if let (Some(end), Some(length)) = (end, child.length.value()) {
                if reader.num_bytes_consumed() + length > end {
                    return Err(overrun());
                }
            }

            match (handle(self, reader, child), end) {
                (Ok(()), _) => {}
                (Err(e), Some(end)) => {
                    // The parent's length still tells where it ends.
                    self.diagnostics.log_error(context, &e.to_string());
                    let consumed = reader.num_bytes_consumed();
                    if consumed > end {
                        return Err(overrun());
                    }
                    return reader.skip(end - consumed);
                }
                (Err(e), None) => return Err(e),
            }
        }

        match end {
            Some(end) if reader.num_bytes_consumed() > end => Err(overrun()),
            _ => Ok(()),
        }
    }

    fn decode_sequence(
        &mut self,
        reader: &mut BerReader<'_>,
        header: BerHeader,
        sequence: &mut dyn SequenceType,
        context: &ElementContext,
    ) -> BerResult<()> {
        let accepted = self.accept_header(&header, context, SEQUENCE_TAG, TypeCategory::Sequence);
        if !accepted || !self.enter(context) {
            return self.skip_contents(reader, header);
        }

        let result = self.decode_children(reader, &header, context, &mut |decoder, reader, child| {
            let info = i32::try_from(child.tag.number())
                .ok()
                .and_then(|id| sequence.lookup_attribute(id));
            let Some(attribute_context) = info.as_ref().and_then(ElementContext::attribute) else {
                return decoder.skip_unknown(reader, child);
            };

            let mut result = Ok(());
            let mut called = false;
            sequence.manipulate_attribute(
                attribute_context.number as i32,
                &mut |attribute: &mut dyn Reflect| {
                    called = true;
                    result = decoder.decode_element(reader, child, attribute, attribute_context);
                },
            );
            if !called {
                decoder
                    .diagnostics
                    .log_error(&attribute_context, "Attribute could not be populated");
                return decoder.skip_contents(reader, child);
            }
            result
        });

        self.depth -= 1;
        result
    }

    fn decode_choice(
        &mut self,
        reader: &mut BerReader<'_>,
        header: BerHeader,
        choice: &mut dyn ChoiceType,
        context: &ElementContext,
    ) -> BerResult<()> {
        let accepted = self.accept_header(&header, context, SEQUENCE_TAG, TypeCategory::Choice);
        if !accepted || !self.enter(context) {
            return self.skip_contents(reader, header);
        }

        if let Err(e) = choice.make_selection(UNDEFINED_SELECTION_ID) {
            self.diagnostics.log_error(context, &e.to_string());
        }

        let mut seen = false;
        let result = self.decode_children(reader, &header, context, &mut |decoder, reader, child| {
            if seen {
                decoder
                    .diagnostics
                    .log_error(context, "Choice holds more than one selection");
                return decoder.skip_contents(reader, child);
            }
            seen = true;

            let info = i32::try_from(child.tag.number())
                .ok()
                .and_then(|id| choice.lookup_selection(id));
            let Some(selection_context) = info.as_ref().and_then(ElementContext::selection) else {
                return decoder.skip_unknown(reader, child);
            };

            if let Err(e) = choice.make_selection(selection_context.number as i32) {
                decoder
                    .diagnostics
                    .log_error(&selection_context, &e.to_string());
                return decoder.skip_contents(reader, child);
            }

            let mut result = Ok(());
            let mut called = false;
            choice.manipulate_selection(&mut |selection: &mut dyn Reflect| {
                called = true;
                result = decoder.decode_element(reader, child, selection, selection_context);
            });
            if !called {
                decoder
                    .diagnostics
                    .log_error(&selection_context, "Selection could not be populated");
                return decoder.skip_contents(reader, child);
            }
            result
        });

        self.depth -= 1;
        result
    }

    fn decode_array(
        &mut self,
        reader: &mut BerReader<'_>,
        header: BerHeader,
        array: &mut dyn ArrayType,
        context: &ElementContext,
    ) -> BerResult<()> {
        let accepted = self.accept_header(&header, context, SEQUENCE_TAG, TypeCategory::Array);
        if !accepted || !self.enter(context) {
            return self.skip_contents(reader, header);
        }

        // Elements are appended one at a time, so the array never grows
        // faster than the input.
        array.resize(0);
        let result = self.decode_children(reader, &header, context, &mut |decoder, reader, child| {
            let index = child.tag.number() as usize;
            let Some(element_context) = context.element(index) else {
                return decoder.skip_unknown(reader, child);
            };

            if index != array.len() {
                decoder.diagnostics.log_error(
                    &element_context,
                    &format!("Array index {} out of order, expected {}", index, array.len()),
                );
                return decoder.skip_contents(reader, child);
            }
            if index >= decoder.options.max_sequence_size {
                decoder.diagnostics.log_error(
                    &element_context,
                    &format!("Array index exceeds maximum {}", decoder.options.max_sequence_size),
                );
                return decoder.skip_contents(reader, child);
            }
            array.resize(index + 1);

            let mut result = Ok(());
            let mut called = false;
            array.manipulate_element(index, &mut |element: &mut dyn Reflect| {
                called = true;
                result = decoder.decode_element(reader, child, element, element_context);
            });
            if !called {
                decoder
                    .diagnostics
                    .log_error(&element_context, "Element could not be populated");
                return decoder.skip_contents(reader, child);
            }
            result
        });

        self.depth -= 1;
        result
    }

    fn decode_nullable(
        &mut self,
        reader: &mut BerReader<'_>,
        header: BerHeader,
        nullable: &mut dyn NullableType,
        context: ElementContext,
    ) -> BerResult<()> {
        // Inside an array an empty constructed element is the null
        // placeholder; the encoder writes nothing for null values elsewhere.
        let placeholder = context.index.is_some()
            && header.tag.is_constructed()
            && header.length.value() == Some(0);
        if placeholder {
            nullable.reset();
            return Ok(());
        }

        nullable.make_value();
        let mut result = Ok(());
        let mut called = false;
        nullable.manipulate_value(&mut |value: &mut dyn Reflect| {
            called = true;
            result = self.decode_element(reader, header, value, context);
        });
        if !called {
            self.diagnostics
                .log_error(&context, "Nullable value could not be populated");
            return self.skip_contents(reader, header);
        }
        result
    }

    fn decode_enumeration(
        &mut self,
        reader: &mut BerReader<'_>,
        header: BerHeader,
        enumeration: &mut dyn EnumerationType,
        context: &ElementContext,
    ) -> BerResult<()> {
        let Some(selection) = self.select_tag(TypeCategory::Enumeration, context) else {
            return self.skip_contents(reader, header);
        };
        if !self.accept_header(&header, context, selection, TypeCategory::Enumeration) {
            return self.skip_contents(reader, header);
        }

        let content = self.read_content(reader, &header)?;
        let loaded = if context.mode.base() == BaseMode::Text {
            let name = self.read_text(&content, context);
            enumeration.from_str(&name)
        } else {
            util::decode_integer(&content).and_then(|value| {
                i32::try_from(value)
                    .map_err(|_| BerError::UnknownEnumerator(value.to_string()))
                    .and_then(|value| enumeration.from_int(value))
            })
        };
        if let Err(e) = loaded {
            self.diagnostics.log_error(context, &e.to_string());
        }
        Ok(())
    }

    fn decode_simple(
        &mut self,
        reader: &mut BerReader<'_>,
        header: BerHeader,
        mut scalar: ScalarMut<'_>,
        context: &ElementContext,
    ) -> BerResult<()> {
        let kind = scalar.kind();
        let Some(selection) = self.select_tag(TypeCategory::Simple(kind), context) else {
            return self.skip_contents(reader, header);
        };
        if !self.accept_header(&header, context, selection, TypeCategory::Simple(kind)) {
            return self.skip_contents(reader, header);
        }

        let content = self.read_content(reader, &header)?;
        let tag = if kind.is_temporal() && is_binary_temporal(kind, &header, context, content.len()) {
            UniversalTagNumber::OctetString
        } else {
            selection.tag
        };
        if let Err(e) = self.load_scalar(&mut scalar, tag, &content, context) {
            self.diagnostics.log_error(context, &e.to_string());
        }
        Ok(())
    }

    fn load_scalar(
        &mut self,
        scalar: &mut ScalarMut<'_>,
        tag: UniversalTagNumber,
        content: &[u8],
        context: &ElementContext,
    ) -> BerResult<()> {
        let as_text = tag == UniversalTagNumber::Utf8String;
        let binary = tag == UniversalTagNumber::OctetString;

        match scalar {
            ScalarMut::Bool(v) => **v = util::decode_bool(content)?,
            ScalarMut::I8(v) if as_text => {
                let text = self.read_text(content, context);
                **v = match text.as_bytes() {
                    [byte] => *byte as i8,
                    _ => {
                        return Err(BerError::InvalidData(format!(
                            "Expected a single character, got {} bytes",
                            text.len()
                        )));
                    }
                };
            }
            ScalarMut::I8(v) => **v = integer(content)?,
            ScalarMut::I16(v) => **v = integer(content)?,
            ScalarMut::I32(v) => **v = integer(content)?,
            ScalarMut::I64(v) => **v = integer(content)?,
            ScalarMut::U8(v) => **v = integer(content)?,
            ScalarMut::U16(v) => **v = integer(content)?,
            ScalarMut::U32(v) => **v = integer(content)?,
            ScalarMut::U64(v) => **v = integer(content)?,
            ScalarMut::F32(v) => {
                let wide = util::decode_real(content)?;
                let narrow = wide as f32;
                if f64::from(narrow) != wide && !wide.is_nan() {
                    self.diagnostics.log_warning(
                        context,
                        &format!("REAL {} does not fit f32, stored as {}", wide, narrow),
                    );
                }
                **v = narrow;
            }
            ScalarMut::F64(v) => **v = util::decode_real(content)?,
            ScalarMut::String(v) if as_text => **v = self.read_text(content, context),
            ScalarMut::String(v) => {
                **v = String::from_utf8(content.to_vec())
                    .map_err(|e| BerError::InvalidData(format!("Invalid UTF-8 string: {}", e)))?;
            }
            ScalarMut::Bytes(v) if as_text => **v = self.read_text(content, context).into_bytes(),
            ScalarMut::Bytes(v) => **v = content.to_vec(),
            ScalarMut::Date(v) if binary => **v = util::decode_date_binary(content)?.date(),
            ScalarMut::DateTz(v) if binary => **v = util::decode_date_binary(content)?,
            ScalarMut::Datetime(v) if binary => {
                **v = util::decode_datetime_binary(content)?.naive_local();
            }
            ScalarMut::DatetimeTz(v) if binary => **v = util::decode_datetime_binary(content)?,
            ScalarMut::Time(v) if binary => **v = util::decode_time_binary(content)?.time(),
            ScalarMut::TimeTz(v) if binary => **v = util::decode_time_binary(content)?,
            ScalarMut::Date(v) => **v = util::parse_date(visible_text(content)?)?,
            ScalarMut::DateTz(v) => **v = util::parse_date_tz(visible_text(content)?)?,
            ScalarMut::Datetime(v) => **v = util::parse_datetime(visible_text(content)?)?,
            ScalarMut::DatetimeTz(v) => **v = util::parse_datetime_tz(visible_text(content)?)?,
            ScalarMut::Time(v) => **v = util::parse_time(visible_text(content)?)?,
            ScalarMut::TimeTz(v) => **v = util::parse_time_tz(visible_text(content)?)?,
        }
        Ok(())
    }

    /// Decode UTF-8 text, truncating it like the encoder does
    fn read_text(&mut self, content: &[u8], context: &ElementContext) -> String {
        let (len, defect) = util::valid_text_prefix(content);
        if let Some(defect) = defect {
            self.diagnostics.log_warning(
                context,
                &format!("Text truncated from {} to {} bytes: {}", content.len(), len, defect),
            );
        }
        String::from_utf8_lossy(&content[..len]).into_owned()
    }
}

fn integer<T: TryFrom<i128>>(content: &[u8]) -> BerResult<T> {
    let value = util::decode_integer(content)?;
    T::try_from(value).map_err(|_| {
        BerError::InvalidData(format!(
            "Integer {} out of range for {}",
            value,
            std::any::type_name::<T>()
        ))
    })
}

/// Tell binary date/time content from text
///
/// A root element says which form it holds with its tag. Nested elements
/// carry context tags, so the length decides: binary content is always
/// shorter than the shortest text form.
fn is_binary_temporal(
    kind: SimpleKind,
    header: &BerHeader,
    context: &ElementContext,
    length: usize,
) -> bool {
    if context.is_root() {
        return UniversalTagNumber::from_number(header.tag.number())
            == UniversalTagNumber::OctetString;
    }
    let max = match kind {
        SimpleKind::Date | SimpleKind::DateTz => util::MAX_BINARY_DATE_LENGTH,
        SimpleKind::Time | SimpleKind::TimeTz => util::MAX_BINARY_TIME_LENGTH,
        _ => util::MAX_BINARY_DATETIME_LENGTH,
    };
    length <= max
}

fn visible_text(content: &[u8]) -> BerResult<&str> {
    std::str::from_utf8(content)
        .map_err(|e| BerError::InvalidData(format!("Invalid date/time text: {}", e)))
}
