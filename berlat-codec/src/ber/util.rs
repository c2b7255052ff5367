//! Content octets of primitive elements
//!
//! These helpers produce and parse the value part of a TLV for every simple
//! kind. They do not know about tags or lengths.

use berlat_core::datatypes::{DateTz, DatetimeTz, TimeTz};
use berlat_core::error::{BerError, BerResult};
use chrono::{
    Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Timelike, Utc,
};
use std::fmt;

/// REAL special value: PLUS-INFINITY
pub const REAL_PLUS_INFINITY: u8 = 0x40;
/// REAL special value: MINUS-INFINITY
pub const REAL_MINUS_INFINITY: u8 = 0x41;
/// REAL special value: NOT-A-NUMBER
pub const REAL_NOT_A_NUMBER: u8 = 0x42;
/// REAL special value: minus zero
pub const REAL_MINUS_ZERO: u8 = 0x43;

/// Longest INTEGER content accepted (a u64 with a leading zero octet)
const MAX_INTEGER_OCTETS: usize = 9;

/// Encode a signed integer as minimal two's complement
pub fn encode_signed(value: i64) -> Vec<u8> {
    minimal_twos_complement(&value.to_be_bytes())
}

/// Encode an unsigned integer as minimal two's complement
///
/// A value with its high bit set gains a leading `0x00`.
pub fn encode_unsigned(value: u64) -> Vec<u8> {
    let mut widened = [0u8; 9];
    widened[1..].copy_from_slice(&value.to_be_bytes());
    minimal_twos_complement(&widened)
}

fn minimal_twos_complement(bytes: &[u8]) -> Vec<u8> {
    // A leading octet is redundant when it only repeats the sign of the next.
    let mut start = 0;
    while start + 1 < bytes.len() {
        let (lead, next) = (bytes[start], bytes[start + 1]);
        let redundant = (lead == 0x00 && next & 0x80 == 0) || (lead == 0xFF && next & 0x80 != 0);
        if !redundant {
            break;
        }
        start += 1;
    }
    bytes[start..].to_vec()
}

/// Decode two's complement INTEGER content
///
/// # Error Handling
/// Returns error if the content is empty or longer than 9 octets.
pub fn decode_integer(content: &[u8]) -> BerResult<i128> {
    if content.is_empty() {
        return Err(BerError::InvalidData("Zero-length INTEGER".to_string()));
    }
    if content.len() > MAX_INTEGER_OCTETS {
        return Err(BerError::InvalidData(format!(
            "INTEGER too long: {} octets",
            content.len()
        )));
    }

    let initial: i128 = if content[0] & 0x80 != 0 { -1 } else { 0 };
    Ok(content
        .iter()
        .fold(initial, |acc, &byte| (acc << 8) | i128::from(byte)))
}

pub fn encode_bool(value: bool) -> Vec<u8> {
    vec![u8::from(value)]
}

/// Decode BOOLEAN content; any non-zero octet is true
pub fn decode_bool(content: &[u8]) -> BerResult<bool> {
    match content {
        [byte] => Ok(*byte != 0),
        _ => Err(BerError::InvalidData(format!(
            "BOOLEAN content must be 1 octet, got {}",
            content.len()
        ))),
    }
}

/// Encode REAL content in binary form, base 2
///
/// # Encoding Format
/// ```text
/// 1 S 0 0 0 0 E E | exponent octets | mantissa octets
/// ```
/// S is the sign, EE the number of exponent octets minus one. The mantissa is
/// shifted until it is odd so every value has exactly one encoding.
pub fn encode_real(value: f64, preserve_negative_zero: bool) -> Vec<u8> {
    if value.is_nan() {
        return vec![REAL_NOT_A_NUMBER];
    }
    if value.is_infinite() {
        return vec![if value > 0.0 {
            REAL_PLUS_INFINITY
        } else {
            REAL_MINUS_INFINITY
        }];
    }
    if value == 0.0 {
        return if preserve_negative_zero && value.is_sign_negative() {
            vec![REAL_MINUS_ZERO]
        } else {
            Vec::new()
        };
    }

    let bits = value.to_bits();
    let negative = bits >> 63 != 0;
    let biased = ((bits >> 52) & 0x7FF) as i32;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mut mantissa, mut exponent) = if biased == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), biased - 1075)
    };

    let shift = mantissa.trailing_zeros();
    mantissa >>= shift;
    exponent += shift as i32;

    let exponent_octets = encode_signed(i64::from(exponent));
    let mantissa_octets = mantissa.to_be_bytes();
    let leading_zeros = mantissa_octets.iter().take_while(|&&b| b == 0).count();

    let mut first = 0x80 | (exponent_octets.len() as u8 - 1);
    if negative {
        first |= 0x40;
    }

    let mut content = Vec::with_capacity(1 + exponent_octets.len() + 8 - leading_zeros);
    content.push(first);
    content.extend_from_slice(&exponent_octets);
    content.extend_from_slice(&mantissa_octets[leading_zeros..]);
    content
}

/// Decode REAL content
///
/// Accepts binary encodings in base 2, 8 and 16 with a scale factor, and
/// the special values. Decimal encodings are rejected.
pub fn decode_real(content: &[u8]) -> BerResult<f64> {
    let Some((&first, rest)) = content.split_first() else {
        return Ok(0.0);
    };

    if first & 0x80 == 0 {
        if !rest.is_empty() || first & 0xC0 == 0 {
            return Err(BerError::InvalidData(format!(
                "Unsupported REAL encoding 0x{:02X}",
                first
            )));
        }
        return match first {
            REAL_PLUS_INFINITY => Ok(f64::INFINITY),
            REAL_MINUS_INFINITY => Ok(f64::NEG_INFINITY),
            REAL_NOT_A_NUMBER => Ok(f64::NAN),
            REAL_MINUS_ZERO => Ok(-0.0),
            _ => Err(BerError::InvalidData(format!(
                "Unknown REAL special value 0x{:02X}",
                first
            ))),
        };
    }

    let negative = first & 0x40 != 0;
    let bits_per_digit: i64 = match (first >> 4) & 0x03 {
        0 => 1,
        1 => 3,
        2 => 4,
        _ => return Err(BerError::InvalidData("Reserved REAL base".to_string())),
    };
    let scale = i64::from((first >> 2) & 0x03);

    let (exponent_len, rest) = match first & 0x03 {
        code @ 0..=2 => (usize::from(code) + 1, rest),
        _ => match rest.split_first() {
            Some((&len, rest)) => (usize::from(len), rest),
            None => {
                return Err(BerError::InvalidData(
                    "Missing REAL exponent length".to_string(),
                ));
            }
        },
    };
    if exponent_len == 0 || exponent_len > 4 || rest.len() <= exponent_len {
        return Err(BerError::InvalidData(format!(
            "Invalid REAL exponent length {}",
            exponent_len
        )));
    }

    let (exponent_octets, mantissa_octets) = rest.split_at(exponent_len);
    let exponent = decode_integer(exponent_octets)? as i64;

    let significant = mantissa_octets
        .iter()
        .skip_while(|&&b| b == 0)
        .copied()
        .collect::<Vec<u8>>();
    if significant.len() > 8 {
        return Err(BerError::InvalidData("REAL mantissa too large".to_string()));
    }
    let mantissa = significant
        .iter()
        .fold(0u64, |acc, &byte| (acc << 8) | u64::from(byte));

    let value = scale_by_power_of_two(mantissa as f64, exponent * bits_per_digit + scale);
    Ok(if negative { -value } else { value })
}

fn scale_by_power_of_two(mut value: f64, mut exponent: i64) -> f64 {
    // Step in chunks so intermediate powers never leave the f64 range.
    while exponent != 0 && value != 0.0 && value.is_finite() {
        let step = exponent.clamp(-1000, 1000);
        value *= 2f64.powi(step as i32);
        exponent -= step;
    }
    value
}

/// Reason text was cut short
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDefect {
    InvalidUtf8 { offset: usize },
    ControlCharacter { offset: usize, byte: u8 },
}

impl fmt::Display for TextDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextDefect::InvalidUtf8 { offset } => {
                write!(f, "invalid UTF-8 at offset {}", offset)
            }
            TextDefect::ControlCharacter { offset, byte } => {
                write!(f, "control character 0x{:02X} at offset {}", byte, offset)
            }
        }
    }
}

fn is_disallowed_control(byte: u8) -> bool {
    (byte < 0x20 && !matches!(byte, b'\t' | b'\n' | b'\r')) || byte == 0x7F
}

/// Length of the longest acceptable text prefix of `bytes`
///
/// Text stops at the first invalid UTF-8 sequence or the first control
/// character other than tab, line feed and carriage return.
pub fn valid_text_prefix(bytes: &[u8]) -> (usize, Option<TextDefect>) {
    let (valid, utf8_defect) = match std::str::from_utf8(bytes) {
        Ok(_) => (bytes.len(), None),
        Err(e) => (
            e.valid_up_to(),
            Some(TextDefect::InvalidUtf8 {
                offset: e.valid_up_to(),
            }),
        ),
    };

    match bytes[..valid].iter().position(|&b| is_disallowed_control(b)) {
        Some(offset) => (
            offset,
            Some(TextDefect::ControlCharacter {
                offset,
                byte: bytes[offset],
            }),
        ),
        None => (valid, utf8_defect),
    }
}

fn utc() -> FixedOffset {
    Utc.fix()
}

fn format_offset(offset: FixedOffset) -> String {
    let seconds = offset.local_minus_utc();
    let sign = if seconds < 0 { '-' } else { '+' };
    let seconds = seconds.abs();
    let mut text = format!("{}{:02}:{:02}", sign, seconds / 3600, seconds / 60 % 60);
    if seconds % 60 != 0 {
        text.push_str(&format!(":{:02}", seconds % 60));
    }
    text
}

/// Append `.fff...` with at least `min_digits` digits and as many more as
/// the value needs to survive parsing, at most 9
fn push_fraction(text: &mut String, nanos: u32, min_digits: u8) {
    // A leap second is stored as nanos past 1_000_000_000.
    let nanos = nanos % 1_000_000_000;
    let needed = if nanos == 0 {
        0
    } else if nanos % 1_000_000 == 0 {
        3
    } else if nanos % 1_000 == 0 {
        6
    } else {
        9
    };
    let digits = needed.max(usize::from(min_digits.min(9)));
    if digits > 0 {
        let fraction = format!("{:09}", nanos);
        text.push('.');
        text.push_str(&fraction[..digits]);
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn format_date_tz(value: DateTz) -> String {
    format_date(value.date()) + &format_offset(value.offset())
}

/// Format a time of day with at least millisecond precision
///
/// Microseconds and nanoseconds are written when the value carries them.
pub fn format_time(time: NaiveTime) -> String {
    let mut text = time.format("%H:%M:%S").to_string();
    push_fraction(&mut text, time.nanosecond(), 3);
    text
}

pub fn format_time_tz(value: TimeTz) -> String {
    format_time(value.time()) + &format_offset(value.offset())
}

/// Format a datetime with at least `precision` fractional digits
///
/// The fraction grows to 6 or 9 digits when the value has sub-millisecond
/// or sub-microsecond parts, so no digit of the value is dropped.
pub fn format_datetime(value: NaiveDateTime, precision: u8) -> String {
    let mut text = value.format("%Y-%m-%dT%H:%M:%S").to_string();
    push_fraction(&mut text, value.nanosecond(), precision);
    text
}

pub fn format_datetime_tz(value: DatetimeTz, precision: u8) -> String {
    format_datetime(value.naive_local(), precision) + &format_offset(*value.offset())
}

/// Split a trailing `Z`, `+HH:MM` or `+HH:MM:SS` off date/time text
fn split_offset(text: &str) -> BerResult<(&str, Option<FixedOffset>)> {
    if let Some(body) = text.strip_suffix('Z') {
        return Ok((body, Some(utc())));
    }

    for width in [9, 6] {
        let Some(split) = text.len().checked_sub(width) else {
            continue;
        };
        let (Some(body), Some(tail)) = (text.get(..split), text.get(split..)) else {
            continue;
        };
        if !is_offset_shape(tail.as_bytes()) {
            continue;
        }
        return Ok((body, Some(parse_offset(tail)?)));
    }
    Ok((text, None))
}

fn is_offset_shape(tail: &[u8]) -> bool {
    let digits = |range: &[usize]| range.iter().all(|&i| tail[i].is_ascii_digit());
    match tail.len() {
        6 => matches!(tail[0], b'+' | b'-') && tail[3] == b':' && digits(&[1, 2, 4, 5]),
        9 => {
            matches!(tail[0], b'+' | b'-')
                && tail[3] == b':'
                && tail[6] == b':'
                && digits(&[1, 2, 4, 5, 7, 8])
        }
        _ => false,
    }
}

fn parse_offset(tail: &str) -> BerResult<FixedOffset> {
    let invalid = || BerError::InvalidData(format!("Invalid UTC offset '{}'", tail));
    let field = |range: std::ops::Range<usize>| -> BerResult<i32> {
        tail.get(range)
            .and_then(|digits| digits.parse().ok())
            .ok_or_else(invalid)
    };

    let hours = field(1..3)?;
    let minutes = field(4..6)?;
    let seconds = if tail.len() == 9 { field(7..9)? } else { 0 };
    if minutes >= 60 || seconds >= 60 {
        return Err(invalid());
    }
    let total = (hours * 60 + minutes) * 60 + seconds;
    let total = if tail.starts_with('-') { -total } else { total };
    FixedOffset::east_opt(total).ok_or_else(invalid)
}

fn parse_error(text: &str, e: chrono::ParseError) -> BerError {
    BerError::InvalidData(format!("Invalid date/time text '{}': {}", text, e))
}

/// Parse `YYYY-MM-DD`, ignoring a trailing offset
pub fn parse_date(text: &str) -> BerResult<NaiveDate> {
    let (body, _) = split_offset(text)?;
    NaiveDate::parse_from_str(body, "%Y-%m-%d").map_err(|e| parse_error(text, e))
}

/// Parse `YYYY-MM-DD[+HH:MM]`; a missing offset means UTC
pub fn parse_date_tz(text: &str) -> BerResult<DateTz> {
    let (body, offset) = split_offset(text)?;
    let date = NaiveDate::parse_from_str(body, "%Y-%m-%d").map_err(|e| parse_error(text, e))?;
    Ok(DateTz::new(date, offset.unwrap_or_else(utc)))
}

pub fn parse_time(text: &str) -> BerResult<NaiveTime> {
    let (body, _) = split_offset(text)?;
    NaiveTime::parse_from_str(body, "%H:%M:%S%.f").map_err(|e| parse_error(text, e))
}

pub fn parse_time_tz(text: &str) -> BerResult<TimeTz> {
    let (body, offset) = split_offset(text)?;
    let time = NaiveTime::parse_from_str(body, "%H:%M:%S%.f").map_err(|e| parse_error(text, e))?;
    Ok(TimeTz::new(time, offset.unwrap_or_else(utc)))
}

pub fn parse_datetime(text: &str) -> BerResult<NaiveDateTime> {
    let (body, _) = split_offset(text)?;
    NaiveDateTime::parse_from_str(body, "%Y-%m-%dT%H:%M:%S%.f").map_err(|e| parse_error(text, e))
}

pub fn parse_datetime_tz(text: &str) -> BerResult<DatetimeTz> {
    let (body, offset) = split_offset(text)?;
    let naive = NaiveDateTime::parse_from_str(body, "%Y-%m-%dT%H:%M:%S%.f")
        .map_err(|e| parse_error(text, e))?;
    offset
        .unwrap_or_else(utc)
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| BerError::InvalidData(format!("Ambiguous datetime '{}'", text)))
}

/// Longest binary date content (offset and 3 day octets)
pub const MAX_BINARY_DATE_LENGTH: usize = 5;
/// Longest binary time content (offset and 4 millisecond octets)
pub const MAX_BINARY_TIME_LENGTH: usize = 6;
/// Longest binary datetime content (offset and 7 millisecond octets)
pub const MAX_BINARY_DATETIME_LENGTH: usize = 9;

/// Days from 0001-01-01 (day 1) to 2020-01-01, the binary epoch
const BINARY_EPOCH_DAYS_FROM_CE: i64 = 737_425;
const MILLIS_PER_DAY: i64 = 86_400_000;

// Binary content without an offset is at most this long; longer content
// starts with a two-octet offset in minutes.
const PLAIN_DATE_LENGTH: usize = 3;
const PLAIN_TIME_LENGTH: usize = 4;
const PLAIN_DATETIME_LENGTH: usize = 6;

/// Sign-extend minimal two's complement to at least `min_len` octets
fn encode_signed_padded(value: i64, min_len: usize) -> Vec<u8> {
    let minimal = encode_signed(value);
    if minimal.len() >= min_len {
        return minimal;
    }
    let fill = if value < 0 { 0xFF } else { 0x00 };
    let mut padded = vec![fill; min_len - minimal.len()];
    padded.extend_from_slice(&minimal);
    padded
}

fn offset_minutes(offset: FixedOffset) -> i64 {
    i64::from(offset.local_minus_utc() / 60)
}

/// Prefix `value` with the offset, or return the plain form for UTC
fn with_offset(minutes: i64, plain: Vec<u8>, value: i64, min_len: usize) -> Vec<u8> {
    if minutes == 0 {
        return plain;
    }
    let mut content = encode_signed_padded(minutes, 2);
    content.extend_from_slice(&encode_signed_padded(value, min_len));
    content
}

fn epoch_days(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) - BINARY_EPOCH_DAYS_FROM_CE
}

fn millis_of_day(time: NaiveTime) -> i64 {
    let millis = (time.nanosecond() / 1_000_000).min(999);
    i64::from(time.num_seconds_from_midnight()) * 1_000 + i64::from(millis)
}

fn epoch_millis(value: NaiveDateTime) -> i64 {
    epoch_days(value.date()) * MILLIS_PER_DAY + millis_of_day(value.time())
}

/// Encode a date as the signed number of days since 2020-01-01
///
/// # Encoding Format
/// ```text
/// 2020-01-01 -> 00
/// 2020-05-08 -> 00 80
/// 0001-01-01 -> F4 BF 70
/// ```
pub fn encode_date_binary(date: NaiveDate) -> Vec<u8> {
    encode_signed(epoch_days(date))
}

/// Encode a date with offset
///
/// A UTC value uses the plain date form. Otherwise the content is the offset
/// in minutes (2 octets) followed by the days, padded to at least 2 octets.
pub fn encode_date_tz_binary(value: DateTz) -> Vec<u8> {
    let days = epoch_days(value.date());
    with_offset(offset_minutes(value.offset()), encode_signed(days), days, 2)
}

/// Encode a time as the signed number of milliseconds since midnight
pub fn encode_time_binary(time: NaiveTime) -> Vec<u8> {
    encode_signed(millis_of_day(time))
}

/// Encode a time with offset; the milliseconds are padded to 3 octets
/// after a non-zero offset
pub fn encode_time_tz_binary(value: TimeTz) -> Vec<u8> {
    let millis = millis_of_day(value.time());
    with_offset(offset_minutes(value.offset()), encode_signed(millis), millis, 3)
}

/// Encode a datetime as the signed number of milliseconds since
/// 2020-01-01T00:00:00
///
/// Values that need more than 6 octets are written with a zero offset so the
/// length still tells the two forms apart.
pub fn encode_datetime_binary(value: NaiveDateTime) -> Vec<u8> {
    encode_datetime_millis(0, epoch_millis(value))
}

pub fn encode_datetime_tz_binary(value: DatetimeTz) -> Vec<u8> {
    encode_datetime_millis(offset_minutes(*value.offset()), epoch_millis(value.naive_local()))
}

fn encode_datetime_millis(minutes: i64, millis: i64) -> Vec<u8> {
    let plain = encode_signed(millis);
    if minutes == 0 && plain.len() <= PLAIN_DATETIME_LENGTH {
        return plain;
    }
    let mut content = encode_signed_padded(minutes, 2);
    content.extend_from_slice(&encode_signed_padded(millis, 5));
    content
}

/// Split binary content into its offset and value
///
/// Content no longer than `plain_len` has no offset and is UTC.
fn split_binary(content: &[u8], plain_len: usize, max_len: usize) -> BerResult<(FixedOffset, i64)> {
    if content.is_empty() || content.len() > max_len {
        return Err(BerError::InvalidData(format!(
            "Invalid binary date/time length {}",
            content.len()
        )));
    }
    if content.len() <= plain_len {
        return Ok((utc(), decode_integer(content)? as i64));
    }

    let (offset_octets, value_octets) = content.split_at(2);
    let minutes = decode_integer(offset_octets)?;
    let offset = i32::try_from(minutes)
        .ok()
        .and_then(|minutes| minutes.checked_mul(60))
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| BerError::InvalidData(format!("Invalid UTC offset {} minutes", minutes)))?;
    let value = i64::try_from(decode_integer(value_octets)?)
        .map_err(|_| BerError::InvalidData("Binary date/time out of range".to_string()))?;
    Ok((offset, value))
}

fn date_from_epoch_days(days: i64) -> BerResult<NaiveDate> {
    days.checked_add(BINARY_EPOCH_DAYS_FROM_CE)
        .and_then(|days| i32::try_from(days).ok())
        .and_then(NaiveDate::from_num_days_from_ce_opt)
        .ok_or_else(|| BerError::InvalidData(format!("Binary date {} days out of range", days)))
}

fn time_from_millis(millis: i64) -> BerResult<NaiveTime> {
    let invalid = || BerError::InvalidData(format!("Binary time {} ms out of range", millis));
    if !(0..MILLIS_PER_DAY).contains(&millis) {
        return Err(invalid());
    }
    NaiveTime::from_num_seconds_from_midnight_opt(
        (millis / 1_000) as u32,
        (millis % 1_000) as u32 * 1_000_000,
    )
    .ok_or_else(invalid)
}

/// Decode binary date content; a plain date is UTC
pub fn decode_date_binary(content: &[u8]) -> BerResult<DateTz> {
    let (offset, days) = split_binary(content, PLAIN_DATE_LENGTH, MAX_BINARY_DATE_LENGTH)?;
    Ok(DateTz::new(date_from_epoch_days(days)?, offset))
}

/// Decode binary time content; a plain time is UTC
pub fn decode_time_binary(content: &[u8]) -> BerResult<TimeTz> {
    let (offset, millis) = split_binary(content, PLAIN_TIME_LENGTH, MAX_BINARY_TIME_LENGTH)?;
    Ok(TimeTz::new(time_from_millis(millis)?, offset))
}

/// Decode binary datetime content; a plain datetime is UTC
pub fn decode_datetime_binary(content: &[u8]) -> BerResult<DatetimeTz> {
    let (offset, millis) =
        split_binary(content, PLAIN_DATETIME_LENGTH, MAX_BINARY_DATETIME_LENGTH)?;
    let date = date_from_epoch_days(millis.div_euclid(MILLIS_PER_DAY))?;
    let time = time_from_millis(millis.rem_euclid(MILLIS_PER_DAY))?;
    offset
        .from_local_datetime(&date.and_time(time))
        .single()
        .ok_or_else(|| BerError::InvalidData("Ambiguous binary datetime".to_string()))
}
