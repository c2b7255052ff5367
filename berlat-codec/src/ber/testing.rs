//! Reflected types shared by the codec tests

use berlat_core::datatypes::{DateTz, DatetimeTz, TimeTz};
use berlat_core::error::{BerError, BerResult};
use berlat_core::reflect::{
    ChoiceType, CustomizedType, FormattingMode, Manipulator, Reflect, SelectionInfo,
    TypeCategory, UNDEFINED_SELECTION_ID, ValueMut, ValueRef, Visitor,
};
use berlat_core::{impl_enumeration, impl_sequence};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Parse whitespace-separated hex octets
pub fn hex(text: &str) -> Vec<u8> {
    text.split_whitespace()
        .map(|octet| u8::from_str_radix(octet, 16).unwrap())
        .collect()
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct EmployeeRecord {
    pub name: String,
    pub age: i32,
    pub salary: f32,
}

impl_sequence!(EmployeeRecord {
    name: 1, "name";
    age: 2, "age";
    salary: 3, "salary";
});

pub fn bob() -> EmployeeRecord {
    EmployeeRecord {
        name: "Bob".to_string(),
        age: 56,
        salary: 1234.0,
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct MySequence {
    pub attribute1: i32,
    pub attribute2: String,
}

impl_sequence!(MySequence {
    attribute1: 0, "attribute1";
    attribute2: 1, "attribute2";
});

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum Level {
    #[default]
    Low,
    High,
}

impl_enumeration!(Level {
    Low = 0 => "LOW",
    High = 5 => "HIGH",
});

#[derive(Debug, Default, Clone, PartialEq)]
pub enum Payload {
    #[default]
    Unselected,
    Count(i64),
    Label(String),
    Record(EmployeeRecord),
}

const PAYLOAD_SELECTIONS: &[SelectionInfo] = &[
    SelectionInfo::new(0, "count"),
    SelectionInfo::new(1, "label"),
    SelectionInfo::new(2, "record"),
];

impl Reflect for Payload {
    fn category(&self) -> TypeCategory {
        TypeCategory::Choice
    }

    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Choice(self)
    }

    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Choice(self)
    }
}

impl ChoiceType for Payload {
    fn selection_infos(&self) -> &[SelectionInfo] {
        PAYLOAD_SELECTIONS
    }

    fn selection_id(&self) -> i32 {
        match self {
            Payload::Unselected => UNDEFINED_SELECTION_ID,
            Payload::Count(_) => 0,
            Payload::Label(_) => 1,
            Payload::Record(_) => 2,
        }
    }

    fn access_selection(&self, visitor: &mut Visitor<'_>) -> bool {
        match self {
            Payload::Unselected => return false,
            Payload::Count(v) => visitor(v),
            Payload::Label(v) => visitor(v),
            Payload::Record(v) => visitor(v),
        }
        true
    }

    fn make_selection(&mut self, id: i32) -> BerResult<()> {
        if id == self.selection_id() {
            return Ok(());
        }
        *self = match id {
            UNDEFINED_SELECTION_ID => Payload::Unselected,
            0 => Payload::Count(0),
            1 => Payload::Label(String::new()),
            2 => Payload::Record(EmployeeRecord::default()),
            _ => return Err(BerError::UnknownSelection(id)),
        };
        Ok(())
    }

    fn manipulate_selection(&mut self, manipulator: &mut Manipulator<'_>) -> bool {
        match self {
            Payload::Unselected => return false,
            Payload::Count(v) => manipulator(v),
            Payload::Label(v) => manipulator(v),
            Payload::Record(v) => manipulator(v),
        }
        true
    }
}

/// Singly linked list of sequences
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Node {
    pub value: i32,
    pub next: Option<Box<Node>>,
}

impl_sequence!(Node {
    value: 0, "value";
    next: 1, "next";
});

impl Node {
    /// A list of `len` nodes
    pub fn chain(len: usize) -> Node {
        let mut head = Node::default();
        for value in 1..len {
            head = Node {
                value: value as i32,
                next: Some(Box::new(head)),
            };
        }
        head
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Inventory {
    pub items: Vec<i32>,
    pub slots: Vec<Option<i32>>,
    pub note: Option<String>,
    pub records: Vec<EmployeeRecord>,
}

impl_sequence!(Inventory {
    items: 0, "items";
    slots: 1, "slots";
    note: 2, "note";
    records: 3, "records";
});

/// Attributes with non-default formatting modes
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Tagged {
    pub code: String,
    pub raw: Vec<u8>,
    pub small: i8,
    pub level: Level,
}

impl_sequence!(Tagged {
    code: 0, "code", FormattingMode::HEX;
    raw: 1, "raw", FormattingMode::TEXT;
    small: 2, "small", FormattingMode::TEXT;
    level: 3, "level", FormattingMode::TEXT;
});

/// An integer attribute with a mode no integer supports
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BadMode {
    pub value: i32,
    pub flag: bool,
}

impl_sequence!(BadMode {
    value: 0, "value", FormattingMode::HEX;
    flag: 1, "flag";
});

/// A string of at most [`ShortName::MAX_LEN`] bytes
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ShortName(String);

impl ShortName {
    pub const MAX_LEN: usize = 8;

    pub fn new(name: &str) -> BerResult<Self> {
        if name.len() > Self::MAX_LEN {
            return Err(BerError::InvalidValue(format!(
                "name longer than {} bytes",
                Self::MAX_LEN
            )));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Reflect for ShortName {
    fn category(&self) -> TypeCategory {
        TypeCategory::CustomizedType
    }

    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Customized(self)
    }

    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Customized(self)
    }
}

impl CustomizedType for ShortName {
    fn access_base(&self, visitor: &mut Visitor<'_>) {
        visitor(&self.0);
    }

    fn load_base(&mut self, loader: &mut Manipulator<'_>) -> BerResult<()> {
        let mut base = String::new();
        loader(&mut base);
        *self = ShortName::new(&base)?;
        Ok(())
    }
}

/// A value whose category depends on its content
#[derive(Debug, Clone, PartialEq)]
pub enum Variant {
    Int(i64),
    Text(String),
}

impl Default for Variant {
    fn default() -> Self {
        Variant::Int(0)
    }
}

impl Reflect for Variant {
    fn category(&self) -> TypeCategory {
        TypeCategory::DynamicType
    }

    fn value_ref(&self) -> ValueRef<'_> {
        match self {
            Variant::Int(v) => v.value_ref(),
            Variant::Text(v) => v.value_ref(),
        }
    }

    fn value_mut(&mut self) -> ValueMut<'_> {
        match self {
            Variant::Int(v) => v.value_mut(),
            Variant::Text(v) => v.value_mut(),
        }
    }
}

/// One attribute of every supported kind
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AllScalars {
    pub flag: bool,
    pub tiny: i8,
    pub short: i16,
    pub int: i32,
    pub long: i64,
    pub byte: u8,
    pub ushort: u16,
    pub uint: u32,
    pub ulong: u64,
    pub single: f32,
    pub double: f64,
    pub text: String,
    pub blob: Vec<u8>,
    pub date: NaiveDate,
    pub date_tz: DateTz,
    pub datetime: NaiveDateTime,
    pub datetime_tz: DatetimeTz,
    pub time: NaiveTime,
    pub time_tz: TimeTz,
    pub level: Level,
    pub name: ShortName,
    pub payload: Payload,
    pub names: Vec<String>,
    pub matrix: Vec<Vec<i32>>,
    pub maybe_list: Option<Vec<i32>>,
}

impl_sequence!(AllScalars {
    flag: 0, "flag";
    tiny: 1, "tiny";
    short: 2, "short";
    int: 3, "int";
    long: 4, "long";
    byte: 5, "byte";
    ushort: 6, "ushort";
    uint: 7, "uint";
    ulong: 8, "ulong";
    single: 9, "single";
    double: 10, "double";
    text: 11, "text";
    blob: 12, "blob";
    date: 13, "date";
    date_tz: 14, "dateTz";
    datetime: 15, "datetime";
    datetime_tz: 16, "datetimeTz";
    time: 17, "time";
    time_tz: 18, "timeTz";
    level: 19, "level";
    name: 20, "name";
    payload: 21, "payload";
    names: 22, "names";
    matrix: 40, "matrix";
    maybe_list: 200, "maybeList";
});

impl AllScalars {
    /// A fully populated sample; times carry nanoseconds
    pub fn sample() -> Self {
        let date = NaiveDate::from_ymd_opt(2023, 11, 5).unwrap();
        let offset = chrono::FixedOffset::east_opt(3 * 3600 + 30 * 60).unwrap();
        let time = NaiveTime::from_hms_nano_opt(23, 59, 58, 250_000_125).unwrap();
        let datetime = date.and_time(NaiveTime::from_hms_nano_opt(1, 2, 3, 456_789_012).unwrap());
        AllScalars {
            flag: true,
            tiny: -128,
            short: -300,
            int: i32::MAX,
            long: i64::MIN,
            byte: 255,
            ushort: 65_535,
            uint: u32::MAX,
            ulong: u64::MAX,
            single: -0.15625,
            double: 1.0e-300,
            text: "Grüße, tab\tok".to_string(),
            blob: vec![0x00, 0x7F, 0x80, 0xFF],
            date,
            date_tz: DateTz::new(date, offset),
            datetime,
            datetime_tz: chrono::TimeZone::from_local_datetime(&offset, &datetime)
                .single()
                .unwrap(),
            time,
            time_tz: TimeTz::new(time, offset),
            level: Level::High,
            name: ShortName::new("short").unwrap(),
            payload: Payload::Label("chosen".to_string()),
            names: vec!["a".to_string(), String::new(), "c".to_string()],
            matrix: vec![vec![1, 2], vec![], vec![3]],
            maybe_list: Some(Vec::new()),
        }
    }
}
