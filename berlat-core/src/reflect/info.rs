//! Static metadata describing sequence attributes, choice selections and
//! enumerators

use super::FormattingMode;

/// Selection id reported by a choice that has no current selection
pub const UNDEFINED_SELECTION_ID: i32 = -1;

/// Description of one sequence attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeInfo {
    /// Attribute id, used as the CONTEXT_SPECIFIC tag number on the wire
    pub id: i32,
    pub name: &'static str,
    pub formatting_mode: FormattingMode,
}

impl AttributeInfo {
    pub const fn new(id: i32, name: &'static str) -> Self {
        Self {
            id,
            name,
            formatting_mode: FormattingMode::DEFAULT,
        }
    }

    pub const fn with_formatting_mode(mut self, mode: FormattingMode) -> Self {
        self.formatting_mode = mode;
        self
    }
}

/// Description of one choice selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionInfo {
    pub id: i32,
    pub name: &'static str,
    pub formatting_mode: FormattingMode,
}

impl SelectionInfo {
    pub const fn new(id: i32, name: &'static str) -> Self {
        Self {
            id,
            name,
            formatting_mode: FormattingMode::DEFAULT,
        }
    }

    pub const fn with_formatting_mode(mut self, mode: FormattingMode) -> Self {
        self.formatting_mode = mode;
        self
    }
}

/// One name/value pair of an enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumeratorInfo {
    pub value: i32,
    pub name: &'static str,
}

impl EnumeratorInfo {
    pub const fn new(value: i32, name: &'static str) -> Self {
        Self { value, name }
    }
}
