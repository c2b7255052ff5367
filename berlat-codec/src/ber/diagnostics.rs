//! Per-call diagnostics shared by the encoder and decoder
//!
//! Both codecs keep an [`ErrorSeverity`] and a text log that are reset at the
//! start of every `encode`/`decode` call and stay readable until the next
//! one. The log buffer is only allocated once the first message arrives.

use super::types::BerTagClass;
use berlat_core::reflect::{AttributeInfo, FormattingMode, SelectionInfo};
use std::fmt::{self, Write};

/// Outcome of a codec call, ordered from best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum ErrorSeverity {
    #[default]
    Success,
    /// Data was altered (for example truncated text) but the call completed
    Warning,
    Error,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorSeverity::Success => "SUCCESS",
            ErrorSeverity::Warning => "WARNING",
            ErrorSeverity::Error => "ERROR",
        })
    }
}

/// Where an element sits in the value being processed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementContext {
    pub class: BerTagClass,
    pub number: u32,
    pub name: Option<&'static str>,
    pub index: Option<usize>,
    pub mode: FormattingMode,
}

impl ElementContext {
    /// The root element, whose tag comes from the universal tag selector
    pub fn root() -> Self {
        Self {
            class: BerTagClass::Universal,
            number: 0,
            name: None,
            index: None,
            mode: FormattingMode::DEFAULT,
        }
    }

    /// A sequence attribute, `None` if its id cannot be a tag number
    pub fn attribute(info: &AttributeInfo) -> Option<Self> {
        Some(Self {
            class: BerTagClass::ContextSpecific,
            number: u32::try_from(info.id).ok()?,
            name: Some(info.name),
            index: None,
            mode: info.formatting_mode,
        })
    }

    /// A choice selection, `None` if its id cannot be a tag number
    pub fn selection(info: &SelectionInfo) -> Option<Self> {
        Some(Self {
            class: BerTagClass::ContextSpecific,
            number: u32::try_from(info.id).ok()?,
            name: Some(info.name),
            index: None,
            mode: info.formatting_mode,
        })
    }

    /// Element `index` of the array described by `self`
    ///
    /// Elements inherit the array's name and formatting mode.
    pub fn element(&self, index: usize) -> Option<Self> {
        Some(Self {
            class: BerTagClass::ContextSpecific,
            number: u32::try_from(index).ok()?,
            name: self.name,
            index: Some(index),
            mode: self.mode,
        })
    }

    pub fn is_root(&self) -> bool {
        self.class == BerTagClass::Universal
    }
}

impl fmt::Display for ElementContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tag class: {}, tag number: {}", self.class, self.number)?;
        if let Some(name) = self.name {
            write!(f, ", name: {}", name)?;
        }
        if let Some(index) = self.index {
            write!(f, ", index: {}", index)?;
        }
        Ok(())
    }
}

/// Severity and message log of one codec instance
#[derive(Debug)]
pub struct Diagnostics {
    source: &'static str,
    severity: ErrorSeverity,
    log: Option<String>,
    first_error: Option<String>,
}

impl Diagnostics {
    pub fn new(source: &'static str) -> Self {
        Self {
            source,
            severity: ErrorSeverity::Success,
            log: None,
            first_error: None,
        }
    }

    /// Forget everything from the previous call
    pub fn reset(&mut self) {
        self.severity = ErrorSeverity::Success;
        self.log = None;
        self.first_error = None;
    }

    pub fn severity(&self) -> ErrorSeverity {
        self.severity
    }

    /// Logged messages, one per line
    pub fn messages(&self) -> &str {
        self.log.as_deref().unwrap_or("")
    }

    /// First error logged during the call
    pub fn first_error(&self) -> Option<&str> {
        self.first_error.as_deref()
    }

    /// Log an informational message without changing the severity
    pub fn log_msg(&mut self, context: &ElementContext, message: &str) {
        log::debug!("{}: {} ({})", self.source, message, context);
        self.append("info", context, message);
    }

    /// Log a warning and raise the severity to at least WARNING
    pub fn log_warning(&mut self, context: &ElementContext, message: &str) {
        log::warn!("{}: {} ({})", self.source, message, context);
        self.append("warning", context, message);
        self.severity = self.severity.max(ErrorSeverity::Warning);
    }

    /// Log an error and raise the severity to ERROR
    pub fn log_error(&mut self, context: &ElementContext, message: &str) {
        log::error!("{}: {} ({})", self.source, message, context);
        self.append("error", context, message);
        if self.first_error.is_none() {
            self.first_error = Some(format!("{} ({})", message, context));
        }
        self.severity = ErrorSeverity::Error;
    }

    fn append(&mut self, level: &str, context: &ElementContext, message: &str) {
        let log = self.log.get_or_insert_with(String::new);
        // Writing to a String cannot fail.
        let _ = writeln!(log, "{} {}: {} ({})", self.source, level, message, context);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_is_monotonic() {
        let mut diagnostics = Diagnostics::new("BER encoder");
        let context = ElementContext::root();
        assert_eq!(diagnostics.severity(), ErrorSeverity::Success);
        assert_eq!(diagnostics.messages(), "");

        diagnostics.log_error(&context, "first");
        diagnostics.log_warning(&context, "second");
        diagnostics.log_msg(&context, "third");
        assert_eq!(diagnostics.severity(), ErrorSeverity::Error);
        assert_eq!(diagnostics.messages().lines().count(), 3);
        assert!(diagnostics.first_error().unwrap().starts_with("first"));

        diagnostics.reset();
        assert_eq!(diagnostics.severity(), ErrorSeverity::Success);
        assert!(diagnostics.first_error().is_none());
        assert_eq!(diagnostics.messages(), "");
    }

    #[test]
    fn test_message_includes_element_context() {
        let mut diagnostics = Diagnostics::new("BER decoder");
        let info = AttributeInfo::new(3, "salary");
        let context = ElementContext::attribute(&info).unwrap().element(2).unwrap();
        diagnostics.log_warning(&context, "truncated");
        assert_eq!(
            diagnostics.messages(),
            "BER decoder warning: truncated (tag class: CONTEXT_SPECIFIC, tag number: 2, name: salary, index: 2)\n"
        );
    }

    #[test]
    fn test_negative_attribute_id_has_no_context() {
        assert!(ElementContext::attribute(&AttributeInfo::new(-2, "bad")).is_none());
    }

    #[test]
    fn test_severity_order() {
        assert!(ErrorSeverity::Success < ErrorSeverity::Warning);
        assert!(ErrorSeverity::Warning < ErrorSeverity::Error);
    }
}
