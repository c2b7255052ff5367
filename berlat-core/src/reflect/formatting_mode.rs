//! Per-field formatting hints
//!
//! A formatting mode selects among several valid wire renderings of a simple
//! value. The low three bits hold the base mode; flag bits such as
//! [`FormattingMode::LIST`] are orthogonal to it.

use std::fmt;
use std::ops::BitOr;

/// Base rendering selected by a [`FormattingMode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseMode {
    Default,
    Dec,
    Hex,
    Base64,
    Text,
    Unset,
}

/// Formatting mode bitmask attached to attributes and selections
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FormattingMode(u32);

impl FormattingMode {
    pub const DEFAULT: Self = Self(0x0);
    pub const DEC: Self = Self(0x1);
    pub const HEX: Self = Self(0x2);
    pub const BASE64: Self = Self(0x3);
    pub const TEXT: Self = Self(0x4);
    pub const UNSET: Self = Self(0x7);

    /// Whitespace-separated list rendering (text formats only)
    pub const LIST: Self = Self(0x8_0000);

    const TYPE_MASK: u32 = 0x7;

    /// Create a mode from raw bits
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Get the raw bits
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Combine two modes
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Check if every flag bit of `flag` is set
    ///
    /// Only meaningful for flag bits such as [`FormattingMode::LIST`]; use
    /// [`FormattingMode::base`] to inspect the base mode.
    pub const fn contains(self, flag: Self) -> bool {
        self.0 & flag.0 == flag.0
    }

    /// Get the base mode, ignoring flag bits
    pub const fn base(self) -> BaseMode {
        match self.0 & Self::TYPE_MASK {
            0 => BaseMode::Default,
            1 => BaseMode::Dec,
            2 => BaseMode::Hex,
            3 => BaseMode::Base64,
            4 => BaseMode::Text,
            _ => BaseMode::Unset,
        }
    }

    /// Get the mode with all flag bits removed
    pub const fn without_flags(self) -> Self {
        Self(self.0 & Self::TYPE_MASK)
    }
}

impl BitOr for FormattingMode {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl fmt::Debug for FormattingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.base())?;
        if self.contains(Self::LIST) {
            f.write_str("|List")?;
        }
        Ok(())
    }
}
