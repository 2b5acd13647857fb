//! Typed table cells
//!
//! Rows start life as strings. Numeric columns are coerced cell by cell into
//! [`Number`]; anything that fails to parse stays [`Cell::Text`].

// Integer to float conversion only happens for display/averaging.
#![allow(clippy::cast_precision_loss)]

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// A coerced numeric value
///
/// Integers stay integers until they meet a float, so `1000 + 200` renders as
/// `1200` while an average renders as `1500.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Number {
    /// Integral value
    Int(i64),
    /// Floating point value (always finite)
    Float(f64),
}

impl Number {
    /// Parse a cell value, integer first then float
    ///
    /// Surrounding whitespace is ignored. Non-finite values (`inf`, `NaN`) are
    /// rejected.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let s = raw.trim();
        if s.is_empty() {
            return None;
        }
        if let Ok(i) = s.parse::<i64>() {
            return Some(Self::Int(i));
        }
        s.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(Self::Float)
    }

    /// Value as `f64`
    #[inline]
    #[must_use]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(i) => i as f64,
            Self::Float(f) => f,
        }
    }

    /// Add two numbers, staying integral when both operands are
    #[must_use]
    pub fn add(self, other: Self) -> Self {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a
                .checked_add(b)
                .map_or_else(|| Self::Float(a as f64 + b as f64), Self::Int),
            (a, b) => Self::Float(a.as_f64() + b.as_f64()),
        }
    }

    /// Total ordering by numeric value
    #[inline]
    #[must_use]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (a, b) => a.as_f64().total_cmp(&b.as_f64()),
        }
    }
}

/// Round to `decimals` places, exact ties going to the even digit
#[must_use]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(i32::try_from(decimals).unwrap_or(i32::MAX));
    let rounded = (value * factor).round_ties_even() / factor;
    if rounded.is_finite() {
        rounded
    } else {
        value
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) if v.fract() == 0.0 && v.abs() < 1e16 => write!(f, "{v:.1}"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

/// One value in an enriched table row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    /// Successfully coerced numeric value
    Number(Number),
    /// Raw text (non-numeric column, or a failed coercion)
    Text(String),
    /// Derived value whose operands were not both numeric
    NotComputable,
}

impl Cell {
    /// Numeric value, if any
    #[inline]
    #[must_use]
    pub const fn as_number(&self) -> Option<Number> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => fmt::Display::fmt(n, f),
            Self::Text(s) => f.write_str(s),
            Self::NotComputable => Ok(()),
        }
    }
}
