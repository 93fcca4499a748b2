//! Dynamic cell values produced by column accessors.

use std::cmp::Ordering;
use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;

/// A value extracted from a row by a column accessor.
///
/// Cell values double as sort keys. Their ordering is total:
///
/// | Rank | Variants |
/// |------|----------|
/// | 0 | `Missing` |
/// | 1 | `Bool` |
/// | 2 | `Int`, `Float`, `Decimal` (compared numerically with each other) |
/// | 3 | `Text` |
/// | 4 | `DateTime` |
///
/// `Missing` is what a failing accessor resolves to, so rows whose value
/// could not be read always collect at the low end of an ascending sort.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// No value, or the accessor failed.
    #[default]
    Missing,
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// Arbitrary precision decimal (prices, amounts).
    Decimal(Decimal),
    /// String value.
    Text(String),
    /// Date and time.
    DateTime(DateTime<Utc>),
}

impl CellValue {
    /// Returns `true` if this is the missing value.
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Missing => "missing",
            CellValue::Bool(_) => "bool",
            CellValue::Int(_) => "int",
            CellValue::Float(_) => "float",
            CellValue::Decimal(_) => "decimal",
            CellValue::Text(_) => "text",
            CellValue::DateTime(_) => "datetime",
        }
    }

    fn rank(&self) -> u8 {
        match self {
            CellValue::Missing => 0,
            CellValue::Bool(_) => 1,
            CellValue::Int(_) | CellValue::Float(_) | CellValue::Decimal(_) => 2,
            CellValue::Text(_) => 3,
            CellValue::DateTime(_) => 4,
        }
    }

    /// Compares two values as sort keys.
    pub fn sort_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CellValue::Missing, CellValue::Missing) => Ordering::Equal,
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            (CellValue::Int(a), CellValue::Int(b)) => a.cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            (CellValue::DateTime(a), CellValue::DateTime(b)) => a.cmp(b),
            _ => match (self.numeric_key(), other.numeric_key()) {
                (Some(a), Some(b)) => a.cmp(&b),
                _ => self.rank().cmp(&other.rank()),
            },
        }
    }

    fn numeric_key(&self) -> Option<NumericKey> {
        match self {
            CellValue::Int(v) => Some(NumericKey::Exact(Decimal::from(*v))),
            CellValue::Decimal(v) => Some(NumericKey::Exact(*v)),
            CellValue::Float(v) => Some(match Decimal::from_f64_retain(*v) {
                Some(d) => NumericKey::Exact(d),
                _ if v.is_sign_negative() => NumericKey::Below(*v),
                _ => NumericKey::Above(*v),
            }),
            _ => None,
        }
    }
}

/// Common sort key for every numeric variant.
///
/// Floats that `Decimal` cannot hold (infinities, NaN, magnitudes beyond its
/// range) sit below or above every exact value according to their sign.
#[derive(Debug, Clone, Copy)]
enum NumericKey {
    Below(f64),
    Exact(Decimal),
    Above(f64),
}

impl NumericKey {
    fn band(&self) -> u8 {
        match self {
            NumericKey::Below(_) => 0,
            NumericKey::Exact(_) => 1,
            NumericKey::Above(_) => 2,
        }
    }
}

impl PartialEq for NumericKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NumericKey {}

impl PartialOrd for NumericKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NumericKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (NumericKey::Exact(a), NumericKey::Exact(b)) => a.cmp(b),
            (NumericKey::Below(a), NumericKey::Below(b))
            | (NumericKey::Above(a), NumericKey::Above(b)) => a.total_cmp(b),
            _ => self.band().cmp(&other.band()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Missing => Ok(()),
            CellValue::Bool(v) => write!(f, "{}", v),
            CellValue::Int(v) => write!(f, "{}", v),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::Decimal(v) => write!(f, "{}", v),
            CellValue::Text(v) => f.write_str(v),
            CellValue::DateTime(v) => write!(f, "{}", v.format("%Y-%m-%d %H:%M")),
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        CellValue::Bool(v)
    }
}

impl From<i32> for CellValue {
    fn from(v: i32) -> Self {
        CellValue::Int(v.into())
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Int(v)
    }
}

impl From<u32> for CellValue {
    fn from(v: u32) -> Self {
        CellValue::Int(v.into())
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl From<Decimal> for CellValue {
    fn from(v: Decimal) -> Self {
        CellValue::Decimal(v)
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::Text(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::Text(v.to_string())
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(v: DateTime<Utc>) -> Self {
        CellValue::DateTime(v)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(CellValue::Missing, Into::into)
    }
}
