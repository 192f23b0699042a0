//! Dynamic cell values
//!
//! [`Value`] is the currency of the untyped Series API: `value(row)`,
//! `update`, `append` and the row maps handed to Apply/Filter callbacks all
//! use `Option<Value>`, where `None` is nil.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::core::data_value::{DataValue, GenericValue};

/// A single non-nil cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Float64(f64),
    Int64(i64),
    String(String),
    Time(DateTime<Utc>),
    Generic(GenericValue),
}

/// The kind of a [`Value`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueKind {
    Float64,
    Int64,
    String,
    Time,
    Generic,
}

impl ValueKind {
    /// Lower-case name used in table footers and error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Float64 => "float64",
            ValueKind::Int64 => "int64",
            ValueKind::String => "string",
            ValueKind::Time => "time",
            ValueKind::Generic => "generic",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    /// Wrap a user-defined value
    pub fn generic<T: DataValue + 'static>(value: T) -> Self {
        Value::Generic(GenericValue::new(value))
    }

    /// Kind of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Float64(_) => ValueKind::Float64,
            Value::Int64(_) => ValueKind::Int64,
            Value::String(_) => ValueKind::String,
            Value::Time(_) => ValueKind::Time,
            Value::Generic(_) => ValueKind::Generic,
        }
    }

    /// Name of the runtime type, including the concrete user type for generics
    pub fn type_name(&self) -> String {
        match self {
            Value::Generic(g) => g.concrete_type().name().to_string(),
            other => other.kind().as_str().to_string(),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float64(v) => Some(*v),
            Value::Int64(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<&DateTime<Utc>> {
        match self {
            Value::Time(v) => Some(v),
            _ => None,
        }
    }

    /// Natural ordering across kinds.
    ///
    /// Numbers compare numerically with each other, then strings, times and
    /// generic values follow in that order.
    pub fn cmp_natural(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Int64(a), Value::Int64(b)) => a.cmp(b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::Time(a), Value::Time(b)) => a.cmp(b),
            (Value::Generic(a), Value::Generic(b)) => a.cmp_natural(b),
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
                _ => kind_rank(a.kind()).cmp(&kind_rank(b.kind())),
            },
        }
    }
}

fn kind_rank(kind: ValueKind) -> u8 {
    match kind {
        ValueKind::Float64 | ValueKind::Int64 => 0,
        ValueKind::String => 1,
        ValueKind::Time => 2,
        ValueKind::Generic => 3,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Float64(v) => write!(f, "{}", v),
            Value::Int64(v) => write!(f, "{}", v),
            Value::String(v) => f.write_str(v),
            Value::Time(v) => write!(f, "{}", v),
            Value::Generic(v) => write!(f, "{}", v),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float64(v as f64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int64(v as i64)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::Int64(v as i64)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Time(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::Time(v.and_utc())
    }
}

impl From<GenericValue> for Value {
    fn from(v: GenericValue) -> Self {
        Value::Generic(v)
    }
}

/// Nil cell
pub const NIL: Option<Value> = None;

/// Conversion into a nullable cell.
///
/// Lets call sites pass plain literals, `Option`s and [`NIL`] interchangeably.
pub trait IntoValue {
    fn into_value(self) -> Option<Value>;
}

macro_rules! impl_into_value {
    ($($t:ty),* $(,)?) => {
        $(
            impl IntoValue for $t {
                fn into_value(self) -> Option<Value> {
                    Some(Value::from(self))
                }
            }

            impl IntoValue for Option<$t> {
                fn into_value(self) -> Option<Value> {
                    self.map(Value::from)
                }
            }
        )*
    };
}

impl_into_value!(f64, f32, i64, i32, usize, String, &str, DateTime<Utc>, NaiveDateTime, GenericValue);

impl IntoValue for Value {
    fn into_value(self) -> Option<Value> {
        Some(self)
    }
}

impl IntoValue for Option<Value> {
    fn into_value(self) -> Option<Value> {
        self
    }
}
