//! Per-kind storage rules
//!
//! Each Series kind stores `Option<E>` for one [`Element`] type. The trait
//! decides which dynamic [`Value`]s a kind accepts and how its values are
//! naturally compared and printed.

use std::cmp::Ordering;
use std::fmt::Debug;

use chrono::{DateTime, Utc};

use crate::core::data_value::{ConcreteType, GenericValue};
use crate::core::error::{Error, Result};
use crate::core::value::{Value, ValueKind};

/// `v` as an i64 when it is integral and inside the i64 range.
/// 2^63 itself is out of range, so the upper bound is exclusive.
pub(crate) fn exact_i64(v: f64) -> Option<i64> {
    const BOUND: f64 = 9_223_372_036_854_775_808.0;
    if v.fract() == 0.0 && (-BOUND..BOUND).contains(&v) {
        Some(v as i64)
    } else {
        None
    }
}

/// Storage type of a Series kind.
pub trait Element: Clone + Debug + Send + Sync + 'static {
    /// Extra per-series state used to validate inserted values
    type Marker: Clone + Debug + PartialEq + Send + Sync;

    /// Name shown in table footers
    fn type_name(marker: &Self::Marker) -> String;

    /// Convert a dynamic value into storage. `Ok(None)` stores a nil.
    fn from_value(value: Value, marker: &Self::Marker) -> Result<Option<Self>>;

    /// Convert storage back into a dynamic value
    fn to_value(&self) -> Value;

    fn natural_eq(&self, other: &Self) -> bool;

    fn natural_cmp(&self, other: &Self) -> Ordering;

    /// Default rendering of a non-nil value
    fn format(&self) -> String;

    /// Normalize a value before it is stored
    fn normalize(value: Option<Self>) -> Option<Self> {
        value
    }
}

fn mismatch(expected: impl Into<String>, found: &Value) -> Error {
    Error::TypeMismatch {
        expected: expected.into(),
        found: found.type_name(),
    }
}

impl Element for f64 {
    type Marker = ();

    fn type_name(_: &()) -> String {
        "float64".to_string()
    }

    fn from_value(value: Value, _: &()) -> Result<Option<Self>> {
        match value {
            Value::Float64(v) if v.is_nan() => Ok(None),
            Value::Float64(v) => Ok(Some(v)),
            Value::Int64(v) => Ok(Some(v as f64)),
            other => Err(mismatch("float64", &other)),
        }
    }

    fn to_value(&self) -> Value {
        Value::Float64(*self)
    }

    fn natural_eq(&self, other: &Self) -> bool {
        self == other
    }

    fn natural_cmp(&self, other: &Self) -> Ordering {
        self.partial_cmp(other).unwrap_or(Ordering::Equal)
    }

    fn format(&self) -> String {
        self.to_string()
    }

    // NaN is stored as nil
    fn normalize(value: Option<Self>) -> Option<Self> {
        value.filter(|v| !v.is_nan())
    }
}

impl Element for i64 {
    type Marker = ();

    fn type_name(_: &()) -> String {
        "int64".to_string()
    }

    fn from_value(value: Value, _: &()) -> Result<Option<Self>> {
        match value {
            Value::Int64(v) => Ok(Some(v)),
            Value::Float64(v) if v.is_nan() => Ok(None),
            Value::Float64(v) => match exact_i64(v) {
                Some(i) => Ok(Some(i)),
                None => Err(mismatch("int64", &Value::Float64(v))),
            },
            other => Err(mismatch("int64", &other)),
        }
    }

    fn to_value(&self) -> Value {
        Value::Int64(*self)
    }

    fn natural_eq(&self, other: &Self) -> bool {
        self == other
    }

    fn natural_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn format(&self) -> String {
        self.to_string()
    }
}

impl Element for String {
    type Marker = ();

    fn type_name(_: &()) -> String {
        "string".to_string()
    }

    fn from_value(value: Value, _: &()) -> Result<Option<Self>> {
        match value {
            Value::String(v) => Ok(Some(v)),
            other => Err(mismatch("string", &other)),
        }
    }

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }

    fn natural_eq(&self, other: &Self) -> bool {
        self == other
    }

    fn natural_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn format(&self) -> String {
        self.clone()
    }
}

impl Element for DateTime<Utc> {
    type Marker = ();

    fn type_name(_: &()) -> String {
        "time".to_string()
    }

    fn from_value(value: Value, _: &()) -> Result<Option<Self>> {
        match value {
            Value::Time(v) => Ok(Some(v)),
            other => Err(mismatch("time", &other)),
        }
    }

    fn to_value(&self) -> Value {
        Value::Time(*self)
    }

    fn natural_eq(&self, other: &Self) -> bool {
        self == other
    }

    fn natural_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn format(&self) -> String {
        self.to_rfc3339()
    }
}

impl Element for GenericValue {
    type Marker = ConcreteType;

    fn type_name(marker: &ConcreteType) -> String {
        marker.name().to_string()
    }

    fn from_value(value: Value, marker: &ConcreteType) -> Result<Option<Self>> {
        match value {
            Value::Generic(v) if v.concrete_type() == *marker => Ok(Some(v)),
            other => Err(mismatch(marker.name(), &other)),
        }
    }

    fn to_value(&self) -> Value {
        Value::Generic(self.clone())
    }

    fn natural_eq(&self, other: &Self) -> bool {
        self == other
    }

    fn natural_cmp(&self, other: &Self) -> Ordering {
        self.cmp_natural(other)
    }

    fn format(&self) -> String {
        self.to_string()
    }
}

/// Kinds a Mixed series accepts. An empty whitelist accepts every kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MixedKinds {
    allowed: Vec<ValueKind>,
}

impl MixedKinds {
    /// Accept every kind
    pub fn any() -> Self {
        Self::default()
    }

    /// Accept only the listed kinds
    pub fn only(kinds: impl IntoIterator<Item = ValueKind>) -> Self {
        let mut allowed: Vec<ValueKind> = kinds.into_iter().collect();
        allowed.sort();
        allowed.dedup();
        Self { allowed }
    }

    pub fn allows(&self, kind: ValueKind) -> bool {
        self.allowed.is_empty() || self.allowed.contains(&kind)
    }

    pub fn kinds(&self) -> &[ValueKind] {
        &self.allowed
    }
}

impl Element for Value {
    type Marker = MixedKinds;

    fn type_name(_: &MixedKinds) -> String {
        "mixed".to_string()
    }

    fn from_value(value: Value, marker: &MixedKinds) -> Result<Option<Self>> {
        if let Value::Float64(v) = value {
            if v.is_nan() {
                return Ok(None);
            }
        }
        if marker.allows(value.kind()) {
            Ok(Some(value))
        } else {
            let expected = marker
                .kinds()
                .iter()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join("|");
            Err(mismatch(expected, &value))
        }
    }

    fn to_value(&self) -> Value {
        self.clone()
    }

    fn natural_eq(&self, other: &Self) -> bool {
        self == other
    }

    fn natural_cmp(&self, other: &Self) -> Ordering {
        self.cmp_natural(other)
    }

    fn format(&self) -> String {
        self.to_string()
    }

    fn normalize(value: Option<Self>) -> Option<Self> {
        value.filter(|v| !matches!(v, Value::Float64(f) if f.is_nan()))
    }
}
