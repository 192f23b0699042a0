//! The closed set of Series kinds and their shared capability contract.

use std::fmt;

use crate::core::error::Result;
use crate::core::value::Value;
use crate::series::element::Element;
use crate::series::typed::{
    Float64Series, GenericSeries, Int64Series, MixedSeries, StringSeries, TimeSeries, TypedSeries,
};

/// Series kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesKind {
    Float64,
    Int64,
    String,
    Time,
    Generic,
    Mixed,
}

impl SeriesKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeriesKind::Float64 => "float64",
            SeriesKind::Int64 => "int64",
            SeriesKind::String => "string",
            SeriesKind::Time => "time",
            SeriesKind::Generic => "generic",
            SeriesKind::Mixed => "mixed",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, SeriesKind::Float64 | SeriesKind::Int64)
    }
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capabilities every Series kind provides.
///
/// This is the lock-free tier: callers hold whatever lock guards the series.
/// Row indices past `nrows()` panic.
pub trait SeriesTrait: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    fn rename(&mut self, name: &str);

    fn nrows(&self) -> usize;

    /// Number of nil cells
    fn nil_count(&self) -> usize;

    /// Runtime type name, as shown in table footers
    fn type_name(&self) -> String;

    /// Cell at `row` as a dynamic value
    fn value(&self, row: usize) -> Option<Value>;

    /// Formatted cell at `row`
    fn value_string(&self, row: usize) -> String;

    /// Returns `Ok` when `value` could be stored in this series
    fn accepts(&self, value: Option<&Value>) -> Result<()>;

    fn update(&mut self, row: usize, value: Option<Value>) -> Result<()>;

    fn append(&mut self, value: Option<Value>) -> Result<()>;

    fn prepend(&mut self, value: Option<Value>) -> Result<()>;

    /// Insert before `row`; `row == nrows()` appends
    fn insert(&mut self, row: usize, value: Option<Value>) -> Result<()>;

    fn remove(&mut self, row: usize);

    fn swap(&mut self, i: usize, j: usize);

    /// Compare two rows of this series with its equality comparator
    fn is_equal_at(&self, i: usize, j: usize) -> bool;

    /// Compare two rows of this series with its ordering comparator
    fn is_less_than_at(&self, i: usize, j: usize) -> bool;

    /// Compare a row of this series with a foreign cell.
    ///
    /// Cells that cannot be stored in this series are never equal.
    fn equals_value(&self, row: usize, other: Option<&Value>) -> bool;
}

impl<E: Element> SeriesTrait for TypedSeries<E> {
    fn name(&self) -> &str {
        TypedSeries::name(self)
    }

    fn rename(&mut self, name: &str) {
        TypedSeries::rename(self, name)
    }

    fn nrows(&self) -> usize {
        TypedSeries::nrows(self)
    }

    fn nil_count(&self) -> usize {
        TypedSeries::nil_count(self)
    }

    fn type_name(&self) -> String {
        TypedSeries::type_name(self)
    }

    fn value(&self, row: usize) -> Option<Value> {
        self.get(row).map(Element::to_value)
    }

    fn value_string(&self, row: usize) -> String {
        self.format_at(row)
    }

    fn accepts(&self, value: Option<&Value>) -> Result<()> {
        self.coerce(value.cloned()).map(|_| ())
    }

    fn update(&mut self, row: usize, value: Option<Value>) -> Result<()> {
        let value = self.coerce(value)?;
        self.set(row, value);
        Ok(())
    }

    fn append(&mut self, value: Option<Value>) -> Result<()> {
        let value = self.coerce(value)?;
        self.push(value);
        Ok(())
    }

    fn prepend(&mut self, value: Option<Value>) -> Result<()> {
        let value = self.coerce(value)?;
        self.push_front(value);
        Ok(())
    }

    fn insert(&mut self, row: usize, value: Option<Value>) -> Result<()> {
        let value = self.coerce(value)?;
        self.insert_typed(row, value);
        Ok(())
    }

    fn remove(&mut self, row: usize) {
        self.remove_at(row);
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.swap_rows(i, j)
    }

    fn is_equal_at(&self, i: usize, j: usize) -> bool {
        self.is_equal_values(self.get(i), self.get(j))
    }

    fn is_less_than_at(&self, i: usize, j: usize) -> bool {
        self.is_less_than_values(self.get(i), self.get(j))
    }

    fn equals_value(&self, row: usize, other: Option<&Value>) -> bool {
        match self.coerce(other.cloned()) {
            Ok(other) => self.is_equal_values(self.get(row), other.as_ref()),
            Err(_) => false,
        }
    }
}

/// A Series of any kind.
#[derive(Debug, Clone)]
pub enum AnySeries {
    Float64(Float64Series),
    Int64(Int64Series),
    String(StringSeries),
    Time(TimeSeries),
    Generic(GenericSeries),
    Mixed(MixedSeries),
}

macro_rules! dispatch {
    ($self:expr, $s:ident => $body:expr) => {
        match $self {
            AnySeries::Float64($s) => $body,
            AnySeries::Int64($s) => $body,
            AnySeries::String($s) => $body,
            AnySeries::Time($s) => $body,
            AnySeries::Generic($s) => $body,
            AnySeries::Mixed($s) => $body,
        }
    };
}

macro_rules! dispatch_map {
    ($self:expr, $s:ident => $body:expr) => {
        match $self {
            AnySeries::Float64($s) => AnySeries::Float64($body),
            AnySeries::Int64($s) => AnySeries::Int64($body),
            AnySeries::String($s) => AnySeries::String($body),
            AnySeries::Time($s) => AnySeries::Time($body),
            AnySeries::Generic($s) => AnySeries::Generic($body),
            AnySeries::Mixed($s) => AnySeries::Mixed($body),
        }
    };
}

pub(crate) use dispatch;

impl AnySeries {
    pub fn kind(&self) -> SeriesKind {
        match self {
            AnySeries::Float64(_) => SeriesKind::Float64,
            AnySeries::Int64(_) => SeriesKind::Int64,
            AnySeries::String(_) => SeriesKind::String,
            AnySeries::Time(_) => SeriesKind::Time,
            AnySeries::Generic(_) => SeriesKind::Generic,
            AnySeries::Mixed(_) => SeriesKind::Mixed,
        }
    }

    /// Empty series of the same kind, marker, comparators and formatter
    pub fn new_empty(&self, name: &str, capacity: usize) -> AnySeries {
        dispatch_map!(self, s => s.new_empty(name, capacity))
    }

    /// Deep copy
    pub fn copy(&self) -> AnySeries {
        self.clone()
    }

    /// Reorder rows so that row `k` becomes the old row `order[k]`.
    pub(crate) fn permute(&mut self, order: &[usize]) {
        dispatch!(self, s => s.permute(order))
    }

    /// Whether the formatter was replaced by the caller
    pub fn has_formatter(&self) -> bool {
        dispatch!(self, s => s.has_formatter())
    }

    pub fn as_float64(&self) -> Option<&Float64Series> {
        match self {
            AnySeries::Float64(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int64(&self) -> Option<&Int64Series> {
        match self {
            AnySeries::Int64(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&StringSeries> {
        match self {
            AnySeries::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<&TimeSeries> {
        match self {
            AnySeries::Time(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_generic(&self) -> Option<&GenericSeries> {
        match self {
            AnySeries::Generic(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_mixed(&self) -> Option<&MixedSeries> {
        match self {
            AnySeries::Mixed(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_float64_mut(&mut self) -> Option<&mut Float64Series> {
        match self {
            AnySeries::Float64(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int64_mut(&mut self) -> Option<&mut Int64Series> {
        match self {
            AnySeries::Int64(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_string_mut(&mut self) -> Option<&mut StringSeries> {
        match self {
            AnySeries::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_time_mut(&mut self) -> Option<&mut TimeSeries> {
        match self {
            AnySeries::Time(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_generic_mut(&mut self) -> Option<&mut GenericSeries> {
        match self {
            AnySeries::Generic(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_mixed_mut(&mut self) -> Option<&mut MixedSeries> {
        match self {
            AnySeries::Mixed(s) => Some(s),
            _ => None,
        }
    }
}

impl SeriesTrait for AnySeries {
    fn name(&self) -> &str {
        dispatch!(self, s => TypedSeries::name(s))
    }

    fn rename(&mut self, name: &str) {
        dispatch!(self, s => TypedSeries::rename(s, name))
    }

    fn nrows(&self) -> usize {
        dispatch!(self, s => TypedSeries::nrows(s))
    }

    fn nil_count(&self) -> usize {
        dispatch!(self, s => TypedSeries::nil_count(s))
    }

    fn type_name(&self) -> String {
        dispatch!(self, s => TypedSeries::type_name(s))
    }

    fn value(&self, row: usize) -> Option<Value> {
        dispatch!(self, s => SeriesTrait::value(s, row))
    }

    fn value_string(&self, row: usize) -> String {
        dispatch!(self, s => s.format_at(row))
    }

    fn accepts(&self, value: Option<&Value>) -> Result<()> {
        dispatch!(self, s => s.accepts(value))
    }

    fn update(&mut self, row: usize, value: Option<Value>) -> Result<()> {
        dispatch!(self, s => SeriesTrait::update(s, row, value))
    }

    fn append(&mut self, value: Option<Value>) -> Result<()> {
        dispatch!(self, s => SeriesTrait::append(s, value))
    }

    fn prepend(&mut self, value: Option<Value>) -> Result<()> {
        dispatch!(self, s => SeriesTrait::prepend(s, value))
    }

    fn insert(&mut self, row: usize, value: Option<Value>) -> Result<()> {
        dispatch!(self, s => SeriesTrait::insert(s, row, value))
    }

    fn remove(&mut self, row: usize) {
        dispatch!(self, s => SeriesTrait::remove(s, row))
    }

    fn swap(&mut self, i: usize, j: usize) {
        dispatch!(self, s => s.swap_rows(i, j))
    }

    fn is_equal_at(&self, i: usize, j: usize) -> bool {
        dispatch!(self, s => s.is_equal_at(i, j))
    }

    fn is_less_than_at(&self, i: usize, j: usize) -> bool {
        dispatch!(self, s => s.is_less_than_at(i, j))
    }

    fn equals_value(&self, row: usize, other: Option<&Value>) -> bool {
        dispatch!(self, s => s.equals_value(row, other))
    }
}

impl From<Float64Series> for AnySeries {
    fn from(s: Float64Series) -> Self {
        AnySeries::Float64(s)
    }
}

impl From<Int64Series> for AnySeries {
    fn from(s: Int64Series) -> Self {
        AnySeries::Int64(s)
    }
}

impl From<StringSeries> for AnySeries {
    fn from(s: StringSeries) -> Self {
        AnySeries::String(s)
    }
}

impl From<TimeSeries> for AnySeries {
    fn from(s: TimeSeries) -> Self {
        AnySeries::Time(s)
    }
}

impl From<GenericSeries> for AnySeries {
    fn from(s: GenericSeries) -> Self {
        AnySeries::Generic(s)
    }
}

impl From<MixedSeries> for AnySeries {
    fn from(s: MixedSeries) -> Self {
        AnySeries::Mixed(s)
    }
}
