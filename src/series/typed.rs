//! Typed column storage
//!
//! [`TypedSeries`] is the lock-free inner representation shared by every
//! Series kind. It keeps the nil count cached so `nil_count` is O(1).

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::core::data_value::{ConcreteType, DataValue, GenericValue};
use crate::core::error::Result;
use crate::core::value::Value;
use crate::series::element::{Element, MixedKinds};

/// Pluggable comparator over two (possibly nil) cells
pub type CompareFn<E> = Arc<dyn Fn(Option<&E>, Option<&E>) -> bool + Send + Sync>;

/// Pluggable cell formatter
pub type FormatFn<E> = Arc<dyn Fn(Option<&E>) -> String + Send + Sync>;

/// Text printed for nil cells by the default formatter
pub const DEFAULT_NIL_TEXT: &str = "NaN";

/// A named, ordered sequence of optional `E` values.
#[derive(Clone)]
pub struct TypedSeries<E: Element> {
    name: String,
    values: Vec<Option<E>>,
    nil_count: usize,
    marker: E::Marker,
    is_equal: Option<CompareFn<E>>,
    is_less_than: Option<CompareFn<E>>,
    formatter: Option<FormatFn<E>>,
}

pub type Float64Series = TypedSeries<f64>;
pub type Int64Series = TypedSeries<i64>;
pub type StringSeries = TypedSeries<String>;
pub type TimeSeries = TypedSeries<DateTime<Utc>>;
pub type GenericSeries = TypedSeries<GenericValue>;
pub type MixedSeries = TypedSeries<Value>;

impl<E: Element<Marker = ()>> TypedSeries<E> {
    /// Create a series from optional values
    pub fn new(name: impl Into<String>, values: impl IntoIterator<Item = Option<E>>) -> Self {
        Self::with_marker(name, (), values)
    }

    /// Create an empty series with room for `capacity` rows
    pub fn with_capacity(name: impl Into<String>, capacity: usize) -> Self {
        Self::empty_with_marker(name, (), capacity)
    }
}

impl GenericSeries {
    /// Create a Generic series that only accepts values of type `T`
    pub fn generic<T>(name: impl Into<String>, values: impl IntoIterator<Item = Option<T>>) -> Self
    where
        T: DataValue + 'static,
    {
        Self::with_marker(
            name,
            ConcreteType::of::<T>(),
            values.into_iter().map(|v| v.map(GenericValue::new)),
        )
    }
}

impl MixedSeries {
    /// Create a Mixed series accepting every kind
    pub fn mixed(name: impl Into<String>, values: impl IntoIterator<Item = Option<Value>>) -> Self {
        Self::with_marker(name, MixedKinds::any(), values)
    }
}

impl<E: Element> TypedSeries<E> {
    /// Create a series with an explicit marker.
    ///
    /// Values are stored as given; they are not validated against `marker`.
    pub fn with_marker(
        name: impl Into<String>,
        marker: E::Marker,
        values: impl IntoIterator<Item = Option<E>>,
    ) -> Self {
        let values: Vec<Option<E>> = values.into_iter().map(E::normalize).collect();
        let nil_count = values.iter().filter(|v| v.is_none()).count();
        Self {
            name: name.into(),
            values,
            nil_count,
            marker,
            is_equal: None,
            is_less_than: None,
            formatter: None,
        }
    }

    pub fn empty_with_marker(name: impl Into<String>, marker: E::Marker, capacity: usize) -> Self {
        Self {
            name: name.into(),
            values: Vec::with_capacity(capacity),
            nil_count: 0,
            marker,
            is_equal: None,
            is_less_than: None,
            formatter: None,
        }
    }

    /// Empty series of the same kind, marker, comparators and formatter
    pub fn new_empty(&self, name: impl Into<String>, capacity: usize) -> Self {
        Self {
            name: name.into(),
            values: Vec::with_capacity(capacity),
            nil_count: 0,
            marker: self.marker.clone(),
            is_equal: self.is_equal.clone(),
            is_less_than: self.is_less_than.clone(),
            formatter: self.formatter.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn nrows(&self) -> usize {
        self.values.len()
    }

    pub fn nil_count(&self) -> usize {
        self.nil_count
    }

    pub fn marker(&self) -> &E::Marker {
        &self.marker
    }

    pub fn type_name(&self) -> String {
        E::type_name(&self.marker)
    }

    /// Stored values in row order
    pub fn values(&self) -> &[Option<E>] {
        &self.values
    }

    /// Cell at `row`. Panics when `row` is out of bounds.
    pub fn get(&self, row: usize) -> Option<&E> {
        self.values[row].as_ref()
    }

    /// Replace the equality comparator
    pub fn set_is_equal_func(&mut self, f: CompareFn<E>) {
        self.is_equal = Some(f);
    }

    /// Replace the ordering comparator
    pub fn set_is_less_than_func(&mut self, f: CompareFn<E>) {
        self.is_less_than = Some(f);
    }

    /// Replace the cell formatter
    pub fn set_formatter(&mut self, f: FormatFn<E>) {
        self.formatter = Some(f);
    }

    /// Convert a dynamic value to storage, checking it against the marker
    pub fn coerce(&self, value: Option<Value>) -> Result<Option<E>> {
        match value {
            None => Ok(None),
            Some(v) => E::from_value(v, &self.marker),
        }
    }

    /// Equality under this series' comparator
    pub fn is_equal_values(&self, a: Option<&E>, b: Option<&E>) -> bool {
        match &self.is_equal {
            Some(f) => f(a, b),
            None => match (a, b) {
                (None, None) => true,
                (Some(a), Some(b)) => a.natural_eq(b),
                _ => false,
            },
        }
    }

    /// Ordering under this series' comparator; nil sorts before non-nil
    pub fn is_less_than_values(&self, a: Option<&E>, b: Option<&E>) -> bool {
        match &self.is_less_than {
            Some(f) => f(a, b),
            None => match (a, b) {
                (None, Some(_)) => true,
                (Some(a), Some(b)) => a.natural_cmp(b) == std::cmp::Ordering::Less,
                _ => false,
            },
        }
    }

    /// Formatted cell at `row`
    pub fn format_at(&self, row: usize) -> String {
        let value = self.values[row].as_ref();
        match &self.formatter {
            Some(f) => f(value),
            None => value.map_or_else(|| DEFAULT_NIL_TEXT.to_string(), |v| v.format()),
        }
    }

    pub fn has_formatter(&self) -> bool {
        self.formatter.is_some()
    }

    fn count_nil(&mut self, value: &Option<E>) {
        if value.is_none() {
            self.nil_count += 1;
        }
    }

    /// Overwrite the cell at `row`
    pub fn set(&mut self, row: usize, value: Option<E>) {
        let value = E::normalize(value);
        let was_nil = self.values[row].is_none();
        if was_nil {
            self.nil_count -= 1;
        }
        if value.is_none() {
            self.nil_count += 1;
        }
        self.values[row] = value;
    }

    /// Add a cell at the end
    pub fn push(&mut self, value: Option<E>) {
        let value = E::normalize(value);
        self.count_nil(&value);
        self.values.push(value);
    }

    /// Add a cell at the start
    pub fn push_front(&mut self, value: Option<E>) {
        self.insert_typed(0, value);
    }

    /// Insert a cell before `row`. `row == nrows` appends.
    pub fn insert_typed(&mut self, row: usize, value: Option<E>) {
        let value = E::normalize(value);
        self.count_nil(&value);
        self.values.insert(row, value);
    }

    /// Remove the cell at `row`, returning it
    pub fn remove_at(&mut self, row: usize) -> Option<E> {
        let old = self.values.remove(row);
        if old.is_none() {
            self.nil_count -= 1;
        }
        old
    }

    pub fn swap_rows(&mut self, i: usize, j: usize) {
        self.values.swap(i, j);
    }

    /// Reorder rows so that row `k` becomes the old row `order[k]`.
    pub(crate) fn permute(&mut self, order: &[usize]) {
        let values: Vec<Option<E>> = order.iter().map(|&i| self.values[i].clone()).collect();
        self.values = values;
    }

    /// Drop every row
    pub fn clear(&mut self) {
        self.values.clear();
        self.nil_count = 0;
    }
}

impl<E: Element> fmt::Debug for TypedSeries<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedSeries")
            .field("name", &self.name)
            .field("type", &self.type_name())
            .field("values", &self.values)
            .field("nil_count", &self.nil_count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nil_count_is_tracked() {
        let mut s = Float64Series::new("x", vec![Some(1.0), None, Some(f64::NAN)]);
        assert_eq!(s.nil_count(), 2);

        s.set(1, Some(4.0));
        assert_eq!(s.nil_count(), 1);
        s.push(None);
        s.push_front(None);
        assert_eq!(s.nil_count(), 3);
        assert_eq!(s.remove_at(0), None);
        assert_eq!(s.nil_count(), 2);
        assert_eq!(s.nrows(), 4);
    }

    #[test]
    fn test_default_comparators() {
        let s = Int64Series::new("x", vec![None, Some(1), Some(2)]);
        assert!(s.is_less_than_values(s.get(0), s.get(1)));
        assert!(!s.is_less_than_values(s.get(1), s.get(0)));
        assert!(s.is_less_than_values(s.get(1), s.get(2)));
        assert!(s.is_equal_values(None, None));
        assert!(!s.is_equal_values(None, s.get(1)));
    }

    #[test]
    fn test_custom_formatter() {
        let mut s = StringSeries::new("x", vec![Some("a".to_string()), None]);
        assert_eq!(s.format_at(1), "NaN");
        s.set_formatter(Arc::new(|v: Option<&String>| {
            v.map_or("-".to_string(), |v| v.to_uppercase())
        }));
        assert_eq!(s.format_at(0), "A");
        assert_eq!(s.format_at(1), "-");
    }
}
