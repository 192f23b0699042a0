use std::any::{Any, TypeId};
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};
use std::sync::Arc;

/// Trait for user-defined values stored in a Generic series
///
/// Implemented automatically for every `'static` type that can be compared,
/// displayed and shared across threads.
pub trait DataValue: Debug + Send + Sync {
    /// Returns the type name of the data value
    fn type_name(&self) -> &'static str;

    /// Returns the `TypeId` of the concrete type
    fn value_type_id(&self) -> TypeId;

    /// Converts the data value to a string representation
    fn to_display(&self) -> String;

    /// Checks if the data value equals another data value
    fn equals(&self, other: &dyn DataValue) -> bool;

    /// Orders two data values of the same concrete type
    fn compare(&self, other: &dyn DataValue) -> Option<Ordering>;

    /// Returns self as an Any for downcasting
    fn as_any(&self) -> &dyn Any;
}

impl<T> DataValue for T
where
    T: Any + Debug + Display + PartialEq + PartialOrd + Send + Sync,
{
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn value_type_id(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn to_display(&self) -> String {
        format!("{}", self)
    }

    fn equals(&self, other: &dyn DataValue) -> bool {
        match other.as_any().downcast_ref::<T>() {
            Some(other) => self == other,
            None => false,
        }
    }

    fn compare(&self, other: &dyn DataValue) -> Option<Ordering> {
        other
            .as_any()
            .downcast_ref::<T>()
            .and_then(|other| self.partial_cmp(other))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Immutable, cheaply cloneable user value.
#[derive(Clone)]
pub struct GenericValue(Arc<dyn DataValue>);

impl GenericValue {
    /// Wrap a user value
    pub fn new<T: DataValue + 'static>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// The concrete type of the wrapped value
    pub fn concrete_type(&self) -> ConcreteType {
        ConcreteType {
            id: self.0.value_type_id(),
            name: self.0.type_name(),
        }
    }

    /// Borrow the wrapped value as `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }

    /// Natural ordering; values of different concrete types order by type name.
    pub fn cmp_natural(&self, other: &GenericValue) -> Ordering {
        match self.0.compare(other.0.as_ref()) {
            Some(ordering) => ordering,
            None => self.0.type_name().cmp(other.0.type_name()),
        }
    }
}

impl PartialEq for GenericValue {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.equals(other.0.as_ref())
    }
}

impl Debug for GenericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&*self.0, f)
    }
}

impl Display for GenericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_display())
    }
}

/// Runtime marker for the type a Generic series accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConcreteType {
    id: TypeId,
    name: &'static str,
}

impl ConcreteType {
    /// Marker for `T`
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Full type name of the marked type
    pub fn name(&self) -> &'static str {
        self.name
    }
}
