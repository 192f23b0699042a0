// Core data structures and traits for framekit
pub mod cancel;
pub mod data_value;
pub mod error;
pub mod error_collection;
pub mod range;
pub mod value;

// Re-exports for convenience
pub use cancel::CancellationToken;
pub use data_value::{ConcreteType, DataValue, GenericValue};
pub use error::{Error, Result};
pub use error_collection::{ErrorCollection, Partial, RowError};
pub use range::{ints_to_ranges, Range};
pub use value::{IntoValue, Value, ValueKind, NIL};
