//! framekit: an in-memory columnar DataFrame engine.
//!
//! A [`DataFrame`] is an aligned collection of named, independently typed,
//! nullable [`Series`]. Both are shared handles behind read/write locks;
//! their `read()`/`write()` guards expose the lock-free inner API used to
//! batch many row operations under one lock.
//!
//! ```
//! use framekit::{row, CancellationToken, DataFrame, Series, SortExt, SortKey, SortOptions, NIL};
//!
//! let df = DataFrame::new(vec![
//!     Series::new_int64("day", vec![Some(1), Some(2)]),
//!     Series::new_float64("sales", vec![Some(50.3), None]),
//! ])
//! .unwrap();
//! df.append(row![3, 23.4]).unwrap();
//! df.append(row! { "day" => 4, "sales" => NIL }).unwrap();
//!
//! let cancel = CancellationToken::new();
//! let done = df.sort(&[SortKey::desc("sales")], &SortOptions::default(), &cancel).unwrap();
//! assert!(done);
//! assert_eq!(df.nrows(), 4);
//! ```

// Core module with fundamental values, errors, ranges and cancellation
pub mod core;

// Typed columns
pub mod series;

// Column collections
pub mod dataframe;

// Configuration
pub mod config;

// Nil handling
pub mod na;

// Bounded task groups
pub mod parallel;

// Row reordering, sequences and table rendering
pub mod utils;

// Re-export core types
pub use core::cancel::CancellationToken;
pub use core::data_value::{ConcreteType, DataValue, GenericValue};
pub use core::error::{Error, Result};
pub use core::error_collection::{ErrorCollection, Partial, RowError};
pub use core::range::{ints_to_ranges, Range};
pub use core::value::{IntoValue, Value, ValueKind, NIL};

pub use config::FrameConfig;
pub use dataframe::{
    ApplyExt, ColumnRef, ColumnSummary, DataFrame, Frame, Row, RowValues, RowsIter, SortExt,
    SortKey, TableOptions,
};
pub use parallel::TaskGroup;
pub use series::{
    AnySeries, FilterAction, IsEqualOptions, IterOptions, Series, SeriesKind, SeriesSnapshot,
    SeriesTrait, SortOptions, ValuesIter,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
