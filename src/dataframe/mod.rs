// DataFrame implementations module
pub mod apply;
pub mod base;
pub mod display;
pub mod iter;
pub mod row;
pub mod sort;
pub mod summary;

// Re-exports for convenience
pub use apply::ApplyExt;
pub use base::{DataFrame, Frame};
pub use display::TableOptions;
pub use iter::RowsIter;
pub use row::{ColumnRef, Row, RowValues};
pub use sort::{SortExt, SortKey};
pub use summary::ColumnSummary;
