//! Multi-key DataFrame sort.
//!
//! Row indices are sorted with a composite comparator: for each key in
//! order, rows that the key's series considers equal fall through to the
//! next key; otherwise the series' ordering decides, inverted for
//! descending keys. The resulting permutation is then applied with
//! lockstep swaps across every series.

use log::{debug, warn};
use parking_lot::RwLockReadGuard;

use crate::core::cancel::CancellationToken;
use crate::core::error::Result;
use crate::dataframe::base::{DataFrame, Frame};
use crate::dataframe::row::ColumnRef;
use crate::series::sort::{ordered, SortOptions};
use crate::series::AnySeries;
use crate::utils::sorting;

/// A column to sort by and its direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub column: ColumnRef,
    pub desc: bool,
}

impl SortKey {
    pub fn asc<C: Into<ColumnRef>>(column: C) -> Self {
        Self {
            column: column.into(),
            desc: false,
        }
    }

    pub fn desc<C: Into<ColumnRef>>(column: C) -> Self {
        Self {
            column: column.into(),
            desc: true,
        }
    }
}

/// Sorting for DataFrames
pub trait SortExt {
    /// Sort rows by `keys`.
    ///
    /// Returns `Ok(false)` when `cancel` fired before the sort finished; rows
    /// already swapped stay swapped. Unknown key columns are an error.
    fn sort(&self, keys: &[SortKey], opts: &SortOptions, cancel: &CancellationToken) -> Result<bool>;
}

impl Frame {
    pub fn sort(&mut self, keys: &[SortKey], opts: &SortOptions, cancel: &CancellationToken) -> Result<bool> {
        // Resolve each key once; repeated columns share one guard.
        let mut columns: Vec<usize> = Vec::new();
        let mut resolved: Vec<(usize, bool)> = Vec::with_capacity(keys.len());
        for key in keys {
            let idx = self.column_index(&key.column)?;
            let slot = match columns.iter().position(|&c| c == idx) {
                Some(slot) => slot,
                None => {
                    columns.push(idx);
                    columns.len() - 1
                }
            };
            resolved.push((slot, key.desc));
        }

        let n = self.nrows();
        debug!("sorting {} rows by {} keys (stable: {})", n, keys.len(), opts.stable);
        if resolved.is_empty() || n < 2 {
            return Ok(cancel.check().is_ok());
        }

        let mut order: Vec<usize> = (0..n).collect();
        let completed = {
            let guards: Vec<RwLockReadGuard<'_, AnySeries>> =
                columns.iter().map(|&c| self.series()[c].read()).collect();
            let less = |a: &usize, b: &usize| {
                for &(slot, desc) in &resolved {
                    if let Some(less) = ordered(&guards[slot], *a, *b, desc) {
                        return less;
                    }
                }
                false
            };
            sorting::sort_by(&mut order, opts.stable, less, cancel)
        };
        if !completed {
            warn!("sort cancelled before ordering was decided");
            return Ok(false);
        }

        Ok(self.apply_order(&order, cancel))
    }

    /// Move old row `order[k]` to position `k`, one permutation cycle at a time.
    fn apply_order(&mut self, order: &[usize], cancel: &CancellationToken) -> bool {
        let mut placed = vec![false; order.len()];
        for start in 0..order.len() {
            if placed[start] {
                continue;
            }
            if cancel.is_cancelled() {
                warn!("sort cancelled while reordering rows");
                return false;
            }
            let mut current = start;
            loop {
                placed[current] = true;
                let next = order[current];
                if next == start {
                    break;
                }
                self.swap(current, next);
                current = next;
            }
        }
        true
    }
}

impl SortExt for DataFrame {
    fn sort(&self, keys: &[SortKey], opts: &SortOptions, cancel: &CancellationToken) -> Result<bool> {
        self.write().sort(keys, opts, cancel)
    }
}
