//! Row reordering helpers and sequence generators

pub mod sorting;
pub mod table;

use num_traits::{CheckedAdd, Num};
use rand::Rng;

use crate::core::cancel::CancellationToken;
use crate::core::error::Result;
use crate::core::range::Range;
use crate::dataframe::{DataFrame, Frame};
use crate::series::{AnySeries, Series, SeriesTrait};

/// Containers whose rows can be swapped in place.
///
/// Implemented by the lock-free inner tiers: a DataFrame swaps every member
/// series in lockstep.
pub trait RowSwap {
    fn row_count(&self) -> usize;

    fn swap_rows(&mut self, i: usize, j: usize);
}

/// Reverse the rows selected by `range`.
pub fn reverse<T: RowSwap + ?Sized>(
    target: &mut T,
    range: &Range,
    cancel: &CancellationToken,
) -> Result<()> {
    let Some((start, end)) = range.limits(target.row_count())? else {
        return Ok(());
    };

    let n = end - start + 1;
    for i in 0..n / 2 {
        cancel.check()?;
        target.swap_rows(start + i, end - i);
    }
    Ok(())
}

/// Shuffle the rows selected by `range` with a caller-supplied generator.
///
/// Seeding `rng` makes the permutation reproducible.
pub fn shuffle<T, R>(
    target: &mut T,
    range: &Range,
    rng: &mut R,
    cancel: &CancellationToken,
) -> Result<()>
where
    T: RowSwap + ?Sized,
    R: Rng,
{
    let Some((start, end)) = range.limits(target.row_count())? else {
        return Ok(());
    };

    for i in (1..=end - start).rev() {
        cancel.check()?;
        let j = rng.random_range(0..=i);
        target.swap_rows(start + i, start + j);
    }
    Ok(())
}

/// Numbers a sequence can step through. `None` ends the sequence.
pub trait SeqStep: Num + PartialOrd + Copy {
    fn add_step(self, step: Self) -> Option<Self>;
}

macro_rules! impl_int_seq_step {
    ($($t:ty),*) => {
        $(impl SeqStep for $t {
            fn add_step(self, step: Self) -> Option<Self> {
                CheckedAdd::checked_add(&self, &step)
            }
        })*
    };
}

impl_int_seq_step!(i32, i64, isize, u32, u64, usize);

impl SeqStep for f64 {
    fn add_step(self, step: Self) -> Option<Self> {
        Some(self + step).filter(|v| v.is_finite())
    }
}

/// Arithmetic sequence beginning at `start` and stopping before it passes `end`.
///
/// `start` is always included. A zero `step` yields only `start`, and
/// `max` caps the number of values. The sequence also ends where the next
/// value would overflow `T`.
pub fn seq<T>(start: T, end: T, step: T, max: Option<usize>) -> Vec<T>
where
    T: SeqStep,
{
    if max == Some(0) {
        return Vec::new();
    }

    let mut out = vec![start];
    if step == T::zero() {
        return out;
    }

    let ascending = step > T::zero();
    let mut last = start;
    loop {
        let Some(next) = last.add_step(step) else {
            break;
        };
        if (ascending && next > end) || (!ascending && next < end) {
            break;
        }
        if max.is_some_and(|m| out.len() >= m) {
            break;
        }
        out.push(next);
        last = next;
    }
    out
}

pub fn int_seq(start: isize, end: isize, step: isize, max: Option<usize>) -> Vec<isize> {
    seq(start, end, step, max)
}

pub fn int64_seq(start: i64, end: i64, step: i64, max: Option<usize>) -> Vec<i64> {
    seq(start, end, step, max)
}

pub fn float64_seq(start: f64, end: f64, step: f64, max: Option<usize>) -> Vec<f64> {
    seq(start, end, step, max)
}

impl RowSwap for AnySeries {
    fn row_count(&self) -> usize {
        self.nrows()
    }

    fn swap_rows(&mut self, i: usize, j: usize) {
        self.swap(i, j)
    }
}

impl RowSwap for Frame {
    fn row_count(&self) -> usize {
        self.nrows()
    }

    fn swap_rows(&mut self, i: usize, j: usize) {
        self.swap(i, j)
    }
}

impl Series {
    pub fn reverse(&self, range: &Range, cancel: &CancellationToken) -> Result<()> {
        reverse(&mut *self.write(), range, cancel)
    }

    pub fn shuffle<R: Rng>(&self, range: &Range, rng: &mut R, cancel: &CancellationToken) -> Result<()> {
        shuffle(&mut *self.write(), range, rng, cancel)
    }
}

impl DataFrame {
    /// Reverse the selected rows, keeping every column aligned.
    pub fn reverse(&self, range: &Range, cancel: &CancellationToken) -> Result<()> {
        reverse(&mut *self.write(), range, cancel)
    }

    pub fn shuffle<R: Rng>(&self, range: &Range, rng: &mut R, cancel: &CancellationToken) -> Result<()> {
        shuffle(&mut *self.write(), range, rng, cancel)
    }
}
