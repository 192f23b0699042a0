//! Index sorts that tolerate inconsistent comparators and can be aborted.
//!
//! User comparators are not required to be a total order, so these sorts
//! never panic on contradictory answers. Cancellation is polled from the
//! first comparison on; once it fires the comparator is no longer called
//! and the sort unwinds, leaving `items` a permutation of its input.

use crate::core::cancel::CancellationToken;

const CHECK_EVERY: usize = 64;

struct Guarded<'a, F> {
    less: F,
    cancel: &'a CancellationToken,
    calls: usize,
    aborted: bool,
}

impl<F> Guarded<'_, F> {
    fn less<T>(&mut self, a: &T, b: &T) -> bool
    where
        F: FnMut(&T, &T) -> bool,
    {
        if self.aborted {
            return false;
        }
        if self.calls % CHECK_EVERY == 0 && self.cancel.is_cancelled() {
            self.aborted = true;
            return false;
        }
        self.calls += 1;
        (self.less)(a, b)
    }
}

/// Sort `items` with `less`. Returns `false` if `cancel` fired.
pub fn sort_by<T, F>(items: &mut [T], stable: bool, less: F, cancel: &CancellationToken) -> bool
where
    T: Copy,
    F: FnMut(&T, &T) -> bool,
{
    if cancel.is_cancelled() {
        return false;
    }
    let mut guarded = Guarded {
        less,
        cancel,
        calls: 0,
        aborted: false,
    };
    if stable {
        merge_sort(items, &mut guarded);
    } else {
        heap_sort(items, &mut guarded);
    }
    !guarded.aborted
}

fn merge_sort<T, F>(items: &mut [T], g: &mut Guarded<'_, F>)
where
    T: Copy,
    F: FnMut(&T, &T) -> bool,
{
    let n = items.len();
    if n < 2 {
        return;
    }

    let mut buf = items.to_vec();
    let mut width = 1;
    while width < n {
        let mut start = 0;
        while start < n {
            let mid = (start + width).min(n);
            let end = (start + 2 * width).min(n);
            merge(&items[start..mid], &items[mid..end], &mut buf[start..end], g);
            start += 2 * width;
        }
        items.copy_from_slice(&buf);
        if g.aborted {
            return;
        }
        width *= 2;
    }
}

// Ties take from the left run, which keeps the sort stable.
fn merge<T, F>(left: &[T], right: &[T], out: &mut [T], g: &mut Guarded<'_, F>)
where
    T: Copy,
    F: FnMut(&T, &T) -> bool,
{
    let (mut i, mut j, mut k) = (0, 0, 0);
    while i < left.len() && j < right.len() {
        if g.less(&right[j], &left[i]) {
            out[k] = right[j];
            j += 1;
        } else {
            out[k] = left[i];
            i += 1;
        }
        k += 1;
    }
    for &v in &left[i..] {
        out[k] = v;
        k += 1;
    }
    for &v in &right[j..] {
        out[k] = v;
        k += 1;
    }
}

fn heap_sort<T, F>(items: &mut [T], g: &mut Guarded<'_, F>)
where
    T: Copy,
    F: FnMut(&T, &T) -> bool,
{
    let n = items.len();
    if n < 2 {
        return;
    }

    for root in (0..n / 2).rev() {
        sift_down(items, root, n, g);
    }
    for end in (1..n).rev() {
        if g.aborted {
            return;
        }
        items.swap(0, end);
        sift_down(items, 0, end, g);
    }
}

fn sift_down<T, F>(items: &mut [T], mut root: usize, end: usize, g: &mut Guarded<'_, F>)
where
    T: Copy,
    F: FnMut(&T, &T) -> bool,
{
    loop {
        let mut child = 2 * root + 1;
        if child >= end {
            break;
        }
        if child + 1 < end && g.less(&items[child], &items[child + 1]) {
            child += 1;
        }
        if !g.less(&items[root], &items[child]) {
            break;
        }
        items.swap(root, child);
        root = child;
    }
}
