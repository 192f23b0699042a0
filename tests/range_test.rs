//! Range resolution tests

use framekit::{ints_to_ranges, Error, Range};
use proptest::prelude::*;

#[test]
fn test_range_defaults_cover_every_row() {
    assert_eq!(Range::all().limits(5).unwrap(), Some((0, 4)));
    assert_eq!(Range::from_start(-2).limits(5).unwrap(), Some((3, 4)));
    assert_eq!(Range::to_end(1).limits(5).unwrap(), Some((0, 1)));
    assert_eq!(Range::finite(-3, -1).nrows(5).unwrap(), 3);
}

#[test]
fn test_zero_rows_is_not_an_error() {
    assert_eq!(Range::finite(3, 10).limits(0).unwrap(), None);
    assert_eq!(Range::all().nrows(0).unwrap(), 0);
    assert!(Range::all().rows(0).unwrap().is_empty());
}

#[test]
fn test_out_of_bounds_and_reversed() {
    assert!(matches!(Range::finite(0, 5).limits(5), Err(Error::InvalidRange(_))));
    assert!(matches!(Range::finite(-6, 0).limits(5), Err(Error::InvalidRange(_))));
    assert!(matches!(Range::finite(3, 1).limits(5), Err(Error::InvalidRange(_))));
}

#[test]
fn test_ints_to_ranges_merges_runs() {
    let ranges = ints_to_ranges(&[7, 1, 2, 3, 9, 8, 2, 12]);
    assert_eq!(
        ranges,
        vec![Range::finite(1, 3), Range::finite(7, 9), Range::finite(12, 12)]
    );
    assert!(ints_to_ranges(&[]).is_empty());
    assert_eq!(Range::finite(1, 3).to_string(), "Range:1-3");
}

proptest! {
    #[test]
    fn prop_limits_stay_in_bounds(n in 1usize..500, a in 0usize..500, b in 0usize..500) {
        let (lo, hi) = (a.min(b) % n, a.max(b) % n);
        let (lo, hi) = (lo.min(hi), lo.max(hi));
        let (s, e) = Range::finite(lo as isize, hi as isize).limits(n).unwrap().unwrap();
        prop_assert!(s <= e && e <= n - 1);
        prop_assert_eq!((s, e), (lo, hi));
    }

    #[test]
    fn prop_negative_index_matches_offset(n in 1usize..500, a in 1usize..500) {
        let k = (a % n) + 1;
        let negative = Range::finite(-(k as isize), -1).limits(n).unwrap();
        let positive = Range::finite((n - k) as isize, (n - 1) as isize).limits(n).unwrap();
        prop_assert_eq!(negative, positive);
    }
}
