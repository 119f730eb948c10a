//! Forced-row selection for preview samples
//!
//! Every orderable column contributes its leading rows and the rows holding
//! its largest and smallest values. Extremes are found with bounded heaps,
//! so each column costs O(N log k) instead of a full sort.

use std::cmp::Reverse;
use std::collections::{BTreeSet, BinaryHeap};

use crate::core::table::TableSource;

/// Leading rows kept for continuity of the visible preview
pub const HEAD_ROWS: usize = 10;

/// Rows reserved for each tail: `ceil(target * extreme_fraction)`
pub fn extreme_count(target: usize, extreme_fraction: f64) -> usize {
    (target as f64 * extreme_fraction).ceil() as usize
}

/// Rows of the `k` largest ranked cells of a column.
///
/// Nulls are skipped; among equal values the earlier row wins.
pub fn largest_rows<T: TableSource + ?Sized>(table: &T, col: usize, k: usize) -> Vec<usize> {
    if k == 0 {
        return Vec::new();
    }

    // Heap top is the weakest candidate: smallest key, then latest row
    let mut heap = BinaryHeap::with_capacity(k + 1);
    for row in 0..table.row_count() {
        if let Some(key) = table.order_key(col, row) {
            heap.push((Reverse(key), row));
            if heap.len() > k {
                heap.pop();
            }
        }
    }

    heap.into_iter().map(|(_, row)| row).collect()
}

/// Rows of the `k` smallest ranked cells of a column.
///
/// Nulls are skipped; among equal values the earlier row wins.
pub fn smallest_rows<T: TableSource + ?Sized>(table: &T, col: usize, k: usize) -> Vec<usize> {
    if k == 0 {
        return Vec::new();
    }

    // Heap top is the weakest candidate: largest key, then latest row
    let mut heap = BinaryHeap::with_capacity(k + 1);
    for row in 0..table.row_count() {
        if let Some(key) = table.order_key(col, row) {
            heap.push((key, row));
            if heap.len() > k {
                heap.pop();
            }
        }
    }

    heap.into_iter().map(|(_, row)| row).collect()
}

/// Union of head rows and per-column extremes over all orderable columns
pub fn forced_rows<T: TableSource + ?Sized>(
    table: &T,
    target: usize,
    per_tail: usize,
) -> BTreeSet<usize> {
    let head = table.row_count().min(HEAD_ROWS).min(target);
    let mut forced = BTreeSet::new();

    for col in 0..table.column_count() {
        if !table.column_type(col).is_orderable() {
            continue;
        }

        forced.extend(0..head);
        forced.extend(largest_rows(table, col, per_tail));
        forced.extend(smallest_rows(table, col, per_tail));
    }

    forced
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Column, ColumnType, Table, Value};
    use chrono::NaiveDate;

    fn table() -> Table {
        Table::from_columns(vec![
            Column::new(
                "v",
                ColumnType::Float64,
                vec![
                    Value::Float64(5.0),
                    Value::Float64(9.0),
                    Value::Null,
                    Value::Float64(1.0),
                    Value::Float64(9.0),
                    Value::Float64(1.0),
                    Value::Float64(f64::NAN),
                    Value::Float64(3.0),
                ],
            )
            .unwrap(),
            Column::string("s", vec!["h", "g", "f", "e", "d", "c", "b", "a"]),
        ])
        .unwrap()
    }

    fn sorted(mut rows: Vec<usize>) -> Vec<usize> {
        rows.sort_unstable();
        rows
    }

    #[test]
    fn test_extreme_count() {
        assert_eq!(extreme_count(100, 0.05), 5);
        assert_eq!(extreme_count(101, 0.05), 6);
        assert_eq!(extreme_count(10, 0.0), 0);
        assert_eq!(extreme_count(0, 0.05), 0);
    }

    #[test]
    fn test_largest_ties_prefer_earlier_rows() {
        let t = table();
        assert_eq!(sorted(largest_rows(&t, 0, 1)), vec![1]);
        assert_eq!(sorted(largest_rows(&t, 0, 2)), vec![1, 4]);
        assert_eq!(sorted(largest_rows(&t, 0, 3)), vec![0, 1, 4]);
    }

    #[test]
    fn test_smallest_ties_prefer_earlier_rows() {
        let t = table();
        assert_eq!(sorted(smallest_rows(&t, 0, 1)), vec![3]);
        assert_eq!(sorted(smallest_rows(&t, 0, 3)), vec![3, 5, 7]);
    }

    #[test]
    fn test_nulls_and_nan_never_ranked() {
        let t = table();
        let all = sorted(largest_rows(&t, 0, 100));
        assert_eq!(all, vec![0, 1, 3, 4, 5, 7]);
        assert!(largest_rows(&t, 0, 0).is_empty());
    }

    #[test]
    fn test_int64_beyond_float_precision() {
        let big = 1i64 << 53;
        let t = Table::from_columns(vec![
            Column::int64("up", vec![big, big + 1, 0]),
            Column::int64("down", vec![-big, -big - 1, 0]),
        ])
        .unwrap();
        assert_eq!(largest_rows(&t, 0, 1), vec![1]);
        assert_eq!(smallest_rows(&t, 1, 1), vec![1]);
    }

    #[test]
    fn test_datetime_sub_millisecond_order() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let t = Table::from_columns(vec![Column::datetime(
            "ts",
            vec![
                day.and_hms_micro_opt(9, 30, 0, 100).unwrap(),
                day.and_hms_micro_opt(9, 30, 0, 900).unwrap(),
                day.and_hms_micro_opt(9, 30, 0, 500).unwrap(),
            ],
        )])
        .unwrap();
        assert_eq!(largest_rows(&t, 0, 1), vec![1]);
        assert_eq!(smallest_rows(&t, 0, 1), vec![0]);
    }

    #[test]
    fn test_boolean_extremes() {
        let t = Table::from_columns(vec![Column::boolean(
            "flag",
            vec![false, false, true, false, true],
        )])
        .unwrap();
        assert_eq!(largest_rows(&t, 0, 1), vec![2]);
        assert_eq!(smallest_rows(&t, 0, 1), vec![0]);
        assert_eq!(sorted(largest_rows(&t, 0, 3)), vec![0, 2, 4]);
    }

    #[test]
    fn test_string_columns_contribute_nothing() {
        let t = Table::from_columns(vec![Column::string("s", vec!["b", "a", "c"])]).unwrap();
        assert!(forced_rows(&t, 3, 1).is_empty());
    }

    #[test]
    fn test_forced_rows_union() {
        let t = table();
        // head of 2 rows plus one row per tail
        let forced = forced_rows(&t, 2, 1);
        assert_eq!(forced.into_iter().collect::<Vec<_>>(), vec![0, 1, 3]);
    }
}
