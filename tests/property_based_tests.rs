mod common;

use common::strategies::*;
use dashboard_insights::insights::grouped::{aggregate_rows, Count, Median};
use dashboard_insights::insights::lookup::{get_value, get_value_or_none, EndpointMap};
use dashboard_insights::statistics::median;
use proptest::prelude::*;

proptest! {
    /// Property: absent keys resolve to the default and the map is left untouched
    #[test]
    fn absent_keys_return_default_without_mutation(
        rows in measurement_rows_strategy(),
        key in "[A-Z]{1,8}",
        default in any::<i64>(),
    ) {
        let counts = aggregate_rows(rows, &Count);
        let before = counts.clone();

        // generated endpoint names are lowercase, so an uppercase key is always absent
        prop_assert_eq!(get_value(&counts, &key, default), default);
        prop_assert_eq!(get_value_or_none(&counts, &key), None);
        prop_assert_eq!(counts, before);
    }

    /// Property: present keys resolve to their value regardless of the default
    #[test]
    fn present_keys_ignore_default(rows in measurement_rows_strategy(), default in any::<i64>()) {
        let counts = aggregate_rows(rows, &Count);
        for (key, value) in &counts {
            prop_assert_eq!(get_value(&counts, key, default), *value);
        }
    }

    /// Property: the median lies between the minimum and maximum
    #[test]
    fn median_is_bounded(values in prop::collection::vec(execution_time_strategy(), 1..50)) {
        let m = median(&values).unwrap();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(min <= m && m <= max);
    }

    /// Property: the median does not depend on input order
    #[test]
    fn median_ignores_order(values in prop::collection::vec(execution_time_strategy(), 1..50)) {
        let mut reversed = values.clone();
        reversed.reverse();
        prop_assert_eq!(median(&values), median(&reversed));
    }

    /// Property: per-endpoint counts add up to the number of rows and every
    /// grouped key appears in the input
    #[test]
    fn grouped_counts_partition_rows(rows in measurement_rows_strategy()) {
        let counts: EndpointMap<i64> = aggregate_rows(rows.clone(), &Count);

        prop_assert_eq!(counts.values().sum::<i64>(), rows.len() as i64);
        for key in counts.keys() {
            prop_assert!(rows.iter().any(|(name, _)| name == key));
        }
    }

    /// Property: grouping the same rows twice gives identical medians
    #[test]
    fn grouped_medians_are_deterministic(rows in measurement_rows_strategy()) {
        let first = aggregate_rows(rows.clone(), &Median);
        let second = aggregate_rows(rows, &Median);
        prop_assert_eq!(first, second);
    }
}

#[test]
fn test_median_of_empty_slice_is_none() {
    assert_eq!(median(&[]), None);
}
