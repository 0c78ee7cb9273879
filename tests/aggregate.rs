#[cfg(test)]
mod tests {
    use cyclet::libs::aggregate::{aggregate, aggregate_partitioned, overall, MetricsError, ValidRange};

    fn range(max_valid: i64) -> ValidRange {
        ValidRange::new(0, max_valid).unwrap()
    }

    fn records(pairs: &[(&str, i64)]) -> Vec<(String, i64)> {
        pairs.iter().map(|(key, minutes)| (key.to_string(), *minutes)).collect()
    }

    #[test]
    fn test_median_even_count_interpolates() {
        let records = records(&[("a", 10), ("a", 20), ("a", 30), ("a", 40)]);
        let buckets = aggregate(&records, &range(1000)).unwrap();
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].median_minutes, 25.0);
        assert_eq!(buckets[0].count, 4);
    }

    #[test]
    fn test_median_odd_count_takes_middle() {
        let records = records(&[("a", 10), ("a", 20), ("a", 30)]);
        let buckets = aggregate(&records, &range(1000)).unwrap();
        assert_eq!(buckets[0].median_minutes, 20.0);
        assert_eq!(buckets[0].count, 3);
    }

    #[test]
    fn test_median_rounds_to_two_decimals() {
        let records = records(&[("a", 10), ("a", 11), ("a", 11), ("a", 12)]);
        let buckets = aggregate(&records, &range(1000)).unwrap();
        assert_eq!(buckets[0].median_minutes, 11.0);

        let stats = overall(&self::records(&[("a", 1), ("a", 2)]), &range(1000)).unwrap();
        assert_eq!(stats.median_minutes, 1.5);
    }

    #[test]
    fn test_outliers_and_zero_durations_excluded() {
        let records = records(&[("a", 0), ("a", -5), ("a", 30), ("a", 500), ("a", 1000)]);
        let buckets = aggregate(&records, &range(500)).unwrap();
        // Only 30 survives: zero/negative fail the floor, 500 and 1000 the ceiling.
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].count, 1);
        assert_eq!(buckets[0].median_minutes, 30.0);
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let records: Vec<(String, i64)> = Vec::new();
        assert!(aggregate(&records, &range(1000)).unwrap().is_empty());

        let stats = overall(&records, &range(1000)).unwrap();
        assert_eq!(stats.count, 0);
        assert_eq!(stats.median_minutes, 0.0);
    }

    #[test]
    fn test_all_records_filtered_yields_empty_output() {
        let records = records(&[("a", 0), ("b", 9999)]);
        assert!(aggregate(&records, &range(100)).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_range_rejected() {
        assert_eq!(ValidRange::new(100, 100).unwrap_err(), MetricsError::InvalidRange { min: 100, max: 100 });

        // A range constructed by hand is still rejected at aggregation entry.
        let bad = ValidRange { min_valid: 50, max_valid: 10 };
        let records = records(&[("a", 30)]);
        assert!(aggregate(&records, &bad).is_err());
        assert!(overall(&records, &bad).is_err());
    }

    #[test]
    fn test_buckets_sorted_by_key() {
        let records = records(&[("c", 10), ("a", 20), ("b", 30), ("a", 40)]);
        let buckets = aggregate(&records, &range(1000)).unwrap();
        let keys: Vec<&str> = buckets.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_overall_differs_from_weighted_group_average() {
        // Group "a": [1, 2, 3] (median 2, count 3); group "b": [100] (median 100).
        let records = records(&[("a", 1), ("a", 2), ("a", 3), ("b", 100)]);
        let valid = range(1000);

        let buckets = aggregate(&records, &valid).unwrap();
        let weighted: f64 = buckets.iter().map(|b| b.median_minutes * b.count as f64).sum::<f64>()
            / buckets.iter().map(|b| b.count).sum::<usize>() as f64;

        let stats = overall(&records, &valid).unwrap();
        // True overall median of [1, 2, 3, 100] is 2.5; the weighted figure is 26.5.
        assert_eq!(stats.median_minutes, 2.5);
        assert!((weighted - 26.5).abs() < 1e-9);
        assert_ne!(stats.median_minutes, weighted);
    }

    #[test]
    fn test_partitioned_aggregation_matches_sequential() {
        let mut records: Vec<((String, String), i64)> = Vec::new();
        for org in ["org-a", "org-b", "org-c"] {
            for supplier in ["s1", "s2"] {
                for minutes in [5, 40, 75, 200, 390, 880] {
                    records.push(((org.to_string(), supplier.to_string()), minutes));
                }
            }
        }
        let valid = range(500);

        let sequential = aggregate(&records, &valid).unwrap();
        let partitioned = aggregate_partitioned(&records, &valid, |key| key.0.clone()).unwrap();
        assert_eq!(sequential, partitioned);

        // A different partition granularity must not change the result either.
        let by_supplier = aggregate_partitioned(&records, &valid, |key| key.1.clone()).unwrap();
        assert_eq!(sequential, by_supplier);
    }
}
