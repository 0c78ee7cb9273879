//! Statistical aggregation of cycle time durations.
//!
//! Takes `(grouping key, minutes)` pairs, drops records outside the metric's
//! validity range, and produces per-group count and median buckets plus an
//! overall figure over the ungrouped survivors. Everything here is pure and
//! request-scoped: no shared state, no I/O, safe to call concurrently.
//!
//! ## Median Semantics
//!
//! Medians use linear interpolation: for an even-sized group the two middle
//! values are averaged. The overall median is always computed from the full
//! surviving record set, *not* as the count-weighted average of the
//! per-group medians; the two genuinely differ on skewed data.

use std::collections::BTreeMap;
use std::thread;
use thiserror::Error;

/// Errors raised by the aggregation layer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetricsError {
    /// The caller-supplied validity range would silently discard every record.
    #[error("invalid validity range: max_valid ({max}) must be greater than min_valid ({min})")]
    InvalidRange { min: i64, max: i64 },
}

/// Open interval of plausible durations for one metric.
///
/// Records are kept only when `min_valid < minutes < max_valid`. The floor is
/// usually zero (zero and negative durations are data noise); the ceiling is
/// metric-specific business policy supplied by the caller, never a constant
/// baked into the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidRange {
    pub min_valid: i64,
    pub max_valid: i64,
}

impl ValidRange {
    pub fn new(min_valid: i64, max_valid: i64) -> Result<Self, MetricsError> {
        let range = ValidRange { min_valid, max_valid };
        range.validate()?;
        Ok(range)
    }

    /// Rejects ranges that would filter out every possible record.
    pub fn validate(&self) -> Result<(), MetricsError> {
        if self.max_valid <= self.min_valid {
            return Err(MetricsError::InvalidRange {
                min: self.min_valid,
                max: self.max_valid,
            });
        }
        Ok(())
    }

    pub fn contains(&self, minutes: i64) -> bool {
        minutes > self.min_valid && minutes < self.max_valid
    }
}

/// Per-group aggregation result: the externally visible unit.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateBucket<K> {
    pub key: K,
    /// Interpolated 50th percentile, rounded to 2 decimals by convention.
    pub median_minutes: f64,
    /// Number of records surviving the validity filter.
    pub count: usize,
}

/// Ungrouped summary over the full surviving record set.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Overall {
    pub median_minutes: f64,
    pub count: usize,
}

/// Groups records by key and computes count and median per group.
///
/// Buckets come back sorted ascending by key, so callers get deterministic
/// output for snapshot-style comparisons. Empty input, or input where every
/// record falls outside `range`, yields an empty vector rather than an error.
pub fn aggregate<K: Ord + Clone>(records: &[(K, i64)], range: &ValidRange) -> Result<Vec<AggregateBucket<K>>, MetricsError> {
    range.validate()?;

    let mut groups: BTreeMap<K, Vec<i64>> = BTreeMap::new();
    for (key, minutes) in records {
        if range.contains(*minutes) {
            groups.entry(key.clone()).or_default().push(*minutes);
        }
    }

    Ok(groups
        .into_iter()
        .map(|(key, mut minutes)| {
            minutes.sort_unstable();
            AggregateBucket {
                key,
                median_minutes: round2(median_sorted(&minutes)),
                count: minutes.len(),
            }
        })
        .collect())
}

/// Single median and count over all surviving records, ignoring grouping.
///
/// This must come from the ungrouped set: a weighted average of per-group
/// medians is a different (and wrong) number.
pub fn overall<K>(records: &[(K, i64)], range: &ValidRange) -> Result<Overall, MetricsError> {
    range.validate()?;

    let mut minutes: Vec<i64> = records.iter().map(|(_, m)| *m).filter(|m| range.contains(*m)).collect();
    minutes.sort_unstable();

    Ok(Overall {
        median_minutes: round2(median_sorted(&minutes)),
        count: minutes.len(),
    })
}

/// Same contract as [`aggregate`], computed in parallel batches.
///
/// Records are partitioned by `partition` (a pure function of the key, e.g.
/// the organization component), each partition is aggregated on its own
/// thread, and the partial buckets are merged by key. Because records with
/// equal keys always land in the same partition, the result is identical to
/// the sequential form regardless of batch boundaries or execution order.
pub fn aggregate_partitioned<K, P, F>(records: &[(K, i64)], range: &ValidRange, partition: F) -> Result<Vec<AggregateBucket<K>>, MetricsError>
where
    K: Ord + Clone + Send + Sync,
    P: Ord,
    F: Fn(&K) -> P,
{
    range.validate()?;

    let mut partitions: BTreeMap<P, Vec<(K, i64)>> = BTreeMap::new();
    for (key, minutes) in records {
        partitions.entry(partition(key)).or_default().push((key.clone(), *minutes));
    }
    let batches: Vec<Vec<(K, i64)>> = partitions.into_values().collect();

    let mut buckets = Vec::new();
    thread::scope(|scope| -> Result<(), MetricsError> {
        let handles: Vec<_> = batches.iter().map(|batch| scope.spawn(move || aggregate(batch, range))).collect();
        for handle in handles {
            buckets.extend(handle.join().expect("aggregation worker panicked")?);
        }
        Ok(())
    })?;

    // Partitions are disjoint in key space; a plain sort restores the
    // ascending-by-key contract.
    buckets.sort_by(|a, b| a.key.cmp(&b.key));
    Ok(buckets)
}

fn median_sorted(sorted: &[i64]) -> f64 {
    match sorted.len() {
        0 => 0.0,
        n if n % 2 == 1 => sorted[n / 2] as f64,
        n => (sorted[n / 2 - 1] as f64 + sorted[n / 2] as f64) / 2.0,
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
