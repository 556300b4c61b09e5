//! Period join
//!
//! Inner join of two per-region observation lists on the time period.
//! Periods present on only one side are dropped; the counts of dropped
//! rows are kept on the result so callers can surface the loss.

use super::types::Observation;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// One matched period with the value from each side
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct JoinedRow {
    pub period: i32,
    pub left: f64,
    pub right: f64,
}

/// Result of joining two tables on period
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct JoinedTable {
    /// Matched rows, ascending by period
    pub rows: Vec<JoinedRow>,
    /// Left rows whose period had no partner
    pub dropped_left: usize,
    /// Right rows whose period had no partner
    pub dropped_right: usize,
}

impl JoinedTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn periods(&self) -> Vec<i32> {
        self.rows.iter().map(|r| r.period).collect()
    }

    pub fn left_values(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.left).collect()
    }

    pub fn right_values(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.right).collect()
    }

    /// First and last period, if any rows matched
    pub fn period_bounds(&self) -> Option<(i32, i32)> {
        let first = self.rows.first()?.period;
        let last = self.rows.last()?.period;
        Some((first, last))
    }
}

/// Inner-join two observation lists on `period`
///
/// Duplicate periods produce every left/right pairing for that period.
/// The output is stably sorted by period, so pairs within a period keep
/// left order first, then right order.
pub fn join_on_period(left: &[&Observation], right: &[&Observation]) -> JoinedTable {
    let mut right_by_period: HashMap<i32, Vec<f64>> = HashMap::new();
    for obs in right {
        right_by_period.entry(obs.period).or_default().push(obs.value);
    }

    let mut rows = Vec::new();
    let mut dropped_left = 0;

    for obs in left {
        match right_by_period.get(&obs.period) {
            Some(values) => rows.extend(values.iter().map(|&r| JoinedRow {
                period: obs.period,
                left: obs.value,
                right: r,
            })),
            None => dropped_left += 1,
        }
    }

    let left_periods: HashSet<i32> = left.iter().map(|obs| obs.period).collect();
    let dropped_right = right
        .iter()
        .filter(|obs| !left_periods.contains(&obs.period))
        .count();

    rows.sort_by_key(|r| r.period);

    if dropped_left > 0 || dropped_right > 0 {
        tracing::debug!(
            matched = rows.len(),
            dropped_left,
            dropped_right,
            "Periods without a partner were dropped from the join"
        );
    }

    JoinedTable {
        rows,
        dropped_left,
        dropped_right,
    }
}
