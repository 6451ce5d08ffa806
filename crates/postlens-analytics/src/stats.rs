//! Small numeric helpers shared by the aggregation passes.

use std::collections::HashMap;
use std::hash::Hash;

use chrono::{DateTime, Utc};

/// Arithmetic mean, or `None` for an empty slice.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median, averaging the two middle values for even lengths.
#[must_use]
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len().is_multiple_of(2) {
        Some(f64::midpoint(sorted[mid - 1], sorted[mid]))
    } else {
        Some(sorted[mid])
    }
}

/// Pearson correlation coefficient of paired samples.
///
/// `None` with fewer than two pairs, mismatched lengths, or zero variance
/// on either side.
#[must_use]
pub fn pearson_r(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    // A constant series has zero variance even when its rounded mean does not.
    if is_constant(xs) || is_constant(ys) {
        return None;
    }
    let mx = mean(xs)?;
    let my = mean(ys)?;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mx;
        let dy = y - my;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some(cov / (var_x * var_y).sqrt())
}

#[allow(clippy::float_cmp)]
fn is_constant(values: &[f64]) -> bool {
    values.iter().all(|v| *v == values[0])
}

/// Posts per week across the span of `timestamps`.
///
/// The span is counted in whole days and treated as one day when shorter.
/// `None` with fewer than two timestamps.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn posts_per_week(timestamps: &[DateTime<Utc>]) -> Option<f64> {
    if timestamps.len() < 2 {
        return None;
    }
    let first = timestamps.iter().min()?;
    let last = timestamps.iter().max()?;
    let span_days = (*last - *first).num_days().max(1);
    Some(timestamps.len() as f64 / (span_days as f64 / 7.0))
}

/// Values grouped by key, remembering the order each key was first seen.
#[derive(Debug)]
pub(crate) struct OrderedGroups<K> {
    index: HashMap<K, usize>,
    groups: Vec<(K, Vec<f64>)>,
}

impl<K: Eq + Hash + Clone> OrderedGroups<K> {
    pub(crate) fn new() -> Self {
        Self {
            index: HashMap::new(),
            groups: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, key: K, value: f64) {
        if let Some(&i) = self.index.get(&key) {
            self.groups[i].1.push(value);
        } else {
            self.index.insert(key.clone(), self.groups.len());
            self.groups.push((key, vec![value]));
        }
    }

    pub(crate) fn into_groups(self) -> Vec<(K, Vec<f64>)> {
        self.groups
    }
}
