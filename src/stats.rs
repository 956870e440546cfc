//! Rank-correlation summary of sketch quality.
//!
//! A sketch method is useful when its distances order sequence pairs the
//! same way the true edit distance does, even if the scales differ wildly,
//! so the run summary reports Spearman rank correlation of every sketch
//! column against the ground-truth column.

use itertools::Itertools;

use crate::eval::DistanceSet;

/// Average ranks, with ties sharing the mean of their rank range.
fn ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut out = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // Ranks are 1-based; a tie group gets its average rank.
        let rank = (start + 1 + end) as f64 / 2.0;
        for &idx in &order[start..end] {
            out[idx] = rank;
        }
        start = end;
    }
    out
}

/// Pearson correlation of the rank vectors. Returns 0 when either side is
/// constant (the correlation is undefined there, and 0 matches "this
/// column carries no ordering signal").
pub fn spearman(xs: &[f64], ys: &[f64]) -> f64 {
    assert_eq!(xs.len(), ys.len(), "correlation needs paired samples");
    if xs.len() < 2 {
        return 0.0;
    }
    let rx = ranks(xs);
    let ry = ranks(ys);
    let n = xs.len() as f64;
    let mean = (n + 1.0) / 2.0;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in rx.iter().zip(&ry) {
        cov += (x - mean) * (y - mean);
        var_x += (x - mean).powi(2);
        var_y += (y - mean).powi(2);
    }
    if var_x == 0.0 || var_y == 0.0 {
        return 0.0;
    }
    cov / (var_x * var_y).sqrt()
}

/// Spearman correlation of every sketch method against ground truth,
/// as `(name, correlation)` pairs in method order.
pub fn correlation_summary(distances: &DistanceSet) -> Vec<(&'static str, f64)> {
    let truth: Vec<f64> = distances.column(0).iter().map(|&d| d as f64).collect();
    distances
        .methods
        .iter()
        .enumerate()
        .skip(1)
        .map(|(mi, &name)| {
            let column: Vec<f64> = distances.column(mi).iter().map(|&d| d as f64).collect();
            (name, spearman(&truth, &column))
        })
        .collect_vec()
}
