use std::collections::BTreeMap;

use super::model::{Column, Dataset, ValueKey};

// ---------------------------------------------------------------------------
// Descriptive statistics
// ---------------------------------------------------------------------------

/// Row labels of the summary table, in display order.
pub const SUMMARY_LABELS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// `describe()`-style statistics for one column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n − 1 denominator).
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl ColumnSummary {
    /// Values in the same order as [`SUMMARY_LABELS`].
    pub fn values(&self) -> [f64; 8] {
        [
            self.count as f64,
            self.mean,
            self.std,
            self.min,
            self.q25,
            self.median,
            self.q75,
            self.max,
        ]
    }
}

/// Summarise every column of the dataset, in column order.
pub fn describe(dataset: &Dataset) -> Vec<ColumnSummary> {
    dataset.columns.iter().map(summarize).collect()
}

/// Summarise a single column. An empty column yields `count == 0` and NaN
/// everywhere else; `std` needs at least two values.
pub fn summarize(column: &Column) -> ColumnSummary {
    let values = &column.values;
    let n = values.len();

    let mut sorted = values.clone();
    sorted.sort_by(f64::total_cmp);

    let mean = if n == 0 {
        f64::NAN
    } else {
        values.iter().sum::<f64>() / n as f64
    };
    let std = if n < 2 {
        f64::NAN
    } else {
        let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (n - 1) as f64).sqrt()
    };

    ColumnSummary {
        name: column.name.clone(),
        count: n,
        mean,
        std,
        min: sorted.first().copied().unwrap_or(f64::NAN),
        q25: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q75: quantile(&sorted, 0.75),
        max: sorted.last().copied().unwrap_or(f64::NAN),
    }
}

/// Linear interpolation between the two closest ranks of a sorted slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

// ---------------------------------------------------------------------------
// Correlation
// ---------------------------------------------------------------------------

/// Square matrix of pairwise Pearson coefficients, indexed like `names`.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub names: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row][col]
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Pearson correlation between every pair of columns.
///
/// Only the upper triangle is computed; the lower one is mirrored so the
/// result is exactly symmetric.
pub fn correlation(dataset: &Dataset) -> CorrelationMatrix {
    let n = dataset.width();
    let mut values = vec![vec![f64::NAN; n]; n];

    for i in 0..n {
        for j in i..n {
            let r = pearson(&dataset.columns[i].values, &dataset.columns[j].values);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix {
        names: dataset.column_names(),
        values,
    }
}

/// Pearson's r, clamped to [-1, 1]. NaN when fewer than two observations or
/// either side has zero variance.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return f64::NAN;
    }
    let (xs, ys) = (&xs[..n], &ys[..n]);
    let mean_x = xs.iter().sum::<f64>() / n as f64;
    let mean_y = ys.iter().sum::<f64>() / n as f64;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (&x, &y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return f64::NAN;
    }
    (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
}

// ---------------------------------------------------------------------------
// Frequencies
// ---------------------------------------------------------------------------

/// Row count per distinct value, ascending by value.
pub fn value_counts(values: &[f64]) -> BTreeMap<ValueKey, usize> {
    let mut counts = BTreeMap::new();
    for &v in values {
        *counts.entry(ValueKey(v)).or_insert(0) += 1;
    }
    counts
}
