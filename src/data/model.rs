use std::cmp::Ordering;
use std::fmt;

// ---------------------------------------------------------------------------
// ValueKey – a cell value usable as a grouping key
// ---------------------------------------------------------------------------

/// A numeric cell wrapped so it can key a `BTreeMap` / `BTreeSet`.
/// Ordering follows `f64::total_cmp`, so `-0.0 < 0.0` and NaN sorts last.
#[derive(Debug, Clone, Copy)]
pub struct ValueKey(pub f64);

impl PartialEq for ValueKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ValueKey {}

impl PartialOrd for ValueKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ValueKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for ValueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_number(self.0, is_integral(self.0), f)
    }
}

fn is_integral(v: f64) -> bool {
    v.is_finite() && v.fract() == 0.0
}

fn format_number(v: f64, integral: bool, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if integral {
        write!(f, "{v:.0}")
    } else {
        write!(f, "{v}")
    }
}

// ---------------------------------------------------------------------------
// Column – one named numeric column
// ---------------------------------------------------------------------------

/// A single named column of the source file.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<f64>,
    /// Every value is a whole number (e.g. `quality`); shown without decimals.
    pub integral: bool,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        let integral = values.iter().all(|&v| is_integral(v));
        Column {
            name: name.into(),
            values,
            integral,
        }
    }

    /// Render one value the way the preview table shows it.
    pub fn display_value(&self, row: usize) -> String {
        match self.values.get(row) {
            Some(&v) if self.integral => format!("{v:.0}"),
            Some(v) => v.to_string(),
            None => String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The parsed file: columns in header order, all of equal length.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub columns: Vec<Column>,
}

impl Dataset {
    pub fn new(columns: Vec<Column>) -> Self {
        debug_assert!(
            columns.windows(2).all(|w| w[0].values.len() == w[1].values.len()),
            "columns must have equal length"
        );
        Dataset { columns }
    }

    /// Column names in header order.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn value_keys_deduplicate_and_sort() {
        let keys: BTreeSet<ValueKey> = [6.0, 5.0, 6.0, 7.0, 5.0]
            .into_iter()
            .map(ValueKey)
            .collect();
        let ordered: Vec<f64> = keys.into_iter().map(|k| k.0).collect();
        assert_eq!(ordered, vec![5.0, 6.0, 7.0]);
    }

    #[test]
    fn value_key_display_drops_decimals_for_whole_numbers() {
        assert_eq!(ValueKey(5.0).to_string(), "5");
        assert_eq!(ValueKey(9.4).to_string(), "9.4");
    }

    #[test]
    fn integral_columns_are_detected() {
        let quality = Column::new("quality", vec![5.0, 6.0]);
        let acidity = Column::new("fixed acidity", vec![7.4, 7.8]);
        assert!(quality.integral);
        assert!(!acidity.integral);
        assert_eq!(quality.display_value(1), "6");
        assert_eq!(acidity.display_value(0), "7.4");
        assert_eq!(acidity.display_value(9), "");
    }

    #[test]
    fn dataset_lookup_by_name() {
        let ds = Dataset::new(vec![
            Column::new("a", vec![1.0, 2.0]),
            Column::new("quality", vec![5.0, 6.0]),
        ]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.width(), 2);
        assert_eq!(ds.column_names(), vec!["a", "quality"]);
        assert!(ds.column("quality").is_some());
        assert!(ds.column("alcohol").is_none());
    }
}
