use std::collections::BTreeMap;

use super::loader::DatasetError;
use super::model::{Column, Dataset, ValueKey};
use super::stats::value_counts;

/// The integer score column the count plot is built from.
pub const QUALITY_COLUMN: &str = "quality";

// ---------------------------------------------------------------------------
// Column selection for the scatter plot
// ---------------------------------------------------------------------------

/// The user's picks on the analysis page, by column name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSelection {
    pub x: String,
    pub y: String,
    pub hue: Option<String>,
}

impl ColumnSelection {
    /// X and Y on the first column, no hue. `None` for a column-less dataset.
    pub fn first_column(dataset: &Dataset) -> Option<Self> {
        let first = dataset.columns.first()?;
        Some(ColumnSelection {
            x: first.name.clone(),
            y: first.name.clone(),
            hue: None,
        })
    }

    /// The hue column actually used for colouring.
    ///
    /// A hue that names the X or Y column is dropped silently.
    pub fn effective_hue(&self) -> Option<&str> {
        self.hue
            .as_deref()
            .filter(|hue| *hue != self.x && *hue != self.y)
    }
}

// ---------------------------------------------------------------------------
// Scatter series
// ---------------------------------------------------------------------------

/// One colour group of the scatter plot.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    /// Hue value shared by every point, `None` for the uncoloured plot.
    pub hue: Option<ValueKey>,
    pub points: Vec<[f64; 2]>,
}

/// Split the rows into scatter series.
///
/// Without an effective hue there is exactly one series holding every row;
/// otherwise one series per distinct hue value, ascending.
pub fn scatter_series(
    dataset: &Dataset,
    selection: &ColumnSelection,
) -> Result<Vec<ScatterSeries>, DatasetError> {
    let x = require(dataset, &selection.x)?;
    let y = require(dataset, &selection.y)?;
    let points = x.values.iter().zip(&y.values).map(|(&xi, &yi)| [xi, yi]);

    let Some(hue_name) = selection.effective_hue() else {
        return Ok(vec![ScatterSeries {
            hue: None,
            points: points.collect(),
        }]);
    };
    let hue = require(dataset, hue_name)?;

    let mut groups: BTreeMap<ValueKey, Vec<[f64; 2]>> = BTreeMap::new();
    for (point, &h) in points.zip(&hue.values) {
        groups.entry(ValueKey(h)).or_default().push(point);
    }
    Ok(groups
        .into_iter()
        .map(|(key, points)| ScatterSeries {
            hue: Some(key),
            points,
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Count plot
// ---------------------------------------------------------------------------

/// One bar of the count plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountBar {
    pub value: ValueKey,
    pub count: usize,
}

/// Row frequency per distinct value of `column`, ascending by value.
pub fn count_bars(dataset: &Dataset, column: &str) -> Result<Vec<CountBar>, DatasetError> {
    let col = require(dataset, column)?;
    Ok(value_counts(&col.values)
        .into_iter()
        .map(|(value, count)| CountBar { value, count })
        .collect())
}

fn require<'a>(dataset: &'a Dataset, name: &str) -> Result<&'a Column, DatasetError> {
    dataset.column(name).ok_or_else(|| DatasetError::MissingColumn {
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_from_reader;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn wine() -> Dataset {
        load_from_reader(
            "alcohol;pH;quality\n9.4;3.51;5\n9.8;3.20;5\n9.8;3.26;6\n11.0;3.16;7\n".as_bytes(),
        )
        .unwrap()
    }

    fn select(x: &str, y: &str, hue: Option<&str>) -> ColumnSelection {
        ColumnSelection {
            x: x.to_string(),
            y: y.to_string(),
            hue: hue.map(str::to_string),
        }
    }

    #[test]
    fn no_hue_gives_single_series() {
        let series = scatter_series(&wine(), &select("alcohol", "pH", None)).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].hue, None);
        assert_eq!(series[0].points.len(), 4);
        assert_eq!(series[0].points[0], [9.4, 3.51]);
    }

    #[test]
    fn hue_equal_to_x_is_suppressed() {
        let sel = select("quality", "pH", Some("quality"));
        assert_eq!(sel.effective_hue(), None);
        let series = scatter_series(&wine(), &sel).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].hue, None);
    }

    #[test]
    fn hue_equal_to_y_is_suppressed() {
        let sel = select("alcohol", "quality", Some("quality"));
        let series = scatter_series(&wine(), &sel).unwrap();
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn distinct_hue_splits_by_value() {
        let sel = select("alcohol", "pH", Some("quality"));
        assert_eq!(sel.effective_hue(), Some("quality"));
        let series = scatter_series(&wine(), &sel).unwrap();
        let hues: Vec<f64> = series.iter().map(|s| s.hue.unwrap().0).collect();
        assert_eq!(hues, vec![5.0, 6.0, 7.0]);
        assert_eq!(series[0].points.len(), 2);
        let total: usize = series.iter().map(|s| s.points.len()).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn x_equal_to_y_still_honours_distinct_hue() {
        let sel = select("pH", "pH", Some("alcohol"));
        let series = scatter_series(&wine(), &sel).unwrap();
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn unknown_column_is_an_error() {
        let err = scatter_series(&wine(), &select("density", "pH", None)).unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn { name } if name == "density"));
    }

    #[test]
    fn count_bars_for_small_file() {
        let ds = load_from_reader("a;quality\n1.0;5\n2.0;6\n2.0;5\n".as_bytes()).unwrap();
        let bars = count_bars(&ds, QUALITY_COLUMN).unwrap();
        assert_eq!(
            bars,
            vec![
                CountBar {
                    value: ValueKey(5.0),
                    count: 2
                },
                CountBar {
                    value: ValueKey(6.0),
                    count: 1
                },
            ]
        );
        let total: usize = bars.iter().map(|b| b.count).sum();
        assert_eq!(total, ds.len());
    }

    #[test]
    fn count_bars_need_quality_column() {
        let ds = load_from_reader("a;b\n1;2\n".as_bytes()).unwrap();
        assert!(count_bars(&ds, QUALITY_COLUMN).is_err());
    }

    #[test]
    fn default_selection_uses_first_column() {
        let sel = ColumnSelection::first_column(&wine()).unwrap();
        assert_eq!(sel, select("alcohol", "alcohol", None));
    }

    proptest! {
        /// One bar per distinct quality score; heights sum to the row count.
        #[test]
        fn one_bar_per_distinct_quality(qualities in prop::collection::vec(3i64..9, 0..80)) {
            let values: Vec<f64> = qualities.iter().map(|&q| q as f64).collect();
            let ds = Dataset::new(vec![
                Column::new("alcohol", vec![10.0; values.len()]),
                Column::new(QUALITY_COLUMN, values),
            ]);
            let distinct: BTreeSet<i64> = qualities.iter().copied().collect();

            let bars = count_bars(&ds, QUALITY_COLUMN).unwrap();
            prop_assert_eq!(bars.len(), distinct.len());
            prop_assert_eq!(bars.iter().map(|b| b.count).sum::<usize>(), ds.len());
        }

        /// A distinct hue yields one series per distinct hue value; no hue, or
        /// a hue naming X or Y, yields a single series.
        #[test]
        fn one_series_per_distinct_hue(
            rows in prop::collection::vec((-10.0..10.0_f64, -10.0..10.0_f64, 0i64..6), 1..80),
            pick in 0usize..4,
        ) {
            let ds = Dataset::new(vec![
                Column::new("x", rows.iter().map(|r| r.0).collect()),
                Column::new("y", rows.iter().map(|r| r.1).collect()),
                Column::new("h", rows.iter().map(|r| r.2 as f64).collect()),
            ]);
            let hue = [None, Some("h"), Some("x"), Some("y")][pick];
            let selection = ColumnSelection {
                x: "x".to_string(),
                y: "y".to_string(),
                hue: hue.map(str::to_string),
            };
            let distinct: BTreeSet<i64> = rows.iter().map(|r| r.2).collect();

            let series = scatter_series(&ds, &selection).unwrap();
            let expected = if pick == 1 { distinct.len() } else { 1 };
            prop_assert_eq!(series.len(), expected);
            prop_assert_eq!(series.iter().map(|s| s.points.len()).sum::<usize>(), rows.len());
        }
    }
}
