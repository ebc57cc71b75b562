use eframe::egui::{self, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::data::model::Dataset;
use crate::data::stats::{ColumnSummary, SUMMARY_LABELS};

const ROW_HEIGHT: f32 = 18.0;
const HEADER_HEIGHT: f32 = 22.0;

// ---------------------------------------------------------------------------
// Dataset preview
// ---------------------------------------------------------------------------

/// Every row and column of the dataset, with a leading row index.
/// Rows are virtualised, so the full file is cheap to show.
pub fn preview_table(ui: &mut Ui, dataset: &Dataset) {
    ui.push_id("preview_table", |ui: &mut Ui| {
        egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .max_scroll_height(320.0)
                .column(TableColumn::auto().at_least(40.0))
                .columns(TableColumn::auto().at_least(70.0), dataset.width())
                .header(HEADER_HEIGHT, |mut header| {
                    header.col(|_| {});
                    for column in &dataset.columns {
                        header.col(|ui: &mut Ui| {
                            ui.strong(column.name.as_str());
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, dataset.len(), |mut row| {
                        let idx = row.index();
                        row.col(|ui: &mut Ui| {
                            ui.weak(idx.to_string());
                        });
                        for column in &dataset.columns {
                            row.col(|ui: &mut Ui| {
                                ui.label(column.display_value(idx));
                            });
                        }
                    });
                });
        });
    });
}

// ---------------------------------------------------------------------------
// Summary statistics
// ---------------------------------------------------------------------------

/// `describe()` layout: one row per statistic, one column per dataset column.
pub fn summary_table(ui: &mut Ui, summary: &[ColumnSummary]) {
    ui.push_id("summary_table", |ui: &mut Ui| {
        egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .vscroll(false)
                .column(TableColumn::auto().at_least(50.0))
                .columns(TableColumn::auto().at_least(90.0), summary.len())
                .header(HEADER_HEIGHT, |mut header| {
                    header.col(|_| {});
                    for s in summary {
                        header.col(|ui: &mut Ui| {
                            ui.strong(s.name.as_str());
                        });
                    }
                })
                .body(|mut body| {
                    for (stat_idx, label) in SUMMARY_LABELS.iter().enumerate() {
                        body.row(ROW_HEIGHT, |mut row| {
                            row.col(|ui: &mut Ui| {
                                ui.strong(*label);
                            });
                            for s in summary {
                                row.col(|ui: &mut Ui| {
                                    ui.label(format_stat(s.values()[stat_idx], stat_idx == 0));
                                });
                            }
                        });
                    }
                });
        });
    });
}

fn format_stat(value: f64, is_count: bool) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if is_count {
        format!("{value:.0}")
    } else {
        format!("{value:.6}")
    }
}
