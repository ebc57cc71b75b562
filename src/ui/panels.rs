use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::series::ColumnSelection;
use crate::state::{AnalysisView, AppState, OverviewView, Page, PageView};
use crate::ui::{plot, table};

const HERO_IMAGE: &str = "https://picsum.photos/800/400";
const FEATURE_IMAGE: &str = "https://picsum.photos/600/300";
const BANNER_IMAGE: &str = "https://picsum.photos/800/300";

// ---------------------------------------------------------------------------
// Left side panel – navigation
// ---------------------------------------------------------------------------

/// Render the navigation sidebar.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Navigation");
    ui.add_space(4.0);
    ui.label("Go to");

    for page in Page::ALL {
        if ui.radio(state.page == page, page.label()).clicked() && state.page != page {
            state.navigate(page);
        }
    }

    ui.add_space(8.0);
    ui.separator();
    ui.label(RichText::new("Built with 🍷 using egui").strong());
}

// ---------------------------------------------------------------------------
// Central panel – the selected page
// ---------------------------------------------------------------------------

/// Render the current page, or the error of its failed visit.
pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    let mut reload = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            title(ui, state.page);

            if let Some(msg) = &state.status_message {
                ui.label(RichText::new(msg).color(Color32::RED));
                reload = ui.button("Reload").clicked();
                return;
            }

            match &mut state.view {
                Some(PageView::Home) => home_page(ui),
                Some(PageView::Overview(view)) => {
                    reload = data_toolbar(ui, view.dataset.len(), view.dataset.width());
                    overview_page(ui, view);
                }
                Some(PageView::Analysis(view)) => {
                    reload = data_toolbar(ui, view.dataset.len(), view.dataset.width());
                    analysis_page(ui, view);
                }
                None => {}
            }
        });

    if reload {
        state.reload();
    }
}

fn title(ui: &mut Ui, page: Page) {
    ui.label(RichText::new(page.title()).size(28.0).strong());
    ui.add_space(6.0);
}

fn section(ui: &mut Ui, text: &str) {
    ui.add_space(12.0);
    ui.heading(text);
    ui.separator();
}

fn remote_image(ui: &mut Ui, url: &str, width: f32, height: f32) {
    ui.add(egui::Image::from_uri(url).fit_to_exact_size(egui::vec2(width, height)));
}

/// Banner image plus a row count and a reload button. Returns whether
/// reload was clicked.
fn data_toolbar(ui: &mut Ui, rows: usize, columns: usize) -> bool {
    remote_image(ui, BANNER_IMAGE, 800.0, 300.0);
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!("{rows} rows × {columns} columns"));
        ui.button("Reload").clicked()
    })
    .inner
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

fn home_page(ui: &mut Ui) {
    ui.label("Analyze and visualize key metrics from a wine quality dataset.");
    ui.add_space(8.0);
    remote_image(ui, HERO_IMAGE, 800.0, 400.0);

    section(ui, "Features");
    for feature in [
        "Quick overview of wine chemistry",
        "Visualize relationships between variables",
        "Identify patterns in quality and alcohol content",
    ] {
        ui.label(format!("• {feature}"));
    }
    ui.add_space(8.0);
    remote_image(ui, FEATURE_IMAGE, 600.0, 300.0);
}

fn overview_page(ui: &mut Ui, view: &OverviewView) {
    if view.dataset.is_empty() {
        ui.label("The file has a header but no rows.");
    }

    section(ui, "Preview");
    table::preview_table(ui, &view.dataset);

    section(ui, "Summary Statistics");
    table::summary_table(ui, &view.summary);

    section(ui, "Correlation Matrix");
    plot::correlation_heatmap(ui, &view.correlation);
}

fn analysis_page(ui: &mut Ui, view: &mut AnalysisView) {
    let Some(mut selection) = view.selection.clone() else {
        ui.label("The dataset has no columns.");
        return;
    };
    let columns = view.dataset.column_names();

    column_combo(ui, "Select X-axis", &mut selection.x, &columns);
    column_combo(ui, "Select Y-axis", &mut selection.y, &columns);
    hue_combo(ui, &mut selection, &columns);

    if view.selection.as_ref() != Some(&selection) {
        view.select(selection);
    }

    match (&view.scatter, &view.selection) {
        (Ok(series), Some(selection)) => plot::scatter_plot(ui, series, selection),
        (Err(msg), _) => error_label(ui, msg),
        (Ok(_), None) => {}
    }

    section(ui, "Quality Distribution");
    match &view.quality {
        Ok(bars) => plot::quality_plot(ui, bars),
        Err(msg) => error_label(ui, msg),
    }
}

fn error_label(ui: &mut Ui, msg: &str) {
    ui.label(RichText::new(format!("Error: {msg}")).color(Color32::RED));
}

fn column_combo(ui: &mut Ui, label: &str, current: &mut String, columns: &[String]) {
    egui::ComboBox::from_label(label)
        .selected_text(current.as_str())
        .show_ui(ui, |ui: &mut Ui| {
            for col in columns {
                ui.selectable_value(current, col.clone(), col.as_str());
            }
        });
}

fn hue_combo(ui: &mut Ui, selection: &mut ColumnSelection, columns: &[String]) {
    let selected = selection.hue.clone().unwrap_or_else(|| "None".to_string());
    egui::ComboBox::from_label("Color by (hue)")
        .selected_text(selected)
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut selection.hue, None, "None");
            for col in columns {
                ui.selectable_value(&mut selection.hue, Some(col.clone()), col.as_str());
            }
        });
}
