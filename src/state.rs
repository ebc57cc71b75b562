use std::fmt;
use std::path::Path;

use crate::config::AppConfig;
use crate::data::loader::{DatasetError, load_dataset};
use crate::data::model::Dataset;
use crate::data::series::{
    ColumnSelection, CountBar, QUALITY_COLUMN, ScatterSeries, count_bars, scatter_series,
};
use crate::data::stats::{ColumnSummary, CorrelationMatrix, correlation, describe};

// ---------------------------------------------------------------------------
// Page selection
// ---------------------------------------------------------------------------

/// The three entries of the navigation sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    DataOverview,
    Analysis,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Home, Page::DataOverview, Page::Analysis];

    pub fn label(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::DataOverview => "Data Overview",
            Page::Analysis => "Analysis & Visualization",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "🍷 Wine Quality Analyzer",
            Page::DataOverview => "Dataset Overview 📄",
            Page::Analysis => "Data Analysis & Visualization 📊",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Page views: everything one visit displays
// ---------------------------------------------------------------------------

/// Artifacts of the data overview page.
pub struct OverviewView {
    pub dataset: Dataset,
    pub summary: Vec<ColumnSummary>,
    pub correlation: CorrelationMatrix,
}

impl OverviewView {
    pub fn new(dataset: Dataset) -> Self {
        let summary = describe(&dataset);
        let correlation = correlation(&dataset);
        Self {
            dataset,
            summary,
            correlation,
        }
    }
}

/// Artifacts of the analysis page, plus the user's column picks.
pub struct AnalysisView {
    pub dataset: Dataset,
    /// `None` only for a dataset without columns.
    pub selection: Option<ColumnSelection>,
    /// Scatter series for the current selection, or the message shown in
    /// place of the chart.
    pub scatter: Result<Vec<ScatterSeries>, String>,
    /// Quality counts, or the message shown in place of the chart.
    pub quality: Result<Vec<CountBar>, String>,
}

impl AnalysisView {
    pub fn new(dataset: Dataset) -> Self {
        let quality = count_bars(&dataset, QUALITY_COLUMN).map_err(|e| e.to_string());
        let selection = ColumnSelection::first_column(&dataset);
        let mut view = Self {
            dataset,
            selection: None,
            scatter: Ok(Vec::new()),
            quality,
        };
        if let Some(selection) = selection {
            view.select(selection);
        }
        view
    }

    /// Apply new column picks and regroup the scatter points.
    pub fn select(&mut self, selection: ColumnSelection) {
        log::debug!(
            "Scatter selection x={} y={} hue={:?} (effective {:?})",
            selection.x,
            selection.y,
            selection.hue,
            selection.effective_hue()
        );
        self.scatter = scatter_series(&self.dataset, &selection).map_err(|e| {
            log::error!("Cannot build scatter plot: {e}");
            e.to_string()
        });
        self.selection = Some(selection);
    }
}

/// The currently displayed page and the artifacts it owns.
///
/// Only one view exists at a time, so a render never mixes pages.
pub enum PageView {
    Home,
    Overview(OverviewView),
    Analysis(AnalysisView),
}

impl PageView {
    /// Build the view for `page`, reading the dataset from disk if needed.
    pub fn visit(page: Page, data_path: &Path) -> Result<PageView, DatasetError> {
        Ok(match page {
            Page::Home => PageView::Home,
            Page::DataOverview => PageView::Overview(OverviewView::new(load_dataset(data_path)?)),
            Page::Analysis => PageView::Analysis(AnalysisView::new(load_dataset(data_path)?)),
        })
    }

    pub fn page(&self) -> Page {
        match self {
            PageView::Home => Page::Home,
            PageView::Overview(_) => Page::DataOverview,
            PageView::Analysis(_) => Page::Analysis,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: AppConfig,

    /// Sidebar selection.
    pub page: Page,

    /// Artifacts of the current visit (None when the visit failed).
    pub view: Option<PageView>,

    /// Error of the last failed visit, shown inline on the page.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let mut state = Self {
            config,
            page: Page::default(),
            view: None,
            status_message: None,
        };
        state.reload();
        state
    }

    /// Switch pages. The old view is dropped and the new page is visited.
    pub fn navigate(&mut self, page: Page) {
        if self.view.as_ref().map(PageView::page) == Some(page) {
            return;
        }
        log::debug!("Navigating {} → {}", self.page, page);
        self.page = page;
        self.reload();
    }

    /// Visit the current page again, re-reading the dataset.
    pub fn reload(&mut self) {
        self.view = None;
        match PageView::visit(self.page, &self.config.data_path) {
            Ok(view) => {
                self.view = Some(view);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", self.page);
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
