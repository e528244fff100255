use crate::status::NOT_AVAILABLE;
use crate::{text, PollState, ResultRow, SearchForm, UiState};

/// Visibility of the panel's collapsible areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Panels {
    pub status: bool,
    pub results: bool,
    pub error: bool,
    pub reset_control: bool,
}

impl Panels {
    pub fn all_hidden(&self) -> bool {
        !(self.status || self.results || self.error || self.reset_control)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitView {
    pub enabled: bool,
    pub loading: bool,
    pub label: &'static str,
}

/// Progress bar fill and caption.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressView {
    /// Percentage in `0.0..=100.0`.
    pub fill_percent: f64,
    pub label: String,
}

impl ProgressView {
    pub fn from_counts(progress: u64, total: u64) -> Self {
        if total > 0 {
            let percent = (progress as f64 / total as f64) * 100.0;
            Self {
                fill_percent: percent.min(100.0),
                label: format!("{progress} / {total}"),
            }
        } else if progress > 0 {
            Self {
                fill_percent: 30.0,
                label: format!("{progress}..."),
            }
        } else {
            Self {
                fill_percent: 5.0,
                label: text::PROGRESS_INITIALIZING.to_string(),
            }
        }
    }
}

impl Default for ProgressView {
    fn default() -> Self {
        Self::from_counts(0, 0)
    }
}

/// Display text for one results row, placeholders already substituted.
///
/// Values are plain text; escaping happens when the row is turned into markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRowView {
    pub name: String,
    pub city: String,
    pub phone: String,
    pub address: String,
    pub rating: String,
    pub votes: String,
}

impl ResultRowView {
    pub fn from_row(row: &ResultRow) -> Self {
        let name = match row.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => text::PLACEHOLDER.to_string(),
        };
        Self {
            name,
            city: cell(row.city.as_deref()),
            phone: cell(row.phone.as_deref()),
            address: cell(row.address.as_deref()),
            rating: cell(row.rating.as_deref()),
            votes: cell(row.votes.as_deref()),
        }
    }

    pub fn cells(&self) -> [&str; 6] {
        [
            &self.name,
            &self.city,
            &self.phone,
            &self.address,
            &self.rating,
            &self.votes,
        ]
    }
}

fn cell(value: Option<&str>) -> String {
    match value {
        Some(value) if value != NOT_AVAILABLE => value.to_string(),
        _ => text::PLACEHOLDER.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelViewModel {
    pub ui: UiState,
    pub poll: PollState,
    pub form: SearchForm,
    pub panels: Panels,
    pub submit: SubmitView,
    pub status_message: String,
    pub progress: ProgressView,
    pub error_message: Option<String>,
    pub results_count: String,
    pub results: Vec<ResultRowView>,
    pub last_download: Option<String>,
    /// True while any request or the poll loop is outstanding.
    pub busy: bool,
    pub dirty: bool,
}
