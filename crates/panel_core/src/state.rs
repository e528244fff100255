use crate::view_model::{Panels, PanelViewModel, ProgressView, ResultRowView, SubmitView};
use crate::{text, JobStatus, ResultRow, SearchForm};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    Idle,
    Searching,
    ShowingResults,
    ShowingError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollState {
    #[default]
    Stopped,
    Polling,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PanelState {
    ui: UiState,
    poll: PollState,
    default_country: String,
    form: SearchForm,
    panels: Panels,
    searching: bool,
    start_in_flight: bool,
    downloads_in_flight: usize,
    resets_in_flight: usize,
    status_message: String,
    progress: ProgressView,
    error: Option<String>,
    results: Vec<ResultRow>,
    last_download: Option<String>,
    dirty: bool,
}

impl PanelState {
    pub fn new(default_country: impl Into<String>) -> Self {
        let default_country = default_country.into();
        Self {
            form: SearchForm::with_country(default_country.clone()),
            default_country,
            status_message: text::STATUS_PROCESSING.to_string(),
            ..Self::default()
        }
    }

    pub fn ui(&self) -> UiState {
        self.ui
    }

    pub fn poll(&self) -> PollState {
        self.poll
    }

    pub fn form(&self) -> &SearchForm {
        &self.form
    }

    pub fn default_country(&self) -> &str {
        &self.default_country
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn is_busy(&self) -> bool {
        self.start_in_flight
            || self.poll == PollState::Polling
            || self.downloads_in_flight > 0
            || self.resets_in_flight > 0
    }

    pub fn view(&self) -> PanelViewModel {
        PanelViewModel {
            ui: self.ui,
            poll: self.poll,
            form: self.form.clone(),
            panels: self.panels,
            submit: SubmitView {
                enabled: !self.searching,
                loading: self.searching,
                label: if self.searching {
                    text::SUBMIT_SEARCHING
                } else {
                    text::SUBMIT_IDLE
                },
            },
            status_message: self.status_message.clone(),
            progress: self.progress.clone(),
            error_message: self.error.clone(),
            results_count: text::results_count(self.results.len()),
            results: self.results.iter().map(ResultRowView::from_row).collect(),
            last_download: self.last_download.clone(),
            busy: self.is_busy(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_form(&mut self, form: SearchForm) {
        self.form = form;
        self.mark_dirty();
    }

    pub(crate) fn show_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.panels.error = true;
        self.ui = UiState::ShowingError;
        self.mark_dirty();
    }

    /// Submit accepted: hide stale output and lock the form.
    pub(crate) fn begin_search(&mut self) {
        self.panels.results = false;
        self.panels.error = false;
        self.error = None;
        self.panels.status = true;
        self.searching = true;
        self.status_message = text::STATUS_PROCESSING.to_string();
        self.progress = ProgressView::default();
        self.ui = UiState::Searching;
        self.mark_dirty();
    }

    pub(crate) fn set_start_in_flight(&mut self, in_flight: bool) {
        self.start_in_flight = in_flight;
    }

    pub(crate) fn search_start_failed(&mut self, message: String) {
        self.start_in_flight = false;
        self.searching = false;
        self.panels.status = false;
        self.show_error(message);
    }

    pub(crate) fn start_polling(&mut self) {
        self.start_in_flight = false;
        self.poll = PollState::Polling;
        self.mark_dirty();
    }

    /// Leaves Polling and unlocks the form.
    pub(crate) fn stop_polling(&mut self) {
        self.poll = PollState::Stopped;
        self.searching = false;
        if self.ui == UiState::Searching {
            self.ui = UiState::Idle;
        }
        self.mark_dirty();
    }

    pub(crate) fn apply_progress(&mut self, status: &JobStatus) {
        self.status_message = status
            .current
            .clone()
            .filter(|current| !current.is_empty())
            .unwrap_or_else(|| text::STATUS_PROCESSING.to_string());
        self.progress = ProgressView::from_counts(status.progress, status.total);
        self.mark_dirty();
    }

    pub(crate) fn show_results(&mut self, results: Vec<ResultRow>) {
        self.results = results;
        self.panels.results = true;
        self.panels.reset_control = true;
        self.ui = UiState::ShowingResults;
        self.mark_dirty();
    }

    pub(crate) fn download_started(&mut self) {
        self.downloads_in_flight += 1;
    }

    pub(crate) fn download_finished(&mut self) {
        self.downloads_in_flight = self.downloads_in_flight.saturating_sub(1);
        self.mark_dirty();
    }

    pub(crate) fn set_last_download(&mut self, file: String) {
        self.last_download = Some(file);
        self.mark_dirty();
    }

    pub(crate) fn reset_started(&mut self) {
        self.resets_in_flight += 1;
    }

    pub(crate) fn reset_settled(&mut self) {
        self.resets_in_flight = self.resets_in_flight.saturating_sub(1);
        self.mark_dirty();
    }

    /// Client-side rollback to a blank form for the default country.
    pub(crate) fn reset_view(&mut self) {
        self.panels = Panels::default();
        self.form = SearchForm::with_country(self.default_country.clone());
        self.results.clear();
        self.error = None;
        self.last_download = None;
        self.searching = false;
        self.start_in_flight = false;
        self.poll = PollState::Stopped;
        self.status_message = text::STATUS_PROCESSING.to_string();
        self.progress = ProgressView::default();
        self.ui = UiState::Idle;
        self.mark_dirty();
    }
}
