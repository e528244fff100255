/// `id` attribute of an element in the panel document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(&'static str);

impl ElementId {
    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

pub const INPUT_COUNTRY: ElementId = ElementId::new("country");
pub const INPUT_CITY: ElementId = ElementId::new("city");
pub const INPUT_CATEGORY: ElementId = ElementId::new("category");
pub const INPUT_MAX_RESULTS: ElementId = ElementId::new("maxResults");
pub const BUTTON_SEARCH: ElementId = ElementId::new("searchBtn");
pub const BUTTON_RESET: ElementId = ElementId::new("resetBtn");
pub const BUTTON_DOWNLOAD: ElementId = ElementId::new("downloadBtn");
pub const PANEL_STATUS: ElementId = ElementId::new("statusPanel");
pub const PANEL_RESULTS: ElementId = ElementId::new("resultsPanel");
pub const PANEL_ERROR: ElementId = ElementId::new("errorPanel");
pub const PROGRESS_FILL: ElementId = ElementId::new("progressFill");
pub const LABEL_STATUS: ElementId = ElementId::new("statusMessage");
pub const LABEL_PROGRESS: ElementId = ElementId::new("progressText");
pub const LABEL_RESULTS_COUNT: ElementId = ElementId::new("resultsCount");
pub const LABEL_ERROR: ElementId = ElementId::new("errorMessage");
pub const LABEL_DOWNLOAD: ElementId = ElementId::new("downloadInfo");
