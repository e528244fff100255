/// Literal the backend uses for a field it could not scrape.
pub const NOT_AVAILABLE: &str = "N/A";

/// One scraped company as reported by the job status.
///
/// Every field is the raw cell text; `None` means the backend omitted it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultRow {
    pub name: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub rating: Option<String>,
    pub votes: Option<String>,
}

/// Snapshot of the server-side job, read-only from the panel's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobStatus {
    pub is_running: bool,
    pub progress: u64,
    /// Zero when the job does not know its total yet.
    pub total: u64,
    pub current: Option<String>,
    pub error: Option<String>,
    pub results: Vec<ResultRow>,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        !self.is_running
    }
}
