use std::time::Duration;

use crate::SearchRequest;

/// Pause before the automatic download so the results render first.
pub const AUTO_DOWNLOAD_DELAY: Duration = Duration::from_millis(800);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    StartSearch(SearchRequest),
    StartPolling,
    StopPolling,
    Download {
        trigger: DownloadTrigger,
        delay: Duration,
    },
    ResetBackend,
    RefreshCities { country: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadTrigger {
    /// Scheduled once after a finished job rendered its results.
    Auto,
    /// Requested by the user.
    Manual,
}
