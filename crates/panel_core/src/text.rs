//! User-facing labels shown by the panel.

pub const VALIDATION_CITY_REQUIRED: &str = "Select a city or \"Whole country\"";
pub const SUBMIT_IDLE: &str = "Find companies";
pub const SUBMIT_SEARCHING: &str = "Searching...";
pub const STATUS_PROCESSING: &str = "Processing...";
pub const PROGRESS_INITIALIZING: &str = "Initializing...";
pub const DOWNLOAD_FAILED_PREFIX: &str = "Download failed: ";
pub const PLACEHOLDER: &str = "\u{2014}";

pub fn results_count(count: usize) -> String {
    format!("Companies: {count}")
}

pub fn download_saved(file: &str) -> String {
    format!("Saved {file}")
}
