use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Fixed name of the downloaded spreadsheet.
pub const ARTIFACT_FILENAME: &str = "2gis_results.xlsx";

pub(crate) const MALFORMED_RESPONSE_MESSAGE: &str =
    "The server returned an invalid response. Try refreshing the page.";
pub(crate) const START_FAILED_MESSAGE: &str = "Failed to start search";
pub(crate) const DOWNLOAD_FAILED_MESSAGE: &str = "Error";

/// Body of `POST /api/search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchPayload {
    pub country: Option<String>,
    pub city: Option<String>,
    pub category: Option<String>,
    pub max_results: Option<u32>,
    pub whole_country: bool,
}

/// Body of `GET /api/status`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct StatusPayload {
    pub is_running: bool,
    pub progress: u64,
    pub total: u64,
    pub current: Option<String>,
    pub error: Option<String>,
    pub results: Option<Vec<ResultPayload>>,
}

/// One company row, keyed by the backend's spreadsheet column names.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ResultPayload {
    #[serde(rename = "Название компании", deserialize_with = "cell_text")]
    pub name: Option<String>,
    #[serde(rename = "Город", deserialize_with = "cell_text")]
    pub city: Option<String>,
    #[serde(rename = "Телефон", deserialize_with = "cell_text")]
    pub phone: Option<String>,
    #[serde(rename = "Адрес", deserialize_with = "cell_text")]
    pub address: Option<String>,
    #[serde(rename = "Рейтинг", deserialize_with = "cell_text")]
    pub rating: Option<String>,
    #[serde(rename = "Количество голосов", deserialize_with = "cell_text")]
    pub votes: Option<String>,
}

// Ratings and vote counts arrive as numbers or as the "N/A" string.
fn cell_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadKind {
    Auto,
    Manual,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    SearchStarted(Result<(), ApiError>),
    /// Outcome of one poll tick.
    Status(Result<StatusPayload, ApiError>),
    DownloadCompleted {
        kind: DownloadKind,
        result: Result<PathBuf, ApiError>,
    },
    ResetSettled,
}

/// Error from one backend call. `message` is what the user gets to see.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn malformed(content_type: Option<String>) -> Self {
        Self::new(
            FailureKind::MalformedResponse { content_type },
            MALFORMED_RESPONSE_MESSAGE,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    Network,
    Timeout,
    HttpStatus(u16),
    MalformedResponse { content_type: Option<String> },
    Io,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::MalformedResponse {
                content_type: Some(content_type),
            } => write!(f, "malformed response ({content_type})"),
            FailureKind::MalformedResponse { content_type: None } => {
                write!(f, "malformed response")
            }
            FailureKind::Io => write!(f, "io error"),
        }
    }
}
