#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the search form.
    FormChanged(crate::SearchForm),
    /// User submitted the search form.
    SearchSubmitted,
    /// User asked to follow a job that is already running on the server.
    WatchRequested,
    /// Backend accepted the start request.
    SearchStarted,
    /// Backend rejected the start request, or answered with something unreadable.
    SearchFailed(String),
    /// One poll tick produced a parsed status.
    StatusReceived(crate::JobStatus),
    /// One poll tick failed to produce a parsed status.
    StatusMalformed(String),
    /// User clicked Download.
    DownloadClicked,
    /// A download finished, successfully or not.
    DownloadFinished {
        trigger: crate::DownloadTrigger,
        result: Result<String, String>,
    },
    /// User clicked Reset.
    ResetClicked,
    /// Backend reset request settled; its outcome is irrelevant.
    ResetSettled,
}
