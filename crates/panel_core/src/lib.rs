//! Panel core: pure state machine and view-model helpers for the job control panel.
mod effect;
mod form;
pub mod html;
mod msg;
mod state;
mod status;
pub mod text;
mod update;
mod view_model;

pub use effect::{DownloadTrigger, Effect, AUTO_DOWNLOAD_DELAY};
pub use form::{SearchForm, SearchRequest, ValidationError, WHOLE_COUNTRY_SENTINEL};
pub use msg::Msg;
pub use state::{PanelState, PollState, UiState};
pub use status::{JobStatus, ResultRow, NOT_AVAILABLE};
pub use update::update;
pub use view_model::{Panels, PanelViewModel, ProgressView, ResultRowView, SubmitView};
