//! Panel engine: backend calls, the status poller and artifact saving.
mod client;
mod engine;
mod persist;
mod poller;
mod sink;
mod types;

pub use client::{ClientSettings, JobApi, ReqwestJobApi};
pub use engine::{EngineConfig, EngineHandle};
pub use persist::{ensure_output_dir, ArtifactWriter, PersistError};
pub use poller::{Poller, DEFAULT_POLL_INTERVAL};
pub use sink::{ChannelEventSink, EventSink};
pub use types::{
    ApiError, DownloadKind, EngineEvent, FailureKind, ResultPayload, SearchPayload,
    StatusPayload, ARTIFACT_FILENAME,
};
