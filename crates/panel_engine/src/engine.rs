use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use panel_logging::{panel_debug, panel_error, panel_info, panel_warn};

use crate::client::{ClientSettings, JobApi, ReqwestJobApi};
use crate::persist::ArtifactWriter;
use crate::poller::{Poller, DEFAULT_POLL_INTERVAL};
use crate::{ApiError, DownloadKind, EngineEvent, EventSink, SearchPayload, ARTIFACT_FILENAME};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub client: ClientSettings,
    pub poll_interval: Duration,
    /// Where downloaded spreadsheets are saved.
    pub output_dir: PathBuf,
}

impl EngineConfig {
    pub fn new(client: ClientSettings, output_dir: PathBuf) -> Self {
        Self {
            client,
            poll_interval: DEFAULT_POLL_INTERVAL,
            output_dir,
        }
    }
}

enum EngineCommand {
    StartSearch(SearchPayload),
    StartPolling,
    StopPolling,
    Download { kind: DownloadKind, delay: Duration },
    Reset,
}

/// Front of the IO thread. Commands are fire-and-forget; outcomes come back
/// through the [`EventSink`] given at construction.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig, sink: Arc<dyn EventSink>) -> Result<Self, ApiError> {
        let api: Arc<dyn JobApi> = Arc::new(ReqwestJobApi::new(config.client.clone())?);
        Ok(Self::with_api(api, config, sink))
    }

    pub fn with_api(api: Arc<dyn JobApi>, config: EngineConfig, sink: Arc<dyn EventSink>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    panel_error!("Failed to start engine runtime: {}", err);
                    return;
                }
            };
            let writer = Arc::new(ArtifactWriter::new(config.output_dir));
            // The poller never leaves this thread.
            let mut poller = Poller::new(runtime.handle().clone(), config.poll_interval);

            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::StartPolling => poller.start(api.clone(), sink.clone()),
                    EngineCommand::StopPolling => poller.stop(),
                    command => {
                        let api = api.clone();
                        let sink = sink.clone();
                        let writer = writer.clone();
                        runtime.spawn(async move {
                            handle_command(api.as_ref(), sink.as_ref(), &writer, command).await;
                        });
                    }
                }
            }
            poller.stop();
            panel_debug!("Engine command channel closed");
        });

        Self { cmd_tx }
    }

    pub fn start_search(&self, payload: SearchPayload) {
        self.send(EngineCommand::StartSearch(payload));
    }

    pub fn start_polling(&self) {
        self.send(EngineCommand::StartPolling);
    }

    pub fn stop_polling(&self) {
        self.send(EngineCommand::StopPolling);
    }

    pub fn download(&self, kind: DownloadKind, delay: Duration) {
        self.send(EngineCommand::Download { kind, delay });
    }

    pub fn reset(&self) {
        self.send(EngineCommand::Reset);
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            panel_error!("Engine thread is gone; command dropped");
        }
    }
}

async fn handle_command(
    api: &dyn JobApi,
    sink: &dyn EventSink,
    writer: &ArtifactWriter,
    command: EngineCommand,
) {
    match command {
        EngineCommand::StartSearch(payload) => {
            let result = api.start_search(&payload).await;
            match &result {
                Ok(()) => panel_info!("Search started"),
                Err(err) => panel_warn!("Search start failed: {} ({})", err, err.kind),
            }
            sink.emit(EngineEvent::SearchStarted(result));
        }
        EngineCommand::Download { kind, delay } => {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            let result = match api.download().await {
                Ok(bytes) => writer
                    .save(ARTIFACT_FILENAME, &bytes)
                    .map_err(ApiError::from),
                Err(err) => Err(err),
            };
            match (&result, kind) {
                (Ok(path), _) => panel_info!("Saved {} ({:?} download)", path.display(), kind),
                (Err(err), DownloadKind::Auto) => panel_warn!("Auto-download failed: {}", err),
                (Err(err), DownloadKind::Manual) => panel_warn!("Download failed: {}", err),
            }
            sink.emit(EngineEvent::DownloadCompleted { kind, result });
        }
        EngineCommand::Reset => {
            // Best effort; the panel resets regardless.
            if let Err(err) = api.reset().await {
                panel_debug!("Backend reset ignored failure: {}", err);
            }
            sink.emit(EngineEvent::ResetSettled);
        }
        EngineCommand::StartPolling | EngineCommand::StopPolling => {}
    }
}
