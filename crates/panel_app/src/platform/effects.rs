use std::sync::{mpsc, Arc};

use panel_core::{DownloadTrigger, Effect, JobStatus, Msg, ResultRow, SearchRequest};
use panel_engine::{
    ApiError, DownloadKind, EngineConfig, EngineEvent, EngineHandle, EventSink, ResultPayload,
    SearchPayload, StatusPayload,
};
use panel_logging::{panel_debug, panel_info, panel_warn};

use super::cities::CityDirectory;

pub struct EffectRunner {
    engine: EngineHandle,
    cities: Box<dyn CityDirectory>,
}

impl EffectRunner {
    pub fn new(
        config: EngineConfig,
        msg_tx: mpsc::Sender<Msg>,
        cities: Box<dyn CityDirectory>,
    ) -> Result<Self, ApiError> {
        let engine = EngineHandle::new(config, Arc::new(MsgSink { msg_tx }))?;
        Ok(Self { engine, cities })
    }

    pub fn enqueue(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartSearch(request) => {
                    panel_info!(
                        "StartSearch country={:?} city={:?} category={:?} max_results={:?} whole_country={}",
                        request.country,
                        request.city,
                        request.category,
                        request.max_results,
                        request.whole_country
                    );
                    self.engine.start_search(map_request(request));
                }
                Effect::StartPolling => self.engine.start_polling(),
                Effect::StopPolling => self.engine.stop_polling(),
                Effect::Download { trigger, delay } => {
                    panel_debug!("Download trigger={:?} delay={:?}", trigger, delay);
                    self.engine.download(map_trigger(trigger), delay);
                }
                Effect::ResetBackend => self.engine.reset(),
                Effect::RefreshCities { country } => {
                    self.cities.refresh(&country);
                    panel_debug!("City choices: {:?}", self.cities.cities());
                }
            }
        }
    }
}

/// Turns engine events into panel messages on the app channel.
struct MsgSink {
    msg_tx: mpsc::Sender<Msg>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.msg_tx.send(map_event(event));
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::SearchStarted(Ok(())) => Msg::SearchStarted,
        EngineEvent::SearchStarted(Err(err)) => Msg::SearchFailed(err.message),
        EngineEvent::Status(Ok(status)) => Msg::StatusReceived(map_status(status)),
        EngineEvent::Status(Err(err)) => {
            panel_warn!("Stopping status polling: {} ({})", err, err.kind);
            Msg::StatusMalformed(err.to_string())
        }
        EngineEvent::DownloadCompleted { kind, result } => Msg::DownloadFinished {
            trigger: match kind {
                DownloadKind::Auto => DownloadTrigger::Auto,
                DownloadKind::Manual => DownloadTrigger::Manual,
            },
            result: result
                .map(|path| path.display().to_string())
                .map_err(|err| err.message),
        },
        EngineEvent::ResetSettled => Msg::ResetSettled,
    }
}

fn map_request(request: SearchRequest) -> SearchPayload {
    SearchPayload {
        country: request.country,
        city: request.city,
        category: request.category,
        max_results: request.max_results,
        whole_country: request.whole_country,
    }
}

fn map_trigger(trigger: DownloadTrigger) -> DownloadKind {
    match trigger {
        DownloadTrigger::Auto => DownloadKind::Auto,
        DownloadTrigger::Manual => DownloadKind::Manual,
    }
}

fn map_status(status: StatusPayload) -> JobStatus {
    JobStatus {
        is_running: status.is_running,
        progress: status.progress,
        total: status.total,
        current: status.current,
        error: status.error.filter(|error| !error.is_empty()),
        results: status
            .results
            .unwrap_or_default()
            .into_iter()
            .map(map_row)
            .collect(),
    }
}

fn map_row(row: ResultPayload) -> ResultRow {
    ResultRow {
        name: row.name,
        city: row.city,
        phone: row.phone,
        address: row.address,
        rating: row.rating,
        votes: row.votes,
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use panel_engine::FailureKind;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_error_string_is_not_a_job_error() {
        let msg = map_event(EngineEvent::Status(Ok(StatusPayload {
            error: Some(String::new()),
            ..StatusPayload::default()
        })));
        assert_eq!(msg, Msg::StatusReceived(JobStatus::default()));
    }

    #[test]
    fn download_outcomes_carry_trigger_and_text() {
        let msg = map_event(EngineEvent::DownloadCompleted {
            kind: DownloadKind::Auto,
            result: Ok(PathBuf::from("output/2gis_results.xlsx")),
        });
        assert_eq!(
            msg,
            Msg::DownloadFinished {
                trigger: DownloadTrigger::Auto,
                result: Ok("output/2gis_results.xlsx".to_string()),
            }
        );
    }

    #[test]
    fn start_failure_keeps_server_message() {
        let msg = map_event(EngineEvent::SearchStarted(Err(ApiError {
            kind: FailureKind::HttpStatus(400),
            message: "Поиск уже выполняется".to_string(),
        })));
        assert_eq!(msg, Msg::SearchFailed("Поиск уже выполняется".to_string()));
    }
}
