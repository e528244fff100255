use std::sync::Once;

use panel_core::{
    update, DownloadTrigger, Effect, JobStatus, Msg, PanelState, PollState, ResultRow, SearchForm,
    UiState, AUTO_DOWNLOAD_DELAY,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(panel_logging::initialize_for_tests);
}

fn polling_state() -> PanelState {
    let form = SearchForm {
        country: "Россия".to_string(),
        city: "Москва".to_string(),
        ..SearchForm::default()
    };
    let (state, _) = update(PanelState::new("Россия"), Msg::FormChanged(form));
    let (state, _) = update(state, Msg::SearchSubmitted);
    let (state, _) = update(state, Msg::SearchStarted);
    assert_eq!(state.poll(), PollState::Polling);
    state
}

fn acme() -> ResultRow {
    ResultRow {
        name: Some("Acme".to_string()),
        city: Some("N/A".to_string()),
        phone: Some("N/A".to_string()),
        address: Some("N/A".to_string()),
        rating: Some("N/A".to_string()),
        votes: Some("N/A".to_string()),
    }
}

#[test]
fn running_status_updates_progress_and_keeps_polling() {
    init_logging();
    let status = JobStatus {
        is_running: true,
        progress: 3,
        total: 12,
        current: Some("Город 1/4: Москва".to_string()),
        ..JobStatus::default()
    };
    let (state, effects) = update(polling_state(), Msg::StatusReceived(status));
    let view = state.view();

    assert!(effects.is_empty());
    assert_eq!(view.poll, PollState::Polling);
    assert_eq!(view.status_message, "Город 1/4: Москва");
    assert_eq!(view.progress.fill_percent, 25.0);
    assert_eq!(view.progress.label, "3 / 12");
    assert!(!view.submit.enabled);
}

#[test]
fn unknown_total_without_progress_shows_initializing() {
    init_logging();
    let status = JobStatus {
        is_running: true,
        ..JobStatus::default()
    };
    let (state, _) = update(polling_state(), Msg::StatusReceived(status));
    let view = state.view();

    assert_eq!(view.status_message, "Processing...");
    assert_eq!(view.progress.fill_percent, 5.0);
    assert_eq!(view.progress.label, "Initializing...");
}

#[test]
fn finished_with_results_renders_and_schedules_download() {
    init_logging();
    let status = JobStatus {
        is_running: false,
        progress: 1,
        total: 1,
        results: vec![acme()],
        ..JobStatus::default()
    };
    let (state, effects) = update(polling_state(), Msg::StatusReceived(status));
    let view = state.view();

    assert_eq!(
        effects,
        vec![
            Effect::StopPolling,
            Effect::Download {
                trigger: DownloadTrigger::Auto,
                delay: AUTO_DOWNLOAD_DELAY,
            },
        ]
    );
    assert_eq!(view.ui, UiState::ShowingResults);
    assert_eq!(view.poll, PollState::Stopped);
    assert!(view.panels.results);
    assert!(view.panels.reset_control);
    assert!(view.submit.enabled);
    assert_eq!(view.results_count, "Companies: 1");
    assert_eq!(view.results[0].cells(), ["Acme", "—", "—", "—", "—", "—"]);
    // The scheduled download keeps the panel busy.
    assert!(view.busy);
}

#[test]
fn finished_with_error_shows_it_verbatim() {
    init_logging();
    let status = JobStatus {
        is_running: false,
        error: Some("Компании не найдены. Проверьте параметры поиска.".to_string()),
        ..JobStatus::default()
    };
    let (state, effects) = update(polling_state(), Msg::StatusReceived(status));
    let view = state.view();

    assert_eq!(effects, vec![Effect::StopPolling]);
    assert_eq!(view.ui, UiState::ShowingError);
    assert_eq!(
        view.error_message.as_deref(),
        Some("Компании не найдены. Проверьте параметры поиска.")
    );
    assert!(!view.panels.results);
    assert!(!view.busy);
}

#[test]
fn finished_without_results_or_error_just_stops() {
    init_logging();
    let status = JobStatus::default();
    let (state, effects) = update(polling_state(), Msg::StatusReceived(status));
    let view = state.view();

    assert_eq!(effects, vec![Effect::StopPolling]);
    assert_eq!(view.ui, UiState::Idle);
    assert!(view.submit.enabled);
    assert!(!view.panels.results);
}

#[test]
fn malformed_status_stops_silently() {
    init_logging();
    let (state, effects) = update(
        polling_state(),
        Msg::StatusMalformed("unexpected content type text/html".into()),
    );
    let view = state.view();

    assert_eq!(effects, vec![Effect::StopPolling]);
    assert_eq!(view.poll, PollState::Stopped);
    assert!(view.submit.enabled);
    assert!(!view.panels.error);
    assert_eq!(view.error_message, None);
}

#[test]
fn status_after_stop_is_ignored() {
    init_logging();
    let (state, _) = update(polling_state(), Msg::StatusMalformed("boom".into()));
    let mut state = state;
    state.consume_dirty();

    let late = JobStatus {
        is_running: false,
        results: vec![acme()],
        ..JobStatus::default()
    };
    let (mut state, effects) = update(state, Msg::StatusReceived(late));

    assert!(effects.is_empty());
    assert!(state.view().results.is_empty());
    assert!(!state.consume_dirty());
}

#[test]
fn watch_attaches_to_running_job() {
    init_logging();
    let (state, effects) = update(PanelState::new("Россия"), Msg::WatchRequested);
    assert_eq!(effects, vec![Effect::StartPolling]);
    assert_eq!(state.poll(), PollState::Polling);
    assert!(state.view().panels.status);

    let (_state, effects) = update(state, Msg::WatchRequested);
    assert!(effects.is_empty());
}

#[test]
fn manual_download_failure_is_prefixed() {
    init_logging();
    let (state, effects) = update(PanelState::new("Россия"), Msg::DownloadClicked);
    assert!(matches!(
        effects.as_slice(),
        [Effect::Download {
            trigger: DownloadTrigger::Manual,
            ..
        }]
    ));

    let (state, _) = update(
        state,
        Msg::DownloadFinished {
            trigger: DownloadTrigger::Manual,
            result: Err("Нет результатов для экспорта".into()),
        },
    );
    let view = state.view();
    assert_eq!(
        view.error_message.as_deref(),
        Some("Download failed: Нет результатов для экспорта")
    );
    assert!(!view.busy);
}

#[test]
fn auto_download_failure_is_silent() {
    init_logging();
    let state = polling_state();
    let done = JobStatus {
        results: vec![acme()],
        ..JobStatus::default()
    };
    let (state, _) = update(state, Msg::StatusReceived(done));
    let (state, _) = update(
        state,
        Msg::DownloadFinished {
            trigger: DownloadTrigger::Auto,
            result: Err("server error".into()),
        },
    );
    let view = state.view();

    assert_eq!(view.ui, UiState::ShowingResults);
    assert!(!view.panels.error);
    assert!(!view.busy);
}

#[test]
fn successful_download_records_file() {
    init_logging();
    let (state, _) = update(PanelState::new("Россия"), Msg::DownloadClicked);
    let (state, _) = update(
        state,
        Msg::DownloadFinished {
            trigger: DownloadTrigger::Manual,
            result: Ok("output/2gis_results.xlsx".into()),
        },
    );
    assert_eq!(
        state.view().last_download.as_deref(),
        Some("output/2gis_results.xlsx")
    );
}
