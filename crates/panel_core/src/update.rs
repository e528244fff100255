use std::time::Duration;

use crate::{
    text, DownloadTrigger, Effect, Msg, PanelState, PollState, AUTO_DOWNLOAD_DELAY,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: PanelState, msg: Msg) -> (PanelState, Vec<Effect>) {
    let effects = match msg {
        Msg::FormChanged(form) => {
            state.set_form(form);
            Vec::new()
        }
        Msg::SearchSubmitted => {
            // The submit control is disabled while a search runs.
            if state.is_searching() {
                return (state, Vec::new());
            }
            match state.form().to_request() {
                Ok(request) => {
                    state.begin_search();
                    state.set_start_in_flight(true);
                    vec![Effect::StartSearch(request)]
                }
                Err(err) => {
                    state.show_error(err.to_string());
                    Vec::new()
                }
            }
        }
        Msg::WatchRequested => {
            if state.poll() == PollState::Polling {
                return (state, Vec::new());
            }
            state.begin_search();
            state.start_polling();
            vec![Effect::StartPolling]
        }
        Msg::SearchStarted => {
            // A reset may have arrived while the start request was in flight.
            if !state.is_searching() {
                state.set_start_in_flight(false);
                return (state, Vec::new());
            }
            state.start_polling();
            vec![Effect::StartPolling]
        }
        Msg::SearchFailed(message) => {
            if !state.is_searching() {
                state.set_start_in_flight(false);
                return (state, Vec::new());
            }
            state.search_start_failed(message);
            Vec::new()
        }
        Msg::StatusReceived(status) => {
            // Late ticks after a stop or reset must not touch the view.
            if state.poll() != PollState::Polling {
                return (state, Vec::new());
            }
            state.apply_progress(&status);
            if !status.is_terminal() {
                return (state, Vec::new());
            }

            state.stop_polling();
            let mut effects = vec![Effect::StopPolling];
            if let Some(error) = status.error {
                state.show_error(error);
            } else if !status.results.is_empty() {
                state.show_results(status.results);
                state.download_started();
                effects.push(Effect::Download {
                    trigger: DownloadTrigger::Auto,
                    delay: AUTO_DOWNLOAD_DELAY,
                });
            }
            effects
        }
        Msg::StatusMalformed(_diagnostic) => {
            if state.poll() != PollState::Polling {
                return (state, Vec::new());
            }
            state.stop_polling();
            vec![Effect::StopPolling]
        }
        Msg::DownloadClicked => {
            state.download_started();
            vec![Effect::Download {
                trigger: DownloadTrigger::Manual,
                delay: Duration::ZERO,
            }]
        }
        Msg::DownloadFinished { trigger, result } => {
            state.download_finished();
            match (result, trigger) {
                (Ok(file), _) => state.set_last_download(file),
                (Err(message), DownloadTrigger::Manual) => {
                    state.show_error(format!("{}{}", text::DOWNLOAD_FAILED_PREFIX, message));
                }
                // Automatic downloads fail quietly; the engine logs them.
                (Err(_), DownloadTrigger::Auto) => {}
            }
            Vec::new()
        }
        Msg::ResetClicked => {
            let was_polling = state.poll() == PollState::Polling;
            state.reset_view();
            state.reset_started();
            let mut effects = vec![Effect::ResetBackend];
            if was_polling {
                effects.push(Effect::StopPolling);
            }
            effects.push(Effect::RefreshCities {
                country: state.default_country().to_string(),
            });
            effects
        }
        Msg::ResetSettled => {
            state.reset_settled();
            Vec::new()
        }
    };

    (state, effects)
}
