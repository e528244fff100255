use std::sync::Arc;
use std::time::Duration;

use panel_logging::{panel_debug, panel_trace, panel_warn};
use tokio::runtime::Handle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::{EngineEvent, EventSink, JobApi};

/// Default spacing between status requests.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Owns the single status timer.
///
/// `start` cancels a running loop before spawning the next one and `stop` may
/// be called any number of times, so at most one loop exists per poller.
pub struct Poller {
    runtime: Handle,
    interval: Duration,
    active: Option<CancellationToken>,
}

impl Poller {
    pub fn new(runtime: Handle, interval: Duration) -> Self {
        Self {
            runtime,
            interval,
            active: None,
        }
    }

    pub fn start(&mut self, api: Arc<dyn JobApi>, sink: Arc<dyn EventSink>) {
        self.stop();
        let token = CancellationToken::new();
        let loop_token = token.clone();
        let interval = self.interval;
        panel_debug!("Poller starting, interval={:?}", interval);
        self.runtime.spawn(async move {
            poll_loop(api, sink, interval, loop_token).await;
        });
        self.active = Some(token);
    }

    pub fn stop(&mut self) {
        if let Some(token) = self.active.take() {
            panel_debug!("Poller stopping");
            token.cancel();
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn poll_loop(
    api: Arc<dyn JobApi>,
    sink: Arc<dyn EventSink>,
    period: Duration,
    token: CancellationToken,
) {
    // First request goes out one full period after start.
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut tick: u64 = 0;

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = ticker.tick() => {}
        }
        tick += 1;
        panel_trace!("Poll tick {}", tick);

        let result = tokio::select! {
            biased;
            _ = token.cancelled() => break,
            result = api.fetch_status() => result,
        };
        if let Err(err) = &result {
            panel_warn!("Status poll {} failed: {} ({})", tick, err, err.kind);
        }
        sink.emit(EngineEvent::Status(result));
    }
    panel_trace!("Poll loop exited after {} ticks", tick);
}
