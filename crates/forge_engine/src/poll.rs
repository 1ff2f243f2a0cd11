use std::sync::{Arc, Mutex};
use std::time::Duration;

use forge_logging::{forge_debug, forge_warn};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::{BackendClient, EngineEvent, EventSink, JobId};

#[derive(Debug, Clone)]
pub struct PollSettings {
    /// Time between the start of one poll and the start of the next.
    pub interval: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
        }
    }
}

struct ActivePoll {
    job_id: JobId,
    cancel: CancellationToken,
}

/// Owns at most one polling loop at a time.
///
/// The loop's lifetime is bound to a tracked, non-terminal job: it stops on
/// terminal status by itself, on `stop`, or when replaced by a new job id.
pub struct JobTracker {
    client: Arc<dyn BackendClient>,
    settings: PollSettings,
    runtime: tokio::runtime::Handle,
    active: Mutex<Option<ActivePoll>>,
}

impl JobTracker {
    pub fn new(
        client: Arc<dyn BackendClient>,
        settings: PollSettings,
        runtime: tokio::runtime::Handle,
    ) -> Self {
        Self {
            client,
            settings,
            runtime,
            active: Mutex::new(None),
        }
    }

    /// True while a live loop exists for `job_id`.
    pub fn is_tracking(&self, job_id: &str) -> bool {
        self.active
            .lock()
            .expect("lock tracker state")
            .as_ref()
            .is_some_and(|active| active.job_id == job_id && !active.cancel.is_cancelled())
    }

    /// Starts polling `job_id`. Idempotent for the active id; a different id
    /// cancels the previous loop before the new one starts.
    pub fn start(&self, job_id: JobId, sink: Arc<dyn EventSink>) {
        let mut active = self.active.lock().expect("lock tracker state");
        if let Some(current) = active.as_ref() {
            if current.job_id == job_id && !current.cancel.is_cancelled() {
                forge_debug!("already tracking job {}, ignoring duplicate start", job_id);
                return;
            }
        }
        if let Some(previous) = active.take() {
            previous.cancel.cancel();
        }

        let cancel = CancellationToken::new();
        *active = Some(ActivePoll {
            job_id: job_id.clone(),
            cancel: cancel.clone(),
        });
        let client = self.client.clone();
        let interval = self.settings.interval;
        self.runtime
            .spawn(poll_job(client, interval, job_id, sink, cancel));
    }

    /// Cancels any active loop. Safe to call when nothing is tracked.
    pub fn stop(&self) {
        if let Some(active) = self.active.lock().expect("lock tracker state").take() {
            active.cancel.cancel();
        }
    }
}

async fn poll_job(
    client: Arc<dyn BackendClient>,
    interval: Duration,
    job_id: JobId,
    sink: Arc<dyn EventSink>,
    cancel: CancellationToken,
) {
    // Cancelling our own token on exit lets the tracker tell a finished
    // loop from a live one.
    let _guard = cancel.clone().drop_guard();

    let mut ticker = tokio::time::interval(interval);
    // A poll still pending when the next tick fires must not overlap it;
    // the missed tick is skipped and the cadence resumes.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = ticker.tick() => {}
        }

        let snapshot = tokio::select! {
            // Tracking stopped while the request was in flight; the
            // response is discarded, never applied.
            _ = cancel.cancelled() => return,
            result = client.job_status(&job_id) => match result {
                Ok(snapshot) => snapshot,
                Err(err) => {
                    // Transient poll failures never surface as job failure.
                    forge_warn!("poll for job {} failed, retrying: {}", job_id, err);
                    continue;
                }
            },
        };

        let terminal = snapshot.status.is_terminal();
        sink.emit(EngineEvent::StatusUpdated { snapshot });
        if terminal {
            forge_debug!("job {} reached a terminal status, polling stops", job_id);
            return;
        }
    }
}
