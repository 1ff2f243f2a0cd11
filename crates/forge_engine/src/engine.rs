use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use forge_logging::{forge_error, forge_info, forge_warn};

use crate::client::{BackendSettings, HttpBackendClient};
use crate::poll::{JobTracker, PollSettings};
use crate::script;
use crate::types::{ChannelEventSink, EngineEvent, EventSink};
use crate::{BackendClient, BackendError, JobId, ProductionRequest};

enum EngineCommand {
    GenerateScript { topic: String, platform: String },
    Submit { request: ProductionRequest },
    Track { job_id: JobId },
    StopTracking,
}

/// Synchronous handle over the engine's command/event channels.
///
/// Commands are executed on a dedicated runtime thread; outcomes come back
/// as [`EngineEvent`]s drained via [`EngineHandle::try_recv`].
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Mutex<mpsc::Receiver<EngineEvent>>,
}

impl EngineHandle {
    pub fn new(backend: BackendSettings, poll: PollSettings) -> Result<Self, BackendError> {
        let client: Arc<dyn BackendClient> = Arc::new(HttpBackendClient::new(backend)?);
        Ok(Self::with_client(client, poll))
    }

    /// Engine over an injected client; tests use this with a mock backend.
    pub fn with_client(client: Arc<dyn BackendClient>, poll: PollSettings) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();
        let (event_tx, event_rx) = mpsc::channel::<EngineEvent>();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    forge_error!("failed to start engine runtime: {}", err);
                    return;
                }
            };
            let tracker = JobTracker::new(client.clone(), poll, runtime.handle().clone());
            let sink: Arc<dyn EventSink> = Arc::new(ChannelEventSink::new(event_tx));

            while let Ok(command) = cmd_rx.recv() {
                handle_command(&runtime, &client, &tracker, &sink, command);
            }
            // Handle dropped; make sure no loop outlives the session.
            tracker.stop();
        });

        Self {
            cmd_tx,
            event_rx: Mutex::new(event_rx),
        }
    }

    pub fn generate_script(&self, topic: impl Into<String>, platform: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::GenerateScript {
            topic: topic.into(),
            platform: platform.into(),
        });
    }

    pub fn submit(&self, request: ProductionRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Submit { request });
    }

    pub fn track(&self, job_id: impl Into<JobId>) {
        let _ = self.cmd_tx.send(EngineCommand::Track {
            job_id: job_id.into(),
        });
    }

    pub fn stop_tracking(&self) {
        let _ = self.cmd_tx.send(EngineCommand::StopTracking);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx
            .lock()
            .expect("lock engine event receiver")
            .try_recv()
            .ok()
    }
}

fn handle_command(
    runtime: &tokio::runtime::Runtime,
    client: &Arc<dyn BackendClient>,
    tracker: &JobTracker,
    sink: &Arc<dyn EventSink>,
    command: EngineCommand,
) {
    match command {
        EngineCommand::GenerateScript { topic, platform } => {
            let sink = sink.clone();
            runtime.spawn(async move {
                tokio::time::sleep(script::GENERATION_DELAY).await;
                sink.emit(EngineEvent::ScriptReady {
                    script: script::draft_script(&topic, &platform),
                });
            });
        }
        EngineCommand::Submit { request } => {
            forge_info!(
                "submitting production request topic_len={} platform={}",
                request.topic.len(),
                request.platform
            );
            let client = client.clone();
            let sink = sink.clone();
            runtime.spawn(async move {
                match client.create_job(&request).await {
                    Ok(job_id) => sink.emit(EngineEvent::JobCreated { job_id }),
                    Err(error) => {
                        forge_warn!("creation request failed: {}", error);
                        sink.emit(EngineEvent::SubmissionFailed { error });
                    }
                }
            });
        }
        EngineCommand::Track { job_id } => tracker.start(job_id, sink.clone()),
        EngineCommand::StopTracking => tracker.stop(),
    }
}
