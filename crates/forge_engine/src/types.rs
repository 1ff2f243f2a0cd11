use serde::{Deserialize, Serialize};

/// Opaque identifier the backend assigns to a production job.
pub type JobId = String;

/// Remote job status as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RemoteStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl RemoteStatus {
    /// Terminal statuses end the polling loop.
    pub fn is_terminal(self) -> bool {
        matches!(self, RemoteStatus::Completed | RemoteStatus::Failed)
    }
}

/// One authoritative poll response for a tracked job.
///
/// `result_video_url`, when present, is already resolved against the
/// configured backend base address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSnapshot {
    pub job_id: JobId,
    pub status: RemoteStatus,
    pub progress: u8,
    pub current_step: String,
    pub logs: Vec<String>,
    pub result_video_url: Option<String>,
}

/// User-supplied fields of a creation request. The wire layer adds the
/// fixed faceless defaults (avatar disabled, configured voice).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductionRequest {
    pub topic: String,
    pub script: String,
    pub visual_style: String,
    pub platform: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// The script generator finished a draft.
    ScriptReady { script: String },
    /// The backend accepted a creation request.
    JobCreated { job_id: JobId },
    /// The creation request failed; no job exists.
    SubmissionFailed { error: BackendError },
    /// A poll response for the tracked job.
    StatusUpdated { snapshot: JobSnapshot },
}

/// Destination for engine events.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct BackendError {
    pub kind: FailureKind,
    pub message: String,
}

impl BackendError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FailureKind {
    #[error("invalid url")]
    InvalidUrl,
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("timeout")]
    Timeout,
    #[error("malformed payload")]
    MalformedPayload,
    #[error("network error")]
    Network,
}
