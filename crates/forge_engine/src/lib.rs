//! Studio engine: backend I/O and job tracking.
mod client;
mod engine;
mod poll;
mod script;
mod types;

pub use client::{BackendClient, BackendSettings, HttpBackendClient, DEFAULT_VOICE_ID};
pub use engine::EngineHandle;
pub use poll::{JobTracker, PollSettings};
pub use script::draft_script;
pub use types::{
    BackendError, ChannelEventSink, EngineEvent, EventSink, FailureKind, JobId, JobSnapshot,
    ProductionRequest, RemoteStatus,
};
