//! Bridges the pure core and the engine: effects become engine commands,
//! engine events come back as messages.

use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use forge_core::{Effect, JobStatus, JobUpdate, Msg};
use forge_engine::{
    BackendError, BackendSettings, EngineEvent, EngineHandle, FailureKind, JobSnapshot,
    PollSettings, RemoteStatus,
};
use forge_logging::{forge_info, forge_warn};
use url::Url;

use crate::config::AppConfig;

pub struct EffectRunner {
    engine: Arc<EngineHandle>,
}

impl EffectRunner {
    pub fn new(config: &AppConfig, msg_tx: mpsc::Sender<Msg>) -> Result<Self, BackendError> {
        let base = Url::parse(&config.backend_url).map_err(|err| BackendError {
            kind: FailureKind::InvalidUrl,
            message: format!("backend_url {:?}: {err}", config.backend_url),
        })?;
        let mut backend = BackendSettings::new(base);
        backend.voice_id = config.voice_id.clone();
        let poll = PollSettings {
            interval: Duration::from_millis(config.poll_interval_ms),
        };

        let engine = Arc::new(EngineHandle::new(backend, poll)?);
        let runner = Self { engine };
        runner.spawn_event_loop(msg_tx);
        Ok(runner)
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::GenerateScript { topic, platform } => {
                    forge_info!("GenerateScript topic_len={}", topic.len());
                    self.engine.generate_script(topic, platform.as_str());
                }
                Effect::SubmitJob { request } => {
                    self.engine.submit(forge_engine::ProductionRequest {
                        topic: request.topic,
                        script: request.script,
                        visual_style: request.visual_style.as_str().to_string(),
                        platform: request.platform.as_str().to_string(),
                    });
                }
                Effect::StartTracking { job_id } => self.engine.track(job_id),
                Effect::StopTracking => self.engine.stop_tracking(),
            }
        }
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<Msg>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            if let Some(event) = engine.try_recv() {
                let msg = match event {
                    EngineEvent::ScriptReady { script } => Msg::ScriptGenerated(script),
                    EngineEvent::JobCreated { job_id } => Msg::JobCreated { job_id },
                    EngineEvent::SubmissionFailed { error } => {
                        forge_warn!("submission failed: {}", error);
                        Msg::SubmissionFailed {
                            reason: error.to_string(),
                        }
                    }
                    EngineEvent::StatusUpdated { snapshot } => {
                        let (job_id, update) = map_snapshot(snapshot);
                        Msg::JobUpdated { job_id, update }
                    }
                };
                if msg_tx.send(msg).is_err() {
                    break;
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

fn map_snapshot(snapshot: JobSnapshot) -> (String, JobUpdate) {
    let JobSnapshot {
        job_id,
        status,
        progress,
        current_step,
        logs,
        result_video_url,
    } = snapshot;
    (
        job_id,
        JobUpdate {
            status: map_status(status),
            progress,
            current_step,
            logs,
            result_video_url,
        },
    )
}

fn map_status(status: RemoteStatus) -> JobStatus {
    match status {
        RemoteStatus::Pending => JobStatus::Pending,
        RemoteStatus::Processing => JobStatus::Processing,
        RemoteStatus::Completed => JobStatus::Completed,
        RemoteStatus::Failed => JobStatus::Failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_maps_onto_a_core_update() {
        let (job_id, update) = map_snapshot(JobSnapshot {
            job_id: "j1".to_string(),
            status: RemoteStatus::Processing,
            progress: 40,
            current_step: "Rendering".to_string(),
            logs: vec!["clip 1".to_string()],
            result_video_url: None,
        });
        assert_eq!(job_id, "j1");
        assert_eq!(update.status, JobStatus::Processing);
        assert_eq!(update.progress, 40);
        assert_eq!(update.current_step, "Rendering");
        assert_eq!(update.logs, vec!["clip 1".to_string()]);
        assert!(update.result_video_url.is_none());
    }

    #[test]
    fn every_remote_status_has_a_local_mirror() {
        assert_eq!(map_status(RemoteStatus::Pending), JobStatus::Pending);
        assert_eq!(map_status(RemoteStatus::Processing), JobStatus::Processing);
        assert_eq!(map_status(RemoteStatus::Completed), JobStatus::Completed);
        assert_eq!(map_status(RemoteStatus::Failed), JobStatus::Failed);
    }
}
