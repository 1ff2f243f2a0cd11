use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{BackendError, FailureKind, JobId, JobSnapshot, ProductionRequest, RemoteStatus};

/// Default voice used for every faceless production.
pub const DEFAULT_VOICE_ID: &str = "pNInz6obpgDQGcFmaJgB";

/// Avatar mode is always disabled; the backend expects the literal "none".
const AVATAR_DISABLED: &str = "none";

#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub base_url: Url,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub voice_id: String,
}

impl BackendSettings {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(15),
            voice_id: DEFAULT_VOICE_ID.to_string(),
        }
    }
}

#[async_trait::async_trait]
pub trait BackendClient: Send + Sync {
    /// Submits a creation request. Returns the new job id without waiting
    /// for the job to make any progress.
    async fn create_job(&self, request: &ProductionRequest) -> Result<JobId, BackendError>;

    /// Fetches the current authoritative state of one job.
    async fn job_status(&self, job_id: &str) -> Result<JobSnapshot, BackendError>;
}

pub struct HttpBackendClient {
    settings: BackendSettings,
    client: reqwest::Client,
}

impl HttpBackendClient {
    pub fn new(settings: BackendSettings) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| BackendError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        self.settings
            .base_url
            .join(path)
            .map_err(|err| BackendError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    /// The backend may return the result as an absolute URL or a path
    /// relative to its static file root.
    fn resolve_result_url(&self, raw: &str) -> String {
        if Url::parse(raw).is_ok() {
            return raw.to_string();
        }
        match self.settings.base_url.join(raw) {
            Ok(resolved) => resolved.to_string(),
            Err(_) => raw.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl BackendClient for HttpBackendClient {
    async fn create_job(&self, request: &ProductionRequest) -> Result<JobId, BackendError> {
        let endpoint = self.endpoint("create-video")?;
        let body = CreateVideoBody {
            topic: &request.topic,
            script: &request.script,
            visual_style: &request.visual_style,
            platform: &request.platform,
            avatar_id: AVATAR_DISABLED,
            voice_id: &self.settings.voice_id,
        };

        let response = self
            .client
            .post(endpoint)
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let text = response.text().await.map_err(map_reqwest_error)?;
        let created: CreateVideoResponse = serde_json::from_str(&text)
            .map_err(|err| BackendError::new(FailureKind::MalformedPayload, err.to_string()))?;
        Ok(created.job_id)
    }

    async fn job_status(&self, job_id: &str) -> Result<JobSnapshot, BackendError> {
        let endpoint = self.endpoint(&format!("jobs/{job_id}"))?;

        let response = self
            .client
            .get(endpoint)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let text = response.text().await.map_err(map_reqwest_error)?;
        let payload: JobStatusPayload = serde_json::from_str(&text)
            .map_err(|err| BackendError::new(FailureKind::MalformedPayload, err.to_string()))?;

        Ok(JobSnapshot {
            job_id: job_id.to_string(),
            status: payload.status,
            progress: payload.progress.min(100),
            current_step: payload.current_step,
            logs: payload.logs,
            result_video_url: payload
                .result_video_url
                .as_deref()
                .map(|raw| self.resolve_result_url(raw)),
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> BackendError {
    if err.is_timeout() {
        return BackendError::new(FailureKind::Timeout, err.to_string());
    }
    BackendError::new(FailureKind::Network, err.to_string())
}

#[derive(Serialize)]
struct CreateVideoBody<'a> {
    topic: &'a str,
    script: &'a str,
    visual_style: &'a str,
    platform: &'a str,
    avatar_id: &'static str,
    voice_id: &'a str,
}

#[derive(Deserialize)]
struct CreateVideoResponse {
    job_id: JobId,
}

#[derive(Deserialize)]
struct JobStatusPayload {
    status: RemoteStatus,
    #[serde(default)]
    progress: u8,
    #[serde(default)]
    current_step: String,
    #[serde(default)]
    logs: Vec<String>,
    #[serde(default)]
    result_video_url: Option<String>,
}
