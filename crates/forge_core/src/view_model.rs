use crate::{JobId, JobStatus, Platform, VisualStyle, WizardStep};

/// Read-only snapshot of the wizard for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WizardViewModel {
    pub step: WizardStep,
    pub topic: String,
    pub platform: Platform,
    pub script_content: String,
    pub visual_style: VisualStyle,
    pub job_id: Option<JobId>,
    pub status: JobStatus,
    pub progress: u8,
    pub current_step: String,
    pub logs: Vec<String>,
    pub result_video_url: Option<String>,
    pub last_error: Option<String>,
    pub dirty: bool,
}
