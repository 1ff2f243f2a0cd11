use crate::view_model::WizardViewModel;

/// Opaque identifier assigned by the rendering backend.
pub type JobId = String;

/// Target platform for the produced video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    #[default]
    Tiktok,
    Youtube,
    Instagram,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Tiktok => "tiktok",
            Platform::Youtube => "youtube",
            Platform::Instagram => "instagram",
        }
    }
}

/// Visual treatment requested from the rendering backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisualStyle {
    #[default]
    Cinematic,
    Minimalist,
    Chaos,
    Corporate,
}

impl VisualStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            VisualStyle::Cinematic => "cinematic",
            VisualStyle::Minimalist => "minimalist",
            VisualStyle::Chaos => "chaos",
            VisualStyle::Corporate => "corporate",
        }
    }
}

/// Local mirror of the remote job status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobStatus {
    #[default]
    Idle,
    Pending,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    /// Terminal statuses end polling; no further updates are expected.
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

/// UI cursor over the wizard screens. Transition authority lives in
/// [`crate::update`] only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStep {
    #[default]
    Topic,
    Script,
    Visuals,
    Submitting,
    Result,
}

/// Job-tracking fields of a single poll response.
///
/// Applying an update replaces these fields wholesale; it can never touch
/// the wizard-input fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobUpdate {
    pub status: JobStatus,
    pub progress: u8,
    pub current_step: String,
    pub logs: Vec<String>,
    pub result_video_url: Option<String>,
}

/// Wizard-input fields plus the job-tracking mirror for one session.
///
/// Invariants:
/// - `job_id` is `Some` iff `status != Idle`.
/// - `result_video_url` is `Some` only when `status == Completed`.
/// - `progress` never regresses locally while the job is non-terminal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WizardState {
    step: WizardStep,
    topic: String,
    platform: Platform,
    script_content: String,
    visual_style: VisualStyle,
    job_id: Option<JobId>,
    status: JobStatus,
    progress: u8,
    current_step: String,
    logs: Vec<String>,
    result_video_url: Option<String>,
    last_error: Option<String>,
    dirty: bool,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> WizardViewModel {
        WizardViewModel {
            step: self.step,
            topic: self.topic.clone(),
            platform: self.platform,
            script_content: self.script_content.clone(),
            visual_style: self.visual_style,
            job_id: self.job_id.clone(),
            status: self.status,
            progress: self.progress,
            current_step: self.current_step.clone(),
            logs: self.logs.clone(),
            result_video_url: self.result_video_url.clone(),
            last_error: self.last_error.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns the dirty flag and clears it. The app uses this to coalesce
    /// re-renders onto observable changes.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn script_content(&self) -> &str {
        &self.script_content
    }

    pub fn visual_style(&self) -> VisualStyle {
        self.visual_style
    }

    pub fn job_id(&self) -> Option<&str> {
        self.job_id.as_deref()
    }

    pub fn status(&self) -> JobStatus {
        self.status
    }

    pub(crate) fn set_step(&mut self, step: WizardStep) {
        if self.step != step {
            self.step = step;
            self.dirty = true;
        }
    }

    pub(crate) fn set_topic(&mut self, topic: String) {
        if self.topic != topic {
            self.topic = topic;
            self.dirty = true;
        }
    }

    pub(crate) fn set_platform(&mut self, platform: Platform) {
        if self.platform != platform {
            self.platform = platform;
            self.dirty = true;
        }
    }

    pub(crate) fn set_script_content(&mut self, script: String) {
        if self.script_content != script {
            self.script_content = script;
            self.dirty = true;
        }
    }

    pub(crate) fn set_visual_style(&mut self, style: VisualStyle) {
        if self.visual_style != style {
            self.visual_style = style;
            self.dirty = true;
        }
    }

    pub(crate) fn set_last_error(&mut self, error: Option<String>) {
        if self.last_error != error {
            self.last_error = error;
            self.dirty = true;
        }
    }

    /// Records a freshly created remote job. The job starts Pending; the
    /// first poll response overwrites that with the authoritative status.
    pub(crate) fn begin_job(&mut self, job_id: JobId) {
        self.job_id = Some(job_id);
        self.status = JobStatus::Pending;
        self.progress = 0;
        self.current_step.clear();
        self.logs.clear();
        self.result_video_url = None;
        self.last_error = None;
        self.dirty = true;
    }

    /// Applies one poll response, replacing all job-tracking fields.
    ///
    /// Returns `false` without mutating anything when `job_id` does not
    /// match the tracked id (stale response after a reset or retry).
    pub(crate) fn apply_update(&mut self, job_id: &str, update: JobUpdate) -> bool {
        if self.job_id.as_deref() != Some(job_id) {
            return false;
        }
        // Remote progress is expected to be monotonic; never regress it
        // locally while the job is still running.
        let progress = if update.status.is_terminal() {
            update.progress
        } else {
            update.progress.max(self.progress)
        };
        self.status = update.status;
        self.progress = progress.min(100);
        self.current_step = update.current_step;
        self.logs = update.logs;
        self.result_video_url = if update.status == JobStatus::Completed {
            update.result_video_url
        } else {
            None
        };
        self.dirty = true;
        true
    }

    /// Drops the tracked job so a fresh submission can replace it.
    pub(crate) fn clear_job(&mut self) {
        self.job_id = None;
        self.status = JobStatus::Idle;
        self.progress = 0;
        self.current_step.clear();
        self.logs.clear();
        self.result_video_url = None;
        self.dirty = true;
    }

    /// Returns the wizard to its starting point. Platform and visual-style
    /// preferences survive the reset as a convenience.
    pub(crate) fn reset(&mut self) {
        let platform = self.platform;
        let visual_style = self.visual_style;
        *self = Self {
            platform,
            visual_style,
            dirty: true,
            ..Self::default()
        };
    }
}
