#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the topic input.
    TopicChanged(String),
    /// User picked a target platform.
    PlatformSelected(crate::Platform),
    /// User asked for a script draft for the current topic.
    GenerateClicked,
    /// Script generator delivered a draft.
    ScriptGenerated(String),
    /// User edited the script text.
    ScriptEdited(String),
    /// User accepted the script and moved on.
    ScriptConfirmed,
    /// User picked a visual style.
    StyleSelected(crate::VisualStyle),
    /// User launched production from the Visuals step.
    LaunchClicked,
    /// User stepped back one screen.
    BackClicked,
    /// User abandoned the session and started over.
    ResetClicked,
    /// Backend accepted the creation request.
    JobCreated { job_id: crate::JobId },
    /// Backend rejected the creation request.
    SubmissionFailed { reason: String },
    /// Poll response for a tracked job.
    JobUpdated {
        job_id: crate::JobId,
        update: crate::JobUpdate,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
