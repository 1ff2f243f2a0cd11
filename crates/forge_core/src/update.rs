use crate::{Effect, JobStatus, Msg, ProductionRequest, WizardState, WizardStep};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: WizardState, msg: Msg) -> (WizardState, Vec<Effect>) {
    let effects = match msg {
        Msg::TopicChanged(topic) => {
            state.set_topic(topic);
            Vec::new()
        }
        Msg::PlatformSelected(platform) => {
            state.set_platform(platform);
            Vec::new()
        }
        Msg::GenerateClicked => {
            if state.step() != WizardStep::Topic || state.topic().trim().is_empty() {
                return (state, Vec::new());
            }
            vec![Effect::GenerateScript {
                topic: state.topic().to_string(),
                platform: state.platform(),
            }]
        }
        Msg::ScriptGenerated(script) => {
            // A draft arriving after the user moved on (reset mid-flight)
            // is dropped rather than clobbering the current screen.
            if state.step() == WizardStep::Topic {
                state.set_script_content(script);
                state.set_step(WizardStep::Script);
            }
            Vec::new()
        }
        Msg::ScriptEdited(script) => {
            state.set_script_content(script);
            Vec::new()
        }
        Msg::ScriptConfirmed => {
            if state.step() == WizardStep::Script {
                state.set_step(WizardStep::Visuals);
            }
            Vec::new()
        }
        Msg::StyleSelected(style) => {
            state.set_visual_style(style);
            Vec::new()
        }
        Msg::LaunchClicked => {
            if state.step() != WizardStep::Visuals {
                return (state, Vec::new());
            }
            match state.status() {
                JobStatus::Idle => {}
                // A remote failure leaves the user on Visuals with the job
                // fields still mirrored; relaunching drops them first.
                JobStatus::Failed => state.clear_job(),
                _ => return (state, Vec::new()),
            }
            state.set_last_error(None);
            state.set_step(WizardStep::Submitting);
            vec![Effect::SubmitJob {
                request: ProductionRequest {
                    topic: state.topic().to_string(),
                    script: state.script_content().to_string(),
                    visual_style: state.visual_style(),
                    platform: state.platform(),
                },
            }]
        }
        Msg::BackClicked => {
            match state.step() {
                WizardStep::Script => state.set_step(WizardStep::Topic),
                WizardStep::Visuals => state.set_step(WizardStep::Script),
                // No backward transition once a job is in flight or done.
                WizardStep::Topic | WizardStep::Submitting | WizardStep::Result => {}
            }
            Vec::new()
        }
        Msg::ResetClicked => {
            state.reset();
            vec![Effect::StopTracking]
        }
        Msg::JobCreated { job_id } => {
            // Only the submission we are waiting on may create job state;
            // a creation response landing after a reset is stale.
            if state.step() != WizardStep::Submitting || state.job_id().is_some() {
                return (state, Vec::new());
            }
            state.begin_job(job_id.clone());
            vec![Effect::StartTracking { job_id }]
        }
        Msg::SubmissionFailed { reason } => {
            if state.step() == WizardStep::Submitting && state.job_id().is_none() {
                state.set_last_error(Some(reason));
                state.set_step(WizardStep::Visuals);
            }
            Vec::new()
        }
        Msg::JobUpdated { job_id, update } => {
            let status = update.status;
            if state.apply_update(&job_id, update) {
                match status {
                    JobStatus::Completed => state.set_step(WizardStep::Result),
                    JobStatus::Failed => {
                        state.set_last_error(Some(format!("production of job {job_id} failed")));
                        state.set_step(WizardStep::Visuals);
                    }
                    _ => {}
                }
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
