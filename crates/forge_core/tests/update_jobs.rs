use std::sync::Once;

use forge_core::{
    update, Effect, JobStatus, JobUpdate, Msg, Platform, ProductionRequest, VisualStyle,
    WizardState, WizardStep,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(forge_logging::initialize_for_tests);
}

fn state_on_visuals() -> WizardState {
    let state = WizardState::new();
    let (state, _) = update(state, Msg::TopicChanged("cats".to_string()));
    let (state, _) = update(state, Msg::StyleSelected(VisualStyle::Chaos));
    let (state, _) = update(state, Msg::GenerateClicked);
    let (state, _) = update(state, Msg::ScriptGenerated("draft script".to_string()));
    let (state, _) = update(state, Msg::ScriptConfirmed);
    state
}

fn processing(progress: u8) -> JobUpdate {
    JobUpdate {
        status: JobStatus::Processing,
        progress,
        current_step: "Rendering".to_string(),
        logs: vec!["clip 1 rendered".to_string()],
        result_video_url: None,
    }
}

#[test]
fn launch_submits_current_wizard_fields() {
    init_logging();
    let state = state_on_visuals();
    let (state, effects) = update(state, Msg::LaunchClicked);

    assert_eq!(state.view().step, WizardStep::Submitting);
    assert_eq!(
        effects,
        vec![Effect::SubmitJob {
            request: ProductionRequest {
                topic: "cats".to_string(),
                script: "draft script".to_string(),
                visual_style: VisualStyle::Chaos,
                platform: Platform::Tiktok,
            },
        }]
    );
}

#[test]
fn job_created_starts_tracking_exactly_once() {
    init_logging();
    let state = state_on_visuals();
    let (state, _) = update(state, Msg::LaunchClicked);
    let (state, effects) = update(
        state,
        Msg::JobCreated {
            job_id: "j1".to_string(),
        },
    );

    let view = state.view();
    assert_eq!(view.job_id.as_deref(), Some("j1"));
    assert_eq!(view.status, JobStatus::Pending);
    assert_eq!(
        effects,
        vec![Effect::StartTracking {
            job_id: "j1".to_string(),
        }]
    );

    // A duplicate creation response must not replace the tracked job.
    let (state, effects) = update(
        state,
        Msg::JobCreated {
            job_id: "j2".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.view().job_id.as_deref(), Some("j1"));
}

#[test]
fn second_launch_while_submitting_is_ignored() {
    init_logging();
    let state = state_on_visuals();
    let (state, _) = update(state, Msg::LaunchClicked);
    let (state, effects) = update(state, Msg::LaunchClicked);
    assert!(effects.is_empty());
    assert_eq!(state.view().step, WizardStep::Submitting);
}

#[test]
fn poll_updates_replace_tracking_fields_wholesale() {
    init_logging();
    let state = state_on_visuals();
    let (state, _) = update(state, Msg::LaunchClicked);
    let (state, _) = update(
        state,
        Msg::JobCreated {
            job_id: "j1".to_string(),
        },
    );

    let (state, effects) = update(
        state,
        Msg::JobUpdated {
            job_id: "j1".to_string(),
            update: processing(40),
        },
    );
    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.status, JobStatus::Processing);
    assert_eq!(view.progress, 40);
    assert_eq!(view.current_step, "Rendering");
    assert_eq!(view.logs, vec!["clip 1 rendered".to_string()]);
    assert_eq!(view.step, WizardStep::Submitting);

    // Logs are replaced, not merged.
    let update_two = JobUpdate {
        logs: vec!["clip 2 rendered".to_string()],
        ..processing(60)
    };
    let (state, _) = update(
        state,
        Msg::JobUpdated {
            job_id: "j1".to_string(),
            update: update_two,
        },
    );
    assert_eq!(state.view().logs, vec!["clip 2 rendered".to_string()]);
}

#[test]
fn local_progress_never_regresses_while_running() {
    init_logging();
    let state = state_on_visuals();
    let (state, _) = update(state, Msg::LaunchClicked);
    let (state, _) = update(
        state,
        Msg::JobCreated {
            job_id: "j1".to_string(),
        },
    );
    let (state, _) = update(
        state,
        Msg::JobUpdated {
            job_id: "j1".to_string(),
            update: processing(40),
        },
    );
    let (state, _) = update(
        state,
        Msg::JobUpdated {
            job_id: "j1".to_string(),
            update: processing(25),
        },
    );
    assert_eq!(state.view().progress, 40);
}

#[test]
fn completed_advances_to_result_with_url() {
    init_logging();
    let state = state_on_visuals();
    let (state, _) = update(state, Msg::LaunchClicked);
    let (state, _) = update(
        state,
        Msg::JobCreated {
            job_id: "j1".to_string(),
        },
    );
    let (state, _) = update(
        state,
        Msg::JobUpdated {
            job_id: "j1".to_string(),
            update: processing(40),
        },
    );
    let (state, _) = update(
        state,
        Msg::JobUpdated {
            job_id: "j1".to_string(),
            update: JobUpdate {
                status: JobStatus::Completed,
                progress: 100,
                current_step: "Done".to_string(),
                logs: vec!["finished".to_string()],
                result_video_url: Some("http://backend.example/out/j1.mp4".to_string()),
            },
        },
    );

    let view = state.view();
    assert_eq!(view.step, WizardStep::Result);
    assert_eq!(view.status, JobStatus::Completed);
    assert_eq!(view.progress, 100);
    assert_eq!(
        view.result_video_url.as_deref(),
        Some("http://backend.example/out/j1.mp4")
    );
}

#[test]
fn remote_failure_routes_back_to_visuals() {
    init_logging();
    let state = state_on_visuals();
    let (state, _) = update(state, Msg::LaunchClicked);
    let (state, _) = update(
        state,
        Msg::JobCreated {
            job_id: "j1".to_string(),
        },
    );
    let (state, _) = update(
        state,
        Msg::JobUpdated {
            job_id: "j1".to_string(),
            update: JobUpdate {
                status: JobStatus::Failed,
                progress: 55,
                current_step: "Rendering".to_string(),
                logs: vec!["renderer crashed".to_string()],
                result_video_url: None,
            },
        },
    );

    let view = state.view();
    assert_eq!(view.step, WizardStep::Visuals);
    assert_eq!(view.status, JobStatus::Failed);
    assert!(view.result_video_url.is_none());
    assert!(view.last_error.is_some());
    // Entered data survives for a retry.
    assert_eq!(view.topic, "cats");
    assert_eq!(view.script_content, "draft script");
}

#[test]
fn relaunch_after_failure_clears_old_job() {
    init_logging();
    let state = state_on_visuals();
    let (state, _) = update(state, Msg::LaunchClicked);
    let (state, _) = update(
        state,
        Msg::JobCreated {
            job_id: "j1".to_string(),
        },
    );
    let (state, _) = update(
        state,
        Msg::JobUpdated {
            job_id: "j1".to_string(),
            update: JobUpdate {
                status: JobStatus::Failed,
                ..JobUpdate::default()
            },
        },
    );

    let (state, effects) = update(state, Msg::LaunchClicked);
    assert_eq!(state.view().step, WizardStep::Submitting);
    assert!(state.view().job_id.is_none());
    assert!(matches!(effects.as_slice(), [Effect::SubmitJob { .. }]));

    // The replacement job gets tracked under its own id; updates tagged
    // with the dead id are discarded.
    let (state, _) = update(
        state,
        Msg::JobCreated {
            job_id: "j2".to_string(),
        },
    );
    let (state, _) = update(
        state,
        Msg::JobUpdated {
            job_id: "j1".to_string(),
            update: processing(90),
        },
    );
    let view = state.view();
    assert_eq!(view.job_id.as_deref(), Some("j2"));
    assert_eq!(view.status, JobStatus::Pending);
    assert_eq!(view.progress, 0);
}

#[test]
fn submission_failure_returns_to_visuals_without_job_state() {
    init_logging();
    let state = state_on_visuals();
    let (state, _) = update(state, Msg::LaunchClicked);
    let (mut state, effects) = update(
        state,
        Msg::SubmissionFailed {
            reason: "http status 500".to_string(),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.step, WizardStep::Visuals);
    assert_eq!(view.status, JobStatus::Idle);
    assert!(view.job_id.is_none());
    assert_eq!(view.last_error.as_deref(), Some("http status 500"));
    assert!(state.consume_dirty());
}

#[test]
fn stale_update_after_reset_is_discarded() {
    init_logging();
    let state = state_on_visuals();
    let (state, _) = update(state, Msg::LaunchClicked);
    let (state, _) = update(
        state,
        Msg::JobCreated {
            job_id: "j1".to_string(),
        },
    );
    let (state, effects) = update(state, Msg::ResetClicked);
    assert_eq!(effects, vec![Effect::StopTracking]);

    let (mut state, effects) = update(
        state,
        Msg::JobUpdated {
            job_id: "j1".to_string(),
            update: processing(80),
        },
    );
    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.step, WizardStep::Topic);
    assert_eq!(view.status, JobStatus::Idle);
    assert!(view.job_id.is_none());
    state.consume_dirty();
}

#[test]
fn script_edits_are_never_touched_by_job_updates() {
    init_logging();
    let state = state_on_visuals();
    let (state, _) = update(state, Msg::LaunchClicked);
    let (state, _) = update(
        state,
        Msg::JobCreated {
            job_id: "j1".to_string(),
        },
    );
    // Non-job fields stay editable while a job is tracked.
    let (state, _) = update(state, Msg::ScriptEdited("tweaked".to_string()));
    let (state, _) = update(
        state,
        Msg::JobUpdated {
            job_id: "j1".to_string(),
            update: processing(10),
        },
    );
    let view = state.view();
    assert_eq!(view.script_content, "tweaked");
    assert_eq!(view.topic, "cats");
}
