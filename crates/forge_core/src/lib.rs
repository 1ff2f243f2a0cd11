//! Studio core: pure wizard state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, ProductionRequest};
pub use msg::Msg;
pub use state::{
    JobId, JobStatus, JobUpdate, Platform, VisualStyle, WizardState, WizardStep,
};
pub use update::update;
pub use view_model::WizardViewModel;
