use crate::{JobId, Platform, VisualStyle};

/// Fields the backend needs to render one video.
///
/// The fixed faceless defaults (avatar disabled, default voice) are added at
/// the wire layer, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductionRequest {
    pub topic: String,
    pub script: String,
    pub visual_style: VisualStyle,
    pub platform: Platform,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    GenerateScript { topic: String, platform: Platform },
    SubmitJob { request: ProductionRequest },
    StartTracking { job_id: JobId },
    StopTracking,
}
