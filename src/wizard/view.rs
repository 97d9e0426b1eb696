//! Derived render state for whatever front-end displays the wizard.

use serde::{Deserialize, Serialize};

use crate::render::RenderedResult;

use super::form::FormValues;
use super::notify::Notification;
use super::state::{StepMarker, WizardStep};

/// Progress of itinerary generation for the result panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    #[default]
    Idle,
    Loading,
    Failed,
    Ready,
}

impl std::fmt::Display for GenerationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Failed => "failed",
            Self::Ready => "ready",
        };
        write!(f, "{s}")
    }
}

/// One entry of the progress indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEntry {
    pub step: WizardStep,
    pub number: u8,
    pub marker: StepMarker,
}

/// Everything a front-end needs to draw the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub step: WizardStep,
    /// Id of the single visible panel.
    pub active_panel: String,
    pub progress: Vec<ProgressEntry>,
    pub form: FormValues,
    pub companions_visible: bool,
    pub other_health_visible: bool,
    pub generation: GenerationStatus,
    /// Rendered fragments, present only once generation succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<RenderedResult>,
    /// Whether the "try again" affordance is shown.
    pub retry_available: bool,
    pub chrome_visible: bool,
    pub notifications: Vec<Notification>,
}
