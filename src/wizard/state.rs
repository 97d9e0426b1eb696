//! Wizard step state machine: tracks which panel the user is on.

use serde::{Deserialize, Serialize};

/// The panels of the wizard.
///
/// Progresses linearly: PersonalInfo → TravelDetails → Preferences →
/// Itinerary. The first three are forms; Itinerary shows generation
/// progress and the rendered result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    PersonalInfo,
    TravelDetails,
    Preferences,
    Itinerary,
}

impl WizardStep {
    /// All steps in display order.
    pub const ALL: [WizardStep; 4] = [
        WizardStep::PersonalInfo,
        WizardStep::TravelDetails,
        WizardStep::Preferences,
        WizardStep::Itinerary,
    ];

    /// 1-based step number, as shown in the progress indicator.
    pub fn number(&self) -> u8 {
        match self {
            Self::PersonalInfo => 1,
            Self::TravelDetails => 2,
            Self::Preferences => 3,
            Self::Itinerary => 4,
        }
    }

    pub fn from_number(n: u8) -> Option<WizardStep> {
        Self::ALL.into_iter().find(|s| s.number() == n)
    }

    /// Whether this step is a form the user fills in.
    pub fn is_form(&self) -> bool {
        !self.is_terminal()
    }

    /// Whether this step is the generation/result panel.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Itinerary)
    }

    /// Check if moving forward from `self` to `target` is valid via "next".
    ///
    /// The Itinerary panel is only reachable through submission, never
    /// through a plain advance.
    pub fn can_advance_to(&self, target: WizardStep) -> bool {
        use WizardStep::*;
        matches!(
            (self, target),
            (PersonalInfo, TravelDetails) | (TravelDetails, Preferences)
        )
    }

    pub fn next(&self) -> Option<WizardStep> {
        Self::from_number(self.number() + 1)
    }

    pub fn prev(&self) -> Option<WizardStep> {
        Self::from_number(self.number().checked_sub(1)?)
    }

    /// Element id of the panel for this step.
    pub fn panel_id(&self) -> String {
        format!("step{}", self.number())
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::PersonalInfo => "personal_info",
            Self::TravelDetails => "travel_details",
            Self::Preferences => "preferences",
            Self::Itinerary => "itinerary",
        };
        write!(f, "{s}")
    }
}

/// Marker shown for one entry of the progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepMarker {
    Completed,
    Active,
    Pending,
}

/// Current position in the wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepState {
    pub current: WizardStep,
}

impl StepState {
    /// Move to the next form step. Returns an error string when the move
    /// would leave the forms (the result panel is entered by submission).
    pub fn advance(&mut self) -> Result<WizardStep, String> {
        let next = self
            .current
            .next()
            .ok_or_else(|| "Already at the last step".to_string())?;
        if !self.current.can_advance_to(next) {
            return Err(format!("Cannot advance from {} to {}", self.current, next));
        }
        self.current = next;
        Ok(next)
    }

    /// Step back one panel; stays put on the first step.
    pub fn retreat(&mut self) -> WizardStep {
        if let Some(prev) = self.current.prev() {
            self.current = prev;
        }
        self.current
    }

    /// Jump to the result panel once submission starts.
    pub fn enter_itinerary(&mut self) {
        self.current = WizardStep::Itinerary;
    }

    pub fn reset(&mut self) {
        self.current = WizardStep::default();
    }

    /// Progress markers for every step: earlier steps completed, the
    /// current one active, later ones pending.
    pub fn markers(&self) -> Vec<(WizardStep, StepMarker)> {
        let current = self.current.number();
        WizardStep::ALL
            .into_iter()
            .map(|step| {
                let marker = match step.number() {
                    n if n < current => StepMarker::Completed,
                    n if n == current => StepMarker::Active,
                    _ => StepMarker::Pending,
                };
                (step, marker)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_advances() {
        use WizardStep::*;
        assert!(PersonalInfo.can_advance_to(TravelDetails));
        assert!(TravelDetails.can_advance_to(Preferences));
    }

    #[test]
    fn invalid_advances() {
        use WizardStep::*;
        // Skip steps
        assert!(!PersonalInfo.can_advance_to(Preferences));
        // Result panel only via submission
        assert!(!Preferences.can_advance_to(Itinerary));
        // Backward
        assert!(!TravelDetails.can_advance_to(PersonalInfo));
        // Self-transition
        assert!(!PersonalInfo.can_advance_to(PersonalInfo));
    }

    #[test]
    fn numbers_round_trip() {
        for step in WizardStep::ALL {
            assert_eq!(WizardStep::from_number(step.number()), Some(step));
        }
        assert_eq!(WizardStep::from_number(0), None);
        assert_eq!(WizardStep::from_number(5), None);
    }

    #[test]
    fn next_and_prev_walk_all_steps() {
        use WizardStep::*;
        assert_eq!(PersonalInfo.prev(), None);
        assert_eq!(PersonalInfo.next(), Some(TravelDetails));
        assert_eq!(Itinerary.next(), None);
        assert_eq!(Itinerary.prev(), Some(Preferences));
    }

    #[test]
    fn display_matches_serde() {
        for step in WizardStep::ALL {
            let display = format!("{step}");
            let json = serde_json::to_string(&step).unwrap();
            assert_eq!(format!("\"{display}\""), json);
        }
    }

    #[test]
    fn advance_stops_before_itinerary() {
        let mut state = StepState::default();
        assert_eq!(state.advance().unwrap(), WizardStep::TravelDetails);
        assert_eq!(state.advance().unwrap(), WizardStep::Preferences);
        assert!(state.advance().is_err());
        assert_eq!(state.current, WizardStep::Preferences);
    }

    #[test]
    fn retreat_floors_at_first_step() {
        let mut state = StepState::default();
        assert_eq!(state.retreat(), WizardStep::PersonalInfo);
        state.enter_itinerary();
        assert_eq!(state.retreat(), WizardStep::Preferences);
    }

    #[test]
    fn markers_track_current_step() {
        let mut state = StepState::default();
        state.advance().unwrap();
        let markers: Vec<StepMarker> = state.markers().into_iter().map(|(_, m)| m).collect();
        assert_eq!(
            markers,
            vec![
                StepMarker::Completed,
                StepMarker::Active,
                StepMarker::Pending,
                StepMarker::Pending
            ]
        );
    }

    #[test]
    fn panel_ids() {
        assert_eq!(WizardStep::PersonalInfo.panel_id(), "step1");
        assert_eq!(WizardStep::Itinerary.panel_id(), "step4");
    }
}
