//! Copies validated form inputs into the profile draft.
//!
//! Callers run `validate_step` first; collection assumes the step's inputs
//! passed and never fails.

use super::form::{FormValues, OTHER_HEALTH_CONDITION};
use super::model::ProfileDraft;
use super::state::WizardStep;
use super::validate::parse_days;

/// Write the fields belonging to `step` into `draft`.
pub fn collect_step(step: WizardStep, form: &FormValues, draft: &mut ProfileDraft) {
    match step {
        WizardStep::PersonalInfo => collect_personal_info(form, draft),
        WizardStep::TravelDetails => collect_travel_details(form, draft),
        WizardStep::Preferences => collect_preferences(form, draft),
        WizardStep::Itinerary => {}
    }
}

fn collect_personal_info(form: &FormValues, draft: &mut ProfileDraft) {
    draft.name = Some(form.name.trim().to_string());
    draft.travel_type = form.travel_type;
    draft.companions = form
        .companions
        .trim()
        .parse::<u32>()
        .ok()
        .or_else(|| form.travel_type.map(|t| t.default_companions()));
    draft.health_conditions = Some(health_conditions(form));
}

fn collect_travel_details(form: &FormValues, draft: &mut ProfileDraft) {
    draft.destination = Some(form.destination.trim().to_string());
    draft.days = parse_days(&form.days);
    draft.budget_range = form.budget;
}

fn collect_preferences(form: &FormValues, draft: &mut ProfileDraft) {
    draft.interests = Some(form.interests.clone());
}

/// Checked conditions in order; "other" contributes its trimmed free text,
/// and is dropped entirely when that text is blank.
fn health_conditions(form: &FormValues) -> Vec<String> {
    form.health_conditions
        .iter()
        .filter_map(|condition| {
            if condition == OTHER_HEALTH_CONDITION {
                let other = form.other_health_condition.trim();
                (!other.is_empty()).then(|| other.to_string())
            } else {
                Some(condition.clone())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::model::{BudgetRange, TravelType};

    fn personal_form() -> FormValues {
        let mut form = FormValues {
            name: "  Priya  ".to_string(),
            ..FormValues::default()
        };
        form.select_travel_type(Some(TravelType::Couple));
        form
    }

    #[test]
    fn personal_info_is_trimmed_and_typed() {
        let mut draft = ProfileDraft::default();
        collect_step(WizardStep::PersonalInfo, &personal_form(), &mut draft);
        assert_eq!(draft.name.as_deref(), Some("Priya"));
        assert_eq!(draft.travel_type, Some(TravelType::Couple));
        assert_eq!(draft.companions, Some(2));
        assert_eq!(draft.health_conditions, Some(vec![]));
        assert!(draft.destination.is_none());
    }

    #[test]
    fn edited_companions_win_over_default() {
        let mut form = personal_form();
        form.companions = "4".to_string();
        let mut draft = ProfileDraft::default();
        collect_step(WizardStep::PersonalInfo, &form, &mut draft);
        assert_eq!(draft.companions, Some(4));
    }

    #[test]
    fn blank_companions_fall_back_to_default() {
        let mut form = personal_form();
        form.companions = String::new();
        let mut draft = ProfileDraft::default();
        collect_step(WizardStep::PersonalInfo, &form, &mut draft);
        assert_eq!(draft.companions, Some(2));
    }

    #[test]
    fn other_with_blank_text_is_excluded() {
        let mut form = personal_form();
        form.set_health_condition("heart", true);
        form.set_health_condition(OTHER_HEALTH_CONDITION, true);
        form.other_health_condition = "   ".to_string();
        let mut draft = ProfileDraft::default();
        collect_step(WizardStep::PersonalInfo, &form, &mut draft);
        assert_eq!(draft.health_conditions, Some(vec!["heart".to_string()]));
    }

    #[test]
    fn other_with_text_contributes_trimmed_text() {
        let mut form = personal_form();
        form.set_health_condition(OTHER_HEALTH_CONDITION, true);
        form.other_health_condition = "  asthma ".to_string();
        let mut draft = ProfileDraft::default();
        collect_step(WizardStep::PersonalInfo, &form, &mut draft);
        assert_eq!(draft.health_conditions, Some(vec!["asthma".to_string()]));
    }

    #[test]
    fn travel_details_and_preferences() {
        let mut form = FormValues {
            destination: " Kochi ".to_string(),
            days: "7".to_string(),
            budget: Some(BudgetRange::High),
            ..FormValues::default()
        };
        form.set_interest("beaches", true);
        form.set_interest("restaurants", true);

        let mut draft = ProfileDraft::default();
        collect_step(WizardStep::TravelDetails, &form, &mut draft);
        collect_step(WizardStep::Preferences, &form, &mut draft);
        assert_eq!(draft.destination.as_deref(), Some("Kochi"));
        assert_eq!(draft.days, Some(7));
        assert_eq!(draft.budget_range, Some(BudgetRange::High));
        assert_eq!(
            draft.interests,
            Some(vec!["beaches".to_string(), "restaurants".to_string()])
        );
    }

    #[test]
    fn itinerary_step_collects_nothing() {
        let mut draft = ProfileDraft::default();
        collect_step(WizardStep::Itinerary, &personal_form(), &mut draft);
        assert!(draft.is_empty());
    }
}
