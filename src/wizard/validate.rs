//! Per-step required-field checks.

use crate::error::ValidationError;

use super::form::FormValues;
use super::state::WizardStep;

/// Inclusive bounds for the trip length.
pub const MIN_DAYS: u32 = 1;
pub const MAX_DAYS: u32 = 30;

/// Validate the inputs belonging to `step`. The first failing rule wins.
pub fn validate_step(step: WizardStep, form: &FormValues) -> Result<(), ValidationError> {
    match step {
        WizardStep::PersonalInfo => validate_personal_info(form),
        WizardStep::TravelDetails => validate_travel_details(form),
        WizardStep::Preferences => validate_preferences(form),
        WizardStep::Itinerary => Ok(()),
    }
}

fn validate_personal_info(form: &FormValues) -> Result<(), ValidationError> {
    let step = WizardStep::PersonalInfo;
    if form.name.trim().is_empty() {
        return Err(ValidationError::new(step, "Please enter your name"));
    }
    if form.travel_type.is_none() {
        return Err(ValidationError::new(step, "Please select your travel type"));
    }
    Ok(())
}

fn validate_travel_details(form: &FormValues) -> Result<(), ValidationError> {
    let step = WizardStep::TravelDetails;
    if form.destination.trim().is_empty() {
        return Err(ValidationError::new(step, "Please enter your destination"));
    }
    if parse_days(&form.days).is_none() {
        return Err(ValidationError::new(
            step,
            format!("Please enter a valid number of days ({MIN_DAYS}-{MAX_DAYS})"),
        ));
    }
    if form.budget.is_none() {
        return Err(ValidationError::new(step, "Please select your budget range"));
    }
    Ok(())
}

fn validate_preferences(form: &FormValues) -> Result<(), ValidationError> {
    if form.interests.is_empty() {
        return Err(ValidationError::new(
            WizardStep::Preferences,
            "Please select at least one interest",
        ));
    }
    Ok(())
}

/// Parse the raw days input, accepting only integers within bounds.
pub fn parse_days(raw: &str) -> Option<u32> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|d| (MIN_DAYS..=MAX_DAYS).contains(d))
}
