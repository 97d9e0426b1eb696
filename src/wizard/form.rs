//! Form values, the view-binding layer between input widgets and the wizard.
//!
//! Holds the raw state of every form input so validation and collection can
//! run against plain data. Text inputs keep the user's raw text; selects are
//! typed and `None` until chosen.

use serde::{Deserialize, Serialize};

use super::model::{BudgetRange, TravelType};

/// Checkbox value that reveals the free-text health condition field.
pub const OTHER_HEALTH_CONDITION: &str = "other";

/// Raw values of every input across the three form steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormValues {
    pub name: String,
    pub travel_type: Option<TravelType>,
    /// Raw companions input; pre-filled on travel type selection.
    pub companions: String,
    /// Checked health condition boxes, in display order.
    pub health_conditions: Vec<String>,
    pub other_health_condition: String,
    pub destination: String,
    /// Raw days input.
    pub days: String,
    pub budget: Option<BudgetRange>,
    /// Checked interest boxes, in display order.
    pub interests: Vec<String>,
}

impl FormValues {
    /// Select a travel type, pre-filling the companions count.
    pub fn select_travel_type(&mut self, travel_type: Option<TravelType>) {
        self.travel_type = travel_type;
        if let Some(t) = travel_type {
            self.companions = t.default_companions().to_string();
        }
    }

    /// Check or uncheck a health condition box.
    pub fn set_health_condition(&mut self, value: &str, checked: bool) {
        set_checked(&mut self.health_conditions, value, checked);
    }

    /// Check or uncheck an interest box.
    pub fn set_interest(&mut self, value: &str, checked: bool) {
        set_checked(&mut self.interests, value, checked);
    }

    /// Whether the companions input is visible.
    pub fn companions_visible(&self) -> bool {
        self.travel_type.is_some_and(|t| t.shows_companions())
    }

    /// Whether the free-text health condition input is visible.
    pub fn other_health_visible(&self) -> bool {
        self.health_conditions
            .iter()
            .any(|c| c == OTHER_HEALTH_CONDITION)
    }

    /// Replace all values with `incoming`, running the travel type change
    /// handler when the type changed and the companions field was not
    /// edited in the same update.
    pub fn apply_update(&mut self, incoming: FormValues) {
        let type_changed = incoming.travel_type != self.travel_type;
        let companions_edited = incoming.companions != self.companions;
        let travel_type = incoming.travel_type;
        *self = incoming;
        if type_changed && !companions_edited {
            self.select_travel_type(travel_type);
        }
    }

    /// Reset every input to its initial empty state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

fn set_checked(values: &mut Vec<String>, value: &str, checked: bool) {
    let present = values.iter().any(|v| v == value);
    if checked && !present {
        values.push(value.to_string());
    } else if !checked {
        values.retain(|v| v != value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn travel_type_prefills_companions() {
        let mut form = FormValues::default();
        form.select_travel_type(Some(TravelType::Alone));
        assert_eq!(form.companions, "1");
        assert!(!form.companions_visible());

        form.select_travel_type(Some(TravelType::Couple));
        assert_eq!(form.companions, "2");
        assert!(form.companions_visible());

        form.select_travel_type(Some(TravelType::Group));
        assert_eq!(form.companions, "3");
    }

    #[test]
    fn companions_stay_editable_after_selection() {
        let mut form = FormValues::default();
        form.select_travel_type(Some(TravelType::Group));
        form.companions = "6".to_string();
        assert_eq!(form.companions, "6");
    }

    #[test]
    fn other_checkbox_toggles_free_text_visibility() {
        let mut form = FormValues::default();
        assert!(!form.other_health_visible());
        form.set_health_condition(OTHER_HEALTH_CONDITION, true);
        assert!(form.other_health_visible());
        form.set_health_condition(OTHER_HEALTH_CONDITION, false);
        assert!(!form.other_health_visible());
    }

    #[test]
    fn checking_twice_does_not_duplicate() {
        let mut form = FormValues::default();
        form.set_interest("museums", true);
        form.set_interest("museums", true);
        form.set_interest("parks", true);
        assert_eq!(form.interests, vec!["museums", "parks"]);
        form.set_interest("museums", false);
        assert_eq!(form.interests, vec!["parks"]);
    }

    #[test]
    fn apply_update_prefills_on_type_change_only() {
        let mut form = FormValues::default();
        form.apply_update(FormValues {
            travel_type: Some(TravelType::Couple),
            ..FormValues::default()
        });
        assert_eq!(form.companions, "2");

        // Type changed together with an explicit companions edit: keep the edit.
        form.apply_update(FormValues {
            travel_type: Some(TravelType::Group),
            companions: "5".to_string(),
            ..FormValues::default()
        });
        assert_eq!(form.companions, "5");

        // Type unchanged: user value survives.
        let mut same = form.clone();
        same.companions = "7".to_string();
        form.apply_update(same);
        assert_eq!(form.companions, "7");
    }

    #[test]
    fn clear_hides_conditional_fields() {
        let mut form = FormValues::default();
        form.select_travel_type(Some(TravelType::Group));
        form.set_health_condition(OTHER_HEALTH_CONDITION, true);
        form.name = "Ravi".to_string();
        form.clear();
        assert_eq!(form, FormValues::default());
        assert!(!form.companions_visible());
        assert!(!form.other_health_visible());
    }

    #[test]
    fn deserializes_partial_json() {
        let form: FormValues =
            serde_json::from_str(r#"{"name": "Meera", "travel_type": "alone"}"#).unwrap();
        assert_eq!(form.name, "Meera");
        assert_eq!(form.travel_type, Some(TravelType::Alone));
        assert!(form.days.is_empty());
    }
}
