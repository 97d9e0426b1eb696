//! Travel profile data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who the user is travelling with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TravelType {
    Alone,
    Couple,
    Group,
}

impl TravelType {
    /// Companion count pre-filled when this travel type is selected.
    pub fn default_companions(&self) -> u32 {
        match self {
            Self::Alone => 1,
            Self::Couple => 2,
            Self::Group => 3,
        }
    }

    /// Whether the companions field is shown for this travel type.
    pub fn shows_companions(&self) -> bool {
        !matches!(self, Self::Alone)
    }
}

impl std::fmt::Display for TravelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Alone => write!(f, "alone"),
            Self::Couple => write!(f, "couple"),
            Self::Group => write!(f, "group"),
        }
    }
}

impl std::str::FromStr for TravelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "alone" => Ok(Self::Alone),
            "couple" => Ok(Self::Couple),
            "group" => Ok(Self::Group),
            other => Err(format!("Unknown travel type: {other}")),
        }
    }
}

/// Budget bracket token sent to the backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BudgetRange {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for BudgetRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

impl std::str::FromStr for BudgetRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!("Unknown budget range: {other}")),
        }
    }
}

/// A complete travel profile, frozen at submission.
///
/// Serialized as the body of the profile-creation request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub name: String,
    pub travel_type: TravelType,
    pub companions: u32,
    pub health_conditions: Vec<String>,
    pub destination: String,
    pub days: u32,
    pub budget_range: BudgetRange,
    pub interests: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    pub fn has_health_conditions(&self) -> bool {
        !self.health_conditions.is_empty()
    }

    /// Accessibility requirements implied by the declared health conditions.
    ///
    /// Sorted and de-duplicated.
    pub fn accessibility_needs(&self) -> Vec<&'static str> {
        let mut needs = Vec::new();
        for condition in &self.health_conditions {
            let condition = condition.to_lowercase();
            if condition.contains("leg") || condition.contains("mobility") {
                needs.extend(["wheelchair_accessible", "elevator_access"]);
            } else if condition.contains("heart") {
                needs.extend(["low_intensity_activities", "medical_facilities_nearby"]);
            } else if condition.contains("lung") || condition.contains("respiratory") {
                needs.extend(["air_quality_consideration", "avoid_high_altitude"]);
            }
        }
        needs.sort_unstable();
        needs.dedup();
        needs
    }
}

/// Profile fields accumulated step by step before submission.
///
/// Every field is `None` until its step has been validated and collected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_type: Option<TravelType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub companions: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_conditions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_range: Option<BudgetRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interests: Option<Vec<String>>,
}

impl ProfileDraft {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Freeze the draft into a submittable profile. Returns `None` while
    /// any required field is still missing.
    pub fn to_profile(&self) -> Option<Profile> {
        let travel_type = self.travel_type?;
        Some(Profile {
            name: self.name.clone()?,
            travel_type,
            companions: self
                .companions
                .unwrap_or_else(|| travel_type.default_companions()),
            health_conditions: self.health_conditions.clone().unwrap_or_default(),
            destination: self.destination.clone()?,
            days: self.days?,
            budget_range: self.budget_range?,
            interests: self.interests.clone()?,
            created_at: Utc::now(),
        })
    }
}
