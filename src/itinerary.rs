//! Itinerary result returned by the generation endpoint.
//!
//! Read-only render input. Every field tolerates a missing key or an
//! explicit `null`, so partially populated backend responses still
//! deserialize.

use serde::{Deserialize, Deserializer, Serialize};

/// A JSON scalar the backend sends either as a number or as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Full response of the itinerary generation call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItineraryResult {
    #[serde(default)]
    pub weather: Option<Weather>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hotels: Vec<Hotel>,
    #[serde(default)]
    pub itinerary: Option<Itinerary>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    #[serde(default, deserialize_with = "null_as_default")]
    pub current: CurrentWeather,
    #[serde(default, deserialize_with = "null_as_default")]
    pub forecast: Vec<ForecastDay>,
    #[serde(default)]
    pub travel_recommendations: Option<TravelRecommendations>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    #[serde(default, deserialize_with = "null_as_default")]
    pub temperature: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub humidity: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub wind_speed: f64,
    #[serde(default)]
    pub humidity_level: Option<String>,
    #[serde(default)]
    pub wind_description: Option<String>,
    #[serde(default)]
    pub google_maps_url: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// Calendar date, normally `YYYY-MM-DD`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub temperature_max: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub temperature_min: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub humidity: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub wind_speed: f64,
    #[serde(default)]
    pub humidity_level: Option<String>,
    #[serde(default)]
    pub wind_description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TravelRecommendations {
    #[serde(default)]
    pub clothing: Option<Vec<String>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub activities: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub precautions: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub best_times: Vec<String>,
}

/// Booking site entry: either a bare domain or a named link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BookingSite {
    Domain(String),
    Link { name: String, url: String },
}

impl BookingSite {
    /// Host name used to build search links, without scheme or trailing slash.
    pub fn host(&self) -> &str {
        let raw = match self {
            Self::Domain(domain) => domain.as_str(),
            Self::Link { url, .. } => url.as_str(),
        };
        let raw = raw
            .strip_prefix("https://")
            .or_else(|| raw.strip_prefix("http://"))
            .unwrap_or(raw);
        raw.split('/').next().unwrap_or(raw)
    }

    /// Label shown to the user.
    pub fn label(&self) -> &str {
        match self {
            Self::Domain(domain) => domain,
            Self::Link { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price_per_night: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub distance_to_center: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub accessibility: Vec<String>,
    #[serde(default)]
    pub google_maps_url: Option<String>,
    #[serde(default)]
    pub tripadvisor_rating: Option<Scalar>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub booking_sites: Vec<BookingSite>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    #[serde(default)]
    pub days: Option<Vec<DayPlan>>,
    #[serde(default)]
    pub recommendations: Option<Recommendations>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    #[serde(default)]
    pub day: Option<Scalar>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub weather: Option<ForecastDay>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub activities: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub meals: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: Vec<String>,
}

impl DayPlan {
    /// Day label; falls back to the 1-based position when the backend
    /// omitted the day number.
    pub fn label(&self, index: usize) -> String {
        match &self.day {
            Some(day) => day.to_string(),
            None => (index + 1).to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    #[serde(default)]
    pub packing: Option<Vec<String>>,
    #[serde(default)]
    pub tips: Option<Vec<String>>,
    #[serde(default)]
    pub budget_estimate: Option<BudgetEstimate>,
}

/// Trip cost estimate, in `currency` (INR from the reference backend).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetEstimate {
    #[serde(default, deserialize_with = "null_as_default")]
    pub daily_activities: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_activities: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub accommodation: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub estimated_total: f64,
    #[serde(default)]
    pub currency: Option<String>,
}

/// Deserialize an explicit `null` the same way as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
