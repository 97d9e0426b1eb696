//! Result rendering: turns an `ItineraryResult` into HTML fragments.
//!
//! Rendering is pure: the same result and style always produce the same
//! fragments. `Rich` is the default style. Markup comes from the askama
//! templates in `templates/results/`, which escape every interpolated value.

pub mod format;
pub mod hotels;
pub mod itinerary;
pub mod weather;

use askama::Template;
use serde::{Deserialize, Serialize};

use crate::itinerary::ItineraryResult;
use crate::wizard::Profile;

pub use hotels::NO_HOTELS_MESSAGE;
pub use itinerary::ITINERARY_FAILED_MESSAGE;

/// Which of the two card layouts to produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderStyle {
    /// Detailed cards: humidity/wind labels, empty stars, booking links,
    /// weather advice, up to four hotels.
    #[default]
    Rich,
    /// Compact cards: filled stars only, up to three hotels, no links.
    Simple,
}

impl std::fmt::Display for RenderStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rich => write!(f, "rich"),
            Self::Simple => write!(f, "simple"),
        }
    }
}

impl std::str::FromStr for RenderStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rich" => Ok(Self::Rich),
            "simple" => Ok(Self::Simple),
            other => Err(format!("Unknown render style: {other} (expected rich or simple)")),
        }
    }
}

/// HTML fragments for each result container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedResult {
    pub weather: String,
    pub hotels: String,
    pub itinerary: String,
    pub recommendations: String,
}

#[derive(Template)]
#[template(path = "results/document.html")]
struct DocumentTemplate<'a> {
    title: String,
    travellers: String,
    accessibility: String,
    weather: &'a str,
    hotels: &'a str,
    itinerary: &'a str,
    recommendations: &'a str,
}

impl RenderedResult {
    /// Wrap the fragments in a standalone HTML page, used for printing.
    /// The header summarises the submitted profile when there is one.
    pub fn to_document(&self, profile: Option<&Profile>) -> askama::Result<String> {
        DocumentTemplate {
            title: profile
                .map(|p| format!("Your trip to {}", p.destination))
                .unwrap_or_else(|| "Your itinerary".to_string()),
            travellers: profile.map(travellers_line).unwrap_or_default(),
            accessibility: profile.map(accessibility_line).unwrap_or_default(),
            weather: &self.weather,
            hotels: &self.hotels,
            itinerary: &self.itinerary,
            recommendations: &self.recommendations,
        }
        .render()
    }
}

fn travellers_line(profile: &Profile) -> String {
    let people = if profile.companions == 1 { "traveller" } else { "travellers" };
    format!(
        "{} days, {} {people} ({}), {} budget",
        profile.days, profile.companions, profile.travel_type, profile.budget_range
    )
}

/// Needs derived from the declared health conditions; the raw conditions
/// when none of them map to a known need.
fn accessibility_line(profile: &Profile) -> String {
    if !profile.has_health_conditions() {
        return String::new();
    }
    let needs = profile.accessibility_needs();
    if needs.is_empty() {
        return profile.health_conditions.join(", ");
    }
    needs
        .iter()
        .map(|need| need.replace('_', " "))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders results in a fixed style.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultRenderer {
    style: RenderStyle,
}

impl ResultRenderer {
    pub fn new(style: RenderStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> RenderStyle {
        self.style
    }

    pub fn render(&self, result: &ItineraryResult) -> askama::Result<RenderedResult> {
        let weather = match &result.weather {
            Some(w) => weather::render_weather(w, self.style)?,
            None => String::new(),
        };
        Ok(RenderedResult {
            weather,
            hotels: hotels::render_hotels(&result.hotels, self.style)?,
            itinerary: itinerary::render_days(result.itinerary.as_ref())?,
            recommendations: itinerary::render_recommendations(result.itinerary.as_ref())?,
        })
    }
}
