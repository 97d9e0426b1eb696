//! Day-by-day itinerary and trip recommendations.

use askama::Template;

use crate::itinerary::{BudgetEstimate, DayPlan, Itinerary, Recommendations};

use super::format::{format_inr, round_temp, split_activity};

pub const ITINERARY_FAILED_MESSAGE: &str = "Failed to generate itinerary. Please try again.";

#[derive(Template)]
#[template(path = "results/days.html")]
struct DaysTemplate<'a> {
    failed: bool,
    failed_message: &'a str,
    days: Vec<DayCard>,
}

struct DayCard {
    label: String,
    weather: String,
    title: String,
    activities: Vec<Activity>,
    meals: Vec<String>,
    notes: Vec<String>,
}

struct Activity {
    time: String,
    text: String,
}

#[derive(Template)]
#[template(path = "results/recommendations.html")]
struct RecommendationsTemplate {
    has_packing: bool,
    packing: Vec<String>,
    has_tips: bool,
    tips: Vec<String>,
    has_budget: bool,
    budget_total: String,
    budget_activities: String,
    budget_accommodation: String,
    budget_daily: String,
}

/// Render the day cards. A missing itinerary or day list renders the
/// failure message.
pub fn render_days(itinerary: Option<&Itinerary>) -> askama::Result<String> {
    let days = itinerary.and_then(|it| it.days.as_ref());
    DaysTemplate {
        failed: days.is_none(),
        failed_message: ITINERARY_FAILED_MESSAGE,
        days: days
            .map(|days| days.iter().enumerate().map(day_card).collect())
            .unwrap_or_default(),
    }
    .render()
}

/// Render packing, tips and budget cards. Empty when the itinerary carries
/// no recommendations.
pub fn render_recommendations(itinerary: Option<&Itinerary>) -> askama::Result<String> {
    match itinerary.and_then(|it| it.recommendations.as_ref()) {
        Some(recs) => recommendations(recs).render(),
        None => Ok(String::new()),
    }
}

fn day_card((index, day): (usize, &DayPlan)) -> DayCard {
    DayCard {
        label: day.label(index),
        weather: day
            .weather
            .as_ref()
            .map(|w| {
                format!(
                    "{}, {}°-{}°C",
                    w.description,
                    round_temp(w.temperature_min),
                    round_temp(w.temperature_max)
                )
            })
            .unwrap_or_default(),
        title: day.title.clone(),
        activities: day
            .activities
            .iter()
            .map(|activity| {
                let (time, text) = split_activity(activity);
                Activity { time, text }
            })
            .collect(),
        meals: day.meals.clone(),
        notes: day.notes.clone(),
    }
}

fn recommendations(recs: &Recommendations) -> RecommendationsTemplate {
    let budget = recs.budget_estimate.as_ref();
    let amount = |pick: fn(&BudgetEstimate) -> f64| {
        budget.map(|b| format_inr(pick(b))).unwrap_or_default()
    };
    RecommendationsTemplate {
        has_packing: recs.packing.is_some(),
        packing: recs.packing.clone().unwrap_or_default(),
        has_tips: recs.tips.is_some(),
        tips: recs.tips.clone().unwrap_or_default(),
        has_budget: budget.is_some(),
        budget_total: amount(|b| b.estimated_total),
        budget_activities: amount(|b| b.total_activities),
        budget_accommodation: amount(|b| b.accommodation),
        budget_daily: amount(|b| b.daily_activities),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::itinerary::{ForecastDay, Scalar};

    fn day(n: f64) -> DayPlan {
        DayPlan {
            day: Some(Scalar::Number(n)),
            title: format!("Day {n} - Exploring Jaipur"),
            weather: Some(ForecastDay {
                description: "Clear".to_string(),
                temperature_min: 18.0,
                temperature_max: 25.0,
                ..ForecastDay::default()
            }),
            activities: vec![
                "9:00 AM - Visit museum".to_string(),
                "Free evening".to_string(),
            ],
            meals: vec![],
            notes: vec![],
        }
    }

    #[test]
    fn missing_days_render_failure_message() {
        assert!(render_days(None).unwrap().contains(ITINERARY_FAILED_MESSAGE));
        let empty = Itinerary::default();
        assert!(render_days(Some(&empty)).unwrap().contains(ITINERARY_FAILED_MESSAGE));
    }

    #[test]
    fn activities_split_time_from_text() {
        let itinerary = Itinerary {
            days: Some(vec![day(1.0)]),
            recommendations: None,
        };
        let html = render_days(Some(&itinerary)).unwrap();
        assert!(html.contains(r#"<span class="activity-time">9:00 AM</span><span>Visit museum</span>"#));
        assert!(html.contains(r#"<span class="activity-time"></span><span>Free evening</span>"#));
        assert!(html.contains("Clear, 18°-25°C"));
        assert!(html.contains(r#"<div class="day-number">1</div>"#));
    }

    #[test]
    fn empty_meals_and_notes_render_nothing() {
        let itinerary = Itinerary {
            days: Some(vec![day(2.0)]),
            recommendations: None,
        };
        let html = render_days(Some(&itinerary)).unwrap();
        assert!(!html.contains("Meals"));
        assert!(!html.contains("Notes"));

        let mut with_extras = day(3.0);
        with_extras.meals = vec!["Dinner featuring local cuisine".to_string()];
        with_extras.notes = vec!["Carry water".to_string()];
        let html = render_days(Some(&Itinerary {
            days: Some(vec![with_extras]),
            recommendations: None,
        }))
        .unwrap();
        assert!(html.contains("Meals"));
        assert!(html.contains("Carry water"));
    }

    #[test]
    fn unnumbered_days_use_their_position() {
        let mut first = day(1.0);
        first.day = None;
        let second = DayPlan {
            title: "<Free> day".to_string(),
            ..DayPlan::default()
        };
        let html = render_days(Some(&Itinerary {
            days: Some(vec![first, second]),
            recommendations: None,
        }))
        .unwrap();
        assert!(html.contains(r#"<div class="day-number">1</div>"#));
        assert!(html.contains(r#"<div class="day-number">2</div>"#));
        assert!(html.contains("&lt;Free&gt; day"));
        assert!(!html.contains("Meals"));
    }

    #[test]
    fn recommendations_with_budget() {
        let itinerary = Itinerary {
            days: Some(vec![]),
            recommendations: Some(Recommendations {
                packing: Some(vec!["Umbrella".to_string()]),
                tips: None,
                budget_estimate: Some(BudgetEstimate {
                    daily_activities: 4600.0,
                    total_activities: 18400.0,
                    accommodation: 105333.33,
                    estimated_total: 123733.33,
                    currency: Some("INR".to_string()),
                }),
            }),
        };
        let html = render_recommendations(Some(&itinerary)).unwrap();
        assert!(html.contains("Umbrella"));
        assert!(!html.contains("Travel Tips"));
        assert!(html.contains("Total: ₹1,23,733"));
        assert!(html.contains("Accommodation: ₹1,05,333"));
        assert!(html.contains("Daily average: ₹4,600"));
    }

    #[test]
    fn no_recommendations_render_empty() {
        assert!(render_recommendations(None).unwrap().is_empty());
        assert!(
            render_recommendations(Some(&Itinerary::default()))
                .unwrap()
                .is_empty()
        );
    }
}
