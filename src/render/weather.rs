//! Weather panel: current conditions, forecast cards and weather advice.

use askama::Template;

use crate::itinerary::{CurrentWeather, ForecastDay, Weather};

use super::RenderStyle;
use super::format::{attribute_href, format_forecast_date, round_temp};

/// Forecast cards shown next to the current conditions.
pub const MAX_FORECAST_DAYS: usize = 4;

const DEFAULT_HUMIDITY_LEVEL: &str = "Moderate";
const DEFAULT_WIND_DESCRIPTION: &str = "Light breeze";
const DEFAULT_CLOTHING: &str = "Comfortable clothing";

#[derive(Template)]
#[template(path = "results/weather.html")]
struct WeatherTemplate {
    rich: bool,
    cards: Vec<WeatherCard>,
    show_advice: bool,
    clothing: Vec<String>,
    precautions: Vec<String>,
    best_times: Vec<String>,
}

struct WeatherCard {
    heading: String,
    forecast: bool,
    high: i64,
    low: i64,
    description: String,
    humidity: f64,
    humidity_level: String,
    wind_speed: f64,
    wind_description: String,
    map_href: String,
}

pub fn render_weather(weather: &Weather, style: RenderStyle) -> askama::Result<String> {
    let rich = style == RenderStyle::Rich;
    let mut cards = vec![current_card(&weather.current, rich)];
    cards.extend(
        weather
            .forecast
            .iter()
            .take(MAX_FORECAST_DAYS)
            .map(forecast_card),
    );

    let advice = weather.travel_recommendations.as_ref().filter(|_| rich);
    let template = WeatherTemplate {
        rich,
        cards,
        show_advice: advice.is_some(),
        clothing: advice
            .and_then(|recs| recs.clothing.clone())
            .unwrap_or_else(|| vec![DEFAULT_CLOTHING.to_string()]),
        precautions: advice.map(|recs| recs.precautions.clone()).unwrap_or_default(),
        best_times: advice.map(|recs| recs.best_times.clone()).unwrap_or_default(),
    };
    template.render()
}

fn current_card(current: &CurrentWeather, rich: bool) -> WeatherCard {
    WeatherCard {
        heading: "Current Weather".to_string(),
        forecast: false,
        high: round_temp(current.temperature),
        low: 0,
        description: current.description.clone(),
        humidity: current.humidity,
        humidity_level: level_or(current.humidity_level.as_deref(), DEFAULT_HUMIDITY_LEVEL),
        wind_speed: current.wind_speed,
        wind_description: level_or(current.wind_description.as_deref(), DEFAULT_WIND_DESCRIPTION),
        map_href: current
            .google_maps_url
            .as_deref()
            .filter(|_| rich)
            .map(attribute_href)
            .unwrap_or_default(),
    }
}

fn forecast_card(day: &ForecastDay) -> WeatherCard {
    WeatherCard {
        heading: format_forecast_date(&day.date),
        forecast: true,
        high: round_temp(day.temperature_max),
        low: round_temp(day.temperature_min),
        description: day.description.clone(),
        humidity: day.humidity,
        humidity_level: level_or(day.humidity_level.as_deref(), DEFAULT_HUMIDITY_LEVEL),
        wind_speed: day.wind_speed,
        wind_description: level_or(day.wind_description.as_deref(), DEFAULT_WIND_DESCRIPTION),
        map_href: String::new(),
    }
}

fn level_or(value: Option<&str>, default: &str) -> String {
    value.unwrap_or(default).to_string()
}
