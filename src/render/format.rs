//! Text formatting helpers shared by the HTML renderers. Markup lives in
//! the askama templates under `templates/results/`.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

/// Leading clock time anywhere in an activity string, e.g. "9:00 AM".
static TIME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d{1,2}:\d{2}\s*(AM|PM)?)").expect("valid time regex"));

/// Clock time plus an optional dash separator at the start of the string.
static LEADING_TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\d{1,2}:\d{2}\s*(AM|PM)?\s*-?\s*").expect("valid leading time regex")
});

pub const FILLED_STAR: &str = "⭐";
pub const EMPTY_STAR: &str = "☆";
pub const MAX_STARS: usize = 5;

/// Round a temperature to the nearest whole degree.
pub fn round_temp(value: f64) -> i64 {
    value.round() as i64
}

/// Group digits the Indian way: last three, then pairs. `123456` → `1,23,456`.
pub fn group_indian(value: i64) -> String {
    let sign = if value < 0 { "-" } else { "" };
    let digits = value.unsigned_abs().to_string();
    if digits.len() <= 3 {
        return format!("{sign}{digits}");
    }

    let (head, last3) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (front, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = front;
    }
    if !rest.is_empty() {
        groups.push(rest);
    }
    groups.reverse();
    format!("{sign}{},{last3}", groups.join(","))
}

/// Round an amount and format it in rupees, e.g. `₹1,23,456`.
pub fn format_inr(amount: f64) -> String {
    format!("₹{}", group_indian(amount.round() as i64))
}

/// Filled stars for the whole part of `rating`, clamped to 0–5.
pub fn filled_star_count(rating: f64) -> usize {
    if rating.is_nan() {
        return 0;
    }
    (rating.floor().max(0.0) as usize).min(MAX_STARS)
}

/// Star string for a rating; `with_empty` pads with hollow stars up to five.
pub fn stars(rating: f64, with_empty: bool) -> String {
    let filled = filled_star_count(rating);
    let mut out = FILLED_STAR.repeat(filled);
    if with_empty {
        out.push_str(&EMPTY_STAR.repeat(MAX_STARS - filled));
    }
    out
}

/// Split an activity into its clock time and the remaining description.
///
/// When no time is present the time is empty and the text is returned
/// unchanged.
pub fn split_activity(activity: &str) -> (String, String) {
    let time = TIME_PATTERN
        .find(activity)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();
    let rest = LEADING_TIME_PATTERN.replace(activity, "").into_owned();
    (time, rest)
}

/// Short forecast label like "Mon, Jan 5"; falls back to the raw string.
pub fn format_forecast_date(raw: &str) -> String {
    let date_part = raw.get(..10).unwrap_or(raw);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => date.format("%a, %b %-d").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Percent-encode a URL component.
pub fn encode_component(text: &str) -> String {
    urlencoding::encode(text).into_owned()
}

/// Escape a URL for a double-quoted `href`. Templates emit the result
/// with `|safe`, so every link goes through here.
pub fn attribute_href(url: &str) -> String {
    html_escape::encode_double_quoted_attribute(url).into_owned()
}
