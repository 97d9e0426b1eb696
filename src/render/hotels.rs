//! Hotel recommendation cards.

use askama::Template;

use crate::itinerary::Hotel;

use super::RenderStyle;
use super::format::{attribute_href, encode_component, format_inr, stars};

pub const MAX_AMENITIES: usize = 6;
pub const NO_HOTELS_MESSAGE: &str = "No hotel recommendations available for this destination.";

/// Booking host used when a hotel lists no booking sites.
const DEFAULT_BOOKING_HOST: &str = "www.booking.com";
/// Extra booking sites listed after the primary one.
const MAX_OTHER_SITES: usize = 2;

impl RenderStyle {
    /// How many hotel cards the style shows.
    pub fn max_hotels(&self) -> usize {
        match self {
            Self::Rich => 4,
            Self::Simple => 3,
        }
    }
}

#[derive(Template)]
#[template(path = "results/hotels.html")]
struct HotelsTemplate<'a> {
    rich: bool,
    empty_message: &'a str,
    cards: Vec<HotelCard>,
}

struct HotelCard {
    name: String,
    stars: String,
    rating: f64,
    tripadvisor: String,
    price: String,
    location: String,
    distance: String,
    address: String,
    description: String,
    amenities: Vec<String>,
    more_amenities: usize,
    accessibility: String,
    map_href: String,
    map_label: &'static str,
    booking_href: String,
    other_sites: Vec<SiteLink>,
}

struct SiteLink {
    href: String,
    label: String,
}

pub fn render_hotels(hotels: &[Hotel], style: RenderStyle) -> askama::Result<String> {
    let rich = style == RenderStyle::Rich;
    HotelsTemplate {
        rich,
        empty_message: NO_HOTELS_MESSAGE,
        cards: hotels
            .iter()
            .take(style.max_hotels())
            .map(|hotel| hotel_card(hotel, rich))
            .collect(),
    }
    .render()
}

fn hotel_card(hotel: &Hotel, rich: bool) -> HotelCard {
    let (map_href, map_label) = map_link(hotel);
    HotelCard {
        name: hotel.name.clone(),
        stars: stars(hotel.rating, rich),
        rating: hotel.rating,
        tripadvisor: hotel
            .tripadvisor_rating
            .as_ref()
            .filter(|_| rich)
            .map(ToString::to_string)
            .unwrap_or_default(),
        price: format_inr(hotel.price_per_night),
        location: hotel.location.clone(),
        distance: hotel
            .distance_to_center
            .map(|d| d.to_string())
            .unwrap_or_default(),
        address: hotel.address.clone().filter(|_| rich).unwrap_or_default(),
        description: hotel.description.clone(),
        amenities: hotel.amenities.iter().take(MAX_AMENITIES).cloned().collect(),
        more_amenities: hotel.amenities.len().saturating_sub(MAX_AMENITIES),
        accessibility: hotel.accessibility.join(", "),
        map_href,
        map_label,
        booking_href: booking_href(hotel),
        other_sites: hotel
            .booking_sites
            .iter()
            .skip(1)
            .take(MAX_OTHER_SITES)
            .map(|site| SiteLink {
                href: attribute_href(&format!("https://{}", site.host())),
                label: site.label().to_string(),
            })
            .collect(),
    }
}

/// The backend's map link, or a map search on name plus address.
fn map_link(hotel: &Hotel) -> (String, &'static str) {
    match &hotel.google_maps_url {
        Some(url) => (attribute_href(url), "View on Maps"),
        None => {
            let place = hotel.address.as_deref().unwrap_or(&hotel.location);
            let query = encode_component(&format!("{} {}", hotel.name, place));
            (
                attribute_href(&format!("https://www.google.com/maps/search/{query}")),
                "Find Location",
            )
        }
    }
}

/// Search link on the first booking site, defaulting to Booking.com.
fn booking_href(hotel: &Hotel) -> String {
    let host = hotel
        .booking_sites
        .first()
        .map(|site| site.host())
        .unwrap_or(DEFAULT_BOOKING_HOST);
    attribute_href(&format!(
        "https://{host}/searchresults.html?ss={}",
        encode_component(&hotel.name)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::itinerary::BookingSite;

    fn hotel(name: &str) -> Hotel {
        Hotel {
            name: name.to_string(),
            rating: 4.8,
            price_per_night: 12500.0,
            location: "City Center".to_string(),
            description: "Luxury hotel".to_string(),
            amenities: vec!["WiFi".to_string(), "Pool".to_string()],
            ..Hotel::default()
        }
    }

    #[test]
    fn empty_list_renders_message_only() {
        let html = render_hotels(&[], RenderStyle::Rich).unwrap();
        assert!(html.contains(NO_HOTELS_MESSAGE));
        assert!(!html.contains("hotel-card"));
    }

    #[test]
    fn rich_style_caps_at_four_with_empty_stars() {
        let hotels: Vec<Hotel> = (0..6).map(|i| hotel(&format!("Hotel {i}"))).collect();
        let html = render_hotels(&hotels, RenderStyle::Rich).unwrap();
        assert_eq!(html.matches(r#"class="hotel-card""#).count(), 4);
        assert!(html.contains("⭐⭐⭐⭐☆ 4.8"));
        assert!(html.contains("₹12,500/night"));
    }

    #[test]
    fn simple_style_caps_at_three_filled_only() {
        let hotels: Vec<Hotel> = (0..6).map(|i| hotel(&format!("Hotel {i}"))).collect();
        let html = render_hotels(&hotels, RenderStyle::Simple).unwrap();
        assert_eq!(html.matches(r#"class="hotel-card""#).count(), 3);
        assert!(html.contains("⭐⭐⭐⭐ 4.8"));
        assert!(!html.contains('☆'));
        assert!(!html.contains("Book Now"));
    }

    #[test]
    fn amenities_capped_with_more_suffix() {
        let mut h = hotel("Amenity Palace");
        h.amenities = (1..=8).map(|i| format!("A{i}")).collect();
        let html = render_hotels(&[h], RenderStyle::Rich).unwrap();
        assert!(html.contains(">A6<"));
        assert!(!html.contains(">A7<"));
        assert!(html.contains("+2 more"));
    }

    #[test]
    fn optional_fields_render_nothing_when_missing() {
        let html = render_hotels(&[hotel("Plain Inn")], RenderStyle::Rich).unwrap();
        assert!(!html.contains("Accessibility"));
        assert!(!html.contains("hotel-address"));
        assert!(!html.contains("TripAdvisor"));
        assert!(!html.contains("Also available on"));
        assert!(!html.contains("km from center"));
    }

    #[test]
    fn links_fall_back_to_search() {
        let html = render_hotels(&[hotel("Grand Palace")], RenderStyle::Rich).unwrap();
        assert!(html.contains("https://www.google.com/maps/search/Grand%20Palace%20City%20Center"));
        assert!(html.contains("https://www.booking.com/searchresults.html?ss=Grand%20Palace"));
    }

    #[test]
    fn booking_sites_and_extras() {
        let mut h = hotel("Sea View");
        h.address = Some("Marine Drive".to_string());
        h.distance_to_center = Some(0.5);
        h.accessibility = vec!["Elevator".to_string(), "Ramp".to_string()];
        h.booking_sites = vec![
            BookingSite::Domain("agoda.com".to_string()),
            BookingSite::Domain("makemytrip.com".to_string()),
            BookingSite::Domain("booking.com".to_string()),
            BookingSite::Domain("expedia.com".to_string()),
        ];
        let html = render_hotels(&[h], RenderStyle::Rich).unwrap();
        assert!(html.contains("https://agoda.com/searchresults.html?ss=Sea%20View"));
        assert!(html.contains("Also available on"));
        assert!(html.contains("makemytrip.com"));
        assert!(!html.contains("expedia.com"));
        assert!(html.contains("Accessibility: Elevator, Ramp"));
        assert!(html.contains("0.5km from center"));
        assert!(html.contains("Marine Drive"));
    }

    #[test]
    fn hotel_names_are_escaped() {
        let html = render_hotels(&[hotel("<script>")], RenderStyle::Simple).unwrap();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
