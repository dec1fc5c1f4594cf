//! Plain-text rendering of the session state.

use chrono::NaiveDateTime;
use weathernow_lookup::{Place, WeatherSummary};
use weathernow_session::SessionState;

const TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Reformat an API timestamp for display; unparseable input is shown as-is.
pub fn format_observed(time: &str) -> String {
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(time, fmt).ok())
        .map(|dt| dt.format("%a %e %b %Y, %H:%M").to_string())
        .unwrap_or_else(|| time.to_string())
}

pub fn render_suggestions(places: &[Place]) -> String {
    places
        .iter()
        .enumerate()
        .map(|(i, place)| format!("  {}. {}", i + 1, place.display_name()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_summary(summary: &WeatherSummary) -> String {
    [
        summary.place.display_name(),
        format!("{}°C", summary.temperature),
        summary.condition.label(),
        format!("Wind Speed: {} km/h", summary.windspeed),
        format!("Last updated: {}", format_observed(&summary.observed_at)),
    ]
    .join("\n")
}

/// Everything the user should currently see, top to bottom.
pub fn render_state(state: &SessionState) -> String {
    let mut sections = Vec::new();

    if !state.suggestions().is_empty() {
        sections.push(render_suggestions(state.suggestions()));
    }
    if state.loading() {
        sections.push("Loading...".to_string());
    }
    if let Some(message) = state.error_message() {
        sections.push(message.to_string());
    }
    if let Some(summary) = state.weather() {
        sections.push(render_summary(summary));
    }

    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use weathernow_lookup::{classify, CurrentConditions};
    use weathernow_session::{reduce, Event};

    fn summary(code: i32, time: &str) -> WeatherSummary {
        classify(
            Place {
                name: "Paris".into(),
                country: "France".into(),
                latitude: 48.85,
                longitude: 2.35,
            },
            CurrentConditions {
                temperature: 18.2,
                windspeed: 10.4,
                weathercode: code,
                time: time.into(),
            },
        )
    }

    #[test]
    fn formats_api_timestamps() {
        assert_eq!(format_observed("2024-05-01T12:00"), "Wed  1 May 2024, 12:00");
        assert_eq!(format_observed("2024-05-01T12:00:30"), "Wed  1 May 2024, 12:00");
    }

    #[test]
    fn unparseable_timestamp_is_shown_raw() {
        assert_eq!(format_observed("yesterday"), "yesterday");
    }

    #[test]
    fn summary_lines() {
        let text = render_summary(&summary(3, "2024-05-01T12:00"));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Paris, France",
                "18.2°C",
                "☁️ Cloudy",
                "Wind Speed: 10.4 km/h",
                "Last updated: Wed  1 May 2024, 12:00",
            ]
        );
    }

    #[test]
    fn unknown_code_still_renders() {
        let text = render_summary(&summary(42, "2024-05-01T12:00"));
        assert!(text.contains("🌍 Unknown"));
    }

    #[test]
    fn numbered_suggestions() {
        let places = vec![
            Place {
                name: "Paris".into(),
                country: "France".into(),
                latitude: 48.85,
                longitude: 2.35,
            },
            Place {
                name: "Paris".into(),
                country: "United States".into(),
                latitude: 33.66,
                longitude: -95.55,
            },
        ];
        assert_eq!(
            render_suggestions(&places),
            "  1. Paris, France\n  2. Paris, United States"
        );
    }

    #[test]
    fn error_state_shows_message_only() {
        let (state, _) = reduce(SessionState::new(), Event::Submitted);
        assert_eq!(render_state(&state), "Please enter a city name.");
    }

    #[test]
    fn idle_state_is_blank() {
        assert_eq!(render_state(&SessionState::new()), "");
    }
}
