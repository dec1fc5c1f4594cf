use crate::types::{CurrentConditions, Place, WeatherCondition, WeatherSummary};

/// Turn raw conditions for `place` into a display-ready summary.
///
/// Pure; numeric fields and the timestamp are carried over unchanged.
pub fn classify(place: Place, conditions: CurrentConditions) -> WeatherSummary {
    let condition = WeatherCondition::from_wmo_code(conditions.weathercode);
    WeatherSummary {
        place,
        temperature: conditions.temperature,
        windspeed: conditions.windspeed,
        weathercode: conditions.weathercode,
        condition,
        description: condition.description().to_string(),
        observed_at: conditions.time,
    }
}
