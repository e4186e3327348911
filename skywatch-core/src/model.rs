use serde::{Deserialize, Serialize};

/// Weather conditions for one place, frozen at the moment the provider
/// answered. Never mutated after construction; a new search produces a new
/// snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub place: String,
    pub country: String,
    pub temp_c: f64,
    pub feels_like_c: f64,
    pub description: String,
    pub icon_id: String,
}

impl WeatherSnapshot {
    /// "London, GB"
    pub fn location_line(&self) -> String {
        format!("{}, {}", self.place, self.country)
    }

    /// "15°C | 59°F"
    pub fn temperature_line(&self) -> String {
        format_temperature(self.temp_c)
    }

    /// Same formatting as `temperature_line`, for the feels-like reading.
    pub fn feels_like_line(&self) -> String {
        format_temperature(self.feels_like_c)
    }

    /// URL of the provider-hosted condition icon. A failed icon fetch is
    /// cosmetic, never an error for the search itself.
    pub fn icon_url(&self) -> String {
        format!("https://openweathermap.org/img/w/{}.png", self.icon_id)
    }
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Both units on one line, each rounded to the nearest whole degree.
pub fn format_temperature(celsius: f64) -> String {
    // Integer formatting also keeps -0.0 from rendering as "-0".
    format!(
        "{}°C | {}°F",
        celsius.round() as i64,
        celsius_to_fahrenheit(celsius).round() as i64
    )
}
