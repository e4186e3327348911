use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::model::WeatherSnapshot;
use crate::provider::{ProviderError, WeatherProvider};

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// OpenWeather "current weather by city name" client.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Point the client at a different host. Tests use this to talk to a
    /// local mock server.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self))]
    async fn current_weather(&self, city: &str) -> Result<WeatherSnapshot, ProviderError> {
        let url = format!("{}/weather", self.base_url);

        debug!(url = %url, "fetching current weather");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| ProviderError::Parse(format!("failed to read response body: {e}")))?;

        if status == StatusCode::NOT_FOUND {
            return Err(ProviderError::NotFound(city.to_string()));
        }
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        let condition = parsed
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| {
                ProviderError::Parse("response contained no weather conditions".to_string())
            })?;

        Ok(WeatherSnapshot {
            place: parsed.name,
            country: parsed.sys.country,
            temp_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like,
            description: condition.description,
            icon_id: condition.icon,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: OwSys,
    main: OwMain,
    weather: Vec<OwWeather>,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        // Cut at a char boundary; byte MAX may fall inside a multibyte char.
        let end = (0..=MAX)
            .rev()
            .find(|i| body.is_char_boundary(*i))
            .unwrap_or(0);
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
