use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::model::WeatherObservation;

use super::{ProviderError, WeatherProvider};

pub const DEFAULT_API_URL: &str = "https://api.openweathermap.org";
const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn with_timeout(api_key: String, base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

// Every field is optional so a surprising payload becomes `Malformed`, not a panic.
#[derive(Debug, Deserialize)]
struct OwMain {
    temp: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    #[serde(default)]
    weather: Vec<OwWeather>,
    main: Option<OwMain>,
}

impl OwCurrentResponse {
    fn into_observation(self) -> Result<WeatherObservation, ProviderError> {
        let condition = self
            .weather
            .into_iter()
            .next()
            .and_then(|w| w.main)
            .ok_or_else(|| ProviderError::Malformed("missing weather[0].main".to_string()))?;

        let temperature_c = self
            .main
            .and_then(|m| m.temp)
            .ok_or_else(|| ProviderError::Malformed("missing main.temp".to_string()))?;

        Ok(WeatherObservation {
            condition,
            temperature_c,
        })
    }
}

fn parse_current(body: &str) -> Result<WeatherObservation, ProviderError> {
    let parsed: OwCurrentResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Malformed(e.to_string()))?;
    parsed.into_observation()
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, city: &str) -> Result<WeatherObservation, ProviderError> {
        let url = format!("{}{}", self.base_url, CURRENT_WEATHER_PATH);

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
            .map_err(ProviderError::Transport)?;

        let status = res.status();
        let body = res.text().await.map_err(ProviderError::Transport)?;

        if !status.is_success() {
            return Err(ProviderError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        let observation = parse_current(&body)?;
        tracing::debug!(
            message = "fetched current conditions",
            city = %city,
            condition = %observation.condition,
            temperature_c = observation.temperature_c,
        );

        Ok(observation)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
