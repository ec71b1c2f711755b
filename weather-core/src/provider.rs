use crate::{Config, WeatherObservation, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use std::{fmt::Debug, time::Duration};

pub mod openweather;

/// Why a single current-conditions request produced no observation.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// No usable response: connect failure, timeout, or the body could not be read.
    #[error("request to weather provider failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The provider answered with a non-2xx status, e.g. 404 for an unknown city.
    #[error("weather provider returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The response could not be parsed or lacked an expected field.
    #[error("unexpected response from weather provider: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for `city`, in metric units.
    async fn current(&self, city: &str) -> Result<WeatherObservation, ProviderError>;
}

/// Construct the OpenWeather provider from config, with an optional API URL override.
pub fn provider_from_config(
    config: &Config,
    api_url: Option<&str>,
    timeout: Duration,
) -> anyhow::Result<OpenWeatherProvider> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured.\n\
             Hint: run `weather-panel configure` and enter your OpenWeather API key."
        )
    })?;

    let base_url = api_url
        .or(config.api_url.as_deref())
        .unwrap_or(openweather::DEFAULT_API_URL);

    OpenWeatherProvider::with_timeout(api_key.to_owned(), base_url, timeout)
}
