use crate::{
    CityPhoto, Config, LookupError, WeatherReport,
    provider::{openweather::OpenWeatherProvider, unsplash::UnsplashProvider},
};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug, sync::Arc};

pub mod openweather;
pub mod unsplash;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    OpenWeather,
    Unsplash,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenWeather => "openweather",
            ProviderId::Unsplash => "unsplash",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::OpenWeather, ProviderId::Unsplash]
    }

    /// Environment variable that overrides the configured credential.
    pub fn env_var(&self) -> &'static str {
        match self {
            ProviderId::OpenWeather => "OPENWEATHER_API_KEY",
            ProviderId::Unsplash => "UNSPLASH_ACCESS_KEY",
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "openweather" => Ok(ProviderId::OpenWeather),
            "unsplash" => Ok(ProviderId::Unsplash),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: openweather, unsplash."
            )),
        }
    }
}

/// Source of current weather conditions for a free-text location.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, query: &str) -> Result<WeatherReport, LookupError>;
}

/// Source of a representative photo for a search text.
#[async_trait]
pub trait ImageProvider: Send + Sync + Debug {
    /// `Ok(None)` when the search matched nothing.
    async fn search_photo(&self, query: &str) -> Result<Option<CityPhoto>, LookupError>;
}

/// Construct the weather provider from config. A missing key is not an
/// error here; the provider will reject the request instead.
pub fn weather_provider_from_config(config: &Config) -> Arc<dyn WeatherProvider> {
    let id = ProviderId::OpenWeather;
    let provider = OpenWeatherProvider::new(config.credential(id));

    match config.provider_base_url(id) {
        Some(url) => Arc::new(provider.with_base_url(url)),
        None => Arc::new(provider),
    }
}

/// Construct the image provider from config.
pub fn image_provider_from_config(config: &Config) -> Arc<dyn ImageProvider> {
    let id = ProviderId::Unsplash;
    let provider = UnsplashProvider::new(config.credential(id));

    match config.provider_base_url(id) {
        Some(url) => Arc::new(provider.with_base_url(url)),
        None => Arc::new(provider),
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        let head: String = body.chars().take(MAX).collect();
        format!("{head}...")
    } else {
        body.to_string()
    }
}
