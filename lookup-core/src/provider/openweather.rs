use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    error::LookupError,
    model::{Condition, WeatherReport},
    provider::ProviderId,
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    #[instrument(skip(self), fields(provider = "openweather"))]
    async fn fetch_current(&self, query: &str) -> Result<WeatherReport, LookupError> {
        let url = format!("{}/weather", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", query),
                ("units", "metric"),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        debug!(%status, "weather response received");

        // Any rejection means "not found"; the body is not needed for that.
        if !status.is_success() {
            return Err(LookupError::CityNotFound);
        }

        let body = res.text().await?;

        let parsed: OwCurrentResponse =
            serde_json::from_str(&body).map_err(|source| LookupError::Decode {
                provider: ProviderId::OpenWeather,
                source,
            })?;

        Ok(parsed.into())
    }
}

impl std::fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherProvider")
            .field("base_url", &self.base_url)
            .field("has_api_key", &!self.api_key.is_empty())
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: f64,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

impl From<OwCurrentResponse> for WeatherReport {
    fn from(parsed: OwCurrentResponse) -> Self {
        // Only the primary condition is shown.
        let condition = parsed.weather.into_iter().next().map(|w| Condition {
            main: w.main,
            description: w.description,
            icon: w.icon,
        });

        WeatherReport {
            location_name: parsed.name,
            temperature_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            pressure_hpa: parsed.main.pressure,
            condition,
            wind_speed_mps: parsed.wind.speed,
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, query: &str) -> Result<WeatherReport, LookupError> {
        self.fetch_current(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_first_condition_only() {
        let body = r#"{
            "name": "Paris",
            "dt": 1700000000,
            "main": {"temp": 15.4, "feels_like": 14.9, "humidity": 60, "pressure": 1012},
            "weather": [
                {"main": "Clear", "description": "clear sky", "icon": "01d"},
                {"main": "Mist", "description": "mist", "icon": "50d"}
            ],
            "wind": {"speed": 3.1, "deg": 200}
        }"#;

        let parsed: OwCurrentResponse = serde_json::from_str(body).unwrap();
        let report = WeatherReport::from(parsed);

        assert_eq!(report.location_name, "Paris");
        assert_eq!(report.humidity_pct, 60.0);
        assert_eq!(report.pressure_hpa, 1012.0);
        let condition = report.condition.expect("condition present");
        assert_eq!(condition.main, "Clear");
        assert_eq!(condition.icon, "01d");
    }

    #[test]
    fn empty_condition_list_is_none() {
        let body = r#"{
            "name": "Nowhere",
            "main": {"temp": 1.0, "feels_like": 0.0, "humidity": 90, "pressure": 990},
            "weather": [],
            "wind": {"speed": 0.5}
        }"#;

        let parsed: OwCurrentResponse = serde_json::from_str(body).unwrap();
        assert!(WeatherReport::from(parsed).condition.is_none());
    }

    #[test]
    fn debug_hides_api_key() {
        let provider = OpenWeatherProvider::new("SECRET".into());
        let out = format!("{provider:?}");
        assert!(!out.contains("SECRET"));
        assert!(out.contains("has_api_key: true"));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let provider = OpenWeatherProvider::new(String::new()).with_base_url("http://x/");
        assert_eq!(provider.base_url, "http://x");
    }
}
