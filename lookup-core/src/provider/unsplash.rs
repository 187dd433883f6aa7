use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    error::LookupError,
    model::CityPhoto,
    provider::{ProviderId, truncate_body},
};

use super::ImageProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.unsplash.com";

#[derive(Clone)]
pub struct UnsplashProvider {
    access_key: String,
    base_url: String,
    http: Client,
}

impl UnsplashProvider {
    pub fn new(access_key: String) -> Self {
        Self {
            access_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    #[instrument(skip(self), fields(provider = "unsplash"))]
    async fn search(&self, query: &str) -> Result<Option<CityPhoto>, LookupError> {
        let url = format!("{}/search/photos", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("query", query),
                ("client_id", self.access_key.as_str()),
                ("per_page", "1"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        debug!(%status, "image search response received");

        if !status.is_success() {
            debug!(body = %truncate_body(&body), "image search rejected");
            return Err(LookupError::ImageSearch { status });
        }

        let parsed: UsSearchResponse =
            serde_json::from_str(&body).map_err(|source| LookupError::Decode {
                provider: ProviderId::Unsplash,
                source,
            })?;

        Ok(parsed.results.into_iter().next().map(|photo| CityPhoto {
            url: photo.urls.regular,
            alt: photo.alt_description,
        }))
    }
}

impl std::fmt::Debug for UnsplashProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnsplashProvider")
            .field("base_url", &self.base_url)
            .field("has_access_key", &!self.access_key.is_empty())
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct UsUrls {
    regular: String,
}

#[derive(Debug, Deserialize)]
struct UsPhoto {
    urls: UsUrls,
    alt_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsSearchResponse {
    results: Vec<UsPhoto>,
}

#[async_trait]
impl ImageProvider for UnsplashProvider {
    async fn search_photo(&self, query: &str) -> Result<Option<CityPhoto>, LookupError> {
        self.search(query).await
    }
}
