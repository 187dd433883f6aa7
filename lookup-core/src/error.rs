use thiserror::Error;

use crate::provider::ProviderId;

/// Message shown when a failure carries no message of its own.
pub const FALLBACK_MESSAGE: &str = "Failed to fetch data";

/// Everything that can end a submission early.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The weather provider answered with a non-success status.
    #[error("City not found")]
    CityNotFound,

    /// Transport failure. The URL is stripped so credentials never reach
    /// the error banner.
    #[error("{0}")]
    Request(reqwest::Error),

    #[error("Failed to parse {provider} response: {source}")]
    Decode {
        provider: ProviderId,
        #[source]
        source: serde_json::Error,
    },

    #[error("Image search failed with status {status}")]
    ImageSearch { status: reqwest::StatusCode },

    #[error("{0}")]
    Unexpected(String),
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        LookupError::Request(err.without_url())
    }
}

impl LookupError {
    /// Text for the error banner.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            message
        }
    }
}
