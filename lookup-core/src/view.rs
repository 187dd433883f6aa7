//! The lookup view: owns the observable state and drives one submission
//! through the weather and image providers.
//!
//! A submission is three steps: [`LookupView::begin`] marks the view as
//! loading, [`Lookup::run`] talks to the providers without touching the
//! state, and [`LookupView::settle`] commits the outcome. [`LookupView::submit`]
//! chains them. Only the most recently begun submission may settle; older
//! ones are dropped when they arrive.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{
    CityPhoto, Config, LookupError, WeatherReport,
    provider::{ImageProvider, WeatherProvider, image_provider_from_config, weather_provider_from_config},
};

/// What a failed lookup does to a report/photo that is already shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StalePolicy {
    /// Keep the last good report and photo on screen next to the error.
    /// A successful lookup without a photo keeps the previous photo.
    #[default]
    Retain,
    /// Drop report and photo on error, and the photo on a photo-less success.
    Clear,
}

/// Active presentation mode, derived from [`ViewState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Loading,
    Error,
    Data,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub query: String,
    pub report: Option<WeatherReport>,
    pub photo: Option<CityPhoto>,
    pub loading: bool,
    /// Empty when there is nothing to report.
    pub error: String,
}

impl ViewState {
    pub fn mode(&self) -> Mode {
        if self.loading {
            Mode::Loading
        } else if !self.error.is_empty() {
            Mode::Error
        } else if self.report.is_some() {
            Mode::Data
        } else {
            Mode::Idle
        }
    }
}

/// A begun submission. Hand it back to [`LookupView::settle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    seq: u64,
    query: String,
}

impl Submission {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// The query exactly as typed, untrimmed.
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// Successful result of one submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Found {
    pub report: WeatherReport,
    pub photo: Option<CityPhoto>,
}

/// Search text sent to the image provider for a city query.
pub fn image_query(query: &str) -> String {
    format!("{query} city")
}

/// Cloneable handle on the two providers.
#[derive(Debug, Clone)]
pub struct Lookup {
    weather: Arc<dyn WeatherProvider>,
    images: Arc<dyn ImageProvider>,
}

impl Lookup {
    pub fn new(weather: Arc<dyn WeatherProvider>, images: Arc<dyn ImageProvider>) -> Self {
        Self { weather, images }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            weather_provider_from_config(config),
            image_provider_from_config(config),
        )
    }

    /// Weather first, then the photo. Any failure ends the run.
    #[instrument(skip(self, submission), fields(seq = submission.seq, query = %submission.query))]
    pub async fn run(&self, submission: &Submission) -> Result<Found, LookupError> {
        let report = self.weather.current_weather(submission.query()).await?;
        let photo = self
            .images
            .search_photo(&image_query(submission.query()))
            .await?;

        Ok(Found { report, photo })
    }
}

#[derive(Debug)]
pub struct LookupView {
    lookup: Lookup,
    state: ViewState,
    policy: StalePolicy,
    latest: u64,
}

impl LookupView {
    pub fn new(lookup: Lookup) -> Self {
        Self {
            lookup,
            state: ViewState::default(),
            policy: StalePolicy::default(),
            latest: 0,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(Lookup::from_config(config)).with_policy(config.view.stale)
    }

    pub fn with_policy(mut self, policy: StalePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.state.query = query.into();
    }

    pub fn lookup(&self) -> Lookup {
        self.lookup.clone()
    }

    /// Start a submission for the current query. Returns `None`, and leaves
    /// the state untouched, when the query is blank.
    pub fn begin(&mut self) -> Option<Submission> {
        if self.state.query.trim().is_empty() {
            return None;
        }

        self.latest += 1;
        self.state.loading = true;
        self.state.error.clear();

        Some(Submission {
            seq: self.latest,
            query: self.state.query.clone(),
        })
    }

    /// Commit the outcome of `submission`. Returns `false` if a newer
    /// submission has begun since, in which case nothing changes.
    pub fn settle(&mut self, submission: Submission, outcome: Result<Found, LookupError>) -> bool {
        if submission.seq != self.latest {
            debug!(
                seq = submission.seq,
                latest = self.latest,
                "discarding superseded lookup"
            );
            return false;
        }

        match outcome {
            Ok(Found { report, photo }) => {
                match photo {
                    Some(photo) => self.state.photo = Some(photo),
                    None if self.policy == StalePolicy::Clear => self.state.photo = None,
                    None => {}
                }
                self.state.report = Some(report);
            }
            Err(err) => {
                debug!(error = %err, "lookup failed");
                self.state.error = err.user_message();
                if self.policy == StalePolicy::Clear {
                    self.state.report = None;
                    self.state.photo = None;
                }
            }
        }

        self.state.loading = false;
        true
    }

    /// Run a whole submission for the current query.
    pub async fn submit(&mut self) {
        let Some(submission) = self.begin() else {
            return;
        };

        let outcome = self.lookup.run(&submission).await;
        self.settle(submission, outcome);
    }
}
