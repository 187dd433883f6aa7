//! Core library for the `lookup` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather and image providers behind traits
//! - The lookup view (submission state) and its pure renderer
//!
//! It is used by `lookup-cli`, but can also drive other front ends.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod render;
pub mod view;

pub use config::{Config, ProviderConfig, ViewConfig};
pub use error::LookupError;
pub use model::{CityPhoto, Condition, WeatherReport};
pub use provider::{ImageProvider, ProviderId, WeatherProvider};
pub use render::{Screen, render};
pub use view::{Lookup, LookupView, Mode, StalePolicy, ViewState};
