//! Core library for the `skycast` weather client.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Abstractions over the remote weather provider and device location
//! - The client workflow combining current conditions with a UV index lookup
//! - Shared domain models (queries, reports, errors)
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod position;
pub mod provider;

pub use client::{RenderSink, WeatherClient};
pub use config::Config;
pub use error::{PositionError, WeatherError};
pub use model::{Coordinates, LocationQuery, WeatherReport};
pub use position::{IpGeolocator, NoGeolocation, PositionSource};
pub use provider::{WeatherProvider, provider_from_config};
