use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

use crate::{
    error::{PositionError, WeatherError},
    model::{Coordinates, LocationQuery, WeatherReport},
    position::PositionSource,
    provider::WeatherProvider,
};

/// Render callbacks supplied by the UI surface.
///
/// Each request goes through loading, then exactly one of error or report.
pub trait RenderSink: Send + Sync {
    fn on_loading(&self);
    fn on_error(&self, message: &str);
    fn on_report(&self, report: &WeatherReport);
}

/// Orchestrates one lookup: primary current-conditions call, then a single
/// dependent UV call keyed by the coordinates the primary response echoed
/// back. Collaborators are injected, the client never reaches into globals.
pub struct WeatherClient {
    provider: Box<dyn WeatherProvider>,
    position: Box<dyn PositionSource>,
    sink: Box<dyn RenderSink>,
    /// Monotonic request generation. A settling request whose generation is
    /// no longer current has been superseded and must not render.
    generation: AtomicU64,
}

impl WeatherClient {
    pub fn new(
        provider: Box<dyn WeatherProvider>,
        position: Box<dyn PositionSource>,
        sink: Box<dyn RenderSink>,
    ) -> Self {
        Self {
            provider,
            position,
            sink,
            generation: AtomicU64::new(0),
        }
    }

    /// Current conditions plus UV index for a place name.
    pub async fn fetch_by_city(&self, name: &str) -> Result<WeatherReport, WeatherError> {
        self.fetch(&LocationQuery::city(name)).await
    }

    /// Current conditions plus UV index for a coordinate pair.
    pub async fn fetch_by_coords(&self, coord: Coordinates) -> Result<WeatherReport, WeatherError> {
        self.fetch(&LocationQuery::Coords(coord)).await
    }

    async fn fetch(&self, query: &LocationQuery) -> Result<WeatherReport, WeatherError> {
        let mut report = self.provider.current_weather(query).await?;

        // The UV lookup is keyed by the echoed coordinates, not the query;
        // the report is complete only once it settles.
        report.uv_index = self.fetch_uv_index(report.coord).await;

        Ok(report)
    }

    /// Best-effort UV lookup. Any failure degrades to `None`.
    pub async fn fetch_uv_index(&self, coord: Coordinates) -> Option<f64> {
        match self.provider.uv_index(coord).await {
            Ok(value) => Some(value),
            Err(err) => {
                debug!("UV index lookup at {coord} failed: {err}");
                None
            }
        }
    }

    /// Where the device currently is, per the configured position source.
    pub async fn resolve_current_position(&self) -> Result<Coordinates, PositionError> {
        self.position.current_position().await
    }

    /// Look up a typed place name and render the outcome.
    pub async fn show_city(&self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            self.sink.on_error("Please enter a city name");
            return;
        }

        let generation = self.begin();
        let outcome = self.fetch_by_city(name).await;
        self.settle(generation, outcome);
    }

    /// Look up a coordinate pair and render the outcome.
    pub async fn show_coords(&self, coord: Coordinates) {
        let generation = self.begin();
        let outcome = self.fetch_by_coords(coord).await;
        self.settle(generation, outcome);
    }

    /// Resolve the device position, then look it up and render the outcome.
    /// A position failure renders its message without touching the network.
    pub async fn show_current_location(&self) {
        let generation = self.begin();

        let coord = match self.resolve_current_position().await {
            Ok(coord) => coord,
            Err(err) => {
                if self.is_current(generation) {
                    self.sink.on_error(&err.to_string());
                }
                return;
            }
        };

        let outcome = self.fetch_by_coords(coord).await;
        self.settle(generation, outcome);
    }

    fn begin(&self) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.sink.on_loading();
        generation
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    fn settle(&self, generation: u64, outcome: Result<WeatherReport, WeatherError>) {
        if !self.is_current(generation) {
            debug!("Dropping result of superseded request {generation}");
            return;
        }

        match outcome {
            Ok(report) => {
                info!("Rendering weather for {}, {}", report.city, report.country);
                self.sink.on_report(&report);
            }
            Err(err) => self.sink.on_error(&err.to_string()),
        }
    }
}
