use std::env;

use config::{Config, ConfigError, Environment, File};
use devmap_api::geo::{LatLng, ViewBounds};
use devmap_api::models::MapConfigResponse;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

impl Logger {
    /// Filter used when `RUST_LOG` is unset.
    pub fn directives(&self, app_name: &str) -> String {
        let level = self.level.as_str();

        format!("{app_name}={level},devmap_api={level},tower_http={level}")
    }
}

/// Upstream device inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    pub url: String,
    /// Sent as the `Cookie` header on every fetch
    pub cookie: Option<String>,
    /// Unset leaves the HTTP client default
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Refresh {
    pub interval_ms: u64,
    pub run_on_start: bool,
}

impl Default for Refresh {
    fn default() -> Self {
        Self {
            interval_ms: 60_000,
            run_on_start: true,
        }
    }
}

/// Largest threshold a `time::Duration` can hold, in hours.
pub const MAX_THRESHOLD_HOURS: f64 = (i64::MAX / 3600) as f64;

/// Freshness thresholds, in hours since the last communication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Status {
    pub warning_after_hours: f64,
    pub stale_after_hours: f64,
}

impl Default for Status {
    fn default() -> Self {
        Self {
            warning_after_hours: 4.0,
            stale_after_hours: 24.0,
        }
    }
}

/// Bounds are written `[[south, west], [north, east]]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Map {
    pub max_bounds: [[f64; 2]; 2],
    pub max_bounds_viscosity: f64,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub initial_bounds: [[f64; 2]; 2],
    pub fit_padding: [u32; 2],
    pub tile_url: String,
    pub attribution: String,
}

impl Default for Map {
    fn default() -> Self {
        Self {
            max_bounds: [[41.2, -5.5], [51.3, 9.7]],
            max_bounds_viscosity: 1.0,
            min_zoom: 6,
            max_zoom: 19,
            initial_bounds: [[48.70, 2.10], [49.05, 2.55]],
            fit_padding: [20, 20],
            tile_url: String::from("https://tile.openstreetmap.org/{z}/{x}/{y}.png"),
            attribution: String::from("&copy; OpenStreetMap contributors"),
        }
    }
}

impl Map {
    pub fn max_bounds(&self) -> ViewBounds {
        to_bounds(self.max_bounds)
    }

    pub fn initial_bounds(&self) -> ViewBounds {
        to_bounds(self.initial_bounds)
    }

    pub fn to_response(&self, refresh: &Refresh) -> MapConfigResponse {
        MapConfigResponse {
            max_bounds: self.max_bounds(),
            max_bounds_viscosity: self.max_bounds_viscosity,
            min_zoom: self.min_zoom,
            max_zoom: self.max_zoom,
            initial_bounds: self.initial_bounds(),
            tile_url: self.tile_url.clone(),
            attribution: self.attribution.clone(),
            refresh_interval_ms: refresh.interval_ms,
        }
    }
}

fn to_bounds([south_west, north_east]: [[f64; 2]; 2]) -> ViewBounds {
    ViewBounds::new(LatLng::from(south_west), LatLng::from(north_east))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub logger: Logger,
    pub source: Source,
    #[serde(default)]
    pub refresh: Refresh,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub map: Map,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or("development".into());

        let settings: Settings = Config::builder()
            .add_source(File::with_name("configs/default"))
            .add_source(File::with_name(&format!("configs/{run_mode}")).required(false))
            .add_source(Self::environment())
            .build()?
            .try_deserialize()?;

        settings.validate()?;

        Ok(settings)
    }

    /// Overrides such as `DEVMAP__SOURCE__URL` or `DEVMAP__REFRESH__INTERVAL_MS`.
    pub fn environment() -> Environment {
        Environment::with_prefix("DEVMAP")
            .separator("__")
            .try_parsing(true)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh.interval_ms == 0 {
            return Err(ConfigError::Message("refresh.interval_ms must be positive".into()));
        }

        if !(self.status.warning_after_hours >= 0.0
            && self.status.warning_after_hours < self.status.stale_after_hours)
        {
            return Err(ConfigError::Message(
                "status.warning_after_hours must be below status.stale_after_hours".into(),
            ));
        }

        if !(self.status.stale_after_hours <= MAX_THRESHOLD_HOURS) {
            return Err(ConfigError::Message(format!(
                "status.stale_after_hours must not exceed {MAX_THRESHOLD_HOURS} hours"
            )));
        }

        for (name, bounds) in [
            ("map.max_bounds", self.map.max_bounds()),
            ("map.initial_bounds", self.map.initial_bounds()),
        ] {
            if !bounds.is_valid() {
                return Err(ConfigError::Message(format!(
                    "{name} must be ordered south-west then north-east"
                )));
            }
        }

        if self.map.min_zoom > self.map.max_zoom {
            return Err(ConfigError::Message("map.min_zoom exceeds map.max_zoom".into()));
        }

        Ok(())
    }
}
