use chrono::NaiveDate;
use config::{Config, ConfigError};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
    pub seed_on_startup: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub query_timeout_secs: u64,
}

impl DatabaseSettings {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }
}

/// Defaults for the report routes when the request leaves a parameter out.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportSettings {
    pub revenue_year: i32,
    pub date_range_start: NaiveDate,
    pub date_range_end: NaiveDate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub reports: ReportSettings,
}

impl Settings {
    /// Reads `config.yaml`, then lets `APP_SECTION__KEY` variables override it.
    pub fn new() -> Result<Self, ConfigError> {
        let mut s = Config::default();
        s.merge(config::File::with_name("config"))?;
        s.merge(config::Environment::with_prefix("APP").separator("__"))?;
        s.try_into()
    }
}
