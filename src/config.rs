use std::fmt;
use std::path::Path;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

use crate::error::FlowError;

/// Environment prefix; nested keys are separated by `__`,
/// e.g. `CSC__RECONCILE__TOLERANCE`.
pub const ENV_PREFIX: &str = "CSC__";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub reconcile: ReconcileConfig,
    pub logging: LoggingConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
    /// Largest inflow/outflow difference still treated as balanced.
    pub tolerance: f64,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self { tolerance: 1e-6 }
    }
}

impl ReconcileConfig {
    /// Tolerance must be finite and non-negative.
    pub fn validate(&self) -> Result<(), FlowError> {
        if self.tolerance.is_finite() && self.tolerance >= 0.0 {
            return Ok(());
        }
        Err(FlowError::InvalidData(format!(
            "reconcile tolerance must be finite and non-negative, got {}",
            self.tolerance
        )))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, overridden by `RUST_LOG` when set.
    pub filter: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: false,
        }
    }
}

/// Connection settings handed to the data readers.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub user: String,
    pub password: Option<String>,
    pub host: String,
    pub port: u16,
    pub database: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            user: "csc".to_string(),
            password: None,
            host: "localhost".to_string(),
            port: 5432,
            database: "csc".to_string(),
        }
    }
}

impl DatabaseConfig {
    /// Postgres URL without the password.
    pub fn url(&self) -> String {
        format!(
            "postgres://{}@{}:{}/{}",
            self.user, self.host, self.port, self.database
        )
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .finish()
    }
}

impl Config {
    /// Defaults, then the TOML file (if it exists), then `CSC__*` env vars.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FlowError> {
        let figment = Figment::new()
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));
        let config: Config = figment.extract()?;
        config.reconcile.validate()?;
        Ok(config)
    }
}
