use std::env;
use std::fmt::Display;
use std::str::FromStr;

use tracing::{info, Level};

use crate::error::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Mongo,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<StoreBackend, String> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mongo" => Ok(StoreBackend::Mongo),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown store backend \"{}\"", other)),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub bind: String,
    pub mongo_uri: String,
    pub database: String,
    pub store: StoreBackend,
    pub seed: bool,
    pub log_level: Level,
}

impl Config {
    /// Reads the configuration from `LINKBUILDER_*` environment variables.
    pub fn load() -> Result<Config, Error> {
        Config::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Config {
            bind: try_load(&lookup, "LINKBUILDER_BIND", "127.0.0.1:8080")?,
            mongo_uri: try_load(&lookup, "LINKBUILDER_MONGO_URI", "mongodb://localhost:27017")?,
            database: try_load(&lookup, "LINKBUILDER_DATABASE", "linkbuilder")?,
            store: try_load(&lookup, "LINKBUILDER_STORE", "mongo")?,
            seed: try_load(&lookup, "LINKBUILDER_SEED", "true")?,
            log_level: log_level(&lookup)?,
        })
    }
}

/// The log level alone, for setting up the subscriber before anything else
/// is read.
pub fn log_level<F>(lookup: F) -> Result<Level, Error>
where
    F: Fn(&str) -> Option<String>,
{
    try_load(&lookup, "LINKBUILDER_LOG_LEVEL", "debug")
}

fn try_load<T, F>(lookup: &F, key: &str, default: &str) -> Result<T, Error>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{} not set, using default: {}", key, default);
        default.to_string()
    });

    let parsed = value.trim().parse::<T>();
    parsed.map_err(|err| {
        tracing::warn!("invalid {} value: {}", key, err);
        Error::InvalidConfiguration {
            key: key.to_string(),
            value,
        }
    })
}
