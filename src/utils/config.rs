use std::path::PathBuf;
use std::time::Duration;

use hyper::header::HeaderValue;
use thiserror::Error;

pub const MAX_UPLOAD_BYTES: usize = 10 << 20;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_UPLOAD_DIR: &str = "./public/uploads";
const DEFAULT_ALLOW_ORIGIN: &str = "*";
const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_DATABASE_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("DATABASE_URL is required")]
    MissingDatabaseUrl,

    #[error("{name} has an invalid value `{value}`")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub upload_dir: PathBuf,
    pub allow_origin: HeaderValue,
    pub database_max_connections: u32,
    pub database_timeout: Duration,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::MissingDatabaseUrl)?;

        let allow_origin = get("ALLOW_ORIGIN").unwrap_or_else(|| DEFAULT_ALLOW_ORIGIN.to_string());
        let allow_origin =
            HeaderValue::from_str(&allow_origin).map_err(|_| ConfigError::InvalidValue {
                name: "ALLOW_ORIGIN",
                value: allow_origin.clone(),
            })?;

        Ok(Config {
            port: parse_or(&get, "PORT", DEFAULT_PORT)?,
            database_url,
            upload_dir: get("UPLOAD_DIR")
                .unwrap_or_else(|| DEFAULT_UPLOAD_DIR.to_string())
                .into(),
            allow_origin,
            database_max_connections: parse_or(
                &get,
                "DATABASE_MAX_CONNECTIONS",
                DEFAULT_DATABASE_MAX_CONNECTIONS,
            )?,
            database_timeout: Duration::from_secs(parse_or(
                &get,
                "DATABASE_TIMEOUT_SECS",
                DEFAULT_DATABASE_TIMEOUT_SECS,
            )?),
            max_upload_bytes: MAX_UPLOAD_BYTES,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    get: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match get(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        None => Ok(default),
    }
}
