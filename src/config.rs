//! Service configuration, read from the environment (and `.env` via dotenvy).

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8083;
pub const DEFAULT_PAGE_SIZE: usize = 5;
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 5;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {name} '{value}': {reason}")]
    Invalid { name: &'static str, value: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub page_size: usize,
    pub low_stock_threshold: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self { page_size: DEFAULT_PAGE_SIZE, low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub data_dir: PathBuf,
    pub nats_url: Option<String>,
    pub settings: Settings,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from any variable source; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let page_size = parse_var(&lookup, "PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
        if page_size == 0 {
            return Err(ConfigError::Invalid { name: "PAGE_SIZE", value: "0".into(), reason: "must be at least 1".into() });
        }
        Ok(Self {
            port: parse_var(&lookup, "PORT", DEFAULT_PORT)?,
            data_dir: lookup("DATA_DIR").filter(|v| !v.trim().is_empty()).map(PathBuf::from).unwrap_or_else(|| PathBuf::from("./data")),
            nats_url: lookup("NATS_URL").filter(|v| !v.trim().is_empty()),
            settings: Settings {
                page_size,
                low_stock_threshold: parse_var(&lookup, "LOW_STOCK_THRESHOLD", DEFAULT_LOW_STOCK_THRESHOLD)?,
            },
        })
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) if !raw.trim().is_empty() => raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
            name,
            value: raw.clone(),
            reason: e.to_string(),
        }),
        _ => Ok(default),
    }
}
