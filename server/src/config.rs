use std::env;

use derive_more::Display;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_INDEX_FILE: &str = "frontend/dist/index.html";

#[derive(Debug, Display, PartialEq)]
pub enum ConfigError {
    #[display(fmt = "{} must be set", _0)]
    Missing(&'static str),
    #[display(fmt = "{} has an invalid value: {}", _0, _1)]
    Invalid(&'static str, String),
}

impl std::error::Error for ConfigError {}

/// Settings read from the environment once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub jwt_key: String,
    pub bind_address: String,
    pub pool_size: u32,
    pub index_file: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let pool_size = match lookup("DB_POOL_SIZE") {
            None => DEFAULT_POOL_SIZE,
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(size) if size > 0 => size,
                _ => return Err(ConfigError::Invalid("DB_POOL_SIZE", raw)),
            },
        };

        Ok(Config {
            database_url: required("DATABASE_URL")?,
            jwt_key: required("JWT_KEY")?,
            bind_address: lookup("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            pool_size,
            index_file: lookup("INDEX_FILE").unwrap_or_else(|| DEFAULT_INDEX_FILE.to_string()),
        })
    }
}
