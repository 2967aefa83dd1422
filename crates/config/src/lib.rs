use dotenv::dotenv;
use dotenv::from_path;
use std::env;
use thiserror::Error;

pub const DEFAULT_DATABASE_PATH: &str = "blood_connect.db";
pub const DEFAULT_API_HOST: &str = "0.0.0.0";
pub const DEFAULT_API_PORT: u16 = 8080;
pub const DEFAULT_COUNTRY_CODE: &str = "91";
pub const DEFAULT_ENVIRONMENT: &str = "development";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Failed to load .env file from path {path}: {reason}")]
    EnvFile { path: String, reason: String },

    #[error("{name} is not valid: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_path: String,
    pub api_host: String,
    pub api_port: u16,
    /// Shared secret for the admin endpoints. `None` locks them entirely.
    pub admin_key: Option<String>,
    /// Calling code (digits, no `+`) applied to national phone numbers.
    pub default_country_code: String,
    /// Nominatim-compatible search endpoint; geocoding is off without it.
    pub geocoder_url: Option<String>,
    pub environment: String,
}

impl Config {
    /// Load configuration from a specified `.env` file path or default to the root `.env` file.
    pub fn from_env(env_path: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(path) = env_path {
            from_path(path).map_err(|e| ConfigError::EnvFile {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        } else {
            // A missing `.env` is fine; the process environment still applies
            dotenv().ok();
        }

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let api_port = match var("API_PORT") {
            Some(value) => value.parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "API_PORT",
                value,
            })?,
            None => DEFAULT_API_PORT,
        };

        let default_country_code = var("DEFAULT_COUNTRY_CODE")
            .map(|value| value.trim_start_matches('+').to_string())
            .unwrap_or_else(|| DEFAULT_COUNTRY_CODE.to_string());
        let code_is_valid = (1..=3).contains(&default_country_code.len())
            && default_country_code.chars().all(|c| c.is_ascii_digit())
            && !default_country_code.starts_with('0');
        if !code_is_valid {
            return Err(ConfigError::Invalid {
                name: "DEFAULT_COUNTRY_CODE",
                value: default_country_code,
            });
        }

        Ok(Self {
            database_path: var("DATABASE_PATH").unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string()),
            api_host: var("API_HOST").unwrap_or_else(|| DEFAULT_API_HOST.to_string()),
            api_port,
            admin_key: var("ADMIN_KEY"),
            default_country_code,
            geocoder_url: var("GEOCODER_URL"),
            environment: var("APP_ENV").unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            api_host: DEFAULT_API_HOST.to_string(),
            api_port: DEFAULT_API_PORT,
            admin_key: None,
            default_country_code: DEFAULT_COUNTRY_CODE.to_string(),
            geocoder_url: None,
            environment: DEFAULT_ENVIRONMENT.to_string(),
        }
    }
}
