//! # Runtime Configuration
//!
//! Settings read from the environment at startup (after `dotenvy` has loaded
//! any `.env` file).
//!
//! ## Environment Variables
//!
//! - `APP_ENV` - `production` uses PostgreSQL and JSON logs, anything else the in-memory store
//! - `DATABASE_URL` - Required in production
//! - `JWT_SECRET` - Required; HMAC secret for access tokens
//! - `BIND_ADDR` - Optional, defaults to [`DEFAULT_BIND_ADDR`]

use std::env;

use thiserror::Error;

use crate::utils::constant::DEFAULT_BIND_ADDR;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("env variable `{0}` should be set")]
    Missing(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    /// Reads `APP_ENV`; unset or unknown values mean development.
    pub fn from_env() -> Self {
        match env::var("APP_ENV") {
            Ok(value) if value.eq_ignore_ascii_case("production") => AppEnv::Production,
            _ => AppEnv::Development,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub app_env: AppEnv,
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub bind_addr: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let app_env = AppEnv::from_env();

        let database_url = env::var("DATABASE_URL").ok();
        if app_env == AppEnv::Production && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let jwt_secret = env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        Ok(Self {
            app_env,
            database_url,
            jwt_secret,
            bind_addr,
        })
    }
}
