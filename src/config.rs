use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

/// Salt used when no `IP_SALT` is provided. Fine for local development,
/// unacceptable in production.
pub const DEFAULT_SALT: &str = "dev-salt-change-me";

pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub ip_salt: String,
    pub allowed_origin: Option<String>,
}

impl Config {
    pub fn load() -> Self {
        let ip_salt: String = try_load("IP_SALT", DEFAULT_SALT);
        if ip_salt == DEFAULT_SALT {
            warn!("IP_SALT left at insecure default, identity hashes are guessable");
        }

        Self {
            port: try_load("RUST_PORT", "1111"),
            database_url: try_load("DATABASE_URL", "sqlite://scores.db"),
            ip_salt,
            allowed_origin: var("ALLOWED_ORIGIN").ok(),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}
