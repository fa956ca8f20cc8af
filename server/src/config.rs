use std::env;
use std::fmt::Display;
use std::str::FromStr;

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub session_ttl_days: i64,
}

impl Config {
    pub fn from_env() -> Self {
        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let session_ttl_days = parse_or_default("SESSION_TTL_DAYS", 30);

        Self {
            database_url,
            bind_addr,
            session_ttl_days,
        }
    }
}

fn parse_or_default<T: FromStr + Display>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!("Invalid {}={:?}, using default {}", name, raw, default);
                default
            }
        },
        Err(_) => default,
    }
}
