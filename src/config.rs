use std::env;
use std::net::{IpAddr, SocketAddr};

use crate::error::AppError;

pub const DEFAULT_STUDENT_ID: &str = "chaitanya0205";

/// Server settings read from the environment.
///
/// | Env var        | Default                 |
/// |----------------|-------------------------|
/// | `HOST`         | `127.0.0.1`             |
/// | `PORT`         | `5000`                  |
/// | `DATABASE_URL` | unset (mock store)      |
/// | `STUDENT_ID`   | `chaitanya0205`         |
/// | `CORS_ORIGINS` | `http://localhost:3000` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub database_url: Option<String>,
    pub student_id: String,
    pub cors_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 5000,
            database_url: None,
            student_id: DEFAULT_STUDENT_ID.to_string(),
            cors_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let host = match var("HOST") {
            Some(raw) => raw
                .parse()
                .map_err(|_| AppError::Config(format!("HOST is not an IP address: {}", raw)))?,
            None => defaults.host,
        };
        let port = match var("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| AppError::Config(format!("PORT is not a valid port: {}", raw)))?,
            None => defaults.port,
        };
        let cors_origins = match var("CORS_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => defaults.cors_origins,
        };

        Ok(Self {
            host,
            port,
            database_url: var("DATABASE_URL"),
            student_id: var("STUDENT_ID").unwrap_or(defaults.student_id),
            cors_origins,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
