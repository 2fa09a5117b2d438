//! Server configuration parsed from environment variables.

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_PALACE_PATH: &str = "data/palace.json";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT: {0}")]
    InvalidPort(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub palace_path: PathBuf,
}

impl ServerConfig {
    /// - `PORT`: listen port (default 3000)
    /// - `PALACE_PATH`: palace JSON file (default `data/palace.json`)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPort`] if `PORT` is not a port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// # Errors
    ///
    /// See [`ServerConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            None => DEFAULT_PORT,
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidPort(raw))?,
        };
        let palace_path = lookup("PALACE_PATH")
            .filter(|p| !p.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_PALACE_PATH), PathBuf::from);
        Ok(Self { port, palace_path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = ServerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(cfg, ServerConfig { port: 3000, palace_path: PathBuf::from("data/palace.json") });
    }

    #[test]
    fn overrides() {
        let cfg = ServerConfig::from_lookup(|key| match key {
            "PORT" => Some("8080".into()),
            "PALACE_PATH" => Some("/tmp/p.json".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.palace_path, PathBuf::from("/tmp/p.json"));
    }

    #[test]
    fn bad_port() {
        let err = ServerConfig::from_lookup(|key| (key == "PORT").then(|| "http".into())).unwrap_err();
        assert_eq!(err, ConfigError::InvalidPort("http".into()));
    }
}
