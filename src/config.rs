use std::time::Duration;

use url::Url;

use crate::error::Result;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/";
pub const BASE_URL_ENV: &str = "ACTIVITY_SIGNUP_URL";
pub const NOTIFICATION_TTL: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Root the `/activities` endpoints hang off. Always ends in `/`.
    pub base_url: Url,
    pub notification_ttl: Duration,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            base_url,
            notification_ttl: NOTIFICATION_TTL,
        })
    }

    /// Reads the base url from `ACTIVITY_SIGNUP_URL`, falling back to the local dev server.
    #[cfg(feature = "no-wasm")]
    pub fn from_env() -> Result<Self> {
        match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::new(DEFAULT_BASE_URL),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let config = ClientConfig::new("http://school.example/club").unwrap();
        assert_eq!(config.base_url.as_str(), "http://school.example/club/");
        assert_eq!(config.notification_ttl, Duration::from_millis(5000));
    }

    #[test]
    fn origin_only_url_is_kept() {
        let config = ClientConfig::new("http://localhost:8000").unwrap();
        assert_eq!(config.base_url.as_str(), "http://localhost:8000/");
    }

    #[test]
    fn garbage_url_is_rejected() {
        assert!(ClientConfig::new("not a url").is_err());
    }
}
