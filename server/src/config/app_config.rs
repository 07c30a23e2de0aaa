//! Runtime application configuration loaded from the environment.

use std::net::SocketAddr;

use super::defaults::get_default;
use super::validation::validate_setting;

/// Runtime configuration, built once at startup and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_address: String,
    pub server_port: u16,
    pub max_upload_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".into(),
            server_port: 5000,
            max_upload_bytes: 64 * 1024 * 1024,
        }
    }
}

impl AppConfig {
    /// Load configuration from process environment variables.
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Missing keys use their defaults; invalid values are logged and
    /// replaced by the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let g = |key: &str| -> String {
            let fallback = get_default(key).unwrap_or_default();
            match lookup(key) {
                Some(v) if !v.trim().is_empty() => {
                    let v = v.trim().to_string();
                    match validate_setting(key, &v) {
                        Ok(()) => v,
                        Err(e) => {
                            tracing::warn!("Invalid {key}={v:?} ({e}), using default {fallback:?}");
                            fallback.to_string()
                        }
                    }
                }
                _ => fallback.to_string(),
            }
        };

        let defaults = Self::default();
        Self {
            bind_address: g("BIND_ADDRESS"),
            server_port: g("SERVER_PORT").parse().unwrap_or(defaults.server_port),
            max_upload_bytes: g("MAX_UPLOAD_BYTES")
                .parse()
                .unwrap_or(defaults.max_upload_bytes),
        }
    }

    /// Socket address to bind the HTTP listener to.
    pub fn socket_addr(&self) -> Result<SocketAddr, anyhow::Error> {
        let ip = self.bind_address.parse()?;
        Ok(SocketAddr::new(ip, self.server_port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:5000");
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("BIND_ADDRESS", "127.0.0.1"),
            ("SERVER_PORT", "8081"),
            ("MAX_UPLOAD_BYTES", "2048"),
        ]));
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.server_port, 8081);
        assert_eq!(config.max_upload_bytes, 2048);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("BIND_ADDRESS", "not-an-ip"),
            ("SERVER_PORT", "0"),
            ("MAX_UPLOAD_BYTES", "tiny"),
        ]));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = AppConfig::from_lookup(lookup_from(&[("SERVER_PORT", "  ")]));
        assert_eq!(config.server_port, 5000);
    }
}
