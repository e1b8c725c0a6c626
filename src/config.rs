//! Application configuration parsed from environment variables.

use std::path::PathBuf;

use crate::error::{MapError, MapResult};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:4567";
pub const DEFAULT_MAP_IMAGE: &str = "campus_map.jpg";
pub const DEFAULT_BUILDING: &str = "PAR";
pub const DEFAULT_LOG_FILTER: &str = "husky_map=info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the path-finding server, without a trailing slash
    pub server_url: String,
    /// Background map image shown under the route
    pub map_image: PathBuf,
    /// Short code both selections fall back to on startup and reset
    pub default_building: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            map_image: PathBuf::from(DEFAULT_MAP_IMAGE),
            default_building: DEFAULT_BUILDING.to_string(),
        }
    }
}

impl AppConfig {
    /// Build config from the process environment.
    ///
    /// Optional:
    /// - `HUSKY_MAP_SERVER_URL`: default `http://localhost:4567`
    /// - `HUSKY_MAP_IMAGE`: default `campus_map.jpg`
    /// - `HUSKY_MAP_DEFAULT_BUILDING`: default `PAR`
    pub fn from_env() -> MapResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> MapResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_url = lookup("HUSKY_MAP_SERVER_URL")
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string())
            .trim()
            .trim_end_matches('/')
            .to_string();
        if server_url.is_empty() {
            return Err(MapError::Config("HUSKY_MAP_SERVER_URL is empty".into()));
        }

        let map_image = lookup("HUSKY_MAP_IMAGE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MAP_IMAGE));

        let default_building = lookup("HUSKY_MAP_DEFAULT_BUILDING")
            .unwrap_or_else(|| DEFAULT_BUILDING.to_string())
            .trim()
            .to_string();
        if default_building.is_empty() || default_building.contains(':') {
            return Err(MapError::Config(format!(
                "HUSKY_MAP_DEFAULT_BUILDING must be a bare short code, got '{default_building}'"
            )));
        }

        Ok(Self { server_url, map_image, default_building })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let cfg = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.server_url, "http://localhost:4567");
        assert_eq!(cfg.default_building, "PAR");
    }

    #[test]
    fn test_overrides_are_applied() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("HUSKY_MAP_SERVER_URL", "http://maps.test:8080/"),
            ("HUSKY_MAP_IMAGE", "/tmp/campus.png"),
            ("HUSKY_MAP_DEFAULT_BUILDING", "CSE"),
        ]))
        .unwrap();
        assert_eq!(cfg.server_url, "http://maps.test:8080");
        assert_eq!(cfg.map_image, PathBuf::from("/tmp/campus.png"));
        assert_eq!(cfg.default_building, "CSE");
    }

    #[test]
    fn test_empty_server_url_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[("HUSKY_MAP_SERVER_URL", " / ")])).unwrap_err();
        assert!(matches!(err, MapError::Config(_)));
    }

    #[test]
    fn test_default_building_must_be_a_code() {
        let err =
            AppConfig::from_lookup(lookup_from(&[("HUSKY_MAP_DEFAULT_BUILDING", "PAR: Parrington Hall")]))
                .unwrap_err();
        assert!(matches!(err, MapError::Config(_)));
    }
}
