//! Startup configuration, read once from the environment.
//!
//! | Variable            | Default            |
//! |---------------------|--------------------|
//! | `CAFE_HOST`         | `127.0.0.1`        |
//! | `CAFE_PORT`         | `5000`             |
//! | `CAFE_DATABASE`     | `cafes.db`         |
//! | `CAFE_SECRET_KEY`   | development key    |
//! | `CAFE_CSRF`         | `true`             |
//! | `CAFE_OPEN_BROWSER` | `false`            |

use log::warn;
use std::env;
use std::path::PathBuf;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DATABASE: &str = "cafes.db";
const DEV_SECRET_KEY: &str = "dev-secret-key-change-me-in-production";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// SQLite database file holding the `cafe` table.
    pub database_path: PathBuf,
    /// Signs the anti-forgery tokens embedded in the "Add Cafe" form.
    pub secret_key: String,
    pub csrf_enabled: bool,
    /// Open the listing page in the default browser once the server is up.
    pub open_browser: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let secret_key = lookup("CAFE_SECRET_KEY")
            .filter(|key| !key.is_empty())
            .unwrap_or_else(|| {
                warn!("CAFE_SECRET_KEY not set, using the insecure development key.");
                DEV_SECRET_KEY.to_string()
            });

        Self {
            host: lookup("CAFE_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: lookup("CAFE_PORT")
                .and_then(|port| port.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            database_path: lookup("CAFE_DATABASE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE)),
            secret_key,
            csrf_enabled: parse_flag(lookup("CAFE_CSRF"), true),
            open_browser: parse_flag(lookup("CAFE_OPEN_BROWSER"), false),
        }
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.server_address())
    }
}

fn parse_flag(value: Option<String>, default: bool) -> bool {
    match value.as_deref().map(str::trim).map(str::to_ascii_lowercase) {
        Some(v) if matches!(v.as_str(), "1" | "true" | "on" | "yes") => true,
        Some(v) if matches!(v.as_str(), "0" | "false" | "off" | "no") => false,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]);
        assert_eq!(config.server_address(), "127.0.0.1:5000");
        assert_eq!(config.url(), "http://127.0.0.1:5000");
        assert_eq!(config.database_path, PathBuf::from("cafes.db"));
        assert_eq!(config.secret_key, DEV_SECRET_KEY);
        assert!(config.csrf_enabled);
        assert!(!config.open_browser);
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = config_from(&[
            ("CAFE_HOST", "0.0.0.0"),
            ("CAFE_PORT", "8080"),
            ("CAFE_DATABASE", "/tmp/other.db"),
            ("CAFE_SECRET_KEY", "s3cret"),
            ("CAFE_CSRF", "off"),
            ("CAFE_OPEN_BROWSER", "yes"),
        ]);
        assert_eq!(config.server_address(), "0.0.0.0:8080");
        assert_eq!(config.database_path, PathBuf::from("/tmp/other.db"));
        assert_eq!(config.secret_key, "s3cret");
        assert!(!config.csrf_enabled);
        assert!(config.open_browser);
    }

    #[test]
    fn unparsable_values_fall_back() {
        let config = config_from(&[
            ("CAFE_PORT", "eighty"),
            ("CAFE_CSRF", "maybe"),
            ("CAFE_SECRET_KEY", ""),
        ]);
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.csrf_enabled);
        assert_eq!(config.secret_key, DEV_SECRET_KEY);
    }
}
