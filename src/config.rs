use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::{DEFAULT_HANDICAP, DEFAULT_ITERATIONS, DEFAULT_TEAM_SIZE};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub pairing: PairingSettings,
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 4000 }

#[derive(Debug, Clone, Deserialize)]
pub struct PairingSettings {
    #[serde(default = "default_team_size")]
    pub team_size: usize,
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    #[serde(default = "default_handicap")]
    pub default_handicap: f64,
    /// Fixed seed for every request that does not send its own
    pub seed: Option<u64>,
    /// Append each generated pairing to the event history
    #[serde(default)]
    pub record_history: bool,
}

impl Default for PairingSettings {
    fn default() -> Self {
        Self {
            team_size: default_team_size(),
            iterations: default_iterations(),
            default_handicap: default_handicap(),
            seed: None,
            record_history: false,
        }
    }
}

fn default_team_size() -> usize { DEFAULT_TEAM_SIZE }
fn default_iterations() -> usize { DEFAULT_ITERATIONS }
fn default_handicap() -> f64 { DEFAULT_HANDICAP }

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Memory,
    File,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    #[serde(default)]
    pub backend: StoreBackend,
    /// League JSON file; required for the file backend, optional seed
    /// data for the memory backend
    pub path: Option<String>,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            path: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with PAIRING__)
    /// 4. LEAGUE_DATA_FILE for the store path
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            // Local overrides for development
            .add_source(File::with_name("config/local").required(false))
            // e.g., PAIRING__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("PAIRING")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_data_file_override(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("PAIRING")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Point the store at LEAGUE_DATA_FILE when it is set
fn apply_data_file_override(settings: Config) -> Result<Config, ConfigError> {
    match std::env::var("LEAGUE_DATA_FILE") {
        Ok(path) if !path.is_empty() => Config::builder()
            .add_source(settings)
            .set_override("store.path", path)?
            .build(),
        _ => Ok(settings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pairing() {
        let pairing = PairingSettings::default();
        assert_eq!(pairing.team_size, 4);
        assert_eq!(pairing.iterations, 100);
        assert_eq!(pairing.default_handicap, 20.0);
        assert_eq!(pairing.seed, None);
        assert!(!pairing.record_history);
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("pairing-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            r#"
[server]
port = 8081

[pairing]
team_size = 3
seed = 7

[store]
backend = "file"
path = "data/league.json"
"#,
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.server.port, 8081);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.pairing.team_size, 3);
        assert_eq!(settings.pairing.iterations, 100);
        assert_eq!(settings.pairing.seed, Some(7));
        assert_eq!(settings.store.backend, StoreBackend::File);
        assert_eq!(settings.store.path.as_deref(), Some("data/league.json"));
        assert_eq!(settings.logging.level, "info");

        std::fs::remove_file(&path).unwrap();
    }
}
