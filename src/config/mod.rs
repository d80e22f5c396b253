use anyhow::{Context, Result};
use config::{Config, File};
use log::{debug, info, LevelFilter};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_api_version")]
    pub version: String,
    #[serde(default = "default_adapter")]
    pub adapter: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:8888".to_string()
}

fn default_api_version() -> String {
    "0.1".to_string()
}

fn default_adapter() -> String {
    "lpdpower".to_string()
}

fn default_timeout_ms() -> u64 {
    1000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            version: default_api_version(),
            adapter: default_adapter(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl ApiConfig {
    /// Root of the adapter, always with a trailing slash: `<base>/api/<version>/<adapter>/`.
    pub fn root_url(&self) -> String {
        format!(
            "{}/api/{}/{}/",
            self.base_url.trim_end_matches('/'),
            self.version,
            self.adapter
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_page_file")]
    pub file: String,
    #[serde(default)]
    pub save_to_file: bool,
}

fn default_poll_interval_ms() -> u64 {
    200
}

fn default_page_file() -> String {
    "dashboard.html".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            file: default_page_file(),
            save_to_file: false,
        }
    }
}

impl DashboardConfig {
    pub fn poll_interval(&self) -> Duration {
        // A zero period would make tokio's interval panic.
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

/// Number of repeated units of each kind shown on the page. The pump and
/// fan are single units and always present.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LayoutConfig {
    #[serde(default = "default_quads")]
    pub quads: usize,
    #[serde(default = "default_temperature_sensors")]
    pub temperature_sensors: usize,
    #[serde(default = "default_humidity_sensors")]
    pub humidity_sensors: usize,
}

fn default_quads() -> usize {
    4
}

fn default_temperature_sensors() -> usize {
    11
}

fn default_humidity_sensors() -> usize {
    2
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            quads: default_quads(),
            temperature_sensors: default_temperature_sensors(),
            humidity_sensors: default_humidity_sensors(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn get_log_level(&self) -> LevelFilter {
        match self.logging.level.to_lowercase().as_str() {
            "trace" => LevelFilter::Trace,
            "debug" => LevelFilter::Debug,
            "info" => LevelFilter::Info,
            "warn" => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            "off" => LevelFilter::Off,
            _ => LevelFilter::Info, // Default to Info if invalid
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_path = path.as_ref();
        debug!("Loading configuration from {}", config_path.display());

        let config = Config::builder()
            .add_source(File::from(config_path).format(config::FileFormat::Ini))
            .build()
            .context(format!("Failed to load config from {}", config_path.display()))?;

        let app_config: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize config")?;

        Ok(app_config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let config_path = path.as_ref();

        let mut config_str = String::new();

        config_str.push_str(&format!(
            "[api]\nbase_url = {}\nversion = {}\nadapter = {}\ntimeout_ms = {}\n\n",
            self.api.base_url, self.api.version, self.api.adapter, self.api.timeout_ms
        ));

        config_str.push_str(&format!(
            "[dashboard]\npoll_interval_ms = {}\nfile = {}\nsave_to_file = {}\n\n",
            self.dashboard.poll_interval_ms, self.dashboard.file, self.dashboard.save_to_file
        ));

        config_str.push_str(&format!(
            "[layout]\nquads = {}\ntemperature_sensors = {}\nhumidity_sensors = {}\n\n",
            self.layout.quads, self.layout.temperature_sensors, self.layout.humidity_sensors
        ));

        config_str.push_str(&format!("[logging]\nlevel = {}\n", self.logging.level));

        fs::write(config_path, config_str)
            .context(format!("Failed to save config to {}", config_path.display()))?;

        info!("Configuration saved to {}", config_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn ini_file(content: &str) -> NamedTempFile {
        let mut temp_file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:8888");
        assert_eq!(config.api.version, "0.1");
        assert_eq!(config.api.adapter, "lpdpower");
        assert_eq!(config.dashboard.poll_interval_ms, 200);
        assert_eq!(config.dashboard.file, "dashboard.html");
        assert!(!config.dashboard.save_to_file);
        assert_eq!(config.layout.quads, 4);
        assert_eq!(config.layout.temperature_sensors, 11);
        assert_eq!(config.layout.humidity_sensors, 2);
        assert_eq!(config.get_log_level(), LevelFilter::Info);
    }

    #[test]
    fn test_root_url() {
        let mut api = ApiConfig::default();
        assert_eq!(api.root_url(), "http://localhost:8888/api/0.1/lpdpower/");

        api.base_url = "http://beagle03:8888/".to_string();
        assert_eq!(api.root_url(), "http://beagle03:8888/api/0.1/lpdpower/");
    }

    #[test]
    fn test_from_file() {
        let temp_file = ini_file(
            "[api]\nbase_url = http://pscu:8888\nversion = 0.2\n\n[dashboard]\npoll_interval_ms = 500\nfile = test.html\nsave_to_file = true\n\n[layout]\nquads = 2\ntemperature_sensors = 3\n\n[logging]\nlevel = debug\n",
        );

        let config = AppConfig::from_file(temp_file.path()).unwrap();

        assert_eq!(config.api.base_url, "http://pscu:8888");
        assert_eq!(config.api.version, "0.2");
        assert_eq!(config.api.adapter, "lpdpower");
        assert_eq!(config.dashboard.poll_interval_ms, 500);
        assert_eq!(config.dashboard.file, "test.html");
        assert!(config.dashboard.save_to_file);
        assert_eq!(config.layout.quads, 2);
        assert_eq!(config.layout.temperature_sensors, 3);
        assert_eq!(config.layout.humidity_sensors, 2);
        assert_eq!(config.get_log_level(), LevelFilter::Debug);
    }

    #[test]
    fn test_save_config() {
        let mut config = AppConfig::default();
        config.api.base_url = "http://saved:9000".to_string();
        config.dashboard.poll_interval_ms = 1000;
        config.dashboard.file = "saved.html".to_string();
        config.dashboard.save_to_file = true;
        config.layout.humidity_sensors = 3;
        config.logging.level = "warn".to_string();

        let temp_file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
        let config_path = temp_file.path();

        config.save(config_path).unwrap();

        let loaded_config = AppConfig::from_file(config_path).unwrap();

        assert_eq!(loaded_config.api.base_url, "http://saved:9000");
        assert_eq!(loaded_config.dashboard.poll_interval_ms, 1000);
        assert_eq!(loaded_config.dashboard.file, "saved.html");
        assert!(loaded_config.dashboard.save_to_file);
        assert_eq!(loaded_config.layout, LayoutConfig { humidity_sensors: 3, ..LayoutConfig::default() });
        assert_eq!(loaded_config.get_log_level(), LevelFilter::Warn);
    }

    #[test]
    fn test_zero_poll_interval_is_clamped() {
        let dashboard = DashboardConfig {
            poll_interval_ms: 0,
            ..DashboardConfig::default()
        };
        assert_eq!(dashboard.poll_interval(), Duration::from_millis(1));
    }
}
