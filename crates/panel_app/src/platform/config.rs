use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use panel_engine::{ApiError, ClientSettings, EngineConfig};
use panel_logging::{panel_info, panel_warn};
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILENAME: &str = "panel.ron";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub base_url: String,
    pub output_dir: PathBuf,
    /// Country restored by Reset.
    pub default_country: String,
    pub poll_interval_ms: u64,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: Option<u64>,
    pub cities_by_country: BTreeMap<String, Vec<String>>,
}

impl Default for PanelConfig {
    fn default() -> Self {
        let mut cities_by_country = BTreeMap::new();
        cities_by_country.insert(
            "Россия".to_string(),
            ["Москва", "Санкт-Петербург", "Новосибирск", "Екатеринбург", "Казань"]
                .map(String::from)
                .to_vec(),
        );
        cities_by_country.insert(
            "Казахстан".to_string(),
            ["Алматы", "Астана", "Шымкент"].map(String::from).to_vec(),
        );
        Self {
            base_url: "http://localhost:5000".to_string(),
            output_dir: PathBuf::from("output"),
            default_country: "Россия".to_string(),
            poll_interval_ms: 1000,
            connect_timeout_secs: 10,
            request_timeout_secs: None,
            cities_by_country,
        }
    }
}

impl PanelConfig {
    /// Reads the RON config at `path`; a missing or broken file yields defaults.
    pub fn load(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Self::default();
            }
            Err(err) => {
                panel_warn!("Failed to read config from {:?}: {}", path, err);
                return Self::default();
            }
        };

        match ron::from_str(&content) {
            Ok(config) => {
                panel_info!("Loaded config from {:?}", path);
                config
            }
            Err(err) => {
                panel_warn!("Failed to parse config from {:?}: {}", path, err);
                Self::default()
            }
        }
    }

    pub fn engine_config(&self) -> Result<EngineConfig, ApiError> {
        let mut client = ClientSettings::parse(&self.base_url)?;
        client.connect_timeout = Duration::from_secs(self.connect_timeout_secs);
        client.request_timeout = self.request_timeout_secs.map(Duration::from_secs);

        let mut config = EngineConfig::new(client, self.output_dir.clone());
        config.poll_interval = Duration::from_millis(self.poll_interval_ms.max(1));
        Ok(config)
    }
}
