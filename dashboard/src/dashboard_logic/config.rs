use anyhow::{anyhow, Context, Result};
use clap::Parser;
use lib_common::configs::settings::{
    DEFAULT_PROXY_BASE, DEFAULT_REFRESH_INTERVAL_MS, DEFAULT_REQUEST_TIMEOUT_MS,
};
use lib_common::configs::{DashboardSettings, Endpoints};
use lib_common::utils::locale::Locale;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "market_dashboard.conf";
const DEFAULT_LOG_DIR: &str = "./logs";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Parser, Deserialize, Serialize, Debug, Clone, Default)]
#[clap(about = "Terminal market dashboard: crypto prices, indices and fear & greed at a glance.", version)]
#[serde(rename_all = "camelCase")]
pub struct DashboardConfig {
    #[clap(long, env = "DASHBOARD_CONFIG_PATH", help = "Path to the JSON configuration file.")]
    pub config_path: Option<PathBuf>,

    #[clap(long, env = "DASHBOARD_REFRESH_INTERVAL_MS", help = "Milliseconds between automatic refreshes.")]
    pub refresh_interval_ms: Option<u64>,

    #[clap(long, env = "DASHBOARD_REQUEST_TIMEOUT_MS", help = "Timeout in milliseconds for each request attempt.")]
    pub request_timeout_ms: Option<u64>,

    #[clap(long, env = "DASHBOARD_PROXY_BASE", help = "Relay prefix the url-encoded upstream URL is appended to.")]
    pub proxy_base: Option<String>,

    #[clap(long, env = "DASHBOARD_LOCALE", help = "Display language (en, zh-CN).")]
    pub locale: Option<String>,

    #[clap(long, env = "DASHBOARD_LOG_DIR", help = "Directory for log files.")]
    pub log_dir: Option<PathBuf>,

    #[clap(long, env = "DASHBOARD_LOG_LEVEL", help = "Logging level (trace, debug, info, warn, error).")]
    pub log_level: Option<String>,

    #[clap(long, help = "Run a single refresh cycle, print the board and exit.")]
    #[serde(default)]
    pub once: bool,

    #[clap(long, requires = "once", help = "With --once, print the board as JSON.")]
    #[serde(default)]
    pub json: bool,

    #[clap(skip)]
    pub endpoints: Option<Endpoints>,
}

impl DashboardConfig {
    // 'other' overrides 'self' wherever it has a value
    fn merge(self, other: DashboardConfig) -> DashboardConfig {
        DashboardConfig {
            config_path: other.config_path.or(self.config_path),
            refresh_interval_ms: other.refresh_interval_ms.or(self.refresh_interval_ms),
            request_timeout_ms: other.request_timeout_ms.or(self.request_timeout_ms),
            proxy_base: other.proxy_base.or(self.proxy_base),
            locale: other.locale.or(self.locale),
            log_dir: other.log_dir.or(self.log_dir),
            log_level: other.log_level.or(self.log_level),
            once: other.once || self.once,
            json: other.json || self.json,
            endpoints: other.endpoints.or(self.endpoints),
        }
    }

    fn defaults() -> DashboardConfig {
        DashboardConfig {
            refresh_interval_ms: Some(DEFAULT_REFRESH_INTERVAL_MS),
            request_timeout_ms: Some(DEFAULT_REQUEST_TIMEOUT_MS),
            proxy_base: Some(DEFAULT_PROXY_BASE.to_string()),
            locale: Some(Locale::default().to_string()),
            log_dir: Some(PathBuf::from(DEFAULT_LOG_DIR)),
            log_level: Some(DEFAULT_LOG_LEVEL.to_string()),
            ..Default::default()
        }
    }

    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR))
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// Validates the merged configuration into runtime settings.
    pub fn settings(&self) -> Result<DashboardSettings> {
        let locale = match self.locale.as_deref() {
            Some(tag) => tag.parse::<Locale>().map_err(|e| anyhow!(e))?,
            None => Locale::default(),
        };

        let settings = DashboardSettings::new(
            self.refresh_interval_ms.unwrap_or(DEFAULT_REFRESH_INTERVAL_MS),
            self.request_timeout_ms.unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS),
            self.proxy_base.clone().unwrap_or_else(|| DEFAULT_PROXY_BASE.to_string()),
            locale,
            self.endpoints.clone().unwrap_or_default(),
        )?;
        Ok(settings)
    }
}

fn default_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|dir| dir.join("market_dashboard").join("config.json"))
        .filter(|path| path.exists())
}

fn read_config_file(path: &Path) -> Result<DashboardConfig> {
    let config_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    serde_json::from_str::<DashboardConfig>(&config_str)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}

/// Defaults, then the config file, then environment and CLI.
pub fn load_config() -> Result<DashboardConfig> {
    // Env and CLI are parsed up front: they may point at another config file.
    let cli_args = DashboardConfig::parse();

    let mut current_config = DashboardConfig::defaults();

    let config_file_path = match &cli_args.config_path {
        Some(path) => Some(path.clone()),
        None => default_config_file(),
    };
    if let Some(path) = config_file_path {
        current_config = current_config.merge(read_config_file(&path)?);
    }

    Ok(current_config.merge(cli_args))
}
