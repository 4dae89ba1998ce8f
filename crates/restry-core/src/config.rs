use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// libcurl transport parameters (optional section in config.toml).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
    /// Follow HTTP redirects.
    pub follow_redirects: bool,
    /// Headers sent with every request (per-request headers win).
    #[serde(default)]
    pub default_headers: HashMap<String, String>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 30,
            follow_redirects: true,
            default_headers: HashMap::new(),
        }
    }
}

/// Client configuration loaded from `~/.config/restry/config.toml`.
///
/// Built once at startup and shared read-only; the `with_*` setters return
/// an updated copy instead of patching a shared value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestConfig {
    /// Prefix joined onto request URLs that don't already start with it.
    pub url_prefix: String,
    /// Retry a 500/503 while the collision counter is `<= max_retries`.
    pub max_retries: u32,
    /// Upper bound on a single backoff delay, in milliseconds.
    pub max_delay_between_retries_ms: u64,
    /// Optional transport section; if missing, built-in defaults are used.
    #[serde(default)]
    pub transport: Option<TransportConfig>,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            url_prefix: String::new(),
            max_retries: 3,
            max_delay_between_retries_ms: 4000,
            transport: None,
        }
    }
}

impl RestConfig {
    pub fn with_url_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.url_prefix = prefix.into();
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_max_delay_between_retries(mut self, delay: Duration) -> Self {
        self.max_delay_between_retries_ms = delay.as_millis().min(u64::MAX as u128) as u64;
        self
    }

    pub fn max_delay_between_retries(&self) -> Duration {
        Duration::from_millis(self.max_delay_between_retries_ms)
    }

    pub fn transport_or_default(&self) -> TransportConfig {
        self.transport.clone().unwrap_or_default()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("restry")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<RestConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = RestConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from_path(&path)
}

/// Load configuration from an explicit file.
pub fn load_from_path(path: &Path) -> Result<RestConfig> {
    let data = fs::read_to_string(path)?;
    let cfg: RestConfig = toml::from_str(&data)?;
    Ok(cfg)
}
