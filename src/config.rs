use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Request settings for the scope export. The proxy config download only
/// uses `base_url`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_headers")]
    pub headers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_root_dir")]
    pub root_dir: String,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub root_dir: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
}

impl Config {
    pub fn default_path() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("scope-grabber/config.toml")
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(|p| p.to_path_buf())
            .unwrap_or_else(Self::default_path);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("failed reading config: {}", path.display()))?;
        let parsed: Self = toml::from_str(&data)
            .with_context(|| format!("failed parsing TOML config: {}", path.display()))?;
        Ok(parsed)
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(root_dir) = overrides.root_dir {
            self.output.root_dir = root_dir.to_string_lossy().into_owned();
        }
        if let Some(timeout_secs) = overrides.timeout_secs {
            self.http.timeout_secs = timeout_secs;
        }
    }

    pub fn write_template(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed creating config directory: {}", parent.display())
            })?;
        }
        let template = toml::to_string_pretty(&Self::default())
            .context("failed rendering config template")?;
        fs::write(path, template)
            .with_context(|| format!("failed writing config template: {}", path.display()))
    }

    pub fn resolved_root_dir(&self) -> PathBuf {
        expand_tilde(&self.output.root_dir)
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            headers: default_headers(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
        }
    }
}

fn default_base_url() -> String {
    "https://hackerone.com".to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:99.0) Gecko/20100101 Firefox/99.0".to_string()
}

fn default_headers() -> BTreeMap<String, String> {
    [
        ("Accept", "text/html"),
        ("Accept-Language", "en-GB,en"),
        ("Access-Control-Allow-Origin", "*"),
        ("Access-Control-Allow-Methods", "GET"),
        ("Access-Control-Allow-Headers", "Content-Type"),
        ("Access-Control-Max-Age", "3600"),
        ("DNT", "1"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn default_root_dir() -> String {
    ".".to_string()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use crate::config::{Config, ConfigOverrides};

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = Config::load(Some(&dir.path().join("absent.toml"))).expect("load defaults");
        assert_eq!(config.http.base_url, "https://hackerone.com");
        assert_eq!(config.http.timeout(), Duration::from_secs(5));
        assert_eq!(config.http.headers.get("DNT").map(String::as_str), Some("1"));
        assert_eq!(config.resolved_root_dir(), PathBuf::from("."));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[http]\ntimeout_secs = 12\n").expect("write config");
        let config = Config::load(Some(&path)).expect("load config");
        assert_eq!(config.http.timeout_secs, 12);
        assert!(config.http.user_agent.starts_with("Mozilla/5.0"));
        assert_eq!(config.output.root_dir, ".");
    }

    #[test]
    fn template_round_trips() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested/config.toml");
        Config::write_template(&path).expect("write template");
        let config = Config::load(Some(&path)).expect("load template");
        assert_eq!(config.http.headers.len(), 7);
        assert_eq!(
            config
                .http
                .headers
                .get("Access-Control-Allow-Methods")
                .map(String::as_str),
            Some("GET")
        );
        assert_eq!(config.http.timeout_secs, 5);
    }

    #[test]
    fn cli_overrides_win() {
        let mut config = Config::default();
        config.apply_overrides(ConfigOverrides {
            root_dir: Some(PathBuf::from("/tmp/recon")),
            timeout_secs: Some(0),
        });
        assert_eq!(config.resolved_root_dir(), PathBuf::from("/tmp/recon"));
        // zero is clamped when building the client timeout
        assert_eq!(config.http.timeout(), Duration::from_secs(1));
    }
}
