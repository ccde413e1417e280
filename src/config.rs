use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;

/// Instance used when no config file or override names one.
pub const DEFAULT_INSTANCE: &str = "https://yewtu.be";

/// Node configuration. Every field has a working default, so a missing
/// config file is not an error.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Base URL of the Invidious instance to query.
    pub instance: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            instance: DEFAULT_INSTANCE.to_string(),
            timeout_ms: 15_000,
            user_agent: concat!("ytnode/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl NodeConfig {
    /// Load from an explicit path, else the user config directory, else
    /// defaults. `YTNODE_INSTANCE` and `YTNODE_TIMEOUT_MS` override the
    /// file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => match default_config_path() {
                Some(p) if p.exists() => Self::from_file(&p)?,
                _ => Self::default(),
            },
        };
        if let Ok(v) = std::env::var("YTNODE_INSTANCE") {
            if !v.is_empty() {
                config.instance = v;
            }
        }
        if let Some(v) = std::env::var("YTNODE_TIMEOUT_MS").ok().and_then(|s| s.parse().ok()) {
            config.timeout_ms = v;
        }
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file: {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing config file: {}", path.display()))
    }
}

fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("dev", "ytnode", "ytnode").map(|d| d.config_dir().join("config.toml"))
}
