use anyhow::{Context, Result};
use chrono::Datelike;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::library::YearSpan;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct BabelConfig {
    pub server: ServerConfig,
    pub library: LibraryConfig,
    pub search: SearchConfig,
    pub enhanced: EnhancedConfig,
    pub rate_limit: RateLimitConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    /// A single allowed origin, or `*` for any.
    pub cors_origin: String,
    pub request_timeout_ms: u64,
}

/// `educational` serves procedural results only; `enhanced` makes the
/// external search the default for requests that name no mode.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LibraryMode {
    #[default]
    Educational,
    Enhanced,
}

impl LibraryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Educational => "educational",
            Self::Enhanced => "enhanced",
        }
    }
}

impl std::str::FromStr for LibraryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "educational" => Ok(Self::Educational),
            "enhanced" => Ok(Self::Enhanced),
            _ => Err(format!("unknown library mode: {s}")),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LibraryConfig {
    pub mode: LibraryMode,
    pub base_seed: String,
    pub earliest_year: u32,
    pub latest_year: u32,
    /// Optional TOML file replacing the built-in vocabulary. Empty means built-in.
    pub vocabulary_path: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    pub default_max_results: usize,
    pub max_results_ceiling: usize,
    pub probes_per_term: u32,
    pub neighbor_span: u32,
    pub max_candidates: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EnhancedConfig {
    pub enabled: bool,
    pub url: String,
    pub timeout_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub window_secs: u64,
    pub max_requests: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 3001,
            log_level: "info".into(),
            cors_origin: "*".into(),
            request_timeout_ms: 5000,
        }
    }
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            mode: LibraryMode::Educational,
            base_seed: "borges-1962".into(),
            earliest_year: 1850,
            latest_year: chrono::Utc::now().year().max(1850) as u32,
            vocabulary_path: String::new(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_max_results: 10,
            max_results_ceiling: 20,
            probes_per_term: 2,
            neighbor_span: 2,
            max_candidates: 160,
        }
    }
}

impl Default for EnhancedConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: String::new(),
            timeout_ms: 2000,
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            window_secs: 60,
            max_requests: 120,
        }
    }
}

/// Returns `~/.babel/`, or `./.babel/` when no home directory is known.
pub fn default_babel_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".babel")
}

/// Returns the default config file path: `~/.babel/config.toml`
pub fn default_config_path() -> PathBuf {
    default_babel_dir().join("config.toml")
}

impl BabelConfig {
    /// Load config from the default TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides and validate.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            BabelConfig::default()
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides (`BABEL_*`).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("BABEL_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("BABEL_PORT") {
            match val.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => warn!(value = %val, "ignoring unparseable BABEL_PORT"),
            }
        }
        if let Ok(val) = std::env::var("BABEL_LOG_LEVEL") {
            self.server.log_level = val;
        }
        if let Ok(val) = std::env::var("BABEL_CORS_ORIGIN") {
            self.server.cors_origin = val;
        }
        if let Ok(val) = std::env::var("BABEL_LIBRARY_MODE") {
            match val.parse() {
                Ok(mode) => self.library.mode = mode,
                Err(e) => warn!(error = %e, "ignoring BABEL_LIBRARY_MODE"),
            }
        }
        if let Ok(val) = std::env::var("BABEL_BASE_SEED") {
            self.library.base_seed = val;
        }
        if let Ok(val) = std::env::var("BABEL_ENHANCED_URL") {
            self.enhanced.url = val;
        }
        if let Ok(val) = std::env::var("BABEL_ENHANCED_ENABLED") {
            match val.parse() {
                Ok(enabled) => self.enhanced.enabled = enabled,
                Err(_) => warn!(value = %val, "ignoring unparseable BABEL_ENHANCED_ENABLED"),
            }
        }
    }

    /// Reject settings the server cannot run with.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            !self.library.base_seed.is_empty(),
            "library.base_seed must not be empty"
        );
        anyhow::ensure!(
            self.library.earliest_year <= self.library.latest_year,
            "library.earliest_year ({}) is after library.latest_year ({})",
            self.library.earliest_year,
            self.library.latest_year
        );
        anyhow::ensure!(
            self.server.request_timeout_ms > 0,
            "server.request_timeout_ms must be positive"
        );
        anyhow::ensure!(
            self.search.max_results_ceiling > 0,
            "search.max_results_ceiling must be positive"
        );
        anyhow::ensure!(
            (1..=self.search.max_results_ceiling).contains(&self.search.default_max_results),
            "search.default_max_results must be between 1 and max_results_ceiling ({})",
            self.search.max_results_ceiling
        );
        anyhow::ensure!(
            self.search.probes_per_term > 0,
            "search.probes_per_term must be positive"
        );
        anyhow::ensure!(
            self.search.max_candidates >= self.search.max_results_ceiling,
            "search.max_candidates must be at least max_results_ceiling"
        );
        anyhow::ensure!(
            !(self.enhanced.enabled && self.enhanced.url.is_empty()),
            "enhanced.enabled is set but enhanced.url is empty"
        );
        anyhow::ensure!(
            !self.rate_limit.enabled
                || (self.rate_limit.window_secs > 0 && self.rate_limit.max_requests > 0),
            "rate_limit window and ceiling must be positive when enabled"
        );
        Ok(())
    }

    pub fn year_span(&self) -> YearSpan {
        YearSpan {
            earliest: self.library.earliest_year,
            latest: self.library.latest_year,
        }
    }

    /// Resolve the vocabulary path, expanding `~` if needed.
    pub fn resolved_vocabulary_path(&self) -> Option<PathBuf> {
        if self.library.vocabulary_path.is_empty() {
            None
        } else {
            Some(expand_tilde(&self.library.vocabulary_path))
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
