//! Configuration for shiksha.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (SHIKSHA_HOME, SHIKSHA_API_BASE_URL,
//!    SHIKSHA_LOGIN_URL, SHIKSHA_FRAMEWORK_ID)
//! 2. Config file (.shiksha/config.yaml)
//! 3. Defaults (~/.shiksha, http://localhost:3000)
//!
//! Config file discovery:
//! - Searches current directory and parents for .shiksha/config.yaml
//! - `paths.home` in the config file is relative to the .shiksha/ directory

pub mod paths;

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::StalePolicy;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_LOGIN_URL: &str = "/login";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub api: Option<ApiConfig>,
    #[serde(default)]
    pub login_url: Option<String>,
    #[serde(default)]
    pub pages: Option<PagesConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// State directory (relative to the .shiksha/ directory)
    pub home: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub framework_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PagesConfig {
    pub stale_results: Option<StalePolicy>,
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Absolute path to shiksha home (session and local state)
    pub home: PathBuf,
    /// Root of the content API
    pub api_base_url: String,
    /// Per-request timeout; `None` leaves requests unbounded
    pub request_timeout: Option<Duration>,
    /// Framework whose taxonomy feeds the filter panel
    pub framework_id: Option<String>,
    /// Where logout sends the user
    pub login_url: String,
    /// What pages do with superseded responses
    pub stale_results: StalePolicy,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl ResolvedConfig {
    /// Path of the stored session
    pub fn session_path(&self) -> PathBuf {
        self.home.join(paths::SESSION_FILE)
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(paths::CONFIG_DIR).join(paths::CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's parent
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Merge a parsed config file (if any) with env vars and defaults
fn resolve(file: Option<(&Path, ConfigFile)>, default_home: PathBuf) -> ResolvedConfig {
    let (config_file, config) = match file {
        Some((path, config)) => (Some(path.to_path_buf()), Some(config)),
        None => (None, None),
    };

    let home = if let Some(env_home) = env_var("SHIKSHA_HOME") {
        PathBuf::from(env_home)
    } else if let (Some(path), Some(home_path)) = (
        config_file.as_deref(),
        config.as_ref().and_then(|c| c.paths.home.as_deref()),
    ) {
        // home is relative to .shiksha/ directory
        let shiksha_dir = path.parent().unwrap_or(Path::new("."));
        resolve_path(shiksha_dir, home_path)
    } else {
        default_home
    };

    let api = config.as_ref().and_then(|c| c.api.clone());

    let api_base_url = env_var("SHIKSHA_API_BASE_URL")
        .or_else(|| api.as_ref().and_then(|a| a.base_url.clone()))
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

    let framework_id = env_var("SHIKSHA_FRAMEWORK_ID")
        .or_else(|| api.as_ref().and_then(|a| a.framework_id.clone()));

    let request_timeout = api
        .as_ref()
        .and_then(|a| a.timeout_seconds)
        .map(Duration::from_secs);

    let login_url = env_var("SHIKSHA_LOGIN_URL")
        .or_else(|| config.as_ref().and_then(|c| c.login_url.clone()))
        .unwrap_or_else(|| DEFAULT_LOGIN_URL.to_string());

    let stale_results = config
        .as_ref()
        .and_then(|c| c.pages.as_ref())
        .and_then(|p| p.stale_results)
        .unwrap_or_default();

    ResolvedConfig {
        home,
        api_base_url,
        request_timeout,
        framework_id,
        login_url,
        stale_results,
        config_file,
    }
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    // Default home directory
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".shiksha");

    match find_config_file() {
        Some(path) => {
            let config = load_config_file(&path)?;
            Ok(resolve(Some((path.as_path(), config)), default_home))
        }
        None => Ok(resolve(None, default_home)),
    }
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}
