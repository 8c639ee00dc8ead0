//! Application configuration for the pipeline showcase.
//!
//! User config lives at `~/.pipeline-showcase/showcase.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShowcaseError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "showcase.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".pipeline-showcase";

/// Conventional Snakefile locations, probed in this order.
pub const DEFAULT_CANDIDATES: [&str; 8] = [
    "Snakefile",
    "snakefile",
    "workflow/Snakefile",
    "workflow/snakefile",
    "workflows/Snakefile",
    "workflows/snakefile",
    "snakemake/Snakefile",
    "snakemake/snakefile",
];

// ---------------------------------------------------------------------------
// Config structs (matching showcase.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Hosting API settings.
    #[serde(default)]
    pub github: GitHubConfig,

    /// Snakefile probing policy.
    #[serde(default)]
    pub probe: ProbePolicyConfig,

    /// Page container ids and static data location.
    #[serde(default)]
    pub page: PageConfig,
}

/// `[github]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// Base URL of the hosting API.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Organization whose repositories are listed.
    #[serde(default = "default_org")]
    pub org: String,

    /// `per_page` value for the single listing request.
    #[serde(default = "default_max_repos")]
    pub max_repos: u32,

    /// Name of the env var holding an API token (never store the token itself).
    #[serde(default = "default_token_env")]
    pub token_env: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            org: default_org(),
            max_repos: default_max_repos(),
            token_env: default_token_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_api_base() -> String {
    "https://api.github.com".into()
}
fn default_org() -> String {
    "OpenOmics".into()
}
fn default_max_repos() -> u32 {
    100
}
fn default_token_env() -> String {
    "GITHUB_TOKEN".into()
}
fn default_timeout_secs() -> u64 {
    30
}

/// `[probe]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbePolicyConfig {
    /// Candidate Snakefile paths, in probe order.
    #[serde(default = "default_candidates")]
    pub candidates: Vec<String>,

    /// Pause after every N repositories.
    #[serde(default = "default_pause_every")]
    pub pause_every: usize,

    /// Length of each pause in ms.
    #[serde(default = "default_pause_ms")]
    pub pause_ms: u64,

    /// Repository names that are never probed or shown.
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for ProbePolicyConfig {
    fn default() -> Self {
        Self {
            candidates: default_candidates(),
            pause_every: default_pause_every(),
            pause_ms: default_pause_ms(),
            exclude: Vec::new(),
        }
    }
}

fn default_candidates() -> Vec<String> {
    DEFAULT_CANDIDATES.iter().map(|s| s.to_string()).collect()
}
fn default_pause_every() -> usize {
    5
}
fn default_pause_ms() -> u64 {
    1000
}

/// `[page]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    /// Element id the live discovery flow renders into.
    #[serde(default = "default_repos_container_id")]
    pub repos_container_id: String,

    /// Element id the static-data flow renders into.
    #[serde(default = "default_pipelines_container_id")]
    pub pipelines_container_id: String,

    /// Location of `pipelines-data.json`: an http(s) URL, or a path relative
    /// to the page's directory.
    #[serde(default = "default_pipelines_data")]
    pub pipelines_data: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            repos_container_id: default_repos_container_id(),
            pipelines_container_id: default_pipelines_container_id(),
            pipelines_data: default_pipelines_data(),
        }
    }
}

fn default_repos_container_id() -> String {
    "github-repos-container".into()
}
fn default_pipelines_container_id() -> String {
    "pipelines-container".into()
}
fn default_pipelines_data() -> String {
    "../pipelines-data.json".into()
}

// ---------------------------------------------------------------------------
// Runtime settings (derived from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime hosting API settings, with the token already resolved from the env.
#[derive(Debug, Clone)]
pub struct GitHubSettings {
    pub api_base: String,
    pub org: String,
    pub max_repos: u32,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl From<&AppConfig> for GitHubSettings {
    fn from(config: &AppConfig) -> Self {
        let gh = &config.github;
        let token = std::env::var(&gh.token_env)
            .ok()
            .filter(|val| !val.is_empty());
        Self {
            api_base: gh.api_base.trim_end_matches('/').to_string(),
            org: gh.org.clone(),
            max_repos: gh.max_repos,
            token,
            timeout: Duration::from_secs(gh.timeout_secs),
        }
    }
}

/// Runtime probing policy.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Candidate paths, in probe order.
    pub candidates: Vec<String>,
    /// Pause after every N repositories (0 disables pausing).
    pub pause_every: usize,
    /// Pause length.
    pub pause: Duration,
    /// Repository names to skip.
    pub exclude: Vec<String>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for ProbeConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            candidates: config.probe.candidates.clone(),
            pause_every: config.probe.pause_every,
            pause: Duration::from_millis(config.probe.pause_ms),
            exclude: config.probe.exclude.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.pipeline-showcase/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| ShowcaseError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.pipeline-showcase/showcase.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ShowcaseError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| ShowcaseError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| ShowcaseError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let content = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| ShowcaseError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| ShowcaseError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
