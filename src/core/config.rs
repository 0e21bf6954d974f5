//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.folio/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::state::{DEFAULT_MIN_QUERY_LEN, DEFAULT_SEARCH_QUERY};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub openlibrary: OpenLibraryConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub backend: Option<String>,
    pub default_query: Option<String>,
    pub debounce_ms: Option<u64>,
    pub min_query_len: Option<usize>,
    pub result_limit: Option<usize>,
    pub syllabus_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct OpenLibraryConfig {
    pub base_url: Option<String>,
    pub covers_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CatalogConfig {
    pub path: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BACKEND: &str = "openlibrary";
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;
pub const DEFAULT_RESULT_LIMIT: usize = 20;
pub const DEFAULT_OPENLIBRARY_BASE_URL: &str = "https://openlibrary.org";
pub const DEFAULT_COVERS_BASE_URL: &str = "https://covers.openlibrary.org";
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub backend: String,
    pub default_query: String,
    pub debounce_ms: u64,
    pub min_query_len: usize,
    pub result_limit: usize,
    pub syllabus_file: Option<PathBuf>,
    pub openlibrary_base_url: String,
    pub covers_base_url: String,
    pub timeout_secs: u64,
    pub catalog_path: Option<PathBuf>,
}

/// Values that came in on the command line. `None` = flag not given.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub backend: Option<String>,
    pub query: Option<String>,
    pub syllabus_file: Option<PathBuf>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.folio`.
pub fn folio_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".folio"))
}

/// Returns the path to `~/.folio/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    folio_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.folio/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `FolioConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<FolioConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(FolioConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<FolioConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(FolioConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: FolioConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Folio Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# backend = "openlibrary"            # "openlibrary" or "catalog"
# default_query = "Metagrappler"
# debounce_ms = 500
# min_query_len = 2
# result_limit = 20
# syllabus_file = "syllabus.toml"    # Path relative to ~/.folio/

# [openlibrary]
# base_url = "https://openlibrary.org"
# covers_url = "https://covers.openlibrary.org"
# timeout_secs = 20

# [catalog]
# path = "catalog.json"              # Offline catalog, relative to ~/.folio/
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &FolioConfig, cli: &CliOverrides) -> ResolvedConfig {
    let env = |key: &str| std::env::var(key).ok().filter(|v| !v.is_empty());

    // Backend: CLI → env → config → default
    let backend = cli
        .backend
        .clone()
        .or_else(|| env("FOLIO_BACKEND"))
        .or_else(|| config.general.backend.clone())
        .unwrap_or_else(|| DEFAULT_BACKEND.to_string());

    // Query: CLI → config → default
    let default_query = cli
        .query
        .clone()
        .or_else(|| config.general.default_query.clone())
        .unwrap_or_else(|| DEFAULT_SEARCH_QUERY.to_string());

    // Syllabus: CLI → env → config (relative to ~/.folio/) → bundled
    let syllabus_file = cli
        .syllabus_file
        .clone()
        .or_else(|| env("FOLIO_SYLLABUS").map(PathBuf::from))
        .or_else(|| config.general.syllabus_file.as_deref().map(relative_to_folio_dir));

    // Catalog: env → config (relative to ~/.folio/) → ~/.folio/catalog.json
    let catalog_path = env("FOLIO_CATALOG")
        .map(PathBuf::from)
        .or_else(|| config.catalog.path.as_deref().map(relative_to_folio_dir))
        .or_else(|| folio_dir().map(|d| d.join("catalog.json")));

    // Open Library base URL: env → config → default
    let openlibrary_base_url = env("OPENLIBRARY_BASE_URL")
        .or_else(|| config.openlibrary.base_url.clone())
        .unwrap_or_else(|| DEFAULT_OPENLIBRARY_BASE_URL.to_string());

    ResolvedConfig {
        backend,
        default_query,
        debounce_ms: config.general.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS),
        min_query_len: config.general.min_query_len.unwrap_or(DEFAULT_MIN_QUERY_LEN),
        result_limit: config.general.result_limit.unwrap_or(DEFAULT_RESULT_LIMIT),
        syllabus_file,
        openlibrary_base_url,
        covers_base_url: config
            .openlibrary
            .covers_url
            .clone()
            .unwrap_or_else(|| DEFAULT_COVERS_BASE_URL.to_string()),
        timeout_secs: config.openlibrary.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        catalog_path,
    }
}

/// Absolute paths pass through; relative ones hang off `~/.folio/`.
fn relative_to_folio_dir(file: &str) -> PathBuf {
    let path = PathBuf::from(file);
    if path.is_absolute() {
        return path;
    }
    match folio_dir() {
        Some(dir) => dir.join(path),
        None => path,
    }
}
