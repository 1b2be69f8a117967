//! Configuration management with TOML, environment variables, and CLI overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site root that listing and detail paths are joined onto
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Brand path segment used in listing URLs
    #[serde(default = "default_brand")]
    pub brand: String,

    /// Collections to sweep
    #[serde(default = "default_collections")]
    pub collections: Vec<String>,

    /// Listing pages visited per collection, starting at 1
    #[serde(default = "default_pages_per_collection")]
    pub pages_per_collection: u32,

    /// Path fragment that marks a product detail link
    #[serde(default = "default_item_marker")]
    pub item_marker: String,

    /// Fixed wait after each listing navigation so the page can render
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Run the browser without a window
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Chrome/Chromium binary; auto-detected when unset
    #[serde(default)]
    pub chrome_executable: Option<PathBuf>,

    /// Proxy URL for detail-page requests (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Detail-page request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Directory the result table is written into
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// File name of the result table
    #[serde(default = "default_output_file")]
    pub output_file: String,

    /// Output format for printed records
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_base_url() -> String {
    "https://www.watchfinder.com".to_string()
}

fn default_brand() -> String {
    "Tag Heuer".to_string()
}

fn default_collections() -> Vec<String> {
    ["Carrera", "Monaco", "Aquaracer", "F1", "Link", "Autavia"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_pages_per_collection() -> u32 {
    5
}

fn default_item_marker() -> String {
    "/item/".to_string()
}

fn default_settle_delay_ms() -> u64 {
    2000
}

fn default_headless() -> bool {
    true
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("scraper_output")
}

fn default_output_file() -> String {
    "watchfinder_scraping_results.csv".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            brand: default_brand(),
            collections: default_collections(),
            pages_per_collection: default_pages_per_collection(),
            item_marker: default_item_marker(),
            settle_delay_ms: default_settle_delay_ms(),
            headless: default_headless(),
            chrome_executable: None,
            proxy: None,
            request_timeout_secs: default_request_timeout_secs(),
            output_dir: default_output_dir(),
            output_file: default_output_file(),
            format: OutputFormat::Table,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("watchfinder-scraper").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(proxy) = std::env::var("WATCHFINDER_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Ok(pages) = std::env::var("WATCHFINDER_PAGES") {
            if let Ok(p) = pages.parse() {
                self.pages_per_collection = p;
            }
        }

        if let Ok(dir) = std::env::var("WATCHFINDER_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(dir);
        }

        if let Ok(chrome) = std::env::var("WATCHFINDER_CHROME") {
            self.chrome_executable = Some(PathBuf::from(chrome));
        }

        self
    }

    /// Full path of the result table.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_file)
    }
}

/// Output format for printed records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: table, json, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
