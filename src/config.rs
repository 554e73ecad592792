use serde::Deserialize;
use std::path::PathBuf;

/// How the binary serves recommendations once the dataset is ready
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Read titles from stdin and print recommendations
    #[default]
    Interactive,
    /// Expose the HTTP API
    Serve,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// OMDb API key, only needed when the dataset has to be fetched
    #[serde(default)]
    pub api_key: Option<String>,

    /// OMDb API base URL
    #[serde(default = "default_omdb_api_url")]
    pub omdb_api_url: String,

    /// Location of the persisted movie dataset
    #[serde(default = "default_dataset_path")]
    pub dataset_path: PathBuf,

    /// Number of recommendations returned when the caller does not ask for a count
    #[serde(default = "default_recommendation_count")]
    pub recommendation_count: usize,

    /// Per-request timeout for metadata fetches
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    #[serde(default)]
    pub mode: RunMode,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_omdb_api_url() -> String {
    "http://www.omdbapi.com".to_string()
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("movies_dataset.json")
}

fn default_recommendation_count() -> usize {
    5
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Returns the API key or fails with a message pointing at the missing variable
    pub fn require_api_key(&self) -> anyhow::Result<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("API key not found in environment variables (API_KEY)"))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
