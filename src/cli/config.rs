use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "batch-actions",
    version,
    about = "Headless batch tree-action client for CMS admin endpoints"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// JSONL trace file path (tracing off when absent)
    #[arg(long, global = true)]
    pub trace: Option<String>,

    /// Path to config file (default: batch-actions.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the registered batch actions
    Actions,

    /// Ask the server which of the given pages an action applies to
    Check {
        /// Batch action URL (e.g. https://cms.example/admin/batch/publish)
        #[arg(long)]
        action: String,

        /// Comma-joined page identifiers
        #[arg(long)]
        ids: String,
    },

    /// Run a batch action against the selected pages
    Apply {
        /// Batch action URL
        #[arg(long)]
        action: String,

        /// Comma-joined page identifiers
        #[arg(long)]
        ids: String,

        /// Skip confirmation prompts (answer yes)
        #[arg(short, long, default_value_t = false)]
        yes: bool,

        /// Extra form field, key=value (repeatable)
        #[arg(long = "param")]
        params: Vec<String>,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `batch-actions.yaml`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub batch: BatchConfig,
    #[serde(default)]
    pub trace: TraceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Submit actions whose name has no registered callback (historical
    /// permissive fallback). Set false to reject them.
    #[serde(default = "default_true")]
    pub allow_unregistered_actions: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            allow_unregistered_actions: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TraceConfig {
    pub path: Option<String>,
}

// Serde default helpers
fn default_timeout_secs() -> u64 {
    crate::client::http::DEFAULT_TIMEOUT_SECS
}
fn default_true() -> bool {
    true
}

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("batch-actions.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => match serde_yaml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: malformed {}: {}", config_path, e);
                AppConfig::default()
            }
        },
        Err(_) => AppConfig::default(),
    }
}
