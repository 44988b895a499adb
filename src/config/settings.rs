//! Settings sections of the inspector configuration
//!
//! # Main Types
//!
//! - [`LoggingSettings`] - Log filter and optional log file directory
//! - [`ClassifierSettings`] - Categories used by the default classifier
//! - [`OutputSettings`] - How the command line front end prints views

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default `tracing` filter when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "warn,replay_inspector=info";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directive string
    #[serde(default = "default_log_filter")]
    pub filter: String,

    /// Directory for a log file, in addition to stderr
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            directory: None,
        }
    }
}

/// Categories recognised by the default classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierSettings {
    /// Span categories treated as memory samples
    #[serde(default = "default_memory_categories")]
    pub memory_categories: Vec<String>,

    /// Breadcrumb categories treated as error signals
    #[serde(default = "default_error_categories")]
    pub error_categories: Vec<String>,
}

fn default_memory_categories() -> Vec<String> {
    vec!["memory".to_string()]
}

fn default_error_categories() -> Vec<String> {
    vec!["exception".to_string(), "issue".to_string()]
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            memory_categories: default_memory_categories(),
            error_categories: default_error_categories(),
        }
    }
}

/// Output options for the command line front end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Pretty-print JSON output
    #[serde(default = "default_true")]
    pub pretty: bool,
}

fn default_true() -> bool {
    true
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self { pretty: true }
    }
}
