//! Error handling for the replay inspector
//!
//! This module defines custom error types and a Result alias for use
//! throughout the crate. Only ingestion and configuration I/O can fail;
//! tab resolution, classification and partitioning are total.

use thiserror::Error;

/// Main error type for replay inspector operations
#[derive(Error, Debug)]
pub enum InspectorError {
    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// A recording that does not have the shape the core expects
    #[error("Malformed session record: {0}")]
    MalformedRecord(String),

    /// A span whose interval is inverted or not finite
    ///
    /// `entry` is the position in the record, `index` the position within that entry.
    #[error("Span {index} of entry {entry} has an inverted or non-finite interval [{start}, {end}]")]
    InvalidSpan {
        entry: usize,
        index: usize,
        start: f64,
        end: f64,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parse errors
    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<InspectorError>,
    },
}

impl InspectorError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        InspectorError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Whether this error (or the error it wraps) came from malformed recording data
    pub fn is_malformed_record(&self) -> bool {
        match self {
            InspectorError::MalformedRecord(_)
            | InspectorError::InvalidSpan { .. }
            | InspectorError::Json(_) => true,
            InspectorError::WithContext { source, .. } => source.is_malformed_record(),
            _ => false,
        }
    }
}

/// Result type alias for replay inspector operations
pub type Result<T> = std::result::Result<T, InspectorError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<InspectorError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.into().with_context(f()))
    }
}
