//! Core data types for the replay inspector
//!
//! This module contains the fundamental records that make up a parsed
//! session replay. They are produced by an upstream reader and never
//! mutated by the inspector.
//!
//! # Main Types
//!
//! - [`Span`] - A timestamped interval (network call, memory sample, ...)
//! - [`Breadcrumb`] - A point-in-time record (console log, navigation, error)
//! - [`Entry`] - A kind-tagged container for one category of recorded data
//! - [`PrimaryEvent`] - The metadata envelope for the whole session
//!
//! # Time units
//!
//! Span and event timestamps are Unix seconds as `f64`, matching the
//! upstream event schema. Breadcrumb timestamps are RFC 3339 date-times.
//! The playback cursor works in milliseconds relative to
//! [`PrimaryEvent::start_timestamp`].

use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// A timestamped interval recorded during the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Span {
    /// Interval start (Unix seconds)
    pub start_time: f64,
    /// Interval end (Unix seconds), never before `start_time`
    pub end_time: f64,
    /// Span category, e.g. `"resource.fetch"` or `"memory"`
    pub category: String,
    /// Optional human readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category specific payload
    #[serde(default)]
    pub data: Value,
}

impl Span {
    /// Create a span with an empty payload
    pub fn new(category: impl Into<String>, start_time: f64, end_time: f64) -> Self {
        Self {
            start_time,
            end_time,
            category: category.into(),
            description: None,
            data: Value::Null,
        }
    }

    /// Set the payload
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Length of the interval in seconds
    pub fn duration_secs(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Whether the interval is well formed (finite and not inverted)
    pub fn is_well_formed(&self) -> bool {
        self.start_time.is_finite() && self.end_time.is_finite() && self.start_time <= self.end_time
    }
}

/// Severity of a breadcrumb
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "&'static str")]
pub enum BreadcrumbLevel {
    Fatal,
    Error,
    Warning,
    #[default]
    Info,
    Debug,
    /// Any level string the inspector does not recognise
    Unknown,
}

impl BreadcrumbLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            BreadcrumbLevel::Fatal => "fatal",
            BreadcrumbLevel::Error => "error",
            BreadcrumbLevel::Warning => "warning",
            BreadcrumbLevel::Info => "info",
            BreadcrumbLevel::Debug => "debug",
            BreadcrumbLevel::Unknown => "unknown",
        }
    }

    /// Whether this level denotes a failure
    pub fn is_failure(&self) -> bool {
        matches!(self, BreadcrumbLevel::Fatal | BreadcrumbLevel::Error)
    }
}

impl From<String> for BreadcrumbLevel {
    fn from(value: String) -> Self {
        match value.as_str() {
            "fatal" | "critical" => BreadcrumbLevel::Fatal,
            "error" => BreadcrumbLevel::Error,
            "warning" | "warn" => BreadcrumbLevel::Warning,
            "info" | "log" => BreadcrumbLevel::Info,
            "debug" => BreadcrumbLevel::Debug,
            _ => BreadcrumbLevel::Unknown,
        }
    }
}

impl From<Option<String>> for BreadcrumbLevel {
    fn from(value: Option<String>) -> Self {
        value.map(Self::from).unwrap_or_default()
    }
}

impl From<BreadcrumbLevel> for &'static str {
    fn from(level: BreadcrumbLevel) -> Self {
        level.as_str()
    }
}

/// A discrete point-in-time record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breadcrumb {
    /// When the breadcrumb was recorded
    pub timestamp: DateTime<Utc>,
    /// Breadcrumb type as reported by the SDK (`"default"`, `"error"`, `"http"`, ...)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub crumb_type: Option<String>,
    /// Category, e.g. `"console"`, `"navigation"`, `"xhr"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Severity
    #[serde(default)]
    pub level: BreadcrumbLevel,
    /// Free-form message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Category specific payload
    #[serde(default)]
    pub data: Value,
}

impl Breadcrumb {
    /// Create an info-level breadcrumb in the given category
    pub fn new(timestamp: DateTime<Utc>, category: impl Into<String>) -> Self {
        Self {
            timestamp,
            crumb_type: None,
            category: Some(category.into()),
            level: BreadcrumbLevel::Info,
            message: None,
            data: Value::Null,
        }
    }

    /// Set the level
    pub fn with_level(mut self, level: BreadcrumbLevel) -> Self {
        self.level = level;
        self
    }

    /// Set the SDK type
    pub fn with_type(mut self, crumb_type: impl Into<String>) -> Self {
        self.crumb_type = Some(crumb_type.into());
        self
    }

    /// Set the message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Category as a string slice, if present
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

/// A single key/value tag on the event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Payload of a breadcrumbs entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BreadcrumbValues {
    pub values: Vec<Breadcrumb>,
}

/// Entry kinds the inspector interprets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Spans,
    Breadcrumbs,
    Tags,
    Request,
    Exception,
    Message,
}

impl EntryKind {
    /// Get all entry kinds
    pub fn all() -> &'static [EntryKind] {
        &[
            EntryKind::Spans,
            EntryKind::Breadcrumbs,
            EntryKind::Tags,
            EntryKind::Request,
            EntryKind::Exception,
            EntryKind::Message,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Spans => "spans",
            EntryKind::Breadcrumbs => "breadcrumbs",
            EntryKind::Tags => "tags",
            EntryKind::Request => "request",
            EntryKind::Exception => "exception",
            EntryKind::Message => "message",
        }
    }
}

/// A typed container for one category of recorded data
///
/// Serialized as `{ "type": "<kind>", "data": <payload> }`. Kinds the
/// inspector does not model are kept verbatim in [`Entry::Other`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawEntry")]
pub enum Entry {
    Spans(Vec<Span>),
    Breadcrumbs(BreadcrumbValues),
    Tags(Vec<Tag>),
    Request(Value),
    Exception(Value),
    Message(Value),
    /// An entry of a kind outside [`EntryKind`] (`debugmeta`, `threads`, ...)
    Other { kind: String, data: Value },
}

/// Wire shape of an entry before its payload is interpreted
#[derive(Deserialize)]
struct RawEntry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: Value,
}

impl TryFrom<RawEntry> for Entry {
    type Error = serde_json::Error;

    fn try_from(raw: RawEntry) -> std::result::Result<Self, Self::Error> {
        let entry = match raw.kind.as_str() {
            "spans" => Entry::Spans(serde_json::from_value(raw.data)?),
            "breadcrumbs" => Entry::Breadcrumbs(serde_json::from_value(raw.data)?),
            "tags" => Entry::Tags(serde_json::from_value(raw.data)?),
            "request" => Entry::Request(raw.data),
            "exception" => Entry::Exception(raw.data),
            "message" => Entry::Message(raw.data),
            _ => Entry::Other {
                kind: raw.kind,
                data: raw.data,
            },
        };
        Ok(entry)
    }
}

impl Serialize for Entry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Entry", 2)?;
        state.serialize_field("type", self.type_name())?;
        match self {
            Entry::Spans(spans) => state.serialize_field("data", spans)?,
            Entry::Breadcrumbs(crumbs) => state.serialize_field("data", crumbs)?,
            Entry::Tags(tags) => state.serialize_field("data", tags)?,
            Entry::Request(data)
            | Entry::Exception(data)
            | Entry::Message(data)
            | Entry::Other { data, .. } => state.serialize_field("data", data)?,
        }
        state.end()
    }
}

impl Entry {
    /// The kind of this entry, `None` for unmodelled kinds
    pub fn kind(&self) -> Option<EntryKind> {
        match self {
            Entry::Spans(_) => Some(EntryKind::Spans),
            Entry::Breadcrumbs(_) => Some(EntryKind::Breadcrumbs),
            Entry::Tags(_) => Some(EntryKind::Tags),
            Entry::Request(_) => Some(EntryKind::Request),
            Entry::Exception(_) => Some(EntryKind::Exception),
            Entry::Message(_) => Some(EntryKind::Message),
            Entry::Other { .. } => None,
        }
    }

    /// The `type` string this entry is serialized with
    pub fn type_name(&self) -> &str {
        match self {
            Entry::Other { kind, .. } => kind,
            _ => self.kind().map(|k| k.as_str()).unwrap_or_default(),
        }
    }

    /// Build a breadcrumbs entry from a list of breadcrumbs
    pub fn breadcrumbs(values: Vec<Breadcrumb>) -> Self {
        Entry::Breadcrumbs(BreadcrumbValues { values })
    }

    /// Spans carried by this entry (empty for other kinds)
    pub fn as_spans(&self) -> &[Span] {
        match self {
            Entry::Spans(spans) => spans,
            _ => &[],
        }
    }

    /// Breadcrumbs carried by this entry (empty for other kinds)
    pub fn as_breadcrumbs(&self) -> &[Breadcrumb] {
        match self {
            Entry::Breadcrumbs(crumbs) => &crumbs.values,
            _ => &[],
        }
    }
}

/// Metadata envelope for the recorded session
///
/// Fields the inspector does not interpret are kept in `extra` so that
/// views passing the event through see everything the reader produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryEvent {
    /// Replay/event identifier
    pub id: String,
    /// Numeric project identifier, as a string
    #[serde(rename = "projectID", default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// Project slug
    #[serde(rename = "projectSlug", default, skip_serializing_if = "Option::is_none")]
    pub project_slug: Option<String>,
    /// Legacy project name field
    #[serde(rename = "project.name", default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    /// Session start (Unix seconds); origin of the playback timeline
    #[serde(rename = "startTimestamp")]
    pub start_timestamp: f64,
    /// Session end (Unix seconds)
    #[serde(rename = "endTimestamp", default, skip_serializing_if = "Option::is_none")]
    pub end_timestamp: Option<f64>,
    /// Event tags
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Uninterpreted fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PrimaryEvent {
    /// Create an event with only the required fields set
    pub fn new(id: impl Into<String>, start_timestamp: f64) -> Self {
        Self {
            id: id.into(),
            project_id: None,
            project_slug: None,
            project_name: None,
            start_timestamp,
            end_timestamp: None,
            tags: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn with_project_slug(mut self, slug: impl Into<String>) -> Self {
        self.project_slug = Some(slug.into());
        self
    }

    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = Some(name.into());
        self
    }

    pub fn with_end_timestamp(mut self, end: f64) -> Self {
        self.end_timestamp = Some(end);
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push(Tag::new(key, value));
        self
    }

    /// Project slug, falling back to the legacy `project.name` field
    pub fn project_slug_or_name(&self) -> Option<&str> {
        self.project_slug
            .as_deref()
            .or(self.project_name.as_deref())
    }

    /// Project identifier, falling back to the legacy `project.name` field
    pub fn project_id_or_name(&self) -> Option<&str> {
        self.project_id.as_deref().or(self.project_name.as_deref())
    }

    /// Session length in milliseconds, when the end is known
    pub fn duration_ms(&self) -> Option<f64> {
        self.end_timestamp
            .map(|end| ((end - self.start_timestamp) * 1000.0).max(0.0))
    }
}
