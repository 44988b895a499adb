//! Tab resolution
//!
//! Turns a free-form navigation signal (a location fragment) into one of
//! the fixed [`ViewId`]s. Resolution is pure and total: anything that is
//! not exactly a known view name falls back to [`DEFAULT_VIEW`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::frontend::view_registry;

/// Separator that may prefix a navigation signal
const FRAGMENT_SEPARATOR: char = '#';

/// View shown when the signal names no known view
pub const DEFAULT_VIEW: ViewId = ViewId::Performance;

/// Identifier of an inspection view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewId {
    Console,
    Performance,
    Trace,
    Issues,
    Tags,
    Memory,
}

impl ViewId {
    /// Get all views in tab order
    pub fn all() -> &'static [ViewId] {
        &[
            ViewId::Console,
            ViewId::Performance,
            ViewId::Trace,
            ViewId::Issues,
            ViewId::Tags,
            ViewId::Memory,
        ]
    }

    /// Name used in navigation signals
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewId::Console => "console",
            ViewId::Performance => "performance",
            ViewId::Trace => "trace",
            ViewId::Issues => "issues",
            ViewId::Tags => "tags",
            ViewId::Memory => "memory",
        }
    }

    /// Fragment linking to this view, e.g. `#memory`
    pub fn fragment(&self) -> String {
        format!("{}{}", FRAGMENT_SEPARATOR, self.as_str())
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A string that is not a view name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownView(pub String);

impl fmt::Display for UnknownView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown view: {:?}", self.0)
    }
}

impl std::error::Error for UnknownView {}

impl FromStr for ViewId {
    type Err = UnknownView;

    /// Exact, case-sensitive match against view names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewId::all()
            .iter()
            .copied()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| UnknownView(s.to_string()))
    }
}

/// Resolve a navigation signal to a view
///
/// A single leading `#` is stripped; the remainder must be exactly a
/// view name, otherwise [`DEFAULT_VIEW`] is returned.
pub fn resolve_tab(signal: &str) -> ViewId {
    let name = signal.strip_prefix(FRAGMENT_SEPARATOR).unwrap_or(signal);
    match name.parse::<ViewId>() {
        Ok(view) => view,
        Err(unknown) => {
            if !unknown.0.is_empty() {
                tracing::debug!("{}, falling back to {}", unknown, DEFAULT_VIEW);
            }
            DEFAULT_VIEW
        }
    }
}

/// Extract the fragment of a location, including its `#`
///
/// Returns the input unchanged when it has no fragment, so a bare view
/// name passes straight through.
pub fn fragment_of(location: &str) -> &str {
    match location.find(FRAGMENT_SEPARATOR) {
        Some(idx) => &location[idx..],
        None => location,
    }
}

/// One entry of the tab strip
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabItem {
    pub view: ViewId,
    pub label: &'static str,
    pub href: String,
    pub active: bool,
}

/// Build the tab strip with `active` highlighted
pub fn focus_tabs(active: ViewId) -> Vec<TabItem> {
    ViewId::all()
        .iter()
        .map(|&view| TabItem {
            view,
            label: view_registry::info(view).display_name,
            href: view.fragment(),
            active: view == active,
        })
        .collect()
}
