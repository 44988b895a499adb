//! Frontend module for the inspection panel
//!
//! This module turns a navigation signal and a session record into the
//! payload of the view to render.
//!
//! # Architecture
//!
//! ```text
//! navigation signal → tabs::resolve_tab → ViewId
//!                                          ↓
//! SessionRecord ─────────→ ViewPartitioner::partition → ViewData
//!                                          ↓
//! PlaybackCursor (read) ─→ ViewDispatcher → ResolvedView
//! ```
//!
//! # Submodules
//!
//! - [`tabs`] - Tab resolution and the tab strip
//! - [`view_registry`] - Per-view labels, anchors and cursor usage
//! - [`views`] - Per-view data slices
//! - [`partition`] - Record → view data, with the memory-span cache
//! - [`dispatcher`] - Resolution + partitioning + cursor snapshot

pub mod dispatcher;
pub mod partition;
pub mod tabs;
pub mod view_registry;
pub mod views;

pub use dispatcher::{ResolvedView, ViewDispatcher};
pub use partition::ViewPartitioner;
pub use tabs::{focus_tabs, fragment_of, resolve_tab, TabItem, ViewId, DEFAULT_VIEW};
pub use views::{IssuesKey, MemoryView, PerformanceEvent, PerformanceView, ViewData};
