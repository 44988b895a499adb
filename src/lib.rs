//! # Replay Inspector: session replay inspection panel
//!
//! Given an already parsed session replay (timestamped spans, breadcrumbs
//! and a primary event), the inspector resolves which inspection view is
//! active, carves out exactly the data slice that view needs, and keeps a
//! shared playback cursor consistent across views.
//!
//! ## Architecture
//!
//! - **Session**: the immutable [`SessionRecord`] and the shared [`PlaybackCursor`]
//! - **Analysis**: pure span/breadcrumb classifiers
//! - **Frontend**: tab resolution, view partitioning and dispatch
//! - **App**: [`InspectorApp`], the event-driven panel tying them together
//!
//! Everything runs synchronously on the caller's thread; cursor writes are
//! serialized by handling one [`PanelAction`] at a time.
//!
//! ## Example
//!
//! ```ignore
//! use replay_inspector::{InspectorApp, PanelAction, SessionRecord};
//! use replay_inspector::session::CursorUpdate;
//!
//! let record = SessionRecord::load_from_file("replay.json".as_ref())?;
//! let mut app = InspectorApp::with_default_classifier(record, "#memory");
//!
//! // the memory chart reports a hover
//! app.handle_action(PanelAction::Cursor(CursorUpdate::Hover(Some(1200.0))));
//!
//! // the location fragment changed
//! let view = app.handle_action(PanelAction::Navigate("#console".into()));
//! println!("{}", serde_json::to_string_pretty(view)?);
//! ```

pub mod analysis;
pub mod app;
pub mod config;
pub mod error;
pub mod frontend;
pub mod session;
pub mod types;

// Re-export commonly used types
pub use app::{InspectorApp, PanelAction};
pub use config::InspectorConfig;
pub use error::{InspectorError, Result};
pub use frontend::{resolve_tab, ResolvedView, ViewData, ViewDispatcher, ViewId};
pub use session::{PlaybackCursor, SessionRecord};
