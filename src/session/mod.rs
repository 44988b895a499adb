//! Session record and playback cursor
//!
//! This module holds the parsed session replay and the shared timeline
//! position that time-aligned views read and update.
//!
//! # Features
//!
//! - Immutable [`SessionRecord`] with a per-construction identity
//! - Lookups of entries by kind (first entry of a kind wins)
//! - JSON load/save of recordings
//! - A single-writer [`PlaybackCursor`] with an update protocol

pub mod cursor;
pub mod types;

pub use cursor::{CursorState, CursorUpdate, PlaybackCursor};
pub use types::{RawRecording, RecordId, SessionRecord};
