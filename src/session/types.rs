//! Session record types

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::{InspectorError, Result, ResultExt};
use crate::types::{Breadcrumb, Entry, EntryKind, PrimaryEvent, Span};

/// Identity of a constructed session record
///
/// Every call to [`SessionRecord::new`] gets a fresh id, so two records
/// with identical content still have distinct identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RecordId(pub u64);

static NEXT_RECORD_ID: AtomicU64 = AtomicU64::new(1);

impl RecordId {
    pub fn next() -> Self {
        Self(NEXT_RECORD_ID.fetch_add(1, Ordering::SeqCst))
    }
}

/// On-disk shape of a parsed recording
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecording {
    /// Primary event envelope
    pub event: PrimaryEvent,
    /// Entries in recording order
    #[serde(default)]
    pub entries: Vec<Entry>,
}

/// A fully parsed, immutable session replay
#[derive(Debug)]
pub struct SessionRecord {
    id: RecordId,
    event: Arc<PrimaryEvent>,
    entries: Vec<Entry>,
}

impl SessionRecord {
    /// Validate a parsed recording and give it a fresh identity
    ///
    /// Fails on spans whose interval is inverted or not finite. Duplicate
    /// entry kinds are accepted; lookups by kind return the first one.
    pub fn new(mut event: PrimaryEvent, entries: Vec<Entry>) -> Result<Self> {
        if !event.start_timestamp.is_finite() {
            return Err(InspectorError::MalformedRecord(format!(
                "event {} has a non-finite start timestamp",
                event.id
            )));
        }

        for (entry_index, entry) in entries.iter().enumerate() {
            for (index, span) in entry.as_spans().iter().enumerate() {
                if !span.is_well_formed() {
                    return Err(InspectorError::InvalidSpan {
                        entry: entry_index,
                        index,
                        start: span.start_time,
                        end: span.end_time,
                    });
                }
            }
        }

        for kind in EntryKind::all() {
            let count = entries.iter().filter(|e| e.kind() == Some(*kind)).count();
            if count > 1 {
                tracing::warn!(
                    "Recording {} has {} {} entries, only the first is used",
                    event.id,
                    count,
                    kind.as_str()
                );
            }
        }

        for entry in entries.iter().filter(|e| e.kind().is_none()) {
            tracing::debug!("Keeping unmodelled {} entry of event {}", entry.type_name(), event.id);
        }

        // entries belong to the record, not the event
        if event.extra.remove("entries").is_some() {
            tracing::debug!("Dropped entries embedded in event {}", event.id);
        }

        let id = RecordId::next();
        tracing::debug!("Constructed session record {:?} for event {}", id, event.id);

        Ok(Self {
            id,
            event: Arc::new(event),
            entries,
        })
    }

    /// Build a record from its on-disk shape
    pub fn from_raw(raw: RawRecording) -> Result<Self> {
        Self::new(raw.event, raw.entries)
    }

    /// Identity of this record
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// The primary event, shared by reference
    pub fn event(&self) -> &Arc<PrimaryEvent> {
        &self.event
    }

    /// All entries in recording order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// The first entry of a kind
    pub fn entry(&self, kind: EntryKind) -> Option<&Entry> {
        self.entries.iter().find(|e| e.kind() == Some(kind))
    }

    /// Every entry of a kind, in recording order
    pub fn entries_of_kind(&self, kind: EntryKind) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(move |e| e.kind() == Some(kind))
    }

    /// Spans of the spans entry (empty if there is none)
    pub fn spans(&self) -> &[Span] {
        self.entry(EntryKind::Spans)
            .map(Entry::as_spans)
            .unwrap_or(&[])
    }

    /// Breadcrumbs of the breadcrumbs entry (empty if there is none)
    pub fn breadcrumbs(&self) -> &[Breadcrumb] {
        self.entry(EntryKind::Breadcrumbs)
            .map(Entry::as_breadcrumbs)
            .unwrap_or(&[])
    }

    /// Whether the record has no entries at all
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Session length in milliseconds
    ///
    /// Uses the event end when present, otherwise the latest span end.
    pub fn duration_ms(&self) -> f64 {
        if let Some(ms) = self.event.duration_ms() {
            return ms;
        }

        self.spans()
            .iter()
            .map(|s| s.end_time)
            .fold(None, |acc: Option<f64>, end| Some(acc.map_or(end, |a| a.max(end))))
            .map(|end| ((end - self.event.start_timestamp) * 1000.0).max(0.0))
            .unwrap_or(0.0)
    }

    /// Snapshot back into the on-disk shape
    pub fn to_raw(&self) -> RawRecording {
        RawRecording {
            event: (*self.event).clone(),
            entries: self.entries.clone(),
        }
    }

    /// Save recording to a file (JSON format)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.to_raw())?;
        std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Load recording from a file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let raw: RawRecording = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        let record = Self::from_raw(raw)?;
        tracing::info!(
            "Loaded recording {} ({} entries) from {:?}",
            record.event.id,
            record.entries.len(),
            path
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Breadcrumb;
    use chrono::{TimeZone, Utc};

    fn crumb(category: &str) -> Breadcrumb {
        Breadcrumb::new(Utc.timestamp_opt(1_652_299_200, 0).unwrap(), category)
    }

    #[test]
    fn test_record_ids_are_unique() {
        let a = SessionRecord::new(PrimaryEvent::new("a", 0.0), Vec::new()).unwrap();
        let b = SessionRecord::new(PrimaryEvent::new("a", 0.0), Vec::new()).unwrap();
        assert_ne!(a.id(), b.id());
        assert!(b.id() > a.id());
    }

    #[test]
    fn test_inverted_span_rejected() {
        let entries = vec![Entry::Spans(vec![
            Span::new("resource.fetch", 1.0, 2.0),
            Span::new("memory", 5.0, 4.0),
        ])];
        let err = SessionRecord::new(PrimaryEvent::new("a", 0.0), entries).unwrap_err();
        assert!(matches!(err, InspectorError::InvalidSpan { entry: 0, index: 1, .. }));
    }

    #[test]
    fn test_non_finite_span_error_names_its_entry() {
        let entries = vec![
            Entry::breadcrumbs(vec![crumb("console")]),
            Entry::Spans(vec![Span::new("memory", f64::NAN, 2.0)]),
        ];
        let err = SessionRecord::new(PrimaryEvent::new("a", 0.0), entries).unwrap_err();

        assert!(matches!(err, InspectorError::InvalidSpan { entry: 1, index: 0, .. }));
        assert_eq!(
            err.to_string(),
            "Span 0 of entry 1 has an inverted or non-finite interval [NaN, 2]"
        );
    }

    #[test]
    fn test_unmodelled_entries_are_kept_but_not_looked_up() {
        let raw: RawRecording = serde_json::from_str(
            r#"{"event": {"id": "a", "startTimestamp": 0.0},
                "entries": [
                    {"type": "debugmeta", "data": {"images": []}},
                    {"type": "spans", "data": [{"startTime": 1.0, "endTime": 2.0, "category": "memory"}]},
                    {"type": "threads", "data": {"values": []}}
                ]}"#,
        )
        .unwrap();
        let record = SessionRecord::from_raw(raw).unwrap();

        assert_eq!(record.entries().len(), 3);
        assert_eq!(record.spans().len(), 1);
        assert!(record.entry(EntryKind::Tags).is_none());
        assert_eq!(record.to_raw().entries[2].type_name(), "threads");
    }

    #[test]
    fn test_first_entry_of_kind_wins() {
        let entries = vec![
            Entry::breadcrumbs(vec![crumb("console")]),
            Entry::breadcrumbs(vec![crumb("navigation"), crumb("ui.click")]),
        ];
        let record = SessionRecord::new(PrimaryEvent::new("a", 0.0), entries).unwrap();

        assert_eq!(record.breadcrumbs().len(), 1);
        assert_eq!(record.entries_of_kind(EntryKind::Breadcrumbs).count(), 2);
        assert!(record.spans().is_empty());
    }

    #[test]
    fn test_duration_from_spans() {
        let entries = vec![Entry::Spans(vec![
            Span::new("navigation", 10.0, 11.0),
            Span::new("memory", 10.5, 12.25),
        ])];
        let record = SessionRecord::new(PrimaryEvent::new("a", 10.0), entries).unwrap();
        assert_eq!(record.duration_ms(), 2250.0);

        let empty = SessionRecord::new(PrimaryEvent::new("b", 10.0), Vec::new()).unwrap();
        assert_eq!(empty.duration_ms(), 0.0);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("replay.json");

        let record = SessionRecord::new(
            PrimaryEvent::new("abc", 100.0).with_project_id("1"),
            vec![Entry::Spans(vec![Span::new("memory", 100.0, 100.0)])],
        )
        .unwrap();
        record.save_to_file(&path).unwrap();

        let loaded = SessionRecord::load_from_file(&path).unwrap();
        assert_ne!(loaded.id(), record.id());
        assert_eq!(loaded.event().as_ref(), record.event().as_ref());
        assert_eq!(loaded.entries(), record.entries());
    }

    #[test]
    fn test_embedded_event_entries_dropped() {
        let mut event = PrimaryEvent::new("a", 0.0);
        event
            .extra
            .insert("entries".to_string(), serde_json::json!([{"type": "spans"}]));
        event
            .extra
            .insert("platform".to_string(), serde_json::json!("javascript"));

        let record = SessionRecord::new(event, Vec::new()).unwrap();
        assert!(!record.event().extra.contains_key("entries"));
        assert!(record.event().extra.contains_key("platform"));
    }

    #[test]
    fn test_malformed_file_is_surfaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, r#"{"entries": []}"#).unwrap();

        let err = SessionRecord::load_from_file(&path).unwrap_err();
        assert!(err.is_malformed_record());
    }
}
