//! Per-view data slices
//!
//! Each view receives exactly one of these payloads and nothing else; a
//! view never reaches back into the [`SessionRecord`](crate::session::SessionRecord).

use serde::Serialize;
use std::sync::Arc;

use crate::frontend::tabs::ViewId;
use crate::session::CursorUpdate;
use crate::types::{Breadcrumb, Entry, PrimaryEvent, Span};

/// The data slice for one view
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ViewData {
    /// Console and error breadcrumbs, in recording order
    Console(Vec<Breadcrumb>),
    Performance(PerformanceView),
    /// The primary event, shared with the record
    Trace(Arc<PrimaryEvent>),
    Issues(IssuesKey),
    /// The primary event, shared with the record
    Tags(Arc<PrimaryEvent>),
    Memory(MemoryView),
}

impl ViewData {
    /// Which view this payload belongs to
    pub fn view(&self) -> ViewId {
        match self {
            ViewData::Console(_) => ViewId::Console,
            ViewData::Performance(_) => ViewId::Performance,
            ViewData::Trace(_) => ViewId::Trace,
            ViewData::Issues(_) => ViewId::Issues,
            ViewData::Tags(_) => ViewId::Tags,
            ViewData::Memory(_) => ViewId::Memory,
        }
    }

    /// Whether the view has nothing to show
    pub fn is_empty(&self) -> bool {
        match self {
            ViewData::Console(crumbs) => crumbs.is_empty(),
            ViewData::Performance(perf) => perf.spans().is_empty(),
            ViewData::Memory(memory) => memory.spans.is_empty(),
            ViewData::Trace(_) | ViewData::Issues(_) | ViewData::Tags(_) => false,
        }
    }
}

/// The primary event with its entries replaced
///
/// The base event is shared, not copied; only the entry list is new.
#[derive(Debug, Clone, Serialize)]
pub struct PerformanceEvent {
    #[serde(flatten)]
    base: Arc<PrimaryEvent>,
    entries: Vec<Entry>,
}

impl PerformanceEvent {
    pub fn new(base: Arc<PrimaryEvent>, entries: Vec<Entry>) -> Self {
        Self { base, entries }
    }

    /// The underlying event
    pub fn event(&self) -> &Arc<PrimaryEvent> {
        &self.base
    }

    /// Replacement entries
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }
}

/// Data for the performance view
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceView {
    /// Event whose only entry is the filtered spans entry
    pub event: PerformanceEvent,
    /// Project slug, falling back to `project.name`
    pub project_slug: Option<String>,
}

impl PerformanceView {
    /// The filtered spans entry, if the record had one
    pub fn entry(&self) -> Option<&Entry> {
        self.event.entries().first()
    }

    /// Non-memory spans
    pub fn spans(&self) -> &[Span] {
        self.entry().map(Entry::as_spans).unwrap_or(&[])
    }
}

/// Keys the issues view needs to look up related issues
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuesKey {
    pub replay_id: String,
    pub project_id: Option<String>,
}

/// Data for the memory chart
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryView {
    /// Memory spans; the same allocation is reused while the record is unchanged
    pub spans: Arc<[Span]>,
    /// Playhead in ms from session start
    pub current_time: f64,
    /// Hover position in ms from session start
    pub current_hover_time: Option<f64>,
    /// Timeline origin (Unix seconds)
    pub start_timestamp: f64,
}

impl MemoryView {
    /// Offset of a span's start on the cursor timeline, in ms
    pub fn offset_ms(&self, span: &Span) -> f64 {
        (span.start_time - self.start_timestamp) * 1000.0
    }

    /// Request moving the playhead
    pub fn seek(&self, time_ms: f64) -> CursorUpdate {
        CursorUpdate::Seek(time_ms)
    }

    /// Request moving the playhead to the start of a sample
    pub fn seek_to_span(&self, index: usize) -> Option<CursorUpdate> {
        self.spans.get(index).map(|span| self.seek(self.offset_ms(span)))
    }

    /// Request setting or clearing the hover position
    pub fn hover(&self, time_ms: Option<f64>) -> CursorUpdate {
        CursorUpdate::Hover(time_ms)
    }

    /// Index of the last sample starting at or before the hover position
    pub fn hovered_span(&self) -> Option<usize> {
        let hover = self.current_hover_time?;
        let idx = self.spans.partition_point(|s| self.offset_ms(s) <= hover);
        idx.checked_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_view() -> MemoryView {
        MemoryView {
            spans: Arc::from(vec![
                Span::new("memory", 100.0, 100.0),
                Span::new("memory", 105.0, 105.0),
                Span::new("memory", 110.0, 110.0),
            ]),
            current_time: 0.0,
            current_hover_time: None,
            start_timestamp: 100.0,
        }
    }

    #[test]
    fn test_memory_offsets_and_updates() {
        let view = memory_view();
        assert_eq!(view.offset_ms(&view.spans[1]), 5000.0);
        assert_eq!(view.seek_to_span(2), Some(CursorUpdate::Seek(10_000.0)));
        assert_eq!(view.seek_to_span(3), None);
        assert_eq!(view.hover(None), CursorUpdate::Hover(None));
    }

    #[test]
    fn test_hovered_span() {
        let mut view = memory_view();
        assert_eq!(view.hovered_span(), None);

        view.current_hover_time = Some(6000.0);
        assert_eq!(view.hovered_span(), Some(1));

        view.current_hover_time = Some(0.0);
        assert_eq!(view.hovered_span(), Some(0));
    }

    #[test]
    fn test_performance_serializes_flattened_event() {
        let event = Arc::new(PrimaryEvent::new("abc", 1.0).with_project_slug("web"));
        let view = PerformanceView {
            event: PerformanceEvent::new(event, vec![Entry::Spans(Vec::new())]),
            project_slug: Some("web".into()),
        };

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["event"]["id"], "abc");
        assert_eq!(json["event"]["entries"][0]["type"], "spans");
        assert_eq!(json["projectSlug"], "web");
        assert!(view.spans().is_empty());
    }
}
