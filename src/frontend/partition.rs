//! View partitioning
//!
//! Maps a session record and a view id to the minimal data slice that view
//! needs. The memory view's span list is cached by record identity so that
//! repeated partitioning of the same record hands back the same allocation;
//! the chart keeps its hover state as long as that allocation does not change.

use std::sync::Arc;

use crate::analysis::{DefaultClassifier, EntryClassifier};
use crate::frontend::tabs::ViewId;
use crate::frontend::views::{IssuesKey, MemoryView, PerformanceEvent, PerformanceView, ViewData};
use crate::session::{CursorState, RecordId, SessionRecord};
use crate::types::{Breadcrumb, Entry, EntryKind, Span};

/// Breadcrumb category shown in the console view
const CONSOLE_CATEGORY: &str = "console";

/// Memory spans computed for one record
#[derive(Debug)]
struct MemoryCache {
    record: RecordId,
    spans: Arc<[Span]>,
}

/// Produces per-view data slices from a session record
#[derive(Debug)]
pub struct ViewPartitioner<C = DefaultClassifier> {
    classifier: C,
    memory_cache: Option<MemoryCache>,
}

impl Default for ViewPartitioner<DefaultClassifier> {
    fn default() -> Self {
        Self::new(DefaultClassifier::default())
    }
}

impl<C: EntryClassifier> ViewPartitioner<C> {
    /// Create a partitioner using the given classifier
    pub fn new(classifier: C) -> Self {
        Self {
            classifier,
            memory_cache: None,
        }
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Record the memory cache was computed for, if any
    pub fn cached_record(&self) -> Option<RecordId> {
        self.memory_cache.as_ref().map(|c| c.record)
    }

    /// Drop cached slices
    pub fn invalidate(&mut self) {
        if let Some(cache) = self.memory_cache.take() {
            tracing::debug!("Invalidated memory spans for record {:?}", cache.record);
        }
    }

    /// Produce the data slice for `view`
    pub fn partition(&mut self, record: &SessionRecord, view: ViewId, cursor: CursorState) -> ViewData {
        match view {
            ViewId::Console => ViewData::Console(self.console_breadcrumbs(record)),
            ViewId::Performance => ViewData::Performance(self.performance_view(record)),
            ViewId::Trace => ViewData::Trace(Arc::clone(record.event())),
            ViewId::Issues => ViewData::Issues(issues_key(record)),
            ViewId::Tags => ViewData::Tags(Arc::clone(record.event())),
            ViewId::Memory => ViewData::Memory(MemoryView {
                spans: self.memory_spans(record),
                current_time: cursor.current_time,
                current_hover_time: cursor.current_hover_time,
                start_timestamp: record.event().start_timestamp,
            }),
        }
    }

    /// Console-category and error breadcrumbs, in recording order
    pub fn console_breadcrumbs(&self, record: &SessionRecord) -> Vec<Breadcrumb> {
        record
            .breadcrumbs()
            .iter()
            .filter(|crumb| {
                crumb.category() == Some(CONSOLE_CATEGORY) || self.classifier.is_error_crumb(crumb)
            })
            .cloned()
            .collect()
    }

    /// The primary event with only its non-memory spans
    pub fn performance_view(&self, record: &SessionRecord) -> PerformanceView {
        let event = record.event();
        let entries = match record.entry(EntryKind::Spans) {
            Some(spans_entry) => vec![Entry::Spans(
                spans_entry
                    .as_spans()
                    .iter()
                    .filter(|span| self.classifier.is_not_memory_span(span))
                    .cloned()
                    .collect(),
            )],
            None => Vec::new(),
        };

        PerformanceView {
            project_slug: event.project_slug_or_name().map(str::to_string),
            event: PerformanceEvent::new(Arc::clone(event), entries),
        }
    }

    /// Memory spans of the record, reused while the record identity is unchanged
    pub fn memory_spans(&mut self, record: &SessionRecord) -> Arc<[Span]> {
        if let Some(cache) = &self.memory_cache {
            if cache.record == record.id() {
                tracing::trace!("Memory spans cache hit for record {:?}", record.id());
                return Arc::clone(&cache.spans);
            }
        }

        let spans: Arc<[Span]> = record
            .spans()
            .iter()
            .filter(|span| self.classifier.is_memory_span(span))
            .cloned()
            .collect();

        tracing::debug!(
            "Computed {} memory spans for record {:?}",
            spans.len(),
            record.id()
        );

        self.memory_cache = Some(MemoryCache {
            record: record.id(),
            spans: Arc::clone(&spans),
        });
        spans
    }
}

/// Replay and project identifiers for the issues view
///
/// The project id falls back to the legacy `project.name` field.
pub fn issues_key(record: &SessionRecord) -> IssuesKey {
    let event = record.event();
    IssuesKey {
        replay_id: event.id.clone(),
        project_id: event.project_id_or_name().map(str::to_string),
    }
}
