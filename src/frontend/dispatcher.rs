//! View dispatch
//!
//! Resolves the active view from a navigation signal, obtains its data slice
//! and packages both with a snapshot of the playback cursor. The dispatcher
//! only reads the cursor; writes come back from views as `CursorUpdate`s.

use serde::Serialize;

use crate::analysis::{DefaultClassifier, EntryClassifier};
use crate::frontend::partition::ViewPartitioner;
use crate::frontend::tabs::{focus_tabs, resolve_tab, TabItem, ViewId};
use crate::frontend::view_registry::{self, ViewKindInfo};
use crate::frontend::views::ViewData;
use crate::session::{CursorState, PlaybackCursor, SessionRecord};

/// Everything needed to render the active view
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedView {
    pub view: ViewId,
    pub tabs: Vec<TabItem>,
    pub cursor: CursorState,
    pub data: ViewData,
}

impl ResolvedView {
    /// Registry metadata for the active view
    pub fn info(&self) -> &'static ViewKindInfo {
        view_registry::info(self.view)
    }

    /// Whether the view has nothing to show
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Composes tab resolution and partitioning
#[derive(Debug)]
pub struct ViewDispatcher<C = DefaultClassifier> {
    partitioner: ViewPartitioner<C>,
}

impl Default for ViewDispatcher<DefaultClassifier> {
    fn default() -> Self {
        Self::new(DefaultClassifier::default())
    }
}

impl<C: EntryClassifier> ViewDispatcher<C> {
    pub fn new(classifier: C) -> Self {
        Self {
            partitioner: ViewPartitioner::new(classifier),
        }
    }

    pub fn partitioner(&self) -> &ViewPartitioner<C> {
        &self.partitioner
    }

    /// Drop cached slices, e.g. when the record is replaced
    pub fn invalidate(&mut self) {
        self.partitioner.invalidate();
    }

    /// Resolve `signal` against `record`
    pub fn resolve_view(
        &mut self,
        signal: &str,
        record: &SessionRecord,
        cursor: &PlaybackCursor,
    ) -> ResolvedView {
        let view = resolve_tab(signal);
        self.dispatch(view, record, cursor)
    }

    /// Build the payload for an already resolved view
    pub fn dispatch(
        &mut self,
        view: ViewId,
        record: &SessionRecord,
        cursor: &PlaybackCursor,
    ) -> ResolvedView {
        let state = cursor.state();
        let data = self.partitioner.partition(record, view, state);
        tracing::debug!(
            "Dispatched {} for record {:?} (empty: {})",
            view,
            record.id(),
            data.is_empty()
        );

        ResolvedView {
            view,
            tabs: focus_tabs(view),
            cursor: state,
            data,
        }
    }
}
