//! Application module
//!
//! [`InspectorApp`] is the inspection panel: it owns the session record,
//! the playback cursor and the dispatcher, and reacts to one
//! [`PanelAction`] at a time. Each action fully resolves the new view
//! before the previous one is replaced, so there is never an
//! intermediate invalid view.

use crate::analysis::{DefaultClassifier, EntryClassifier};
use crate::frontend::dispatcher::{ResolvedView, ViewDispatcher};
use crate::frontend::tabs::ViewId;
use crate::session::{CursorUpdate, PlaybackCursor, SessionRecord};

/// Events the panel reacts to
///
/// Views and the host return these instead of mutating the panel directly.
#[derive(Debug)]
pub enum PanelAction {
    /// The navigation signal (location fragment) changed
    Navigate(String),
    /// A view scrubbed or hovered the timeline
    Cursor(CursorUpdate),
    /// A new recording finished loading
    ReplaceRecord(SessionRecord),
}

/// The inspection panel
#[derive(Debug)]
pub struct InspectorApp<C = DefaultClassifier> {
    record: SessionRecord,
    cursor: PlaybackCursor,
    dispatcher: ViewDispatcher<C>,
    signal: String,
    active: ResolvedView,
}

impl<C: EntryClassifier> InspectorApp<C> {
    /// Open a panel on `record`, showing the view named by `signal`
    pub fn new(record: SessionRecord, classifier: C, signal: impl Into<String>) -> Self {
        let signal = signal.into();
        let cursor = PlaybackCursor::with_duration(record.duration_ms());
        let mut dispatcher = ViewDispatcher::new(classifier);
        let active = dispatcher.resolve_view(&signal, &record, &cursor);
        tracing::info!("Opened replay {} on {}", record.event().id, active.view);

        Self {
            record,
            cursor,
            dispatcher,
            signal,
            active,
        }
    }

    /// The view currently shown
    pub fn active(&self) -> &ResolvedView {
        &self.active
    }

    pub fn active_view(&self) -> ViewId {
        self.active.view
    }

    pub fn record(&self) -> &SessionRecord {
        &self.record
    }

    pub fn cursor(&self) -> &PlaybackCursor {
        &self.cursor
    }

    /// The last navigation signal seen
    pub fn signal(&self) -> &str {
        &self.signal
    }

    pub fn dispatcher(&self) -> &ViewDispatcher<C> {
        &self.dispatcher
    }

    /// Handle one action and return the view to render
    pub fn handle_action(&mut self, action: PanelAction) -> &ResolvedView {
        match action {
            PanelAction::Navigate(signal) => self.navigate(signal),
            PanelAction::Cursor(update) => self.apply_cursor(update),
            PanelAction::ReplaceRecord(record) => self.replace_record(record),
        }
    }

    /// Handle actions in order
    pub fn handle_actions(&mut self, actions: impl IntoIterator<Item = PanelAction>) -> &ResolvedView {
        for action in actions {
            self.handle_action(action);
        }
        &self.active
    }

    /// React to a navigation signal change
    pub fn navigate(&mut self, signal: impl Into<String>) -> &ResolvedView {
        let signal = signal.into();
        let next = self
            .dispatcher
            .resolve_view(&signal, &self.record, &self.cursor);
        if next.view != self.active.view {
            tracing::debug!("Switching view {} -> {}", self.active.view, next.view);
        }
        self.signal = signal;
        self.active = next;
        &self.active
    }

    /// Apply a cursor change coming from a view
    ///
    /// Views that read the cursor are re-dispatched so they see the new
    /// values; the memory spans stay the same allocation.
    pub fn apply_cursor(&mut self, update: CursorUpdate) -> &ResolvedView {
        if self.cursor.apply(update) {
            if self.active.info().reads_cursor {
                self.active = self
                    .dispatcher
                    .dispatch(self.active.view, &self.record, &self.cursor);
            } else {
                self.active.cursor = self.cursor.state();
            }
        }
        &self.active
    }

    /// Swap in a new recording
    ///
    /// Cached slices are dropped and the cursor rewound before the active
    /// view is recomputed, so nothing from the old record can be served.
    pub fn replace_record(&mut self, record: SessionRecord) -> &ResolvedView {
        tracing::info!(
            "Replacing replay {} with {}",
            self.record.event().id,
            record.event().id
        );
        self.dispatcher.invalidate();
        self.cursor.reset(Some(record.duration_ms()));
        self.record = record;
        self.active = self
            .dispatcher
            .resolve_view(&self.signal, &self.record, &self.cursor);
        &self.active
    }
}

impl InspectorApp<DefaultClassifier> {
    /// Open a panel with the default classifier
    pub fn with_default_classifier(record: SessionRecord, signal: impl Into<String>) -> Self {
        Self::new(record, DefaultClassifier::default(), signal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::views::ViewData;
    use crate::types::{Entry, PrimaryEvent, Span};
    use std::sync::Arc;

    fn record(id: &str) -> SessionRecord {
        SessionRecord::new(
            PrimaryEvent::new(id, 100.0).with_end_timestamp(110.0),
            vec![Entry::Spans(vec![
                Span::new("memory", 100.0, 100.0),
                Span::new("memory", 105.0, 105.0),
                Span::new("resource.img", 101.0, 102.0),
            ])],
        )
        .unwrap()
    }

    fn memory_spans(view: &ResolvedView) -> Arc<[Span]> {
        match &view.data {
            ViewData::Memory(memory) => Arc::clone(&memory.spans),
            other => panic!("expected memory view, got {:?}", other),
        }
    }

    #[test]
    fn test_open_and_navigate() {
        let mut app = InspectorApp::with_default_classifier(record("a"), "");
        assert_eq!(app.active_view(), ViewId::Performance);
        assert_eq!(app.cursor().duration(), Some(10_000.0));

        app.handle_action(PanelAction::Navigate("#tags".into()));
        assert_eq!(app.active_view(), ViewId::Tags);
        assert_eq!(app.signal(), "#tags");

        app.navigate("#garbage");
        assert_eq!(app.active_view(), ViewId::Performance);
    }

    #[test]
    fn test_scrub_keeps_memory_spans_stable() {
        let mut app = InspectorApp::with_default_classifier(record("a"), "#memory");
        let before = memory_spans(app.active());

        let view = app.handle_action(PanelAction::Cursor(CursorUpdate::Hover(Some(4200.0))));
        assert_eq!(view.cursor.current_hover_time, Some(4200.0));
        let after = memory_spans(app.active());

        assert!(Arc::ptr_eq(&before, &after));
        match &app.active().data {
            ViewData::Memory(memory) => assert_eq!(memory.current_hover_time, Some(4200.0)),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_cursor_update_on_non_cursor_view() {
        let mut app = InspectorApp::with_default_classifier(record("a"), "#console");
        app.apply_cursor(CursorUpdate::Seek(2500.0));

        assert_eq!(app.cursor().current_time(), 2500.0);
        assert_eq!(app.active().cursor.current_time, 2500.0);
        assert_eq!(app.active_view(), ViewId::Console);
    }

    #[test]
    fn test_replace_record_invalidates() {
        let mut app = InspectorApp::with_default_classifier(record("a"), "#memory");
        let before = memory_spans(app.active());
        app.apply_cursor(CursorUpdate::Seek(3000.0));

        let replacement = record("b");
        let replacement_id = replacement.id();
        app.handle_action(PanelAction::ReplaceRecord(replacement));

        let after = memory_spans(app.active());
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(app.dispatcher().partitioner().cached_record(), Some(replacement_id));
        assert_eq!(app.cursor().current_time(), 0.0);
        assert_eq!(app.active_view(), ViewId::Memory);
        assert_eq!(app.record().event().id, "b");
    }

    #[test]
    fn test_handle_actions_in_order() {
        let mut app = InspectorApp::with_default_classifier(record("a"), "");
        let view = app.handle_actions([
            PanelAction::Navigate("#memory".into()),
            PanelAction::Cursor(CursorUpdate::Seek(1000.0)),
            PanelAction::Cursor(CursorUpdate::Seek(2000.0)),
        ]);

        assert_eq!(view.view, ViewId::Memory);
        assert_eq!(view.cursor.current_time, 2000.0);
    }
}
