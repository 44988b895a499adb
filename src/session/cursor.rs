//! Playback cursor shared by every time-aligned view
//!
//! The cursor is owned by the panel and lent to views by reference.
//! Views never write to it directly: they hand back [`CursorUpdate`]s and
//! the owner applies them one at a time through [`PlaybackCursor::apply`].

use serde::Serialize;

/// Read-only snapshot of the cursor, in milliseconds from session start
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorState {
    pub current_time: f64,
    pub current_hover_time: Option<f64>,
}

/// A requested cursor change
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CursorUpdate {
    /// Move the playhead
    Seek(f64),
    /// Set or clear the hover position
    Hover(Option<f64>),
}

/// Shared timeline position for one inspection session
#[derive(Debug, Clone, Default)]
pub struct PlaybackCursor {
    state: CursorState,
    /// Session length in ms, if known; writes are clamped to it
    duration: Option<f64>,
    /// Incremented on every applied change
    revision: u64,
}

impl PlaybackCursor {
    /// Create a cursor at the start of the session
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cursor bounded by the session length
    pub fn with_duration(duration_ms: f64) -> Self {
        Self {
            duration: (duration_ms.is_finite() && duration_ms > 0.0).then_some(duration_ms),
            ..Self::default()
        }
    }

    /// Snapshot of the current values
    pub fn state(&self) -> CursorState {
        self.state
    }

    /// Current playhead position
    pub fn current_time(&self) -> f64 {
        self.state.current_time
    }

    /// Current hover position
    pub fn current_hover_time(&self) -> Option<f64> {
        self.state.current_hover_time
    }

    /// Session length the cursor is bounded by
    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    /// Number of changes applied so far
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Playhead position as a fraction of the session (0.0 to 1.0)
    pub fn progress(&self) -> f64 {
        match self.duration {
            Some(total) => (self.state.current_time / total).clamp(0.0, 1.0),
            None => 0.0,
        }
    }

    /// Apply one update. Returns whether the cursor changed.
    ///
    /// Non-finite times are ignored.
    pub fn apply(&mut self, update: CursorUpdate) -> bool {
        let next = match update {
            CursorUpdate::Seek(time) => {
                if !time.is_finite() {
                    tracing::debug!("Ignoring non-finite seek");
                    return false;
                }
                CursorState {
                    current_time: self.clamp(time),
                    ..self.state
                }
            }
            CursorUpdate::Hover(Some(time)) if !time.is_finite() => {
                tracing::debug!("Ignoring non-finite hover");
                return false;
            }
            CursorUpdate::Hover(time) => CursorState {
                current_hover_time: time.map(|t| self.clamp(t)),
                ..self.state
            },
        };

        if next == self.state {
            return false;
        }

        self.state = next;
        self.revision += 1;
        tracing::trace!("Cursor revision {}: {:?}", self.revision, self.state);
        true
    }

    /// Apply updates in order. Returns whether any of them changed the cursor.
    pub fn apply_all(&mut self, updates: impl IntoIterator<Item = CursorUpdate>) -> bool {
        updates
            .into_iter()
            .fold(false, |changed, update| self.apply(update) || changed)
    }

    /// Move the playhead back to the start and clear the hover
    pub fn reset(&mut self, duration_ms: Option<f64>) {
        *self = match duration_ms {
            Some(ms) => Self::with_duration(ms),
            None => Self::new(),
        };
    }

    fn clamp(&self, time: f64) -> f64 {
        match self.duration {
            Some(total) => time.clamp(0.0, total),
            None => time.max(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_defaults() {
        let cursor = PlaybackCursor::new();
        assert_eq!(cursor.current_time(), 0.0);
        assert_eq!(cursor.current_hover_time(), None);
        assert_eq!(cursor.revision(), 0);
    }

    #[test]
    fn test_seek_and_hover() {
        let mut cursor = PlaybackCursor::new();

        assert!(cursor.apply(CursorUpdate::Seek(1500.0)));
        assert_eq!(cursor.current_time(), 1500.0);

        assert!(cursor.apply(CursorUpdate::Hover(Some(250.0))));
        assert_eq!(cursor.current_hover_time(), Some(250.0));
        assert_eq!(cursor.current_time(), 1500.0);

        assert!(cursor.apply(CursorUpdate::Hover(None)));
        assert_eq!(cursor.current_hover_time(), None);
        assert_eq!(cursor.revision(), 3);
    }

    #[test]
    fn test_no_op_updates_keep_revision() {
        let mut cursor = PlaybackCursor::new();
        assert!(!cursor.apply(CursorUpdate::Seek(0.0)));
        assert!(!cursor.apply(CursorUpdate::Hover(None)));
        assert!(!cursor.apply(CursorUpdate::Seek(f64::NAN)));
        assert!(!cursor.apply(CursorUpdate::Hover(Some(f64::INFINITY))));
        assert_eq!(cursor.revision(), 0);
    }

    #[test]
    fn test_clamping() {
        let mut cursor = PlaybackCursor::with_duration(10_000.0);

        cursor.apply(CursorUpdate::Seek(25_000.0));
        assert_eq!(cursor.current_time(), 10_000.0);
        assert_eq!(cursor.progress(), 1.0);

        cursor.apply(CursorUpdate::Seek(-5.0));
        assert_eq!(cursor.current_time(), 0.0);

        cursor.apply(CursorUpdate::Hover(Some(-1.0)));
        assert_eq!(cursor.current_hover_time(), Some(0.0));
    }

    #[test]
    fn test_apply_all_and_reset() {
        let mut cursor = PlaybackCursor::with_duration(1000.0);
        let changed = cursor.apply_all([
            CursorUpdate::Seek(400.0),
            CursorUpdate::Hover(Some(600.0)),
        ]);
        assert!(changed);
        assert_eq!(cursor.progress(), 0.4);

        cursor.reset(None);
        assert_eq!(cursor.state(), CursorState::default());
        assert_eq!(cursor.duration(), None);
        assert_eq!(cursor.revision(), 0);
    }
}
