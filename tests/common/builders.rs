//! Test data builders for creating test objects

use chrono::{DateTime, TimeZone, Utc};
use replay_inspector::types::{Breadcrumb, BreadcrumbLevel, Entry, PrimaryEvent, Span};
use replay_inspector::SessionRecord;

/// Session start used by the builders (Unix seconds)
pub const START: f64 = 1_652_299_200.0;

fn at(offset_secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(START as i64 + offset_secs, 0).unwrap()
}

/// Builder for creating test spans
pub struct SpanBuilder {
    category: String,
    start: f64,
    end: f64,
}

impl SpanBuilder {
    pub fn new(category: &str) -> Self {
        Self {
            category: category.to_string(),
            start: START,
            end: START,
        }
    }

    pub fn memory() -> Self {
        Self::new("memory")
    }

    /// Offsets in seconds from the session start
    pub fn between(mut self, start: f64, end: f64) -> Self {
        self.start = START + start;
        self.end = START + end;
        self
    }

    pub fn build(self) -> Span {
        Span::new(self.category, self.start, self.end)
    }
}

/// Builder for creating test breadcrumbs
pub struct CrumbBuilder {
    category: String,
    level: BreadcrumbLevel,
    offset: i64,
    message: Option<String>,
}

impl CrumbBuilder {
    pub fn new(category: &str) -> Self {
        Self {
            category: category.to_string(),
            level: BreadcrumbLevel::Info,
            offset: 0,
            message: None,
        }
    }

    pub fn level(mut self, level: BreadcrumbLevel) -> Self {
        self.level = level;
        self
    }

    pub fn at(mut self, offset_secs: i64) -> Self {
        self.offset = offset_secs;
        self
    }

    pub fn message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }

    pub fn build(self) -> Breadcrumb {
        let crumb = Breadcrumb::new(at(self.offset), self.category).with_level(self.level);
        match self.message {
            Some(message) => crumb.with_message(message),
            None => crumb,
        }
    }
}

/// Builder for creating test session records
pub struct RecordBuilder {
    event: PrimaryEvent,
    entries: Vec<Entry>,
}

impl RecordBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            event: PrimaryEvent::new(id, START),
            entries: Vec::new(),
        }
    }

    pub fn event(mut self, f: impl FnOnce(PrimaryEvent) -> PrimaryEvent) -> Self {
        self.event = f(self.event);
        self
    }

    pub fn spans(mut self, spans: Vec<Span>) -> Self {
        self.entries.push(Entry::Spans(spans));
        self
    }

    pub fn breadcrumbs(mut self, crumbs: Vec<Breadcrumb>) -> Self {
        self.entries.push(Entry::breadcrumbs(crumbs));
        self
    }

    pub fn entry(mut self, entry: Entry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn build(self) -> SessionRecord {
        SessionRecord::new(self.event, self.entries).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_builder() {
        let record = RecordBuilder::new("r")
            .spans(vec![SpanBuilder::memory().between(1.0, 1.0).build()])
            .breadcrumbs(vec![CrumbBuilder::new("console").build()])
            .build();

        assert_eq!(record.entries().len(), 2);
        assert_eq!(record.spans()[0].start_time, START + 1.0);
        assert_eq!(record.breadcrumbs()[0].category(), Some("console"));
    }
}
