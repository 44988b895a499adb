//! Span and breadcrumb classification
//!
//! Classifiers are pure predicates over a single record. The partitioner
//! only relies on their boolean contracts, so any implementation of
//! [`EntryClassifier`] can be plugged in.

use crate::config::ClassifierSettings;
use crate::types::{Breadcrumb, Span};

/// Breadcrumb type the SDK uses for captured exceptions
const ERROR_CRUMB_TYPE: &str = "error";

/// Pure predicates that categorize individual records
#[cfg_attr(test, mockall::automock)]
pub trait EntryClassifier {
    /// Whether the span is a memory-usage sample
    fn is_memory_span(&self, span: &Span) -> bool;

    /// Whether the breadcrumb encodes a failure
    fn is_error_crumb(&self, crumb: &Breadcrumb) -> bool;

    /// Complement of [`EntryClassifier::is_memory_span`]
    fn is_not_memory_span(&self, span: &Span) -> bool {
        !self.is_memory_span(span)
    }
}

/// Category-based classifier
///
/// A span is a memory span when its category is one of the configured
/// memory categories. A breadcrumb is an error signal when its level is
/// `error`/`fatal`, its type is `error`, or its category is one of the
/// configured error categories. Anything unrecognised is neither.
#[derive(Debug, Clone)]
pub struct DefaultClassifier {
    memory_categories: Vec<String>,
    error_categories: Vec<String>,
}

impl Default for DefaultClassifier {
    fn default() -> Self {
        Self::from_settings(&ClassifierSettings::default())
    }
}

impl DefaultClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a classifier from configuration
    pub fn from_settings(settings: &ClassifierSettings) -> Self {
        Self {
            memory_categories: settings.memory_categories.clone(),
            error_categories: settings.error_categories.clone(),
        }
    }
}

impl EntryClassifier for DefaultClassifier {
    fn is_memory_span(&self, span: &Span) -> bool {
        self.memory_categories.iter().any(|c| *c == span.category)
    }

    fn is_error_crumb(&self, crumb: &Breadcrumb) -> bool {
        if crumb.level.is_failure() {
            return true;
        }
        if crumb.crumb_type.as_deref() == Some(ERROR_CRUMB_TYPE) {
            return true;
        }
        crumb
            .category()
            .is_some_and(|category| self.error_categories.iter().any(|c| c == category))
    }
}
