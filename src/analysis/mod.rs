//! Analysis module for recorded entries
//!
//! This module provides the pure predicates used to categorize spans and
//! breadcrumbs before they are partitioned into views.

pub mod classifier;

pub use classifier::{DefaultClassifier, EntryClassifier};
