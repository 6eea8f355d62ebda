//! Snippet filtering.
//!
//! A [`FilterSet`] holds at most one [`FilterCriterion`] per [`FilterKind`];
//! [`apply_filters`] keeps the snippets satisfying all of them, preserving
//! input order. Everything here is pure and synchronous: callers re-run the
//! filter whenever their snippet snapshot or filter set changes.

pub mod criteria;
pub mod engine;
pub mod set;

pub use criteria::{FilterCriterion, FilterKind, end_of_day, start_of_day};
pub use engine::{apply_filters, apply_filters_ref, matches, matches_criterion};
pub use set::{FilterSet, clear_filters, remove_filter, set_filter};
