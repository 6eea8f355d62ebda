//! Snippet Vault - code snippet organizer
//!
//! Stores code snippets with tags, languages and favorites, and narrows them
//! down with a small composable filter engine:
//! - [`filter`]: criteria, filter sets and the pure `apply_filters` pass
//! - [`store`]: explicit view state wiring filters to a snippet snapshot
//! - [`models`]: snippets, the tag catalog, languages and JSON storage
//! - [`validation`]: snippet and tag form checks
//! - [`config`]: config file and environment overrides

pub mod config;
pub mod filter;
pub mod models;
pub mod store;
pub mod validation;

pub use filter::{
    FilterCriterion, FilterKind, FilterSet, apply_filters, clear_filters, remove_filter,
    set_filter,
};
pub use models::{Snippet, SnippetState, Tag, TagManager};
pub use store::SnippetStore;
