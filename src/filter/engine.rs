use chrono::{DateTime, Utc};

use super::criteria::FilterCriterion;
use super::set::FilterSet;
use crate::models::Snippet;

/// Returns the snippets that satisfy every criterion in `filters`, in input order.
///
/// An empty filter set keeps everything. The input is never modified.
pub fn apply_filters(snippets: &[Snippet], filters: &FilterSet) -> Vec<Snippet> {
    snippets
        .iter()
        .filter(|snippet| matches(snippet, filters))
        .cloned()
        .collect()
}

/// Borrowing variant of [`apply_filters`] for callers that only render
pub fn apply_filters_ref<'a>(snippets: &'a [Snippet], filters: &FilterSet) -> Vec<&'a Snippet> {
    snippets
        .iter()
        .filter(|snippet| matches(snippet, filters))
        .collect()
}

/// True when `snippet` passes every criterion in `filters`
pub fn matches(snippet: &Snippet, filters: &FilterSet) -> bool {
    filters.iter().all(|criterion| matches_criterion(snippet, criterion))
}

pub fn matches_criterion(snippet: &Snippet, criterion: &FilterCriterion) -> bool {
    match criterion {
        FilterCriterion::Search(term) => matches_search(snippet, term),
        FilterCriterion::Language(languages) => matches_language(snippet, languages),
        FilterCriterion::Tags(tags) => matches_tags(snippet, tags),
        FilterCriterion::Favorite(only_favorites) => matches_favorite(snippet, *only_favorites),
        FilterCriterion::DateRange(start, end) => matches_date_range(snippet, start, end),
    }
}

fn matches_search(snippet: &Snippet, term: &str) -> bool {
    let term = term.to_lowercase();

    snippet.title.to_lowercase().contains(&term)
        || snippet
            .description
            .as_deref()
            .is_some_and(|desc| desc.to_lowercase().contains(&term))
        || snippet.code.to_lowercase().contains(&term)
        || snippet
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&term))
}

// Exact, case-sensitive: stored languages are already canonical lowercase ids
fn matches_language(snippet: &Snippet, languages: &[String]) -> bool {
    languages.is_empty() || languages.iter().any(|lang| *lang == snippet.language)
}

fn matches_tags(snippet: &Snippet, tags: &[String]) -> bool {
    tags.is_empty() || snippet.tags.iter().any(|tag| tags.contains(tag))
}

fn matches_favorite(snippet: &Snippet, only_favorites: bool) -> bool {
    !only_favorites || snippet.state.is_favorite
}

fn matches_date_range(snippet: &Snippet, start: &DateTime<Utc>, end: &DateTime<Utc>) -> bool {
    *start <= snippet.created_at && snippet.created_at <= *end
}
