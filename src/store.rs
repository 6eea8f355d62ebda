//! Explicit view state for a snippet list: the snippet snapshot, the active
//! filters, and the derived filtered view.

use chrono::{DateTime, Utc};

use crate::filter::{self, FilterCriterion, FilterKind, FilterSet};
use crate::models::Snippet;

/// Value passed to [`SnippetStore::handle_language_change`] to drop the language restriction
pub const ALL_LANGUAGES: &str = "all";

#[derive(Debug, Clone, Default)]
pub struct SnippetStore {
    snippets: Vec<Snippet>,
    filtered: Vec<Snippet>,
    filters: FilterSet,
    selected_tags: Vec<String>,
}

impl SnippetStore {
    pub fn new(snippets: Vec<Snippet>) -> Self {
        let mut store = Self {
            snippets,
            ..Default::default()
        };
        store.refresh();
        store
    }

    /// Replaces the snapshot; the current filters are re-applied
    pub fn set_snippets(&mut self, snippets: Vec<Snippet>) {
        self.snippets = snippets;
        self.refresh();
    }

    /// Sets a criterion; a `Tags` criterion also becomes the tag selection
    pub fn set_filter(&mut self, criterion: FilterCriterion) {
        if let FilterCriterion::Tags(tags) = &criterion {
            self.selected_tags = tags.clone();
        }
        self.filters.set(criterion);
        self.refresh();
    }

    pub fn remove_filter(&mut self, kind: FilterKind) {
        self.filters.remove(kind);
        if kind == FilterKind::Tags {
            self.selected_tags.clear();
        }
        self.refresh();
    }

    /// Drops every filter and the tag selection
    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.selected_tags.clear();
        self.refresh();
    }

    pub fn handle_search_change(&mut self, value: impl Into<String>) {
        self.set_filter(FilterCriterion::search(value));
    }

    /// Adds `value` to the language selection, or resets it for [`ALL_LANGUAGES`]
    pub fn handle_language_change(&mut self, value: &str) {
        let languages = if value == ALL_LANGUAGES {
            Vec::new()
        } else {
            let mut current = match self.filters.get(FilterKind::Language) {
                Some(FilterCriterion::Language(current)) => current.clone(),
                _ => Vec::new(),
            };
            if !current.iter().any(|lang| lang == value) {
                current.push(value.to_string());
            }
            current
        };
        self.set_filter(FilterCriterion::Language(languages));
    }

    pub fn handle_favorite_toggle(&mut self, only_favorites: bool) {
        self.set_filter(FilterCriterion::favorite(only_favorites));
    }

    pub fn handle_date_range_change(&mut self, from: DateTime<Utc>, to: DateTime<Utc>) {
        self.set_filter(FilterCriterion::date_range(from, to));
    }

    /// Selects or deselects a tag and updates the tag criterion to match
    pub fn toggle_tag_selection(&mut self, tag: &str) {
        match self.selected_tags.iter().position(|t| t == tag) {
            Some(index) => {
                self.selected_tags.remove(index);
            }
            None => self.selected_tags.push(tag.to_string()),
        }
        self.set_filter(FilterCriterion::Tags(self.selected_tags.clone()));
    }

    pub fn snippets(&self) -> &[Snippet] {
        &self.snippets
    }

    pub fn filtered(&self) -> &[Snippet] {
        &self.filtered
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn selected_tags(&self) -> &[String] {
        &self.selected_tags
    }

    fn refresh(&mut self) {
        self.filtered = filter::apply_filters(&self.snippets, &self.filters);
        tracing::debug!(
            total = self.snippets.len(),
            visible = self.filtered.len(),
            criteria = self.filters.len(),
            "refreshed snippet view"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SnippetStore {
        let mut fav = Snippet::new("Debounce", "javascript", "fn").with_tags(["web", "js"]);
        fav.state.is_favorite = true;
        SnippetStore::new(vec![
            fav,
            Snippet::new("Quicksort", "python", "def").with_tags(["algorithms"]),
            Snippet::new("Ownership", "rust", "let"),
        ])
    }

    fn visible(store: &SnippetStore) -> Vec<&str> {
        store.filtered().iter().map(|s| s.title.as_str()).collect()
    }

    #[test]
    fn starts_unfiltered() {
        let store = store();
        assert!(store.filters().is_empty());
        assert_eq!(store.filtered(), store.snippets());
    }

    #[test]
    fn language_changes_accumulate_until_all() {
        let mut store = store();
        store.handle_language_change("rust");
        store.handle_language_change("python");
        store.handle_language_change("rust");
        assert_eq!(
            store.filters().get(FilterKind::Language),
            Some(&FilterCriterion::languages(["rust", "python"]))
        );
        assert_eq!(visible(&store), vec!["Quicksort", "Ownership"]);

        store.handle_language_change(ALL_LANGUAGES);
        assert_eq!(store.filtered().len(), 3);
    }

    #[test]
    fn tag_toggle_updates_criterion() {
        let mut store = store();
        store.toggle_tag_selection("algorithms");
        assert_eq!(visible(&store), vec!["Quicksort"]);

        store.toggle_tag_selection("web");
        assert_eq!(visible(&store), vec!["Debounce", "Quicksort"]);

        store.toggle_tag_selection("algorithms");
        store.toggle_tag_selection("web");
        assert!(store.selected_tags().is_empty());
        assert_eq!(store.filtered().len(), 3);
    }

    #[test]
    fn direct_tag_filter_becomes_selection() {
        let mut store = store();
        store.set_filter(FilterCriterion::tags(["algorithms"]));
        assert_eq!(store.selected_tags(), ["algorithms"]);

        store.toggle_tag_selection("web");
        assert_eq!(
            store.filters().get(FilterKind::Tags),
            Some(&FilterCriterion::tags(["algorithms", "web"]))
        );
        assert_eq!(visible(&store), vec!["Debounce", "Quicksort"]);
    }

    #[test]
    fn clear_resets_filters_and_selection() {
        let mut store = store();
        store.toggle_tag_selection("web");
        store.handle_favorite_toggle(true);
        store.handle_search_change("deb");
        assert_eq!(visible(&store), vec!["Debounce"]);

        store.clear_filters();
        assert!(store.filters().is_empty());
        assert!(store.selected_tags().is_empty());
        assert_eq!(store.filtered().len(), 3);
    }

    #[test]
    fn new_snapshot_is_refiltered() {
        let mut store = store();
        store.handle_favorite_toggle(true);
        assert_eq!(store.filtered().len(), 1);

        let mut added = Snippet::new("New", "go", "package main");
        added.state.is_favorite = true;
        let mut snippets = store.snippets().to_vec();
        snippets.push(added);
        store.set_snippets(snippets);

        assert_eq!(visible(&store), vec!["Debounce", "New"]);
    }

    #[test]
    fn date_range_and_removal() {
        let mut store = store();
        let now = Utc::now();
        store.handle_date_range_change(now + chrono::Duration::days(1), now + chrono::Duration::days(2));
        assert!(store.filtered().is_empty());

        store.remove_filter(FilterKind::DateRange);
        assert_eq!(store.filtered().len(), 3);
    }
}
