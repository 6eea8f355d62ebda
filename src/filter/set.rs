use serde::{Deserialize, Serialize};

use super::criteria::{FilterCriterion, FilterKind};

/// The active criteria, at most one per [`FilterKind`].
///
/// Criteria keep the position they were first added at; replacing a
/// criterion of the same kind updates it in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet {
    criteria: Vec<FilterCriterion>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `criterion`, replacing any criterion of the same kind
    pub fn set(&mut self, criterion: FilterCriterion) {
        let kind = criterion.kind();
        match self.criteria.iter_mut().find(|c| c.kind() == kind) {
            Some(existing) => *existing = criterion,
            None => self.criteria.push(criterion),
        }
    }

    /// Removes the criterion of `kind`, if any
    pub fn remove(&mut self, kind: FilterKind) -> Option<FilterCriterion> {
        let index = self.criteria.iter().position(|c| c.kind() == kind)?;
        Some(self.criteria.remove(index))
    }

    pub fn clear(&mut self) {
        self.criteria.clear();
    }

    pub fn get(&self, kind: FilterKind) -> Option<&FilterCriterion> {
        self.criteria.iter().find(|c| c.kind() == kind)
    }

    pub fn contains(&self, kind: FilterKind) -> bool {
        self.get(kind).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilterCriterion> {
        self.criteria.iter()
    }

    pub fn kinds(&self) -> impl Iterator<Item = FilterKind> + '_ {
        self.criteria.iter().map(FilterCriterion::kind)
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }
}

impl FromIterator<FilterCriterion> for FilterSet {
    fn from_iter<I: IntoIterator<Item = FilterCriterion>>(iter: I) -> Self {
        let mut set = FilterSet::new();
        for criterion in iter {
            set.set(criterion);
        }
        set
    }
}

impl<'a> IntoIterator for &'a FilterSet {
    type Item = &'a FilterCriterion;
    type IntoIter = std::slice::Iter<'a, FilterCriterion>;

    fn into_iter(self) -> Self::IntoIter {
        self.criteria.iter()
    }
}

/// Returns `filters` with `criterion` set, replacing any of the same kind
pub fn set_filter(mut filters: FilterSet, criterion: FilterCriterion) -> FilterSet {
    filters.set(criterion);
    filters
}

/// Returns `filters` without the criterion of `kind`; unchanged if absent
pub fn remove_filter(mut filters: FilterSet, kind: FilterKind) -> FilterSet {
    filters.remove(kind);
    filters
}

/// Returns an empty filter set
pub fn clear_filters(mut filters: FilterSet) -> FilterSet {
    filters.clear();
    filters
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_same_kind_in_place() {
        let filters = FilterSet::new();
        let filters = set_filter(filters, FilterCriterion::search("a"));
        let filters = set_filter(filters, FilterCriterion::favorite(true));
        let filters = set_filter(filters, FilterCriterion::search("b"));

        assert_eq!(filters.len(), 2);
        assert_eq!(
            filters.kinds().collect::<Vec<_>>(),
            vec![FilterKind::Search, FilterKind::Favorite]
        );
        assert_eq!(
            filters.get(FilterKind::Search),
            Some(&FilterCriterion::search("b"))
        );
    }

    #[test]
    fn remove_missing_kind_is_a_noop() {
        let filters: FilterSet = [FilterCriterion::favorite(true)].into_iter().collect();
        let unchanged = remove_filter(filters.clone(), FilterKind::Tags);
        assert_eq!(unchanged, filters);

        let removed = remove_filter(filters, FilterKind::Favorite);
        assert!(removed.is_empty());
    }

    #[test]
    fn clear_empties_everything() {
        let filters: FilterSet = FilterKind::ALL
            .iter()
            .map(|kind| match kind {
                FilterKind::Search => FilterCriterion::search("x"),
                FilterKind::Language => FilterCriterion::languages(["rust"]),
                FilterKind::Tags => FilterCriterion::tags(["web"]),
                FilterKind::Favorite => FilterCriterion::favorite(true),
                FilterKind::DateRange => {
                    FilterCriterion::date_range(chrono::Utc::now(), chrono::Utc::now())
                }
            })
            .collect();
        assert_eq!(filters.len(), 5);
        assert!(clear_filters(filters).is_empty());
    }

    #[test]
    fn serializes_as_plain_list() {
        let filters: FilterSet = [FilterCriterion::search("hello")].into_iter().collect();
        let json = serde_json::to_string(&filters).unwrap();
        assert_eq!(json, r#"[{"type":"search","value":"hello"}]"#);
    }
}
