use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;
use uuid::Uuid;

use crate::validation::{ValidationError, validate_tag_form};

/// Represents a tag that can be applied to snippets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    /// Unique identifier for the tag
    pub id: Uuid,

    /// Name of the tag, unique within the catalog (case-sensitive)
    pub name: String,

    /// Optional display color as `#RRGGBB`
    #[serde(default)]
    pub color: Option<String>,

    /// Snippets currently carrying this tag
    #[serde(default)]
    pub snippet_ids: BTreeSet<Uuid>,

    /// When the tag was created
    pub created_at: DateTime<Utc>,
}

impl Tag {
    /// Creates a new tag with the given name
    pub fn new(name: String, color: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: clean_tag_name(&name),
            color,
            snippet_ids: BTreeSet::new(),
            created_at: Utc::now(),
        }
    }

    /// Returns the tag with a # prefix for display
    pub fn display_name(&self) -> String {
        format!("#{}", self.name)
    }

    pub fn usage_count(&self) -> usize {
        self.snippet_ids.len()
    }
}

/// Trims whitespace and a single leading `#`
pub fn clean_tag_name(name: &str) -> String {
    let name = name.trim();
    name.strip_prefix('#').unwrap_or(name).to_string()
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TagError {
    #[error("a tag named '{0}' already exists")]
    Duplicate(String),
    #[error("no tag named '{0}'")]
    NotFound(String),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Catalog of all tags and their back-references to snippets.
///
/// Tags live independently of snippets: deleting a snippet only drops its
/// back-references, the tag itself stays until deleted explicitly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagManager {
    /// All known tags
    pub tags: HashMap<Uuid, Tag>,
}

impl TagManager {
    /// Creates a new tag manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new tag, or returns the id of the existing tag with exactly this name
    pub fn create_tag(&mut self, name: String, color: Option<String>) -> Result<Uuid, TagError> {
        let name = clean_tag_name(&name);
        validate_tag_form(&name, color.as_deref())?;

        if let Some(existing) = self.get_by_name(&name) {
            return Ok(existing.id);
        }

        let tag = Tag::new(name, color);
        let tag_id = tag.id;
        tracing::debug!(tag = %tag.name, "created tag");
        self.tags.insert(tag_id, tag);

        Ok(tag_id)
    }

    /// Add a tag to a snippet, creating the tag if needed
    pub fn add_tag_to_snippet(&mut self, snippet_id: Uuid, tag_name: String) -> Result<Uuid, TagError> {
        let tag_id = self.create_tag(tag_name, None)?;

        if let Some(tag) = self.tags.get_mut(&tag_id) {
            tag.snippet_ids.insert(snippet_id);
        }

        Ok(tag_id)
    }

    pub fn remove_tag_from_snippet(&mut self, snippet_id: &Uuid, tag_name: &str) -> bool {
        match self.get_by_name_mut(tag_name) {
            Some(tag) => tag.snippet_ids.remove(snippet_id),
            None => false,
        }
    }

    /// Handle when a snippet is deleted
    pub fn handle_snippet_deleted(&mut self, snippet_id: &Uuid) {
        for tag in self.tags.values_mut() {
            tag.snippet_ids.remove(snippet_id);
        }
    }

    pub fn rename_tag(&mut self, old: &str, new: String) -> Result<(), TagError> {
        let new = clean_tag_name(&new);
        validate_tag_form(&new, None)?;
        if clean_tag_name(old) != new && self.get_by_name(&new).is_some() {
            return Err(TagError::Duplicate(new));
        }

        let tag = self
            .get_by_name_mut(old)
            .ok_or_else(|| TagError::NotFound(old.to_string()))?;
        tag.name = new;
        Ok(())
    }

    pub fn set_color(&mut self, name: &str, color: Option<String>) -> Result<(), TagError> {
        validate_tag_form(&clean_tag_name(name), color.as_deref())?;
        let tag = self
            .get_by_name_mut(name)
            .ok_or_else(|| TagError::NotFound(name.to_string()))?;
        tag.color = color;
        Ok(())
    }

    /// Removes a tag from the catalog, returning the snippets that carried it
    pub fn delete_tag(&mut self, name: &str) -> Result<BTreeSet<Uuid>, TagError> {
        let id = self
            .get_by_name(name)
            .map(|tag| tag.id)
            .ok_or_else(|| TagError::NotFound(name.to_string()))?;

        let tag = self.tags.remove(&id).ok_or_else(|| TagError::NotFound(name.to_string()))?;
        Ok(tag.snippet_ids)
    }

    /// Exact (case-sensitive) lookup; a leading `#` on `name` is ignored
    pub fn get_by_name(&self, name: &str) -> Option<&Tag> {
        let name = clean_tag_name(name);
        self.tags.values().find(|tag| tag.name == name)
    }

    fn get_by_name_mut(&mut self, name: &str) -> Option<&mut Tag> {
        let name = clean_tag_name(name);
        self.tags.values_mut().find(|tag| tag.name == name)
    }

    /// Get all snippets with a specific tag
    pub fn get_snippets_with_tag(&self, name: &str) -> Option<&BTreeSet<Uuid>> {
        self.get_by_name(name).map(|tag| &tag.snippet_ids)
    }

    /// Find tags that match a query string
    pub fn find_tags_by_name(&self, query: &str) -> Vec<&Tag> {
        let query = query.to_lowercase();
        let mut found: Vec<&Tag> = self
            .tags
            .values()
            .filter(|tag| tag.name.to_lowercase().contains(&query))
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        found
    }

    /// All tags, sorted by name
    pub fn sorted(&self) -> Vec<&Tag> {
        let mut tags: Vec<&Tag> = self.tags.values().collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        tags
    }

    pub fn names(&self) -> Vec<&str> {
        self.sorted().into_iter().map(|tag| tag.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_tag_reuses_exact_name_only() {
        let mut manager = TagManager::new();
        let web = manager.create_tag("web".into(), None).unwrap();
        assert_eq!(manager.create_tag("#web".into(), None).unwrap(), web);

        // names are case-sensitive
        let upper = manager.create_tag("Web".into(), None).unwrap();
        assert_ne!(upper, web);
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn clean_tag_name_strips_one_hash() {
        assert_eq!(clean_tag_name(" #web "), "web");
        assert_eq!(clean_tag_name("##web"), "#web");
        assert_eq!(clean_tag_name("web"), "web");
    }

    #[test]
    fn create_tag_rejects_bad_color() {
        let mut manager = TagManager::new();
        let err = manager
            .create_tag("web".into(), Some("red".into()))
            .unwrap_err();
        assert!(matches!(err, TagError::Invalid(ValidationError::InvalidColor(_))));
        assert!(manager.is_empty());
    }

    #[test]
    fn deleting_snippet_keeps_tag() {
        let mut manager = TagManager::new();
        let snippet = Uuid::new_v4();
        manager.add_tag_to_snippet(snippet, "js".into()).unwrap();
        assert_eq!(manager.get_by_name("js").unwrap().usage_count(), 1);

        manager.handle_snippet_deleted(&snippet);

        let tag = manager.get_by_name("js").expect("tag survives snippet deletion");
        assert_eq!(tag.usage_count(), 0);
    }

    #[test]
    fn rename_rejects_duplicates() {
        let mut manager = TagManager::new();
        manager.create_tag("js".into(), None).unwrap();
        manager.create_tag("web".into(), None).unwrap();

        assert_eq!(
            manager.rename_tag("js", "web".into()),
            Err(TagError::Duplicate("web".into()))
        );
        assert_eq!(
            manager.rename_tag("nope", "other".into()),
            Err(TagError::NotFound("nope".into()))
        );
        manager.rename_tag("js", "javascript".into()).unwrap();
        assert_eq!(manager.names(), vec!["javascript", "web"]);
    }

    #[test]
    fn set_color_validates_and_clears() {
        let mut manager = TagManager::new();
        manager.create_tag("web".into(), None).unwrap();

        manager.set_color("web", Some("#00ff00".into())).unwrap();
        assert_eq!(manager.get_by_name("web").unwrap().color.as_deref(), Some("#00ff00"));

        assert!(manager.set_color("web", Some("green".into())).is_err());
        manager.set_color("web", None).unwrap();
        assert!(manager.get_by_name("web").unwrap().color.is_none());
        assert_eq!(
            manager.set_color("nope", None),
            Err(TagError::NotFound("nope".into()))
        );
    }

    #[test]
    fn delete_tag_returns_affected_snippets() {
        let mut manager = TagManager::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        manager.add_tag_to_snippet(a, "web".into()).unwrap();
        manager.add_tag_to_snippet(b, "web".into()).unwrap();

        assert_eq!(manager.get_snippets_with_tag("web").map(|ids| ids.len()), Some(2));
        let affected = manager.delete_tag("web").unwrap();
        assert_eq!(affected.len(), 2);
        assert!(affected.contains(&a) && affected.contains(&b));
        assert!(manager.get_by_name("web").is_none());
    }

    #[test]
    fn hash_prefixed_names_resolve_everywhere() {
        let mut manager = TagManager::new();
        let snippet = Uuid::new_v4();
        manager.add_tag_to_snippet(snippet, "js".into()).unwrap();

        assert!(manager.get_by_name("#js").is_some());
        manager.set_color("#js", Some("#f7df1e".into())).unwrap();
        assert!(manager.remove_tag_from_snippet(&snippet, "#js"));

        manager.rename_tag("#js", "#javascript".into()).unwrap();
        assert_eq!(manager.names(), vec!["javascript"]);
        assert_eq!(
            manager.get_by_name("javascript").unwrap().color.as_deref(),
            Some("#f7df1e")
        );

        assert!(manager.delete_tag("#javascript").is_ok());
        assert!(manager.is_empty());
    }

    #[test]
    fn rename_to_bare_hash_is_rejected() {
        let mut manager = TagManager::new();
        manager.create_tag("js".into(), None).unwrap();
        assert!(matches!(
            manager.rename_tag("js", "#".into()),
            Err(TagError::Invalid(ValidationError::Required(_)))
        ));
        assert_eq!(manager.names(), vec!["js"]);
    }

    #[test]
    fn find_tags_is_case_insensitive() {
        let mut manager = TagManager::new();
        manager.create_tag("JavaScript".into(), Some("#f7df1e".into())).unwrap();
        manager.create_tag("python".into(), None).unwrap();

        let found = manager.find_tags_by_name("script");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].display_name(), "#JavaScript");
    }
}
