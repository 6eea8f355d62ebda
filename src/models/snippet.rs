use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::language::normalize_language;

/// Per-snippet display state, stored alongside the snippet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnippetState {
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub is_dark: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub code: String,
    /// Canonical lowercase language id
    pub language: String,
    /// Tag names, in the order they were attached
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub state: SnippetState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Snippet {
    pub fn new(title: impl Into<String>, language: &str, code: impl Into<String>) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: None,
            code: code.into(),
            language: normalize_language(language),
            tags: Vec::new(),
            state: SnippetState::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for tag in tags {
            self.add_tag(tag.into());
        }
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = self.updated_at.max(created_at);
        self
    }

    pub fn update_code(&mut self, code: String) {
        self.code = code;
        self.touch();
    }

    pub fn is_favorite(&self) -> bool {
        self.state.is_favorite
    }

    pub fn set_favorite(&mut self, favorite: bool) {
        self.state.is_favorite = favorite;
        self.touch();
    }

    /// Flips the favorite flag and returns the new value
    pub fn toggle_favorite(&mut self) -> bool {
        self.set_favorite(!self.state.is_favorite);
        self.state.is_favorite
    }

    /// Flips the dark display flag and returns the new value
    pub fn toggle_dark(&mut self) -> bool {
        self.state.is_dark = !self.state.is_dark;
        self.touch();
        self.state.is_dark
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|tag| tag == name)
    }

    /// Attaches a tag name; returns false if it was already attached
    pub fn add_tag(&mut self, name: String) -> bool {
        if self.has_tag(&name) {
            return false;
        }
        self.tags.push(name);
        self.touch();
        true
    }

    pub fn remove_tag(&mut self, name: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|tag| tag != name);
        let removed = self.tags.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    pub fn rename_tag(&mut self, old: &str, new: &str) {
        for tag in self.tags.iter_mut().filter(|tag| tag.as_str() == old) {
            *tag = new.to_string();
        }
    }

    pub fn get_line_count(&self) -> usize {
        self.code.lines().count()
    }

    // updated_at never goes behind created_at, even with a skewed clock
    fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.created_at);
    }
}
