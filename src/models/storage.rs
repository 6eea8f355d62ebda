use crate::models::{Snippet, TagError, TagManager, clean_tag_name};
use crate::validation::{SnippetForm, validate_tag_form};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Everything the vault persists: snippets in insertion order plus the tag catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnippetDatabase {
    #[serde(default)]
    pub snippets: Vec<Snippet>,
    #[serde(default)]
    pub tags: TagManager,
}

impl SnippetDatabase {
    /// Validates the form, registers its tags and appends the new snippet
    pub fn add_snippet(&mut self, form: SnippetForm) -> Result<Uuid> {
        let snippet = form.into_snippet()?;
        for tag in &snippet.tags {
            validate_tag_form(tag, None)?;
        }

        // every tag is valid, the catalog can't be left half-updated
        for tag in &snippet.tags {
            self.tags.add_tag_to_snippet(snippet.id, tag.clone())?;
        }

        let id = snippet.id;
        self.snippets.push(snippet);
        Ok(id)
    }

    /// Replaces a snippet's editable fields with the form's, keeping its id
    /// and creation time. Tag back-references follow the new tag list.
    pub fn update_snippet(&mut self, id: &Uuid, form: SnippetForm) -> Result<()> {
        let edited = form.into_snippet()?;
        for tag in &edited.tags {
            validate_tag_form(tag, None)?;
        }

        let snippet = self
            .snippets
            .iter_mut()
            .find(|s| s.id == *id)
            .context("Snippet not found")?;

        for tag in snippet.tags.iter().filter(|tag| !edited.tags.contains(*tag)) {
            self.tags.remove_tag_from_snippet(id, tag);
        }
        for tag in &edited.tags {
            self.tags.add_tag_to_snippet(*id, tag.clone())?;
        }

        snippet.title = edited.title;
        snippet.description = edited.description;
        snippet.language = edited.language;
        snippet.tags = edited.tags;
        snippet.state = edited.state;
        snippet.update_code(edited.code);
        Ok(())
    }

    pub fn get(&self, id: &Uuid) -> Option<&Snippet> {
        self.snippets.iter().find(|s| s.id == *id)
    }

    pub fn get_mut(&mut self, id: &Uuid) -> Option<&mut Snippet> {
        self.snippets.iter_mut().find(|s| s.id == *id)
    }

    /// Resolves a snippet by id, exact title, then partial title (case-insensitive)
    pub fn find_snippet(&self, name_or_id: &str) -> Option<&Snippet> {
        if let Ok(id) = Uuid::parse_str(name_or_id) {
            return self.get(&id);
        }

        let name = name_or_id.to_lowercase();
        self.snippets
            .iter()
            .find(|s| s.title.to_lowercase() == name)
            .or_else(|| {
                self.snippets
                    .iter()
                    .find(|s| s.title.to_lowercase().contains(&name))
            })
    }

    /// Removes a snippet; its tags stay in the catalog
    pub fn delete_snippet(&mut self, id: &Uuid) -> Option<Snippet> {
        let index = self.snippets.iter().position(|s| s.id == *id)?;
        self.tags.handle_snippet_deleted(id);
        Some(self.snippets.remove(index))
    }

    /// Flips the favorite flag, returning the new value
    pub fn toggle_favorite(&mut self, id: &Uuid) -> Option<bool> {
        self.get_mut(id).map(Snippet::toggle_favorite)
    }

    /// Flips the dark display flag, returning the new value
    pub fn toggle_dark(&mut self, id: &Uuid) -> Option<bool> {
        self.get_mut(id).map(Snippet::toggle_dark)
    }

    pub fn tag_snippet(&mut self, id: &Uuid, tag: String) -> Result<bool> {
        let tag = clean_tag_name(&tag);
        let snippet = self
            .snippets
            .iter_mut()
            .find(|s| s.id == *id)
            .context("Snippet not found")?;
        self.tags.add_tag_to_snippet(*id, tag.clone())?;
        Ok(snippet.add_tag(tag))
    }

    pub fn untag_snippet(&mut self, id: &Uuid, tag: &str) -> Result<bool> {
        let tag = clean_tag_name(tag);
        let tag = tag.as_str();
        let snippet = self
            .snippets
            .iter_mut()
            .find(|s| s.id == *id)
            .context("Snippet not found")?;
        self.tags.remove_tag_from_snippet(id, tag);
        Ok(snippet.remove_tag(tag))
    }

    pub fn rename_tag(&mut self, old: &str, new: String) -> Result<(), TagError> {
        let old = clean_tag_name(old);
        let old = old.as_str();
        let new = clean_tag_name(&new);
        self.tags.rename_tag(old, new.clone())?;
        for snippet in &mut self.snippets {
            snippet.rename_tag(old, &new);
        }
        Ok(())
    }

    /// Deletes a tag and detaches it from every snippet that carried it
    pub fn delete_tag(&mut self, name: &str) -> Result<usize, TagError> {
        let name = clean_tag_name(name);
        let name = name.as_str();
        let affected = self.tags.delete_tag(name)?;
        for snippet in self.snippets.iter_mut().filter(|s| affected.contains(&s.id)) {
            snippet.remove_tag(name);
        }
        Ok(affected.len())
    }
}

/// Storage Manager for disk operations
#[derive(Debug)]
pub struct StorageManager {
    data_dir: PathBuf,
    database_file: PathBuf,
}

impl StorageManager {
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        let database_file = data_dir.join("database.json");

        // Create directories if they don't exist
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;

        Ok(Self {
            data_dir,
            database_file,
        })
    }

    pub fn load_database(&self) -> Result<SnippetDatabase> {
        if !self.database_file.exists() {
            tracing::debug!(path = %self.database_file.display(), "no database yet, starting empty");
            return Ok(SnippetDatabase::default());
        }

        let content =
            fs::read_to_string(&self.database_file).context("Failed to read database file")?;

        let db: SnippetDatabase =
            serde_json::from_str(&content).context("Failed to parse database JSON")?;
        tracing::debug!(
            snippets = db.snippets.len(),
            tags = db.tags.len(),
            "loaded database"
        );
        Ok(db)
    }

    pub fn save_database(&self, db: &SnippetDatabase) -> Result<()> {
        let content = serde_json::to_string_pretty(db).context("Failed to serialize database")?;

        fs::write(&self.database_file, content).context("Failed to write database file")?;
        tracing::info!(path = %self.database_file.display(), "saved database");
        Ok(())
    }

    /// Get the data directory path
    pub fn data_directory(&self) -> &Path {
        &self.data_dir
    }
}
