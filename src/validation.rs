//! Form validation for snippets and tags.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Snippet, clean_tag_name};

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("hex color pattern is valid"));

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("tag names must not be empty")]
    EmptyTag,
    #[error("'{0}' is not a #RRGGBB color")]
    InvalidColor(String),
}

/// User input for creating a snippet, before it gets an id and timestamps
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnippetForm {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub language: String,
    pub code: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub is_dark: bool,
}

impl SnippetForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("title", &self.title)?;
        require("language", &self.language)?;
        require("code", &self.code)?;

        if self.tags.iter().any(|tag| clean_tag_name(tag).is_empty()) {
            return Err(ValidationError::EmptyTag);
        }

        Ok(())
    }

    /// Validates the form and builds a fresh snippet from it
    pub fn into_snippet(self) -> Result<Snippet, ValidationError> {
        self.validate()?;

        let mut snippet = Snippet::new(self.title.trim(), &self.language, self.code)
            .with_tags(self.tags.iter().map(|tag| clean_tag_name(tag)));
        snippet.description = self
            .description
            .map(|desc| desc.trim().to_string())
            .filter(|desc| !desc.is_empty());
        snippet.state.is_favorite = self.is_favorite;
        snippet.state.is_dark = self.is_dark;

        Ok(snippet)
    }
}

pub fn validate_tag_form(name: &str, color: Option<&str>) -> Result<(), ValidationError> {
    require("tag name", name)?;
    if let Some(color) = color {
        if !HEX_COLOR.is_match(color) {
            return Err(ValidationError::InvalidColor(color.to_string()));
        }
    }
    Ok(())
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> SnippetForm {
        SnippetForm {
            title: "Hello".into(),
            language: "JavaScript".into(),
            code: "console.log(1)".into(),
            tags: vec!["#web".into()],
            ..Default::default()
        }
    }

    #[test]
    fn valid_form_builds_snippet() {
        let mut input = form();
        input.description = Some("  ".into());
        input.is_favorite = true;

        let snippet = input.into_snippet().unwrap();
        assert_eq!(snippet.language, "javascript");
        assert_eq!(snippet.tags, vec!["web"]);
        assert!(snippet.description.is_none());
        assert!(snippet.is_favorite());
    }

    #[test]
    fn required_fields_are_checked() {
        let mut input = form();
        input.title = "   ".into();
        assert_eq!(input.validate(), Err(ValidationError::Required("title")));

        let mut input = form();
        input.code.clear();
        assert_eq!(input.validate(), Err(ValidationError::Required("code")));

        let mut input = form();
        input.tags.push(String::new());
        assert_eq!(input.validate(), Err(ValidationError::EmptyTag));

        let mut input = form();
        input.tags.push(" # ".into());
        assert_eq!(input.validate(), Err(ValidationError::EmptyTag));
    }

    #[test]
    fn tag_colors_must_be_hex() {
        assert!(validate_tag_form("web", Some("#A1b2C3")).is_ok());
        assert!(validate_tag_form("web", None).is_ok());
        assert_eq!(
            validate_tag_form("web", Some("#abc")),
            Err(ValidationError::InvalidColor("#abc".into()))
        );
        assert_eq!(
            validate_tag_form("", None),
            Err(ValidationError::Required("tag name"))
        );
    }
}
