//! CLI Module for Snippet Vault
//! Argument definitions and dispatch. Each command loads the database,
//! applies one change or query, and saves if anything changed.

pub mod commands;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use snippet_vault::config::Config;
use snippet_vault::filter::{FilterCriterion, FilterSet, end_of_day, start_of_day};
use snippet_vault::models::{Snippet, StorageManager, normalize_language};
use snippet_vault::validation::SnippetForm;

/// Snippet Vault - organize, tag and filter code snippets
#[derive(Debug, Parser)]
#[command(name = "snippet-vault", author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true, env = "SNIPPET_VAULT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding database.json
    #[arg(long, value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List snippets, optionally narrowed by filters
    #[command(visible_alias = "ls")]
    List(FilterArgs),
    /// Search titles, descriptions, code and tags
    #[command(visible_alias = "find")]
    Search { query: String },
    /// List favorite snippets
    #[command(visible_alias = "fav")]
    Favorites,
    /// Display a snippet by id or (partial) title
    #[command(visible_aliases = ["view", "cat"])]
    Show { name: String },
    /// Create a snippet
    Add(AddArgs),
    /// Delete a snippet; its tags are kept
    #[command(visible_alias = "rm")]
    Delete { name: String },
    /// Change a snippet's title, description, language, code or tags
    Edit(EditArgs),
    /// Toggle a snippet's favorite flag
    Favorite { name: String },
    /// Toggle a snippet's dark display flag
    Dark { name: String },
    /// Attach a tag to a snippet (or detach with --remove)
    Tag {
        name: String,
        tag: String,
        #[arg(long)]
        remove: bool,
    },
    /// Manage the tag catalog
    Tags {
        #[command(subcommand)]
        action: Option<TagAction>,
    },
}

#[derive(Debug, Subcommand)]
pub enum TagAction {
    /// List tags with their colors and usage
    List,
    /// Create a tag
    Create {
        name: String,
        /// Color as #RRGGBB
        #[arg(long)]
        color: Option<String>,
    },
    /// Set or clear a tag's color
    Color {
        name: String,
        /// Color as #RRGGBB; omit to clear
        color: Option<String>,
    },
    /// Rename a tag everywhere it is used
    Rename { old: String, new: String },
    /// Delete a tag and detach it from all snippets
    Delete { name: String },
}

#[derive(Debug, Default, Args)]
pub struct FilterArgs {
    /// Case-insensitive text to look for
    #[arg(short, long)]
    pub search: Option<String>,

    /// Language to include (repeatable)
    #[arg(short, long = "language", value_name = "LANG")]
    pub languages: Vec<String>,

    /// Tag to include; a snippet needs any one of them (repeatable)
    #[arg(short, long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// Only favorites
    #[arg(short, long)]
    pub favorites: bool,

    /// Created on or after (YYYY-MM-DD or RFC 3339)
    #[arg(long, value_name = "DATE")]
    pub from: Option<String>,

    /// Created on or before (YYYY-MM-DD or RFC 3339)
    #[arg(long, value_name = "DATE")]
    pub to: Option<String>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl FilterArgs {
    pub fn to_filter_set(&self) -> Result<FilterSet> {
        let mut filters = FilterSet::new();

        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            filters.set(FilterCriterion::search(search));
        }
        if !self.languages.is_empty() {
            filters.set(FilterCriterion::languages(
                self.languages.iter().map(|lang| normalize_language(lang)),
            ));
        }
        if !self.tags.is_empty() {
            filters.set(FilterCriterion::tags(self.tags.iter().cloned()));
        }
        if self.favorites {
            filters.set(FilterCriterion::favorite(true));
        }
        if self.from.is_some() || self.to.is_some() {
            let start = match &self.from {
                Some(from) => parse_date_bound(from, false)?,
                None => DateTime::<Utc>::MIN_UTC,
            };
            let end = match &self.to {
                Some(to) => parse_date_bound(to, true)?,
                None => DateTime::<Utc>::MAX_UTC,
            };
            filters.set(FilterCriterion::date_range(start, end));
        }

        Ok(filters)
    }
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub title: String,

    #[arg(short, long)]
    pub language: String,

    /// Code body
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    pub code: Option<String>,

    /// Read the code body from a file
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    #[arg(short, long)]
    pub description: Option<String>,

    /// Tag to attach (repeatable)
    #[arg(short, long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    #[arg(long)]
    pub favorite: bool,

    /// Display the snippet with a dark theme
    #[arg(long)]
    pub dark: bool,
}

impl AddArgs {
    pub fn into_form(self) -> Result<SnippetForm> {
        let code = match (self.code, &self.file) {
            (Some(code), _) => code,
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
            (None, None) => String::new(),
        };

        Ok(SnippetForm {
            title: self.title,
            description: self.description,
            language: self.language,
            code,
            tags: self.tags,
            is_favorite: self.favorite,
            is_dark: self.dark,
        })
    }
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Snippet id or (partial) title
    pub name: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(short, long)]
    pub language: Option<String>,

    /// New code body
    #[arg(long, conflicts_with = "file")]
    pub code: Option<String>,

    /// Read the new code body from a file
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// New description; an empty value clears it
    #[arg(short, long)]
    pub description: Option<String>,

    /// Replace the tag list (repeatable)
    #[arg(short, long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// Remove every tag
    #[arg(long, conflicts_with = "tags")]
    pub clear_tags: bool,
}

impl EditArgs {
    /// Builds a full form from the current snippet with the given flags applied
    pub fn apply_to(self, current: &Snippet) -> Result<SnippetForm> {
        let code = match (self.code, &self.file) {
            (Some(code), _) => code,
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
            (None, None) => current.code.clone(),
        };
        let tags = if self.clear_tags {
            Vec::new()
        } else if self.tags.is_empty() {
            current.tags.clone()
        } else {
            self.tags
        };

        Ok(SnippetForm {
            title: self.title.unwrap_or_else(|| current.title.clone()),
            description: self.description.or_else(|| current.description.clone()),
            language: self.language.unwrap_or_else(|| current.language.clone()),
            code,
            tags,
            is_favorite: current.state.is_favorite,
            is_dark: current.state.is_dark,
        })
    }
}

/// `--from` dates start at midnight, `--to` dates run to the end of the day
pub fn parse_date_bound(value: &str, end: bool) -> Result<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD or RFC 3339", value))?;
    Ok(if end {
        end_of_day(date)
    } else {
        start_of_day(date)
    })
}

/// Executes the parsed command against the configured storage
pub fn execute_cli(cli: Cli, config: &Config) -> Result<()> {
    let data_dir = config.resolve_data_dir(cli.data_dir.as_deref())?;
    let storage = StorageManager::new(data_dir)?;
    tracing::debug!(data_dir = %storage.data_directory().display(), command = ?cli.command, "running command");

    match cli.command {
        Commands::List(args) => commands::list_snippets(&storage, &args),
        Commands::Search { query } => commands::list_snippets(
            &storage,
            &FilterArgs {
                search: Some(query),
                ..Default::default()
            },
        ),
        Commands::Favorites => commands::list_snippets(
            &storage,
            &FilterArgs {
                favorites: true,
                ..Default::default()
            },
        ),
        Commands::Show { name } => commands::show_snippet(&storage, &name),
        Commands::Add(args) => commands::add_snippet(&storage, args.into_form()?),
        Commands::Delete { name } => commands::delete_snippet(&storage, &name),
        Commands::Edit(args) => commands::edit_snippet(&storage, args),
        Commands::Favorite { name } => commands::toggle_favorite(&storage, &name),
        Commands::Dark { name } => commands::toggle_dark(&storage, &name),
        Commands::Tag { name, tag, remove } => commands::tag_snippet(&storage, &name, tag, remove),
        Commands::Tags { action } => match action.unwrap_or(TagAction::List) {
            TagAction::List => commands::list_tags(&storage),
            TagAction::Create { name, color } => commands::create_tag(&storage, name, color),
            TagAction::Color { name, color } => commands::set_tag_color(&storage, &name, color),
            TagAction::Rename { old, new } => commands::rename_tag(&storage, &old, new),
            TagAction::Delete { name } => commands::delete_tag(&storage, &name),
        },
    }
}
