use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::json;

use snippet_vault::filter::{FilterSet, apply_filters_ref};
use snippet_vault::models::{Snippet, SnippetDatabase, StorageManager, language_display_name};
use snippet_vault::validation::SnippetForm;

use super::{EditArgs, FilterArgs};

fn gutter() -> colored::ColoredString {
    "┃".bright_magenta()
}

fn rule(width: usize) {
    println!("{}", "─".repeat(width).bright_magenta());
}

/// Lists snippets matching the filter flags, in storage order
pub fn list_snippets(storage: &StorageManager, args: &FilterArgs) -> Result<()> {
    let database = storage.load_database()?;
    let filters = args.to_filter_set()?;
    let matched = apply_filters_ref(&database.snippets, &filters);
    tracing::debug!(
        total = database.snippets.len(),
        matched = matched.len(),
        "filtered snippets"
    );

    if args.json {
        let output = json!({ "filters": filters, "snippets": matched });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_active_filters(&filters);

    if matched.is_empty() {
        println!("{}  No snippets found.", gutter());
        return Ok(());
    }

    println!(
        "{}  {} of {} snippets:",
        gutter(),
        matched.len().to_string().bright_white().bold(),
        database.snippets.len()
    );
    rule(60);

    for (idx, snippet) in matched.iter().enumerate() {
        print_summary(idx + 1, snippet);

        if idx < matched.len() - 1 {
            println!("{}  {}", gutter(), "─".repeat(40).bright_black());
        }
    }

    Ok(())
}

fn print_active_filters(filters: &FilterSet) {
    if filters.is_empty() {
        return;
    }

    let labels: Vec<String> = filters.iter().map(|c| c.to_string()).collect();
    println!(
        "{}  {} {}",
        gutter(),
        "FILTERS".bright_yellow(),
        labels.join(" · ")
    );
}

fn print_summary(position: usize, snippet: &Snippet) {
    let star = if snippet.is_favorite() { "★".yellow() } else { " ".normal() };
    println!(
        "{}  {}. {} {}",
        gutter(),
        position.to_string().bright_yellow(),
        star,
        snippet.title.bright_white().bold()
    );
    println!(
        "{}     {}: {}",
        gutter(),
        "Language".bright_green(),
        language_display_name(&snippet.language)
    );
    if !snippet.tags.is_empty() {
        let tags: Vec<String> = snippet.tags.iter().map(|t| format!("#{}", t)).collect();
        println!("{}     {}: {}", gutter(), "Tags".bright_cyan(), tags.join(" "));
    }
    println!(
        "{}     {}: {}",
        gutter(),
        "Created".bright_blue(),
        snippet.created_at.format("%Y-%m-%d %H:%M")
    );
    println!("{}     {}: {}", gutter(), "ID".bright_black(), snippet.id);
}

/// Shows the content of a specific snippet by ID or name
pub fn show_snippet(storage: &StorageManager, name_or_id: &str) -> Result<()> {
    let database = storage.load_database()?;

    let Some(snippet) = database.find_snippet(name_or_id) else {
        print_not_found(&database, name_or_id);
        return Ok(());
    };

    println!(
        "{}  {} {}",
        gutter(),
        "SNIPPET".bright_green().bold(),
        snippet.title.bold()
    );
    rule(60);
    println!(
        "{}  {}: {}",
        gutter(),
        "Language".bright_yellow(),
        language_display_name(&snippet.language)
    );
    if let Some(desc) = &snippet.description {
        println!("{}  {}: {}", gutter(), "Description".bright_cyan(), desc);
    }
    if !snippet.tags.is_empty() {
        println!("{}  {}: {}", gutter(), "Tags".bright_cyan(), snippet.tags.join(", "));
    }
    println!(
        "{}  {}: {}",
        gutter(),
        "Favorite".bright_yellow(),
        if snippet.is_favorite() { "yes" } else { "no" }
    );
    println!(
        "{}  {}: {} ({} lines)",
        gutter(),
        "Updated".bright_blue(),
        snippet.updated_at.format("%Y-%m-%d %H:%M"),
        snippet.get_line_count()
    );
    println!("{}  {}: {}", gutter(), "ID".bright_black(), snippet.id);
    rule(60);

    for line in snippet.code.lines() {
        println!("{}  {}", gutter(), line);
    }

    Ok(())
}

fn print_not_found(database: &SnippetDatabase, name_or_id: &str) {
    println!("{}  No snippet found with name: {}", gutter(), name_or_id);
    if database.snippets.is_empty() {
        return;
    }

    println!("{}  Available snippets:", gutter());
    rule(60);
    for (idx, snippet) in database.snippets.iter().enumerate().take(10) {
        println!(
            "{}  {}. {}",
            gutter(),
            (idx + 1).to_string().yellow(),
            snippet.title.bright_white()
        );
    }
    if database.snippets.len() > 10 {
        println!("{}  ... and {} more", gutter(), database.snippets.len() - 10);
    }
}

pub fn add_snippet(storage: &StorageManager, form: SnippetForm) -> Result<()> {
    let mut database = storage.load_database()?;
    let title = form.title.clone();
    let id = database.add_snippet(form)?;
    storage.save_database(&database)?;

    tracing::info!(%id, "created snippet");
    println!("{}  Created {} ({})", gutter(), title.bright_white().bold(), id);
    Ok(())
}

fn resolve_id(database: &SnippetDatabase, name_or_id: &str) -> Result<uuid::Uuid> {
    database
        .find_snippet(name_or_id)
        .map(|s| s.id)
        .with_context(|| format!("No snippet found with name: {}", name_or_id))
}

pub fn delete_snippet(storage: &StorageManager, name_or_id: &str) -> Result<()> {
    let mut database = storage.load_database()?;
    let id = resolve_id(&database, name_or_id)?;
    let removed = database
        .delete_snippet(&id)
        .context("Snippet disappeared while deleting")?;
    storage.save_database(&database)?;

    tracing::info!(%id, "deleted snippet");
    println!("{}  Deleted {}", gutter(), removed.title.bright_white().bold());
    Ok(())
}

pub fn edit_snippet(storage: &StorageManager, args: EditArgs) -> Result<()> {
    let mut database = storage.load_database()?;
    let id = resolve_id(&database, &args.name)?;
    let current = database
        .get(&id)
        .context("Snippet disappeared while editing")?;
    let form = args.apply_to(current)?;
    let title = form.title.clone();

    database.update_snippet(&id, form)?;
    storage.save_database(&database)?;

    tracing::info!(%id, "updated snippet");
    println!("{}  Updated {}", gutter(), title.bright_white().bold());
    Ok(())
}

pub fn toggle_dark(storage: &StorageManager, name_or_id: &str) -> Result<()> {
    let mut database = storage.load_database()?;
    let id = resolve_id(&database, name_or_id)?;
    let dark = database
        .toggle_dark(&id)
        .context("Snippet disappeared while updating")?;
    storage.save_database(&database)?;

    let theme = if dark { "dark" } else { "light" };
    println!(
        "{}  {} now uses the {} theme",
        gutter(),
        name_or_id.bright_white().bold(),
        theme.bright_cyan()
    );
    Ok(())
}

pub fn toggle_favorite(storage: &StorageManager, name_or_id: &str) -> Result<()> {
    let mut database = storage.load_database()?;
    let id = resolve_id(&database, name_or_id)?;
    let favorite = database
        .toggle_favorite(&id)
        .context("Snippet disappeared while updating")?;
    storage.save_database(&database)?;

    let state = if favorite {
        "added to favorites".bright_green()
    } else {
        "removed from favorites".bright_black()
    };
    println!("{}  {} {}", gutter(), name_or_id.bright_white().bold(), state);
    Ok(())
}

pub fn tag_snippet(storage: &StorageManager, name_or_id: &str, tag: String, remove: bool) -> Result<()> {
    let mut database = storage.load_database()?;
    let id = resolve_id(&database, name_or_id)?;

    let changed = if remove {
        database.untag_snippet(&id, &tag)?
    } else {
        database.tag_snippet(&id, tag.clone())?
    };

    if !changed {
        println!("{}  Nothing to change", gutter());
        return Ok(());
    }

    storage.save_database(&database)?;
    let verb = if remove { "Removed" } else { "Added" };
    println!("{}  {} #{}", gutter(), verb, tag.bright_cyan());
    Ok(())
}

/// Lists the tag catalog with colors and usage counts
pub fn list_tags(storage: &StorageManager) -> Result<()> {
    let database = storage.load_database()?;

    if database.tags.is_empty() {
        println!("{}  No tags yet.", gutter());
        return Ok(());
    }

    println!("{}  {} tags:", gutter(), database.tags.len());
    rule(60);
    for tag in database.tags.sorted() {
        println!(
            "{}  {:<24} {:<9} {} snippet(s)",
            gutter(),
            tag.display_name().bright_cyan(),
            tag.color.as_deref().unwrap_or("-"),
            tag.usage_count()
        );
    }
    Ok(())
}

pub fn create_tag(storage: &StorageManager, name: String, color: Option<String>) -> Result<()> {
    let mut database = storage.load_database()?;
    if let Some(existing) = database.tags.get_by_name(&name) {
        println!("{}  Tag {} already exists", gutter(), existing.display_name().bright_cyan());
        return Ok(());
    }

    let id = database.tags.create_tag(name, color)?;
    storage.save_database(&database)?;
    let created = database
        .tags
        .tags
        .get(&id)
        .map(|tag| tag.display_name())
        .unwrap_or_default();
    println!("{}  Created tag {}", gutter(), created.bright_cyan());
    Ok(())
}

pub fn set_tag_color(storage: &StorageManager, name: &str, color: Option<String>) -> Result<()> {
    let mut database = storage.load_database()?;
    database.tags.set_color(name, color.clone())?;
    storage.save_database(&database)?;
    println!(
        "{}  #{} color: {}",
        gutter(),
        name.bright_cyan(),
        color.as_deref().unwrap_or("none")
    );
    Ok(())
}

pub fn rename_tag(storage: &StorageManager, old: &str, new: String) -> Result<()> {
    let mut database = storage.load_database()?;
    database.rename_tag(old, new.clone())?;
    storage.save_database(&database)?;
    println!("{}  Renamed #{} to #{}", gutter(), old, new.bright_cyan());
    Ok(())
}

pub fn delete_tag(storage: &StorageManager, name: &str) -> Result<()> {
    let mut database = storage.load_database()?;
    let affected = database.delete_tag(name)?;
    storage.save_database(&database)?;
    println!(
        "{}  Deleted tag #{} (detached from {} snippet(s))",
        gutter(),
        name,
        affected
    );
    Ok(())
}
