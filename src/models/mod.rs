pub mod language;
pub mod snippet;
pub mod storage;
pub mod tags;

pub use language::{SnippetLanguage, language_display_name, normalize_language};
pub use snippet::{Snippet, SnippetState};
pub use storage::{SnippetDatabase, StorageManager};
pub use tags::{Tag, TagError, TagManager, clean_tag_name};
