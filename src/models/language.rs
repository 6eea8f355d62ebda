use serde::{Deserialize, Serialize};

/// Languages the vault knows how to label. Snippets store the canonical
/// lowercase id (see [`SnippetLanguage::id`]) rather than this enum so that
/// languages outside the catalog still round-trip untouched.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SnippetLanguage {
    Rust,
    JavaScript,
    TypeScript,
    Python,
    Go,
    Java,
    C,
    Cpp,
    CSharp,
    PHP,
    Ruby,
    Swift,
    Kotlin,
    HTML,
    CSS,
    SQL,
    Bash,
    Yaml,
    Json,
    Toml,
    Markdown,
    Text,
}

impl SnippetLanguage {
    pub const ALL: [SnippetLanguage; 22] = [
        SnippetLanguage::Rust,
        SnippetLanguage::TypeScript,
        SnippetLanguage::Go,
        SnippetLanguage::JavaScript,
        SnippetLanguage::Python,
        SnippetLanguage::Java,
        SnippetLanguage::C,
        SnippetLanguage::Cpp,
        SnippetLanguage::CSharp,
        SnippetLanguage::PHP,
        SnippetLanguage::Ruby,
        SnippetLanguage::Swift,
        SnippetLanguage::Kotlin,
        SnippetLanguage::HTML,
        SnippetLanguage::CSS,
        SnippetLanguage::SQL,
        SnippetLanguage::Bash,
        SnippetLanguage::Yaml,
        SnippetLanguage::Json,
        SnippetLanguage::Toml,
        SnippetLanguage::Markdown,
        SnippetLanguage::Text,
    ];

    /// Canonical identifier stored on snippets and matched by language filters
    pub fn id(&self) -> &'static str {
        match self {
            SnippetLanguage::Rust => "rust",
            SnippetLanguage::JavaScript => "javascript",
            SnippetLanguage::TypeScript => "typescript",
            SnippetLanguage::Python => "python",
            SnippetLanguage::Go => "go",
            SnippetLanguage::Java => "java",
            SnippetLanguage::C => "c",
            SnippetLanguage::Cpp => "cpp",
            SnippetLanguage::CSharp => "csharp",
            SnippetLanguage::PHP => "php",
            SnippetLanguage::Ruby => "ruby",
            SnippetLanguage::Swift => "swift",
            SnippetLanguage::Kotlin => "kotlin",
            SnippetLanguage::HTML => "html",
            SnippetLanguage::CSS => "css",
            SnippetLanguage::SQL => "sql",
            SnippetLanguage::Bash => "bash",
            SnippetLanguage::Yaml => "yaml",
            SnippetLanguage::Json => "json",
            SnippetLanguage::Toml => "toml",
            SnippetLanguage::Markdown => "markdown",
            SnippetLanguage::Text => "text",
        }
    }

    /// Get file extension for the language
    pub fn file_extension(&self) -> &'static str {
        match self {
            SnippetLanguage::Rust => "rs",
            SnippetLanguage::JavaScript => "js",
            SnippetLanguage::TypeScript => "ts",
            SnippetLanguage::Python => "py",
            SnippetLanguage::Go => "go",
            SnippetLanguage::Java => "java",
            SnippetLanguage::C => "c",
            SnippetLanguage::Cpp => "cpp",
            SnippetLanguage::CSharp => "cs",
            SnippetLanguage::PHP => "php",
            SnippetLanguage::Ruby => "rb",
            SnippetLanguage::Swift => "swift",
            SnippetLanguage::Kotlin => "kt",
            SnippetLanguage::HTML => "html",
            SnippetLanguage::CSS => "css",
            SnippetLanguage::SQL => "sql",
            SnippetLanguage::Bash => "sh",
            SnippetLanguage::Yaml => "yaml",
            SnippetLanguage::Json => "json",
            SnippetLanguage::Toml => "toml",
            SnippetLanguage::Markdown => "md",
            SnippetLanguage::Text => "txt",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SnippetLanguage::Rust => "Rust",
            SnippetLanguage::JavaScript => "JavaScript",
            SnippetLanguage::TypeScript => "TypeScript",
            SnippetLanguage::Python => "Python",
            SnippetLanguage::Go => "Go",
            SnippetLanguage::Java => "Java",
            SnippetLanguage::C => "C",
            SnippetLanguage::Cpp => "C++",
            SnippetLanguage::CSharp => "C#",
            SnippetLanguage::PHP => "PHP",
            SnippetLanguage::Ruby => "Ruby",
            SnippetLanguage::Swift => "Swift",
            SnippetLanguage::Kotlin => "Kotlin",
            SnippetLanguage::HTML => "HTML",
            SnippetLanguage::CSS => "CSS",
            SnippetLanguage::SQL => "SQL",
            SnippetLanguage::Bash => "Bash",
            SnippetLanguage::Yaml => "YAML",
            SnippetLanguage::Json => "JSON",
            SnippetLanguage::Toml => "TOML",
            SnippetLanguage::Markdown => "Markdown",
            SnippetLanguage::Text => "Text",
        }
    }

    /// Look up a language by canonical id, display name or file extension
    pub fn lookup(value: &str) -> Option<Self> {
        let value = value.trim().to_lowercase();
        let value = match value.as_str() {
            "yml" => "yaml",
            "htm" => "html",
            "cc" | "cxx" => "cpp",
            other => other,
        };
        Self::ALL.into_iter().find(|lang| {
            lang.id() == value
                || lang.file_extension() == value
                || lang.display_name().to_lowercase() == value
        })
    }

    /// Get language from a canonical id
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.id() == id)
    }
}

/// Maps user input ("Rust", "rs", " rust ") onto the canonical id.
/// Unknown languages are kept, trimmed and lower-cased.
pub fn normalize_language(input: &str) -> String {
    match SnippetLanguage::lookup(input) {
        Some(lang) => lang.id().to_string(),
        None => match input.trim().to_lowercase().as_str() {
            "conf" => "config".to_string(),
            other => other.to_string(),
        },
    }
}

/// Human label for a stored language id
pub fn language_display_name(id: &str) -> &str {
    match SnippetLanguage::from_id(id) {
        Some(lang) => lang.display_name(),
        None => id,
    }
}
