//! Document loading, scoring, and snippet extraction.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Largest file size loaded into the index.
const MAX_BYTES: u64 = 512 * 1024;

/// Largest number of characters kept per document.
const MAX_CHARS: usize = 8000;

/// Characters of context kept before the first query hit in a snippet.
const SNIPPET_LEAD_CHARS: usize = 160;

/// Total snippet window size in characters.
const SNIPPET_CHARS: usize = 400;

/// Default number of documents returned per query.
const DEFAULT_TOP_K: usize = 3;

/// Errors that can occur while building the index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The index path does not exist.
    #[error("index path not found: {0}")]
    NotFound(String),

    /// A file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A source attribution returned with retrieved context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    /// Document title (file stem).
    pub title: String,
    /// Document location, in path form.
    pub url: String,
    /// The snippet that matched.
    pub content: String,
}

/// Retrieved context for one query.
#[derive(Debug, Clone, Default)]
pub struct ContextBundle {
    /// Snippets joined into one context block for prompt assembly.
    pub context: String,
    /// Source attributions, best match first.
    pub sources: Vec<SourceRef>,
}

struct DocEntry {
    title: String,
    url: String,
    text: String,
    text_lower: String,
}

/// In-memory keyword index over a set of plain-text documents.
pub struct DocumentIndex {
    entries: Vec<DocEntry>,
    top_k: usize,
}

impl DocumentIndex {
    /// Build an index with no documents.
    ///
    /// Every query returns an empty [`ContextBundle`]; the chat flow still
    /// proceeds without context.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Load an index from a file or directory.
    ///
    /// Directories are walked recursively; `.txt`, `.md`, `.markdown`, and
    /// `.jsonl` files under the size cap are indexed. Empty and oversized
    /// files are skipped.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, IndexError> {
        let path = path.as_ref();

        if path.is_file() {
            let entries = load_file(path)?.into_iter().collect();
            return Ok(Self {
                entries,
                top_k: DEFAULT_TOP_K,
            });
        }

        if !path.is_dir() {
            return Err(IndexError::NotFound(path.display().to_string()));
        }

        let mut entries = Vec::new();
        for entry in WalkDir::new(path).into_iter().filter_map(Result::ok) {
            let path = entry.path();
            if !path.is_file() || !is_supported_path(path) {
                continue;
            }
            if let Ok(Some(doc)) = load_file(path) {
                entries.push(doc);
            }
        }

        info!(documents = entries.len(), "Loaded document index");

        Ok(Self {
            entries,
            top_k: DEFAULT_TOP_K,
        })
    }

    /// Set how many documents a query returns.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.max(1);
        self
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no documents.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Retrieve context for a query.
    ///
    /// Scores every document by query-token occurrence count, keeps the
    /// top-k positive scorers, and builds a snippet around each one's first
    /// hit. No hits yield an empty bundle.
    pub fn retrieve(&self, query: &str) -> ContextBundle {
        let tokens = tokenize(query);
        if tokens.is_empty() {
            return ContextBundle::default();
        }

        let mut scored: Vec<(&DocEntry, usize)> = self
            .entries
            .iter()
            .filter_map(|entry| {
                let score = tokens
                    .iter()
                    .map(|token| entry.text_lower.matches(token.as_str()).count())
                    .sum::<usize>();
                (score > 0).then_some((entry, score))
            })
            .collect();

        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.truncate(self.top_k);

        debug!(matches = scored.len(), "Retrieved context");

        let sources: Vec<SourceRef> = scored
            .iter()
            .map(|(entry, _)| SourceRef {
                title: entry.title.clone(),
                url: entry.url.clone(),
                content: build_snippet(entry, &tokens),
            })
            .collect();

        let context = sources
            .iter()
            .map(|source| source.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        ContextBundle { context, sources }
    }
}

fn is_supported_path(path: &Path) -> bool {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => matches!(
            ext.to_ascii_lowercase().as_str(),
            "txt" | "md" | "markdown" | "jsonl"
        ),
        None => false,
    }
}

fn load_file(path: &Path) -> Result<Option<DocEntry>, IndexError> {
    let metadata = fs::metadata(path)?;
    if metadata.len() == 0 || metadata.len() > MAX_BYTES {
        return Ok(None);
    }

    let text = fs::read_to_string(path)?;
    let capped: String = text.chars().take(MAX_CHARS).collect();
    if capped.trim().is_empty() {
        return Ok(None);
    }

    let title = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("document")
        .to_string();

    Ok(Some(DocEntry {
        title,
        url: path.display().to_string(),
        text_lower: capped.to_ascii_lowercase(),
        text: capped,
    }))
}

fn tokenize(query: &str) -> Vec<String> {
    query
        .to_ascii_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|token| token.len() > 2)
        .take(8)
        .map(|token| token.to_string())
        .collect()
}

fn build_snippet(entry: &DocEntry, tokens: &[String]) -> String {
    let lower = &entry.text_lower;
    let mut first_hit = None;
    for token in tokens {
        if let Some(idx) = lower.find(token.as_str()) {
            first_hit = Some(idx);
            break;
        }
    }

    match first_hit {
        Some(idx) => {
            let prefix = entry.text.get(..idx).unwrap_or(&entry.text);
            let start_chars = prefix.chars().count().saturating_sub(SNIPPET_LEAD_CHARS);
            let total_chars = entry.text.chars().count();
            let end_chars = (start_chars + SNIPPET_CHARS).min(total_chars);
            entry
                .text
                .chars()
                .skip(start_chars)
                .take(end_chars.saturating_sub(start_chars))
                .collect::<String>()
                .trim()
                .to_string()
        }
        None => entry.text.chars().take(SNIPPET_CHARS).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, text: &str) -> DocEntry {
        DocEntry {
            title: title.to_string(),
            url: format!("docs/{}.md", title),
            text: text.to_string(),
            text_lower: text.to_ascii_lowercase(),
        }
    }

    fn index_of(entries: Vec<DocEntry>) -> DocumentIndex {
        DocumentIndex {
            entries,
            top_k: DEFAULT_TOP_K,
        }
    }

    #[test]
    fn test_tokenize_drops_short_tokens() {
        let tokens = tokenize("Is it a rust question?");
        assert_eq!(tokens, vec!["rust", "question"]);
    }

    #[test]
    fn test_tokenize_caps_token_count() {
        let tokens = tokenize("one two three four five six seven eight nine ten");
        assert_eq!(tokens.len(), 8);
    }

    #[test]
    fn test_retrieve_ranks_by_occurrence_count() {
        let index = index_of(vec![
            entry("weak", "rust appears once here"),
            entry("strong", "rust rust rust everywhere rust"),
        ]);

        let bundle = index.retrieve("tell me about rust");
        assert_eq!(bundle.sources[0].title, "strong");
        assert_eq!(bundle.sources.len(), 2);
    }

    #[test]
    fn test_retrieve_respects_top_k() {
        let index = index_of(vec![
            entry("a", "cargo builds things"),
            entry("b", "cargo tests things"),
            entry("c", "cargo runs things"),
        ])
        .with_top_k(2);

        let bundle = index.retrieve("cargo");
        assert_eq!(bundle.sources.len(), 2);
    }

    #[test]
    fn test_retrieve_without_hits() {
        let index = index_of(vec![entry("a", "nothing relevant")]);
        let bundle = index.retrieve("quantum chromodynamics");

        assert!(bundle.context.is_empty());
        assert!(bundle.sources.is_empty());
    }

    #[test]
    fn test_retrieve_on_empty_index() {
        let bundle = DocumentIndex::empty().retrieve("anything at all");
        assert!(bundle.sources.is_empty());
    }

    #[test]
    fn test_context_joins_snippets() {
        let index = index_of(vec![
            entry("a", "ownership is a core rust concept"),
            entry("b", "borrowing is another rust concept"),
        ]);

        let bundle = index.retrieve("rust concept");
        assert!(bundle.context.contains("ownership"));
        assert!(bundle.context.contains("borrowing"));
        assert!(bundle.context.contains("\n\n"));
    }

    #[test]
    fn test_snippet_window_around_hit() {
        let padding = "x".repeat(1000);
        let text = format!("{} the answer is borrowing {}", padding, padding);
        let index = index_of(vec![entry("long", &text)]);

        let bundle = index.retrieve("borrowing");
        let snippet = &bundle.sources[0].content;
        assert!(snippet.contains("borrowing"));
        assert!(snippet.chars().count() <= SNIPPET_CHARS);
    }

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported_path(Path::new("notes.md")));
        assert!(is_supported_path(Path::new("notes.TXT")));
        assert!(!is_supported_path(Path::new("notes.pdf")));
        assert!(!is_supported_path(Path::new("Makefile")));
    }
}
