//! Service configuration from environment variables.

use std::env;
use std::path::Path;

/// Default system prompt file name.
pub const DEFAULT_PROMPT_FILE: &str = "SYSTEM_PROMPT.md";

/// Configuration for the API server.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Listen address.
    pub addr: String,

    /// SQLite database URL.
    pub database_url: String,

    /// Path to the document corpus, if retrieval is enabled.
    pub docs_path: Option<String>,

    /// System prompt applied to every generation call.
    pub system_prompt: Option<String>,

    /// Documents returned per retrieval query.
    pub retrieval_top_k: usize,

    /// Seconds a session lives before the cleanup sweep drops it.
    pub session_ttl_secs: u64,

    /// Maximum number of tracked sessions before LRU eviction.
    pub max_sessions: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:8000".to_string(),
            database_url: "sqlite:data/feedback.db?mode=rwc".to_string(),
            docs_path: None,
            system_prompt: None,
            retrieval_top_k: 3,
            session_ttl_secs: 86400,
            max_sessions: 10000,
        }
    }
}

impl ApiConfig {
    /// Create configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `RAGCHAT_ADDR` - listen address (default: 127.0.0.1:8000)
    /// - `RAGCHAT_DB_URL` - SQLite URL (default: sqlite:data/feedback.db?mode=rwc)
    /// - `RAGCHAT_DOCS_PATH` - document corpus path (retrieval disabled when unset)
    /// - `RAGCHAT_SYSTEM_PROMPT` - system prompt (overrides prompt file)
    /// - `RAGCHAT_PROMPT_FILE` - path to system prompt file (default: SYSTEM_PROMPT.md)
    /// - `RAGCHAT_RETRIEVAL_TOP_K` - documents per query (default: 3)
    /// - `RAGCHAT_SESSION_TTL_SECS` - session lifetime (default: 86400)
    /// - `RAGCHAT_MAX_SESSIONS` - tracked session cap (default: 10000)
    ///
    /// System prompt priority:
    /// 1. `RAGCHAT_SYSTEM_PROMPT` env var (if set)
    /// 2. Contents of prompt file (if exists)
    /// 3. None
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let addr = env::var("RAGCHAT_ADDR").unwrap_or(defaults.addr);
        let database_url = env::var("RAGCHAT_DB_URL").unwrap_or(defaults.database_url);

        let docs_path = env::var("RAGCHAT_DOCS_PATH")
            .ok()
            .filter(|path| !path.trim().is_empty());

        let system_prompt = if let Ok(prompt) = env::var("RAGCHAT_SYSTEM_PROMPT") {
            Some(prompt)
        } else {
            let prompt_file = env::var("RAGCHAT_PROMPT_FILE")
                .unwrap_or_else(|_| DEFAULT_PROMPT_FILE.to_string());
            load_prompt_file(prompt_file)
        };

        let retrieval_top_k = env::var("RAGCHAT_RETRIEVAL_TOP_K")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.retrieval_top_k);

        let session_ttl_secs = env::var("RAGCHAT_SESSION_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.session_ttl_secs);

        let max_sessions = env::var("RAGCHAT_MAX_SESSIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_sessions);

        Self {
            addr,
            database_url,
            docs_path,
            system_prompt,
            retrieval_top_k,
            session_ttl_secs,
            max_sessions,
        }
    }
}

/// Load a prompt file, returning None if not found or empty.
fn load_prompt_file(path: impl AsRef<Path>) -> Option<String> {
    let path = path.as_ref();

    match std::fs::read_to_string(path) {
        Ok(content) => {
            let trimmed = content.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.addr, "127.0.0.1:8000");
        assert_eq!(config.retrieval_top_k, 3);
        assert_eq!(config.session_ttl_secs, 86400);
        assert!(config.docs_path.is_none());
        assert!(config.system_prompt.is_none());
    }

    #[test]
    fn test_missing_prompt_file() {
        assert!(load_prompt_file("does-not-exist.md").is_none());
    }
}
