use std::path::Path;

use anyhow::Context;
use pdfsift_core::{DEFAULT_MAX_CHUNK_WORDS, TOP_KEYWORDS};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub chunking: ChunkingConfig,
    pub keywords: KeywordsConfig,
    pub wiki: WikiConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Soft word budget per chunk.
    pub max_chunk_words: usize,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct KeywordsConfig {
    /// Keywords reported per document and per chunk.
    pub top_keywords: usize,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct WikiConfig {
    /// Override for the MediaWiki API endpoint.
    pub base_url: Option<String>,
    /// Per-request timeout for verification lookups.
    pub timeout_secs: u64,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chunk_words: DEFAULT_MAX_CHUNK_WORDS,
        }
    }
}

impl Default for KeywordsConfig {
    fn default() -> Self {
        Self {
            top_keywords: TOP_KEYWORDS,
        }
    }
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: 10,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file with env var overrides.
    ///
    /// Falls back to defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str::<Self>(&content).context("failed to parse config file")?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("PDFSIFT_WIKI_BASE_URL") {
            self.wiki.base_url = Some(v);
        }
        if let Ok(v) = std::env::var("PDFSIFT_MAX_CHUNK_WORDS")
            && let Ok(words) = v.parse()
        {
            self.chunking.max_chunk_words = words;
        }
        if let Ok(v) = std::env::var("PDFSIFT_TOP_KEYWORDS")
            && let Ok(n) = v.parse()
        {
            self.keywords.top_keywords = n;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_file_missing() {
        let config = Config::load(Path::new("/nonexistent/pdfsift.toml")).unwrap();
        assert_eq!(config.chunking.max_chunk_words, DEFAULT_MAX_CHUNK_WORDS);
        assert_eq!(config.keywords.top_keywords, TOP_KEYWORDS);
        assert_eq!(config.wiki.timeout_secs, 10);
        assert!(config.wiki.base_url.is_none());
    }

    #[test]
    fn parses_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pdfsift.toml");
        std::fs::write(&path, "[chunking]\nmax_chunk_words = 120\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.chunking.max_chunk_words, 120);
        assert_eq!(config.keywords.top_keywords, TOP_KEYWORDS);
        assert_eq!(config.wiki.timeout_secs, 10);
    }

    #[test]
    fn parses_keyword_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pdfsift.toml");
        std::fs::write(&path, "[keywords]\ntop_keywords = 3\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.keywords.top_keywords, 3);
        assert_eq!(config.chunking.max_chunk_words, DEFAULT_MAX_CHUNK_WORDS);
    }

    #[test]
    fn rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pdfsift.toml");
        std::fs::write(&path, "chunking = zzz").unwrap();

        assert!(Config::load(&path).is_err());
    }
}
