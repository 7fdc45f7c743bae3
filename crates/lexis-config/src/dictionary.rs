use std::env;

use serde::{Deserialize, Serialize};

/// Remote dictionary resources to keep in sync
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Main lexicon locations, `"<url> [<default-attribute>]"`
    pub main: Vec<String>,
    /// Stop-word locations, plain urls
    pub stop_words: Vec<String>,
}

impl DictionaryConfig {
    pub fn new() -> Self {
        Self {
            main: env::var("REMOTE_EXT_DICT")
                .map(|v| split_locations(&v))
                .unwrap_or_default(),
            stop_words: env::var("REMOTE_EXT_STOPWORDS")
                .map(|v| split_locations(&v))
                .unwrap_or_default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.main.is_empty() && self.stop_words.is_empty()
    }
}

/// Split a `;` separated list, dropping blank entries.
/// Spaces inside an entry are kept since they carry the default attribute.
pub fn split_locations(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
