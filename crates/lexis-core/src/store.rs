use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use crate::dictionary::{CustomDictionary, StopWordDictionary};
use crate::error::StoreError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordAttribute {
    pub name: String,
    pub frequency: i32,
}

/// In-memory main lexicon and stop-word set.
///
/// Safe for concurrent writers; every call locks for a single word.
#[derive(Debug, Default)]
pub struct MemoryLexicon {
    words: RwLock<HashMap<String, Vec<WordAttribute>>>,
    stop_words: RwLock<HashSet<String>>,
}

impl MemoryLexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attributes of a main-lexicon word
    pub fn lookup(&self, word: &str) -> Option<Vec<WordAttribute>> {
        self.words.read().ok()?.get(word).cloned()
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words
            .read()
            .map(|set| set.contains(word))
            .unwrap_or(false)
    }

    pub fn word_count(&self) -> usize {
        self.words.read().map(|w| w.len()).unwrap_or(0)
    }

    pub fn stop_word_count(&self) -> usize {
        self.stop_words.read().map(|s| s.len()).unwrap_or(0)
    }
}

fn parse_attributes(attributes: &str) -> Result<Vec<WordAttribute>, StoreError> {
    let malformed = || StoreError::MalformedAttributes(attributes.to_string());

    let tokens: Vec<&str> = attributes.split_ascii_whitespace().collect();
    if tokens.is_empty() || tokens.len() % 2 != 0 {
        return Err(malformed());
    }

    tokens
        .chunks(2)
        .map(|pair| -> Result<WordAttribute, StoreError> {
            let frequency: i32 = pair[1].parse().map_err(|_| malformed())?;
            Ok(WordAttribute {
                name: pair[0].to_string(),
                frequency,
            })
        })
        .collect()
}

impl CustomDictionary for MemoryLexicon {
    fn insert(&self, word: &str, attributes: &str) -> Result<(), StoreError> {
        if word.is_empty() {
            return Err(StoreError::EmptyWord);
        }
        let parsed = parse_attributes(attributes)?;

        let mut words = self.words.write().map_err(|_| StoreError::Poisoned)?;
        words.insert(word.to_string(), parsed);
        Ok(())
    }

    fn remove(&self, word: &str) -> Result<(), StoreError> {
        let mut words = self.words.write().map_err(|_| StoreError::Poisoned)?;
        words.remove(word);
        Ok(())
    }
}

impl StopWordDictionary for MemoryLexicon {
    fn contains(&self, word: &str) -> bool {
        self.is_stop_word(word)
    }

    fn add(&self, word: &str) -> Result<(), StoreError> {
        if word.is_empty() {
            return Err(StoreError::EmptyWord);
        }
        let mut set = self.stop_words.write().map_err(|_| StoreError::Poisoned)?;
        set.insert(word.to_string());
        Ok(())
    }

    fn remove(&self, word: &str) -> Result<(), StoreError> {
        let mut set = self.stop_words.write().map_err(|_| StoreError::Poisoned)?;
        set.remove(word);
        Ok(())
    }
}
