use std::sync::Arc;

use lexis_types::{DictionaryCategory, UpdateAction, UpdateCommand};

use crate::attributes::resolve_attributes;
use crate::error::{ApplyError, StoreError};

/// Main lexicon operations consumed by the synchronizer
pub trait CustomDictionary: Send + Sync {
    /// Insert or replace a word with its joined `"attr freq ..."` string
    fn insert(&self, word: &str, attributes: &str) -> Result<(), StoreError>;

    fn remove(&self, word: &str) -> Result<(), StoreError>;
}

/// Stop-word set operations consumed by the synchronizer
pub trait StopWordDictionary: Send + Sync {
    fn contains(&self, word: &str) -> bool;

    fn add(&self, word: &str) -> Result<(), StoreError>;

    fn remove(&self, word: &str) -> Result<(), StoreError>;
}

/// The stores a synchronizer writes into
#[derive(Clone)]
pub struct Dictionaries {
    pub main: Arc<dyn CustomDictionary>,
    pub stop_words: Arc<dyn StopWordDictionary>,
}

impl Dictionaries {
    pub fn new(main: Arc<dyn CustomDictionary>, stop_words: Arc<dyn StopWordDictionary>) -> Self {
        Self { main, stop_words }
    }

    /// Use one store for both lists
    pub fn shared<S>(store: Arc<S>) -> Self
    where
        S: CustomDictionary + StopWordDictionary + 'static,
    {
        Self {
            main: store.clone(),
            stop_words: store,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The command changed, or confirmed, the dictionary
    Updated,
    Skipped,
}

/// Apply one command to the dictionary selected by `category`.
///
/// Stop words are only added when missing and only removed when present.
pub fn apply_command(
    dictionaries: &Dictionaries,
    category: DictionaryCategory,
    default_attribute: &str,
    command: &UpdateCommand,
) -> Result<Applied, ApplyError> {
    let word = command.word.as_str();

    match (category, command.action) {
        (_, UpdateAction::Skip) => return Ok(Applied::Skipped),
        (DictionaryCategory::Main, UpdateAction::Add) => {
            let attributes = resolve_attributes(default_attribute, &command.attribute_tokens)?;
            dictionaries.main.insert(word, &attributes)?;
        }
        (DictionaryCategory::Main, UpdateAction::Delete) => {
            dictionaries.main.remove(word)?;
        }
        (DictionaryCategory::StopWord, UpdateAction::Add) => {
            if !dictionaries.stop_words.contains(word) {
                dictionaries.stop_words.add(word)?;
            }
        }
        (DictionaryCategory::StopWord, UpdateAction::Delete) => {
            if dictionaries.stop_words.contains(word) {
                dictionaries.stop_words.remove(word)?;
            }
        }
    }

    tracing::trace!("{} {} {}", category, command.action.keyword(), word);
    Ok(Applied::Updated)
}
