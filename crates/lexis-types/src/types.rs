use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which logical word list an update batch targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DictionaryCategory {
    /// Main lexicon, words carry attributes
    Main,
    /// Stop-word set, plain words
    StopWord,
}

impl DictionaryCategory {
    /// Stable type code used in configuration and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            DictionaryCategory::Main => "custom",
            DictionaryCategory::StopWord => "stop",
        }
    }

    /// Numeric id reported to the status collector
    pub fn code(&self) -> u8 {
        match self {
            DictionaryCategory::Main => 0,
            DictionaryCategory::StopWord => 1,
        }
    }

    /// Fallback attribute for words that arrive without one
    pub fn default_attribute(&self) -> Option<&'static str> {
        match self {
            DictionaryCategory::Main => Some("n"),
            DictionaryCategory::StopWord => None,
        }
    }
}

impl fmt::Display for DictionaryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown dictionary category `{0}`")]
pub struct ParseCategoryError(pub String);

impl FromStr for DictionaryCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "custom" => Ok(DictionaryCategory::Main),
            "stop" => Ok(DictionaryCategory::StopWord),
            other => Err(ParseCategoryError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateAction {
    Skip,
    Add,
    Delete,
}

impl UpdateAction {
    /// Keyword as it appears in the second column of an update line
    pub fn keyword(&self) -> &'static str {
        match self {
            UpdateAction::Skip => "skip",
            UpdateAction::Add => "add",
            UpdateAction::Delete => "delete",
        }
    }

    /// Only `add` and `delete` may be spelled out on a line
    pub fn from_keyword(token: &str) -> Option<Self> {
        match token {
            "add" => Some(UpdateAction::Add),
            "delete" => Some(UpdateAction::Delete),
            _ => None,
        }
    }
}

/// One parsed dictionary line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCommand {
    pub word: String,
    pub action: UpdateAction,
    /// Alternating attribute name / frequency tokens
    pub attribute_tokens: Vec<String>,
}

impl UpdateCommand {
    pub fn skip() -> Self {
        Self {
            word: String::new(),
            action: UpdateAction::Skip,
            attribute_tokens: vec![],
        }
    }

    pub fn is_skip(&self) -> bool {
        self.action == UpdateAction::Skip
    }
}
