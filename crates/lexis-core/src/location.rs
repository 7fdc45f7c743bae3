use std::fmt;

use lexis_types::DictionaryCategory;

/// A configured remote resource.
///
/// Main dictionary locations may carry a default attribute after the url,
/// `"http://host/words.dic nz"`. Stop-word locations are taken verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLocation {
    raw: String,
    category: DictionaryCategory,
    base_path: String,
    default_attribute: Option<String>,
}

impl ResourceLocation {
    pub fn parse(category: DictionaryCategory, raw: &str) -> Self {
        let (base_path, default_attribute) = match category {
            DictionaryCategory::StopWord => (raw.to_string(), None),
            DictionaryCategory::Main => match raw.find(' ') {
                Some(cut) if cut > 0 => {
                    let attribute = raw[cut + 1..].trim();
                    let attribute = (!attribute.is_empty()).then(|| attribute.to_string());
                    (raw[..cut].to_string(), attribute)
                }
                _ => (raw.to_string(), None),
            },
        };

        Self {
            raw: raw.to_string(),
            category,
            base_path,
            default_attribute,
        }
    }

    pub fn category(&self) -> DictionaryCategory {
        self.category
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Url of the full fetch
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Url of the change check: the raw string up to its first whitespace
    pub fn probe_path(&self) -> &str {
        self.raw.split_ascii_whitespace().next().unwrap_or_default()
    }

    /// Attribute for words without explicit ones, `None` for stop words
    pub fn default_attribute(&self) -> Option<&str> {
        self.default_attribute
            .as_deref()
            .or_else(|| self.category.default_attribute())
    }
}

impl fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.category, self.raw)
    }
}
