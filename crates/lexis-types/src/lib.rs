pub mod types;

pub use types::{DictionaryCategory, ParseCategoryError, UpdateAction, UpdateCommand};
