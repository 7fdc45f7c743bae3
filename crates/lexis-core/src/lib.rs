pub mod attributes;
pub mod command;
pub mod date;
pub mod dictionary;
pub mod error;
pub mod location;
pub mod preprocess;
pub mod state;
pub mod status;
pub mod store;

pub use dictionary::{Applied, CustomDictionary, Dictionaries, StopWordDictionary, apply_command};
pub use error::{ApplyError, AttributeError, LifecycleError, LineError, StoreError};
pub use location::ResourceLocation;
pub use state::CachedValidators;
pub use status::{FetchStatus, SampleError};
pub use store::{MemoryLexicon, WordAttribute};
