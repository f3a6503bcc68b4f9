// Corpus model and loading
pub mod loader;
pub mod types;

pub use loader::{CorpusLoader, FileOutcome, LoadReport};
pub use types::{Entry, MetadataItem, Relation, Source};
