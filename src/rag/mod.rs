// RAG (Retrieval-Augmented Generation) engine
//
// Lexical TF-IDF retrieval over a structured knowledge corpus.
//
// Components:
// - Tokenizer: lowercase, punctuation-free word tokens
// - Corpus: entry types and the JSON directory loader
// - Index: vocabulary, IDF weights, pre-normalized document vectors
// - Retrieval: metadata filtering, cosine ranking
// - Context: text rendering of ranked results
// - Pipeline: initialize / retrieve / format orchestration

pub mod context;
pub mod corpus;
pub mod index;
pub mod pipeline;
pub mod retrieval;
pub mod tokenizer;

// Re-export key types
pub use context::format_results;
pub use corpus::{CorpusLoader, Entry, LoadReport};
pub use index::{SparseVector, TfIdfIndex, Vocabulary};
pub use pipeline::{IndexStats, RagSystem};
pub use retrieval::{FilterMap, RetrievalEngine, RetrievalHit, SearchParams};
pub use tokenizer::tokenize;
