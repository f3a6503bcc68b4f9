//! ragbuddy - Knowledge-base retrieval for local chat agents
//!
//! Loads a directory of JSON knowledge entries, builds a TF-IDF index over
//! them and answers free-text queries with ranked, metadata-filtered matches.
//!
//! # Architecture
//!
//! - **rag**: tokenizer, corpus loader, index, query engine, formatter
//! - **config**: TOML configuration passed into the engine
//! - **cli**: command-line front end for the `ragbuddy` binary

pub mod errors;

// Re-export commonly used types
pub use errors::{RagError, Result};

pub mod cli;
pub mod config;
pub mod rag;

pub use config::RagConfig;
pub use rag::{FilterMap, RagSystem, RetrievalHit};
