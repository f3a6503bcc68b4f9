// Retrieval Engine Module
pub mod engine;
pub mod filter;

pub use engine::{RetrievalEngine, RetrievalHit, SearchParams};
pub use filter::{candidate_positions, matches_filters, parse_filter, FilterMap};
