// Query engine: filter -> vectorize -> score -> rank
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::RetrievalConfig;
use crate::rag::corpus::Entry;
use crate::rag::index::TfIdfIndex;
use crate::rag::retrieval::filter::{candidate_positions, FilterMap};

/// Search parameters for retrieval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchParams {
    /// Maximum number of results to return
    pub max_results: usize,
    /// Minimum cosine similarity (inclusive)
    pub similarity_threshold: f32,
    /// Metadata pairs every result must carry
    #[serde(default)]
    pub filters: FilterMap,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self::from(&RetrievalConfig::default())
    }
}

impl From<&RetrievalConfig> for SearchParams {
    fn from(config: &RetrievalConfig) -> Self {
        Self {
            max_results: config.max_results,
            similarity_threshold: config.similarity_threshold as f32,
            filters: FilterMap::new(),
        }
    }
}

/// One ranked match, borrowing its entry from the index
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RetrievalHit<'a> {
    pub entry: &'a Entry,
    /// Position of the entry in corpus order
    pub position: usize,
    pub similarity: f32,
}

/// Read-only query engine over a built index
#[derive(Debug, Clone, Copy)]
pub struct RetrievalEngine<'a> {
    index: &'a TfIdfIndex,
    debug: bool,
}

impl<'a> RetrievalEngine<'a> {
    pub fn new(index: &'a TfIdfIndex) -> Self {
        Self {
            index,
            debug: false,
        }
    }

    /// Log the ranked ids and scores of every query
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Retrieve with explicit parameters
    pub fn retrieve_with_params(
        &self,
        query: &str,
        params: &SearchParams,
    ) -> Vec<RetrievalHit<'a>> {
        self.retrieve(
            query,
            &params.filters,
            params.max_results,
            params.similarity_threshold,
        )
    }

    /// Rank entries against `query`.
    ///
    /// Results hold only candidates passing `filters` with similarity at or
    /// above `similarity_threshold`, sorted by descending similarity (ties in
    /// corpus order) and truncated to `max_results`.
    pub fn retrieve(
        &self,
        query: &str,
        filters: &FilterMap,
        max_results: usize,
        similarity_threshold: f32,
    ) -> Vec<RetrievalHit<'a>> {
        debug!(query, "Received query");

        let candidates = candidate_positions(self.index.entries(), filters);
        if !filters.is_empty() {
            debug!(candidates = candidates.len(), "Entries remaining after filtering");
        }
        if candidates.is_empty() {
            return Vec::new();
        }

        let Some(query_vector) = self.index.query_vector(query) else {
            debug!(query, "No query term is in the vocabulary");
            return Vec::new();
        };

        let index = self.index;
        let threshold = f64::from(similarity_threshold);
        let mut hits: Vec<RetrievalHit<'a>> = candidates
            .into_iter()
            .filter_map(|position| {
                let similarity = index
                    .document_vector(position)?
                    .dot(&query_vector)
                    .clamp(-1.0, 1.0);
                (similarity >= threshold).then(|| RetrievalHit {
                    entry: &index.entries()[position],
                    position,
                    similarity: similarity as f32,
                })
            })
            .collect();

        // Stable sort keeps corpus order among equal scores
        hits.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        hits.truncate(max_results);

        if self.debug {
            let ranked: Vec<String> = hits
                .iter()
                .map(|hit| format!("{}={:.4}", hit.entry.id, hit.similarity))
                .collect();
            debug!(query, results = hits.len(), ranked = %ranked.join(", "), "Top results");
        }

        hits
    }
}
