// TF-IDF index: vocabulary, IDF weights and pre-normalized document vectors
pub mod vector;
pub mod vocabulary;

use std::collections::BTreeMap;
use tracing::info;

use crate::rag::corpus::Entry;
use crate::rag::tokenizer::tokenize;

pub use vector::SparseVector;
pub use vocabulary::{inverse_document_frequency, Vocabulary, VocabularyBuilder};

/// Frozen index over a corpus.
///
/// Built once from the full entry set and never mutated afterwards, so it can
/// be shared between reader threads without locking.
#[derive(Debug, Clone)]
pub struct TfIdfIndex {
    entries: Vec<Entry>,
    vocabulary: Vocabulary,
    idf: Vec<f64>,
    document_vectors: Vec<SparseVector>,
}

impl TfIdfIndex {
    /// Run the vocabulary, IDF and vectorization passes over `entries`
    pub fn build(entries: Vec<Entry>) -> Self {
        info!(entries = entries.len(), "Building TF-IDF vocabulary and vectors");

        let mut builder = VocabularyBuilder::new();
        for entry in &entries {
            builder.add_document(entry.indexed_fields());
        }
        let (vocabulary, idf) = builder.finish();

        info!(vocabulary = vocabulary.len(), "IDF vector calculated");

        let mut index = Self {
            entries,
            vocabulary,
            idf,
            document_vectors: Vec::new(),
        };

        index.document_vectors = index
            .entries
            .iter()
            .map(|entry| index.vectorize(entry.indexed_fields()))
            .collect();

        info!(
            vectors = index.document_vectors.len(),
            "Pre-computed and normalized document vectors"
        );

        index
    }

    /// Unit-length TF-IDF vector for arbitrary text fields.
    ///
    /// Tokens outside the vocabulary are ignored; term frequency is relative to
    /// the number of in-vocabulary tokens. Returns a zero vector when no token
    /// is known.
    pub fn vectorize<'t>(&self, fields: impl IntoIterator<Item = &'t str>) -> SparseVector {
        let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
        let mut total = 0usize;

        for field in fields {
            for token in tokenize(field) {
                if let Some(idx) = self.vocabulary.get(&token) {
                    *counts.entry(idx).or_insert(0) += 1;
                    total += 1;
                }
            }
        }

        if total == 0 {
            return SparseVector::zeros(self.vocabulary.len());
        }

        let weights = counts.into_iter().map(|(idx, count)| {
            let tf = count as f64 / total as f64;
            (idx, tf * self.idf[idx])
        });

        SparseVector::from_weights(self.vocabulary.len(), weights).normalized()
    }

    /// Query vector, or `None` when the query shares no term with the vocabulary
    pub fn query_vector(&self, query: &str) -> Option<SparseVector> {
        let known = tokenize(query)
            .iter()
            .any(|token| self.vocabulary.get(token).is_some());
        known.then(|| self.vectorize([query]))
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entry(&self, position: usize) -> Option<&Entry> {
        self.entries.get(position)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    /// Document vector aligned with `entries()[position]`
    pub fn document_vector(&self, position: usize) -> Option<&SparseVector> {
        self.document_vectors.get(position)
    }

    pub fn document_vectors(&self) -> &[SparseVector] {
        &self.document_vectors
    }
}
