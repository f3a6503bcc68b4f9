// Vocabulary and inverse document frequency
use std::collections::{HashMap, HashSet};

use crate::rag::tokenizer::tokenize;

/// Smoothed inverse document frequency: `ln(N / (1 + df))`.
///
/// Terms present in (nearly) every document get a non-positive weight; the
/// value is used as is.
pub fn inverse_document_frequency(total_docs: usize, doc_freq: usize) -> f64 {
    (total_docs as f64 / (1.0 + doc_freq as f64)).ln()
}

/// Term -> dense dimension index, in first-seen order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vocabulary {
    index: HashMap<String, usize>,
    terms: Vec<String>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Dimension index of a normalized token
    pub fn get(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    /// Term stored at a dimension index
    pub fn term(&self, index: usize) -> Option<&str> {
        self.terms.get(index).map(String::as_str)
    }

    /// Terms in index order
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Index of `term`, assigning the next free one if unseen
    fn insert(&mut self, term: &str) -> usize {
        if let Some(&idx) = self.index.get(term) {
            return idx;
        }
        let idx = self.terms.len();
        self.index.insert(term.to_string(), idx);
        self.terms.push(term.to_string());
        idx
    }
}

/// First build pass: vocabulary plus per-term document frequencies
#[derive(Debug, Default)]
pub struct VocabularyBuilder {
    vocabulary: Vocabulary,
    doc_frequencies: Vec<usize>,
    documents: usize,
}

impl VocabularyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one document given its indexed text fields
    pub fn add_document<'t>(&mut self, fields: impl IntoIterator<Item = &'t str>) {
        let mut seen = HashSet::new();
        for field in fields {
            for token in tokenize(field) {
                let idx = self.vocabulary.insert(&token);
                if idx == self.doc_frequencies.len() {
                    self.doc_frequencies.push(0);
                }
                seen.insert(idx);
            }
        }
        for idx in seen {
            self.doc_frequencies[idx] += 1;
        }
        self.documents += 1;
    }

    /// Second pass: freeze the vocabulary and compute the IDF vector
    pub fn finish(self) -> (Vocabulary, Vec<f64>) {
        let idf = self
            .doc_frequencies
            .iter()
            .map(|&df| inverse_document_frequency(self.documents, df))
            .collect();
        (self.vocabulary, idf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idf_formula() {
        let idf = inverse_document_frequency(4, 1);
        assert!((idf - 2.0f64.ln()).abs() < 1e-12);
        // Term in every document goes negative
        assert!(inverse_document_frequency(4, 4) < 0.0);
        assert_eq!(inverse_document_frequency(4, 3), 0.0);
    }

    #[test]
    fn test_idf_monotonic_in_rarity() {
        for n in 1..20 {
            for df in 0..n {
                assert!(inverse_document_frequency(n, df) > inverse_document_frequency(n, df + 1));
            }
        }
    }

    #[test]
    fn test_insertion_order_is_first_seen() {
        let mut builder = VocabularyBuilder::new();
        builder.add_document(["Dragon lair", "dragon gold"]);
        builder.add_document(["Market gold"]);
        let (vocab, idf) = builder.finish();

        assert_eq!(vocab.terms(), &["dragon", "lair", "gold", "market"]);
        assert_eq!(vocab.get("gold"), Some(2));
        assert_eq!(vocab.term(3), Some("market"));
        assert_eq!(vocab.get("treasure"), None);
        assert_eq!(idf.len(), vocab.len());
    }

    #[test]
    fn test_document_frequency_is_binary_per_document() {
        let mut builder = VocabularyBuilder::new();
        builder.add_document(["gold gold gold"]);
        builder.add_document(["silver"]);
        builder.add_document(["copper"]);
        let (vocab, idf) = builder.finish();

        // "gold" appears in one document despite three occurrences
        let gold = idf[vocab.get("gold").unwrap()];
        assert!((gold - inverse_document_frequency(3, 1)).abs() < 1e-12);
    }

    #[test]
    fn test_empty_document_counts_toward_total() {
        let mut builder = VocabularyBuilder::new();
        builder.add_document(["gold"]);
        builder.add_document([""]);
        let (vocab, idf) = builder.finish();
        assert_eq!(vocab.len(), 1);
        assert!((idf[0] - inverse_document_frequency(2, 1)).abs() < 1e-12);
    }
}
