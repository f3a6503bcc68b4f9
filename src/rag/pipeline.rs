// End-to-end retrieval system: load -> index -> query -> format
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::config::RagConfig;
use crate::errors::{RagError, Result};
use crate::rag::context;
use crate::rag::corpus::{CorpusLoader, LoadReport};
use crate::rag::index::TfIdfIndex;
use crate::rag::retrieval::{FilterMap, RetrievalEngine, RetrievalHit, SearchParams};

/// A corpus file rejected during the last build
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Summary of a successful build
#[derive(Debug, Clone, Serialize)]
pub struct IndexStats {
    pub corpus_path: PathBuf,
    pub entries: usize,
    pub vocabulary_size: usize,
    pub files_loaded: usize,
    pub failed_files: Vec<FileFailure>,
    pub built_at: DateTime<Utc>,
}

#[derive(Debug)]
struct BuiltIndex {
    index: TfIdfIndex,
    stats: IndexStats,
}

/// Retrieval system owning the corpus and its TF-IDF index.
///
/// `initialize` needs exclusive access; once built, queries only read and the
/// system can be shared across threads.
#[derive(Debug)]
pub struct RagSystem {
    config: RagConfig,
    loader: CorpusLoader,
    built: Option<BuiltIndex>,
}

impl RagSystem {
    /// Create an un-initialized system
    pub fn new(config: RagConfig) -> Self {
        let loader = CorpusLoader::new(config.corpus.extension.clone());
        Self {
            config,
            loader,
            built: None,
        }
    }

    /// Load the corpus and build the index from scratch.
    ///
    /// Any previous index is dropped first; on failure the system stays
    /// un-initialized and `retrieve` returns nothing.
    pub fn initialize(&mut self) -> Result<IndexStats> {
        info!("Initializing retrieval system (TF-IDF vector model)");
        self.built = None;

        match self.build() {
            Ok(built) => {
                let stats = built.stats.clone();
                self.built = Some(built);
                Ok(stats)
            }
            Err(e) => {
                error!(error = %e, "Retrieval system initialization failed");
                Err(e)
            }
        }
    }

    fn build(&self) -> Result<BuiltIndex> {
        let corpus_path = self.corpus_dir()?.to_path_buf();
        let report = self.loader.load_directory(&corpus_path)?;

        if report.entries.is_empty() {
            return Err(RagError::NoData { path: corpus_path });
        }

        info!(
            entries = report.entries.len(),
            files = report.files_loaded(),
            "Loaded corpus entries"
        );

        let files_loaded = report.files_loaded();
        let failed_files = failures(&report);
        let index = TfIdfIndex::build(report.entries);

        let stats = IndexStats {
            corpus_path,
            entries: index.len(),
            vocabulary_size: index.vocabulary().len(),
            files_loaded,
            failed_files,
            built_at: Utc::now(),
        };

        Ok(BuiltIndex { index, stats })
    }

    fn corpus_dir(&self) -> Result<&Path> {
        let path = self
            .config
            .corpus
            .path
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| RagError::Config("corpus path is not configured".to_string()))?;

        if !path.is_dir() {
            return Err(RagError::Config(format!(
                "corpus path '{}' does not exist or is not a directory",
                path.display()
            )));
        }

        Ok(path)
    }

    /// Rank corpus entries against `query`; empty when not initialized
    pub fn retrieve(
        &self,
        query: &str,
        filters: &FilterMap,
        max_results: usize,
        similarity_threshold: f32,
    ) -> Vec<RetrievalHit<'_>> {
        match self.engine() {
            Some(engine) => engine.retrieve(query, filters, max_results, similarity_threshold),
            None => Vec::new(),
        }
    }

    /// Retrieve using the configured result limit and threshold
    pub fn retrieve_default(&self, query: &str, filters: &FilterMap) -> Vec<RetrievalHit<'_>> {
        let params = self.default_params();
        self.retrieve(query, filters, params.max_results, params.similarity_threshold)
    }

    /// Retrieve with a full parameter set
    pub fn retrieve_with_params(
        &self,
        query: &str,
        params: &SearchParams,
    ) -> Vec<RetrievalHit<'_>> {
        match self.engine() {
            Some(engine) => engine.retrieve_with_params(query, params),
            None => Vec::new(),
        }
    }

    /// Render hits as a prompt-ready text block
    pub fn format_results(&self, hits: &[RetrievalHit<'_>]) -> String {
        context::format_results(hits)
    }

    fn engine(&self) -> Option<RetrievalEngine<'_>> {
        self.built
            .as_ref()
            .map(|built| RetrievalEngine::new(&built.index).with_debug(self.config.debug))
    }

    pub fn default_params(&self) -> SearchParams {
        SearchParams::from(&self.config.retrieval)
    }

    pub fn is_initialized(&self) -> bool {
        self.built.is_some()
    }

    pub fn index(&self) -> Option<&TfIdfIndex> {
        self.built.as_ref().map(|built| &built.index)
    }

    pub fn stats(&self) -> Option<&IndexStats> {
        self.built.as_ref().map(|built| &built.stats)
    }

    pub fn config(&self) -> &RagConfig {
        &self.config
    }
}

fn failures(report: &LoadReport) -> Vec<FileFailure> {
    report
        .failures()
        .map(|(path, e)| FileFailure {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
        .collect()
}
