// Corpus loader: JSON record files -> in-memory entries
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::errors::{RagError, Result};
use crate::rag::corpus::types::{Entry, MetadataItem, Relation, Source};

/// Record shape as found on disk.
///
/// Required fields are strictly typed so a bad record fails the whole file;
/// optional fields are kept as raw JSON and normalized leniently afterwards.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEntry {
    id: String,
    title: String,
    content: String,
    keywords: Vec<String>,
    tags: Vec<String>,
    #[serde(default)]
    parent_id: Value,
    #[serde(default)]
    summary: Value,
    #[serde(default)]
    entity_type: Value,
    #[serde(default)]
    questions: Value,
    #[serde(default)]
    metadata: Value,
    #[serde(default)]
    relations: Value,
    #[serde(default)]
    source: Value,
}

impl From<RawEntry> for Entry {
    fn from(raw: RawEntry) -> Self {
        Entry {
            id: raw.id,
            title: raw.title,
            content: raw.content,
            keywords: raw.keywords,
            tags: raw.tags,
            parent_id: string_or_empty(&raw.parent_id),
            summary: string_or_empty(&raw.summary),
            entity_type: string_or_empty(&raw.entity_type),
            questions: string_list(&raw.questions),
            metadata: objects(&raw.metadata)
                .map(|obj| MetadataItem {
                    key: member(obj, "key"),
                    value: member(obj, "value"),
                })
                .collect(),
            relations: objects(&raw.relations)
                .map(|obj| Relation {
                    id: member(obj, "id"),
                    kind: member(obj, "type"),
                    relationship: member(obj, "relationship"),
                })
                .collect(),
            source: raw
                .source
                .as_object()
                .map(|obj| Source {
                    url: member(obj, "url"),
                    comment_id: member(obj, "commentId"),
                })
                .unwrap_or_default(),
        }
    }
}

fn string_or_empty(value: &Value) -> String {
    value.as_str().unwrap_or_default().to_string()
}

fn string_list(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn objects(value: &Value) -> impl Iterator<Item = &Map<String, Value>> {
    value
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
}

fn member(obj: &Map<String, Value>, key: &str) -> String {
    obj.get(key).map(string_or_empty).unwrap_or_default()
}

/// Outcome of loading a single corpus file
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    /// Number of entries taken from the file, or why it was rejected
    pub result: Result<usize>,
}

/// Everything one directory scan produced
#[derive(Debug, Default)]
pub struct LoadReport {
    pub entries: Vec<Entry>,
    pub outcomes: Vec<FileOutcome>,
}

impl LoadReport {
    /// Files that parsed successfully (including ones holding an empty array)
    pub fn files_loaded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    /// Rejected files with their reasons
    pub fn failures(&self) -> impl Iterator<Item = (&Path, &RagError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.path.as_path(), e)))
    }
}

/// Reads corpus files from a flat directory
#[derive(Debug, Clone)]
pub struct CorpusLoader {
    extension: String,
}

impl CorpusLoader {
    /// Create a loader recognizing files with the given extension (no dot)
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }

    /// Recognized corpus files directly inside `dir`, sorted by path.
    ///
    /// Sorting keeps vocabulary insertion order reproducible across rebuilds.
    pub fn corpus_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for dir_entry in fs::read_dir(dir)? {
            let path = dir_entry?.path();
            let recognized = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == self.extension);
            if recognized && path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Scan `dir` and load every recognized file, skipping rejected ones
    pub fn load_directory(&self, dir: &Path) -> Result<LoadReport> {
        let mut report = LoadReport::default();

        for path in self.corpus_files(dir)? {
            let result = load_file(&path).map(|entries| {
                let count = entries.len();
                report.entries.extend(entries);
                count
            });

            match &result {
                Ok(count) => debug!(file = %path.display(), entries = count, "Loaded corpus file"),
                Err(e) => warn!(file = %path.display(), error = %e, "Skipping corpus file"),
            }

            report.outcomes.push(FileOutcome { path, result });
        }

        Ok(report)
    }
}

impl Default for CorpusLoader {
    fn default() -> Self {
        Self::new("json")
    }
}

/// Load every entry in one corpus file; any bad record rejects the file
pub fn load_file(path: &Path) -> Result<Vec<Entry>> {
    let contents = fs::read_to_string(path).map_err(|e| RagError::parse(path, e))?;
    parse_entries(&contents).map_err(|reason| RagError::parse(path, reason))
}

/// Parse the JSON text of a corpus file into entries
pub fn parse_entries(json: &str) -> std::result::Result<Vec<Entry>, String> {
    let data: Value = serde_json::from_str(json).map_err(|e| e.to_string())?;

    let Value::Array(items) = data else {
        return Err("expected a JSON array of entries".to_string());
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value::<RawEntry>(item)
                .map(Entry::from)
                .map_err(|e| format!("record {}: {}", i, e))
        })
        .collect()
}
