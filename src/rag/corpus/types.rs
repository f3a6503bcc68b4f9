// Knowledge-base record types
use serde::Serialize;

/// Key/value pair attached to an entry; keys may repeat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct MetadataItem {
    pub key: String,
    pub value: String,
}

/// Link from an entry to another entity in the knowledge base
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct Relation {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub relationship: String,
}

/// Where the information came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub url: String,
    pub comment_id: String,
}

impl Source {
    pub fn is_empty(&self) -> bool {
        self.url.is_empty() && self.comment_id.is_empty()
    }
}

/// One knowledge-base record
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: String,
    pub title: String,
    pub content: String,
    pub keywords: Vec<String>,
    pub tags: Vec<String>,
    pub parent_id: String,
    pub summary: String,
    pub entity_type: String,
    pub questions: Vec<String>,
    pub metadata: Vec<MetadataItem>,
    pub relations: Vec<Relation>,
    pub source: Source,
}

impl Entry {
    /// Text fields that feed the vocabulary, in indexing order.
    ///
    /// Tags are deliberately absent: they never contribute terms.
    pub fn indexed_fields(&self) -> impl Iterator<Item = &str> {
        [self.title.as_str(), self.summary.as_str(), self.content.as_str()]
            .into_iter()
            .chain(self.keywords.iter().map(String::as_str))
            .chain(self.questions.iter().map(String::as_str))
    }

    /// True when at least one metadata item has exactly this key and value
    pub fn has_metadata(&self, key: &str, value: &str) -> bool {
        self.metadata
            .iter()
            .any(|item| item.key == key && item.value == value)
    }
}
