// Metadata filtering (stage 1 of retrieval)
use std::collections::HashMap;

use crate::rag::corpus::Entry;

/// Required metadata `key -> value` pairs; every pair must match
pub type FilterMap = HashMap<String, String>;

/// True when each filter pair is matched by some metadata item of `entry`.
///
/// Pairs are checked independently and compared exactly (case-sensitive).
/// An empty filter map matches everything.
pub fn matches_filters(entry: &Entry, filters: &FilterMap) -> bool {
    filters
        .iter()
        .all(|(key, value)| entry.has_metadata(key, value))
}

/// Corpus positions of the entries passing `filters`, in corpus order
pub fn candidate_positions(entries: &[Entry], filters: &FilterMap) -> Vec<usize> {
    if filters.is_empty() {
        return (0..entries.len()).collect();
    }

    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| matches_filters(entry, filters))
        .map(|(position, _)| position)
        .collect()
}

/// Parse a `key=value` filter argument
pub fn parse_filter(raw: &str) -> Option<(String, String)> {
    let (key, value) = raw.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rag::corpus::MetadataItem;

    fn entry_with(metadata: &[(&str, &str)]) -> Entry {
        Entry {
            metadata: metadata
                .iter()
                .map(|(k, v)| MetadataItem {
                    key: k.to_string(),
                    value: v.to_string(),
                })
                .collect(),
            ..Default::default()
        }
    }

    fn filters(pairs: &[(&str, &str)]) -> FilterMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_exact_match() {
        let e = entry_with(&[("region", "north")]);
        assert!(matches_filters(&e, &filters(&[("region", "north")])));
        assert!(!matches_filters(&e, &filters(&[("region", "south")])));
        assert!(!matches_filters(&e, &filters(&[("region", "North")])));
    }

    #[test]
    fn test_missing_second_key_fails() {
        let e = entry_with(&[("region", "north")]);
        assert!(!matches_filters(
            &e,
            &filters(&[("region", "north"), ("faction", "any")])
        ));
    }

    #[test]
    fn test_pairs_matched_by_different_items() {
        let e = entry_with(&[("region", "north"), ("faction", "horde"), ("region", "east")]);
        assert!(matches_filters(
            &e,
            &filters(&[("region", "east"), ("faction", "horde")])
        ));
    }

    #[test]
    fn test_empty_filters_match_all() {
        let entries = vec![entry_with(&[]), entry_with(&[("a", "b")])];
        assert!(matches_filters(&entries[0], &FilterMap::new()));
        assert_eq!(candidate_positions(&entries, &FilterMap::new()), vec![0, 1]);
    }

    #[test]
    fn test_candidate_positions_narrow() {
        let entries = vec![
            entry_with(&[("region", "north")]),
            entry_with(&[("region", "south")]),
            entry_with(&[("region", "north"), ("faction", "alliance")]),
        ];
        let f = filters(&[("region", "north")]);
        assert_eq!(candidate_positions(&entries, &f), vec![0, 2]);
        assert!(candidate_positions(&entries, &filters(&[("zone", "x")])).is_empty());
    }

    #[test]
    fn test_parse_filter() {
        assert_eq!(
            parse_filter("region=north"),
            Some(("region".to_string(), "north".to_string()))
        );
        assert_eq!(
            parse_filter("note=a=b"),
            Some(("note".to_string(), "a=b".to_string()))
        );
        assert_eq!(parse_filter("region"), None);
        assert_eq!(parse_filter("=north"), None);
    }
}
