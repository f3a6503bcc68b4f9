// Human-readable rendering of ranked retrieval results
use crate::rag::retrieval::RetrievalHit;

/// Header line opening a non-empty result block
pub const RESULTS_HEADER: &str = "### Relevant Information Found ###";

/// Render ranked hits as a text block for prompt context.
///
/// Empty input produces an empty string. Content is never truncated.
pub fn format_results(hits: &[RetrievalHit<'_>]) -> String {
    if hits.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    out.push_str(RESULTS_HEADER);
    out.push('\n');

    for hit in hits {
        out.push('\n');
        format_hit(&mut out, hit);
    }

    out
}

fn format_hit(out: &mut String, hit: &RetrievalHit<'_>) {
    let entry = hit.entry;

    out.push_str(&format!(
        "--- Entry: {} (Score: {:.4}) ---\n",
        entry.title, hit.similarity
    ));

    if !entry.summary.is_empty() {
        out.push_str(&format!("**Summary:** {}\n", entry.summary));
    }
    out.push_str(&format!("**Content:** {}\n", entry.content));

    if !entry.metadata.is_empty() {
        out.push_str("**Metadata:**\n");
        for item in &entry.metadata {
            out.push_str(&format!("- {}: {}\n", item.key, item.value));
        }
    }

    if !entry.relations.is_empty() {
        out.push_str("**Related Entities:**\n");
        for rel in &entry.relations {
            out.push_str(&format!("- {} ({}): {}\n", rel.id, rel.kind, rel.relationship));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rag::corpus::{Entry, MetadataItem, Relation};

    fn hit(entry: &Entry, similarity: f32) -> RetrievalHit<'_> {
        RetrievalHit {
            entry,
            position: 0,
            similarity,
        }
    }

    #[test]
    fn test_empty_results_format_to_empty_string() {
        assert_eq!(format_results(&[]), "");
    }

    #[test]
    fn test_minimal_entry() {
        let entry = Entry {
            title: "Village Market".to_string(),
            content: "Merchants sell goods".to_string(),
            ..Default::default()
        };
        let text = format_results(&[hit(&entry, 0.5)]);

        assert_eq!(
            text,
            "### Relevant Information Found ###\n\
             \n\
             --- Entry: Village Market (Score: 0.5000) ---\n\
             **Content:** Merchants sell goods\n"
        );
    }

    #[test]
    fn test_full_entry_sections() {
        let entry = Entry {
            title: "Dragon Lair".to_string(),
            summary: "Home of the red dragon".to_string(),
            content: "A fierce dragon guards treasure".to_string(),
            metadata: vec![MetadataItem {
                key: "region".to_string(),
                value: "north".to_string(),
            }],
            relations: vec![Relation {
                id: "npc-1".to_string(),
                kind: "npc".to_string(),
                relationship: "guarded by".to_string(),
            }],
            ..Default::default()
        };
        let text = format_results(&[hit(&entry, 0.87654)]);

        assert!(text.starts_with(RESULTS_HEADER));
        assert!(text.contains("(Score: 0.8765)"));
        assert!(text.contains("**Summary:** Home of the red dragon\n"));
        assert!(text.contains("**Metadata:**\n- region: north\n"));
        assert!(text.contains("**Related Entities:**\n- npc-1 (npc): guarded by\n"));
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let entry = Entry {
            title: "Harbor".to_string(),
            content: "Ships".to_string(),
            ..Default::default()
        };
        let text = format_results(&[hit(&entry, 0.1)]);
        assert!(!text.contains("**Summary:**"));
        assert!(!text.contains("**Metadata:**"));
        assert!(!text.contains("**Related Entities:**"));
    }

    #[test]
    fn test_results_keep_rank_order() {
        let first = Entry {
            title: "First".to_string(),
            ..Default::default()
        };
        let second = Entry {
            title: "Second".to_string(),
            ..Default::default()
        };
        let text = format_results(&[hit(&first, 0.9), hit(&second, 0.4)]);
        let a = text.find("First").unwrap();
        let b = text.find("Second").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_long_content_not_truncated() {
        let content = "lore ".repeat(2000);
        let entry = Entry {
            title: "Tome".to_string(),
            content: content.clone(),
            ..Default::default()
        };
        assert!(format_results(&[hit(&entry, 1.0)]).contains(&content));
    }
}
