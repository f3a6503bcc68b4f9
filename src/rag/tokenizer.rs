// Lexical tokenizer shared by index build and query vectorization

/// Split text into lowercase, punctuation-free word tokens.
///
/// Pieces are separated by ASCII whitespace. Case folding and punctuation
/// removal are ASCII-only; any other character passes through unchanged.
/// Tokens that end up empty are dropped. Duplicates are kept.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_ascii_whitespace()
        .filter_map(|piece| {
            let token: String = piece
                .chars()
                .map(|c| c.to_ascii_lowercase())
                .filter(|c| !c.is_ascii_punctuation())
                .collect();
            (!token.is_empty()).then_some(token)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn test_tokenize_strips_punctuation_and_case() {
        assert_eq!(tokenize("Hello, World!!"), vec!["hello", "world"]);
    }

    #[test]
    fn test_tokenize_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t\n  ").is_empty());
    }

    #[test]
    fn test_tokenize_drops_punctuation_only_pieces() {
        assert_eq!(tokenize("dragon -- ... lair"), vec!["dragon", "lair"]);
    }

    #[test]
    fn test_tokenize_keeps_duplicates_and_order() {
        assert_eq!(
            tokenize("Gold gold GOLD silver"),
            vec!["gold", "gold", "gold", "silver"]
        );
    }

    #[test]
    fn test_tokenize_removes_inner_punctuation() {
        assert_eq!(tokenize("Drek'thar's well-known"), vec!["drekthars", "wellknown"]);
    }

    #[test]
    fn test_tokenize_leaves_non_ascii_alone() {
        assert_eq!(tokenize("Éclair café!"), vec!["Éclair", "café"]);
    }

    #[quickcheck]
    fn prop_tokenize_is_idempotent(text: String) -> bool {
        let once = tokenize(&text);
        let twice = tokenize(&once.join(" "));
        once == twice
    }

    #[quickcheck]
    fn prop_tokens_are_never_empty(text: String) -> bool {
        tokenize(&text)
            .iter()
            .all(|t| !t.is_empty() && !t.chars().any(|c| c.is_ascii_whitespace()))
    }
}
