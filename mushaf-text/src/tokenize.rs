//! Whitespace tokenization of verse text.

/// Non-empty whitespace-delimited tokens of one verse.
///
/// Tokenization is always per verse. Callers must never concatenate verse
/// texts before splitting, or the last word of one verse would merge with
/// the first word of the next.
pub fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}

/// Token count of one verse.
pub fn word_count(text: &str) -> u64 {
    tokens(text).count() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_any_whitespace() {
        let words: Vec<_> = tokens("بسم  الله\tالرحمن").collect();
        assert_eq!(words, ["بسم", "الله", "الرحمن"]);
    }

    #[test]
    fn test_empty_input_has_no_tokens() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
    }
}
