use std::sync::OnceLock;

use regex::Regex;

use super::normalizer::Normalizer;

/// A word token with its provenance. Computed per request and dropped afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub raw: &'a str,
    pub normalized: String,
    pub source: &'a str,
}

fn word_regex() -> &'static Regex {
    static WORD: OnceLock<Regex> = OnceLock::new();
    // Letters with their combining marks, and digits.
    WORD.get_or_init(|| Regex::new(r"[\p{L}\p{M}\p{N}]+").expect("static word pattern"))
}

/// Unicode letter/digit runs of `phrase`, in order of appearance.
pub fn split_words(phrase: &str) -> impl Iterator<Item = &str> {
    word_regex().find_iter(phrase).map(|m| m.as_str())
}

pub fn extract_tokens<'a>(phrase: &'a str, normalizer: &Normalizer) -> Vec<Token<'a>> {
    split_words(phrase)
        .map(|raw| Token { raw, normalized: normalizer.normalize(raw, false), source: phrase })
        .collect()
}

pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_words_unicode() {
        let words: Vec<&str> = split_words("Ремонт квартир, ул. Ленина-12 (недорого)!").collect();
        assert_eq!(words, vec!["Ремонт", "квартир", "ул", "Ленина", "12", "недорого"]);
    }

    #[test]
    fn test_split_words_empty() {
        assert_eq!(split_words("  ,. - ").count(), 0);
    }

    #[test]
    fn test_extract_tokens_keeps_source() {
        let normalizer = Normalizer::identity();
        let phrase = "Купить ДОМ";
        let tokens = extract_tokens(phrase, &normalizer);

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].raw, "Купить");
        assert_eq!(tokens[0].normalized, "купить");
        assert_eq!(tokens[1].normalized, "дом");
        assert!(tokens.iter().all(|t| t.source == phrase));
    }

    #[test]
    fn test_char_len_counts_chars_not_bytes() {
        assert_eq!(char_len("дом"), 3);
        assert_eq!(char_len("зелёный"), 7);
    }
}
