/// Characters trimmed from both edges of every token.
pub const TRIM_CHARS: &[char] = &[
    '.', ',', ':', ';', '\'', '?', '!', '(', ')', '[', ']', '{', '}', '"', '-',
];

/// Split `text` on ASCII spaces and trim punctuation from each piece.
///
/// Pieces that are empty after trimming are skipped. Tabs and other
/// whitespace are not separators and stay inside the token.
///
/// ```
/// let words: Vec<_> = wordhunt_text::tokenize("  Hello, world! Hello.  ").collect();
/// assert_eq!(words, ["Hello", "world", "Hello"]);
/// ```
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(' ')
        .map(|piece| piece.trim_matches(TRIM_CHARS))
        .filter(|word| !word.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_only_edges() {
        let words: Vec<_> = tokenize("(don't) \"e-mail\" [x]").collect();
        assert_eq!(words, ["don't", "e-mail", "x"]);
    }

    #[test]
    fn punctuation_only_pieces_are_dropped() {
        assert_eq!(tokenize("-- ... !? ()").count(), 0);
    }

    #[test]
    fn clean_single_word_is_returned_as_is() {
        let words: Vec<_> = tokenize("idempotent").collect();
        assert_eq!(words, ["idempotent"]);
        let again: Vec<_> = tokenize(words[0]).collect();
        assert_eq!(again, words);
    }

    #[test]
    fn case_is_preserved() {
        let words: Vec<_> = tokenize("Word word WORD").collect();
        assert_eq!(words, ["Word", "word", "WORD"]);
    }

    #[test]
    fn only_ascii_space_separates() {
        let words: Vec<_> = tokenize("tab\tseparated new\nline").collect();
        assert_eq!(words, ["tab\tseparated", "new\nline"]);
    }

    #[test]
    fn other_symbols_survive() {
        let words: Vec<_> = tokenize("&amp; #tag 100% café.").collect();
        assert_eq!(words, ["&amp", "#tag", "100%", "café"]);
    }
}
