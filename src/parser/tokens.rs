//! Splitting raw text into DOI candidate tokens.

/// Returns true for characters that separate candidate tokens.
///
/// Whitespace covers prose and line-oriented RIS records; commas and
/// semicolons cover pasted lists and BibTeX field separators.
#[must_use]
pub fn is_delimiter(ch: char) -> bool {
    ch.is_whitespace() || ch == ',' || ch == ';'
}

/// Splits `text` into non-empty candidate tokens, in input order.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_delimiter).filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_splits_on_all_delimiters() {
        let tokens: Vec<_> = tokenize("a b,c;d\te\nf").collect();
        assert_eq!(tokens, ["a", "b", "c", "d", "e", "f"]);
    }

    #[test]
    fn test_tokenize_collapses_delimiter_runs() {
        let tokens: Vec<_> = tokenize(" ,; a ;;, b \r\n").collect();
        assert_eq!(tokens, ["a", "b"]);
    }

    #[test]
    fn test_tokenize_empty_and_blank_input() {
        assert_eq!(tokenize("").count(), 0);
        assert_eq!(tokenize("  \n\t ").count(), 0);
    }

    #[test]
    fn test_tokenize_keeps_bibtex_braces_attached() {
        let tokens: Vec<_> = tokenize("doi = {10.1234/xyz},").collect();
        assert_eq!(tokens, ["doi", "=", "{10.1234/xyz}"]);
    }

    #[test]
    fn test_tokenize_unicode_whitespace() {
        let tokens: Vec<_> = tokenize("10.1234/a\u{00A0}10.1234/b").collect();
        assert_eq!(tokens, ["10.1234/a", "10.1234/b"]);
    }
}
