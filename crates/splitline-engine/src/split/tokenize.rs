use regex::Regex;
use std::sync::OnceLock;

/// A piece of source text: either a run of whitespace or a word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Whitespace(&'a str),
    Word(&'a str),
}

impl<'a> Token<'a> {
    pub fn as_str(&self) -> &'a str {
        match self {
            Token::Whitespace(s) | Token::Word(s) => s,
        }
    }

    pub fn is_whitespace(&self) -> bool {
        matches!(self, Token::Whitespace(_))
    }
}

/// Characters that separate words: the ECMAScript `\s` set.
///
/// Unlike Unicode `White_Space`, U+FEFF separates words and U+0085 does not.
const WHITESPACE_RUN: &str = r"[\t\n\x0B\f\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]+";

/// Split `text` on whitespace runs, keeping the runs as tokens.
///
/// No token is empty, and concatenating the tokens gives back `text` exactly.
///
/// ```
/// use splitline_engine::split::tokenize::{tokenize, Token};
///
/// assert_eq!(
///     tokenize("Hi  there"),
///     vec![Token::Word("Hi"), Token::Whitespace("  "), Token::Word("there")]
/// );
/// ```
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    let whitespace = WHITESPACE.get_or_init(|| Regex::new(WHITESPACE_RUN).expect("Invalid whitespace regex"));

    let mut tokens = Vec::new();
    let mut last = 0;
    for run in whitespace.find_iter(text) {
        if run.start() > last {
            tokens.push(Token::Word(&text[last..run.start()]));
        }
        tokens.push(Token::Whitespace(run.as_str()));
        last = run.end();
    }
    if last < text.len() {
        tokens.push(Token::Word(&text[last..]));
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_empty_input_has_no_tokens() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_whitespace_only_is_one_run() {
        assert_eq!(tokenize(" \t\n "), vec![Token::Whitespace(" \t\n ")]);
    }

    #[test]
    fn test_leading_and_trailing_whitespace_kept() {
        assert_eq!(
            tokenize("  a b\t"),
            vec![
                Token::Whitespace("  "),
                Token::Word("a"),
                Token::Whitespace(" "),
                Token::Word("b"),
                Token::Whitespace("\t"),
            ]
        );
    }

    #[test]
    fn test_unicode_whitespace_splits_words() {
        // U+00A0 no-break space and U+3000 ideographic space are `\s`
        assert_eq!(
            tokenize("a\u{a0}b\u{3000}c"),
            vec![
                Token::Word("a"),
                Token::Whitespace("\u{a0}"),
                Token::Word("b"),
                Token::Whitespace("\u{3000}"),
                Token::Word("c"),
            ]
        );
    }

    #[test]
    fn test_separators_follow_ecmascript_whitespace() {
        assert_eq!(
            tokenize("a\u{feff}b c\u{85}d\u{2009}e"),
            vec![
                Token::Word("a"),
                Token::Whitespace("\u{feff}"),
                Token::Word("b"),
                Token::Whitespace(" "),
                Token::Word("c\u{85}d"),
                Token::Whitespace("\u{2009}"),
                Token::Word("e"),
            ]
        );
    }

    #[rstest]
    #[case("Hi there")]
    #[case("  spaced   out  ")]
    #[case("tabs\tand\nnewlines")]
    #[case("émoji 🎉 ok")]
    fn test_tokens_concatenate_to_input(#[case] input: &str) {
        let tokens = tokenize(input);
        let rebuilt: String = tokens.iter().map(Token::as_str).collect();
        assert_eq!(rebuilt, input);
        assert!(tokens.iter().all(|t| !t.as_str().is_empty()));
        // Runs alternate: two whitespace tokens are never adjacent
        assert!(
            tokens
                .windows(2)
                .all(|pair| pair[0].is_whitespace() != pair[1].is_whitespace())
        );
    }
}
