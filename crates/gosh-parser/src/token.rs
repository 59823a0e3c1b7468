//! Token definitions for the gosh lexer.

use std::fmt;

use logos::Logos;

/// Token kinds produced by the lexer.
///
/// Almost any run of characters is a valid bare word, since bare words name
/// filesystem paths. Only whitespace, brackets, parens, commas, quotes and
/// the comment marker delimit words.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
#[logos(skip r"#[^\n]*")]
pub enum TokenKind {
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,

    // Quoted words, for paths containing delimiter characters
    #[regex(r#""([^"\\]|\\.)*""#, |lex| {
        let s = lex.slice();
        unescape(&s[1..s.len() - 1])
    })]
    Quoted(String),

    // Bare words
    #[regex("[^ \\t\\n\\r\\[\\](),\"#]+", |lex| lex.slice().to_string())]
    Word(String),
}

/// Resolve backslash escapes inside a quoted word.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }

    out
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::LBracket => write!(f, "'['"),
            TokenKind::RBracket => write!(f, "']'"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Quoted(s) => write!(f, "\"{}\"", s),
            TokenKind::Word(s) => write!(f, "'{}'", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        TokenKind::lexer(source).filter_map(Result::ok).collect()
    }

    #[test]
    fn test_words_allow_path_characters() {
        let tokens = kinds("./src/main.rs ~/notes-2024.txt");
        assert_eq!(tokens.len(), 2);
        assert!(matches!(&tokens[0], TokenKind::Word(w) if w == "./src/main.rs"));
        assert!(matches!(&tokens[1], TokenKind::Word(w) if w == "~/notes-2024.txt"));
    }

    #[test]
    fn test_brackets_delimit_words() {
        let tokens = kinds("[a,b]");
        assert_eq!(tokens.len(), 5);
        assert!(matches!(tokens[0], TokenKind::LBracket));
        assert!(matches!(&tokens[1], TokenKind::Word(w) if w == "a"));
        assert!(matches!(tokens[2], TokenKind::Comma));
    }

    #[test]
    fn test_quoted_word_keeps_spaces() {
        let tokens = kinds(r#""my file.txt""#);
        assert_eq!(tokens.len(), 1);
        assert!(matches!(&tokens[0], TokenKind::Quoted(s) if s == "my file.txt"));
    }

    #[test]
    fn test_quoted_word_escapes() {
        let tokens = kinds(r#""a\"b\nc""#);
        assert!(matches!(&tokens[0], TokenKind::Quoted(s) if s == "a\"b\nc"));
    }

    #[test]
    fn test_comments_skipped() {
        let tokens = kinds("size readme # trailing note");
        assert_eq!(tokens.len(), 2);
    }
}
