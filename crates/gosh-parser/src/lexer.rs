//! Lexer for the gosh language.

use logos::Logos;

use crate::error::ParseError;
use crate::span::Span;
use crate::token::TokenKind;

/// One lexed token and where it came from.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Tokenize source code into a list of tokens plus the errors hit on the way.
///
/// Lexing never aborts: unrecognizable input becomes an error and the rest of
/// the line still tokenizes, so the parser always has something to work with.
pub fn lex(source: &str) -> (Vec<Token>, Vec<ParseError>) {
    let mut lexer = TokenKind::lexer(source);
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    while let Some(result) = lexer.next() {
        let span = Span::new(lexer.span().start, lexer.span().end);
        match result {
            Ok(kind) => tokens.push(Token::new(kind, span)),
            Err(()) => errors.push(ParseError::UnrecognizedInput {
                text: lexer.slice().to_string(),
                span,
            }),
        }
    }

    (tokens, errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_empty() {
        let (tokens, errors) = lex("");
        assert!(tokens.is_empty());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_lex_application() {
        let (tokens, errors) = lex("size readme.md");
        assert!(errors.is_empty());
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].span, Span::new(0, 4));
        assert_eq!(tokens[1].span, Span::new(5, 14));
    }

    #[test]
    fn test_lex_unterminated_quote_is_an_error() {
        let (_, errors) = lex("\"unterminated");
        assert!(!errors.is_empty());
    }
}
