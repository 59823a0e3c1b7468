//! Parser for the gosh language.
//!
//! The grammar is tiny: juxtaposition is application, brackets build lists,
//! parens group. The interesting part is word classification: the parser is
//! handed the set of names bound in the global scope, and a bare word either
//! becomes a symbol reference (when it matches) or a file literal (when it
//! does not). That decision is made exactly once, here, so the analyzer and
//! the evaluator can never disagree about what a word means.

use std::collections::HashSet;

use crate::ast::{Expr, ExprKind, NodeId};
use crate::error::ParseError;
use crate::lexer::{lex, Token};
use crate::span::Span;
use crate::token::TokenKind;

/// What came back from a parse: a best-effort tree plus every error hit.
///
/// The tree is present whenever recovery could salvage one; callers gate
/// evaluation on the error count, never on the tree's presence alone.
#[derive(Debug)]
pub struct ParseOutcome {
    pub tree: Option<Expr>,
    pub errors: Vec<ParseError>,
}

impl ParseOutcome {
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}

/// Parse source code into an expression tree.
///
/// `commands` is the set of names currently bound in the global scope.
/// Quoted words always stay file literals, which is the escape hatch for
/// paths that collide with command names.
pub fn parse(source: &str, commands: &HashSet<String>) -> ParseOutcome {
    let (tokens, mut errors) = lex(source);
    let mut parser = Parser::new(tokens, commands);
    let tree = parser.parse_root();
    errors.extend(parser.errors);

    ParseOutcome { tree, errors }
}

/// The parser state.
struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    errors: Vec<ParseError>,
    commands: &'a HashSet<String>,
    next_id: NodeId,
}

impl<'a> Parser<'a> {
    fn new(tokens: Vec<Token>, commands: &'a HashSet<String>) -> Self {
        Self {
            tokens,
            pos: 0,
            errors: Vec::new(),
            commands,
            next_id: 0,
        }
    }

    fn parse_root(&mut self) -> Option<Expr> {
        let mut tree = None;

        while !self.is_at_end() {
            if tree.is_some() {
                if let Some(token) = self.peek().cloned() {
                    self.errors.push(ParseError::unexpected_token(
                        token.span,
                        "end of input",
                        token.kind.to_string(),
                    ));
                }
                break;
            }

            match self.parse_app() {
                Ok(expr) => tree = Some(expr),
                Err(e) => {
                    // Skip the offending token and try again with the rest
                    self.errors.push(e);
                    self.advance();
                }
            }
        }

        if tree.is_none() && self.errors.is_empty() {
            self.errors.push(ParseError::unexpected_eof("an expression"));
        }

        tree
    }

    /// `app := atom atom*`. One atom is just itself, more build a curried
    /// application applied left to right.
    fn parse_app(&mut self) -> Result<Expr, ParseError> {
        let callee = self.parse_atom()?;

        let mut args = Vec::new();
        while self.peek_starts_atom() {
            args.push(self.parse_atom()?);
        }

        let last_span = match args.last() {
            Some(arg) => arg.span,
            None => return Ok(callee),
        };

        let span = callee.span.merge(last_span);
        Ok(self.node(
            ExprKind::Apply {
                callee: Box::new(callee),
                args,
            },
            span,
        ))
    }

    fn parse_atom(&mut self) -> Result<Expr, ParseError> {
        let token = match self.peek() {
            Some(t) => t.clone(),
            None => return Err(ParseError::unexpected_eof("an expression")),
        };

        match token.kind {
            TokenKind::Word(word) => {
                self.advance();
                let kind = if self.commands.contains(&word) {
                    ExprKind::Symbol(word)
                } else {
                    ExprKind::FileLit(word)
                };
                Ok(self.node(kind, token.span))
            }

            TokenKind::Quoted(text) => {
                self.advance();
                Ok(self.node(ExprKind::FileLit(text), token.span))
            }

            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_app()?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }

            TokenKind::LBracket => {
                self.advance();
                self.parse_list(token.span)
            }

            other => Err(ParseError::unexpected_token(
                token.span,
                "an expression",
                other.to_string(),
            )),
        }
    }

    /// Parse the elements of a list literal whose `[` is already consumed.
    ///
    /// A missing `]` or a bad element is recorded but still yields a list of
    /// everything parsed so far, so the analyzer has a full tree to annotate.
    fn parse_list(&mut self, start: Span) -> Result<Expr, ParseError> {
        let mut elements = Vec::new();

        if !self.check(&TokenKind::RBracket) && !self.is_at_end() {
            loop {
                match self.parse_app() {
                    Ok(element) => elements.push(element),
                    Err(e) => {
                        self.errors.push(e);
                        break;
                    }
                }

                if self.check(&TokenKind::Comma) {
                    self.advance();
                } else {
                    break;
                }
            }
        }

        let end = match self.peek().cloned() {
            Some(t) if t.kind == TokenKind::RBracket => {
                self.advance();
                t.span
            }
            Some(t) => {
                self.errors.push(ParseError::unexpected_token(
                    t.span,
                    "']'",
                    t.kind.to_string(),
                ));
                t.span
            }
            None => {
                self.errors.push(ParseError::unexpected_eof("']'"));
                start
            }
        };

        Ok(self.node(ExprKind::List(elements), start.merge(end)))
    }

    fn node(&mut self, kind: ExprKind, span: Span) -> Expr {
        let id = self.next_id;
        self.next_id += 1;
        Expr { id, kind, span }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_starts_atom(&self) -> bool {
        matches!(
            self.peek().map(|t| &t.kind),
            Some(
                TokenKind::Word(_)
                    | TokenKind::Quoted(_)
                    | TokenKind::LParen
                    | TokenKind::LBracket
            )
        )
    }

    fn check(&self, kind: &TokenKind) -> bool {
        self.peek().map(|t| &t.kind) == Some(kind)
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        match self.peek() {
            Some(t) if t.kind == kind => {
                let token = t.clone();
                self.advance();
                Ok(token)
            }
            Some(t) => Err(ParseError::unexpected_token(
                t.span,
                kind.to_string(),
                t.kind.to_string(),
            )),
            None => Err(ParseError::unexpected_eof(kind.to_string())),
        }
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commands() -> HashSet<String> {
        ["size", "ls"].iter().map(|s| s.to_string()).collect()
    }

    fn parse_ok(source: &str) -> Expr {
        let outcome = parse(source, &commands());
        assert!(outcome.errors.is_empty(), "errors: {:?}", outcome.errors);
        outcome.tree.unwrap()
    }

    #[test]
    fn test_bare_word_is_a_file_literal() {
        let tree = parse_ok("readme.md");
        assert!(matches!(&tree.kind, ExprKind::FileLit(w) if w == "readme.md"));
    }

    #[test]
    fn test_bound_word_is_a_symbol() {
        let tree = parse_ok("size");
        assert!(matches!(&tree.kind, ExprKind::Symbol(w) if w == "size"));
    }

    #[test]
    fn test_quoted_command_name_stays_a_file() {
        let tree = parse_ok("\"size\"");
        assert!(matches!(&tree.kind, ExprKind::FileLit(w) if w == "size"));
    }

    #[test]
    fn test_application_collects_arguments_in_order() {
        let tree = parse_ok("size a b");
        match &tree.kind {
            ExprKind::Apply { callee, args } => {
                assert!(matches!(&callee.kind, ExprKind::Symbol(w) if w == "size"));
                assert_eq!(args.len(), 2);
                assert!(matches!(&args[0].kind, ExprKind::FileLit(w) if w == "a"));
                assert!(matches!(&args[1].kind, ExprKind::FileLit(w) if w == "b"));
            }
            other => panic!("expected application, got {:?}", other),
        }
    }

    #[test]
    fn test_list_literal() {
        let tree = parse_ok("[a, b, c]");
        match &tree.kind {
            ExprKind::List(elements) => assert_eq!(elements.len(), 3),
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_list() {
        let tree = parse_ok("[]");
        assert!(matches!(&tree.kind, ExprKind::List(e) if e.is_empty()));
    }

    #[test]
    fn test_parens_group_an_application() {
        let tree = parse_ok("size (size a)");
        match &tree.kind {
            ExprKind::Apply { args, .. } => {
                assert!(matches!(&args[0].kind, ExprKind::Apply { .. }));
            }
            other => panic!("expected application, got {:?}", other),
        }
    }

    #[test]
    fn test_node_ids_are_unique() {
        let tree = parse_ok("size [a, b]");
        let mut ids = Vec::new();
        tree.walk(&mut |e| ids.push(e.id));
        let before = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }

    #[test]
    fn test_unclosed_list_recovers_with_elements() {
        let outcome = parse("[a, b", &commands());
        assert_eq!(outcome.error_count(), 1);
        match outcome.tree.expect("recovered tree").kind {
            ExprKind::List(elements) => assert_eq!(elements.len(), 2),
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_trailing_tokens_are_an_error() {
        let outcome = parse("a ) b", &commands());
        assert!(outcome.tree.is_some());
        assert_eq!(outcome.error_count(), 1);
    }

    #[test]
    fn test_empty_input_is_an_error() {
        let outcome = parse("", &commands());
        assert!(outcome.tree.is_none());
        assert_eq!(outcome.error_count(), 1);
    }
}
