//! Parser for the gosh language.
//!
//! This crate provides:
//! - Token definitions and the lexer (`token`, `lexer`)
//! - The expression tree (`ast`)
//! - The recursive-descent parser (`parser`)
//! - A tree printer for diagnostics (`printer`)

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod span;
pub mod token;

pub use ast::{Expr, ExprKind, NodeId};
pub use error::ParseError;
pub use parser::{parse, ParseOutcome};
pub use printer::print_tree;
pub use span::Span;
