//! Parse error types.

use miette::Diagnostic;
use thiserror::Error;

use crate::span::Span;

/// A parse error.
#[derive(Error, Diagnostic, Debug, Clone)]
pub enum ParseError {
    #[error("unexpected token: expected {expected}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        #[label("here")]
        span: Span,
    },

    #[error("unexpected end of input: expected {expected}")]
    UnexpectedEof { expected: String },

    #[error("unrecognizable input: {text}")]
    UnrecognizedInput {
        text: String,
        #[label("here")]
        span: Span,
    },
}

impl ParseError {
    pub fn unexpected_token(
        span: Span,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        ParseError::UnexpectedToken {
            expected: expected.into(),
            found: found.into(),
            span,
        }
    }

    pub fn unexpected_eof(expected: impl Into<String>) -> Self {
        ParseError::UnexpectedEof {
            expected: expected.into(),
        }
    }
}
