//! Semantic error definitions.

use gosh_parser::Span;
use miette::Diagnostic;
use thiserror::Error;

use crate::types::Type;

/// A semantic analysis error.
///
/// Each one is localized to a node whose type becomes `Invalid`; analysis of
/// sibling nodes continues, so one compile reports every independent error.
#[derive(Error, Diagnostic, Debug, Clone)]
pub enum SemanticError {
    #[error("unbound symbol: {name}")]
    UnboundSymbol {
        name: String,
        #[label("not bound in any scope")]
        span: Span,
    },

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: Type,
        found: Type,
        #[label("this argument")]
        span: Span,
    },

    #[error("{ty} is not a function and cannot be applied")]
    NotAFunction {
        ty: Type,
        #[label("applied here")]
        span: Span,
    },

    #[error("list elements disagree in type: {first} then {found}")]
    HeterogeneousList {
        first: Type,
        found: Type,
        #[label("this element")]
        span: Span,
    },

    #[error("{name} is already bound in this scope")]
    DuplicateBinding { name: String },
}

impl SemanticError {
    /// Get the source span of this error, where one exists.
    pub fn span(&self) -> Option<Span> {
        match self {
            SemanticError::UnboundSymbol { span, .. } => Some(*span),
            SemanticError::TypeMismatch { span, .. } => Some(*span),
            SemanticError::NotAFunction { span, .. } => Some(*span),
            SemanticError::HeterogeneousList { span, .. } => Some(*span),
            SemanticError::DuplicateBinding { .. } => None,
        }
    }
}
