//! Type system for the gosh language.
//!
//! This crate provides:
//! - Type definitions (`types`)
//! - The scope/symbol table (`scope`)
//! - Semantic errors (`error`)
//! - The semantic analyzer (`analyzer`)

pub mod analyzer;
pub mod error;
pub mod scope;
pub mod types;

pub use analyzer::{analyze, Analysis, TypeTable};
pub use error::SemanticError;
pub use scope::{Binding, NativeOp, Scope, Symbol};
pub use types::Type;
