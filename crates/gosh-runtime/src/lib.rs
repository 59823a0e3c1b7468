//! Runtime for the gosh language.
//!
//! This crate provides:
//! - Runtime values (`value`)
//! - The tree-walking evaluator (`eval`)
//! - The native command catalog (`builtins`)
//! - The internal-fault circuit breaker (`faults`)

pub mod builtins;
pub mod eval;
pub mod faults;
pub mod value;

pub use eval::{run, EvalCtx};
pub use faults::Faults;
pub use value::{FnValue, Value, ValueRef};
