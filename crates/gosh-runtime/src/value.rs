//! Runtime values.
//!
//! Values are immutable and shared through `Rc`: a vector or tuple holds
//! references to its elements, not copies, and nothing ever frees a value
//! explicitly.

use std::fmt;
use std::rc::Rc;

use gosh_types::NativeOp;

use crate::builtins;

/// A shared, immutable runtime value.
pub type ValueRef = Rc<Value>;

/// The runtime result of evaluating a node.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The error sentinel. Composes: any operation over it answers
    /// `Invalid` again rather than aborting.
    Invalid,
    Unit,
    Int(i64),
    Str(String),
    /// A filesystem path; not opened or read until a display or builtin
    /// inspects it.
    File(String),
    /// A native command, possibly partially applied.
    Fn(FnValue),
    Vector(Vec<ValueRef>),
    Tuple(Vec<ValueRef>),
}

/// A native command plus the arguments applied to it so far.
///
/// Application is curried: each call appends one argument, and the native
/// runs once its full arity is reached.
#[derive(Debug, Clone, PartialEq)]
pub struct FnValue {
    pub op: NativeOp,
    pub applied: Vec<ValueRef>,
}

impl FnValue {
    pub fn new(op: NativeOp) -> Self {
        Self {
            op,
            applied: Vec::new(),
        }
    }

    fn apply(&self, arg: ValueRef) -> ValueRef {
        let mut applied = self.applied.clone();
        applied.push(arg);

        if applied.len() >= builtins::arity(self.op) {
            builtins::invoke(self.op, &applied)
        } else {
            Rc::new(Value::Fn(FnValue {
                op: self.op,
                applied,
            }))
        }
    }
}

impl Value {
    pub fn is_invalid(&self) -> bool {
        matches!(self, Value::Invalid)
    }

    /// Apply a callable value to one argument.
    ///
    /// Calling `Invalid` answers `Invalid`; calling any other non-function
    /// does too, and the evaluator decides whether that deserves a fault
    /// report.
    pub fn call(callee: &ValueRef, arg: ValueRef) -> ValueRef {
        match &**callee {
            Value::Fn(f) => f.apply(arg),
            _ => Rc::new(Value::Invalid),
        }
    }

    /// The printed width of this value, in characters.
    pub fn width(&self) -> usize {
        self.to_string().chars().count()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Invalid => write!(f, "Invalid"),
            Value::Unit => write!(f, "()"),
            Value::Int(n) => write!(f, "{}", n),
            Value::Str(s) => write!(f, "{}", s),
            Value::File(name) => write!(f, "{}", name),
            Value::Fn(_) => write!(f, "<fn>"),
            Value::Vector(elements) => write_sequence(f, elements, "[", "]"),
            Value::Tuple(elements) => write_sequence(f, elements, "(", ")"),
        }
    }
}

fn write_sequence(
    f: &mut fmt::Formatter<'_>,
    elements: &[ValueRef],
    open: &str,
    close: &str,
) -> fmt::Result {
    write!(f, "{}", open)?;
    for (i, element) in elements.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", element)?;
    }
    write!(f, "{}", close)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_scalars() {
        assert_eq!(Value::Int(42).to_string(), "42");
        assert_eq!(Value::File("a.txt".into()).to_string(), "a.txt");
        assert_eq!(Value::Invalid.to_string(), "Invalid");
    }

    #[test]
    fn test_display_sequences() {
        let vector = Value::Vector(vec![Rc::new(Value::Int(1)), Rc::new(Value::Int(2))]);
        assert_eq!(vector.to_string(), "[1, 2]");

        let tuple = Value::Tuple(vec![
            Rc::new(Value::File("a".into())),
            Rc::new(Value::Int(7)),
        ]);
        assert_eq!(tuple.to_string(), "(a, 7)");
    }

    #[test]
    fn test_calling_a_non_function_answers_invalid() {
        let file: ValueRef = Rc::new(Value::File("a.txt".into()));
        let result = Value::call(&file, Rc::new(Value::Unit));
        assert!(result.is_invalid());
    }

    #[test]
    fn test_calling_invalid_composes() {
        let invalid: ValueRef = Rc::new(Value::Invalid);
        let result = Value::call(&invalid, Rc::new(Value::Unit));
        assert!(result.is_invalid());
    }

    #[test]
    fn test_partial_application_waits_for_full_arity() {
        // take has arity 2: one argument in produces another function
        let take: ValueRef = Rc::new(Value::Fn(FnValue::new(NativeOp::Take)));
        let partial = Value::call(&take, Rc::new(Value::Int(1)));
        assert!(matches!(&*partial, Value::Fn(f) if f.applied.len() == 1));
    }

    #[test]
    fn test_full_application_invokes_the_native() {
        let take: ValueRef = Rc::new(Value::Fn(FnValue::new(NativeOp::Take)));
        let partial = Value::call(&take, Rc::new(Value::Int(1)));
        let files = Rc::new(Value::Vector(vec![
            Rc::new(Value::File("a".into())),
            Rc::new(Value::File("b".into())),
        ]));

        let result = Value::call(&partial, files);
        assert_eq!(
            *result,
            Value::Vector(vec![Rc::new(Value::File("a".into()))])
        );
    }
}
