//! Tree-walking evaluator.
//!
//! Runs a type-checked tree, producing shared runtime values. Evaluation is
//! strict, left to right, depth first. Nothing in here raises: runtime
//! trouble is contained in the `Invalid` value it occurred at, and the
//! genuinely unexpected cases additionally log and tick the fault tally.

use std::rc::Rc;

use gosh_parser::{Expr, ExprKind};
use gosh_types::{Binding, Scope};
use log::{debug, error};

use crate::faults::Faults;
use crate::value::{FnValue, Value, ValueRef};

/// Everything evaluation needs: the scope natives resolve through, and the
/// driver's fault tally.
pub struct EvalCtx<'a> {
    pub scope: &'a Scope,
    pub faults: &'a mut Faults,
}

/// Evaluate one node.
pub fn run(ctx: &mut EvalCtx, node: &Expr) -> ValueRef {
    match &node.kind {
        // A file literal is always a File; word classification already
        // happened in the tree
        ExprKind::FileLit(name) => Rc::new(Value::File(name.clone())),

        ExprKind::Symbol(name) => match ctx.scope.lookup(name) {
            Some(symbol) => {
                let Binding::Native(op) = symbol.binding;
                Rc::new(Value::Fn(FnValue::new(op)))
            }
            None => {
                // The analyzer rejects this path; reaching it means the
                // tree and scope disagree
                error!("evaluating unbound symbol '{}'", name);
                ctx.faults.note();
                Rc::new(Value::Invalid)
            }
        },

        ExprKind::List(elements) => {
            let values = elements.iter().map(|e| run(ctx, e)).collect();
            Rc::new(Value::Vector(values))
        }

        ExprKind::Apply { callee, args } => {
            let mut result = run(ctx, callee);

            for arg in args {
                let arg_value = run(ctx, arg);

                if !matches!(&*result, Value::Fn(_) | Value::Invalid) {
                    error!("application of a non-callable value: {}", result);
                    ctx.faults.note();
                    result = Rc::new(Value::Invalid);
                    continue;
                }

                result = Value::call(&result, arg_value);
            }

            debug!("application produced {}", result);
            result
        }
    }
}
