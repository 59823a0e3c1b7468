//! Tree printer for parsed expressions.
//!
//! Backs the REPL's `:ast` command: one node per line, children indented
//! under their parent.

use crate::ast::{Expr, ExprKind};

/// Print a tree to a string.
pub fn print_tree(expr: &Expr) -> String {
    let mut output = String::new();
    print_node(expr, 0, &mut output);
    output
}

fn print_node(expr: &Expr, depth: usize, output: &mut String) {
    for _ in 0..depth {
        output.push_str("  ");
    }

    match &expr.kind {
        ExprKind::Apply { callee, args } => {
            output.push_str("apply\n");
            print_node(callee, depth + 1, output);
            for arg in args {
                print_node(arg, depth + 1, output);
            }
        }
        ExprKind::List(elements) => {
            output.push_str("list\n");
            for element in elements {
                print_node(element, depth + 1, output);
            }
        }
        ExprKind::FileLit(name) => {
            output.push_str("file ");
            output.push_str(name);
            output.push('\n');
        }
        ExprKind::Symbol(name) => {
            output.push_str("symbol ");
            output.push_str(name);
            output.push('\n');
        }
    }
}
