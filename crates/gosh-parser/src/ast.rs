//! Abstract Syntax Tree definitions for gosh.

use crate::span::Span;

/// Identifies one node within a parsed tree.
///
/// Ids are assigned by the parser and are dense within a single tree; the
/// analyzer keys its per-node type assignments on them.
pub type NodeId = usize;

/// A parsed expression node.
#[derive(Debug, Clone)]
pub struct Expr {
    /// This node's id, unique within its tree.
    pub id: NodeId,
    /// What kind of node this is.
    pub kind: ExprKind,
    /// Where the node came from in the source.
    pub span: Span,
}

/// The expression forms of the language.
#[derive(Debug, Clone)]
pub enum ExprKind {
    /// Juxtaposed application, `callee arg arg …`, applied left to right.
    Apply { callee: Box<Expr>, args: Vec<Expr> },
    /// A bracketed list literal.
    List(Vec<Expr>),
    /// A bare or quoted word denoting a filesystem path.
    FileLit(String),
    /// A word that matched a name bound in the global scope.
    Symbol(String),
}

impl Expr {
    /// Walk the tree, visiting this node and then its children.
    pub fn walk(&self, visit: &mut impl FnMut(&Expr)) {
        visit(self);
        match &self.kind {
            ExprKind::Apply { callee, args } => {
                callee.walk(visit);
                for arg in args {
                    arg.walk(visit);
                }
            }
            ExprKind::List(elements) => {
                for element in elements {
                    element.walk(visit);
                }
            }
            ExprKind::FileLit(_) | ExprKind::Symbol(_) => {}
        }
    }
}
