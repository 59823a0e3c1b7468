//! Semantic analyzer.
//!
//! Walks a parsed tree, resolves symbols and assigns a type to every node.
//! It never fails: anything wrong degrades to `Invalid` at the offending
//! node plus an accumulated error, and the rest of the tree still gets fully
//! annotated, so callers can query any node's type afterwards.

use std::collections::HashMap;

use gosh_parser::{Expr, ExprKind, NodeId};

use crate::error::SemanticError;
use crate::scope::Scope;
use crate::types::Type;

static INVALID: Type = Type::Invalid;

/// The types assigned to a tree's nodes, keyed by node id.
///
/// Each id is written exactly once, during analysis.
#[derive(Debug, Default)]
pub struct TypeTable {
    types: HashMap<NodeId, Type>,
}

impl TypeTable {
    /// The type assigned to a node id.
    ///
    /// Ids from a different tree answer `Invalid` rather than panicking.
    pub fn get(&self, id: NodeId) -> &Type {
        self.types.get(&id).unwrap_or(&INVALID)
    }

    /// The type assigned to a node.
    pub fn of(&self, expr: &Expr) -> &Type {
        self.get(expr.id)
    }

    fn set(&mut self, id: NodeId, ty: Type) {
        self.types.insert(id, ty);
    }
}

/// The result of analyzing one tree.
#[derive(Debug)]
pub struct Analysis {
    pub types: TypeTable,
    pub errors: Vec<SemanticError>,
}

impl Analysis {
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}

/// Analyze a tree against a scope, assigning a type to every node.
pub fn analyze(tree: &Expr, scope: &Scope) -> Analysis {
    let mut analyzer = Analyzer {
        scope,
        types: TypeTable::default(),
        errors: Vec::new(),
    };
    analyzer.infer(tree);

    Analysis {
        types: analyzer.types,
        errors: analyzer.errors,
    }
}

/// The analyzer state.
struct Analyzer<'a> {
    scope: &'a Scope,
    types: TypeTable,
    errors: Vec<SemanticError>,
}

impl Analyzer<'_> {
    /// Assign and return the type of one node, recursing through children.
    fn infer(&mut self, expr: &Expr) -> Type {
        let ty = match &expr.kind {
            ExprKind::FileLit(_) => Type::File,
            ExprKind::Symbol(name) => self.infer_symbol(name, expr),
            ExprKind::List(elements) => self.infer_list(elements),
            ExprKind::Apply { callee, args } => self.infer_apply(callee, args),
        };

        self.types.set(expr.id, ty.clone());
        ty
    }

    fn infer_symbol(&mut self, name: &str, expr: &Expr) -> Type {
        match self.scope.lookup(name) {
            Some(symbol) => symbol.ty.clone(),
            None => {
                self.errors.push(SemanticError::UnboundSymbol {
                    name: name.to_string(),
                    span: expr.span,
                });
                Type::Invalid
            }
        }
    }

    /// Unify all element types into one `List(T)`.
    ///
    /// An empty list defaults to `[Invalid]`, which unifies with any use
    /// site. Disagreeing elements make the whole list `Invalid`, but every
    /// element is still analyzed first so their own errors all surface.
    fn infer_list(&mut self, elements: &[Expr]) -> Type {
        let element_types: Vec<Type> = elements.iter().map(|e| self.infer(e)).collect();

        let mut unified = Type::Invalid;
        for (element, ty) in elements.iter().zip(&element_types) {
            match Type::unify(&unified, ty) {
                Some(merged) => unified = merged,
                None => {
                    self.errors.push(SemanticError::HeterogeneousList {
                        first: unified,
                        found: ty.clone(),
                        span: element.span,
                    });
                    return Type::Invalid;
                }
            }
        }

        Type::list(unified)
    }

    /// Check a curried application left to right.
    ///
    /// `f a b` means `(f a) b`: after each argument the running type becomes
    /// the callee's result and the next argument is checked against that. A
    /// mismatch makes the whole application `Invalid` and stops checking the
    /// chain, but the remaining arguments are still analyzed so sibling
    /// errors are not lost. An `Invalid` anywhere propagates silently.
    fn infer_apply(&mut self, callee: &Expr, args: &[Expr]) -> Type {
        let mut current = self.infer(callee);
        let mut broken = current.is_invalid();

        for arg in args {
            let arg_ty = self.infer(arg);
            if broken {
                continue;
            }

            match current.clone() {
                Type::Fn(param, result) => {
                    if Type::unify(&arg_ty, &param).is_some() {
                        current = *result;
                    } else {
                        self.errors.push(SemanticError::TypeMismatch {
                            expected: *param,
                            found: arg_ty,
                            span: arg.span,
                        });
                        broken = true;
                    }
                }
                Type::Invalid => broken = true,
                other => {
                    self.errors.push(SemanticError::NotAFunction {
                        ty: other,
                        span: callee.span,
                    });
                    broken = true;
                }
            }
        }

        if broken {
            Type::Invalid
        } else {
            current
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::{Binding, NativeOp};
    use gosh_parser::parse;

    fn test_scope() -> Scope {
        let mut scope = Scope::global();
        scope
            .bind("size", Type::func(Type::File, Type::Int), Binding::Native(NativeOp::Size))
            .unwrap();
        scope
            .bind("ls", Type::func(Type::Unit, Type::list(Type::File)), Binding::Native(NativeOp::Ls))
            .unwrap();
        scope
            .bind(
                "take",
                Type::func(Type::Int, Type::func(Type::list(Type::File), Type::list(Type::File))),
                Binding::Native(NativeOp::Take),
            )
            .unwrap();
        scope
    }

    fn analyze_source(source: &str, scope: &Scope) -> (Expr, Analysis) {
        let outcome = parse(source, &scope.names());
        assert!(outcome.errors.is_empty(), "parse errors: {:?}", outcome.errors);
        let tree = outcome.tree.unwrap();
        let analysis = analyze(&tree, scope);
        (tree, analysis)
    }

    #[test]
    fn test_file_literal_types_as_file() {
        let scope = test_scope();
        let (tree, analysis) = analyze_source("readme.md", &scope);
        assert_eq!(analysis.types.of(&tree), &Type::File);
        assert_eq!(analysis.error_count(), 0);
    }

    #[test]
    fn test_symbol_takes_its_bound_type() {
        let scope = test_scope();
        let (tree, analysis) = analyze_source("size", &scope);
        assert_eq!(analysis.types.of(&tree), &Type::func(Type::File, Type::Int));
    }

    #[test]
    fn test_application_produces_result_type() {
        let scope = test_scope();
        let (tree, analysis) = analyze_source("size readme.md", &scope);
        assert_eq!(analysis.error_count(), 0);
        assert_eq!(analysis.types.of(&tree), &Type::Int);
    }

    #[test]
    fn test_curried_application_steps_through_arrows() {
        let scope = test_scope();
        let (tree, analysis) = analyze_source("take (size a) [b, c]", &scope);
        assert_eq!(analysis.error_count(), 0);
        assert_eq!(analysis.types.of(&tree), &Type::list(Type::File));
    }

    #[test]
    fn test_argument_mismatch_is_reported_and_invalidates() {
        let scope = test_scope();
        let (tree, analysis) = analyze_source("size [a]", &scope);
        assert_eq!(analysis.error_count(), 1);
        assert!(matches!(
            analysis.errors[0],
            SemanticError::TypeMismatch { .. }
        ));
        assert_eq!(analysis.types.of(&tree), &Type::Invalid);
    }

    #[test]
    fn test_unbound_symbol_only_errors_once() {
        // The unbound callee becomes Invalid; the application over it must
        // not pile a second diagnostic on top.
        let mut scope = Scope::global();
        scope
            .bind("size", Type::func(Type::File, Type::Int), Binding::Native(NativeOp::Size))
            .unwrap();
        let outcome = parse("size readme.md", &scope.names());
        let tree = outcome.tree.unwrap();

        // Analyze against an empty scope, so `size` is unbound
        let empty = Scope::global();
        let analysis = analyze(&tree, &empty);
        assert_eq!(analysis.error_count(), 1);
        assert!(matches!(
            analysis.errors[0],
            SemanticError::UnboundSymbol { .. }
        ));
        assert_eq!(analysis.types.of(&tree), &Type::Invalid);
    }

    #[test]
    fn test_sibling_errors_all_surface() {
        let scope = test_scope();
        let (_, analysis) = analyze_source("take [a] [size, b]", &scope);
        // Two independent errors: [a] is not an Int, and [size, b] mixes
        // a function with a file.
        assert_eq!(analysis.error_count(), 2);
    }

    #[test]
    fn test_homogeneous_list() {
        let scope = test_scope();
        let (tree, analysis) = analyze_source("[a, b, c]", &scope);
        assert_eq!(analysis.error_count(), 0);
        assert_eq!(analysis.types.of(&tree), &Type::list(Type::File));
    }

    #[test]
    fn test_heterogeneous_list_is_reported() {
        let scope = test_scope();
        let (tree, analysis) = analyze_source("[a, size]", &scope);
        assert_eq!(analysis.error_count(), 1);
        assert!(matches!(
            analysis.errors[0],
            SemanticError::HeterogeneousList { .. }
        ));
        assert_eq!(analysis.types.of(&tree), &Type::Invalid);
    }

    #[test]
    fn test_empty_list_defaults_to_invalid_element() {
        let scope = test_scope();
        let (tree, analysis) = analyze_source("[]", &scope);
        assert_eq!(analysis.error_count(), 0);
        assert_eq!(analysis.types.of(&tree), &Type::list(Type::Invalid));
    }

    #[test]
    fn test_applying_a_file_is_not_a_function() {
        let scope = test_scope();
        let (tree, analysis) = analyze_source("readme.md a", &scope);
        assert_eq!(analysis.error_count(), 1);
        assert!(matches!(
            analysis.errors[0],
            SemanticError::NotAFunction { .. }
        ));
        assert_eq!(analysis.types.of(&tree), &Type::Invalid);
    }

    #[test]
    fn test_every_node_gets_a_type() {
        let scope = test_scope();
        let (tree, analysis) = analyze_source("take (size a) [b, c]", &scope);
        // The tree is well typed, so every node carries a real type
        tree.walk(&mut |e| {
            assert_ne!(analysis.types.of(e), &Type::Invalid, "node {} untyped", e.id);
        });
    }
}
