//! One compile → gate → evaluate → display pipeline over a shared global
//! scope.
//!
//! The session owns the two pieces of long-lived state: the global scope the
//! builtins were installed into, and the internal-fault tally that decides
//! whether evaluation is currently allowed at all.

use gosh_display::{render, RenderOptions};
use gosh_parser::{parse, Expr, ParseError, ParseOutcome};
use gosh_runtime::{builtins, run, EvalCtx, Faults, ValueRef};
use gosh_types::{analyze, Analysis, Scope, Type};
use log::error;
use miette::Report;

/// Long-lived interpreter state shared by every input.
pub struct Session {
    scope: Scope,
    faults: Faults,
}

/// The result of compiling one input: a best-effort tree, its analysis, and
/// every error from both stages.
pub struct Compiled {
    pub tree: Option<Expr>,
    pub analysis: Option<Analysis>,
    pub parse_errors: Vec<ParseError>,
}

impl Compiled {
    pub fn error_count(&self) -> usize {
        let semantic = self.analysis.as_ref().map_or(0, |a| a.error_count());
        self.parse_errors.len() + semantic
    }

    /// The type assigned to the root node.
    pub fn root_type(&self) -> Option<&Type> {
        let tree = self.tree.as_ref()?;
        Some(self.analysis.as_ref()?.types.of(tree))
    }
}

impl Session {
    pub fn new() -> Self {
        let mut scope = Scope::global();
        if let Err(e) = builtins::install(&mut scope) {
            error!("installing builtins: {}", e);
        }

        Self {
            scope,
            faults: Faults::new(),
        }
    }

    /// Parse and analyze one input.
    pub fn compile(&self, source: &str) -> Compiled {
        let ParseOutcome { tree, errors } = parse(source, &self.scope.names());
        let analysis = tree.as_ref().map(|t| analyze(t, &self.scope));

        Compiled {
            tree,
            analysis,
            parse_errors: errors,
        }
    }

    /// Run a compiled tree. Callers check the error count first.
    pub fn evaluate(&mut self, tree: &Expr) -> ValueRef {
        let mut ctx = EvalCtx {
            scope: &self.scope,
            faults: &mut self.faults,
        };
        run(&mut ctx, tree)
    }

    /// Print every diagnostic from a compile against its source line.
    pub fn report_errors(&self, compiled: &Compiled, source: &str) {
        for e in &compiled.parse_errors {
            let report = Report::new(e.clone()).with_source_code(source.to_string());
            eprintln!("{:?}", report);
        }

        if let Some(analysis) = &compiled.analysis {
            for e in &analysis.errors {
                let report = Report::new(e.clone()).with_source_code(source.to_string());
                eprintln!("{:?}", report);
            }
        }
    }

    /// The whole pipeline for one input. Answers false when diagnostics or
    /// the fault breaker blocked evaluation.
    pub fn eval_and_display(&mut self, source: &str, opts: &RenderOptions) -> bool {
        let compiled = self.compile(source);

        if compiled.error_count() > 0 {
            self.report_errors(&compiled, source);
            return false;
        }

        if !self.faults.quiet() {
            eprintln!("(Too many internal errors recently; skipping evaluation.)");
            return false;
        }

        let tree = match &compiled.tree {
            Some(tree) => tree,
            None => return false,
        };

        let value = self.evaluate(tree);
        let ty = match compiled.root_type() {
            Some(ty) => ty.clone(),
            None => Type::Invalid,
        };

        print!("{}", render(&value, &ty, opts));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gosh_runtime::Value;

    #[test]
    fn test_compile_well_typed_input() {
        let session = Session::new();
        let compiled = session.compile("size readme.md");
        assert_eq!(compiled.error_count(), 0);
        assert_eq!(compiled.root_type(), Some(&Type::Int));
    }

    #[test]
    fn test_compile_counts_both_error_stages() {
        let session = Session::new();

        // A parse error: unclosed list
        let compiled = session.compile("[a, b");
        assert!(compiled.error_count() > 0);

        // A semantic error: size applied to a list
        let compiled = session.compile("size [a, b]");
        assert!(compiled.error_count() > 0);
        assert_eq!(compiled.root_type(), Some(&Type::Invalid));
    }

    #[test]
    fn test_evaluate_produces_a_value() {
        let mut session = Session::new();
        let compiled = session.compile("[a, b]");
        assert_eq!(compiled.error_count(), 0);

        let tree = compiled.tree.as_ref().unwrap();
        let value = session.evaluate(tree);
        assert!(matches!(&*value, Value::Vector(v) if v.len() == 2));
    }

    #[test]
    fn test_ill_typed_input_blocks_evaluation() {
        let mut session = Session::new();
        let opts = RenderOptions::default();
        assert!(!session.eval_and_display("size [a]", &opts));
    }

    #[test]
    fn test_sizes_pipeline_renders_a_table() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("a"), "x").unwrap();
        std::fs::write(dir.path().join("bb"), "xyz").unwrap();

        let a = dir.path().join("a").display().to_string();
        let b = dir.path().join("bb").display().to_string();

        let mut session = Session::new();
        let compiled = session.compile(&format!("sizes [{}, {}]", a, b));
        assert_eq!(compiled.error_count(), 0);
        assert_eq!(
            compiled.root_type(),
            Some(&Type::list(Type::tuple(vec![Type::File, Type::Int])))
        );

        let ty = compiled.root_type().unwrap().clone();
        let tree = compiled.tree.as_ref().unwrap();
        let value = session.evaluate(tree);

        // The longer path decides the first column's width
        let out = render(&value, &ty, &RenderOptions::default());
        let expected = format!(
            "{:<cw$}1  \n{:<cw$}3  \n :: [(File, Int)]\n",
            a,
            b,
            cw = b.len() + 2
        );
        assert_eq!(out, expected);
    }
}
