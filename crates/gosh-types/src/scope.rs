//! Scope and symbol table.

use std::collections::{HashMap, HashSet};

use crate::error::SemanticError;
use crate::types::Type;

/// The closed catalog of native commands.
///
/// The symbol table and runtime values carry these tags instead of raw
/// function pointers; the runtime dispatches them through one fixed match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeOp {
    /// `size : File -> Int`
    Size,
    /// `read : File -> Str`
    Read,
    /// `ls : () -> [File]`
    Ls,
    /// `wd : () -> File`
    Wd,
    /// `sizes : [File] -> [(File, Int)]`
    Sizes,
    /// `take : Int -> [File] -> [File]`
    Take,
}

/// What a symbol is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Native(NativeOp),
}

/// An entry in a scope: a name, its type, and its binding.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub ty: Type,
    pub binding: Binding,
}

/// A lexical scope mapping names to symbols.
///
/// The current language surface only exercises the global scope, but lookup
/// walks outward through parents so nested scopes already behave.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    symbols: HashMap<String, Symbol>,
    parent: Option<Box<Scope>>,
}

impl Scope {
    /// Create the global scope.
    pub fn global() -> Self {
        Self::default()
    }

    /// Create a child scope that inherits from this one.
    pub fn child(&self) -> Self {
        Self {
            symbols: HashMap::new(),
            parent: Some(Box::new(self.clone())),
        }
    }

    /// Bind a name in this exact scope.
    ///
    /// Rebinding a name that already exists here is a semantic error, not a
    /// crash; shadowing an outer scope's binding is fine.
    pub fn bind(
        &mut self,
        name: &str,
        ty: Type,
        binding: Binding,
    ) -> Result<(), SemanticError> {
        if self.symbols.contains_key(name) {
            return Err(SemanticError::DuplicateBinding {
                name: name.to_string(),
            });
        }

        self.symbols.insert(
            name.to_string(),
            Symbol {
                name: name.to_string(),
                ty,
                binding,
            },
        );
        Ok(())
    }

    /// Look a name up, searching outward through enclosing scopes.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.symbols
            .get(name)
            .or_else(|| self.parent.as_ref().and_then(|p| p.lookup(name)))
    }

    /// Every name visible from this scope.
    ///
    /// The parser consumes this to classify bare words as symbol references
    /// or file literals.
    pub fn names(&self) -> HashSet<String> {
        let mut names = match &self.parent {
            Some(parent) => parent.names(),
            None => HashSet::new(),
        };
        names.extend(self.symbols.keys().cloned());
        names
    }
}
