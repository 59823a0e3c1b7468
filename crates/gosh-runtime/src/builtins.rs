//! The native command catalog.
//!
//! Each native is a `NativeOp` tag bound into the global scope at startup
//! with its curried `Fn` type signature; the implementations live in one
//! fixed match. Natives never raise: a path that cannot be stat'd or an
//! argument of the wrong runtime shape degrades to `Invalid`.

use std::fs;
use std::rc::Rc;

use gosh_types::{Binding, NativeOp, Scope, SemanticError, Type};

use crate::value::{Value, ValueRef};

const CATALOG: &[(&str, NativeOp)] = &[
    ("size", NativeOp::Size),
    ("read", NativeOp::Read),
    ("ls", NativeOp::Ls),
    ("wd", NativeOp::Wd),
    ("sizes", NativeOp::Sizes),
    ("take", NativeOp::Take),
];

/// Bind every native command into a scope.
///
/// Called once at startup against the global scope.
pub fn install(scope: &mut Scope) -> Result<(), SemanticError> {
    for (name, op) in CATALOG {
        scope.bind(name, signature(*op), Binding::Native(*op))?;
    }
    Ok(())
}

/// How many curried arguments a native consumes before running.
///
/// Nullary commands still consume one: the synthesized `()`.
pub fn arity(op: NativeOp) -> usize {
    match op {
        NativeOp::Take => 2,
        _ => 1,
    }
}

/// The type signature a native is bound with.
pub fn signature(op: NativeOp) -> Type {
    match op {
        NativeOp::Size => Type::func(Type::File, Type::Int),
        NativeOp::Read => Type::func(Type::File, Type::Str),
        NativeOp::Ls => Type::func(Type::Unit, Type::list(Type::File)),
        NativeOp::Wd => Type::func(Type::Unit, Type::File),
        NativeOp::Sizes => Type::func(
            Type::list(Type::File),
            Type::list(Type::tuple(vec![Type::File, Type::Int])),
        ),
        NativeOp::Take => Type::func(
            Type::Int,
            Type::func(Type::list(Type::File), Type::list(Type::File)),
        ),
    }
}

/// Run a fully-applied native.
pub fn invoke(op: NativeOp, args: &[ValueRef]) -> ValueRef {
    match op {
        NativeOp::Size => match args.first().map(|a| &**a) {
            Some(Value::File(name)) => file_size(name),
            _ => Rc::new(Value::Invalid),
        },

        NativeOp::Read => match args.first().map(|a| &**a) {
            Some(Value::File(name)) => match fs::read_to_string(name) {
                Ok(contents) => Rc::new(Value::Str(contents)),
                Err(_) => Rc::new(Value::Invalid),
            },
            _ => Rc::new(Value::Invalid),
        },

        NativeOp::Ls => list_directory("."),

        NativeOp::Wd => match std::env::current_dir() {
            Ok(dir) => Rc::new(Value::File(dir.display().to_string())),
            Err(_) => Rc::new(Value::Invalid),
        },

        NativeOp::Sizes => match args.first().map(|a| &**a) {
            Some(Value::Vector(files)) => {
                let pairs = files
                    .iter()
                    .map(|file| {
                        let size = match &**file {
                            Value::File(name) => file_size(name),
                            _ => Rc::new(Value::Invalid),
                        };
                        Rc::new(Value::Tuple(vec![Rc::clone(file), size]))
                    })
                    .collect();
                Rc::new(Value::Vector(pairs))
            }
            _ => Rc::new(Value::Invalid),
        },

        NativeOp::Take => match (args.first().map(|a| &**a), args.get(1).map(|a| &**a)) {
            (Some(Value::Int(n)), Some(Value::Vector(elements))) => {
                let kept = elements
                    .iter()
                    .take((*n).max(0) as usize)
                    .map(Rc::clone)
                    .collect();
                Rc::new(Value::Vector(kept))
            }
            _ => Rc::new(Value::Invalid),
        },
    }
}

fn file_size(name: &str) -> ValueRef {
    match fs::metadata(name) {
        Ok(meta) => Rc::new(Value::Int(meta.len() as i64)),
        Err(_) => Rc::new(Value::Invalid),
    }
}

fn list_directory(dir: &str) -> ValueRef {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return Rc::new(Value::Invalid),
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();

    Rc::new(Value::Vector(
        names
            .into_iter()
            .map(|name| Rc::new(Value::File(name)))
            .collect(),
    ))
}
