//! The gosh type algebra.
//!
//! Types are plain values compared structurally; the same structural type is
//! freely cloned wherever it is needed and never mutated after construction.

use std::fmt;

/// A gosh type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// The error sentinel. Assigned wherever analysis fails; unifies with
    /// everything so one bad subexpression does not cascade into a wall of
    /// diagnostics.
    Invalid,
    /// The nullary argument type, `()`.
    Unit,
    Int,
    Str,
    /// A filesystem path.
    File,
    List(Box<Type>),
    Tuple(Vec<Type>),
    /// A function from one parameter to one result; multi-parameter
    /// commands are curried chains of these.
    Fn(Box<Type>, Box<Type>),
}

impl Type {
    /// Construct a list type.
    pub fn list(element: Type) -> Type {
        Type::List(Box::new(element))
    }

    /// Construct a tuple type.
    pub fn tuple(elements: Vec<Type>) -> Type {
        Type::Tuple(elements)
    }

    /// Construct a function type.
    pub fn func(param: Type, result: Type) -> Type {
        Type::Fn(Box::new(param), Box::new(result))
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Type::Invalid)
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Type::List(_))
    }

    /// The element type of a list, or `None` for any other type.
    pub fn list_elem(&self) -> Option<&Type> {
        match self {
            Type::List(element) => Some(element),
            _ => None,
        }
    }

    /// The ordered element types of a tuple, or `None` for any other type.
    pub fn tuple_elems(&self) -> Option<&[Type]> {
        match self {
            Type::Tuple(elements) => Some(elements),
            _ => None,
        }
    }

    pub fn fn_param(&self) -> Option<&Type> {
        match self {
            Type::Fn(param, _) => Some(param),
            _ => None,
        }
    }

    pub fn fn_result(&self) -> Option<&Type> {
        match self {
            Type::Fn(_, result) => Some(result),
            _ => None,
        }
    }

    /// True iff this is `() -> _`, a command that is auto-invoked for
    /// display.
    pub fn unit_applies(&self) -> bool {
        matches!(self, Type::Fn(param, _) if **param == Type::Unit)
    }

    /// Analysis-time compatibility.
    ///
    /// `Invalid` unifies with anything and the merge keeps the other side;
    /// compound types unify component-wise; everything else must be equal.
    /// `None` means the two genuinely disagree.
    pub fn unify(a: &Type, b: &Type) -> Option<Type> {
        match (a, b) {
            (Type::Invalid, other) | (other, Type::Invalid) => Some(other.clone()),

            (Type::List(x), Type::List(y)) => Some(Type::list(Type::unify(x, y)?)),

            (Type::Tuple(xs), Type::Tuple(ys)) if xs.len() == ys.len() => {
                let elements = xs
                    .iter()
                    .zip(ys)
                    .map(|(x, y)| Type::unify(x, y))
                    .collect::<Option<Vec<_>>>()?;
                Some(Type::Tuple(elements))
            }

            (Type::Fn(xp, xr), Type::Fn(yp, yr)) => {
                Some(Type::func(Type::unify(xp, yp)?, Type::unify(xr, yr)?))
            }

            _ if a == b => Some(a.clone()),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Invalid => write!(f, "Invalid"),
            Type::Unit => write!(f, "()"),
            Type::Int => write!(f, "Int"),
            Type::Str => write!(f, "Str"),
            Type::File => write!(f, "File"),
            Type::List(element) => write!(f, "[{}]", element),
            Type::Tuple(elements) => {
                write!(f, "(")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                write!(f, ")")
            }
            Type::Fn(param, result) => {
                // Arrows associate right; a function on the left needs parens
                if matches!(**param, Type::Fn(..)) {
                    write!(f, "({}) -> {}", param, result)
                } else {
                    write!(f, "{} -> {}", param, result)
                }
            }
        }
    }
}
