//! The type-directed renderer.
//!
//! `render` is a function of the value *and its static type*: the dispatch
//! branches on type structure, never on the runtime tag alone, which is what
//! lets a list of files become a grid and a list of tuples become a table.
//! Every terminating branch prints the ` :: type` annotation exactly once
//! per top-level call.

use std::fs;
use std::io;
use std::path::Path;
use std::rc::Rc;

use gosh_runtime::{Value, ValueRef};
use gosh_types::Type;
use log::warn;

use crate::grid;
use crate::units::format_size;

const GAP: usize = 2;

/// Knobs the driver supplies; the engine never queries the terminal itself.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Terminal width in columns.
    pub width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { width: 80 }
    }
}

/// Render a value, as seen through its static type, to a string.
pub fn render(value: &ValueRef, ty: &Type, opts: &RenderOptions) -> String {
    // A nullary command is applied rather than shown
    if let Type::Fn(param, result) = ty {
        if **param == Type::Unit {
            let mut out = format!("(A value of {} has been automatically applied.)\n", ty);
            let applied = Value::call(value, Rc::new(Value::Unit));
            out.push_str(&render(&applied, result, opts));
            return out;
        }
    }

    if value.is_invalid() {
        return scalar_line(value, ty);
    }

    match ty {
        Type::List(element) if element.is_list() => render_list_of_lists(value, ty),

        Type::List(element) => match (&**value, &**element) {
            (Value::Vector(items), _) if items.len() <= 1 => scalar_line(value, ty),
            (Value::Vector(items), Type::File) => render_file_grid(items, ty, opts),
            (Value::Vector(items), Type::Tuple(columns)) => {
                render_table(items, columns.len(), ty)
            }
            _ => scalar_line(value, ty),
        },

        Type::Str => render_str(value, ty),

        Type::File => render_file(value, ty, opts),

        _ => scalar_line(value, ty),
    }
}

fn scalar_line(value: &ValueRef, ty: &Type) -> String {
    format!("{} :: {}\n", value, ty)
}

/// A list of files, displayed as a grid of names filling each column top
/// to bottom before spilling into the next.
fn render_file_grid(items: &[ValueRef], ty: &Type, opts: &RenderOptions) -> String {
    let labels: Vec<String> = items
        .iter()
        .map(|item| match &**item {
            Value::File(name) => file_label(name, Path::new(name)),
            other => other.to_string(),
        })
        .collect();

    let mut out = grid::layout(&labels, opts.width);
    out.push_str(&format!(" :: {}\n", ty));
    out
}

/// Directories get a suffix that plain files do not.
fn file_label(display: &str, path: &Path) -> String {
    if path.is_dir() {
        format!("{}/", display)
    } else {
        display.to_string()
    }
}

/// A list of tuples, displayed as a table with aligned columns.
fn render_table(rows: &[ValueRef], columns: usize, ty: &Type) -> String {
    let mut widths = vec![0usize; columns];
    for row in rows {
        if let Value::Tuple(cells) = &**row {
            for (col, cell) in cells.iter().enumerate().take(columns) {
                widths[col] = widths[col].max(cell.width());
            }
        }
    }

    let mut out = String::new();
    for row in rows {
        match &**row {
            Value::Tuple(cells) => {
                for (col, cell) in cells.iter().enumerate().take(columns) {
                    let text = cell.to_string();
                    out.push_str(&format!("{:<width$}", text, width = widths[col] + GAP));
                }
            }
            other => out.push_str(&other.to_string()),
        }
        out.push('\n');
    }

    out.push_str(&format!(" :: {}\n", ty));
    out
}

/// Lists of lists, and deeper.
///
/// Only genuinely multi-dimensional structures go multi-line: the brackets
/// land on their own line exactly when the next nesting level is itself a
/// list of lists. An own-line closing bracket leaves no room for the type
/// annotation, so it is omitted there.
fn render_list_of_lists(value: &ValueRef, ty: &Type) -> String {
    let mut out = String::new();
    let own_line = nested(value, ty, 0, &mut out);

    if own_line {
        out.push('\n');
    } else {
        out.push_str(&format!(" :: {}\n", ty));
    }
    out
}

/// Render one nesting level; answers whether its brackets took their own
/// line.
fn nested(value: &ValueRef, ty: &Type, depth: usize, out: &mut String) -> bool {
    let element_ty = match ty.list_elem() {
        Some(element) => element,
        None => {
            out.push_str(&value.to_string());
            return false;
        }
    };

    let items: &[ValueRef] = match &**value {
        Value::Vector(items) => items,
        other => {
            out.push_str(&other.to_string());
            return false;
        }
    };

    let recursing = element_ty.list_elem().map(Type::is_list).unwrap_or(false);

    if !recursing || items.is_empty() {
        out.push('[');
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&item.to_string());
        }
        out.push(']');
        return false;
    }

    out.push_str("[\n");
    indent(out, depth + 1);
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(",\n");
            indent(out, depth + 1);
        }
        nested(item, element_ty, depth + 1, out);
    }
    out.push('\n');
    indent(out, depth);
    out.push(']');
    true
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push(' ');
    }
}

/// Multiline strings print raw, without quoting; a missing final line break
/// is appended and warned about before the annotation.
fn render_str(value: &ValueRef, ty: &Type) -> String {
    let text = match &**value {
        Value::Str(text) => text,
        _ => return scalar_line(value, ty),
    };

    if !text.contains('\n') {
        return scalar_line(value, ty);
    }

    let mut out = text.clone();
    if !text.ends_with('\n') {
        out.push('\n');
        out.push_str("(This string was missing a final end of line character.)\n");
    }
    out.push_str(&format!(" :: {}\n", ty));
    out
}

/// A File scalar: the name and type, then what the path actually is. That
/// second line is a sized regular file, a directory (listed like a grid),
/// something odd, or one of a fixed set of stat failures.
fn render_file(value: &ValueRef, ty: &Type, opts: &RenderOptions) -> String {
    let mut out = scalar_line(value, ty);

    let name = match &**value {
        Value::File(name) => name,
        _ => return out,
    };

    match fs::metadata(name) {
        Ok(meta) if meta.is_file() => {
            out.push_str(&format!("({})\n", format_size(meta.len())));
        }
        Ok(meta) if meta.is_dir() => {
            out.push_str("(A directory)\n");
            out.push_str(&directory_grid(name, opts));
        }
        Ok(_) => {
            out.push_str("(A special file)\n");
        }
        Err(e) => {
            let message = match e.kind() {
                io::ErrorKind::NotFound => "This file does not exist",
                io::ErrorKind::NotADirectory => "This file has an invalid path",
                io::ErrorKind::PermissionDenied => {
                    "You do not have permission to access this path"
                }
                // Anything else gets empty parens
                _ => "",
            };
            out.push_str(&format!("({})\n", message));
        }
    }

    out
}

/// A directory's immediate children, alphabetically, in the same grid as a
/// file list.
fn directory_grid(dirname: &str, opts: &RenderOptions) -> String {
    let entries = match fs::read_dir(dirname) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("could not list {}: {}", dirname, e);
            return String::new();
        }
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();

    let labels: Vec<String> = names
        .iter()
        .map(|name| file_label(name, &Path::new(dirname).join(name)))
        .collect();

    grid::layout(&labels, opts.width)
}
