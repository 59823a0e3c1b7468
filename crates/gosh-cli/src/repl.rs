//! The interactive shell.
//!
//! A rustyline loop around the session pipeline, plus the `:command` escape
//! hatch for things that are about the shell rather than the language.

use std::path::PathBuf;

use gosh_display::RenderOptions;
use gosh_parser::print_tree;
use gosh_runtime::Value;
use gosh_types::Type;
use log::debug;
use rustyline::error::ReadlineError;
use rustyline::Editor;

use crate::paths;
use crate::session::Session;

/// Run the read-eval-print loop until `:exit` or end of input.
pub fn run(session: &mut Session) {
    let history = history_path();

    let mut rl = Editor::<()>::new();
    if rl.load_history(&history).is_err() {
        debug!("no previous history at {}", history.display());
    }

    loop {
        match rl.readline(&paths::prompt()) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                if line == ":exit" {
                    break;
                }

                rl.add_history_entry(line.as_str());
                if let Err(e) = rl.save_history(&history) {
                    debug!("could not save history: {}", e);
                }

                match line.strip_prefix(':') {
                    Some(command) => dispatch(session, command),
                    None => {
                        let opts = RenderOptions {
                            width: paths::terminal_width(),
                        };
                        session.eval_and_display(&line, &opts);
                    }
                }
            }

            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,

            Err(e) => {
                eprintln!("error: {}", e);
                break;
            }
        }
    }
}

fn history_path() -> PathBuf {
    match std::env::var("HOME") {
        Ok(home) if !home.is_empty() => PathBuf::from(home).join(".gosh_history"),
        _ => PathBuf::from("./.gosh_history"),
    }
}

/// Split a `:command` line into its name and argument text.
fn split_command(input: &str) -> (&str, &str) {
    match input.split_once(' ') {
        Some((name, rest)) => (name, rest),
        None => (input, ""),
    }
}

fn dispatch(session: &mut Session, input: &str) {
    let (name, rest) = split_command(input);

    match name {
        "" => println!("No command name given"),
        "cd" => cmd_cd(session, rest),
        "type" => cmd_type(session, rest),
        "ast" => cmd_ast(session, rest),
        _ => println!("No command named ':{}'", name),
    }
}

/// `:type expr` shows the expression's type without evaluating it.
fn cmd_type(session: &mut Session, source: &str) {
    let compiled = session.compile(source);

    if compiled.error_count() > 0 {
        session.report_errors(&compiled, source);
    } else if let Some(ty) = compiled.root_type() {
        println!("{}", ty);
    }
}

/// `:ast expr` shows the parse tree, errors or not.
fn cmd_ast(session: &mut Session, source: &str) {
    let compiled = session.compile(source);
    if let Some(tree) = &compiled.tree {
        print!("{}", print_tree(tree));
    }
}

/// `:cd expr` evaluates a File expression and enters it.
fn cmd_cd(session: &mut Session, source: &str) {
    let compiled = session.compile(source);

    if compiled.error_count() > 0 {
        session.report_errors(&compiled, source);
        return;
    }

    let ty = match compiled.root_type() {
        Some(ty) => ty.clone(),
        None => return,
    };

    if ty.is_invalid() {
        return;
    }
    if ty != Type::File {
        println!(":cd requires a File argument, given {}", ty);
        return;
    }

    let tree = match &compiled.tree {
        Some(tree) => tree,
        None => return,
    };

    if let Value::File(name) = &*session.evaluate(tree) {
        if std::env::set_current_dir(name).is_err() {
            println!("Unable to enter directory \"{}\"", name);
        }
    }
}
