//! gosh CLI
//!
//! With no arguments, an interactive REPL; with arguments, the arguments
//! joined into one expression, evaluated and displayed.

mod paths;
mod repl;
mod session;

use std::process::ExitCode;

use clap::Parser;
use gosh_display::RenderOptions;

use session::Session;

#[derive(Parser)]
#[command(name = "gosh")]
#[command(version = "0.1.0")]
#[command(about = "An interactive shell where files are typed values")]
struct Cli {
    /// Expression to evaluate; starts the REPL when omitted
    #[arg(trailing_var_arg = true)]
    expr: Vec<String>,
}

fn main() -> ExitCode {
    env_logger::init();

    // Install miette's fancy error handler for prettier diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))
    .ok();

    let cli = Cli::parse();
    let mut session = Session::new();

    if cli.expr.is_empty() {
        repl::run(&mut session);
        return ExitCode::SUCCESS;
    }

    let source = cli.expr.join(" ");
    let opts = RenderOptions {
        width: paths::terminal_width(),
    };

    if session.eval_and_display(&source, &opts) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
