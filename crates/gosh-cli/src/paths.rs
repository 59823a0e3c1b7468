//! Prompt and terminal helpers.

use std::env;

/// Terminal width in columns, from `COLUMNS`, defaulting to 80.
pub fn terminal_width() -> usize {
    env::var("COLUMNS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(80)
}

/// Contract a leading home directory to `~` for prompt display.
pub fn contract_tilde(path: &str, home: &str) -> String {
    if home.is_empty() {
        return path.to_string();
    }

    match path.strip_prefix(home) {
        Some("") => "~".to_string(),
        Some(rest) if rest.starts_with('/') => format!("~{}", rest),
        _ => path.to_string(),
    }
}

/// The REPL prompt for the current working directory.
pub fn prompt() -> String {
    let wd = env::current_dir()
        .map(|d| d.display().to_string())
        .unwrap_or_else(|_| "?".to_string());
    let home = env::var("HOME").unwrap_or_default();

    format!("{} $ ", contract_tilde(&wd, &home))
}
