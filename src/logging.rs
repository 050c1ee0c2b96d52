//! Pretty-printing diagnostics to the console

use colored::Colorize;

/// Pretty-print an error message to stderr
pub fn error(message: &str) {
    let title = "error:".red().bold();
    eprintln!("{} {}", title, message);
}
