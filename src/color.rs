//! Terminal color utilities using ANSI escape codes.
//!
//! Provides colored progress output for parent issues, categories and
//! create results.

/// ANSI color codes
pub mod codes {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const BRIGHT_CYAN: &str = "\x1b[96m";
}

use codes::*;

/// Color success messages (green).
pub fn success(text: &str) -> String {
    format!("{}{}{}", GREEN, text, RESET)
}

/// Color error messages (red).
pub fn error(text: &str) -> String {
    format!("{}{}{}", RED, text, RESET)
}

/// Color warning messages (yellow).
pub fn warning(text: &str) -> String {
    format!("{}{}{}", YELLOW, text, RESET)
}

/// Color info messages (cyan).
pub fn info(text: &str) -> String {
    format!("{}{}{}", CYAN, text, RESET)
}

/// Color a label (bold).
pub fn label(text: &str) -> String {
    format!("{}{}{}", BOLD, text, RESET)
}

/// Color a number/count (bright cyan).
pub fn number(n: impl std::fmt::Display) -> String {
    format!("{}{}{}", BRIGHT_CYAN, n, RESET)
}

/// Dim secondary text such as body previews.
pub fn dim(text: &str) -> String {
    format!("{}{}{}", DIM, text, RESET)
}

/// Remove ANSI escape sequences.
pub fn strip(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // Skip until the letter that ends the escape sequence.
            while let Some(&next) = chars.peek() {
                chars.next();
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            result.push(c);
        }
    }
    result
}

/// Status symbols for create results.
pub mod symbols {
    pub const CHECK: &str = "✓";
    pub const CROSS: &str = "✗";
}
