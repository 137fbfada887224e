//! Shared helpers for the interactive commands

use inquire::InquireError;

use moodjot::error::{MoodjotError, Result};

/// How the user left a prompt without answering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leave {
    /// Esc
    Back,
    /// Ctrl-C
    Quit,
}

/// Interactive commands need a terminal on stdin
pub fn require_tty(command: &str) -> Result<()> {
    if atty::is(atty::Stream::Stdin) {
        Ok(())
    } else {
        Err(MoodjotError::NotInteractive(format!("`moodjot {}` needs to read from a terminal", command)))
    }
}

/// Split a prompt result into an answer or the way the user backed out
pub fn answered<T>(result: std::result::Result<T, InquireError>) -> Result<std::result::Result<T, Leave>> {
    match result {
        Ok(value) => Ok(Ok(value)),
        Err(InquireError::OperationCanceled) => Ok(Err(Leave::Back)),
        Err(InquireError::OperationInterrupted) => Ok(Err(Leave::Quit)),
        Err(e) => Err(e.into()),
    }
}

/// Word-wrap for terminal output, on whitespace only
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
