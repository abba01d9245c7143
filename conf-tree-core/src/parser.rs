use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::tree::{ConfigLine, ConfigTree, LineId};

/// Configuration dialect accepted by [`parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    /// Flat, indentation-nested syntax (Cisco IOS and lookalikes).
    Ios,
    /// Brace-nested block syntax (Junos and lookalikes).
    Junos,
}

/// Errors that can occur while parsing config text into a [`ConfigTree`].
#[derive(Debug, Error)]
pub enum ParseError {
    /// Failed to read the input file.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// Structural issue in the input text.
    #[error("malformed configuration: {0}")]
    Malformed(String),
}

/// Parse raw configuration text into a [`ConfigTree`].
pub fn parse(text: &str, syntax: Syntax) -> Result<ConfigTree, ParseError> {
    match syntax {
        Syntax::Ios => Ok(parse_ios(text)),
        Syntax::Junos => parse_junos(text),
    }
}

/// Parse a configuration file into a [`ConfigTree`].
pub fn parse_file(path: &Path, syntax: Syntax) -> Result<ConfigTree, ParseError> {
    let text = fs::read_to_string(path)?;
    parse(&text, syntax)
}

/// A line's parent is the nearest preceding line with strictly lower
/// indentation. Blank lines and `!` comment lines are skipped.
fn parse_ios(text: &str) -> ConfigTree {
    let mut lines: Vec<ConfigLine> = Vec::new();
    // (indent, id) path from a root down to the previous line
    let mut stack: Vec<(usize, LineId)> = Vec::new();

    for (number, raw) in text.lines().enumerate() {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('!') {
            continue;
        }
        let indent = raw.len() - raw.trim_start().len();
        while stack.last().is_some_and(|&(prev, _)| prev >= indent) {
            stack.pop();
        }
        let parent = stack.last().map(|&(_, id)| id);
        let id = push_line(&mut lines, trimmed, stack.len(), number + 1, parent);
        stack.push((indent, id));
    }

    ConfigTree::from_lines(lines)
}

/// A trailing `{` opens a block, `}` closes the innermost one, and any other
/// line is a statement (trailing `;` stripped). Blank lines and `#` comment
/// lines are skipped. Unbalanced braces abort the parse.
fn parse_junos(text: &str) -> Result<ConfigTree, ParseError> {
    let mut lines: Vec<ConfigLine> = Vec::new();
    let mut stack: Vec<LineId> = Vec::new();

    for (number, raw) in text.lines().enumerate() {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("/*") {
            continue;
        }
        let number = number + 1;

        if trimmed == "}" || trimmed == "};" {
            if stack.pop().is_none() {
                return Err(ParseError::Malformed(format!(
                    "closing brace without an open block at line {number}"
                )));
            }
            continue;
        }

        let parent = stack.last().copied();
        if let Some(header) = trimmed.strip_suffix('{') {
            let id = push_line(&mut lines, header.trim_end(), stack.len(), number, parent);
            stack.push(id);
        } else {
            let statement = trimmed.strip_suffix(';').unwrap_or(trimmed).trim_end();
            push_line(&mut lines, statement, stack.len(), number, parent);
        }
    }

    if let Some(&open) = stack.last() {
        return Err(ParseError::Malformed(format!(
            "unclosed block `{}` at end of input",
            lines[open].text
        )));
    }

    Ok(ConfigTree::from_lines(lines))
}

fn push_line(
    lines: &mut Vec<ConfigLine>,
    text: &str,
    depth: usize,
    number: usize,
    parent: Option<LineId>,
) -> LineId {
    let id = lines.len();
    lines.push(ConfigLine {
        text: text.to_string(),
        depth,
        number,
        parent,
        children: Vec::new(),
    });
    if let Some(parent) = parent {
        lines[parent].children.push(id);
    }
    id
}
