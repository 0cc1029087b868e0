//! Built-in script units: syntax downlevel and minification.
//!
//! These are reference implementations of the `TransformUnit` contract. A
//! production setup would swap in a real transpiler and minifier through the
//! chain registry; the pipeline only sees the contract either way.

use crate::sourcemap::{count_lines, LineMap};
use crate::transform::unit::{
    input_str, TransformContext, TransformError, TransformOutput, TransformUnit,
};
use regex::Regex;
use std::sync::OnceLock;

fn declaration_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(?:const|let)\b").expect("static pattern compiles"))
}

/// Downlevels modern script syntax to a widely supported subset.
///
/// Rewrites `const`/`let` declarations to `var` and rejects structurally
/// broken input (unbalanced braces). Line structure is preserved, so the
/// emitted map is the identity.
#[derive(Debug, Default)]
pub struct ScriptDownlevel;

impl ScriptDownlevel {
    pub fn new() -> Self {
        Self
    }
}

impl TransformUnit for ScriptDownlevel {
    fn name(&self) -> &'static str {
        "script-downlevel"
    }

    fn transform(
        &self,
        input: &[u8],
        _ctx: &TransformContext,
    ) -> Result<TransformOutput, TransformError> {
        let content = input_str(input)?;
        check_braces(content)?;

        let lowered = declaration_re().replace_all(content, "var").into_owned();
        let map = LineMap::identity(count_lines(lowered.as_bytes()));
        Ok(TransformOutput::mapped(lowered.into_bytes(), map))
    }
}

/// Verify that braces balance outside strings and comments.
fn check_braces(content: &str) -> Result<(), TransformError> {
    let mut depth: i64 = 0;
    let mut state = ScanState::Code;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            ScanState::Code => match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth < 0 {
                        return Err(TransformError::Syntax("unbalanced braces".to_string()));
                    }
                }
                '\'' => state = ScanState::Quote('\''),
                '"' => state = ScanState::Quote('"'),
                '`' => state = ScanState::Quote('`'),
                '/' => match chars.peek() {
                    Some('/') => state = ScanState::LineComment,
                    Some('*') => {
                        chars.next();
                        state = ScanState::BlockComment;
                    }
                    _ => {}
                },
                _ => {}
            },
            ScanState::Quote(q) => {
                if c == '\\' {
                    chars.next();
                } else if c == q {
                    state = ScanState::Code;
                }
            }
            ScanState::LineComment => {
                if c == '\n' {
                    state = ScanState::Code;
                }
            }
            ScanState::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    state = ScanState::Code;
                }
            }
        }
    }

    if depth != 0 {
        return Err(TransformError::Syntax("unbalanced braces".to_string()));
    }
    Ok(())
}

#[derive(Clone, Copy, PartialEq)]
enum ScanState {
    Code,
    Quote(char),
    LineComment,
    BlockComment,
}

/// Minifies script payloads: strips comments, trims indentation, and drops
/// blank lines. Emits a map recording the original line of every kept line.
#[derive(Debug, Default)]
pub struct ScriptMinify;

impl ScriptMinify {
    pub fn new() -> Self {
        Self
    }
}

impl TransformUnit for ScriptMinify {
    fn name(&self) -> &'static str {
        "script-minify"
    }

    fn transform(
        &self,
        input: &[u8],
        _ctx: &TransformContext,
    ) -> Result<TransformOutput, TransformError> {
        let content = input_str(input)?;

        let mut kept = Vec::new();
        let mut mapping = Vec::new();
        let mut in_block = false;

        for (idx, line) in content.lines().enumerate() {
            let stripped = strip_line(line, &mut in_block);
            let trimmed = stripped.trim();
            if !trimmed.is_empty() {
                kept.push(trimmed.to_string());
                mapping.push(idx as u32);
            }
        }

        let bytes = kept.join("\n").into_bytes();
        Ok(TransformOutput::mapped(bytes, LineMap::from_lines(mapping)))
    }
}

/// Remove comments from one line, carrying block-comment state across lines.
/// Quote-aware so `//` inside a string literal survives.
pub(crate) fn strip_line(line: &str, in_block: &mut bool) -> String {
    let mut out = String::with_capacity(line.len());
    let mut state = if *in_block { ScanState::BlockComment } else { ScanState::Code };
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            ScanState::Code => match c {
                '\'' | '"' | '`' => {
                    state = ScanState::Quote(c);
                    out.push(c);
                }
                '/' => match chars.peek() {
                    Some('/') => break,
                    Some('*') => {
                        chars.next();
                        state = ScanState::BlockComment;
                    }
                    _ => out.push(c),
                },
                _ => out.push(c),
            },
            ScanState::Quote(q) => {
                out.push(c);
                if c == '\\' {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                } else if c == q {
                    state = ScanState::Code;
                }
            }
            ScanState::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    state = ScanState::Code;
                }
            }
            ScanState::LineComment => break,
        }
    }

    *in_block = state == ScanState::BlockComment;
    out
}
