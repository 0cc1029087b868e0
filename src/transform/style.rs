//! Built-in stylesheet units: preprocessing and minification.
//!
//! The preprocessor supports a small less-style dialect: `//` line comments
//! and `@name: value;` variable declarations with `@name` substitution. The
//! minifier strips comments and collapses whitespace. Both emit line maps.

use crate::sourcemap::LineMap;
use crate::transform::unit::{
    input_str, TransformContext, TransformError, TransformOutput, TransformUnit,
};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// At-rule names that look like variables but are CSS syntax.
const RESERVED_AT_RULES: &[&str] =
    &["media", "import", "charset", "supports", "keyframes", "font-face", "page", "namespace"];

fn variable_decl_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*@([A-Za-z][\w-]*)\s*:\s*(.+?)\s*;\s*$").expect("static pattern compiles")
    })
}

fn variable_use_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"@([A-Za-z][\w-]*)").expect("static pattern compiles"))
}

/// Preprocesses a less-style stylesheet into plain CSS.
///
/// Variable declarations are consumed; every later `@name` reference is
/// replaced by the declared value. Referencing an undeclared variable is a
/// syntax error, matching what a real preprocessor would report.
#[derive(Debug, Default)]
pub struct StylePreprocess;

impl StylePreprocess {
    pub fn new() -> Self {
        Self
    }
}

impl TransformUnit for StylePreprocess {
    fn name(&self) -> &'static str {
        "style-preprocess"
    }

    fn transform(
        &self,
        input: &[u8],
        _ctx: &TransformContext,
    ) -> Result<TransformOutput, TransformError> {
        let content = input_str(input)?;

        let mut variables: HashMap<String, String> = HashMap::new();
        let mut kept = Vec::new();
        let mut mapping = Vec::new();

        for (idx, raw) in content.lines().enumerate() {
            // Line comments are a preprocessor extension; strip them first.
            let line = match raw.find("//") {
                Some(pos) if !raw[..pos].contains("url(") => &raw[..pos],
                _ => raw,
            };

            if let Some(caps) = variable_decl_re().captures(line) {
                let name = caps[1].to_string();
                if !RESERVED_AT_RULES.contains(&name.as_str()) {
                    let value = substitute(&caps[2], &variables)?;
                    variables.insert(name, value);
                    continue;
                }
            }

            if line.trim().is_empty() && raw.trim().starts_with("//") {
                continue;
            }

            kept.push(substitute(line, &variables)?);
            mapping.push(idx as u32);
        }

        let bytes = kept.join("\n").into_bytes();
        Ok(TransformOutput::mapped(bytes, LineMap::from_lines(mapping)))
    }
}

/// Replace `@name` references with declared values.
fn substitute(
    line: &str,
    variables: &HashMap<String, String>,
) -> Result<String, TransformError> {
    let mut result = String::with_capacity(line.len());
    let mut last = 0;

    for caps in variable_use_re().captures_iter(line) {
        let whole = caps.get(0).expect("capture 0 always present");
        let name = &caps[1];

        if RESERVED_AT_RULES.contains(&name) {
            continue;
        }

        let value = variables
            .get(name)
            .ok_or_else(|| TransformError::Syntax(format!("undefined variable @{name}")))?;

        result.push_str(&line[last..whole.start()]);
        result.push_str(value);
        last = whole.end();
    }

    result.push_str(&line[last..]);
    Ok(result)
}

/// Minifies stylesheet payloads: strips `/* */` comments, trims indentation,
/// and drops blank lines, recording the original line of each kept line.
#[derive(Debug, Default)]
pub struct StyleMinify;

impl StyleMinify {
    pub fn new() -> Self {
        Self
    }
}

impl TransformUnit for StyleMinify {
    fn name(&self) -> &'static str {
        "style-minify"
    }

    fn transform(
        &self,
        input: &[u8],
        _ctx: &TransformContext,
    ) -> Result<TransformOutput, TransformError> {
        let content = input_str(input)?;

        let mut kept = Vec::new();
        let mut mapping = Vec::new();
        let mut in_comment = false;

        for (idx, line) in content.lines().enumerate() {
            let stripped = strip_block_comments(line, &mut in_comment);
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

/// Remove `/* */` comment spans from one line, carrying state across lines.
fn strip_block_comments(line: &str, in_comment: &mut bool) -> String {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if *in_comment {
            if c == '*' && chars.peek() == Some(&'/') {
                chars.next();
                *in_comment = false;
            }
        } else if c == '/' && chars.peek() == Some(&'*') {
            chars.next();
            *in_comment = true;
        } else {
            out.push(c);
        }
    }

    out
}
