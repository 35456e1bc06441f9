//! Yarn v1 lockfile parser
//!
//! The syntax is indentation based, two spaces per level:
//!
//! ```text
//! # comment
//! "@scope/pkg@^1.0.0", "@scope/pkg@^1.1.0":
//!   version "1.2.0"
//!   integrity sha512-...
//!   dependencies:
//!     left-pad "^1.0.0"
//! ```
//!
//! Keys and values are JSON-quoted strings or bare tokens. A line ending in
//! `:` opens a nested block.

use super::{LockNode, LockValue, Lockfile};
use std::collections::HashSet;
use std::iter::Peekable;
use std::vec::IntoIter;
use thiserror::Error;

/// A lockfile syntax error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct SyntaxError {
    /// 1-based line number
    pub line: usize,
    pub message: String,
}

impl SyntaxError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// One significant line; `value` is `None` when the line opens a block
#[derive(Debug)]
struct Line {
    number: usize,
    depth: usize,
    keys: Vec<String>,
    value: Option<LockValue>,
}

impl Lockfile {
    /// Parse yarn.lock content
    pub fn parse(content: &str) -> Result<Self, SyntaxError> {
        let mut lines = Vec::new();
        for (index, raw) in content.lines().enumerate() {
            if let Some(line) = parse_line(index + 1, raw)? {
                lines.push(line);
            }
        }

        let mut lines = lines.into_iter().peekable();
        let nodes = parse_block(&mut lines, 0)?;
        Ok(Lockfile { nodes })
    }
}

fn parse_block(
    lines: &mut Peekable<IntoIter<Line>>,
    depth: usize,
) -> Result<Vec<LockNode>, SyntaxError> {
    let mut nodes = Vec::new();
    let mut seen = HashSet::new();

    while let Some(line) = lines.next_if(|line| line.depth >= depth) {
        if line.depth > depth {
            return Err(SyntaxError::new(line.number, "unexpected indentation"));
        }
        for key in &line.keys {
            if !seen.insert(key.clone()) {
                return Err(SyntaxError::new(
                    line.number,
                    format!("duplicate key '{}'", key),
                ));
            }
        }

        let value = match line.value {
            Some(value) => value,
            None => LockValue::Table(parse_block(lines, depth + 1)?),
        };
        nodes.push(LockNode {
            keys: line.keys,
            value,
        });
    }

    Ok(nodes)
}

fn parse_line(number: usize, raw: &str) -> Result<Option<Line>, SyntaxError> {
    let raw = raw.trim_end();
    let content = raw.trim_start_matches(' ');
    if content.is_empty() || content.starts_with('#') {
        return Ok(None);
    }
    if content.starts_with('\t') {
        return Err(SyntaxError::new(number, "tabs are not allowed for indentation"));
    }

    let indent = raw.len() - content.len();
    if indent % 2 != 0 {
        return Err(SyntaxError::new(number, "indentation must be a multiple of two spaces"));
    }

    let mut cursor = Cursor::new(number, content);
    let mut keys = vec![cursor.string()?];
    loop {
        cursor.skip_spaces();
        if !cursor.eat(',') {
            break;
        }
        cursor.skip_spaces();
        keys.push(cursor.string()?);
    }

    let opens_block = cursor.eat(':');
    cursor.skip_spaces();

    let value = if cursor.is_empty() {
        if !opens_block {
            return Err(cursor.error("expected a value or ':' after key"));
        }
        None
    } else {
        let value = cursor.value()?;
        cursor.skip_spaces();
        if !cursor.is_empty() {
            return Err(cursor.error(format!("unexpected trailing content '{}'", cursor.rest)));
        }
        Some(value)
    };

    Ok(Some(Line {
        number,
        depth: indent / 2,
        keys,
        value,
    }))
}

/// Token reader over the remainder of one line
struct Cursor<'a> {
    line: usize,
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(line: usize, rest: &'a str) -> Self {
        Self { line, rest }
    }

    fn error(&self, message: impl Into<String>) -> SyntaxError {
        SyntaxError::new(self.line, message)
    }

    fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }

    fn skip_spaces(&mut self) {
        self.rest = self.rest.trim_start_matches(' ');
    }

    fn eat(&mut self, c: char) -> bool {
        match self.rest.strip_prefix(c) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    fn take(&mut self, len: usize) -> &'a str {
        let (token, rest) = self.rest.split_at(len);
        self.rest = rest;
        token
    }

    /// A quoted or bare string
    fn string(&mut self) -> Result<String, SyntaxError> {
        if self.rest.starts_with('"') {
            self.quoted()
        } else {
            self.bare().map(str::to_string)
        }
    }

    fn value(&mut self) -> Result<LockValue, SyntaxError> {
        if self.rest.starts_with('"') {
            return self.quoted().map(LockValue::String);
        }
        if self.rest.starts_with(|c: char| c.is_ascii_digit()) {
            let len = self
                .rest
                .find(|c: char| !(c.is_ascii_digit() || c == '.'))
                .unwrap_or(self.rest.len());
            return Ok(LockValue::Number(self.take(len).to_string()));
        }

        Ok(match self.bare()? {
            "true" => LockValue::Bool(true),
            "false" => LockValue::Bool(false),
            token => LockValue::String(token.to_string()),
        })
    }

    fn quoted(&mut self) -> Result<String, SyntaxError> {
        let mut escaped = false;
        let mut end = None;
        for (i, c) in self.rest.char_indices().skip(1) {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => {
                    end = Some(i);
                    break;
                }
                _ => {}
            }
        }

        let end = end.ok_or_else(|| self.error("unterminated string"))?;
        let literal = self.take(end + 1);
        serde_json::from_str(literal)
            .map_err(|e| self.error(format!("invalid string literal {}: {}", literal, e)))
    }

    fn bare(&mut self) -> Result<&'a str, SyntaxError> {
        match self.rest.chars().next() {
            Some(c) if c.is_ascii_alphabetic() || matches!(c, '/' | '.' | '-') => {}
            Some(c) => return Err(self.error(format!("unexpected character '{}'", c))),
            None => return Err(self.error("unexpected end of line")),
        }

        let len = self
            .rest
            .find(|c: char| c == ':' || c == ',' || c.is_whitespace())
            .unwrap_or(self.rest.len());
        Ok(self.take(len))
    }
}
