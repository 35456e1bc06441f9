//! Canonical yarn.lock serialization
//!
//! Output matches what Yarn v1 writes itself: a fixed header, one blank line
//! between entries, keys sorted with the well-known fields first, and strings
//! quoted only when a bare token would be ambiguous.

use super::{LockNode, LockValue, Lockfile};
use regex::Regex;
use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

const HEADER: &str =
    "# THIS IS AN AUTOGENERATED FILE. DO NOT EDIT THIS FILE DIRECTLY.\n# yarn lockfile v1\n\n\n";

static NEEDS_QUOTES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[:\s\\",\[\]]"#).unwrap());

impl fmt::Display for Lockfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(HEADER)?;
        for (i, (keys, node)) in sorted(&self.nodes).into_iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write_node(f, &keys, &node.value, 0)?;
        }
        Ok(())
    }
}

fn write_node(
    f: &mut fmt::Formatter<'_>,
    keys: &[&str],
    value: &LockValue,
    depth: usize,
) -> fmt::Result {
    let indent = "  ".repeat(depth);
    let key_line = keys
        .iter()
        .map(|key| quote_if_needed(key))
        .collect::<Vec<_>>()
        .join(", ");

    match value {
        LockValue::Table(children) => {
            writeln!(f, "{}{}:", indent, key_line)?;
            for (child_keys, child) in sorted(children) {
                write_node(f, &child_keys, &child.value, depth + 1)?;
            }
            Ok(())
        }
        LockValue::String(s) => writeln!(f, "{}{} {}", indent, key_line, quote_if_needed(s)),
        LockValue::Bool(b) => writeln!(f, "{}{} {}", indent, key_line, b),
        LockValue::Number(n) => writeln!(f, "{}{} {}", indent, key_line, n),
    }
}

/// Nodes with their keys sorted, in output order
fn sorted(nodes: &[LockNode]) -> Vec<(Vec<&str>, &LockNode)> {
    let mut out: Vec<(Vec<&str>, &LockNode)> = nodes
        .iter()
        .map(|node| {
            let mut keys: Vec<&str> = node.keys.iter().map(String::as_str).collect();
            keys.sort_unstable();
            (keys, node)
        })
        .collect();

    out.sort_by(|(a, _), (b, _)| position(a).cmp(&position(b)));
    out
}

fn position<'a>(keys: &[&'a str]) -> (u8, &'a str) {
    keys.iter()
        .map(|key| (priority(key), *key))
        .min()
        .unwrap_or((u8::MAX, ""))
}

fn priority(key: &str) -> u8 {
    match key {
        "name" => 1,
        "version" => 2,
        "uid" => 3,
        "resolved" => 4,
        "integrity" => 5,
        "registry" => 6,
        "dependencies" => 7,
        _ => 100,
    }
}

fn needs_quotes(s: &str) -> bool {
    s.starts_with("true")
        || s.starts_with("false")
        || !s.starts_with(|c: char| c.is_ascii_alphabetic())
        || NEEDS_QUOTES_RE.is_match(s)
}

fn quote_if_needed(s: &str) -> Cow<'_, str> {
    if needs_quotes(s) {
        Cow::Owned(serde_json::Value::String(s.to_string()).to_string())
    } else {
        Cow::Borrowed(s)
    }
}
