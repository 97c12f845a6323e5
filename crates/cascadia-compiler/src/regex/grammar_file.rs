//! JSGF-style grammar files: `$ID ::= expr` definitions expanded into one
//! expression rooted at `$GRAMMAR`.

use indexmap::IndexMap;

use crate::{Error, Result};

const TOP_LEVEL: &str = "$GRAMMAR";

/// Expand a grammar file into a single regular expression. Each reference
/// is replaced by its definition wrapped in parentheses. Text without any
/// definition is returned unchanged.
pub fn expand_grammar(text: &str) -> Result<String> {
    let mut definitions: IndexMap<String, String> = IndexMap::new();

    for line in text.lines() {
        let line = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if line.matches("::=").count() != 1 {
            continue;
        }
        let Some((id, expr)) = line.split_once("::=") else {
            continue;
        };
        let id = id.trim();
        if !is_id(id) {
            return Err(malformed(format!("`{id}` is not a valid identifier, expected `$name`")));
        }
        definitions.insert(id.to_string(), expr.trim().to_string());
    }

    if definitions.is_empty() {
        return Ok(text.to_string());
    }
    let Some(top) = definitions.get(TOP_LEVEL) else {
        return Err(malformed(format!("top-level `{TOP_LEVEL}` is not defined")));
    };

    let mut active = vec![TOP_LEVEL.to_string()];
    expand(top, &definitions, &mut active)
}

fn expand(expr: &str, definitions: &IndexMap<String, String>, active: &mut Vec<String>) -> Result<String> {
    let mut out = String::with_capacity(expr.len());
    let mut rest = expr;

    while let Some(at) = rest.find('$') {
        out.push_str(&rest[..at]);
        let tail = &rest[at + 1..];
        let len = tail.find(|c: char| !is_id_char(c)).unwrap_or(tail.len());
        if len == 0 {
            out.push('$');
            rest = tail;
            continue;
        }

        let id = &rest[at..at + 1 + len];
        if active.iter().any(|a| a == id) {
            return Err(malformed(format!("`{id}` refers to itself")));
        }
        let Some(body) = definitions.get(id) else {
            return Err(malformed(format!("`{id}` is not defined")));
        };

        active.push(id.to_string());
        let expanded = expand(body, definitions, active)?;
        active.pop();

        out.push('(');
        out.push_str(&expanded);
        out.push(')');
        rest = &tail[len..];
    }

    out.push_str(rest);
    Ok(out)
}

fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')
}

fn is_id(id: &str) -> bool {
    id.strip_prefix('$')
        .is_some_and(|name| !name.is_empty() && name.chars().all(is_id_char))
}

fn malformed(message: String) -> Error {
    Error::MalformedGrammar { message }
}
