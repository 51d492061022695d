//! The `data.js` document format.
//!
//! A history file is a single JavaScript assignment of the snapshot JSON to a
//! global, indented with two spaces and without a trailing newline, so a
//! browser can load it with a plain `<script>` tag:
//!
//! ```text
//! window.BENCHMARK_DATA = {
//!   "lastUpdate": 1681329644775,
//!   "repoUrl": "https://github.com/...",
//!   "entries": { ... }
//! }
//! ```

use crate::history::check_snapshot;
use crate::types::Snapshot;
use crate::CoreError;

pub const DEFAULT_VARIABLE: &str = "window.BENCHMARK_DATA";

/// Parse a history document.
///
/// Accepts any `<identifier> = <json>` assignment (optionally ending in `;`)
/// as well as a bare JSON object.
pub fn decode(text: &str) -> Result<Snapshot, CoreError> {
    let json = strip_assignment(text)?;
    let snapshot: Snapshot =
        serde_json::from_str(json).map_err(|e| CoreError::corrupt(e.to_string()))?;
    check_snapshot(&snapshot)?;
    Ok(snapshot)
}

/// Like [`decode`], but an absent document yields an empty snapshot for
/// `repo_url`.
pub fn decode_opt(text: Option<&str>, repo_url: &str) -> Result<Snapshot, CoreError> {
    match text {
        Some(text) => decode(text),
        None => Ok(Snapshot::empty(repo_url)),
    }
}

pub fn encode(snapshot: &Snapshot) -> Result<String, CoreError> {
    encode_with_variable(snapshot, DEFAULT_VARIABLE)
}

pub fn encode_with_variable(snapshot: &Snapshot, variable: &str) -> Result<String, CoreError> {
    if !is_identifier_path(variable) {
        return Err(CoreError::Serialization(format!(
            "invalid variable name: {variable:?}"
        )));
    }
    let json = serde_json::to_string_pretty(snapshot)
        .map_err(|e| CoreError::Serialization(e.to_string()))?;
    Ok(format!("{variable} = {json}"))
}

fn strip_assignment(text: &str) -> Result<&str, CoreError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CoreError::corrupt("document is empty"));
    }
    let body = if trimmed.starts_with('{') {
        trimmed
    } else {
        let (lhs, rhs) = trimmed
            .split_once('=')
            .ok_or_else(|| CoreError::corrupt("expected `<name> = {...}` assignment"))?;
        let lhs = lhs.trim();
        let valid = match strip_declaration(lhs) {
            // a declared binding is a single name, not a property path
            Some(name) => is_identifier_path(name) && !name.contains('.'),
            None => is_identifier_path(lhs) && !DECLARATION_KEYWORDS.contains(&lhs),
        };
        if !valid {
            return Err(CoreError::corrupt(format!(
                "invalid assignment target: {lhs:?}"
            )));
        }
        rhs.trim_start()
    };
    Ok(body.strip_suffix(';').unwrap_or(body).trim_end())
}

const DECLARATION_KEYWORDS: [&str; 3] = ["var", "let", "const"];

/// The binding name after a leading `var`, `let` or `const`, if any.
fn strip_declaration(lhs: &str) -> Option<&str> {
    DECLARATION_KEYWORDS.iter().find_map(|kw| {
        lhs.strip_prefix(kw)
            .filter(|rest| rest.starts_with(char::is_whitespace))
            .map(str::trim_start)
    })
}

/// `name` or `a.b.c` where each segment is a JavaScript identifier.
fn is_identifier_path(s: &str) -> bool {
    !s.is_empty()
        && s.split('.').all(|seg| {
            let mut chars = seg.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        })
}
