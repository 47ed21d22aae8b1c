//! Response-path navigation
//!
//! Provider read responses are JSON-shaped. A mapping locates the attribute
//! inside the response with a dotted/bracket path like
//! `DBInstances[0].Endpoint.Address`; this module parses and walks such paths.

use serde_json::Value;

use crate::error::{Error, Result};

/// A segment in a path expression
#[derive(Debug, Clone, PartialEq)]
enum PathSegment {
    /// A key in an object (e.g., "Endpoint" in "Endpoint.Address")
    Key(String),
    /// An index in an array (e.g., 0 in "DBInstances[0]")
    Index(usize),
}

/// Parse a path string into segments
/// Supports: "key", "key.subkey", "key[0]", "key[0].subkey"
fn parse_path(path: &str) -> Result<Vec<PathSegment>> {
    let mut segments = Vec::new();
    let mut current_key = String::new();
    let mut chars = path.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '.' => {
                if !current_key.is_empty() {
                    segments.push(PathSegment::Key(current_key.clone()));
                    current_key.clear();
                }
            }
            '[' => {
                if !current_key.is_empty() {
                    segments.push(PathSegment::Key(current_key.clone()));
                    current_key.clear();
                }
                // Parse index
                let mut index_str = String::new();
                let mut closed = false;
                while let Some(&c) = chars.peek() {
                    if c == ']' {
                        chars.next();
                        closed = true;
                        break;
                    }
                    index_str.push(chars.next().unwrap());
                }
                if !closed {
                    return Err(Error::InvalidPath(path.to_string()));
                }
                let idx: usize = index_str
                    .parse()
                    .map_err(|_| Error::InvalidPath(path.to_string()))?;
                segments.push(PathSegment::Index(idx));
            }
            ']' => {
                return Err(Error::InvalidPath(path.to_string()));
            }
            _ => {
                current_key.push(c);
            }
        }
    }

    if !current_key.is_empty() {
        segments.push(PathSegment::Key(current_key));
    }

    Ok(segments)
}

/// Look up a value by path.
///
/// Returns `Ok(None)` when the path is well-formed but nothing lives at it;
/// an absent attribute is not an error at this layer.
pub fn lookup<'a>(value: &'a Value, path: &str) -> Result<Option<&'a Value>> {
    if path.is_empty() {
        return Ok(Some(value));
    }

    let segments = parse_path(path)?;
    let mut current = value;

    for segment in &segments {
        let next = match segment {
            PathSegment::Key(key) => current.as_object().and_then(|map| map.get(key.as_str())),
            PathSegment::Index(idx) => current.as_array().and_then(|seq| seq.get(*idx)),
        };
        match next {
            Some(v) => current = v,
            None => return Ok(None),
        }
    }

    Ok(Some(current))
}
