//! Dotted-path addressing into a JSON state tree.

use serde_json::{Map, Value};

/// Split a dotted path into its segments.
///
/// Returns `None` for an empty path or a path with an empty segment
/// (`"a..b"`, `".a"`), which callers treat as a no-op.
fn segments(path: &str) -> Option<Vec<&str>> {
    if path.is_empty() {
        return None;
    }
    let parts: Vec<&str> = path.split('.').collect();
    if parts.iter().any(|p| p.is_empty()) {
        return None;
    }
    Some(parts)
}

/// Return a copy of `state` with `value` placed at `path`.
///
/// Each touched level is copied; `state` itself is never mutated.
/// Missing or scalar intermediate levels are replaced by objects,
/// so `set_path(&json!({}), "a.b", 1)` yields `{"a": {"b": 1}}`. Numeric
/// segments index into existing arrays, padding with `null` past the end.
/// A malformed path returns an unchanged copy.
pub fn set_path(state: &Value, path: &str, value: Value) -> Value {
    let Some(parts) = segments(path) else {
        return state.clone();
    };
    set_segments(state, &parts, value)
}

fn set_segments(node: &Value, parts: &[&str], value: Value) -> Value {
    if let (Value::Array(items), [head, rest @ ..]) = (node, parts) {
        if let Ok(index) = head.parse::<usize>() {
            let mut items = items.clone();
            if index >= items.len() {
                items.resize(index + 1, Value::Null);
            }
            let next = if rest.is_empty() {
                value
            } else {
                set_segments(&items[index], rest, value)
            };
            items[index] = next;
            return Value::Array(items);
        }
    }

    let mut map = match node {
        Value::Object(map) => map.clone(),
        _ => Map::new(),
    };

    match parts {
        [] => return value,
        [last] => {
            map.insert((*last).to_string(), value);
        }
        [head, rest @ ..] => {
            let child = map.get(*head).cloned().unwrap_or(Value::Null);
            map.insert((*head).to_string(), set_segments(&child, rest, value));
        }
    }

    Value::Object(map)
}

/// Read the value at `path`, if every segment resolves to an object member
/// or array element.
pub fn get_path<'a>(state: &'a Value, path: &str) -> Option<&'a Value> {
    let parts = segments(path)?;
    parts.iter().try_fold(state, |node, part| match node {
        Value::Array(items) => part.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => node.get(*part),
    })
}

/// Shallow-merge the members of `patch` over a copy of `state`.
///
/// A non-object `state` is treated as an empty object. Returns `None`
/// if `patch` is neither an object nor `null`.
pub fn shallow_merge(state: &Value, patch: Value) -> Option<Value> {
    let mut map = match state {
        Value::Object(map) => map.clone(),
        _ => Map::new(),
    };
    match patch {
        Value::Object(patch) => {
            map.extend(patch);
            Some(Value::Object(map))
        }
        Value::Null => Some(Value::Object(map)),
        _ => None,
    }
}
