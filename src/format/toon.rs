//! TOON encoder.
//!
//! Objects become `key: value` lines with two-space indentation for nesting.
//! Arrays carry their length in the header (`key[3]: a,b,c`). Arrays whose
//! elements are objects sharing one set of primitive-valued keys collapse into
//! a table: a `key[2]{id,name}:` header followed by one comma-separated row
//! per element. Anything else falls back to `- item` list entries.

use serde_json::{Map, Value};

const INDENT: &str = "  ";

/// Encode a JSON value as TOON text.
pub fn to_toon(value: &Value) -> String {
    let mut lines = Vec::new();
    match value {
        Value::Object(map) => write_object(&mut lines, map, 0),
        Value::Array(items) => write_array(&mut lines, None, items, 0),
        other => lines.push(encode_primitive(other)),
    }
    lines.join("\n")
}

fn write_object(lines: &mut Vec<String>, map: &Map<String, Value>, depth: usize) {
    for (key, value) in map {
        write_field(lines, key, value, depth);
    }
}

fn write_field(lines: &mut Vec<String>, key: &str, value: &Value, depth: usize) {
    let pad = INDENT.repeat(depth);
    let key = encode_key(key);
    match value {
        Value::Object(map) if map.is_empty() => lines.push(format!("{pad}{key}:")),
        Value::Object(map) => {
            lines.push(format!("{pad}{key}:"));
            write_object(lines, map, depth + 1);
        }
        Value::Array(items) => write_array(lines, Some(&key), items, depth),
        other => lines.push(format!("{pad}{key}: {}", encode_primitive(other))),
    }
}

fn write_array(lines: &mut Vec<String>, key: Option<&str>, items: &[Value], depth: usize) {
    let pad = INDENT.repeat(depth);
    let name = key.unwrap_or("");
    let len = items.len();

    if items.is_empty() {
        lines.push(format!("{pad}{name}[0]:"));
        return;
    }

    if items.iter().all(is_primitive) {
        let row = items
            .iter()
            .map(encode_primitive)
            .collect::<Vec<_>>()
            .join(",");
        lines.push(format!("{pad}{name}[{len}]: {row}"));
        return;
    }

    if let Some(fields) = tabular_fields(items) {
        let header = fields
            .iter()
            .map(|f| encode_key(f))
            .collect::<Vec<_>>()
            .join(",");
        lines.push(format!("{pad}{name}[{len}]{{{header}}}:"));
        let row_pad = INDENT.repeat(depth + 1);
        for item in items {
            if let Value::Object(map) = item {
                let row = fields
                    .iter()
                    .map(|f| map.get(*f).map(encode_primitive).unwrap_or_default())
                    .collect::<Vec<_>>()
                    .join(",");
                lines.push(format!("{row_pad}{row}"));
            }
        }
        return;
    }

    lines.push(format!("{pad}{name}[{len}]:"));
    for item in items {
        write_list_item(lines, item, depth + 1);
    }
}

fn write_list_item(lines: &mut Vec<String>, item: &Value, depth: usize) {
    let pad = INDENT.repeat(depth);
    match item {
        Value::Object(map) if !map.is_empty() => {
            // First field shares the hyphen line; the rest align under it.
            let mut nested = Vec::new();
            write_object(&mut nested, map, depth + 1);
            let mut iter = nested.into_iter();
            if let Some(first) = iter.next() {
                lines.push(format!("{pad}- {}", first.trim_start()));
            }
            lines.extend(iter);
        }
        Value::Object(_) => lines.push(format!("{pad}-")),
        Value::Array(inner) => {
            let mut nested = Vec::new();
            write_array(&mut nested, None, inner, depth + 1);
            let mut iter = nested.into_iter();
            if let Some(first) = iter.next() {
                lines.push(format!("{pad}- {}", first.trim_start()));
            }
            lines.extend(iter);
        }
        other => lines.push(format!("{pad}- {}", encode_primitive(other))),
    }
}

/// Keys shared by every element when all elements are flat objects with the
/// same key set.
fn tabular_fields(items: &[Value]) -> Option<Vec<&str>> {
    let first = items.first()?.as_object()?;
    if first.is_empty() {
        return None;
    }
    let fields: Vec<&str> = first.keys().map(String::as_str).collect();

    for item in items {
        let map = item.as_object()?;
        if map.len() != fields.len() {
            return None;
        }
        for field in &fields {
            if !map.get(*field).is_some_and(is_primitive) {
                return None;
            }
        }
    }
    Some(fields)
}

fn is_primitive(value: &Value) -> bool {
    !matches!(value, Value::Object(_) | Value::Array(_))
}

fn encode_primitive(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => encode_string(s),
        // Containers never reach here; render them inline as JSON.
        other => other.to_string(),
    }
}

fn encode_key(key: &str) -> String {
    let mut chars = key.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
    if valid {
        key.to_string()
    } else {
        quote(key)
    }
}

fn encode_string(s: &str) -> String {
    if needs_quotes(s) { quote(s) } else { s.to_string() }
}

fn needs_quotes(s: &str) -> bool {
    if s.is_empty() || s.trim() != s {
        return true;
    }
    if matches!(s, "true" | "false" | "null") || s.parse::<f64>().is_ok() {
        return true;
    }
    if s.starts_with('-') {
        return true;
    }
    s.chars().any(|c| {
        matches!(c, ',' | ':' | '"' | '\\' | '[' | ']' | '{' | '}' | '\n' | '\r' | '\t')
    })
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
