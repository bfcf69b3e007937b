//! Flattening of decoded JSON into a path -> integer mapping.

use std::collections::BTreeMap;

use serde_json::Value;

/// Flattened response: dotted/indexed path to integer leaf.
pub type FlatResult = BTreeMap<String, i64>;

/// Walk `node` and collect every integer leaf under its path.
///
/// Object members extend the path with `.key` (bare `key` at the root),
/// array elements with `[index]`. Strings, floats, booleans and nulls are
/// dropped: only integer price components are of interest.
pub fn flatten(node: &Value, prefix: &str) -> FlatResult {
    let mut out = FlatResult::new();
    collect(node, prefix, &mut out);
    out
}

fn collect(node: &Value, prefix: &str, out: &mut FlatResult) {
    match node {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                collect(child, &path, out);
            }
        }
        Value::Array(items) => {
            for (i, child) in items.iter().enumerate() {
                collect(child, &format!("{prefix}[{i}]"), out);
            }
        }
        Value::Number(n) => {
            if let Some(v) = n.as_i64() {
                out.insert(prefix.to_string(), v);
            }
        }
        _ => {}
    }
}
