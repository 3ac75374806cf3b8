//! Dotted-path lookup over JSON trees
//!
//! Segments address object members by key and array elements by index, so
//! `"items.0.owner.name"` walks into the first element of `items`.

use serde_json::Value;

/// Resolve a dotted path against a JSON value.
///
/// Returns `None` as soon as a segment is missing, an index is out of range,
/// or a scalar is reached before the path ends. An empty path returns the
/// value itself.
#[must_use]
pub fn get_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(value);
    }

    path.split('.').try_fold(value, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}
