//! Depth-first key search over arbitrary JSON documents.

use serde_json::Value;

/// Find the first non-null value stored under `key` anywhere inside `value`.
///
/// Traversal is depth-first. An object holding `key` ends the search of that
/// subtree: its value is the answer, and a null there yields nothing from this
/// object, so its children are not visited. Otherwise each value is visited in
/// document order, descending into nested objects and into objects held directly
/// in arrays. Scalars inside arrays are never matched.
pub fn find_key<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    let map = value.as_object()?;

    if let Some(found) = map.get(key) {
        return (!found.is_null()).then_some(found);
    }

    map.values().find_map(|child| match child {
        Value::Object(_) => find_key(child, key),
        Value::Array(items) => items
            .iter()
            .filter(|item| item.is_object())
            .find_map(|item| find_key(item, key)),
        _ => None,
    })
}
