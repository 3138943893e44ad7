// Read-only lookups. Nothing here fails: a missing or mistyped location yields
// the shared null value or an empty sequence.
use serde_json::Value;

use crate::address::{self, RootObject};
use crate::value::NULL;

/// Value at `key` (optionally under a root object) of any document or subtree.
/// Arrays are never returned here; use [`array_elements`] for those.
pub fn get<'v>(root: &'v Value, key: &str, ro: RootObject<'_>) -> &'v Value {
    match address::resolve(root, key, ro) {
        Some(v) if !v.is_array() => v,
        _ => &NULL,
    }
}

/// Like [`get`], over a subtree obtained from an earlier query. An array
/// container yields null.
pub fn get_in<'v>(key: &str, container: &'v Value, ro: RootObject<'_>) -> &'v Value {
    if container.is_array() {
        return &NULL;
    }
    get(container, key, ro)
}

/// First non-null `object_key` member among the object elements of `items`.
/// Scalar elements are skipped.
pub fn find_in_array<'v>(items: &'v [Value], object_key: &str) -> &'v Value {
    items
        .iter()
        .filter_map(|item| item.as_object()?.get(object_key))
        .find(|v| !v.is_null())
        .unwrap_or(&NULL)
}

pub fn get_from_array_value<'v>(container: &'v Value, object_key: &str) -> &'v Value {
    match container.as_array() {
        Some(items) => find_in_array(items, object_key),
        None => &NULL,
    }
}

pub fn array_elements(container: &Value) -> &[Value] {
    container.as_array().map(Vec::as_slice).unwrap_or(&[])
}

/// Member names in insertion order; empty for anything but an object.
pub fn member_names(v: &Value) -> Vec<&str> {
    v.as_object()
        .map(|m| m.keys().map(String::as_str).collect())
        .unwrap_or_default()
}
