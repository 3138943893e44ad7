// In-memory tree edits behind the accessor's mutators. These never touch the
// disk; the accessor persists after each successful edit.
use serde_json::{Map, Value};

use crate::address::{self, RootObject};
use crate::error::{AccessError, Result};
use crate::value::kind_of;

/// Creates or overwrites the member at the address.
pub fn set_member(root: &mut Value, key: &str, value: Value, ro: RootObject<'_>) -> Result<()> {
    address::container_mut(root, ro)?.insert(key.to_string(), value);
    Ok(())
}

/// Deletes the keyed member, arrays included, keeping the order of the rest.
pub fn remove_member(root: &mut Value, key: &str, ro: RootObject<'_>) -> Result<Value> {
    address::existing_container_mut(root, ro)
        .and_then(|m| m.shift_remove(key))
        .ok_or_else(|| AccessError::KeyNotFound(key.to_string()))
}

/// Runs `f` on the array at the address. A missing or non-array location is
/// replaced with an empty array first.
pub fn with_array<R>(
    root: &mut Value,
    key: &str,
    ro: RootObject<'_>,
    f: impl FnOnce(&mut Vec<Value>) -> R,
) -> Result<R> {
    let slot = address::container_mut(root, ro)?
        .entry(key)
        .or_insert(Value::Null);
    let mut items = match std::mem::take(slot) {
        Value::Array(items) => items,
        _ => Vec::new(),
    };
    let out = f(&mut items);
    *slot = Value::Array(items);
    Ok(out)
}

/// The array already stored at the address.
pub fn existing_array_mut<'v>(
    root: &'v mut Value,
    key: &str,
    ro: RootObject<'_>,
) -> Result<&'v mut Vec<Value>> {
    let slot = address::existing_container_mut(root, ro)
        .and_then(|m| m.get_mut(key))
        .ok_or_else(|| AccessError::KeyNotFound(key.to_string()))?;
    let found = kind_of(slot);
    slot.as_array_mut().ok_or_else(|| AccessError::NotAnArray {
        key: key.to_string(),
        found,
    })
}

/// Removes every non-object element equal to `value`. Returns how many went.
pub fn remove_scalar_items(items: &mut Vec<Value>, value: &Value) -> usize {
    let before = items.len();
    items.retain(|item| item.is_object() || item != value);
    before - items.len()
}

/// Removes every object element matching `value`. Returns how many went.
pub fn remove_object_items(items: &mut Vec<Value>, value: &Value) -> usize {
    let before = items.len();
    items.retain(|item| !item.as_object().is_some_and(|obj| object_matches(obj, value)));
    before - items.len()
}

/// A string matches an object that has a member of that name; any value
/// matches an object holding it as a member value.
pub fn object_matches(obj: &Map<String, Value>, value: &Value) -> bool {
    value.as_str().is_some_and(|name| obj.contains_key(name)) || obj.values().any(|v| v == value)
}

/// Pairs keys with values into one object. Lengths must agree.
pub fn build_object<K: AsRef<str>>(keys: &[K], values: Vec<Value>) -> Result<Value> {
    if keys.len() != values.len() {
        return Err(AccessError::LengthMismatch {
            keys: keys.len(),
            values: values.len(),
        });
    }
    let obj: Map<String, Value> = keys
        .iter()
        .map(|k| k.as_ref().to_string())
        .zip(values)
        .collect();
    Ok(Value::Object(obj))
}
