// Two-level addressing: an optional root object name selects a nested object
// of the document, the key selects a member inside it (or inside the document
// root when no root object is given).
//
// Read paths never create structure. Write paths build missing/null containers
// as empty objects, the same way a tree builder would on first assignment.
use serde_json::{Map, Value};

use crate::error::{AccessError, Result};
use crate::value::kind_of;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootObject<'a> {
    Document,
    Named(&'a str),
}

impl<'a> RootObject<'a> {
    /// Names of zero or one character mean "no root object". A single
    /// character never selects a nested object, even if one exists under it.
    pub fn from_name(name: &'a str) -> Self {
        if name.chars().count() <= 1 {
            RootObject::Document
        } else {
            RootObject::Named(name)
        }
    }
}

impl<'a> From<&'a str> for RootObject<'a> {
    fn from(name: &'a str) -> Self {
        RootObject::from_name(name)
    }
}

/// The value at `root[key]` or `root[name][key]`, if present.
pub fn resolve<'v>(root: &'v Value, key: &str, ro: RootObject<'_>) -> Option<&'v Value> {
    match ro {
        RootObject::Document => root.get(key),
        RootObject::Named(name) => root.get(name)?.get(key),
    }
}

/// The object that holds `key` for this address, if it already exists.
pub fn existing_container_mut<'v>(
    root: &'v mut Value,
    ro: RootObject<'_>,
) -> Option<&'v mut Map<String, Value>> {
    match ro {
        RootObject::Document => root.as_object_mut(),
        RootObject::Named(name) => root.get_mut(name)?.as_object_mut(),
    }
}

/// The object that holds `key` for this address, creating it (and a null
/// document root) as an empty object when missing.
pub fn container_mut<'v>(
    root: &'v mut Value,
    ro: RootObject<'_>,
) -> Result<&'v mut Map<String, Value>> {
    if root.is_null() {
        *root = Value::Object(Map::new());
    }
    let doc = match root {
        Value::Object(m) => m,
        other => {
            return Err(AccessError::NotAnObject {
                name: "document root".to_string(),
                found: kind_of(other),
            });
        }
    };
    let RootObject::Named(name) = ro else {
        return Ok(doc);
    };
    let slot = doc.entry(name).or_insert(Value::Null);
    if slot.is_null() {
        *slot = Value::Object(Map::new());
    }
    match slot {
        Value::Object(m) => Ok(m),
        other => Err(AccessError::NotAnObject {
            name: name.to_string(),
            found: kind_of(other),
        }),
    }
}

/// Existence test. Without a root object this is a plain present-and-non-null
/// check. With one, `root[name][key]` must be an array holding an object whose
/// first member is named `key`.
pub fn exists(root: &Value, key: &str, ro: RootObject<'_>) -> bool {
    match ro {
        RootObject::Document => resolve(root, key, ro).is_some_and(|v| !v.is_null()),
        RootObject::Named(_) => match resolve(root, key, ro) {
            Some(Value::Array(items)) => items.iter().any(|item| {
                item.as_object()
                    .and_then(|m| m.keys().next())
                    .is_some_and(|first| first == key)
            }),
            _ => false,
        },
    }
}
