use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, error, warn};

use crate::address::{self, RootObject};
use crate::edit;
use crate::error::{AccessError, Result};
use crate::persist::{self, PersistOptions};
use crate::query;
use crate::value::NULL;

/// One JSON document loaded from a file.
///
/// Every operation addresses the tree with a `key` and a `root_object` name.
/// A root object name of zero or one character means the document root;
/// anything longer selects the nested object `root[root_object]`.
///
/// Each successful mutation rewrites the whole file before returning, so the
/// file on disk always matches the tree afterwards. Nothing here is
/// synchronized; share an accessor across threads only behind a lock.
#[derive(Debug, Default)]
pub struct DocumentAccessor {
    root: Value,
    loaded_path: Option<PathBuf>,
    options: PersistOptions,
}

impl DocumentAccessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: PersistOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Creates an accessor and loads `path` into it.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut acc = Self::new();
        acc.load(path)?;
        Ok(acc)
    }

    /// Loads a file, replacing the current document. The loaded path is
    /// cleared first, so after a failure the accessor holds no document and
    /// every mutator reports [`AccessError::NoDocumentLoaded`].
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.loaded_path = None;
        match persist::read_document(path) {
            Ok(root) => {
                self.root = root;
                self.loaded_path = Some(path.to_path_buf());
                debug!("Loaded document {}", path.display());
                Ok(())
            }
            Err(e) => {
                self.root = Value::Null;
                error!("{}", e);
                Err(e)
            }
        }
    }

    pub fn loaded_path(&self) -> Option<&Path> {
        self.loaded_path.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded_path.is_some()
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn options(&self) -> &PersistOptions {
        &self.options
    }

    // ---- queries ----

    /// Whether the addressed value is present. With a root object this looks
    /// for an object in the array `root[root_object][key]` whose first member
    /// is named `key`.
    pub fn exists(&self, key: &str, root_object: &str) -> bool {
        self.is_loaded() && address::exists(&self.root, key, RootObject::from_name(root_object))
    }

    /// The addressed value, or null when it is missing or is an array.
    pub fn get(&self, key: &str, root_object: &str) -> &Value {
        query::get(&self.root, key, RootObject::from_name(root_object))
    }

    /// Same as [`get`](Self::get) over a value returned by an earlier query.
    pub fn get_in<'v>(&self, key: &str, container: &'v Value, root_object: &str) -> &'v Value {
        query::get_in(key, container, RootObject::from_name(root_object))
    }

    /// First non-null `object_key` member among the objects of the array at
    /// `array_key`.
    pub fn get_from_array(&self, array_key: &str, object_key: &str, root_object: &str) -> &Value {
        match address::resolve(&self.root, array_key, RootObject::from_name(root_object)) {
            Some(v) => query::get_from_array_value(v, object_key),
            None => &NULL,
        }
    }

    pub fn get_from_array_value<'v>(&self, container: &'v Value, object_key: &str) -> &'v Value {
        query::get_from_array_value(container, object_key)
    }

    /// Elements of the addressed array; empty if it is not an array.
    pub fn get_array(&self, key: &str, root_object: &str) -> &[Value] {
        address::resolve(&self.root, key, RootObject::from_name(root_object))
            .map(query::array_elements)
            .unwrap_or(&[])
    }

    pub fn get_array_from_value<'v>(&self, container: &'v Value) -> &'v [Value] {
        query::array_elements(container)
    }

    /// Member names of `root[key]`.
    pub fn member_names_in(&self, key: &str) -> Vec<&str> {
        self.root.get(key).map(query::member_names).unwrap_or_default()
    }

    /// Member names of the document root.
    pub fn member_names(&self) -> Vec<&str> {
        query::member_names(&self.root)
    }

    // ---- mutations ----

    /// Creates or overwrites the addressed value.
    pub fn set(&mut self, key: &str, value: impl Into<Value>, root_object: &str) -> Result<()> {
        let value = value.into();
        self.mutate(|root| edit::set_member(root, key, value, RootObject::from_name(root_object)))
    }

    /// Deletes the addressed member (a whole array, if it holds one) and
    /// returns it. A missing member is [`AccessError::KeyNotFound`] and
    /// leaves the file untouched.
    pub fn remove(&mut self, key: &str, root_object: &str) -> Result<Value> {
        self.mutate(|root| edit::remove_member(root, key, RootObject::from_name(root_object)))
    }

    /// Appends to the addressed array, creating it if needed. Duplicates are
    /// kept.
    pub fn append_array_item(
        &mut self,
        key: &str,
        value: impl Into<Value>,
        root_object: &str,
    ) -> Result<()> {
        let value = value.into();
        self.mutate(|root| {
            edit::with_array(root, key, RootObject::from_name(root_object), |items| {
                items.push(value)
            })
        })
    }

    pub fn append_array_items<I>(&mut self, key: &str, items: I, root_object: &str) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let new_items: Vec<Value> = items.into_iter().map(Into::into).collect();
        self.mutate(|root| {
            edit::with_array(root, key, RootObject::from_name(root_object), |items| {
                items.extend(new_items)
            })
        })
    }

    /// Builds one object from paired keys and values and appends it to the
    /// addressed array.
    pub fn append_array_object<K, V>(
        &mut self,
        key: &str,
        object_keys: &[K],
        values: Vec<V>,
        root_object: &str,
    ) -> Result<()>
    where
        K: AsRef<str>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        self.mutate(|root| {
            let obj = edit::build_object(object_keys, values)?;
            edit::with_array(root, key, RootObject::from_name(root_object), |items| {
                items.push(obj)
            })
        })
    }

    /// Single-field form of [`append_array_object`](Self::append_array_object).
    pub fn append_array_object_field(
        &mut self,
        key: &str,
        object_key: &str,
        value: impl Into<Value>,
        root_object: &str,
    ) -> Result<()> {
        let value: Value = value.into();
        self.append_array_object(key, &[object_key], vec![value], root_object)
    }

    /// Removes every scalar element equal to `value` from the addressed array
    /// and returns how many were removed.
    pub fn remove_array_item(
        &mut self,
        key: &str,
        value: impl Into<Value>,
        root_object: &str,
    ) -> Result<usize> {
        let value = value.into();
        self.mutate(|root| {
            let items = edit::existing_array_mut(root, key, RootObject::from_name(root_object))?;
            Ok(edit::remove_scalar_items(items, &value))
        })
    }

    /// Removes every object element matching `value`: a string matches objects
    /// with a member of that name, and any value matches objects holding it as
    /// a member value.
    pub fn remove_array_object(
        &mut self,
        key: &str,
        value: impl Into<Value>,
        root_object: &str,
    ) -> Result<usize> {
        let value = value.into();
        self.mutate(|root| {
            let items = edit::existing_array_mut(root, key, RootObject::from_name(root_object))?;
            Ok(edit::remove_object_items(items, &value))
        })
    }

    /// Writes the current tree to the loaded path.
    pub fn persist(&self) -> Result<()> {
        let path = self.loaded_path.as_deref().ok_or(AccessError::NoDocumentLoaded)?;
        write_back(path, &self.root, &self.options)
    }

    fn mutate<R>(&mut self, f: impl FnOnce(&mut Value) -> Result<R>) -> Result<R> {
        let path = self.loaded_path.as_deref().ok_or(AccessError::NoDocumentLoaded)?;
        let out = f(&mut self.root)?;
        write_back(path, &self.root, &self.options)?;
        Ok(out)
    }
}

fn write_back(path: &Path, root: &Value, options: &PersistOptions) -> Result<()> {
    match persist::write_document(path, root, options) {
        Ok(()) => {
            debug!("Saved document {}", path.display());
            Ok(())
        }
        Err(e) if !options.report_write_failures => {
            warn!("{}; keeping in-memory changes", e);
            Ok(())
        }
        Err(e) => {
            error!("{}", e);
            Err(e)
        }
    }
}
