//! # Table module
//!
//! A schema-less key/value store shared between the robot and the operator console. Entries are
//! addressed by `/` separated paths, for example `/SmartDashboard/warnings/collision`, and each
//! entry holds the last value written to it. There is no change notification, readers poll.
//!
//! The store itself does not know about any transport. A transport adapter can move entries
//! to and from the console using [`TableStore::snapshot`] and [`TableStore::apply_json`].

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use log::warn;
use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Separator between the segments of an entry path.
pub const PATH_SEPARATOR: char = '/';

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The shared key/value backend.
///
/// Cloning a `TableStore` produces another handle onto the same entries.
#[derive(Debug, Clone, Default)]
pub struct TableStore {
    entries: Arc<RwLock<BTreeMap<String, Value>>>,
}

/// A namespace within a [`TableStore`].
///
/// Keys given to a table are relative to its path.
#[derive(Debug, Clone)]
pub struct Table {
    store: TableStore,
    path: String,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// A value held by a table entry.
///
/// Numbers which are not finite are written to JSON as the strings `"NaN"`, `"inf"` and
/// `"-inf"`, as JSON has no representation for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Number(#[serde(with = "json_number")] f64),
    Boolean(bool),
    String(String),
    NumberArray(#[serde(with = "json_number::array")] Vec<f64>),
    BooleanArray(Vec<bool>),
    StringArray(Vec<String>),
}

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("Could not serialize the table entries: {0}")]
    SerializationError(serde_json::Error),

    #[error("Could not deserialize the table entries: {0}")]
    DeserializeError(serde_json::Error),

    #[error("Entry path {0:?} is not absolute")]
    RelativePath(String),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl TableStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the top level table with the given name.
    ///
    /// Tables are not objects in their own right, so getting the same name more than once returns
    /// handles over the same entries.
    pub fn table(&self, name: &str) -> Table {
        Table {
            store: self.clone(),
            path: join_path("", name),
        }
    }

    /// Number of entries in the whole store.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Serialize every entry in the store into a JSON object keyed by absolute path.
    pub fn snapshot(&self) -> Result<String, TableError> {
        serde_json::to_string(&*self.read()).map_err(TableError::SerializationError)
    }

    /// Merge a JSON object of entries, as produced by [`TableStore::snapshot`], into the store.
    ///
    /// Each entry overwrites any existing value at the same path. An entry whose value cannot be
    /// read is skipped with a warning and the others are still written. Returns the number of
    /// entries written.
    pub fn apply_json(&self, json_str: &str) -> Result<usize, TableError> {
        let incoming: BTreeMap<String, serde_json::Value> =
            serde_json::from_str(json_str).map_err(TableError::DeserializeError)?;

        if let Some(bad) = incoming.keys().find(|k| !k.starts_with(PATH_SEPARATOR)) {
            return Err(TableError::RelativePath(bad.clone()));
        }

        let mut entries = self.write();
        let mut num_written = 0;

        for (path, raw) in incoming {
            match serde_json::from_value::<Value>(raw) {
                Ok(v) => {
                    entries.insert(path, v);
                    num_written += 1;
                }
                Err(e) => warn!("Skipping table entry {:?}: {}", path, e),
            }
        }

        Ok(num_written)
    }

    fn get(&self, path: &str) -> Option<Value> {
        self.read().get(path).cloned()
    }

    fn put(&self, path: String, value: Value) {
        self.write().insert(path, value);
    }

    // A panic while holding the lock cannot leave a half written entry, so poisoning is ignored.
    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, Value>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, Value>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Table {
    /// Absolute path of this table within the store.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Get a table nested inside this one.
    pub fn sub_table(&self, name: &str) -> Table {
        Table {
            store: self.store.clone(),
            path: join_path(&self.path, name),
        }
    }

    /// Write a value, overwriting whatever was there before.
    pub fn put_value(&self, key: &str, value: Value) {
        self.store.put(join_path(&self.path, key), value);
    }

    pub fn put_number(&self, key: &str, value: f64) {
        self.put_value(key, Value::Number(value));
    }

    pub fn put_boolean(&self, key: &str, value: bool) {
        self.put_value(key, Value::Boolean(value));
    }

    pub fn put_string(&self, key: &str, value: &str) {
        self.put_value(key, Value::String(value.to_string()));
    }

    pub fn put_string_array<S: AsRef<str>>(&self, key: &str, values: &[S]) {
        self.put_value(
            key,
            Value::StringArray(values.iter().map(|s| s.as_ref().to_string()).collect()),
        );
    }

    /// Get the last value written to the key, or `None` if it was never written.
    pub fn get_value(&self, key: &str) -> Option<Value> {
        self.store.get(&join_path(&self.path, key))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get_value(key).is_some()
    }

    /// Get a number, or `default` if the key is unset or holds another type.
    pub fn get_number(&self, key: &str, default: f64) -> f64 {
        match self.get_value(key) {
            Some(Value::Number(n)) => n,
            _ => default,
        }
    }

    /// Get a number truncated towards zero, or `default` if the key is unset or not a number.
    ///
    /// Out of range values saturate and NaN becomes zero.
    pub fn get_integer(&self, key: &str, default: i32) -> i32 {
        match self.get_value(key) {
            Some(Value::Number(n)) => n as i32,
            _ => default,
        }
    }

    pub fn get_boolean(&self, key: &str, default: bool) -> bool {
        match self.get_value(key) {
            Some(Value::Boolean(b)) => b,
            _ => default,
        }
    }

    pub fn get_string(&self, key: &str, default: &str) -> String {
        match self.get_value(key) {
            Some(Value::String(s)) => s,
            _ => default.to_string(),
        }
    }

    /// Keys directly or indirectly under this table, relative to it.
    pub fn keys(&self) -> Vec<String> {
        let prefix = format!("{}{}", self.path, PATH_SEPARATOR);
        self.store
            .read()
            .keys()
            .filter_map(|k| k.strip_prefix(&prefix).map(String::from))
            .collect()
    }
}

impl Value {
    /// The number held by this value, if it is one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// JSON form of numbers, keeping NaN and the infinities.
mod json_number {
    use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Finite(f64),
        Named(String),
    }

    fn to_repr(n: f64) -> Repr {
        if n.is_finite() {
            Repr::Finite(n)
        } else if n.is_nan() {
            Repr::Named(String::from("NaN"))
        } else if n > 0.0 {
            Repr::Named(String::from("inf"))
        } else {
            Repr::Named(String::from("-inf"))
        }
    }

    // `null` is what serde_json writes for a bare non-finite f64, so it is read as NaN
    fn from_repr(repr: Option<Repr>) -> Result<f64, String> {
        match repr {
            Some(Repr::Finite(n)) => Ok(n),
            Some(Repr::Named(s)) => match s.as_str() {
                "NaN" => Ok(f64::NAN),
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                _ => Err(format!("{:?} is not a number", s)),
            },
            None => Ok(f64::NAN),
        }
    }

    pub fn serialize<S: Serializer>(n: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        to_repr(*n).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        from_repr(Option::<Repr>::deserialize(deserializer)?).map_err(D::Error::custom)
    }

    pub mod array {
        use super::*;

        pub fn serialize<S: Serializer>(v: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
            v.iter()
                .map(|n| to_repr(*n))
                .collect::<Vec<_>>()
                .serialize(serializer)
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Vec<f64>, D::Error> {
            Vec::<Option<Repr>>::deserialize(deserializer)?
                .into_iter()
                .map(|r| from_repr(r).map_err(D::Error::custom))
                .collect()
        }
    }
}

fn join_path(base: &str, name: &str) -> String {
    format!(
        "{}{}{}",
        base,
        PATH_SEPARATOR,
        name.trim_matches(PATH_SEPARATOR)
    )
}
