//! Patch documents - partial updates in JSON Patch form.
//!
//! A document is a JSON array of operations (`add`, `remove`, `replace`,
//! `move`, `copy`, `test`) addressed by JSON Pointer paths. Operations are
//! applied in order to the JSON form of a value; the first failure aborts
//! the whole document.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single patch operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOperation {
    Add { path: String, value: Value },
    Remove { path: String },
    Replace { path: String, value: Value },
    Move { from: String, path: String },
    Copy { from: String, path: String },
    Test { path: String, value: Value },
}

/// An ordered list of patch operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatchDocument(pub Vec<PatchOperation>);

/// Error type for patch application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchError {
    /// Path is not a valid JSON Pointer for this operation.
    InvalidPath(String),
    /// Path does not address an existing location.
    PathNotFound(String),
    /// A `test` operation did not match.
    TestFailed(String),
    /// The patched JSON no longer fits the target type.
    Decode(String),
}

impl fmt::Display for PatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchError::InvalidPath(path) => write!(f, "invalid patch path: {:?}", path),
            PatchError::PathNotFound(path) => write!(f, "patch path not found: {:?}", path),
            PatchError::TestFailed(path) => write!(f, "patch test failed at {:?}", path),
            PatchError::Decode(msg) => write!(f, "patched document is invalid: {}", msg),
        }
    }
}

impl std::error::Error for PatchError {}

impl PatchDocument {
    pub fn new(operations: Vec<PatchOperation>) -> Self {
        Self(operations)
    }

    pub fn operations(&self) -> &[PatchOperation] {
        &self.0
    }

    /// Apply every operation to `doc`, in order.
    ///
    /// `doc` may be partially modified when an error is returned; use
    /// [`PatchDocument::apply_to`] to patch a typed value without that risk.
    pub fn apply(&self, doc: &mut Value) -> Result<(), PatchError> {
        for operation in &self.0 {
            apply_operation(doc, operation)?;
        }
        Ok(())
    }

    /// Patch a copy of `target` through its JSON form.
    pub fn apply_to<T>(&self, target: &T) -> Result<T, PatchError>
    where
        T: Serialize + DeserializeOwned,
    {
        let mut doc = serde_json::to_value(target).map_err(|e| PatchError::Decode(e.to_string()))?;
        self.apply(&mut doc)?;
        serde_json::from_value(doc).map_err(|e| PatchError::Decode(e.to_string()))
    }
}

fn apply_operation(doc: &mut Value, operation: &PatchOperation) -> Result<(), PatchError> {
    match operation {
        PatchOperation::Add { path, value } => add(doc, path, value.clone()),
        PatchOperation::Remove { path } => remove(doc, path).map(|_| ()),
        PatchOperation::Replace { path, value } => {
            let target = doc
                .pointer_mut(path)
                .ok_or_else(|| PatchError::PathNotFound(path.clone()))?;
            *target = value.clone();
            Ok(())
        }
        PatchOperation::Move { from, path } => {
            if from == path {
                return Ok(());
            }
            if path.starts_with(&format!("{}/", from)) {
                return Err(PatchError::InvalidPath(path.clone()));
            }
            let value = remove(doc, from)?;
            add(doc, path, value)
        }
        PatchOperation::Copy { from, path } => {
            let value = doc
                .pointer(from)
                .cloned()
                .ok_or_else(|| PatchError::PathNotFound(from.clone()))?;
            add(doc, path, value)
        }
        PatchOperation::Test { path, value } => match doc.pointer(path) {
            Some(actual) if equivalent(actual, value) => Ok(()),
            _ => Err(PatchError::TestFailed(path.clone())),
        },
    }
}

/// JSON equality with numbers compared by value, so `1` matches `1.0`.
fn equivalent(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
                return x == y;
            }
            if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
                return x == y;
            }
            x.as_f64() == y.as_f64()
        }
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| equivalent(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).is_some_and(|y| equivalent(x, y)))
        }
        _ => a == b,
    }
}

/// Split `/a/b/c` into the parent pointer `/a/b` and the unescaped token `c`.
fn split_parent(path: &str) -> Result<(&str, String), PatchError> {
    if !path.starts_with('/') {
        return Err(PatchError::InvalidPath(path.to_string()));
    }
    let (parent, token) = path
        .rsplit_once('/')
        .ok_or_else(|| PatchError::InvalidPath(path.to_string()))?;
    Ok((parent, token.replace("~1", "/").replace("~0", "~")))
}

fn parent_mut<'a>(doc: &'a mut Value, parent: &str, path: &str) -> Result<&'a mut Value, PatchError> {
    doc.pointer_mut(parent)
        .ok_or_else(|| PatchError::PathNotFound(path.to_string()))
}

fn array_index(token: &str, path: &str) -> Result<usize, PatchError> {
    if token.len() > 1 && token.starts_with('0') {
        return Err(PatchError::InvalidPath(path.to_string()));
    }
    token
        .parse()
        .map_err(|_| PatchError::InvalidPath(path.to_string()))
}

fn add(doc: &mut Value, path: &str, value: Value) -> Result<(), PatchError> {
    if path.is_empty() {
        *doc = value;
        return Ok(());
    }
    let (parent, token) = split_parent(path)?;
    match parent_mut(doc, parent, path)? {
        Value::Object(map) => {
            map.insert(token, value);
            Ok(())
        }
        Value::Array(items) => {
            if token == "-" {
                items.push(value);
                return Ok(());
            }
            let index = array_index(&token, path)?;
            if index > items.len() {
                return Err(PatchError::PathNotFound(path.to_string()));
            }
            items.insert(index, value);
            Ok(())
        }
        _ => Err(PatchError::PathNotFound(path.to_string())),
    }
}

fn remove(doc: &mut Value, path: &str) -> Result<Value, PatchError> {
    let (parent, token) = split_parent(path)?;
    match parent_mut(doc, parent, path)? {
        Value::Object(map) => map
            .remove(&token)
            .ok_or_else(|| PatchError::PathNotFound(path.to_string())),
        Value::Array(items) => {
            let index = array_index(&token, path)?;
            if index >= items.len() {
                return Err(PatchError::PathNotFound(path.to_string()));
            }
            Ok(items.remove(index))
        }
        _ => Err(PatchError::PathNotFound(path.to_string())),
    }
}
