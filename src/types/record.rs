use std::collections::HashMap;

use serde::Serialize;

use super::Value;

/// A structured record whose fields can be read by name.
///
/// Names are matched exactly as given: no case folding and no path traversal.
pub trait Record {
    /// The value of the named field, or `None` if the record has no such field.
    fn field(&self, name: &str) -> Option<Value>;
}

/// An owned record mapping field names to [`Value`]s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields {
    data: HashMap<String, Value>,
}

impl Fields {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any previous value.
    #[must_use]
    pub fn set(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.insert(name, value.into());
        self
    }

    /// Set a field (mutable reference version).
    pub fn insert(&mut self, name: &str, value: Value) {
        self.data.insert(name.to_owned(), value);
    }

    /// Look up a field by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }

    /// Build a record from any serializable struct, keyed by its serialized field names.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if `value` cannot be serialized, or
    /// [`serde::ser::Error::custom`] if it does not serialize to a map or struct.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        match serde_json::to_value(value)? {
            serde_json::Value::Object(map) => Ok(Self {
                data: map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            }),
            other => Err(<serde_json::Error as serde::ser::Error>::custom(format!(
                "expected a struct or map, got {other}"
            ))),
        }
    }
}

impl Record for Fields {
    fn field(&self, name: &str) -> Option<Value> {
        self.data.get(name).cloned()
    }
}

impl Record for HashMap<String, Value> {
    fn field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl Record for serde_json::Map<String, serde_json::Value> {
    fn field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned().map(Value::from)
    }
}

/// Only JSON objects have fields; every other JSON value resolves nothing.
impl Record for serde_json::Value {
    fn field(&self, name: &str) -> Option<Value> {
        self.as_object().and_then(|map| map.field(name))
    }
}

/// Walk a dotted path through a decoded document. Object segments are keys; a segment
/// addressing an array must be an index.
pub(crate) fn lookup_path<'a>(
    doc: &'a serde_json::Value,
    path: &str,
) -> Option<&'a serde_json::Value> {
    if path.is_empty() {
        return None;
    }
    path.split('.').try_fold(doc, |node, segment| match node {
        serde_json::Value::Object(map) => map.get(segment),
        serde_json::Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}
