use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use super::expr::CompareOp;

/// A field value as seen by the matchers.
///
/// Both retrieval strategies produce this type: records hand out fully structured values,
/// while encoded buffers produce scalars plus [`Value::Raw`] for nested documents.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An explicit null.
    Null,
    /// A boolean value.
    Bool(bool),
    /// A 64-bit signed integer.
    Int(i64),
    /// A 64-bit floating-point number.
    Float(f64),
    /// A UTF-8 string.
    String(String),
    /// An ordered sequence of values.
    List(Vec<Value>),
    /// A nested structure keyed by field name.
    Map(BTreeMap<String, Value>),
    /// The compact encoded text of a nested sub-document.
    Raw(String),
}

impl Value {
    /// Compare this value to another using the given operator.
    ///
    /// The comparison never fails: incompatible kinds, and ordering operators on kinds
    /// without an order, simply yield `false`.
    #[must_use]
    pub fn compare(&self, op: CompareOp, other: &Value) -> bool {
        match op {
            CompareOp::Eq => self.loose_eq(other),
            CompareOp::Gt => self.partial_cmp_value(other) == Some(Ordering::Greater),
            CompareOp::Gte => matches!(
                self.partial_cmp_value(other),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            CompareOp::Lt => self.partial_cmp_value(other) == Some(Ordering::Less),
            CompareOp::Lte => matches!(
                self.partial_cmp_value(other),
                Some(Ordering::Less | Ordering::Equal)
            ),
        }
    }

    /// Value equality with numeric widening. Lists and maps are compared element-wise with
    /// the same loose rules, so `[1]` equals `[1.0]` here but not under `PartialEq`.
    fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::List(a), Value::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.loose_eq(y))
            }
            (Value::Map(a), Value::Map(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(k, x)| b.get(k).is_some_and(|y| x.loose_eq(y)))
            }
            _ => self.partial_cmp_value(other) == Some(Ordering::Equal),
        }
    }

    /// Ordering for the kinds that have one: numbers and text.
    #[allow(clippy::cast_precision_loss)]
    fn partial_cmp_value(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::Int(a), Value::Float(b)) => (*a as f64).partial_cmp(b),
            (Value::Float(a), Value::Int(b)) => a.partial_cmp(&(*b as f64)),
            (Value::String(a) | Value::Raw(a), Value::String(b) | Value::Raw(b)) => {
                Some(a.as_str().cmp(b.as_str()))
            }
            _ => None,
        }
    }

    /// Human-readable name of the variant, used in logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Raw(_) => "raw",
        }
    }

    /// Coerce a value located inside an encoded document.
    ///
    /// Numbers always become [`Value::Float`] and nested objects or arrays become
    /// [`Value::Raw`] holding their compact JSON text, keys in buffer order.
    pub(crate) fn from_encoded(json: &serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => n.as_f64().map_or(Value::Null, Value::Float),
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                Value::Raw(json.to_string())
            }
        }
    }
}

/// Compare `a` to `b` with `op`. See [`Value::compare`].
#[must_use]
pub fn compare(a: &Value, b: &Value, op: CompareOp) -> bool {
    a.compare(op, b)
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(v: [T; N]) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Structured conversion, used for records. Integers that fit `i64` stay integers.
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map_or(Value::Null, Value::Float),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

/// Quote `s` using only the escapes the matcher language reads back.
fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for ch in s.chars() {
        match ch {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            // Plain decimal notation; whole numbers keep a `.0` so they stay floats.
            Value::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.1}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(v) => write_quoted(f, v),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Map(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write_quoted(f, k)?;
                    write!(f, ": {v}")?;
                }
                write!(f, "}}")
            }
            Value::Raw(raw) => write!(f, "{raw}"),
        }
    }
}
