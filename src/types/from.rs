use serde_yaml::Number;

use super::{Record, Value};

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

macro_rules! from_number {
    ($($ty:ty)*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Self::Number(Number::from(n))
                }
            }
        )*
    };
}
from_number! { i32 i64 u32 u64 usize f64 }

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        Self::Mapping(r)
    }
}

impl From<Vec<Value>> for Value {
    fn from(s: Vec<Value>) -> Self {
        Self::Sequence(s)
    }
}

/// Renders a YAML mapping key as a record field name.
fn yaml_key(k: serde_yaml::Value) -> String {
    match k {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        // keep compatibility with YAML's `~` null key
        serde_yaml::Value::Null => "~".to_string(),
        other => Value::from(other).to_string(),
    }
}

impl From<serde_yaml::Value> for Value {
    fn from(v: serde_yaml::Value) -> Self {
        match v {
            serde_yaml::Value::Null => Self::Null,
            serde_yaml::Value::Bool(b) => Self::Bool(b),
            serde_yaml::Value::Number(n) => Self::Number(n),
            serde_yaml::Value::String(s) => Self::String(s),
            serde_yaml::Value::Sequence(s) => {
                let mut seq: Vec<Value> = Vec::with_capacity(s.len());
                for v in s {
                    seq.push(Value::from(v));
                }
                Self::Sequence(seq)
            }
            serde_yaml::Value::Mapping(m) => Self::Mapping(Record::from(m)),
            // Tags carry no meaning for list models, use the tagged value as is.
            serde_yaml::Value::Tagged(t) => Self::from(t.value),
        }
    }
}

impl From<serde_yaml::Mapping> for Record {
    fn from(m: serde_yaml::Mapping) -> Self {
        let mut r = Record::with_capacity(m.len());
        for (k, v) in m {
            r.insert(&yaml_key(k), Value::from(v));
        }
        r
    }
}

impl From<Value> for serde_yaml::Value {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Sequence(s) => Self::Sequence(s.into_iter().map(Self::from).collect()),
            Value::Mapping(r) => {
                let mut m = serde_yaml::Mapping::with_capacity(r.len());
                for (k, v) in r {
                    m.insert(Self::String(k), Self::from(v));
                }
                Self::Mapping(m)
            }
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::from(i)
                } else if let Some(u) = n.as_u64() {
                    Self::from(u)
                } else {
                    // serde_json numbers are always representable as one of i64, u64 or f64
                    Self::from(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(a) => Self::Sequence(a.into_iter().map(Self::from).collect()),
            serde_json::Value::Object(o) => {
                let mut r = Record::with_capacity(o.len());
                for (k, v) in o {
                    r.insert(&k, Value::from(v));
                }
                Self::Mapping(r)
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::from(i)
                } else if let Some(u) = n.as_u64() {
                    Self::from(u)
                } else {
                    // Render NaN and -+inf as strings, since JSON's number type doesn't support
                    // those values.
                    n.as_f64()
                        .and_then(serde_json::Number::from_f64)
                        .map_or_else(|| Self::String(n.to_string()), Self::Number)
                }
            }
            Value::String(s) => Self::String(s),
            Value::Sequence(s) => Self::Array(s.into_iter().map(Self::from).collect()),
            Value::Mapping(r) => Self::Object(serde_json::Map::from(r)),
        }
    }
}

impl From<Record> for serde_json::Map<String, serde_json::Value> {
    fn from(r: Record) -> Self {
        let mut m = Self::with_capacity(r.len());
        for (k, v) in r {
            m.insert(k, serde_json::Value::from(v));
        }
        m
    }
}

impl From<Record> for serde_json::Value {
    fn from(r: Record) -> Self {
        Self::Object(serde_json::Map::from(r))
    }
}
