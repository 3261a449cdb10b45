//! Tagged values returned by providers and tools
//!
//! Provider payloads are arbitrary nested scalars. Instead of passing
//! `serde_json::Value` around untyped, everything is funnelled through
//! [`DataValue`] so serialization is total and checked.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A JSON-representable value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DataValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Map(Record),
    List(Vec<DataValue>),
}

impl DataValue {
    /// Returns `true` if the value is `Null`
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Record> {
        match self {
            Self::Map(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[DataValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// String form used when the value becomes a mapping key
    ///
    /// Strings are used verbatim, everything else uses its JSON text.
    pub fn to_key(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            Self::Null => "null".to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            other => serde_json::to_string(other).unwrap_or_default(),
        }
    }

    /// Convert into a `serde_json::Value`
    pub fn into_json(self) -> serde_json::Value {
        match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(b) => serde_json::Value::Bool(b),
            Self::Int(i) => serde_json::Value::from(i),
            Self::Float(f) => serde_json::Number::from_f64(f)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Self::String(s) => serde_json::Value::String(s),
            Self::Map(record) => serde_json::Value::Object(
                record
                    .into_iter()
                    .map(|(key, value)| (key, value.into_json()))
                    .collect(),
            ),
            Self::List(items) => {
                serde_json::Value::Array(items.into_iter().map(Self::into_json).collect())
            }
        }
    }
}

impl From<bool> for DataValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for DataValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u64> for DataValue {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or(Self::Float(value as f64), Self::Int)
    }
}

impl From<f64> for DataValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for DataValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for DataValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Record> for DataValue {
    fn from(value: Record) -> Self {
        Self::Map(value)
    }
}

impl<T: Into<DataValue>> From<Vec<T>> for DataValue {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<DataValue>> From<Option<T>> for DataValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl Serialize for DataValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            // NaN and infinities have no JSON form
            Self::Float(f) if !f.is_finite() => serializer.serialize_unit(),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::String(s) => serializer.serialize_str(s),
            Self::Map(record) => record.serialize(serializer),
            Self::List(items) => items.serialize(serializer),
        }
    }
}

/// Insertion-ordered mapping from field name to value
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<(String, DataValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Insert a field, replacing the value in place if the key already exists
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<DataValue>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Builder-style [`Record::insert`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<DataValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&DataValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DataValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, DataValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, DataValue)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

impl IntoIterator for Record {
    type Item = (String, DataValue);
    type IntoIter = std::vec::IntoIter<(String, DataValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
