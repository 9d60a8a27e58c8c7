//! The wire-neutral data tree exchanged between visitors and handlers.
//!
//! Serialization turns objects into [`Data`], which a format writer then
//! encodes. Deserialization decodes input into [`Data`] first, then the
//! navigator turns it into objects.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Formatter};

use serde_core::de::{Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_core::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

// -----------------------------------------------------------------------------
// Data

/// A decoded or to-be-encoded value.
///
/// [`Data::Text`] is a text node, produced for DOM formats where a scalar
/// must be attached as node content. Other formats never produce it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Data {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Text(String),
    Seq(Vec<Data>),
    Map(Vec<Entry>),
}

impl Data {
    /// Builds a map from key/value pairs, keeping their order.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_serial::Data;
    ///
    /// let data = Data::map([("name", Data::from("John Doe")), ("age", Data::from(25))]);
    ///
    /// assert_eq!(data.get("age"), Some(&Data::Integer(25)));
    /// assert_eq!(data.get("missing"), None);
    /// ```
    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, Data)>) -> Self {
        Data::Map(
            entries
                .into_iter()
                .map(|(key, value)| Entry::new(key, value))
                .collect(),
        )
    }

    /// A short name of the data kind, used in error messages.
    pub const fn kind(&self) -> &'static str {
        match self {
            Data::Null => "null",
            Data::Bool(_) => "boolean",
            Data::Integer(_) => "integer",
            Data::Float(_) => "float",
            Data::String(_) => "string",
            Data::Text(_) => "text",
            Data::Seq(_) => "sequence",
            Data::Map(_) => "map",
        }
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Data::Null)
    }

    /// Returns `true` for everything except sequences and maps.
    #[inline]
    pub const fn is_scalar(&self) -> bool {
        !matches!(self, Data::Seq(_) | Data::Map(_))
    }

    /// Returns the string content of a string or text node.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Data::String(s) | Data::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the first entry value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Data> {
        match self {
            Data::Map(entries) => entries.iter().find(|e| e.key == key).map(|e| &e.value),
            _ => None,
        }
    }

    /// Removes and returns the first entry value stored under `key`.
    pub fn take(&mut self, key: &str) -> Option<Data> {
        match self {
            Data::Map(entries) => {
                let index = entries.iter().position(|e| e.key == key)?;
                Some(entries.remove(index).value)
            }
            _ => None,
        }
    }

    /// Renders a scalar as text, `None` for null, sequences and maps.
    pub fn to_text(&self) -> Option<String> {
        use alloc::string::ToString;

        match self {
            Data::Bool(v) => Some(String::from(if *v { "true" } else { "false" })),
            Data::Integer(v) => Some(v.to_string()),
            Data::Float(v) => Some(v.to_string()),
            Data::String(s) | Data::Text(s) => Some(s.clone()),
            Data::Null | Data::Seq(_) | Data::Map(_) => None,
        }
    }
}

impl From<bool> for Data {
    #[inline]
    fn from(value: bool) -> Self {
        Data::Bool(value)
    }
}

impl From<i64> for Data {
    #[inline]
    fn from(value: i64) -> Self {
        Data::Integer(value)
    }
}

impl From<i32> for Data {
    #[inline]
    fn from(value: i32) -> Self {
        Data::Integer(value as i64)
    }
}

impl From<f64> for Data {
    #[inline]
    fn from(value: f64) -> Self {
        Data::Float(value)
    }
}

impl From<&str> for Data {
    #[inline]
    fn from(value: &str) -> Self {
        Data::String(String::from(value))
    }
}

impl From<String> for Data {
    #[inline]
    fn from(value: String) -> Self {
        Data::String(value)
    }
}

impl From<Vec<Data>> for Data {
    #[inline]
    fn from(value: Vec<Data>) -> Self {
        Data::Seq(value)
    }
}

// -----------------------------------------------------------------------------
// Entry

/// Rendering hints for DOM formats, ignored by the others.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct XmlHint {
    /// Render a scalar value as an attribute of the parent element.
    pub attribute: bool,
    /// Element name of each item when the value is a sequence.
    pub entry_name: Option<&'static str>,
}

/// A keyed value inside [`Data::Map`].
///
/// Equality only compares key and value.
#[derive(Debug, Clone)]
pub struct Entry {
    pub key: String,
    pub value: Data,
    pub hint: XmlHint,
}

impl Entry {
    #[inline]
    pub fn new(key: impl Into<String>, value: Data) -> Self {
        Self {
            key: key.into(),
            value,
            hint: XmlHint::default(),
        }
    }

    #[inline]
    pub fn with_hint(key: impl Into<String>, value: Data, hint: XmlHint) -> Self {
        Self {
            key: key.into(),
            value,
            hint,
        }
    }
}

impl PartialEq for Entry {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.value == other.value
    }
}

// -----------------------------------------------------------------------------
// serde

impl Serialize for Data {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Data::Null => serializer.serialize_unit(),
            Data::Bool(v) => serializer.serialize_bool(*v),
            Data::Integer(v) => serializer.serialize_i64(*v),
            Data::Float(v) => serializer.serialize_f64(*v),
            Data::String(s) | Data::Text(s) => serializer.serialize_str(s),
            Data::Seq(items) => {
                let mut state = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    state.serialize_element(item)?;
                }
                state.end()
            }
            Data::Map(entries) => {
                let mut state = serializer.serialize_map(Some(entries.len()))?;
                for entry in entries {
                    state.serialize_entry(&entry.key, &entry.value)?;
                }
                state.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Data {
    #[inline]
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DataVisitor)
    }
}

/// A [`Visitor`] accepting any self-describing input.
struct DataVisitor;

impl<'de> Visitor<'de> for DataVisitor {
    type Value = Data;

    fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter.write_str("any data value")
    }

    #[inline]
    fn visit_bool<E>(self, v: bool) -> Result<Data, E> {
        Ok(Data::Bool(v))
    }

    #[inline]
    fn visit_i64<E>(self, v: i64) -> Result<Data, E> {
        Ok(Data::Integer(v))
    }

    #[inline]
    fn visit_u64<E>(self, v: u64) -> Result<Data, E> {
        Ok(match i64::try_from(v) {
            Ok(v) => Data::Integer(v),
            Err(_) => Data::Float(v as f64),
        })
    }

    #[inline]
    fn visit_f64<E>(self, v: f64) -> Result<Data, E> {
        Ok(Data::Float(v))
    }

    #[inline]
    fn visit_str<E>(self, v: &str) -> Result<Data, E> {
        Ok(Data::String(String::from(v)))
    }

    #[inline]
    fn visit_string<E>(self, v: String) -> Result<Data, E> {
        Ok(Data::String(v))
    }

    #[inline]
    fn visit_unit<E>(self) -> Result<Data, E> {
        Ok(Data::Null)
    }

    #[inline]
    fn visit_none<E>(self) -> Result<Data, E> {
        Ok(Data::Null)
    }

    #[inline]
    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Data, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<V: SeqAccess<'de>>(self, mut seq: V) -> Result<Data, V::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or_default());
        while let Some(item) = seq.next_element::<Data>()? {
            items.push(item);
        }
        Ok(Data::Seq(items))
    }

    fn visit_map<V: MapAccess<'de>>(self, mut map: V) -> Result<Data, V::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or_default());
        while let Some((key, value)) = map.next_entry::<String, Data>()? {
            entries.push(Entry::new(key, value));
        }
        Ok(Data::Map(entries))
    }
}

// -----------------------------------------------------------------------------
// Tests
