pub mod chat;
pub mod models;
pub mod tool;
pub mod vocab;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use models::Timestamp;

#[derive(Debug, thiserror::Error)]
pub enum BindingError {
    #[error("Malformed input: {0}")]
    MalformedInput(#[source] serde_json::Error),
    #[error("Encode error: {0}")]
    Encode(#[source] serde_json::Error),
}

impl Serialize for BindingError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Raw value handed to [`Binding::parse`]: nothing, JSON text, or an
/// already structured value.
#[derive(Debug, Clone, PartialEq)]
pub enum Input<'a> {
    Absent,
    Text(&'a str),
    Value(Value),
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(text: &'a str) -> Self {
        Input::Text(text)
    }
}

impl<'a> From<&'a String> for Input<'a> {
    fn from(text: &'a String) -> Self {
        Input::Text(text.as_str())
    }
}

impl From<Value> for Input<'_> {
    fn from(value: Value) -> Self {
        Input::Value(value)
    }
}

impl<'a, T: Into<Input<'a>>> From<Option<T>> for Input<'a> {
    fn from(source: Option<T>) -> Self {
        source.map_or(Input::Absent, Into::into)
    }
}

impl Input<'_> {
    /// Resolve to the object whose fields get copied. Anything that is not a
    /// JSON object after parsing contributes no fields.
    fn into_object(self) -> Result<Map<String, Value>, BindingError> {
        let value = match self {
            Input::Absent => return Ok(Map::new()),
            Input::Text(text) => parse_text(text)?,
            Input::Value(Value::String(text)) => parse_text(&text)?,
            Input::Value(value) => value,
        };
        match value {
            Value::Object(map) => Ok(map),
            _ => Ok(Map::new()),
        }
    }
}

fn parse_text(text: &str) -> Result<Value, BindingError> {
    serde_json::from_str(text).map_err(|e| {
        log::warn!("Rejecting malformed JSON input: {}", e);
        BindingError::MalformedInput(e)
    })
}

/// Field lookup over a parsed source object.
///
/// Absent fields, explicit `null` and values of the wrong JSON type all come
/// back as `None`; nothing here ever fails.
#[derive(Debug, Clone, Default)]
pub struct Source {
    map: Map<String, Value>,
}

impl Source {
    pub fn new(map: Map<String, Value>) -> Self {
        Self { map }
    }

    fn present(&self, name: &str) -> Option<&Value> {
        self.map.get(name).filter(|value| !value.is_null())
    }

    pub fn field<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        T::deserialize(self.present(name)?).ok()
    }

    /// Whole number field. Floats with no fractional part that fit in an
    /// `i64` are accepted, so `2.0` and `1e2` read as `2` and `100`.
    pub fn integer(&self, name: &str) -> Option<i64> {
        let value = self.present(name)?;
        if let Some(whole) = value.as_i64() {
            return Some(whole);
        }
        let float = value.as_f64()?;
        if float.fract() == 0.0 && float >= i64::MIN as f64 && float < i64::MAX as f64 {
            Some(float as i64)
        } else {
            None
        }
    }

    pub fn normalized<S: Shape>(&self, name: &str, mode: NormalizeMode) -> Option<Value> {
        self.present(name)
            .map(|value| normalize::<S>(value.clone(), mode))
    }

    pub fn timestamp(&self, name: &str) -> Option<Timestamp> {
        self.normalized::<Passthrough>(name, NormalizeMode::Element)
            .map(Timestamp)
    }

    /// Open key-value field. Non-object values are dropped.
    pub fn object(&self, name: &str) -> Option<Map<String, Value>> {
        match self.normalized::<Passthrough>(name, NormalizeMode::Map)? {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }
}

pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Option<T> {
    serde_json::from_value(value).ok()
}

/// A typed record mirrored from the backend.
pub trait Binding: Sized + Default + Serialize {
    const NAME: &'static str;

    /// Copy every declared field out of `source` by its wire name.
    fn from_source(source: &Source) -> Self;

    fn from_object(map: Map<String, Value>) -> Self {
        log::trace!("Binding {} from {} field(s)", Self::NAME, map.len());
        Self::from_source(&Source::new(map))
    }

    /// Best-effort shape coercion. Fails only when text input is not JSON.
    fn parse<'a>(source: impl Into<Input<'a>>) -> Result<Self, BindingError> {
        let map = source.into().into_object()?;
        Ok(Self::from_object(map))
    }

    fn to_value(&self) -> Result<Value, BindingError> {
        serde_json::to_value(self).map_err(BindingError::Encode)
    }

    fn to_json(&self) -> Result<String, BindingError> {
        serde_json::to_string(self).map_err(BindingError::Encode)
    }
}

/// Target shape for objects met during [`normalize`].
pub trait Shape {
    fn wrap(object: Map<String, Value>) -> Value;
}

/// Leaves objects as they are. Every timestamp and open map uses this.
#[derive(Debug, Clone, Copy)]
pub struct Passthrough;

impl Shape for Passthrough {
    fn wrap(object: Map<String, Value>) -> Value {
        Value::Object(object)
    }
}

impl<T: Binding> Shape for T {
    fn wrap(object: Map<String, Value>) -> Value {
        serde_json::to_value(T::from_object(object)).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeMode {
    /// Objects are wrapped as the target shape.
    Element,
    /// Objects are mappings; each value is normalized and keys are kept.
    Map,
}

/// Recursively rewrite nested values towards shape `S`.
///
/// Sequences keep their order and length, elements are always handled in
/// element mode. Scalars and `null` come back unchanged.
pub fn normalize<S: Shape>(value: Value, mode: NormalizeMode) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| normalize::<S>(item, NormalizeMode::Element))
                .collect(),
        ),
        Value::Object(map) => match mode {
            NormalizeMode::Map => Value::Object(
                map.into_iter()
                    .map(|(key, item)| (key, normalize::<S>(item, NormalizeMode::Element)))
                    .collect(),
            ),
            NormalizeMode::Element => S::wrap(map),
        },
        scalar => scalar,
    }
}
