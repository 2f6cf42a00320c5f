//! Input tree for generation. No `serde_json::Value` past this point.
//!
//! [`ConfigNode`] is the closed set of JSON kinds the generator dispatches on.
//! [`ConfigPath`] is the colon-joined address the generated code hands to the
//! configuration provider at runtime.
use std::fmt;

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Serialize, Serializer};
use serde_json::Value;

pub const PATH_SEPARATOR: char = ':';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigNode {
    Null,
    Bool(bool),
    Integer(i64),
    Float(OrderedFloat<f64>),
    String(String),
    Array(Vec<ConfigNode>),
    /// Raw keys in source order.
    Object(IndexMap<String, ConfigNode>),
}

impl ConfigNode {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => ConfigNode::Null,
            Value::Bool(b) => ConfigNode::Bool(*b),
            Value::Number(n) => {
                // u64 past i64::MAX and every non-integral literal land on Float
                if let Some(i) = n.as_i64() {
                    ConfigNode::Integer(i)
                } else {
                    ConfigNode::Float(OrderedFloat(n.as_f64().unwrap_or_default()))
                }
            }
            Value::String(s) => ConfigNode::String(s.clone()),
            Value::Array(xs) => ConfigNode::Array(xs.iter().map(Self::from_value).collect()),
            Value::Object(map) => ConfigNode::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Self::from_value(v)))
                    .collect(),
            ),
        }
    }

    /// JSON kind name, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ConfigNode::Null => "null",
            ConfigNode::Bool(_) => "boolean",
            ConfigNode::Integer(_) | ConfigNode::Float(_) => "number",
            ConfigNode::String(_) => "string",
            ConfigNode::Array(_) => "array",
            ConfigNode::Object(_) => "object",
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, ConfigNode>> {
        match self {
            ConfigNode::Object(map) => Some(map),
            _ => None,
        }
    }
}

impl From<&Value> for ConfigNode {
    fn from(value: &Value) -> Self {
        Self::from_value(value)
    }
}

/// Raw key segments from the document root. Never holds generated identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ConfigPath {
    segments: Vec<String>,
}

impl ConfigPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn child(&self, raw_key: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(raw_key.to_string());
        Self { segments }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Address handed to the provider.
    pub fn join(&self) -> String {
        self.segments.join(":")
    }

    /// Prefix the fallback accessor glues in front of a caller-supplied key.
    /// Empty at the root, `a:b:` below it.
    pub fn fallback_prefix(&self) -> String {
        if self.is_root() {
            String::new()
        } else {
            format!("{}{PATH_SEPARATOR}", self.join())
        }
    }
}

impl fmt::Display for ConfigPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join())
    }
}

impl Serialize for ConfigPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<S: Into<String>> FromIterator<S> for ConfigPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self { segments: iter.into_iter().map(Into::into).collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn object_keys_keep_source_order() {
        let v: Value = serde_json::from_str(r#"{"b": 1, "a": 2, "c": 3}"#).unwrap();
        let node = ConfigNode::from_value(&v);
        let keys: Vec<&str> = node.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["b", "a", "c"]);
    }

    #[test]
    fn numbers_split_into_integer_and_float() {
        assert_eq!(ConfigNode::from_value(&json!(30)), ConfigNode::Integer(30));
        assert_eq!(ConfigNode::from_value(&json!(1.5)), ConfigNode::Float(OrderedFloat(1.5)));
        assert_eq!(ConfigNode::from_value(&json!(-7)), ConfigNode::Integer(-7));
        assert!(matches!(
            ConfigNode::from_value(&json!(u64::MAX)),
            ConfigNode::Float(_)
        ));
    }

    #[test]
    fn path_joins_raw_segments_with_colons() {
        let path = ConfigPath::root()
            .child("Logging")
            .child("LogLevel")
            .child("Microsoft.AspNetCore");
        assert_eq!(path.join(), "Logging:LogLevel:Microsoft.AspNetCore");
        assert_eq!(path.fallback_prefix(), "Logging:LogLevel:Microsoft.AspNetCore:");
        assert_eq!(ConfigPath::root().fallback_prefix(), "");
        assert_eq!(path.last(), Some("Microsoft.AspNetCore"));
    }

    #[test]
    fn path_serializes_as_joined_string() {
        let path: ConfigPath = ["ApiSettings", "BaseUrl"].into_iter().collect();
        assert_eq!(serde_json::to_value(&path).unwrap(), json!("ApiSettings:BaseUrl"));
    }
}
