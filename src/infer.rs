//! Node → target category.
//!
//! Exhaustive over [`ConfigNode`]; no side effects. Numbers are split the way
//! the runtime reads them back: a JSON integer that fits `i32` is an integer,
//! anything else numeric is a float.
use serde::Serialize;
use serde_json::{Value, json};

use crate::node::ConfigNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
    String,
    Integer,
    Float,
    Boolean,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeCategory {
    Scalar(ScalarKind),
    /// Nested object; always constructible, so it has no default.
    Container,
    /// Any array. Elements are read back as opaque strings whatever their JSON kind.
    StringArray,
    /// `null`. What happens to it is up to [`crate::options::NullPolicy`].
    Absent,
}

pub fn infer(node: &ConfigNode) -> TypeCategory {
    match node {
        ConfigNode::String(_) => TypeCategory::Scalar(ScalarKind::String),
        ConfigNode::Integer(i) if i32::try_from(*i).is_ok() => {
            TypeCategory::Scalar(ScalarKind::Integer)
        }
        ConfigNode::Integer(_) | ConfigNode::Float(_) => TypeCategory::Scalar(ScalarKind::Float),
        ConfigNode::Bool(_) => TypeCategory::Scalar(ScalarKind::Boolean),
        ConfigNode::Object(_) => TypeCategory::Container,
        ConfigNode::Array(_) => TypeCategory::StringArray,
        ConfigNode::Null => TypeCategory::Absent,
    }
}

impl ScalarKind {
    /// Value an accessor yields when the key is missing or does not parse.
    pub fn default_value(self) -> Value {
        match self {
            ScalarKind::String => json!(""),
            ScalarKind::Integer => json!(0),
            ScalarKind::Float => json!(0.0),
            ScalarKind::Boolean => json!(false),
        }
    }
}

impl TypeCategory {
    pub fn default_value(self) -> Option<Value> {
        match self {
            TypeCategory::Scalar(kind) => Some(kind.default_value()),
            TypeCategory::StringArray => Some(json!([])),
            TypeCategory::Container | TypeCategory::Absent => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn category_of(v: Value) -> TypeCategory {
        infer(&ConfigNode::from_value(&v))
    }

    #[test]
    fn every_json_kind_has_a_category() {
        assert_eq!(category_of(json!("x")), TypeCategory::Scalar(ScalarKind::String));
        assert_eq!(category_of(json!(30)), TypeCategory::Scalar(ScalarKind::Integer));
        assert_eq!(category_of(json!(0.5)), TypeCategory::Scalar(ScalarKind::Float));
        assert_eq!(category_of(json!(true)), TypeCategory::Scalar(ScalarKind::Boolean));
        assert_eq!(category_of(json!({})), TypeCategory::Container);
        assert_eq!(category_of(json!([1, "a", null])), TypeCategory::StringArray);
        assert_eq!(category_of(json!(null)), TypeCategory::Absent);
    }

    #[test]
    fn integers_outside_i32_widen_to_float() {
        assert_eq!(
            category_of(json!(i32::MAX)),
            TypeCategory::Scalar(ScalarKind::Integer)
        );
        assert_eq!(
            category_of(json!(i32::MIN)),
            TypeCategory::Scalar(ScalarKind::Integer)
        );
        assert_eq!(
            category_of(json!(i64::from(i32::MAX) + 1)),
            TypeCategory::Scalar(ScalarKind::Float)
        );
        assert_eq!(
            category_of(json!(3_000_000_000_000u64)),
            TypeCategory::Scalar(ScalarKind::Float)
        );
    }

    #[test]
    fn fractional_literal_is_float_even_when_whole() {
        // `3.0` is not an integer literal
        assert_eq!(category_of(json!(3.0)), TypeCategory::Scalar(ScalarKind::Float));
    }

    #[test]
    fn defaults_match_category() {
        assert_eq!(TypeCategory::Scalar(ScalarKind::String).default_value(), Some(json!("")));
        assert_eq!(TypeCategory::Scalar(ScalarKind::Integer).default_value(), Some(json!(0)));
        assert_eq!(TypeCategory::Scalar(ScalarKind::Float).default_value(), Some(json!(0.0)));
        assert_eq!(TypeCategory::Scalar(ScalarKind::Boolean).default_value(), Some(json!(false)));
        assert_eq!(TypeCategory::StringArray.default_value(), Some(json!([])));
        assert_eq!(TypeCategory::Container.default_value(), None);
    }
}
