//! JSON conversion
//!
//! External parsers hand back ESTree-style JSON: objects tagged with a string `type` field and
//! carrying `start`/`end` byte offsets. [`Value::from_json`] validates that shape once, up front,
//! so the presenter never has to sniff objects:
//!
//! - an object with a non-empty string `type` becomes a [`TreeNode`]; numeric `start`/`end`
//!   become its [`SourceRange`], everything else becomes attributes in document order;
//! - any other object becomes [`Value::Opaque`];
//! - arrays become lists, primitives map directly, `null` is [`Value::Null`].
//!
//! The conversion is total: malformed input degrades, it never fails.
//!
//! Serialization goes the other way and writes the same shape back out.

use super::node::TreeNode;
use super::range::SourceRange;
use super::value::Value;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Map;

impl Value {
    pub fn from_json(json: serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(map) => match node_kind(&map) {
                Some(kind) => Value::Node(node_from_object(kind, map)),
                None => Value::Opaque(serde_json::Value::Object(map)),
            },
        }
    }
}

fn node_kind(map: &Map<String, serde_json::Value>) -> Option<String> {
    match map.get("type") {
        Some(serde_json::Value::String(kind)) if !kind.is_empty() => Some(kind.clone()),
        _ => None,
    }
}

fn node_from_object(kind: String, map: Map<String, serde_json::Value>) -> TreeNode {
    let range = match (
        map.get("start").and_then(serde_json::Value::as_u64),
        map.get("end").and_then(serde_json::Value::as_u64),
    ) {
        (Some(start), Some(end)) => SourceRange::new(start as usize, end as usize),
        _ => None,
    };

    let mut node = TreeNode::new(kind);
    for (key, value) in map {
        if key == "type" || (range.is_some() && (key == "start" || key == "end")) {
            continue;
        }
        node.insert(key, Value::from_json(value));
    }

    match range {
        Some(range) => node.with_range(range),
        None => node,
    }
}

impl Serialize for TreeNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let range = self.source_range();
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", self.kind())?;
        for (key, value) in self.attributes().iter() {
            if key == "type" || (range.is_some() && (key == "start" || key == "end")) {
                continue;
            }
            map.serialize_entry(key, value)?;
        }
        if let Some(range) = range {
            map.serialize_entry("start", &range.start)?;
            map.serialize_entry("end", &range.end)?;
        }
        map.end()
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => n.serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::Node(node) => node.serialize(serializer),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Opaque(json) => json.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_typed_object_becomes_node_with_range() {
        let value = Value::from_json(json!({
            "type": "Identifier",
            "start": 9,
            "end": 18,
            "loc": {"start": {"line": 1, "column": 9}},
            "name": "fibonacci"
        }));

        let node = value.as_node().expect("node");
        assert_eq!(node.kind(), "Identifier");
        assert_eq!(node.source_range(), SourceRange::new(9, 18));
        assert_eq!(node.name(), Some("fibonacci".to_string()));
        let keys: Vec<&str> = node.attributes().keys().collect();
        assert_eq!(keys, vec!["loc", "name"]);
    }

    #[test]
    fn test_untyped_and_empty_typed_objects_are_opaque() {
        assert!(matches!(
            Value::from_json(json!({"line": 1, "column": 0})),
            Value::Opaque(_)
        ));
        assert!(matches!(
            Value::from_json(json!({"type": ""})),
            Value::Opaque(_)
        ));
        assert!(matches!(
            Value::from_json(json!({"type": 3})),
            Value::Opaque(_)
        ));
    }

    #[test]
    fn test_non_numeric_offsets_stay_attributes() {
        let value = Value::from_json(json!({"type": "Token", "start": "a", "end": 3}));
        let node = value.as_node().unwrap();
        assert_eq!(node.source_range(), None);
        assert_eq!(node.attr("start"), Some(&Value::from("a")));
    }

    #[test]
    fn test_primitives_and_arrays() {
        assert_eq!(Value::from_json(json!(null)), Value::Null);
        assert_eq!(Value::from_json(json!(42)), Value::from(42i64));
        assert_eq!(
            Value::from_json(json!(["a", 1])),
            Value::List(vec![Value::from("a"), Value::from(1i64)])
        );
    }

    #[test]
    fn test_serialize_puts_type_first_and_range_last() {
        let node = TreeNode::new("Identifier")
            .with("name", "x")
            .with_range(SourceRange::new(4, 5).unwrap());
        let text = serde_json::to_string(&node).unwrap();
        assert_eq!(text, r#"{"type":"Identifier","name":"x","start":4,"end":5}"#);
    }

    #[test]
    fn test_json_round_trip_preserves_structure() {
        let source = json!({
            "type": "Program",
            "start": 0,
            "end": 10,
            "body": [{"type": "EmptyStatement", "start": 0, "end": 1}],
            "comments": []
        });
        let value = Value::from_json(source.clone());
        assert_eq!(serde_json::to_value(&value).unwrap(), source);
    }
}
