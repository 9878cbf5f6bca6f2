//! JSON and YAML output
//!
//! Both go through the same `Serialize` impl, so a tree looks the same as what an external
//! parser would have printed: `type` first, then attributes in order, then `start`/`end`.

use super::registry::{FormatError, Formatter};
use crate::ast::Value;

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, tree: &Value) -> Result<String, FormatError> {
        serde_json::to_string_pretty(tree)
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Pretty-printed JSON in ESTree style"
    }
}

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, tree: &Value) -> Result<String, FormatError> {
        serde_yaml::to_string(tree).map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "The JSON shape rendered as YAML"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;
    use crate::ast::{SourceRange, TreeNode};

    #[test]
    fn test_json_reads_back() {
        let tree = Value::from(analyze("result = 5"));
        let text = JsonFormatter.serialize(&tree).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["type"], "module");
        assert_eq!(json["body"][0]["type"], "assignment");
        assert_eq!(json["body"][0]["value"], "5");
    }

    #[test]
    fn test_yaml_keeps_ranges() {
        let tree = Value::from(
            TreeNode::new("Identifier")
                .with("name", "x")
                .with_range(SourceRange::new(4, 5).unwrap()),
        );
        let text = YamlFormatter.serialize(&tree).unwrap();
        insta::assert_snapshot!(text.trim_end(), @r"
        type: Identifier
        name: x
        start: 4
        end: 5
        ");
    }
}
