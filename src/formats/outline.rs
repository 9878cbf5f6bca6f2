//! Outline formatter: the viewer's tree pane as plain text, fully expanded

use super::registry::{FormatError, Formatter};
use crate::ast::Value;
use crate::presenter::{flatten, render_rows, OutlineState};

pub fn to_outline_str(tree: &Value) -> String {
    let mut state = OutlineState::new();
    state.expand_all(tree);
    let mut text = render_rows(&flatten(tree, &state)).join("\n");
    text.push('\n');
    text
}

pub struct OutlineFormatter;

impl Formatter for OutlineFormatter {
    fn name(&self) -> &str {
        "outline"
    }

    fn serialize(&self, tree: &Value) -> Result<String, FormatError> {
        Ok(to_outline_str(tree))
    }

    fn description(&self) -> &str {
        "The interactive outline with every node expanded"
    }
}
