//! Plain-text rendering of outline rows
//!
//! Row layout (columns are chars):
//!
//! ```text
//! <indent: 2 per depth><disclosure: 2><content>
//! ▾ [module]
//!   body: [2 items]
//!     ▸ [function-definition] fibonacci
//!       [assignment] target: "result" = "5"
//! ```
//!
//! Only node rows have a disclosure column. Hit testing in [super::interaction] relies on the
//! same widths, so both live next to each other.

use super::outline::{NodeRow, OutlineRow, RowKind};

pub const INDENT_WIDTH: usize = 2;
pub const DISCLOSURE_WIDTH: usize = 2;

pub const EXPANDED_GLYPH: &str = "▾ ";
pub const COLLAPSED_GLYPH: &str = "▸ ";
pub const LEAF_GLYPH: &str = "  ";

/// Column where a row's content starts
pub fn indent_columns(row: &OutlineRow) -> usize {
    row.depth * INDENT_WIDTH
}

pub fn disclosure(node: &NodeRow) -> &'static str {
    match (node.has_children, node.is_expanded) {
        (false, _) => LEAF_GLYPH,
        (true, true) => EXPANDED_GLYPH,
        (true, false) => COLLAPSED_GLYPH,
    }
}

/// The text of a node header, without indentation or disclosure
pub fn node_label(node: &NodeRow) -> String {
    let mut label = format!("[{}]", node.kind);
    if let Some(name) = &node.name {
        label.push(' ');
        label.push_str(name);
    }
    for (key, literal) in &node.details {
        label.push_str(&format!(" {key}: {literal}"));
    }
    if let Some(value) = &node.value {
        label.push_str(&format!(" = {value}"));
    }
    label
}

/// The text of a row without indentation
pub fn row_content(row: &OutlineRow) -> String {
    match &row.kind {
        RowKind::Node(node) => format!("{}{}", disclosure(node), node_label(node)),
        RowKind::Field { key, literal } => format!("{key}: {literal}"),
        RowKind::Summary { key, count } => format!("{key}: [{count} items]"),
        RowKind::Label { key } => format!("{key}:"),
        RowKind::Literal { text } => text.clone(),
    }
}

pub fn render_row(row: &OutlineRow) -> String {
    format!("{}{}", " ".repeat(indent_columns(row)), row_content(row))
}

pub fn render_rows(rows: &[OutlineRow]) -> Vec<String> {
    rows.iter().map(render_row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;
    use crate::ast::Value;
    use crate::presenter::outline::{flatten, OutlineState};

    #[test]
    fn test_render_analyzed_function() {
        let root = Value::from(analyze("def add(a, b):\nresult = 5"));
        let lines = render_rows(&flatten(&root, &OutlineState::new()));

        insta::assert_snapshot!(lines.join("\n"), @r#"
        ▾ [module]
          body: [2 items]
            ▸ [function-definition] add
              [assignment] target: "result" = "5"
        "#);
    }

    #[test]
    fn test_render_literal_row() {
        let rows = flatten(&Value::from("just text"), &OutlineState::new());
        assert_eq!(render_rows(&rows), vec!["\"just text\"".to_string()]);
    }
}
