//! Line classification rules
//!
//! Each rule pairs a [`LineShape`] with a regex. Rules are tried in declaration order and the
//! first match wins, so the order below is the disambiguation policy:
//!
//! 1. function-definition  `def name(params):`
//! 2. class-definition     `class Name(bases):`
//! 3. conditional          `if cond:` (before assignment, so `if x = 1:` is a conditional)
//! 4. loop                 `for x in y:` (before assignment, same reason)
//! 5. assignment           `target = value`
//! 6. return               `return value`
//! 7. call                 `callee(args)` anywhere on the line
//!
//! Rules 1, 2 and 4 own their keyword. A line starting with `def`, `class` or `for` that does not
//! fit the full header pattern is dropped rather than offered to the later rules, so an annotated
//! `def f(x: int) -> int:` never turns into a call.
//!
//! Lines reach the rules already trimmed.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// The statement shapes the analyzer recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineShape {
    FunctionDefinition,
    ClassDefinition,
    Conditional,
    Loop,
    Assignment,
    Return,
    Call,
}

impl LineShape {
    /// The node kind produced for this shape
    pub fn kind(&self) -> &'static str {
        match self {
            LineShape::FunctionDefinition => "function-definition",
            LineShape::ClassDefinition => "class-definition",
            LineShape::Conditional => "conditional",
            LineShape::Loop => "loop",
            LineShape::Assignment => "assignment",
            LineShape::Return => "return",
            LineShape::Call => "call",
        }
    }
}

/// Shapes paired with the keyword they own (if any) and their patterns. Order matters.
const LINE_PATTERNS: &[(LineShape, Option<&str>, &str)] = &[
    (
        LineShape::FunctionDefinition,
        Some("def"),
        r"^def\s+(?P<name>\w+)\s*\((?P<params>.*?)\)\s*:",
    ),
    (
        LineShape::ClassDefinition,
        Some("class"),
        r"^class\s+(?P<name>\w+)\s*(?:\((?P<bases>.*?)\))?\s*:",
    ),
    (LineShape::Conditional, None, r"^if\b\s*(?P<condition>.*)$"),
    (
        LineShape::Loop,
        Some("for"),
        r"^for\s+(?P<target>\w+)\s+in\s+(?P<iter>.*?)\s*:",
    ),
    // The first `=` must not start `==`, so comparisons are not assignments
    (
        LineShape::Assignment,
        None,
        r"^(?P<target>[^=]+)=(?P<value>(?:[^=].*)?)$",
    ),
    (LineShape::Return, None, r"^return\s+(?P<value>.+)$"),
    (LineShape::Call, None, r"(?P<callee>\w+)\s*\((?P<args>.*?)\)"),
];

/// A compiled classification rule
pub struct LineRule {
    pub shape: LineShape,
    /// Keyword that claims a line for this rule even when the pattern fails
    pub keyword: Option<&'static str>,
    pub regex: Regex,
}

impl LineRule {
    pub fn captures<'t>(&self, line: &'t str) -> Option<Captures<'t>> {
        self.regex.captures(line)
    }

    /// True when the line starts with this rule's keyword followed by whitespace
    pub fn claims(&self, line: &str) -> bool {
        self.keyword.is_some_and(|keyword| {
            line.strip_prefix(keyword)
                .and_then(|rest| rest.chars().next())
                .is_some_and(char::is_whitespace)
        })
    }
}

/// The compiled rule table, in priority order
pub static LINE_RULES: Lazy<Vec<LineRule>> = Lazy::new(|| {
    LINE_PATTERNS
        .iter()
        .filter_map(|(shape, keyword, pattern)| {
            Regex::new(pattern).ok().map(|regex| LineRule {
                shape: *shape,
                keyword: *keyword,
                regex,
            })
        })
        .collect()
});

/// The priority order of the rule table
pub fn rule_order() -> Vec<LineShape> {
    LINE_RULES.iter().map(|rule| rule.shape).collect()
}

/// Find the first rule matching a trimmed line. A rule that claims the line by keyword but
/// does not match ends the search.
pub fn match_line(line: &str) -> Option<(LineShape, Captures<'_>)> {
    for rule in LINE_RULES.iter() {
        if let Some(caps) = rule.captures(line) {
            return Some((rule.shape, caps));
        }
        if rule.claims(line) {
            return None;
        }
    }
    None
}
