//! External parser contract
//!
//! Real trees for JavaScript and JSX come from outside this crate. Anything implementing
//! [`ExternalParser`] can be registered with the controller; [`CommandParser`] is the stock
//! implementation that shells out to a configured command.
//!
//! The command protocol:
//!
//! - the source text is written to the command's stdin;
//! - [`ParserOptions`], as JSON, is passed in the `ASTVIEW_PARSER_OPTIONS` environment variable;
//! - on success the command exits 0 and prints one JSON tree (ESTree style) on stdout;
//! - on failure it exits non-zero and prints a human readable message on stderr. A trailing
//!   `(line:column)` in the message is kept as-is.

use super::error::ParseFailure;
use super::language::Language;
use crate::ast::Value;
use serde::Serialize;
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::{debug, warn};

pub const OPTIONS_ENV_VAR: &str = "ASTVIEW_PARSER_OPTIONS";

/// Syntax extensions every JavaScript flavor accepts
const BASE_EXTENSIONS: &[&str] = &[
    "typescript",
    "decorators-legacy",
    "class-properties",
    "async-generators",
    "function-bind",
    "export-default-from",
    "export-namespace-from",
    "dynamic-import",
    "nullish-coalescing-operator",
    "optional-chaining",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Module,
    Script,
}

/// What the external parser should accept
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParserOptions {
    pub source_type: SourceType,
    pub allow_import_export_everywhere: bool,
    pub allow_return_outside_function: bool,
    pub extensions: Vec<String>,
}

impl ParserOptions {
    pub fn for_language(language: Language) -> Self {
        let mut extensions = Vec::new();
        if language == Language::Jsx {
            extensions.push("jsx".to_string());
        }
        extensions.extend(BASE_EXTENSIONS.iter().map(|ext| ext.to_string()));

        ParserOptions {
            source_type: SourceType::Module,
            allow_import_export_everywhere: true,
            allow_return_outside_function: true,
            extensions,
        }
    }

    pub fn has_extension(&self, name: &str) -> bool {
        self.extensions.iter().any(|ext| ext == name)
    }
}

/// A real parser living outside this crate
pub trait ExternalParser {
    /// Parse `source` into a tree. Nodes should carry source ranges.
    fn parse(&self, source: &str, options: &ParserOptions) -> Result<Value, ParseFailure>;
}

impl<F> ExternalParser for F
where
    F: Fn(&str, &ParserOptions) -> Result<Value, ParseFailure>,
{
    fn parse(&self, source: &str, options: &ParserOptions) -> Result<Value, ParseFailure> {
        self(source, options)
    }
}

/// Runs a command that speaks the protocol described in the module docs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandParser {
    program: String,
    args: Vec<String>,
}

impl CommandParser {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        CommandParser {
            program: program.into(),
            args,
        }
    }

    /// Build from an argv-style list. None if the list is empty.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(CommandParser::new(program.clone(), args.to_vec()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl ExternalParser for CommandParser {
    fn parse(&self, source: &str, options: &ParserOptions) -> Result<Value, ParseFailure> {
        let options_json = serde_json::to_string(options)
            .map_err(|e| ParseFailure::new(format!("could not encode parser options: {e}")))?;

        debug!(program = %self.program, "running external parser");
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .env(OPTIONS_ENV_VAR, options_json)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                ParseFailure::new(format!("failed to start parser `{}`: {e}", self.program))
            })?;

        // Feed stdin from a separate thread so a chatty parser cannot block on a full stdout pipe
        let stdin = child.stdin.take();
        let output = std::thread::scope(|scope| {
            if let Some(mut stdin) = stdin {
                scope.spawn(move || {
                    let _ = stdin.write_all(source.as_bytes());
                });
            }
            child.wait_with_output()
        })
        .map_err(|e| ParseFailure::new(format!("parser `{}` failed: {e}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                format!("parser `{}` exited with {}", self.program, output.status)
            } else {
                stderr
            };
            warn!(program = %self.program, %message, "external parser reported a failure");
            return Err(ParseFailure::new(message));
        }

        let json: serde_json::Value = serde_json::from_slice(&output.stdout)
            .map_err(|e| ParseFailure::new(format!("parser produced invalid JSON: {e}")))?;
        Ok(Value::from_json(json))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::TreeNode;

    #[test]
    fn test_jsx_options_enable_jsx() {
        let jsx = ParserOptions::for_language(Language::Jsx);
        assert!(jsx.has_extension("jsx"));
        assert!(jsx.has_extension("optional-chaining"));

        let js = ParserOptions::for_language(Language::JavaScript);
        assert!(!js.has_extension("jsx"));
        assert_eq!(js.source_type, SourceType::Module);
    }

    #[test]
    fn test_options_serialize_camel_case() {
        let json = serde_json::to_value(ParserOptions::for_language(Language::JavaScript)).unwrap();
        assert_eq!(json["sourceType"], "module");
        assert_eq!(json["allowReturnOutsideFunction"], true);
    }

    #[test]
    fn test_closures_are_parsers() {
        let parser = |source: &str, _: &ParserOptions| -> Result<Value, ParseFailure> {
            Ok(Value::from(TreeNode::new("Program").with("raw", source)))
        };
        let tree = parser
            .parse("x", &ParserOptions::for_language(Language::JavaScript))
            .unwrap();
        assert_eq!(tree.as_node().unwrap().attr("raw"), Some(&Value::from("x")));
    }

    #[test]
    fn test_from_argv() {
        assert!(CommandParser::from_argv(&[]).is_none());
        let parser =
            CommandParser::from_argv(&["node".to_string(), "parse.js".to_string()]).unwrap();
        assert_eq!(parser.program(), "node");
    }

    #[test]
    fn test_missing_program_is_a_parse_failure() {
        let parser = CommandParser::new("astview-definitely-not-a-real-parser", vec![]);
        let err = parser
            .parse("x", &ParserOptions::for_language(Language::JavaScript))
            .unwrap_err();
        assert!(err.message.contains("failed to start parser"));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_parser_reads_stdout_json() {
        let parser = CommandParser::new(
            "sh",
            vec![
                "-c".to_string(),
                r#"cat > /dev/null; echo '{"type":"Program","start":0,"end":1,"body":[]}'"#
                    .to_string(),
            ],
        );
        let tree = parser
            .parse("x", &ParserOptions::for_language(Language::JavaScript))
            .unwrap();
        let node = tree.as_node().unwrap();
        assert_eq!(node.kind(), "Program");
        assert_eq!(node.source_range().map(|r| r.end), Some(1));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_parser_failure_uses_stderr() {
        let parser = CommandParser::new(
            "sh",
            vec![
                "-c".to_string(),
                "cat > /dev/null; echo 'Unexpected token (1:2)' >&2; exit 1".to_string(),
            ],
        );
        let err = parser
            .parse("x(", &ParserOptions::for_language(Language::JavaScript))
            .unwrap_err();
        assert_eq!(err.message, "Unexpected token (1:2)");
    }
}
