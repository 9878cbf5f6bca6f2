//! Analysis errors
//!
//! Every failure ends the current analysis attempt and is shown, as text, in the single message
//! slot of the controller.

use super::language::Language;
use std::fmt;

/// An external parser rejected the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    pub message: String,
    /// Approximate byte offset of the problem, when the parser reports one
    pub location: Option<usize>,
}

impl ParseFailure {
    pub fn new(message: impl Into<String>) -> Self {
        ParseFailure {
            message: message.into(),
            location: None,
        }
    }

    pub fn at(mut self, location: usize) -> Self {
        self.location = Some(location);
        self
    }
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ParseFailure {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// Blank source; nothing was analyzed
    EmptyInput,
    /// The external parser failed
    ParseFailure(ParseFailure),
    /// The language has no analyzer at all
    UnsupportedLanguage(Language),
    /// The language needs an external parser and none is registered
    ParserUnavailable(Language),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::EmptyInput => write!(f, "Please enter some code"),
            AnalysisError::ParseFailure(failure) => write!(f, "Parse Error: {failure}"),
            AnalysisError::UnsupportedLanguage(lang) => write!(
                f,
                "{} AST parsing is not yet implemented. This would require a {} parser.",
                lang.label(),
                lang.label()
            ),
            AnalysisError::ParserUnavailable(lang) => {
                write!(f, "No parser configured for {}", lang.label())
            }
        }
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnalysisError::ParseFailure(failure) => Some(failure),
            _ => None,
        }
    }
}

impl From<ParseFailure> for AnalysisError {
    fn from(failure: ParseFailure) -> Self {
        AnalysisError::ParseFailure(failure)
    }
}
