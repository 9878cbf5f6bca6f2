//! Host side of the viewer
//!
//! Everything between a front end and the trees: which language is active, where trees come
//! from (the line analyzer, an external parser, or nowhere), how failures are reported, and the
//! [controller::Controller] that ties those to the presenter's outline state.

pub mod controller;
pub mod error;
pub mod language;
pub mod parser;

pub use controller::Controller;
pub use error::{AnalysisError, ParseFailure};
pub use language::{Backend, Language, UnknownLanguage};
pub use parser::{CommandParser, ExternalParser, ParserOptions, SourceType, OPTIONS_ENV_VAR};
