//! Host controller
//!
//! Owns everything the presenter and the source pane need: the current language and source,
//! the last analysis result, the single message slot, the highlight range and the outline
//! expansion state. Front ends only forward user actions here and draw what it exposes.

use super::error::AnalysisError;
use super::language::{Backend, Language};
use super::parser::{ExternalParser, ParserOptions};
use crate::analyzer::analyze;
use crate::ast::{SourceRange, Value};
use crate::presenter::{
    flatten, hit_test, NodeId, OutlineEvent, OutlineRow, OutlineState, Presenter,
};
use std::collections::HashMap;
use tracing::{debug, info};

pub struct Controller {
    language: Language,
    source: String,
    result: Option<Value>,
    message: Option<String>,
    highlight: Option<SourceRange>,
    outline: OutlineState,
    parsers: HashMap<Language, Box<dyn ExternalParser>>,
}

impl Controller {
    /// Start with `language` and its sample source
    pub fn new(language: Language) -> Self {
        Controller {
            language,
            source: language.sample().to_string(),
            result: None,
            message: None,
            highlight: None,
            outline: OutlineState::new(),
            parsers: HashMap::new(),
        }
    }

    /// Register the parser used for `language`
    pub fn with_parser(mut self, language: Language, parser: Box<dyn ExternalParser>) -> Self {
        self.register_parser(language, parser);
        self
    }

    pub fn register_parser(&mut self, language: Language, parser: Box<dyn ExternalParser>) {
        self.parsers.insert(language, parser);
    }

    pub fn has_parser(&self, language: Language) -> bool {
        self.parsers.contains_key(&language)
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn highlight(&self) -> Option<SourceRange> {
        self.highlight
    }

    pub fn outline(&self) -> &OutlineState {
        &self.outline
    }

    /// Shown in the tree pane while there is no result
    pub fn placeholder(&self) -> String {
        format!("Parse your {} code to see the AST structure", self.language.label())
    }

    /// Switch language, loading its sample and dropping everything derived from the old source
    pub fn set_language(&mut self, language: Language) {
        debug!(from = %self.language, to = %language, "switching language");
        self.language = language;
        self.restore_sample();
    }

    /// Replace the source text. The highlight refers to the old text, so it goes.
    pub fn set_source(&mut self, source: impl Into<String>) {
        self.source = source.into();
        self.highlight = None;
    }

    /// Back to the sample source of the current language with nothing derived
    pub fn reset(&mut self) {
        self.restore_sample();
    }

    fn restore_sample(&mut self) {
        self.source = self.language.sample().to_string();
        self.result = None;
        self.message = None;
        self.highlight = None;
        self.outline.reset();
    }

    /// Analyze the current source with the current language.
    ///
    /// Blank input only sets the message and leaves any previous result alone. Every other
    /// failure clears the result as well. On success the message is cleared and the outline
    /// starts over with only the root expanded.
    pub fn analyze(&mut self) -> Result<&Value, AnalysisError> {
        if self.source.trim().is_empty() {
            let err = AnalysisError::EmptyInput;
            self.message = Some(err.to_string());
            return Err(err);
        }

        self.highlight = None;
        match self.run_backend() {
            Ok(tree) => {
                info!(language = %self.language, "analysis succeeded");
                self.message = None;
                self.outline.reset();
                Ok(&*self.result.insert(tree))
            }
            Err(err) => {
                info!(language = %self.language, error = %err, "analysis failed");
                self.result = None;
                self.outline.reset();
                self.message = Some(err.to_string());
                Err(err)
            }
        }
    }

    fn run_backend(&self) -> Result<Value, AnalysisError> {
        match self.language.backend() {
            Backend::Toy => Ok(Value::from(analyze(&self.source))),
            Backend::Unsupported => Err(AnalysisError::UnsupportedLanguage(self.language)),
            Backend::External => {
                let parser = self
                    .parsers
                    .get(&self.language)
                    .ok_or(AnalysisError::ParserUnavailable(self.language))?;
                let options = ParserOptions::for_language(self.language);
                Ok(parser.parse(&self.source, &options)?)
            }
        }
    }

    /// Visible outline rows of the current result. Empty when there is none.
    pub fn rows(&self) -> Vec<OutlineRow> {
        match &self.result {
            Some(tree) => flatten(tree, &self.outline),
            None => Vec::new(),
        }
    }

    /// Select a node. The highlight becomes its source range, or nothing if it has none.
    /// Returns false when the path does not resolve to a node.
    pub fn select(&mut self, node_id: &NodeId) -> bool {
        self.apply(&OutlineEvent::Select(node_id.clone()))
    }

    /// Flip a node between expanded and collapsed
    pub fn toggle(&mut self, node_id: &NodeId) -> bool {
        self.apply(&OutlineEvent::Toggle(node_id.clone()))
    }

    /// Handle a click on the outline, `row` and `column` relative to its first row and column
    pub fn click(&mut self, row: usize, column: usize) -> Option<OutlineEvent> {
        let event = hit_test(&self.rows(), row, column)?;
        self.apply(&event);
        Some(event)
    }

    pub fn apply(&mut self, event: &OutlineEvent) -> bool {
        let Some(tree) = &self.result else {
            return false;
        };

        let mut selected: Option<Option<SourceRange>> = None;
        let applied = {
            let mut presenter = Presenter::new(|node| selected = Some(node.source_range()));
            presenter.apply(event, tree, &mut self.outline)
        };

        if let Some(range) = selected {
            debug!(node = ?event, ?range, "node selected");
            self.highlight = range.map(|r| r.clamp(self.source.len()));
        }
        applied
    }
}
