//! # astview
//!
//! An interactive syntax tree explorer.
//!
//! Source text goes in, a tree comes out, and the tree is presented as a collapsible outline
//! next to the source. Clicking a node highlights the span it came from, when the node knows it.
//!
//! File Layout
//!
//! src/
//!   ├── ast          TreeNode, Value and source ranges (plus JSON conversion)
//!   ├── analyzer     The toy line-based analyzer for the Python demo language
//!   ├── presenter    Outline state, row flattening and click handling
//!   ├── host         Language selection, external parsers and the page controller
//!   ├── formats      Non-interactive serializers (json, yaml, treeviz, outline)
//!   └── config       Layered configuration
//!
//! The analyzer is deliberately shallow: one statement per line, no nested blocks, no
//! expression parsing. Real trees come from an external parser plugged in through
//! [`host::parser::ExternalParser`]; the presenter renders both kinds the same way.

pub mod analyzer;
pub mod ast;
pub mod config;
pub mod formats;
pub mod host;
pub mod presenter;
