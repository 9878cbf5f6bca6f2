//! Tree data model
//!
//!     Every tree the viewer shows, whether it came from the toy analyzer or from an external
//!     parser, is made of [`TreeNode`]s holding ordered attributes. Attribute values are a closed
//!     set of variants ([`Value`]): primitives, nested nodes, lists, and an opaque fallback for
//!     object shapes that are not nodes.
//!
//!     Nodes from external parsers carry a [`SourceRange`] (byte offsets into the source). Nodes
//!     built by the toy analyzer never do.
//!
//!     See [json](json) for the conversion from parser output.

pub mod json;
pub mod node;
pub mod range;
pub mod value;

pub use node::{is_reserved_key, Attributes, TreeNode, RESERVED_KEYS};
pub use range::{Position, SourceLocation, SourceRange};
pub use value::Value;
