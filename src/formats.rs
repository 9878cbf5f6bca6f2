//! Output formats for trees
//!
//! Used by the non-interactive `analyze` subcommand:
//! - json / yaml: the tree in ESTree style
//! - treeviz: one line per node, box connectors
//! - outline: the viewer's outline, fully expanded

pub mod outline;
pub mod registry;
pub mod structured;
pub mod treeviz;

pub use outline::{to_outline_str, OutlineFormatter};
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use structured::{JsonFormatter, YamlFormatter};
pub use treeviz::{to_treeviz_str, TreevizFormatter};
