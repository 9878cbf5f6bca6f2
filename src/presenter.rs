//! Tree presenter
//!
//!     Turns any tree value into an interactive outline. The presenter does not own the tree or
//!     the expansion state; the host keeps both and hands them in:
//!
//!         - [outline::OutlineState]: which nodes are expanded, keyed by [node_id::NodeId]
//!         - [outline::flatten]: the visible rows for a tree and a state
//!         - [interaction::hit_test] and [interaction::Presenter]: clicks to events, events to
//!           state changes or selection callbacks
//!         - [render]: rows to plain text
//!
//!     A value that is not a node renders as a single inert literal row. Nothing in here fails on
//!     unexpected shapes.

pub mod interaction;
pub mod node_id;
pub mod outline;
pub mod render;

pub use interaction::{hit_test, OutlineEvent, Presenter};
pub use node_id::{resolve, resolve_node, NodeId};
pub use outline::{flatten, NodeRow, OutlineRow, OutlineState, RowKind};
pub use render::{render_row, render_rows};
