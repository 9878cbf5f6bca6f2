//! Interactive terminal viewer: outline on the left, source on the right
pub mod app;
pub mod fileviewer;
pub mod treeviewer;
pub mod ui;
#[allow(clippy::module_inception)]
pub mod viewer;
pub mod viewer_main;
