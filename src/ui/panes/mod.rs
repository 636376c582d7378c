//! TUI pane rendering modules
//!
//! - [`source`]: source text with syntax highlighting and the selected node's line marked
//! - [`tree`]: the indented tree dump with a selection cursor
//! - [`status`]: status bar with keybindings and the selected node
//!
//! Each pane module exports a `render_*` function plus any scroll state it keeps.

pub mod source;
pub mod status;
pub mod tree;

pub use source::{render_source_pane, SourceScrollState};
pub use status::{render_status_bar, StatusRenderData};
pub use tree::{render_tree_pane, TreeScrollState};
