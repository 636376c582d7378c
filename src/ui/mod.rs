//! Terminal tree explorer built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! - **[`app`]**: explorer state, keyboard event loop, pane focus
//! - **[`panes`]**: stateless render functions for the source, tree and status panes
//! - **[`theme`]**: color palette shared by all panes
//!
//! Construct an [`App`] from a parsed [`Program`] and call [`App::run`]; take the
//! tree back with [`App::into_program`] when the loop ends.
//!
//! [`Program`]: crate::parser::ast::Program
//! [`App::run`]: app::App::run
//! [`App::into_program`]: app::App::into_program

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
