//! Terminal UI for duoloop.
//!
//! Two editor panes side by side, a status header, per-slot output
//! lines, a log panel and a transient error banner. The TUI is a thin
//! input adapter: key events become session commands applied in
//! arrival order, and rendering is a pure projection of session state.

pub mod app;
pub mod editor;
pub mod keyboard;
pub mod layout;
pub mod logger;
pub mod run;
pub mod ui;

pub use run::run;
