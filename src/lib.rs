//! tprompt - terminal prompt with tree-structured completion
//!
//! Library crate exposing the components used by the binary: the item tree read from
//! stdin, the edit buffer with its undo log, matching, and the terminal UI.
//!
//! Tests live close to the modules they exercise as unit tests.

pub mod buffer;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod files;
pub mod history;
pub mod item;
pub mod keymap;
pub mod logging;
pub mod matcher;
pub mod ui;
pub mod undo;
