//! cscheck CLI library
//!
//! Configuration, output formatting, progress rendering and terminal
//! detection used by the `cscheck` binary.

pub mod config;
pub mod output;
pub mod progress;
pub mod terminal;
