//! # pastenow
//!
//! Bootstrap and command-line shell for the pastenow clipboard history
//! manager. The engine itself lives in the `pn-*` workspace crates.

pub mod bootstrap;
pub mod cli;

pub use cli::{execute, run_command, Cli, Command};
