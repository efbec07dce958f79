//! CLI subcommand implementations.

pub mod replay;
pub mod show;
