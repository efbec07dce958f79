//! Activity recognition viewer CLI library.
//!
//! This crate provides the terminal front end for the activity recognition core.

mod cli;
pub mod commands;
mod config;
pub mod screen;

pub use cli::{Cli, Commands, ViewArgs};
pub use config::{Config, DisplayZone};
