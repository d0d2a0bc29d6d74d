//! Command implementations, one module per group of subcommands.

pub mod calc;
pub mod config;
pub mod list;
pub mod render;
