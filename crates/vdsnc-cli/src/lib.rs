//! vdsnc CLI library — command implementations and trust configuration.
#![deny(warnings, clippy::all, clippy::pedantic)]
#![warn(missing_docs)]

/// CLI subcommand implementations.
pub mod commands;
/// Trust configuration — read `trust.toml` and build the store from it.
pub mod config;
