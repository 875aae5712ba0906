//! Core library for the `xtop` CLI.
//!
//! This crate provides the internal building blocks used by the binary: CLI
//! argument types, the probe worker pool, tally aggregation, and the terminal
//! dashboard. The primary user-facing interface is the `xtop` command-line
//! application; library APIs may evolve as the CLI grows.
pub mod app;
pub mod args;
pub mod entry;
pub mod error;
pub mod logger;
pub mod metrics;
pub mod probe;
pub mod shutdown;
pub mod shutdown_handlers;
pub mod target;
pub mod ui;
