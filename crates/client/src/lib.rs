//! Headless client for the encounter resolver.
//!
//! The `encounter` binary loads scenarios through `encounter-content`, drives
//! them with `encounter-runtime`, and narrates the resulting log.
//!
//! - [`commands`] holds the `run`, `inspect` and `verify` subcommands
//! - [`session`] loads a scenario and resolves it end to end
//! - [`render`] turns log entries into narration
//! - [`logging`] sets up tracing output

pub mod commands;
pub mod logging;
pub mod render;
pub mod session;
