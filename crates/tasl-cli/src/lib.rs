//! # tasl-cli
//!
//! Command-line front end for the tasl topic engine.
//!
//! - [`cli`]: Argument definitions
//! - [`commands`]: One function per subcommand
//! - [`config`]: `TaslConfig` loading and path resolution
//! - [`config_handlers`]: `tasl config` subcommands
//! - [`logging`]: Subscriber setup for the binary

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_handlers;
pub mod logging;

pub use cli::{Cli, Command};
pub use config::TaslConfig;
