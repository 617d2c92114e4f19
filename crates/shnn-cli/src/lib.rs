//! snn-connect CLI crate
//!
//! Builds connection registries from TOML network descriptions and exposes
//! the `build`, `query` and `types` commands. The library view re-exports
//! [`ConnectCli`] and the description loader so integration tests can drive
//! commands without spawning a process.

pub mod commands;
pub mod config;
pub mod error;
pub mod network;

pub use commands::ConnectCli;
pub use config::NetworkDescription;
pub use network::{build_network, BuiltNetwork};
