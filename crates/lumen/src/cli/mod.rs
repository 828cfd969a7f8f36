//! Command handlers for the `lumen` binary.

pub mod bench;
pub mod config;
pub mod process;
mod setup;
pub mod types;
