//! CLI command implementations.

pub mod common;
pub mod strategies;
pub mod synth;
pub mod verify;
pub mod version;
