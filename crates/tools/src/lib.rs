//! Shared plumbing for the command-line front ends.

pub mod checks;
pub mod logging;
pub mod settings;
