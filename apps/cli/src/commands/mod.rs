//! Command implementations for the Vidsplit CLI.

pub mod generate;
pub mod show;
