//! CLI library components for froggy-xverify.

pub mod commands;
pub mod logging;
pub mod types;
