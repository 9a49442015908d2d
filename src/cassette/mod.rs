//! Record/replay infrastructure for running the server without network access.

pub mod config;
pub mod format;
pub mod recorder;
pub mod replayer;
