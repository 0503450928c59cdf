//! Stride core library — message formats, ADF document envelope, HTTP client,
//! and configuration used by the CLI.

pub mod client;
pub mod config;
pub mod document;
pub mod message;
