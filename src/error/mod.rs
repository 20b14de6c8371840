//! Error handling module
//!
//! Defines the pipeline error taxonomy and its exit codes

pub mod types;

pub use types::*;
