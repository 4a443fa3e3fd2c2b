//! Shared domain types for the Strategos crates: the error enum, provider
//! message and stream types, configuration, and structured trace events.

pub mod config;
pub mod error;
pub mod message;
pub mod stream;
pub mod trace;
