//! Core types, configuration and error handling

pub mod config;
pub mod context;
pub mod error;
pub mod types;
