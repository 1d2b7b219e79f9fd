//! # uplink-core
//!
//! Core types, errors, and configuration for Uplink.
//!
//! This crate provides the foundational building blocks used across the
//! other crates:
//! - Opaque identifier newtypes (temporary, durable, distribution, version)
//! - The file-kind classifier driving preview strategy selection
//! - Error types and result aliases
//! - Uploader configuration

pub mod config;
pub mod error;
pub mod types;

pub use config::*;
pub use error::*;
pub use types::*;
