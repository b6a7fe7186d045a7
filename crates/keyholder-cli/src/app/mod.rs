//! Application-level utilities for the Keyholder CLI.
//!
//! This module provides:
//! - Path resolution for config and database files
//! - A lazily-loaded application context shared by command handlers

mod context;
mod resolver;

pub use context::AppContext;
