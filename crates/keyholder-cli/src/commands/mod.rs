//! Command handlers, one module per command group.

pub mod admin;
pub mod init;
pub mod keys;
pub mod maintenance;
pub mod misc;
