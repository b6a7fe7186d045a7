//! UI primitives for the Keyholder CLI.
//!
//! - **Context**: environment detection (TTY, color)
//! - **Mode**: output mode resolution (json, plain, pretty)
//! - **Theme**: badge tokens and colors
//! - **Render**: badges, key-value lines, tables, errors
//! - **Progress**: spinner shown while a key is derived

mod context;
pub mod mode;
pub mod progress;
pub mod render;
pub mod theme;

pub use context::UiContext;
pub use theme::Badge;

pub use progress::with_spinner;
pub use render::{badge, hint, kv, print_error, table};
