//! User interface module - terminal output.
//!
//! - `formatter` - Pure rendering functions and status line helpers
//! - The interactive key loop lives in [crate::session::terminal]

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{display_error, display_success, render_session};
