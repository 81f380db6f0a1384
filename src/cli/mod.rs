//! CLI command handlers.
//!
//! Testable handlers invoked by main.rs. The `view` handler drives a table
//! the way an interactive caller would: filter edits, sort clicks and row
//! clicks are replayed in order before the view is rendered once.

mod output;
mod view;

pub use output::{OutputTarget, write_output};
pub use view::run_view;

pub use crate::config::ViewConfig;

/// Exit codes for CLI commands
pub mod exit_codes {
    /// At least one row is shown
    pub const SUCCESS: i32 = 0;
    /// The view is empty after filtering
    pub const NO_ROWS: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}
