//! Terminal presentation for the CLI
//!
//! Plain line-oriented output styled with `console`; colors and progress
//! bars are only used on interactive terminals.
//!
//! # Example
//!
//! ```rust,ignore
//! use depinject::ui::{self, UiContext};
//!
//! let ctx = UiContext::detect();
//! ui::step_ok(&ctx, "org.example:lib:1.0.0", ".dependencies/org/example/lib/1.0.0/lib-1.0.0.jar");
//! ```

mod context;
mod output;

pub use context::UiContext;
pub use output::{key_value, section, step_error, step_info, step_ok};
