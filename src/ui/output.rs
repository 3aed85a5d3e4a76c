//! Output functions for consistent CLI formatting

use super::context::UiContext;
use console::style;

/// Display a section header
pub fn section(_ctx: &UiContext, title: &str) {
    println!("{}", style(title).bold());
}

/// Display a success step with detail
pub fn step_ok(ctx: &UiContext, message: &str, detail: &str) {
    if ctx.is_interactive() {
        println!("  {} {} {}", style("✓").green(), message, style(detail).dim());
    } else {
        println!("  {} {} ({})", style("[OK]").green(), message, detail);
    }
}

/// Display an informational step
pub fn step_info(ctx: &UiContext, message: &str) {
    if ctx.is_interactive() {
        println!("  {} {}", style("•").cyan(), message);
    } else {
        println!("  {} {}", style("[INFO]").cyan(), message);
    }
}

/// Display an error step
pub fn step_error(ctx: &UiContext, message: &str) {
    if ctx.is_interactive() {
        eprintln!("  {} {}", style("✗").red(), message);
    } else {
        eprintln!("  {} {}", style("[FAIL]").red(), message);
    }
}

/// Display an aligned key-value line
pub fn key_value(key: &str, value: &str) {
    println!("  {:<10} {}", style(key).dim(), value);
}
