//! 终端颜色支持模块
//!
//! Styled progress lines. Everything here goes to stdout; `console` drops the
//! colours on its own when stdout is not a terminal.

use console::style;
use std::sync::atomic::{AtomicBool, Ordering};

static QUIET_MODE: AtomicBool = AtomicBool::new(false);

/// Silence every human-readable line (used for `--output json`).
pub fn enable_quiet_mode() {
    QUIET_MODE.store(true, Ordering::Relaxed);
}

pub fn disable_quiet_mode() {
    QUIET_MODE.store(false, Ordering::Relaxed);
}

pub fn is_quiet_mode() -> bool {
    QUIET_MODE.load(Ordering::Relaxed)
}

/// `println!` that respects quiet mode.
#[macro_export]
macro_rules! quiet_println {
    ($($arg:tt)*) => {
        if !$crate::colors::is_quiet_mode() {
            println!($($arg)*);
        }
    };
}

pub const RULE: &str = "============================================================";

/// Banner printed at the start and end of each tool.
pub fn print_header(title: &str) {
    quiet_println!("{}", RULE);
    quiet_println!("{}", style(title).cyan().bold());
    quiet_println!("{}", RULE);
}

pub fn print_rule() {
    quiet_println!("{}", RULE);
}

pub fn print_success(msg: &str) {
    quiet_println!("  {} {}", style("✅").green(), style(msg).green());
}

pub fn print_warning(msg: &str) {
    quiet_println!("{} {}", style("⚠️ ").yellow(), style(msg).yellow());
}

pub fn print_info(msg: &str) {
    quiet_println!("{}", style(msg).cyan());
}

/// `✓ name: 123.4KB → 56.7KB (54.0% reduction)`
pub fn fmt_file_result(name: &str, before_kb: f64, after_kb: f64, reduction: f64) -> String {
    format!(
        "  {} {}: {:.1}KB → {:.1}KB ({} reduction)",
        style("✓").green(),
        name,
        before_kb,
        after_kb,
        fmt_reduction(reduction)
    )
}

/// Green when the file shrank, yellow when it grew.
pub fn fmt_reduction(pct: f64) -> String {
    if pct >= 0.0 {
        format!("{}", style(format!("{:.1}%", pct)).green().bold())
    } else {
        format!("{}", style(format!("{:.1}%", pct)).yellow())
    }
}
