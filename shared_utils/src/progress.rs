//! Progress bar for per-folder batches.
//!
//! The bar lives on stderr; result lines are printed through
//! [`FolderProgress::println`] so they land on stdout without tearing the bar.

use crate::colors::is_quiet_mode;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::IsTerminal;
use std::time::Duration;

const BATCH_TEMPLATE: &str = "{spinner:.cyan} {prefix:.bold} [{bar:30.cyan/blue}] {pos}/{len} {wide_msg}";
const PROGRESS_CHARS: &str = "█▓░";

pub struct FolderProgress {
    bar: ProgressBar,
}

impl FolderProgress {
    /// Hidden in quiet mode or when stderr is not a terminal.
    pub fn new(total: u64, prefix: &str) -> Self {
        let bar = ProgressBar::new(total);

        if is_quiet_mode() || !std::io::stderr().is_terminal() {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        } else if let Ok(style) = ProgressStyle::default_bar().template(BATCH_TEMPLATE) {
            bar.set_style(style.progress_chars(PROGRESS_CHARS));
            bar.set_prefix(prefix.to_string());
            bar.enable_steady_tick(Duration::from_millis(100));
        }

        Self { bar }
    }

    pub fn set_current_file(&self, name: &str) {
        self.bar.set_message(name.to_string());
    }

    /// Print a line on stdout, even while the bar is hidden.
    pub fn println(&self, line: &str) {
        self.bar.suspend(|| crate::quiet_println!("{}", line));
    }

    pub fn inc(&self) {
        self.bar.inc(1);
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
