//! Report Module
//!
//! Summary boxes printed at the end of a run.

use crate::batch::BatchResult;
use crate::common_utils::{percent_reduction, to_kb};
use crate::quiet_println;
use std::time::Duration;

pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 3600 {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    } else if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{:.1}s", duration.as_secs_f64())
    }
}

pub fn print_summary_report(
    result: &BatchResult,
    duration: Duration,
    input_bytes: u64,
    output_bytes: u64,
    operation_name: &str,
) {
    let reduction = percent_reduction(input_bytes, output_bytes);

    quiet_println!();
    quiet_println!("╔══════════════════════════════════════════════════════════╗");
    quiet_println!("║  📊 {:<52} ║", format!("{} Summary", operation_name));
    quiet_println!("╠══════════════════════════════════════════════════════════╣");
    quiet_println!("║  📁 Files Processed:    {:>10}                       ║", result.total);
    quiet_println!("║  ✅ Succeeded:          {:>10}                       ║", result.succeeded);
    quiet_println!("║  ❌ Failed:             {:>10}                       ║", result.failed);
    quiet_println!("╠══════════════════════════════════════════════════════════╣");
    quiet_println!(
        "║  💾 Input Size:         {:>10}                       ║",
        format!("{:.1}KB", to_kb(input_bytes))
    );
    quiet_println!(
        "║  💾 Output Size:        {:>10}                       ║",
        format!("{:.1}KB", to_kb(output_bytes))
    );
    quiet_println!("║  📉 Size Reduction:     {:>9.1}%                       ║", reduction);
    quiet_println!(
        "║  ⏱️  Total Time:         {:>10}                       ║",
        format_duration(duration)
    );
    quiet_println!("╚══════════════════════════════════════════════════════════╝");

    if !result.errors.is_empty() {
        quiet_println!();
        quiet_println!("❌ Errors encountered:");
        for (path, error) in &result.errors {
            quiet_println!("   {} → {}", path.display(), error);
        }
    }
}

/// Page-level summary for the markup updater.
pub fn print_page_summary(updated: usize, skipped: usize, warnings: &[String]) {
    quiet_println!();
    quiet_println!(
        "📄 Pages: {} updated, {} skipped (total: {})",
        updated,
        skipped,
        updated + skipped
    );
    if !warnings.is_empty() {
        quiet_println!("⚠️  Warnings:");
        for warning in warnings {
            quiet_println!("   • {}", warning);
        }
    }
}
